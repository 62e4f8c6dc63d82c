use crate::geo::{self, Coordinate};
use serde::{Deserialize, Serialize};

/// Smallest gain a 2-opt move must achieve to be applied, in km.
const TWO_OPT_EPSILON: f64 = 1e-9;

/// How a partition's visiting order is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourStrategy {
    /// Greedy nearest unvisited neighbour, ties to the lowest index.
    #[default]
    NearestNeighbor,
    /// Greedy construction followed by 2-opt segment reversal.
    #[serde(alias = "two-opt")]
    NearestNeighborTwoOpt,
}

/// Pairwise great-circle distances over `[depot, points...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_coordinates(nodes: &[Coordinate]) -> Self {
        let size = nodes.len();
        let mut cells = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = geo::distance(nodes[i], nodes[j]);
                cells[i * size + j] = d;
                cells[j * size + i] = d;
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.size + to]
    }
}

/// Node indices into a partition's augmented list; index 0 is the depot.
///
/// Always starts and ends at 0 and visits every other index exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Closed-loop length in km.
    pub fn length(&self, matrix: &DistanceMatrix) -> f64 {
        self.0.windows(2).map(|w| matrix.get(w[0], w[1])).sum()
    }

    /// Maps the indices back onto `[depot, points...]`.
    pub fn stops(&self, depot: Coordinate, points: &[Coordinate]) -> Vec<Coordinate> {
        self.0
            .iter()
            .map(|&i| if i == 0 { depot } else { points[i - 1] })
            .collect()
    }
}

/// Augmented node list: the depot followed by the partition's points.
pub fn augmented_nodes(partition: &[Coordinate], depot: Coordinate) -> Vec<Coordinate> {
    let mut nodes = Vec::with_capacity(partition.len() + 1);
    nodes.push(depot);
    nodes.extend_from_slice(partition);
    nodes
}

pub fn build_tour(partition: &[Coordinate], depot: Coordinate) -> Tour {
    let matrix = DistanceMatrix::from_coordinates(&augmented_nodes(partition, depot));
    nearest_neighbor(&matrix)
}

pub fn build_tour_with(
    partition: &[Coordinate],
    depot: Coordinate,
    strategy: TourStrategy,
) -> (Tour, DistanceMatrix) {
    let matrix = DistanceMatrix::from_coordinates(&augmented_nodes(partition, depot));
    let tour = nearest_neighbor(&matrix);
    let tour = match strategy {
        TourStrategy::NearestNeighbor => tour,
        TourStrategy::NearestNeighborTwoOpt => two_opt(tour, &matrix),
    };
    (tour, matrix)
}

/// Greedy tour from node 0, always moving to the closest unvisited node.
pub fn nearest_neighbor(matrix: &DistanceMatrix) -> Tour {
    let n = matrix.size();
    let mut order = Vec::with_capacity(n + 1);
    if n == 0 {
        return Tour(order);
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    order.push(0);

    for _ in 1..n {
        let last = order[order.len() - 1];

        // min_by keeps the first of equal minima, so ties go to the lower index
        let next = (0..n)
            .filter(|&j| !visited[j])
            .min_by(|&a, &b| matrix.get(last, a).total_cmp(&matrix.get(last, b)));

        match next {
            Some(j) => {
                visited[j] = true;
                order.push(j);
            }
            None => break,
        }
    }

    order.push(0);
    Tour(order)
}

/// First-improvement 2-opt over a closed tour; both depot ends stay fixed.
pub fn two_opt(tour: Tour, matrix: &DistanceMatrix) -> Tour {
    let mut path = tour.0;
    let n = path.len();
    if n < 5 {
        return Tour(path);
    }

    let mut improved = true;

    while improved {
        improved = false;

        for i in 0..n - 2 {
            for j in i + 2..n {
                let a = path[i];
                let b = path[i + 1];
                let c = path[j - 1];
                let d = path[j];

                let current = matrix.get(a, b) + matrix.get(c, d);
                let swapped = matrix.get(a, c) + matrix.get(b, d);

                if swapped + TWO_OPT_EPSILON < current {
                    path[i + 1..j].reverse();
                    improved = true;
                }
            }
        }
    }

    Tour(path)
}
