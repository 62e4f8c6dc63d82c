//! Weighted undirected graph with label-setting (Dijkstra) shortest paths.
//!
//! Node identifiers are opaque: road-network junction ids, names, anything
//! hashable and ordered. Edge weights must be non-negative; this is not
//! checked and negative weights give wrong answers.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath<N> {
    pub cost: f64,
    pub path: Vec<N>,
}

impl<N> ShortestPath<N> {
    /// Sentinel for "no connecting path": infinite cost, empty path.
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite() && !self.path.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ShortestPathGraph<N> {
    adjacency: HashMap<N, Vec<(N, f64)>>,
}

impl<N> Default for ShortestPathGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<N> ShortestPathGraph<N>
where
    N: Eq + Hash + Ord + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight);
        }
        graph
    }

    /// Adds an undirected edge; both directions are inserted.
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.adjacency
            .entry(from.clone())
            .or_default()
            .push((to.clone(), weight));
        self.adjacency.entry(to).or_default().push((from, weight));
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn neighbors(&self, node: &N) -> &[(N, f64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges added (parallel edges counted separately).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Cheapest path from `start` to `end`.
    ///
    /// Returns as soon as `end` is settled. `start == end` costs zero even
    /// when the node has no edges; any other query touching an unknown node
    /// is unreachable.
    pub fn shortest_path(&self, start: &N, end: &N) -> ShortestPath<N> {
        if start == end {
            return ShortestPath {
                cost: 0.0,
                path: vec![start.clone()],
            };
        }

        let mut frontier = BinaryHeap::new();
        let mut settled: HashSet<N> = HashSet::new();
        let mut best: HashMap<N, f64> = HashMap::new();
        let mut previous: HashMap<N, N> = HashMap::new();

        best.insert(start.clone(), 0.0);
        frontier.push(Reverse((OrderedFloat(0.0), start.clone())));

        while let Some(Reverse((OrderedFloat(cost), node))) = frontier.pop() {
            if !settled.insert(node.clone()) {
                continue;
            }

            if &node == end {
                return ShortestPath {
                    cost,
                    path: reconstruct(&previous, start, end),
                };
            }

            for (neighbor, weight) in self.neighbors(&node) {
                if settled.contains(neighbor) {
                    continue;
                }

                let next = cost + weight;
                let improves = best.get(neighbor).map_or(true, |&known| next < known);
                if improves {
                    best.insert(neighbor.clone(), next);
                    previous.insert(neighbor.clone(), node.clone());
                    frontier.push(Reverse((OrderedFloat(next), neighbor.clone())));
                }
            }
        }

        ShortestPath::unreachable()
    }
}

fn reconstruct<N>(previous: &HashMap<N, N>, start: &N, end: &N) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path = vec![end.clone()];
    let mut current = end;
    while current != start {
        match previous.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
