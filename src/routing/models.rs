use super::tour::Tour;
use crate::error::OptimizeError;
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// A partition's visiting order before any geometry is fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRoute {
    pub partition: Vec<Coordinate>,
    pub tour: Tour,
    /// Depot, points in tour order, depot.
    pub stops: Vec<Coordinate>,
    pub distance_km: f64,
}

impl PlannedRoute {
    /// Consecutive stop pairs, in driving order.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.stops.windows(2).map(|w| (w[0], w[1]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub tour: Tour,
    pub stops: Vec<Coordinate>,
    /// What a map should draw: rendered segments concatenated, or the bare
    /// stops when no renderer is configured.
    pub geometry: Vec<Coordinate>,
    pub distance_km: f64,
    /// Segment indices whose geometry could not be fetched.
    pub skipped_segments: Vec<usize>,
}

impl Route {
    pub fn unrendered(plan: PlannedRoute) -> Self {
        Self {
            geometry: plan.stops.clone(),
            tour: plan.tour,
            stops: plan.stops,
            distance_km: plan.distance_km,
            skipped_segments: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.skipped_segments.is_empty()
    }
}

/// One delivery point as sent by a client.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointInput {
    Pair(Vec<f64>),
    LatLng { lat: f64, lng: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(alias = "points")]
    pub selected_points: Vec<serde_json::Value>,
    #[serde(default)]
    pub depot: Option<Coordinate>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl OptimizeRequest {
    pub fn points(&self) -> Result<Vec<Coordinate>, OptimizeError> {
        parse_points(&self.selected_points)
    }
}

/// Parses raw JSON points, accepting `[lat, lng]` or `{"lat", "lng"}`.
///
/// Fails on the first element that is neither, naming its index.
pub fn parse_points(values: &[serde_json::Value]) -> Result<Vec<Coordinate>, OptimizeError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| parse_point(index, value))
        .collect()
}

fn parse_point(index: usize, value: &serde_json::Value) -> Result<Coordinate, OptimizeError> {
    let invalid = || {
        OptimizeError::invalid_input(format!(
            "point {index}: expected [latitude, longitude] pair, got {value}"
        ))
    };

    match PointInput::deserialize(value).map_err(|_| invalid())? {
        PointInput::Pair(pair) => match pair.as_slice() {
            &[lat, lng] => Ok(Coordinate::new(lat, lng)),
            _ => Err(invalid()),
        },
        PointInput::LatLng { lat, lng } => Ok(Coordinate::new(lat, lng)),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<Vec<Coordinate>>,
}

impl From<&[Route]> for RoutesResponse {
    fn from(routes: &[Route]) -> Self {
        Self {
            routes: routes.iter().map(|r| r.geometry.clone()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&OptimizeError> for ErrorResponse {
    fn from(e: &OptimizeError) -> Self {
        Self {
            error: e.to_string(),
            kind: e.kind().to_string(),
        }
    }
}
