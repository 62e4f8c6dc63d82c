pub mod osrm;

use crate::error::RouteUnavailable;
use crate::geo::Coordinate;
use async_trait::async_trait;

pub use osrm::OsrmClient;

/// Turns one leg between two stops into a road-following polyline.
#[async_trait]
pub trait PathRenderer: Send + Sync {
    /// Ordered coordinates tracing a real path from `start` to `end`.
    async fn render(&self, start: Coordinate, end: Coordinate)
        -> Result<Vec<Coordinate>, RouteUnavailable>;
}
