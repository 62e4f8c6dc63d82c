pub mod config;
pub mod error;
pub mod geo;
pub mod graph;
pub mod logging;
pub mod render;
pub mod routing;

pub use config::Config;
pub use error::{ConfigError, OptimizeError, RouteUnavailable};
pub use geo::{distance, Coordinate};
pub use graph::{ShortestPath, ShortestPathGraph};
pub use render::{OsrmClient, PathRenderer};
pub use routing::models::{OptimizeRequest, PlannedRoute, Route, RoutesResponse};
pub use routing::{OptimizerConfig, Overrides, RouteOptimizer};

use std::sync::Arc;

/// Builds the optimizer described by `config`, wiring in the OSRM renderer
/// when path rendering is enabled.
pub fn build_optimizer(config: &Config) -> Result<RouteOptimizer, RouteUnavailable> {
    if !config.render_paths {
        return Ok(RouteOptimizer::new(config.optimizer_config()));
    }

    let osrm = OsrmClient::new(config.osrm_url.clone(), config.osrm_timeout)?
        .with_profile(config.osrm_profile.clone());

    Ok(RouteOptimizer::with_renderer(
        config.optimizer_config(),
        Arc::new(osrm),
    ))
}
