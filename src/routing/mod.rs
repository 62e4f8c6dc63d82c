pub mod models;
pub mod partition;
pub mod tour;

use crate::error::OptimizeError;
use crate::geo::Coordinate;
use crate::render::PathRenderer;
use futures::stream::{self, StreamExt};
use models::{PlannedRoute, Route};
use partition::{partition, DEFAULT_CAPACITY};
use std::sync::Arc;
use tour::TourStrategy;

/// Ecole Centrale Casablanca, Bouskoura.
pub const DEFAULT_DEPOT: Coordinate = Coordinate::new(33.479905, -7.622541);

/// How many segment renders of one route may be in flight at once.
pub const DEFAULT_RENDER_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    pub depot: Coordinate,
    pub capacity: usize,
    pub strategy: TourStrategy,
    pub render_concurrency: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            capacity: DEFAULT_CAPACITY,
            strategy: TourStrategy::default(),
            render_concurrency: DEFAULT_RENDER_CONCURRENCY,
        }
    }
}

/// Per-call replacements for the configured depot and capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub depot: Option<Coordinate>,
    pub capacity: Option<usize>,
}

#[derive(Clone)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
    renderer: Option<Arc<dyn PathRenderer>>,
}

impl RouteOptimizer {
    /// Optimizer that returns bare stop sequences, without road geometry.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            renderer: None,
        }
    }

    pub fn with_renderer(config: OptimizerConfig, renderer: Arc<dyn PathRenderer>) -> Self {
        Self {
            config,
            renderer: Some(renderer),
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn plan(&self, points: &[Coordinate]) -> Result<Vec<PlannedRoute>, OptimizeError> {
        self.plan_with(points, Overrides::default())
    }

    /// Validates, partitions and orders `points` without fetching geometry.
    pub fn plan_with(
        &self,
        points: &[Coordinate],
        overrides: Overrides,
    ) -> Result<Vec<PlannedRoute>, OptimizeError> {
        let depot = overrides.depot.unwrap_or(self.config.depot);
        let capacity = overrides.capacity.unwrap_or(self.config.capacity);

        depot
            .validate()
            .map_err(|reason| OptimizeError::invalid_input(format!("depot: {reason}")))?;
        let partitions = partition(points, capacity)?;

        tracing::info!(
            points     = points.len(),
            capacity,
            partitions = partitions.len(),
            depot      = %depot,
            "Planning delivery routes"
        );

        let plans = partitions
            .into_iter()
            .enumerate()
            .map(|(vehicle, points)| {
                let (tour, matrix) = tour::build_tour_with(&points, depot, self.config.strategy);
                let distance_km = tour.length(&matrix);
                tracing::debug!(vehicle, stops = points.len(), distance_km, "Built tour");

                PlannedRoute {
                    stops: tour.stops(depot, &points),
                    partition: points,
                    tour,
                    distance_km,
                }
            })
            .collect();

        Ok(plans)
    }

    pub async fn optimize(&self, points: &[Coordinate]) -> Result<Vec<Route>, OptimizeError> {
        self.optimize_with(points, Overrides::default()).await
    }

    /// Plans every partition, then expands each tour into road geometry when
    /// a renderer is configured.
    ///
    /// Segments the renderer cannot produce are left out of the geometry and
    /// listed in [`Route::skipped_segments`]; they never fail the call.
    pub async fn optimize_with(
        &self,
        points: &[Coordinate],
        overrides: Overrides,
    ) -> Result<Vec<Route>, OptimizeError> {
        let plans = self.plan_with(points, overrides)?;

        let Some(renderer) = &self.renderer else {
            return Ok(plans.into_iter().map(Route::unrendered).collect());
        };

        let mut routes = Vec::with_capacity(plans.len());
        for (vehicle, plan) in plans.into_iter().enumerate() {
            routes.push(self.render_route(renderer.as_ref(), vehicle, plan).await);
        }

        let degraded = routes.iter().filter(|r| r.is_degraded()).count();
        tracing::info!(routes = routes.len(), degraded, "Optimized delivery routes");

        Ok(routes)
    }

    async fn render_route(
        &self,
        renderer: &dyn PathRenderer,
        vehicle: usize,
        plan: PlannedRoute,
    ) -> Route {
        let concurrency = self.config.render_concurrency.max(1);

        // buffered() yields in input order, so segments come back by index
        let results: Vec<_> = stream::iter(plan.segments().enumerate().collect::<Vec<_>>())
            .map(|(segment, (start, end))| async move {
                (segment, start, end, renderer.render(start, end).await)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut geometry = Vec::new();
        let mut skipped_segments = Vec::new();
        for (segment, start, end, result) in results {
            match result {
                Ok(path) => geometry.extend(path),
                Err(e) => {
                    tracing::warn!(
                        vehicle,
                        segment,
                        start = %start,
                        end   = %end,
                        error = %e,
                        "Skipping segment without road geometry"
                    );
                    skipped_segments.push(segment);
                }
            }
        }

        Route {
            tour: plan.tour,
            stops: plan.stops,
            geometry,
            distance_km: plan.distance_km,
            skipped_segments,
        }
    }
}

impl std::fmt::Debug for RouteOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteOptimizer")
            .field("config", &self.config)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
