//! Client for the OSRM `route` service.
//!
//! OSRM speaks `[longitude, latitude]`; everything leaving this module is
//! `[latitude, longitude]`.

use super::PathRenderer;
use crate::error::RouteUnavailable;
use crate::geo::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_PROFILE: &str = "driving";

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RouteUnavailable> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("route-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RouteUnavailable::Network(e.to_string()))?;

        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn route_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, start.lng, start.lat, end.lng, end.lat
        )
    }
}

#[async_trait]
impl PathRenderer for OsrmClient {
    async fn render(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, RouteUnavailable> {
        let url = self.route_url(start, end);

        let resp = self.http.get(&url).send().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "OSRM request failed");
            RouteUnavailable::Network(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RouteUnavailable::Status(status.as_u16()));
        }

        let body: OsrmResponse = resp
            .json()
            .await
            .map_err(|e| RouteUnavailable::Malformed(e.to_string()))?;

        if body.code != "Ok" {
            return Err(RouteUnavailable::NoRoute(
                body.message.unwrap_or(body.code),
            ));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteUnavailable::NoRoute("response contained no routes".to_string()))?;

        Ok(route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Coordinate::new(lat, lng))
            .collect())
    }
}
