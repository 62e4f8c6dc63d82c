use crate::error::ConfigError;
use crate::geo::Coordinate;
use crate::render::osrm::{DEFAULT_OSRM_URL, DEFAULT_PROFILE};
use crate::routing::partition::DEFAULT_CAPACITY;
use crate::routing::tour::TourStrategy;
use crate::routing::{OptimizerConfig, DEFAULT_DEPOT, DEFAULT_RENDER_CONCURRENCY};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub depot: Coordinate,
    pub capacity: usize,
    pub strategy: TourStrategy,
    pub osrm_url: String,
    pub osrm_profile: String,
    pub osrm_timeout: Duration,
    pub render_paths: bool,
    pub render_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depot: DEFAULT_DEPOT,
            capacity: DEFAULT_CAPACITY,
            strategy: TourStrategy::default(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            osrm_profile: DEFAULT_PROFILE.to_string(),
            osrm_timeout: Duration::from_secs(10),
            render_paths: true,
            render_concurrency: DEFAULT_RENDER_CONCURRENCY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source; unset variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let depot = Coordinate::new(
            parse_or(&lookup, "DEPOT_LAT", defaults.depot.lat)?,
            parse_or(&lookup, "DEPOT_LNG", defaults.depot.lng)?,
        );
        depot.validate().map_err(|reason| {
            ConfigError::invalid("DEPOT_LAT/DEPOT_LNG", depot.to_string(), reason)
        })?;

        let capacity: usize = parse_or(&lookup, "ROUTE_CAPACITY", defaults.capacity)?;
        if capacity == 0 {
            return Err(ConfigError::invalid("ROUTE_CAPACITY", "0", "must be at least 1"));
        }

        let strategy = match lookup("TOUR_STRATEGY") {
            None => defaults.strategy,
            Some(raw) => match raw.trim() {
                "nearest-neighbor" => TourStrategy::NearestNeighbor,
                "two-opt" | "nearest-neighbor-two-opt" => TourStrategy::NearestNeighborTwoOpt,
                _ => {
                    return Err(ConfigError::invalid(
                        "TOUR_STRATEGY",
                        raw.clone(),
                        "expected nearest-neighbor or two-opt",
                    ))
                }
            },
        };

        let timeout_secs: u64 = parse_or(&lookup, "OSRM_TIMEOUT_SECS", defaults.osrm_timeout.as_secs())?;

        Ok(Config {
            depot,
            capacity,
            strategy,
            osrm_url: lookup("OSRM_URL").unwrap_or(defaults.osrm_url),
            osrm_profile: lookup("OSRM_PROFILE").unwrap_or(defaults.osrm_profile),
            osrm_timeout: Duration::from_secs(timeout_secs),
            render_paths: parse_or(&lookup, "RENDER_PATHS", defaults.render_paths)?,
            render_concurrency: parse_or(&lookup, "RENDER_CONCURRENCY", defaults.render_concurrency)?
                .max(1),
        })
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            depot: self.depot,
            capacity: self.capacity,
            strategy: self.strategy,
            render_concurrency: self.render_concurrency,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, raw.clone(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.capacity, 20);
        assert_eq!(config.depot, Coordinate::new(33.479905, -7.622541));
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DEPOT_LAT", "48.8566"),
            ("DEPOT_LNG", "2.3522"),
            ("ROUTE_CAPACITY", "8"),
            ("TOUR_STRATEGY", "two-opt"),
            ("OSRM_URL", "http://localhost:5000"),
            ("OSRM_TIMEOUT_SECS", "3"),
            ("RENDER_PATHS", "false"),
            ("RENDER_CONCURRENCY", "0"),
        ]))
        .unwrap();

        assert_eq!(config.depot, Coordinate::new(48.8566, 2.3522));
        assert_eq!(config.capacity, 8);
        assert_eq!(config.strategy, TourStrategy::NearestNeighborTwoOpt);
        assert_eq!(config.osrm_url, "http://localhost:5000");
        assert_eq!(config.osrm_timeout, Duration::from_secs(3));
        assert!(!config.render_paths);
        assert_eq!(config.render_concurrency, 1);

        let optimizer = config.optimizer_config();
        assert_eq!(optimizer.capacity, 8);
        assert_eq!(optimizer.depot, config.depot);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("ROUTE_CAPACITY", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("ROUTE_CAPACITY", "many")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DEPOT_LAT", "91")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TOUR_STRATEGY", "genetic")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RENDER_PATHS", "maybe")])).is_err());
    }
}
