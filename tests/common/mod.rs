#![allow(dead_code)]

use async_trait::async_trait;
use route_planner::{Coordinate, PathRenderer, RouteUnavailable};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Renders every leg as `[start, midpoint, end]`, failing the legs that
/// start at one of `failing_starts`.
#[derive(Default)]
pub struct FakeRenderer {
    pub failing_starts: Vec<Coordinate>,
    pub calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn failing_from(starts: Vec<Coordinate>) -> Self {
        Self {
            failing_starts: starts,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}

#[async_trait]
impl PathRenderer for FakeRenderer {
    async fn render(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, RouteUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_starts.contains(&start) {
            return Err(RouteUnavailable::Status(503));
        }
        Ok(vec![start, midpoint(start, end), end])
    }
}

/// Renderer that never succeeds.
pub struct DownRenderer;

#[async_trait]
impl PathRenderer for DownRenderer {
    async fn render(
        &self,
        _start: Coordinate,
        _end: Coordinate,
    ) -> Result<Vec<Coordinate>, RouteUnavailable> {
        Err(RouteUnavailable::Network("connection refused".to_string()))
    }
}

/// Casablanca-area points laid out on a small grid, deterministic.
pub fn casablanca_points(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            let row = (i / 9) as f64;
            let col = (i % 9) as f64;
            Coordinate::new(33.55 + row * 0.006 + col * 0.0004, -7.65 + col * 0.007 - row * 0.0003)
        })
        .collect()
}

/// Checks the tour shape: closed at index 0, every point exactly once.
pub fn assert_permutation_cycle(indices: &[usize], points: usize) {
    assert_eq!(indices.len(), points + 2, "tour {indices:?}");
    assert_eq!(indices.first(), Some(&0));
    assert_eq!(indices.last(), Some(&0));

    let mut inner = indices[1..indices.len() - 1].to_vec();
    inner.sort_unstable();
    assert_eq!(inner, (1..=points).collect::<Vec<_>>(), "tour {indices:?}");
}
