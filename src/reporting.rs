use serde::Serialize;

use crate::config::SimConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Collects raw samples of one metric and summarises them on demand.
#[derive(Debug, Clone, Default)]
pub struct MetricAggregator {
    samples: Vec<f64>,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        if value.is_finite() {
            self.samples.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> MetricSummary {
        if self.samples.is_empty() {
            return MetricSummary::default();
        }
        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);
        let sum: f64 = sorted.iter().sum();

        MetricSummary {
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: sum / sorted.len() as f64,
            p50: nearest_rank(&sorted, 0.50),
            p90: nearest_rank(&sorted, 0.90),
            p95: nearest_rank(&sorted, 0.95),
            p99: nearest_rank(&sorted, 0.99),
        }
    }
}

/// Nearest-rank percentile over an ascending, non-empty slice.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let rank = (p.clamp(0.0, 1.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// Outcome of a headless soak run.
#[derive(Debug, Clone, Serialize)]
pub struct SoakReport {
    pub seed: u64,
    pub simulated_seconds: f32,
    pub ticks: u64,
    pub tick_micros: MetricSummary,
    pub live_food: MetricSummary,
    pub alive_snakes: MetricSummary,
    pub total_deaths: u64,
    pub wall_deaths: u64,
    pub head_to_head_deaths: u64,
    pub body_hit_deaths: u64,
    pub food_target: usize,
    pub max_live_food: usize,
    pub player_score: u32,
    pub player_kills: u32,
    pub top_score: u32,
}

impl SoakReport {
    /// Live food should never overshoot the density target by more than one batch.
    pub fn food_within_bounds(&self, config: &SimConfig) -> bool {
        self.max_live_food <= self.food_target.max(config.initial_food_count) + config.food_spawn_batch_max
    }
}
