// All tunable simulation constants in one place.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// Arena
pub const ARENA_WIDTH: f32 = 6000.0; // 300 tiles x 20px
pub const ARENA_HEIGHT: f32 = 6000.0;
pub const ARENA_TILE_SIZE: f32 = 20.0;

// Snakes
pub const SNAKE_BASE_SPEED: f32 = 200.0; // px per second
pub const SNAKE_BOOST_MULTIPLIER: f32 = 2.0;
pub const SNAKE_HEAD_RADIUS: f32 = 10.0;
pub const SNAKE_BODY_RADIUS: f32 = 8.0; // smaller than the head for forgiving body hits
pub const SNAKE_SEGMENT_SIZE: f32 = 20.0;
pub const SNAKE_START_LENGTH: usize = 5;
pub const SNAKE_GROWTH_RATE: f32 = 0.01;

// Energy / boost
pub const ENERGY_MAX: f32 = 100.0;
pub const ENERGY_DRAIN_RATE: f32 = 10.0; // per second while boosting
pub const ENERGY_REFILL_PER_FOOD: f32 = 20.0;

// Food
pub const FOOD_RADIUS: f32 = 7.0;
pub const FOOD_DENSITY_TARGET: f32 = 0.02; // fraction of arena tiles
pub const FOOD_TIER1_SPAWN_RATE: f32 = 0.70;
pub const FOOD_TIER2_SPAWN_RATE: f32 = 0.20;
pub const FOOD_TIER3_SPAWN_RATE: f32 = 0.10;
pub const FOOD_SPAWN_CHECK_INTERVAL: f32 = 2.0;
pub const FOOD_SPAWN_BATCH_MAX: usize = 50;
pub const FOOD_MIN_SPACING_TILES: f32 = 5.0;
pub const FOOD_SPAWN_MAX_ATTEMPTS: usize = 20;
pub const FOOD_PULSE_SPEED: f32 = 3.0;
pub const INITIAL_FOOD_COUNT: usize = 100;

// Collision
pub const SPATIAL_GRID_CELL_SIZE: f32 = 100.0;

// Death / respawn
pub const DEATH_FOOD_CONVERSION_RATE: f32 = 0.8;
pub const RESPAWN_INVULNERABILITY_TIME: f32 = 30.0;
pub const SPAWN_MARGIN: f32 = 200.0;

// Score
pub const SCORE_PER_SECOND_ALIVE: f32 = 1.0;
pub const SCORE_KILL_HEAD_TO_HEAD: f32 = 0.5;
pub const SCORE_KILL_BODY_COLLISION: f32 = 0.3;

// AI
pub const AI_SNAKE_COUNT: usize = 5;
pub const AI_REEVALUATE_CHANCE: f32 = 0.02; // per tick, roughly once a second at 60fps

// Simulation
pub const MAX_TICK_DT: f32 = 0.1;
pub const DEFAULT_SEED: u64 = 42;

// Camera
pub const VIEWPORT_WIDTH: f32 = 1080.0;
pub const VIEWPORT_HEIGHT: f32 = 1920.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Runtime copy of the constants above. Fixed once a simulation is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub arena_tile_size: f32,

    pub base_speed: f32,
    pub boost_multiplier: f32,
    pub head_radius: f32,
    pub body_radius: f32,
    pub segment_size: f32,
    pub start_length: usize,
    pub growth_rate: f32,

    pub energy_max: f32,
    pub energy_drain_rate: f32,
    pub energy_refill_per_food: f32,

    pub food_radius: f32,
    pub food_density_target: f32,
    /// Tier 1/2/3 spawn weights. Must sum to 1.0.
    pub tier_weights: [f32; 3],
    pub food_spawn_check_interval: f32,
    pub food_spawn_batch_max: usize,
    pub food_min_spacing: f32,
    pub food_spawn_max_attempts: usize,
    pub food_pulse_speed: f32,
    pub initial_food_count: usize,

    pub grid_cell_size: f32,

    pub death_food_conversion_rate: f32,
    pub respawn_invulnerability_time: f32,
    pub spawn_margin: f32,

    pub score_per_second_alive: f32,
    pub score_kill_head_to_head: f32,
    pub score_kill_body_collision: f32,

    pub ai_snake_count: usize,
    pub ai_reevaluate_chance: f32,

    pub max_tick_dt: f32,
    pub rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            arena_tile_size: ARENA_TILE_SIZE,
            base_speed: SNAKE_BASE_SPEED,
            boost_multiplier: SNAKE_BOOST_MULTIPLIER,
            head_radius: SNAKE_HEAD_RADIUS,
            body_radius: SNAKE_BODY_RADIUS,
            segment_size: SNAKE_SEGMENT_SIZE,
            start_length: SNAKE_START_LENGTH,
            growth_rate: SNAKE_GROWTH_RATE,
            energy_max: ENERGY_MAX,
            energy_drain_rate: ENERGY_DRAIN_RATE,
            energy_refill_per_food: ENERGY_REFILL_PER_FOOD,
            food_radius: FOOD_RADIUS,
            food_density_target: FOOD_DENSITY_TARGET,
            tier_weights: [
                FOOD_TIER1_SPAWN_RATE,
                FOOD_TIER2_SPAWN_RATE,
                FOOD_TIER3_SPAWN_RATE,
            ],
            food_spawn_check_interval: FOOD_SPAWN_CHECK_INTERVAL,
            food_spawn_batch_max: FOOD_SPAWN_BATCH_MAX,
            food_min_spacing: ARENA_TILE_SIZE * FOOD_MIN_SPACING_TILES,
            food_spawn_max_attempts: FOOD_SPAWN_MAX_ATTEMPTS,
            food_pulse_speed: FOOD_PULSE_SPEED,
            initial_food_count: INITIAL_FOOD_COUNT,
            grid_cell_size: SPATIAL_GRID_CELL_SIZE,
            death_food_conversion_rate: DEATH_FOOD_CONVERSION_RATE,
            respawn_invulnerability_time: RESPAWN_INVULNERABILITY_TIME,
            spawn_margin: SPAWN_MARGIN,
            score_per_second_alive: SCORE_PER_SECOND_ALIVE,
            score_kill_head_to_head: SCORE_KILL_HEAD_TO_HEAD,
            score_kill_body_collision: SCORE_KILL_BODY_COLLISION,
            ai_snake_count: AI_SNAKE_COUNT,
            ai_reevaluate_chance: AI_REEVALUATE_CHANCE,
            max_tick_dt: MAX_TICK_DT,
            rng_seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of live foods the density cycle aims for.
    pub fn target_food_count(&self) -> usize {
        let tiles = (self.arena_width / self.arena_tile_size)
            * (self.arena_height / self.arena_tile_size);
        (tiles * self.food_density_target).round() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return invalid("arena dimensions must be > 0");
        }
        if self.arena_tile_size <= 0.0 || self.grid_cell_size <= 0.0 {
            return invalid("tile and grid cell sizes must be > 0");
        }
        if self.head_radius <= 0.0 || self.body_radius <= 0.0 || self.food_radius <= 0.0 {
            return invalid("radii must be > 0");
        }
        if self.body_radius > self.head_radius {
            return invalid("body_radius cannot exceed head_radius");
        }
        if self.start_length == 0 {
            return invalid("start_length must be >= 1");
        }
        if self.energy_max <= 0.0 {
            return invalid("energy_max must be > 0");
        }
        if self.tier_weights.iter().any(|w| *w < 0.0) {
            return invalid("tier weights cannot be negative");
        }
        let weight_sum: f32 = self.tier_weights.iter().sum();
        if (weight_sum - 1.0).abs() > 1e-4 {
            return invalid("tier weights must sum to 1.0");
        }
        for fraction in [
            self.food_density_target,
            self.death_food_conversion_rate,
            self.score_kill_head_to_head,
            self.score_kill_body_collision,
            self.ai_reevaluate_chance,
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return invalid("fractions and probabilities must be within [0, 1]");
            }
        }
        if self.food_spawn_check_interval <= 0.0 || self.max_tick_dt <= 0.0 {
            return invalid("intervals must be > 0");
        }
        if self.spawn_margin * 2.0 >= self.arena_width.min(self.arena_height) {
            return invalid("spawn_margin leaves no room to spawn");
        }
        Ok(())
    }
}
