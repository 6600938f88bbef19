use macroquad::prelude::*;
use ::rand::Rng;

use crate::config::SimConfig;
use crate::food::{Food, FoodType};
use crate::snake::Snake;
use crate::vector::VectorExt;
use crate::world::World;

/// Owns every food item. Consumed items are only flagged; `update` sweeps them.
pub struct FoodManager {
    world: World,
    foods: Vec<Food>,
    spawn_timer: f32,
}

impl FoodManager {
    pub fn new(world: World) -> Self {
        Self {
            world,
            foods: Vec::with_capacity(2048),
            spawn_timer: 0.0,
        }
    }

    /// Live foods only.
    pub fn foods(&self) -> impl Iterator<Item = &Food> {
        self.foods.iter().filter(|f| f.alive)
    }

    /// Backing store, consumed items included until the next sweep.
    pub fn slots(&self) -> &[Food] {
        &self.foods
    }

    pub fn live_count(&self) -> usize {
        self.foods.iter().filter(|f| f.alive).count()
    }

    /// Animate, sweep consumed items, and top up density on the check interval.
    /// Returns how many foods were spawned this call.
    pub fn update(&mut self, dt: f32, config: &SimConfig, rng: &mut impl Rng) -> usize {
        for food in self.foods.iter_mut() {
            food.update(dt, config.food_pulse_speed);
        }
        self.foods.retain(|f| f.alive);

        self.spawn_timer += dt;
        if self.spawn_timer >= config.food_spawn_check_interval {
            self.spawn_timer = 0.0;
            return self.maintain_density(config, rng);
        }
        0
    }

    fn maintain_density(&mut self, config: &SimConfig, rng: &mut impl Rng) -> usize {
        let target = config.target_food_count();
        let current = self.live_count();
        if current >= target {
            return 0;
        }
        let to_spawn = (target - current).min(config.food_spawn_batch_max);
        for _ in 0..to_spawn {
            self.spawn_random_food(config, rng);
        }
        log::debug!(
            "food density top-up: spawned {} (live {} / target {})",
            to_spawn,
            current + to_spawn,
            target
        );
        to_spawn
    }

    /// Spawn one food of a weighted-random type. Returns its slot.
    pub fn spawn_random_food(&mut self, config: &SimConfig, rng: &mut impl Rng) -> usize {
        let pos = self.find_spawn_position(config, rng);
        let kind = FoodType::random(&config.tier_weights, rng);
        self.foods.push(Food::new(pos, kind));
        self.foods.len() - 1
    }

    /// Random point away from existing food. Gives up after the configured
    /// number of attempts and returns an unchecked point instead.
    fn find_spawn_position(&self, config: &SimConfig, rng: &mut impl Rng) -> Vec2 {
        for _ in 0..config.food_spawn_max_attempts {
            let candidate = self.world.random_point(rng);
            let crowded = self
                .foods()
                .any(|f| f.pos.distance_to(candidate) < config.food_min_spacing);
            if !crowded {
                return candidate;
            }
        }
        log::trace!("no uncrowded food position found, placing unchecked");
        self.world.random_point(rng)
    }

    /// Turn a dying snake's body into basic food at its segment positions.
    /// Returns how many were dropped.
    pub fn spawn_food_from_death(&mut self, snake: &Snake, config: &SimConfig) -> usize {
        let count = ((snake.len() as f32 * config.death_food_conversion_rate) as usize)
            .min(snake.len());
        self.foods.extend(
            snake
                .segments
                .iter()
                .take(count)
                .map(|segment| Food::from_death(segment.pos)),
        );
        count
    }

    pub fn remove_food(&mut self, idx: usize) {
        if let Some(food) = self.foods.get_mut(idx) {
            food.consume();
        }
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }
}
