use macroquad::prelude::*;
use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai;
use crate::camera::CameraFollow;
use crate::collision::CollisionSystem;
use crate::combat::DeathEvent;
use crate::config::{self, ConfigError, SimConfig};
use crate::food::Food;
use crate::food_manager::FoodManager;
use crate::snake::{Direction, Snake, SnakeId};
use crate::world::World;

/// The player always occupies the first slot.
pub const PLAYER: SnakeId = SnakeId(0);

/// Input buffered by the input layer between frames.
#[derive(Clone, Copy, Debug, Default)]
struct PlayerInput {
    direction: Option<Direction>,
    boost: bool,
}

/// How another snake compares to the player, for colour coding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreatLevel {
    Smaller,
    Similar,
    Larger,
}

pub struct SimState {
    config: SimConfig,
    world: World,
    snakes: Vec<Snake>,
    foods: FoodManager,
    collisions: CollisionSystem,
    camera: CameraFollow,
    input: PlayerInput,
    rng: ChaCha8Rng,
    last_deaths: Vec<DeathEvent>,
    pub tick_count: u64,
    pub elapsed: f32,
}

impl SimState {
    /// Build from an already-validated config.
    pub fn new(config: SimConfig) -> Self {
        let world = World::new(config.arena_width, config.arena_height);
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);

        let mut snakes = Vec::with_capacity(config.ai_snake_count + 1);
        snakes.push(Snake::new(PLAYER, world.center(), true, GREEN, &config));
        for i in 0..config.ai_snake_count {
            let pos = world.random_inset_point(config.spawn_margin, &mut rng);
            let color = Color::new(rng.gen(), rng.gen(), rng.gen(), 1.0);
            snakes.push(Snake::new(SnakeId(i + 1), pos, false, color, &config));
        }

        let mut foods = FoodManager::new(world);
        for _ in 0..config.initial_food_count {
            foods.spawn_random_food(&config, &mut rng);
        }

        log::info!(
            "arena {}x{} ready: {} snakes, {} food (density target {})",
            world.width,
            world.height,
            snakes.len(),
            foods.live_count(),
            config.target_food_count()
        );

        Self {
            collisions: CollisionSystem::new(world, &config),
            camera: CameraFollow::new(config::VIEWPORT_WIDTH, config::VIEWPORT_HEIGHT, world.center()),
            config,
            world,
            snakes,
            foods,
            input: PlayerInput::default(),
            rng,
            last_deaths: Vec::new(),
            tick_count: 0,
            elapsed: 0.0,
        }
    }

    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Advance one frame. The order of the steps is fixed.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt > self.config.max_tick_dt {
            log::debug!(
                "long frame step {:.3}s, movement capped at {:.3}s",
                dt,
                self.config.max_tick_dt
            );
        }

        // Buffered player input
        let player = &mut self.snakes[PLAYER.0];
        if let Some(direction) = self.input.direction.take() {
            player.change_direction(direction);
        }
        player.set_boost(self.input.boost);

        // Movement (capped per step), growth, energy, timers
        for snake in self.snakes.iter_mut() {
            snake.update(dt, &self.config);
        }

        ai::steer_snakes(&mut self.snakes, self.foods.slots().iter(), &self.config, &mut self.rng);

        self.foods.update(dt, &self.config, &mut self.rng);

        self.last_deaths = self.collisions.run(&mut self.snakes, &mut self.foods, &self.config);

        self.respawn_dead();

        self.camera.update(self.snakes[PLAYER.0].head_position(), &self.world);
        self.tick_count += 1;
        self.elapsed += dt;
    }

    /// Random inset position; no distance check against other snakes.
    fn respawn_dead(&mut self) {
        for snake in self.snakes.iter_mut().filter(|s| !s.alive) {
            let pos = self.world.random_inset_point(self.config.spawn_margin, &mut self.rng);
            snake.reset(pos, &self.config);
            log::info!("snake {} respawned at ({:.0}, {:.0})", snake.id.0, pos.x, pos.y);
        }
    }

    /// Queue a turn for the player. Applied at the start of the next tick.
    pub fn change_direction(&mut self, direction: Direction) {
        self.input.direction = Some(direction);
    }

    /// Held boost state for the player.
    pub fn set_boost(&mut self, active: bool) {
        self.input.boost = active;
    }

    /// Viewport changed. Only the camera helper cares.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        self.camera.update(self.snakes[PLAYER.0].head_position(), &self.world);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &CameraFollow {
        &self.camera
    }

    pub fn player(&self) -> &Snake {
        &self.snakes[PLAYER.0]
    }

    /// Every snake except the player.
    pub fn ai_snakes(&self) -> &[Snake] {
        &self.snakes[PLAYER.0 + 1..]
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn foods(&self) -> impl Iterator<Item = &Food> {
        self.foods.foods()
    }

    pub fn food_count(&self) -> usize {
        self.foods.live_count()
    }

    /// Deaths resolved during the most recent tick.
    pub fn last_deaths(&self) -> &[DeathEvent] {
        &self.last_deaths
    }

    /// Within 10% of the player's length counts as similar.
    pub fn threat_level(&self, other: &Snake) -> ThreatLevel {
        let mine = self.player().len() as f32;
        let theirs = other.len() as f32;
        if (theirs - mine).abs() <= mine * 0.1 {
            ThreatLevel::Similar
        } else if theirs > mine {
            ThreatLevel::Larger
        } else {
            ThreatLevel::Smaller
        }
    }

    #[cfg(test)]
    pub(crate) fn snakes_mut(&mut self) -> &mut [Snake] {
        &mut self.snakes
    }
}
