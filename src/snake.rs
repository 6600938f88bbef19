use macroquad::prelude::*;
use std::collections::VecDeque;

use crate::config::SimConfig;
use crate::vector::VectorExt;

/// Index of a snake in the simulation's snake list. Snakes are never removed,
/// only respawned in place, so the index stays valid for the whole session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SnakeId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in arena space (y grows upward).
    pub fn to_vector(self) -> Vec2 {
        match self {
            Direction::Up => vec2(0.0, 1.0),
            Direction::Down => vec2(0.0, -1.0),
            Direction::Left => vec2(-1.0, 0.0),
            Direction::Right => vec2(1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One body circle. `layer` is a cosmetic depth hint only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub layer: u8,
}

impl Segment {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, layer: 0 }
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    pub id: SnakeId,
    pub is_player: bool,
    pub color: Color,

    pub alive: bool,
    pub invulnerable: bool,
    pub invulnerability_timer: f32,

    /// Front is the head.
    pub segments: VecDeque<Segment>,
    pub direction: Direction,
    pending_direction: Direction,

    /// Continuous length; the segment count follows its floor.
    length: f32,
    pub boosting: bool,
    pub energy: f32,

    // Stats survive respawns.
    pub score: u32,
    score_carry: f32,
    pub kills: u32,
    pub food_eaten: u32,
    pub survival_time: f32,
}

impl Snake {
    pub fn new(id: SnakeId, pos: Vec2, is_player: bool, color: Color, config: &SimConfig) -> Self {
        let mut snake = Self {
            id,
            is_player,
            color,
            alive: true,
            invulnerable: false,
            invulnerability_timer: 0.0,
            segments: VecDeque::with_capacity(config.start_length * 4),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            length: config.start_length as f32,
            boosting: false,
            energy: config.energy_max,
            score: 0,
            score_carry: 0.0,
            kills: 0,
            food_eaten: 0,
            survival_time: 0.0,
        };
        snake.lay_out_segments(pos, config);
        snake
    }

    /// Starting body stretches along -X from the head.
    fn lay_out_segments(&mut self, pos: Vec2, config: &SimConfig) {
        self.segments.clear();
        for i in 0..config.start_length {
            self.segments
                .push_back(Segment::new(vec2(pos.x - i as f32 * config.segment_size, pos.y)));
        }
    }

    pub fn update(&mut self, dt: f32, config: &SimConfig) {
        if !self.alive {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.survival_time += dt;
        self.score_carry += config.score_per_second_alive * dt;
        let whole = self.score_carry.floor();
        if whole >= 1.0 {
            self.score = self.score.saturating_add(whole as u32);
            self.score_carry -= whole;
        }

        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerability_timer = 0.0;
                self.invulnerable = false;
            }
        }

        if self.boosting && self.energy > 0.0 {
            self.energy -= config.energy_drain_rate * dt;
            if self.energy <= 0.0 {
                self.energy = 0.0;
                self.boosting = false;
            }
        }

        // A reversal request never survives to the commit.
        if self.pending_direction != self.direction.opposite() {
            self.direction = self.pending_direction;
        } else {
            self.pending_direction = self.direction;
        }

        let speed = if self.boosting && self.energy > 0.0 {
            config.base_speed * config.boost_multiplier
        } else {
            config.base_speed
        };

        // Only the distance is capped; timers above see the full step.
        self.advance(speed * dt.min(config.max_tick_dt));
        self.fit_to_target();
    }

    fn advance(&mut self, distance: f32) {
        let new_head = self.head_position() + self.direction.to_vector().scaled(distance);
        self.segments.push_front(Segment::new(new_head));
    }

    /// Trim from the tail when too long; duplicate the tail when too short so
    /// new segments unfold as the snake moves.
    fn fit_to_target(&mut self) {
        let target = self.target_segments();
        self.segments.truncate(target);
        while self.segments.len() < target {
            let tail = self.segments.back().copied().unwrap_or(Segment::new(Vec2::ZERO));
            self.segments.push_back(tail);
        }
    }

    /// Buffer a turn for the next update. Reversals are dropped.
    pub fn change_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.pending_direction = direction;
        }
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Growth compounds: the gain scales with the current length.
    pub fn eat_food(&mut self, segments_value: u32, points: u32, config: &SimConfig) {
        self.length += self.length * config.growth_rate * segments_value as f32;
        self.score = self.score.saturating_add(points);
        self.food_eaten += 1;
        self.energy = (self.energy + config.energy_refill_per_food).min(config.energy_max);
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Respawn in place. Score, kills, food eaten and survival time carry over.
    pub fn reset(&mut self, pos: Vec2, config: &SimConfig) {
        self.alive = true;
        self.invulnerable = true;
        self.invulnerability_timer = config.respawn_invulnerability_time;
        self.lay_out_segments(pos, config);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.length = config.start_length as f32;
        self.energy = config.energy_max;
        self.boosting = false;
    }

    pub fn set_boost(&mut self, active: bool) {
        self.boosting = active && self.energy > 0.0;
    }

    pub fn head_position(&self) -> Vec2 {
        self.segments.front().map(|s| s.pos).unwrap_or(Vec2::ZERO)
    }

    /// Segments after the head.
    pub fn body(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().skip(1)
    }

    /// Current segment count, the size used in combat.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn target_length(&self) -> f32 {
        self.length
    }

    /// Segment count the body converges to. Never below one.
    pub fn target_segments(&self) -> usize {
        self.length.floor().max(1.0) as usize
    }

    #[cfg(test)]
    pub(crate) fn set_target_length(&mut self, length: f32) {
        self.length = length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    fn test_snake(pos: Vec2) -> Snake {
        Snake::new(SnakeId(0), pos, true, GREEN, &config())
    }

    #[test]
    fn starting_body_extends_along_negative_x() {
        let snake = test_snake(vec2(500.0, 300.0));
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head_position(), vec2(500.0, 300.0));
        assert_eq!(snake.segments[4].pos, vec2(420.0, 300.0));
    }

    #[test]
    fn update_moves_head_along_direction() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.update(0.05, &cfg);
        assert_eq!(snake.head_position(), vec2(510.0, 300.0));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn reversal_is_never_committed() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.change_direction(Direction::Left);
        snake.update(0.1, &cfg);
        assert_eq!(snake.direction, Direction::Right);

        snake.change_direction(Direction::Up);
        snake.update(0.1, &cfg);
        assert_eq!(snake.direction, Direction::Up);

        snake.change_direction(Direction::Down);
        snake.update(0.1, &cfg);
        assert_eq!(snake.direction, Direction::Up);
    }

    #[test]
    fn eating_compounds_target_length_and_adds_points() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.set_target_length(40.0);
        let before = snake.target_length();
        snake.eat_food(3, 50, &cfg);
        let expected = before + before * cfg.growth_rate * 3.0;
        assert!((snake.target_length() - expected).abs() < 1e-5);
        assert_eq!(snake.score, 50);
        assert_eq!(snake.food_eaten, 1);
    }

    #[test]
    fn eating_refills_energy_up_to_max() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.energy = 90.0;
        snake.eat_food(1, 10, &cfg);
        assert_eq!(snake.energy, cfg.energy_max);
        snake.energy = 30.0;
        snake.eat_food(1, 10, &cfg);
        assert_eq!(snake.energy, 50.0);
    }

    #[test]
    fn segment_count_matches_floor_of_target_after_growth() {
        let cfg = config();
        let mut snake = test_snake(vec2(1000.0, 1000.0));
        snake.set_target_length(12.7);
        snake.update(0.016, &cfg);
        assert_eq!(snake.len(), 12);
        // New tail segments duplicate the old tail position.
        assert_eq!(snake.segments[11].pos, snake.segments[5].pos);

        snake.set_target_length(7.2);
        snake.update(0.016, &cfg);
        assert_eq!(snake.len(), 7);
    }

    #[test]
    fn boosting_drains_energy_and_stops_at_zero() {
        let cfg = config();
        let mut snake = test_snake(vec2(1000.0, 1000.0));
        snake.set_boost(true);
        snake.update(1.0, &cfg);
        assert_eq!(snake.energy, cfg.energy_max - cfg.energy_drain_rate);
        // Boosted move covers twice the base distance, over the capped step.
        assert_eq!(snake.head_position(), vec2(1040.0, 1000.0));

        snake.energy = 1.0;
        snake.update(0.5, &cfg);
        assert_eq!(snake.energy, 0.0);
        assert!(!snake.boosting);

        snake.set_boost(true);
        assert!(!snake.boosting);
    }

    #[test]
    fn invulnerability_expires() {
        let cfg = config();
        let mut snake = test_snake(vec2(1000.0, 1000.0));
        snake.reset(vec2(1000.0, 1000.0), &cfg);
        assert!(snake.invulnerable);
        for _ in 0..31 {
            snake.update(1.0, &cfg);
        }
        assert!(!snake.invulnerable);
        assert_eq!(snake.invulnerability_timer, 0.0);
    }

    #[test]
    fn reset_then_zero_step_keeps_start_shape() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.score = 120;
        snake.kills = 2;
        snake.set_target_length(30.0);
        snake.update(0.1, &cfg);
        snake.die();

        snake.reset(vec2(800.0, 900.0), &cfg);
        snake.update(0.0, &cfg);
        assert!(snake.alive);
        assert_eq!(snake.len(), cfg.start_length);
        assert_eq!(snake.head_position(), vec2(800.0, 900.0));
        assert_eq!(snake.score, 120);
        assert_eq!(snake.kills, 2);
    }

    #[test]
    fn dead_snake_does_not_update() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.die();
        snake.die();
        snake.update(1.0, &cfg);
        assert!(!snake.alive);
        assert_eq!(snake.head_position(), vec2(500.0, 300.0));
        assert_eq!(snake.survival_time, 0.0);
    }

    #[test]
    fn score_trickle_accumulates_across_short_frames() {
        let cfg = config();
        let mut snake = test_snake(vec2(1000.0, 1000.0));
        for _ in 0..120 {
            snake.update(1.0 / 60.0, &cfg);
        }
        assert!(snake.score == 1 || snake.score == 2);
    }

    #[test]
    fn empty_body_falls_back_to_origin() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.segments.clear();
        assert_eq!(snake.head_position(), Vec2::ZERO);
        snake.update(0.0, &cfg);
        assert_eq!(snake.len(), cfg.start_length);
    }

    #[test]
    fn long_step_caps_movement_but_not_timers() {
        let cfg = config();
        let mut snake = test_snake(vec2(1000.0, 1000.0));
        snake.reset(vec2(1000.0, 1000.0), &cfg);
        snake.update(0.5, &cfg);
        assert_eq!(snake.survival_time, 0.5);
        assert_eq!(snake.invulnerability_timer, cfg.respawn_invulnerability_time - 0.5);
        assert_eq!(snake.head_position(), vec2(1000.0 + cfg.base_speed * cfg.max_tick_dt, 1000.0));
    }

    #[test]
    fn nan_step_is_treated_as_zero() {
        let cfg = config();
        let mut snake = test_snake(vec2(500.0, 300.0));
        snake.update(f32::NAN, &cfg);
        assert_eq!(snake.head_position(), vec2(500.0, 300.0));
    }
}
