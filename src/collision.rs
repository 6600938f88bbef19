use crate::combat::{self, DeathCause, DeathEvent};
use crate::config::SimConfig;
use crate::food::Food;
use crate::food_manager::FoodManager;
use crate::snake::Snake;
use crate::spatial_hash::SpatialGrid;
use crate::vector::circles_overlap;
use crate::world::World;

/// Result of checking one snake's head against its neighbours.
/// The payload is the opponent's slot in the snake list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionOutcome {
    None,
    HeadToHead(usize),
    BodyHit(usize),
}

/// Live, vulnerable snake whose head circle crosses an arena edge.
pub fn check_wall(snake: &Snake, world: &World, config: &SimConfig) -> bool {
    snake.alive
        && !snake.invulnerable
        && world.breaches_wall(snake.head_position(), config.head_radius)
}

/// First live food the head overlaps, in slot order. Invulnerability does not
/// matter here.
pub fn check_food(snake: &Snake, foods: &[Food], config: &SimConfig) -> Option<usize> {
    if !snake.alive {
        return None;
    }
    let head = snake.head_position();
    foods.iter().position(|food| {
        food.alive && circles_overlap(head, config.head_radius, food.pos, config.food_radius)
    })
}

/// Head-to-head against any neighbour head first; otherwise head against any
/// neighbour body segment. First match wins in both passes.
pub fn check_snake(
    idx: usize,
    snakes: &[Snake],
    neighbors: &[usize],
    config: &SimConfig,
) -> CollisionOutcome {
    let snake = match snakes.get(idx) {
        Some(s) if s.alive && !s.invulnerable => s,
        _ => return CollisionOutcome::None,
    };
    let head = snake.head_position();

    for &other_idx in neighbors {
        if other_idx == idx {
            continue;
        }
        let other = &snakes[other_idx];
        if !other.alive || other.invulnerable {
            continue;
        }
        if circles_overlap(head, config.head_radius, other.head_position(), config.head_radius) {
            return CollisionOutcome::HeadToHead(other_idx);
        }
    }

    for &other_idx in neighbors {
        if other_idx == idx {
            continue;
        }
        let other = &snakes[other_idx];
        if !other.alive {
            continue;
        }
        let hit = other
            .body()
            .any(|seg| circles_overlap(head, config.head_radius, seg.pos, config.body_radius));
        if hit {
            return CollisionOutcome::BodyHit(other_idx);
        }
    }

    CollisionOutcome::None
}

/// Full per-tick collision pass: walls, then food, then snake-vs-snake.
/// Keeps its grid and neighbour scratch buffer between ticks.
pub struct CollisionSystem {
    world: World,
    grid: SpatialGrid,
    neighbors: Vec<usize>,
}

impl CollisionSystem {
    pub fn new(world: World, config: &SimConfig) -> Self {
        Self {
            world,
            grid: SpatialGrid::new(config.grid_cell_size),
            neighbors: Vec::with_capacity(32),
        }
    }

    pub fn run(
        &mut self,
        snakes: &mut [Snake],
        foods: &mut FoodManager,
        config: &SimConfig,
    ) -> Vec<DeathEvent> {
        let mut events = Vec::new();

        for idx in 0..snakes.len() {
            if check_wall(&snakes[idx], &self.world, config) {
                events.extend(combat::handle_death(
                    snakes,
                    idx,
                    None,
                    DeathCause::Wall,
                    foods,
                    config,
                ));
            }
        }

        for snake in snakes.iter_mut() {
            if let Some(food_idx) = check_food(snake, foods.slots(), config) {
                let kind = foods.slots()[food_idx].kind;
                snake.eat_food(kind.segments(), kind.points(), config);
                log::trace!(
                    "snake {} ate {} (tier {})",
                    snake.id.0,
                    kind.display_name(),
                    kind.tier().number()
                );
                foods.remove_food(food_idx);
            }
        }

        self.grid.rebuild(snakes);
        for idx in 0..snakes.len() {
            if !snakes[idx].alive || snakes[idx].invulnerable {
                continue;
            }
            self.neighbors.clear();
            self.grid
                .query_neighbors_into(snakes[idx].head_position(), &mut self.neighbors);

            match check_snake(idx, snakes, &self.neighbors, config) {
                CollisionOutcome::HeadToHead(other) => {
                    combat::resolve_head_to_head(snakes, idx, other, foods, config, &mut events);
                }
                CollisionOutcome::BodyHit(owner) => {
                    combat::resolve_body_hit(snakes, idx, owner, foods, config, &mut events);
                }
                CollisionOutcome::None => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::FoodType;
    use crate::snake::SnakeId;
    use macroquad::prelude::*;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    fn snake_at(idx: usize, pos: Vec2, length: f32) -> Snake {
        let cfg = config();
        let mut s = Snake::new(SnakeId(idx), pos, idx == 0, WHITE, &cfg);
        s.set_target_length(length);
        s.update(0.0, &cfg);
        s
    }

    fn system(cfg: &SimConfig) -> (CollisionSystem, FoodManager) {
        let world = World::new(cfg.arena_width, cfg.arena_height);
        (CollisionSystem::new(world, cfg), FoodManager::new(world))
    }

    #[test]
    fn wall_breach_at_each_edge_kills_once_without_killer() {
        let cfg = config();
        let edges = [
            vec2(5.0, 3000.0),
            vec2(5995.0, 3000.0),
            vec2(3000.0, 5.0),
            vec2(3000.0, 5995.0),
        ];
        for pos in edges {
            let (mut collisions, mut foods) = system(&cfg);
            let mut snakes = vec![snake_at(0, pos, 5.0)];
            let events = collisions.run(&mut snakes, &mut foods, &cfg);
            assert_eq!(events.len(), 1, "edge at {pos:?}");
            assert_eq!(events[0].cause, DeathCause::Wall);
            assert!(events[0].killer.is_none());
            assert!(!snakes[0].alive);
        }
    }

    #[test]
    fn invulnerable_snake_ignores_walls_but_still_eats() {
        let cfg = config();
        let (mut collisions, mut foods) = system(&cfg);
        let mut snakes = vec![snake_at(0, vec2(5.0, 3000.0), 5.0)];
        snakes[0].invulnerable = true;
        snakes[0].invulnerability_timer = 10.0;
        assert!(!check_wall(&snakes[0], &collisions.world, &cfg));

        let food = Food::new(vec2(10.0, 3000.0), FoodType::Pizza);
        assert_eq!(check_food(&snakes[0], &[food], &cfg), Some(0));

        let events = collisions.run(&mut snakes, &mut foods, &cfg);
        assert!(events.is_empty());
        assert!(snakes[0].alive);
    }

    #[test]
    fn only_one_food_is_eaten_per_tick() {
        let cfg = config();
        let (mut collisions, mut foods) = system(&cfg);
        let mut snakes = vec![snake_at(0, vec2(3000.0, 3000.0), 5.0)];
        // Two death foods right on the head.
        let dummy = snake_at(1, vec2(3000.0, 3000.0), 2.0);
        foods.spawn_food_from_death(&dummy, &cfg);
        foods.spawn_food_from_death(&dummy, &cfg);
        let before = foods.live_count();

        collisions.run(&mut snakes, &mut foods, &cfg);
        assert_eq!(snakes[0].food_eaten, 1);
        assert_eq!(snakes[0].score, FoodType::Apple.points());
        assert_eq!(foods.live_count(), before - 1);
    }

    #[test]
    fn head_to_head_outcome_is_reported_before_body_hit() {
        let cfg = config();
        let snakes = vec![
            snake_at(0, vec2(3000.0, 3000.0), 5.0),
            snake_at(1, vec2(3015.0, 3000.0), 5.0),
        ];
        // Snake 1's body also overlaps snake 0's head, but head-on wins.
        let outcome = check_snake(0, &snakes, &[0, 1], &cfg);
        assert_eq!(outcome, CollisionOutcome::HeadToHead(1));
    }

    #[test]
    fn body_hit_against_neighbour() {
        let cfg = config();
        let snakes = vec![
            snake_at(0, vec2(3030.0, 3005.0), 5.0),
            // Body runs from 3100 back to 3020; the segment at 3040 is within reach.
            snake_at(1, vec2(3100.0, 3000.0), 5.0),
        ];
        assert_eq!(check_snake(0, &snakes, &[0, 1], &cfg), CollisionOutcome::BodyHit(1));
        assert_eq!(check_snake(1, &snakes, &[0, 1], &cfg), CollisionOutcome::None);
    }

    #[test]
    fn invulnerable_snakes_neither_collide_nor_are_hit_head_on() {
        let cfg = config();
        let mut snakes = vec![
            snake_at(0, vec2(3000.0, 3000.0), 5.0),
            snake_at(1, vec2(3010.0, 3000.0), 5.0),
        ];
        snakes[1].invulnerable = true;
        assert_eq!(check_snake(1, &snakes, &[0, 1], &cfg), CollisionOutcome::None);
        // Snake 0 skips the invulnerable head but can still hit its body.
        assert_eq!(check_snake(0, &snakes, &[0, 1], &cfg), CollisionOutcome::BodyHit(1));
    }

    #[test]
    fn full_pass_resolves_size_combat() {
        let cfg = config();
        let (mut collisions, mut foods) = system(&cfg);
        let mut snakes = vec![
            snake_at(0, vec2(3000.0, 3000.0), 12.0),
            snake_at(1, vec2(3000.0, 3012.0), 5.0),
        ];
        snakes[1].score = 40;

        let events = collisions.run(&mut snakes, &mut foods, &cfg);

        assert!(snakes[0].alive);
        assert!(!snakes[1].alive);
        assert_eq!(snakes[0].kills, 1);
        assert_eq!(snakes[0].score, 20);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cause, DeathCause::HeadToHead);
    }

    #[test]
    fn equal_heads_in_full_pass_both_die_uncredited() {
        let cfg = config();
        let (mut collisions, mut foods) = system(&cfg);
        let mut snakes = vec![
            snake_at(0, vec2(3000.0, 3000.0), 10.0),
            snake_at(1, vec2(3000.0, 3012.0), 10.0),
        ];
        let events = collisions.run(&mut snakes, &mut foods, &cfg);
        assert_eq!(events.len(), 2);
        assert!(!snakes[0].alive && !snakes[1].alive);
        assert_eq!(snakes[0].kills + snakes[1].kills, 0);
    }

    #[test]
    fn distant_body_outside_neighbourhood_is_not_seen() {
        let cfg = config();
        let (mut collisions, mut foods) = system(&cfg);
        // Long snake: head at x=3400, body stretches back past x=3000.
        let mut long = snake_at(1, vec2(3400.0, 3000.0), 5.0);
        long.segments.clear();
        for i in 0..25 {
            long.segments
                .push_back(crate::snake::Segment::new(vec2(3400.0 - i as f32 * 20.0, 3000.0)));
        }
        long.set_target_length(25.0);
        let mut snakes = vec![snake_at(0, vec2(3005.0, 3000.0), 5.0), long];

        let events = collisions.run(&mut snakes, &mut foods, &cfg);
        assert!(events.is_empty());
        assert!(snakes[0].alive);
        assert!(snakes[1].alive);
    }
}
