use macroquad::prelude::*;
use ::rand::Rng;

use crate::config::SimConfig;
use crate::food::Food;
use crate::snake::{Direction, Snake};
use crate::vector::VectorExt;

/// Axis direction that closes the larger of the two gaps to `target`.
pub fn direction_towards(from: Vec2, target: Vec2) -> Direction {
    let delta = target - from;
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

pub fn nearest_food<'a>(pos: Vec2, foods: impl Iterator<Item = &'a Food>) -> Option<&'a Food> {
    foods
        .filter(|f| f.alive)
        .min_by(|a, b| a.pos.distance_to(pos).total_cmp(&b.pos.distance_to(pos)))
}

/// Steer non-player snakes. Each one re-evaluates with a small per-tick
/// chance and then heads for the nearest food along the dominant axis.
pub fn steer_snakes<'a>(
    snakes: &mut [Snake],
    foods: impl Iterator<Item = &'a Food> + Clone,
    config: &SimConfig,
    rng: &mut impl Rng,
) {
    for snake in snakes.iter_mut() {
        if snake.is_player || !snake.alive {
            continue;
        }
        if rng.gen::<f32>() >= config.ai_reevaluate_chance {
            continue;
        }
        let head = snake.head_position();
        if let Some(food) = nearest_food(head, foods.clone()) {
            snake.change_direction(direction_towards(head, food.pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::FoodType;
    use crate::snake::SnakeId;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn dominant_axis_picks_direction() {
        let from = vec2(100.0, 100.0);
        assert_eq!(direction_towards(from, vec2(300.0, 150.0)), Direction::Right);
        assert_eq!(direction_towards(from, vec2(0.0, 120.0)), Direction::Left);
        assert_eq!(direction_towards(from, vec2(110.0, 400.0)), Direction::Up);
        assert_eq!(direction_towards(from, vec2(90.0, -50.0)), Direction::Down);
    }

    #[test]
    fn nearest_skips_consumed_food() {
        let mut close = Food::new(vec2(10.0, 0.0), FoodType::Apple);
        close.consume();
        let far = Food::new(vec2(100.0, 0.0), FoodType::Cake);
        let foods = [close, far];
        let found = nearest_food(Vec2::ZERO, foods.iter()).unwrap();
        assert_eq!(found.kind, FoodType::Cake);
    }

    #[test]
    fn certain_reevaluation_turns_ai_toward_food_but_not_player() {
        let config = SimConfig {
            ai_reevaluate_chance: 1.0,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut snakes = vec![
            Snake::new(SnakeId(0), vec2(1000.0, 1000.0), true, GREEN, &config),
            Snake::new(SnakeId(1), vec2(1000.0, 1000.0), false, RED, &config),
        ];
        let foods = [Food::new(vec2(1010.0, 1500.0), FoodType::Apple)];

        steer_snakes(&mut snakes, foods.iter(), &config, &mut rng);
        snakes[0].update(0.0, &config);
        snakes[1].update(0.0, &config);

        assert_eq!(snakes[0].direction, Direction::Right);
        assert_eq!(snakes[1].direction, Direction::Up);
    }

    #[test]
    fn zero_chance_never_steers() {
        let config = SimConfig {
            ai_reevaluate_chance: 0.0,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut snakes = vec![Snake::new(SnakeId(1), vec2(1000.0, 1000.0), false, RED, &config)];
        let foods = [Food::new(vec2(1000.0, 1500.0), FoodType::Apple)];
        for _ in 0..100 {
            steer_snakes(&mut snakes, foods.iter(), &config, &mut rng);
        }
        assert_eq!(snakes[0].pending_direction(), Direction::Right);
    }
}
