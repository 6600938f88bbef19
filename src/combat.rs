use macroquad::prelude::*;
use std::cmp::Ordering;

use crate::config::SimConfig;
use crate::food_manager::FoodManager;
use crate::snake::{Snake, SnakeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    HeadToHead,
    BodyHit,
}

/// One resolved death, for logging, stats and the respawn step.
#[derive(Clone, Debug)]
pub struct DeathEvent {
    pub victim: SnakeId,
    pub killer: Option<SnakeId>,
    pub cause: DeathCause,
    pub pos: Vec2,
    pub length: usize,
    pub food_dropped: usize,
}

fn kill_bonus_fraction(cause: DeathCause, config: &SimConfig) -> f32 {
    match cause {
        DeathCause::HeadToHead => config.score_kill_head_to_head,
        DeathCause::BodyHit => config.score_kill_body_collision,
        DeathCause::Wall => 0.0,
    }
}

/// Shared death path. Already-dead victims are ignored, so a snake can die
/// (and be credited) at most once per life.
pub fn handle_death(
    snakes: &mut [Snake],
    victim: usize,
    killer: Option<usize>,
    cause: DeathCause,
    foods: &mut FoodManager,
    config: &SimConfig,
) -> Option<DeathEvent> {
    let dead = snakes.get(victim)?;
    if !dead.alive {
        return None;
    }

    let food_dropped = foods.spawn_food_from_death(dead, config);
    let victim_score = dead.score;
    let pos = dead.head_position();
    let length = dead.len();

    let killer = killer.filter(|&k| k != victim && k < snakes.len());
    if let Some(k) = killer {
        let bonus = (victim_score as f32 * kill_bonus_fraction(cause, config)) as u32;
        let winner = &mut snakes[k];
        winner.score = winner.score.saturating_add(bonus);
        winner.kills += 1;
    }

    snakes[victim].die();

    let event = DeathEvent {
        victim: SnakeId(victim),
        killer: killer.map(SnakeId),
        cause,
        pos,
        length,
        food_dropped,
    };
    log::info!(
        "snake {} died ({:?}, length {}, killer {:?}), dropped {} food",
        victim,
        cause,
        length,
        killer,
        food_dropped
    );
    Some(event)
}

/// Size-based head-on combat: the strictly longer snake wins, equal lengths
/// kill both with no credit either way.
pub fn resolve_head_to_head(
    snakes: &mut [Snake],
    a: usize,
    b: usize,
    foods: &mut FoodManager,
    config: &SimConfig,
    events: &mut Vec<DeathEvent>,
) {
    let (len_a, len_b) = match (snakes.get(a), snakes.get(b)) {
        (Some(sa), Some(sb)) => (sa.len(), sb.len()),
        _ => return,
    };

    match len_a.cmp(&len_b) {
        Ordering::Greater => {
            events.extend(handle_death(snakes, b, Some(a), DeathCause::HeadToHead, foods, config));
        }
        Ordering::Less => {
            events.extend(handle_death(snakes, a, Some(b), DeathCause::HeadToHead, foods, config));
        }
        Ordering::Equal => {
            events.extend(handle_death(snakes, a, None, DeathCause::HeadToHead, foods, config));
            events.extend(handle_death(snakes, b, None, DeathCause::HeadToHead, foods, config));
        }
    }
}

/// Head of `victim` ran into the body of `owner`.
pub fn resolve_body_hit(
    snakes: &mut [Snake],
    victim: usize,
    owner: usize,
    foods: &mut FoodManager,
    config: &SimConfig,
    events: &mut Vec<DeathEvent>,
) {
    events.extend(handle_death(snakes, victim, Some(owner), DeathCause::BodyHit, foods, config));
}
