//! Headless soak run: advance the simulation at a fixed step and print a JSON
//! report of tick cost, food levels and deaths.

use std::time::Instant;

use serpent_arena::combat::DeathCause;
use serpent_arena::reporting::{MetricAggregator, SoakReport};
use serpent_arena::{Direction, SimConfig, SimState};

struct SoakArgs {
    seconds: f32,
    dt: f32,
    seed: Option<u64>,
    config_path: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<SoakArgs, String> {
    let mut parsed = SoakArgs {
        seconds: 120.0,
        dt: 1.0 / 60.0,
        seed: None,
        config_path: None,
    };
    let mut args = args;
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--seconds" => {
                parsed.seconds = value()?.parse().map_err(|e| format!("--seconds: {e}"))?;
            }
            "--dt" => {
                parsed.dt = value()?.parse().map_err(|e| format!("--dt: {e}"))?;
            }
            "--seed" => {
                parsed.seed = Some(value()?.parse().map_err(|e| format!("--seed: {e}"))?);
            }
            "--config" => parsed.config_path = Some(value()?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    if !(parsed.dt > 0.0) || !(parsed.seconds > 0.0) {
        return Err("--dt and --seconds must be > 0".to_string());
    }
    Ok(parsed)
}

fn run(args: SoakArgs) -> Result<SoakReport, String> {
    let mut config = match &args.config_path {
        Some(path) => SimConfig::from_file(path).map_err(|e| format!("{path}: {e}"))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    let mut sim = SimState::try_new(config.clone()).map_err(|e| e.to_string())?;

    let ticks = (args.seconds / args.dt).round().max(1.0) as u64;
    let mut tick_micros = MetricAggregator::new();
    let mut live_food = MetricAggregator::new();
    let mut alive_snakes = MetricAggregator::new();
    let mut max_live_food = 0;
    let (mut wall, mut head_on, mut body) = (0u64, 0u64, 0u64);

    log::info!("soak: {} ticks of {:.4}s, seed {}", ticks, args.dt, config.rng_seed);

    for tick in 0..ticks {
        // Player wanders in a slow square so it meets walls and other snakes.
        if tick % 240 == 0 {
            sim.change_direction(Direction::ALL[(tick / 240) as usize % Direction::ALL.len()]);
        }
        sim.set_boost(tick % 600 < 60);

        let start = Instant::now();
        sim.tick(args.dt);
        tick_micros.push(start.elapsed().as_secs_f64() * 1e6);

        for death in sim.last_deaths() {
            match death.cause {
                DeathCause::Wall => wall += 1,
                DeathCause::HeadToHead => head_on += 1,
                DeathCause::BodyHit => body += 1,
            }
        }
        let food = sim.food_count();
        max_live_food = max_live_food.max(food);
        live_food.push(food as f64);
        alive_snakes.push(sim.snakes().iter().filter(|s| s.alive).count() as f64);
    }

    Ok(SoakReport {
        seed: config.rng_seed,
        simulated_seconds: sim.elapsed,
        ticks: sim.tick_count,
        tick_micros: tick_micros.summary(),
        live_food: live_food.summary(),
        alive_snakes: alive_snakes.summary(),
        total_deaths: wall + head_on + body,
        wall_deaths: wall,
        head_to_head_deaths: head_on,
        body_hit_deaths: body,
        food_target: config.target_food_count(),
        max_live_food,
        player_score: sim.player().score,
        player_kills: sim.player().kills,
        top_score: sim.snakes().iter().map(|s| s.score).max().unwrap_or(0),
    })
}

fn main() {
    env_logger::init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("failed to serialize report: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_flags() {
        let parsed = parse_args(args(&["--seconds", "5", "--seed", "3", "--dt", "0.02"])).unwrap();
        assert_eq!(parsed.seconds, 5.0);
        assert_eq!(parsed.seed, Some(3));
        assert_eq!(parsed.dt, 0.02);
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(parse_args(args(&["--fast"])).is_err());
        assert!(parse_args(args(&["--seconds"])).is_err());
        assert!(parse_args(args(&["--dt", "0"])).is_err());
    }

    #[test]
    fn short_soak_produces_consistent_report() {
        let report = run(SoakArgs {
            seconds: 5.0,
            dt: 1.0 / 30.0,
            seed: Some(17),
            config_path: None,
        })
        .unwrap();
        assert_eq!(report.ticks, 150);
        assert_eq!(report.seed, 17);
        assert_eq!(
            report.total_deaths,
            report.wall_deaths + report.head_to_head_deaths + report.body_hit_deaths
        );
        assert_eq!(report.alive_snakes.min, 6.0);
        assert!(report.food_within_bounds(&SimConfig::default()));
    }
}
