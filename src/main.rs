use macroquad::prelude::*;

use serpent_arena::config::{self, SimConfig};
use serpent_arena::stats::{RingBuffer, SimStats, TickSample};
use serpent_arena::{Direction, SimState, Snake, ThreatLevel};

const BG_COLOR: Color = Color::new(0.1, 0.1, 0.15, 1.0);
const WALL_COLOR: Color = Color::new(0.8, 0.1, 0.1, 1.0);
const ENEMY_SMALLER: Color = Color::new(0.3, 0.8, 0.3, 1.0);
const ENEMY_SIMILAR: Color = Color::new(0.9, 0.9, 0.2, 1.0);
const ENEMY_LARGER: Color = Color::new(0.9, 0.2, 0.2, 1.0);

fn window_conf() -> Conf {
    Conf {
        window_title: "Serpent Arena".to_string(),
        window_width: 720,
        window_height: 1280,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Optional JSON config path as the first argument; defaults otherwise.
fn load_config() -> SimConfig {
    match std::env::args().nth(1) {
        Some(path) => match SimConfig::from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {path}");
                config
            }
            Err(e) => {
                log::error!("config {path}: {e}; using defaults");
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut sim = SimState::new(load_config());
    let mut stats = SimStats::new(600);
    let mut screen = (screen_width(), screen_height());
    sim.resize(screen.0, screen.1);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let now = (screen_width(), screen_height());
        if now != screen {
            screen = now;
            sim.resize(now.0, now.1);
        }

        if let Some(direction) = pressed_direction() {
            sim.change_direction(direction);
        }
        sim.set_boost(is_key_down(KeyCode::Space));

        sim.tick(get_frame_time());

        stats.record(TickSample {
            alive_snakes: sim.snakes().iter().filter(|s| s.alive).count(),
            live_food: sim.food_count(),
            deaths: sim.last_deaths().len(),
            player_length: sim.player().len(),
            player_score: sim.player().score,
        });

        clear_background(BG_COLOR);
        set_camera(&sim.camera().to_macroquad_camera());
        draw_arena(&sim);
        draw_food(&sim);
        for snake in sim.ai_snakes().iter().filter(|s| s.alive) {
            let color = match sim.threat_level(snake) {
                ThreatLevel::Smaller => ENEMY_SMALLER,
                ThreatLevel::Similar => ENEMY_SIMILAR,
                ThreatLevel::Larger => ENEMY_LARGER,
            };
            draw_snake(snake, sim.config(), color, 1.0);
        }
        // Player on top.
        let player = sim.player();
        if player.alive {
            draw_snake(player, sim.config(), player.color, 0.8);
        }

        set_default_camera();
        draw_hud(&sim, &stats);

        next_frame().await;
    }

    log::info!(
        "session over after {:.0}s: score {}, kills {}, {} deaths in arena",
        sim.elapsed,
        sim.player().score,
        sim.player().kills,
        stats.total_deaths
    );
}

fn pressed_direction() -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::Down)
    } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::Right)
    } else {
        None
    }
}

fn draw_arena(sim: &SimState) {
    let world = sim.world();
    draw_rectangle_lines(0.0, 0.0, world.width, world.height, 4.0, WALL_COLOR);
}

fn draw_food(sim: &SimState) {
    let radius = sim.config().food_radius;
    let view = sim.camera().visible_rect();
    let pad = radius * 2.0;
    let view = Rect::new(view.x - pad, view.y - pad, view.w + pad * 2.0, view.h + pad * 2.0);
    for food in sim.foods().filter(|f| view.contains(f.pos)) {
        draw_circle(food.pos.x, food.pos.y, radius * food.pulse_scale(), food.kind.color());
    }
}

fn draw_snake(snake: &Snake, config: &SimConfig, color: Color, alpha: f32) {
    let alpha = if snake.invulnerable { 0.5 } else { alpha };
    let color = Color::new(color.r, color.g, color.b, alpha);
    // Tail first so the head ends up on top.
    for (i, segment) in snake.segments.iter().enumerate().rev() {
        let radius = if i == 0 { config.head_radius } else { config.body_radius };
        draw_circle(segment.pos.x, segment.pos.y, radius, color);
    }
}

fn draw_hud(sim: &SimState, stats: &SimStats) {
    let tc = Color::new(1.0, 1.0, 1.0, 1.0);
    let sh = Color::new(0.0, 0.0, 0.0, 0.5);
    let player = sim.player();
    let pad = config::VIEWPORT_WIDTH.min(screen_width()) * 0.02;

    let lines = [
        format!("Score: {}", player.score),
        format!("Length: {}", player.len()),
        format!("Kills: {}", player.kills),
        format!("Energy: {:.0}%", player.energy / sim.config().energy_max * 100.0),
        format!("Food: {}", sim.food_count()),
        format!("Deaths: {}", stats.total_deaths),
    ];
    for (i, text) in lines.iter().enumerate() {
        let y = pad + 20.0 * (i + 1) as f32;
        draw_text(text, pad + 1.0, y + 1.0, 20.0, sh);
        draw_text(text, pad, y, 20.0, tc);
    }

    draw_graphs(stats, pad);

    if player.invulnerable {
        let text = format!("Invulnerable {:.0}s", player.invulnerability_timer);
        let tw = measure_text(&text, None, 24, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(&text, x + 1.0, 31.0, 24.0, sh);
        draw_text(&text, x, 30.0, 24.0, Color::new(1.0, 0.8, 0.2, 0.9));
    }
}

/// Rolling histories in the bottom-left corner, one sparkline per series.
fn draw_graphs(stats: &SimStats, pad: f32) {
    let series: [(&str, &RingBuffer, Color); 5] = [
        ("length", &stats.player_length, Color::new(0.4, 0.9, 0.4, 1.0)),
        ("score", &stats.player_score, Color::new(1.0, 0.8, 0.2, 1.0)),
        ("food", &stats.live_food, Color::new(0.4, 0.8, 1.0, 1.0)),
        ("snakes", &stats.alive_snakes, Color::new(0.8, 0.6, 1.0, 1.0)),
        ("deaths", &stats.deaths, Color::new(1.0, 0.4, 0.4, 1.0)),
    ];
    let (w, h) = (160.0, 28.0);
    let bottom = screen_height() - pad;
    for (i, (label, buffer, color)) in series.iter().enumerate() {
        let rect = Rect::new(pad, bottom - (h + 6.0) * (i + 1) as f32, w, h);
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(0.0, 0.0, 0.0, 0.35));
        draw_sparkline(buffer, rect, *color);
        let text = match buffer.last() {
            Some(v) => format!("{label} {v:.0}"),
            None => label.to_string(),
        };
        draw_text(&text, rect.x + rect.w + 6.0, rect.y + rect.h * 0.6, 16.0, *color);
    }
}

fn draw_sparkline(buffer: &RingBuffer, rect: Rect, color: Color) {
    let len = buffer.len();
    if len < 2 {
        return;
    }
    let samples: Vec<f32> = buffer.iter().collect();
    let max_val = samples.iter().cloned().fold(1.0f32, f32::max);
    let min_val = samples.iter().cloned().fold(max_val, f32::min);
    let range = (max_val - min_val).max(1.0);

    let point = |i: usize, v: f32| {
        vec2(
            rect.x + (i as f32 / (len - 1) as f32) * rect.w,
            rect.y + rect.h - ((v - min_val) / range) * rect.h,
        )
    };
    for (i, pair) in samples.windows(2).enumerate() {
        let a = point(i, pair[0]);
        let b = point(i + 1, pair[1]);
        draw_line(a.x, a.y, b.x, b.y, 1.5, color);
    }
}
