use macroquad::prelude::*;

use crate::world::World;

/// Keeps a viewport centred on a target without showing anything outside the arena.
pub struct CameraFollow {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl CameraFollow {
    pub fn new(viewport_width: f32, viewport_height: f32, initial_target: Vec2) -> Self {
        Self {
            position: initial_target,
            viewport: vec2(viewport_width, viewport_height),
        }
    }

    /// Viewport changed. Simulation bounds are unaffected.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = vec2(width.max(1.0), height.max(1.0));
    }

    pub fn update(&mut self, target: Vec2, world: &World) {
        let half = self.viewport * 0.5;
        self.position = vec2(
            clamp_axis(target.x, half.x, world.width),
            clamp_axis(target.y, half.y, world.height),
        );
    }

    /// World-space rectangle currently in view.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.viewport.x * 0.5,
            self.position.y - self.viewport.y * 0.5,
            self.viewport.x,
            self.viewport.y,
        )
    }

    /// Arena y grows upward, so unlike screen space the y zoom stays positive.
    pub fn to_macroquad_camera(&self) -> Camera2D {
        Camera2D {
            target: self.position,
            zoom: vec2(2.0 / self.viewport.x, 2.0 / self.viewport.y),
            ..Default::default()
        }
    }
}

/// When the viewport is wider than the arena, centre on the arena instead.
fn clamp_axis(value: f32, half_view: f32, extent: f32) -> f32 {
    if half_view * 2.0 >= extent {
        extent * 0.5
    } else {
        value.clamp(half_view, extent - half_view)
    }
}
