use macroquad::prelude::*;
use ::rand::Rng;

/// Fixed rectangular arena `[0, width] x [0, height]`. Walls are solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    /// True when a circle at `pos` pokes past any edge.
    pub fn breaches_wall(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius < 0.0
            || pos.x + radius > self.width
            || pos.y - radius < 0.0
            || pos.y + radius > self.height
    }

    /// Uniform point anywhere in the arena.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(rng.gen::<f32>() * self.width, rng.gen::<f32>() * self.height)
    }

    /// Uniform point at least `margin` away from every wall.
    pub fn random_inset_point(&self, margin: f32, rng: &mut impl Rng) -> Vec2 {
        let mx = margin.clamp(0.0, self.width * 0.5);
        let my = margin.clamp(0.0, self.height * 0.5);
        if mx * 2.0 >= self.width || my * 2.0 >= self.height {
            return self.center();
        }
        vec2(
            rng.gen_range(mx..self.width - mx),
            rng.gen_range(my..self.height - my),
        )
    }
}
