use macroquad::prelude::*;

/// Named vector operations used across the simulation. All of them return new
/// values; nothing mutates in place.
pub trait VectorExt {
    fn distance_to(self, other: Vec2) -> f32;
    fn magnitude(self) -> f32;
    /// Unit-length copy, or `Vec2::ZERO` when the magnitude is zero.
    fn normalized(self) -> Vec2;
    fn scaled(self, factor: f32) -> Vec2;
}

impl VectorExt for Vec2 {
    fn distance_to(self, other: Vec2) -> f32 {
        (self - other).magnitude()
    }

    fn magnitude(self) -> f32 {
        self.length()
    }

    fn normalized(self) -> Vec2 {
        let mag = self.length();
        if mag > 0.0 && mag.is_finite() {
            self / mag
        } else {
            Vec2::ZERO
        }
    }

    fn scaled(self, factor: f32) -> Vec2 {
        self * factor
    }
}

/// Two circles overlap when their centres are strictly closer than the sum of radii.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    (a - b).length_squared() < reach * reach
}
