use macroquad::prelude::*;
use std::collections::HashMap;

use crate::snake::Snake;

/// Uniform grid bucketing snakes by the cell their head is in.
///
/// Rebuilt from scratch on every collision pass. Buckets are emptied rather
/// than dropped so their allocations carry over to the next tick.
///
/// Only heads are indexed. A long body whose head sits outside the 3x3 block
/// around a query point is invisible to that query, so body hits against it
/// are missed. This is a known limitation of the neighbourhood query.
pub struct SpatialGrid {
    inv_cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            inv_cell_size: 1.0 / cell_size.max(f32::EPSILON),
            cells: HashMap::new(),
        }
    }

    pub fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    /// Bucket a snake by its head cell. `idx` is its slot in the snake list.
    pub fn insert(&mut self, idx: usize, snake: &Snake) {
        let key = self.cell_of(snake.head_position());
        self.cells.entry(key).or_default().push(idx);
    }

    /// Clear and re-insert every alive snake.
    pub fn rebuild(&mut self, snakes: &[Snake]) {
        self.clear();
        for (idx, snake) in snakes.iter().enumerate() {
            if snake.alive {
                self.insert(idx, snake);
            }
        }
    }

    /// Append the contents of the 3x3 block of cells around `pos` to `out`.
    pub fn query_neighbors_into(&self, pos: Vec2, out: &mut Vec<usize>) {
        let (cx, cy) = self.cell_of(pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
    }

    pub fn query_neighbors(&self, pos: Vec2) -> Vec<usize> {
        let mut result = Vec::new();
        self.query_neighbors_into(pos, &mut result);
        result
    }

    #[cfg(test)]
    fn indexed(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}
