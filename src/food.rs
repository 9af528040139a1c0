use bevy::color::Color;
use bevy::math::Vec2;
use rand::Rng;

use crate::physics::Arena;

/// A static food particle. Eaten food is removed, never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Food {
    pub const COLOR: Color = Color::srgb(0.2, 0.8, 0.2);

    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            color: Self::COLOR,
        }
    }
}

/// Scatters `count` food particles uniformly inside the arena, at least
/// `edge_buffer` away from every wall. Particles may overlap.
pub fn spawn_particles(
    count: usize,
    radius: f32,
    edge_buffer: f32,
    arena: &Arena,
    rng: &mut impl Rng,
) -> Vec<Food> {
    (0..count)
        .map(|_| Food::new(arena.random_interior_point(edge_buffer, rng), radius))
        .collect()
}
