use bevy::math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_X_COOR, DEFAULT_Y_COOR};
use crate::creature::Creature;

/// Axis-aligned arena in screen-style coordinates: `y` grows toward the bottom wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            x: DEFAULT_X_COOR,
            y: DEFAULT_Y_COOR,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// One of the four arena walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Unit vector pointing at this wall from inside the arena.
    pub fn heading(self) -> Vec2 {
        match self {
            Wall::Top => Vec2::new(0.0, -1.0),
            Wall::Bottom => Vec2::new(0.0, 1.0),
            Wall::Left => Vec2::new(-1.0, 0.0),
            Wall::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Unit vector pointing away from this wall, into the arena.
    pub fn inward(self) -> Vec2 {
        -self.heading()
    }
}

impl Arena {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.left(), self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        ]
    }

    /// Closest wall to `position` and the distance to it.
    ///
    /// Ties resolve bottom, top, right, left.
    pub fn nearest_wall(&self, position: Vec2) -> (Wall, f32) {
        let candidates = [
            (Wall::Bottom, self.bottom() - position.y),
            (Wall::Top, position.y - self.top()),
            (Wall::Right, self.right() - position.x),
            (Wall::Left, position.x - self.left()),
        ];

        let mut nearest = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < nearest.1 {
                nearest = *candidate;
            }
        }
        nearest
    }

    /// True when `position` lies on or beyond any wall.
    pub fn is_touching_boundary(&self, position: Vec2) -> bool {
        position.x <= self.left()
            || position.x >= self.right()
            || position.y <= self.top()
            || position.y >= self.bottom()
    }

    /// Random point along `wall`.
    pub fn random_point_on(&self, wall: Wall, rng: &mut impl Rng) -> Vec2 {
        match wall {
            Wall::Top => Vec2::new(rng.gen_range(self.left()..self.right()), self.top()),
            Wall::Bottom => Vec2::new(rng.gen_range(self.left()..self.right()), self.bottom()),
            Wall::Left => Vec2::new(self.left(), rng.gen_range(self.top()..self.bottom())),
            Wall::Right => Vec2::new(self.right(), rng.gen_range(self.top()..self.bottom())),
        }
    }

    /// Random point at least `buffer` away from every wall.
    pub fn random_interior_point(&self, buffer: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.left() + buffer..=self.right() - buffer),
            rng.gen_range(self.top() + buffer..=self.bottom() - buffer),
        )
    }
}

pub fn calculate_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Velocity with the x component negated.
pub fn flipped_x_velocity(velocity: Vec2) -> Vec2 {
    Vec2::new(-velocity.x, velocity.y)
}

/// Velocity with the y component negated.
pub fn flipped_y_velocity(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y)
}

/// Post-collision velocities of two creatures under a mass-weighted elastic bounce.
///
/// Coincident centres have no collision normal; both velocities come back unchanged.
pub fn bounce_velocities(first: &Creature, second: &Creature) -> (Vec2, Vec2) {
    let offset = first.position - second.position;
    let distance_squared = offset.length_squared();
    if distance_squared == 0.0 {
        return (first.velocity, second.velocity);
    }

    let total_mass = first.mass + second.mass;
    let relative = first.velocity - second.velocity;
    let projection = relative.dot(offset) / distance_squared;

    let first_velocity = first.velocity - (2.0 * second.mass / total_mass) * projection * offset;
    let second_velocity = second.velocity - (2.0 * first.mass / total_mass) * projection * -offset;
    (first_velocity, second_velocity)
}

/// Fastest current speed in `creatures`, or 0 when there are none.
pub fn highest_speed(creatures: &[Creature]) -> f32 {
    creatures
        .iter()
        .map(|creature| creature.velocity.length())
        .reduce(f32::max)
        .unwrap_or(0.0)
}

/// Slowest current speed in `creatures`, or 0 when there are none.
pub fn lowest_speed(creatures: &[Creature]) -> f32 {
    creatures
        .iter()
        .map(|creature| creature.velocity.length())
        .reduce(f32::min)
        .unwrap_or(0.0)
}
