use bevy::color::Color;
use bevy::math::Vec2;
use rand::Rng;

use crate::config::*;
use crate::error::SimulationError;
use crate::food::Food;
use crate::physics::{Arena, Wall, calculate_distance};

/// Creature archetype. Fixed for life; decides which traits mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureType {
    Speed,
    Intelligence,
    Both,
}

impl CreatureType {
    pub const ALL: [CreatureType; 3] = [
        CreatureType::Speed,
        CreatureType::Intelligence,
        CreatureType::Both,
    ];

    /// Color at the start of every generation.
    pub fn base_color(self) -> Color {
        match self {
            CreatureType::Speed => Color::srgb(1.0, 0.0, 0.0),
            CreatureType::Intelligence => Color::srgb(0.0, 0.0, 1.0),
            CreatureType::Both => Color::srgb(0.8, 0.0, 0.8),
        }
    }

    /// Lighter tint after eating; purely cosmetic.
    pub fn fed_color(self, food_eaten: u32) -> Color {
        match (self, food_eaten) {
            (_, 0) => self.base_color(),
            (CreatureType::Speed, 1) => Color::srgb(1.0, 0.4, 0.4),
            (CreatureType::Speed, _) => Color::srgb(1.0, 0.6, 0.6),
            (CreatureType::Intelligence, 1) => Color::srgb(0.4, 0.4, 1.0),
            (CreatureType::Intelligence, _) => Color::srgb(0.6, 0.6, 1.0),
            (CreatureType::Both, 1) => Color::srgb(0.8, 0.4, 0.8),
            (CreatureType::Both, _) => Color::srgb(0.8, 0.6, 0.8),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreatureType::Speed => "Speed",
            CreatureType::Intelligence => "Intelligence",
            CreatureType::Both => "Both",
        }
    }
}

/// A single forager.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub kind: CreatureType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
    pub energy: f32,
    pub food_eaten: u32,
    pub max_velocity: f32,
    pub vision_radius: f32,
    pub energy_spend: f32,
    /// Set until the creature has picked its heading for the current leg.
    pub needs_movement: bool,
}

impl Creature {
    /// Creature with species-default traits.
    pub fn new(
        kind: CreatureType,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        mass: f32,
        energy: f32,
    ) -> Self {
        Self {
            kind,
            position,
            velocity,
            radius,
            mass,
            color: kind.base_color(),
            energy,
            food_eaten: 0,
            max_velocity: DEFAULT_MAX_VELOCITY,
            vision_radius: DEFAULT_VISION_RADIUS,
            energy_spend: DEFAULT_ENERGY_SPEND,
            needs_movement: true,
        }
    }

    pub fn with_traits(mut self, max_velocity: f32, vision_radius: f32, energy_spend: f32) -> Self {
        self.max_velocity = max_velocity;
        self.vision_radius = vision_radius;
        self.energy_spend = energy_spend;
        self
    }

    pub fn is_full(&self) -> bool {
        self.food_eaten >= MAX_FOOD_EATEN
    }

    pub fn is_exhausted(&self) -> bool {
        self.energy <= 0.0
    }

    fn head_towards(&mut self, target: Vec2) {
        self.velocity = (target - self.position).normalize_or_zero() * self.max_velocity;
    }

    fn head_at_wall(&mut self, wall: Wall) {
        self.velocity = wall.heading() * self.max_velocity;
    }

    /// Aim at the arena corner farthest away. Ties keep the earlier corner in
    /// top-left, top-right, bottom-left, bottom-right order.
    pub fn change_velocity_towards_furthest_corner(&mut self, arena: &Arena) {
        let corners = arena.corners();
        let mut furthest = corners[0];
        let mut furthest_distance = calculate_distance(self.position, furthest);
        for corner in &corners[1..] {
            let distance = calculate_distance(self.position, *corner);
            if distance > furthest_distance {
                furthest = *corner;
                furthest_distance = distance;
            }
        }
        self.head_towards(furthest);
    }

    pub fn change_velocity_towards_nearest_wall(&mut self, arena: &Arena) {
        let (wall, _) = arena.nearest_wall(self.position);
        self.head_at_wall(wall);
    }

    /// Closest food particle by centre distance; the first one wins ties.
    pub fn find_nearest_food<'a>(&self, food: &'a [Food]) -> Result<&'a Food, SimulationError> {
        let mut nearest: Option<(&Food, f32)> = None;
        for particle in food {
            let distance = calculate_distance(self.position, particle.position);
            match nearest {
                Some((_, best)) if best <= distance => {}
                _ => nearest = Some((particle, distance)),
            }
        }
        nearest.map(|(particle, _)| particle).ok_or(SimulationError::NoFood)
    }

    /// Turn towards the nearest food if it lies within vision.
    ///
    /// Returns whether the heading changed. An empty food set never redirects.
    pub fn change_velocity_towards_nearest_food(&mut self, food: &[Food]) -> bool {
        let Ok(nearest) = self.find_nearest_food(food) else {
            return false;
        };
        let target = nearest.position;
        if calculate_distance(self.position, target) <= self.vision_radius {
            self.head_towards(target);
            return true;
        }
        false
    }

    pub fn is_touching_food(&self, food: &Food) -> bool {
        calculate_distance(self.position, food.position) <= self.radius + food.radius
    }

    /// Head home when walking to the nearest wall would use up the remaining energy.
    pub fn change_velocity_if_not_enough_energy(&mut self, arena: &Arena) {
        let (wall, distance) = arena.nearest_wall(self.position);
        let energy_needed = distance / self.max_velocity * self.energy_spend;
        if energy_needed >= self.energy {
            self.head_at_wall(wall);
        }
    }

    /// Head home once the food quota is met. Returns whether it was.
    pub fn change_velocity_if_enough_food(&mut self, arena: &Arena) -> bool {
        if self.is_full() {
            self.change_velocity_towards_nearest_wall(arena);
            return true;
        }
        false
    }

    pub fn add_food(&mut self) {
        self.food_eaten = (self.food_eaten + 1).min(MAX_FOOD_EATEN);
        self.color = self.kind.fed_color(self.food_eaten);
    }

    /// One simulation step: pay the step cost while energy remains, then move.
    pub fn advance(&mut self) {
        if self.energy > 0.0 {
            self.energy = (self.energy - self.energy_spend).max(0.0);
        }
        self.position += self.velocity;
    }

    /// Place on a random wall heading inward at this creature's own speed.
    pub fn reset_position(&mut self, arena: &Arena, rng: &mut impl Rng) {
        let wall = Wall::random(rng);
        self.position = arena.random_point_on(wall, rng);
        self.velocity = wall.inward() * self.max_velocity;
    }

    /// Mutated offspring of the same type. The child starts with no energy,
    /// no food and zero position/velocity; the next reset places it.
    pub fn create_child(&self, mode: MutationMode, rng: &mut impl Rng) -> Creature {
        let blank = Creature {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            energy: 0.0,
            food_eaten: 0,
            needs_movement: true,
            ..self.clone()
        };

        match self.kind {
            CreatureType::Speed => {
                let max_velocity = mutate_speed(self.max_velocity, rng);
                blank.with_traits(max_velocity, DEFAULT_VISION_RADIUS, speed_energy_spend(max_velocity))
            }
            CreatureType::Intelligence => {
                let vision_radius = mutate_vision(self.vision_radius, rng);
                let cost_basis = match mode {
                    MutationMode::Faithful => self.vision_radius,
                    MutationMode::Corrected => vision_radius,
                };
                blank.with_traits(DEFAULT_MAX_VELOCITY, vision_radius, vision_energy_spend(cost_basis))
            }
            CreatureType::Both => {
                let max_velocity = mutate_speed(self.max_velocity, rng);
                match mode {
                    MutationMode::Faithful => {
                        // The speed-only intermediate carries the default vision,
                        // so that is what the hybrid mutates from and pays for.
                        let intermediate_vision = DEFAULT_VISION_RADIUS;
                        let vision_radius = mutate_vision(intermediate_vision, rng);
                        blank.with_traits(
                            max_velocity,
                            vision_radius,
                            vision_energy_spend(intermediate_vision),
                        )
                    }
                    MutationMode::Corrected => {
                        let vision_radius = mutate_vision(self.vision_radius, rng);
                        let energy_spend = speed_energy_spend(max_velocity)
                            * vision_energy_spend(vision_radius)
                            / DEFAULT_ENERGY_SPEND;
                        blank.with_traits(max_velocity, vision_radius, energy_spend)
                    }
                }
            }
        }
    }
}

/// Spawn `count` creatures on random walls, each heading inward at the
/// species default speed.
pub fn spawn_creatures(
    kind: CreatureType,
    count: usize,
    radius: f32,
    mass: f32,
    energy: f32,
    arena: &Arena,
    rng: &mut impl Rng,
) -> Vec<Creature> {
    (0..count)
        .map(|_| {
            let wall = Wall::random(rng);
            let position = arena.random_point_on(wall, rng);
            let velocity = wall.inward() * DEFAULT_MAX_VELOCITY;
            Creature::new(kind, position, velocity, radius, mass, energy)
        })
        .collect()
}

/// Start-of-generation reset: fresh wall position, full energy, no food, base color.
pub fn reset_all_creatures(creatures: &mut [Creature], energy: f32, arena: &Arena, rng: &mut impl Rng) {
    for creature in creatures.iter_mut() {
        creature.reset_position(arena, rng);
        creature.color = creature.kind.base_color();
        creature.energy = energy;
        creature.food_eaten = 0;
        creature.needs_movement = true;
    }
}

fn mutate_speed(max_velocity: f32, rng: &mut impl Rng) -> f32 {
    let margin = max_velocity * SPEED_MUTATION_MARGIN;
    rng.gen_range(max_velocity - margin..=max_velocity + margin)
}

fn mutate_vision(vision_radius: f32, rng: &mut impl Rng) -> f32 {
    let margin = vision_radius * VISION_MUTATION_MARGIN;
    rng.gen_range(vision_radius - margin..=vision_radius + margin)
}

/// Step cost for a given speed: quadratic above the default, logarithmic below.
pub fn speed_energy_spend(max_velocity: f32) -> f32 {
    let difference = max_velocity - DEFAULT_MAX_VELOCITY;
    if difference > 0.0 {
        let multiplier = 1.0 + difference / DEFAULT_MAX_VELOCITY;
        DEFAULT_ENERGY_SPEND * multiplier.powi(2)
    } else if difference < 0.0 {
        let decrease = DEFAULT_ENERGY_SPEND * (1.0 + -difference / DEFAULT_MAX_VELOCITY).ln();
        DEFAULT_ENERGY_SPEND - decrease
    } else {
        DEFAULT_ENERGY_SPEND
    }
}

/// Step cost for a given vision radius: logarithmic in both directions.
pub fn vision_energy_spend(vision_radius: f32) -> f32 {
    let difference = vision_radius - DEFAULT_VISION_RADIUS;
    if difference > 0.0 {
        let increase = DEFAULT_ENERGY_SPEND * (1.0 + difference / DEFAULT_VISION_RADIUS).ln();
        DEFAULT_ENERGY_SPEND + increase
    } else if difference < 0.0 {
        let decrease = DEFAULT_ENERGY_SPEND * (1.0 + -difference / DEFAULT_VISION_RADIUS).ln();
        DEFAULT_ENERGY_SPEND - decrease
    } else {
        DEFAULT_ENERGY_SPEND
    }
}
