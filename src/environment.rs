use bevy::prelude::{ResMut, Resource, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{MAX_FOOD_EATEN, SimulationConfig};
use crate::creature::{Creature, CreatureType, reset_all_creatures, spawn_creatures};
use crate::error::ConfigError;
use crate::food::{Food, spawn_particles};
use crate::physics::{Arena, flipped_x_velocity, flipped_y_velocity};

/// Trait values of one creature, captured at a generation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureRecord {
    pub kind: CreatureType,
    pub max_velocity: f32,
    pub vision_radius: f32,
    pub energy_spend: f32,
}

impl From<&Creature> for CreatureRecord {
    fn from(creature: &Creature) -> Self {
        Self {
            kind: creature.kind,
            max_velocity: creature.max_velocity,
            vision_radius: creature.vision_radius,
            energy_spend: creature.energy_spend,
        }
    }
}

/// Population composition at the start of a generation. Owns its records, so
/// later changes to the live population never show up in history.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSnapshot {
    pub generation: usize,
    pub records: Vec<CreatureRecord>,
}

impl PopulationSnapshot {
    pub fn capture(generation: usize, creatures: &[Creature]) -> Self {
        Self {
            generation,
            records: creatures.iter().map(CreatureRecord::from).collect(),
        }
    }

    pub fn count_of(&self, kind: CreatureType) -> usize {
        self.records.iter().filter(|record| record.kind == kind).count()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// Outcome of one reset pass, kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationSummary {
    pub survivors: usize,
    pub children: usize,
    pub extinct: usize,
}

/// Owns the live population and food, and drives generations frame by frame.
#[derive(Resource)]
pub struct Environment {
    config: SimulationConfig,
    creatures: Vec<Creature>,
    food: Vec<Food>,
    food_count: usize,
    is_running: bool,
    needs_reset: bool,
    population_history: Vec<PopulationSnapshot>,
    rng: StdRng,
}

impl Environment {
    /// Validates `config` and seeds the generator from `rng_seed`, or from
    /// entropy when no seed is configured.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: SimulationConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut environment = Self {
            food_count: config.food_count,
            config,
            creatures: Vec::new(),
            food: Vec::new(),
            is_running: false,
            needs_reset: false,
            population_history: Vec::new(),
            rng,
        };
        environment.refresh_food();
        environment.record_generation();

        info!(
            food = environment.food.len(),
            mode = ?environment.config.mutation_mode,
            "environment ready"
        );
        Ok(environment)
    }

    pub fn arena(&self) -> &Arena {
        &self.config.arena
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Trait records of the live population, current as of the last command
    /// or frame rather than the last generation boundary.
    pub fn live_records(&self) -> Vec<CreatureRecord> {
        self.creatures.iter().map(CreatureRecord::from).collect()
    }

    /// Direct access to the live population, for scripted scenarios.
    #[doc(hidden)]
    pub fn creatures_mut(&mut self) -> &mut Vec<Creature> {
        &mut self.creatures
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    /// Direct access to the live food set, for scripted scenarios.
    #[doc(hidden)]
    pub fn food_mut(&mut self) -> &mut Vec<Food> {
        &mut self.food
    }

    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn needs_reset(&self) -> bool {
        self.needs_reset
    }

    pub fn population_history(&self) -> &[PopulationSnapshot] {
        &self.population_history
    }

    /// Completed generations; the construction snapshot does not count.
    pub fn trials_run(&self) -> usize {
        self.population_history.len().saturating_sub(1)
    }

    pub fn species_count(&self, kind: CreatureType) -> usize {
        self.creatures.iter().filter(|creature| creature.kind == kind).count()
    }

    pub fn contains_species(&self, kind: CreatureType) -> bool {
        self.creatures.iter().any(|creature| creature.kind == kind)
    }

    pub fn are_there_creatures_alive(&self) -> bool {
        !self.creatures.is_empty()
    }

    /// Begin simulating. Needs at least one creature; returns whether it started.
    pub fn start(&mut self) -> bool {
        if self.creatures.is_empty() {
            return false;
        }
        if !self.is_running {
            info!(generation = self.trials_run(), creatures = self.creatures.len(), "simulation started");
        }
        self.is_running = true;
        true
    }

    /// Spawn one batch of `kind` on the arena walls. Ignored while running.
    pub fn add_species(&mut self, kind: CreatureType) -> bool {
        if self.is_running {
            return false;
        }
        let batch = spawn_creatures(
            kind,
            self.config.batch_size,
            self.config.creature_radius,
            self.config.creature_mass,
            self.config.energy_capacity,
            &self.config.arena,
            &mut self.rng,
        );
        self.creatures.extend(batch);
        info!(species = kind.label(), total = self.species_count(kind), "species added");
        true
    }

    /// Drop every creature of `kind`. Ignored while running.
    pub fn remove_species(&mut self, kind: CreatureType) -> bool {
        if self.is_running {
            return false;
        }
        let before = self.creatures.len();
        self.creatures.retain(|creature| creature.kind != kind);
        info!(species = kind.label(), removed = before - self.creatures.len(), "species removed");
        true
    }

    /// Remove `kind` when present, otherwise add a batch of it.
    pub fn toggle_species(&mut self, kind: CreatureType) -> bool {
        if self.contains_species(kind) {
            self.remove_species(kind)
        } else {
            self.add_species(kind)
        }
    }

    /// Raise the food target for the next refresh. Ignored while running.
    pub fn increase_food_count(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.food_count += 1;
        debug!(food_count = self.food_count, "food target raised");
        true
    }

    /// Lower the food target for the next refresh, never below 1. Ignored while running.
    pub fn decrease_food_count(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        if self.food_count > 1 {
            self.food_count -= 1;
        }
        debug!(food_count = self.food_count, "food target lowered");
        true
    }

    pub fn refresh_food(&mut self) {
        self.food = spawn_particles(
            self.food_count,
            self.config.food_radius,
            self.config.food_edge_buffer,
            &self.config.arena,
            &mut self.rng,
        );
    }

    /// True when the food is gone, or every creature is spent or full and
    /// resting on a wall.
    pub fn are_all_particles_returned(&self) -> bool {
        if self.food.is_empty() {
            return true;
        }
        let arena = &self.config.arena;
        self.creatures.iter().all(|creature| {
            (creature.is_full() || creature.is_exhausted()) && arena.is_touching_boundary(creature.position)
        })
    }

    /// One tick of the simulation.
    pub fn advance_one_frame(&mut self) {
        if self.needs_reset {
            self.reset_generation();
            self.needs_reset = false;
            return;
        }

        if self.is_running && self.are_all_particles_returned() {
            self.is_running = false;
            self.needs_reset = true;
            info!(generation = self.trials_run(), "generation finished");
        }

        if !self.is_running {
            return;
        }

        let Self {
            config,
            creatures,
            food,
            ..
        } = self;
        let arena = &config.arena;

        for creature in creatures.iter_mut() {
            if creature.needs_movement {
                creature.change_velocity_towards_furthest_corner(arena);
                creature.needs_movement = false;
            }

            if !food.is_empty() {
                eat_touching_food(creature, food);

                if creature.change_velocity_towards_nearest_food(food.as_slice()) {
                    creature.needs_movement = true;
                }
                creature.change_velocity_if_not_enough_energy(arena);
            } else {
                creature.needs_movement = false;
                creature.change_velocity_towards_nearest_wall(arena);
            }

            if creature.is_full() {
                creature.needs_movement = false;
            }
            creature.change_velocity_if_enough_food(arena);
            resolve_wall_hits(creature, arena, food.is_empty());
            creature.advance();
        }
    }

    /// Generation boundary: cull, reproduce, reset everyone, respawn food and
    /// record the new population.
    pub fn reset_generation(&mut self) -> GenerationSummary {
        let summary = self.kill_and_reproduce();
        reset_all_creatures(
            &mut self.creatures,
            self.config.energy_capacity,
            &self.config.arena,
            &mut self.rng,
        );
        self.refresh_food();
        self.record_generation();

        info!(
            generation = self.trials_run(),
            survivors = summary.survivors,
            children = summary.children,
            extinct = summary.extinct,
            population = self.creatures.len(),
            "new generation"
        );
        summary
    }

    /// Creatures that ate nothing die; those that ate twice add one mutated
    /// child each. Parents stay alongside their children.
    pub fn kill_and_reproduce(&mut self) -> GenerationSummary {
        let before = self.creatures.len();
        self.creatures.retain(|creature| creature.food_eaten > 0);
        let survivors = self.creatures.len();

        let mode = self.config.mutation_mode;
        let rng = &mut self.rng;
        let children: Vec<Creature> = self
            .creatures
            .iter()
            .filter(|creature| creature.food_eaten >= MAX_FOOD_EATEN)
            .map(|parent| parent.create_child(mode, &mut *rng))
            .collect();
        let child_count = children.len();
        self.creatures.extend(children);

        GenerationSummary {
            survivors,
            children: child_count,
            extinct: before - survivors,
        }
    }

    fn record_generation(&mut self) {
        let generation = self.population_history.len();
        self.population_history
            .push(PopulationSnapshot::capture(generation, &self.creatures));
    }
}

fn eat_touching_food(creature: &mut Creature, food: &mut Vec<Food>) {
    let mut index = 0;
    while index < food.len() {
        if !creature.is_full() && creature.is_touching_food(&food[index]) {
            creature.add_food();
            food.remove(index);
            creature.needs_movement = true;
        } else {
            index += 1;
        }
    }
}

/// Bounce off a wall the creature is moving into, or stop dead if it has no
/// reason to keep moving.
fn resolve_wall_hits(creature: &mut Creature, arena: &Arena, food_exhausted: bool) {
    let settled = creature.is_exhausted() || creature.is_full() || food_exhausted;
    let position = creature.position;

    if position.x <= arena.left() {
        if settled {
            creature.velocity = Vec2::ZERO;
        } else if creature.velocity.x < 0.0 {
            creature.velocity = flipped_x_velocity(creature.velocity);
        }
    }
    if position.x >= arena.right() {
        if settled {
            creature.velocity = Vec2::ZERO;
        } else if creature.velocity.x > 0.0 {
            creature.velocity = flipped_x_velocity(creature.velocity);
        }
    }
    if position.y <= arena.top() {
        if settled {
            creature.velocity = Vec2::ZERO;
        } else if creature.velocity.y < 0.0 {
            creature.velocity = flipped_y_velocity(creature.velocity);
        }
    }
    if position.y >= arena.bottom() {
        if settled {
            creature.velocity = Vec2::ZERO;
        } else if creature.velocity.y > 0.0 {
            creature.velocity = flipped_y_velocity(creature.velocity);
        }
    }
}

/// Advances the simulation once per frame while any creature is alive.
pub fn advance_simulation(mut environment: ResMut<Environment>) {
    if environment.are_there_creatures_alive() {
        environment.advance_one_frame();
    }
}
