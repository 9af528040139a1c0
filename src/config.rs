//! Configuration constants and runtime settings for the natural selection simulator
use std::fs;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::physics::Arena;

// ============================================================================
// ARENA SETTINGS
// ============================================================================

/// Left edge of the arena
pub const DEFAULT_X_COOR: f32 = 100.0;

/// Top edge of the arena (y grows downward)
pub const DEFAULT_Y_COOR: f32 = 100.0;

/// Arena width
pub const DEFAULT_WIDTH: f32 = 700.0;

/// Arena height
pub const DEFAULT_HEIGHT: f32 = 500.0;

// ============================================================================
// CREATURE SETTINGS
// ============================================================================

/// Number of creatures added by one species command
pub const DEFAULT_COUNT: usize = 10;

/// Radius of every creature
pub const DEFAULT_CREATURE_RADIUS: f32 = 5.0;

/// Mass of every creature (only used by the bounce helper)
pub const DEFAULT_CREATURE_MASS: f32 = 10.0;

/// Energy restored to each creature at the start of a generation
pub const DEFAULT_ENERGY_CAPACITY: f32 = 100.0;

/// A creature stops foraging once it has eaten this many food particles
pub const MAX_FOOD_EATEN: u32 = 2;

// ============================================================================
// TRAIT BASELINES & MUTATION
// ============================================================================

/// Species default speed; speed costs are measured against it
pub const DEFAULT_MAX_VELOCITY: f32 = 2.5;

/// Energy spent per step by a creature with default traits
pub const DEFAULT_ENERGY_SPEND: f32 = 0.25;

/// Species default vision; vision costs are measured against it
pub const DEFAULT_VISION_RADIUS: f32 = 25.0;

/// Children draw their speed within ±10% of the parent's
pub const SPEED_MUTATION_MARGIN: f32 = 0.1;

/// Children draw their vision within ±50% of the parent's
pub const VISION_MUTATION_MARGIN: f32 = 0.5;

// ============================================================================
// FOOD SETTINGS
// ============================================================================

/// Food particles spawned per generation unless changed at runtime
pub const DEFAULT_FOOD_COUNT: usize = 30;

/// Radius of a food particle
pub const FOOD_RADIUS: f32 = 2.0;

/// Food never spawns closer than this to a wall
pub const FOOD_EDGE_BUFFER: f32 = 20.0;

// ============================================================================
// DISPLAY SETTINGS
// ============================================================================

/// Config file read at startup, relative to the working directory
pub const CONFIG_FILE: &str = "natural_selection.toml";

/// Population graph draws bar separators only below this many generations
pub const POPULATION_SEPARATOR_LIMIT: usize = 25;

/// How the vision trait is inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationMode {
    /// Vision cost follows the parent's vision and hybrids mutate vision from
    /// the species default, matching the historical behaviour.
    #[default]
    Faithful,
    /// Vision cost follows the child's drawn vision and hybrids mutate both
    /// traits from the real parent.
    Corrected,
}

/// Runtime settings for an [`Environment`](crate::environment::Environment).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub arena: Arena,
    /// Creatures spawned per species command.
    pub batch_size: usize,
    pub creature_radius: f32,
    pub creature_mass: f32,
    pub energy_capacity: f32,
    /// Initial food target; adjustable at runtime.
    pub food_count: usize,
    pub food_radius: f32,
    pub food_edge_buffer: f32,
    pub mutation_mode: MutationMode,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            batch_size: DEFAULT_COUNT,
            creature_radius: DEFAULT_CREATURE_RADIUS,
            creature_mass: DEFAULT_CREATURE_MASS,
            energy_capacity: DEFAULT_ENERGY_CAPACITY,
            food_count: DEFAULT_FOOD_COUNT,
            food_radius: FOOD_RADIUS,
            food_edge_buffer: FOOD_EDGE_BUFFER,
            mutation_mode: MutationMode::Faithful,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(ConfigError::Invalid("arena width and height must be positive"));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be non-zero"));
        }
        if self.creature_radius <= 0.0 || self.food_radius <= 0.0 {
            return Err(ConfigError::Invalid("radii must be positive"));
        }
        if self.creature_mass <= 0.0 {
            return Err(ConfigError::Invalid("creature_mass must be positive"));
        }
        if self.energy_capacity <= 0.0 {
            return Err(ConfigError::Invalid("energy_capacity must be positive"));
        }
        if self.food_count == 0 {
            return Err(ConfigError::Invalid("food_count must be at least 1"));
        }
        let buffer = self.food_edge_buffer;
        if buffer < 0.0 || 2.0 * buffer > self.arena.width || 2.0 * buffer > self.arena.height {
            return Err(ConfigError::Invalid("food_edge_buffer leaves no room for food"));
        }
        Ok(())
    }

    /// Reads and validates a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded simulation config");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring config file");
                Self::default()
            }
        }
    }
}
