//! Generational foraging simulation: speed, vision and hybrid creatures compete
//! for food in a walled arena, and successful foragers pass mutated traits on.

pub mod config;
pub mod creature;
pub mod environment;
pub mod error;
pub mod food;
pub mod physics;
pub mod stats;

pub use config::{MutationMode, SimulationConfig};
pub use creature::{Creature, CreatureType};
pub use environment::{Environment, PopulationSnapshot};
pub use error::{ConfigError, SimulationError};
pub use food::Food;
pub use physics::Arena;
