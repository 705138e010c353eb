//! # Adapters
//!
//! Concrete implementations around the core:
//!
//! - `config` - `StaticConfigProvider`, and `TomlConfigProvider` (requires
//!   the "config" feature)
//! - `simulation` - seeded store/lookup driver over a `Network`

pub mod config;
pub mod simulation;

pub use config::StaticConfigProvider;
#[cfg(feature = "config")]
pub use config::TomlConfigProvider;
pub use simulation::{LookupRecord, Simulation, SimulationConfig, SimulationReport};
