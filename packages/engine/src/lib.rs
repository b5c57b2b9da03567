//! Sandpile Engine - grid-based falling sand simulation in WASM
//!
//! Particles sleep when they cannot move and register with the neighbors that block them;
//! those neighbors wake them when they move or vanish, so each frame only touches particles
//! that might actually move.
//!
//! Architecture:
//! - domain/      - Points, particles, content kinds
//! - spatial/     - Occupancy grid
//! - systems/     - Behaviors (gravity, heap)
//! - simulation/  - World: scheduler, activation, commands, wasm facade

pub mod domain;
pub mod error;
pub mod spatial;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (keeps short paths working)
pub use spatial::grid;
pub use systems::behaviors;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Sandpile WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::content::{ContentRegistry, ParticleTemplate, KIND_GRAIN, KIND_SAND, KIND_STONE};
pub use domain::particle::{KindId, Particle, ParticleId, KIND_EMPTY};
pub use domain::point::Point;
pub use error::{SimError, SimResult};
pub use simulation::{SimConfig, StepStats, World, WorldCore};
pub use systems::behaviors::{Behavior, BehaviorOutcome, GravitySpec, HeapSpec, ParticleBehavior};

// Export kind constants for JS
#[wasm_bindgen]
pub fn kind_empty() -> u8 { KIND_EMPTY }
#[wasm_bindgen]
pub fn kind_sand() -> u8 { KIND_SAND }
#[wasm_bindgen]
pub fn kind_stone() -> u8 { KIND_STONE }
#[wasm_bindgen]
pub fn kind_grain() -> u8 { KIND_GRAIN }
