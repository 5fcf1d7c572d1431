//! Tanker heat aura simulation library
//!
//! Molten-mode heat aura for a ragdoll sandbox: while molten, the tanker
//! periodically damages and ignites nearby limbs, heats nearby props and keeps
//! its own body from overheating.

pub mod aura;
pub mod body;
pub mod config;
pub mod constants;
pub mod error;
pub mod heat;
pub mod locator;
pub mod modes;
pub mod regulation;
pub mod scheduler;
pub mod simulation;
pub mod spatial_partition;
pub mod testing;

pub use aura::HeatAura;
pub use body::{Caster, Limb, Limbs, Thermal};
pub use config::HeatAuraConfig;
pub use error::{SimError, SimResult};
pub use modes::{ModeAction, ModeRequest, TankerModes};
pub use simulation::{HeatAuraPlugin, HeatAuraSet};
