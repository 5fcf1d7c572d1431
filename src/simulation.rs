//! Heat aura plugin: resources, messages and system ordering.

use crate::aura::heat_aura_tick_system;
use crate::config::HeatAuraConfig;
use crate::heat::HeatAuraRng;
use crate::modes::{handle_mode_requests_system, ModeRequest};
use crate::spatial_partition::{rebuild_heat_grid_system, SpatialGrid};
use bevy::prelude::*;

/// Ordered phases of one frame of heat simulation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeatAuraSet {
    /// Mode toggles requested this frame take effect.
    Modes,
    /// Spatial grid rebuilt from current positions.
    Grid,
    /// Aura ticks fire.
    Tick,
}

pub struct HeatAuraPlugin;

impl Plugin for HeatAuraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeatAuraConfig>()
            .init_resource::<SpatialGrid>()
            .init_resource::<HeatAuraRng>()
            .add_message::<ModeRequest>()
            .configure_sets(
                Update,
                (HeatAuraSet::Modes, HeatAuraSet::Grid, HeatAuraSet::Tick).chain(),
            )
            .add_systems(Startup, seed_heat_rng_system)
            .add_systems(
                Update,
                (
                    handle_mode_requests_system.in_set(HeatAuraSet::Modes),
                    rebuild_heat_grid_system.in_set(HeatAuraSet::Grid),
                    heat_aura_tick_system.in_set(HeatAuraSet::Tick),
                ),
            );
    }
}

/// Startup system: reseed ignition rolls when the config pins a seed.
///
/// Must run after the config has been loaded.
pub fn seed_heat_rng_system(config: Res<HeatAuraConfig>, mut rng: ResMut<HeatAuraRng>) {
    if let Some(seed) = config.rng_seed {
        rng.reseed(seed);
        info!("Heat aura rng seeded with {seed}");
    }
}
