//! Tanker transformation modes.
//!
//! | Mode | Effect here |
//! |------|-------------|
//! | Molten | Starts the [`HeatAura`] on enable, stops it on disable |
//! | Ultra sense | Flag only; its texture swap lives in the host game |
//!
//! Modes are switched either directly through the free functions below or by
//! writing a [`ModeRequest`] message, which is how the host's context menu
//! reaches the simulation.

use crate::aura::HeatAura;
use crate::body::{Limb, Limbs};
use crate::config::HeatAuraConfig;
use crate::heat::HeatProfile;
use bevy::prelude::*;
use std::fmt;

// ── Components ─────────────────────────────────────────────────────────────────

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TankerModes {
    pub molten: bool,
    pub ultra_sense: bool,
}

// ── Messages ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    ToggleMolten,
    EnableMolten,
    DisableMolten,
    ToggleUltraSense,
    EnableUltraSense,
    DisableUltraSense,
    ClearModes,
    StatusReport,
}

/// A mode switch requested for one caster.
#[derive(Message, Debug, Clone, Copy)]
pub struct ModeRequest {
    pub caster: Entity,
    pub action: ModeAction,
}

// ── Molten ─────────────────────────────────────────────────────────────────────

pub fn enable_molten(modes: &mut TankerModes, aura: &mut HeatAura, profile: HeatProfile) {
    modes.molten = true;
    aura.start(profile);
    info!("Molten mode activated! Heat aura engaged.");
}

pub fn disable_molten(modes: &mut TankerModes, aura: &mut HeatAura) {
    modes.molten = false;
    aura.stop();
    info!("Molten mode deactivated!");
}

pub fn toggle_molten(modes: &mut TankerModes, aura: &mut HeatAura, profile: HeatProfile) {
    if modes.molten {
        disable_molten(modes, aura);
    } else {
        enable_molten(modes, aura, profile);
    }
}

// ── Ultra sense ────────────────────────────────────────────────────────────────

pub fn enable_ultra_sense(modes: &mut TankerModes) {
    modes.ultra_sense = true;
    info!("Ultra sense mode activated! Enhanced perception active.");
}

pub fn disable_ultra_sense(modes: &mut TankerModes) {
    modes.ultra_sense = false;
    info!("Ultra sense mode deactivated!");
}

pub fn toggle_ultra_sense(modes: &mut TankerModes) {
    if modes.ultra_sense {
        disable_ultra_sense(modes);
    } else {
        enable_ultra_sense(modes);
    }
}

/// Switch off every active mode.
pub fn clear_modes(modes: &mut TankerModes, aura: &mut HeatAura) {
    if modes.molten {
        disable_molten(modes, aura);
    }
    if modes.ultra_sense {
        disable_ultra_sense(modes);
    }
}

// ── Status report ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// Mean of `health / initial_health` over existing limbs, `0.0` with none.
    pub average_health: f32,
    pub molten: bool,
    pub ultra_sense: bool,
}

impl StatusReport {
    pub fn collect(modes: &TankerModes, limbs: &Limbs, limb_query: &Query<&Limb>) -> Self {
        let fractions: Vec<f32> = limbs
            .as_slice()
            .iter()
            .filter_map(|&e| limb_query.get(e).ok())
            .map(Limb::health_fraction)
            .collect();
        let average_health = if fractions.is_empty() {
            0.0
        } else {
            fractions.iter().sum::<f32>() / fractions.len() as f32
        };
        Self {
            average_health,
            molten: modes.molten,
            ultra_sense: modes.ultra_sense,
        }
    }
}

fn active_label(active: bool) -> &'static str {
    if active {
        "ACTIVE"
    } else {
        "INACTIVE"
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tanker Status Report:")?;
        writeln!(f, "Health: {:.0}%", self.average_health * 100.0)?;
        writeln!(f, "Molten Mode: {}", active_label(self.molten))?;
        writeln!(f, "Ultra Sense Mode: {}", active_label(self.ultra_sense))
    }
}

// ── Systems ────────────────────────────────────────────────────────────────────

/// Apply queued [`ModeRequest`]s.  Requests for entities that are not casters
/// (or were despawned) are dropped with a warning.
pub fn handle_mode_requests_system(
    mut requests: MessageReader<ModeRequest>,
    config: Res<HeatAuraConfig>,
    mut casters: Query<(&mut TankerModes, &mut HeatAura, &Limbs)>,
    limb_query: Query<&Limb>,
) {
    for request in requests.read() {
        let Ok((mut modes, mut aura, limbs)) = casters.get_mut(request.caster) else {
            warn!("Mode request {:?} for unknown caster {}", request.action, request.caster);
            continue;
        };
        let profile = HeatProfile::from(&*config);

        match request.action {
            ModeAction::ToggleMolten => toggle_molten(&mut modes, &mut aura, profile),
            ModeAction::EnableMolten => enable_molten(&mut modes, &mut aura, profile),
            ModeAction::DisableMolten => disable_molten(&mut modes, &mut aura),
            ModeAction::ToggleUltraSense => toggle_ultra_sense(&mut modes),
            ModeAction::EnableUltraSense => enable_ultra_sense(&mut modes),
            ModeAction::DisableUltraSense => disable_ultra_sense(&mut modes),
            ModeAction::ClearModes => clear_modes(&mut modes, &mut aura),
            ModeAction::StatusReport => {
                info!("{}", StatusReport::collect(&modes, limbs, &limb_query));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn toggle_molten_starts_and_stops_the_aura() {
        let mut modes = TankerModes::default();
        let mut aura = HeatAura::default();

        toggle_molten(&mut modes, &mut aura, HeatProfile::default());
        assert!(modes.molten);
        assert!(aura.is_active());

        toggle_molten(&mut modes, &mut aura, HeatProfile::default());
        assert!(!modes.molten);
        assert!(!aura.is_active());
    }

    #[test]
    fn enable_twice_restarts_rather_than_stacking() {
        let mut modes = TankerModes::default();
        let mut aura = HeatAura::default();
        enable_molten(&mut modes, &mut aura, HeatProfile::default());
        enable_molten(&mut modes, &mut aura, HeatProfile::default());
        assert_eq!(aura.sessions_started(), 2);
        assert!(aura.is_active());
    }

    #[test]
    fn clear_modes_switches_everything_off() {
        let mut modes = TankerModes::default();
        let mut aura = HeatAura::default();
        enable_molten(&mut modes, &mut aura, HeatProfile::default());
        toggle_ultra_sense(&mut modes);
        assert!(modes.ultra_sense);

        clear_modes(&mut modes, &mut aura);
        assert_eq!(modes, TankerModes::default());
        assert!(!aura.is_active());
    }

    #[test]
    fn status_report_averages_limb_health() {
        let mut world = World::new();
        let body = world.spawn_empty().id();
        let full = world.spawn(Limb::new(body, 200.0)).id();
        let half = world
            .spawn(Limb {
                health: 100.0,
                initial_health: 200.0,
                owner: body,
            })
            .id();
        let gone = world.spawn_empty().id();
        world.despawn(gone);
        let limbs = Limbs(vec![full, half, gone]);
        let modes = TankerModes {
            molten: true,
            ultra_sense: false,
        };

        let mut state: SystemState<Query<&Limb>> = SystemState::new(&mut world);
        let limb_query = state.get(&world);
        let report = StatusReport::collect(&modes, &limbs, &limb_query);

        assert!((report.average_health - 0.75).abs() < 1e-6);
        let text = report.to_string();
        assert!(text.contains("Health: 75%"));
        assert!(text.contains("Molten Mode: ACTIVE"));
        assert!(text.contains("Ultra Sense Mode: INACTIVE"));
    }
}
