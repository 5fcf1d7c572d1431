//! Heat aura lifecycle and the periodic tick.
//!
//! [`HeatAura`] is a small state machine living on the caster:
//!
//! ```text
//! Inactive --start--> Active --stop / molten off / despawn--> Inactive
//!    ^                   |
//!    +------restart------+   (start while active stops the old session first)
//! ```
//!
//! An active session owns its [`RepeatingTask`], so there is never more than
//! one schedule per caster and nothing can fire after the component (or the
//! whole caster) is gone.
//!
//! Each firing of [`heat_aura_tick_system`] runs, in order: centre lookup,
//! grid query, [`apply_heat_tick`] on the candidates, then
//! [`regulate_caster`] on the caster's own limbs.

use crate::body::Limbs;
use crate::config::HeatAuraConfig;
use crate::heat::{apply_heat_tick, HeatAuraRng, HeatProfile, HeatWorld, TickOutcome};
use crate::locator::{aura_center, is_owned_by_caster};
use crate::modes::TankerModes;
use crate::regulation::{regulate_caster, RegulationOutcome};
use crate::scheduler::RepeatingTask;
use crate::spatial_partition::SpatialGrid;
use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub enum AuraState {
    #[default]
    Inactive,
    Active {
        profile: HeatProfile,
        task: RepeatingTask,
    },
}

/// Heat aura state of one caster.
#[derive(Component, Debug, Clone, Default)]
pub struct HeatAura {
    state: AuraState,
    /// Ticks run by the current (or most recent) session.
    cycles: u64,
    total_cycles: u64,
    sessions_started: u32,
}

impl HeatAura {
    /// Begin a new session.  Any running session is stopped first and the
    /// cycle counter restarts from zero.
    pub fn start(&mut self, profile: HeatProfile) {
        self.stop();
        self.cycles = 0;
        self.sessions_started += 1;
        self.state = AuraState::Active {
            profile,
            task: RepeatingTask::new(profile.tick_interval),
        };
    }

    /// End the current session.  Returns `false` if there was none.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            AuraState::Active { mut task, .. } => {
                task.cancel();
                true
            }
            AuraState::Inactive => false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, AuraState::Active { .. })
    }

    pub fn profile(&self) -> Option<&HeatProfile> {
        match &self.state {
            AuraState::Active { profile, .. } => Some(profile),
            AuraState::Inactive => None,
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Ticks run across every session of this caster.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Advance the session's schedule; zero when inactive.
    fn due_firings(&mut self, delta: Duration) -> u32 {
        match &mut self.state {
            AuraState::Active { task, .. } => task.advance(delta),
            AuraState::Inactive => 0,
        }
    }

    /// Count one tick and hand back its cycle number and profile.
    fn begin_cycle(&mut self) -> Option<(u64, HeatProfile)> {
        let profile = *self.profile()?;
        self.cycles += 1;
        self.total_cycles += 1;
        Some((self.cycles, profile))
    }
}

fn cycle_report(outcome: &TickOutcome, regulation: &RegulationOutcome) -> String {
    format!(
        "Heat aura affecting {} targets ({} ignited); cooled {} own limbs, put out {}",
        outcome.targets_affected(),
        outcome.ignitions,
        regulation.cooled,
        regulation.extinguished
    )
}

/// Drive every active aura by this frame's delta.
pub fn heat_aura_tick_system(
    time: Res<Time>,
    grid: Res<SpatialGrid>,
    config: Res<HeatAuraConfig>,
    mut rng: ResMut<HeatAuraRng>,
    mut casters: Query<(Entity, &mut HeatAura, &TankerModes, &Limbs)>,
    mut world: HeatWorld,
) {
    for (caster, mut aura, modes, limbs) in casters.iter_mut() {
        let firings = aura.due_firings(time.delta());

        for _ in 0..firings {
            if !modes.molten {
                aura.stop();
                debug!("Heat aura on {caster} ended: molten mode is off");
                break;
            }
            let Some((cycle, profile)) = aura.begin_cycle() else {
                break;
            };

            let caster_limbs = limbs.as_slice();
            let center = aura_center(caster, caster_limbs, &world.transforms);
            let candidates = grid.query_in_radius(center, profile.radius);
            let outcome = apply_heat_tick(
                center,
                &profile,
                &candidates,
                |entity, w| is_owned_by_caster(entity, caster, caster_limbs, &w.limbs, &w.parents),
                &mut world,
                &mut rng.0,
            );
            let regulation =
                regulate_caster(caster_limbs, profile.max_self_temperature, &mut world.thermals);

            if outcome.targets_affected() > 0
                && config.report_every_cycles > 0
                && cycle % config.report_every_cycles == 0
            {
                info!("{}", cycle_report(&outcome, &regulation));
            }
        }
    }
}
