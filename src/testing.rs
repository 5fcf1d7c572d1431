//! Headless scenarios for the `tanker` binary.
//!
//! Select one with `TANKER_SCENARIO=<name>`:
//!
//! | Name | What it exercises |
//! |------|-------------------|
//! | `bonfire` | Tanker goes molten next to a bystander and a mix of props |
//! | `self_immunity` | External heat keeps scorching the tanker; every aura tick must cool it back down |
//! | `toggle_storm` | Molten mode is toggled rapidly; there is never more than one session |

use crate::aura::HeatAura;
use crate::body::{spawn_prop, spawn_ragdoll, spawn_tanker, Limb, Limbs, Thermal};
use crate::config::HeatAuraConfig;
use crate::modes::{ModeAction, ModeRequest, StatusReport, TankerModes};
use bevy::prelude::*;

/// Scenario bookkeeping
#[derive(Resource)]
pub struct ScenarioConfig {
    pub name: String,
    pub frame_limit: u32,
    pub frame_count: u32,
    pub tanker: Option<Entity>,
    /// Frames on which an aura tick left a tanker limb hot or burning.
    pub immunity_violations: u32,
    last_seen_cycles: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            frame_limit: 300,
            frame_count: 0,
            tanker: None,
            immunity_violations: 0,
            last_seen_cycles: 0,
        }
    }
}

/// Tags entities spawned as bystanders so the summary can report on them.
#[derive(Component)]
pub struct Bystander;

/// Spawn scenario: tanker turns molten next to a bystander and assorted props.
pub fn spawn_bonfire(
    mut commands: Commands,
    config: Res<HeatAuraConfig>,
    mut scenario: ResMut<ScenarioConfig>,
    mut requests: MessageWriter<ModeRequest>,
) {
    scenario.name = "bonfire".to_string();
    scenario.frame_limit = 300;

    let tanker = spawn_tanker(&mut commands, Vec3::ZERO, &config);
    let bystander = spawn_ragdoll(&mut commands, Vec3::new(1.5, 0.0, 0.0), config.limb_base_health);
    commands.entity(bystander).insert(Bystander);

    for (pos, thermal) in [
        (Vec3::new(-1.0, 0.5, 0.0), Thermal::default()),
        (Vec3::new(-1.5, -0.5, 0.0), Thermal::fireproof()),
        (Vec3::new(0.5, -1.5, 0.0), Thermal::inert()),
        (Vec3::new(25.0, 0.0, 0.0), Thermal::default()),
    ] {
        let prop = spawn_prop(&mut commands, pos, thermal);
        commands.entity(prop).insert(Bystander);
    }

    requests.write(ModeRequest {
        caster: tanker,
        action: ModeAction::EnableMolten,
    });
    scenario.tanker = Some(tanker);
    info!("Spawned scenario: bonfire");
}

/// Spawn scenario: lone molten tanker; [`scorch_tanker_system`] supplies the heat.
pub fn spawn_self_immunity(
    mut commands: Commands,
    config: Res<HeatAuraConfig>,
    mut scenario: ResMut<ScenarioConfig>,
    mut requests: MessageWriter<ModeRequest>,
) {
    scenario.name = "self_immunity".to_string();
    scenario.frame_limit = 240;

    let tanker = spawn_tanker(&mut commands, Vec3::ZERO, &config);
    requests.write(ModeRequest {
        caster: tanker,
        action: ModeAction::EnableMolten,
    });
    scenario.tanker = Some(tanker);
    info!("Spawned scenario: self_immunity");
}

/// Spawn scenario: tanker whose molten mode is toggled every few frames.
pub fn spawn_toggle_storm(
    mut commands: Commands,
    config: Res<HeatAuraConfig>,
    mut scenario: ResMut<ScenarioConfig>,
) {
    scenario.name = "toggle_storm".to_string();
    scenario.frame_limit = 180;

    let tanker = spawn_tanker(&mut commands, Vec3::ZERO, &config);
    let bystander = spawn_ragdoll(&mut commands, Vec3::new(1.0, 0.0, 0.0), config.limb_base_health);
    commands.entity(bystander).insert(Bystander);
    scenario.tanker = Some(tanker);
    info!("Spawned scenario: toggle_storm");
}

/// `self_immunity`: set every tanker limb ablaze at 900° before the aura runs.
pub fn scorch_tanker_system(
    scenario: Res<ScenarioConfig>,
    tankers: Query<&Limbs>,
    mut thermals: Query<&mut Thermal>,
) {
    if scenario.name != "self_immunity" {
        return;
    }
    let Some(limbs) = scenario.tanker.and_then(|t| tankers.get(t).ok()) else {
        return;
    };
    for &limb in limbs.as_slice() {
        if let Ok(mut thermal) = thermals.get_mut(limb) {
            thermal.temperature = 900.0;
            thermal.ignite();
        }
    }
}

/// `toggle_storm`: request a molten toggle every 20 frames.
pub fn toggle_storm_system(
    scenario: Res<ScenarioConfig>,
    mut requests: MessageWriter<ModeRequest>,
) {
    if scenario.name != "toggle_storm" || scenario.frame_count % 20 != 0 {
        return;
    }
    if let Some(caster) = scenario.tanker {
        requests.write(ModeRequest {
            caster,
            action: ModeAction::ToggleMolten,
        });
    }
}

/// Count frames, check tanker immunity after every aura tick, and exit with a
/// summary once the frame limit is reached.
pub fn scenario_verification_system(
    mut scenario: ResMut<ScenarioConfig>,
    config: Res<HeatAuraConfig>,
    tankers: Query<(&TankerModes, &HeatAura, &Limbs)>,
    limbs: Query<&Limb>,
    thermals: Query<&Thermal>,
    bystanders: Query<(Entity, Option<&Limbs>, Option<&Thermal>), With<Bystander>>,
    mut exit: MessageWriter<AppExit>,
) {
    scenario.frame_count += 1;
    let Some((modes, aura, tanker_limbs)) = scenario.tanker.and_then(|t| tankers.get(t).ok())
    else {
        return;
    };

    if aura.total_cycles() != scenario.last_seen_cycles {
        scenario.last_seen_cycles = aura.total_cycles();
        let violated = tanker_limbs
            .as_slice()
            .iter()
            .filter_map(|&l| thermals.get(l).ok())
            .any(|t| t.on_fire || t.temperature > config.max_self_temperature);
        if violated {
            scenario.immunity_violations += 1;
            warn!("Tanker limb left hot after aura cycle {}", aura.total_cycles());
        }
    }

    if scenario.frame_count < scenario.frame_limit {
        return;
    }

    info!("Scenario '{}' finished after {} frames", scenario.name, scenario.frame_count);
    info!("{}", StatusReport::collect(modes, tanker_limbs, &limbs));
    info!(
        "Aura sessions: {}, cycles: {}, immunity violations: {}",
        aura.sessions_started(),
        aura.total_cycles(),
        scenario.immunity_violations
    );
    for (entity, body, thermal) in bystanders.iter() {
        if let Some(body) = body {
            let min_health = body
                .as_slice()
                .iter()
                .filter_map(|&l| limbs.get(l).ok())
                .map(|l| l.health)
                .fold(f32::INFINITY, f32::min);
            info!("Bystander {entity}: weakest limb at {min_health:.1} HP");
        } else if let Some(t) = thermal {
            info!(
                "Prop {entity}: {:.0}°, {}",
                t.temperature,
                if t.on_fire { "burning" } else { "not burning" }
            );
        }
    }
    exit.write(AppExit::Success);
}
