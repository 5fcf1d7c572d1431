use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::env;
use std::time::Duration;

use tanker::config::{self, HeatAuraConfig};
use tanker::simulation::{seed_heat_rng_system, HeatAuraPlugin, HeatAuraSet};
use tanker::testing::{
    scenario_verification_system, scorch_tanker_system, spawn_bonfire, spawn_self_immunity,
    spawn_toggle_storm, toggle_storm_system, ScenarioConfig,
};

fn main() {
    let scenario = env::var("TANKER_SCENARIO").unwrap_or_else(|_| "bonfire".to_string());

    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins(LogPlugin::default())
    // Insert HeatAuraConfig with compiled defaults; load_heat_aura_config will
    // overwrite it from assets/heat_aura.toml (if present) in the Startup schedule.
    .insert_resource(HeatAuraConfig::default())
    .insert_resource(ScenarioConfig::default())
    .add_plugins(HeatAuraPlugin)
    .add_systems(
        Startup,
        config::load_heat_aura_config.before(seed_heat_rng_system),
    )
    .add_systems(
        Update,
        (
            (scorch_tanker_system, toggle_storm_system).before(HeatAuraSet::Modes),
            scenario_verification_system.after(HeatAuraSet::Tick),
        ),
    );

    match scenario.as_str() {
        "self_immunity" => app.add_systems(
            Startup,
            spawn_self_immunity.after(config::load_heat_aura_config),
        ),
        "toggle_storm" => app.add_systems(
            Startup,
            spawn_toggle_storm.after(config::load_heat_aura_config),
        ),
        "bonfire" => app.add_systems(Startup, spawn_bonfire.after(config::load_heat_aura_config)),
        other => {
            warn!("Unknown scenario '{other}', running bonfire");
            app.add_systems(Startup, spawn_bonfire.after(config::load_heat_aura_config))
        }
    };

    println!("Running scenario: {}", scenario);
    app.run();
}
