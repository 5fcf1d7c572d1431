//! Heat damage and ignition.
//!
//! One call to [`apply_heat_tick`] is one pass of the molten aura over the
//! candidates returned by the spatial grid.  Every candidate is classified
//! once as a [`HeatTarget`]:
//!
//! - **Limb**: loses `damage_amount × m` health and catches fire with
//!   probability `ignite_chance × m`, whether or not it is already burning.
//! - **Body**: a ragdoll root; the limb rule is applied to each of its limbs
//!   using the limb's own distance.
//! - **Object**: no health.  Gains `object_heat_gain × m` degrees if it
//!   simulates temperature, and catches fire with probability
//!   `ignite_chance × m × object_ignite_factor` unless already burning.
//!
//! `m = 1 - d / radius` is the linear falloff; anything at `d >= radius` is
//! untouched.  Effects are written immediately, one target at a time.

use crate::body::{Limb, Limbs, Thermal};
use crate::config::HeatAuraConfig;
use crate::error::SimError;
use crate::locator::position_of;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

// ── Profile ────────────────────────────────────────────────────────────────────

/// Tunables of one aura session, captured from [`HeatAuraConfig`] at start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatProfile {
    pub radius: f32,
    pub damage_amount: f32,
    pub tick_interval: Duration,
    pub ignite_chance: f32,
    pub object_ignite_factor: f32,
    pub object_heat_gain: f32,
    pub max_self_temperature: f32,
}

impl Default for HeatProfile {
    fn default() -> Self {
        Self::from(&HeatAuraConfig::default())
    }
}

impl From<&HeatAuraConfig> for HeatProfile {
    fn from(config: &HeatAuraConfig) -> Self {
        Self {
            radius: config.radius,
            damage_amount: config.damage_amount,
            tick_interval: Duration::from_secs_f32(config.tick_interval),
            ignite_chance: config.ignite_chance,
            object_ignite_factor: config.object_ignite_factor,
            object_heat_gain: config.object_heat_gain,
            max_self_temperature: config.max_self_temperature,
        }
    }
}

/// Effect of one tick on one limb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbHeat {
    pub damage: f32,
    pub ignite_chance: f32,
}

/// Effect of one tick on one physical object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectHeat {
    pub temperature_gain: f32,
    pub ignite_chance: f32,
}

/// Linear falloff `1 - d / radius`, or `None` at or beyond the radius.
pub fn damage_multiplier(distance: f32, radius: f32) -> Option<f32> {
    if radius > 0.0 && distance < radius {
        Some(1.0 - distance / radius)
    } else {
        None
    }
}

impl HeatProfile {
    pub fn limb_heat(&self, distance: f32) -> Option<LimbHeat> {
        damage_multiplier(distance, self.radius).map(|m| LimbHeat {
            damage: self.damage_amount * m,
            ignite_chance: self.ignite_chance * m,
        })
    }

    pub fn object_heat(&self, distance: f32, simulate_temperature: bool) -> Option<ObjectHeat> {
        damage_multiplier(distance, self.radius).map(|m| ObjectHeat {
            temperature_gain: if simulate_temperature {
                self.object_heat_gain * m
            } else {
                0.0
            },
            ignite_chance: self.ignite_chance * m * self.object_ignite_factor,
        })
    }
}

// ── Randomness ─────────────────────────────────────────────────────────────────

/// Source of ignition rolls.  Reseed it for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct HeatAuraRng(pub StdRng);

impl Default for HeatAuraRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl HeatAuraRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn reseed(&mut self, seed: u64) {
        self.0 = StdRng::seed_from_u64(seed);
    }
}

// ── World access ───────────────────────────────────────────────────────────────

/// Everything the aura reads or mutates on limbs, bodies and props.
#[derive(SystemParam)]
pub struct HeatWorld<'w, 's> {
    pub transforms: Query<'w, 's, &'static Transform>,
    pub limbs: Query<'w, 's, &'static mut Limb>,
    pub thermals: Query<'w, 's, &'static mut Thermal>,
    pub bodies: Query<'w, 's, &'static Limbs>,
    pub parents: Query<'w, 's, &'static ChildOf>,
}

/// What a spatial-query candidate turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatTarget {
    Limb(Entity),
    Body(Entity),
    Object(Entity),
}

impl HeatWorld<'_, '_> {
    /// `None` for entities the aura has nothing to act on (or that vanished).
    pub fn classify(&self, entity: Entity) -> Option<HeatTarget> {
        if self.limbs.contains(entity) {
            Some(HeatTarget::Limb(entity))
        } else if self.bodies.contains(entity) {
            Some(HeatTarget::Body(entity))
        } else if self.thermals.contains(entity) {
            Some(HeatTarget::Object(entity))
        } else {
            None
        }
    }
}

/// Counts from one tick; only used for throttled diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub limbs_heated: usize,
    pub objects_heated: usize,
    pub ignitions: usize,
}

impl TickOutcome {
    pub fn targets_affected(&self) -> usize {
        self.limbs_heated + self.objects_heated
    }
}

// ── Tick ───────────────────────────────────────────────────────────────────────

/// Apply one aura pass centred on `center` to `candidates`, skipping every
/// candidate (and every body limb) for which `is_excluded` returns `true`.
///
/// A limb reachable both directly and through its body is heated once.
pub fn apply_heat_tick<R: Rng>(
    center: Vec3,
    profile: &HeatProfile,
    candidates: &[Entity],
    is_excluded: impl Fn(Entity, &HeatWorld) -> bool,
    world: &mut HeatWorld,
    rng: &mut R,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let mut visited: HashSet<Entity> = HashSet::new();

    for &candidate in candidates {
        if is_excluded(candidate, &*world) {
            continue;
        }
        match world.classify(candidate) {
            Some(HeatTarget::Limb(limb)) => {
                if visited.insert(limb) {
                    heat_limb(center, profile, limb, world, rng, &mut outcome);
                }
            }
            Some(HeatTarget::Body(body)) => {
                let Ok(body_pos) = position_of(body, &world.transforms) else {
                    debug!("Heat aura skipped body {body}: no position");
                    continue;
                };
                if center.distance(body_pos) > profile.radius {
                    continue;
                }
                let Ok(limbs) = world.bodies.get(body).map(|l| l.0.clone()) else {
                    continue;
                };
                for limb in limbs {
                    if is_excluded(limb, &*world) || !visited.insert(limb) {
                        continue;
                    }
                    heat_limb(center, profile, limb, world, rng, &mut outcome);
                }
            }
            Some(HeatTarget::Object(object)) => {
                if visited.insert(object) {
                    heat_object(center, profile, object, world, rng, &mut outcome);
                }
            }
            None => {}
        }
    }

    outcome
}

fn heat_limb<R: Rng>(
    center: Vec3,
    profile: &HeatProfile,
    entity: Entity,
    world: &mut HeatWorld,
    rng: &mut R,
    outcome: &mut TickOutcome,
) {
    let Ok(pos) = position_of(entity, &world.transforms) else {
        debug!("Heat aura skipped limb {entity}: no position");
        return;
    };
    let Some(heat) = profile.limb_heat(center.distance(pos)) else {
        return;
    };
    let Ok(mut limb) = world.limbs.get_mut(entity) else {
        debug!(
            "Heat aura skipped {entity}: {}",
            SimError::EntityNotFound { context: "limb" }
        );
        return;
    };
    limb.damage(heat.damage);
    outcome.limbs_heated += 1;

    if rng.gen::<f32>() < heat.ignite_chance {
        match world.thermals.get_mut(entity) {
            Ok(mut thermal) if thermal.can_ignite() => {
                thermal.ignite();
                outcome.ignitions += 1;
            }
            _ => debug!(
                "{}",
                SimError::IgnitionRejected {
                    context: "non-flammable limb"
                }
            ),
        }
    }
}

fn heat_object<R: Rng>(
    center: Vec3,
    profile: &HeatProfile,
    entity: Entity,
    world: &mut HeatWorld,
    rng: &mut R,
    outcome: &mut TickOutcome,
) {
    let Ok(pos) = position_of(entity, &world.transforms) else {
        debug!("Heat aura skipped object {entity}: no position");
        return;
    };
    let Ok(mut thermal) = world.thermals.get_mut(entity) else {
        return;
    };
    let Some(heat) = profile.object_heat(center.distance(pos), thermal.simulate_temperature) else {
        return;
    };
    thermal.temperature += heat.temperature_gain;
    outcome.objects_heated += 1;

    if !thermal.on_fire && rng.gen::<f32>() < heat.ignite_chance {
        if thermal.can_ignite() {
            thermal.ignite();
            outcome.ignitions += 1;
        } else {
            debug!(
                "{}",
                SimError::IgnitionRejected {
                    context: "fireproof object"
                }
            );
        }
    }
}
