//! Ragdoll bodies, limbs and thermal state.
//!
//! Every damageable thing is a plain entity:
//!
//! | Kind | Components |
//! |------|------------|
//! | Body (tanker or bystander) | [`Limbs`], `Transform`, optionally [`Caster`] |
//! | Sub-part | [`Limb`], `Transform`, usually [`Thermal`] |
//! | Physical object (crate, barrel, ...) | [`Thermal`], `Transform` |
//!
//! `Transform.translation` is read as the world position; limbs are spawned
//! flat rather than as children of their body so that holds.

use crate::aura::HeatAura;
use crate::config::HeatAuraConfig;
use crate::constants::{AMBIENT_TEMPERATURE, HUMANOID_LIMB_OFFSETS};
use crate::modes::TankerModes;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker for the entity whose molten mode produces the heat aura.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(TankerModes, HeatAura, Limbs)]
pub struct Caster;

/// Ordered limb handles of a ragdoll body.
#[derive(Component, Debug, Default, Clone)]
pub struct Limbs(pub Vec<Entity>);

impl Limbs {
    pub fn as_slice(&self) -> &[Entity] {
        &self.0
    }
}

/// A damageable piece of a ragdoll body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    pub health: f32,
    pub initial_health: f32,
    /// Body this limb belongs to (back-reference only).
    pub owner: Entity,
}

impl Limb {
    pub fn new(owner: Entity, health: f32) -> Self {
        Self {
            health,
            initial_health: health,
            owner,
        }
    }

    /// Remove `amount` health.  Not clamped: death at zero is the body's concern.
    #[inline]
    pub fn damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    /// Current health as a fraction of `initial_health`.
    pub fn health_fraction(&self) -> f32 {
        if self.initial_health > 0.0 {
            self.health / self.initial_health
        } else {
            0.0
        }
    }
}

/// Temperature and fire state of a limb or a physical object.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Thermal {
    /// Degrees.
    pub temperature: f32,
    pub on_fire: bool,
    /// Whether external heat sources may change `temperature`.
    pub simulate_temperature: bool,
    /// Whether the material can catch fire at all.
    pub flammable: bool,
}

impl Default for Thermal {
    fn default() -> Self {
        Self {
            temperature: AMBIENT_TEMPERATURE,
            on_fire: false,
            simulate_temperature: true,
            flammable: true,
        }
    }
}

impl Thermal {
    /// Non-flammable material that still heats up (metal, stone).
    pub fn fireproof() -> Self {
        Self {
            flammable: false,
            ..Default::default()
        }
    }

    /// Flammable prop that ignores ambient heat.
    pub fn inert() -> Self {
        Self {
            simulate_temperature: false,
            ..Default::default()
        }
    }

    #[inline]
    pub fn can_ignite(&self) -> bool {
        self.flammable
    }

    /// Set the target on fire.  Idempotent; callers check [`Self::can_ignite`] first.
    #[inline]
    pub fn ignite(&mut self) {
        self.on_fire = true;
    }

    #[inline]
    pub fn extinguish(&mut self) {
        self.on_fire = false;
    }
}

// ── Spawning ───────────────────────────────────────────────────────────────────

/// Spawn a humanoid ragdoll at `origin` with one [`Limb`] per entry of
/// [`HUMANOID_LIMB_OFFSETS`], every limb starting at `limb_health`.
///
/// Returns the body entity; limb handles are in its [`Limbs`] component.
pub fn spawn_ragdoll(commands: &mut Commands, origin: Vec3, limb_health: f32) -> Entity {
    let body = commands.spawn(Transform::from_translation(origin)).id();
    let limbs = spawn_limbs(commands, body, origin, limb_health);
    commands.entity(body).insert(Limbs(limbs));
    body
}

/// Spawn the tanker: a [`Caster`] ragdoll whose limbs are
/// `tanker_health_multiplier` times as durable as an ordinary body's.
pub fn spawn_tanker(commands: &mut Commands, origin: Vec3, config: &HeatAuraConfig) -> Entity {
    let health = config.limb_base_health * config.tanker_health_multiplier;
    let body = spawn_ragdoll(commands, origin, health);
    commands.entity(body).insert((Caster, Name::new("Tanker")));
    debug!("Spawned tanker {body} at {origin} with {health:.0} HP limbs");
    body
}

/// Spawn a loose physical object (crate, barrel, plank).
pub fn spawn_prop(commands: &mut Commands, position: Vec3, thermal: Thermal) -> Entity {
    commands
        .spawn((thermal, Transform::from_translation(position)))
        .id()
}

fn spawn_limbs(commands: &mut Commands, owner: Entity, origin: Vec3, health: f32) -> Vec<Entity> {
    HUMANOID_LIMB_OFFSETS
        .iter()
        .map(|[x, y]| {
            commands
                .spawn((
                    Limb::new(owner, health),
                    Thermal::default(),
                    Transform::from_translation(origin + Vec3::new(*x, *y, 0.0)),
                ))
                .id()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limb_damage_is_not_clamped() {
        let mut limb = Limb::new(Entity::PLACEHOLDER, 1.0);
        limb.damage(1.5);
        assert!((limb.health + 0.5).abs() < 1e-6);
        assert!(limb.health_fraction() < 0.0);
    }

    #[test]
    fn fireproof_material_declines_ignition() {
        assert!(!Thermal::fireproof().can_ignite());
        assert!(Thermal::default().can_ignite());
        assert!(!Thermal::inert().simulate_temperature);
    }

    #[test]
    fn tanker_limbs_are_doubled_and_full() {
        let mut world = World::new();
        let config = HeatAuraConfig::default();
        let tanker = spawn_tanker(&mut world.commands(), Vec3::ZERO, &config);
        world.flush();

        let limbs = world.get::<Limbs>(tanker).unwrap().0.clone();
        assert_eq!(limbs.len(), HUMANOID_LIMB_OFFSETS.len());
        for limb in limbs {
            let limb = world.get::<Limb>(limb).unwrap();
            assert_eq!(limb.initial_health, config.limb_base_health * 2.0);
            assert_eq!(limb.health, limb.initial_health);
            assert_eq!(limb.owner, tanker);
        }
        assert!(world.get::<HeatAura>(tanker).is_some());
        assert!(world.get::<TankerModes>(tanker).is_some());
    }
}
