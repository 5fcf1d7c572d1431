//! Keeps the tanker from cooking itself while molten.
//!
//! The aura never targets its own caster, but other heat sources (a burning
//! bystander, a fireball, a lava pool) still can.  Every aura tick therefore
//! clamps the caster's limb temperatures and puts out any fire on them.

use crate::body::Thermal;
use bevy::prelude::*;

/// Counts from one regulation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegulationOutcome {
    pub cooled: usize,
    pub extinguished: usize,
}

/// Clamp every caster limb to `max_temperature` and extinguish it.
///
/// Limbs without thermal state, or that no longer exist, are skipped.
pub fn regulate_caster(
    caster_limbs: &[Entity],
    max_temperature: f32,
    thermals: &mut Query<&mut Thermal>,
) -> RegulationOutcome {
    let mut outcome = RegulationOutcome::default();

    for &limb in caster_limbs {
        let Ok(mut thermal) = thermals.get_mut(limb) else {
            continue;
        };
        if thermal.temperature > max_temperature {
            thermal.temperature = max_temperature;
            outcome.cooled += 1;
        }
        if thermal.on_fire {
            thermal.extinguish();
            outcome.extinguished += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn hot_burning_limbs_are_cooled_and_extinguished() {
        let mut world = World::new();
        let scorched = world
            .spawn(Thermal {
                temperature: 950.0,
                on_fire: true,
                ..Default::default()
            })
            .id();
        let warm = world
            .spawn(Thermal {
                temperature: 150.0,
                ..Default::default()
            })
            .id();
        let bare = world.spawn_empty().id();

        let mut state: SystemState<Query<&mut Thermal>> = SystemState::new(&mut world);
        let mut thermals = state.get_mut(&mut world);
        let outcome = regulate_caster(&[scorched, warm, bare], 200.0, &mut thermals);

        assert_eq!(
            outcome,
            RegulationOutcome {
                cooled: 1,
                extinguished: 1
            }
        );
        let scorched = world.get::<Thermal>(scorched).unwrap();
        assert_eq!(scorched.temperature, 200.0);
        assert!(!scorched.on_fire);
        assert_eq!(world.get::<Thermal>(warm).unwrap().temperature, 150.0);
    }
}
