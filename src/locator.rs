//! Where the aura is centred and what counts as the caster's own body.

use crate::body::Limb;
use crate::error::{SimError, SimResult};
use bevy::prelude::*;

/// World position of `entity`, or `EntityNotFound` if it has no transform
/// (despawned, or never positioned).
pub fn position_of(entity: Entity, transforms: &Query<&Transform>) -> SimResult<Vec3> {
    transforms
        .get(entity)
        .map(|t| t.translation)
        .map_err(|_| SimError::EntityNotFound {
            context: "transform",
        })
}

/// Centre of the caster's aura.
///
/// The mean position of every limb that still exists; the caster's own
/// position if none do; the origin if the caster itself is gone.
pub fn aura_center(caster: Entity, limbs: &[Entity], transforms: &Query<&Transform>) -> Vec3 {
    let (sum, count) = limbs
        .iter()
        .filter_map(|&limb| position_of(limb, transforms).ok())
        .fold((Vec3::ZERO, 0u32), |(sum, n), pos| (sum + pos, n + 1));

    if count > 0 {
        return sum / count as f32;
    }
    position_of(caster, transforms).unwrap_or(Vec3::ZERO)
}

/// `true` if `entity` is the caster, one of its limbs, a limb claiming the
/// caster as owner, or anything whose parent chain leads back to the caster
/// or one of its limbs.
pub fn is_owned_by_caster(
    entity: Entity,
    caster: Entity,
    caster_limbs: &[Entity],
    limbs: &Query<&mut Limb>,
    parents: &Query<&ChildOf>,
) -> bool {
    if entity == caster || caster_limbs.contains(&entity) {
        return true;
    }
    if limbs.get(entity).is_ok_and(|limb| limb.owner == caster) {
        return true;
    }

    let mut current = entity;
    while let Ok(child_of) = parents.get(current) {
        current = child_of.parent();
        if current == caster || caster_limbs.contains(&current) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    type LocatorParams<'w, 's> = (
        Query<'w, 's, &'static Transform>,
        Query<'w, 's, &'static mut Limb>,
        Query<'w, 's, &'static ChildOf>,
    );

    #[test]
    fn center_is_mean_of_live_limbs() {
        let mut world = World::new();
        let caster = world.spawn(Transform::from_xyz(50.0, 0.0, 0.0)).id();
        let a = world.spawn(Transform::from_xyz(1.0, 0.0, 0.0)).id();
        let b = world.spawn(Transform::from_xyz(3.0, 2.0, 0.0)).id();
        let gone = world.spawn(Transform::from_xyz(100.0, 100.0, 0.0)).id();
        world.despawn(gone);

        let mut state: SystemState<LocatorParams> = SystemState::new(&mut world);
        let (transforms, _, _) = state.get_mut(&mut world);
        let center = aura_center(caster, &[a, gone, b], &transforms);
        assert!((center - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn center_falls_back_to_caster_then_origin() {
        let mut world = World::new();
        let caster = world.spawn(Transform::from_xyz(5.0, 6.0, 0.0)).id();
        let missing = world.spawn_empty().id();
        world.despawn(missing);

        let mut state: SystemState<LocatorParams> = SystemState::new(&mut world);
        let (transforms, _, _) = state.get_mut(&mut world);
        assert_eq!(aura_center(caster, &[], &transforms), Vec3::new(5.0, 6.0, 0.0));
        assert_eq!(aura_center(missing, &[missing], &transforms), Vec3::ZERO);
    }

    #[test]
    fn ownership_covers_limbs_owner_and_descendants() {
        let mut world = World::new();
        let caster = world.spawn(Transform::default()).id();
        let listed = world.spawn(Transform::default()).id();
        let orphan_limb = world.spawn(Limb::new(caster, 10.0)).id();
        let held_item = world.spawn(ChildOf(caster)).id();
        let nested = world.spawn(ChildOf(held_item)).id();
        let glove = world.spawn(ChildOf(listed)).id();
        let stranger = world.spawn(Transform::default()).id();
        let stranger_limb = world.spawn(Limb::new(stranger, 10.0)).id();

        let mut state: SystemState<LocatorParams> = SystemState::new(&mut world);
        let (_, limbs, parents) = state.get_mut(&mut world);
        let own = [listed];
        for entity in [caster, listed, orphan_limb, held_item, nested, glove] {
            assert!(is_owned_by_caster(entity, caster, &own, &limbs, &parents));
        }
        for entity in [stranger, stranger_limb] {
            assert!(!is_owned_by_caster(entity, caster, &own, &limbs, &parents));
        }
    }
}
