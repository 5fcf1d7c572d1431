//! Spatial grid partitioning for heat aura neighbour queries.
//!
//! The grid stands in for the host engine's "overlap circle" physics query.
//! It buckets every heat-relevant entity (limbs, bodies, thermal props) into
//! square cells on the x/y plane and answers radius queries by scanning the
//! block of cells that covers the query circle's bounding square.
//!
//! ## Contract
//!
//! [`SpatialGrid::query_in_radius`] is conservative: every entity within
//! `radius` of `center` is returned, plus possibly some that are slightly
//! outside.  Callers do the exact distance check themselves.  The z axis is
//! ignored, which can only add false positives.
//!
//! ## Cell Size Choice
//!
//! Cell size (`grid_cell_size` in the config) should be on the order of the
//! aura radius.  With radius 3 and cell size 4 a query checks a 3×3 block;
//! a cell size of 0.5 would check 13×13 = 169 cells for the same query.

use crate::body::{Limb, Limbs, Thermal};
use crate::config::HeatAuraConfig;
use bevy::prelude::*;
use std::collections::HashMap;

/// Resource holding the spatial grid for this frame.
#[derive(Resource, Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    /// Map from cell coordinates to entity list
    cells: HashMap<(i32, i32), Vec<Entity>>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(crate::constants::GRID_CELL_SIZE)
    }
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Change the cell size.  Drops all contents; rebuild afterwards.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.cells.clear();
    }

    /// Compute grid cell coordinates for a world position
    fn world_to_cell(&self, pos: Vec3) -> (i32, i32) {
        let x = (pos.x / self.cell_size).floor() as i32;
        let y = (pos.y / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Insert an entity at a position. Call after clear() for bulk rebuild.
    pub fn insert(&mut self, entity: Entity, pos: Vec3) {
        let cell = self.world_to_cell(pos);
        self.cells.entry(cell).or_default().push(entity);
    }

    /// Empty every cell before a rebuild.
    ///
    /// Cell buckets stay in the map with their capacity, so a body that stays
    /// in the same cell frame after frame does not reallocate.
    pub fn clear(&mut self) {
        for v in self.cells.values_mut() {
            v.clear();
        }
    }

    /// Number of entities currently bucketed.
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entities in cells overlapping the circle of `radius` around `center`.
    pub fn query_in_radius(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        let cell = self.world_to_cell(center);
        let cells_to_check = self.radius_in_cells(radius);

        let mut candidates = Vec::new();

        for dx in -cells_to_check..=cells_to_check {
            for dy in -cells_to_check..=cells_to_check {
                let check_cell = (cell.0 + dx, cell.1 + dy);
                if let Some(entities) = self.cells.get(&check_cell) {
                    candidates.extend_from_slice(entities);
                }
            }
        }

        candidates
    }

    /// Compute how many cells in each direction we need to check for a given radius
    fn radius_in_cells(&self, radius: f32) -> i32 {
        ((radius.max(0.0) / self.cell_size).ceil() as i32).max(1)
    }
}

/// System to rebuild the spatial grid each frame.
/// Must run BEFORE the aura tick so candidates reflect this frame's positions.
pub fn rebuild_heat_grid_system(
    mut grid: ResMut<SpatialGrid>,
    config: Res<HeatAuraConfig>,
    query: Query<(Entity, &Transform), Or<(With<Limb>, With<Limbs>, With<Thermal>)>>,
) {
    if grid.cell_size() != config.grid_cell_size {
        grid.set_cell_size(config.grid_cell_size);
    }
    grid.clear();

    for (entity, transform) in query.iter() {
        grid.insert(entity, transform.translation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn query_has_no_false_negatives_across_cell_borders() {
        let e = entities(3);
        let mut grid = SpatialGrid::new(4.0);
        // Just across a cell boundary from the centre, and far away.
        grid.insert(e[0], Vec3::new(4.01, 0.0, 0.0));
        grid.insert(e[1], Vec3::new(1.0, -2.5, 0.0));
        grid.insert(e[2], Vec3::new(40.0, 40.0, 0.0));

        let found = grid.query_in_radius(Vec3::new(3.9, 0.1, 0.0), 3.0);
        assert!(found.contains(&e[0]));
        assert!(found.contains(&e[1]));
        assert!(!found.contains(&e[2]));
    }

    #[test]
    fn radius_larger_than_cell_widens_the_scan() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(1.0);
        grid.insert(e[0], Vec3::new(2.9, 0.0, 0.0));
        let found = grid.query_in_radius(Vec3::ZERO, 3.0);
        assert_eq!(found, vec![e[0]]);
    }

    #[test]
    fn z_offset_does_not_hide_entities() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(e[0], Vec3::new(0.5, 0.5, 10.0));
        assert_eq!(grid.query_in_radius(Vec3::ZERO, 1.0), vec![e[0]]);
    }

    #[test]
    fn clear_empties_the_grid() {
        let e = entities(1);
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(e[0], Vec3::ZERO);
        assert_eq!(grid.len(), 1);
        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.query_in_radius(Vec3::ZERO, 3.0).is_empty());
    }

    #[test]
    fn clear_keeps_cell_buckets_for_reuse() {
        let e = entities(2);
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(e[0], Vec3::ZERO);
        grid.insert(e[1], Vec3::new(1.0, 1.0, 0.0));
        grid.clear();

        let bucket = grid.cells.get(&(0, 0)).expect("bucket survives clear");
        assert!(bucket.is_empty());
        assert!(bucket.capacity() >= 2);

        grid.insert(e[1], Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(grid.query_in_radius(Vec3::ZERO, 1.0), vec![e[1]]);
        assert_eq!(grid.len(), 1);
    }
}
