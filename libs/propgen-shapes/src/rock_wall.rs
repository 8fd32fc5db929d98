//! # Rock Wall
//!
//! A thin climbing wall studded with rock holds. Each hold starts as an
//! icosphere and gets a random subset of its vertices pulled in toward
//! the centre, so no two holds look alike. All randomness flows from a
//! single seed; the same seed always produces the same wall.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use propgen_mesh::primitives::{create_box, create_icosphere};
use propgen_mesh::transform::scale_set;
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Rock wall parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RockWallParams {
    /// Wall thickness along X (min 0.001)
    pub length: f64,
    /// Wall extent along Y (min 0.001)
    pub width: f64,
    /// Wall extent along Z (min 0.001)
    pub height: f64,
    /// Number of rock holds on the wall (min 1)
    pub rock_count: u32,
    /// Smallest radius a deformed hold vertex can be pulled to (min 0.001)
    pub size_min: f64,
    /// Hold radius before deformation (min `size_min`)
    pub size_max: f64,
    /// Icosphere subdivision level per hold (min 1)
    pub subdivisions: u32,
    /// Seed for hold placement and deformation
    pub seed: u64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for RockWallParams {
    fn default() -> Self {
        Self {
            length: 0.025,
            width: 1.0,
            height: 3.0,
            rock_count: 16,
            size_min: 0.125,
            size_max: 0.25,
            subdivisions: 3,
            seed: 0,
            placement: Placement::default(),
        }
    }
}

impl RockWallParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.001 || self.width < 0.001 || self.height < 0.001 {
            return Err(MeshError::invalid_parameter(format!(
                "wall dimensions must be at least 0.001, got {} x {} x {}",
                self.length, self.width, self.height
            )));
        }
        if self.rock_count < 1 {
            return Err(MeshError::invalid_parameter("wall needs at least one rock"));
        }
        if self.size_min < 0.001 {
            return Err(MeshError::invalid_parameter(format!(
                "minimum rock size must be at least 0.001, got {}",
                self.size_min
            )));
        }
        if self.size_max < self.size_min {
            return Err(MeshError::invalid_parameter(format!(
                "maximum rock size {} is below the minimum {}",
                self.size_max, self.size_min
            )));
        }
        if self.subdivisions < 1 {
            return Err(MeshError::invalid_parameter(format!(
                "rocks need at least 1 subdivision, got {}",
                self.subdivisions
            )));
        }
        Ok(())
    }
}

/// One hold: an icosphere with a random distinct subset of its vertices
/// scaled down toward the centre.
fn make_rock(params: &RockWallParams, rng: &mut Pcg32) -> Result<MeshBuffer, MeshError> {
    let mut rock = create_icosphere(params.subdivisions, 2.0 * params.size_max)?;
    let vertex_count = rock.vertex_count() as u32;

    let want = rng
        .random_range(5..=11 * params.subdivisions)
        .min(vertex_count);
    let mut picked: Vec<u32> = Vec::with_capacity(want as usize);
    while (picked.len() as u32) < want {
        let idx = rng.random_range(0..vertex_count);
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }

    let factor = params.size_min / params.size_max;
    scale_set(&mut rock, &picked, DVec3::splat(factor), DVec3::ZERO);
    Ok(rock)
}

/// Builds a rock wall.
///
/// The wall slab is centred at the origin; holds sit on its `+X` face,
/// inset so they never hang past the wall's edge.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a dimension or size is
/// below its minimum or `size_max < size_min`.
pub fn build_rock_wall(params: &RockWallParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = create_box(
        DVec3::new(params.length, params.width, params.height),
        true,
    )?;

    let mut rng = Pcg32::seed_from_u64(params.seed);
    let span_y = (params.width / 2.0 - params.size_max).max(0.0);
    let span_z = (params.height / 2.0 - params.size_max).max(0.0);

    for _ in 0..params.rock_count {
        let mut rock = make_rock(params, &mut rng)?;
        rock.translate(DVec3::new(
            params.length / 2.0,
            rng.random_range(-span_y..=span_y),
            rng.random_range(-span_z..=span_z),
        ));
        mesh.append(&rock);
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_wall_counts() {
        let params = RockWallParams::default();
        let mesh = build_rock_wall(&params).unwrap();
        // Slab 8/6 plus 16 level-3 icospheres at 162/320 each
        assert_eq!(mesh.vertex_count(), 8 + 16 * 162);
        assert_eq!(mesh.face_count(), 6 + 16 * 320);
    }

    #[test]
    fn test_rock_wall_rocks_stay_on_face() {
        let params = RockWallParams::default();
        let mesh = build_rock_wall(&params).unwrap();
        let (min, max) = mesh.bounding_box();
        assert!(max.x > params.length / 2.0);
        assert!(max.x <= params.length / 2.0 + params.size_max + 1e-9);
        assert!(max.y <= params.width / 2.0 + 1e-9);
        assert!(min.z >= -params.height / 2.0 - 1e-9);
        assert!(max.z <= params.height / 2.0 + 1e-9);
    }

    #[test]
    fn test_rock_wall_same_seed_is_deterministic() {
        let params = RockWallParams::default();
        let a = build_rock_wall(&params).unwrap();
        let b = build_rock_wall(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rock_wall_seed_changes_layout() {
        let a = build_rock_wall(&RockWallParams::default()).unwrap();
        let b = build_rock_wall(&RockWallParams {
            seed: 7,
            ..RockWallParams::default()
        })
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rock_wall_rejects_inverted_size_range() {
        let params = RockWallParams {
            size_min: 0.5,
            size_max: 0.25,
            ..RockWallParams::default()
        };
        assert!(build_rock_wall(&params).is_err());
    }
}
