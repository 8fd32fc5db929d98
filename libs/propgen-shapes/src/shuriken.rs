//! # Shuriken
//!
//! A throwing star: a star prism with a round bay carved out at every
//! inner corner and an optional hole through the hub. Each cutout is a
//! cylinder slightly taller than the plate so the boolean cuts clean
//! through both faces.

use std::f64::consts::TAU;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::difference;
use propgen_mesh::primitives::create_cylinder;
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;
use crate::star::star_prism;

/// Shuriken parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShurikenParams {
    /// How far the points stick out (min 0.0001)
    pub outer_radius: f64,
    /// How far the inner corners stick out (min 0.0001)
    pub inner_radius: f64,
    /// Plate thickness (min 0.0001)
    pub thickness: f64,
    /// Radius of the bay cut at each inner corner (min 0.0001)
    pub cutout_radius: f64,
    /// Radius of the hub hole; zero leaves the hub solid
    pub center_radius: f64,
    /// Segments around each cutout cylinder (min 4)
    pub cutout_segments: u32,
    /// Number of points (min 2)
    pub points: u32,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for ShurikenParams {
    fn default() -> Self {
        Self {
            outer_radius: 1.0,
            inner_radius: 0.375,
            thickness: 0.025,
            cutout_radius: 0.125,
            center_radius: 0.0875,
            cutout_segments: 32,
            points: 6,
            placement: Placement::default(),
        }
    }
}

impl ShurikenParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.outer_radius < 0.0001 || self.inner_radius < 0.0001 {
            return Err(MeshError::invalid_parameter(format!(
                "shuriken radii must be at least 0.0001, got {} / {}",
                self.outer_radius, self.inner_radius
            )));
        }
        if self.inner_radius > self.outer_radius {
            return Err(MeshError::invalid_parameter(format!(
                "inner radius {} exceeds outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if self.thickness < 0.0001 || self.cutout_radius < 0.0001 {
            return Err(MeshError::invalid_parameter(
                "thickness and cutout radius must be at least 0.0001",
            ));
        }
        if self.center_radius < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "center radius must not be negative, got {}",
                self.center_radius
            )));
        }
        if self.cutout_segments < 4 {
            return Err(MeshError::invalid_parameter(format!(
                "cutouts need at least 4 segments, got {}",
                self.cutout_segments
            )));
        }
        if self.points < 2 {
            return Err(MeshError::invalid_parameter(format!(
                "shuriken needs at least 2 points, got {}",
                self.points
            )));
        }
        Ok(())
    }
}

/// Capped cutout cylinder, taller than the plate, centred at `at`.
fn cutout_at(params: &ShurikenParams, radius: f64, at: DVec3) -> Result<MeshBuffer, MeshError> {
    let mut cutout = create_cylinder(
        params.cutout_segments,
        2.0 * radius,
        2.0 * radius,
        params.thickness + 0.125,
        true,
    )?;
    cutout.translate(at);
    Ok(cutout)
}

/// Builds a shuriken.
///
/// The plate lies in the XY plane, centred on the origin, with the
/// first point along `+X`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// minimum or the inner radius exceeds the outer.
pub fn build_shuriken(params: &ShurikenParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = star_prism(
        params.points,
        params.outer_radius,
        params.inner_radius,
        params.thickness,
    )?;

    if params.center_radius > 0.0 {
        let hub = cutout_at(params, params.center_radius, DVec3::ZERO)?;
        mesh = difference(&mesh, &hub)?;
    }

    // One bay per inner corner
    let count = params.points * 2;
    for j in (1..count).step_by(2) {
        let theta = TAU * f64::from(j) / f64::from(count);
        let at = DVec3::new(
            params.inner_radius * theta.cos(),
            params.inner_radius * theta.sin(),
            0.0,
        );
        let bay = cutout_at(params, params.cutout_radius, at)?;
        mesh = difference(&mesh, &bay)?;
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shuriken_bounds() {
        let params = ShurikenParams::default();
        let mesh = build_shuriken(&params).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(max.x, params.outer_radius, epsilon = 1e-9);
        assert_relative_eq!(max.z - min.z, params.thickness, epsilon = 1e-9);
    }

    #[test]
    fn test_shuriken_cutouts_add_geometry() {
        let params = ShurikenParams::default();
        let plate = star_prism(
            params.points,
            params.outer_radius,
            params.inner_radius,
            params.thickness,
        )
        .unwrap();
        let mesh = build_shuriken(&params).unwrap();
        assert!(mesh.validate());
        assert!(mesh.face_count() > plate.face_count());
    }

    #[test]
    fn test_shuriken_solid_hub() {
        let solid = build_shuriken(&ShurikenParams {
            center_radius: 0.0,
            ..ShurikenParams::default()
        })
        .unwrap();
        let pierced = build_shuriken(&ShurikenParams::default()).unwrap();
        assert_ne!(solid, pierced);
    }

    #[test]
    fn test_shuriken_determinism() {
        let params = ShurikenParams::default();
        let a = build_shuriken(&params).unwrap();
        let b = build_shuriken(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuriken_rejects_inverted_radii() {
        let params = ShurikenParams {
            inner_radius: 1.5,
            ..ShurikenParams::default()
        };
        assert!(build_shuriken(&params).is_err());
    }
}
