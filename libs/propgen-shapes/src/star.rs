//! # Star
//!
//! Flat star shape: an alternating-radius outline, optionally filled,
//! optionally given a thickness (a star prism with capped ends).

use glam::DVec3;
use serde::{Deserialize, Serialize};

use config::constants::EPSILON;
use propgen_mesh::primitives::create_star_polygon;
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Star parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarParams {
    /// How far the points stick out (min 0.0001)
    pub outer_radius: f64,
    /// How far the inner corners stick out (min 0.0001)
    pub inner_radius: f64,
    /// Number of points (min 2)
    pub points: u32,
    /// Fill the outline into a disc
    pub fill: bool,
    /// Prism thickness along Z; 0 keeps the star flat
    pub thickness: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            outer_radius: 1.0,
            inner_radius: 0.375,
            points: 5,
            fill: false,
            thickness: 0.0,
            placement: Placement::default(),
        }
    }
}

impl StarParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.outer_radius < 0.0001 || self.inner_radius < 0.0001 {
            return Err(MeshError::invalid_parameter(format!(
                "star radii must be at least 0.0001, got {} / {}",
                self.outer_radius, self.inner_radius
            )));
        }
        if self.inner_radius > self.outer_radius {
            return Err(MeshError::invalid_parameter(format!(
                "inner radius {} exceeds outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if self.points < 2 {
            return Err(MeshError::invalid_parameter(format!(
                "star needs at least 2 points, got {}",
                self.points
            )));
        }
        if self.thickness < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "star thickness must be non-negative, got {}",
                self.thickness
            )));
        }
        Ok(())
    }
}

/// Star prism: two alternating-radius rings bridged by side quads, with
/// fan caps from centre vertices. Fans from the centre stay inside a
/// star polygon, so the caps triangulate cleanly for CSG.
pub(crate) fn star_prism(
    points: u32,
    outer_radius: f64,
    inner_radius: f64,
    thickness: f64,
) -> Result<MeshBuffer, MeshError> {
    let count = points * 2;
    let half = thickness / 2.0;

    let mut mesh = MeshBuffer::new();
    let mut ring = |z: f64, mesh: &mut MeshBuffer| -> Vec<u32> {
        (0..count)
            .map(|j| {
                let radius = if j % 2 == 0 { outer_radius } else { inner_radius };
                let theta = std::f64::consts::TAU * f64::from(j) / f64::from(count);
                mesh.add_vertex(DVec3::new(
                    radius * theta.cos(),
                    radius * theta.sin(),
                    z,
                ))
            })
            .collect()
    };
    let bottom = ring(-half, &mut mesh);
    let top = ring(half, &mut mesh);

    for j in 0..count as usize {
        let k = (j + 1) % count as usize;
        mesh.add_face(&[bottom[j], bottom[k], top[k], top[j]])?;
    }

    let bottom_centre = mesh.add_vertex(DVec3::new(0.0, 0.0, -half));
    let top_centre = mesh.add_vertex(DVec3::new(0.0, 0.0, half));
    for j in 0..count as usize {
        let k = (j + 1) % count as usize;
        mesh.add_face(&[bottom[k], bottom[j], bottom_centre])?;
        mesh.add_face(&[top[j], top[k], top_centre])?;
    }

    Ok(mesh)
}

/// Builds a star.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a radius or the point
/// count is below its minimum, or the inner radius exceeds the outer.
pub fn build_star(params: &StarParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = if params.thickness > EPSILON {
        star_prism(
            params.points,
            params.outer_radius,
            params.inner_radius,
            params.thickness,
        )?
    } else {
        create_star_polygon(
            params.points,
            params.outer_radius,
            params.inner_radius,
            params.fill,
        )?
    };

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_star_outline_counts() {
        let star = build_star(&StarParams::default()).unwrap();
        assert_eq!(star.vertex_count(), 10);
        assert_eq!(star.face_count(), 0);
        assert_eq!(star.edges().len(), 0);
    }

    #[test]
    fn test_star_alternating_radii() {
        let star = build_star(&StarParams::default()).unwrap();
        for j in 0..10u32 {
            let expected = if j % 2 == 0 { 1.0 } else { 0.375 };
            assert_relative_eq!(star.vertex(j).length(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_star_filled_is_closed_disc() {
        let params = StarParams {
            fill: true,
            ..StarParams::default()
        };
        let star = build_star(&params).unwrap();
        assert!(star.boundary_edges().is_empty());
        // V - E + F == 2 for the capped disc
        let euler = star.vertex_count() as i64 - star.edges().len() as i64
            + star.face_count() as i64;
        assert_eq!(euler, 2);
    }

    #[test]
    fn test_star_prism_counts() {
        let params = StarParams {
            thickness: 0.2,
            ..StarParams::default()
        };
        let star = build_star(&params).unwrap();
        assert_eq!(star.vertex_count(), 22);
        assert_eq!(star.face_count(), 10 + 20);
        assert!(star.boundary_edges().is_empty());
        let (min, max) = star.bounding_box();
        assert_relative_eq!(max.z - min.z, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_star_rejects_inner_over_outer() {
        let params = StarParams {
            inner_radius: 2.0,
            ..StarParams::default()
        };
        assert!(build_star(&params).is_err());
    }
}
