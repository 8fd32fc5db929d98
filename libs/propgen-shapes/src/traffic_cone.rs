//! # Traffic Cone
//!
//! A square base slab with a hollow truncated cone on top. The cone is
//! an open frustum solidified into a shell; the base gets a matching
//! hole punched through it so the cone reads as hollow from above.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{difference, solidify};
use propgen_mesh::primitives::{create_box, create_cylinder};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Traffic cone parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficConeParams {
    /// Radius at the cone opening (min 0.01)
    pub upper_radius: f64,
    /// Radius where the cone meets the base (min 0.01)
    pub lower_radius: f64,
    /// Cone height above the base slab (min 0.01)
    pub cone_height: f64,
    /// Segments around the cone (min 3)
    pub cone_segments: u32,
    /// Base slab width (min 0.01)
    pub base_width: f64,
    /// Wall and base thickness (min 0.01)
    pub thickness: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for TrafficConeParams {
    fn default() -> Self {
        Self {
            upper_radius: 0.175,
            lower_radius: 0.75,
            cone_height: 2.0,
            cone_segments: 32,
            base_width: 2.0,
            thickness: 0.05,
            placement: Placement::default(),
        }
    }
}

impl TrafficConeParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.upper_radius < 0.01 || self.lower_radius < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "cone radii must be at least 0.01, got {} / {}",
                self.upper_radius, self.lower_radius
            )));
        }
        if self.cone_height < 0.01 || self.base_width < 0.01 || self.thickness < 0.01 {
            return Err(MeshError::invalid_parameter(
                "cone height, base width, and thickness must be at least 0.01",
            ));
        }
        if self.cone_segments < 3 {
            return Err(MeshError::invalid_parameter(format!(
                "cone needs at least 3 segments, got {}",
                self.cone_segments
            )));
        }
        if self.lower_radius <= self.thickness {
            return Err(MeshError::invalid_parameter(format!(
                "lower radius {} must exceed the wall thickness {}",
                self.lower_radius, self.thickness
            )));
        }
        Ok(())
    }
}

/// Builds a traffic cone.
///
/// The base bottom sits on `z == 0`; the cone opening ends at
/// `z == thickness + cone_height`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// minimum or the wall thickness swallows the lower radius.
pub fn build_traffic_cone(params: &TrafficConeParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;
    let thick = params.thickness;

    // Base slab, resting on the ground plane
    let mut base = create_box(
        DVec3::new(params.base_width, params.base_width, thick),
        true,
    )?;
    base.translate(DVec3::new(0.0, 0.0, thick / 2.0));

    // Punch the cone's opening through the base; the cutout is a bit
    // taller than the slab so the boolean cuts cleanly through
    let mut cutout = create_cylinder(
        params.cone_segments,
        2.0 * (params.lower_radius - thick),
        2.0 * (params.lower_radius - thick),
        thick + 0.25,
        true,
    )?;
    cutout.translate(DVec3::new(0.0, 0.0, thick / 2.0));
    let mut mesh = difference(&base, &cutout)?;

    // Hollow cone shell on top of the base
    let mut cone = create_cylinder(
        params.cone_segments,
        2.0 * params.lower_radius,
        2.0 * params.upper_radius,
        params.cone_height,
        false,
    )?;
    cone.translate(DVec3::new(0.0, 0.0, params.cone_height / 2.0 + thick));
    let shell = solidify(&cone, thick)?;
    mesh.append(&shell);

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_traffic_cone_bounds() {
        let params = TrafficConeParams::default();
        let cone = build_traffic_cone(&params).unwrap();
        let (min, max) = cone.bounding_box();
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            max.z,
            params.thickness + params.cone_height,
            epsilon = 1e-9
        );
        assert_relative_eq!(max.x - min.x, params.base_width, epsilon = 1e-9);
    }

    #[test]
    fn test_traffic_cone_is_valid() {
        let cone = build_traffic_cone(&TrafficConeParams::default()).unwrap();
        assert!(cone.validate());
        assert!(cone.face_count() > 0);
    }

    #[test]
    fn test_traffic_cone_determinism() {
        let params = TrafficConeParams::default();
        let a = build_traffic_cone(&params).unwrap();
        let b = build_traffic_cone(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_traffic_cone_rejects_thick_walls() {
        let params = TrafficConeParams {
            lower_radius: 0.05,
            thickness: 0.05,
            ..TrafficConeParams::default()
        };
        assert!(matches!(
            build_traffic_cone(&params),
            Err(MeshError::InvalidParameter { .. })
        ));
    }
}
