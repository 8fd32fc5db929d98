//! # Balcony
//!
//! A doorway frame with a platform slab jutting out in front of it and
//! a post-and-rail railing around the slab's open edges. Like windows,
//! the whole unit can be arrayed into a facade grid, and a matching set
//! of cutout blocks is produced for opening the wall.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::primitives::create_box;
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;
use crate::windows::{frame_solid, grid_array};

/// Balcony array parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalconyParams {
    /// Doorway frame length along X (min 0.01)
    pub length: f64,
    /// Frame depth along Y (min 0.01)
    pub width: f64,
    /// Doorway height (min 0.01)
    pub height: f64,
    /// Frame border and railing member thickness (min 0.01)
    pub thickness: f64,
    /// How far the platform juts out along +Y (min 0.01)
    pub platform_depth: f64,
    /// Platform slab thickness (min 0.01)
    pub platform_thickness: f64,
    /// Railing height above the slab (min 0.01)
    pub railing_height: f64,
    /// Posts along the front edge of the slab (min 1)
    pub railing_posts: u32,
    /// Gap between neighbouring balconies along X (min 0.0001)
    pub x_shift: f64,
    /// Gap between neighbouring balconies along Z (min 0.0001)
    pub z_shift: f64,
    /// Balconies per row (min 1)
    pub count_x: u32,
    /// Balconies per column (min 1)
    pub count_z: u32,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for BalconyParams {
    fn default() -> Self {
        Self {
            length: 2.0,
            width: 0.325,
            height: 1.5,
            thickness: 0.05,
            platform_depth: 1.0,
            platform_thickness: 0.05,
            railing_height: 1.0,
            railing_posts: 5,
            x_shift: 4.0,
            z_shift: 3.0,
            count_x: 1,
            count_z: 1,
            placement: Placement::default(),
        }
    }
}

impl BalconyParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.01 || self.width < 0.01 || self.height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "balcony frame must be at least 0.01 in every dimension, got {} x {} x {}",
                self.length, self.width, self.height
            )));
        }
        if self.thickness < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "member thickness must be at least 0.01, got {}",
                self.thickness
            )));
        }
        if 2.0 * self.thickness >= self.length || 2.0 * self.thickness >= self.height {
            return Err(MeshError::invalid_parameter(format!(
                "member thickness {} leaves no doorway in a {} x {} frame",
                self.thickness, self.length, self.height
            )));
        }
        if self.platform_depth < 0.01 || self.platform_thickness < 0.01 {
            return Err(MeshError::invalid_parameter(
                "platform depth and thickness must be at least 0.01",
            ));
        }
        if self.railing_height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "railing height must be at least 0.01, got {}",
                self.railing_height
            )));
        }
        if self.railing_posts < 1 {
            return Err(MeshError::invalid_parameter(
                "railing needs at least one post",
            ));
        }
        if self.x_shift < 0.0001 || self.z_shift < 0.0001 {
            return Err(MeshError::invalid_parameter(
                "balcony gaps must be at least 0.0001",
            ));
        }
        if self.count_x < 1 || self.count_z < 1 {
            return Err(MeshError::invalid_parameter(
                "balcony grid needs at least one row and one column",
            ));
        }
        Ok(())
    }
}

/// A balcony grid and the wall cutout blocks behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct BalconyBuild {
    /// Frame, slab, and railing solids, one set per grid cell
    pub balconies: MeshBuffer,
    /// Closed blocks to boolean-subtract from the wall, one per cell
    pub cutout: MeshBuffer,
}

/// Builds a grid of balconies plus the doorway cutouts behind them.
///
/// The first doorway is centred on the origin with the slab extending
/// along +Y; copies step by `length + x_shift` along X and
/// `height + z_shift` along Z.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum or the border swallows the doorway.
pub fn build_balcony(params: &BalconyParams) -> Result<BalconyBuild, MeshError> {
    params.validate()?;

    let mut balconies = balcony_unit(params)?;
    let dx = params.length + params.x_shift;
    let dz = params.height + params.z_shift;
    grid_array(&mut balconies, params.count_x, params.count_z, dx, dz)?;

    let mut cutout = create_box(
        DVec3::new(params.length, params.width, params.height),
        true,
    )?;
    grid_array(&mut cutout, params.count_x, params.count_z, dx, dz)?;

    params.placement.apply(&mut balconies);
    params.placement.apply(&mut cutout);
    Ok(BalconyBuild { balconies, cutout })
}

fn box_at(size: DVec3, center: DVec3) -> Result<MeshBuffer, MeshError> {
    let mut block = create_box(size, true)?;
    block.translate(center);
    Ok(block)
}

/// One balcony: doorway frame, platform slab, and railing.
fn balcony_unit(params: &BalconyParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let h = params.height;
    let t = params.thickness;
    let depth = params.platform_depth;
    let st = params.platform_thickness;
    let rh = params.railing_height;

    let mut mesh = frame_solid(l, params.width, h, t)?;

    // Slab flush with the doorway bottom, jutting out of the wall
    let slab_y = params.width / 2.0 + depth / 2.0;
    let floor_z = -h / 2.0;
    let slab = box_at(
        DVec3::new(l, depth, st),
        DVec3::new(0.0, slab_y, floor_z - st / 2.0),
    )?;
    mesh.append(&slab);

    // Posts along the front edge, one more at each wall end of the sides
    let front_y = params.width / 2.0 + depth - t / 2.0;
    let post_size = DVec3::new(t, t, rh);
    let post_z = floor_z + rh / 2.0;
    let posts = params.railing_posts;
    for i in 0..posts {
        let x = if posts == 1 {
            0.0
        } else {
            -l / 2.0 + t / 2.0 + (l - t) * f64::from(i) / f64::from(posts - 1)
        };
        let post = box_at(post_size, DVec3::new(x, front_y, post_z))?;
        mesh.append(&post);
    }
    for side in [-1.0, 1.0] {
        let post = box_at(
            post_size,
            DVec3::new(side * (l / 2.0 - t / 2.0), params.width / 2.0 + t / 2.0, post_z),
        )?;
        mesh.append(&post);
    }

    // Top rails across the front and down both sides
    let rail_z = floor_z + rh - t / 2.0;
    let front_rail = box_at(DVec3::new(l, t, t), DVec3::new(0.0, front_y, rail_z))?;
    mesh.append(&front_rail);
    for side in [-1.0, 1.0] {
        let rail = box_at(
            DVec3::new(t, depth, t),
            DVec3::new(side * (l / 2.0 - t / 2.0), slab_y, rail_z),
        )?;
        mesh.append(&rail);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_balcony_unit_counts() {
        let params = BalconyParams::default();
        let build = build_balcony(&params).unwrap();
        // frame + slab + 5 front posts + 2 side posts + 3 rails
        assert_eq!(build.balconies.vertex_count(), 16 + 8 * (1 + 7 + 3));
        assert_eq!(build.cutout.vertex_count(), 8);
    }

    #[test]
    fn test_slab_sits_below_doorway() {
        let params = BalconyParams::default();
        let build = build_balcony(&params).unwrap();
        let (min, max) = build.balconies.bounding_box();
        assert_relative_eq!(min.z, -0.75 - 0.05, epsilon = 1e-9);
        assert_relative_eq!(max.y, 0.325 / 2.0 + 1.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_balcony_grid() {
        let params = BalconyParams {
            count_x: 2,
            count_z: 3,
            ..BalconyParams::default()
        };
        let build = build_balcony(&params).unwrap();
        let single = build_balcony(&BalconyParams::default()).unwrap();
        assert_eq!(
            build.balconies.vertex_count(),
            single.balconies.vertex_count() * 6
        );
        assert_eq!(build.cutout.vertex_count(), 8 * 6);
    }

    #[test]
    fn test_balcony_rejects_zero_posts() {
        let params = BalconyParams {
            railing_posts: 0,
            ..BalconyParams::default()
        };
        assert!(matches!(
            build_balcony(&params),
            Err(MeshError::InvalidParameter { .. })
        ));
    }
}
