//! # Windows
//!
//! A rectangular window frame arrayed into a grid, plus matching cutout
//! blocks for punching the openings through a wall. The frame is one
//! closed 16-vertex solid; the grid is the frame duplicated with a
//! fixed spacing along X and Z.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::duplicate_faces;
use propgen_mesh::primitives::create_box;
use propgen_mesh::transform::translate_set;
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Window array parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowsParams {
    /// Frame length along X (min 0.01)
    pub length: f64,
    /// Frame depth along Y (min 0.01)
    pub width: f64,
    /// Frame height (min 0.01)
    pub height: f64,
    /// Border thickness of the frame (min 0.01)
    pub thickness: f64,
    /// Gap between neighbouring windows along X (min 0.0001)
    pub x_shift: f64,
    /// Gap between neighbouring windows along Z (min 0.0001)
    pub z_shift: f64,
    /// Windows per row (min 1)
    pub count_x: u32,
    /// Windows per column (min 1)
    pub count_z: u32,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for WindowsParams {
    fn default() -> Self {
        Self {
            length: 2.0,
            width: 0.325,
            height: 1.5,
            thickness: 0.05,
            x_shift: 0.0001,
            z_shift: 0.0001,
            count_x: 1,
            count_z: 1,
            placement: Placement::default(),
        }
    }
}

impl WindowsParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.01 || self.width < 0.01 || self.height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "window frame must be at least 0.01 in every dimension, got {} x {} x {}",
                self.length, self.width, self.height
            )));
        }
        if self.thickness < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "frame thickness must be at least 0.01, got {}",
                self.thickness
            )));
        }
        if 2.0 * self.thickness >= self.length || 2.0 * self.thickness >= self.height {
            return Err(MeshError::invalid_parameter(format!(
                "frame thickness {} leaves no opening in a {} x {} frame",
                self.thickness, self.length, self.height
            )));
        }
        // A zero gap makes neighbouring cutouts share a face, which the
        // boolean stage downstream cannot split cleanly
        if self.x_shift < 0.0001 || self.z_shift < 0.0001 {
            return Err(MeshError::invalid_parameter(
                "window gaps must be at least 0.0001",
            ));
        }
        if self.count_x < 1 || self.count_z < 1 {
            return Err(MeshError::invalid_parameter(
                "window grid needs at least one row and one column",
            ));
        }
        Ok(())
    }
}

/// A window grid and the wall cutout blocks that make room for it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowsBuild {
    /// Frame solids, one per grid cell
    pub windows: MeshBuffer,
    /// Closed blocks to boolean-subtract from the wall, one per cell
    pub cutout: MeshBuffer,
}

/// Builds a grid of window frames plus their wall cutouts.
///
/// The first frame is centred on the origin; copies step by
/// `length + x_shift` along X and `height + z_shift` along Z.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum or the border swallows the opening.
pub fn build_windows(params: &WindowsParams) -> Result<WindowsBuild, MeshError> {
    params.validate()?;

    let dx = params.length + params.x_shift;
    let dz = params.height + params.z_shift;

    let mut windows = frame_solid(params.length, params.width, params.height, params.thickness)?;
    grid_array(&mut windows, params.count_x, params.count_z, dx, dz)?;

    let mut cutout = create_box(
        DVec3::new(params.length, params.width, params.height),
        true,
    )?;
    grid_array(&mut cutout, params.count_x, params.count_z, dx, dz)?;

    params.placement.apply(&mut windows);
    params.placement.apply(&mut cutout);
    Ok(WindowsBuild { windows, cutout })
}

/// One closed frame: an outer box ring with a rectangular opening.
/// Shared with the balcony builder, which uses the same profile around
/// its doorway.
pub(crate) fn frame_solid(
    length: f64,
    width: f64,
    height: f64,
    thickness: f64,
) -> Result<MeshBuffer, MeshError> {
    let xo = length / 2.0;
    let xi = xo - thickness;
    let y = width / 2.0;
    let zo = height / 2.0;
    let zi = zo - thickness;

    let mut mesh = MeshBuffer::with_capacity(16, 16);
    let ring = |mesh: &mut MeshBuffer, y: f64| {
        for (x, z) in [
            (-xo, zo),
            (-xi, zi),
            (xi, zi),
            (xo, zo),
            (xo, -zo),
            (xi, -zi),
            (-xi, -zi),
            (-xo, -zo),
        ] {
            mesh.add_vertex(DVec3::new(x, y, z));
        }
    };
    ring(&mut mesh, y);
    ring(&mut mesh, -y);

    for face in [
        [3, 2, 1, 0],
        [4, 5, 2, 3],
        [7, 6, 5, 4],
        [0, 1, 6, 7],
        [8, 9, 10, 11],
        [11, 10, 13, 12],
        [12, 13, 14, 15],
        [15, 14, 9, 8],
        [0, 7, 15, 8],
        [3, 0, 8, 11],
        [4, 3, 11, 12],
        [7, 4, 12, 15],
        [9, 14, 6, 1],
        [1, 2, 10, 9],
        [2, 5, 13, 10],
        [5, 6, 14, 13],
    ] {
        mesh.add_face(&face)?;
    }
    Ok(mesh)
}

/// Replicates the whole buffer into a `count_x` by `count_z` grid.
pub(crate) fn grid_array(
    mesh: &mut MeshBuffer,
    count_x: u32,
    count_z: u32,
    dx: f64,
    dz: f64,
) -> Result<(), MeshError> {
    let cell: Vec<usize> = (0..mesh.face_count()).collect();
    for i in 1..count_x {
        let copy = duplicate_faces(mesh, &cell)?;
        translate_set(mesh, &copy.vertices, DVec3::new(dx * f64::from(i), 0.0, 0.0));
    }
    let row: Vec<usize> = (0..mesh.face_count()).collect();
    for j in 1..count_z {
        let copy = duplicate_faces(mesh, &row)?;
        translate_set(mesh, &copy.vertices, DVec3::new(0.0, 0.0, dz * f64::from(j)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_frame_counts() {
        let build = build_windows(&WindowsParams::default()).unwrap();
        assert_eq!(build.windows.vertex_count(), 16);
        assert_eq!(build.windows.face_count(), 16);
        assert!(build.windows.boundary_edges().is_empty());
        assert!(build.cutout.boundary_edges().is_empty());
    }

    #[test]
    fn test_grid_replicates_frames() {
        let params = WindowsParams {
            count_x: 3,
            count_z: 2,
            ..WindowsParams::default()
        };
        let build = build_windows(&params).unwrap();
        assert_eq!(build.windows.vertex_count(), 16 * 6);
        assert_eq!(build.windows.face_count(), 16 * 6);
        assert_eq!(build.cutout.vertex_count(), 8 * 6);

        let (min, max) = build.windows.bounding_box();
        assert_relative_eq!(min.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, -1.0 + 2.0 * (2.0 + 0.0001) + 2.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, -0.75 + (1.5 + 0.0001) + 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_windows_determinism() {
        let params = WindowsParams {
            count_x: 2,
            count_z: 2,
            ..WindowsParams::default()
        };
        let a = build_windows(&params).unwrap();
        let b = build_windows(&params).unwrap();
        assert_eq!(a.windows, b.windows);
        assert_eq!(a.cutout, b.cutout);
    }

    #[test]
    fn test_windows_reject_thick_border() {
        let params = WindowsParams {
            thickness: 0.8,
            ..WindowsParams::default()
        };
        assert!(matches!(
            build_windows(&params),
            Err(MeshError::InvalidParameter { .. })
        ));
    }
}
