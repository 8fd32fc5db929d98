//! # Door
//!
//! Doors with their frame, plus a hidden cutout block sized to punch a
//! matching hole through a wall. Hinged doors carry knuckle blocks and
//! pin cylinders; sliding doors run in a recessed track frame; the
//! revolving style spins four panels around a centre pivot. Handedness
//! is a mirror of the whole assembly, windings fixed up in the same
//! step.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{difference, duplicate_faces};
use propgen_mesh::primitives::{create_box, create_cylinder};
use propgen_mesh::transform::{mirror_axis, rotate_set, Axis};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Door construction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorStyle {
    /// Swinging panel on three hinges, with an inner stop frame
    Hinged,
    /// Panel recessed into a track frame
    Sliding,
    /// Four panels around a centre pivot
    Revolving,
    /// No door at all, only the wall cutout block
    CutoutOnly,
}

/// Hinge side and swing direction, seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingDirection {
    LeftInward,
    LeftOutward,
    RightInward,
    RightOutward,
}

/// Optional glass window cut into the door panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorGlass {
    /// Pane thickness (min 0.001)
    pub thickness: f64,
    /// Pane width (min 0.001)
    pub width: f64,
    /// Pane height (min 0.001)
    pub height: f64,
    /// Left/right shift of the pane
    pub x_shift: f64,
    /// Up/down shift of the pane
    pub z_shift: f64,
}

impl Default for DoorGlass {
    fn default() -> Self {
        Self {
            thickness: 0.0125,
            width: 0.5,
            height: 1.0,
            x_shift: 0.0,
            z_shift: 0.0,
        }
    }
}

/// Door parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorParams {
    pub style: DoorStyle,
    pub swing: SwingDirection,
    /// Opening width along X (min 0.01)
    pub length: f64,
    /// Opening height (min 0.01)
    pub height: f64,
    /// Panel thickness along Y (min 0.01)
    pub door_width: f64,
    /// Frame depth along Y (min 0.125)
    pub frame_width: f64,
    /// Frame border thickness (min 0.01)
    pub frame_thickness: f64,
    /// Inner stop frame thickness, hinged only (min 0.001)
    pub frame_inner_thickness: f64,
    /// Inner stop frame width, hinged only (min 0.001)
    pub frame_inner_width: f64,
    /// Shifts panel and stop frame along Y
    pub door_shift: f64,
    /// Clearance between panel and frame (min 0.0)
    pub gap: f64,
    /// Clearance under a hinged panel (min 0.0)
    pub floor_gap: f64,
    /// Hinge knuckle diameter (min 0.0025)
    pub hinge_diameter: f64,
    /// Hinge knuckle height (min 0.001)
    pub hinge_height: f64,
    /// Hinge pin height (min 0.001)
    pub hinge_pin_height: f64,
    /// Knuckle reach into the panel (min 0.001)
    pub hinge_width: f64,
    /// Segments of the pin cylinders (min 4)
    pub hinge_segments: u32,
    /// Glass window, if any
    pub glass: Option<DoorGlass>,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for DoorParams {
    fn default() -> Self {
        Self {
            style: DoorStyle::Hinged,
            swing: SwingDirection::RightInward,
            length: 1.25,
            height: 2.25,
            door_width: 0.05,
            frame_width: 0.15,
            frame_thickness: 0.0325,
            frame_inner_thickness: 0.01,
            frame_inner_width: 0.025,
            door_shift: 0.0,
            gap: 0.00325,
            floor_gap: 0.0125,
            hinge_diameter: 0.0075,
            hinge_height: 0.0675,
            hinge_pin_height: 0.0725,
            hinge_width: 0.04,
            hinge_segments: 12,
            glass: None,
            placement: Placement::default(),
        }
    }
}

impl DoorParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.01 || self.height < 0.01 || self.door_width < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "door opening must be at least 0.01 in every dimension, got {} x {} x {}",
                self.length, self.height, self.door_width
            )));
        }
        if self.frame_width < 0.125 {
            return Err(MeshError::invalid_parameter(format!(
                "frame width must be at least 0.125, got {}",
                self.frame_width
            )));
        }
        if self.frame_thickness < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "frame thickness must be at least 0.01, got {}",
                self.frame_thickness
            )));
        }
        if self.frame_inner_thickness < 0.001 || self.frame_inner_width < 0.001 {
            return Err(MeshError::invalid_parameter(
                "inner frame thickness and width must be at least 0.001",
            ));
        }
        if self.gap < 0.0 || self.gap >= self.length / 2.0 {
            return Err(MeshError::invalid_parameter(format!(
                "gap must be non-negative and smaller than half the length, got {}",
                self.gap
            )));
        }
        if self.floor_gap < 0.0 || self.floor_gap + self.gap >= self.height {
            return Err(MeshError::invalid_parameter(format!(
                "floor gap must be non-negative and leave room for the panel, got {}",
                self.floor_gap
            )));
        }
        if self.style == DoorStyle::Hinged {
            if self.hinge_segments < 4 {
                return Err(MeshError::invalid_parameter(format!(
                    "hinge needs at least 4 segments, got {}",
                    self.hinge_segments
                )));
            }
            if self.hinge_diameter < 0.0025 {
                return Err(MeshError::invalid_parameter(format!(
                    "hinge diameter must be at least 0.0025, got {}",
                    self.hinge_diameter
                )));
            }
            if self.hinge_height < 0.001
                || self.hinge_pin_height < 0.001
                || self.hinge_width < 0.001
            {
                return Err(MeshError::invalid_parameter(
                    "hinge height, pin height, and width must be at least 0.001",
                ));
            }
        }
        if self.style == DoorStyle::Sliding
            && self.frame_width <= 2.0 * self.frame_thickness + self.gap
        {
            return Err(MeshError::invalid_parameter(format!(
                "sliding frame width {} leaves no room for the panel",
                self.frame_width
            )));
        }
        if let Some(glass) = &self.glass {
            if glass.thickness < 0.001 || glass.width < 0.001 || glass.height < 0.001 {
                return Err(MeshError::invalid_parameter(
                    "glass thickness, width, and height must be at least 0.001",
                ));
            }
        }
        Ok(())
    }
}

/// A finished door and the wall cutout block that makes room for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorBuild {
    /// Frame, panel, and fittings; empty for [`DoorStyle::CutoutOnly`]
    pub door: MeshBuffer,
    /// Closed block to boolean-subtract from the wall
    pub cutout: MeshBuffer,
}

/// Builds a door assembly plus its wall cutout.
///
/// The opening spans `z in [0, height]` with the frame border extending
/// to `height + frame_thickness`; the panel face looks along +Y.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum, and propagates glass boolean failures.
pub fn build_door(params: &DoorParams) -> Result<DoorBuild, MeshError> {
    params.validate()?;

    let mut door = match params.style {
        DoorStyle::Hinged => hinged_door(params)?,
        DoorStyle::Sliding => sliding_door(params)?,
        DoorStyle::Revolving => revolving_door(params)?,
        DoorStyle::CutoutOnly => MeshBuffer::new(),
    };

    match params.swing {
        SwingDirection::RightInward => {}
        SwingDirection::LeftInward => mirror_axis(&mut door, Axis::X),
        SwingDirection::RightOutward => mirror_axis(&mut door, Axis::Y),
        SwingDirection::LeftOutward => {
            mirror_axis(&mut door, Axis::X);
            mirror_axis(&mut door, Axis::Y);
        }
    }

    let mut cutout = cutout_block(params)?;
    params.placement.apply(&mut door);
    params.placement.apply(&mut cutout);
    Ok(DoorBuild { door, cutout })
}

/// Winding pattern shared by both 16-vertex frame shells.
const FRAME_FACES: [[u32; 4]; 12] = [
    [6, 2, 10, 14],
    [6, 14, 15, 7],
    [15, 11, 3, 7],
    [7, 3, 1, 5],
    [6, 4, 0, 2],
    [6, 7, 5, 4],
    [15, 13, 9, 11],
    [12, 13, 15, 14],
    [12, 14, 10, 8],
    [4, 12, 8, 0],
    [5, 13, 12, 4],
    [5, 1, 9, 13],
];

fn add_frame_shell(mesh: &mut MeshBuffer, verts: &[DVec3; 16]) -> Result<(), MeshError> {
    let base = mesh.vertex_count() as u32;
    for &v in verts {
        mesh.add_vertex(v);
    }
    for face in FRAME_FACES {
        let indices: Vec<u32> = face.iter().map(|&i| base + i).collect();
        mesh.add_face(&indices)?;
    }
    Ok(())
}

/// The outer border frame around the opening.
fn outer_frame_verts(params: &DoorParams) -> [DVec3; 16] {
    let xo = params.length / 2.0 + params.frame_thickness;
    let xi = params.length / 2.0;
    let y = params.frame_width / 2.0;
    let h = params.height;
    let zo = h + params.frame_thickness;
    [
        DVec3::new(-xo, y, 0.0),
        DVec3::new(xo, y, 0.0),
        DVec3::new(-xo, -y, 0.0),
        DVec3::new(xo, -y, 0.0),
        DVec3::new(-xo, y, zo),
        DVec3::new(xo, y, zo),
        DVec3::new(-xo, -y, zo),
        DVec3::new(xo, -y, zo),
        DVec3::new(-xi, y, 0.0),
        DVec3::new(xi, y, 0.0),
        DVec3::new(-xi, -y, 0.0),
        DVec3::new(xi, -y, 0.0),
        DVec3::new(-xi, y, h),
        DVec3::new(xi, y, h),
        DVec3::new(-xi, -y, h),
        DVec3::new(xi, -y, h),
    ]
}

fn box_at(size: DVec3, center: DVec3) -> Result<MeshBuffer, MeshError> {
    let mut block = create_box(size, true)?;
    block.translate(center);
    Ok(block)
}

/// Hidden block covering frame plus opening, for cutting the wall.
fn cutout_block(params: &DoorParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length + 2.0 * params.frame_thickness;
    // Tiny lift keeps the cutout bottom off the floor plane
    let z0 = 0.0001;
    let z1 = params.height + params.frame_thickness;
    box_at(
        DVec3::new(l, params.frame_width, z1 - z0),
        DVec3::new(0.0, 0.0, (z0 + z1) / 2.0),
    )
}

/// Panel box, with the glass window cut in when requested.
fn glazed_panel(
    params: &DoorParams,
    size: DVec3,
    center: DVec3,
) -> Result<MeshBuffer, MeshError> {
    let mut panel = box_at(size, center)?;
    if let Some(glass) = &params.glass {
        // A pane covering the whole panel degenerates to no cut at all
        if glass.width < params.length && glass.height < params.height {
            let pane_center = DVec3::new(
                glass.x_shift,
                center.y,
                params.height / 2.0 + glass.z_shift,
            );
            let hole = box_at(
                DVec3::new(glass.width, params.frame_width + 0.125, glass.height),
                DVec3::new(pane_center.x, 0.0, pane_center.z),
            )?;
            panel = difference(&panel, &hole)?;
            let pane = box_at(
                DVec3::new(glass.width, glass.thickness, glass.height),
                pane_center,
            )?;
            panel.append(&pane);
        }
    }
    Ok(panel)
}

fn hinged_door(params: &DoorParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let h = params.height;
    let fw = params.frame_width;
    let dw = params.door_width;
    let ds = params.door_shift;
    let gap = params.gap;
    let dg = gap / 2.0;
    let it = params.frame_inner_thickness;
    let iw = params.frame_inner_width;
    let hd = params.hinge_diameter;
    let hh = params.hinge_height;
    let hw = params.hinge_width;

    let mut mesh = MeshBuffer::new();
    add_frame_shell(&mut mesh, &outer_frame_verts(params))?;

    // Inner stop frame the closed panel rests against
    let y_hi = fw / 2.0 + ds - dw;
    let y_lo = y_hi - iw;
    let xo = l / 2.0;
    let xi = xo - it;
    let stop = [
        DVec3::new(-xo, y_hi, 0.0),
        DVec3::new(xo, y_hi, 0.0),
        DVec3::new(-xo, y_lo, 0.0),
        DVec3::new(xo, y_lo, 0.0),
        DVec3::new(-xo, y_hi, h),
        DVec3::new(xo, y_hi, h),
        DVec3::new(-xo, y_lo, h),
        DVec3::new(xo, y_lo, h),
        DVec3::new(-xi, y_hi, 0.0),
        DVec3::new(xi, y_hi, 0.0),
        DVec3::new(-xi, y_lo, 0.0),
        DVec3::new(xi, y_lo, 0.0),
        DVec3::new(-xi, y_hi, h - it),
        DVec3::new(xi, y_hi, h - it),
        DVec3::new(-xi, y_lo, h - it),
        DVec3::new(xi, y_lo, h - it),
    ];
    add_frame_shell(&mut mesh, &stop)?;

    let panel_size = DVec3::new(
        l - 2.0 * gap,
        dw,
        h - gap - params.floor_gap,
    );
    let panel_center = DVec3::new(
        0.0,
        fw / 2.0 + ds - dw / 2.0,
        params.floor_gap + panel_size.z / 2.0,
    );
    let panel = glazed_panel(params, panel_size, panel_center)?;
    mesh.append(&panel);

    // Three hinges at one-sixth, half, and five-sixths of the height,
    // each a knuckle pair flanking a pin cylinder on the frame edge
    let hinge_x = -l / 2.0 + dg;
    let hinge_y = fw / 2.0 + hd;
    let knuckle_size = DVec3::new(hd / 2.0 - 0.0005, hw + hd, hh);
    let knuckle_y = fw / 2.0 + (hd - hw) / 2.0;
    for zc in [h / 6.0, h / 2.0, 5.0 * h / 6.0] {
        let left = box_at(
            knuckle_size,
            DVec3::new(hinge_x - (hd / 2.0 + 0.0005) / 2.0, knuckle_y, zc),
        )?;
        mesh.append(&left);
        let right = box_at(
            knuckle_size,
            DVec3::new(hinge_x + (hd / 2.0 + 0.0005) / 2.0, knuckle_y, zc),
        )?;
        mesh.append(&right);

        let mut pin = create_cylinder(
            params.hinge_segments,
            hd,
            hd,
            params.hinge_pin_height,
            true,
        )?;
        pin.translate(DVec3::new(hinge_x, hinge_y, zc));
        mesh.append(&pin);
    }
    Ok(mesh)
}

fn sliding_door(params: &DoorParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let h = params.height;
    let fw = params.frame_width;
    let ft = params.frame_thickness;
    let dw = params.door_width;
    let dg = params.gap / 2.0;

    let mut mesh = MeshBuffer::new();
    let outer = outer_frame_verts(params);
    for &v in &outer {
        mesh.add_vertex(v);
    }
    // Track channel the panel slides inside
    let xt = l / 2.0 + ft / 2.0;
    let yt = fw / 2.0 - dw / 2.0;
    let zt = h + ft / 2.0;
    let track = [
        DVec3::new(-xt, yt, 0.0),
        DVec3::new(xt, yt, 0.0),
        DVec3::new(-xt, -yt, 0.0),
        DVec3::new(xt, -yt, 0.0),
        DVec3::new(-xt, yt, zt),
        DVec3::new(xt, yt, zt),
        DVec3::new(-xt, -yt, zt),
        DVec3::new(xt, -yt, zt),
        DVec3::new(-l / 2.0, yt, 0.0),
        DVec3::new(l / 2.0, yt, 0.0),
        DVec3::new(-l / 2.0, -yt, 0.0),
        DVec3::new(l / 2.0, -yt, 0.0),
        DVec3::new(-l / 2.0, yt, h),
        DVec3::new(l / 2.0, yt, h),
        DVec3::new(-l / 2.0, -yt, h),
        DVec3::new(l / 2.0, -yt, h),
    ];
    for &v in &track {
        mesh.add_vertex(v);
    }
    for face in [
        [6, 2, 10, 14],
        [6, 14, 15, 7],
        [15, 11, 3, 7],
        [7, 3, 1, 5],
        [6, 4, 0, 2],
        [6, 7, 5, 4],
        [4, 12, 8, 0],
        [5, 13, 12, 4],
        [5, 1, 9, 13],
        [12, 28, 24, 8],
        [28, 20, 16, 24],
        [20, 22, 18, 16],
        [22, 30, 26, 18],
        [30, 14, 10, 26],
        [29, 13, 9, 25],
        [21, 29, 25, 17],
        [23, 21, 17, 19],
        [31, 23, 19, 27],
        [15, 31, 27, 11],
        [30, 22, 23, 31],
        [20, 28, 29, 21],
        [21, 23, 22, 20],
        [12, 13, 29, 28],
        [31, 15, 14, 30],
    ] {
        mesh.add_face(&face)?;
    }

    let panel_size = DVec3::new(
        l + ft - params.gap,
        fw - params.gap - 2.0 * ft,
        h + ft / 2.0 - dg,
    );
    let panel_center = DVec3::new(0.0, 0.0, panel_size.z / 2.0);
    let panel = glazed_panel(params, panel_size, panel_center)?;
    mesh.append(&panel);
    Ok(mesh)
}

fn revolving_door(params: &DoorParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let h = params.height;
    let dw = params.door_width;
    let gap = params.gap;

    let mut mesh = MeshBuffer::new();
    add_frame_shell(&mut mesh, &outer_frame_verts(params))?;

    let mut pivot = create_cylinder(params.hinge_segments.max(3), 2.0 * dw, 2.0 * dw, h, true)?;
    pivot.translate(DVec3::new(0.0, 0.0, h / 2.0));
    mesh.append(&pivot);

    // One wing, spun three more times around the pivot
    let wing_len = l / 2.0 - gap;
    let wing_z = h - gap - params.floor_gap;
    let mut wings = box_at(
        DVec3::new(wing_len, dw, wing_z),
        DVec3::new(wing_len / 2.0, 0.0, params.floor_gap + wing_z / 2.0),
    )?;
    let wing_faces: Vec<usize> = (0..wings.face_count()).collect();
    for i in 1..4 {
        let copy = duplicate_faces(&mut wings, &wing_faces)?;
        rotate_set(
            &mut wings,
            &copy.vertices,
            DVec3::ZERO,
            DVec3::Z,
            FRAC_PI_2 * f64::from(i),
        );
    }
    mesh.append(&wings);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cutout_covers_frame() {
        let params = DoorParams::default();
        let build = build_door(&params).unwrap();
        let (min, max) = build.cutout.bounding_box();
        assert_relative_eq!(max.x, 1.25 / 2.0 + 0.0325, epsilon = 1e-9);
        assert_relative_eq!(min.x, -(1.25 / 2.0 + 0.0325), epsilon = 1e-9);
        assert_relative_eq!(max.z, 2.25 + 0.0325, epsilon = 1e-9);
        assert!(build.cutout.boundary_edges().is_empty());
    }

    #[test]
    fn test_hinged_door_has_fittings() {
        let build = build_door(&DoorParams::default()).unwrap();
        assert!(build.door.validate());
        // frame shells + panel + 6 knuckles + 3 pins
        let expected = 16 * 2 + 8 + 6 * 8 + 3 * 2 * 12;
        assert_eq!(build.door.vertex_count(), expected);
    }

    #[test]
    fn test_handedness_mirrors_geometry() {
        let right = build_door(&DoorParams::default()).unwrap();
        let left = build_door(&DoorParams {
            swing: SwingDirection::LeftInward,
            ..DoorParams::default()
        })
        .unwrap();
        assert_eq!(right.door.vertex_count(), left.door.vertex_count());
        assert_eq!(right.door.face_count(), left.door.face_count());
        let (r_min, r_max) = right.door.bounding_box();
        let (l_min, l_max) = left.door.bounding_box();
        assert_relative_eq!(r_min.x, -l_max.x, epsilon = 1e-9);
        assert_relative_eq!(r_max.x, -l_min.x, epsilon = 1e-9);
        assert_relative_eq!(r_min.y, l_min.y, epsilon = 1e-9);
    }

    #[test]
    fn test_sliding_door_builds() {
        let build = build_door(&DoorParams {
            style: DoorStyle::Sliding,
            ..DoorParams::default()
        })
        .unwrap();
        assert!(build.door.validate());
        let (_, max) = build.door.bounding_box();
        assert_relative_eq!(max.z, 2.25 + 0.0325, epsilon = 1e-9);
    }

    #[test]
    fn test_revolving_door_has_four_wings() {
        let build = build_door(&DoorParams {
            style: DoorStyle::Revolving,
            ..DoorParams::default()
        })
        .unwrap();
        // frame + pivot + 4 wing boxes
        let expected = 16 + 2 * 12 + 4 * 8;
        assert_eq!(build.door.vertex_count(), expected);
    }

    #[test]
    fn test_cutout_only_has_no_door() {
        let build = build_door(&DoorParams {
            style: DoorStyle::CutoutOnly,
            ..DoorParams::default()
        })
        .unwrap();
        assert!(build.door.is_empty());
        assert!(!build.cutout.is_empty());
    }

    #[test]
    fn test_glass_door_builds() {
        let solid = build_door(&DoorParams::default()).unwrap();
        let glazed = build_door(&DoorParams {
            glass: Some(DoorGlass::default()),
            ..DoorParams::default()
        })
        .unwrap();
        assert!(glazed.door.validate());
        assert!(glazed.door.face_count() > solid.door.face_count());
    }

    #[test]
    fn test_door_rejects_narrow_frame() {
        let params = DoorParams {
            frame_width: 0.05,
            ..DoorParams::default()
        };
        assert!(matches!(
            build_door(&params),
            Err(MeshError::InvalidParameter { .. })
        ));
    }
}
