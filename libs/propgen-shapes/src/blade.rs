//! # Blade
//!
//! A sword or knife: a six-sided blade profile swept down +X one
//! segment at a time, tapered to a point, with a beveled grip behind it
//! and an optional hilt guard between the two. The grip keeps its front
//! face square so it seats flush against the hilt or blade.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{bevel, extrude_edge_loop, BevelParams, BevelSelection};
use propgen_mesh::primitives::create_box;
use propgen_mesh::transform::{point_merge, translate_set};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Grip behind the blade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GripParams {
    /// Grip length along X (min 0.01)
    pub length: f64,
    /// Grip width (min 0.01)
    pub width: f64,
    /// Grip height (min 0.01)
    pub height: f64,
    /// Bevel segments; zero skips the bevel
    pub bevel_segments: u32,
    /// Bevel offset; zero skips the bevel
    pub bevel_offset: f64,
    /// Bevel profile shape in `[0, 1]`
    pub bevel_profile: f64,
}

impl Default for GripParams {
    fn default() -> Self {
        Self {
            length: 0.2,
            width: 0.05,
            height: 0.025,
            bevel_segments: 3,
            bevel_offset: 0.00875,
            bevel_profile: 0.5,
        }
    }
}

/// Hilt guard between blade and grip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiltParams {
    /// Hilt length along X (min 0.01)
    pub length: f64,
    /// Hilt width (min 0.01)
    pub width: f64,
    /// Hilt height (min 0.01)
    pub height: f64,
    /// Bevel segments; zero skips the bevel
    pub bevel_segments: u32,
    /// Bevel offset; zero skips the bevel
    pub bevel_offset: f64,
    /// Bevel profile shape in `[0, 1]`
    pub bevel_profile: f64,
}

impl Default for HiltParams {
    fn default() -> Self {
        Self {
            length: 0.0125,
            width: 0.0875,
            height: 0.05,
            bevel_segments: 3,
            bevel_offset: 0.005,
            bevel_profile: 0.5,
        }
    }
}

/// Blade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeParams {
    /// Length of one blade segment, excluding the point (min 0.001)
    pub segment_length: f64,
    /// Width of the flat of the blade (min 0.001)
    pub width: f64,
    /// Extra reach of the left cutting edge past the flat
    pub shift_left: f64,
    /// Extra reach of the right cutting edge past the flat
    pub shift_right: f64,
    /// Blade thickness at the spine (min 0.01)
    pub height: f64,
    /// How far the tip extends past the last segment (min 0)
    pub point_length: f64,
    /// Number of blade segments (min 1)
    pub segments: u32,
    /// Grip behind the blade
    pub grip: GripParams,
    /// Hilt guard; `None` seats the grip directly against the blade
    pub hilt: Option<HiltParams>,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for BladeParams {
    fn default() -> Self {
        Self {
            segment_length: 0.2,
            width: 0.025,
            shift_left: 0.0125,
            shift_right: 0.0125,
            height: 0.0125,
            point_length: 0.2,
            segments: 5,
            grip: GripParams::default(),
            hilt: Some(HiltParams::default()),
            placement: Placement::default(),
        }
    }
}

impl BladeParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.segment_length < 0.001 || self.width < 0.001 {
            return Err(MeshError::invalid_parameter(format!(
                "segment length and width must be at least 0.001, got {} / {}",
                self.segment_length, self.width
            )));
        }
        if self.height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "blade height must be at least 0.01, got {}",
                self.height
            )));
        }
        if self.point_length < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "point length must not be negative, got {}",
                self.point_length
            )));
        }
        if self.segments < 1 {
            return Err(MeshError::invalid_parameter("blade needs at least 1 segment"));
        }
        validate_block(
            "grip",
            self.grip.length,
            self.grip.width,
            self.grip.height,
            self.grip.bevel_offset,
            self.grip.bevel_profile,
        )?;
        if let Some(hilt) = &self.hilt {
            validate_block(
                "hilt",
                hilt.length,
                hilt.width,
                hilt.height,
                hilt.bevel_offset,
                hilt.bevel_profile,
            )?;
        }
        Ok(())
    }
}

fn validate_block(
    name: &str,
    length: f64,
    width: f64,
    height: f64,
    offset: f64,
    profile: f64,
) -> Result<(), MeshError> {
    if length < 0.01 || width < 0.01 || height < 0.01 {
        return Err(MeshError::invalid_parameter(format!(
            "{} dimensions must be at least 0.01, got {} x {} x {}",
            name, length, width, height
        )));
    }
    if offset < 0.0 || !(0.0..=1.0).contains(&profile) {
        return Err(MeshError::invalid_parameter(format!(
            "{} bevel offset must not be negative and its profile must lie in [0, 1]",
            name
        )));
    }
    Ok(())
}

/// The tapered blade itself, from `x == 0` out to the tip.
fn blade_body(params: &BladeParams) -> Result<MeshBuffer, MeshError> {
    let l = params.segment_length;
    let flat = params.width / 2.0;
    let half = params.height / 2.0;
    let left = flat + params.shift_left;
    let right = flat + params.shift_right;

    // Hexagonal section: cutting edges at y extremes, spine above and
    // below the flat
    let mut mesh = MeshBuffer::with_capacity(12, 6);
    for x in [l, 0.0] {
        for (y, z) in [
            (left, 0.0),
            (flat, half),
            (-flat, half),
            (-right, 0.0),
            (-flat, -half),
            (flat, -half),
        ] {
            mesh.add_vertex(DVec3::new(x, y, z));
        }
    }
    for face in [
        [0, 6, 7, 1],
        [1, 7, 8, 2],
        [2, 8, 9, 3],
        [3, 9, 10, 4],
        [4, 10, 11, 5],
        [6, 0, 5, 11],
    ] {
        mesh.add_face(&face)?;
    }

    // Chain one extrusion per segment; the last ring collapses into the
    // tip instead of advancing
    let mut edges: Vec<(u32, u32)> = (0..6).map(|i| (i, (i + 1) % 6)).collect();
    for segment in 0..params.segments {
        let ring = extrude_edge_loop(&mut mesh, &edges)?;
        if segment + 1 < params.segments {
            translate_set(&mut mesh, &ring.vertices, DVec3::new(l, 0.0, 0.0));
            edges = ring.edges();
        } else {
            let tip = DVec3::new(
                params.point_length + l * f64::from(params.segments),
                0.0,
                0.0,
            );
            point_merge(&mut mesh, &ring.vertices, tip, false);
        }
    }
    Ok(mesh)
}

/// A beveled box for the grip or hilt. With `keep_front` the edges of
/// the `+X` face are left sharp.
fn beveled_block(
    size: DVec3,
    center: DVec3,
    offset: f64,
    segments: u32,
    profile: f64,
    keep_front: bool,
) -> Result<MeshBuffer, MeshError> {
    let mut block = create_box(size, true)?;
    block.translate(center);
    if offset <= 0.0 || segments == 0 {
        return Ok(block);
    }

    let front_x = center.x + size.x / 2.0;
    let edges: Vec<(u32, u32)> = block
        .edges()
        .into_iter()
        .filter(|&(a, b)| {
            !keep_front
                || block.vertex(a).x < front_x - 1e-9
                || block.vertex(b).x < front_x - 1e-9
        })
        .collect();
    bevel(
        &mut block,
        &BevelSelection::Edges(edges),
        &BevelParams {
            offset,
            segments,
            profile,
            clamp_overlap: true,
        },
    )?;
    Ok(block)
}

/// Builds a blade with its grip and optional hilt.
///
/// The blade runs from the origin out to
/// `point_length + segment_length * segments` along `+X`; grip and hilt
/// extend behind the origin.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// minimum or a bevel profile leaves `[0, 1]`.
pub fn build_blade(params: &BladeParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = blade_body(params)?;

    let hilt_length = params.hilt.as_ref().map_or(0.0, |hilt| hilt.length);
    let grip = &params.grip;
    mesh.append(&beveled_block(
        DVec3::new(grip.length, grip.width, grip.height),
        DVec3::new(-grip.length / 2.0 - hilt_length, 0.0, 0.0),
        grip.bevel_offset,
        grip.bevel_segments,
        grip.bevel_profile,
        true,
    )?);

    if let Some(hilt) = &params.hilt {
        mesh.append(&beveled_block(
            DVec3::new(hilt.length, hilt.width, hilt.height),
            DVec3::new(-hilt.length / 2.0, 0.0, 0.0),
            hilt.bevel_offset,
            hilt.bevel_segments,
            hilt.bevel_profile,
            false,
        )?);
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}
