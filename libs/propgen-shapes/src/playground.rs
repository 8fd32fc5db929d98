//! # Playground Structure
//!
//! An elevated platform under a pyramid-frustum roof, carried by four
//! cylindrical posts. The roof is a single-sided frustum thickened into
//! a shell, its underside flattened back to the post height so the
//! eaves finish in a clean horizontal edge.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{bevel, solidify, BevelParams, BevelSelection};
use propgen_mesh::primitives::{create_box, create_cylinder};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Playground structure parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundParams {
    /// Footprint length along X (min 0.01)
    pub length: f64,
    /// Footprint width along Y (min 0.01)
    pub width: f64,
    /// Rise from the eaves to the roof top (min 0.01)
    pub roof_height: f64,
    /// Roof shell thickness; zero keeps the roof single-sided
    pub roof_thickness: f64,
    /// Scale of the roof top relative to the footprint, along X
    pub roof_scale_x: f64,
    /// Scale of the roof top relative to the footprint, along Y
    pub roof_scale_y: f64,
    /// Roof bevel offset; zero skips the bevel
    pub roof_bevel_offset: f64,
    /// Roof bevel segments
    pub roof_bevel_segments: u32,
    /// Height of the platform centre above the ground (min 0.01)
    pub platform_height: f64,
    /// Platform slab thickness (min 0.01)
    pub platform_thickness: f64,
    /// Platform bevel offset; zero skips the bevel
    pub platform_bevel_offset: f64,
    /// Platform bevel segments
    pub platform_bevel_segments: u32,
    /// Segments around each support post (min 3)
    pub support_segments: u32,
    /// Support post radius (min 0.001)
    pub support_radius: f64,
    /// Support post height, which is also the eave height (min 0.01)
    pub support_height: f64,
    /// Moves the posts inward from the footprint corners
    pub support_shift: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for PlaygroundParams {
    fn default() -> Self {
        Self {
            length: 2.0,
            width: 2.0,
            roof_height: 0.5,
            roof_thickness: 0.125,
            roof_scale_x: 0.5,
            roof_scale_y: 0.5,
            roof_bevel_offset: 0.0125,
            roof_bevel_segments: 2,
            platform_height: 2.0,
            platform_thickness: 0.1,
            platform_bevel_offset: 0.0125,
            platform_bevel_segments: 2,
            support_segments: 16,
            support_radius: 0.0675,
            support_height: 4.0,
            support_shift: 0.0125,
            placement: Placement::default(),
        }
    }
}

impl PlaygroundParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.01 || self.width < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "footprint must be at least 0.01 on each side, got {} x {}",
                self.length, self.width
            )));
        }
        if self.roof_height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "roof height must be at least 0.01, got {}",
                self.roof_height
            )));
        }
        if self.roof_thickness < 0.0
            || self.roof_scale_x < 0.0
            || self.roof_scale_y < 0.0
            || self.roof_bevel_offset < 0.0
            || self.platform_bevel_offset < 0.0
        {
            return Err(MeshError::invalid_parameter(
                "roof thickness, roof scales, and bevel offsets must not be negative",
            ));
        }
        if self.platform_height < 0.01 || self.platform_thickness < 0.01 {
            return Err(MeshError::invalid_parameter(
                "platform height and thickness must be at least 0.01",
            ));
        }
        if self.support_segments < 3 {
            return Err(MeshError::invalid_parameter(format!(
                "support posts need at least 3 segments, got {}",
                self.support_segments
            )));
        }
        if self.support_radius < 0.001 || self.support_height < 0.01 {
            return Err(MeshError::invalid_parameter(
                "support radius must be at least 0.001 and height at least 0.01",
            ));
        }
        Ok(())
    }
}

/// Frustum roof shell resting at the eave height.
fn roof(params: &PlaygroundParams) -> Result<MeshBuffer, MeshError> {
    let hl = params.length / 2.0;
    let hw = params.width / 2.0;
    let peak = params.roof_height + params.support_height;
    let eave = params.support_height;
    let tx = hl * params.roof_scale_x;
    let ty = hw * params.roof_scale_y;

    let mut surface = MeshBuffer::with_capacity(8, 5);
    let verts = [
        DVec3::new(-tx, -ty, peak),
        DVec3::new(-tx, ty, peak),
        DVec3::new(tx, -ty, peak),
        DVec3::new(tx, ty, peak),
        DVec3::new(-hl, hw, eave),
        DVec3::new(-hl, -hw, eave),
        DVec3::new(hl, hw, eave),
        DVec3::new(hl, -hw, eave),
    ];
    for v in verts {
        surface.add_vertex(v);
    }
    for face in [[5, 0, 1, 4], [4, 1, 3, 6], [6, 3, 2, 7], [7, 2, 0, 5], [3, 1, 0, 2]] {
        surface.add_face(&face)?;
    }

    let mut roof = if params.roof_thickness > 0.0 {
        solidify(&surface, params.roof_thickness)?
    } else {
        surface
    };

    // The inner shell hangs below the eaves where the slanted walls
    // meet; pull those vertices back up so the underside is flat.
    for idx in 0..roof.vertex_count() as u32 {
        let v = roof.vertex(idx);
        if v.z < eave {
            roof.set_vertex(idx, DVec3::new(v.x, v.y, eave));
        }
    }

    if params.roof_bevel_offset > 0.0 && params.roof_bevel_segments > 0 {
        let edges = roof.edges();
        bevel(
            &mut roof,
            &BevelSelection::Edges(edges),
            &BevelParams {
                offset: params.roof_bevel_offset,
                segments: params.roof_bevel_segments,
                profile: 0.5,
                clamp_overlap: true,
            },
        )?;
    }
    Ok(roof)
}

/// Platform slab centred at the platform height.
fn platform(params: &PlaygroundParams) -> Result<MeshBuffer, MeshError> {
    let mut slab = create_box(
        DVec3::new(params.length, params.width, params.platform_thickness),
        true,
    )?;
    slab.translate(DVec3::new(0.0, 0.0, params.platform_height));

    if params.platform_bevel_offset > 0.0 && params.platform_bevel_segments > 0 {
        let edges = slab.edges();
        bevel(
            &mut slab,
            &BevelSelection::Edges(edges),
            &BevelParams {
                offset: params.platform_bevel_offset,
                segments: params.platform_bevel_segments,
                profile: 0.5,
                clamp_overlap: true,
            },
        )?;
    }
    Ok(slab)
}

/// Builds a playground structure.
///
/// The posts rise from `z == 0` to the eaves at `support_height`; the
/// roof peaks at `support_height + roof_height` and the platform slab
/// is centred at `platform_height`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum or a scale or offset is negative.
pub fn build_playground(params: &PlaygroundParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = roof(params)?;
    mesh.append(&platform(params)?);

    // Four open posts tucked in from the footprint corners
    let inset_x = params.length / 2.0 - params.support_radius - params.support_shift;
    let inset_y = params.width / 2.0 - params.support_radius - params.support_shift;
    let post = create_cylinder(
        params.support_segments,
        2.0 * params.support_radius,
        2.0 * params.support_radius,
        params.support_height,
        false,
    )?;
    for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        let mut copy = post.clone();
        copy.translate(DVec3::new(
            sx * inset_x,
            sy * inset_y,
            params.support_height / 2.0,
        ));
        mesh.append(&copy);
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}
