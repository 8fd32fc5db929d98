//! # Stairs
//!
//! Straight and switchback staircases. A single step profile is
//! duplicated once per step and shifted by one run/rise increment.
//! Box styles carve steps into a solid wedge; thin styles float
//! individual treads on slanted support beams. Rotated styles stack
//! two half-height flights around a landing platform, the upper
//! flight turned back by 180 degrees.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::duplicate_faces;
use propgen_mesh::primitives::create_box;
use propgen_mesh::transform::{all_vertices, rotate_set, translate_set};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Staircase construction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairsStyle {
    /// One solid wedge with steps cut into it
    Box,
    /// A line of thin floating treads on support beams
    Thin,
    /// Two box flights turned 180 degrees around a landing
    BoxRotated,
    /// Two thin flights turned 180 degrees around a landing
    ThinRotated,
}

/// Stairs parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairsParams {
    pub style: StairsStyle,
    /// Footprint length of one flight along X (min 0.01)
    pub length: f64,
    /// Tread width along Y (min 0.01)
    pub width: f64,
    /// Total climb (min 0.01); rotated styles split it across two flights
    pub height: f64,
    /// Number of steps per flight (min 1)
    pub steps: u32,
    /// Tread thickness, thin styles only (min 0.01)
    pub step_thickness: f64,
    /// Number of support beams, thin styles only (0 disables them)
    pub supports: u32,
    /// Support beam length along X (min 0.01)
    pub support_length: f64,
    /// Support beam width along Y (min 0.01)
    pub support_width: f64,
    /// Shifts the beams along X into or out of the treads
    pub support_offset: f64,
    /// Landing width, rotated styles only (min 0.01)
    pub platform_width: f64,
    /// Landing length, rotated styles only (min 0.01)
    pub platform_length: f64,
    /// Landing slab thickness, thin-rotated only (min 0.01)
    pub platform_thickness: f64,
    /// Thickness of the beams joining flight and landing, thin-rotated only (min 0.01)
    pub connector_thickness: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for StairsParams {
    fn default() -> Self {
        Self {
            style: StairsStyle::Box,
            length: 6.0,
            width: 2.0,
            height: 3.0,
            steps: 10,
            step_thickness: 0.025,
            supports: 1,
            support_length: 0.25,
            support_width: 0.05,
            support_offset: 0.0,
            platform_width: 5.0,
            platform_length: 2.0,
            platform_thickness: 0.025,
            connector_thickness: 0.025,
            placement: Placement::default(),
        }
    }
}

impl StairsParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 0.01 || self.width < 0.01 || self.height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "stairs dimensions must be at least 0.01, got {} x {} x {}",
                self.length, self.width, self.height
            )));
        }
        if self.steps < 1 {
            return Err(MeshError::invalid_parameter(
                "stairs need at least one step",
            ));
        }
        let thin = matches!(self.style, StairsStyle::Thin | StairsStyle::ThinRotated);
        if thin {
            if self.step_thickness < 0.01 {
                return Err(MeshError::invalid_parameter(format!(
                    "step thickness must be at least 0.01, got {}",
                    self.step_thickness
                )));
            }
            if self.supports > 0 && (self.support_length < 0.01 || self.support_width < 0.01) {
                return Err(MeshError::invalid_parameter(
                    "support beams must be at least 0.01 long and wide",
                ));
            }
        }
        if matches!(self.style, StairsStyle::BoxRotated | StairsStyle::ThinRotated)
            && (self.platform_width < 0.01 || self.platform_length < 0.01)
        {
            return Err(MeshError::invalid_parameter(
                "landing platform must be at least 0.01 wide and long",
            ));
        }
        if self.style == StairsStyle::ThinRotated
            && (self.platform_thickness < 0.01 || self.connector_thickness < 0.01)
        {
            return Err(MeshError::invalid_parameter(
                "platform and connector thickness must be at least 0.01",
            ));
        }
        Ok(())
    }
}

/// Builds a staircase climbing in -X as it rises.
///
/// The bottom of the first step sits on `z == 0` and the top tread ends
/// at `z == height`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum.
pub fn build_stairs(params: &StairsParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;
    let mut mesh = match params.style {
        StairsStyle::Box => {
            box_flight(params, params.length / 2.0, -params.width / 2.0, params.height)?
        }
        StairsStyle::Thin => {
            let mut mesh =
                thin_flight(params, params.length / 2.0, -params.width / 2.0, params.height)?;
            if params.supports > 0 {
                let beams =
                    support_beams(params, params.length / 2.0, params.width / 2.0, params.height)?;
                mesh.append(&beams);
            }
            mesh
        }
        StairsStyle::BoxRotated => box_rotated(params)?,
        StairsStyle::ThinRotated => thin_rotated(params)?,
    };
    params.placement.apply(&mut mesh);
    Ok(mesh)
}

/// Duplicates the step profile `steps - 1` times, each copy one run/rise
/// increment further up.
fn replicate_steps(mesh: &mut MeshBuffer, steps: u32, run: f64, rise: f64) -> Result<(), MeshError> {
    let profile: Vec<usize> = (0..mesh.face_count()).collect();
    for i in 1..steps {
        let copy = duplicate_faces(mesh, &profile)?;
        let k = f64::from(i);
        translate_set(mesh, &copy.vertices, DVec3::new(-run * k, 0.0, rise * k));
    }
    Ok(())
}

/// Pulls every vertex that overshot the back of the flight onto its back
/// plane.
fn clamp_back(mesh: &mut MeshBuffer, back_x: f64) {
    for i in 0..mesh.vertex_count() as u32 {
        let mut p = mesh.vertex(i);
        if p.x < back_x {
            p.x = back_x;
            mesh.set_vertex(i, p);
        }
    }
}

/// One solid flight: a full-footprint wedge profile per step, clamped at
/// the back so the copies form a staircase silhouette.
fn box_flight(
    params: &StairsParams,
    front_x: f64,
    y0: f64,
    climb: f64,
) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let run = l / f64::from(params.steps);
    let rise = climb / f64::from(params.steps);
    let y1 = y0 + params.width;
    let back_x = front_x - l;

    let mut mesh = MeshBuffer::with_capacity(10 * params.steps as usize, 5 * params.steps as usize);
    let verts = [
        DVec3::new(front_x, y0, 0.0),
        DVec3::new(front_x, y1, 0.0),
        DVec3::new(back_x, y1, 0.0),
        DVec3::new(back_x, y0, 0.0),
        DVec3::new(front_x, y0, rise),
        DVec3::new(front_x, y1, rise),
        DVec3::new(back_x, y1, rise),
        DVec3::new(back_x, y0, rise),
        DVec3::new(front_x - run, y1, rise),
        DVec3::new(front_x - run, y0, rise),
    ];
    for v in verts {
        mesh.add_vertex(v);
    }
    for face in [[0, 1, 5, 4], [8, 9, 4, 5], [0, 4, 7, 3], [7, 6, 2, 3], [2, 6, 5, 1]] {
        mesh.add_face(&face)?;
    }
    replicate_steps(&mut mesh, params.steps, run, rise)?;
    clamp_back(&mut mesh, back_x);
    Ok(mesh)
}

/// One floating flight: a closed tread box per step.
fn thin_flight(
    params: &StairsParams,
    front_x: f64,
    y0: f64,
    climb: f64,
) -> Result<MeshBuffer, MeshError> {
    let run = params.length / f64::from(params.steps);
    let rise = climb / f64::from(params.steps);
    let t = params.step_thickness;
    let y1 = y0 + params.width;

    let mut mesh = MeshBuffer::with_capacity(8 * params.steps as usize, 6 * params.steps as usize);
    let verts = [
        DVec3::new(front_x, y1, rise),
        DVec3::new(front_x, y0, rise),
        DVec3::new(front_x - run, y0, rise),
        DVec3::new(front_x - run, y1, rise),
        DVec3::new(front_x, y1, rise - t),
        DVec3::new(front_x, y0, rise - t),
        DVec3::new(front_x - run, y0, rise - t),
        DVec3::new(front_x - run, y1, rise - t),
    ];
    for v in verts {
        mesh.add_vertex(v);
    }
    for face in [
        [3, 2, 1, 0],
        [5, 6, 7, 4],
        [1, 5, 4, 0],
        [2, 6, 5, 1],
        [3, 7, 6, 2],
        [7, 3, 0, 4],
    ] {
        mesh.add_face(&face)?;
    }
    replicate_steps(&mut mesh, params.steps, run, rise)?;
    Ok(mesh)
}

/// Slanted open beams carrying the treads, evenly spread across the
/// flight width.
fn support_beams(
    params: &StairsParams,
    front_x: f64,
    y_top: f64,
    climb: f64,
) -> Result<MeshBuffer, MeshError> {
    let n = f64::from(params.supports);
    let o = params.support_offset;
    let sl = params.support_length;
    let half_sw = params.support_width / 2.0;
    let yc = y_top - params.width / (n * 2.0);
    let back_x = front_x - params.length;

    let mut mesh = MeshBuffer::new();
    let verts = [
        DVec3::new(front_x + o, yc - half_sw, 0.0),
        DVec3::new(front_x + o, yc + half_sw, 0.0),
        DVec3::new(front_x - sl + o, yc - half_sw, 0.0),
        DVec3::new(front_x - sl + o, yc + half_sw, 0.0),
        DVec3::new(back_x + o, yc - half_sw, climb),
        DVec3::new(back_x + o, yc + half_sw, climb),
        DVec3::new(back_x - sl + o, yc - half_sw, climb),
        DVec3::new(back_x - sl + o, yc + half_sw, climb),
    ];
    for v in verts {
        mesh.add_vertex(v);
    }
    for face in [[4, 6, 2, 0], [5, 4, 0, 1], [7, 5, 1, 3], [6, 7, 3, 2]] {
        mesh.add_face(&face)?;
    }

    let beam: Vec<usize> = (0..mesh.face_count()).collect();
    for i in 1..params.supports {
        let copy = duplicate_faces(&mut mesh, &beam)?;
        let shift = -params.width / n * f64::from(i);
        translate_set(&mut mesh, &copy.vertices, DVec3::new(0.0, shift, 0.0));
    }
    Ok(mesh)
}

/// Two box flights of half the climb each, joined by an L-shaped landing
/// block. The upper flight is turned back 180 degrees so it descends
/// toward the caller.
fn box_rotated(params: &StairsParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let w = params.width;
    let pw = params.platform_width;
    let pl = params.platform_length;
    let climb = params.height / 2.0;

    let mut mesh = box_flight(params, l, pw / 2.0 - w, climb)?;

    let mut upper = box_flight(params, l, -pw / 2.0, climb)?;
    upper.translate(DVec3::new(0.0, 0.0, climb));
    let pivot = DVec3::new(l / 2.0, -pw / 2.0 + w / 2.0, 0.0);
    let verts = all_vertices(&upper);
    rotate_set(&mut upper, &verts, pivot, DVec3::Z, PI);
    mesh.append(&upper);

    // Landing: an L-shaped block wrapping around the lower flight
    let mut landing = MeshBuffer::with_capacity(12, 8);
    let footprint = [
        DVec3::new(l, -pw / 2.0, 0.0),
        DVec3::new(-pl, -pw / 2.0, 0.0),
        DVec3::new(l, -pw / 2.0 + w, 0.0),
        DVec3::new(0.0, -pw / 2.0 + w, 0.0),
        DVec3::new(0.0, pw / 2.0, 0.0),
        DVec3::new(-pl, pw / 2.0, 0.0),
    ];
    for v in footprint {
        landing.add_vertex(v);
    }
    for v in footprint {
        landing.add_vertex(v + DVec3::new(0.0, 0.0, climb));
    }
    for face in [
        [1, 0, 6, 7],
        [0, 2, 8, 6],
        [2, 3, 9, 8],
        [3, 4, 10, 9],
        [4, 5, 11, 10],
        [1, 7, 11, 5],
        [7, 9, 10, 11],
        [7, 6, 8, 9],
    ] {
        landing.add_face(&face)?;
    }
    mesh.append(&landing);
    Ok(mesh)
}

/// Two thin flights of half the climb each, a landing slab between them,
/// and connector beams tying the slab to the upper flight's supports.
fn thin_rotated(params: &StairsParams) -> Result<MeshBuffer, MeshError> {
    let l = params.length;
    let w = params.width;
    let pw = params.platform_width;
    let pl = params.platform_length;
    let pt = params.platform_thickness;
    let climb = params.height / 2.0;

    let mut mesh = thin_flight(params, l, pw / 2.0 - w, climb)?;
    if params.supports > 0 {
        let beams = support_beams(params, l, pw / 2.0, climb)?;
        mesh.append(&beams);
    }

    let mut upper = mesh.clone();
    let verts = all_vertices(&upper);
    rotate_set(&mut upper, &verts, DVec3::ZERO, DVec3::Z, PI);
    upper.translate(DVec3::new(l, 0.0, climb));
    mesh.append(&upper);

    let mut landing = create_box(DVec3::new(pl, pw, pt), true)?;
    landing.translate(DVec3::new(-pl / 2.0, 0.0, climb - pt / 2.0));
    mesh.append(&landing);

    if params.supports > 0 {
        let connectors = connector_beams(params, climb)?;
        mesh.append(&connectors);
    }
    Ok(mesh)
}

/// Short beams hanging under the landing slab, bridging it to the upper
/// flight's support line.
fn connector_beams(params: &StairsParams, climb: f64) -> Result<MeshBuffer, MeshError> {
    let n = f64::from(params.supports);
    let sl = params.support_length;
    let half_sw = params.support_width / 2.0;
    let pl = params.platform_length;
    let pt = params.platform_thickness;
    let ct = params.connector_thickness;
    let yc = params.platform_width / 2.0 - params.width / (n * 2.0);
    let ya = -(yc - half_sw);
    let yb = -(yc + half_sw);

    let mut mesh = MeshBuffer::new();
    let verts = [
        DVec3::new(0.0, ya, climb),
        DVec3::new(0.0, yb, climb),
        DVec3::new(sl, ya, climb),
        DVec3::new(sl, yb, climb),
        DVec3::new(0.0, ya, climb - pt),
        DVec3::new(0.0, yb, climb - pt),
        DVec3::new(sl, ya, climb - ct - pt),
        DVec3::new(sl, yb, climb - ct - pt),
        DVec3::new(-pl / 2.0, ya, climb - pt),
        DVec3::new(-pl / 2.0, yb, climb - pt),
        DVec3::new(-pl / 2.0, ya, climb - ct - pt),
        DVec3::new(-pl / 2.0, yb, climb - ct - pt),
    ];
    for v in verts {
        mesh.add_vertex(v);
    }
    for face in [
        [11, 10, 6, 7],
        [6, 10, 8, 4],
        [0, 2, 6, 4],
        [2, 3, 7, 6],
        [10, 11, 9, 8],
        [11, 7, 5, 9],
        [5, 7, 3, 1],
    ] {
        mesh.add_face(&face)?;
    }

    let beam: Vec<usize> = (0..mesh.face_count()).collect();
    for i in 1..params.supports {
        let copy = duplicate_faces(&mut mesh, &beam)?;
        let shift = params.width / n * f64::from(i);
        translate_set(&mut mesh, &copy.vertices, DVec3::new(0.0, shift, 0.0));
    }
    Ok(mesh)
}
