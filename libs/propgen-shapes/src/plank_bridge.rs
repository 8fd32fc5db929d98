//! # Plank Bridge
//!
//! A hanging footbridge: beveled planks spread evenly by arc length
//! along a sagging span curve, with rope rails built from short open
//! cylinder segments following the same curve. The span is a quadratic
//! bezier through both ends and the lowest point; a curvature factor
//! blends it toward straight chords for a taut bridge.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{bevel, BevelParams, BevelSelection};
use propgen_mesh::primitives::{create_box, create_cylinder};
use propgen_mesh::transform::{all_vertices, rotate_set};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Plank bridge parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlankBridgeParams {
    /// Distance between the two anchor points (min 0.01)
    pub bridge_length: f64,
    /// How far the middle of the span sinks (negative) or rises
    pub drop: f64,
    /// 0 is two straight chords, 1 a smooth bezier arc
    pub curvature: f64,
    /// Number of planks (min 2)
    pub planks: u32,
    /// Plank size along the span (min 0.01)
    pub plank_length: f64,
    /// Plank size across the span (min 0.01)
    pub plank_width: f64,
    /// Plank thickness (min 0.01)
    pub plank_height: f64,
    /// Bevel rounding on each plank; 0 segments or offset skips it
    pub bevel_segments: u32,
    pub bevel_offset: f64,
    /// Number of ropes (0 for planks only)
    pub ropes: u32,
    /// Spread between the two outermost ropes (min 0.01)
    pub rope_width: f64,
    /// Rope radius (min 0.001)
    pub rope_thickness: f64,
    /// Cylinder segments per rope along the span (min 2)
    pub rope_segments: u32,
    /// Ring segments of each rope cylinder (min 3)
    pub ring_segments: u32,
    /// Moves the ropes up or down relative to the planks
    pub rope_z_offset: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for PlankBridgeParams {
    fn default() -> Self {
        Self {
            bridge_length: 3.0,
            drop: -0.125,
            curvature: 1.0,
            planks: 12,
            plank_length: 0.2125,
            plank_width: 0.625,
            plank_height: 0.025,
            bevel_segments: 2,
            bevel_offset: 0.005,
            ropes: 2,
            rope_width: 0.5,
            rope_thickness: 0.0125,
            rope_segments: 32,
            ring_segments: 16,
            rope_z_offset: -0.025,
            placement: Placement::default(),
        }
    }
}

impl PlankBridgeParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.bridge_length < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "bridge length must be at least 0.01, got {}",
                self.bridge_length
            )));
        }
        if !(0.0..=1.0).contains(&self.curvature) {
            return Err(MeshError::invalid_parameter(format!(
                "curvature must be within [0, 1], got {}",
                self.curvature
            )));
        }
        if self.planks < 2 {
            return Err(MeshError::invalid_parameter(format!(
                "bridge needs at least 2 planks, got {}",
                self.planks
            )));
        }
        if self.plank_length < 0.01 || self.plank_width < 0.01 || self.plank_height < 0.01 {
            return Err(MeshError::invalid_parameter(
                "plank dimensions must be at least 0.01",
            ));
        }
        if self.bevel_offset < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "bevel offset must be non-negative, got {}",
                self.bevel_offset
            )));
        }
        if self.ropes > 0 {
            if self.rope_width < 0.01 {
                return Err(MeshError::invalid_parameter(format!(
                    "rope spread must be at least 0.01, got {}",
                    self.rope_width
                )));
            }
            if self.rope_thickness < 0.001 {
                return Err(MeshError::invalid_parameter(format!(
                    "rope radius must be at least 0.001, got {}",
                    self.rope_thickness
                )));
            }
            if self.rope_segments < 2 {
                return Err(MeshError::invalid_parameter(
                    "ropes need at least 2 segments",
                ));
            }
            if self.ring_segments < 3 {
                return Err(MeshError::invalid_parameter(
                    "rope rings need at least 3 segments",
                ));
            }
        }
        Ok(())
    }
}

/// Builds a plank bridge spanning from `-bridge_length / 2` to
/// `+bridge_length / 2` along X, sagging by `drop` at the middle.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// documented minimum, and propagates bevel failures.
pub fn build_plank_bridge(params: &PlankBridgeParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;
    let curve = SpanCurve::new(params.bridge_length, params.drop, params.curvature);
    let total = curve.total_length();

    let mut mesh = MeshBuffer::new();

    let plank = make_plank(params)?;
    let spacing = total / f64::from(params.planks - 1);
    for i in 0..params.planks {
        let (point, tangent) = curve.sample(spacing * f64::from(i));
        place_along(&mut mesh, &plank, point, tangent);
    }

    if params.ropes > 0 {
        let seg_len = total / f64::from(params.rope_segments);
        let mut segment = create_cylinder(
            params.ring_segments,
            2.0 * params.rope_thickness,
            2.0 * params.rope_thickness,
            seg_len,
            false,
        )?;
        // Cylinder comes out along Z; lay it down along the span
        let verts = all_vertices(&segment);
        rotate_set(
            &mut segment,
            &verts,
            DVec3::ZERO,
            DVec3::Y,
            std::f64::consts::FRAC_PI_2,
        );
        for j in 0..params.ropes {
            let y = if params.ropes == 1 {
                0.0
            } else {
                -params.rope_width / 2.0
                    + params.rope_width * f64::from(j) / f64::from(params.ropes - 1)
            };
            for k in 0..params.rope_segments {
                let s = seg_len * (f64::from(k) + 0.5);
                let (point, tangent) = curve.sample(s);
                let at = point + DVec3::new(0.0, y, params.rope_z_offset);
                place_along(&mut mesh, &segment, at, tangent);
            }
        }
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

/// One plank, beveled when requested.
fn make_plank(params: &PlankBridgeParams) -> Result<MeshBuffer, MeshError> {
    let mut plank = create_box(
        DVec3::new(params.plank_length, params.plank_width, params.plank_height),
        true,
    )?;
    if params.bevel_offset > 0.0 && params.bevel_segments > 0 {
        let edges = plank.edges();
        bevel(
            &mut plank,
            &BevelSelection::Edges(edges),
            &BevelParams {
                offset: params.bevel_offset,
                segments: params.bevel_segments,
                profile: 0.5,
                clamp_overlap: true,
            },
        )?;
    }
    Ok(plank)
}

/// Appends a copy of `unit` at `point`, its local X turned onto the
/// span tangent.
fn place_along(mesh: &mut MeshBuffer, unit: &MeshBuffer, point: DVec3, tangent: DVec3) {
    let mut copy = unit.clone();
    let pitch = tangent.z.atan2(tangent.x);
    let verts = all_vertices(&copy);
    rotate_set(&mut copy, &verts, DVec3::ZERO, DVec3::Y, -pitch);
    copy.translate(point);
    mesh.append(&copy);
}

const CURVE_SAMPLES: usize = 64;

/// The span curve, sampled once for arc-length lookups.
struct SpanCurve {
    /// Cumulative arc length paired with the sampled point
    samples: Vec<(f64, DVec3)>,
}

impl SpanCurve {
    fn new(length: f64, drop: f64, curvature: f64) -> Self {
        let p0 = DVec3::new(-length / 2.0, 0.0, 0.0);
        let mid = DVec3::new(0.0, 0.0, drop);
        let p2 = DVec3::new(length / 2.0, 0.0, 0.0);
        // Quadratic bezier control that pulls the midpoint down to the
        // requested drop
        let control = DVec3::new(0.0, 0.0, 2.0 * drop);

        let mut samples = Vec::with_capacity(CURVE_SAMPLES + 1);
        let mut length_so_far = 0.0;
        let mut previous = p0;
        for i in 0..=CURVE_SAMPLES {
            let t = i as f64 / CURVE_SAMPLES as f64;
            let chords = if t < 0.5 {
                p0.lerp(mid, t * 2.0)
            } else {
                mid.lerp(p2, t * 2.0 - 1.0)
            };
            let u = 1.0 - t;
            let bezier = p0 * (u * u) + control * (2.0 * u * t) + p2 * (t * t);
            let point = chords.lerp(bezier, curvature);
            length_so_far += (point - previous).length();
            samples.push((length_so_far, point));
            previous = point;
        }
        Self { samples }
    }

    fn total_length(&self) -> f64 {
        match self.samples.last() {
            Some(&(s, _)) => s,
            None => 0.0,
        }
    }

    /// Point and unit tangent at the given arc length, clamped to the
    /// curve ends.
    fn sample(&self, s: f64) -> (DVec3, DVec3) {
        let last = self.samples.len() - 1;
        let mut hi = last;
        for (i, &(len, _)) in self.samples.iter().enumerate() {
            if len >= s {
                hi = i;
                break;
            }
        }
        let hi = hi.clamp(1, last);
        let (s0, p0) = self.samples[hi - 1];
        let (s1, p1) = self.samples[hi];
        let span = s1 - s0;
        let f = if span > 0.0 {
            ((s - s0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (p0.lerp(p1, f), (p1 - p0).normalize_or_zero())
    }
}
