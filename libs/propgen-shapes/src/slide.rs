//! # Slide
//!
//! Four playground slide variants built from one cross-section swept
//! along a path. Tube styles sweep a circle, open styles sweep a
//! U-channel with guard walls; helix styles coil the section around a
//! vertical axis while straight styles run it down a ramp with eased
//! transitions at both ends. Every variant finishes as a solid shell.

use std::f64::consts::{FRAC_PI_4, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{extrude_edge_loop, solidify, ExtrudedLoop};
use propgen_mesh::transform::{rotate_set, translate_set};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Which slide variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideStyle {
    /// Enclosed tube coiling down around a vertical axis
    TubeHelix,
    /// Enclosed tube running straight down a ramp
    TubeStraight,
    /// Open channel coiling down around a vertical axis
    OpenHelix,
    /// Open channel running straight down a ramp
    OpenStraight,
}

/// Slide parameters. Each style reads its own subset; the rest are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideParams {
    pub style: SlideStyle,
    /// Helix styles: radius from the coil axis to the section (min 0.01)
    pub major_radius: f64,
    /// Tube styles: tube radius (min 0.01)
    pub minor_radius: f64,
    /// Tube styles: segments around the tube section (min 4)
    pub radial_segments: u32,
    /// Helix styles: height lost per full turn (min 0.01)
    pub loop_height: f64,
    /// Helix styles: segments per full turn (min 4)
    pub loop_segments: u32,
    /// Helix styles: number of full turns (min 1)
    pub loops: u32,
    /// Open styles: height of the guard walls (min 0.01)
    pub guard_height: f64,
    /// Open styles: channel width (min 0.01)
    pub width: f64,
    /// Straight styles: segments easing into and out of the ramp (min 1)
    pub transition_segments: u32,
    /// Straight styles: total drop of the ramp (min 0.01)
    pub height: f64,
    /// Straight styles: horizontal run of the ramp (min 0.01)
    pub length: f64,
    /// Shell thickness (min 0.01)
    pub thickness: f64,
    /// Flat entrance length before the descent (min 0.01)
    pub entrance: f64,
    /// Flat ending length after the descent (min 0.01)
    pub ending: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for SlideParams {
    fn default() -> Self {
        Self {
            style: SlideStyle::TubeHelix,
            major_radius: 1.25,
            minor_radius: 1.0,
            radial_segments: 32,
            loop_height: 2.25,
            loop_segments: 32,
            loops: 3,
            guard_height: 0.325,
            width: 0.75,
            transition_segments: 3,
            height: 2.0,
            length: 4.0,
            thickness: 0.0325,
            entrance: 0.5,
            ending: 0.75,
            placement: Placement::default(),
        }
    }
}

impl SlideParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.thickness < 0.01 || self.entrance < 0.01 || self.ending < 0.01 {
            return Err(MeshError::invalid_parameter(
                "thickness, entrance, and ending must be at least 0.01",
            ));
        }
        match self.style {
            SlideStyle::TubeHelix | SlideStyle::TubeStraight => {
                if self.minor_radius < 0.01 {
                    return Err(MeshError::invalid_parameter(format!(
                        "tube radius must be at least 0.01, got {}",
                        self.minor_radius
                    )));
                }
                if self.radial_segments < 4 {
                    return Err(MeshError::invalid_parameter(format!(
                        "tube needs at least 4 radial segments, got {}",
                        self.radial_segments
                    )));
                }
            }
            SlideStyle::OpenHelix | SlideStyle::OpenStraight => {
                if self.width < 0.01 || self.guard_height < 0.01 {
                    return Err(MeshError::invalid_parameter(
                        "channel width and guard height must be at least 0.01",
                    ));
                }
            }
        }
        match self.style {
            SlideStyle::TubeHelix | SlideStyle::OpenHelix => {
                if self.major_radius < 0.01 || self.loop_height < 0.01 {
                    return Err(MeshError::invalid_parameter(
                        "major radius and loop height must be at least 0.01",
                    ));
                }
                if self.loop_segments < 4 || self.loops < 1 {
                    return Err(MeshError::invalid_parameter(format!(
                        "helix needs at least 4 segments per loop and 1 loop, got {} / {}",
                        self.loop_segments, self.loops
                    )));
                }
            }
            SlideStyle::TubeStraight | SlideStyle::OpenStraight => {
                if self.height < 0.01 || self.length < 0.01 {
                    return Err(MeshError::invalid_parameter(
                        "ramp height and length must be at least 0.01",
                    ));
                }
                if self.transition_segments < 1 {
                    return Err(MeshError::invalid_parameter(format!(
                        "ramp needs at least 1 transition segment, got {}",
                        self.transition_segments
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Circular tube section in the XZ plane, facing down the -Y path.
fn tube_section(mesh: &mut MeshBuffer, radius: f64, segments: u32) -> Vec<(u32, u32)> {
    let base = mesh.vertex_count() as u32;
    for i in 0..segments {
        let theta = TAU * f64::from(i) / f64::from(segments);
        mesh.add_vertex(DVec3::new(radius * theta.cos(), 0.0, radius * theta.sin()));
    }
    (0..segments)
        .map(|i| (base + i, base + (i + 1) % segments))
        .collect()
}

/// U-channel section: floor plus two guard walls, open at the top.
fn channel_section(mesh: &mut MeshBuffer, width: f64, guard_height: f64) -> Vec<(u32, u32)> {
    let base = mesh.vertex_count() as u32;
    for v in [
        DVec3::new(-width / 2.0, 0.0, guard_height),
        DVec3::new(-width / 2.0, 0.0, 0.0),
        DVec3::new(width / 2.0, 0.0, 0.0),
        DVec3::new(width / 2.0, 0.0, guard_height),
    ] {
        mesh.add_vertex(v);
    }
    vec![(base, base + 1), (base + 1, base + 2), (base + 2, base + 3)]
}

/// Extrudes the flat entrance run, then coils the section down around
/// the vertical axis through `(0, -entrance, 0)`. Returns the last ring.
fn helix_path(
    mesh: &mut MeshBuffer,
    section: &[(u32, u32)],
    params: &SlideParams,
) -> Result<ExtrudedLoop, MeshError> {
    let step_angle = -TAU / f64::from(params.loop_segments);
    let step_drop = -params.loop_height / f64::from(params.loop_segments);
    let axis_point = DVec3::new(0.0, -params.entrance, 0.0);

    let mut ring = extrude_edge_loop(mesh, section)?;
    translate_set(mesh, &ring.vertices, DVec3::new(0.0, -params.entrance, 0.0));

    // Push the whole entrance out to the coil radius
    mesh.translate(DVec3::new(params.major_radius, 0.0, 0.0));

    for _ in 0..params.loop_segments * params.loops {
        ring = extrude_edge_loop(mesh, &ring.edges())?;
        rotate_set(mesh, &ring.vertices, axis_point, DVec3::Z, step_angle);
        translate_set(mesh, &ring.vertices, DVec3::new(0.0, 0.0, step_drop));
    }
    Ok(ring)
}

/// Extrudes the flat entrance, eases into the ramp, runs it down by
/// `(length, height)`, and eases flat again. `entry_pivot_z` is where
/// the first transition hinges; the exit hinge re-uses the lowest path
/// vertex, overridable through `exit_pivot_z`. Returns the last ring.
fn straight_path(
    mesh: &mut MeshBuffer,
    section: &[(u32, u32)],
    params: &SlideParams,
    entry_pivot_z: f64,
    exit_pivot_z: Option<f64>,
) -> Result<ExtrudedLoop, MeshError> {
    let steps = params.transition_segments;
    let step_angle = FRAC_PI_4 * (params.height / params.length) / f64::from(steps);

    let mut ring = extrude_edge_loop(mesh, section)?;
    translate_set(mesh, &ring.vertices, DVec3::new(0.0, -params.entrance, 0.0));

    // Tip the section down onto the ramp
    let entry_pivot = DVec3::new(0.0, -params.entrance, entry_pivot_z);
    for _ in 0..steps {
        ring = extrude_edge_loop(mesh, &ring.edges())?;
        rotate_set(mesh, &ring.vertices, entry_pivot, DVec3::X, step_angle);
    }

    // Main run
    ring = extrude_edge_loop(mesh, &ring.edges())?;
    translate_set(
        mesh,
        &ring.vertices,
        DVec3::new(0.0, -params.length, -params.height),
    );

    // The exit hinges at the far end of the run
    let mut far = mesh.vertex(ring.vertices[0]);
    for &idx in &ring.vertices {
        let v = mesh.vertex(idx);
        if v.y <= far.y {
            far = v;
        }
    }
    let exit_pivot = DVec3::new(0.0, far.y, exit_pivot_z.unwrap_or(far.z));
    for _ in 0..steps {
        ring = extrude_edge_loop(mesh, &ring.edges())?;
        rotate_set(mesh, &ring.vertices, exit_pivot, DVec3::X, -step_angle);
    }
    Ok(ring)
}

/// Extrudes the flat run-out. With `lip`, the lower half of the final
/// ring reaches out twice as far so the mouth curls open.
fn run_out(mesh: &mut MeshBuffer, ring: &ExtrudedLoop, ending: f64, lip: bool) -> Result<(), MeshError> {
    let ring = extrude_edge_loop(mesh, &ring.edges())?;
    if !lip {
        translate_set(mesh, &ring.vertices, DVec3::new(0.0, -ending, 0.0));
        return Ok(());
    }

    translate_set(mesh, &ring.vertices, DVec3::new(0.0, -ending / 2.0, 0.0));

    let mid_z = ring
        .vertices
        .iter()
        .map(|&idx| mesh.vertex(idx).z)
        .sum::<f64>()
        / ring.vertices.len() as f64;
    let lower: Vec<u32> = ring
        .vertices
        .iter()
        .copied()
        .filter(|&idx| mesh.vertex(idx).z <= mid_z)
        .collect();
    translate_set(mesh, &lower, DVec3::new(0.0, -ending / 2.0, 0.0));
    Ok(())
}

/// Builds a slide.
///
/// The entrance mouth opens toward `-Y` at the origin; the path then
/// descends according to the style. The swept surface is thickened into
/// a shell as the final step.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field the selected
/// style reads is below its minimum.
pub fn build_slide(params: &SlideParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut surface = MeshBuffer::new();
    match params.style {
        SlideStyle::TubeHelix => {
            let section = tube_section(&mut surface, params.minor_radius, params.radial_segments);
            let ring = helix_path(&mut surface, &section, params)?;
            run_out(&mut surface, &ring, params.ending, true)?;
        }
        SlideStyle::TubeStraight => {
            let section = tube_section(&mut surface, params.minor_radius, params.radial_segments);
            let ring = straight_path(&mut surface, &section, params, -params.minor_radius, None)?;
            run_out(&mut surface, &ring, params.ending, true)?;
        }
        SlideStyle::OpenHelix => {
            let section = channel_section(&mut surface, params.width, params.guard_height);
            let ring = helix_path(&mut surface, &section, params)?;
            run_out(&mut surface, &ring, params.ending, false)?;
        }
        SlideStyle::OpenStraight => {
            let section = channel_section(&mut surface, params.width, params.guard_height);
            let ring = straight_path(
                &mut surface,
                &section,
                params,
                0.0,
                Some(-params.height + params.guard_height),
            )?;
            run_out(&mut surface, &ring, params.ending, false)?;
        }
    }

    let mut mesh = solidify(&surface, params.thickness)?;
    params.placement.apply(&mut mesh);
    Ok(mesh)
}
