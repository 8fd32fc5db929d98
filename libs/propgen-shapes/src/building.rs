//! # Building Shell
//!
//! A multi-storey building exterior: an open eight-sided prism shell
//! (each wall has a midpoint vertex so the four corners can be beveled
//! independently), one interior room cell per floor, and a roof that is
//! either a flat cover plane or a parapet ring. Corner bevels apply to
//! the exterior, every floor cell, and the roof alike, so a rounded
//! corner stays rounded through the whole stack.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::ops::{bevel, BevelParams, BevelSelection};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Tolerance pad for corner selection boxes, so vertices that should
/// sit exactly on the bound are caught despite float noise.
const CORNER_PAD: f64 = 0.00125;

/// What covers the top of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofStyle {
    /// Flat plane closing the shell at the top
    Plane,
    /// Raised ring around an open roof deck
    Parapet,
}

/// Bevel applied to one vertical building corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerBevel {
    /// Bevel segments; zero leaves the corner sharp
    pub segments: u32,
    /// Bevel offset (min 0)
    pub offset: f64,
}

impl Default for CornerBevel {
    fn default() -> Self {
        Self {
            segments: 0,
            offset: 0.0,
        }
    }
}

impl CornerBevel {
    fn active(&self) -> bool {
        self.segments > 0 && self.offset > 0.0
    }
}

/// Building shell parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParams {
    /// Footprint along X (min 4)
    pub length: f64,
    /// Footprint along Y (min 4)
    pub width: f64,
    /// Floor-to-ceiling distance inside each storey (min 1)
    pub floor_height: f64,
    /// Number of storeys (min 1)
    pub floors: u32,
    /// Slab thickness between storeys (min 0.01)
    pub floor_thickness: f64,
    /// Wall thickness (min 0.01)
    pub wall_thickness: f64,
    /// Roof covering
    pub roof_style: RoofStyle,
    /// Parapet rise above the top slab (min 0)
    pub roof_height: f64,
    /// Bevel for the corner at `(+X, +Y)`
    pub left_front: CornerBevel,
    /// Bevel for the corner at `(+X, -Y)`
    pub left_rear: CornerBevel,
    /// Bevel for the corner at `(-X, +Y)`
    pub right_front: CornerBevel,
    /// Bevel for the corner at `(-X, -Y)`
    pub right_rear: CornerBevel,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for BuildingParams {
    fn default() -> Self {
        Self {
            length: 6.0,
            width: 10.0,
            floor_height: 2.5,
            floors: 3,
            floor_thickness: 0.3,
            wall_thickness: 0.15,
            roof_style: RoofStyle::Parapet,
            roof_height: 0.3,
            left_front: CornerBevel::default(),
            left_rear: CornerBevel::default(),
            right_front: CornerBevel::default(),
            right_rear: CornerBevel::default(),
            placement: Placement::default(),
        }
    }
}

impl BuildingParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 4.0 || self.width < 4.0 {
            return Err(MeshError::invalid_parameter(format!(
                "footprint must be at least 4 on each side, got {} x {}",
                self.length, self.width
            )));
        }
        if self.floor_height < 1.0 {
            return Err(MeshError::invalid_parameter(format!(
                "floor height must be at least 1, got {}",
                self.floor_height
            )));
        }
        if self.floors < 1 {
            return Err(MeshError::invalid_parameter("building needs at least 1 floor"));
        }
        if self.floor_thickness < 0.01 || self.wall_thickness < 0.01 {
            return Err(MeshError::invalid_parameter(
                "floor and wall thickness must be at least 0.01",
            ));
        }
        if 2.0 * self.wall_thickness >= self.length.min(self.width) {
            return Err(MeshError::invalid_parameter(format!(
                "wall thickness {} leaves no interior in a {} x {} footprint",
                self.wall_thickness, self.length, self.width
            )));
        }
        if self.roof_height < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "roof height must not be negative, got {}",
                self.roof_height
            )));
        }
        for corner in [
            &self.left_front,
            &self.left_rear,
            &self.right_front,
            &self.right_rear,
        ] {
            if corner.offset < 0.0 {
                return Err(MeshError::invalid_parameter(format!(
                    "corner bevel offset must not be negative, got {}",
                    corner.offset
                )));
            }
        }
        Ok(())
    }

    fn shell_height(&self) -> f64 {
        f64::from(self.floors) * (self.floor_height + self.floor_thickness)
    }

    /// Corner bevels with the XY signs of the corner they act on.
    fn corners(&self) -> [(CornerBevel, f64, f64); 4] {
        [
            (self.left_front, 1.0, 1.0),
            (self.left_rear, 1.0, -1.0),
            (self.right_front, -1.0, 1.0),
            (self.right_rear, -1.0, -1.0),
        ]
    }
}

/// Eight perimeter vertices at height `z`: corners interleaved with
/// wall midpoints, starting at `(+X, +Y)` and walking past `+X` first.
fn perimeter_ring(mesh: &mut MeshBuffer, hl: f64, hw: f64, z: f64) -> Vec<u32> {
    [
        (hl, hw),
        (hl, 0.0),
        (hl, -hw),
        (0.0, -hw),
        (-hl, -hw),
        (-hl, 0.0),
        (-hl, hw),
        (0.0, hw),
    ]
    .iter()
    .map(|&(x, y)| mesh.add_vertex(DVec3::new(x, y, z)))
    .collect()
}

/// Bevels the vertical edges inside a corner-sized box.
fn bevel_corner(
    mesh: &mut MeshBuffer,
    corner: &CornerBevel,
    center: DVec3,
    half_extent: DVec3,
) -> Result<(), MeshError> {
    let pad = DVec3::splat(CORNER_PAD);
    let edges = mesh.edges_in_bounds(center - half_extent - pad, center + half_extent + pad);
    if edges.is_empty() {
        return Ok(());
    }
    bevel(
        mesh,
        &BevelSelection::Edges(edges),
        &BevelParams {
            offset: corner.offset,
            segments: corner.segments,
            profile: 0.5,
            clamp_overlap: false,
        },
    )?;
    Ok(())
}

/// Exterior shell: open prism, outward-facing walls, beveled corners.
fn exterior(params: &BuildingParams) -> Result<MeshBuffer, MeshError> {
    let hl = params.length / 2.0;
    let hw = params.width / 2.0;
    let height = params.shell_height();

    let mut mesh = MeshBuffer::with_capacity(16, 8);
    let bottom = perimeter_ring(&mut mesh, hl, hw, 0.0);
    let top = perimeter_ring(&mut mesh, hl, hw, height);
    for i in 0..8 {
        let j = (i + 1) % 8;
        mesh.add_face(&[bottom[i], bottom[j], top[j], top[i]])?;
    }
    mesh.reverse_windings();

    for (corner, sx, sy) in params.corners() {
        if corner.active() {
            bevel_corner(
                &mut mesh,
                &corner,
                DVec3::new(sx * hl, sy * hw, height / 2.0),
                DVec3::new(0.0, 0.0, height / 2.0),
            )?;
        }
    }
    Ok(mesh)
}

/// One storey's room: inset walls facing the room, floor and ceiling
/// fanned from centre vertices. Built once and stacked per floor.
fn interior_cell(params: &BuildingParams) -> Result<MeshBuffer, MeshError> {
    let hl = params.length / 2.0 - params.wall_thickness;
    let hw = params.width / 2.0 - params.wall_thickness;
    let height = params.floor_height;

    let mut mesh = MeshBuffer::with_capacity(18, 16);
    let bottom = perimeter_ring(&mut mesh, hl, hw, 0.0);
    let top = perimeter_ring(&mut mesh, hl, hw, height);
    let floor_centre = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
    let ceiling_centre = mesh.add_vertex(DVec3::new(0.0, 0.0, height));

    // Walls face the room
    for i in 0..8 {
        let j = (i + 1) % 8;
        mesh.add_face(&[bottom[i], bottom[j], top[j], top[i]])?;
    }
    // Floor faces up, ceiling faces down
    for k in 0..4 {
        let a = 2 * k;
        mesh.add_face(&[bottom[(a + 7) % 8], floor_centre, bottom[a + 1], bottom[a]])?;
        mesh.add_face(&[top[a], top[a + 1], ceiling_centre, top[(a + 7) % 8]])?;
    }

    for (corner, sx, sy) in params.corners() {
        if corner.active() {
            bevel_corner(
                &mut mesh,
                &corner,
                DVec3::new(sx * hl, sy * hw, height / 2.0),
                DVec3::new(0.0, 0.0, height / 2.0),
            )?;
        }
    }
    Ok(mesh)
}

/// Flat cover: a plane fanned from a centre vertex, corners beveled as
/// vertex cuts since a plane has no vertical corner edge.
fn roof_plane(params: &BuildingParams) -> Result<MeshBuffer, MeshError> {
    let hl = params.length / 2.0;
    let hw = params.width / 2.0;
    let height = params.shell_height();

    let mut mesh = MeshBuffer::with_capacity(9, 4);
    let centre = mesh.add_vertex(DVec3::new(0.0, 0.0, height));
    let ring = perimeter_ring(&mut mesh, hl, hw, height);
    for k in 0..4 {
        let a = 2 * k;
        mesh.add_face(&[centre, ring[a + 1], ring[a], ring[(a + 7) % 8]])?;
    }

    for (corner, sx, sy) in params.corners() {
        if !corner.active() {
            continue;
        }
        let pad = DVec3::splat(CORNER_PAD);
        let at = DVec3::new(sx * hl, sy * hw, height);
        let vertices = mesh.vertices_in_bounds(at - pad, at + pad);
        if vertices.is_empty() {
            continue;
        }
        bevel(
            &mut mesh,
            &BevelSelection::Vertices(vertices),
            &BevelParams {
                offset: corner.offset,
                segments: corner.segments,
                profile: 0.5,
                clamp_overlap: false,
            },
        )?;
    }
    Ok(mesh)
}

/// Parapet ring: the wall tops rise by `roof_height` around an open
/// deck at slab level. Corner selection picks up the short vertical
/// edges on both wall faces plus the connector across the parapet top.
fn roof_parapet(params: &BuildingParams) -> Result<MeshBuffer, MeshError> {
    let hl = params.length / 2.0;
    let hw = params.width / 2.0;
    let ihl = hl - params.wall_thickness;
    let ihw = hw - params.wall_thickness;
    let h = params.shell_height();
    let hr = h + params.roof_height;

    let verts = [
        DVec3::new(0.0, 0.0, h),
        DVec3::new(ihl, 0.0, h),
        DVec3::new(ihl, 0.0, hr),
        DVec3::new(hl, 0.0, hr),
        DVec3::new(hl, 0.0, h),
        DVec3::new(hl, hw, h),
        DVec3::new(hl, hw, hr),
        DVec3::new(ihl, ihw, hr),
        DVec3::new(ihl, ihw, h),
        DVec3::new(0.0, ihw, h),
        DVec3::new(0.0, ihw, hr),
        DVec3::new(0.0, hw, hr),
        DVec3::new(0.0, hw, h),
        DVec3::new(-hl, hw, h),
        DVec3::new(-hl, hw, hr),
        DVec3::new(-ihl, ihw, hr),
        DVec3::new(-ihl, ihw, h),
        DVec3::new(-ihl, 0.0, h),
        DVec3::new(-ihl, 0.0, hr),
        DVec3::new(-hl, 0.0, hr),
        DVec3::new(-hl, 0.0, h),
        DVec3::new(-hl, -hw, h),
        DVec3::new(-hl, -hw, hr),
        DVec3::new(-ihl, -ihw, hr),
        DVec3::new(-ihl, -ihw, h),
        DVec3::new(0.0, -ihw, h),
        DVec3::new(0.0, -ihw, hr),
        DVec3::new(0.0, -hw, hr),
        DVec3::new(0.0, -hw, h),
        DVec3::new(hl, -hw, h),
        DVec3::new(hl, -hw, hr),
        DVec3::new(ihl, -ihw, hr),
        DVec3::new(ihl, -ihw, h),
    ];
    const FACES: [[u32; 4]; 28] = [
        [0, 1, 8, 9],
        [1, 2, 7, 8],
        [2, 3, 6, 7],
        [3, 4, 5, 6],
        [5, 12, 11, 6],
        [11, 10, 7, 6],
        [10, 9, 8, 7],
        [0, 9, 16, 17],
        [9, 10, 15, 16],
        [10, 11, 14, 15],
        [11, 12, 13, 14],
        [13, 20, 19, 14],
        [14, 19, 18, 15],
        [18, 17, 16, 15],
        [0, 17, 24, 25],
        [17, 18, 23, 24],
        [18, 19, 22, 23],
        [19, 20, 21, 22],
        [21, 28, 27, 22],
        [27, 26, 23, 22],
        [26, 25, 24, 23],
        [0, 25, 32, 1],
        [25, 26, 31, 32],
        [26, 27, 30, 31],
        [27, 28, 29, 30],
        [30, 29, 4, 3],
        [3, 2, 31, 30],
        [2, 1, 32, 31],
    ];

    let mut mesh = MeshBuffer::with_capacity(verts.len(), FACES.len());
    for v in verts {
        mesh.add_vertex(v);
    }
    for face in FACES {
        mesh.add_face(&face)?;
    }

    for (corner, sx, sy) in params.corners() {
        if corner.active() {
            bevel_corner(
                &mut mesh,
                &corner,
                DVec3::new(
                    sx * (hl + ihl) / 2.0,
                    sy * (hw + ihw) / 2.0,
                    (h + hr) / 2.0,
                ),
                DVec3::new(
                    params.wall_thickness / 2.0,
                    params.wall_thickness / 2.0,
                    params.roof_height / 2.0,
                ),
            )?;
        }
    }
    Ok(mesh)
}

/// Builds a building shell.
///
/// The shell rises from `z == 0` to
/// `floors * (floor_height + floor_thickness)`, plus `roof_height` for
/// a parapet roof.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when a field is below its
/// minimum or the walls leave no interior.
pub fn build_building(params: &BuildingParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = exterior(params)?;

    let cell = interior_cell(params)?;
    let storey = params.floor_height + params.floor_thickness;
    for floor in 0..params.floors {
        let mut copy = cell.clone();
        copy.translate(DVec3::new(0.0, 0.0, f64::from(floor) * storey));
        mesh.append(&copy);
    }

    let roof = match params.roof_style {
        RoofStyle::Plane => roof_plane(params)?,
        RoofStyle::Parapet => roof_parapet(params)?,
    };
    mesh.append(&roof);

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_building_counts() {
        let params = BuildingParams::default();
        let mesh = build_building(&params).unwrap();
        // Shell 16/8, three cells of 18/16, parapet 33/28
        assert_eq!(mesh.vertex_count(), 16 + 3 * 18 + 33);
        assert_eq!(mesh.face_count(), 8 + 3 * 16 + 28);
    }

    #[test]
    fn test_building_bounds() {
        let params = BuildingParams::default();
        let mesh = build_building(&params).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            max.z,
            params.shell_height() + params.roof_height,
            epsilon = 1e-9
        );
        assert_relative_eq!(max.x - min.x, params.length, epsilon = 1e-9);
        assert_relative_eq!(max.y - min.y, params.width, epsilon = 1e-9);
    }

    #[test]
    fn test_building_plane_roof() {
        let params = BuildingParams {
            roof_style: RoofStyle::Plane,
            ..BuildingParams::default()
        };
        let mesh = build_building(&params).unwrap();
        assert_eq!(mesh.vertex_count(), 16 + 3 * 18 + 9);
        assert_eq!(mesh.face_count(), 8 + 3 * 16 + 4);
        let (_, max) = mesh.bounding_box();
        assert_relative_eq!(max.z, params.shell_height(), epsilon = 1e-9);
    }

    #[test]
    fn test_building_corner_bevel_cuts_one_corner() {
        let params = BuildingParams {
            left_front: CornerBevel {
                segments: 2,
                offset: 0.5,
            },
            ..BuildingParams::default()
        };
        let plain = build_building(&BuildingParams::default()).unwrap();
        let cut = build_building(&params).unwrap();
        assert!(cut.face_count() > plain.face_count());
        // The three sharp corners still pin the footprint
        let (min, max) = cut.bounding_box();
        assert_relative_eq!(max.x - min.x, params.length, epsilon = 1e-9);
        assert_relative_eq!(max.y - min.y, params.width, epsilon = 1e-9);
    }

    #[test]
    fn test_building_single_floor() {
        let params = BuildingParams {
            floors: 1,
            ..BuildingParams::default()
        };
        let mesh = build_building(&params).unwrap();
        assert_eq!(mesh.vertex_count(), 16 + 18 + 33);
    }

    #[test]
    fn test_building_determinism() {
        let params = BuildingParams::default();
        let a = build_building(&params).unwrap();
        let b = build_building(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_building_rejects_thick_walls() {
        let params = BuildingParams {
            wall_thickness: 3.0,
            ..BuildingParams::default()
        };
        assert!(build_building(&params).is_err());
    }
}
