//! # Bevel
//!
//! Rounds selected edges with a profile strip, or chamfers selected
//! vertices with a flat corner cut. Edge bevel works sector-by-sector:
//! the face fan around each affected vertex is split at the selected
//! edges, every sector gets one replacement vertex slid along its rail
//! edges, and the gaps left between sectors are filled with profile
//! strips and corner caps.

use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;
use config::constants::EPSILON;

/// Parameters shared by edge and vertex bevels.
#[derive(Debug, Clone, PartialEq)]
pub struct BevelParams {
    /// Distance the geometry is cut back from the selection
    pub offset: f64,
    /// Number of strip quads across a beveled edge's profile
    pub segments: u32,
    /// Profile shape: 0.0 is a flat chamfer, 0.5 a circular arc,
    /// values toward 1.0 bulge back out to the original corner
    pub profile: f64,
    /// Caps the offset at half the shortest rail edge so strips
    /// never cross each other
    pub clamp_overlap: bool,
}

impl Default for BevelParams {
    fn default() -> Self {
        Self {
            offset: 0.1,
            segments: 1,
            profile: 0.5,
            clamp_overlap: true,
        }
    }
}

/// What the bevel applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum BevelSelection {
    /// Round these edges with profile strips
    Edges(Vec<(u32, u32)>),
    /// Cut these corners flat
    Vertices(Vec<u32>),
}

/// Bevels the selection in place and returns the indices of the faces
/// the operation created (profile strips and corner caps).
///
/// A zero `offset` or zero `segments` is a no-op and returns an empty
/// list.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] for a negative offset, a
/// profile outside `[0, 1]`, or a selected edge or vertex the mesh does
/// not contain, and [`MeshError::NonManifoldInput`] when an affected
/// edge is shared by more than two faces.
pub fn bevel(
    mesh: &mut MeshBuffer,
    selection: &BevelSelection,
    params: &BevelParams,
) -> Result<Vec<usize>, MeshError> {
    if params.offset < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "bevel offset must be non-negative, got {}",
            params.offset
        )));
    }
    if !(0.0..=1.0).contains(&params.profile) {
        return Err(MeshError::invalid_parameter(format!(
            "bevel profile must be in [0, 1], got {}",
            params.profile
        )));
    }
    if params.offset <= EPSILON || params.segments == 0 {
        return Ok(Vec::new());
    }

    match selection {
        BevelSelection::Edges(edges) => {
            if edges.is_empty() {
                return Ok(Vec::new());
            }
            bevel_edges(mesh, edges, params)
        }
        BevelSelection::Vertices(vertices) => {
            if vertices.is_empty() {
                return Ok(Vec::new());
            }
            bevel_vertices(mesh, vertices, params)
        }
    }
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Faces using each edge of the mesh.
fn edge_face_map(mesh: &MeshBuffer) -> Vec<((u32, u32), Vec<usize>)> {
    let mut map: Vec<((u32, u32), Vec<usize>)> = Vec::new();
    for face_idx in 0..mesh.face_count() {
        let face = mesh.face(face_idx);
        for i in 0..face.len() {
            let key = edge_key(face[i], face[(i + 1) % face.len()]);
            match map.iter_mut().find(|(e, _)| *e == key) {
                Some((_, faces)) => faces.push(face_idx),
                None => map.push((key, vec![face_idx])),
            }
        }
    }
    map
}

/// One sector of the face fan around a vertex, between two cuts.
struct Sector {
    faces: Vec<usize>,
    replacement: u32,
}

/// Per-vertex bevel bookkeeping: the sectors its fan was split into.
struct FannedVertex {
    vertex: u32,
    sectors: Vec<Sector>,
}

impl FannedVertex {
    fn replacement_for(&self, face_idx: usize) -> Option<u32> {
        self.sectors
            .iter()
            .find(|s| s.faces.contains(&face_idx))
            .map(|s| s.replacement)
    }
}

/// Ordered fan of edges and faces around a vertex.
struct Fan {
    /// Incident edge keys in fan order; for a closed fan the list wraps
    edges: Vec<(u32, u32)>,
    /// Faces between consecutive edges; `faces[i]` sits between
    /// `edges[i]` and `edges[(i + 1) % edges.len()]`
    faces: Vec<usize>,
    closed: bool,
}

fn build_fan(
    mesh: &MeshBuffer,
    vertex: u32,
    edge_faces: &[((u32, u32), Vec<usize>)],
) -> Result<Fan, MeshError> {
    let incident: Vec<&((u32, u32), Vec<usize>)> = edge_faces
        .iter()
        .filter(|((a, b), _)| *a == vertex || *b == vertex)
        .collect();
    for (key, faces) in incident.iter().copied() {
        if faces.len() > 2 {
            return Err(MeshError::non_manifold(format!(
                "edge ({}, {}) is shared by {} faces",
                key.0,
                key.1,
                faces.len()
            )));
        }
    }

    let faces_of = |key: (u32, u32)| -> &[usize] {
        incident
            .iter()
            .find(|(e, _)| *e == key)
            .map(|(_, f)| f.as_slice())
            .unwrap_or(&[])
    };

    // The two incident edges a face uses at this vertex
    let corner_edges = |face_idx: usize| -> Result<[(u32, u32); 2], MeshError> {
        let face = mesh.face(face_idx);
        let pos = face
            .iter()
            .position(|&v| v == vertex)
            .ok_or_else(|| MeshError::invalid_face("fan face lost its vertex"))?;
        if face.iter().filter(|&&v| v == vertex).count() != 1 {
            return Err(MeshError::invalid_face(format!(
                "vertex {} appears more than once in face {}",
                vertex, face_idx
            )));
        }
        let prev = face[(pos + face.len() - 1) % face.len()];
        let next = face[(pos + 1) % face.len()];
        Ok([edge_key(prev, vertex), edge_key(vertex, next)])
    };

    // Start from a boundary edge when there is one, so an open fan is
    // walked end to end
    let start = incident
        .iter()
        .find(|(_, f)| f.len() == 1)
        .or_else(|| incident.first())
        .map(|(e, _)| *e)
        .ok_or_else(|| {
            MeshError::invalid_boundary(format!("vertex {} has no incident faces", vertex))
        })?;

    let mut edges = vec![start];
    let mut faces = Vec::new();
    let mut current_edge = start;
    let mut previous_face: Option<usize> = None;

    loop {
        let next_face = faces_of(current_edge)
            .iter()
            .copied()
            .find(|f| Some(*f) != previous_face);
        let next_face = match next_face {
            Some(f) => f,
            None => return Ok(Fan {
                edges,
                faces,
                closed: false,
            }),
        };

        let corners = corner_edges(next_face)?;
        let next_edge = if corners[0] == current_edge {
            corners[1]
        } else {
            corners[0]
        };

        faces.push(next_face);
        if next_edge == start {
            return Ok(Fan {
                edges,
                faces,
                closed: true,
            });
        }
        edges.push(next_edge);
        previous_face = Some(next_face);
        current_edge = next_edge;
    }
}

/// Direction and length of an edge as seen from `vertex`.
fn rail(mesh: &MeshBuffer, vertex: u32, key: (u32, u32)) -> (DVec3, f64) {
    let other = if key.0 == vertex { key.1 } else { key.0 };
    let delta = mesh.vertex(other) - mesh.vertex(vertex);
    let length = delta.length();
    if length > 0.0 {
        (delta / length, length)
    } else {
        (DVec3::ZERO, 0.0)
    }
}

fn slide_distance(offset: f64, rail_length: f64, clamp: bool) -> f64 {
    if clamp && rail_length > 0.0 {
        offset.min(rail_length * 0.5)
    } else {
        offset
    }
}

/// Splits a fan into sectors at the selected edges and computes each
/// sector's slid replacement vertex.
fn split_sectors(
    mesh: &mut MeshBuffer,
    vertex: u32,
    fan: &Fan,
    selected: &[(u32, u32)],
    params: &BevelParams,
) -> Vec<Sector> {
    let is_cut = |key: (u32, u32)| selected.contains(&key);
    let count = fan.edges.len();
    let cuts: Vec<usize> = (0..count).filter(|&i| is_cut(fan.edges[i])).collect();

    // Sector boundaries: pairs of (start edge slot, end edge slot). An
    // open fan also breaks at both of its boundary ends.
    let mut spans: Vec<(Option<usize>, Option<usize>, Vec<usize>)> = Vec::new();
    if fan.closed {
        for (c, &cut) in cuts.iter().enumerate() {
            let next_cut = cuts[(c + 1) % cuts.len()];
            let mut faces = Vec::new();
            let mut slot = cut;
            loop {
                faces.push(fan.faces[slot]);
                slot = (slot + 1) % count;
                if slot == next_cut {
                    break;
                }
            }
            spans.push((Some(cut), Some(next_cut), faces));
        }
    } else {
        let mut run_start: Option<usize> = None;
        let mut run_faces: Vec<usize> = Vec::new();
        for slot in 0..fan.faces.len() {
            if run_faces.is_empty() {
                run_start = is_cut(fan.edges[slot]).then_some(slot);
            }
            run_faces.push(fan.faces[slot]);
            let end_edge = slot + 1;
            let at_cut = end_edge < count && is_cut(fan.edges[end_edge]);
            let at_end = slot + 1 == fan.faces.len();
            if at_cut || at_end {
                let end = at_cut.then_some(end_edge);
                spans.push((run_start, end, std::mem::take(&mut run_faces)));
            }
        }
    }

    let vertex_pos = mesh.vertex(vertex);
    let mut sectors = Vec::with_capacity(spans.len());
    for (start_cut, end_cut, faces) in spans {
        // Slide along the rail next to each bounding cut: the first
        // face's far edge for the start cut, the last face's near edge
        // for the end cut. A straight run of selected edges yields the
        // same rail on both ends; slide once, not twice.
        let start_rail = match (start_cut, faces.first()) {
            (Some(cut), Some(&first)) => {
                Some(other_corner_edge(mesh, vertex, first, fan.edges[cut]))
            }
            _ => None,
        };
        let end_rail = match (end_cut, faces.last()) {
            (Some(cut), Some(&last)) => {
                Some(other_corner_edge(mesh, vertex, last, fan.edges[cut]))
            }
            _ => None,
        };
        let end_rail = if end_rail == start_rail { None } else { end_rail };

        let mut position = vertex_pos;
        for rail_key in [start_rail, end_rail].into_iter().flatten() {
            let (dir, len) = rail(mesh, vertex, rail_key);
            position += dir * slide_distance(params.offset, len, params.clamp_overlap);
        }
        let replacement = mesh.add_vertex(position);
        sectors.push(Sector { faces, replacement });
    }
    sectors
}

/// The face's incident edge at `vertex` that is not `edge`.
fn other_corner_edge(
    mesh: &MeshBuffer,
    vertex: u32,
    face_idx: usize,
    edge: (u32, u32),
) -> (u32, u32) {
    let face = mesh.face(face_idx);
    let pos = face.iter().position(|&v| v == vertex).unwrap_or(0);
    let prev = face[(pos + face.len() - 1) % face.len()];
    let next = face[(pos + 1) % face.len()];
    let e1 = edge_key(prev, vertex);
    let e2 = edge_key(vertex, next);
    if e1 == edge {
        e2
    } else {
        e1
    }
}

/// True when `face` walks the edge from `a` to `b` in that order.
fn traverses_forward(face: &[u32], a: u32, b: u32) -> bool {
    for i in 0..face.len() {
        if face[i] == a && face[(i + 1) % face.len()] == b {
            return true;
        }
    }
    false
}

fn bevel_edges(
    mesh: &mut MeshBuffer,
    edges: &[(u32, u32)],
    params: &BevelParams,
) -> Result<Vec<usize>, MeshError> {
    let edge_faces = edge_face_map(mesh);

    let mut selected: Vec<(u32, u32)> = Vec::new();
    for &(a, b) in edges {
        let key = edge_key(a, b);
        let faces = edge_faces
            .iter()
            .find(|(e, _)| *e == key)
            .map(|(_, f)| f.as_slice())
            .ok_or_else(|| {
                MeshError::invalid_parameter(format!(
                    "selected edge ({}, {}) is not in the mesh",
                    a, b
                ))
            })?;
        if faces.len() != 2 {
            return Err(MeshError::invalid_parameter(format!(
                "selected edge ({}, {}) must be shared by exactly two faces, has {}",
                a,
                b,
                faces.len()
            )));
        }
        if !selected.contains(&key) {
            selected.push(key);
        }
    }

    // Split the fan at every affected vertex
    let mut affected: Vec<u32> = Vec::new();
    for &(a, b) in &selected {
        for v in [a, b] {
            if !affected.contains(&v) {
                affected.push(v);
            }
        }
    }
    let mut fanned: Vec<FannedVertex> = Vec::with_capacity(affected.len());
    for &v in &affected {
        let fan = build_fan(mesh, v, &edge_faces)?;
        let sectors = split_sectors(mesh, v, &fan, &selected, params);
        fanned.push(FannedVertex { vertex: v, sectors });
    }

    let replacement = |face_idx: usize, v: u32| -> u32 {
        fanned
            .iter()
            .find(|f| f.vertex == v)
            .and_then(|f| f.replacement_for(face_idx))
            .unwrap_or(v)
    };

    // Rebuild every face with its sector vertices
    let mut result = MeshBuffer::with_capacity(mesh.vertex_count(), mesh.face_count());
    for i in 0..mesh.vertex_count() as u32 {
        result.add_vertex(mesh.vertex(i));
    }
    for face_idx in 0..mesh.face_count() {
        let rebuilt: Vec<u32> = mesh
            .face(face_idx)
            .iter()
            .map(|&v| replacement(face_idx, v))
            .collect();
        result.add_face(&rebuilt)?;
    }

    // Profile strips across each selected edge
    let mut created = Vec::new();
    let mut cap_vertices: Vec<(u32, Vec<u32>)> = affected
        .iter()
        .map(|&v| {
            let sectors = fanned
                .iter()
                .find(|f| f.vertex == v)
                .map(|f| f.sectors.iter().map(|s| s.replacement).collect())
                .unwrap_or_default();
            (v, sectors)
        })
        .collect();

    for &(a, b) in &selected {
        let faces = edge_faces
            .iter()
            .find(|(e, _)| *e == (a, b))
            .map(|(_, f)| f.clone())
            .unwrap_or_default();
        let (f1, f2) = (faces[0], faces[1]);

        let ring_a = profile_ring(mesh, &mut result, a, f1, f2, &fanned, params);
        let ring_b = profile_ring(mesh, &mut result, b, f1, f2, &fanned, params);

        for (v, ring) in [(a, &ring_a), (b, &ring_b)] {
            if let Some((_, set)) = cap_vertices.iter_mut().find(|(cv, _)| *cv == v) {
                for &idx in ring {
                    if !set.contains(&idx) {
                        set.push(idx);
                    }
                }
            }
        }

        let forward = traverses_forward(mesh.face(f1), a, b);
        for k in 0..params.segments as usize {
            let quad = if forward {
                [ring_b[k], ring_a[k], ring_a[k + 1], ring_b[k + 1]]
            } else {
                [ring_a[k], ring_b[k], ring_b[k + 1], ring_a[k + 1]]
            };
            let mut loop_verts: Vec<u32> = Vec::with_capacity(4);
            for &idx in &quad {
                if !loop_verts.contains(&idx) {
                    loop_verts.push(idx);
                }
            }
            if loop_verts.len() >= 3 {
                created.push(result.add_face(&loop_verts)?);
            }
        }
    }

    // Cap the holes left where several beveled edges met
    for fv in &fanned {
        if fv.sectors.len() < 2 {
            continue;
        }
        let set = cap_vertices
            .iter()
            .find(|(v, _)| *v == fv.vertex)
            .map(|(_, s)| s.clone())
            .unwrap_or_default();
        if let Some(face_idx) = cap_hole(&mut result, &set)? {
            created.push(face_idx);
        }
    }

    *mesh = result;
    Ok(created)
}

/// Builds the profile ring at one endpoint of a beveled edge, from the
/// sector vertex on `f1`'s side across to the one on `f2`'s side.
fn profile_ring(
    source: &MeshBuffer,
    result: &mut MeshBuffer,
    vertex: u32,
    f1: usize,
    f2: usize,
    fanned: &[FannedVertex],
    params: &BevelParams,
) -> Vec<u32> {
    let fv = fanned.iter().find(|f| f.vertex == vertex);
    let side1 = fv.and_then(|f| f.replacement_for(f1)).unwrap_or(vertex);
    let side2 = fv.and_then(|f| f.replacement_for(f2)).unwrap_or(vertex);

    let count = params.segments as usize + 1;
    if side1 == side2 {
        return vec![side1; count];
    }

    let p1 = result.vertex(side1);
    let p2 = result.vertex(side2);
    let mid = (p1 + p2) * 0.5;
    let corner = source.vertex(vertex);
    let control = mid + (corner - mid) * (params.profile * 2.0);

    let mut ring = Vec::with_capacity(count);
    ring.push(side1);
    for k in 1..params.segments as usize {
        let u = k as f64 / params.segments as f64;
        let position = p1 * (1.0 - u) * (1.0 - u)
            + control * 2.0 * u * (1.0 - u)
            + p2 * u * u;
        ring.push(result.add_vertex(position));
    }
    ring.push(side2);
    ring
}

/// Finds the boundary loop among `vertices` and fills it.
///
/// Returns `None` when the vertices bound no closed hole, which happens
/// at mesh boundaries.
fn cap_hole(mesh: &mut MeshBuffer, vertices: &[u32]) -> Result<Option<usize>, MeshError> {
    // Directed boundary edges restricted to the hole's vertices
    let mut counts: Vec<((u32, u32), u32, (u32, u32))> = Vec::new();
    for face_idx in 0..mesh.face_count() {
        let face = mesh.face(face_idx);
        for i in 0..face.len() {
            let a = face[i];
            let b = face[(i + 1) % face.len()];
            if !vertices.contains(&a) || !vertices.contains(&b) {
                continue;
            }
            let key = edge_key(a, b);
            match counts.iter_mut().find(|(e, _, _)| *e == key) {
                Some((_, n, _)) => *n += 1,
                None => counts.push((key, 1, (a, b))),
            }
        }
    }
    let boundary: Vec<(u32, u32)> = counts
        .into_iter()
        .filter_map(|(_, n, directed)| (n == 1).then_some(directed))
        .collect();
    if boundary.len() < 3 {
        return Ok(None);
    }

    // Chain into the loop as the surrounding faces traverse it
    let mut chain = vec![boundary[0].0, boundary[0].1];
    loop {
        let tail = chain[chain.len() - 1];
        let next = boundary
            .iter()
            .find(|(a, _)| *a == tail)
            .map(|(_, b)| *b);
        let next = match next {
            Some(n) => n,
            None => return Ok(None),
        };
        if next == chain[0] {
            break;
        }
        if chain.contains(&next) {
            return Ok(None);
        }
        chain.push(next);
    }
    if chain.len() != boundary.len() {
        return Ok(None);
    }

    // The cap traverses each boundary edge opposite to its owner
    chain.reverse();
    Ok(Some(mesh.add_face(&chain)?))
}

/// Chamfers each selected vertex with a flat corner cut: every incident
/// edge gets a cut point at `offset` from the vertex, the adjacent faces
/// are rerouted through those points, and the hole is capped.
fn bevel_vertices(
    mesh: &mut MeshBuffer,
    vertices: &[u32],
    params: &BevelParams,
) -> Result<Vec<usize>, MeshError> {
    let vertex_count = mesh.vertex_count() as u32;
    for &v in vertices {
        if v >= vertex_count {
            return Err(MeshError::invalid_parameter(format!(
                "selected vertex {} is out of range",
                v
            )));
        }
    }

    let mut created = Vec::new();
    let mut targets: Vec<u32> = Vec::new();
    for &v in vertices {
        if !targets.contains(&v) {
            targets.push(v);
        }
    }

    for v in targets {
        let edge_faces = edge_face_map(mesh);
        let fan = build_fan(mesh, v, &edge_faces)?;

        // One cut point per incident edge, shared by both of its faces
        let mut cut_points: Vec<((u32, u32), u32)> = Vec::new();
        for &key in &fan.edges {
            let (dir, len) = rail(mesh, v, key);
            let t = slide_distance(params.offset, len, params.clamp_overlap);
            let idx = mesh.add_vertex(mesh.vertex(v) + dir * t);
            cut_points.push((key, idx));
        }
        let cut_for = |key: (u32, u32)| -> u32 {
            cut_points
                .iter()
                .find(|(e, _)| *e == key)
                .map(|(_, idx)| *idx)
                .unwrap_or(v)
        };

        // Reroute each fan face through its two cut points
        for &face_idx in &fan.faces {
            let face: Vec<u32> = mesh.face(face_idx).to_vec();
            let pos = match face.iter().position(|&x| x == v) {
                Some(p) => p,
                None => continue,
            };
            let prev = face[(pos + face.len() - 1) % face.len()];
            let next = face[(pos + 1) % face.len()];
            let mut rebuilt = Vec::with_capacity(face.len() + 1);
            for (i, &idx) in face.iter().enumerate() {
                if i == pos {
                    rebuilt.push(cut_for(edge_key(prev, v)));
                    rebuilt.push(cut_for(edge_key(v, next)));
                } else {
                    rebuilt.push(idx);
                }
            }
            mesh.set_face(face_idx, rebuilt);
        }

        if fan.closed {
            let hole: Vec<u32> = cut_points.iter().map(|(_, idx)| *idx).collect();
            if let Some(face_idx) = cap_hole(mesh, &hole)? {
                created.push(face_idx);
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_box;
    use glam::DVec3;

    fn unit_cube() -> MeshBuffer {
        create_box(DVec3::splat(1.0), true).unwrap()
    }

    #[test]
    fn test_bevel_zero_offset_is_noop() {
        let mut cube = unit_cube();
        let before = cube.clone();
        let params = BevelParams {
            offset: 0.0,
            ..BevelParams::default()
        };
        let faces = bevel(&mut cube, &BevelSelection::Edges(vec![(0, 1)]), &params).unwrap();
        assert!(faces.is_empty());
        assert_eq!(cube, before);
    }

    #[test]
    fn test_bevel_zero_segments_is_noop() {
        let mut cube = unit_cube();
        let before = cube.clone();
        let params = BevelParams {
            offset: 0.1,
            segments: 0,
            ..BevelParams::default()
        };
        let faces = bevel(&mut cube, &BevelSelection::Edges(vec![(0, 1)]), &params).unwrap();
        assert!(faces.is_empty());
        assert_eq!(cube, before);
        let faces = bevel(&mut cube, &BevelSelection::Vertices(vec![0]), &params).unwrap();
        assert!(faces.is_empty());
        assert_eq!(cube, before);
    }

    #[test]
    fn test_bevel_edge_ring_adds_strips() {
        let mut cube = unit_cube();
        let before_faces = cube.face_count();
        let params = BevelParams {
            offset: 0.1,
            segments: 2,
            ..BevelParams::default()
        };
        // The four edges of the top face
        let ring = vec![(4, 5), (5, 6), (6, 7), (7, 4)];
        let created = bevel(&mut cube, &BevelSelection::Edges(ring), &params).unwrap();
        assert_eq!(created.len(), 4 * 2 + 4);
        assert!(cube.face_count() > before_faces);
        assert!(cube.boundary_edges().is_empty());
        assert!(cube.validate());
    }

    #[test]
    fn test_bevel_cube_corner_stays_closed() {
        let mut cube = unit_cube();
        // The three edges meeting at vertex 0
        let edges = vec![(0, 1), (0, 3), (0, 4)];
        let params = BevelParams {
            offset: 0.2,
            segments: 1,
            ..BevelParams::default()
        };
        bevel(&mut cube, &BevelSelection::Edges(edges), &params).unwrap();
        assert!(cube.boundary_edges().is_empty());
        assert!(cube.validate());
    }

    #[test]
    fn test_bevel_clamps_overlap() {
        let mut cube = unit_cube();
        let params = BevelParams {
            offset: 10.0,
            segments: 1,
            clamp_overlap: true,
            ..BevelParams::default()
        };
        bevel(&mut cube, &BevelSelection::Edges(vec![(0, 1)]), &params).unwrap();
        let (min, max) = cube.bounding_box();
        // Slides are capped at half an edge, so the cube cannot explode
        assert!((max - min).length() < 4.0);
    }

    #[test]
    fn test_bevel_rejects_unknown_edge() {
        let mut cube = unit_cube();
        let result = bevel(
            &mut cube,
            &BevelSelection::Edges(vec![(0, 6)]),
            &BevelParams::default(),
        );
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }

    #[test]
    fn test_bevel_vertex_chamfer_stays_closed() {
        let mut cube = unit_cube();
        let before_vertices = cube.vertex_count();
        let created = bevel(
            &mut cube,
            &BevelSelection::Vertices(vec![0]),
            &BevelParams {
                offset: 0.2,
                ..BevelParams::default()
            },
        )
        .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(cube.vertex_count(), before_vertices + 3);
        assert!(cube.boundary_edges().is_empty());
        assert!(cube.validate());
    }

    #[test]
    fn test_bevel_rejects_negative_offset() {
        let mut cube = unit_cube();
        let params = BevelParams {
            offset: -1.0,
            ..BevelParams::default()
        };
        let result = bevel(&mut cube, &BevelSelection::Vertices(vec![0]), &params);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }
}
