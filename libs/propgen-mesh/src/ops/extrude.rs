//! # Edge-Loop Extrusion
//!
//! Creates a parallel ring of geometry from a boundary edge loop, bridging
//! it to the original with quad faces. The new ring starts coincident with
//! the source ring; callers transform it afterwards, and can feed it back
//! in to chain extrusions segment by segment.

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Result of one [`extrude_edge_loop`] call.
#[derive(Debug, Clone)]
pub struct ExtrudedLoop {
    /// New ring vertices, in chain order
    pub vertices: Vec<u32>,
    /// New bridging face indices
    pub faces: Vec<usize>,
    /// True when the input formed a closed loop
    pub closed: bool,
}

impl ExtrudedLoop {
    /// Returns the ring as an edge list, suitable for the next extrusion.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges = Vec::with_capacity(self.vertices.len());
        for i in 0..self.vertices.len() - 1 {
            edges.push((self.vertices[i], self.vertices[i + 1]));
        }
        if self.closed {
            edges.push((
                self.vertices[self.vertices.len() - 1],
                self.vertices[0],
            ));
        }
        edges
    }
}

/// Extrudes a boundary edge loop into a coincident parallel ring.
///
/// The edge set must form one simple open chain or closed loop; every new
/// quad bridges an old edge to its copy. Returns the new ring in chain
/// order so repeated extrusion can chain.
///
/// # Errors
///
/// Returns [`MeshError::InvalidBoundary`] when the edge set is empty,
/// branches, is disconnected, or references out-of-range vertices.
pub fn extrude_edge_loop(
    mesh: &mut MeshBuffer,
    edges: &[(u32, u32)],
) -> Result<ExtrudedLoop, MeshError> {
    let (chain, closed) = order_chain(mesh, edges)?;

    let mut new_ring = Vec::with_capacity(chain.len());
    for &idx in &chain {
        let position = mesh.vertex(idx);
        new_ring.push(mesh.add_vertex(position));
    }

    let mut faces = Vec::new();
    let bridge_count = if closed { chain.len() } else { chain.len() - 1 };
    for i in 0..bridge_count {
        let j = (i + 1) % chain.len();
        faces.push(mesh.add_face(&[chain[i], chain[j], new_ring[j], new_ring[i]])?);
    }

    Ok(ExtrudedLoop {
        vertices: new_ring,
        faces,
        closed,
    })
}

/// Orders an undirected edge set into a single chain or loop.
///
/// Returns the vertices in traversal order plus whether the chain closes.
fn order_chain(mesh: &MeshBuffer, edges: &[(u32, u32)]) -> Result<(Vec<u32>, bool), MeshError> {
    if edges.is_empty() {
        return Err(MeshError::invalid_boundary("edge set is empty"));
    }

    let vertex_count = mesh.vertex_count() as u32;
    for &(a, b) in edges {
        if a >= vertex_count || b >= vertex_count {
            return Err(MeshError::invalid_boundary(format!(
                "edge ({}, {}) references a vertex out of range",
                a, b
            )));
        }
        if a == b {
            return Err(MeshError::invalid_boundary(format!(
                "edge ({}, {}) is a self-loop",
                a, b
            )));
        }
    }

    // Adjacency; more than two uses of a vertex means the set branches
    let mut adjacency: Vec<(u32, Vec<u32>)> = Vec::new();
    for &(a, b) in edges {
        for (v, n) in [(a, b), (b, a)] {
            match adjacency.iter_mut().find(|(idx, _)| *idx == v) {
                Some((_, neighbors)) => {
                    if neighbors.contains(&n) {
                        return Err(MeshError::invalid_boundary(format!(
                            "duplicate edge ({}, {})",
                            a, b
                        )));
                    }
                    if neighbors.len() == 2 {
                        return Err(MeshError::invalid_boundary(format!(
                            "vertex {} used by more than two edges",
                            v
                        )));
                    }
                    neighbors.push(n);
                }
                None => adjacency.push((v, vec![n])),
            }
        }
    }

    let endpoints: Vec<u32> = adjacency
        .iter()
        .filter(|(_, n)| n.len() == 1)
        .map(|(v, _)| *v)
        .collect();

    let (start, closed) = match endpoints.len() {
        0 => (edges[0].0, true),
        2 => (*endpoints.iter().min().unwrap_or(&endpoints[0]), false),
        _ => {
            return Err(MeshError::invalid_boundary(format!(
                "edge set has {} chain endpoints",
                endpoints.len()
            )))
        }
    };

    let neighbors_of = |v: u32| -> &[u32] {
        adjacency
            .iter()
            .find(|(idx, _)| *idx == v)
            .map(|(_, n)| n.as_slice())
            .unwrap_or(&[])
    };

    let mut chain = vec![start];
    let mut previous = None;
    loop {
        let current = chain[chain.len() - 1];
        let next = neighbors_of(current)
            .iter()
            .copied()
            .find(|&n| Some(n) != previous);

        let next = match next {
            Some(n) => n,
            None => break, // open chain end
        };
        if next == start {
            break; // loop closed
        }
        previous = Some(current);
        chain.push(next);
    }

    if chain.len() != adjacency.len() {
        return Err(MeshError::invalid_boundary(
            "edge set is not a single connected chain",
        ));
    }

    Ok((chain, closed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_regular_polygon;
    use crate::transform::translate_set;
    use glam::DVec3;

    fn ring_edges(count: u32) -> Vec<(u32, u32)> {
        (0..count).map(|i| (i, (i + 1) % count)).collect()
    }

    #[test]
    fn test_extrude_closed_loop() {
        let mut mesh = create_regular_polygon(6, 2.0, false, false).unwrap();
        let result = extrude_edge_loop(&mut mesh, &ring_edges(6)).unwrap();
        assert!(result.closed);
        assert_eq!(result.vertices.len(), 6);
        assert_eq!(result.faces.len(), 6);
        assert_eq!(mesh.vertex_count(), 12);
    }

    #[test]
    fn test_extrude_new_ring_starts_coincident() {
        let mut mesh = create_regular_polygon(4, 2.0, false, false).unwrap();
        let result = extrude_edge_loop(&mut mesh, &ring_edges(4)).unwrap();
        for (i, &new_idx) in result.vertices.iter().enumerate() {
            assert_eq!(mesh.vertex(new_idx), mesh.vertex(i as u32));
        }
    }

    #[test]
    fn test_extrude_chains() {
        let mut mesh = create_regular_polygon(4, 2.0, false, false).unwrap();
        let first = extrude_edge_loop(&mut mesh, &ring_edges(4)).unwrap();
        translate_set(&mut mesh, &first.vertices, DVec3::new(0.0, 0.0, 1.0));

        let second = extrude_edge_loop(&mut mesh, &first.edges()).unwrap();
        translate_set(&mut mesh, &second.vertices, DVec3::new(0.0, 0.0, 1.0));

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 8);
        let (_, max) = mesh.bounding_box();
        assert!((max.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_extrude_open_chain() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0));
        let result = extrude_edge_loop(&mut mesh, &[(0, 1), (1, 2)]).unwrap();
        assert!(!result.closed);
        assert_eq!(result.vertices.len(), 3);
        assert_eq!(result.faces.len(), 2);
    }

    #[test]
    fn test_extrude_rejects_branching() {
        let mut mesh = MeshBuffer::new();
        for _ in 0..4 {
            mesh.add_vertex(DVec3::ZERO);
        }
        let result = extrude_edge_loop(&mut mesh, &[(0, 1), (0, 2), (0, 3)]);
        assert!(matches!(result, Err(MeshError::InvalidBoundary { .. })));
    }

    #[test]
    fn test_extrude_rejects_disconnected() {
        let mut mesh = MeshBuffer::new();
        for _ in 0..6 {
            mesh.add_vertex(DVec3::ZERO);
        }
        let result = extrude_edge_loop(&mut mesh, &[(0, 1), (2, 3)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extrude_rejects_empty() {
        let mut mesh = MeshBuffer::new();
        assert!(extrude_edge_loop(&mut mesh, &[]).is_err());
    }
}
