//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane (the plane of its first polygon)
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Operations
//!
//! - `clip_to`: Remove polygons from this tree that are inside another tree
//! - `invert`: Flip all polygons and swap front/back subtrees
//! - `all_polygons`: Collect all polygons from the tree
//!
//! ## Stack Safety
//!
//! All operations use iterative algorithms with explicit stacks, so deep
//! trees from finely tessellated inputs cannot overflow the call stack.

use super::polygon::Polygon;

/// A node in the BSP tree.
///
/// Each node partitions space using a plane and stores polygons
/// coplanar with that plane.
#[derive(Debug, Clone, Default)]
pub struct BspNode {
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree (polygons in front of plane)
    front: Option<Box<BspNode>>,
    /// Back subtree (polygons behind plane)
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a new BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::default();
        root.add_polygons(polygons);
        root
    }

    /// Inserts polygons into the tree, splitting them along the way.
    ///
    /// Iterative construction with a work stack; raw pointers give each
    /// work item mutable access to its node.
    pub fn add_polygons(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }

        type WorkItem = (*mut BspNode, Vec<Polygon>);
        let mut stack: Vec<WorkItem> = vec![(self as *mut BspNode, polygons)];

        while let Some((node_ptr, mut polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            // Safety: every pointer on the stack refers to a node owned by
            // this tree, and each node appears at most once
            let node = unsafe { &mut *node_ptr };

            // A fresh node takes its plane from the first polygon it sees
            let plane = match node.polygons.first() {
                Some(splitter) => splitter.plane(),
                None => {
                    let splitter = polys.swap_remove(0);
                    let plane = splitter.plane();
                    node.polygons.push(splitter);
                    plane
                }
            };

            let estimated_size = polys.len() / 2 + 1;
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front_polys = Vec::with_capacity(estimated_size);
            let mut back_polys = Vec::with_capacity(estimated_size);

            for poly in &polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }

            // Coplanar polygons live at this node, either orientation
            node.polygons.extend(coplanar_front);
            node.polygons.extend(coplanar_back);

            if !front_polys.is_empty() {
                let front = node.front.get_or_insert_with(Default::default);
                stack.push((front.as_mut() as *mut BspNode, front_polys));
            }
            if !back_polys.is_empty() {
                let back = node.back.get_or_insert_with(Default::default);
                stack.push((back.as_mut() as *mut BspNode, back_polys));
            }
        }
    }

    /// Inverts this BSP tree (flips all polygons and swaps subtrees).
    ///
    /// Used for implementing difference and intersection operations.
    pub fn invert(&mut self) {
        let mut stack: Vec<*mut BspNode> = vec![self as *mut BspNode];

        while let Some(node_ptr) = stack.pop() {
            // Safety: all pointers refer to nodes of this tree, each pushed once
            let node = unsafe { &mut *node_ptr };

            for poly in &mut node.polygons {
                poly.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(ref mut front) = node.front {
                stack.push(front.as_mut() as *mut BspNode);
            }
            if let Some(ref mut back) = node.back {
                stack.push(back.as_mut() as *mut BspNode);
            }
        }
    }

    /// Clips polygons to this BSP tree.
    ///
    /// Removes the parts of the polygons that are inside the solid this
    /// tree represents, returning the parts that are outside.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = match node.polygons.first() {
                Some(splitter) => splitter.plane(),
                None => {
                    result.extend(polys);
                    continue;
                }
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front_polys = Vec::new();
            let mut back_polys = Vec::new();

            for poly in &polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }

            // Coplanar polygons follow the side they face
            front_polys.extend(coplanar_front);
            back_polys.extend(coplanar_back);

            if let Some(ref front) = node.front {
                stack.push((front.as_ref(), front_polys));
            } else {
                result.extend(front_polys);
            }

            // No back subtree means back polygons are inside the solid
            if let Some(ref back) = node.back {
                stack.push((back.as_ref(), back_polys));
            }
        }

        result
    }

    /// Clips this tree's polygons to another tree.
    ///
    /// Removes the parts of this tree's polygons that are inside the
    /// other tree's solid.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<*mut BspNode> = vec![self as *mut BspNode];

        while let Some(node_ptr) = stack.pop() {
            // Safety: all pointers refer to nodes of this tree, each pushed once
            let node = unsafe { &mut *node_ptr };

            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));

            if let Some(ref mut front) = node.front {
                stack.push(front.as_mut() as *mut BspNode);
            }
            if let Some(ref mut back) = node.back {
                stack.push(back.as_mut() as *mut BspNode);
            }
        }
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());

            if let Some(ref front) = node.front {
                stack.push(front.as_ref());
            }
            if let Some(ref back) = node.back {
                stack.push(back.as_ref());
            }
        }

        result
    }

    /// Returns the number of polygons in this tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        self.all_polygons().len()
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop so deep trees cannot overflow the stack
        let mut stack = Vec::new();

        if let Some(front) = self.front.take() {
            stack.push(front);
        }
        if let Some(back) = self.back.take() {
            stack.push(back);
        }

        while let Some(mut node) = stack.pop() {
            // Detach children before the node drops, so dropping it
            // cannot recurse
            if let Some(front) = node.front.take() {
                stack.push(front);
            }
            if let Some(back) = node.back.take() {
                stack.push(back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn make_triangle_polygon(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspNode::new(vec![]);
        assert_eq!(tree.polygon_count(), 0);
    }

    #[test]
    fn test_bsp_new_multiple() {
        let polys = vec![
            make_triangle_polygon(0.0),
            make_triangle_polygon(1.0),
            make_triangle_polygon(-1.0),
        ];
        let tree = BspNode::new(polys);
        assert_eq!(tree.polygon_count(), 3);
    }

    #[test]
    fn test_bsp_invert() {
        let poly = make_triangle_polygon(0.0);
        let original_normal = poly.plane().normal();

        let mut tree = BspNode::new(vec![poly]);
        tree.invert();

        let inverted_normal = tree.polygons[0].plane().normal();
        assert!((original_normal + inverted_normal).length() < 0.001);
    }

    #[test]
    fn test_bsp_clip_polygons_front() {
        let tree = BspNode::new(vec![make_triangle_polygon(0.0)]);

        // A polygon in front of the tree's only plane survives
        let result = tree.clip_polygons(vec![make_triangle_polygon(1.0)]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_bsp_clip_polygons_back() {
        let tree = BspNode::new(vec![make_triangle_polygon(0.0)]);

        // A polygon behind it is inside the half-space and is removed
        let result = tree.clip_polygons(vec![make_triangle_polygon(-1.0)]);
        assert_eq!(result.len(), 0);
    }
}
