//! # Plane for BSP Operations
//!
//! Plane representation with point classification.

use glam::DVec3;

use config::constants::BSP_EPSILON;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Has vertices on both sides of the plane.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (unit length).
    normal: DVec3,
    /// Distance from origin along normal.
    w: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Create plane from three points.
    ///
    /// Points should be in counter-clockwise order when viewed from front.
    /// Returns None for degenerate (collinear) triples.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        let length = cross.length();
        if length < BSP_EPSILON {
            return None;
        }

        let normal = cross / length;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Get the plane normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Get the plane distance.
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Flip the plane (reverse normal).
    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > BSP_EPSILON {
            Classification::Front
        } else if dist < -BSP_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }
}

// =============================================================================
// TESTS
// =============================================================================
