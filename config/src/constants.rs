//! # Configuration Constants
//!
//! Centralized constants for the propgen toolkit. All geometry tolerances
//! and resolution defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance. This value is chosen to balance precision with
/// robustness against floating-point errors.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex deduplication and degeneracy checks.
///
/// Slightly larger tolerance used when deciding whether a face has
/// collapsed to zero area (after point-merges) or whether two vertices
/// occupy the same position.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// fn vertices_coincide(v1: [f64; 3], v2: [f64; 3]) -> bool {
///     let dx = v1[0] - v2[0];
///     let dy = v1[1] - v2[1];
///     let dz = v1[2] - v2[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() < VERTEX_MERGE_EPSILON
/// }
///
/// assert!(vertices_coincide([0.0; 3], [1e-9, 0.0, 0.0]));
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Epsilon for BSP plane-side classification.
///
/// Coarser than [`EPSILON`] on purpose: boolean clipping must treat
/// nearly-coplanar polygons as coplanar or the tree degenerates into
/// sliver polygons.
///
/// # Example
///
/// ```rust
/// use config::constants::BSP_EPSILON;
///
/// let signed_distance: f64 = 1e-6;
/// let coplanar = signed_distance.abs() < BSP_EPSILON;
/// assert!(coplanar);
/// ```
pub const BSP_EPSILON: f64 = 1e-5;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of segments for circular cross-sections.
///
/// Used by builders whose parameter structs expose a segment count with a
/// sensible default (table legs, cone bodies, playground supports).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SEGMENTS;
///
/// assert_eq!(DEFAULT_SEGMENTS, 32);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum legal number of segments for circular cross-sections.
///
/// Anything below this cannot enclose area; parameter validation rejects
/// it rather than clamping.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SEGMENTS;
///
/// let segments = 2u32;
/// assert!(segments < MIN_SEGMENTS);
/// ```
pub const MIN_SEGMENTS: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_ordering() {
        assert!(EPSILON < VERTEX_MERGE_EPSILON);
        assert!(VERTEX_MERGE_EPSILON < BSP_EPSILON);
    }

    #[test]
    fn test_segment_defaults() {
        assert!(MIN_SEGMENTS <= DEFAULT_SEGMENTS);
        assert_eq!(MIN_SEGMENTS, 3);
    }
}
