//! # Propgen Mesh
//!
//! Mesh buffer, primitives, and operators for procedural prop generation.
//! Shape builders in `propgen-shapes` assemble props from these pieces.
//!
//! ## Architecture
//!
//! ```text
//! primitives (box, cylinder, ...) → MeshBuffer → transform / ops → prop
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust with no native dependencies:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Bevel**: sector splitting with profile strips
//! - **Solidify**: normal-offset inner shell with rim bridging
//! - **Primitives**: direct mesh construction
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use propgen_mesh::primitives::create_box;
//! use propgen_mesh::ops::solidify;
//!
//! let panel = create_box(DVec3::new(2.0, 1.0, 0.1), true)?;
//! let walled = solidify(&panel, 0.02)?;
//! assert_eq!(walled.face_count(), 12);
//! # Ok::<(), propgen_mesh::MeshError>(())
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod transform;

pub use error::MeshError;
pub use mesh::MeshBuffer;
pub use ops::boolean::{difference, intersection, union};
