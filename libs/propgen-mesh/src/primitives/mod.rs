//! # Primitives
//!
//! Mesh generation for primitive shapes (box, cylinder/cone, polygon
//! outlines, icosphere).

pub mod cuboid;
pub mod cylinder;
pub mod icosphere;
pub mod polygon;

pub use cuboid::create_box;
pub use cylinder::create_cylinder;
pub use icosphere::create_icosphere;
pub use polygon::{create_regular_polygon, create_star_polygon};
