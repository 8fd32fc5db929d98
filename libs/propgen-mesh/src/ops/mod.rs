//! # Topological Operators
//!
//! Operators that change mesh topology: duplication, edge-loop extrusion,
//! bevel, solidify, and CSG booleans.

pub mod bevel;
pub mod boolean;
pub mod duplicate;
pub mod extrude;
pub mod solidify;

pub use bevel::{bevel, BevelParams, BevelSelection};
pub use boolean::{difference, intersection, union};
pub use duplicate::{duplicate_faces, Duplicated};
pub use extrude::{extrude_edge_loop, ExtrudedLoop};
pub use solidify::solidify;
