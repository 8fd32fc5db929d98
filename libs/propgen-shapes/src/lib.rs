//! # Propgen Shapes
//!
//! Parametric prop builders on top of `propgen-mesh`. Each module
//! covers one object family and exposes a serde-derived parameter
//! struct plus a `build_*` function that validates the parameters,
//! assembles the mesh from primitives and operators, and applies the
//! final [`Placement`].
//!
//! ## Usage
//!
//! ```rust
//! use propgen_shapes::{build_table, TableParams};
//!
//! let table = build_table(&TableParams::default())?;
//! assert!(table.face_count() > 0);
//! # Ok::<(), propgen_mesh::MeshError>(())
//! ```

pub mod balcony;
pub mod blade;
pub mod building;
pub mod door;
pub mod placement;
pub mod plank_bridge;
pub mod playground;
pub mod rock_wall;
pub mod shuriken;
pub mod slide;
pub mod stairs;
pub mod star;
pub mod table;
pub mod traffic_cone;
pub mod windows;

pub use placement::Placement;

pub use balcony::{build_balcony, BalconyBuild, BalconyParams};
pub use blade::{build_blade, BladeParams, GripParams, HiltParams};
pub use building::{build_building, BuildingParams, CornerBevel, RoofStyle};
pub use door::{build_door, DoorBuild, DoorGlass, DoorParams, DoorStyle, SwingDirection};
pub use plank_bridge::{build_plank_bridge, PlankBridgeParams};
pub use playground::{build_playground, PlaygroundParams};
pub use rock_wall::{build_rock_wall, RockWallParams};
pub use shuriken::{build_shuriken, ShurikenParams};
pub use slide::{build_slide, SlideParams, SlideStyle};
pub use stairs::{build_stairs, StairsParams, StairsStyle};
pub use star::{build_star, StarParams};
pub use table::{build_table, TableParams};
pub use traffic_cone::{build_traffic_cone, TrafficConeParams};
pub use windows::{build_windows, WindowsBuild, WindowsParams};
