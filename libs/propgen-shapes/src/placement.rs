//! # Placement
//!
//! Final rigid placement shared by every builder: Euler rotation about
//! the origin, then translation. Builders apply it last, after all
//! boolean and bevel work, so operators always run in build space.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::transform::bake_placement;
use propgen_mesh::MeshBuffer;

/// Where a built prop ends up in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Translation applied after rotation
    pub location: DVec3,
    /// Euler rotation in radians, applied X then Y then Z about the origin
    pub rotation: DVec3,
}

impl Placement {
    /// Applies this placement to a finished mesh.
    pub fn apply(&self, mesh: &mut MeshBuffer) {
        bake_placement(mesh, self.location, self.rotation);
    }
}
