//! # Mesh Errors
//!
//! Error types for mesh construction operations.

use thiserror::Error;

/// Errors that can occur during mesh construction.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A parameter is outside its documented bound
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A face references out-of-range or repeated vertex indices
    #[error("Invalid face: {message}")]
    InvalidFace { message: String },

    /// An edge set does not form a simple loop or chain
    #[error("Invalid boundary: {message}")]
    InvalidBoundary { message: String },

    /// A boolean or solidify operand has topology the algorithm cannot resolve
    #[error("Non-manifold input: {message}")]
    NonManifoldInput { message: String },
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates an invalid face error.
    pub fn invalid_face(message: impl Into<String>) -> Self {
        Self::InvalidFace {
            message: message.into(),
        }
    }

    /// Creates an invalid boundary error.
    pub fn invalid_boundary(message: impl Into<String>) -> Self {
        Self::InvalidBoundary {
            message: message.into(),
        }
    }

    /// Creates a non-manifold input error.
    pub fn non_manifold(message: impl Into<String>) -> Self {
        Self::NonManifoldInput {
            message: message.into(),
        }
    }
}
