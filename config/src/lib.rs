//! # Config Crate
//!
//! Centralized configuration constants for the propgen toolkit.
//! All magic numbers and tunable tolerances are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_SEGMENTS};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Use the shared circle resolution default
//! let segments: Option<u32> = None;
//! assert_eq!(segments.unwrap_or(DEFAULT_SEGMENTS), 32);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
