//! # Config Crate
//!
//! Centralized configuration constants for the lattice visualization pipeline.
//! Scale factors, palette colours, sampling densities and tolerances are
//! defined here so the table loader and the mesh kernel agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{scale_lookup, ELE_X_SCALE_FACTOR};
//!
//! // Known keys resolve to their tabulated scale
//! let quad = scale_lookup("QUADRUPOLE").unwrap();
//! assert!((quad * ELE_X_SCALE_FACTOR - 1.5).abs() < 1e-12);
//!
//! // Unknown keys are reported as missing
//! assert!(scale_lookup("CRYSTAL").is_none());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Pure Data**: No I/O, no global mutable state
//! - **Documented**: Every constant states where it is consumed

pub mod constants;
