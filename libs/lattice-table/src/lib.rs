//! # Lattice Table
//!
//! Beamline element model and the comma-separated element table it is
//! exchanged in.
//!
//! ## Architecture
//!
//! ```text
//! element table (text) → lattice-table (Vec<Element>) → lattice-mesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lattice_table::{parse_table, ElementKind};
//!
//! let text = "# header\nQ1, 1, 0, 0, 0, 0, 0, 0, QUADRUPOLE, 0.3, 0, 0, 0, \n";
//! let lattice = parse_table(text).unwrap();
//! assert_eq!(lattice[0].kind, ElementKind::Quadrupole);
//! ```

pub mod element;
pub mod error;
pub mod parser;
pub mod writer;

pub use element::{
    BendParams, CadModelRef, Element, ElementKind, FloorAxis, FloorPose, PipeParams, WigglerParams,
};
pub use error::{ParseError, ParseResult};
pub use parser::{load_table, parse_row, parse_table, parse_table_lenient, read_table};
pub use writer::{write_row, write_table};
