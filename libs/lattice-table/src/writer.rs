//! # Table Writer
//!
//! Writes elements in the same row layout [`crate::parser`] reads.

use crate::element::Element;
use std::io::Write;

/// Header line written at the top of every table.
pub const HEADER: &str =
    "# ele_name, ix_ele, x, y, z, theta ,phi, psi, key, L, custom1, custom2, custom3, descrip";

/// Formats one element as a table row (no trailing newline).
///
/// Floats use Rust's shortest round-trip formatting, so reading the row back
/// reproduces the element exactly.
///
/// # Example
///
/// ```rust
/// use lattice_table::{parse_row, write_row, Element, ElementKind};
///
/// let ele = Element::new("D1", ElementKind::Drift, 1.25);
/// let row = write_row(&ele);
/// assert_eq!(parse_row(&row, 2).unwrap(), ele);
/// ```
pub fn write_row(element: &Element) -> String {
    let f = &element.floor;
    let [c1, c2, c3] = element.kind.custom_fields();
    format!(
        "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
        element.name,
        element.index,
        f.x,
        f.y,
        f.z,
        f.theta,
        f.phi,
        f.psi,
        element.key(),
        element.length,
        c1,
        c2,
        c3,
        element.descrip
    )
}

/// Writes the header and one row per element.
pub fn write_table<W: Write>(mut writer: W, elements: &[Element]) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for element in elements {
        writeln!(writer, "{}", write_row(element))?;
    }
    Ok(())
}
