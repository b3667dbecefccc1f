//! # Table Parser
//!
//! Reads the comma-separated element table:
//!
//! ```text
//! name, index, x, y, z, theta, phi, psi, key, L, custom1, custom2, custom3, descrip
//! ```
//!
//! The first line is a header and is always skipped. Blank lines are ignored.
//! `custom1..custom3` are interpreted by key (see [`ElementKind::from_key`]);
//! columns a key does not use are not parsed, so they may hold anything.
//! Any text after the fourteenth column is kept as part of `descrip`.
//!
//! Numbers must be finite. `L` and the PIPE and WIGGLER dimensions must
//! also be non-negative; anything else is [`ParseError::OutOfRange`].
//!
//! ## Error policy
//!
//! [`parse_table`] aborts on the first malformed row. [`parse_table_lenient`]
//! skips malformed rows and returns their errors alongside the parsed
//! elements. Both report rows by 1-based line number.

use crate::element::{Element, ElementKind, FloorPose};
use crate::error::{ParseError, ParseResult};
use std::io::BufRead;
use std::path::Path;

/// Number of fixed columns in a table row.
pub const FIELD_COUNT: usize = 14;

/// Parses one table row.
///
/// # Arguments
///
/// * `line` - Raw row text
/// * `row` - 1-based line number used in errors
///
/// # Example
///
/// ```rust
/// use lattice_table::{parse_row, ElementKind};
///
/// let ele = parse_row("B1, 4, 0, 0, 2, 0, 0, 0, SBEND, 2.0, 0.2, 0.01, 0.02, ", 2).unwrap();
/// assert!(matches!(ele.kind, ElementKind::SBend(b) if b.angle == 0.2));
/// ```
pub fn parse_row(line: &str, row: usize) -> ParseResult<Element> {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, ',').collect();
    if fields.len() < FIELD_COUNT {
        return Err(ParseError::FieldCount {
            row,
            found: fields.len(),
            expected: FIELD_COUNT,
        });
    }

    let name = fields[0].trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName { row });
    }

    let index = fields[1]
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseError::invalid_number(row, "index", fields[1].trim()))?;

    let number = |position: usize, field: &'static str| -> ParseResult<f64> {
        let raw = fields[position].trim();
        let value = raw
            .parse::<f64>()
            .map_err(|_| ParseError::invalid_number(row, field, raw))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseError::out_of_range(row, field, value))
        }
    };
    let non_negative = |position: usize, field: &'static str| -> ParseResult<f64> {
        let value = number(position, field)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(ParseError::out_of_range(row, field, value))
        }
    };

    let floor = FloorPose {
        x: number(2, "x")?,
        y: number(3, "y")?,
        z: number(4, "z")?,
        theta: number(5, "theta")?,
        phi: number(6, "phi")?,
        psi: number(7, "psi")?,
    };
    let key = fields[8].trim().to_uppercase();
    let length = non_negative(9, "L")?;

    let custom = match key.as_str() {
        "SBEND" => [number(10, "angle")?, number(11, "e1")?, number(12, "e2")?],
        "PIPE" => [
            non_negative(10, "radius_x")?,
            non_negative(11, "radius_y")?,
            non_negative(12, "thickness")?,
        ],
        "WIGGLER" => [
            non_negative(10, "radius_x")?,
            non_negative(11, "radius_y")?,
            0.0,
        ],
        _ => [0.0; 3],
    };

    Ok(Element {
        name: name.to_string(),
        index,
        floor,
        length,
        kind: ElementKind::from_key(&key, custom),
        descrip: fields[13].trim().to_string(),
    })
}

/// Parses a whole table, aborting on the first malformed row.
pub fn parse_table(text: &str) -> ParseResult<Vec<Element>> {
    data_rows(text)
        .map(|(row, line)| parse_row(line, row))
        .collect()
}

/// Parses a whole table, skipping malformed rows.
///
/// Returns the parsed elements and one error per skipped row.
pub fn parse_table_lenient(text: &str) -> (Vec<Element>, Vec<ParseError>) {
    let mut elements = Vec::new();
    let mut skipped = Vec::new();
    for (row, line) in data_rows(text) {
        match parse_row(line, row) {
            Ok(element) => elements.push(element),
            Err(err) => {
                log::warn!("skipping malformed table row: {err}");
                skipped.push(err);
            }
        }
    }
    (elements, skipped)
}

/// Reads and parses a table from a buffered reader, aborting on the first
/// malformed row.
pub fn read_table<R: BufRead>(reader: R) -> ParseResult<Vec<Element>> {
    let mut elements = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let row = i + 1;
        if row == 1 || line.trim().is_empty() {
            continue;
        }
        elements.push(parse_row(&line, row)?);
    }
    log::debug!("read {} elements from table", elements.len());
    Ok(elements)
}

/// Loads a table file from disk.
pub fn load_table(path: impl AsRef<Path>) -> ParseResult<Vec<Element>> {
    let file = std::fs::File::open(path)?;
    read_table(std::io::BufReader::new(file))
}

/// Yields `(line_number, line)` for every non-blank line after the header.
fn data_rows<'a>(text: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}
