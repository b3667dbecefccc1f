//! # Style Table
//!
//! Element-type → aperture scale and colour lookup. Keys resolve through
//! the per-table overrides first and the `config` tables second. A table is
//! customised before a batch starts, then shared immutably by every mesh
//! build of that batch.

use config::constants::{
    color_lookup, scale_lookup, DEFAULT_ELEMENT_COLOR, ELE_X_SCALE_FACTOR, FALLBACK_X_SCALE,
};
use std::collections::HashMap;

/// Result of a scale lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLookup {
    /// Scale after the global factor, in metres.
    pub value: f64,
    /// True when the key had no entry and the fallback was used.
    pub fallback: bool,
}

/// Key → scale and key → colour configuration.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::StyleTable;
///
/// let style = StyleTable::default().with_scale("MIRROR", 0.02);
/// assert!((style.x_scale("MIRROR").value - 1.0).abs() < 1e-12);
/// assert!(style.x_scale("CRYSTAL").fallback);
/// ```
#[derive(Debug, Clone)]
pub struct StyleTable {
    scale_factor: f64,
    fallback_scale: f64,
    /// Scale overrides, unscaled.
    scales: HashMap<String, f64>,
    /// Colour overrides.
    colors: HashMap<String, [f32; 4]>,
    default_color: [f32; 4],
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            scale_factor: ELE_X_SCALE_FACTOR,
            fallback_scale: FALLBACK_X_SCALE,
            scales: HashMap::new(),
            colors: HashMap::new(),
            default_color: DEFAULT_ELEMENT_COLOR,
        }
    }
}

impl StyleTable {
    /// Sets or replaces the unscaled scale for a key.
    pub fn with_scale(mut self, key: impl Into<String>, scale: f64) -> Self {
        self.scales.insert(key.into(), scale);
        self
    }

    /// Sets the global factor applied to every scale.
    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        self.scale_factor = factor;
        self
    }

    /// Sets or replaces the colour for a key.
    pub fn with_color(mut self, key: impl Into<String>, color: [f32; 4]) -> Self {
        self.colors.insert(key.into(), color);
        self
    }

    /// Returns the global scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Looks up the aperture scale of a key, global factor applied.
    ///
    /// Keys without an entry use the fallback scale (1 before the factor).
    pub fn x_scale(&self, key: &str) -> ScaleLookup {
        match self.scales.get(key).copied().or_else(|| scale_lookup(key)) {
            Some(scale) => ScaleLookup {
                value: self.scale_factor * scale,
                fallback: false,
            },
            None => ScaleLookup {
                value: self.scale_factor * self.fallback_scale,
                fallback: true,
            },
        }
    }

    /// Returns the palette colour of a key, black when absent.
    pub fn color(&self, key: &str) -> [f32; 4] {
        self.colors
            .get(key)
            .copied()
            .or_else(|| color_lookup(key))
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_applies_factor() {
        let style = StyleTable::default();
        let lookup = style.x_scale("SBEND");
        assert!(!lookup.fallback);
        assert!((lookup.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_scale_falls_back_to_one() {
        let style = StyleTable::default();
        let lookup = style.x_scale("CRYSTAL");
        assert!(lookup.fallback);
        assert!((lookup.value - ELE_X_SCALE_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_custom_factor() {
        let style = StyleTable::default().with_scale_factor(1.0);
        assert!((style.x_scale("QUADRUPOLE").value - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_colors() {
        let style = StyleTable::default().with_color("MARKER", [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(style.color("QUADRUPOLE"), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(style.color("MARKER"), [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(style.color("DRIFT"), DEFAULT_ELEMENT_COLOR);
    }

    #[test]
    fn test_override_wins_over_table() {
        let style = StyleTable::default()
            .with_scale("QUADRUPOLE", 0.1)
            .with_color("SBEND", [0.0, 1.0, 0.0, 1.0]);
        let lookup = style.x_scale("QUADRUPOLE");
        assert!(!lookup.fallback);
        assert!((lookup.value - 5.0).abs() < 1e-12);
        assert_eq!(style.color("SBEND"), [0.0, 1.0, 0.0, 1.0]);
        // Untouched keys still come from the config tables
        assert!((style.x_scale("SBEND").value - 1.0).abs() < 1e-12);
        assert_eq!(style.color("WIGGLER"), [1.0, 0.4, 0.0, 1.0]);
    }
}
