//! # Configuration Constants
//!
//! Centralized constants for the lattice visualization pipeline. All element
//! scales, palette colours, sampling counts and tolerances are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Scale**: Element-type aperture scale table
//! - **Color**: Element-type palette
//! - **Sampling**: Cross-section and longitudinal sample counts
//! - **Policy**: Zero-length and punch defaults
//! - **Orbit**: Orbit tube defaults

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Threshold below which a bend angle or bend length is treated as zero.
///
/// An SBEND with `|angle|` or `|L|` under this value is drawn as a straight
/// rectangular box instead of a swept arc.
pub const DEGENERATE_BEND_EPSILON: f64 = 1e-5;

// =============================================================================
// SCALE CONSTANTS
// =============================================================================

/// Global multiplier applied to every entry of [`ELE_X_SCALE`].
pub const ELE_X_SCALE_FACTOR: f64 = 50.0;

/// Scale used for keys that have no entry in [`ELE_X_SCALE`].
pub const FALLBACK_X_SCALE: f64 = 1.0;

/// Per element type aperture scale, before [`ELE_X_SCALE_FACTOR`].
///
/// # Example
///
/// ```rust
/// use config::constants::ELE_X_SCALE;
///
/// assert!(ELE_X_SCALE.iter().any(|(key, _)| *key == "SBEND"));
/// ```
pub const ELE_X_SCALE: &[(&str, f64)] = &[
    ("MARKER", 0.001),
    ("E_GUN", 0.4),
    ("PIPE", 0.01),
    ("DRIFT", 0.01),
    ("ECOLLIMATOR", 0.03),
    ("RCOLLIMATOR", 0.03),
    ("SBEND", 0.02),
    ("QUADRUPOLE", 0.03),
    ("SEXTUPOLE", 0.02),
    ("LCAVITY", 0.1),
    ("RFCAVITY", 0.5),
    ("SOLENOID", 0.1),
    ("WIGGLER", 0.04),
    ("EM_FIELD", 0.1),
    ("INSTRUMENT", 0.05),
];

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Color for keys missing from [`ELE_COLOR`] (black, opaque).
pub const DEFAULT_ELEMENT_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Per element type palette, RGB in `[0.0, 1.0]`.
pub const ELE_COLOR: &[(&str, [f32; 3])] = &[
    ("PIPE", [1.0, 1.0, 1.0]),
    ("E_GUN", [0.5, 0.5, 0.5]),
    ("SBEND", [1.0, 0.0, 0.0]),
    ("QUADRUPOLE", [0.0, 0.0, 1.0]),
    ("LCAVITY", [0.0, 1.0, 0.0]),
    ("RFCAVITY", [0.0, 1.0, 0.0]),
    ("SOLENOID", [1.0, 0.0, 1.0]),
    ("EM_FIELD", [1.0, 0.0, 0.5]),
    ("SEXTUPOLE", [1.0, 1.0, 0.0]),
    ("WIGGLER", [1.0, 0.4, 0.0]),
    ("INSTRUMENT", [0.0, 0.0, 0.0]),
];

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Longitudinal samples for a curved element (entrance and exit inclusive).
pub const BEND_SAMPLES: usize = 20;

/// Longitudinal samples for a straight element.
pub const STRAIGHT_SAMPLES: usize = 2;

/// Points on an elliptical cross-section.
pub const ELLIPSE_POINTS: usize = 30;

/// Fold symmetry of a quadrupole aperture (8 points).
pub const QUADRUPOLE_FOLD: usize = 4;

/// Fold symmetry of a sextupole aperture (12 points).
pub const SEXTUPOLE_FOLD: usize = 6;

// =============================================================================
// POLICY CONSTANTS
// =============================================================================

/// Length substituted for zero-length point-like elements.
pub const POINT_LIKE_LENGTH: f64 = 1e-3;

/// Keys treated as point-like by the default zero-length policy.
pub const POINT_LIKE_KEYS: &[&str] = &["MARKER"];

/// Punch meshes are this much longer than the pipe they cut.
pub const PUNCH_LENGTH_FACTOR: f64 = 1.1;

// =============================================================================
// ORBIT CONSTANTS
// =============================================================================

/// Default orbit tube radius in metres (12 mm).
pub const ORBIT_TUBE_RADIUS: f64 = 0.012;

/// Points on each orbit tube ring.
pub const ORBIT_SECTION_POINTS: usize = 16;

/// Electron rest energy in eV, used for beam-size rings.
pub const ELECTRON_MC2: f64 = 0.511e6;

/// Multiplier from one sigma beam size to drawn ring radius.
pub const BEAM_SIZE_SIGMAS: f64 = 10.0;

/// Orbit colours by final total energy in MeV.
pub const ENERGY_COLOR: &[(i64, [f32; 3])] = &[
    (42, [1.0, 0.0, 0.0]),
    (78, [1.0, 0.5, 0.0]),
    (114, [0.0, 1.0, 0.0]),
    (150, [0.0, 0.0, 1.0]),
    (6, [1.0, 1.0, 1.0]),
];

/// Orbit colour when the final energy is not in [`ENERGY_COLOR`].
pub const DEFAULT_ORBIT_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Looks up the unscaled aperture scale for an element key.
///
/// Returns `None` when the key has no entry; callers decide the fallback.
///
/// # Example
///
/// ```rust
/// use config::constants::scale_lookup;
///
/// assert_eq!(scale_lookup("PIPE"), Some(0.01));
/// assert_eq!(scale_lookup("MIRROR"), None);
/// ```
pub fn scale_lookup(key: &str) -> Option<f64> {
    ELE_X_SCALE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, scale)| *scale)
}

/// Looks up the palette colour for an element key as opaque RGBA.
///
/// # Example
///
/// ```rust
/// use config::constants::color_lookup;
///
/// assert_eq!(color_lookup("SBEND"), Some([1.0, 0.0, 0.0, 1.0]));
/// assert_eq!(color_lookup("MARKER"), None);
/// ```
pub fn color_lookup(key: &str) -> Option<[f32; 4]> {
    ELE_COLOR
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, [r, g, b])| [*r, *g, *b, 1.0])
}
