//! # Element Model
//!
//! Beamline elements as closed tagged variants. Per-key payloads (bend
//! angles, pipe radii, wiggler radii) live inside the variant that needs
//! them, so an element can never carry a payload that does not match its key.

use serde::{Deserialize, Serialize};

/// Global floor pose of an element's reference point.
///
/// `(x, y, z)` in lattice coordinates, `z` along the beam; `theta`, `phi`,
/// `psi` are the yaw, pitch and roll angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub theta: f64,
    pub phi: f64,
    pub psi: f64,
}

impl FloorPose {
    /// Creates a pose from position and angles.
    pub fn new(x: f64, y: f64, z: f64, theta: f64, phi: f64, psi: f64) -> Self {
        Self {
            x,
            y,
            z,
            theta,
            phi,
            psi,
        }
    }

    /// Returns one floor coordinate by axis.
    pub fn coordinate(&self, axis: FloorAxis) -> f64 {
        match axis {
            FloorAxis::X => self.x,
            FloorAxis::Y => self.y,
            FloorAxis::Z => self.z,
        }
    }
}

/// Positional floor axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorAxis {
    X,
    Y,
    Z,
}

/// Sector bend payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BendParams {
    /// Total bend angle in radians.
    pub angle: f64,
    /// Entrance edge angle in radians.
    pub e1: f64,
    /// Exit edge angle in radians.
    pub e2: f64,
}

/// Vacuum pipe payload. All dimensions are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeParams {
    pub radius_x: f64,
    pub radius_y: f64,
    pub thickness: f64,
}

/// Wiggler payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WigglerParams {
    pub radius_x: f64,
    pub radius_y: f64,
}

/// Element type tag with its type-specific payload.
///
/// Keys without a dedicated variant are kept verbatim in [`ElementKind::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Marker,
    Drift,
    Pipe(PipeParams),
    SBend(BendParams),
    Quadrupole,
    Sextupole,
    Wiggler(WigglerParams),
    Lcavity,
    RfCavity,
    Solenoid,
    EGun,
    ECollimator,
    RCollimator,
    EmField,
    Instrument,
    Other(String),
}

impl ElementKind {
    /// Builds a kind from an upper-case key and the three type-specific
    /// table fields. Fields a key does not use are ignored.
    pub fn from_key(key: &str, custom: [f64; 3]) -> Self {
        let [c1, c2, c3] = custom;
        match key {
            "MARKER" => Self::Marker,
            "DRIFT" => Self::Drift,
            "PIPE" => Self::Pipe(PipeParams {
                radius_x: c1,
                radius_y: c2,
                thickness: c3,
            }),
            "SBEND" => Self::SBend(BendParams {
                angle: c1,
                e1: c2,
                e2: c3,
            }),
            "QUADRUPOLE" => Self::Quadrupole,
            "SEXTUPOLE" => Self::Sextupole,
            "WIGGLER" => Self::Wiggler(WigglerParams {
                radius_x: c1,
                radius_y: c2,
            }),
            "LCAVITY" => Self::Lcavity,
            "RFCAVITY" => Self::RfCavity,
            "SOLENOID" => Self::Solenoid,
            "E_GUN" => Self::EGun,
            "ECOLLIMATOR" => Self::ECollimator,
            "RCOLLIMATOR" => Self::RCollimator,
            "EM_FIELD" => Self::EmField,
            "INSTRUMENT" => Self::Instrument,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the table key for this kind.
    pub fn key(&self) -> &str {
        match self {
            Self::Marker => "MARKER",
            Self::Drift => "DRIFT",
            Self::Pipe(_) => "PIPE",
            Self::SBend(_) => "SBEND",
            Self::Quadrupole => "QUADRUPOLE",
            Self::Sextupole => "SEXTUPOLE",
            Self::Wiggler(_) => "WIGGLER",
            Self::Lcavity => "LCAVITY",
            Self::RfCavity => "RFCAVITY",
            Self::Solenoid => "SOLENOID",
            Self::EGun => "E_GUN",
            Self::ECollimator => "ECOLLIMATOR",
            Self::RCollimator => "RCOLLIMATOR",
            Self::EmField => "EM_FIELD",
            Self::Instrument => "INSTRUMENT",
            Self::Other(key) => key,
        }
    }

    /// Returns the three type-specific table fields, zero where unused.
    pub fn custom_fields(&self) -> [f64; 3] {
        match self {
            Self::SBend(b) => [b.angle, b.e1, b.e2],
            Self::Pipe(p) => [p.radius_x, p.radius_y, p.thickness],
            Self::Wiggler(w) => [w.radius_x, w.radius_y, 0.0],
            _ => [0.0; 3],
        }
    }
}

/// Reference to an external CAD asset embedded in an element description
/// as `3DMODEL=<name>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadModelRef {
    pub name: String,
    pub extension: String,
}

impl CadModelRef {
    /// Marker that introduces the reference inside a description.
    pub const TAG: &'static str = "3DMODEL=";

    /// Extracts the first CAD reference from a description.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lattice_table::CadModelRef;
    ///
    /// let cad = CadModelRef::parse("dipole 3DMODEL=B1_magnet.blend rev2").unwrap();
    /// assert_eq!(cad.name, "B1_magnet");
    /// assert_eq!(cad.file_name(), "B1_magnet.blend");
    /// ```
    pub fn parse(descrip: &str) -> Option<Self> {
        let start = descrip.find(Self::TAG)? + Self::TAG.len();
        let token = descrip[start..]
            .split(|c: char| c.is_whitespace() || c == ';' || c == '"')
            .next()?;
        let (name, extension) = token.rsplit_once('.')?;
        if name.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Returns `<name>.<ext>`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

/// One beamline element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    /// Index of the element in the originating lattice.
    pub index: i64,
    pub floor: FloorPose,
    /// Element length `L`, non-negative.
    pub length: f64,
    pub kind: ElementKind,
    pub descrip: String,
}

impl Element {
    /// Creates an element with an empty description.
    pub fn new(name: impl Into<String>, kind: ElementKind, length: f64) -> Self {
        Self {
            name: name.into(),
            index: 0,
            floor: FloorPose::default(),
            length,
            kind,
            descrip: String::new(),
        }
    }

    /// Sets the floor pose.
    pub fn with_floor(mut self, floor: FloorPose) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the lattice index.
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = index;
        self
    }

    /// Sets the description.
    pub fn with_descrip(mut self, descrip: impl Into<String>) -> Self {
        self.descrip = descrip.into();
        self
    }

    /// Returns the table key.
    pub fn key(&self) -> &str {
        self.kind.key()
    }

    /// Returns the CAD asset referenced by the description, if any.
    pub fn cad_model(&self) -> Option<CadModelRef> {
        CadModelRef::parse(&self.descrip)
    }
}
