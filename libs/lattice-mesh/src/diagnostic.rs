//! # Diagnostics
//!
//! Non-fatal notes produced while building meshes: fallbacks and policy
//! decisions the caller may want to surface. Each diagnostic is also sent
//! to the `log` facade when it is reported.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Element key has no dedicated profile; generic ellipse used.
    UnknownKey,
    /// Element key has no scale entry; fallback scale used.
    MissingScale,
    /// Bend angle or length is negligible; drawn straight.
    DegenerateBend,
    /// Zero-length point-like element given a substitute length.
    LengthSubstituted,
    /// Zero-length element skipped.
    ZeroLengthSkipped,
    /// Element mesh build failed.
    BuildFailed,
}

/// A diagnostic message tied to one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Name of the element the note refers to.
    pub element: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            element: element.into(),
            message: message.into(),
        }
    }

    pub fn info(
        code: DiagnosticCode,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Info, code, element, message)
    }

    pub fn warning(
        code: DiagnosticCode,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, element, message)
    }

    /// Logs the diagnostic and hands it back for collection.
    pub fn report(self) -> Self {
        match self.severity {
            Severity::Info => log::debug!("{}: {}", self.element, self.message),
            Severity::Warning => log::warn!("{}: {}", self.element, self.message),
        }
        self
    }
}
