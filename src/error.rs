//! Crate-level error types.

use std::fmt;

/// Errors produced by the molmesh crate.
///
/// Only hard preconditions surface here. Degenerate input (empty splines,
/// unsupported slot counts, rings without paths) degrades to empty
/// geometry plus a logged warning instead.
#[derive(Debug)]
pub enum MolmeshError {
    /// Swept cross-sections do not share one vertex count.
    BaseShapeSizeMismatch {
        /// Index of the first offending cross-section.
        index: usize,
        /// Vertex count of the first cross-section.
        expected: usize,
        /// Vertex count found at `index`.
        found: usize,
    },
    /// A per-frame shape list matches neither one shape nor the frame count.
    ShapeCountMismatch {
        /// Number of shapes supplied.
        shapes: usize,
        /// Number of frames along the curve.
        frames: usize,
    },
    /// A helix axis direction is the zero vector.
    DegenerateAxis,
    /// Residue code not present in the amino-acid catalog.
    UnknownResidue(String),
    /// Operation exists as an interface only.
    Unsupported(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Geometry could not be serialized for export.
    Export(String),
}

impl fmt::Display for MolmeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseShapeSizeMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "the base shapes must not differ in size: shape {index} has \
                 {found} vertices, expected {expected}"
            ),
            Self::ShapeCountMismatch { shapes, frames } => write!(
                f,
                "expected 1 or {frames} base shapes, got {shapes}"
            ),
            Self::DegenerateAxis => {
                write!(f, "axis direction must not be the zero vector")
            }
            Self::UnknownResidue(code) => {
                write!(f, "unknown residue: {code}")
            }
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Export(msg) => write!(f, "export error: {msg}"),
        }
    }
}

impl std::error::Error for MolmeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolmeshError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
