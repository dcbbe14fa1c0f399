//! Errors and warnings produced while loading OBJ geometry.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal OBJ load failure. No mesh is produced when one of these is returned.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("Failed to open OBJ file {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("Face references position {raw} on line {line}, but only {count} positions are defined")]
    PositionIndexOutOfRange { line: usize, raw: i64, count: usize },
    #[error("Too many vertices in OBJ (>{})", u32::MAX)]
    TooManyVertices,
    #[error("OBJ produced an empty mesh ({vertices} vertices, {indices} indices)")]
    EmptyResult { vertices: usize, indices: usize },
}

/// Discriminant of [`ObjError`], for callers that only need to classify a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjErrorKind {
    FileUnreadable,
    Read,
    PositionIndexOutOfRange,
    TooManyVertices,
    EmptyResult,
}

impl ObjError {
    pub fn kind(&self) -> ObjErrorKind {
        match self {
            Self::FileUnreadable { .. } => ObjErrorKind::FileUnreadable,
            Self::Read { .. } => ObjErrorKind::Read,
            Self::PositionIndexOutOfRange { .. } => ObjErrorKind::PositionIndexOutOfRange,
            Self::TooManyVertices => ObjErrorKind::TooManyVertices,
            Self::EmptyResult { .. } => ObjErrorKind::EmptyResult,
        }
    }
}

pub type ObjResult<T> = Result<T, ObjError>;

/// Recoverable condition. The offending line (or part of it) is skipped and
/// the load continues. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObjWarning {
    #[error("Malformed '{tag}' record on line {line}: expected {expected} numeric fields")]
    MalformedNumericLine {
        line: usize,
        tag: &'static str,
        expected: usize,
    },
    #[error("Ignoring unsupported directive '{directive}' on line {line}")]
    UnsupportedDirective { line: usize, directive: String },
    #[error("Dropping face on line {line}: {vertices} vertices, need at least 3")]
    DegenerateFace { line: usize, vertices: usize },
    #[error("Face on line {line} has {count} vertices; truncated to {max}")]
    FaceVertexOverflow { line: usize, count: usize, max: usize },
    #[error("Skipping line {line}: {len} bytes exceeds the {max} byte limit")]
    LineTooLong { line: usize, len: usize, max: usize },
}

impl ObjWarning {
    /// Line the warning was recorded for.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedNumericLine { line, .. }
            | Self::UnsupportedDirective { line, .. }
            | Self::DegenerateFace { line, .. }
            | Self::FaceVertexOverflow { line, .. }
            | Self::LineTooLong { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_matches_variant() {
        let err = ObjError::PositionIndexOutOfRange {
            line: 4,
            raw: 99,
            count: 10,
        };
        assert_eq!(err.kind(), ObjErrorKind::PositionIndexOutOfRange);
        assert!(err.to_string().contains("99"));

        let err = ObjError::EmptyResult {
            vertices: 0,
            indices: 0,
        };
        assert_eq!(err.kind(), ObjErrorKind::EmptyResult);
    }

    #[test]
    fn warning_reports_line() {
        let w = ObjWarning::DegenerateFace {
            line: 12,
            vertices: 2,
        };
        assert_eq!(w.line(), 12);
        assert!(w.to_string().contains("line 12"));
    }
}
