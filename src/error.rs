use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the meshkit library.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors related to the geometry store's index invariants.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "mesh '{mesh}' triangle {triangle} references vertex {index}, \
         but the store holds {vertex_count} vertices"
    )]
    IndexOutOfBounds {
        mesh: String,
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Errors related to reading and writing the text format.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("mesh name {name:?} contains a line break")]
    InvalidName { name: String },

    #[error("line {line}: face record appears before any group record")]
    FaceOutsideGroup { line: usize },

    #[error("document has no file path")]
    NoPath,
}

/// Errors reported by a tetrahedralization engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported engine options: {0}")]
    Unsupported(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("degenerate input: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;
