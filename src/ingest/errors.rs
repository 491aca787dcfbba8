use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown node type `{tag}` at {location}")]
    UnknownType { tag: String, location: String },

    #[error("malformed node at {location}: {message}")]
    Malformed { location: String, message: String },

    #[error("range {start}..{end} at {location} does not fit the source")]
    BadRange {
        location: String,
        start: usize,
        end: usize,
    },

    #[error("node at {location} has a range but no source was supplied")]
    MissingSource { location: String },
}
