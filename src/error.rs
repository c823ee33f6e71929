//! # Error Types
//!
//! Failures the editor core reports to its caller. Index errors leave the
//! scene untouched, file errors leave both scene and camera untouched.
//! Malformed numbers inside a scene file are not errors at all: they are
//! recovered as zero and listed in [`DecodeReport`](crate::io::vox::DecodeReport).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    /// A command addressed an object past the end of the scene.
    #[error("object index {index} is out of range (scene has {len} objects)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The save/load target could not be opened.
    #[error("cannot open scene file {}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An integer that does not name one of the seven primitives.
    #[error("unknown primitive code {0}")]
    UnknownPrimitive(i64),
}

pub type Result<T> = std::result::Result<T, SceneError>;

impl SceneError {
    pub(crate) fn file_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SceneError::FileUnavailable {
            path: path.into(),
            source,
        }
    }
}
