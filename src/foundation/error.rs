use std::path::{Path, PathBuf};

/// Convenience result type used across Panelizer.
pub type PanelizerResult<T> = Result<T, PanelizerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is recoverable at the work-unit boundary: the unit processor turns it into a
/// `.failed` sidecar and moves on to the next unit.
#[derive(thiserror::Error, Debug)]
pub enum PanelizerError {
    /// Invalid user-provided configuration or geometry input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source file could not be decoded as an image.
    #[error("cannot identify image file '{path}': {source}")]
    Decode {
        /// Source file that failed to decode.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// A rendered panel could not be encoded.
    #[error("encode error for '{path}': {source}")]
    Encode {
        /// Destination file.
        path: PathBuf,
        /// Encoder error.
        #[source]
        source: image::ImageError,
    },

    /// OS-level IO failure (permissions, disk full, ...).
    #[error("io error at '{path}': {source}")]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanelizerError {
    /// Build a [`PanelizerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanelizerError::Decode`] value.
    pub fn decode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`PanelizerError::Encode`] value.
    pub fn encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`PanelizerError::Io`] value.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
