#![deny(unsafe_code)]

use std::path::PathBuf;

use vrdc_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog: {message}")]
    Validation { message: String },

    #[error("embedded catalog failed to load: {message}")]
    Embedded { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True when a lookup named a setting the catalog does not know.
    pub fn is_unknown_setting(&self) -> bool {
        matches!(self, Self::Model(ModelError::UnknownSetting { .. }))
    }
}
