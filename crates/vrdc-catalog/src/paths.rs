//! Catalog source resolution.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::registry::SettingCatalog;

/// Environment variable for overriding the catalog file.
pub const CATALOG_ENV_VAR: &str = "VRDC_CATALOG_PATH";

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    Path(PathBuf),
}

impl CatalogSource {
    /// Resolve the catalog source.
    ///
    /// Resolution order:
    /// 1. an explicit path (the `--catalog` flag)
    /// 2. `VRDC_CATALOG_PATH` environment variable
    /// 3. the embedded catalog
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with(explicit, std::env::var_os(CATALOG_ENV_VAR).map(PathBuf::from))
    }

    fn resolve_with(explicit: Option<&Path>, env: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return CatalogSource::Path(path.to_path_buf());
        }
        match env {
            Some(path) if !path.as_os_str().is_empty() => CatalogSource::Path(path),
            _ => CatalogSource::Embedded,
        }
    }

    /// Load the catalog. The embedded catalog is borrowed from the
    /// process-wide static; a file is parsed and validated on every call.
    pub fn load(&self) -> Result<Cow<'static, SettingCatalog>, CatalogError> {
        match self {
            CatalogSource::Embedded => SettingCatalog::embedded().map(Cow::Borrowed),
            CatalogSource::Path(path) => SettingCatalog::load(path).map(Cow::Owned),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Embedded => f.write_str("embedded"),
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let source = CatalogSource::resolve_with(
            Some(Path::new("flag.toml")),
            Some(PathBuf::from("env.toml")),
        );
        assert_eq!(source, CatalogSource::Path(PathBuf::from("flag.toml")));
    }

    #[test]
    fn env_then_embedded() {
        assert_eq!(
            CatalogSource::resolve_with(None, Some(PathBuf::from("env.toml"))),
            CatalogSource::Path(PathBuf::from("env.toml"))
        );
        assert_eq!(
            CatalogSource::resolve_with(None, Some(PathBuf::new())),
            CatalogSource::Embedded
        );
        assert_eq!(CatalogSource::resolve_with(None, None), CatalogSource::Embedded);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = CatalogSource::Path(PathBuf::from("/nonexistent/vrdc/catalog.toml"));
        assert!(matches!(source.load(), Err(CatalogError::Io { .. })));
    }
}
