#![deny(unsafe_code)]

pub mod doctor;
pub mod embedded;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;

pub use crate::doctor::{CatalogReport, LevelSummary, SettingSummary};
pub use crate::error::CatalogError;
pub use crate::paths::{CATALOG_ENV_VAR, CatalogSource};
pub use crate::registry::SettingCatalog;
