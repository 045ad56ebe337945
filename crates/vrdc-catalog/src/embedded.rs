//! Catalog data embedded at compile time.
//!
//! The default catalog ships inside the binary so that lookups never depend
//! on the working directory. A replacement file can still be supplied at run
//! time (see [`crate::paths`]).

/// Entity field catalog, schema version 1.
pub const ENTITY_CATALOG: &str = include_str!("../data/entity_catalog.toml");

/// Label reported as the source of the embedded catalog.
pub const EMBEDDED_LABEL: &str = "embedded:entity_catalog.toml";
