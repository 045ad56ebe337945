//! Entity identifier data model for VRDC claims benefit settings.
//!
//! Types here are plain values: the catalog crate builds them once from the
//! embedded catalog data and everything downstream reads them.

pub mod entity;
pub mod enums;
pub mod error;
pub mod field;
pub mod period;
pub mod setting;

pub use entity::{CANONICAL_COLUMNS, CanonicalEntityRow, PermutationRecord, ProjectionEntry};
pub use enums::{AliasRule, IdentifierLevel, SettingFormat, TableRole};
pub use error::{ModelError, Result};
pub use field::{FieldDefinition, SettingDefinition};
pub use period::{MonthIter, MonthRange, YearMonth};
pub use setting::BenefitSetting;
