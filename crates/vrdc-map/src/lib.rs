//! Field resolution, select-list assembly and permutation plans over the
//! VRDC entity catalog.
//!
//! Everything here is a pure function of a [`vrdc_catalog::SettingCatalog`]
//! and a setting name. Nothing is cached and nothing mutates the catalog.

#![deny(unsafe_code)]

pub mod canonical;
pub mod error;
pub mod extract;
pub mod naming;
pub mod permutation;
pub mod projection;
pub mod resolver;

pub use canonical::{CanonicalPlan, canonical_plans};
pub use error::{MapError, Result};
pub use extract::{ExtractSummary, MonthlyExtract, MonthlyExtracts, monthly_extracts};
pub use naming::{TableNames, database_name};
pub use permutation::{PermutationEngine, Permutations, permutation_count};
pub use projection::{
    AliasStyle, SELECT_LIST_SEPARATOR, SelectListBuilder, TableQualifier, format_entry,
    format_projection, projection_for,
};
pub use resolver::{FieldResolver, LevelFields};
