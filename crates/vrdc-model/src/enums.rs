//! Type-safe enumerations for the entity catalog.
//!
//! Identifier levels, table roles, setting formats and alias rules appear as
//! lowercase strings in the catalog file and on the command line. These enums
//! keep them closed so that a typo in catalog data is a load error rather
//! than a silently empty lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Identifier level of an entity column.
///
/// Declaration order is the canonical order used everywhere a level sequence
/// is emitted: tax id, certification number, organizational NPI, personal NPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierLevel {
    /// TIN/EIN of the billing entity.
    TaxId,
    /// CMS certification number of a facility.
    Ccn,
    /// Organizational National Provider Identifier.
    OrgNpi,
    /// Individual practitioner National Provider Identifier.
    PersonalNpi,
}

impl IdentifierLevel {
    /// All levels in canonical order.
    pub const ALL: [IdentifierLevel; 4] = [
        IdentifierLevel::TaxId,
        IdentifierLevel::Ccn,
        IdentifierLevel::OrgNpi,
        IdentifierLevel::PersonalNpi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierLevel::TaxId => "tax_id",
            IdentifierLevel::Ccn => "ccn",
            IdentifierLevel::OrgNpi => "org_npi",
            IdentifierLevel::PersonalNpi => "personal_npi",
        }
    }

    /// Returns true for the two NPI levels.
    pub fn is_npi(&self) -> bool {
        matches!(self, IdentifierLevel::OrgNpi | IdentifierLevel::PersonalNpi)
    }
}

impl fmt::Display for IdentifierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierLevel {
    type Err = ModelError;

    /// Accepts the canonical names plus the long NPI spellings used in older
    /// notebooks (`organizational_npi`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tax_id" => Ok(IdentifierLevel::TaxId),
            "ccn" => Ok(IdentifierLevel::Ccn),
            "org_npi" | "organizational_npi" => Ok(IdentifierLevel::OrgNpi),
            "personal_npi" => Ok(IdentifierLevel::PersonalNpi),
            _ => Err(ModelError::UnknownLevel(s.to_string())),
        }
    }
}

/// Which table of a setting's claim/line pair a column lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    /// Claim-level table (`<setting>_claims_MM`).
    Claim,
    /// Claim-line or revenue-center table.
    Line,
}

impl TableRole {
    /// Claim first, then line.
    pub const ALL: [TableRole; 2] = [TableRole::Claim, TableRole::Line];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableRole::Claim => "claim",
            TableRole::Line => "line",
        }
    }

    /// SQL table alias used in projection entries.
    pub fn sql_prefix(&self) -> &'static str {
        match self {
            TableRole::Claim => "CLAIM",
            TableRole::Line => "CLINE",
        }
    }

    /// Prefix applied to aliases of table-prefixed fields.
    pub fn alias_prefix(&self) -> &'static str {
        match self {
            TableRole::Claim => "claim_",
            TableRole::Line => "cline_",
        }
    }

    pub fn other(&self) -> TableRole {
        match self {
            TableRole::Claim => TableRole::Line,
            TableRole::Line => TableRole::Claim,
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claim" => Ok(TableRole::Claim),
            "line" | "cline" => Ok(TableRole::Line),
            _ => Err(ModelError::UnknownTable(s.to_string())),
        }
    }
}

/// Claim file layout of a benefit setting.
///
/// Institutional settings (inpatient, outpatient, SNF, hospice, HHA) share a
/// claim/revenue-center schema; carrier and DME use claim/line tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingFormat {
    Institutional,
    NonInstitutional,
}

impl SettingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingFormat::Institutional => "institutional",
            SettingFormat::NonInstitutional => "non_institutional",
        }
    }

    pub fn is_institutional(&self) -> bool {
        matches!(self, SettingFormat::Institutional)
    }

    /// Table-name infix of the line-level table.
    pub fn line_table_kind(&self) -> &'static str {
        match self {
            SettingFormat::Institutional => "revenue",
            SettingFormat::NonInstitutional => "line",
        }
    }
}

impl fmt::Display for SettingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "institutional" => Ok(SettingFormat::Institutional),
            "non_institutional" | "non-institutional" => Ok(SettingFormat::NonInstitutional),
            _ => Err(ModelError::UnknownFormat(s.to_string())),
        }
    }
}

/// How a field's alias is derived from its source column.
///
/// Renaming is opt-in: a column that appears on both tables is only
/// disambiguated when the catalog tags it, never because names collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasRule {
    /// Alias equals the source column.
    #[default]
    Source,
    /// Alias is the source column prefixed with `claim_` or `cline_`.
    TablePrefixed,
}

impl AliasRule {
    pub fn alias_for(&self, table: TableRole, source_column: &str) -> String {
        match self {
            AliasRule::Source => source_column.to_string(),
            AliasRule::TablePrefixed => format!("{}{}", table.alias_prefix(), source_column),
        }
    }
}
