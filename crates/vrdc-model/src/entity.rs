use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{IdentifierLevel, TableRole};
use crate::field::FieldDefinition;
use crate::setting::BenefitSetting;

/// One `table.column AS alias` unit of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionEntry {
    pub level: IdentifierLevel,
    pub table: TableRole,
    pub source_column: String,
    pub alias_column: String,
}

impl From<&FieldDefinition> for ProjectionEntry {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            level: field.level,
            table: field.table,
            source_column: field.source_column.clone(),
            alias_column: field.alias_column.clone(),
        }
    }
}

/// One choice of a single source field per present identifier level.
///
/// Levels absent from the setting have no key. Iteration follows the
/// canonical level order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermutationRecord {
    choices: BTreeMap<IdentifierLevel, FieldDefinition>,
}

impl PermutationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field chosen for `field.level`, replacing any earlier choice.
    pub fn insert(&mut self, field: FieldDefinition) {
        self.choices.insert(field.level, field);
    }

    pub fn get(&self, level: IdentifierLevel) -> Option<&FieldDefinition> {
        self.choices.get(&level)
    }

    pub fn contains(&self, level: IdentifierLevel) -> bool {
        self.choices.contains_key(&level)
    }

    pub fn levels(&self) -> impl Iterator<Item = IdentifierLevel> + '_ {
        self.choices.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IdentifierLevel, &FieldDefinition)> {
        self.choices.iter().map(|(level, field)| (*level, field))
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl FromIterator<FieldDefinition> for PermutationRecord {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        let mut record = PermutationRecord::new();
        for field in iter {
            record.insert(field);
        }
        record
    }
}

/// Output column names of the canonical entity schema, in order.
pub const CANONICAL_COLUMNS: [&str; 5] = ["source_setting_name", "TAX_NUM", "CCN", "onpi", "pnpi"];

/// One row of the cross-setting entity schema.
///
/// Always five fields. A level the setting lacks is `None` here, never a
/// missing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalEntityRow {
    #[serde(rename = "source_setting_name")]
    pub setting: BenefitSetting,
    #[serde(rename = "TAX_NUM")]
    pub tax_id: Option<String>,
    #[serde(rename = "CCN")]
    pub ccn: Option<String>,
    #[serde(rename = "onpi")]
    pub org_npi: String,
    #[serde(rename = "pnpi")]
    pub personal_npi: String,
}

impl CanonicalEntityRow {
    /// Canonical column name for a level.
    pub fn column_for(level: IdentifierLevel) -> &'static str {
        match level {
            IdentifierLevel::TaxId => CANONICAL_COLUMNS[1],
            IdentifierLevel::Ccn => CANONICAL_COLUMNS[2],
            IdentifierLevel::OrgNpi => CANONICAL_COLUMNS[3],
            IdentifierLevel::PersonalNpi => CANONICAL_COLUMNS[4],
        }
    }

    /// Nullable levels may be absent from a setting; the NPI levels may not.
    pub fn is_nullable(level: IdentifierLevel) -> bool {
        !level.is_npi()
    }
}
