//! Field and setting definitions.
//!
//! A [`SettingDefinition`] is the flattened form of the catalog's
//! setting -> level -> table -> fields structure. Absence is explicit: a
//! (level, table) pair with no fields simply yields nothing from
//! [`SettingDefinition::fields_for`], and [`SettingDefinition::has_fields`]
//! is the presence predicate callers check before emitting anything.

use serde::{Deserialize, Serialize};

use crate::enums::{AliasRule, IdentifierLevel, SettingFormat, TableRole};
use crate::setting::BenefitSetting;

/// One source column and the alias it is exposed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Column name in the source table.
    pub source_column: String,
    /// Column name in the combined projection.
    pub alias_column: String,
    /// Table the column lives on.
    pub table: TableRole,
    /// Identifier level the column carries.
    pub level: IdentifierLevel,
    /// Rule the alias was derived with.
    #[serde(default)]
    pub alias_rule: AliasRule,
}

impl FieldDefinition {
    /// Build a field, deriving the alias from `alias_rule`.
    pub fn new(
        level: IdentifierLevel,
        table: TableRole,
        source_column: impl Into<String>,
        alias_rule: AliasRule,
    ) -> Self {
        let source_column = source_column.into();
        let alias_column = alias_rule.alias_for(table, &source_column);
        Self {
            source_column,
            alias_column,
            table,
            level,
            alias_rule,
        }
    }

    /// `CLAIM.COLUMN` / `CLINE.COLUMN`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table.sql_prefix(), self.source_column)
    }

    pub fn is_renamed(&self) -> bool {
        self.alias_column != self.source_column
    }
}

/// Every identifier field of one benefit setting, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDefinition {
    pub setting: BenefitSetting,
    pub format: SettingFormat,
    pub fields: Vec<FieldDefinition>,
}

impl SettingDefinition {
    pub fn new(setting: BenefitSetting, fields: Vec<FieldDefinition>) -> Self {
        Self {
            setting,
            format: setting.format(),
            fields,
        }
    }

    /// Lowercase setting name.
    pub fn name(&self) -> &'static str {
        self.setting.as_str()
    }

    pub fn is_institutional(&self) -> bool {
        self.format.is_institutional()
    }

    /// Fields for one level on one table, in catalog order.
    pub fn fields_for(
        &self,
        level: IdentifierLevel,
        table: TableRole,
    ) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(move |field| field.level == level && field.table == table)
    }

    pub fn has_fields(&self, level: IdentifierLevel, table: TableRole) -> bool {
        self.fields_for(level, table).next().is_some()
    }

    pub fn has_level(&self, level: IdentifierLevel) -> bool {
        TableRole::ALL
            .iter()
            .any(|table| self.has_fields(level, *table))
    }

    /// Levels with at least one field, in canonical order.
    pub fn present_levels(&self) -> Vec<IdentifierLevel> {
        IdentifierLevel::ALL
            .into_iter()
            .filter(|level| self.has_level(*level))
            .collect()
    }

    /// Claim alternatives followed by line alternatives for one level.
    pub fn alternatives(&self, level: IdentifierLevel) -> Vec<&FieldDefinition> {
        TableRole::ALL
            .iter()
            .flat_map(|table| self.fields_for(level, *table))
            .collect()
    }
}
