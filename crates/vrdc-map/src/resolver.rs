//! Presence-aware field lookup.

use vrdc_catalog::{SettingCatalog, SettingSummary};
use vrdc_model::{BenefitSetting, FieldDefinition, IdentifierLevel, SettingDefinition, TableRole};

use crate::error::Result;

/// Every setting that defines one level, with its pooled alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFields<'a> {
    pub setting: BenefitSetting,
    pub fields: Vec<&'a FieldDefinition>,
}

/// Read-only view over a [`SettingCatalog`].
///
/// Absent (setting, level, table) combinations resolve to an empty `Vec`.
/// The only failure is naming a setting the catalog does not hold.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    catalog: &'a SettingCatalog,
}

impl<'a> FieldResolver<'a> {
    pub fn new(catalog: &'a SettingCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a SettingCatalog {
        self.catalog
    }

    pub fn definition(&self, setting: &str) -> Result<&'a SettingDefinition> {
        Ok(self.catalog.definition_for(setting)?)
    }

    /// Fields for `(setting, level, table)` exactly as stored, in catalog order.
    pub fn resolve(
        &self,
        setting: &str,
        level: IdentifierLevel,
        table: TableRole,
    ) -> Result<Vec<&'a FieldDefinition>> {
        let definition = self.definition(setting)?;
        Ok(definition.fields_for(level, table).collect())
    }

    /// Claim alternatives followed by line alternatives.
    pub fn alternatives(
        &self,
        setting: &str,
        level: IdentifierLevel,
    ) -> Result<Vec<&'a FieldDefinition>> {
        Ok(self.definition(setting)?.alternatives(level))
    }

    pub fn present_levels(&self, setting: &str) -> Result<Vec<IdentifierLevel>> {
        Ok(self.definition(setting)?.present_levels())
    }

    /// Cross-setting view of one level. Settings without it are omitted.
    pub fn level_fields(&self, level: IdentifierLevel) -> Vec<LevelFields<'a>> {
        self.catalog
            .iter()
            .filter(|definition| definition.has_level(level))
            .map(|definition| LevelFields {
                setting: definition.setting,
                fields: definition.alternatives(level),
            })
            .collect()
    }

    pub fn summary(&self, setting: &str) -> Result<SettingSummary> {
        Ok(SettingSummary::from_definition(self.definition(setting)?))
    }
}
