#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;

use vrdc_model::{BenefitSetting, FieldDefinition, ModelError, SettingDefinition, TableRole};

use crate::embedded::{EMBEDDED_LABEL, ENTITY_CATALOG};
use crate::error::CatalogError;
use crate::hash::sha256_hex;
use crate::manifest::{CatalogFile, SettingEntry};

const CATALOG_SCHEMA: &str = "vrdc.entity-catalog";
const CATALOG_SCHEMA_VERSION: u32 = 1;

static EMBEDDED: LazyLock<Result<SettingCatalog, String>> = LazyLock::new(|| {
    SettingCatalog::from_toml_str(ENTITY_CATALOG, EMBEDDED_LABEL).map_err(|e| e.to_string())
});

/// Read-only mapping from benefit setting to its identifier fields.
///
/// Built once from validated catalog data. Nothing mutates it afterwards, so
/// a shared reference can be read from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingCatalog {
    settings: Vec<SettingDefinition>,
    origin: String,
    fingerprint: String,
    schema_version: u32,
}

impl SettingCatalog {
    /// The catalog compiled into this build.
    pub fn embedded() -> Result<&'static SettingCatalog, CatalogError> {
        EMBEDDED.as_ref().map_err(|message| CatalogError::Embedded {
            message: message.clone(),
        })
    }

    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Parse and validate catalog text. `origin` labels errors and reports.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents).map_err(|e| CatalogError::Toml {
            origin: origin.to_string(),
            source: e,
        })?;
        validate_header(&file)?;

        let mut seen: BTreeSet<BenefitSetting> = BTreeSet::new();
        let mut settings = Vec::with_capacity(file.settings.len());
        for entry in &file.settings {
            let definition = build_setting(entry)?;
            if !seen.insert(definition.setting) {
                return Err(CatalogError::validation(format!(
                    "duplicate setting '{}'",
                    entry.name
                )));
            }
            settings.push(definition);
        }

        let missing: Vec<&str> = BenefitSetting::ALL
            .iter()
            .filter(|setting| !seen.contains(setting))
            .map(BenefitSetting::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::validation(format!(
                "missing settings: {}",
                missing.join(", ")
            )));
        }

        let catalog = Self {
            settings,
            origin: origin.to_string(),
            fingerprint: sha256_hex(contents.as_bytes()),
            schema_version: file.catalog.schema_version,
        };
        debug!(
            origin = %catalog.origin,
            settings = catalog.settings.len(),
            fields = catalog.settings.iter().map(|s| s.fields.len()).sum::<usize>(),
            fingerprint = %catalog.fingerprint,
            "entity catalog loaded"
        );
        Ok(catalog)
    }

    /// Definition for a setting name. Exact, case-sensitive match.
    pub fn definition_for(&self, name: &str) -> Result<&SettingDefinition, CatalogError> {
        let setting: BenefitSetting = name.parse()?;
        self.get(setting).ok_or_else(|| {
            CatalogError::Model(ModelError::UnknownSetting {
                name: name.to_string(),
                available: self.all_setting_names().join(", "),
            })
        })
    }

    pub fn get(&self, setting: BenefitSetting) -> Option<&SettingDefinition> {
        self.settings
            .iter()
            .find(|definition| definition.setting == setting)
    }

    /// Setting names in catalog order.
    pub fn all_setting_names(&self) -> Vec<&'static str> {
        self.settings.iter().map(SettingDefinition::name).collect()
    }

    pub fn settings(&self) -> &[SettingDefinition] {
        &self.settings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SettingDefinition> {
        self.settings.iter()
    }

    /// Path or label the catalog was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// SHA-256 of the catalog source text.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }
}

impl<'a> IntoIterator for &'a SettingCatalog {
    type Item = &'a SettingDefinition;
    type IntoIter = std::slice::Iter<'a, SettingDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

fn validate_header(file: &CatalogFile) -> Result<(), CatalogError> {
    if file.catalog.schema != CATALOG_SCHEMA {
        return Err(CatalogError::validation(format!(
            "unsupported schema: {}",
            file.catalog.schema
        )));
    }
    if file.catalog.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::validation(format!(
            "unsupported schema_version: {}",
            file.catalog.schema_version
        )));
    }
    Ok(())
}

fn build_setting(entry: &SettingEntry) -> Result<SettingDefinition, CatalogError> {
    if entry.name != entry.name.to_lowercase() {
        return Err(CatalogError::validation(format!(
            "setting name '{}' must be lowercase",
            entry.name
        )));
    }
    let setting: BenefitSetting = entry.name.parse().map_err(|_| {
        CatalogError::validation(format!(
            "unknown setting '{}' (expected one of: {})",
            entry.name,
            BenefitSetting::available_names()
        ))
    })?;
    if entry.format != setting.format() {
        return Err(CatalogError::validation(format!(
            "setting '{}' declared {} but is {}",
            entry.name,
            entry.format,
            setting.format()
        )));
    }

    let mut triples = BTreeSet::new();
    let mut fields = Vec::with_capacity(entry.fields.len());
    for raw in &entry.fields {
        if !is_sql_identifier(&raw.column) {
            return Err(CatalogError::validation(format!(
                "setting '{}': column '{}' is not a valid SQL identifier",
                entry.name, raw.column
            )));
        }
        if !triples.insert((raw.level, raw.table, raw.column.as_str())) {
            return Err(CatalogError::validation(format!(
                "setting '{}': duplicate {} field {} on {} table",
                entry.name, raw.level, raw.column, raw.table
            )));
        }
        fields.push(FieldDefinition::new(
            raw.level,
            raw.table,
            raw.column.clone(),
            raw.alias_rule,
        ));
    }

    check_prefixed_counterparts(&entry.name, &fields)?;
    check_unique_aliases(&entry.name, &fields)?;

    Ok(SettingDefinition::new(setting, fields))
}

/// A table-prefixed field must be mirrored on the other table by a field
/// with the same level and column that is also table-prefixed.
fn check_prefixed_counterparts(
    setting: &str,
    fields: &[FieldDefinition],
) -> Result<(), CatalogError> {
    for field in fields.iter().filter(|f| f.is_renamed()) {
        let counterpart = fields.iter().find(|other| {
            other.level == field.level
                && other.table == field.table.other()
                && other.source_column == field.source_column
        });
        match counterpart {
            Some(other) if other.alias_rule == field.alias_rule => {}
            Some(_) => {
                return Err(CatalogError::validation(format!(
                    "setting '{setting}': {} is table_prefixed on the {} table but not on the {} table",
                    field.source_column,
                    field.table,
                    field.table.other()
                )));
            }
            None => {
                return Err(CatalogError::validation(format!(
                    "setting '{setting}': table_prefixed field {} on the {} table has no {} counterpart",
                    field.source_column,
                    field.table,
                    field.table.other()
                )));
            }
        }
    }
    Ok(())
}

fn check_unique_aliases(setting: &str, fields: &[FieldDefinition]) -> Result<(), CatalogError> {
    let mut by_table: BTreeMap<TableRole, BTreeMap<&str, &FieldDefinition>> = BTreeMap::new();
    for field in fields {
        let aliases = by_table.entry(field.table).or_default();
        if let Some(existing) = aliases.insert(field.alias_column.as_str(), field) {
            return Err(CatalogError::validation(format!(
                "setting '{setting}': alias {} on the {} table is used by both {} and {}",
                field.alias_column, field.table, existing.level, field.level
            )));
        }
    }
    Ok(())
}

fn is_sql_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_identifier_rules() {
        assert!(is_sql_identifier("TAX_NUM"));
        assert!(is_sql_identifier("_x1"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("1ABC"));
        assert!(!is_sql_identifier("TAX NUM"));
        assert!(!is_sql_identifier("CLAIM.TAX_NUM"));
    }

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = SettingCatalog::embedded().expect("embedded catalog");
        assert_eq!(catalog.settings().len(), BenefitSetting::ALL.len());
        assert_eq!(catalog.schema_version(), 1);
        assert_eq!(catalog.fingerprint().len(), 64);
    }
}
