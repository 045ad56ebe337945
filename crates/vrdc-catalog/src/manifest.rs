#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use vrdc_model::{AliasRule, IdentifierLevel, SettingFormat, TableRole};

/// Catalog file as written on disk, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub catalog: CatalogHeader,
    #[serde(default)]
    pub settings: Vec<SettingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingEntry {
    pub name: String,
    pub format: SettingFormat,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub level: IdentifierLevel,
    pub table: TableRole,
    pub column: String,
    #[serde(default)]
    pub alias_rule: AliasRule,
}
