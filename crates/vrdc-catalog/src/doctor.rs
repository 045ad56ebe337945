#![deny(unsafe_code)]

use serde::Serialize;

use vrdc_model::{FieldDefinition, IdentifierLevel, SettingDefinition, SettingFormat};

use crate::registry::SettingCatalog;

/// Serializable overview of a loaded catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub schema: String,
    pub schema_version: u32,
    pub catalog_schema_version: u32,
    pub source: String,
    pub fingerprint: String,
    pub counts: CatalogCounts,
    pub settings: Vec<SettingSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub settings: usize,
    pub fields: usize,
    pub permutations: usize,
}

/// Per-level field counts for one setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingSummary {
    pub setting: String,
    pub format: SettingFormat,
    pub levels: Vec<LevelSummary>,
    pub permutations: usize,
}

/// Levels a setting lacks keep a zero-count entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub level: IdentifierLevel,
    pub count: usize,
    pub fields: Vec<String>,
}

impl SettingSummary {
    pub fn from_definition(definition: &SettingDefinition) -> Self {
        let levels: Vec<LevelSummary> = IdentifierLevel::ALL
            .into_iter()
            .map(|level| {
                let fields: Vec<String> = definition
                    .alternatives(level)
                    .into_iter()
                    .map(FieldDefinition::qualified_name)
                    .collect();
                LevelSummary {
                    level,
                    count: fields.len(),
                    fields,
                }
            })
            .collect();
        let permutations = levels
            .iter()
            .filter(|summary| summary.count > 0)
            .map(|summary| summary.count)
            .product();
        Self {
            setting: definition.name().to_string(),
            format: definition.format,
            levels,
            permutations,
        }
    }

    pub fn level(&self, level: IdentifierLevel) -> Option<&LevelSummary> {
        self.levels.iter().find(|summary| summary.level == level)
    }
}

impl CatalogReport {
    pub fn from_catalog(catalog: &SettingCatalog) -> Self {
        let settings: Vec<SettingSummary> = catalog
            .iter()
            .map(SettingSummary::from_definition)
            .collect();
        Self {
            schema: "vrdc.catalog-doctor".to_string(),
            schema_version: 1,
            catalog_schema_version: catalog.schema_version(),
            source: catalog.origin().to_string(),
            fingerprint: catalog.fingerprint().to_string(),
            counts: CatalogCounts {
                settings: settings.len(),
                fields: catalog.iter().map(|d| d.fields.len()).sum(),
                permutations: settings.iter().map(|s| s.permutations).sum(),
            },
            settings,
        }
    }
}
