//! Select-list assembly and SQL fragment formatting.
//!
//! Every textual fragment goes through [`format_entry`]. The structured
//! [`ProjectionEntry`] values are the source of truth; strings are derived
//! from them and never parsed back.

use std::borrow::Cow;

use vrdc_catalog::SettingCatalog;
use vrdc_model::{IdentifierLevel, ProjectionEntry, SettingDefinition, TableRole};

use crate::error::Result;
use crate::naming::TableNames;
use crate::resolver::FieldResolver;

/// Separator the select list is joined with.
pub const SELECT_LIST_SEPARATOR: &str = ",\n    ";

/// How aliases are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasStyle {
    /// The alias stored in the catalog.
    #[default]
    Catalog,
    /// `onpi` for organizational NPI entries, `pnpi` for personal NPI
    /// entries. Other levels keep their catalog alias.
    SimplifiedNpi,
}

impl AliasStyle {
    pub fn alias_for<'e>(&self, entry: &'e ProjectionEntry) -> &'e str {
        match (self, entry.level) {
            (AliasStyle::SimplifiedNpi, IdentifierLevel::OrgNpi) => "onpi",
            (AliasStyle::SimplifiedNpi, IdentifierLevel::PersonalNpi) => "pnpi",
            _ => &entry.alias_column,
        }
    }
}

/// What the column is qualified with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableQualifier {
    /// `CLAIM` / `CLINE`.
    #[default]
    Role,
    /// `<database>.<table>`.
    Named(TableNames),
}

impl TableQualifier {
    pub fn prefix(&self, table: TableRole) -> Cow<'_, str> {
        match self {
            TableQualifier::Role => Cow::Borrowed(table.sql_prefix()),
            TableQualifier::Named(names) => Cow::Owned(names.qualified(table)),
        }
    }
}

/// `<qualifier>.<source column> AS <alias>`.
pub fn format_entry(
    entry: &ProjectionEntry,
    style: AliasStyle,
    qualifier: &TableQualifier,
) -> String {
    format!(
        "{}.{} AS {}",
        qualifier.prefix(entry.table),
        entry.source_column,
        style.alias_for(entry)
    )
}

/// Role-qualified fragments with catalog aliases.
pub fn format_projection(entries: &[ProjectionEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format_entry(entry, AliasStyle::Catalog, &TableQualifier::Role))
        .collect()
}

/// Ordered projection for one setting: claim then line, levels in
/// canonical order, catalog order within a level.
pub fn projection_for(definition: &SettingDefinition) -> Vec<ProjectionEntry> {
    let mut entries = Vec::with_capacity(definition.fields.len());
    for table in TableRole::ALL {
        for level in IdentifierLevel::ALL {
            if !definition.has_fields(level, table) {
                continue;
            }
            entries.extend(
                definition
                    .fields_for(level, table)
                    .map(ProjectionEntry::from),
            );
        }
    }
    entries
}

/// Builds select lists for settings of one catalog.
#[derive(Debug, Clone)]
pub struct SelectListBuilder<'a> {
    resolver: FieldResolver<'a>,
    style: AliasStyle,
    qualifier: TableQualifier,
}

impl<'a> SelectListBuilder<'a> {
    pub fn new(catalog: &'a SettingCatalog) -> Self {
        Self {
            resolver: FieldResolver::new(catalog),
            style: AliasStyle::default(),
            qualifier: TableQualifier::default(),
        }
    }

    #[must_use]
    pub fn with_alias_style(mut self, style: AliasStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: TableQualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn build_projection(&self, setting: &str) -> Result<Vec<ProjectionEntry>> {
        Ok(projection_for(self.resolver.definition(setting)?))
    }

    /// Fragments for `entries` in this builder's style.
    pub fn format(&self, entries: &[ProjectionEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| format_entry(entry, self.style, &self.qualifier))
            .collect()
    }

    /// The full select list, joined for insertion after `SELECT`.
    pub fn select_list(&self, setting: &str) -> Result<String> {
        let entries = self.build_projection(setting)?;
        Ok(self.format(&entries).join(SELECT_LIST_SEPARATOR))
    }
}
