//! Canonical five-column extraction plans.
//!
//! A [`CanonicalPlan`] fixes one source column per level (one permutation)
//! and renders it into the cross-setting entity schema: setting name, tax
//! id, CCN, organizational NPI and personal NPI. Tax id and CCN fall back to
//! `NULL` when the setting lacks them; the NPI columns must be present.

use vrdc_model::{
    BenefitSetting, CANONICAL_COLUMNS, CanonicalEntityRow, IdentifierLevel, PermutationRecord,
    ProjectionEntry, TableRole,
};

use crate::error::{MapError, Result};
use crate::naming::TableNames;
use crate::permutation::PermutationEngine;
use crate::projection::{AliasStyle, TableQualifier, format_entry};

/// Columns the claim and line tables are joined on.
const JOIN_COLUMN: &str = "CLM_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPlan {
    setting: BenefitSetting,
    tax_id: Option<ProjectionEntry>,
    ccn: Option<ProjectionEntry>,
    org_npi: ProjectionEntry,
    personal_npi: ProjectionEntry,
}

impl CanonicalPlan {
    pub fn from_record(setting: BenefitSetting, record: &PermutationRecord) -> Result<Self> {
        Ok(Self {
            setting,
            tax_id: canonical_entry(record, IdentifierLevel::TaxId),
            ccn: canonical_entry(record, IdentifierLevel::Ccn),
            org_npi: required_entry(setting, record, IdentifierLevel::OrgNpi)?,
            personal_npi: required_entry(setting, record, IdentifierLevel::PersonalNpi)?,
        })
    }

    pub fn setting(&self) -> BenefitSetting {
        self.setting
    }

    /// Entry feeding a level's canonical column, aliased to that column.
    pub fn entry(&self, level: IdentifierLevel) -> Option<&ProjectionEntry> {
        match level {
            IdentifierLevel::TaxId => self.tax_id.as_ref(),
            IdentifierLevel::Ccn => self.ccn.as_ref(),
            IdentifierLevel::OrgNpi => Some(&self.org_npi),
            IdentifierLevel::PersonalNpi => Some(&self.personal_npi),
        }
    }

    /// The five select items in [`CANONICAL_COLUMNS`] order.
    pub fn select_items(&self, qualifier: &TableQualifier) -> Vec<String> {
        let mut items = Vec::with_capacity(CANONICAL_COLUMNS.len());
        items.push(format!("'{}' AS {}", self.setting, CANONICAL_COLUMNS[0]));
        for level in IdentifierLevel::ALL {
            let item = match self.entry(level) {
                Some(entry) => format_entry(entry, AliasStyle::Catalog, qualifier),
                None => format!("NULL AS {}", CanonicalEntityRow::column_for(level)),
            };
            items.push(item);
        }
        items
    }

    /// Both NPI source columns must be non-null for a row to count.
    pub fn not_null_predicate(&self, qualifier: &TableQualifier) -> String {
        [&self.org_npi, &self.personal_npi]
            .iter()
            .map(|entry| {
                format!(
                    "{}.{} IS NOT NULL",
                    qualifier.prefix(entry.table),
                    entry.source_column
                )
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// A complete `SELECT` over one month's claim and line tables.
    pub fn render(&self, names: &TableNames) -> String {
        let qualifier = TableQualifier::Role;
        let claim = TableRole::Claim.sql_prefix();
        let line = TableRole::Line.sql_prefix();
        format!(
            "SELECT\n    {}\nFROM {} AS {claim}\nLEFT JOIN {} AS {line}\n    ON {claim}.{JOIN_COLUMN} = {line}.{JOIN_COLUMN}\nWHERE {}",
            self.select_items(&qualifier).join(",\n    "),
            names.qualified(TableRole::Claim),
            names.qualified(TableRole::Line),
            self.not_null_predicate(&qualifier),
        )
    }
}

fn canonical_entry(record: &PermutationRecord, level: IdentifierLevel) -> Option<ProjectionEntry> {
    record.get(level).map(|field| {
        let mut entry = ProjectionEntry::from(field);
        entry.alias_column = CanonicalEntityRow::column_for(level).to_string();
        entry
    })
}

fn required_entry(
    setting: BenefitSetting,
    record: &PermutationRecord,
    level: IdentifierLevel,
) -> Result<ProjectionEntry> {
    canonical_entry(record, level).ok_or(MapError::MissingRequiredLevel {
        setting,
        level,
        column: CanonicalEntityRow::column_for(level),
    })
}

/// Every canonical plan for a setting, in permutation order.
pub fn canonical_plans(engine: &PermutationEngine<'_>, setting: &str) -> Result<Vec<CanonicalPlan>> {
    let setting_id: BenefitSetting = setting.parse()?;
    engine
        .iter(setting)?
        .map(|record| CanonicalPlan::from_record(setting_id, &record))
        .collect()
}

#[cfg(test)]
mod tests {
    use vrdc_model::{AliasRule, FieldDefinition};

    use super::*;

    fn record(fields: &[(IdentifierLevel, TableRole, &str)]) -> PermutationRecord {
        fields
            .iter()
            .map(|(level, table, column)| {
                FieldDefinition::new(*level, *table, *column, AliasRule::Source)
            })
            .collect()
    }

    #[test]
    fn missing_tax_and_ccn_render_null() {
        let plan = CanonicalPlan::from_record(
            BenefitSetting::Snf,
            &record(&[
                (IdentifierLevel::OrgNpi, TableRole::Claim, "ORG_NPI_NUM"),
                (IdentifierLevel::PersonalNpi, TableRole::Line, "RNDRNG_PHYSN_NPI"),
            ]),
        )
        .unwrap();
        assert_eq!(
            plan.select_items(&TableQualifier::Role),
            vec![
                "'snf' AS source_setting_name",
                "NULL AS TAX_NUM",
                "NULL AS CCN",
                "CLAIM.ORG_NPI_NUM AS onpi",
                "CLINE.RNDRNG_PHYSN_NPI AS pnpi",
            ]
        );
        assert_eq!(
            plan.not_null_predicate(&TableQualifier::Role),
            "CLAIM.ORG_NPI_NUM IS NOT NULL AND CLINE.RNDRNG_PHYSN_NPI IS NOT NULL"
        );
    }

    #[test]
    fn missing_npi_is_error() {
        let err = CanonicalPlan::from_record(
            BenefitSetting::Dme,
            &record(&[(IdentifierLevel::OrgNpi, TableRole::Line, "PRVDR_NPI")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MapError::MissingRequiredLevel {
                level: IdentifierLevel::PersonalNpi,
                column: "pnpi",
                ..
            }
        ));
    }
}
