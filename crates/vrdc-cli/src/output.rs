//! Machine-readable renderings of extraction plans.

use anyhow::{Context, Result};
use serde::Serialize;

use vrdc_map::{CanonicalPlan, TableQualifier};
use vrdc_model::{BenefitSetting, FieldDefinition, IdentifierLevel, PermutationRecord};

/// One permutation as a flat row; absent levels are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    pub plan: usize,
    pub setting: BenefitSetting,
    pub tax_id: Option<String>,
    pub ccn: Option<String>,
    pub org_npi: Option<String>,
    pub personal_npi: Option<String>,
}

impl PlanRow {
    /// `plan` is 1-based.
    pub fn from_record(plan: usize, setting: BenefitSetting, record: &PermutationRecord) -> Self {
        let column = |level| record.get(level).map(FieldDefinition::qualified_name);
        Self {
            plan,
            setting,
            tax_id: column(IdentifierLevel::TaxId),
            ccn: column(IdentifierLevel::Ccn),
            org_npi: column(IdentifierLevel::OrgNpi),
            personal_npi: column(IdentifierLevel::PersonalNpi),
        }
    }

    pub fn value(&self, level: IdentifierLevel) -> Option<&str> {
        match level {
            IdentifierLevel::TaxId => self.tax_id.as_deref(),
            IdentifierLevel::Ccn => self.ccn.as_deref(),
            IdentifierLevel::OrgNpi => self.org_npi.as_deref(),
            IdentifierLevel::PersonalNpi => self.personal_npi.as_deref(),
        }
    }
}

pub fn plan_rows(setting: BenefitSetting, records: &[PermutationRecord]) -> Vec<PlanRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| PlanRow::from_record(index + 1, setting, record))
        .collect()
}

pub fn plans_to_csv(rows: &[PlanRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("write csv row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| anyhow::anyhow!("flush csv: {error}"))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

pub fn plans_to_json(rows: &[PlanRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("serialize plans")
}

/// Select items and guard of one canonical plan, as printed by `canonical`.
pub fn canonical_block(index: usize, plan: &CanonicalPlan) -> String {
    let qualifier = TableQualifier::Role;
    format!(
        "-- plan {index}\nSELECT\n    {}\nWHERE {}",
        plan.select_items(&qualifier).join(",\n    "),
        plan.not_null_predicate(&qualifier)
    )
}

#[cfg(test)]
mod tests {
    use vrdc_model::{AliasRule, TableRole};

    use super::*;

    #[test]
    fn absent_level_is_empty_csv_cell() {
        let record: PermutationRecord = [FieldDefinition::new(
            IdentifierLevel::OrgNpi,
            TableRole::Line,
            "PRVDR_NPI",
            AliasRule::Source,
        )]
        .into_iter()
        .collect();
        let rows = plan_rows(BenefitSetting::Dme, &[record]);
        let csv = plans_to_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "plan,setting,tax_id,ccn,org_npi,personal_npi\n1,dme,,,CLINE.PRVDR_NPI,\n"
        );
    }
}
