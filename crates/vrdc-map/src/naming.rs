//! RIF database and table naming.
//!
//! Extracts live in one database per year (`rif2024`) with one table per
//! setting, table kind and month: `inpatient_claims_01`,
//! `inpatient_revenue_01`, `bcarrier_line_01`.

use serde::Serialize;

use vrdc_model::{BenefitSetting, SettingDefinition, TableRole, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableNames {
    pub database: String,
    pub claim_table: String,
    pub line_table: String,
}

impl TableNames {
    pub fn resolve(definition: &SettingDefinition, period: YearMonth) -> Self {
        Self::for_setting(definition.setting, period)
    }

    pub fn for_setting(setting: BenefitSetting, period: YearMonth) -> Self {
        let month = period.month();
        Self {
            database: database_name(period.year()),
            claim_table: format!("{setting}_claims_{month:02}"),
            line_table: format!(
                "{setting}_{}_{month:02}",
                setting.format().line_table_kind()
            ),
        }
    }

    pub fn table(&self, role: TableRole) -> &str {
        match role {
            TableRole::Claim => &self.claim_table,
            TableRole::Line => &self.line_table,
        }
    }

    /// `database.table` for one role.
    pub fn qualified(&self, role: TableRole) -> String {
        format!("{}.{}", self.database, self.table(role))
    }
}

pub fn database_name(year: i32) -> String {
    format!("rif{year}")
}
