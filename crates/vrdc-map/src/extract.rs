//! Monthly extract iteration over a calendar range.

use serde::Serialize;
use tracing::debug;

use vrdc_catalog::SettingCatalog;
use vrdc_model::{
    BenefitSetting, MonthIter, MonthRange, ProjectionEntry, SettingDefinition, YearMonth,
};

use crate::error::{MapError, Result};
use crate::naming::TableNames;
use crate::projection::{
    AliasStyle, SELECT_LIST_SEPARATOR, TableQualifier, format_entry, projection_for,
};

/// One (month, setting) combination with its tables and projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExtract {
    pub period: YearMonth,
    pub setting: BenefitSetting,
    pub tables: TableNames,
    pub projection: Vec<ProjectionEntry>,
}

impl MonthlyExtract {
    fn new(period: YearMonth, definition: &SettingDefinition) -> Self {
        Self {
            period,
            setting: definition.setting,
            tables: TableNames::resolve(definition, period),
            projection: projection_for(definition),
        }
    }

    /// Select list qualified with `CLAIM` / `CLINE`.
    pub fn role_select_list(&self, style: AliasStyle) -> String {
        self.select_list(style, &TableQualifier::Role)
    }

    /// Select list qualified with this month's database and tables.
    pub fn named_select_list(&self, style: AliasStyle) -> String {
        self.select_list(style, &TableQualifier::Named(self.tables.clone()))
    }

    fn select_list(&self, style: AliasStyle, qualifier: &TableQualifier) -> String {
        self.projection
            .iter()
            .map(|entry| format_entry(entry, style, qualifier))
            .collect::<Vec<_>>()
            .join(SELECT_LIST_SEPARATOR)
    }
}

/// Lazy month-major iterator; every setting for a month before the next month.
#[derive(Debug, Clone)]
pub struct MonthlyExtracts<'a> {
    months: MonthIter,
    current: Option<YearMonth>,
    settings: Vec<&'a SettingDefinition>,
    position: usize,
}

impl Iterator for MonthlyExtracts<'_> {
    type Item = MonthlyExtract;

    fn next(&mut self) -> Option<Self::Item> {
        if self.settings.is_empty() {
            return None;
        }
        if self.position == self.settings.len() || self.current.is_none() {
            self.current = Some(self.months.next()?);
            self.position = 0;
        }
        let period = self.current?;
        let definition = self.settings[self.position];
        self.position += 1;
        Some(MonthlyExtract::new(period, definition))
    }
}

/// Resolve requested setting names, all of them before any month is produced.
/// An empty request selects every catalog setting.
fn select_settings<'a, S: AsRef<str>>(
    catalog: &'a SettingCatalog,
    settings: &[S],
) -> Result<Vec<&'a SettingDefinition>> {
    if settings.is_empty() {
        return Ok(catalog.iter().collect());
    }
    settings
        .iter()
        .map(|name| {
            catalog
                .definition_for(name.as_ref())
                .map_err(MapError::from)
        })
        .collect()
}

pub fn monthly_extracts<'a, S: AsRef<str>>(
    catalog: &'a SettingCatalog,
    range: &MonthRange,
    settings: &[S],
) -> Result<MonthlyExtracts<'a>> {
    let settings = select_settings(catalog, settings)?;
    debug!(
        range = %range,
        settings = settings.len(),
        months = range.total_months(),
        "iterating monthly extracts"
    );
    Ok(MonthlyExtracts {
        months: range.iter(),
        current: None,
        settings,
        position: 0,
    })
}

/// Shape of a monthly iteration, computed without iterating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub month_range: String,
    pub start: YearMonth,
    pub end: YearMonth,
    pub settings: Vec<BenefitSetting>,
    pub total_months: usize,
    pub total_settings: usize,
    pub total_combinations: usize,
}

impl ExtractSummary {
    pub fn new<S: AsRef<str>>(
        catalog: &SettingCatalog,
        range: &MonthRange,
        settings: &[S],
    ) -> Result<Self> {
        let settings: Vec<BenefitSetting> = select_settings(catalog, settings)?
            .into_iter()
            .map(|definition| definition.setting)
            .collect();
        let total_months = range.total_months();
        Ok(Self {
            month_range: range.to_string(),
            start: range.start(),
            end: range.end(),
            total_months,
            total_settings: settings.len(),
            total_combinations: total_months * settings.len(),
            settings,
        })
    }
}
