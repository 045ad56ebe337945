use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use vrdc_catalog::{CatalogReport, CatalogSource, SettingCatalog, SettingSummary};
use vrdc_map::{
    AliasStyle, CanonicalPlan, ExtractSummary, FieldResolver, MonthlyExtract, PermutationEngine,
    SelectListBuilder, TableNames, TableQualifier, canonical_plans, monthly_extracts,
};
use vrdc_model::{BenefitSetting, MonthRange};

use vrdc_cli::output::{canonical_block, plan_rows, plans_to_csv, plans_to_json};

use crate::cli::{
    CanonicalArgs, LevelArgs, MonthsArgs, PermutationArgs, PlanFormatArg, SelectArgs,
    SettingArgs, TablesArgs,
};
use crate::summary::{
    extracts_table, fields_table, level_table, plans_table, print_extract_summary,
    settings_table,
};

pub fn load_catalog(explicit: Option<&Path>) -> Result<Cow<'static, SettingCatalog>> {
    let source = CatalogSource::resolve(explicit);
    let catalog = source
        .load()
        .with_context(|| format!("load catalog ({source})"))?;
    info!(source = %source, fingerprint = %catalog.fingerprint(), "catalog ready");
    Ok(catalog)
}

pub fn run_settings(catalog: &SettingCatalog) -> Result<()> {
    let summaries: Vec<SettingSummary> =
        catalog.iter().map(SettingSummary::from_definition).collect();
    println!("{}", settings_table(&summaries));
    Ok(())
}

pub fn run_fields(catalog: &SettingCatalog, args: &SettingArgs) -> Result<()> {
    let definition = FieldResolver::new(catalog).definition(&args.setting)?;
    println!("Setting: {} ({})", definition.name(), definition.format);
    println!("{}", fields_table(definition));
    Ok(())
}

pub fn run_level(catalog: &SettingCatalog, args: &LevelArgs) -> Result<()> {
    let entries = FieldResolver::new(catalog).level_fields(args.level);
    println!("{}", level_table(args.level, &entries));
    Ok(())
}

pub fn run_select(catalog: &SettingCatalog, args: &SelectArgs) -> Result<()> {
    let definition = FieldResolver::new(catalog).definition(&args.setting)?;
    let mut builder = SelectListBuilder::new(catalog);
    if args.simplified_npi_aliases {
        builder = builder.with_alias_style(AliasStyle::SimplifiedNpi);
    }
    if let Some(period) = args.period {
        let names = TableNames::resolve(definition, period);
        builder = builder.with_qualifier(TableQualifier::Named(names));
    }
    println!("{}", builder.select_list(definition.name())?);
    Ok(())
}

pub fn run_permutations(catalog: &SettingCatalog, args: &PermutationArgs) -> Result<()> {
    let setting: BenefitSetting = args.setting.parse()?;
    let records = PermutationEngine::new(catalog).enumerate(&args.setting)?;
    info!(setting = %setting, permutations = records.len(), "permutations enumerated");
    let rows = plan_rows(setting, &records);
    match args.format {
        PlanFormatArg::Table => println!("{}", plans_table(&rows)),
        PlanFormatArg::Json => println!("{}", plans_to_json(&rows)?),
        PlanFormatArg::Csv => print!("{}", plans_to_csv(&rows)?),
    }
    Ok(())
}

pub fn run_canonical(catalog: &SettingCatalog, args: &CanonicalArgs) -> Result<()> {
    let engine = PermutationEngine::new(catalog);
    let plans: Vec<CanonicalPlan> = canonical_plans(&engine, &args.setting)
        .with_context(|| format!("build canonical plans for {}", args.setting))?;
    let blocks: Vec<String> = match args.period {
        Some(period) => {
            let names = TableNames::for_setting(args.setting.parse()?, period);
            plans.iter().map(|plan| plan.render(&names)).collect()
        }
        None => plans
            .iter()
            .enumerate()
            .map(|(index, plan)| canonical_block(index + 1, plan))
            .collect(),
    };
    let separator = if args.period.is_some() {
        "\nUNION ALL\n"
    } else {
        "\n\n"
    };
    println!("{}", blocks.join(separator));
    Ok(())
}

pub fn run_tables(catalog: &SettingCatalog, args: &TablesArgs) -> Result<()> {
    let definition = FieldResolver::new(catalog).definition(&args.setting)?;
    let names = TableNames::resolve(definition, args.period);
    println!("database:    {}", names.database);
    println!("claim table: {}", names.claim_table);
    println!("line table:  {}", names.line_table);
    Ok(())
}

pub fn run_months(catalog: &SettingCatalog, args: &MonthsArgs) -> Result<()> {
    let range = MonthRange::new(args.from, args.to)?;
    let summary = ExtractSummary::new(catalog, &range, args.settings.as_slice())?;
    let extracts: Vec<MonthlyExtract> =
        monthly_extracts(catalog, &range, args.settings.as_slice())?.collect();
    info!(
        months = summary.total_months,
        combinations = summary.total_combinations,
        "monthly extracts listed"
    );
    if args.sql {
        for extract in &extracts {
            println!("-- {} {}", extract.period, extract.setting);
            println!("{}\n", extract.named_select_list(AliasStyle::Catalog));
        }
    } else {
        println!("{}", extracts_table(&extracts));
    }
    print_extract_summary(&summary);
    Ok(())
}

pub fn run_doctor(catalog: &SettingCatalog) -> Result<()> {
    let report = CatalogReport::from_catalog(catalog);
    let json = serde_json::to_string_pretty(&report).context("serialize catalog report")?;
    println!("{json}");
    Ok(())
}
