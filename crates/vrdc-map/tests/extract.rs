use vrdc_catalog::SettingCatalog;
use vrdc_map::{AliasStyle, ExtractSummary, FieldResolver, monthly_extracts};
use vrdc_model::{BenefitSetting, IdentifierLevel, MonthRange, YearMonth};

fn catalog() -> &'static SettingCatalog {
    SettingCatalog::embedded().expect("embedded catalog")
}

fn range(start: (i32, u32), end: (i32, u32)) -> MonthRange {
    MonthRange::from_parts(start.0, start.1, end.0, end.1).expect("range")
}

#[test]
fn month_major_then_setting_order() {
    let extracts: Vec<(YearMonth, BenefitSetting)> =
        monthly_extracts(catalog(), &range((2023, 12), (2024, 1)), &["snf", "dme"])
            .expect("extracts")
            .map(|extract| (extract.period, extract.setting))
            .collect();
    let dec = YearMonth::new(2023, 12).expect("dec");
    let jan = YearMonth::new(2024, 1).expect("jan");
    assert_eq!(
        extracts,
        vec![
            (dec, BenefitSetting::Snf),
            (dec, BenefitSetting::Dme),
            (jan, BenefitSetting::Snf),
            (jan, BenefitSetting::Dme),
        ]
    );
}

#[test]
fn table_names_follow_the_month() {
    let extracts: Vec<_> = monthly_extracts(catalog(), &range((2023, 12), (2024, 1)), &["hospice"])
        .expect("extracts")
        .collect();
    assert_eq!(extracts[0].tables.database, "rif2023");
    assert_eq!(extracts[0].tables.claim_table, "hospice_claims_12");
    assert_eq!(extracts[1].tables.database, "rif2024");
    assert_eq!(extracts[1].tables.line_table, "hospice_revenue_01");
}

#[test]
fn unknown_setting_fails_before_iteration() {
    let result = monthly_extracts(catalog(), &range((2024, 1), (2024, 3)), &["dme", "carrier"]);
    assert!(result.unwrap_err().is_unknown_setting());
}

#[test]
fn empty_request_means_every_setting() {
    let none: [&str; 0] = [];
    let count = monthly_extracts(catalog(), &range((2024, 1), (2024, 2)), &none)
        .expect("extracts")
        .count();
    assert_eq!(count, 2 * BenefitSetting::ALL.len());
}

#[test]
fn named_select_list_uses_month_tables() {
    let extract = monthly_extracts(catalog(), &range((2024, 5), (2024, 5)), &["dme"])
        .expect("extracts")
        .next()
        .expect("one extract");
    let select = extract.named_select_list(AliasStyle::Catalog);
    assert!(select.starts_with("rif2024.dme_claims_05.TAX_NUM AS TAX_NUM,\n    "));
    assert!(select.ends_with("rif2024.dme_line_05.PRVDR_NPI AS PRVDR_NPI"));
    let role = extract.role_select_list(AliasStyle::SimplifiedNpi);
    assert!(role.ends_with("CLINE.PRVDR_NPI AS onpi"));
}

#[test]
fn summary_without_iterating() {
    let summary =
        ExtractSummary::new(catalog(), &range((2023, 11), (2024, 2)), &["inpatient", "outpatient"])
            .expect("summary");
    assert_eq!(summary.total_months, 4);
    assert_eq!(summary.total_settings, 2);
    assert_eq!(summary.total_combinations, 8);
    assert_eq!(summary.month_range, "MonthRange(2023-11 to 2024-02)");

    let json = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(json["settings"][1], "outpatient");
    assert_eq!(json["start"]["year"], 2023);
}

#[test]
fn resolver_summary_keeps_zero_levels() {
    let summary = FieldResolver::new(catalog()).summary("hha").expect("hha");
    let tax = summary.level(IdentifierLevel::TaxId).expect("tax entry");
    assert_eq!(tax.count, 0);
    assert_eq!(summary.permutations, 12);
}
