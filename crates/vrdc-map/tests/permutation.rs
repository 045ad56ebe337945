use std::collections::BTreeSet;

use proptest::prelude::*;

use vrdc_catalog::SettingCatalog;
use vrdc_map::{CanonicalPlan, PermutationEngine, Permutations, TableNames, canonical_plans, permutation_count};
use vrdc_model::{
    AliasRule, BenefitSetting, FieldDefinition, IdentifierLevel, SettingDefinition, TableRole,
    YearMonth,
};

fn engine() -> PermutationEngine<'static> {
    PermutationEngine::new(SettingCatalog::embedded().expect("embedded catalog"))
}

#[test]
fn bcarrier_has_fifteen_permutations() {
    let records = engine().enumerate("bcarrier").expect("bcarrier");
    assert_eq!(records.len(), 15);
    assert_eq!(engine().count("bcarrier").expect("count"), 15);
    for record in &records {
        assert!(!record.contains(IdentifierLevel::Ccn));
        assert_eq!(
            record.get(IdentifierLevel::TaxId).map(|f| f.source_column.as_str()),
            Some("TAX_NUM")
        );
    }
}

#[test]
fn counts_for_every_setting() {
    let expected = [
        ("bcarrier", 15),
        ("dme", 1),
        ("inpatient", 10),
        ("outpatient", 12),
        ("snf", 10),
        ("hospice", 12),
        ("hha", 12),
    ];
    for (setting, count) in expected {
        assert_eq!(engine().enumerate(setting).expect(setting).len(), count, "{setting}");
    }
}

#[test]
fn first_permutation_takes_first_alternatives() {
    let records = engine().enumerate("bcarrier").expect("bcarrier");
    let first = &records[0];
    assert_eq!(
        first.get(IdentifierLevel::OrgNpi).map(|f| f.source_column.as_str()),
        Some("CARR_CLM_BLG_NPI_NUM")
    );
    assert_eq!(
        first.get(IdentifierLevel::PersonalNpi).map(|f| f.source_column.as_str()),
        Some("PRF_PHYSN_NPI")
    );
    let second = &records[1];
    assert_eq!(
        second.get(IdentifierLevel::PersonalNpi).map(|f| f.source_column.as_str()),
        Some("CARR_LINE_MDPP_NPI_NUM")
    );
    let last = &records[14];
    let org = last.get(IdentifierLevel::OrgNpi).expect("org");
    assert_eq!((org.table, org.source_column.as_str()), (TableRole::Line, "ORG_NPI_NUM"));
}

#[test]
fn snf_never_has_tax_id() {
    for record in engine().enumerate("snf").expect("snf") {
        assert!(!record.contains(IdentifierLevel::TaxId));
        assert_eq!(
            record.levels().collect::<Vec<_>>(),
            vec![
                IdentifierLevel::Ccn,
                IdentifierLevel::OrgNpi,
                IdentifierLevel::PersonalNpi
            ]
        );
    }
}

#[test]
fn no_ordering_physician_for_inpatient_or_snf() {
    for setting in ["inpatient", "snf"] {
        for record in engine().enumerate(setting).expect(setting) {
            let personal = record.get(IdentifierLevel::PersonalNpi).expect("personal npi");
            assert_ne!(personal.source_column, "ORDRG_PHYSN_NPI", "{setting}");
        }
    }
}

#[test]
fn enumeration_is_idempotent() {
    for setting in BenefitSetting::ALL {
        assert_eq!(
            engine().enumerate(setting.as_str()).expect("first"),
            engine().enumerate(setting.as_str()).expect("second")
        );
    }
}

#[test]
fn unknown_setting_yields_no_partial_result() {
    assert!(engine().enumerate("carrier").unwrap_err().is_unknown_setting());
    assert!(engine().count("").unwrap_err().is_unknown_setting());
}

#[test]
fn canonical_plans_cover_every_permutation() {
    let plans = canonical_plans(&engine(), "snf").expect("snf");
    assert_eq!(plans.len(), 10);
    assert!(plans.iter().all(|plan| plan.entry(IdentifierLevel::TaxId).is_none()));
}

#[test]
fn canonical_plan_render() {
    let records = engine().enumerate("dme").expect("dme");
    let plan = CanonicalPlan::from_record(BenefitSetting::Dme, &records[0]).expect("plan");
    let names = TableNames::for_setting(BenefitSetting::Dme, YearMonth::new(2023, 12).expect("period"));
    insta::assert_snapshot!(plan.render(&names), @r###"
    SELECT
        'dme' AS source_setting_name,
        CLAIM.TAX_NUM AS TAX_NUM,
        CLAIM.PRVDR_NUM AS CCN,
        CLINE.PRVDR_NPI AS onpi,
        CLAIM.RFR_PHYSN_NPI AS pnpi
    FROM rif2023.dme_claims_12 AS CLAIM
    LEFT JOIN rif2023.dme_line_12 AS CLINE
        ON CLAIM.CLM_ID = CLINE.CLM_ID
    WHERE CLINE.PRVDR_NPI IS NOT NULL AND CLAIM.RFR_PHYSN_NPI IS NOT NULL
    "###);
}

/// Per level: number of claim alternatives and number of line alternatives.
fn arb_shape() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((0usize..4, 0usize..3), IdentifierLevel::ALL.len())
}

fn definition_from_shape(shape: &[(usize, usize)]) -> SettingDefinition {
    let mut fields = Vec::new();
    for (level, (claim, line)) in IdentifierLevel::ALL.into_iter().zip(shape) {
        for (table, count) in [(TableRole::Claim, *claim), (TableRole::Line, *line)] {
            for index in 0..count {
                fields.push(FieldDefinition::new(
                    level,
                    table,
                    format!("{}_{}_{index}", level.as_str().to_uppercase(), table.sql_prefix()),
                    AliasRule::Source,
                ));
            }
        }
    }
    SettingDefinition::new(BenefitSetting::Outpatient, fields)
}

proptest! {
    #[test]
    fn count_is_product_over_present_levels(shape in arb_shape()) {
        let definition = definition_from_shape(&shape);
        let expected: usize = shape
            .iter()
            .map(|(claim, line)| claim + line)
            .filter(|count| *count > 0)
            .product();
        let records: Vec<_> = Permutations::new(&definition).collect();

        prop_assert_eq!(permutation_count(&definition), expected);
        prop_assert_eq!(records.len(), expected);

        let present = definition.present_levels();
        for record in &records {
            prop_assert_eq!(record.levels().collect::<Vec<_>>(), present.clone());
        }

        let distinct: BTreeSet<Vec<String>> = records
            .iter()
            .map(|record| record.iter().map(|(_, field)| field.qualified_name()).collect())
            .collect();
        prop_assert_eq!(distinct.len(), records.len());
    }
}
