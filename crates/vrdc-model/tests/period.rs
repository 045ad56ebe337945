use proptest::prelude::*;

use vrdc_model::{ModelError, MonthRange, YearMonth};

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

#[test]
fn year_rollover_range_yields_two_months() {
    let range = MonthRange::from_parts(2023, 12, 2024, 1).expect("valid range");
    let months: Vec<(i32, u32)> = range.iter().map(|m| (m.year(), m.month())).collect();
    assert_eq!(months, vec![(2023, 12), (2024, 1)]);
}

#[test]
fn single_month_range_yields_one_month() {
    let range = MonthRange::from_parts(2025, 5, 2025, 5).expect("valid range");
    assert_eq!(range.iter().collect::<Vec<_>>(), vec![ym(2025, 5)]);
    assert_eq!(range.total_months(), 1);
}

#[test]
fn inverted_range_is_rejected() {
    let err = MonthRange::from_parts(2024, 2, 2024, 1).unwrap_err();
    assert_eq!(
        err,
        ModelError::InvertedRange {
            start: ym(2024, 2),
            end: ym(2024, 1),
        }
    );
    assert!(MonthRange::from_parts(2025, 1, 2024, 12).is_err());
}

#[test]
fn month_out_of_bounds_is_rejected() {
    assert_eq!(
        MonthRange::from_parts(2024, 0, 2024, 3),
        Err(ModelError::InvalidMonth { month: 0 })
    );
    assert_eq!(
        MonthRange::from_parts(2024, 1, 2024, 13),
        Err(ModelError::InvalidMonth { month: 13 })
    );
}

#[test]
fn iteration_is_restartable() {
    let range = MonthRange::from_parts(2024, 11, 2025, 2).expect("valid range");
    let first: Vec<YearMonth> = range.iter().collect();
    let second: Vec<YearMonth> = (&range).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn display_formats() {
    let range = MonthRange::from_parts(2023, 12, 2024, 1).expect("valid range");
    assert_eq!(range.to_string(), "MonthRange(2023-12 to 2024-01)");
}

proptest! {
    #[test]
    fn total_months_matches_iteration(
        start_year in 2000i32..2030,
        start_month in 1u32..=12,
        span in 0usize..60,
    ) {
        let start = ym(start_year, start_month);
        let mut end = start;
        for _ in 0..span {
            end = end.next();
        }
        let range = MonthRange::new(start, end).expect("ordered range");
        let months: Vec<YearMonth> = range.iter().collect();
        prop_assert_eq!(months.len(), span + 1);
        prop_assert_eq!(range.total_months(), span + 1);
        prop_assert_eq!(range.iter().len(), span + 1);
        prop_assert!(months.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(months.iter().all(|m| (1..=12).contains(&m.month())));
    }
}
