//! Property tests for the acquisition and reshape invariants.
//!
//! Uses proptest to verify:
//! 1. Wide table row keys always equal the registry's names
//! 2. Identical (days, registry) never fetches twice
//! 3. Full selection yields |registry| × |dates| rows minus missing cells
//! 4. Distinct names in the long table equal the selection

use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::BTreeSet;
use stockboard_core::data::{DailyClose, TickerRegistry};
use stockboard_core::testing::{CountingProvider, FixedProvider};
use stockboard_core::{
    build_price_table, select_and_melt, PriceTableCache, SyntheticProvider, WidePriceTable,
};

fn synthetic() -> SyntheticProvider {
    SyntheticProvider::new(2024, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap())
}

fn registry_names() -> Vec<String> {
    TickerRegistry::default()
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_days() -> impl Strategy<Value = u32> {
    1u32..=50
}

fn arb_selection() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(registry_names(), 1..=8)
}

/// Per-ticker gap masks: `true` keeps that day's close.
fn arb_gappy_table() -> impl Strategy<Value = WidePriceTable> {
    proptest::collection::vec(proptest::collection::vec(any::<bool>(), 10), 8).prop_map(|masks| {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let registry = TickerRegistry::default();
        let mut provider = FixedProvider::new();
        for (entry, mask) in registry.entries().iter().zip(masks) {
            let closes: Vec<DailyClose> = FixedProvider::ramp(start, 10, 100.0)
                .into_iter()
                .zip(mask)
                .filter_map(|(c, keep)| keep.then_some(c))
                .collect();
            provider = provider.with_series(&entry.ticker, closes);
        }
        build_price_table(&provider, 10, &registry).unwrap()
    })
}

// ── 1. Row keys == registry ──────────────────────────────────────────

proptest! {
    #[test]
    fn row_keys_equal_registry(days in arb_days()) {
        let registry = TickerRegistry::default();
        let table = build_price_table(&synthetic(), days, &registry).unwrap();
        let rows: BTreeSet<&str> = table.names().iter().map(String::as_str).collect();
        let expected: BTreeSet<&str> = registry.names().into_iter().collect();
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn row_keys_survive_empty_series(masks in proptest::collection::vec(any::<bool>(), 8)) {
        let registry = TickerRegistry::default();
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut provider = FixedProvider::new();
        for (entry, has_data) in registry.entries().iter().zip(masks) {
            let closes = if has_data { FixedProvider::ramp(start, 3, 50.0) } else { vec![] };
            provider = provider.with_series(&entry.ticker, closes);
        }
        let table = build_price_table(&provider, 3, &registry).unwrap();
        prop_assert_eq!(table.shape().0, 8);
    }
}

// ── 2. Memoization ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn identical_inputs_fetch_once(days in arb_days(), repeats in 2usize..5) {
        let provider = CountingProvider::new(synthetic());
        let registry = TickerRegistry::default();
        let mut cache = PriceTableCache::new();

        let first = cache.get_or_build(&provider, days, &registry).unwrap().clone();
        for _ in 1..repeats {
            let again = cache.get_or_build(&provider, days, &registry).unwrap();
            prop_assert_eq!(again, &first);
        }
        prop_assert_eq!(provider.calls(), registry.len());
    }
}

// ── 3 & 4. Reshape shape ─────────────────────────────────────────────

proptest! {
    #[test]
    fn full_selection_row_count(table in arb_gappy_table()) {
        let long = select_and_melt(&table, &registry_names()).unwrap();
        prop_assert_eq!(long.len(), table.populated_cells());
        prop_assert!(long.len() <= 8 * table.dates().len());
    }

    #[test]
    fn long_names_equal_selection(days in arb_days(), selection in arb_selection()) {
        let table = build_price_table(&synthetic(), days, &TickerRegistry::default()).unwrap();
        let long = select_and_melt(&table, &selection).unwrap();

        let got: BTreeSet<&str> = long.names().into_iter().collect();
        let want: BTreeSet<&str> = selection.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn no_rows_outside_selection(table in arb_gappy_table(), selection in arb_selection()) {
        let long = select_and_melt(&table, &selection).unwrap();
        for row in long.rows() {
            prop_assert!(selection.contains(&row.name));
        }
    }
}
