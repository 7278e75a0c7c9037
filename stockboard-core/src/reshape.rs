//! Selection and reshape: filter the wide table to the chosen companies and
//! un-pivot it into (date, name, price) rows.

use std::collections::BTreeSet;

use crate::error::PipelineError;
use crate::table::{LongRow, LongTable, WidePriceTable};

/// Validate a selection against the table's rows and return the names sorted
/// and deduplicated.
fn resolve_selection<'a, S>(
    table: &WidePriceTable,
    selection: &'a [S],
) -> Result<Vec<&'a str>, PipelineError>
where
    S: AsRef<str>,
{
    if selection.is_empty() {
        return Err(PipelineError::EmptySelection);
    }
    let mut names = BTreeSet::new();
    for name in selection {
        let name = name.as_ref();
        if table.row(name).is_none() {
            return Err(PipelineError::UnknownCompany(name.to_string()));
        }
        names.insert(name);
    }
    Ok(names.into_iter().collect())
}

/// Rows of `table` whose name is in `selection`, sorted by name.
pub fn select_rows<S: AsRef<str>>(
    table: &WidePriceTable,
    selection: &[S],
) -> Result<WidePriceTable, PipelineError> {
    let names = resolve_selection(table, selection)?;
    Ok(table.with_rows(&names))
}

/// Un-pivot `table` into the long table, one row per populated cell.
///
/// Companies appear in row order, each company's rows in date order. Missing
/// cells produce no row; nothing is interpolated or aggregated.
pub fn melt(table: &WidePriceTable) -> LongTable {
    let dates = table.dates();
    let mut rows = Vec::with_capacity(table.populated_cells());
    for (name, cells) in table.rows() {
        for (date, cell) in dates.iter().zip(cells) {
            if let Some(price) = cell {
                rows.push(LongRow {
                    date: *date,
                    name: name.to_string(),
                    price: *price,
                });
            }
        }
    }
    LongTable::new(rows)
}

/// Filter to `selection` and un-pivot into the long table.
pub fn select_and_melt<S: AsRef<str>>(
    table: &WidePriceTable,
    selection: &[S],
) -> Result<LongTable, PipelineError> {
    let selected = select_rows(table, selection)?;
    Ok(melt(&selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyClose;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn table() -> WidePriceTable {
        let c = |day, close| DailyClose { date: d(day), close };
        WidePriceTable::from_rows(vec![
            ("microsoft".to_string(), vec![c(4, 410.0), c(5, 402.0)]),
            ("apple".to_string(), vec![c(4, 175.0), c(5, 170.0)]),
            ("google".to_string(), vec![c(5, 133.0)]),
        ])
    }

    #[test]
    fn empty_selection_is_reported() {
        let none: [&str; 0] = [];
        assert!(matches!(
            select_and_melt(&table(), &none),
            Err(PipelineError::EmptySelection)
        ));
        assert!(matches!(
            select_rows(&table(), &none),
            Err(PipelineError::EmptySelection)
        ));
    }

    #[test]
    fn unknown_company_is_rejected() {
        assert!(matches!(
            select_and_melt(&table(), &["apple", "ibm"]),
            Err(PipelineError::UnknownCompany(name)) if name == "ibm"
        ));
    }

    #[test]
    fn rows_sorted_by_name() {
        let selected = select_rows(&table(), &["microsoft", "apple"]).unwrap();
        assert_eq!(
            selected.names(),
            &["apple".to_string(), "microsoft".to_string()]
        );
        assert_eq!(selected.dates(), table().dates());
    }

    #[test]
    fn melt_skips_missing_cells() {
        let long = select_and_melt(&table(), &["google", "apple"]).unwrap();
        // apple: 2 closes, google: 1 (no close on the 4th)
        assert_eq!(long.len(), 3);
        assert_eq!(long.names(), vec!["apple", "google"]);
        assert_eq!(long.series("apple"), vec![(d(4), 175.0), (d(5), 170.0)]);
        assert_eq!(long.series("google"), vec![(d(5), 133.0)]);
    }

    #[test]
    fn duplicate_selection_counts_once() {
        let long = select_and_melt(&table(), &["apple", "apple"]).unwrap();
        assert_eq!(long.len(), 2);
    }

    #[test]
    fn melt_of_selected_rows_matches_select_and_melt() {
        let selected = select_rows(&table(), &["microsoft", "google"]).unwrap();
        let long = melt(&selected);
        assert_eq!(long, select_and_melt(&table(), &["microsoft", "google"]).unwrap());
        assert_eq!(long.len(), selected.populated_cells());
        assert_eq!(long.names(), vec!["google", "microsoft"]);
    }
}
