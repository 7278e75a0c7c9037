//! Wide and long price tables.
//!
//! The wide table has one row per company and one column per trading date;
//! the long (tidy) table has one row per (date, company, price) triple and is
//! what the chart consumes.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};

use crate::data::DailyClose;

/// Display format for date column keys: "05 March 2024".
pub const DATE_LABEL_FORMAT: &str = "%d %B %Y";

/// Row index label of the wide table.
pub const NAME_COLUMN: &str = "Name";
/// Date column of the long table.
pub const DATE_COLUMN: &str = "Date";
/// Price column of the long table, also the chart's y-axis title.
pub const PRICE_COLUMN: &str = "Stock Prices(USD)";

/// Format a date as a column key.
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

fn serialize_date_label<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date_label(*date))
}

/// Companies × dates table of closing prices.
///
/// Columns are the union of every date seen across rows, in chronological
/// order. A cell is `None` when that company had no close on that date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidePriceTable {
    names: Vec<String>,
    dates: Vec<NaiveDate>,
    cells: Vec<Vec<Option<f64>>>,
}

impl WidePriceTable {
    /// Assemble rows of per-company closes into one table.
    ///
    /// Row order follows `rows`. A company with an empty series still gets a
    /// row of missing cells.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<DailyClose>)>,
    {
        let rows: Vec<(String, Vec<DailyClose>)> = rows.into_iter().collect();

        let mut all_dates = BTreeSet::new();
        for (_, closes) in &rows {
            for c in closes {
                all_dates.insert(c.date);
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();
        let column: HashMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut names = Vec::with_capacity(rows.len());
        let mut cells = Vec::with_capacity(rows.len());
        for (name, closes) in rows {
            let mut row = vec![None; dates.len()];
            for c in closes {
                if c.close.is_finite() {
                    row[column[&c.date]] = Some(c.close);
                }
            }
            names.push(name);
            cells.push(row);
        }

        Self {
            names,
            dates,
            cells,
        }
    }

    /// Row keys in table order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column dates in chronological order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column keys as display strings.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| date_label(*d)).collect()
    }

    pub fn row(&self, name: &str) -> Option<&[Option<f64>]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.cells[i].as_slice())
    }

    pub fn get(&self, name: &str, date: NaiveDate) -> Option<f64> {
        let col = self.dates.binary_search(&date).ok()?;
        self.row(name).and_then(|row| row[col])
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.names.len(), self.dates.len())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of cells holding a price.
    pub fn populated_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Iterate (name, row) pairs in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// New table with the given rows, in the given order. Unknown names are skipped.
    pub(crate) fn with_rows(&self, names: &[&str]) -> Self {
        let mut out_names = Vec::with_capacity(names.len());
        let mut out_cells = Vec::with_capacity(names.len());
        for name in names {
            if let Some(row) = self.row(name) {
                out_names.push((*name).to_string());
                out_cells.push(row.to_vec());
            }
        }
        Self {
            names: out_names,
            dates: self.dates.clone(),
            cells: out_cells,
        }
    }
}

impl Serialize for WidePriceTable {
    /// Serializes as a list of records: `{"Name": ..., "<date label>": price, ...}`.
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let labels = self.date_labels();
        let mut seq = s.serialize_seq(Some(self.names.len()))?;
        for (name, row) in self.rows() {
            seq.serialize_element(&WideRecord {
                name,
                labels: &labels,
                row,
            })?;
        }
        seq.end()
    }
}

struct WideRecord<'a> {
    name: &'a str,
    labels: &'a [String],
    row: &'a [Option<f64>],
}

impl Serialize for WideRecord<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = s.serialize_map(Some(self.labels.len() + 1))?;
        map.serialize_entry(NAME_COLUMN, self.name)?;
        for (label, cell) in self.labels.iter().zip(self.row) {
            map.serialize_entry(label, cell)?;
        }
        map.end()
    }
}

/// One (date, company, price) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow {
    #[serde(rename = "Date", serialize_with = "serialize_date_label")]
    pub date: NaiveDate,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Stock Prices(USD)")]
    pub price: f64,
}

/// Tidy table of observations, grouped by company then ordered by date.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct LongTable {
    rows: Vec<LongRow>,
}

impl LongTable {
    pub fn new(rows: Vec<LongRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct company names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.name.as_str()) {
                seen.push(&row.name);
            }
        }
        seen
    }

    /// (date, price) points for one company, ascending by date.
    pub fn series(&self, name: &str) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter(|r| r.name == name)
            .map(|r| (r.date, r.price))
            .collect()
    }
}
