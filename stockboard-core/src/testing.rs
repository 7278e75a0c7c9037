//! Provider wrappers for tests: call counting, per-ticker failure, fixed series.

use std::cell::Cell;
use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::data::{CloseSeries, DailyClose, DataError, DataSource, PriceProvider};

/// Counts `fetch_closes` calls made through it.
pub struct CountingProvider<P> {
    inner: P,
    calls: Cell<usize>,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<P: PriceProvider> PriceProvider for CountingProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.fetch_closes(symbol, days)
    }
}

/// Fails with `RateLimited` for one ticker and delegates the rest.
pub struct FailingProvider<P> {
    inner: P,
    failing_symbol: String,
}

impl<P> FailingProvider<P> {
    pub fn new(inner: P, failing_symbol: impl Into<String>) -> Self {
        Self {
            inner,
            failing_symbol: failing_symbol.into(),
        }
    }
}

impl<P: PriceProvider> PriceProvider for FailingProvider<P> {
    fn name(&self) -> &str {
        "failing"
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        if symbol == self.failing_symbol {
            return Err(DataError::RateLimited);
        }
        self.inner.fetch_closes(symbol, days)
    }
}

/// Serves fixed per-ticker series regardless of the requested window.
#[derive(Debug, Default)]
pub struct FixedProvider {
    series: HashMap<String, Vec<DailyClose>>,
}

impl FixedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, closes: Vec<DailyClose>) -> Self {
        self.series.insert(symbol.to_string(), closes);
        self
    }

    /// `count` consecutive-calendar-day closes starting at `start`, priced
    /// `base`, `base + 1`, ...
    pub fn ramp(start: NaiveDate, count: usize, base: f64) -> Vec<DailyClose> {
        (0..count)
            .map(|i| DailyClose {
                date: start + Duration::days(i as i64),
                close: base + i as f64,
            })
            .collect()
    }
}

impl PriceProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch_closes(&self, symbol: &str, _days: u32) -> Result<CloseSeries, DataError> {
        let closes = self
            .series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;
        Ok(CloseSeries {
            symbol: symbol.to_string(),
            closes,
            source: DataSource::Synthetic,
        })
    }
}
