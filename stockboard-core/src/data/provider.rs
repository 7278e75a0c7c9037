//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over closing-price sources (Yahoo Finance,
//! the offline synthetic generator) so the acquisition step can be tested with
//! counting stubs and run without network access.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily closing price as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("provider returned no closes for {symbol}")]
    EmptySeries { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Daily closes for a single ticker, ascending by date.
#[derive(Debug, Clone)]
pub struct CloseSeries {
    pub symbol: String,
    pub closes: Vec<DailyClose>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Synthetic,
}

/// Source of daily closing prices.
///
/// A provider only knows how to answer "the last `days` days of closes for
/// `symbol`". Memoization sits above this trait.
pub trait PriceProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the most recent `days` days of daily closes for `symbol`.
    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        (**self).fetch_closes(symbol, days)
    }
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        (**self).fetch_closes(symbol, days)
    }
}
