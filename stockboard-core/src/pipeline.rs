//! The dashboard pipeline: parameters in, tables and chart encoding out.
//!
//! `Dashboard::render` is the whole core as seen by a front-end. The shell
//! calls it after every parameter change and draws whatever comes back; the
//! only state carried between calls is the price-table memo.

use serde::{Deserialize, Serialize};

use crate::acquire::PriceTableCache;
use crate::chart::ChartSpec;
use crate::data::{PriceProvider, TickerRegistry, DEFAULT_SELECTION};
use crate::error::PipelineError;
use crate::reshape::{melt, select_rows};
use crate::table::{LongTable, WidePriceTable};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 50;
pub const DEFAULT_DAYS: u32 = 20;

pub const PRICE_FLOOR: f64 = 0.0;
pub const PRICE_CEILING: f64 = 3500.0;

/// Lookback window in days, within [MIN_DAYS, MAX_DAYS].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Lookback(u32);

impl Lookback {
    pub fn new(days: u32) -> Result<Self, PipelineError> {
        if (MIN_DAYS..=MAX_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(PipelineError::InvalidInput(format!(
                "days must be between {MIN_DAYS} and {MAX_DAYS}, got {days}"
            )))
        }
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// One day more, saturating at MAX_DAYS.
    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(MAX_DAYS))
    }

    /// One day less, saturating at MIN_DAYS.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(MIN_DAYS))
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self(DEFAULT_DAYS)
    }
}

impl TryFrom<u32> for Lookback {
    type Error = PipelineError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Lookback> for u32 {
    fn from(l: Lookback) -> u32 {
        l.0
    }
}

/// Y-axis display range: PRICE_FLOOR <= lo <= hi <= PRICE_CEILING.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    lo: f64,
    hi: f64,
}

impl PriceRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, PipelineError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(PipelineError::InvalidInput(
                "price range bounds must be finite".into(),
            ));
        }
        if lo < PRICE_FLOOR || hi > PRICE_CEILING {
            return Err(PipelineError::InvalidInput(format!(
                "price range must lie within {PRICE_FLOOR}..={PRICE_CEILING}, got {lo}..={hi}"
            )));
        }
        if lo > hi {
            return Err(PipelineError::InvalidInput(format!(
                "price range minimum {lo} exceeds maximum {hi}"
            )));
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(self) -> f64 {
        self.lo
    }

    pub fn hi(self) -> f64 {
        self.hi
    }

    /// Move the lower bound by `delta`, clamped to [PRICE_FLOOR, hi].
    pub fn shift_lo(self, delta: f64) -> Self {
        Self {
            lo: (self.lo + delta).clamp(PRICE_FLOOR, self.hi),
            hi: self.hi,
        }
    }

    /// Move the upper bound by `delta`, clamped to [lo, PRICE_CEILING].
    pub fn shift_hi(self, delta: f64) -> Self {
        Self {
            lo: self.lo,
            hi: (self.hi + delta).clamp(self.lo, PRICE_CEILING),
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            lo: PRICE_FLOOR,
            hi: PRICE_CEILING,
        }
    }
}

/// Everything the user controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub days: Lookback,
    pub price_range: PriceRange,
    pub selection: Vec<String>,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            days: Lookback::default(),
            price_range: PriceRange::default(),
            selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Pipeline states of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Idle,
    Fetching,
    Ready,
    Filtered,
    Error,
}

/// Result of one render pass.
#[derive(Debug)]
pub struct RenderOutput {
    pub days: u32,
    /// States visited, starting at Idle. Ends at Filtered or Error.
    pub trace: Vec<PipelineState>,
    /// Selected rows of the wide table, sorted by name.
    pub table: Option<WidePriceTable>,
    pub long: Option<LongTable>,
    pub chart: Option<ChartSpec>,
    pub error: Option<PipelineError>,
}

impl RenderOutput {
    pub fn state(&self) -> PipelineState {
        self.trace.last().copied().unwrap_or(PipelineState::Idle)
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Banner text when the pass failed.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(PipelineError::user_message)
    }

    /// Whether acquisition ran against the provider rather than the memo.
    pub fn fetched(&self) -> bool {
        self.trace.contains(&PipelineState::Fetching)
    }
}

/// Owns the provider, the registry, and the price-table memo.
pub struct Dashboard<P> {
    provider: P,
    registry: TickerRegistry,
    cache: PriceTableCache,
}

impl<P: PriceProvider> Dashboard<P> {
    pub fn new(provider: P, registry: TickerRegistry) -> Self {
        Self {
            provider,
            registry,
            cache: PriceTableCache::new(),
        }
    }

    pub fn registry(&self) -> &TickerRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &PriceTableCache {
        &self.cache
    }

    /// Run one pass. Never panics on bad input or provider failure; the
    /// failure is carried in `RenderOutput::error`.
    pub fn render(&mut self, params: &DashboardParams) -> RenderOutput {
        let days = params.days.days();
        let mut trace = vec![PipelineState::Idle];

        if !self.cache.contains(days, &self.registry) {
            trace.push(PipelineState::Fetching);
        }

        let wide = match self.cache.get_or_build(&self.provider, days, &self.registry) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(days, error = %e, "render pass failed during acquisition");
                trace.push(PipelineState::Error);
                return RenderOutput::failed(days, trace, e.into());
            }
        };
        trace.push(PipelineState::Ready);

        let reshaped = select_rows(wide, &params.selection).map(|table| {
            let long = melt(&table);
            (table, long)
        });

        match reshaped {
            Ok((table, long)) => {
                trace.push(PipelineState::Filtered);
                tracing::debug!(
                    days,
                    companies = table.shape().0,
                    points = long.len(),
                    "render pass complete"
                );
                RenderOutput {
                    days,
                    trace,
                    table: Some(table),
                    long: Some(long),
                    chart: Some(ChartSpec::new(params.price_range)),
                    error: None,
                }
            }
            Err(e) => {
                if !e.is_empty_selection() {
                    tracing::warn!(days, error = %e, "render pass failed during reshape");
                }
                trace.push(PipelineState::Error);
                RenderOutput::failed(days, trace, e)
            }
        }
    }
}

impl RenderOutput {
    fn failed(days: u32, trace: Vec<PipelineState>, error: PipelineError) -> Self {
        Self {
            days,
            trace,
            table: None,
            long: None,
            chart: None,
            error: Some(error),
        }
    }
}
