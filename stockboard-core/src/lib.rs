//! Stockboard Core — closing-price acquisition and reshaping for the dashboard.
//!
//! - Price providers (Yahoo Finance, offline synthetic) behind one trait
//! - The fixed ticker registry
//! - Memoized wide-table acquisition
//! - Selection and wide → long reshape
//! - The render pipeline with its typed two-tier error
//! - Chart encoding and TOML configuration

pub mod acquire;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod reshape;
pub mod table;
/// Instrumented providers for tests and benchmarks of downstream crates.
#[doc(hidden)]
pub mod testing;

pub use acquire::{build_price_table, PriceTableCache};
pub use chart::ChartSpec;
pub use config::{AppConfig, ConfigError};
pub use data::{DataError, PriceProvider, SyntheticProvider, TickerRegistry, YahooProvider};
pub use error::PipelineError;
pub use pipeline::{Dashboard, DashboardParams, Lookback, PipelineState, PriceRange, RenderOutput};
pub use reshape::{melt, select_and_melt, select_rows};
pub use table::{LongRow, LongTable, WidePriceTable};
