//! Price sources and the ticker registry

pub mod provider;
pub mod registry;
pub mod synthetic;
pub mod yahoo;

pub use provider::{CloseSeries, DailyClose, DataError, DataSource, PriceProvider};
pub use registry::{TickerEntry, TickerRegistry, DEFAULT_SELECTION};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
