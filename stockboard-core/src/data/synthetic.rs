//! Offline synthetic price provider.
//!
//! Produces deterministic random-walk closes on business days so the dashboard
//! can run without network access. Each symbol gets its own sub-seed derived
//! from the master seed with BLAKE3, so a symbol's series does not depend on
//! the order in which symbols are requested.

use super::provider::{CloseSeries, DailyClose, DataError, DataSource, PriceProvider};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random-walk provider.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    master_seed: u64,
    end: NaiveDate,
}

impl SyntheticProvider {
    /// Series end on `end` (inclusive, rolled back to the previous business day).
    pub fn new(master_seed: u64, end: NaiveDate) -> Self {
        Self { master_seed, end }
    }

    /// Provider whose series end today.
    pub fn ending_today(master_seed: u64) -> Self {
        Self::new(master_seed, chrono::Local::now().date_naive())
    }

    fn sub_seed(&self, symbol: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// The last `count` business days up to and including `self.end`.
    fn business_days(&self, count: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(count);
        let mut day = self.end;
        while dates.len() < count {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                dates.push(day);
            }
            day -= Duration::days(1);
        }
        dates.reverse();
        dates
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        if days == 0 {
            return Err(DataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol));
        // Starting level somewhere a large-cap would plausibly trade.
        let mut price: f64 = rng.gen_range(80.0..900.0);

        let closes = self
            .business_days(days as usize)
            .into_iter()
            .map(|date| {
                let daily_return: f64 = rng.gen_range(-0.025..0.025);
                price = (price * (1.0 + daily_return)).max(1.0);
                DailyClose {
                    date,
                    close: (price * 100.0).round() / 100.0,
                }
            })
            .collect();

        Ok(CloseSeries {
            symbol: symbol.to_string(),
            closes,
            source: DataSource::Synthetic,
        })
    }
}
