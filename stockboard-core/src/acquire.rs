//! Price acquisition — fetch every registry ticker and assemble the wide table.
//!
//! `build_price_table` is the uncached operation. `PriceTableCache` memoizes it
//! per (lookback days, sorted registry entries) for the life of the process;
//! entries are never evicted since the key space is a few hundred values at most.

use std::collections::HashMap;

use crate::data::{DataError, PriceProvider, TickerEntry, TickerRegistry};
use crate::table::WidePriceTable;

/// Fetch the last `days` days of closes for every registry entry and build
/// the wide table, one row per company in registry order.
///
/// Tickers are fetched sequentially. The first provider failure aborts the
/// whole build: there is no partial table.
pub fn build_price_table<P>(
    provider: &P,
    days: u32,
    registry: &TickerRegistry,
) -> Result<WidePriceTable, DataError>
where
    P: PriceProvider + ?Sized,
{
    let mut rows = Vec::with_capacity(registry.len());
    for entry in registry.entries() {
        let series = provider.fetch_closes(&entry.ticker, days).map_err(|e| {
            tracing::warn!(
                company = %entry.name,
                ticker = %entry.ticker,
                provider = provider.name(),
                error = %e,
                "price fetch failed"
            );
            e
        })?;
        tracing::debug!(
            company = %entry.name,
            ticker = %entry.ticker,
            closes = series.closes.len(),
            "fetched closes"
        );
        rows.push((entry.name.clone(), series.closes));
    }
    Ok(WidePriceTable::from_rows(rows))
}

/// Memoization key: lookback window plus the registry's sorted entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub days: u32,
    pub entries: Vec<TickerEntry>,
}

impl CacheKey {
    pub fn new(days: u32, registry: &TickerRegistry) -> Self {
        Self {
            days,
            entries: registry.sorted_entries(),
        }
    }
}

/// Process-lifetime memo table for `build_price_table`.
///
/// Owned by a single render loop and mutated through `&mut self`; failures are
/// not cached, so the next call with the same key fetches again.
#[derive(Debug, Default)]
pub struct PriceTableCache {
    tables: HashMap<CacheKey, WidePriceTable>,
    hits: u64,
    misses: u64,
}

impl PriceTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `(days, registry)`, building it on a miss.
    pub fn get_or_build<P>(
        &mut self,
        provider: &P,
        days: u32,
        registry: &TickerRegistry,
    ) -> Result<&WidePriceTable, DataError>
    where
        P: PriceProvider + ?Sized,
    {
        let key = CacheKey::new(days, registry);
        if self.tables.contains_key(&key) {
            self.hits += 1;
            tracing::debug!(days, "price table cache hit");
        } else {
            self.misses += 1;
            tracing::debug!(days, "price table cache miss");
            let table = build_price_table(provider, days, registry)?;
            tracing::info!(
                days,
                rows = table.shape().0,
                columns = table.shape().1,
                "built price table"
            );
            self.tables.insert(key.clone(), table);
        }
        self.tables
            .get(&key)
            .ok_or_else(|| DataError::Other("price table vanished from cache".into()))
    }

    pub fn contains(&self, days: u32, registry: &TickerRegistry) -> bool {
        self.tables.contains_key(&CacheKey::new(days, registry))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
