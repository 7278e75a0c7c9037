//! Ticker registry — the fixed display-name → ticker mapping.
//!
//! Entries keep their declaration order; that order is the row order of the
//! wide price table. Names are unique.

use serde::{Deserialize, Serialize};

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickerEntry {
    pub name: String,
    pub ticker: String,
}

/// Ordered, name-unique mapping from company display name to ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRegistry {
    entries: Vec<TickerEntry>,
}

/// Company names selected when the dashboard opens.
pub const DEFAULT_SELECTION: [&str; 4] = ["google", "apple", "meta", "amazon"];

impl TickerRegistry {
    /// Build a registry from (name, ticker) pairs. Later duplicates of a name
    /// are rejected.
    pub fn new<I, N, T>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut entries: Vec<TickerEntry> = Vec::new();
        for (name, ticker) in pairs {
            let name = name.into();
            if entries.iter().any(|e| e.name == name) {
                return Err(format!("duplicate company name in registry: {name}"));
            }
            entries.push(TickerEntry {
                name,
                ticker: ticker.into(),
            });
        }
        Ok(Self { entries })
    }

    /// The eight large-cap US companies the dashboard charts.
    pub fn us_large_caps() -> Self {
        let entries = [
            ("apple", "AAPL"),
            ("microsoft", "MSFT"),
            ("google", "GOOGL"),
            ("amazon", "AMZN"),
            ("meta", "META"),
            ("nvidia", "NVDA"),
            ("tesla", "TSLA"),
            ("netflix", "NFLX"),
        ]
        .into_iter()
        .map(|(name, ticker)| TickerEntry {
            name: name.to_string(),
            ticker: ticker.to_string(),
        })
        .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }

    /// Display names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Ticker for a display name.
    pub fn ticker(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.ticker.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by (name, ticker); order-insensitive identity of the registry.
    pub fn sorted_entries(&self) -> Vec<TickerEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort();
        sorted
    }
}

impl Default for TickerRegistry {
    fn default() -> Self {
        Self::us_large_caps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_eight_companies() {
        let r = TickerRegistry::default();
        assert_eq!(r.len(), 8);
        assert_eq!(r.ticker("google"), Some("GOOGL"));
        assert_eq!(r.ticker("meta"), Some("META"));
        assert_eq!(r.ticker("ibm"), None);
        assert_eq!(r.names()[0], "apple");
        assert_eq!(r.names()[7], "netflix");
    }

    #[test]
    fn default_selection_is_in_registry() {
        let r = TickerRegistry::default();
        for name in DEFAULT_SELECTION {
            assert!(r.contains(name), "{name} missing");
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = TickerRegistry::new([("apple", "AAPL"), ("apple", "AAPL2")]).unwrap_err();
        assert!(err.contains("apple"));
    }

    #[test]
    fn sorted_entries_ignore_declaration_order() {
        let a = TickerRegistry::new([("b", "B"), ("a", "A")]).unwrap();
        let b = TickerRegistry::new([("a", "A"), ("b", "B")]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.sorted_entries(), b.sorted_entries());
    }
}
