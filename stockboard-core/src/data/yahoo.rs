//! Yahoo Finance price provider.
//!
//! Fetches daily closes from Yahoo's v8 chart API using the `range=<n>d`
//! query, one request per ticker. There is no retry loop: any failure is
//! reported to the caller, which fails the whole acquisition pass.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use super::provider::{CloseSeries, DailyClose, DataError, DataSource, PriceProvider};
use serde::Deserialize;
use std::time::Duration;

const CHART_ENDPOINT: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance price provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol and lookback window.
    fn chart_url(symbol: &str, days: u32) -> String {
        format!("{CHART_ENDPOINT}/{symbol}?range={days}d&interval=1d")
    }

    /// Parse the chart API response into daily closes.
    ///
    /// A well-formed result with no trading data (no timestamps, or only null
    /// closes) is an empty series, not an error.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<DailyClose>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // Timestamps mark the session open; shift by the exchange offset so the
        // calendar date is the exchange's trading day.
        let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

        // Yahoo omits `timestamp` when the range holds no trading sessions.
        let timestamps = data.timestamp.unwrap_or_default();
        if timestamps.is_empty() {
            tracing::debug!(symbol, "no trading sessions in range");
            return Ok(Vec::new());
        }

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut closes = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            // Null close: no trading data that day.
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };

            closes.push(DailyClose { date, close });
        }

        closes.sort_by_key(|c| c.date);
        closes.dedup_by_key(|c| c.date);
        Ok(closes)
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<CloseSeries, DataError> {
        let url = Self::chart_url(symbol, days);
        tracing::info!(symbol, days, "fetching closes from Yahoo Finance");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let closes = Self::parse_response(symbol, chart)?;
        Ok(CloseSeries {
            symbol: symbol.to_string(),
            closes,
            source: DataSource::YahooFinance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::build_price_table;
    use crate::data::TickerRegistry;
    use chrono::NaiveDate;

    fn parse(json: &str) -> Result<Vec<DailyClose>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("AAPL", resp)
    }

    #[test]
    fn url_uses_day_range() {
        let url = YahooProvider::chart_url("GOOGL", 20);
        assert!(url.ends_with("/GOOGL?range=20d&interval=1d"));
    }

    #[test]
    fn parses_closes_and_skips_nulls() {
        // 2024-03-04 14:30 UTC, 2024-03-05 14:30 UTC, 2024-03-06 14:30 UTC
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"gmtoffset": -18000},
                    "timestamp": [1709562600, 1709649000, 1709735400],
                    "indicators": {"quote": [{"close": [175.1, null, 169.12]}]}
                }],
                "error": null
            }
        }"#;
        let closes = parse(json).unwrap();
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(closes[1].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(closes[1].close, 169.12);
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let json = r#"{"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}}"#;
        assert!(matches!(parse(json), Err(DataError::SymbolNotFound { .. })));
    }

    #[test]
    fn other_error_maps_to_format_changed() {
        let json = r#"{"chart": {"result": null,
            "error": {"code": "Bad Request", "description": "Invalid input"}}}"#;
        assert!(matches!(parse(json), Err(DataError::ResponseFormatChanged(_))));
    }

    #[test]
    fn all_null_closes_is_empty_series() {
        let json = r#"{"chart": {"result": [{
            "timestamp": [1709562600],
            "indicators": {"quote": [{"close": [null]}]}
        }], "error": null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn missing_timestamps_is_empty_series() {
        let json = r#"{"chart": {"result": [{
            "meta": {"gmtoffset": -18000},
            "indicators": {"quote": [{}]}
        }], "error": null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn missing_quote_with_timestamps_is_format_change() {
        let json = r#"{"chart": {"result": [{
            "timestamp": [1709562600],
            "indicators": {"quote": []}
        }], "error": null}}"#;
        assert!(matches!(parse(json), Err(DataError::ResponseFormatChanged(_))));
    }

    #[test]
    fn malformed_body_fails_to_deserialize() {
        let json = r#"{"chart": {"result": [{"timestamp": [1709562600]}], "error": null}}"#;
        assert!(serde_json::from_str::<ChartResponse>(json).is_err());
    }

    /// Serves canned chart JSON per symbol through the real parser.
    struct CannedChart {
        empty_symbol: &'static str,
    }

    impl PriceProvider for CannedChart {
        fn name(&self) -> &str {
            "canned_chart"
        }

        fn fetch_closes(&self, symbol: &str, _days: u32) -> Result<CloseSeries, DataError> {
            let json = if symbol == self.empty_symbol {
                r#"{"chart": {"result": [{
                    "timestamp": [1709562600],
                    "indicators": {"quote": [{"close": [null]}]}
                }], "error": null}}"#
            } else {
                r#"{"chart": {"result": [{
                    "meta": {"gmtoffset": -18000},
                    "timestamp": [1709562600],
                    "indicators": {"quote": [{"close": [175.1]}]}
                }], "error": null}}"#
            };
            let resp: ChartResponse = serde_json::from_str(json)
                .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;
            Ok(CloseSeries {
                symbol: symbol.to_string(),
                closes: YahooProvider::parse_response(symbol, resp)?,
                source: DataSource::YahooFinance,
            })
        }
    }

    #[test]
    fn company_without_sessions_keeps_its_row() {
        let registry = TickerRegistry::default();
        let provider = CannedChart { empty_symbol: "TSLA" };
        let table = build_price_table(&provider, 1, &registry).unwrap();

        assert_eq!(table.shape(), (8, 1));
        assert_eq!(table.row("tesla"), Some(&[None][..]));
        assert_eq!(table.populated_cells(), 7);
    }
}
