//! Stockboard CLI — one render pass of the dashboard, printed to stdout.
//!
//! Commands:
//! - `companies` — list the ticker registry and the current selection
//! - `table` — the selected rows of the wide price table (text or JSON records)
//! - `long` — the long table as CSV (`Date,Name,Stock Prices(USD)`)
//! - `chart` — the line chart as a Vega-Lite JSON document
//!
//! Parameters come from the config file and can be overridden per run.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stockboard_core::{
    AppConfig, Dashboard, DashboardParams, LongTable, Lookback, PriceProvider, PriceRange,
    RenderOutput, SyntheticProvider, TickerRegistry, WidePriceTable, YahooProvider,
};

#[derive(Parser)]
#[command(
    name = "stockboard",
    about = "Stockboard CLI — closing prices for a fixed set of large caps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file. Defaults to <config dir>/stockboard/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the offline synthetic provider instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Lookback window in days (1-50).
    #[arg(long, global = true)]
    days: Option<u32>,

    /// Comma-separated company names, e.g. apple,google.
    #[arg(long, global = true, value_delimiter = ',')]
    companies: Option<Vec<String>>,

    /// Chart y-axis minimum (0-3500).
    #[arg(long, global = true)]
    min: Option<f64>,

    /// Chart y-axis maximum (0-3500).
    #[arg(long, global = true)]
    max: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registry companies and mark the selected ones.
    Companies,
    /// Print the selected rows of the wide price table.
    Table {
        /// Emit JSON records instead of aligned text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the long table as CSV.
    Long,
    /// Write the chart as a Vega-Lite JSON document.
    Chart,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let registry = TickerRegistry::default();
    let params = resolve_params(&cli, &config, &registry)?;

    if let Commands::Companies = cli.command {
        return print_companies(&registry, &params);
    }

    let offline = cli.offline || config.provider.offline;
    let provider = build_provider(&config, offline)?;
    tracing::info!(provider = provider.name(), days = params.days.days(), "rendering");

    let mut dashboard = Dashboard::new(provider, registry);
    let output = dashboard.render(&params);
    let output = check(output)?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Companies => Ok(()),
        Commands::Table { json } => {
            let table = output.table.as_ref().context("render produced no table")?;
            if json {
                serde_json::to_writer_pretty(&mut stdout, table)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", format_table(table))?;
            }
            Ok(())
        }
        Commands::Long => {
            let long = output.long.as_ref().context("render produced no long table")?;
            write_long_csv(&mut stdout, long)
        }
        Commands::Chart => {
            let (Some(long), Some(chart)) = (output.long.as_ref(), output.chart.as_ref()) else {
                bail!("render produced no chart");
            };
            serde_json::to_writer_pretty(&mut stdout, &chart.to_vega_lite(long))?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

/// Log to stderr so stdout stays machine-readable. Level from `RUST_LOG`,
/// default `warn`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let fallback = dirs::config_dir().map(|d| d.join("stockboard").join("config.toml"));
    let config = AppConfig::load_or_default(explicit, fallback.as_deref())?;
    Ok(config)
}

/// Config defaults with command-line overrides applied.
fn resolve_params(
    cli: &Cli,
    config: &AppConfig,
    registry: &TickerRegistry,
) -> Result<DashboardParams> {
    let mut params = config.initial_params(registry)?;
    if let Some(days) = cli.days {
        params.days = Lookback::new(days)?;
    }
    if cli.min.is_some() || cli.max.is_some() {
        let lo = cli.min.unwrap_or(params.price_range.lo());
        let hi = cli.max.unwrap_or(params.price_range.hi());
        params.price_range = PriceRange::new(lo, hi)?;
    }
    if let Some(companies) = &cli.companies {
        params.selection = companies
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
    }
    Ok(params)
}

fn build_provider(config: &AppConfig, offline: bool) -> Result<Box<dyn PriceProvider>> {
    if offline {
        return Ok(Box::new(SyntheticProvider::ending_today(config.provider.seed)));
    }
    let yahoo = YahooProvider::new(config.provider.timeout()).context("build HTTP client")?;
    Ok(Box::new(yahoo))
}

/// Turn a failed pass into an error carrying the user-facing message.
fn check(output: RenderOutput) -> Result<RenderOutput> {
    match &output.error {
        None => Ok(output),
        Some(err) => {
            tracing::error!(error = %err, "render failed");
            bail!("{}", err.user_message())
        }
    }
}

fn print_companies(registry: &TickerRegistry, params: &DashboardParams) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{:<3} {:<12} {:<8}", "", "Name", "Ticker")?;
    writeln!(stdout, "{}", "-".repeat(24))?;
    for entry in registry.entries() {
        let mark = if params.selection.contains(&entry.name) { "*" } else { "" };
        writeln!(stdout, "{:<3} {:<12} {:<8}", mark, entry.name, entry.ticker)?;
    }
    Ok(())
}

/// Aligned text rendering of the wide table. Missing closes print as `-`.
fn format_table(table: &WidePriceTable) -> String {
    let labels = table.date_labels();
    let mut out = format!("{:<12}", "Name");
    for label in &labels {
        out.push_str(&format!(" {label:>18}"));
    }
    out.push('\n');
    out.push_str(&"-".repeat(12 + 19 * labels.len()));
    out.push('\n');
    for (name, cells) in table.rows() {
        out.push_str(&format!("{name:<12}"));
        for cell in cells {
            match cell {
                Some(price) => out.push_str(&format!(" {price:>18.2}")),
                None => out.push_str(&format!(" {:>18}", "-")),
            }
        }
        out.push('\n');
    }
    out
}

fn write_long_csv<W: Write>(writer: W, long: &LongTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in long.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockboard_core::data::DailyClose;
    use stockboard_core::LongRow;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stockboard").chain(args.iter().copied())).unwrap()
    }

    fn long_fixture() -> LongTable {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        LongTable::new(vec![
            LongRow {
                date: d(4),
                name: "apple".into(),
                price: 175.1,
            },
            LongRow {
                date: d(5),
                name: "apple".into(),
                price: 170.12,
            },
        ])
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["long", "--days", "5", "--companies", "apple,google", "--offline"]);
        assert!(matches!(cli.command, Commands::Long));
        assert_eq!(cli.days, Some(5));
        assert_eq!(cli.companies, Some(vec!["apple".to_string(), "google".to_string()]));
        assert!(cli.offline);
    }

    #[test]
    fn table_json_flag() {
        let cli = parse(&["table", "--json"]);
        assert!(matches!(cli.command, Commands::Table { json: true }));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["stockboard"]).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let cli = parse(&["chart", "--days", "7", "--max", "500", "--companies", " Apple ,meta"]);
        let params =
            resolve_params(&cli, &AppConfig::default(), &TickerRegistry::default()).unwrap();
        assert_eq!(params.days.days(), 7);
        assert_eq!(params.price_range, PriceRange::new(0.0, 500.0).unwrap());
        assert_eq!(params.selection, vec!["apple", "meta"]);
    }

    #[test]
    fn no_overrides_keep_defaults() {
        let cli = parse(&["table"]);
        let params =
            resolve_params(&cli, &AppConfig::default(), &TickerRegistry::default()).unwrap();
        assert_eq!(params, DashboardParams::default());
    }

    #[test]
    fn out_of_range_overrides_are_errors() {
        let registry = TickerRegistry::default();
        let config = AppConfig::default();
        assert!(resolve_params(&parse(&["long", "--days", "0"]), &config, &registry).is_err());
        let crossed = parse(&["long", "--min", "900", "--max", "100"]);
        assert!(resolve_params(&crossed, &config, &registry).is_err());
        assert!(resolve_params(&parse(&["long", "--max", "4000"]), &config, &registry).is_err());
    }

    #[test]
    fn long_csv_header_and_labels() {
        let mut buf = Vec::new();
        write_long_csv(&mut buf, &long_fixture()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,Name,Stock Prices(USD)");
        assert_eq!(lines[1], "04 March 2024,apple,175.1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn text_table_marks_missing_cells() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let close = |day, close| DailyClose { date: d(day), close };
        let table = WidePriceTable::from_rows(vec![
            ("apple".to_string(), vec![close(4, 175.0), close(5, 170.0)]),
            ("meta".to_string(), vec![close(5, 500.0)]),
        ]);
        let text = format_table(&table);
        assert!(text.starts_with("Name"));
        assert!(text.contains("04 March 2024"));
        let meta = text.lines().find(|l| l.starts_with("meta")).unwrap();
        assert!(meta.contains('-'));
        assert!(meta.contains("500.00"));
    }

    #[test]
    fn failed_render_carries_user_message() {
        let mut dash = Dashboard::new(
            SyntheticProvider::new(1, NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()),
            TickerRegistry::default(),
        );
        let params = DashboardParams {
            selection: vec![],
            ..DashboardParams::default()
        };
        let err = check(dash.render(&params)).unwrap_err();
        assert_eq!(err.to_string(), "Please select at least one company.");
    }
}
