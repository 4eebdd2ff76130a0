use anyhow::Context;
use api_client::FredClient;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{init_tracing, load_api_key, load_config, load_config_from, Config};
use core_types::Indicator;
use engine::{
    ComparisonReport, Dashboard, EconomyReport, IndicatorPanel, ProgressListener, SeriesOutcome,
};
use fetcher::SeriesFetcher;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// The main entry point for the macro dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine: the key and overrides may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;
    // Dropping the guard stops the file writer, so it lives until main returns.
    let _log_guard = init_tracing(&config.logging)?;

    let output = cli.output();
    match cli.command {
        Commands::Economies => handle_economies(&config, output.json),
        Commands::Show(args) => handle_show(&config, args, &output).await,
        Commands::Compare(args) => handle_compare(&config, args, &output).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Macroeconomic indicators from FRED: CPI, GDP and unemployment by economy.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print reports as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Number of most recent rows to print per table (tables only).
    #[arg(long, global = true, default_value_t = 24)]
    tail: usize,

    /// Path to a configuration file. Defaults to an optional `config.toml`.
    #[arg(long, global = true)]
    config: Option<String>,
}

impl Cli {
    fn output(&self) -> Output {
        Output {
            json: self.json,
            tail: self.tail,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the tracked economies and their FRED series codes.
    Economies,
    /// Raw values and year-over-year change for one economy.
    Show(ShowArgs),
    /// Compare one indicator's raw values across economies.
    Compare(CompareArgs),
}

#[derive(Parser)]
struct ShowArgs {
    /// The economy id (e.g. "us", "jp").
    economy: String,

    /// Limit the report to one indicator (e.g. "CPI", "real-gdp").
    #[arg(long)]
    indicator: Option<Indicator>,
}

#[derive(Parser)]
struct CompareArgs {
    /// The indicator to compare (e.g. "CPI", "unemployment").
    #[arg(long, default_value_t = Indicator::Cpi)]
    indicator: Indicator,

    /// Economy ids to compare. Defaults to the first two tracked economies.
    economies: Vec<String>,
}

struct Output {
    json: bool,
    tail: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_economies(config: &Config, json: bool) -> anyhow::Result<()> {
    let registry = config.registry()?;

    if json {
        let economies: Vec<_> = registry.economies().collect();
        println!("{}", serde_json::to_string_pretty(&economies)?);
        return Ok(());
    }

    let mut table = new_table(vec![
        "Id".to_string(),
        "Economy".to_string(),
        Indicator::Cpi.to_string(),
        Indicator::RealGdp.to_string(),
        Indicator::NominalGdp.to_string(),
        Indicator::UnemploymentRate.to_string(),
    ]);
    for economy in registry.economies() {
        let mut row = vec![economy.id.clone(), economy.label.clone()];
        row.extend(
            Indicator::ALL
                .iter()
                .map(|indicator| economy.provider_code(*indicator).to_string()),
        );
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

async fn handle_show(config: &Config, args: ShowArgs, output: &Output) -> anyhow::Result<()> {
    let (dashboard, spinner) = build_dashboard(config)?;

    match args.indicator {
        Some(indicator) => {
            let panel = dashboard.indicator_panel(&args.economy, indicator).await;
            spinner.finish_and_clear();
            let panel = panel?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&panel)?);
            } else {
                print_panel(&panel, output.tail);
            }
        }
        None => {
            let report = dashboard.economy_report(&args.economy).await;
            spinner.finish_and_clear();
            let report = report?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_economy_report(&report, output.tail);
            }
        }
    }
    Ok(())
}

async fn handle_compare(config: &Config, args: CompareArgs, output: &Output) -> anyhow::Result<()> {
    let (dashboard, spinner) = build_dashboard(config)?;

    let economy_ids: Vec<String> = if args.economies.is_empty() {
        dashboard
            .registry()
            .economies()
            .take(2)
            .map(|e| e.id.clone())
            .collect()
    } else {
        args.economies
    };
    let economy_ids: Vec<&str> = economy_ids.iter().map(String::as_str).collect();

    let report = dashboard.compare(&economy_ids, args.indicator).await;
    spinner.finish_and_clear();
    let report = report?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_comparison(&report, output.tail);
    }
    Ok(())
}

/// Wires the provider client, cache and registry into a `Dashboard`.
///
/// The credential is checked here, so a missing key fails before any
/// request is made.
fn build_dashboard(config: &Config) -> anyhow::Result<(Dashboard, ProgressBar)> {
    let api_key = load_api_key()?;
    let registry = config.registry()?;
    let client = FredClient::new(&config.provider, api_key)?;
    let fetcher = SeriesFetcher::new(Arc::new(client), config.window, config.cache.ttl);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    tracing::info!(
        economies = registry.len(),
        base_url = %config.provider.base_url,
        "Dashboard ready."
    );

    let dashboard = Dashboard::new(Arc::new(registry), fetcher)
        .with_progress(Arc::new(Spinner(spinner.clone())));
    Ok((dashboard, spinner))
}

/// Shows the series currently being fetched on the terminal spinner.
struct Spinner(ProgressBar);

impl ProgressListener for Spinner {
    fn fetching(&self, economy_label: &str, indicator: Indicator) {
        self.0
            .set_message(format!("Fetching {} for {}...", indicator, economy_label));
    }
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_economy_report(report: &EconomyReport, tail: usize) {
    println!("{} ({})", report.economy_label, report.economy_id);
    for panel in &report.panels {
        println!();
        print_panel(panel, tail);
    }
}

fn print_panel(panel: &IndicatorPanel, tail: usize) {
    println!(
        "{} - {} [{}]",
        panel.economy_label, panel.indicator, panel.provider_code
    );
    match &panel.outcome {
        SeriesOutcome::Data(series) => {
            let mut table = new_table(vec![
                "Date".to_string(),
                panel.indicator.to_string(),
                "YoY %".to_string(),
            ]);
            for row in last_n(&series.rows, tail) {
                table.add_row(vec![
                    row.date.to_string(),
                    format_value(row.value),
                    format_value(row.yoy_pct),
                ]);
            }
            println!("{table}");
        }
        SeriesOutcome::NoData(notice) => println!("no data: {}", notice.message),
    }
}

fn print_comparison(report: &ComparisonReport, tail: usize) {
    if report.is_empty() {
        println!("No data available for {} in any selected economy.", report.indicator);
    } else {
        let mut header = vec!["Date".to_string()];
        header.extend(report.table.columns.iter().cloned());
        let mut table = new_table(header);
        for row in last_n(&report.table.rows, tail) {
            let mut cells = vec![row.date.to_string()];
            cells.extend(row.cells.iter().map(|cell| match cell {
                Some(value) => format_value(*value),
                None => "-".to_string(),
            }));
            table.add_row(cells);
        }
        println!("{}", report.indicator);
        println!("{table}");
    }

    for notice in &report.notices {
        println!("no data: {}", notice.message);
    }
}

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn last_n<T>(rows: &[T], n: usize) -> &[T] {
    &rows[rows.len().saturating_sub(n)..]
}

fn format_value(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
