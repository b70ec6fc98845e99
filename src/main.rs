use analytics::{Indicator, RiskEngine};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{RiskOverrides, RiskSettings, load_config};
use core_types::ReturnSeries;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the quantrisk command-line tool.
fn main() -> Result<()> {
    // A missing .env file is fine; it only carries QUANTRISK__* overrides.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Var(args) => handle_var(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Portfolio risk and performance indicators from periodic return series.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every indicator for a portfolio against its benchmark.
    Report(ReportArgs),
    /// Compute the parametric Value-at-Risk at a chosen tail probability.
    Var(VarArgs),
}

#[derive(Parser)]
struct InputArgs {
    /// JSON file of the form {"portfolio": [...], "benchmark": [...]}.
    #[arg(long)]
    input: PathBuf,

    /// Settings file (defaults to ./quantrisk.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: RiskOverrides,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Only report this indicator (repeatable), e.g. --indicator sharpe.
    #[arg(long = "indicator", value_name = "NAME")]
    indicators: Vec<Indicator>,
}

#[derive(Parser)]
struct VarArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Tail probability, e.g. 0.01 for the 99% VaR.
    #[arg(long, default_value_t = analytics::DEFAULT_VAR_ALPHA)]
    alpha: f64,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> Result<()> {
    let engine = build_engine(&args.input)?;
    let mut report = engine.report();
    report.retain(&args.indicators);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Indicator", "Value"]);
    // Registry order keeps related indicators next to each other.
    for indicator in Indicator::ALL {
        if let Some(value) = report.value(indicator.name()) {
            table.add_row(vec![indicator.name().to_string(), format_value(value)]);
        }
    }
    println!("{table}");
    Ok(())
}

fn handle_var(args: VarArgs) -> Result<()> {
    let engine = build_engine(&args.input)?;
    let var = engine.param_var(args.alpha);
    info!(alpha = args.alpha, var, "Parametric VaR computed");
    println!("{}", format_value(var));
    Ok(())
}

/// Resolves settings (file, environment, then flags) and builds the engine.
fn build_engine(args: &InputArgs) -> Result<RiskEngine> {
    let mut settings: RiskSettings = load_config(args.config.as_deref())
        .context("Failed to load settings")?
        .risk;
    settings.apply(&args.overrides);
    settings.validate()?;

    let series = read_series(&args.input)?;
    info!(
        input = %args.input.display(),
        periods = series.portfolio.len(),
        period = %settings.period,
        formula_set = %settings.formula_set,
        "Computing indicators"
    );

    let engine = RiskEngine::from_series(
        series,
        settings.risk_free_rate,
        settings.period,
        settings.formula_set,
    )?;
    Ok(engine)
}

fn read_series(path: &Path) -> Result<ReturnSeries> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid return series in {}", path.display()))
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let label = if value > 0.0 { "inf" } else { "-inf" };
        label.to_string()
    } else {
        format!("{value:.6}")
    }
}
