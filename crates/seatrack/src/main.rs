use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, Table};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seatrack_core::config::PipelineConfig;
use seatrack_core::outputs;
use seatrack_core::pipeline::{self, RunReport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Seabird GPS trip processing pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a directory of logger files into one aggregate CSV
    Process(ProcessArgs),
    /// Print per-bird trip statistics for a directory of logger files
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Directory containing the raw logger CSV files
    #[arg(long)]
    input: PathBuf,
    /// Path of the aggregate CSV to write
    #[arg(long)]
    output: PathBuf,
    /// TOML file overriding the pipeline defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Directory containing the raw logger CSV files
    #[arg(long)]
    input: PathBuf,
    /// TOML file overriding the pipeline defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<()> {
    let config = PipelineConfig::load(args.config.as_deref())
        .context("failed to load pipeline config")?;

    let output = pipeline::run_pipeline(&args.input, &config)
        .with_context(|| format!("failed to process {}", args.input.display()))?;
    log_report(&output.report);

    outputs::write_aggregate_csv(&output.table, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), rows = output.table.height(), "aggregate table written");

    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<()> {
    let config = PipelineConfig::load(args.config.as_deref())
        .context("failed to load pipeline config")?;

    let output = pipeline::run_pipeline(&args.input, &config)
        .with_context(|| format!("failed to process {}", args.input.display()))?;
    log_report(&output.report);

    let summary = outputs::trip_summary(&output.table).context("failed to summarize trips")?;
    println!("{}", render_summary(&summary)?);

    Ok(())
}

fn log_report(report: &RunReport) {
    info!(
        files_seen = report.files_seen,
        files_parsed = report.files_parsed,
        duplicates_skipped = report.duplicates_skipped,
        placeholder_trajectories = report.placeholder_trajectories,
        rows_before_filter = report.rows_before_filter,
        rows_after_filter = report.rows_after_filter,
        "run report"
    );

    if report.rows_after_filter == 0 {
        warn!("no rows survived the completeness filter");
    }
}

fn render_summary(summary: &polars::prelude::DataFrame) -> Result<String> {
    let bands = summary.column("band_id")?.str()?;
    let fixes = summary.column("fixes")?.u32()?;
    let max_distance = summary.column("max_colony_distance_km")?.f64()?;
    let duration = summary.column("trip_duration_h")?.f64()?;
    let mean_speed = summary.column("mean_speed_km_h")?.f64()?;
    let max_speed = summary.column("max_speed_km_h")?.f64()?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Band",
        "Fixes",
        "Max dist (km)",
        "Trip (h)",
        "Mean speed (km/h)",
        "Max speed (km/h)",
    ]);

    for idx in 0..summary.height() {
        let float_cell = |value: Option<f64>| {
            Cell::new(value.map_or("-".to_string(), |v| format!("{v:.2}")))
                .set_alignment(CellAlignment::Right)
        };

        table.add_row(vec![
            Cell::new(bands.get(idx).unwrap_or("-")),
            Cell::new(fixes.get(idx).map_or("-".to_string(), |v| v.to_string()))
                .set_alignment(CellAlignment::Right),
            float_cell(max_distance.get(idx)),
            float_cell(duration.get(idx)),
            float_cell(mean_speed.get(idx)),
            float_cell(max_speed.get(idx)),
        ]);
    }

    Ok(table.to_string())
}
