//! Ultra Ethernet performance report generator
//!
//! Reads the scalar result files of a simulation run and writes the text,
//! HTML or JSON performance report.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ueperf_analysis::classify::Classifier;
use ueperf_analysis::comparison::compare_against_baseline;
use ueperf_analysis::config::{load_config, ConfigSource};
use ueperf_analysis::render::write_report;
use ueperf_analysis::{
    load_results_dir, AnalyzerConfig, LoadSummary, OutputFormat, ParseErrorPolicy, ReportAssembler,
};

#[derive(Parser, Debug)]
#[command(name = "ueperf-report")]
#[command(about = "Analyze Ultra Ethernet simulation results")]
#[command(version)]
struct Cli {
    /// Directory containing .sca result files
    #[arg(long, value_name = "DIR")]
    results_dir: Option<PathBuf>,

    /// Output format (txt, html, json)
    #[arg(long, value_name = "FORMAT")]
    output_format: Option<OutputFormat>,

    /// Directory the report is written to (defaults to the results directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Skip result files that fail to parse instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Baseline result set to compare against, as NAME=DIR
    #[arg(long = "baseline", value_name = "NAME=DIR", value_parser = parse_baseline)]
    baselines: Vec<(String, PathBuf)>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_baseline(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, dir)) if !name.is_empty() && !dir.is_empty() => {
            Ok((name.to_string(), PathBuf::from(dir)))
        }
        _ => Err(format!("expected NAME=DIR, got '{}'", value)),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ueperf_report={},ueperf_analysis={},ueperf={}",
            level, level, level
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let source = match &cli.config {
        Some(path) => ConfigSource::File(path.clone()),
        None => ConfigSource::Environment,
    };
    let mut config = load_config(source).context("Failed to load configuration")?;

    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(format) = cli.output_format {
        config.output_format = format;
    }
    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if cli.skip_malformed {
        config.on_parse_error = ParseErrorPolicy::SkipFile;
    }
    Ok(config)
}

async fn load(dir: &Path, config: &AnalyzerConfig) -> Result<LoadSummary> {
    let summary = load_results_dir(dir, config)
        .await
        .with_context(|| format!("Failed to load results from {}", dir.display()))?;

    if !summary.rejected.is_empty() {
        warn!("{} malformed result files were skipped", summary.rejected.len());
    }
    info!(
        "Loaded {} configurations ({} scalars, {} vector files) from {}",
        summary.store.len(),
        summary.store.scalar_count(),
        summary.vector_files.len(),
        dir.display()
    );
    Ok(summary)
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let summary = load(&config.results_dir, &config).await?;
    if summary.store.is_empty() {
        warn!("No .{} files found in {}", config.scalar_extension, config.results_dir.display());
    }

    let classifier = Classifier::default();
    let mut assembler = ReportAssembler::new(config.title.clone())
        .source_dir(config.results_dir.clone())
        .classifier(classifier);

    if !cli.baselines.is_empty() {
        let mut comparisons = BTreeMap::new();
        for (name, dir) in &cli.baselines {
            let baseline = load(dir, &config).await?;
            comparisons.insert(
                name.clone(),
                compare_against_baseline(&summary.store, &baseline.store, &classifier),
            );
        }
        assembler = assembler.comparisons(comparisons);
    }

    let report = assembler.assemble(&summary.store);
    let written = write_report(&report, &config)
        .await
        .context("Failed to write report")?;

    for path in written {
        match path.extension().and_then(|e| e.to_str()) {
            Some("svg") => println!("📈 Plots saved to {}", path.display()),
            _ => println!("📊 Report saved to {}", path.display()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
