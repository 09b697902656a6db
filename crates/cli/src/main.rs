//! # insight-cli
//!
//! Command-line interface for the metric insight engine.

mod loader;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use insight_facade::{
    detect_anomalies, forecast_next_value, ComparisonPeriod, Decomposer, InsightConfig,
    InsightPipeline,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Trend, seasonality and anomaly insights for business metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: decomposition, trend, anomalies, change points, forecast
    Analyze(CommonArgs),

    /// Print only the seasonal decomposition
    Decompose(CommonArgs),

    /// Detect anomalies directly on the raw series
    Anomalies(CommonArgs),

    /// Forecast ahead with the linear trend (days) and the seasonal pattern (points)
    Forecast {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of points to forecast
        #[arg(short, long, default_value = "7")]
        steps: usize,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input file (CSV or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Value column name (default: `value`)
    #[arg(short, long)]
    column: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comparison period (wow, mom, qoq, yoy)
    #[arg(short, long)]
    period: Option<ComparisonPeriod>,

    /// Samples per seasonal cycle
    #[arg(long)]
    seasonal_period: Option<usize>,

    /// Anomaly z-score threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CommonArgs {
    /// Configuration file (or defaults) with command-line overrides applied.
    fn config(&self) -> Result<InsightConfig> {
        let mut config = match &self.config {
            Some(path) => InsightConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => InsightConfig::default(),
        };
        if let Some(period) = self.period {
            config.trend.period = period;
        }
        if let Some(seasonal_period) = self.seasonal_period {
            config.decomposition.seasonal_period = seasonal_period;
        }
        if let Some(threshold) = self.threshold {
            config.anomaly.threshold = threshold;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        match &self.output {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "results written");
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ForecastOutput {
    metric: String,
    steps: usize,
    linear: f64,
    seasonal: Vec<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("insight=info,insight_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let config = args.config()?;
            let series = loader::load_series(&args.input, args.column.as_deref())?;
            info!(metric = series.name(), points = series.len(), "analyzing");
            let insight = InsightPipeline::new(&config).analyze(&series);
            args.emit(&insight)
        }
        Commands::Decompose(args) => {
            let config = args.config()?;
            let series = loader::load_series(&args.input, args.column.as_deref())?;
            let pipeline = InsightPipeline::new(&config);
            let decomposition = pipeline.decomposer().decompose(series.values());
            args.emit(&decomposition)
        }
        Commands::Anomalies(args) => {
            let config = args.config()?;
            let series = loader::load_series(&args.input, args.column.as_deref())?;
            let anomalies = detect_anomalies(series.values(), config.anomaly.threshold);
            info!(metric = series.name(), count = anomalies.len(), "anomalies detected");
            args.emit(&anomalies)
        }
        Commands::Forecast { common, steps } => {
            let config = common.config()?;
            let series = loader::load_series(&common.input, common.column.as_deref())?;
            let pipeline = InsightPipeline::new(&config);
            let output = ForecastOutput {
                metric: series.name().to_string(),
                steps,
                linear: forecast_next_value(series.values(), series.timestamps(), steps),
                seasonal: pipeline.predict_seasonal_pattern(&series, steps),
            };
            common.emit(&output)
        }
    }
}
