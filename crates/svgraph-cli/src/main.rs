//! svgraph: render a smooth line chart from `(x, y)` samples to SVG.
//!
//! Reads samples from a JSON file (`[[x, y], ...]`), lays them out with
//! the svgraph pipeline and writes the SVG document to a file or stdout.
//! Without an input file the built-in demo series is rendered.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin svgraph -- [OPTIONS] [INPUT]
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`
//! (default `svgraph=info`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use svgraph_export::SvgMetadata;
use svgraph_pipeline::diagnostics::{Clock, PipelineDiagnostics};
use svgraph_pipeline::{ChartConfig, ChartError, Sample};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Series rendered when no input file is given.
const DEMO_SERIES: [(f64, f64); 5] = [
    (0.0, 280.0),
    (10.0, 80.0),
    (40.0, 50.0),
    (150.0, 160.0),
    (380.0, 10.0),
];

/// Render a smooth line chart from `(x, y)` samples to SVG.
#[derive(Parser)]
#[command(name = "svgraph", version)]
struct Cli {
    /// JSON file holding the samples as `[[x, y], ...]`.
    ///
    /// When omitted, a built-in demo series is rendered.
    input: Option<PathBuf>,

    /// Curvature coefficient in [0, 1]; 0 draws straight segments.
    #[arg(long, default_value_t = ChartConfig::DEFAULT_SMOOTHING)]
    smoothing: f64,

    /// Padding around the plot in pixels.
    #[arg(long, default_value_t = ChartConfig::DEFAULT_MARGIN)]
    margin: f64,

    /// Stretch the chart horizontally to fill `--container-width`.
    #[arg(long, requires = "container_width")]
    scaled: bool,

    /// Width of the rendering target in pixels.
    #[arg(long)]
    container_width: Option<f64>,

    /// Horizontal axis label.
    #[arg(long, default_value = ChartConfig::DEFAULT_X_NAME)]
    x_name: String,

    /// Vertical axis label.
    #[arg(long, default_value = ChartConfig::DEFAULT_Y_NAME)]
    y_name: String,

    /// Full chart config as a JSON string.
    ///
    /// When provided, all other chart flags are ignored. The JSON must be
    /// a valid `ChartConfig` serialization; missing fields use defaults.
    #[arg(long)]
    config_json: Option<String>,

    /// Write the SVG to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (defaults to the input file stem).
    #[arg(long)]
    title: Option<String>,

    /// Embed the chart config as JSON metadata in the SVG.
    #[arg(long)]
    embed_config: bool,

    /// Print per-stage diagnostics.
    #[arg(long)]
    diagnostics: bool,

    /// Print diagnostics as JSON instead of a human-readable report.
    #[arg(long, requires = "diagnostics")]
    json: bool,

    /// Number of pipeline runs for timing (diagnostics only).
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,
}

/// Errors surfaced by the command-line tool.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Reading the input or writing the output failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The input file or `--config-json` was not valid JSON.
    #[error("error parsing {what}: {source}")]
    Json {
        /// Which JSON input failed.
        what: &'static str,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// The pipeline rejected the data or config.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Build a [`ChartConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual chart flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ChartConfig, CliError> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|source| CliError::Json {
            what: "--config-json",
            source,
        });
    }

    Ok(ChartConfig {
        smoothing: cli.smoothing,
        scaled: cli.scaled,
        x_name: cli.x_name.clone(),
        y_name: cli.y_name.clone(),
        margin: cli.margin,
        container_width: cli.container_width,
    })
}

/// Load samples from the input file, or fall back to the demo series.
fn load_samples(input: Option<&PathBuf>) -> Result<Vec<Sample>, CliError> {
    let Some(path) = input else {
        tracing::info!("no input file, rendering demo series");
        return Ok(DEMO_SERIES.into_iter().map(Sample::from).collect());
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        action: "reading",
        path: path.clone(),
        source,
    })?;
    let samples: Vec<Sample> = serde_json::from_str(&text).map_err(|source| CliError::Json {
        what: "samples",
        source,
    })?;
    tracing::info!(path = %path.display(), samples = samples.len(), "loaded samples");
    Ok(samples)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = config_from_cli(cli)?;
    let samples = load_samples(cli.input.as_ref())?;
    tracing::debug!(?config, "chart config");

    let mut all_diagnostics = Vec::with_capacity(cli.runs);
    let mut layout = None;
    let runs = if cli.diagnostics { cli.runs } else { 1 };
    for _ in 0..runs {
        let (run_layout, diagnostics) =
            svgraph_pipeline::diagnostics::process_with_diagnostics(&samples, &config, &StdClock)?;
        if layout.is_none() {
            layout = Some(run_layout);
        }
        all_diagnostics.push(diagnostics);
    }

    if cli.diagnostics {
        for diagnostics in &all_diagnostics {
            if cli.json {
                let json = serde_json::to_string_pretty(diagnostics).map_err(|source| {
                    CliError::Json {
                        what: "diagnostics",
                        source,
                    }
                })?;
                println!("{json}");
            } else {
                println!("{}", diagnostics.report());
            }
        }
        if all_diagnostics.len() > 1 {
            print_multi_run_summary(&all_diagnostics);
        }
    }

    let Some(layout) = layout else {
        return Ok(());
    };

    let title = cli.title.as_deref().or_else(|| {
        cli.input
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
    });
    let config_json = if cli.embed_config {
        Some(
            serde_json::to_string(&config).map_err(|source| CliError::Json {
                what: "config",
                source,
            })?,
        )
    } else {
        None
    };
    let metadata = SvgMetadata {
        title,
        description: None,
        config_json: config_json.as_deref(),
    };
    let svg = svgraph_export::to_svg(
        &layout,
        svgraph_export::AxisLabels::from_config(&config),
        &metadata,
    );

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &svg).map_err(|source| CliError::Io {
                action: "writing",
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = svg.len(), "SVG written");
        }
        None if cli.diagnostics => {
            tracing::info!("diagnostics requested without --output, SVG not printed");
        }
        None => print!("{svg}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "svgraph=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&PipelineDiagnostics) -> Duration;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[PipelineDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<16} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(32));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Sort", |d| d.sort.duration),
        ("Bounds", |d| d.bounds.duration),
        ("Scale", |d| d.scale.duration),
        ("Normalize", |d| d.normalize.duration),
        ("Curve", |d| d.curve.duration),
    ];

    for (name, extractor) in stage_extractors {
        let stage_mean = all_diagnostics
            .iter()
            .map(|d| extractor(d).as_secs_f64() * 1000.0)
            .sum::<f64>()
            / all_diagnostics.len() as f64;
        println!("{name:<16} {stage_mean:>10.3}ms");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("svgraph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_chart_config() {
        let cli = parse(&[]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn flags_build_config() {
        let cli = parse(&[
            "--smoothing",
            "0.3",
            "--margin",
            "10",
            "--scaled",
            "--container-width",
            "640",
            "--x-name",
            "time",
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert!((config.smoothing - 0.3).abs() < f64::EPSILON);
        assert!((config.margin - 10.0).abs() < f64::EPSILON);
        assert!(config.scaled);
        assert_eq!(config.container_width, Some(640.0));
        assert_eq!(config.x_name, "time");
        assert_eq!(config.y_name, "Y");
    }

    #[test]
    fn scaled_requires_container_width() {
        let result = Cli::try_parse_from(["svgraph", "--scaled"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = parse(&["--smoothing", "0.3", "--config-json", r#"{"margin": 5}"#]);
        let config = config_from_cli(&cli).unwrap();
        assert!((config.margin - 5.0).abs() < f64::EPSILON);
        assert!((config.smoothing - ChartConfig::DEFAULT_SMOOTHING).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli = parse(&["--config-json", "{not json"]);
        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.to_string().starts_with("error parsing --config-json"));
    }

    #[test]
    fn demo_series_without_input() {
        let samples = load_samples(None).unwrap();
        assert_eq!(samples.len(), DEMO_SERIES.len());
        assert_eq!(samples[0], Sample::new(0.0, 280.0));
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/svgraph/samples.json");
        let err = load_samples(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Io { action: "reading", .. }));
    }

    #[test]
    fn chart_errors_pass_through() {
        let err = CliError::from(ChartError::MissingContainer);
        assert_eq!(err.to_string(), ChartError::MissingContainer.to_string());
    }
}
