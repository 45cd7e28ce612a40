use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use flaretrace_core::config::AnalysisConfig;
use flaretrace_core::pipeline::{run_analysis_reported, AnalysisStage, ProgressReporter};
use flaretrace_core::roi::{ComponentSelection, RoiConfig};

use crate::summary;

#[derive(Args)]
pub struct RunArgs {
    /// Directory containing the observation FITS files
    #[arg(required_unless_present = "config")]
    pub input_dir: Option<PathBuf>,

    /// Analysis config file (TOML); overrides all other flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Flare peak time (YYYY-MM-DDTHH:MM)
    #[arg(long, required_unless_present = "config")]
    pub flare_time: Option<String>,

    /// Filename glob applied inside the input directory
    #[arg(long, default_value = "*.i*.fits")]
    pub pattern: String,

    /// Index of the reference frame for flare-region detection
    #[arg(long, default_value = "10")]
    pub reference_frame: usize,

    /// Number of consecutive frame pairs in the series
    #[arg(long, default_value = "20")]
    pub pair_count: usize,

    /// Gaussian smoothing sigma in pixels for flare-region detection
    #[arg(long, default_value = "40.0")]
    pub sigma: f32,

    /// Mask threshold as a fraction of the smoothed maximum
    #[arg(long, default_value = "0.5")]
    pub threshold: f32,

    /// Component to track: "largest" or a label number
    #[arg(long, default_value = "largest", value_parser = parse_component)]
    pub component: ComponentSelection,

    /// Output chart path (SVG)
    #[arg(short, long, default_value = "inclination_series.svg")]
    pub output: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid analysis config")?
    } else {
        build_config_from_args(args)?
    };
    debug!(?config, "resolved analysis config");

    summary::print_run_summary(&config);

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(CliReporter {
        bar: bar.clone(),
        stage_total: AtomicUsize::new(0),
    });

    let report = run_analysis_reported(&config, reporter)?;
    bar.finish_with_message("Done");

    summary::print_report_summary(&report);

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<AnalysisConfig> {
    let input_dir = args
        .input_dir
        .clone()
        .context("input directory is required")?;
    let flare_time = args.flare_time.clone().context("--flare-time is required")?;

    Ok(AnalysisConfig {
        input_dir,
        pattern: args.pattern.clone(),
        flare_time,
        output: args.output.clone(),
        reference_frame: args.reference_frame,
        pair_count: args.pair_count,
        roi: RoiConfig {
            blur_sigma: args.sigma,
            threshold_fraction: args.threshold,
            selection: args.component.clone(),
            ..RoiConfig::default()
        },
    })
}

fn parse_component(raw: &str) -> std::result::Result<ComponentSelection, String> {
    if raw.eq_ignore_ascii_case("largest") {
        return Ok(ComponentSelection::Largest);
    }
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!(
            "expected \"largest\" or a positive label number, got {raw:?}"
        )),
        Ok(label) => Ok(ComponentSelection::Label(label)),
    }
}

/// Drives the single progress bar from pipeline stage callbacks. Stages
/// with a known item count map onto 0-100, the rest jump on completion.
struct CliReporter {
    bar: ProgressBar,
    stage_total: AtomicUsize,
}

impl ProgressReporter for CliReporter {
    fn begin_stage(&self, stage: AnalysisStage, total_items: Option<usize>) {
        self.stage_total
            .store(total_items.unwrap_or(0), Ordering::Relaxed);
        self.bar.set_message(stage.to_string());
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        let total = self.stage_total.load(Ordering::Relaxed);
        if total > 0 {
            self.bar.set_position((items_done * 100 / total) as u64);
        }
    }

    fn finish_stage(&self) {
        self.bar.set_position(100);
    }
}
