use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::AnalysisConfig;
use crate::consts::OBS_TIME_FORMAT;
use crate::error::{FlareError, Result};
use crate::io::{collect_files, load_frames};
use crate::plot::render_series;
use crate::roi::detect_roi;
use crate::series::{build_series, normalize, SeriesEntry};

/// Analysis stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum AnalysisStage {
    Collecting,
    Loading,
    DetectingRoi,
    BuildingSeries,
    Rendering,
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collecting => write!(f, "Collecting files"),
            Self::Loading => write!(f, "Loading frames"),
            Self::DetectingRoi => write!(f, "Detecting flare region"),
            Self::BuildingSeries => write!(f, "Building series"),
            Self::Rendering => write!(f, "Rendering chart"),
        }
    }
}

/// Thread-safe progress reporting for the analysis run.
///
/// Implementors can use this to drive progress bars, logging, or any
/// other UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work
    /// items in this stage (e.g. file count), if known.
    fn begin_stage(&self, _stage: AnalysisStage, _total_items: Option<usize>) {}

    /// The count of work items completed within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_analysis` delegates.
struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of a full analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    /// Number of frames loaded from the input directory.
    pub frames_loaded: usize,
    /// Number of connected components found in the reference difference.
    pub component_count: usize,
    /// Label of the component selected as the flare region (0 if none).
    pub selected_label: u32,
    /// Pixel area of the flare region.
    pub roi_area: usize,
    /// Maximum of the raw series, before normalization.
    pub peak_value: f64,
    /// The normalized series, as rendered.
    pub series: Vec<SeriesEntry>,
    /// Path the chart was written to.
    pub output: PathBuf,
}

/// Run the full analysis with a thread-safe progress reporter.
pub fn run_analysis_reported(
    config: &AnalysisConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<AnalysisReport> {
    config.validate()?;
    let flare_time = config.flare_time()?;

    reporter.begin_stage(AnalysisStage::Collecting, None);
    let paths = collect_files(&config.input_dir, &config.pattern)?;
    reporter.finish_stage();
    info!(
        files = paths.len(),
        dir = %config.input_dir.display(),
        "collected observation files"
    );

    // Both the reference pair and the series pairs must exist.
    let required = config.pair_count.max(config.reference_frame + 1) + 1;
    if paths.len() < required {
        return Err(FlareError::NotEnoughFrames {
            found: paths.len(),
            required,
        });
    }

    reporter.begin_stage(AnalysisStage::Loading, Some(paths.len()));
    let frames = load_frames(&paths, |done| reporter.advance(done))?;
    reporter.finish_stage();
    info!(frames = frames.len(), "loaded frames");

    reporter.begin_stage(AnalysisStage::DetectingRoi, None);
    let detection = detect_roi(&frames, config.reference_frame, &config.roi)?;
    reporter.finish_stage();
    info!(
        area = detection.area,
        components = detection.component_count,
        label = detection.selected_label,
        "flare region selected"
    );

    reporter.begin_stage(AnalysisStage::BuildingSeries, Some(config.pair_count));
    let raw = build_series(&frames, &detection.mask, config.pair_count, |done| {
        reporter.advance(done)
    })?;
    reporter.finish_stage();

    let peak_value = raw
        .iter()
        .map(|e| e.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let series = normalize(&raw)?;

    reporter.begin_stage(AnalysisStage::Rendering, None);
    let title = frames[config.reference_frame]
        .obs_time
        .format(OBS_TIME_FORMAT)
        .to_string();
    render_series(&series, flare_time, &title, &config.output)?;
    reporter.finish_stage();

    Ok(AnalysisReport {
        frames_loaded: frames.len(),
        component_count: detection.component_count,
        selected_label: detection.selected_label,
        roi_area: detection.area,
        peak_value,
        series,
        output: config.output.clone(),
    })
}

/// Run the full analysis without progress reporting.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport> {
    run_analysis_reported(config, Arc::new(NoOpReporter))
}
