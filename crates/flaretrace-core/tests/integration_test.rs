use std::path::Path;
use std::sync::{Arc, Mutex};

use flaretrace_core::config::AnalysisConfig;
use flaretrace_core::error::FlareError;
use flaretrace_core::pipeline::{run_analysis, run_analysis_reported, AnalysisStage, ProgressReporter};
use flaretrace_core::roi::RoiConfig;

#[allow(dead_code)]
mod common;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn analysis_config(dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        input_dir: dir.to_path_buf(),
        pattern: "*.i*.fits".to_string(),
        flare_time: "2013-11-08T04:26".to_string(),
        output: dir.join("series.svg"),
        reference_frame: 10,
        pair_count: 20,
        roi: RoiConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_full_analysis_on_synthetic_observations() {
    // 21 uniform 10x10 frames with values 0..=20: every pair differs by
    // exactly 1.0 per pixel, the whole image becomes the flare region,
    // and the raw series is a constant 100.0 that normalizes to 1.0.
    let dir = tempfile::tempdir().unwrap();
    common::write_observation_dir(dir.path(), 21);

    let config = analysis_config(dir.path());
    let report = run_analysis(&config).unwrap();

    assert_eq!(report.frames_loaded, 21);
    assert_eq!(report.component_count, 1);
    assert_eq!(report.selected_label, 1);
    assert_eq!(report.roi_area, 100);
    assert!((report.peak_value - 100.0).abs() < 1e-9, "peak {}", report.peak_value);

    assert_eq!(report.series.len(), 20);
    for entry in &report.series {
        assert!(
            (entry.value - 1.0).abs() < 1e-12,
            "constant series must normalize to 1.0, got {} at {}",
            entry.value,
            entry.time
        );
    }
    // Series entries are stamped with the later frame of each pair.
    assert_eq!(report.series[0].time.format("%H:%M").to_string(), "04:01");
    assert_eq!(report.series[19].time.format("%H:%M").to_string(), "04:20");

    let svg = std::fs::read_to_string(&report.output).unwrap();
    assert!(svg.contains("<svg"), "output must be an SVG document");
    assert!(svg.contains("2013-11-08T04:10:00"), "title is the reference frame time");
    assert!(svg.contains("Normalized B-Inclination diff"));
    assert!(svg.contains("flare peak"));
}

#[test]
fn test_identical_frames_are_degenerate() {
    // No change between frames means an empty flare mask and an all-zero
    // series, which must be reported instead of dividing by zero.
    let dir = tempfile::tempdir().unwrap();
    for i in 0..21 {
        let date_obs = format!("2013-11-08T04:{i:02}:00");
        let data = common::build_observation(10, 10, 7.0, &date_obs, 0.0);
        std::fs::write(dir.path().join(format!("hmi{i:02}.i.fits")), data).unwrap();
    }

    let err = run_analysis(&analysis_config(dir.path())).unwrap_err();
    assert!(matches!(err, FlareError::DegenerateSeries));
}

#[test]
fn test_too_few_files_fails_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    common::write_observation_dir(dir.path(), 5);

    let err = run_analysis(&analysis_config(dir.path())).unwrap_err();
    assert!(matches!(err, FlareError::NotEnoughFrames { found: 5, required: 21 }));
}

#[test]
fn test_empty_directory_reports_no_files() {
    let dir = tempfile::tempdir().unwrap();

    let err = run_analysis(&analysis_config(dir.path())).unwrap_err();
    assert!(matches!(err, FlareError::NoFilesFound { .. }));
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

struct RecordingReporter {
    stages: Mutex<Vec<String>>,
    advances: Mutex<usize>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: AnalysisStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage.to_string());
    }

    fn advance(&self, _items_done: usize) {
        *self.advances.lock().unwrap() += 1;
    }
}

#[test]
fn test_reporter_sees_every_stage_in_order() {
    let dir = tempfile::tempdir().unwrap();
    common::write_observation_dir(dir.path(), 21);

    let reporter = Arc::new(RecordingReporter {
        stages: Mutex::new(Vec::new()),
        advances: Mutex::new(0),
    });
    run_analysis_reported(&analysis_config(dir.path()), reporter.clone()).unwrap();

    let stages = reporter.stages.lock().unwrap();
    assert_eq!(
        *stages,
        vec![
            "Collecting files",
            "Loading frames",
            "Detecting flare region",
            "Building series",
            "Rendering chart",
        ]
    );
    // 21 frame loads plus 20 series pairs.
    assert_eq!(*reporter.advances.lock().unwrap(), 41);
}
