/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Glob pattern matching intensity FITS files within an observation directory.
pub const DEFAULT_FILE_PATTERN: &str = "*.i*.fits";

/// Number of consecutive frame pairs differenced into the brightness series.
pub const DEFAULT_PAIR_COUNT: usize = 20;

/// Index of the frame whose timestamp titles the chart.
pub const DEFAULT_REFERENCE_FRAME: usize = 10;

/// Default sigma (in pixels) for the Gaussian smoothing of the detection frame.
pub const DEFAULT_BLUR_SIGMA: f32 = 40.0;

/// Kernel radius is `truncate * sigma + 0.5`, matching the usual convention
/// of truncating the Gaussian at 4 standard deviations.
pub const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Default fraction of the smoothed maximum used as the region threshold.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.5;

/// Raw-difference level above which a pixel counts as significantly changed.
pub const SIGNIFICANT_DIFF_LEVEL: f32 = 10.0;

/// Timestamp format of the DATE-OBS header keyword. The fractional part
/// is optional.
pub const OBS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamp format accepted for the flare marker on the command line.
pub const FLARE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Default chart output filename.
pub const DEFAULT_OUTPUT_FILE: &str = "inclination_series.svg";

/// Chart dimensions in pixels (10x4 inches at 150 dpi).
pub const CHART_WIDTH: u32 = 1500;

/// Chart height in pixels.
pub const CHART_HEIGHT: u32 = 600;
