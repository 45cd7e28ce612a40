use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use flaretrace_core::config::AnalysisConfig;
use flaretrace_core::consts::{
    DEFAULT_FILE_PATTERN, DEFAULT_OUTPUT_FILE, DEFAULT_PAIR_COUNT, DEFAULT_REFERENCE_FRAME,
};
use flaretrace_core::roi::RoiConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default AnalysisConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = AnalysisConfig {
        input_dir: PathBuf::from("observations"),
        pattern: DEFAULT_FILE_PATTERN.to_string(),
        flare_time: "2013-11-08T04:26".to_string(),
        output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        reference_frame: DEFAULT_REFERENCE_FRAME,
        pair_count: DEFAULT_PAIR_COUNT,
        roi: RoiConfig::default(),
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
