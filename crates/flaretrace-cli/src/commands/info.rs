use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use flaretrace_core::io::FitsReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input FITS file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = FitsReader::open(&args.file)?;
    let info = reader.source_info(&args.file);

    println!("File:        {}", info.filename.display());
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("BITPIX:      {}", info.bitpix);

    if let Some(ref obs) = info.obs_time {
        println!("Date-obs:    {}", obs);
    }
    if let Some(roll) = info.roll_angle {
        println!("Roll angle:  {:.2} deg", roll);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    let sample_bytes = (info.bitpix.unsigned_abs() / 8) as usize;
    let total_mb = (info.width * info.height * sample_bytes) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}
