use std::path::{Path, PathBuf};

use flaretrace_core::io::fits::{CARD_SIZE, FITS_BLOCK_SIZE};

/// One 80-byte header card with the standard "= " value indicator.
pub fn card(keyword: &str, value: &str) -> Vec<u8> {
    let mut c = format!("{keyword:<8}= {value}").into_bytes();
    assert!(c.len() <= CARD_SIZE, "card too long: {keyword}");
    c.resize(CARD_SIZE, b' ');
    c
}

/// Build a primary header for a 2D image, padded to a whole block.
///
/// `extra` cards are appended after the mandatory ones; pass string
/// values already quoted.
pub fn build_fits_header(
    bitpix: i64,
    width: usize,
    height: usize,
    extra: &[(&str, &str)],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FITS_BLOCK_SIZE);
    buf.extend_from_slice(&card("SIMPLE", "T"));
    buf.extend_from_slice(&card("BITPIX", &bitpix.to_string()));
    buf.extend_from_slice(&card("NAXIS", "2"));
    buf.extend_from_slice(&card("NAXIS1", &width.to_string()));
    buf.extend_from_slice(&card("NAXIS2", &height.to_string()));
    for (k, v) in extra {
        buf.extend_from_slice(&card(k, v));
    }
    let mut end = b"END".to_vec();
    end.resize(CARD_SIZE, b' ');
    buf.extend_from_slice(&end);
    while buf.len() % FITS_BLOCK_SIZE != 0 {
        buf.push(b' ');
    }
    buf
}

/// Build a complete FITS file with big-endian f32 pixels in row-major
/// order, data section padded to a whole block.
pub fn build_fits_f32(
    width: usize,
    height: usize,
    extra: &[(&str, &str)],
    pixels: &[f32],
) -> Vec<u8> {
    assert_eq!(pixels.len(), width * height);
    let mut buf = build_fits_header(-32, width, height, extra);
    for &v in pixels {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    while buf.len() % FITS_BLOCK_SIZE != 0 {
        buf.push(0);
    }
    buf
}

/// A uniform observation frame carrying the metadata the loader needs.
pub fn build_observation(
    width: usize,
    height: usize,
    value: f32,
    date_obs: &str,
    crota2: f64,
) -> Vec<u8> {
    let date = format!("'{date_obs}'");
    let crota = crota2.to_string();
    let extra = [("DATE-OBS", date.as_str()), ("CROTA2", crota.as_str())];
    let pixels = vec![value; width * height];
    build_fits_f32(width, height, &extra, &pixels)
}

/// Write a FITS buffer to a temporary file and return the handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not
/// dropped.
pub fn write_test_fits(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write FITS data");
    f.flush().expect("flush");
    f
}

/// Populate `dir` with `count` uniform 10x10 observation files whose
/// pixel values are 0, 1, 2, ... and whose timestamps advance by one
/// minute from 04:00:00. Names sort in chronological order and match
/// the default collection pattern.
pub fn write_observation_dir(dir: &Path, count: usize) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(count);
    for i in 0..count {
        let date_obs = format!("2013-11-08T04:{i:02}:00");
        let data = build_observation(10, 10, i as f32, &date_obs, 0.0);
        let path = dir.join(format!("hmi{i:02}.i.fits"));
        std::fs::write(&path, data).expect("write observation file");
        paths.push(path);
    }
    paths
}
