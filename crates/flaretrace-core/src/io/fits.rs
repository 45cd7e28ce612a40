use std::fs::File;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use memmap2::Mmap;
use ndarray::Array2;

use crate::error::{FlareError, Result};
use crate::frame::SourceInfo;

/// FITS files are organized in fixed-size blocks.
pub const FITS_BLOCK_SIZE: usize = 2880;
/// Each header card occupies 80 bytes.
pub const CARD_SIZE: usize = 80;

/// Parsed primary-HDU header: keyword/value cards in file order,
/// comments stripped.
#[derive(Clone, Debug, Default)]
pub struct FitsHeader {
    cards: Vec<(String, String)>,
}

impl FitsHeader {
    /// Raw value field of a keyword, if present.
    pub fn value(&self, keyword: &str) -> Option<&str> {
        self.cards
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, v)| v.as_str())
    }

    /// Required integer keyword.
    pub fn int_value(&self, keyword: &str) -> Result<i64> {
        let raw = self.require(keyword)?;
        raw.trim()
            .parse()
            .map_err(|_| FlareError::InvalidKeywordValue {
                keyword: keyword.to_string(),
                value: raw.to_string(),
            })
    }

    /// Required floating-point keyword.
    pub fn float_value(&self, keyword: &str) -> Result<f64> {
        let raw = self.require(keyword)?;
        raw.trim()
            .parse()
            .map_err(|_| FlareError::InvalidKeywordValue {
                keyword: keyword.to_string(),
                value: raw.to_string(),
            })
    }

    /// Optional floating-point keyword with a default.
    pub fn float_value_or(&self, keyword: &str, default: f64) -> Result<f64> {
        match self.value(keyword) {
            Some(_) => self.float_value(keyword),
            None => Ok(default),
        }
    }

    /// String keyword with quotes removed and '' unescaped.
    pub fn string_value(&self, keyword: &str) -> Option<String> {
        let trimmed = self.value(keyword)?.trim();
        let inner = trimmed
            .strip_prefix('\'')
            .map(|s| s.strip_suffix('\'').unwrap_or(s))
            .unwrap_or(trimmed);
        Some(inner.replace("''", "'").trim_end().to_string())
    }

    fn require(&self, keyword: &str) -> Result<&str> {
        self.value(keyword)
            .ok_or_else(|| FlareError::MissingKeyword(keyword.to_string()))
    }
}

/// Memory-mapped FITS reader for single-image primary HDUs.
#[derive(Debug)]
pub struct FitsReader {
    mmap: Mmap,
    data_offset: usize,
    pub header: FitsHeader,
    width: usize,
    height: usize,
    bitpix: i64,
}

impl FitsReader {
    /// Open a FITS file and parse its primary header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < FITS_BLOCK_SIZE {
            return Err(FlareError::InvalidFits(
                "File too small for FITS header".into(),
            ));
        }

        if &mmap[0..6] != b"SIMPLE" {
            return Err(FlareError::InvalidFits("Missing SIMPLE keyword".into()));
        }

        let (header, data_offset) = parse_header(&mmap)?;

        let bitpix = header.int_value("BITPIX")?;
        let bytes = bytes_per_sample(bitpix)?;

        let naxis = header.int_value("NAXIS")?;
        if naxis != 2 {
            return Err(FlareError::InvalidFits(format!(
                "Expected a 2D image (NAXIS = 2), got NAXIS = {naxis}"
            )));
        }

        let width = header.int_value("NAXIS1")? as usize;
        let height = header.int_value("NAXIS2")? as usize;
        if width == 0 || height == 0 {
            return Err(FlareError::InvalidFits(format!(
                "Zero image dimension: {width}x{height}"
            )));
        }

        let expected = data_offset + image_byte_size(width, height, bytes)?;
        if mmap.len() < expected {
            return Err(FlareError::InvalidFits(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            data_offset,
            header,
            width,
            height,
            bitpix,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bitpix(&self) -> i64 {
        self.bitpix
    }

    /// Decode the image, applying BSCALE/BZERO linear scaling.
    pub fn read_image(&self) -> Result<Array2<f32>> {
        let bscale = self.header.float_value_or("BSCALE", 1.0)?;
        let bzero = self.header.float_value_or("BZERO", 0.0)?;
        let bytes = bytes_per_sample(self.bitpix)?;
        let end = self.data_offset + image_byte_size(self.width, self.height, bytes)?;
        let raw = &self.mmap[self.data_offset..end];
        decode_image(raw, self.height, self.width, self.bitpix, bscale, bzero)
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            width: self.width,
            height: self.height,
            bitpix: self.bitpix,
            obs_time: self.header.string_value("DATE-OBS"),
            roll_angle: self.header.float_value("CROTA2").ok(),
            telescope: self.header.string_value("TELESCOP"),
            instrument: self.header.string_value("INSTRUME"),
        }
    }
}

fn parse_header(mmap: &[u8]) -> Result<(FitsHeader, usize)> {
    let mut cards = Vec::new();
    let mut offset = 0;

    loop {
        if offset + FITS_BLOCK_SIZE > mmap.len() {
            return Err(FlareError::InvalidFits("Header has no END card".into()));
        }
        let block = &mmap[offset..offset + FITS_BLOCK_SIZE];
        offset += FITS_BLOCK_SIZE;

        for card in block.chunks_exact(CARD_SIZE) {
            let keyword = String::from_utf8_lossy(&card[..8]).trim_end().to_string();
            if keyword == "END" {
                return Ok((FitsHeader { cards }, offset));
            }
            // COMMENT, HISTORY, and blank cards carry no value indicator.
            if keyword.is_empty() || keyword == "COMMENT" || keyword == "HISTORY" {
                continue;
            }
            if &card[8..10] == b"= " {
                let field = String::from_utf8_lossy(&card[10..]).to_string();
                let value = strip_comment(&field).trim().to_string();
                cards.push((keyword, value));
            }
        }
    }
}

/// Cut the field at the first `/` outside a quoted string.
fn strip_comment(field: &str) -> &str {
    let bytes = field.as_bytes();
    let mut in_string = false;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'\'' => in_string = !in_string,
            b'/' if !in_string => return &field[..i],
            _ => {}
        }
    }
    field
}

fn bytes_per_sample(bitpix: i64) -> Result<usize> {
    match bitpix {
        8 => Ok(1),
        16 => Ok(2),
        32 | -32 => Ok(4),
        64 | -64 => Ok(8),
        _ => Err(FlareError::UnsupportedBitpix(bitpix)),
    }
}

fn image_byte_size(width: usize, height: usize, bytes_per_sample: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(bytes_per_sample))
        .ok_or_else(|| FlareError::InvalidFits("Image size overflows usize".into()))
}

fn decode_image(
    raw: &[u8],
    height: usize,
    width: usize,
    bitpix: i64,
    bscale: f64,
    bzero: f64,
) -> Result<Array2<f32>> {
    let bytes = bytes_per_sample(bitpix)?;
    let mut data = Array2::<f32>::zeros((height, width));

    for row in 0..height {
        for col in 0..width {
            let idx = (row * width + col) * bytes;
            let sample = match bitpix {
                8 => raw[idx] as f64,
                16 => BigEndian::read_i16(&raw[idx..idx + 2]) as f64,
                32 => BigEndian::read_i32(&raw[idx..idx + 4]) as f64,
                64 => BigEndian::read_i64(&raw[idx..idx + 8]) as f64,
                -32 => BigEndian::read_f32(&raw[idx..idx + 4]) as f64,
                -64 => BigEndian::read_f64(&raw[idx..idx + 8]),
                _ => return Err(FlareError::UnsupportedBitpix(bitpix)),
            };
            data[[row, col]] = (bzero + bscale * sample) as f32;
        }
    }

    Ok(data)
}
