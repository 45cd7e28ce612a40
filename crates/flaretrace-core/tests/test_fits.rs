use flaretrace_core::error::FlareError;
use flaretrace_core::io::fits::{FitsReader, FITS_BLOCK_SIZE};

#[allow(dead_code)]
mod common;

use common::{build_fits_f32, build_fits_header, card, write_test_fits};

#[test]
fn test_parse_f32_image() {
    let w = 4usize;
    let h = 3usize;
    let pixels: Vec<f32> = (0..12).map(|v| v as f32).collect();
    let extra = [
        ("DATE-OBS", "'2013-11-08T04:22:52.90'"),
        ("CROTA2", "179.93"),
    ];
    let data = build_fits_f32(w, h, &extra, &pixels);

    let tmpfile = write_test_fits(&data);
    let reader = FitsReader::open(tmpfile.path()).unwrap();
    assert_eq!(reader.width(), 4);
    assert_eq!(reader.height(), 3);
    assert_eq!(reader.bitpix(), -32);

    let image = reader.read_image().unwrap();
    assert_eq!(image.dim(), (3, 4));
    assert!((image[[0, 0]] - 0.0).abs() < 1e-6);
    assert!((image[[0, 1]] - 1.0).abs() < 1e-6);
    assert!((image[[2, 3]] - 11.0).abs() < 1e-6);
}

#[test]
fn test_parse_i16_with_scaling() {
    // BITPIX=16 with BSCALE/BZERO: physical = bzero + bscale * raw.
    let values: [i16; 4] = [-5, 0, 123, 32767];
    let extra = [("BSCALE", "2.0"), ("BZERO", "100.0")];
    let mut data = build_fits_header(16, 2, 2, &extra);
    for v in &values {
        data.extend_from_slice(&v.to_be_bytes());
    }
    while data.len() % FITS_BLOCK_SIZE != 0 {
        data.push(0);
    }

    let tmpfile = write_test_fits(&data);
    let reader = FitsReader::open(tmpfile.path()).unwrap();
    let image = reader.read_image().unwrap();

    assert!((image[[0, 0]] - 90.0).abs() < 1e-4);
    assert!((image[[0, 1]] - 100.0).abs() < 1e-4);
    assert!((image[[1, 0]] - 346.0).abs() < 1e-4);
    assert!((image[[1, 1]] - 65634.0).abs() < 1.0);
}

#[test]
fn test_parse_u8_image() {
    let mut data = build_fits_header(8, 2, 2, &[]);
    data.extend_from_slice(&[0u8, 10, 200, 255]);
    while data.len() % FITS_BLOCK_SIZE != 0 {
        data.push(0);
    }

    let tmpfile = write_test_fits(&data);
    let reader = FitsReader::open(tmpfile.path()).unwrap();
    let image = reader.read_image().unwrap();

    assert!((image[[0, 1]] - 10.0).abs() < 1e-6);
    assert!((image[[1, 1]] - 255.0).abs() < 1e-6);
}

#[test]
fn test_missing_simple_keyword() {
    let data = vec![b'X'; FITS_BLOCK_SIZE];
    let tmpfile = write_test_fits(&data);
    let err = FitsReader::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FlareError::InvalidFits(_)));
}

#[test]
fn test_file_too_small() {
    let data = vec![b'S'; 100];
    let tmpfile = write_test_fits(&data);
    assert!(FitsReader::open(tmpfile.path()).is_err());
}

#[test]
fn test_header_without_end_card() {
    // A single block of valid cards but no END: the parser must not run
    // off the end of the file.
    let mut data = Vec::new();
    data.extend_from_slice(&card("SIMPLE", "T"));
    data.extend_from_slice(&card("BITPIX", "-32"));
    while data.len() < FITS_BLOCK_SIZE {
        data.push(b' ');
    }

    let tmpfile = write_test_fits(&data);
    let err = FitsReader::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FlareError::InvalidFits(_)));
}

#[test]
fn test_truncated_data_section() {
    // 10x10 f32 pixels need 400 data bytes after the 2880-byte header;
    // cut the file inside the pixel region.
    let pixels: Vec<f32> = vec![1.0; 100];
    let mut data = build_fits_f32(10, 10, &[], &pixels);
    data.truncate(3000);

    let tmpfile = write_test_fits(&data);
    let err = FitsReader::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FlareError::InvalidFits(_)));
}

#[test]
fn test_unsupported_bitpix() {
    let data = build_fits_header(12, 2, 2, &[]);
    let tmpfile = write_test_fits(&data);
    let err = FitsReader::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FlareError::UnsupportedBitpix(12)));
}

#[test]
fn test_cube_rejected() {
    // NAXIS=3 data cubes are not single 2D images.
    let mut data = Vec::new();
    data.extend_from_slice(&card("SIMPLE", "T"));
    data.extend_from_slice(&card("BITPIX", "-32"));
    data.extend_from_slice(&card("NAXIS", "3"));
    data.extend_from_slice(&card("NAXIS1", "2"));
    data.extend_from_slice(&card("NAXIS2", "2"));
    data.extend_from_slice(&card("NAXIS3", "2"));
    let mut end = b"END".to_vec();
    end.resize(80, b' ');
    data.extend_from_slice(&end);
    while data.len() % FITS_BLOCK_SIZE != 0 {
        data.push(b' ');
    }

    let tmpfile = write_test_fits(&data);
    let err = FitsReader::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FlareError::InvalidFits(_)));
}

#[test]
fn test_header_values_and_comments() {
    // Comments after "/" are stripped, but a "/" inside a quoted string
    // is part of the value.
    let pixels = vec![0.0f32; 4];
    let extra = [
        ("BSCALE", "2.0 / linear scale factor"),
        ("DATE-OBS", "'2013-11-08T04:22:52.90' / observation start"),
        ("TELESCOP", "'SDO/HMI'"),
        ("OBJECT", "'It''s here'"),
    ];
    let data = build_fits_f32(2, 2, &extra, &pixels);

    let tmpfile = write_test_fits(&data);
    let reader = FitsReader::open(tmpfile.path()).unwrap();

    assert!((reader.header.float_value("BSCALE").unwrap() - 2.0).abs() < 1e-12);
    assert_eq!(
        reader.header.string_value("DATE-OBS").unwrap(),
        "2013-11-08T04:22:52.90"
    );
    assert_eq!(reader.header.string_value("TELESCOP").unwrap(), "SDO/HMI");
    assert_eq!(reader.header.string_value("OBJECT").unwrap(), "It's here");
    assert!(reader.header.value("MISSING").is_none());
    assert!(matches!(
        reader.header.int_value("MISSING"),
        Err(FlareError::MissingKeyword(_))
    ));
}

#[test]
fn test_source_info() {
    let pixels = vec![0.0f32; 4];
    let extra = [
        ("DATE-OBS", "'2013-11-08T04:22:52.90'"),
        ("CROTA2", "180.0"),
        ("TELESCOP", "'SDO/HMI'"),
        ("INSTRUME", "'HMI_SIDE1'"),
    ];
    let data = build_fits_f32(2, 2, &extra, &pixels);

    let tmpfile = write_test_fits(&data);
    let reader = FitsReader::open(tmpfile.path()).unwrap();
    let info = reader.source_info(tmpfile.path());

    assert_eq!(info.width, 2);
    assert_eq!(info.height, 2);
    assert_eq!(info.bitpix, -32);
    assert_eq!(info.obs_time.as_deref(), Some("2013-11-08T04:22:52.90"));
    assert_eq!(info.roll_angle, Some(180.0));
    assert_eq!(info.telescope.as_deref(), Some("SDO/HMI"));
    assert_eq!(info.instrument.as_deref(), Some("HMI_SIDE1"));
}
