/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{Cursor, Seek, SeekFrom};

use pixprobe::{
    format_of_buffer, format_of_reader, probe_buffer, probe_reader, probe_stream, ImageProber,
    ProbeOptions, SliceSource
};

mod fixtures;

fn all_fixtures() -> Vec<Vec<u8>> {
    vec![
        fixtures::bmp_info_header(40, 27),
        fixtures::gif(7, 5),
        fixtures::png(800, 600),
        fixtures::psd(1024, 768),
        fixtures::ico(&[(32, 32)]),
        fixtures::cur(&[(48, 48)]),
        fixtures::jpeg(Some(6), 450, 600),
        fixtures::tiff_le(&[(0x0100, 120), (0x0101, 80)]),
        fixtures::webp_vp8x(0, [0x81, 0x01, 0x00, 0x8A, 0x01, 0x00]),
        fixtures::svg(r#"<svg width="10" height="20">"#)
    ]
}

#[test]
fn format_only_and_full_probe_agree() {
    for data in all_fixtures() {
        let format = format_of_buffer(&data).unwrap();
        let info = probe_buffer(&data).unwrap();

        assert_eq!(format, info.format);
    }
}

#[test]
fn orientation_is_always_in_range() {
    for data in all_fixtures() {
        let info = probe_buffer(&data).unwrap();

        assert!((1..=8).contains(&info.orientation));
    }
}

#[test]
fn format_probe_then_full_probe_on_one_prober() {
    let data = fixtures::png(12, 34);
    let mut prober = ImageProber::new(SliceSource::new(&data));

    // identification only peeks, the full probe still starts at zero
    let format = prober.probe_format().unwrap();
    let info = prober.probe().unwrap();

    assert_eq!(info.format, format);
    assert_eq!(info.dimensions(), (12, 34));
}

#[test]
fn reader_is_left_at_position_zero() {
    let mut reader = Cursor::new(fixtures::jpeg(Some(3), 408, 230));

    // nudge the cursor to prove the probe does not depend on it either
    reader.seek(SeekFrom::Start(1)).unwrap();

    let info = probe_reader(&mut reader).unwrap();

    assert_eq!(info.dimensions(), (230, 408));
    assert_eq!(reader.position(), 0);
}

#[test]
fn reader_is_rewound_even_on_failure() {
    let mut reader = Cursor::new(vec![0xFF, 0xD8]);

    assert!(probe_reader(&mut reader).is_err());
    assert_eq!(reader.position(), 0);
}

#[test]
fn repeated_probes_of_one_reader_agree() {
    let mut reader = Cursor::new(fixtures::webp_vp8l(128, 64));

    let first = probe_reader(&mut reader).unwrap();
    let second = probe_reader(&mut reader).unwrap();

    assert_eq!(first, second);
    assert_eq!(format_of_reader(&mut reader).unwrap(), first.format);
}

#[test]
fn sequential_streams_probe_too() {
    let data = fixtures::psd(300, 200);
    let info = probe_stream(&data[..]).unwrap();

    assert_eq!(info.dimensions(), (300, 200));
}

#[test]
fn tiny_chunks_change_nothing() {
    // a pathological chunk size forces every peek to span fetches
    let options = ProbeOptions::new().set_chunk_size(3);

    for data in all_fixtures() {
        let reference = probe_buffer(&data).unwrap();
        let info = ImageProber::new_with_options(SliceSource::new(&data), options)
            .probe()
            .unwrap();

        assert_eq!(info, reference);
    }
}

#[test]
fn dimension_limits_are_enforced() {
    let options = ProbeOptions::new().set_max_width(100).set_max_height(100);

    let wide = fixtures::png(101, 50);
    let result = ImageProber::new_with_options(SliceSource::new(&wide), options).probe();

    assert!(matches!(
        result,
        Err(pixprobe::ProbeErrors::TooLargeDimensions("width", 100, 101))
    ));

    let tall = fixtures::png(50, 101);
    let result = ImageProber::new_with_options(SliceSource::new(&tall), options).probe();

    assert!(matches!(
        result,
        Err(pixprobe::ProbeErrors::TooLargeDimensions("height", 100, 101))
    ));
}
