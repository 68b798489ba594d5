/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe::{probe_buffer, ImageFormat, ProbeErrors};

mod fixtures;

#[test]
fn bmp_info_header() {
    let data = fixtures::bmp_info_header(40, 27);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::BMP);
    assert_eq!(info.dimensions(), (40, 27));
    assert_eq!(info.orientation, 1);
}

#[test]
fn bmp_top_down_height_is_folded() {
    // top-down bitmaps store a negative height
    let data = fixtures::bmp_info_header(640, -480);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (640, 480));
}

#[test]
fn bmp_core_header_uses_short_fields() {
    let data = fixtures::bmp_core_header(320, 200);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::BMP);
    assert_eq!(info.dimensions(), (320, 200));
}

#[test]
fn gif_logical_screen() {
    let data = fixtures::gif(1920, 1080);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::GIF);
    assert_eq!(info.dimensions(), (1920, 1080));
}

#[test]
fn png_ihdr() {
    let data = fixtures::png(800, 600);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::PNG);
    assert_eq!(info.dimensions(), (800, 600));
}

#[test]
fn psd_stores_height_first() {
    let data = fixtures::psd(1024, 768);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::PSD);
    assert_eq!(info.dimensions(), (1024, 768));
}

#[test]
fn ico_zero_bytes_mean_256() {
    let data = fixtures::ico(&[(0, 0)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::ICO);
    assert_eq!(info.dimensions(), (256, 256));
}

#[test]
fn ico_picks_largest_entry() {
    let data = fixtures::ico(&[(16, 16), (48, 48), (32, 32)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (48, 48));
}

#[test]
fn ico_area_ties_go_to_later_entry() {
    let data = fixtures::ico(&[(64, 16), (32, 32)]);
    let info = probe_buffer(&data).unwrap();

    // equal areas, the later entry wins
    assert_eq!(info.dimensions(), (32, 32));
}

#[test]
fn ico_without_entries_fails() {
    let data = fixtures::ico(&[]);

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::SizeNotFound)
    ));
}

#[test]
fn cur_dispatches_on_resource_type() {
    let data = fixtures::cur(&[(32, 32)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::CUR);
    assert_eq!(info.dimensions(), (32, 32));
}

#[test]
fn jpeg_without_exif() {
    let data = fixtures::jpeg(None, 408, 230);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::JPEG);
    assert_eq!(info.dimensions(), (230, 408));
    assert_eq!(info.orientation, 1);
}

#[test]
fn jpeg_with_upright_orientation() {
    let data = fixtures::jpeg(Some(3), 408, 230);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (230, 408));
    assert_eq!(info.orientation, 3);
}

#[test]
fn jpeg_with_transposing_orientation_swaps_axes() {
    let data = fixtures::jpeg(Some(6), 450, 600);
    let info = probe_buffer(&data).unwrap();

    // the frame says 600x450, orientation six turns that on its side
    assert_eq!(info.dimensions(), (450, 600));
    assert_eq!(info.orientation, 6);
}

#[test]
fn jpeg_truncated_after_soi_fails_with_size_not_found() {
    let data = [0xFF, 0xD8];

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::SizeNotFound)
    ));
}

#[test]
fn jpeg_keeps_first_app1_segment() {
    let mut data = fixtures::jpeg(Some(6), 450, 600);

    // slot a second, contradicting APP1 ahead of the frame marker
    let tail = data.split_off(data.len() - 9);
    let tiff = fixtures::tiff_le(&[(0x0112, 1)]);

    data.extend_from_slice(&[0xFF, 0xE1]);
    data.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(&tiff);
    data.extend_from_slice(&tail);

    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.orientation, 6);
    assert_eq!(info.dimensions(), (450, 600));
}

#[test]
fn tiff_little_endian() {
    let data = fixtures::tiff_le(&[(0x0100, 120), (0x0101, 80), (0x0112, 1)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::TIFF);
    assert_eq!(info.dimensions(), (120, 80));
}

#[test]
fn tiff_big_endian() {
    let data = fixtures::tiff_be(&[(0x0100, 120), (0x0101, 80), (0x0112, 1)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::TIFF);
    assert_eq!(info.dimensions(), (120, 80));
}

#[test]
fn tiff_rotated_orientation_swaps_axes() {
    let data = fixtures::tiff_le(&[(0x0100, 120), (0x0101, 80), (0x0112, 8)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (80, 120));
    assert_eq!(info.orientation, 8);
}

#[test]
fn tiff_without_orientation_defaults_upright() {
    let data = fixtures::tiff_le(&[(0x0100, 12), (0x0101, 34)]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.orientation, 1);
}

#[test]
fn tiff_without_dimension_tags_fails() {
    // a raw camera file dispatches as tiff but carries none of the tags
    let data = fixtures::tiff_le(&[(0x8769, 1)]);

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::SizeNotFound)
    ));
}

#[test]
fn webp_vp8() {
    let data = fixtures::webp_vp8(550, 368);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::WEBP);
    assert_eq!(info.dimensions(), (550, 368));
}

#[test]
fn webp_vp8_masks_to_fourteen_bits() {
    // the top two bits carry scaling, not size
    let data = fixtures::webp_vp8(0x3FFF | 0xC000, 0x2000 | 0x4000);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (0x3FFF, 0x2000));
}

#[test]
fn webp_vp8l() {
    let data = fixtures::webp_vp8l(128, 64);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::WEBP);
    assert_eq!(info.dimensions(), (128, 64));
}

#[test]
fn webp_vp8x() {
    let data = fixtures::webp_vp8x(0, [0x81, 0x01, 0x00, 0x8A, 0x01, 0x00]);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::WEBP);
    assert_eq!(info.dimensions(), (386, 395));
}

#[test]
fn webp_with_unknown_payload_fails() {
    let mut data = fixtures::webp_vp8(4, 4);
    data[12..16].copy_from_slice(b"ALPH");

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::SizeNotFound)
    ));
}

#[test]
fn svg_with_explicit_dimensions() {
    let data = fixtures::svg(r#"<svg xmlns="http://www.w3.org/2000/svg" width="216" height="60">"#);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::SVG);
    assert_eq!(info.dimensions(), (216, 60));
}

#[test]
fn svg_behind_xml_prologue() {
    let data = fixtures::svg(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"90\" height=\"45\">"
    );
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.format, ImageFormat::SVG);
    assert_eq!(info.dimensions(), (90, 45));
}

#[test]
fn svg_viewbox_only() {
    let data = fixtures::svg(r#"<svg viewBox="0 0 100 50">"#);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (100, 50));
}

#[test]
fn svg_width_and_viewbox_ratio() {
    let data = fixtures::svg(r#"<svg width="300" viewBox="0 0 200 100">"#);
    let info = probe_buffer(&data).unwrap();

    // height derived from the viewbox aspect ratio
    assert_eq!(info.dimensions(), (300, 150));
}

#[test]
fn svg_height_and_viewbox_ratio() {
    let data = fixtures::svg(r#"<svg height="50" viewBox="0 0 200 100">"#);
    let info = probe_buffer(&data).unwrap();

    assert_eq!(info.dimensions(), (100, 50));
}

#[test]
fn svg_without_any_dimension_fails() {
    let data = fixtures::svg(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::SizeNotFound)
    ));
}

#[test]
fn xml_without_svg_root_is_unknown() {
    let mut body = String::from("<?xml version=\"1.0\"?>\n<catalog>\n");
    while body.len() < 300 {
        body.push_str("  <entry name=\"placeholder\" value=\"0\"/>\n");
    }
    let data = fixtures::svg(&body);

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::UnknownImageType)
    ));
}

#[test]
fn unknown_signature_is_rejected() {
    let data = [0x00, 0x00, 0x00, 0x33, 0x33];

    assert!(matches!(
        probe_buffer(&data),
        Err(ProbeErrors::UnknownImageType)
    ));
}

#[test]
fn empty_input_is_a_fetch_failure() {
    assert!(matches!(probe_buffer(&[]), Err(ProbeErrors::Fetch(_))));
}
