/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A byte-at-a-time scanner over the root element of an svg document
//!
//! No xml parsing happens here. The scanner accumulates attribute names
//! as it walks the document and pounces on `width`, `height` and
//! `viewBox` once it has seen the `<svg` root open. Whatever it has
//! gathered when the root tag closes (or the input ends) is resolved
//! into a dimension pair.

use alloc::vec::Vec;

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

#[derive(Copy, Clone, Eq, PartialEq)]
enum ScanState {
    None,
    Started,
    Stop
}

#[derive(Default)]
struct SvgScan {
    width:          Option<usize>,
    height:         Option<usize>,
    ratio:          Option<f64>,
    viewbox_width:  Option<usize>,
    viewbox_height: Option<usize>
}

/// Scan the document for dimension-bearing root attributes
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    resolve(scan_root_attributes(stream))
}

fn scan_root_attributes<S: ChunkSource>(stream: &mut PullStream<S>) -> SvgScan {
    let mut attr_name: Vec<u8> = Vec::new();
    let mut state = ScanState::None;
    let mut out = SvgScan::default();

    while state != ScanState::Stop {
        let byte = match stream.read_u8() {
            Ok(byte) => byte,
            Err(_) => break
        };

        match byte {
            b'<' => {
                attr_name.clear();
                attr_name.push(b'<');
            }
            b'>' => {
                if state == ScanState::Started {
                    state = ScanState::Stop;
                }
            }
            b'=' => {
                if name_matches(&attr_name, b"width") {
                    out.width = read_quoted_int(stream);
                    if out.height.is_some() {
                        break;
                    }
                } else if name_matches(&attr_name, b"height") {
                    out.height = read_quoted_int(stream);
                    if out.width.is_some() {
                        break;
                    }
                } else if name_matches(&attr_name, b"viewbox") {
                    apply_viewbox(&mut out, &read_quoted_value(stream));
                }
            }
            byte if byte.is_ascii_alphanumeric() || byte == b'_' => {
                attr_name.push(byte);
            }
            _ => {
                if attr_name == b"<svg" {
                    state = ScanState::Started;
                }
                attr_name.clear();
            }
        }
    }
    out
}

fn resolve(scan: SvgScan) -> Result<(usize, usize), ProbeErrors> {
    match scan {
        SvgScan {
            width: Some(width),
            height: Some(height),
            ..
        } => Ok((width, height)),
        SvgScan {
            width: Some(width),
            ratio: Some(ratio),
            ..
        } => Ok((width, round(width as f64 / ratio))),
        SvgScan {
            height: Some(height),
            ratio: Some(ratio),
            ..
        } => Ok((round(height as f64 * ratio), height)),
        SvgScan {
            viewbox_width: Some(width),
            viewbox_height: Some(height),
            ..
        } => Ok((width, height)),
        _ => Err(ProbeErrors::CannotParseImage)
    }
}

// Substring match so `viewBox` and friends hit regardless of casing.
fn name_matches(attr_name: &[u8], needle: &[u8]) -> bool {
    attr_name.len() >= needle.len()
        && attr_name
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle))
}

// Discard the opening quote, then take consecutive decimal digits. An
// empty digit run means the attribute held nothing numeric and counts
// as absent.
fn read_quoted_int<S: ChunkSource>(stream: &mut PullStream<S>) -> Option<usize> {
    stream.read_u8().ok()?;

    let mut digits: Vec<u8> = Vec::new();

    while let Ok(byte) = stream.read_u8() {
        if byte.is_ascii_digit() {
            digits.push(byte);
        } else {
            break;
        }
    }
    core::str::from_utf8(&digits).ok()?.parse().ok()
}

// Discard the opening quote, then take bytes until the next quote.
fn read_quoted_value<S: ChunkSource>(stream: &mut PullStream<S>) -> Vec<u8> {
    let mut value = Vec::new();

    if stream.read_u8().is_err() {
        return value;
    }
    while let Ok(byte) = stream.read_u8() {
        if byte == b'"' || byte == b'\'' {
            break;
        }
        value.push(byte);
    }
    value
}

// A viewBox is "min-x min-y width height"; only the last two matter and
// only when both are positive.
fn apply_viewbox(out: &mut SvgScan, value: &[u8]) {
    let text = match core::str::from_utf8(value) {
        Ok(text) => text,
        Err(_) => return
    };
    let tokens: Vec<&str> = text.split_ascii_whitespace().collect();

    if tokens.len() < 4 {
        return;
    }
    let width: f64 = tokens[2].parse().unwrap_or(0.0);
    let height: f64 = tokens[3].parse().unwrap_or(0.0);

    if width > 0.0 && height > 0.0 {
        out.ratio = Some(width / height);
        out.viewbox_width = Some(width as usize);
        out.viewbox_height = Some(height as usize);
    }
}

// f64::round lives in std; half-up on a positive value is the same thing.
fn round(value: f64) -> usize {
    (value + 0.5) as usize
}
