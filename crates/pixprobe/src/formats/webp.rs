/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! WebP, all three of the VP8, VP8L and VP8X container payloads

use log::warn;
use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

// VP8X feature flags
const FLAG_EXIF: u8 = 0x08;
const FLAG_ANIMATION: u8 = 0x02;

/// Read the dimensions out of whichever payload the RIFF container holds
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let tag = read_payload_tag(stream)?;

    match &tag {
        b"VP8 " => parse_vp8(stream),
        b"VP8L" => parse_vp8l(stream),
        b"VP8X" => parse_vp8x(stream),
        _ => Err(ProbeErrors::CannotParseImage)
    }
}

/// An animated WebP is a VP8X container with the animation flag set
pub(crate) fn is_animated<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<bool, ProbeErrors> {
    let tag = read_payload_tag(stream)?;

    if &tag != b"VP8X" {
        return Ok(false);
    }
    let flags: [u8; 4] = stream.read_fixed_bytes()?;

    Ok(flags[0] & FLAG_ANIMATION != 0)
}

// The riff preamble: "RIFF", the file size, "WEBP", the payload tag and
// the payload chunk length nobody needs.
fn read_payload_tag<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<[u8; 4], ProbeErrors> {
    let header: [u8; 16] = stream.read_fixed_bytes()?;
    stream.get_u32_le()?;

    Ok(header[12..16].try_into().unwrap())
}

fn parse_vp8<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<(usize, usize), ProbeErrors> {
    let frame: [u8; 10] = stream.read_fixed_bytes()?;

    // both dimensions are fourteen bit values
    let width = u16::from_le_bytes(frame[6..8].try_into().unwrap()) & 0x3FFF;
    let height = u16::from_le_bytes(frame[8..10].try_into().unwrap()) & 0x3FFF;

    Ok((usize::from(width), usize::from(height)))
}

fn parse_vp8l<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<(usize, usize), ProbeErrors> {
    // the 0x2F lossless signature byte
    stream.skip(1)?;

    let b: [u8; 4] = stream.read_fixed_bytes()?;

    let width = 1 + ((usize::from(b[1] & 0x3F) << 8) | usize::from(b[0]));
    let height = 1
        + ((usize::from(b[3] & 0x0F) << 10)
            | (usize::from(b[2]) << 2)
            | (usize::from(b[1] & 0xC0) >> 6));

    Ok((width, height))
}

fn parse_vp8x<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<(usize, usize), ProbeErrors> {
    let flags: [u8; 4] = stream.read_fixed_bytes()?;
    let b: [u8; 6] = stream.read_fixed_bytes()?;

    let width = 1 + usize::from(b[0]) + (usize::from(b[1]) << 8) + (usize::from(b[2]) << 16);
    let height = 1 + usize::from(b[3]) + (usize::from(b[4]) << 8) + (usize::from(b[5]) << 16);

    if flags[0] & FLAG_EXIF != 0 {
        warn!("Webp exif chunk flagged, orientation is left at its default");
    }

    Ok((width, height))
}
