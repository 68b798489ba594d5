/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG segment walking
//!
//! The parser hops from marker to marker skipping segment bodies until a
//! start-of-frame turns up with the dimensions. APP1 bodies are pulled
//! aside on the way since they may carry the Exif orientation that decides
//! whether those dimensions need transposing.

use alloc::vec::Vec;

use log::trace;
use pixprobe_core::{ChunkSource, PullStream, SliceSource};

use crate::errors::ProbeErrors;
use crate::exif::Exif;

const MARKER_APP1: u8 = 0xE1;

/// Walk the segment chain until a start-of-frame yields the dimensions
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize, u16), ProbeErrors> {
    // start of image marker
    stream.skip(2)?;

    let mut exif: Option<Exif> = None;

    loop {
        if stream.read_u8()? != 0xFF {
            continue;
        }
        let mut marker = stream.read_u8()?;
        // 0xFF runs are fill bytes ahead of the real marker
        while marker == 0xFF {
            marker = stream.read_u8()?;
        }

        match marker {
            MARKER_APP1 => {
                let body = read_segment_body(stream)?;

                if body.len() > 6 && body.starts_with(b"Exif") {
                    // two padding bytes sit between the identifier and
                    // the tiff structure
                    let mut app1 = PullStream::new(SliceSource::new(&body[6..]));

                    // only the first parsable APP1 segment counts; a
                    // corrupt one is skipped, not fatal
                    if let Ok(parsed) = Exif::parse(&mut app1) {
                        if exif.is_none() {
                            exif = Some(parsed);
                        }
                    }
                }
            }
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                // segment length and sample precision
                stream.skip(3)?;
                let height = usize::from(stream.get_u16_be()?);
                let width = usize::from(stream.get_u16_be()?);

                let orientation = exif.as_ref().map_or(1, |e| e.orientation);
                let rotated = exif.as_ref().map_or(false, Exif::rotated);

                trace!("Jpeg frame at marker 0xFF{:02X}", marker);

                return if rotated {
                    Ok((height, width, orientation))
                } else {
                    Ok((width, height, orientation))
                };
            }
            _ => {
                let length = segment_length(stream)?;
                stream.skip(length)?;
            }
        }
    }
}

// A segment length counts its own two bytes; anything below two is
// structurally impossible.
fn segment_length<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<usize, ProbeErrors> {
    let length = stream.get_u16_be()?;

    length
        .checked_sub(2)
        .map(usize::from)
        .ok_or(ProbeErrors::CannotParseImage)
}

fn read_segment_body<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<Vec<u8>, ProbeErrors> {
    let length = segment_length(stream)?;
    let body = stream.read_vec(length)?;

    Ok(body)
}
