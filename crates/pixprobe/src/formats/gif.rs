/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

const EXTENSION_INTRODUCER: u8 = 0x21;
const IMAGE_DESCRIPTOR: u8 = 0x2C;

/// Read the logical screen dimensions out of a GIF header
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let header: [u8; 11] = stream.read_fixed_bytes()?;

    let width = u16::from_le_bytes(header[6..8].try_into().unwrap());
    let height = u16::from_le_bytes(header[8..10].try_into().unwrap());

    Ok((usize::from(width), usize::from(height)))
}

/// Walk the block chain counting image descriptors, stopping as soon as
/// a second one proves the file animated
pub(crate) fn is_animated<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<bool, ProbeErrors> {
    // signature and version plus the screen dimensions
    stream.skip(10)?;

    let screen: [u8; 3] = stream.read_fixed_bytes()?;
    let flags = screen[0];

    if flags & 0x80 != 0 {
        skip_color_table(stream, flags)?;
    }

    let mut frames = 0;

    loop {
        match stream.read_u8()? {
            EXTENSION_INTRODUCER => {
                // the label byte, then the extension's sub-blocks
                stream.read_u8()?;
                skip_sub_blocks(stream)?;
            }
            IMAGE_DESCRIPTOR => {
                frames += 1;
                if frames > 1 {
                    return Ok(true);
                }
                // left, top, width, height
                stream.skip(8)?;

                let flags = stream.read_u8()?;
                if flags & 0x80 != 0 {
                    skip_color_table(stream, flags)?;
                }
                // lzw minimum code size
                stream.skip(1)?;
                skip_sub_blocks(stream)?;
            }
            // the 0x3B trailer, or anything unrecognized
            _ => break
        }
    }
    Ok(false)
}

// A color table holds 2^(n+1) three byte entries where n is the low
// three bits of the flag byte.
fn skip_color_table<S: ChunkSource>(
    stream: &mut PullStream<S>, flags: u8
) -> Result<(), ProbeErrors> {
    stream.skip(3 * (2_usize << usize::from(flags & 7)))?;
    Ok(())
}

// Sub-blocks are length prefixed runs terminated by a zero length.
fn skip_sub_blocks<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<(), ProbeErrors> {
    loop {
        let size = stream.read_u8()?;
        if size == 0 {
            return Ok(());
        }
        stream.skip(usize::from(size))?;
    }
}
