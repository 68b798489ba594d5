/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

/// Read the dimensions out of a PNG IHDR chunk
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let header: [u8; 25] = stream.read_fixed_bytes()?;

    let width = u32::from_be_bytes(header[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(header[20..24].try_into().unwrap());

    Ok((width as usize, height as usize))
}

/// Walk the chunk chain; an acTL chunk ahead of the first IDAT marks
/// an animated png
pub(crate) fn is_animated<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<bool, ProbeErrors> {
    // signature plus the whole IHDR chunk
    stream.skip(33)?;

    loop {
        let length = stream.get_u32_be()?;
        let kind: [u8; 4] = stream.read_fixed_bytes()?;

        match &kind {
            b"acTL" => return Ok(true),
            b"IDAT" => return Ok(false),
            _ => stream.skip((length as usize).saturating_add(4))?
        }
    }
}
