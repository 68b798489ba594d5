/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

// DIB header length of BITMAPINFOHEADER; anything else is treated as the
// old BITMAPCOREHEADER with its 16 bit fields
const INFO_HEADER_LENGTH: u8 = 40;

/// Read the dimensions out of a BMP file header
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let header: [u8; 32] = stream.read_fixed_bytes()?;

    if header[14] == INFO_HEADER_LENGTH {
        let width = i32::from_le_bytes(header[18..22].try_into().unwrap());
        let height = i32::from_le_bytes(header[22..26].try_into().unwrap());

        // top-down bitmaps store their height negated
        let width = usize::try_from(width).map_err(|_| ProbeErrors::CannotParseImage)?;
        let height = height.unsigned_abs() as usize;

        Ok((width, height))
    } else {
        let width = u16::from_le_bytes(header[18..20].try_into().unwrap());
        let height = u16::from_le_bytes(header[20..22].try_into().unwrap());

        Ok((usize::from(width), usize::from(height)))
    }
}
