/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

/// Read the dimensions out of a Photoshop file header
///
/// The header stores height ahead of width.
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let header: [u8; 26] = stream.read_fixed_bytes()?;

    let height = u32::from_be_bytes(header[14..18].try_into().unwrap());
    let width = u32::from_be_bytes(header[18..22].try_into().unwrap());

    Ok((width as usize, height as usize))
}
