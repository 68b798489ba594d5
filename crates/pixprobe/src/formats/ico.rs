/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

/// Read the largest image in an ICO or CUR resource directory
///
/// Icon resources carry several renditions; the one with the largest
/// pixel area wins, ties going to the later entry.
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize), ProbeErrors> {
    let header: [u8; 6] = stream.read_fixed_bytes()?;
    let count = u16::from_le_bytes(header[4..6].try_into().unwrap());

    let mut best: Option<(usize, usize)> = None;

    for _ in 0..count {
        let entry: [u8; 16] = stream.read_fixed_bytes()?;

        let width = dimension(entry[0]);
        let height = dimension(entry[1]);

        if best.map_or(true, |(w, h)| width * height >= w * h) {
            best = Some((width, height));
        }
    }

    best.ok_or(ProbeErrors::CannotParseImage)
}

// a directory entry dimension is a single byte where zero means 256
const fn dimension(value: u8) -> usize {
    if value == 0 {
        256
    } else {
        value as usize
    }
}
