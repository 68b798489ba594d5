/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;
use crate::exif::Exif;

/// Read the dimensions out of a TIFF file
///
/// A TIFF file starts with the very structure the Exif reader walks, so
/// the whole parse is a delegation. Raw camera formats sharing the byte
/// order signature usually carry none of the wanted tags and fail here.
pub(crate) fn parse<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<(usize, usize, u16), ProbeErrors> {
    let exif = Exif::parse(stream)?;

    trace!("Tiff byte order: {:?}", exif.byte_order);

    let width = exif.width.ok_or(ProbeErrors::CannotParseImage)?;
    let height = exif.height.ok_or(ProbeErrors::CannotParseImage)?;

    if exif.rotated() {
        Ok((height, width, exif.orientation))
    } else {
        Ok((width, height, exif.orientation))
    }
}
