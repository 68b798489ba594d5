/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Minimal EXIF reader shared by the JPEG and TIFF parsers
//!
//! Only the zeroth IFD is walked and only three tags are of interest:
//! image width, image height and orientation. JPEG hands this parser the
//! body of an APP1 segment over an in-memory stream, TIFF hands it the
//! main stream since a TIFF file starts with the very same structure.

use log::trace;
use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

const TAG_IMAGE_WIDTH: u16 = 0x0100;
const TAG_IMAGE_HEIGHT: u16 = 0x0101;
const TAG_ORIENTATION: u16 = 0x0112;

/// Byte order of the TIFF structure, from its leading order tag
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ByteEndian {
    LE,
    BE
}

/// The properties recovered from an EXIF block
pub(crate) struct Exif {
    pub width:       Option<usize>,
    pub height:      Option<usize>,
    /// Orientation per the EXIF specification, 1..=8, 1 when the block
    /// carries none
    pub orientation: u16,
    pub byte_order:  ByteEndian
}

impl Exif {
    /// True if the orientation transposes the sensor axes
    pub fn rotated(&self) -> bool {
        self.orientation >= 5
    }

    /// Walk the TIFF header and zeroth IFD sitting at the stream's
    /// current position
    pub fn parse<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<Exif, ProbeErrors> {
        let start = stream.position();

        let order_tag: [u8; 2] = stream.read_fixed_bytes()?;
        let byte_order = match &order_tag {
            b"II" => ByteEndian::LE,
            b"MM" => ByteEndian::BE,
            _ => return Err(ProbeErrors::CannotParseImage)
        };
        // the magic 42, not worth checking
        stream.skip(2)?;

        let ifd_offset = u64::from(read_long(stream, byte_order)?);
        let consumed = stream.position() - start;
        let to_ifd = ifd_offset
            .checked_sub(consumed)
            .ok_or(ProbeErrors::CannotParseImage)?;

        stream.skip(to_ifd as usize)?;

        let entries = read_short(stream, byte_order)?;

        let mut width = None;
        let mut height = None;
        let mut orientation = None;

        for _ in 0..entries {
            let tag = read_short(stream, byte_order)?;
            // field type and value count
            stream.skip(6)?;
            let value = read_short(stream, byte_order)?;
            // rest of the value field
            stream.skip(2)?;

            match tag {
                TAG_IMAGE_WIDTH => width = Some(usize::from(value)),
                TAG_IMAGE_HEIGHT => height = Some(usize::from(value)),
                TAG_ORIENTATION => orientation = Some(value),
                _ => {}
            }

            if width.is_some() && height.is_some() && orientation.is_some() {
                break;
            }
        }

        // anything outside the defined range counts as no orientation
        let orientation = match orientation {
            Some(value @ 1..=8) => value,
            _ => 1
        };

        trace!("Exif byte order: {:?}", byte_order);
        trace!("Exif orientation: {}", orientation);

        Ok(Exif {
            width,
            height,
            orientation,
            byte_order
        })
    }
}

fn read_short<S: ChunkSource>(
    stream: &mut PullStream<S>, order: ByteEndian
) -> Result<u16, ProbeErrors> {
    let value = match order {
        ByteEndian::LE => stream.get_u16_le()?,
        ByteEndian::BE => stream.get_u16_be()?
    };
    Ok(value)
}

fn read_long<S: ChunkSource>(
    stream: &mut PullStream<S>, order: ByteEndian
) -> Result<u32, ProbeErrors> {
    let value = match order {
        ByteEndian::LE => stream.get_u32_le()?,
        ByteEndian::BE => stream.get_u32_be()?
    };
    Ok(value)
}
