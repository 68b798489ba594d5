/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image format identification from magic bytes
//!
//! The dispatcher inspects the first handful of bytes of the input through
//! the pull stream's peek, never consuming anything, so whichever parser
//! is chosen afterwards starts from absolute position zero.

use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;

// the <svg literal should turn up within the first 250 bytes of anything
// that really is an svg document
const SVG_DETECT_WINDOW: usize = 10;
const SVG_DETECT_ROUNDS: usize = 25;

/// All image formats the prober understands
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Windows Bitmap files
    BMP,
    /// Graphics Interchange Format
    GIF,
    /// Joint Photographic Experts Group
    JPEG,
    /// Portable Network Graphics
    PNG,
    /// Tagged Image File Format
    TIFF,
    /// Photoshop documents
    PSD,
    /// Windows icon resources
    ICO,
    /// Windows cursor resources
    CUR,
    /// WebP, any of the VP8, VP8L and VP8X sub-formats
    WEBP,
    /// Scalable Vector Graphics documents
    SVG
}

impl ImageFormat {
    /// The canonical file extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::BMP => "bmp",
            ImageFormat::GIF => "gif",
            ImageFormat::JPEG => "jpg",
            ImageFormat::PNG => "png",
            ImageFormat::TIFF => "tiff",
            ImageFormat::PSD => "psd",
            ImageFormat::ICO => "ico",
            ImageFormat::CUR => "cur",
            ImageFormat::WEBP => "webp",
            ImageFormat::SVG => "svg"
        }
    }

    /// Whether files of this format can hold more than one frame
    pub const fn can_animate(self) -> bool {
        matches!(self, ImageFormat::GIF | ImageFormat::PNG | ImageFormat::WEBP)
    }
}

/// Decide which format the input holds from its leading bytes
///
/// Only peeks, so the stream position is still zero when this returns.
pub(crate) fn identify<S: ChunkSource>(
    stream: &mut PullStream<S>
) -> Result<ImageFormat, ProbeErrors> {
    // a failure this early means the source produced nothing usable at
    // all, which is a fetch problem rather than an unknown signature
    let magic = match stream.peek(2) {
        Ok(bytes) => [bytes[0], bytes[1]],
        Err(e) => return Err(ProbeErrors::Fetch(e))
    };

    match &magic {
        b"BM" => Ok(ImageFormat::BMP),
        b"GI" => Ok(ImageFormat::GIF),
        [0xFF, 0xD8] => Ok(ImageFormat::JPEG),
        [0x89, b'P'] => Ok(ImageFormat::PNG),
        b"II" | b"MM" => Ok(ImageFormat::TIFF),
        b"8B" => Ok(ImageFormat::PSD),
        [0x00, 0x00] => {
            let head = stream.peek(3).map_err(|_| ProbeErrors::UnknownImageType)?;

            match head[2] {
                1 => Ok(ImageFormat::ICO),
                2 => Ok(ImageFormat::CUR),
                _ => Err(ProbeErrors::UnknownImageType)
            }
        }
        b"RI" => {
            let head = stream.peek(12).map_err(|_| ProbeErrors::UnknownImageType)?;

            if &head[8..12] == b"WEBP" {
                Ok(ImageFormat::WEBP)
            } else {
                Err(ProbeErrors::UnknownImageType)
            }
        }
        b"<s" | b"<?" | b"<!" => scan_for_svg(stream),
        _ => Err(ProbeErrors::UnknownImageType)
    }
}

// Grow the peeked window ten bytes at a time looking for the <svg
// literal; xml prologues and doctypes of arbitrary (bounded) length may
// precede the root element.
fn scan_for_svg<S: ChunkSource>(stream: &mut PullStream<S>) -> Result<ImageFormat, ProbeErrors> {
    for round in 1..=SVG_DETECT_ROUNDS {
        let window = match stream.peek(SVG_DETECT_WINDOW * round) {
            Ok(window) => window,
            Err(_) => return Err(ProbeErrors::UnknownImageType)
        };

        if window.windows(4).any(|w| w == b"<svg") {
            return Ok(ImageFormat::SVG);
        }
    }
    Err(ProbeErrors::UnknownImageType)
}
