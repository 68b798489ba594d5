/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The prober tying dispatch and the format parsers together

use log::trace;
use pixprobe_core::{ChunkSource, PullStream};

use crate::errors::ProbeErrors;
use crate::format::{identify, ImageFormat};
use crate::formats::{bmp, gif, ico, jpeg, png, psd, svg, tiff, webp};
use crate::options::ProbeOptions;

/// Everything a successful probe recovers about an image
///
/// Width and height are final display values: when the Exif orientation
/// transposes the sensor axes (values five and up) the swap has already
/// been applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageInfo {
    /// The detected format
    pub format:      ImageFormat,
    /// Display width in pixels
    pub width:       usize,
    /// Display height in pixels
    pub height:      usize,
    /// Exif orientation, 1..=8, 1 when the image carries none
    pub orientation: u16
}

impl ImageInfo {
    /// Get image width and height respectively
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// An image prober over any chunk source
///
/// A prober runs one extraction: the stream below it is forward only, so
/// create a fresh prober (or rewind the source) for another pass. Format
/// identification alone never consumes bytes, hence
/// [`probe_format`](Self::probe_format) followed by [`probe`](Self::probe)
/// on the same prober is fine.
pub struct ImageProber<T: ChunkSource> {
    stream:  PullStream<T>,
    options: ProbeOptions,
    format:  Option<ImageFormat>
}

impl<T: ChunkSource> ImageProber<T> {
    /// Create a prober reading from `source`
    pub fn new(source: T) -> ImageProber<T> {
        ImageProber::new_with_options(source, ProbeOptions::default())
    }

    /// Create a prober with options that influence probing
    pub fn new_with_options(source: T, options: ProbeOptions) -> ImageProber<T> {
        ImageProber {
            stream: PullStream::with_chunk_size(source, options.chunk_size()),
            options,
            format: None
        }
    }

    /// Identify the image format from its magic bytes
    ///
    /// Only peeks at the input, so a full [`probe`](Self::probe) can still
    /// follow on the same prober.
    pub fn probe_format(&mut self) -> Result<ImageFormat, ProbeErrors> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        let format = identify(&mut self.stream)?;

        trace!("Detected format: {:?}", format);
        self.format = Some(format);

        Ok(format)
    }

    /// Identify the format and read dimensions and orientation out of
    /// the image headers
    pub fn probe(&mut self) -> Result<ImageInfo, ProbeErrors> {
        let format = self.probe_format()?;

        let stream = &mut self.stream;
        let parsed = match format {
            ImageFormat::BMP => bmp::parse(stream).map(with_no_orientation),
            ImageFormat::GIF => gif::parse(stream).map(with_no_orientation),
            ImageFormat::PNG => png::parse(stream).map(with_no_orientation),
            ImageFormat::PSD => psd::parse(stream).map(with_no_orientation),
            ImageFormat::ICO | ImageFormat::CUR => ico::parse(stream).map(with_no_orientation),
            ImageFormat::WEBP => webp::parse(stream).map(with_no_orientation),
            ImageFormat::SVG => svg::parse(stream).map(with_no_orientation),
            ImageFormat::JPEG => jpeg::parse(stream),
            ImageFormat::TIFF => tiff::parse(stream)
        };
        let (width, height, orientation) = parsed.map_err(demote_parse_error)?;

        if width > self.options.max_width() {
            return Err(ProbeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(ProbeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }

        trace!("Image width: {}", width);
        trace!("Image height: {}", height);
        trace!("Image orientation: {}", orientation);

        Ok(ImageInfo {
            format,
            width,
            height,
            orientation
        })
    }

    /// Identify the format and report whether the file holds more than
    /// one frame
    ///
    /// Formats that cannot animate report `false` without any further
    /// reads.
    pub fn probe_animated(&mut self) -> Result<bool, ProbeErrors> {
        let format = self.probe_format()?;

        let animated = match format {
            ImageFormat::GIF => gif::is_animated(&mut self.stream),
            ImageFormat::PNG => png::is_animated(&mut self.stream),
            ImageFormat::WEBP => webp::is_animated(&mut self.stream),
            _ => Ok(false)
        };

        animated.map_err(demote_parse_error)
    }

    /// Destroy the prober, returning the underlying source
    pub fn consume(self) -> T {
        self.stream.consume()
    }
}

fn with_no_orientation(dimensions: (usize, usize)) -> (usize, usize, u16) {
    (dimensions.0, dimensions.1, 1)
}

// Once a format has been decided, a parser running dry means the headers
// did not yield the property, not that the fetch itself broke.
fn demote_parse_error(error: ProbeErrors) -> ProbeErrors {
    match error {
        ProbeErrors::CannotParseImage => ProbeErrors::SizeNotFound,
        other => other
    }
}
