/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Identify image formats and dimensions while reading as little as possible
//!
//! This crate answers three questions about an image (what format is it,
//! how big is it, and which way up is it) by walking only the header
//! structures of the file. Pixel data is never decoded and, on seekable
//! sources, never even fetched.
//!
//! # Supported formats
//! BMP, GIF, JPEG, PNG, TIFF, PSD, ICO, CUR, WEBP (VP8, VP8L and VP8X)
//! and SVG. JPEG and TIFF additionally surface the Exif orientation and
//! the reported dimensions come pre-swapped when the orientation
//! transposes the axes.
//!
//! # Features
//! - `std` (default): probing filesystem paths and `std::io` readers
//! - `serde`: serializing [`ImageInfo`] and [`ImageFormat`]
//!
//! Without `std` the crate is `no_std` (with `alloc`) and probes
//! in-memory buffers.
//!
//! # Usage
//! ```
//! use pixprobe::{probe_buffer, ImageFormat};
//!
//! let gif = [
//!     b'G', b'I', b'F', b'8', b'9', b'a', 4, 0, 2, 0, 0
//! ];
//! let info = probe_buffer(&gif).unwrap();
//!
//! assert_eq!(info.format, ImageFormat::GIF);
//! assert_eq!(info.dimensions(), (4, 2));
//! ```
//!
//! Probing a file reads a handful of 256 byte chunks from its start:
//! ```no_run
//! let info = pixprobe::probe_path("image.jpg").unwrap();
//! println!("{}x{}", info.width, info.height);
//! ```
//!
//! # Security
//! The prober is meant to be safe on untrusted input: reads are bounded
//! by the source, malformed lengths surface as errors rather than large
//! allocations, and the fuzz harness feeds arbitrary bytes through every
//! parser.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use pixprobe_core::{ChunkSource, PullStream, SliceSource, SourceError};
#[cfg(feature = "std")]
pub use pixprobe_core::{SeekSource, StreamSource};

pub use crate::errors::ProbeErrors;
pub use crate::format::ImageFormat;
pub use crate::options::ProbeOptions;
pub use crate::probe::{ImageInfo, ImageProber};

mod errors;
mod exif;
mod format;
mod formats;
mod options;
mod probe;
mod serde;

/// Probe an in-memory buffer for format, dimensions and orientation
pub fn probe_buffer(data: &[u8]) -> Result<ImageInfo, ProbeErrors> {
    ImageProber::new(SliceSource::new(data)).probe()
}

/// Identify the format of an in-memory buffer from its magic bytes
pub fn format_of_buffer(data: &[u8]) -> Result<ImageFormat, ProbeErrors> {
    ImageProber::new(SliceSource::new(data)).probe_format()
}

/// Report whether an in-memory buffer holds an animated image
pub fn animated_buffer(data: &[u8]) -> Result<bool, ProbeErrors> {
    ImageProber::new(SliceSource::new(data)).probe_animated()
}

#[cfg(feature = "std")]
mod std_entries {
    use std::fs::File;
    use std::io::{BufReader, Read, Seek};
    use std::path::Path;

    use crate::{
        ChunkSource, ImageFormat, ImageInfo, ImageProber, ProbeErrors, SeekSource, SourceError,
        StreamSource
    };

    fn open<P: AsRef<Path>>(path: P) -> Result<SeekSource<BufReader<File>>, ProbeErrors> {
        let file = File::open(path).map_err(|e| ProbeErrors::Fetch(SourceError::from(e)))?;

        Ok(SeekSource::new(BufReader::new(file)))
    }

    // Rewinding is part of the contract: a caller handing us its reader
    // gets it back at position zero no matter how the probe went.
    fn rewound<T>(prober: ImageProber<T>)
    where
        T: ChunkSource
    {
        let mut source = prober.consume();
        let _ = source.rewind();
    }

    /// Probe the file at `path` for format, dimensions and orientation
    ///
    /// The file is opened read-only and closed again on every exit path.
    pub fn probe_path<P: AsRef<Path>>(path: P) -> Result<ImageInfo, ProbeErrors> {
        ImageProber::new(open(path)?).probe()
    }

    /// Identify the format of the file at `path` from its magic bytes
    pub fn format_of_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat, ProbeErrors> {
        ImageProber::new(open(path)?).probe_format()
    }

    /// Report whether the file at `path` holds an animated image
    pub fn animated_path<P: AsRef<Path>>(path: P) -> Result<bool, ProbeErrors> {
        ImageProber::new(open(path)?).probe_animated()
    }

    /// Probe a seekable reader, leaving it at position zero afterwards
    ///
    /// The reader is rewound on success and on failure, so probing the
    /// same reader twice returns the same answer.
    pub fn probe_reader<R: Read + Seek>(reader: &mut R) -> Result<ImageInfo, ProbeErrors> {
        let mut prober = ImageProber::new(SeekSource::new(&mut *reader));
        let result = prober.probe();

        rewound(prober);
        result
    }

    /// Identify the format a seekable reader holds, leaving it at
    /// position zero afterwards
    pub fn format_of_reader<R: Read + Seek>(reader: &mut R) -> Result<ImageFormat, ProbeErrors> {
        let mut prober = ImageProber::new(SeekSource::new(&mut *reader));
        let result = prober.probe_format();

        rewound(prober);
        result
    }

    /// Report whether a seekable reader holds an animated image, leaving
    /// it at position zero afterwards
    pub fn animated_reader<R: Read + Seek>(reader: &mut R) -> Result<bool, ProbeErrors> {
        let mut prober = ImageProber::new(SeekSource::new(&mut *reader));
        let result = prober.probe_animated();

        rewound(prober);
        result
    }

    /// Probe a forward-only reader
    ///
    /// The reader cannot be rewound; bytes consumed by the probe are
    /// gone. Prefer [`probe_reader`] whenever seeking is available.
    pub fn probe_stream<R: Read>(reader: R) -> Result<ImageInfo, ProbeErrors> {
        ImageProber::new(StreamSource::new(reader)).probe()
    }
}

#[cfg(feature = "std")]
pub use std_entries::*;
