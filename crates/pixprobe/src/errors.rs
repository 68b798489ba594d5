/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use pixprobe_core::SourceError;

/// Probe failures that can occur while identifying an image
#[non_exhaustive]
pub enum ProbeErrors {
    /// The underlying byte source could not be read at all
    Fetch(SourceError),
    /// No known image signature matched the start of the input
    UnknownImageType,
    /// The format was recognised but the requested property could not
    /// be recovered from its headers
    SizeNotFound,
    /// A parser ran out of input or met a malformed header structure
    CannotParseImage,
    /// Parsed dimensions lie above the configured limit for a given
    /// width or height
    TooLargeDimensions(&'static str, usize, usize)
}

impl Debug for ProbeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fetch(err) => {
                writeln!(f, "Cannot fetch image bytes: {:?}", err)
            }
            Self::UnknownImageType => {
                writeln!(f, "Unknown image type, no signature matched")
            }
            Self::SizeNotFound => {
                writeln!(f, "Could not recover image size from headers")
            }
            Self::CannotParseImage => {
                writeln!(f, "Cannot parse image, input exhausted or corrupt")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
        }
    }
}

impl From<SourceError> for ProbeErrors {
    fn from(value: SourceError) -> Self {
        match value {
            // a parser asked for bytes the input no longer has
            SourceError::NotEnoughBytes(..) => ProbeErrors::CannotParseImage,
            other => ProbeErrors::Fetch(other)
        }
    }
}
