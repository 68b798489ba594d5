/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Chunk sources, the producers feeding a [`PullStream`](crate::PullStream)
//!
//! A chunk source hands out successive windows of bytes from some input.
//! The pull stream above it decides how big a window to ask for and when;
//! a source only has to fill the window it is given and report end of
//! input by producing nothing.

use core::fmt::{Debug, Formatter};

#[cfg(feature = "std")]
mod std_sources;

#[cfg(feature = "std")]
pub use std_sources::{SeekSource, StreamSource};

/// Errors a byte source can report
pub enum SourceError {
    /// A standard library I/O error
    ///
    /// Only available with the `std` feature
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// Not enough bytes to satisfy a read
    // found, expected
    NotEnoughBytes(usize, usize),
    /// Any other failure
    Generic(&'static str)
}

impl Debug for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            SourceError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            SourceError::NotEnoughBytes(found, expected) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            SourceError::Generic(err) => {
                writeln!(f, "Generic source error: {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        SourceError::StdIoError(value)
    }
}

impl From<&'static str> for SourceError {
    fn from(value: &'static str) -> Self {
        SourceError::Generic(value)
    }
}

/// A producer of successive byte windows from some input
///
/// Implementations fill as much of the window they are handed as the input
/// can supply and return the count of bytes produced.
pub trait ChunkSource {
    /// Produce the next run of bytes from the input into `chunk`,
    /// returning how many bytes were written.
    ///
    /// `Ok(0)` signals end of input. A short but non zero count is still
    /// data; the call after it must return `Ok(0)`.
    fn next_chunk(&mut self, chunk: &mut [u8]) -> Result<usize, SourceError>;

    /// Return the source to its starting position, when the source
    /// supports that.
    ///
    /// Sources that cannot move backwards simply succeed without doing
    /// anything, so callers can always request a rewind after a parse.
    fn rewind(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// An in-memory chunk source over a borrowed byte slice
///
/// This is the cheapest source: producing a chunk is a `copy_from_slice`
/// and rewinding resets an offset.
pub struct SliceSource<'a> {
    data:   &'a [u8],
    offset: usize
}

impl<'a> SliceSource<'a> {
    /// Create a new source reading from the start of `data`
    pub fn new(data: &'a [u8]) -> SliceSource<'a> {
        SliceSource { data, offset: 0 }
    }
}

impl ChunkSource for SliceSource<'_> {
    fn next_chunk(&mut self, chunk: &mut [u8]) -> Result<usize, SourceError> {
        let remaining = &self.data[self.offset..];
        let take = remaining.len().min(chunk.len());

        chunk[..take].copy_from_slice(&remaining[..take]);
        self.offset += take;

        Ok(take)
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        self.offset = 0;
        Ok(())
    }
}
