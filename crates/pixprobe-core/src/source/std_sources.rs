/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io::{Read, Seek, SeekFrom};

use crate::source::{ChunkSource, SourceError};

/// A chunk source over a random-access reader
///
/// The source keeps its own offset and seeks to it before every window, so
/// each call reads a fixed window starting where the previous one ended no
/// matter what else moved the reader's cursor in between.
pub struct SeekSource<R> {
    inner:  R,
    offset: u64
}

impl<R: Read + Seek> SeekSource<R> {
    /// Create a source reading windows from the start of `inner`
    pub fn new(inner: R) -> SeekSource<R> {
        SeekSource { inner, offset: 0 }
    }

    /// Destroy the source, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ChunkSource for SeekSource<R> {
    fn next_chunk(&mut self, chunk: &mut [u8]) -> Result<usize, SourceError> {
        self.inner.seek(SeekFrom::Start(self.offset))?;

        let filled = read_full(&mut self.inner, chunk)?;
        self.offset += filled as u64;

        Ok(filled)
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        self.offset = 0;
        self.inner.seek(SeekFrom::Start(0))?;

        Ok(())
    }
}

/// A chunk source over a forward-only reader
///
/// Each call hands out the next window the reader produces. The source
/// cannot move backwards, so [`ChunkSource::rewind`] is a no-op.
pub struct StreamSource<R> {
    inner: R
}

impl<R: Read> StreamSource<R> {
    /// Create a source reading sequential windows from `inner`
    pub fn new(inner: R) -> StreamSource<R> {
        StreamSource { inner }
    }

    /// Destroy the source, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ChunkSource for StreamSource<R> {
    fn next_chunk(&mut self, chunk: &mut [u8]) -> Result<usize, SourceError> {
        read_full(&mut self.inner, chunk)
    }
}

// A short read from `Read` is not end of input, so keep filling the window
// until the reader is actually exhausted.
fn read_full<R: Read>(reader: &mut R, chunk: &mut [u8]) -> Result<usize, SourceError> {
    let mut filled = 0;

    while filled < chunk.len() {
        match reader.read(&mut chunk[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SourceError::from(e))
        }
    }
    Ok(filled)
}
