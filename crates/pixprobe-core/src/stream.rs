/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The pull stream, a forward-only cursor over a chunk source
//!
//! Parsers see one interface: peek some bytes, read some bytes, or skip
//! ahead. The stream turns those demands into chunk fetches, buffering
//! only what the most recent peek required, so a parser that stops after
//! the image header never causes the rest of the input to be produced.

use alloc::vec;
use alloc::vec::Vec;

use crate::source::{ChunkSource, SourceError};

/// The number of bytes fetched from a source per request
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// A forward-only byte cursor over a [`ChunkSource`]
///
/// The stream owns a rolling buffer holding the most recently produced
/// chunk plus any leftover from earlier ones. `peek` materializes bytes
/// without consuming them, `read`/`skip` advance the cursor; there is no
/// rewind.
pub struct PullStream<S> {
    source:     S,
    chunk_size: usize,
    buffer:     Vec<u8>,
    pos:        usize,
    absolute:   u64
}

impl<S: ChunkSource> PullStream<S> {
    /// Create a stream fetching [`DEFAULT_CHUNK_SIZE`] byte chunks
    pub fn new(source: S) -> PullStream<S> {
        PullStream::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    /// Create a stream fetching `chunk_size` byte chunks
    ///
    /// A zero chunk size is nonsensical and is bumped to one.
    pub fn with_chunk_size(source: S, chunk_size: usize) -> PullStream<S> {
        PullStream {
            source,
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
            pos: 0,
            absolute: 0
        }
    }

    /// The absolute number of bytes consumed since construction
    #[inline]
    pub const fn position(&self) -> u64 {
        self.absolute
    }

    /// Destroy the stream, returning the underlying source
    #[inline]
    pub fn consume(self) -> S {
        self.source
    }

    // Make sure at least `n` bytes past the cursor sit in the buffer,
    // discarding the consumed prefix first and then appending chunks
    // until the demand is met or the source ends.
    fn fill(&mut self, n: usize) -> Result<(), SourceError> {
        if self.buffer.len() - self.pos >= n {
            return Ok(());
        }
        if self.pos > 0 {
            self.buffer.drain(..self.pos);
            self.pos = 0;
        }
        while self.buffer.len() < n {
            let start = self.buffer.len();

            self.buffer.resize(start + self.chunk_size, 0);
            let got = self.source.next_chunk(&mut self.buffer[start..])?;
            self.buffer.truncate(start + got);

            if got == 0 {
                return Err(SourceError::NotEnoughBytes(self.buffer.len(), n));
            }
        }
        Ok(())
    }

    /// Return the next `n` bytes without advancing the cursor
    ///
    /// Fetches from the source as needed; if the source ends before `n`
    /// bytes are available this fails with
    /// [`NotEnoughBytes`](SourceError::NotEnoughBytes).
    pub fn peek(&mut self, n: usize) -> Result<&[u8], SourceError> {
        self.fill(n)?;
        Ok(&self.buffer[self.pos..self.pos + n])
    }

    /// Read a single byte
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, SourceError> {
        self.fill(1)?;
        let byte = self.buffer[self.pos];
        self.pos += 1;
        self.absolute += 1;

        Ok(byte)
    }

    /// Read a fixed number of bytes into an array
    pub fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], SourceError> {
        self.fill(N)?;

        let mut out = [0; N];
        out.copy_from_slice(&self.buffer[self.pos..self.pos + N]);
        self.pos += N;
        self.absolute += N as u64;

        Ok(out)
    }

    /// Read `n` bytes into a freshly allocated vector
    pub fn read_vec(&mut self, n: usize) -> Result<Vec<u8>, SourceError> {
        self.fill(n)?;

        let out = self.buffer[self.pos..self.pos + n].to_vec();
        self.pos += n;
        self.absolute += n as u64;

        Ok(out)
    }

    /// Advance the cursor by `n` bytes without materializing them
    ///
    /// Buffered bytes are consumed first; past those, whole chunks are
    /// fetched and dropped and only the fragment straddling the skip
    /// target is retained.
    pub fn skip(&mut self, n: usize) -> Result<(), SourceError> {
        let buffered = self.buffer.len() - self.pos;

        if n <= buffered {
            self.pos += n;
        } else {
            let mut remaining = n - buffered;

            self.buffer.clear();
            self.pos = 0;

            let mut scratch = vec![0; self.chunk_size];

            while remaining > 0 {
                let got = self.source.next_chunk(&mut scratch)?;

                if got == 0 {
                    return Err(SourceError::NotEnoughBytes(0, remaining));
                }
                if got > remaining {
                    self.buffer.extend_from_slice(&scratch[remaining..got]);
                    remaining = 0;
                } else {
                    remaining -= got;
                }
            }
        }
        self.absolute += n as u64;

        Ok(())
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_int_type {
    ($name:tt,$name_be:tt,$name_le:tt,$int_type:tt) => {
        impl<S: ChunkSource> PullStream<S> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, SourceError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space: [u8; SIZE_OF_VAL] = self.read_fixed_bytes()?;

                Ok(match mode {
                    Mode::BE => $int_type::from_be_bytes(space),
                    Mode::LE => $int_type::from_le_bytes(space)
                })
            }

            #[doc = concat!("Read ", stringify!($int_type), " as a big endian integer")]
            #[doc = concat!(
                "Returning an error if the source cannot support a ",
                stringify!($int_type),
                " read."
            )]
            #[inline]
            pub fn $name_be(&mut self) -> Result<$int_type, SourceError> {
                self.$name(Mode::BE)
            }

            #[doc = concat!("Read ", stringify!($int_type), " as a little endian integer")]
            #[doc = concat!(
                "Returning an error if the source cannot support a ",
                stringify!($int_type),
                " read."
            )]
            #[inline]
            pub fn $name_le(&mut self) -> Result<$int_type, SourceError> {
                self.$name(Mode::LE)
            }
        }
    };
}

get_int_type!(get_u16_inner, get_u16_be, get_u16_le, u16);
get_int_type!(get_u32_inner, get_u32_be, get_u32_le, u32);
