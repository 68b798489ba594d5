/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte plumbing shared by the pixprobe image parsers
//!
//! This crate provides the two layers every parser in the pixprobe family
//! sits on top of:
//!
//! - A [`ChunkSource`] trait, the single contract for producers of
//!   successive byte windows, with in-memory ([`SliceSource`]) and, with the
//!   `std` feature, `std::io` backed ([`SeekSource`], [`StreamSource`])
//!   implementations.
//! - A [`PullStream`], a forward-only cursor over a chunk source offering
//!   peek/read/skip with endian aware integer reads, fetching from the
//!   source only when a parser actually demands more bytes.
//!
//! The crate is `no_std` with `alloc`; the `std` feature adds the io backed
//! sources.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::source::{ChunkSource, SliceSource, SourceError};
#[cfg(feature = "std")]
pub use crate::source::{SeekSource, StreamSource};
pub use crate::stream::{PullStream, DEFAULT_CHUNK_SIZE};

mod source;
mod stream;
