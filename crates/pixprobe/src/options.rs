/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Probe options

use pixprobe_core::DEFAULT_CHUNK_SIZE;

/// Options that influence probing
///
/// The defaults match what the probing routines expect of well formed
/// images; limits exist so a corrupt header cannot report absurd
/// dimensions as if they were real.
#[derive(Debug, Copy, Clone)]
pub struct ProbeOptions {
    /// Maximum width the prober will report without
    /// flagging the image as out of bounds.
    ///
    /// - Default value: 16384
    max_width:  usize,
    /// Maximum height the prober will report without
    /// flagging the image as out of bounds.
    ///
    /// - Default value: 16384
    max_height: usize,
    /// Number of bytes fetched from the byte source per request.
    ///
    /// - Default value: 256
    chunk_size: usize
}

impl Default for ProbeOptions {
    fn default() -> Self {
        ProbeOptions {
            max_width:  1 << 14,
            max_height: 1 << 14,
            chunk_size: DEFAULT_CHUNK_SIZE
        }
    }
}

impl ProbeOptions {
    /// Create options with their default values
    pub fn new() -> ProbeOptions {
        ProbeOptions::default()
    }

    /// Get maximum width configured
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the configured fetch size
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Set maximum width for which the prober will not flag
    /// images wider than it
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the prober will not flag
    /// images taller than it
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the number of bytes fetched from the byte source per request
    pub fn set_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
