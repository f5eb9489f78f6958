//! Synchronous IO engine
//!
//! This module provides the engine used for real runs: blocking `lseek`,
//! `read` and `write` calls on the target file, one syscall per method call.
//!
//! # Features
//!
//! - Works on any file the target layer could open, with or without O_DIRECT
//! - Never loops on partial transfers, so short reads and writes surface as-is
//! - Closes the file descriptor when dropped
//!
//! # Performance
//!
//! One operation at a time (queue depth 1). Each call blocks until the kernel
//! completes it, which is what a per-operation latency measurement wants.

use super::IOEngine;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Synchronous IO engine over an owned file
#[derive(Debug)]
pub struct SyncEngine {
    file: File,
}

impl SyncEngine {
    /// Create an engine that owns `file` for the rest of the run
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl IOEngine for SyncEngine {
    #[inline(always)]
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    #[inline(always)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    #[inline(always)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }
}
