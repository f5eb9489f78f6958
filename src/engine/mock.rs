//! Mock IO engine for testing
//!
//! This module provides a mock implementation of the IOEngine trait that can be used
//! in tests. The mock engine keeps the "file" in memory, so tests of the run loop
//! are fast and deterministic and can provoke failures a real filesystem rarely
//! produces on demand.
//!
//! # Features
//!
//! - In-memory file contents that grow on write, like a sparse file
//! - Injectable seek/read/write errors and short writes at a chosen call
//! - Tracks every operation for verification
//!
//! # Example
//!
//! ```
//! use ioloader::engine::IOEngine;
//! use ioloader::engine::mock::{MockEngine, MockOp};
//!
//! let mut engine = MockEngine::new();
//! engine.seek(4).unwrap();
//! assert_eq!(engine.write(b"abcd").unwrap(), 4);
//!
//! assert_eq!(engine.contents(), b"\0\0\0\0abcd");
//! assert_eq!(engine.operations()[1].op, MockOp::Write);
//! ```

use super::IOEngine;
use std::io;

/// Kind of a recorded mock operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOp {
    Seek,
    Read,
    Write,
}

/// Record of an operation for testing verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub op: MockOp,
    /// Position the operation applied to
    pub offset: u64,
    /// Bytes transferred (0 for seeks)
    pub length: usize,
}

/// Mock IO engine for testing
///
/// Failure injection is keyed by the zero-based index of the call of that
/// kind, e.g. `fail_read_at(2)` fails the third read.
#[derive(Debug, Default)]
pub struct MockEngine {
    /// Simulated file contents
    data: Vec<u8>,

    /// Current file position
    position: u64,

    seeks: usize,
    reads: usize,
    writes: usize,

    fail_seek_at: Option<usize>,
    fail_read_at: Option<usize>,
    fail_write_at: Option<usize>,

    /// (write index, bytes accepted)
    short_write_at: Option<(usize, usize)>,

    /// Track all operations for verification
    operations: Vec<OperationRecord>,
}

impl MockEngine {
    /// Create an engine over an empty file
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over existing contents
    pub fn with_contents(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn fail_seek_at(mut self, index: usize) -> Self {
        self.fail_seek_at = Some(index);
        self
    }

    pub fn fail_read_at(mut self, index: usize) -> Self {
        self.fail_read_at = Some(index);
        self
    }

    pub fn fail_write_at(mut self, index: usize) -> Self {
        self.fail_write_at = Some(index);
        self
    }

    /// Make write number `index` accept only `accepted` bytes
    pub fn short_write_at(mut self, index: usize, accepted: usize) -> Self {
        self.short_write_at = Some((index, accepted));
        self
    }

    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    pub fn operations(&self) -> &[OperationRecord] {
        &self.operations
    }

    /// Offsets of all successful reads and writes, in order
    pub fn transfer_offsets(&self) -> Vec<u64> {
        self.operations
            .iter()
            .filter(|r| r.op != MockOp::Seek)
            .map(|r| r.offset)
            .collect()
    }

    fn record(&mut self, op: MockOp, length: usize) {
        self.operations.push(OperationRecord {
            op,
            offset: self.position,
            length,
        });
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("injected {} failure", what))
}

impl IOEngine for MockEngine {
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        let index = self.seeks;
        self.seeks += 1;
        if self.fail_seek_at == Some(index) {
            return Err(injected("seek"));
        }
        self.position = offset;
        self.record(MockOp::Seek, 0);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let index = self.reads;
        self.reads += 1;
        if self.fail_read_at == Some(index) {
            return Err(injected("read"));
        }

        let start = (self.position as usize).min(self.data.len());
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);

        self.record(MockOp::Read, n);
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_write_at == Some(index) {
            return Err(injected("write"));
        }

        let n = match self.short_write_at {
            Some((at, accepted)) if at == index => accepted.min(buf.len()),
            _ => buf.len(),
        };

        let start = self.position as usize;
        let end = start + n;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(&buf[..n]);

        self.record(MockOp::Write, n);
        self.position += n as u64;
        Ok(n)
    }
}
