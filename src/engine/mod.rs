//! IO engine abstraction
//!
//! An IO engine performs the three primitive operations a run is made of:
//! reposition, read one block, write one block. The run loop in
//! [`crate::worker`] is generic over [`IOEngine`], so the same loop drives the
//! real file ([`sync::SyncEngine`]) and the in-memory test double
//! ([`mock::MockEngine`]).
//!
//! # Semantics
//!
//! Every method is exactly one blocking call. Engines must not retry short
//! transfers or interrupted calls: the run loop decides what a short count
//! means, and hiding it would distort the measurement.
//!
//! # Example
//!
//! ```no_run
//! use ioloader::engine::IOEngine;
//! use ioloader::engine::sync::SyncEngine;
//!
//! let file = std::fs::File::open("/tmp/testfile")?;
//! let mut engine = SyncEngine::new(file);
//! let mut block = vec![0u8; 4096];
//!
//! engine.seek(8192)?;
//! let n = engine.read(&mut block)?;
//! println!("read {} bytes", n);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;

/// IO engine trait for all backends
///
/// Engines must be `Send` so a run can be moved to another thread, but a
/// single engine is only ever used by one run.
pub trait IOEngine: Send {
    /// Position the next transfer at `offset` bytes from the start
    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Read up to `buf.len()` bytes at the current position
    ///
    /// Returns the number of bytes read; `0` means end of file.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write up to `buf.len()` bytes at the current position
    ///
    /// Returns the number of bytes the kernel accepted, which may be short.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

pub mod mock;
pub mod sync;
