//! Target abstraction
//!
//! A target is the single file a run reads from or writes to. This module
//! derives the open flags from the workload and exposes the opened file to the
//! IO engine.
//!
//! # Open Flags
//!
//! | Direction | Buffered | Direct |
//! |---|---|---|
//! | read  | `O_RDONLY` | `O_RDONLY \| O_DIRECT` |
//! | write | `O_WRONLY \| O_CREAT` | `O_WRONLY \| O_CREAT \| O_DIRECT \| O_SYNC` |
//!
//! Newly created files get mode `0600`. Neither direction truncates the file.

pub mod file;

pub use file::TargetFile;

use crate::config::Direction;

/// Flags used to open a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
    /// Open for writing (and create if missing) instead of reading
    pub write: bool,

    /// Use direct IO (O_DIRECT) - bypass page cache
    pub direct: bool,

    /// Use synchronous IO (O_SYNC) - writes reach the device before returning
    pub sync: bool,
}

impl OpenFlags {
    /// Flags for a run in `direction`, with or without direct IO
    ///
    /// Direct writes are also synchronous, so a completed write has really
    /// reached the device.
    pub fn for_run(direction: Direction, direct: bool) -> Self {
        let write = direction == Direction::Write;
        Self {
            write,
            direct,
            sync: write && direct,
        }
    }

    /// Extra `open(2)` flags beyond the access mode
    pub fn custom_flags(&self) -> libc::c_int {
        let mut flags = 0;
        #[cfg(target_os = "linux")]
        if self.direct {
            flags |= libc::O_DIRECT;
        }
        if self.sync {
            flags |= libc::O_SYNC;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flags() {
        let flags = OpenFlags::for_run(Direction::Read, false);
        assert!(!flags.write);
        assert!(!flags.sync);
        assert_eq!(flags.custom_flags(), 0);
    }

    #[test]
    fn test_buffered_write_is_not_sync() {
        let flags = OpenFlags::for_run(Direction::Write, false);
        assert!(flags.write);
        assert!(!flags.sync);
        assert_eq!(flags.custom_flags(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_direct_write_adds_sync() {
        let flags = OpenFlags::for_run(Direction::Write, true);
        assert!(flags.sync);
        assert_eq!(flags.custom_flags(), libc::O_DIRECT | libc::O_SYNC);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_direct_read_is_not_sync() {
        let flags = OpenFlags::for_run(Direction::Read, true);
        assert!(!flags.sync);
        assert_eq!(flags.custom_flags(), libc::O_DIRECT);
    }
}
