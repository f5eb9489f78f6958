//! File target implementation
//!
//! Opens the run's target file with flags derived from the workload and
//! reports the facts the validator needs (IO block size and current size).
//! The file descriptor is owned by a `std::fs::File`, so it is closed exactly
//! once when the target is dropped, whichever way the run ends.
//!
//! # Example
//!
//! ```no_run
//! use ioloader::config::Direction;
//! use ioloader::target::{OpenFlags, TargetFile};
//! use std::path::Path;
//!
//! let target = TargetFile::open(Path::new("/tmp/testfile"), OpenFlags::for_run(Direction::Write, false))?;
//! let facts = target.facts()?;
//! println!("blksize={} size={}", facts.blksize, facts.size);
//! # Ok::<(), ioloader::LoadError>(())
//! ```

use super::OpenFlags;
use crate::config::validator::FileFacts;
use crate::error::{LoadError, LoadResult};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::{MetadataExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

/// Permission bits for files created by write runs
const CREATE_MODE: u32 = 0o600;

/// An opened target file
#[derive(Debug)]
pub struct TargetFile {
    path: PathBuf,
    file: File,
    flags: OpenFlags,
}

impl TargetFile {
    /// Open (or, for writes, create) the target
    ///
    /// # Errors
    ///
    /// `Open` if the file cannot be opened with the requested flags, e.g. it
    /// does not exist for a read run or the filesystem refuses O_DIRECT.
    pub fn open(path: &Path, flags: OpenFlags) -> LoadResult<Self> {
        let mut options = OpenOptions::new();
        if flags.write {
            options.write(true).create(true).mode(CREATE_MODE);
        } else {
            options.read(true);
        }

        let custom_flags = flags.custom_flags();
        if custom_flags != 0 {
            options.custom_flags(custom_flags);
        }

        let file = options.open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            flags,
        })
    }

    /// Query the IO block size and current size of the open file
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be stat'ed; without these facts the
    /// workload cannot be validated.
    pub fn facts(&self) -> LoadResult<FileFacts> {
        let metadata = self.file.metadata().map_err(|e| {
            LoadError::config(format!("fstat failed on {}: {}", self.path.display(), e))
        })?;
        Ok(FileFacts {
            blksize: metadata.blksize(),
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// Hand the open file over to an IO engine
    pub fn into_file(self) -> File {
        self.file
    }
}
