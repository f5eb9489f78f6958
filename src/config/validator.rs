//! Configuration validation against the opened target
//!
//! Direct IO rejects, at the syscall boundary, any request whose offset or
//! length is not a multiple of the filesystem's IO block size. Every such
//! constraint is checked here, once, before the first operation is issued, so a
//! run either starts with a fully consistent config or does not start at all.

use super::{AccessPattern, ByteRange, Direction, WorkloadConfig};
use crate::error::{LoadError, LoadResult};
use serde::Serialize;
use std::path::Path;

/// What the validator needs to know about the opened file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFacts {
    /// Preferred IO block size reported by the filesystem (`st_blksize`)
    pub blksize: u64,
    /// Current file size in bytes
    pub size: u64,
}

/// Workload config with the range resolved and the alignment discovered
///
/// Produced only by [`finalize`], so holding one means every invariant of a
/// run has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedConfig {
    workload: WorkloadConfig,
    range: ByteRange,
    alignment: u64,
}

impl FinalizedConfig {
    pub fn workload(&self) -> &WorkloadConfig {
        &self.workload
    }

    pub fn direction(&self) -> Direction {
        self.workload.direction()
    }

    pub fn pattern(&self) -> AccessPattern {
        self.workload.pattern()
    }

    pub fn block_size(&self) -> u64 {
        self.workload.block_size()
    }

    pub fn block_count(&self) -> u64 {
        self.workload.block_count()
    }

    pub fn direct(&self) -> bool {
        self.workload.direct()
    }

    pub fn target_path(&self) -> &Path {
        self.workload.target_path()
    }

    /// Resolved (and, for direct IO, truncated) range
    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// Filesystem IO block size of the target
    pub fn alignment(&self) -> u64 {
        self.alignment
    }

    /// Number of whole blocks that fit in the range
    pub fn slot_count(&self) -> u64 {
        self.range.len() / self.block_size()
    }
}

/// Resolve and check a workload against the facts of its opened target
///
/// - the alignment becomes the file's `blksize`
/// - an unset range becomes `[0, size)`
/// - with direct IO, `block_size` and `range.start` must be multiples of the
///   alignment and `range.end` is truncated down to one
/// - the final range must hold `block_size * block_count` bytes
pub fn finalize(workload: &WorkloadConfig, facts: FileFacts) -> LoadResult<FinalizedConfig> {
    let alignment = facts.blksize;
    let mut range = workload
        .range()
        .unwrap_or_else(|| ByteRange::new(0, facts.size));

    if workload.direct() {
        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(LoadError::config(format!(
                "filesystem reported alignment {} which cannot be used for direct IO",
                alignment
            )));
        }
        if workload.block_size() % alignment != 0 {
            return Err(LoadError::config(format!(
                "block_size {} is not a multiple of the filesystem alignment {}",
                workload.block_size(),
                alignment
            )));
        }
        if range.start % alignment != 0 {
            return Err(LoadError::config(format!(
                "range start {} is not a multiple of the filesystem alignment {}",
                range.start, alignment
            )));
        }
        range.end = (range.end / alignment) * alignment;
    }

    if range.len() < workload.requested_bytes() {
        return Err(LoadError::config(format!(
            "range {} ({} bytes) smaller than block_size * block_count ({} bytes)",
            range,
            range.len(),
            workload.requested_bytes()
        )));
    }

    Ok(FinalizedConfig {
        workload: workload.clone(),
        range,
        alignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workload(direct: bool, block_size: u64, block_count: u64, range: Option<ByteRange>) -> WorkloadConfig {
        let mut builder = WorkloadConfig::builder()
            .direction(Direction::Read)
            .block_size(block_size)
            .block_count(block_count)
            .target_path("/tmp/validator.dat")
            .direct(direct);
        if let Some(range) = range {
            builder = builder.range(range);
        }
        builder.build().unwrap()
    }

    fn facts(blksize: u64, size: u64) -> FileFacts {
        FileFacts { blksize, size }
    }

    #[test]
    fn test_whole_file_range_resolves_to_size() {
        let config = finalize(&workload(false, 4096, 4, None), facts(4096, 65536)).unwrap();
        assert_eq!(config.range(), ByteRange::new(0, 65536));
        assert_eq!(config.alignment(), 4096);
        assert_eq!(config.slot_count(), 16);
    }

    #[test]
    fn test_empty_file_with_whole_range_fails() {
        let err = finalize(&workload(false, 4096, 1, None), facts(4096, 0)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_explicit_range_ignores_file_size() {
        let range = ByteRange::new(0, 40960);
        let config = finalize(&workload(false, 4096, 10, Some(range)), facts(4096, 0)).unwrap();
        assert_eq!(config.range(), range);
    }

    #[test]
    fn test_buffered_io_skips_alignment_checks() {
        let range = ByteRange::new(100, 1100);
        let config = finalize(&workload(false, 100, 10, Some(range)), facts(4096, 0)).unwrap();
        assert_eq!(config.range(), range);
    }

    #[test]
    fn test_direct_unaligned_block_size_fails() {
        let err = finalize(&workload(true, 1000, 1, None), facts(4096, 1 << 20)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_direct_unaligned_range_start_fails() {
        let range = ByteRange::new(512, 512 + 8192 * 4);
        let err = finalize(&workload(true, 8192, 1, Some(range)), facts(4096, 0)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_direct_truncates_range_end() {
        let range = ByteRange::new(4096, 4096 * 5 + 100);
        let config = finalize(&workload(true, 4096, 4, Some(range)), facts(4096, 0)).unwrap();
        assert_eq!(config.range(), ByteRange::new(4096, 4096 * 5));
    }

    #[test]
    fn test_truncation_applied_before_size_check() {
        // 12287 bytes hold 2 aligned blocks, not 3
        let size = 4096 * 3 - 1;

        let two = finalize(&workload(true, 4096, 2, None), facts(4096, size)).unwrap();
        assert_eq!(two.range(), ByteRange::new(0, 8192));

        let err = finalize(&workload(true, 4096, 3, None), facts(4096, size)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));

        // Without direct IO the same range is not truncated
        let buffered = finalize(&workload(false, 4096, 2, None), facts(4096, size)).unwrap();
        assert_eq!(buffered.range(), ByteRange::new(0, size));
    }

    #[test]
    fn test_direct_rejects_odd_alignment() {
        let err = finalize(&workload(true, 3000, 1, None), facts(3000, 1 << 20)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));

        let err = finalize(&workload(true, 4096, 1, None), facts(0, 1 << 20)).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_finalized_config_keeps_workload() {
        let base = workload(false, 512, 2, None);
        let config = finalize(&base, facts(4096, 1024)).unwrap();
        assert_eq!(config.workload(), &base);
        assert_eq!(config.block_count(), 2);
        assert_eq!(config.direction(), Direction::Read);
    }
}
