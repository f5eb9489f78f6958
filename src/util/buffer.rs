//! Block buffer management
//!
//! A run reuses one block-sized buffer for every operation. For direct IO the
//! kernel requires the buffer address to be a multiple of the filesystem
//! alignment, so the buffer is allocated with an explicit `Layout` instead of
//! a `Vec<u8>`. The memory is released when the buffer is dropped, which
//! covers every way a run can end.

use crate::distribution::RunRng;
use crate::error::{LoadError, LoadResult};
use rand::Rng;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// Owned, fixed-length byte region, optionally aligned for O_DIRECT
pub struct IoBuffer {
    ptr: NonNull<u8>,
    size: usize,
    alignment: usize,
    layout: Layout,
}

impl IoBuffer {
    /// Allocate a zeroed buffer of exactly `size` bytes
    ///
    /// # Arguments
    /// * `size` - Size of the buffer in bytes
    /// * `alignment` - Required address alignment (direct IO), or `None` for
    ///   an ordinary allocation
    ///
    /// # Errors
    /// `Allocation` if `size` is zero, the alignment is not a power of two,
    /// or the allocator returns nothing. Allocation failure is never retried.
    pub fn allocate(size: usize, alignment: Option<usize>) -> LoadResult<Self> {
        let alignment = alignment.unwrap_or(std::mem::align_of::<u8>());
        let failed = || LoadError::Allocation { size, alignment };

        if size == 0 {
            return Err(failed());
        }
        let layout = Layout::from_size_align(size, alignment).map_err(|_| failed())?;

        // SAFETY: layout has a non-zero size
        let ptr = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr).ok_or_else(failed)?;

        Ok(IoBuffer {
            ptr,
            size,
            alignment,
            layout,
        })
    }

    /// Get the buffer as a slice
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr owns `size` initialized bytes for the life of self
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    /// Get the buffer as a mutable slice
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and &mut self guarantees exclusive access
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }

    /// Get the size of the buffer in bytes
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the alignment the buffer was allocated with
    #[inline(always)]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Verify that the buffer address honours its alignment
    #[inline(always)]
    pub fn is_aligned(&self) -> bool {
        (self.ptr.as_ptr() as usize) % self.alignment == 0
    }

    /// Overwrite every byte with a fresh pseudo-random value in `1..=255`
    ///
    /// Draws exactly one value from `rng` per byte, so the payload of a run is
    /// fully determined by its seed.
    pub fn fill_nonzero(&mut self, rng: &mut RunRng) {
        for byte in self.as_mut_slice() {
            *byte = rng.gen_range(1..=255u8);
        }
    }
}

impl Drop for IoBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout
        unsafe {
            dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

// IoBuffer is Send because it exclusively owns its memory
unsafe impl Send for IoBuffer {}

impl std::fmt::Debug for IoBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoBuffer")
            .field("size", &self.size)
            .field("alignment", &self.alignment)
            .finish()
    }
}
