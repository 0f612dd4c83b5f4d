//! Bounds-checked access to the raw memory regions backing SPI transfers.
//!
//! [`MemoryBlock`] owns a fixed-size allocation and is the only type that ever
//! frees it. [`MemoryWindow`] is a non-owning view restricted to a sub-range of
//! any [`Memory`] implementor, re-validating every access against its own
//! narrower extent. Several windows may alias one block, which is what lets
//! unrelated logical registers share a single physical page without being able
//! to touch a neighbour's bytes.

mod block;
mod window;

pub use block::MemoryBlock;
pub use window::MemoryWindow;

use crate::error::{Error, Region, Result};

/// Byte-level access surface shared by memory blocks and windows.
///
/// Writes take `&self`: owners use interior mutability so that multiple windows
/// over the same allocation can coexist. None of these operations suspend or
/// lock; exclusive access per owner is the caller's contract.
pub trait Memory {
    /// Extent of the region in bytes.
    fn len(&self) -> usize;

    /// Returns `true` if the region has a zero extent.
    ///
    /// Regions constructed through this crate always have at least one byte.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the byte at `offset`.
    fn read(&self, offset: usize) -> Result<u8>;

    /// Writes `value` at `offset`.
    fn write(&self, offset: usize, value: u8) -> Result<()>;

    /// Bulk-copies `count` bytes of `src` (starting at `src_offset`) into the
    /// region starting at `dest_offset`.
    ///
    /// Both the source slice and the destination extent are checked before any
    /// byte is written, so a rejected copy leaves the region untouched.
    fn copy_from_slice(
        &self,
        src: &[u8],
        src_offset: usize,
        dest_offset: usize,
        count: usize,
    ) -> Result<()> {
        let src_end = src_offset
            .checked_add(count)
            .ok_or_else(|| Error::out_of_range(Region::Source, src_offset, count, src.len()))?;
        if src_end > src.len() {
            return Err(Error::out_of_range(Region::Source, src_offset, count, src.len()));
        }
        check_extent(self.region(), dest_offset, count, self.len())?;

        for index in 0..count {
            self.write(dest_offset + index, src[src_offset + index])?;
        }
        Ok(())
    }

    /// Returns a full copy of the current contents.
    ///
    /// Intended for verification; not on any transfer hot path.
    fn snapshot(&self) -> Result<Vec<u8>> {
        let mut contents = Vec::with_capacity(self.len());
        for offset in 0..self.len() {
            contents.push(self.read(offset)?);
        }
        Ok(contents)
    }

    /// Boundary name used in range errors reported by this region.
    fn region(&self) -> Region;
}

/// Validates that `offset..offset + count` stays within `extent`.
pub(crate) fn check_extent(
    region: Region,
    offset: usize,
    count: usize,
    extent: usize,
) -> Result<()> {
    let end = offset
        .checked_add(count)
        .ok_or_else(|| Error::out_of_range(region, offset, count, extent))?;
    if end > extent {
        return Err(Error::out_of_range(region, offset, count, extent));
    }
    Ok(())
}
