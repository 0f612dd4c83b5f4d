//! Bounded, non-owning views onto a memory region.

use crate::error::{Error, Region, Result};
use crate::mem::{check_extent, Memory};

/// A view onto a sub-range `[start, start + length)` of another region.
///
/// The window holds no ownership over the underlying allocation; it is purely
/// a relation between an owner and a sub-range. Every access is re-validated
/// against the window's own extent before delegating, so the narrower boundary
/// is authoritative even where the owner has room. Windows nest: a window is
/// itself a [`Memory`] and can serve as the owner of a further window.
pub struct MemoryWindow<'m> {
    owner: &'m dyn Memory,
    start: usize,
    length: usize,
    read_only: bool,
}

impl core::fmt::Debug for MemoryWindow<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryWindow")
            .field("start", &self.start)
            .field("length", &self.length)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

impl<'m> MemoryWindow<'m> {
    /// Creates a window over `owner` restricted to `[start, start + length)`.
    ///
    /// Fails with [`Error::OutOfRange`] if `length` is zero or the range does
    /// not fit inside the owner's extent. Read-only windows reject every write
    /// with [`Error::ReadOnly`] regardless of offset validity.
    pub fn new(owner: &'m dyn Memory, start: usize, length: usize, read_only: bool) -> Result<Self> {
        if length == 0 {
            return Err(Error::out_of_range(Region::Window, start, length, owner.len()));
        }
        check_extent(Region::Window, start, length, owner.len())?;

        Ok(Self { owner, start, length, read_only })
    }

    /// Offset of the window within its owner.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns `true` if writes through this window are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl Memory for MemoryWindow<'_> {
    fn len(&self) -> usize {
        self.length
    }

    fn read(&self, offset: usize) -> Result<u8> {
        check_extent(Region::Window, offset, 1, self.length)?;
        self.owner.read(self.start + offset)
    }

    fn write(&self, offset: usize, value: u8) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        check_extent(Region::Window, offset, 1, self.length)?;
        self.owner.write(self.start + offset, value)
    }

    fn region(&self) -> Region {
        Region::Window
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryWindow;
    use crate::error::{Error, Region};
    use crate::mem::{Memory, MemoryBlock};

    fn block_with_contents(contents: &[u8]) -> MemoryBlock {
        let block = MemoryBlock::new(contents.len()).unwrap();
        block.copy_from_slice(contents, 0, 0, contents.len()).unwrap();
        block
    }

    #[test]
    fn construction_rejects_ranges_outside_the_owner() {
        let block = MemoryBlock::new(10).unwrap();

        for (start, length) in [(11, 1), (0, 11), (10, 1)] {
            assert!(
                matches!(
                    MemoryWindow::new(&block, start, length, false),
                    Err(Error::OutOfRange { region: Region::Window, .. })
                ),
                "window ({start}, {length}) over a 10 byte block must be rejected"
            );
        }

        assert!(MemoryWindow::new(&block, 2, 4, false).is_ok());
    }

    #[test]
    fn construction_rejects_zero_length() {
        let block = MemoryBlock::new(10).unwrap();
        assert!(matches!(
            MemoryWindow::new(&block, 2, 0, false),
            Err(Error::OutOfRange { region: Region::Window, .. })
        ));
    }

    #[test]
    fn copy_through_a_window_lands_at_the_owner_offset() {
        let block = MemoryBlock::new(10).unwrap();
        let window = MemoryWindow::new(&block, 2, 4, false).unwrap();

        window.copy_from_slice(&[1, 2, 3, 4], 0, 0, 4).unwrap();

        assert_eq!(block.snapshot().unwrap(), vec![0, 0, 1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn copy_beyond_the_window_extent_is_rejected() {
        let block = MemoryBlock::new(10).unwrap();
        let window = MemoryWindow::new(&block, 2, 4, false).unwrap();

        // The owner has room for all of these; the window's extent is authoritative.
        for (dest_offset, count) in [(4, 1), (0, 5)] {
            let data = vec![0u8; count];
            assert!(
                matches!(
                    window.copy_from_slice(&data, 0, dest_offset, count),
                    Err(Error::OutOfRange { region: Region::Window, .. })
                ),
                "copy of {count} byte(s) at window offset {dest_offset} must be rejected"
            );
        }
        assert_eq!(block.snapshot().unwrap(), vec![0; 10]);
    }

    #[test]
    fn writes_translate_to_the_owner_and_stay_bounded() {
        for (offset, expected) in [
            (0, vec![0, 0, 1, 0, 0, 0, 0, 0, 0, 0]),
            (1, vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0]),
            (2, vec![0, 0, 0, 0, 1, 0, 0, 0, 0, 0]),
            (3, vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
        ] {
            let block = MemoryBlock::new(10).unwrap();
            let window = MemoryWindow::new(&block, 2, 4, false).unwrap();
            window.write(offset, 1).unwrap();
            assert_eq!(block.snapshot().unwrap(), expected);
        }

        let block = MemoryBlock::new(10).unwrap();
        let window = MemoryWindow::new(&block, 2, 4, false).unwrap();
        assert!(matches!(
            window.write(4, 1),
            Err(Error::OutOfRange { region: Region::Window, offset: 4, count: 1, extent: 4 })
        ));
    }

    #[test]
    fn reads_translate_to_the_owner_and_stay_bounded() {
        let block = block_with_contents(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let window = MemoryWindow::new(&block, 2, 4, true).unwrap();

        for (offset, expected) in [(0, 2), (1, 3), (2, 4), (3, 5)] {
            assert_eq!(window.read(offset).unwrap(), expected);
        }
        assert!(matches!(
            window.read(4),
            Err(Error::OutOfRange { region: Region::Window, .. })
        ));
    }

    #[test]
    fn read_only_windows_reject_every_write() {
        let block = MemoryBlock::new(10).unwrap();
        let window = MemoryWindow::new(&block, 2, 4, true).unwrap();

        assert!(matches!(window.write(0, 1), Err(Error::ReadOnly)));
        // Rejected before the bounds check as well.
        assert!(matches!(window.write(40, 1), Err(Error::ReadOnly)));
        assert!(matches!(
            window.copy_from_slice(&[1], 0, 0, 1),
            Err(Error::ReadOnly)
        ));
    }

    #[test]
    fn windows_nest_recursively() {
        let block = block_with_contents(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let outer = MemoryWindow::new(&block, 2, 6, false).unwrap();
        let inner = MemoryWindow::new(&outer, 1, 2, false).unwrap();

        assert_eq!(inner.read(0).unwrap(), 3);
        inner.write(1, 0xEE).unwrap();
        assert_eq!(block.read(4).unwrap(), 0xEE);

        // Inner extents never exceed the outer window.
        assert!(MemoryWindow::new(&outer, 5, 2, false).is_err());
    }

    #[test]
    fn windows_observe_owner_release() {
        let block = MemoryBlock::new(10).unwrap();
        let window = MemoryWindow::new(&block, 2, 4, false).unwrap();

        block.release();

        assert!(matches!(window.read(0), Err(Error::Released)));
        assert!(matches!(window.write(0, 1), Err(Error::Released)));
    }

    #[test]
    fn aliasing_windows_share_one_block() {
        let block = MemoryBlock::new(8).unwrap();
        let low = MemoryWindow::new(&block, 0, 4, false).unwrap();
        let high = MemoryWindow::new(&block, 4, 4, false).unwrap();

        low.write(0, 0x11).unwrap();
        high.write(0, 0x22).unwrap();

        assert_eq!(block.snapshot().unwrap(), vec![0x11, 0, 0, 0, 0x22, 0, 0, 0]);
    }
}
