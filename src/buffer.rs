//! Transfer buffers and ordered batches of them.

use crate::descriptor::TransferDescriptor;
use crate::error::{Error, Result};
use crate::mem::MemoryBlock;
use crate::mode::TransferMode;

/// Memory and descriptor for one SPI transfer.
///
/// Construction allocates a transmit block iff the direction writes and a
/// receive block iff it reads; when both exist they are distinct allocations.
/// The descriptor mirrors the block addresses and length exactly, with a zero
/// address standing in for a direction without a block. Every setter is a
/// synchronous write into the descriptor.
#[derive(Debug)]
pub struct TransferBuffer {
    mode: TransferMode,
    tx: Option<MemoryBlock>,
    rx: Option<MemoryBlock>,
    descriptor: TransferDescriptor,
}

impl TransferBuffer {
    /// Allocates the blocks for a transfer of `length` bytes in `mode`.
    ///
    /// Fails with [`Error::InvalidSize`] if `length` is zero or does not fit
    /// the descriptor's 32-bit length field.
    pub fn new(length: usize, mode: TransferMode) -> Result<Self> {
        let wire_length = u32::try_from(length).map_err(|_| Error::InvalidSize)?;
        if wire_length == 0 {
            return Err(Error::InvalidSize);
        }

        let tx = mode.is_write().then(|| MemoryBlock::new(length)).transpose()?;
        let rx = mode.is_read().then(|| MemoryBlock::new(length)).transpose()?;

        let descriptor = TransferDescriptor {
            tx_buf: tx.as_ref().map(MemoryBlock::address).unwrap_or(0),
            rx_buf: rx.as_ref().map(MemoryBlock::address).unwrap_or(0),
            len: wire_length,
            ..TransferDescriptor::default()
        };

        Ok(Self { mode, tx, rx, descriptor })
    }

    /// Requested transfer length in bytes.
    pub fn len(&self) -> usize {
        self.descriptor.len as usize
    }

    /// Returns `true` for a zero-length buffer; never the case once constructed.
    pub fn is_empty(&self) -> bool {
        self.descriptor.len == 0
    }

    /// Direction this buffer was allocated for.
    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    /// Transmit block, present iff the direction writes.
    pub fn tx(&self) -> Option<&MemoryBlock> {
        self.tx.as_ref()
    }

    /// Receive block, present iff the direction reads.
    pub fn rx(&self) -> Option<&MemoryBlock> {
        self.rx.as_ref()
    }

    /// Current descriptor record, by value.
    pub fn descriptor(&self) -> TransferDescriptor {
        self.descriptor
    }

    /// Sets the word size for this transfer, in bits.
    pub fn set_bits_per_word(&mut self, bits_per_word: u8) {
        self.descriptor.bits_per_word = bits_per_word;
    }

    /// Sets the delay before the next transfer, in microseconds.
    pub fn set_delay_us(&mut self, delay_us: u16) {
        self.descriptor.delay_usecs = delay_us;
    }

    /// Sets the clock speed override for this transfer, in Hz.
    pub fn set_speed_hz(&mut self, speed_hz: u32) {
        self.descriptor.speed_hz = speed_hz;
    }

    /// Selects whether chip select toggles between this transfer and the next.
    pub fn set_cs_change(&mut self, cs_change: bool) {
        self.descriptor.cs_change = cs_change as u8;
    }

    /// Releases both blocks and zeroes the descriptor addresses.
    ///
    /// Safe to call any number of times; the blocks also free on drop.
    pub fn release(&mut self) {
        if let Some(tx) = &self.tx {
            tx.release();
        }
        if let Some(rx) = &self.rx {
            rx.release();
        }
        self.descriptor.tx_buf = 0;
        self.descriptor.rx_buf = 0;
    }
}

/// An ordered sequence of transfer buffers submitted as one batch.
///
/// Insertion order is transfer order: each member's descriptor goes out on the
/// wire in the position it was pushed.
#[derive(Debug, Default)]
pub struct TransferBatch {
    buffers: Vec<TransferBuffer>,
}

impl TransferBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty batch with room for `capacity` buffers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffers: Vec::with_capacity(capacity) }
    }

    /// Number of member buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if the batch has no members.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Appends `buffer` at the end of the wire order.
    pub fn push(&mut self, buffer: TransferBuffer) {
        self.buffers.push(buffer);
    }

    /// Member at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&TransferBuffer> {
        self.buffers.get(index)
    }

    /// Member at `index`, if present, for mutation.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TransferBuffer> {
        self.buffers.get_mut(index)
    }

    /// Iterates the members in wire order.
    pub fn iter(&self) -> core::slice::Iter<'_, TransferBuffer> {
        self.buffers.iter()
    }

    /// Marshals every member's descriptor in wire order.
    pub fn descriptors(&self) -> Vec<TransferDescriptor> {
        self.buffers.iter().map(TransferBuffer::descriptor).collect()
    }
}

impl core::ops::Index<usize> for TransferBatch {
    type Output = TransferBuffer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.buffers[index]
    }
}

impl FromIterator<TransferBuffer> for TransferBatch {
    fn from_iter<I: IntoIterator<Item = TransferBuffer>>(iter: I) -> Self {
        Self { buffers: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a TransferBatch {
    type Item = &'a TransferBuffer;
    type IntoIter = core::slice::Iter<'a, TransferBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffers.iter()
    }
}
