//! The fixed-layout transfer record exchanged with the kernel driver.

/// One SPI transfer as the kernel consumes it.
///
/// Field order, widths, and the trailing pad reproduce the driver's wire layout
/// exactly (32 bytes): transmit address, receive address, length, per-transfer
/// clock override, inter-transfer delay, word size, chip-select-change flag.
/// A direction without an allocated buffer carries a zero address.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferDescriptor {
    pub(crate) tx_buf: u64,
    pub(crate) rx_buf: u64,
    pub(crate) len: u32,
    pub(crate) speed_hz: u32,
    pub(crate) delay_usecs: u16,
    pub(crate) bits_per_word: u8,
    pub(crate) cs_change: u8,
    pub(crate) pad: u32,
}

impl TransferDescriptor {
    /// Address of the transmit buffer, 0 if the transfer does not write.
    pub fn tx_buf(&self) -> u64 {
        self.tx_buf
    }

    /// Address of the receive buffer, 0 if the transfer does not read.
    pub fn rx_buf(&self) -> u64 {
        self.rx_buf
    }

    /// Transfer length in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` for a zero-length record.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-transfer clock speed override in Hz, 0 to use the device default.
    pub fn speed_hz(&self) -> u32 {
        self.speed_hz
    }

    /// Delay after this transfer before the next one starts, in microseconds.
    pub fn delay_us(&self) -> u16 {
        self.delay_usecs
    }

    /// Word size in bits, 0 to use the device default.
    pub fn bits_per_word(&self) -> u8 {
        self.bits_per_word
    }

    /// Whether chip select toggles between this transfer and the next.
    pub fn cs_change(&self) -> bool {
        self.cs_change != 0
    }
}
