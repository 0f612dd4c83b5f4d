//! Bus mode flags and transfer directions.

use bitflags::bitflags;

bitflags! {
    /// Independently toggleable bus-mode bits, as the device defines them.
    ///
    /// The four canonical clock phase/polarity combinations are provided as
    /// [`MODE_0`](SpiMode::MODE_0) through [`MODE_3`](SpiMode::MODE_3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpiMode: u8 {
        /// Clock phase; if set CPHA=1, otherwise CPHA=0.
        const CLOCK_PHASE = 0x01;
        /// Clock polarity; if set CPOL=1, otherwise CPOL=0.
        const CLOCK_POLARITY = 0x02;
        /// Chip select is an active-high signal.
        const CHIP_SELECT_HIGH = 0x04;
        /// The least significant bit comes first.
        const LSB_FIRST = 0x08;
        /// Special 3-wire configuration with a shared in/out line.
        const THREE_WIRE = 0x10;
        /// Loopback.
        const LOOPBACK = 0x20;
        /// Send no chip select signal.
        const NO_CHIP_SELECT = 0x40;
        /// Slave pulls low to pause.
        const READY = 0x80;
    }
}

impl SpiMode {
    /// CPOL=0, CPHA=0.
    pub const MODE_0: SpiMode = SpiMode::empty();
    /// CPOL=0, CPHA=1.
    pub const MODE_1: SpiMode = SpiMode::CLOCK_PHASE;
    /// CPOL=1, CPHA=0.
    pub const MODE_2: SpiMode = SpiMode::CLOCK_POLARITY;
    /// CPOL=1, CPHA=1.
    pub const MODE_3: SpiMode = SpiMode::CLOCK_POLARITY.union(SpiMode::CLOCK_PHASE);
}

/// Selects whether a transfer writes data, reads data, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Write data to the chip.
    Write,
    /// Read data from the chip.
    Read,
    /// Write and read data simultaneously.
    ReadWrite,
}

impl TransferMode {
    /// Returns `true` if the transfer carries data towards the chip.
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    /// Returns `true` if the transfer carries data from the chip.
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }
}
