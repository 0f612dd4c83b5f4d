//! Error handling primitives for the spidev-io crate.

/// Crate-wide result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Identifies the boundary an out-of-range access violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The fixed extent of a [`MemoryBlock`](crate::mem::MemoryBlock).
    Block,
    /// The declared extent of a [`MemoryWindow`](crate::mem::MemoryWindow).
    Window,
    /// The caller-provided source slice of a bulk copy.
    Source,
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Block => f.write_str("memory block"),
            Self::Window => f.write_str("memory window"),
            Self::Source => f.write_str("source slice"),
        }
    }
}

/// Error variants produced by the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested allocation or buffer length is zero or unrepresentable.
    #[error("requested size must be at least one byte")]
    InvalidSize,
    /// An access fell outside the authoritative boundary of its region.
    #[error("access of {count} byte(s) at offset {offset} exceeds the {region} extent of {extent} byte(s)")]
    OutOfRange {
        /// Which boundary was violated.
        region: Region,
        /// Offset of the rejected access, relative to the region start.
        offset: usize,
        /// Number of bytes the access covered.
        count: usize,
        /// Extent of the region the access was checked against.
        extent: usize,
    },
    /// A write was attempted through a read-only window.
    #[error("window is read-only")]
    ReadOnly,
    /// The underlying memory block was already released.
    #[error("memory block has been released")]
    Released,
    /// The control device rejected a configuration request.
    #[error("control device rejected the request with code {code}")]
    DeviceRejected {
        /// Raw result code reported by the device.
        code: i32,
    },
    /// Failure to open or address the underlying device node.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn out_of_range(region: Region, offset: usize, count: usize, extent: usize) -> Self {
        Self::OutOfRange { region, offset, count, extent }
    }
}

impl embedded_hal::spi::Error for Error {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}
