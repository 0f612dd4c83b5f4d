//! Safety-checked transfer buffers and native SPI transfers over Linux spidev
//! control devices.
//!
//! The crate has two tightly coupled halves. The [`mem`] module owns raw
//! memory blocks with bounds-checked access and bounded window views onto
//! them; the [`connection`] module assembles kernel transfer descriptors from
//! caller-supplied [`TransferBuffer`]s and submits them to a
//! [`ControlDevice`] as one batched control request per transfer call.
//!
//! ```no_run
//! use spidev_io::{Memory, SpiConnection, SpiSettings, SpidevDevice, SpiMode, TransferMode};
//!
//! # fn main() -> spidev_io::Result<()> {
//! let device = SpidevDevice::open_bus(0, 0)?;
//! let settings = SpiSettings::new()
//!     .max_speed_hz(1_000_000)
//!     .mode(SpiMode::MODE_0)
//!     .build();
//! let mut connection = SpiConnection::with_settings(device, settings)?;
//!
//! let mut buffer = connection.create_buffer(3, TransferMode::ReadWrite)?;
//! buffer.tx().unwrap().copy_from_slice(&[0x9F, 0x00, 0x00], 0, 0, 3)?;
//! let code = connection.transfer(&mut buffer)?;
//! assert!(code >= 0, "transfer rejected by the device");
//! let id = buffer.rx().unwrap().snapshot()?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

mod error;

pub mod buffer;
pub mod connection;
pub mod descriptor;
pub mod device;
mod hal;
pub mod ioctl;
pub mod mem;
pub mod mode;
pub mod settings;

pub use crate::buffer::{TransferBatch, TransferBuffer};
pub use crate::connection::SpiConnection;
pub use crate::descriptor::TransferDescriptor;
pub use crate::device::ControlDevice;
#[cfg(unix)]
pub use crate::device::SpidevDevice;
pub use crate::error::{Error, Region, Result};
pub use crate::mem::{Memory, MemoryBlock, MemoryWindow};
pub use crate::mode::{SpiMode, TransferMode};
pub use crate::settings::{SpiSettings, SpiSettingsBuilder};
