//! Control-device abstraction the connection drives.

#[cfg(unix)]
pub mod spidev;

#[cfg(unix)]
pub use spidev::SpidevDevice;

use crate::descriptor::TransferDescriptor;
use crate::error::Result;

/// Abstraction over the ioctl-style control surface of a bus device.
///
/// Each operation issues a single synchronous control request and returns the
/// device's raw result code, unmodified. Classifying that code is the
/// caller's responsibility; implementations never retry.
pub trait ControlDevice {
    /// Issues `request` exchanging a single byte with the device.
    fn control_u8(&mut self, request: u32, data: &mut u8) -> Result<i32>;

    /// Issues `request` exchanging a 32-bit word with the device.
    fn control_u32(&mut self, request: u32, data: &mut u32) -> Result<i32>;

    /// Issues `request` carrying a batch of transfer descriptors.
    ///
    /// The device consumes the transmit buffers and fills the receive buffers
    /// the descriptors point at; the records themselves travel in `descriptors`
    /// order as one payload.
    fn submit(&mut self, request: u32, descriptors: &mut [TransferDescriptor]) -> Result<i32>;
}
