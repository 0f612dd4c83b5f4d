//! Control device backed by a Linux spidev character device node.

use std::ffi::c_void;
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use log::debug;

use crate::descriptor::TransferDescriptor;
use crate::device::ControlDevice;
use crate::error::Result;

/// An opened `/dev/spidevB.C` bus controller node.
///
/// The handle is not safe for concurrent use from multiple threads; exclusive
/// access for the duration of a configuration or transfer call is the caller's
/// contract. The file descriptor closes on drop.
#[derive(Debug)]
pub struct SpidevDevice {
    file: File,
}

impl SpidevDevice {
    /// Opens the device node at `path` for reading and writing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
        debug!("opened spidev node {}", path.as_ref().display());
        Ok(Self { file })
    }

    /// Opens the node for `bus` and `chip_select`, e.g. `/dev/spidev0.1`.
    pub fn open_bus(bus: u32, chip_select: u32) -> Result<Self> {
        Self::open(format!("/dev/spidev{bus}.{chip_select}"))
    }

    fn ioctl(&mut self, request: u32, data: *mut c_void) -> i32 {
        // SAFETY: `data` points at memory that stays valid and exclusively
        // borrowed for the duration of this blocking call.
        unsafe { libc::ioctl(self.file.as_raw_fd(), request as libc::c_ulong, data) }
    }
}

impl ControlDevice for SpidevDevice {
    fn control_u8(&mut self, request: u32, data: &mut u8) -> Result<i32> {
        Ok(self.ioctl(request, (data as *mut u8).cast()))
    }

    fn control_u32(&mut self, request: u32, data: &mut u32) -> Result<i32> {
        Ok(self.ioctl(request, (data as *mut u32).cast()))
    }

    fn submit(&mut self, request: u32, descriptors: &mut [TransferDescriptor]) -> Result<i32> {
        Ok(self.ioctl(request, descriptors.as_mut_ptr().cast()))
    }
}
