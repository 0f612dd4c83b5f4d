//! Native SPI connection driving a control device.

use log::{debug, trace};

use crate::buffer::{TransferBatch, TransferBuffer};
use crate::device::ControlDevice;
use crate::error::{Error, Result};
use crate::ioctl;
use crate::mode::{SpiMode, TransferMode};
use crate::settings::SpiSettings;

/// Writes `requested` to `write_request`, then reads the value back through
/// `read_request` and returns what the device reports.
///
/// The read-back guards against silent clamping: the device's answer, not the
/// requested value, is authoritative. A negative result code at either step
/// fails with [`Error::DeviceRejected`] carrying the raw code.
pub fn negotiate_u8<D: ControlDevice>(
    device: &mut D,
    write_request: u32,
    read_request: u32,
    requested: u8,
) -> Result<u8> {
    let mut value = requested;
    accept(write_request, device.control_u8(write_request, &mut value)?)?;
    accept(read_request, device.control_u8(read_request, &mut value)?)?;
    Ok(value)
}

/// 32-bit variant of [`negotiate_u8`].
pub fn negotiate_u32<D: ControlDevice>(
    device: &mut D,
    write_request: u32,
    read_request: u32,
    requested: u32,
) -> Result<u32> {
    let mut value = requested;
    accept(write_request, device.control_u32(write_request, &mut value)?)?;
    accept(read_request, device.control_u32(read_request, &mut value)?)?;
    Ok(value)
}

fn fetch_u8<D: ControlDevice>(device: &mut D, read_request: u32) -> Result<u8> {
    let mut value = 0;
    accept(read_request, device.control_u8(read_request, &mut value)?)?;
    Ok(value)
}

fn fetch_u32<D: ControlDevice>(device: &mut D, read_request: u32) -> Result<u32> {
    let mut value = 0;
    accept(read_request, device.control_u32(read_request, &mut value)?)?;
    Ok(value)
}

fn accept(request: u32, code: i32) -> Result<()> {
    if code < 0 {
        debug!("control request {request:#010x} rejected with code {code}");
        return Err(Error::DeviceRejected { code });
    }
    Ok(())
}

/// A configured connection to one SPI slave behind a control device.
///
/// Construction configures the device and is the only state transition the
/// connection ever makes; afterwards it submits caller-supplied transfer
/// buffers, one control request per [`transfer`](SpiConnection::transfer) or
/// [`transfer_batch`](SpiConnection::transfer_batch) invocation, and never
/// allocates transfer memory of its own.
#[derive(Debug)]
pub struct SpiConnection<D> {
    device: D,
    mode: SpiMode,
    bits_per_word: u8,
    max_speed_hz: u32,
    delay_us: u16,
}

impl<D: ControlDevice> SpiConnection<D> {
    /// Configures `device` with `settings` and returns the connection.
    ///
    /// Each of mode, word size, and clock speed is negotiated through a
    /// write-then-read-back request pair; the values the device reports back
    /// are stored as the connection's authoritative settings. The delay is
    /// connection-local and applied per transfer.
    pub fn with_settings(mut device: D, settings: SpiSettings) -> Result<Self> {
        let mode = negotiate_u8(
            &mut device,
            ioctl::write_mode(),
            ioctl::read_mode(),
            settings.mode.bits(),
        )?;
        let bits_per_word = negotiate_u8(
            &mut device,
            ioctl::write_bits_per_word(),
            ioctl::read_bits_per_word(),
            settings.bits_per_word,
        )?;
        let max_speed_hz = negotiate_u32(
            &mut device,
            ioctl::write_max_speed(),
            ioctl::read_max_speed(),
            settings.max_speed_hz,
        )?;

        debug!(
            "spi connection configured: mode {mode:#04x}, {bits_per_word} bits/word, {max_speed_hz} Hz"
        );

        Ok(Self {
            device,
            mode: SpiMode::from_bits_retain(mode),
            bits_per_word,
            max_speed_hz,
            delay_us: settings.delay_us,
        })
    }

    /// Returns a connection using the device-reported defaults.
    ///
    /// Issues one read request per setting and writes nothing.
    pub fn new(mut device: D) -> Result<Self> {
        let mode = fetch_u8(&mut device, ioctl::read_mode())?;
        let bits_per_word = fetch_u8(&mut device, ioctl::read_bits_per_word())?;
        let max_speed_hz = fetch_u32(&mut device, ioctl::read_max_speed())?;

        Ok(Self {
            device,
            mode: SpiMode::from_bits_retain(mode),
            bits_per_word,
            max_speed_hz,
            delay_us: 0,
        })
    }

    /// Bus mode flags the device accepted.
    pub fn mode(&self) -> SpiMode {
        self.mode
    }

    /// Word size the device accepted, in bits.
    pub fn bits_per_word(&self) -> u8 {
        self.bits_per_word
    }

    /// Clock speed the device accepted, in Hz.
    pub fn max_speed_hz(&self) -> u32 {
        self.max_speed_hz
    }

    /// Delay between a transfer and the deselect of the chip, in microseconds.
    pub fn delay_us(&self) -> u16 {
        self.delay_us
    }

    /// Provides mutable access to the wrapped control device.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consumes the connection and returns the owned control device.
    pub fn release(self) -> D {
        self.device
    }

    /// Allocates a transfer buffer pre-seeded with the connection's word size,
    /// delay, and clock speed.
    pub fn create_buffer(&self, length: usize, mode: TransferMode) -> Result<TransferBuffer> {
        let mut buffer = TransferBuffer::new(length, mode)?;
        buffer.set_bits_per_word(self.bits_per_word);
        buffer.set_delay_us(self.delay_us);
        buffer.set_speed_hz(self.max_speed_hz);
        Ok(buffer)
    }

    /// Submits `buffer` as a one-element batch in a single control request.
    ///
    /// Returns the device's raw result code unmodified; classifying it,
    /// including negative, device-rejected codes, is the caller's concern.
    /// The connection stays usable after a failed transfer.
    pub fn transfer(&mut self, buffer: &mut TransferBuffer) -> Result<i32> {
        let request = ioctl::message_request(1)?;
        let mut descriptors = [buffer.descriptor()];
        let code = self.device.submit(request, &mut descriptors)?;
        trace!("submitted 1 transfer of {} byte(s), code {code}", buffer.len());
        Ok(code)
    }

    /// Submits every member of `batch`, in order, in a single control request.
    ///
    /// Fails with [`Error::InvalidSize`] before touching the device if the
    /// batch is empty or too large for one request. Partial completion of a
    /// subset of descriptors is a kernel-level concern and is not inferred
    /// here; the raw result code is returned as-is.
    pub fn transfer_batch(&mut self, batch: &mut TransferBatch) -> Result<i32> {
        let request = ioctl::message_request(batch.len())?;
        let mut descriptors = batch.descriptors();
        let code = self.device.submit(request, &mut descriptors)?;
        trace!("submitted batch of {} transfer(s), code {code}", batch.len());
        Ok(code)
    }
}
