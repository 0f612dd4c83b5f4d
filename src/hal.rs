//! `embedded-hal` bus implementation on top of the native connection.
//!
//! Each bus operation maps to one transfer buffer and one batched control
//! request. This adapter sits on the caller side of the result-code contract,
//! so unlike [`SpiConnection::transfer`](crate::connection::SpiConnection::transfer)
//! it classifies negative codes as [`Error::DeviceRejected`].

use embedded_hal::spi::{ErrorType, SpiBus};

use crate::buffer::TransferBuffer;
use crate::connection::SpiConnection;
use crate::device::ControlDevice;
use crate::error::{Error, Result};
use crate::mem::Memory;
use crate::mode::TransferMode;

impl<D: ControlDevice> ErrorType for SpiConnection<D> {
    type Error = Error;
}

impl<D: ControlDevice> SpiBus<u8> for SpiConnection<D> {
    fn read(&mut self, words: &mut [u8]) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let mut buffer = self.create_buffer(words.len(), TransferMode::Read)?;
        submit(self, &mut buffer)?;
        copy_received(&buffer, words)
    }

    fn write(&mut self, words: &[u8]) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let mut buffer = self.create_buffer(words.len(), TransferMode::Write)?;
        if let Some(tx) = buffer.tx() {
            tx.copy_from_slice(words, 0, 0, words.len())?;
        }
        submit(self, &mut buffer)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<()> {
        let length = read.len().max(write.len());
        if length == 0 {
            return Ok(());
        }

        // Shorter write halves are padded with zeroes, shorter read halves
        // truncate, matching the trait contract.
        let mut buffer = self.create_buffer(length, TransferMode::ReadWrite)?;
        if let Some(tx) = buffer.tx() {
            tx.copy_from_slice(write, 0, 0, write.len())?;
        }
        submit(self, &mut buffer)?;
        copy_received(&buffer, read)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let mut buffer = self.create_buffer(words.len(), TransferMode::ReadWrite)?;
        if let Some(tx) = buffer.tx() {
            tx.copy_from_slice(words, 0, 0, words.len())?;
        }
        submit(self, &mut buffer)?;
        copy_received(&buffer, words)
    }

    fn flush(&mut self) -> Result<()> {
        // Transfers are fully synchronous; nothing is ever left in flight.
        Ok(())
    }
}

fn submit<D: ControlDevice>(
    connection: &mut SpiConnection<D>,
    buffer: &mut TransferBuffer,
) -> Result<()> {
    let code = connection.transfer(buffer)?;
    if code < 0 {
        return Err(Error::DeviceRejected { code });
    }
    Ok(())
}

fn copy_received(buffer: &TransferBuffer, words: &mut [u8]) -> Result<()> {
    if let Some(rx) = buffer.rx() {
        let received = rx.snapshot()?;
        words.copy_from_slice(&received[..words.len()]);
    }
    Ok(())
}
