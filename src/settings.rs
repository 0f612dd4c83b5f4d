//! Connection-wide settings requested at configuration time.

use crate::mode::SpiMode;

/// User-facing settings for a native SPI connection.
///
/// These are the values *requested* from the control device; the connection
/// stores whatever the device reports back as authoritative (see
/// [`SpiConnection::with_settings`](crate::connection::SpiConnection::with_settings)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiSettings {
    /// Word size in bits.
    pub bits_per_word: u8,
    /// Delay between a transfer and the deselect of the chip, in microseconds.
    pub delay_us: u16,
    /// Maximum clock speed in Hz.
    pub max_speed_hz: u32,
    /// Bus mode flags.
    pub mode: SpiMode,
}

impl SpiSettings {
    /// Begins building a [`SpiSettings`] using the builder pattern.
    pub fn new() -> SpiSettingsBuilder {
        SpiSettingsBuilder::new()
    }
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            bits_per_word: 8,
            delay_us: 0,
            max_speed_hz: 500_000,
            mode: SpiMode::MODE_0,
        }
    }
}

/// Builder for [`SpiSettings`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct SpiSettingsBuilder {
    settings: SpiSettings,
}

impl SpiSettingsBuilder {
    /// Creates a new builder seeded with [`SpiSettings::default()`].
    pub fn new() -> Self {
        Self { settings: SpiSettings::default() }
    }

    /// Overrides the word size.
    pub fn bits_per_word(mut self, bits_per_word: u8) -> Self {
        self.settings.bits_per_word = bits_per_word;
        self
    }

    /// Overrides the inter-transfer delay.
    pub fn delay_us(mut self, delay_us: u16) -> Self {
        self.settings.delay_us = delay_us;
        self
    }

    /// Overrides the maximum clock speed.
    pub fn max_speed_hz(mut self, max_speed_hz: u32) -> Self {
        self.settings.max_speed_hz = max_speed_hz;
        self
    }

    /// Overrides the bus mode flags.
    pub fn mode(mut self, mode: SpiMode) -> Self {
        self.settings.mode = mode;
        self
    }

    /// Finalizes the builder and returns the [`SpiSettings`].
    pub fn build(self) -> SpiSettings {
        self.settings
    }
}

impl Default for SpiSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
