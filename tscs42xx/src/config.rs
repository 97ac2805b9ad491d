//! Driver configuration and startup images.

use crate::codec::ReferenceClockSource;
use crate::constants;

/// Board-level settings for one codec instance.
///
/// ```ignore
/// let config = Config::crystal(12_288_000).with_pll_lock(20, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// PLL reference frequency in Hz. Must match a PLL input profile.
    pub reference_frequency: u32,
    /// Pin the reference arrives on.
    pub reference_source: ReferenceClockSource,
    /// PLL lock-status polls before [`Error::PllLockTimeout`](crate::Error::PllLockTimeout).
    pub pll_lock_attempts: u32,
    /// Delay between lock-status polls, in microseconds.
    pub pll_lock_interval_us: u32,
    /// Coefficient RAM busy polls before [`Error::RamBusy`](crate::Error::RamBusy).
    pub ram_busy_attempts: u32,
    /// Delay between busy polls, in microseconds.
    pub ram_busy_interval_us: u32,
    /// Rate used to run the PLL for coefficient access when no stream
    /// holds it.
    pub fallback_rate: u32,
}

impl Config {
    /// Reference from a crystal on the XTAL/MCLK1 pins.
    pub const fn crystal(reference_frequency: u32) -> Self {
        Self::new(reference_frequency, ReferenceClockSource::Crystal)
    }

    /// Reference from an external oscillator on MCLK2.
    pub const fn external(reference_frequency: u32) -> Self {
        Self::new(reference_frequency, ReferenceClockSource::ExternalOscillator)
    }

    const fn new(reference_frequency: u32, reference_source: ReferenceClockSource) -> Self {
        Self {
            reference_frequency,
            reference_source,
            pll_lock_attempts: constants::PLL_LOCK_ATTEMPTS,
            pll_lock_interval_us: constants::PLL_LOCK_INTERVAL_US,
            ram_busy_attempts: constants::RAM_BUSY_ATTEMPTS,
            ram_busy_interval_us: constants::RAM_BUSY_INTERVAL_US,
            fallback_rate: constants::FALLBACK_SAMPLE_RATE,
        }
    }

    /// Set the PLL lock poll bounds.
    pub const fn with_pll_lock(mut self, attempts: u32, interval_us: u32) -> Self {
        self.pll_lock_attempts = attempts;
        self.pll_lock_interval_us = interval_us;
        self
    }

    /// Set the coefficient RAM busy poll bounds.
    pub const fn with_ram_busy(mut self, attempts: u32, interval_us: u32) -> Self {
        self.ram_busy_attempts = attempts;
        self.ram_busy_interval_us = interval_us;
        self
    }

    /// Set the rate used for coefficient access while no stream is active.
    pub const fn with_fallback_rate(mut self, rate: u32) -> Self {
        self.fallback_rate = rate;
        self
    }
}

/// Startup images loaded by [`Tscs42xx::init`](crate::Tscs42xx::init).
///
/// The coefficient image is a sequence of big-endian 3-byte words written
/// from coefficient address 0. The control image is a sequence of
/// `(register, value)` byte pairs. Either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirmwareImages<'a> {
    /// DSP coefficient image.
    pub coefficients: Option<&'a [u8]>,
    /// Register control image.
    pub controls: Option<&'a [u8]>,
}

impl<'a> FirmwareImages<'a> {
    /// No images.
    pub const fn none() -> Self {
        Self {
            coefficients: None,
            controls: None,
        }
    }

    /// Both images.
    pub const fn new(coefficients: &'a [u8], controls: &'a [u8]) -> Self {
        Self {
            coefficients: Some(coefficients),
            controls: Some(controls),
        }
    }
}
