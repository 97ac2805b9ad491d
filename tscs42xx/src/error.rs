//! Driver error type.

use core::fmt;

/// Errors returned by the TSCS42xx driver.
///
/// `E` is the error type of the underlying [`RegisterMap`](crate::codec::RegisterMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A register read or write failed on the bus.
    Bus(E),
    /// A register write inside a PLL input profile failed. Settings before
    /// `addr` have already been applied; nothing is rolled back.
    PllSetting {
        /// Register whose write failed.
        addr: u8,
        /// The bus error.
        source: E,
    },
    /// The sample rate is not in the rate table or maps to no PLL family.
    UnsupportedRate(u32),
    /// The sample width (in bits) is not one of 16, 20, 24 or 32.
    UnsupportedFormat(u8),
    /// No PLL input profile exists for this reference frequency.
    UnsupportedFrequency(u32),
    /// The BCLK/LRCLK ratio is not one of 32, 40 or 64.
    UnsupportedBclkRatio(u32),
    /// The codec only operates as the bit/frame clock master.
    UnsupportedDaiRole,
    /// A stream was unmuted before any sample rate was programmed.
    NoSampleRate,
    /// The rate needs the other PLL family while an unmuted stream holds
    /// the current one.
    RateConflict(u32),
    /// The PLLs did not report lock within the configured number of polls.
    /// The PLL enable bit is left set.
    PllLockTimeout,
    /// The coefficient RAM stayed busy for the configured number of polls.
    RamBusy,
    /// A coefficient transfer would run past the end of the RAM.
    OutOfRange {
        /// First requested address.
        start: usize,
        /// Number of requested words.
        count: usize,
    },
    /// A startup image or coefficient buffer has a length that is not a
    /// whole number of records.
    MalformedImage,
    /// The device ID registers did not identify a TSCS42xx part.
    InvalidPart(u16),
    /// The external reference clock provider reported a failure.
    Clock,
    /// The PLL user count would have gone negative.
    InvariantViolation,
}

impl<E> Error<E> {
    /// Returns the bus error, if this error came from a register access.
    pub fn bus_error(&self) -> Option<&E> {
        match self {
            Error::Bus(e) | Error::PllSetting { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "register access failed: {:?}", e),
            Error::PllSetting { addr, source } => {
                write!(f, "PLL setting write to {:#04x} failed: {:?}", addr, source)
            }
            Error::UnsupportedRate(rate) => write!(f, "unsupported sample rate {} Hz", rate),
            Error::UnsupportedFormat(bits) => write!(f, "unsupported sample width {} bits", bits),
            Error::UnsupportedFrequency(hz) => {
                write!(f, "no PLL input profile for {} Hz", hz)
            }
            Error::UnsupportedBclkRatio(ratio) => write!(f, "unsupported BCLK ratio {}", ratio),
            Error::UnsupportedDaiRole => f.write_str("codec must be the DAI clock master"),
            Error::NoSampleRate => f.write_str("no sample rate has been programmed"),
            Error::RateConflict(rate) => {
                write!(f, "{} Hz needs the other PLL while a stream is running", rate)
            }
            Error::PllLockTimeout => f.write_str("PLL failed to lock"),
            Error::RamBusy => f.write_str("coefficient RAM stayed busy"),
            Error::OutOfRange { start, count } => write!(
                f,
                "coefficient range {}+{} exceeds the RAM",
                start, count
            ),
            Error::MalformedImage => f.write_str("image or buffer is not a whole number of records"),
            Error::InvalidPart(id) => write!(f, "{:#06x} is not a valid part", id),
            Error::Clock => f.write_str("reference clock provider failed"),
            Error::InvariantViolation => f.write_str("PLL user count underflow"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
