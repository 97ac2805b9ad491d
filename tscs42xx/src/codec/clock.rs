//! PLL reference clock source and the external clock provider seam.

/// Where the PLLs take their reference clock from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceClockSource {
    /// A crystal (or MCLK1) on the XTAL pins.
    Crystal,
    /// An external oscillator driving MCLK2, controlled through a
    /// [`ReferenceClock`] provider.
    ExternalOscillator,
}

/// Failure reported by a [`ReferenceClock`] provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockError;

/// An external clock provider feeding the codec's MCLK2 pin.
pub trait ReferenceClock {
    /// Request an output frequency in Hz.
    fn set_rate(&mut self, hz: u32) -> Result<(), ClockError>;

    /// Start the clock.
    fn enable(&mut self) -> Result<(), ClockError>;

    /// Stop the clock.
    fn disable(&mut self);
}

/// Placeholder provider for boards clocked from a crystal.
///
/// Every request fails, so selecting
/// [`ReferenceClockSource::ExternalOscillator`] without a real provider is
/// reported as [`Error::Clock`](crate::Error::Clock).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExternalClock;

impl ReferenceClock for NoExternalClock {
    fn set_rate(&mut self, _hz: u32) -> Result<(), ClockError> {
        Err(ClockError)
    }

    fn enable(&mut self) -> Result<(), ClockError> {
        Err(ClockError)
    }

    fn disable(&mut self) {}
}
