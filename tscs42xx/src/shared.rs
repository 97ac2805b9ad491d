//! A [`Tscs42xx`] behind a spin lock, for drivers reached from several
//! contexts (stream callbacks, control handlers, power management).
//!
//! Each method holds the lock for the whole operation, including its
//! bounded polls. Use [`lock`](SharedTscs42xx::lock) to run several
//! operations, or a [`CoeffRamSession`](crate::codec::CoeffRamSession),
//! under one acquisition.

use embedded_hal::delay::DelayNs;
use spin::{Mutex, MutexGuard};

use crate::codec::{Biquad, BiquadCoefficients, NoExternalClock, ReferenceClock, RegisterMap};
use crate::codec::Tscs42xx;
use crate::config::FirmwareImages;
use crate::control::StreamDirection;
use crate::error::Error;

/// Shared codec handle.
pub struct SharedTscs42xx<R, D, C = NoExternalClock> {
    inner: Mutex<Tscs42xx<R, D, C>>,
}

impl<R, D, C> SharedTscs42xx<R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    /// Wrap a driver.
    pub const fn new(codec: Tscs42xx<R, D, C>) -> Self {
        Self {
            inner: Mutex::new(codec),
        }
    }

    /// Take the lock for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, Tscs42xx<R, D, C>> {
        self.inner.lock()
    }

    /// Unwrap the driver.
    pub fn into_inner(self) -> Tscs42xx<R, D, C> {
        self.inner.into_inner()
    }

    /// [`Tscs42xx::init`] under the lock.
    pub fn init(&self, images: FirmwareImages<'_>) -> Result<(), Error<R::Error>> {
        self.lock().init(images)
    }

    /// Program width and rate together.
    pub fn set_stream_params(&self, bits: u8, rate: u32) -> Result<(), Error<R::Error>> {
        self.lock().set_stream_params(bits, rate)
    }

    /// Program the sample width.
    pub fn set_stream_format(&self, bits: u8) -> Result<(), Error<R::Error>> {
        self.lock().set_stream_format(bits)
    }

    /// Program the sample rate.
    pub fn set_stream_rate(&self, rate: u32) -> Result<(), Error<R::Error>> {
        self.lock().set_stream_rate(rate)
    }

    /// Mute a stream and release its PLL claim.
    pub fn mute(&self, direction: StreamDirection) -> Result<(), Error<R::Error>> {
        self.lock().mute(direction)
    }

    /// Power the PLL and unmute a stream.
    pub fn unmute(&self, direction: StreamDirection) -> Result<(), Error<R::Error>> {
        self.lock().unmute(direction)
    }

    /// Read big-endian coefficient words starting at `start`.
    pub fn read_coefficients(&self, start: u8, buf: &mut [u8]) -> Result<(), Error<R::Error>> {
        self.lock().read_coefficients(start, buf)
    }

    /// Write big-endian coefficient words starting at `start`.
    pub fn write_coefficients(&self, start: u8, bytes: &[u8]) -> Result<(), Error<R::Error>> {
        self.lock().write_coefficients(start, bytes)
    }

    /// Read one coefficient word.
    pub fn read_coefficient(&self, addr: u8) -> Result<u32, Error<R::Error>> {
        self.lock().read_coefficient(addr)
    }

    /// Write one coefficient word.
    pub fn write_coefficient(&self, addr: u8, word: u32) -> Result<(), Error<R::Error>> {
        self.lock().write_coefficient(addr, word)
    }

    /// Read all five coefficients of a biquad.
    pub fn read_biquad(&self, biquad: Biquad) -> Result<BiquadCoefficients, Error<R::Error>> {
        self.lock().read_biquad(biquad)
    }

    /// Write all five coefficients of a biquad.
    pub fn write_biquad(
        &self,
        biquad: Biquad,
        coefficients: BiquadCoefficients,
    ) -> Result<(), Error<R::Error>> {
        self.lock().write_biquad(biquad, coefficients)
    }

    /// Stop the external reference clock.
    pub fn suspend(&self) {
        self.lock().suspend()
    }

    /// Restart the external reference clock and reset the part.
    pub fn resume(&self) -> Result<(), Error<R::Error>> {
        self.lock().resume()
    }

    /// Number of outstanding PLL claims.
    pub fn pll_users(&self) -> u32 {
        self.lock().pll_users()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mock::{MockDelay, MockRegs};
    use crate::Config;

    fn shared() -> SharedTscs42xx<MockRegs, MockDelay> {
        SharedTscs42xx::new(Tscs42xx::new(
            MockRegs::new(),
            MockDelay::default(),
            Config::crystal(12_000_000),
        ))
    }

    #[test]
    fn operations_through_shared_reference() {
        let codec = shared();
        let handle = &codec;
        handle.set_stream_params(16, 48000).unwrap();
        handle.unmute(StreamDirection::Playback).unwrap();
        handle.write_coefficient(0x05, 0x00AB_CDEF).unwrap();
        assert_eq!(handle.read_coefficient(0x05), Ok(0x00AB_CDEF));
        assert_eq!(handle.pll_users(), 1);

        handle.mute(StreamDirection::Playback).unwrap();
        assert_eq!(codec.into_inner().pll_users(), 0);
    }

    #[test]
    fn session_under_one_lock() {
        let codec = shared();
        {
            let mut guard = codec.lock();
            let mut session = guard.coefficient_session().unwrap();
            session.write_word(0, 1).unwrap();
            session.write_word(1, 2).unwrap();
            assert_eq!(session.read_word(1), Ok(2));
            session.finish().unwrap();
        }
        assert_eq!(codec.pll_users(), 0);
    }
}
