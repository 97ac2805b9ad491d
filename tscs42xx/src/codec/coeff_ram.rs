//! DAC coefficient RAM (DACCRAM) access.
//!
//! The RAM holds 256 24-bit words behind a narrow register window: write
//! the word address to `R_DACCRADDR`, then move the word through
//! `R_DACCRWRL/M/H` or `R_DACCRRDL/M/H`. Writing the high byte commits the
//! word. The RAM is only reachable while the DAC path is powered and the
//! PLL is running, so every access runs inside a [`CoeffRamSession`].
//!
//! Byte buffers use the layout of the coefficient image file: big-endian
//! 3-byte words, one per address.

use embedded_hal::delay::DelayNs;

use super::clock::ReferenceClock;
use super::power::PllClaim;
use super::registers as reg;
use super::regmap::RegisterMap;
use super::tscs42xx::Tscs42xx;
use crate::error::Error;

/// Highest coefficient address.
pub const MAX_COEFF_ADDR: u8 = 0xFF;

/// Number of words in the coefficient RAM.
pub const COEFF_RAM_WORDS: usize = MAX_COEFF_ADDR as usize + 1;

/// Bytes per coefficient word in buffers and images.
pub const COEFF_WORD_BYTES: usize = 3;

/// Largest value a coefficient word can hold.
pub const COEFF_WORD_MASK: u32 = 0x00FF_FFFF;

/// Bounds for the `R_DACCRSTAT` busy poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyPoll {
    /// Status reads before giving up.
    pub attempts: u32,
    /// Delay between reads, in microseconds. Zero spins.
    pub interval_us: u32,
}

// ── Register protocol ──────────────────────────────────────────────────────

/// Wait until the RAM reports idle.
pub fn wait_idle<R, D>(regs: &mut R, delay: &mut D, poll: BusyPoll) -> Result<(), Error<R::Error>>
where
    R: RegisterMap,
    D: DelayNs,
{
    for _ in 0..poll.attempts {
        let status = regs.read(reg::R_DACCRSTAT).map_err(|e| {
            error!("Failed to read DAC coefficient RAM status");
            Error::Bus(e)
        })?;
        if status == 0 {
            return Ok(());
        }
        if poll.interval_us > 0 {
            delay.delay_us(poll.interval_us);
        }
    }
    error!("DAC coefficient RAM stayed busy");
    Err(Error::RamBusy)
}

/// Write one word. Bits above 23 are ignored.
pub fn write_word<R, D>(
    regs: &mut R,
    delay: &mut D,
    poll: BusyPoll,
    addr: u8,
    word: u32,
) -> Result<(), Error<R::Error>>
where
    R: RegisterMap,
    D: DelayNs,
{
    wait_idle(regs, delay, poll)?;
    regs.write(reg::R_DACCRADDR, addr).map_err(|e| {
        error!("Failed to write DAC coefficient address {:#x}", addr);
        Error::Bus(e)
    })?;

    let bytes = [word as u8, (word >> 8) as u8, (word >> 16) as u8];
    if regs.supports_burst() {
        return regs.burst_write(reg::R_DACCRWRL, &bytes).map_err(|e| {
            error!("Failed to write DAC coefficient {:#x}", addr);
            Error::Bus(e)
        });
    }
    for (offset, byte) in bytes.into_iter().enumerate() {
        wait_idle(regs, delay, poll)?;
        regs.write(reg::R_DACCRWRL + offset as u8, byte)
            .map_err(|e| {
                error!("Failed to write DAC coefficient {:#x}", addr);
                Error::Bus(e)
            })?;
    }
    Ok(())
}

/// Read one word.
pub fn read_word<R: RegisterMap>(regs: &mut R, addr: u8) -> Result<u32, Error<R::Error>> {
    regs.write(reg::R_DACCRADDR, addr).map_err(|e| {
        error!("Failed to write DAC coefficient address {:#x}", addr);
        Error::Bus(e)
    })?;

    let mut bytes = [0u8; 3];
    if regs.supports_burst() {
        regs.burst_read(reg::R_DACCRRDL, &mut bytes)
            .map_err(Error::Bus)?;
    } else {
        for (offset, byte) in bytes.iter_mut().enumerate() {
            *byte = regs.read(reg::R_DACCRRDL + offset as u8).map_err(|e| {
                error!("Failed to read DAC coefficient {:#x}", addr);
                Error::Bus(e)
            })?;
        }
    }
    Ok(bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16)
}

// ── Buffer helpers ─────────────────────────────────────────────────────────

/// Reject transfers that would run past [`MAX_COEFF_ADDR`].
pub fn check_range<E>(start: u8, count: usize) -> Result<(), Error<E>> {
    if start as usize + count > COEFF_RAM_WORDS {
        error!("Coefficient range {}+{} out of bounds", start, count);
        return Err(Error::OutOfRange {
            start: start as usize,
            count,
        });
    }
    Ok(())
}

/// Number of words in a buffer of `len` bytes.
pub fn word_count<E>(len: usize) -> Result<usize, Error<E>> {
    if len % COEFF_WORD_BYTES != 0 {
        error!("Coefficient buffer of {} bytes is not whole words", len);
        return Err(Error::MalformedImage);
    }
    Ok(len / COEFF_WORD_BYTES)
}

/// Decode one big-endian buffer word.
pub fn word_from_be(bytes: &[u8]) -> u32 {
    (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32
}

/// Encode one word into a big-endian buffer slot.
pub fn word_to_be(word: u32, out: &mut [u8]) {
    out[0] = (word >> 16) as u8;
    out[1] = (word >> 8) as u8;
    out[2] = word as u8;
}

// ── Session guard ──────────────────────────────────────────────────────────

/// An open coefficient RAM bracket.
///
/// Opening forces the DAC path on (if it was off) and takes a PLL claim.
/// [`finish`](Self::finish) releases the claim and restores the DAC path,
/// reporting the first failure; dropping the session does the same and
/// discards errors.
#[must_use = "the PLL stays held until the session is finished or dropped"]
pub struct CoeffRamSession<'a, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    codec: &'a mut Tscs42xx<R, D, C>,
    claim: Option<PllClaim>,
    restore_dac: bool,
}

impl<'a, R, D, C> CoeffRamSession<'a, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    pub(super) fn enter(codec: &'a mut Tscs42xx<R, D, C>) -> Result<Self, Error<R::Error>> {
        let pwrm2 = codec.regs.read(reg::R_PWRM2).map_err(|e| {
            error!("Failed to read DAC power state");
            Error::Bus(e)
        })?;
        let restore_dac = pwrm2 & reg::RM_PWRM2_HPL == 0;
        if restore_dac {
            codec
                .regs
                .update_bits(reg::R_PWRM2, reg::RM_PWRM2_HPL, reg::RV_PWRM2_HPL_ENABLE)
                .map_err(|e| {
                    error!("Failed to power DAC for coefficient access");
                    Error::Bus(e)
                })?;
        }

        let rate = codec.bracket_rate();
        match codec.sequencer.power_up(&mut codec.regs, &mut codec.delay, rate) {
            Ok(claim) => Ok(Self {
                codec,
                claim: Some(claim),
                restore_dac,
            }),
            Err(e) => {
                if restore_dac {
                    let _ = codec.regs.update_bits(
                        reg::R_PWRM2,
                        reg::RM_PWRM2_HPL,
                        reg::RV_PWRM2_HPL_DISABLE,
                    );
                }
                Err(e)
            }
        }
    }

    pub(super) fn codec(&mut self) -> &mut Tscs42xx<R, D, C> {
        &mut *self.codec
    }

    /// Write one word.
    pub fn write_word(&mut self, addr: u8, word: u32) -> Result<(), Error<R::Error>> {
        let poll = self.codec.busy_poll();
        write_word(
            &mut self.codec.regs,
            &mut self.codec.delay,
            poll,
            addr,
            word & COEFF_WORD_MASK,
        )
    }

    /// Read one word.
    pub fn read_word(&mut self, addr: u8) -> Result<u32, Error<R::Error>> {
        read_word(&mut self.codec.regs, addr)
    }

    /// Write consecutive words from a big-endian buffer, starting at `start`.
    pub fn write(&mut self, start: u8, bytes: &[u8]) -> Result<(), Error<R::Error>> {
        let count = word_count::<R::Error>(bytes.len())?;
        check_range::<R::Error>(start, count)?;
        for (i, chunk) in bytes.chunks_exact(COEFF_WORD_BYTES).enumerate() {
            self.write_word((start as usize + i) as u8, word_from_be(chunk))?;
        }
        Ok(())
    }

    /// Read consecutive words into a big-endian buffer, starting at `start`.
    pub fn read(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Error<R::Error>> {
        let count = word_count::<R::Error>(buf.len())?;
        check_range::<R::Error>(start, count)?;
        for (i, chunk) in buf.chunks_exact_mut(COEFF_WORD_BYTES).enumerate() {
            let word = self.read_word((start as usize + i) as u8)?;
            word_to_be(word, chunk);
        }
        Ok(())
    }

    /// Close the bracket.
    pub fn finish(mut self) -> Result<(), Error<R::Error>> {
        self.exit()
    }

    fn exit(&mut self) -> Result<(), Error<R::Error>> {
        let mut result = Ok(());
        if let Some(claim) = self.claim.take() {
            result = self
                .codec
                .sequencer
                .power_down(&mut self.codec.regs, claim);
        }
        if self.restore_dac {
            self.restore_dac = false;
            let restored = self
                .codec
                .regs
                .update_bits(reg::R_PWRM2, reg::RM_PWRM2_HPL, reg::RV_PWRM2_HPL_DISABLE)
                .map_err(|e| {
                    error!("Failed to restore DAC power");
                    Error::Bus(e)
                });
            result = result.and(restored);
        }
        result
    }
}

impl<R, D, C> Drop for CoeffRamSession<'_, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mock::{MockDelay, MockError, MockRegs};

    const POLL: BusyPoll = BusyPoll {
        attempts: 1000,
        interval_us: 0,
    };

    #[test]
    fn write_word_sequence_without_burst() {
        let mut regs = MockRegs::new();
        write_word(&mut regs, &mut MockDelay::default(), POLL, 0x12, 0x00AB_CDEF).unwrap();

        assert_eq!(
            regs.writes(),
            [
                (reg::R_DACCRADDR, 0x12),
                (reg::R_DACCRWRL, 0xEF),
                (reg::R_DACCRWRM, 0xCD),
                (reg::R_DACCRWRH, 0xAB),
            ]
        );
        // One busy poll before the address and one before each byte.
        assert_eq!(regs.read_count(), 4);
        assert_eq!(regs.ram(0x12), 0x00AB_CDEF);
    }

    #[test]
    fn write_word_uses_one_burst_when_supported() {
        let mut regs = MockRegs::new().with_burst();
        write_word(&mut regs, &mut MockDelay::default(), POLL, 0x40, 0x0012_3456).unwrap();

        assert_eq!(regs.burst_count(), 1);
        assert_eq!(regs.read_count(), 1);
        assert_eq!(regs.ram(0x40), 0x0012_3456);
    }

    #[test]
    fn busy_poll_waits_for_idle() {
        let mut regs = MockRegs::new();
        regs.busy_for(3);
        let mut delay = MockDelay::default();
        let poll = BusyPoll {
            attempts: 10,
            interval_us: 5,
        };
        wait_idle(&mut regs, &mut delay, poll).unwrap();
        assert_eq!(regs.read_count(), 4);
        assert_eq!(delay.total_ns, 3 * 5_000);
    }

    #[test]
    fn busy_poll_is_bounded() {
        let mut regs = MockRegs::new();
        regs.always_busy();
        let poll = BusyPoll {
            attempts: 25,
            interval_us: 0,
        };
        let err = write_word(&mut regs, &mut MockDelay::default(), poll, 0, 1).unwrap_err();
        assert_eq!(err, Error::RamBusy);
        assert_eq!(regs.read_count(), 25);
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn busy_read_error_aborts_immediately() {
        let mut regs = MockRegs::new();
        regs.fail_reads_from(reg::R_DACCRSTAT);
        let err = write_word(&mut regs, &mut MockDelay::default(), POLL, 0, 1).unwrap_err();
        assert_eq!(err, Error::Bus(MockError));
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn read_word_assembles_little_end_first() {
        let mut regs = MockRegs::new();
        regs.set_ram(0x7F, 0x0080_0001);
        assert_eq!(read_word(&mut regs, 0x7F).unwrap(), 0x0080_0001);
        assert_eq!(regs.writes(), [(reg::R_DACCRADDR, 0x7F)]);

        let mut regs = MockRegs::new().with_burst();
        regs.set_ram(0x03, 0x0000_FF00);
        assert_eq!(read_word(&mut regs, 0x03).unwrap(), 0x0000_FF00);
        assert_eq!(regs.burst_count(), 1);
    }

    #[test]
    fn every_address_round_trips() {
        let mut regs = MockRegs::new();
        let mut delay = MockDelay::default();
        for addr in 0..=MAX_COEFF_ADDR {
            let word = (addr as u32) << 16 | (!addr as u32) << 8 | 0x5A;
            write_word(&mut regs, &mut delay, POLL, addr, word).unwrap();
        }
        for addr in 0..=MAX_COEFF_ADDR {
            let word = (addr as u32) << 16 | (!addr as u32) << 8 | 0x5A;
            assert_eq!(read_word(&mut regs, addr).unwrap(), word, "addr {:#x}", addr);
        }
    }

    #[test]
    fn range_checks() {
        assert_eq!(check_range::<MockError>(0, COEFF_RAM_WORDS), Ok(()));
        assert_eq!(check_range::<MockError>(MAX_COEFF_ADDR, 1), Ok(()));
        assert_eq!(
            check_range::<MockError>(MAX_COEFF_ADDR, 2),
            Err(Error::OutOfRange { start: 255, count: 2 })
        );
        assert_eq!(word_count::<MockError>(9), Ok(3));
        assert_eq!(word_count::<MockError>(10), Err(Error::MalformedImage));
    }

    #[test]
    fn big_endian_buffer_words() {
        assert_eq!(word_from_be(&[0x12, 0x34, 0x56]), 0x0012_3456);
        let mut out = [0u8; 3];
        word_to_be(0x00AB_CDEF, &mut out);
        assert_eq!(out, [0xAB, 0xCD, 0xEF]);
    }
}
