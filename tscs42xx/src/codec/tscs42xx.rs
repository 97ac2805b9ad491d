//! TSCS42xx audio codec driver.
//!
//! The driver owns the register map, a delay provider and an optional
//! external clock provider. It tracks the active sample rate and the PLL
//! users, so exclusive access through `&mut self` serializes every clock
//! change against every coefficient RAM transfer.
//!
//! # Example
//!
//! ```ignore
//! let regs = I2cRegisters::new(i2c);
//! let mut codec = Tscs42xx::new(regs, delay, Config::crystal(12_000_000));
//! codec.verify_part()?;
//! codec.reset()?;
//! codec.init(FirmwareImages::none())?;
//! codec.set_stream_params(16, 48000)?;
//! codec.unmute(StreamDirection::Playback)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::clock::{NoExternalClock, ReferenceClock, ReferenceClockSource};
use super::coeff_map::{Biquad, BiquadCoefficients, BIQUAD_COEFFICIENTS};
use super::coeff_ram::{self, CoeffRamSession, BusyPoll, COEFF_WORD_BYTES};
use super::format::{self, SampleWidth};
use super::pll::{self, PllFamily};
use super::power::{PllClaim, PllSequencer};
use super::registers as reg;
use super::regmap::{I2cRegisters, RegisterMap};
use crate::config::{Config, FirmwareImages};
use crate::constants;
use crate::control::{CodecControl, DaiRole, StreamDirection};
use crate::error::Error;

// ── Driver struct ──────────────────────────────────────────────────────────

/// TSCS42xx codec driver.
///
/// Generic over the register map, the delay provider used by the bounded
/// polls, and the external clock provider (unused for crystal boards).
pub struct Tscs42xx<R, D, C = NoExternalClock> {
    pub(super) regs: R,
    pub(super) delay: D,
    clock: C,
    mclk_running: bool,
    config: Config,
    pub(super) sequencer: PllSequencer,
    active_rate: Option<u32>,
    playback: Option<PllClaim>,
    capture: Option<PllClaim>,
}

impl<I2C, D> Tscs42xx<I2cRegisters<I2C>, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver on an I2C bus at the default address (0x69).
    pub fn new_i2c(i2c: I2C, delay: D, config: Config) -> Self {
        Self::new(I2cRegisters::new(i2c), delay, config)
    }
}

impl<R, D> Tscs42xx<R, D>
where
    R: RegisterMap,
    D: DelayNs,
{
    /// Create a driver for a board without an external clock provider.
    pub fn new(regs: R, delay: D, config: Config) -> Self {
        Self::with_external_clock(regs, delay, NoExternalClock, config)
    }
}

impl<R, D, C> Tscs42xx<R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    /// Create a driver whose MCLK2 reference is controlled by `clock`.
    pub fn with_external_clock(regs: R, delay: D, clock: C, config: Config) -> Self {
        Self {
            regs,
            delay,
            clock,
            mclk_running: false,
            config,
            sequencer: PllSequencer::new(config.pll_lock_attempts, config.pll_lock_interval_us),
            active_rate: None,
            playback: None,
            capture: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of outstanding PLL claims.
    pub fn pll_users(&self) -> u32 {
        self.sequencer.users()
    }

    /// Last sample rate programmed with [`set_stream_rate`](Self::set_stream_rate).
    pub fn active_sample_rate(&self) -> Option<u32> {
        self.active_rate
    }

    /// Whether a stream currently holds the PLL.
    pub fn is_unmuted(&self, direction: StreamDirection) -> bool {
        match direction {
            StreamDirection::Playback => self.playback.is_some(),
            StreamDirection::Capture => self.capture.is_some(),
        }
    }

    /// Release the bus, delay and clock provider.
    pub fn release(self) -> (R, D, C) {
        (self.regs, self.delay, self.clock)
    }

    // ── Low-level register helpers ─────────────────────────────────────

    /// Write one register.
    pub fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Error<R::Error>> {
        self.regs.write(addr, value).map_err(|e| {
            error!("Failed to write register {:#x}", addr);
            Error::Bus(e)
        })
    }

    /// Read one register.
    pub fn read_register(&mut self, addr: u8) -> Result<u8, Error<R::Error>> {
        self.regs.read(addr).map_err(|e| {
            error!("Failed to read register {:#x}", addr);
            Error::Bus(e)
        })
    }

    /// Read-modify-write: `new = (current & !mask) | (value & mask)`.
    fn modify(&mut self, addr: u8, mask: u8, value: u8) -> Result<(), Error<R::Error>> {
        self.regs.update_bits(addr, mask, value).map_err(|e| {
            error!("Failed to update register {:#x}", addr);
            Error::Bus(e)
        })
    }

    pub(super) fn busy_poll(&self) -> BusyPoll {
        BusyPoll {
            attempts: self.config.ram_busy_attempts,
            interval_us: self.config.ram_busy_interval_us,
        }
    }

    /// Rate for a coefficient bracket: the stream rate if the PLL is
    /// already held, otherwise the fallback.
    pub(super) fn bracket_rate(&self) -> u32 {
        match self.active_rate {
            Some(rate) if self.sequencer.users() > 0 => rate,
            _ => self.config.fallback_rate,
        }
    }

    // ── Part identification ────────────────────────────────────────────

    /// Check the device ID registers. Returns the part ID.
    pub fn verify_part(&mut self) -> Result<u16, Error<R::Error>> {
        let high = self.read_register(reg::R_DEVIDH)?;
        let low = self.read_register(reg::R_DEVIDL)?;
        let id = (high as u16) << 8 | low as u16;
        match id {
            reg::DEVID_TSCS42A1 | reg::DEVID_TSCS42A2 => {
                info!("Found part {:#x}", id);
                Ok(id)
            }
            _ => {
                error!("{:#x} is not a valid part", id);
                Err(Error::InvalidPart(id))
            }
        }
    }

    /// Soft-reset the part and wait for it to settle.
    ///
    /// The hardware returns to its defaults, so the driver forgets the
    /// active rate and every PLL claim.
    pub fn reset(&mut self) -> Result<(), Error<R::Error>> {
        self.write_register(reg::R_RESET, reg::RV_RESET_ENABLE)?;
        self.delay.delay_ms(constants::RESET_SETTLE_MS);
        self.sequencer =
            PllSequencer::new(self.config.pll_lock_attempts, self.config.pll_lock_interval_us);
        self.active_rate = None;
        self.playback = None;
        self.capture = None;
        Ok(())
    }

    // ── Clocking ───────────────────────────────────────────────────────

    /// Program the PLL inputs for a reference frequency and source.
    ///
    /// Unknown frequencies are rejected before any register access.
    pub fn configure_clock(
        &mut self,
        frequency: u32,
        source: ReferenceClockSource,
    ) -> Result<(), Error<R::Error>> {
        let Some(profile) = pll::select(frequency) else {
            error!("Unsupported PLL input frequency {}", frequency);
            return Err(Error::UnsupportedFrequency(frequency));
        };

        pll::apply(&mut self.regs, profile)?;

        let refsel = match source {
            ReferenceClockSource::Crystal => {
                reg::RV_PLLREFSEL_PLL1_REF_SEL_XTAL_MCLK1 | reg::RV_PLLREFSEL_PLL2_REF_SEL_XTAL_MCLK1
            }
            ReferenceClockSource::ExternalOscillator => {
                self.start_external_clock(frequency)?;
                reg::RV_PLLREFSEL_PLL1_REF_SEL_MCLK2 | reg::RV_PLLREFSEL_PLL2_REF_SEL_MCLK2
            }
        };
        self.write_register(reg::R_PLLREFSEL, refsel)?;

        self.config.reference_frequency = frequency;
        self.config.reference_source = source;
        info!("PLL reference {} Hz", frequency);
        Ok(())
    }

    /// Program the provider's rate and enable it. A clock this driver
    /// already enabled is not enabled again, so every enable is matched by
    /// one [`suspend`](Self::suspend).
    fn start_external_clock(&mut self, frequency: u32) -> Result<(), Error<R::Error>> {
        self.clock.set_rate(frequency).map_err(|_| {
            error!("Could not set mclk rate {}", frequency);
            Error::Clock
        })?;
        if self.mclk_running {
            return Ok(());
        }
        self.clock.enable().map_err(|_| {
            error!("Failed to enable mclk");
            Error::Clock
        })?;
        self.mclk_running = true;
        Ok(())
    }

    // ── Startup ────────────────────────────────────────────────────────

    /// Bring the part up after reset.
    ///
    /// Configures the PLL inputs from [`Config`], writes the interface
    /// defaults and loads the startup images with the DAC path and PLL
    /// held. Both images are validated before any register access.
    pub fn init(&mut self, images: FirmwareImages<'_>) -> Result<(), Error<R::Error>> {
        if let Some(coefficients) = images.coefficients {
            let words = coeff_ram::word_count::<R::Error>(coefficients.len())?;
            coeff_ram::check_range::<R::Error>(0, words)?;
        }
        if let Some(controls) = images.controls {
            if controls.len() % constants::CONTROL_RECORD_BYTES != 0 {
                error!("Control image of {} bytes is malformed", controls.len());
                return Err(Error::MalformedImage);
            }
        }

        self.configure_clock(self.config.reference_frequency, self.config.reference_source)?;

        self.write_register(reg::R_ADCSR, reg::RV_ADCSR_ABCM_64)?;
        self.write_register(reg::R_DACSR, reg::RV_DACSR_DBCM_64)?;
        self.write_register(reg::R_AIC2, reg::RV_AIC2_BLRCM_DAC_BCLK_LRCLK_SHARED)?;

        if images.coefficients.is_none() && images.controls.is_none() {
            return Ok(());
        }

        let mut session = self.coefficient_session()?;
        let loaded = Self::load_images(&mut session, images);
        let closed = session.finish();
        loaded.and(closed)
    }

    fn load_images(
        session: &mut CoeffRamSession<'_, R, D, C>,
        images: FirmwareImages<'_>,
    ) -> Result<(), Error<R::Error>> {
        session.codec().delay.delay_ms(constants::IMAGE_LOAD_SETTLE_MS);

        if let Some(coefficients) = images.coefficients {
            info!("Loading {} coefficient words", coefficients.len() / COEFF_WORD_BYTES);
            session.write(0, coefficients)?;
        }
        if let Some(controls) = images.controls {
            info!("Loading {} control settings", controls.len() / constants::CONTROL_RECORD_BYTES);
            for record in controls.chunks_exact(constants::CONTROL_RECORD_BYTES) {
                session.codec().write_register(record[0], record[1])?;
            }
        }
        Ok(())
    }

    // ── Stream parameters ──────────────────────────────────────────────

    /// Program the sample width (16, 20, 24 or 32 bits).
    pub fn set_stream_format(&mut self, bits: u8) -> Result<(), Error<R::Error>> {
        let Some(width) = SampleWidth::from_bits(bits) else {
            error!("Unsupported format width {}", bits);
            return Err(Error::UnsupportedFormat(bits));
        };
        format::program_width(&mut self.regs, width)
    }

    /// Program the sample rate of both converters.
    ///
    /// While a stream is unmuted the rate must stay in the family of the
    /// PLL that stream holds. On failure the active rate is left unchanged.
    pub fn set_stream_rate(&mut self, rate: u32) -> Result<(), Error<R::Error>> {
        self.check_rate(rate)?;
        format::program_rate(&mut self.regs, rate)?;
        self.active_rate = Some(rate);
        debug!("Sample rate {} Hz", rate);
        Ok(())
    }

    /// Program width and rate together. Both are checked before either
    /// is written.
    pub fn set_stream_params(&mut self, bits: u8, rate: u32) -> Result<(), Error<R::Error>> {
        self.check_rate(rate)?;
        self.set_stream_format(bits)?;
        self.set_stream_rate(rate)
    }

    fn check_rate(&self, rate: u32) -> Result<(), Error<R::Error>> {
        let family = match PllFamily::for_rate(rate) {
            Some(family) if format::dividers_for(rate).is_some() => family,
            _ => {
                error!("Unsupported sample rate {}", rate);
                return Err(Error::UnsupportedRate(rate));
            }
        };
        match self.held_stream_family() {
            Some(held) if held != family => {
                error!("Rate {} needs the other PLL while a stream is running", rate);
                Err(Error::RateConflict(rate))
            }
            _ => Ok(()),
        }
    }

    fn held_stream_family(&self) -> Option<PllFamily> {
        self.playback
            .as_ref()
            .or(self.capture.as_ref())
            .map(PllClaim::family)
    }

    /// Program the BCLK/LRCLK ratio (32, 40 or 64).
    pub fn set_bclk_ratio(&mut self, ratio: u32) -> Result<(), Error<R::Error>> {
        format::program_bclk_ratio(&mut self.regs, ratio)
    }

    /// Select the clock role on the digital audio interface. Only
    /// [`DaiRole::Master`] is supported.
    pub fn set_dai_role(&mut self, role: DaiRole) -> Result<(), Error<R::Error>> {
        match role {
            DaiRole::Master => {
                self.modify(reg::R_AIC1, reg::RM_AIC1_MS, reg::RV_AIC1_MS_MASTER)
            }
            DaiRole::Slave => {
                error!("Codec only supports master mode");
                Err(Error::UnsupportedDaiRole)
            }
        }
    }

    // ── Mute / unmute ──────────────────────────────────────────────────

    fn mute_field(direction: StreamDirection) -> (u8, u8) {
        match direction {
            StreamDirection::Playback => (reg::R_CNVRTR1, reg::RM_CNVRTR1_DACMU),
            StreamDirection::Capture => (reg::R_CNVRTR0, reg::RM_CNVRTR0_ADCMU),
        }
    }

    fn claim_slot(&mut self, direction: StreamDirection) -> &mut Option<PllClaim> {
        match direction {
            StreamDirection::Playback => &mut self.playback,
            StreamDirection::Capture => &mut self.capture,
        }
    }

    /// Set the stream's mute bit, then release its PLL claim.
    pub fn mute(&mut self, direction: StreamDirection) -> Result<(), Error<R::Error>> {
        let (addr, mask) = Self::mute_field(direction);
        self.modify(addr, mask, mask)?;

        let claim = self.claim_slot(direction).take();
        if let Some(claim) = claim {
            self.sequencer.power_down(&mut self.regs, claim)?;
        }
        Ok(())
    }

    /// Power the PLL for the active rate, then clear the stream's mute bit.
    ///
    /// A stream that is already unmuted keeps its single claim.
    pub fn unmute(&mut self, direction: StreamDirection) -> Result<(), Error<R::Error>> {
        let (addr, mask) = Self::mute_field(direction);
        if self.claim_slot(direction).is_some() {
            return self.modify(addr, mask, 0);
        }

        let Some(rate) = self.active_rate else {
            error!("Unmute before a sample rate was set");
            return Err(Error::NoSampleRate);
        };
        let claim = self.sequencer.power_up(&mut self.regs, &mut self.delay, rate)?;
        if let Err(e) = self.modify(addr, mask, 0) {
            let _ = self.sequencer.power_down(&mut self.regs, claim);
            return Err(e);
        }
        *self.claim_slot(direction) = Some(claim);
        Ok(())
    }

    // ── PLL holds ──────────────────────────────────────────────────────

    /// Keep the PLL for `rate`'s family running until the hold is released.
    pub fn hold_pll(&mut self, rate: u32) -> Result<PllHold<'_, R, D, C>, Error<R::Error>> {
        let claim = self.sequencer.power_up(&mut self.regs, &mut self.delay, rate)?;
        Ok(PllHold {
            codec: self,
            claim: Some(claim),
        })
    }

    // ── Coefficient RAM ────────────────────────────────────────────────

    /// Open a coefficient RAM bracket for several transfers.
    pub fn coefficient_session(
        &mut self,
    ) -> Result<CoeffRamSession<'_, R, D, C>, Error<R::Error>> {
        CoeffRamSession::enter(self)
    }

    /// Read big-endian words starting at `start`.
    pub fn read_coefficients(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Error<R::Error>> {
        let words = coeff_ram::word_count::<R::Error>(buf.len())?;
        coeff_ram::check_range::<R::Error>(start, words)?;
        if words == 0 {
            return Ok(());
        }

        let mut session = self.coefficient_session()?;
        let read = session.read(start, buf);
        let closed = session.finish();
        read.and(closed)
    }

    /// Write big-endian words starting at `start`.
    pub fn write_coefficients(&mut self, start: u8, bytes: &[u8]) -> Result<(), Error<R::Error>> {
        let words = coeff_ram::word_count::<R::Error>(bytes.len())?;
        coeff_ram::check_range::<R::Error>(start, words)?;
        if words == 0 {
            return Ok(());
        }

        let mut session = self.coefficient_session()?;
        let written = session.write(start, bytes);
        let closed = session.finish();
        written.and(closed)
    }

    /// Read one 24-bit word.
    pub fn read_coefficient(&mut self, addr: u8) -> Result<u32, Error<R::Error>> {
        let mut session = self.coefficient_session()?;
        let word = session.read_word(addr);
        let closed = session.finish();
        let word = word?;
        closed.map(|()| word)
    }

    /// Write one 24-bit word. Bits above 23 are ignored.
    pub fn write_coefficient(&mut self, addr: u8, word: u32) -> Result<(), Error<R::Error>> {
        let mut session = self.coefficient_session()?;
        let written = session.write_word(addr, word);
        let closed = session.finish();
        written.and(closed)
    }

    /// Write all five coefficients of a biquad in one bracket.
    pub fn write_biquad(
        &mut self,
        biquad: Biquad,
        coefficients: BiquadCoefficients,
    ) -> Result<(), Error<R::Error>> {
        let mut bytes = [0u8; BIQUAD_COEFFICIENTS * COEFF_WORD_BYTES];
        for (word, out) in coefficients
            .to_words()
            .into_iter()
            .zip(bytes.chunks_exact_mut(COEFF_WORD_BYTES))
        {
            coeff_ram::word_to_be(word, out);
        }
        self.write_coefficients(biquad.base(), &bytes)
    }

    /// Read all five coefficients of a biquad in one bracket.
    pub fn read_biquad(&mut self, biquad: Biquad) -> Result<BiquadCoefficients, Error<R::Error>> {
        let mut bytes = [0u8; BIQUAD_COEFFICIENTS * COEFF_WORD_BYTES];
        self.read_coefficients(biquad.base(), &mut bytes)?;

        let mut words = [0u32; BIQUAD_COEFFICIENTS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(COEFF_WORD_BYTES)) {
            *word = coeff_ram::word_from_be(chunk);
        }
        Ok(BiquadCoefficients::from_words(words))
    }

    // ── Power management ───────────────────────────────────────────────

    /// Stop the external reference clock if this driver started it.
    pub fn suspend(&mut self) {
        if self.mclk_running {
            self.clock.disable();
            self.mclk_running = false;
            debug!("mclk disabled");
        }
    }

    /// Restart the external reference clock and reset the part.
    ///
    /// Register state is lost; run [`init`](Self::init) again afterwards.
    /// That call finds the clock running and leaves it enabled once.
    pub fn resume(&mut self) -> Result<(), Error<R::Error>> {
        if self.config.reference_source == ReferenceClockSource::ExternalOscillator {
            self.start_external_clock(self.config.reference_frequency)?;
        }
        self.reset()
    }
}

impl<R, D, C> CodecControl for Tscs42xx<R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    type Error = Error<R::Error>;

    fn set_stream_format(&mut self, bits: u8) -> Result<(), Self::Error> {
        Tscs42xx::set_stream_format(self, bits)
    }

    fn set_stream_rate(&mut self, rate: u32) -> Result<(), Self::Error> {
        Tscs42xx::set_stream_rate(self, rate)
    }

    fn mute(&mut self, direction: StreamDirection) -> Result<(), Self::Error> {
        Tscs42xx::mute(self, direction)
    }

    fn unmute(&mut self, direction: StreamDirection) -> Result<(), Self::Error> {
        Tscs42xx::unmute(self, direction)
    }
}

// ── PLL hold guard ─────────────────────────────────────────────────────────

/// A PLL claim tied to the driver borrow.
///
/// [`release`](Self::release) powers the PLL down if this was the last
/// user and reports the result; dropping the hold does the same and
/// discards errors.
#[must_use = "the PLL stays held until the hold is released or dropped"]
pub struct PllHold<'a, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    codec: &'a mut Tscs42xx<R, D, C>,
    claim: Option<PllClaim>,
}

impl<R, D, C> PllHold<'_, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    /// Number of PLL users, this hold included.
    pub fn pll_users(&self) -> u32 {
        self.codec.pll_users()
    }

    /// Release the claim.
    pub fn release(mut self) -> Result<(), Error<R::Error>> {
        self.power_down()
    }

    fn power_down(&mut self) -> Result<(), Error<R::Error>> {
        match self.claim.take() {
            Some(claim) => self.codec.sequencer.power_down(&mut self.codec.regs, claim),
            None => Ok(()),
        }
    }
}

impl<R, D, C> Drop for PllHold<'_, R, D, C>
where
    R: RegisterMap,
    D: DelayNs,
    C: ReferenceClock,
{
    fn drop(&mut self) {
        let _ = self.power_down();
    }
}
