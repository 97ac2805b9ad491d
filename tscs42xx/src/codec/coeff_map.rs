//! Named coefficient RAM addresses for the DAC DSP.
//!
//! Biquads occupy five consecutive words (`b0, b1, b2, a1, a2`). The
//! general coefficients are single words.

use super::coeff_ram::COEFF_WORD_MASK;

/// Number of coefficients in one biquad.
pub const BIQUAD_COEFFICIENTS: usize = 5;

/// A biquad filter in the coefficient RAM, identified by its first word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Biquad(u8);

const fn bands(base: u8) -> [Biquad; 6] {
    [
        Biquad(base),
        Biquad(base + 0x05),
        Biquad(base + 0x0A),
        Biquad(base + 0x0F),
        Biquad(base + 0x14),
        Biquad(base + 0x19),
    ]
}

impl Biquad {
    /// EQ1, channel 0, bands 1 to 6.
    pub const EQ1_CH0: [Biquad; 6] = bands(0x00);
    /// EQ1, channel 1, bands 1 to 6.
    pub const EQ1_CH1: [Biquad; 6] = bands(0x20);
    /// EQ2, channel 0, bands 1 to 6.
    pub const EQ2_CH0: [Biquad; 6] = bands(0x40);
    /// EQ2, channel 1, bands 1 to 6.
    pub const EQ2_CH1: [Biquad; 6] = bands(0x60);

    /// Bass enhancement, harmonic extraction filter 1.
    pub const BASS_EXT1: Biquad = Biquad(0x80);
    /// Bass enhancement, harmonic extraction filter 2.
    pub const BASS_EXT2: Biquad = Biquad(0x85);
    /// Bass enhancement, limiter filter.
    pub const BASS_LMT: Biquad = Biquad(0x8C);
    /// Bass enhancement, crossover filter.
    pub const BASS_CTO: Biquad = Biquad(0x91);

    /// Treble enhancement, harmonic extraction filter 1.
    pub const TREB_EXT1: Biquad = Biquad(0x97);
    /// Treble enhancement, harmonic extraction filter 2.
    pub const TREB_EXT2: Biquad = Biquad(0x9C);
    /// Treble enhancement, limiter filter.
    pub const TREB_LMT: Biquad = Biquad(0xA3);
    /// Treble enhancement, crossover filter.
    pub const TREB_CTO: Biquad = Biquad(0xA8);

    /// Multi-band compressor, band 1, first biquad.
    pub const MBC_1_BQ1: Biquad = Biquad(0xB0);
    /// Multi-band compressor, band 1, second biquad.
    pub const MBC_1_BQ2: Biquad = Biquad(0xB5);
    /// Multi-band compressor, band 2, first biquad.
    pub const MBC_2_BQ1: Biquad = Biquad(0xBA);
    /// Multi-band compressor, band 2, second biquad.
    pub const MBC_2_BQ2: Biquad = Biquad(0xBF);
    /// Multi-band compressor, band 3, first biquad.
    pub const MBC_3_BQ1: Biquad = Biquad(0xC4);
    /// Multi-band compressor, band 3, second biquad.
    pub const MBC_3_BQ2: Biquad = Biquad(0xC9);

    /// Address of `b0`.
    pub fn base(self) -> u8 {
        self.0
    }
}

/// The five words of one biquad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadCoefficients {
    /// Feed-forward coefficient for x[n].
    pub b0: u32,
    /// Feed-forward coefficient for x[n-1].
    pub b1: u32,
    /// Feed-forward coefficient for x[n-2].
    pub b2: u32,
    /// Feedback coefficient for y[n-1].
    pub a1: u32,
    /// Feedback coefficient for y[n-2].
    pub a2: u32,
}

impl BiquadCoefficients {
    /// Words in RAM order, masked to 24 bits.
    pub fn to_words(self) -> [u32; BIQUAD_COEFFICIENTS] {
        [self.b0, self.b1, self.b2, self.a1, self.a2].map(|w| w & COEFF_WORD_MASK)
    }

    /// Build from words in RAM order.
    pub fn from_words(words: [u32; BIQUAD_COEFFICIENTS]) -> Self {
        let [b0, b1, b2, a1, a2] = words;
        Self { b0, b1, b2, a1, a2 }
    }
}

// ── General coefficients ───────────────────────────────────────────────────

/// 3D effect coefficient.
pub const COEFF_3D_COEF: u8 = 0xAE;
/// 3D effect wet/dry mix.
pub const COEFF_3D_MIX: u8 = 0xAF;
/// EQ1 channel 0 input prescale.
pub const COEFF_EQ1_CH0_PRESCALE: u8 = 0x1F;
/// EQ1 channel 1 input prescale.
pub const COEFF_EQ1_CH1_PRESCALE: u8 = 0x3F;
/// EQ2 channel 0 input prescale.
pub const COEFF_EQ2_CH0_PRESCALE: u8 = 0x5F;
/// EQ2 channel 1 input prescale.
pub const COEFF_EQ2_CH1_PRESCALE: u8 = 0x7F;
/// Bass enhancement non-linear function, first multiplier.
pub const COEFF_BASS_NLF_M1: u8 = 0x8A;
/// Bass enhancement non-linear function, second multiplier.
pub const COEFF_BASS_NLF_M2: u8 = 0x8B;
/// Bass enhancement mix.
pub const COEFF_BASS_MIX: u8 = 0x96;
/// Treble enhancement non-linear function, first multiplier.
pub const COEFF_TREB_NLF_M1: u8 = 0xA1;
/// Treble enhancement non-linear function, second multiplier.
pub const COEFF_TREB_NLF_M2: u8 = 0xA2;
/// Treble enhancement mix.
pub const COEFF_TREB_MIX: u8 = 0xAD;
