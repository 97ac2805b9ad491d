//! Sample rate, sample width and bit clock programming.
//!
//! Playback and capture share one clock domain, so every rate change is
//! written to both `R_DACSR` and `R_ADCSR`.

use super::registers as reg;
use super::regmap::RegisterMap;
use crate::error::Error;

/// Audio interface word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleWidth {
    /// 16-bit samples.
    Bits16,
    /// 20-bit samples (packed in 3 bytes).
    Bits20,
    /// 24-bit samples.
    Bits24,
    /// 32-bit samples.
    Bits32,
}

impl SampleWidth {
    /// Width from a bit count.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            16 => Some(SampleWidth::Bits16),
            20 => Some(SampleWidth::Bits20),
            24 => Some(SampleWidth::Bits24),
            32 => Some(SampleWidth::Bits32),
            _ => None,
        }
    }

    /// Bits per sample.
    pub fn bits(self) -> u8 {
        match self {
            SampleWidth::Bits16 => 16,
            SampleWidth::Bits20 => 20,
            SampleWidth::Bits24 => 24,
            SampleWidth::Bits32 => 32,
        }
    }

    fn wl_field(self) -> u8 {
        match self {
            SampleWidth::Bits16 => reg::RV_AIC1_WL_16,
            SampleWidth::Bits20 => reg::RV_AIC1_WL_20,
            SampleWidth::Bits24 => reg::RV_AIC1_WL_24,
            SampleWidth::Bits32 => reg::RV_AIC1_WL_32,
        }
    }
}

/// Base rate and multiplier fields for one sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDividers {
    /// Base rate field (`DBR`/`ABR`), already shifted into place.
    pub br: u8,
    /// Base rate multiplier field (`DBM`/`ABM`).
    pub bm: u8,
}

/// Every supported sample rate, ascending.
pub const SUPPORTED_RATES: [u32; 10] = [
    8000, 11025, 16000, 22050, 24000, 32000, 44100, 48000, 88200, 96000,
];

/// Divider fields for a sample rate.
pub fn dividers_for(rate: u32) -> Option<RateDividers> {
    let (br, bm) = match rate {
        8000 => (reg::RV_DACSR_DBR_32, reg::RV_DACSR_DBM_PT25),
        16000 => (reg::RV_DACSR_DBR_32, reg::RV_DACSR_DBM_PT5),
        24000 => (reg::RV_DACSR_DBR_48, reg::RV_DACSR_DBM_PT5),
        32000 => (reg::RV_DACSR_DBR_32, reg::RV_DACSR_DBM_1),
        48000 => (reg::RV_DACSR_DBR_48, reg::RV_DACSR_DBM_1),
        96000 => (reg::RV_DACSR_DBR_48, reg::RV_DACSR_DBM_2),
        11025 => (reg::RV_DACSR_DBR_44_1, reg::RV_DACSR_DBM_PT25),
        22050 => (reg::RV_DACSR_DBR_44_1, reg::RV_DACSR_DBM_PT5),
        44100 => (reg::RV_DACSR_DBR_44_1, reg::RV_DACSR_DBM_1),
        88200 => (reg::RV_DACSR_DBR_44_1, reg::RV_DACSR_DBM_2),
        _ => return None,
    };
    Some(RateDividers { br, bm })
}

/// Program the word length field.
pub fn program_width<R: RegisterMap>(
    regs: &mut R,
    width: SampleWidth,
) -> Result<(), Error<R::Error>> {
    regs.update_bits(reg::R_AIC1, reg::RM_AIC1_WL, width.wl_field())
        .map_err(|e| {
            error!("Failed to set sample width");
            Error::Bus(e)
        })
}

/// Program both converters for `rate`.
///
/// Rejects unknown rates before touching any register.
pub fn program_rate<R: RegisterMap>(regs: &mut R, rate: u32) -> Result<(), Error<R::Error>> {
    let Some(d) = dividers_for(rate) else {
        error!("Unsupported sample rate {}", rate);
        return Err(Error::UnsupportedRate(rate));
    };

    let writes = [
        (reg::R_DACSR, reg::RM_DACSR_DBR, d.br),
        (reg::R_DACSR, reg::RM_DACSR_DBM, d.bm),
        (reg::R_ADCSR, reg::RM_ADCSR_ABR, d.br),
        (reg::R_ADCSR, reg::RM_ADCSR_ABM, d.bm),
    ];
    for (addr, mask, value) in writes {
        regs.update_bits(addr, mask, value).map_err(|e| {
            error!("Failed to update register {:#x}", addr);
            Error::Bus(e)
        })?;
    }
    Ok(())
}

/// BCLK/LRCLK ratio field for `ratio`.
pub fn bclk_ratio_field(ratio: u32) -> Option<u8> {
    match ratio {
        32 => Some(reg::RV_DACSR_DBCM_32),
        40 => Some(reg::RV_DACSR_DBCM_40),
        64 => Some(reg::RV_DACSR_DBCM_64),
        _ => None,
    }
}

/// Program the BCLK/LRCLK ratio of both converters.
pub fn program_bclk_ratio<R: RegisterMap>(
    regs: &mut R,
    ratio: u32,
) -> Result<(), Error<R::Error>> {
    let Some(value) = bclk_ratio_field(ratio) else {
        error!("Unsupported bclk ratio {}", ratio);
        return Err(Error::UnsupportedBclkRatio(ratio));
    };
    regs.update_bits(reg::R_DACSR, reg::RM_DACSR_DBCM, value)
        .map_err(Error::Bus)?;
    regs.update_bits(reg::R_ADCSR, reg::RM_ADCSR_ABCM, value)
        .map_err(Error::Bus)
}
