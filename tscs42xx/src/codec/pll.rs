//! PLL input profiles and output families.
//!
//! Each supported reference frequency has a fixed list of 13 masked
//! register writes that program the PLL dividers. Lookup is exact: a
//! frequency that is not in [`PLL_PROFILES`] cannot be clocked.
//!
//! The two PLLs produce the master clocks for the two sample-rate
//! families: PLL1 runs at 122.88 MHz for the 48 kHz family and PLL2 at
//! 112.896 MHz for the 44.1 kHz family.

use super::registers as reg;
use super::regmap::RegisterMap;
use crate::error::Error;

/// One masked register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegSetting {
    /// Register address.
    pub addr: u8,
    /// Value to place under `mask`.
    pub value: u8,
    /// Bits of the register that are changed.
    pub mask: u8,
}

/// Number of register writes in every [`PllInputProfile`].
pub const PLL_SETTINGS_COUNT: usize = 13;

/// PLL divider settings for one reference frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllInputProfile {
    /// Reference frequency in Hz.
    pub input_frequency: u32,
    /// Writes to issue, in order. `R_PLLCTL1B` appears twice (low nibble
    /// first, high nibble later) and the order must be kept.
    pub settings: [RegSetting; PLL_SETTINGS_COUNT],
}

#[allow(clippy::too_many_arguments)]
const fn profile(
    input_frequency: u32,
    rt: u8,
    rd: u8,
    r1b_l: u8,
    r9: u8,
    ra: u8,
    rb: u8,
    rc: u8,
    r12: u8,
    r1b_h: u8,
    re: u8,
    rf: u8,
    r10: u8,
    r11: u8,
) -> PllInputProfile {
    const fn s(addr: u8, value: u8, mask: u8) -> RegSetting {
        RegSetting { addr, value, mask }
    }
    PllInputProfile {
        input_frequency,
        settings: [
            s(reg::R_TIMEBASE, rt, 0xFF),
            s(reg::R_PLLCTLD, rd, 0xFF),
            s(reg::R_PLLCTL1B, r1b_l, 0x0F),
            s(reg::R_PLLCTL9, r9, 0xFF),
            s(reg::R_PLLCTLA, ra, 0xFF),
            s(reg::R_PLLCTLB, rb, 0xFF),
            s(reg::R_PLLCTLC, rc, 0xFF),
            s(reg::R_PLLCTL12, r12, 0xFF),
            s(reg::R_PLLCTL1B, r1b_h, 0xF0),
            s(reg::R_PLLCTLE, re, 0xFF),
            s(reg::R_PLLCTLF, rf, 0xFF),
            s(reg::R_PLLCTL10, r10, 0xFF),
            s(reg::R_PLLCTL11, r11, 0xFF),
        ],
    }
}

/// Every supported PLL reference frequency.
#[rustfmt::skip]
pub static PLL_PROFILES: [PllInputProfile; 23] = [
    profile(1_411_200, 0x05, 0x39, 0x04, 0x07, 0x02, 0xC3, 0x04, 0x1B, 0x10, 0x03, 0x03, 0xD0, 0x02),
    profile(1_536_000, 0x05, 0x1A, 0x04, 0x02, 0x03, 0xE0, 0x01, 0x1A, 0x10, 0x02, 0x03, 0xB9, 0x01),
    profile(2_822_400, 0x0A, 0x23, 0x04, 0x07, 0x04, 0xC3, 0x04, 0x22, 0x10, 0x05, 0x03, 0x58, 0x02),
    profile(3_072_000, 0x0B, 0x22, 0x04, 0x07, 0x03, 0x48, 0x03, 0x1A, 0x10, 0x04, 0x03, 0xB9, 0x01),
    profile(5_644_800, 0x15, 0x23, 0x04, 0x0E, 0x04, 0xC3, 0x04, 0x1A, 0x10, 0x08, 0x03, 0xE0, 0x01),
    profile(6_144_000, 0x17, 0x1A, 0x04, 0x08, 0x03, 0xE0, 0x01, 0x1A, 0x10, 0x08, 0x03, 0xB9, 0x01),
    profile(12_000_000, 0x2E, 0x1B, 0x04, 0x19, 0x03, 0x00, 0x03, 0x2A, 0x10, 0x19, 0x05, 0x98, 0x04),
    profile(19_200_000, 0x4A, 0x13, 0x04, 0x14, 0x03, 0x80, 0x01, 0x1A, 0x10, 0x19, 0x03, 0xB9, 0x01),
    profile(22_000_000, 0x55, 0x2A, 0x04, 0x37, 0x05, 0x00, 0x06, 0x22, 0x10, 0x26, 0x03, 0x49, 0x02),
    profile(22_579_200, 0x57, 0x22, 0x04, 0x31, 0x03, 0x20, 0x03, 0x1A, 0x10, 0x1D, 0x03, 0xB3, 0x01),
    profile(24_000_000, 0x5D, 0x13, 0x04, 0x19, 0x03, 0x80, 0x01, 0x1B, 0x10, 0x19, 0x05, 0x4C, 0x02),
    profile(24_576_000, 0x5F, 0x13, 0x04, 0x1D, 0x03, 0xB3, 0x01, 0x22, 0x10, 0x40, 0x03, 0x72, 0x03),
    profile(27_000_000, 0x68, 0x22, 0x04, 0x4B, 0x03, 0x00, 0x04, 0x2A, 0x10, 0x7D, 0x03, 0x20, 0x06),
    profile(36_000_000, 0x8C, 0x1B, 0x04, 0x4B, 0x03, 0x00, 0x03, 0x2A, 0x10, 0x7D, 0x03, 0x98, 0x04),
    profile(25_000_000, 0x61, 0x1B, 0x04, 0x37, 0x03, 0x2B, 0x03, 0x1A, 0x10, 0x2A, 0x03, 0x39, 0x02),
    profile(26_000_000, 0x65, 0x23, 0x04, 0x41, 0x05, 0x00, 0x06, 0x1A, 0x10, 0x26, 0x03, 0xEF, 0x01),
    profile(12_288_000, 0x2F, 0x1A, 0x04, 0x12, 0x03, 0x1C, 0x02, 0x22, 0x10, 0x20, 0x03, 0x72, 0x03),
    profile(40_000_000, 0x9B, 0x22, 0x08, 0x7D, 0x03, 0x80, 0x04, 0x23, 0x10, 0x7D, 0x05, 0xE4, 0x06),
    profile(512_000, 0x01, 0x22, 0x04, 0x01, 0x03, 0xD0, 0x02, 0x1B, 0x10, 0x01, 0x04, 0x72, 0x03),
    profile(705_600, 0x02, 0x22, 0x04, 0x02, 0x03, 0x15, 0x04, 0x22, 0x10, 0x01, 0x04, 0x80, 0x02),
    profile(1_024_000, 0x03, 0x22, 0x04, 0x02, 0x03, 0xD0, 0x02, 0x1B, 0x10, 0x02, 0x04, 0x72, 0x03),
    profile(2_048_000, 0x07, 0x22, 0x04, 0x04, 0x03, 0xD0, 0x02, 0x1B, 0x10, 0x04, 0x04, 0x72, 0x03),
    profile(2_400_000, 0x08, 0x22, 0x04, 0x05, 0x03, 0x00, 0x03, 0x23, 0x10, 0x05, 0x05, 0x98, 0x04),
];

/// Look up the profile for an exact reference frequency.
pub fn select(input_frequency: u32) -> Option<&'static PllInputProfile> {
    PLL_PROFILES
        .iter()
        .find(|p| p.input_frequency == input_frequency)
}

/// Apply a profile's settings in order.
///
/// Stops at the first failing write and reports its register. Writes
/// already issued are left in place.
pub fn apply<R: RegisterMap>(
    regs: &mut R,
    profile: &PllInputProfile,
) -> Result<(), Error<R::Error>> {
    for setting in &profile.settings {
        regs.update_bits(setting.addr, setting.mask, setting.value)
            .map_err(|source| {
                error!("Failed to set pll ctl {:#x}", setting.addr);
                Error::PllSetting {
                    addr: setting.addr,
                    source,
                }
            })?;
    }
    Ok(())
}

// ── Output families ────────────────────────────────────────────────────────

/// PLL output frequency family, derived from the sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllFamily {
    /// 8/16/24/32/48/96 kHz, generated by PLL1 at 122.88 MHz.
    Family48k,
    /// 11.025/22.05/44.1/88.2 kHz, generated by PLL2 at 112.896 MHz.
    Family44_1k,
}

impl PllFamily {
    /// The family a sample rate belongs to.
    pub fn for_rate(rate: u32) -> Option<Self> {
        match rate {
            8000 | 16000 | 24000 | 32000 | 48000 | 96000 => Some(PllFamily::Family48k),
            11025 | 22050 | 44100 | 88200 => Some(PllFamily::Family44_1k),
            _ => None,
        }
    }

    /// PLL output frequency in Hz.
    pub fn output_frequency(self) -> u32 {
        match self {
            PllFamily::Family48k => 122_880_000,
            PllFamily::Family44_1k => 112_896_000,
        }
    }

    /// `(mask, value)` that powers this family's PLL in `R_PLLCTL1C`.
    pub(crate) fn enable_bits(self) -> (u8, u8) {
        match self {
            PllFamily::Family48k => (reg::RM_PLLCTL1C_PDB_PLL1, reg::RV_PLLCTL1C_PDB_PLL1_ENABLE),
            PllFamily::Family44_1k => (reg::RM_PLLCTL1C_PDB_PLL2, reg::RV_PLLCTL1C_PDB_PLL2_ENABLE),
        }
    }
}
