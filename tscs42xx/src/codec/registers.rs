//! TSCS42xx register addresses and bitfield definitions.
//!
//! Taken from the Tempo Semiconductor TSCS42xx register map. Register
//! addresses are 8-bit; all registers hold 8-bit values.

// The volume, input-select and DSP control registers are defined for
// completeness; the driver core does not program them.
#![allow(dead_code)]

// ── I2C addresses ──────────────────────────────────────────────────────────

/// Default I2C address (ADDR pins strapped to 0b01).
pub const I2C_ADDR_DEFAULT: u8 = 0x69;

/// Lowest I2C address the part can be strapped to.
pub const I2C_ADDR_MIN: u8 = 0x68;

/// Highest I2C address the part can be strapped to.
pub const I2C_ADDR_MAX: u8 = 0x6B;

// ── Volumes ────────────────────────────────────────────────────────────────

pub const R_HPVOLL: u8 = 0x00;
pub const R_HPVOLR: u8 = 0x01;
pub const R_SPKVOLL: u8 = 0x02;
pub const R_SPKVOLR: u8 = 0x03;
pub const R_DACVOLL: u8 = 0x04;
pub const R_DACVOLR: u8 = 0x05;
pub const R_ADCVOLL: u8 = 0x06;
pub const R_ADCVOLR: u8 = 0x07;
pub const R_INVOLL: u8 = 0x08;
pub const R_INVOLR: u8 = 0x09;

// ── Input routing ──────────────────────────────────────────────────────────

pub const R_INMODE: u8 = 0x0B;
pub const R_INSELL: u8 = 0x0C;
pub const R_INSELR: u8 = 0x0D;

// ── Audio interface ────────────────────────────────────────────────────────

/// Audio interface control 1.
/// - Bit 5    — MS (0=slave, 1=master)
/// - Bits 3:2 — WL (0=16bit, 1=20bit, 2=24bit, 3=32bit)
/// - Bits 1:0 — FORMAT
pub const R_AIC1: u8 = 0x13;

pub const RM_AIC1_MS: u8 = 0x20;
pub const RV_AIC1_MS_MASTER: u8 = 0x20;
pub const RV_AIC1_MS_SLAVE: u8 = 0x00;

pub const RM_AIC1_WL: u8 = 0x0C;
pub const RV_AIC1_WL_16: u8 = 0x00;
pub const RV_AIC1_WL_20: u8 = 0x04;
pub const RV_AIC1_WL_24: u8 = 0x08;
pub const RV_AIC1_WL_32: u8 = 0x0C;

/// Audio interface control 2.
/// - Bits 5:4 — ADCDSEL (input channel map)
/// - Bit 3    — BLRCM (DAC/ADC share BCLK and LRCLK)
pub const R_AIC2: u8 = 0x14;

pub const RV_AIC2_BLRCM_DAC_BCLK_LRCLK_SHARED: u8 = 0x08;

// ── Converters ─────────────────────────────────────────────────────────────

/// ADC converter control.
/// - Bit 3 — ADCMU (ADC digital mute)
pub const R_CNVRTR0: u8 = 0x16;

pub const RM_CNVRTR0_ADCMU: u8 = 0x08;
pub const RV_CNVRTR0_ADCMU_ENABLE: u8 = 0x08;
pub const RV_CNVRTR0_ADCMU_DISABLE: u8 = 0x00;

/// ADC sample rate control. Same layout as [`R_DACSR`].
pub const R_ADCSR: u8 = 0x17;

/// DAC converter control.
/// - Bit 3 — DACMU (DAC digital mute)
pub const R_CNVRTR1: u8 = 0x18;

pub const RM_CNVRTR1_DACMU: u8 = 0x08;
pub const RV_CNVRTR1_DACMU_ENABLE: u8 = 0x08;
pub const RV_CNVRTR1_DACMU_DISABLE: u8 = 0x00;

/// DAC sample rate control.
/// - Bits 7:6 — DBCM (BCLK/LRCLK ratio: 0=auto, 1=32, 2=40, 3=64)
/// - Bits 4:3 — DBR (base rate: 0=32k, 1=44.1k, 2=48k)
/// - Bits 2:0 — DBM (base rate multiplier: 0=0.25, 1=0.5, 2=1, 3=2)
pub const R_DACSR: u8 = 0x19;

pub const RM_DACSR_DBCM: u8 = 0xC0;
pub const RV_DACSR_DBCM_AUTO: u8 = 0x00;
pub const RV_DACSR_DBCM_32: u8 = 0x40;
pub const RV_DACSR_DBCM_40: u8 = 0x80;
pub const RV_DACSR_DBCM_64: u8 = 0xC0;

pub const RM_DACSR_DBR: u8 = 0x18;
pub const RV_DACSR_DBR_32: u8 = 0x00;
pub const RV_DACSR_DBR_44_1: u8 = 0x08;
pub const RV_DACSR_DBR_48: u8 = 0x10;

pub const RM_DACSR_DBM: u8 = 0x07;
pub const RV_DACSR_DBM_PT25: u8 = 0x00;
pub const RV_DACSR_DBM_PT5: u8 = 0x01;
pub const RV_DACSR_DBM_1: u8 = 0x02;
pub const RV_DACSR_DBM_2: u8 = 0x03;

pub const RM_ADCSR_ABCM: u8 = 0xC0;
pub const RV_ADCSR_ABCM_64: u8 = 0xC0;
pub const RM_ADCSR_ABR: u8 = 0x18;
pub const RM_ADCSR_ABM: u8 = 0x07;

// ── Power management ───────────────────────────────────────────────────────

/// Power management 1.
/// - Bit 7 — BSTL, Bit 6 — BSTR, Bit 5 — PGAL, Bit 4 — PGAR
/// - Bit 3 — ADCL, Bit 2 — ADCR, Bit 1 — MICB
pub const R_PWRM1: u8 = 0x1A;

/// Power management 2.
/// - Bit 7 — INSELL, Bit 6 — INSELR
/// - Bit 4 — HPL (DAC left / headphone left path)
/// - Bit 3 — HPR, Bit 2 — SPKL, Bit 1 — SPKR, Bit 0 — VREF
pub const R_PWRM2: u8 = 0x1B;

pub const RM_PWRM2_HPL: u8 = 0x10;
pub const RV_PWRM2_HPL_ENABLE: u8 = 0x10;
pub const RV_PWRM2_HPL_DISABLE: u8 = 0x00;

// ── DSP control ────────────────────────────────────────────────────────────

pub const R_CONFIG0: u8 = 0x1F;
pub const R_CONFIG1: u8 = 0x20;
pub const R_DMICCTL: u8 = 0x24;
pub const R_CLECTL: u8 = 0x25;
pub const R_FXCTL: u8 = 0x39;

// ── DAC coefficient RAM window ─────────────────────────────────────────────

/// Coefficient write data, bits 7:0.
pub const R_DACCRWRL: u8 = 0x3A;
/// Coefficient write data, bits 15:8.
pub const R_DACCRWRM: u8 = 0x3B;
/// Coefficient write data, bits 23:16.
pub const R_DACCRWRH: u8 = 0x3C;
/// Coefficient read data, bits 7:0.
pub const R_DACCRRDL: u8 = 0x3D;
/// Coefficient read data, bits 15:8.
pub const R_DACCRRDM: u8 = 0x3E;
/// Coefficient read data, bits 23:16.
pub const R_DACCRRDH: u8 = 0x3F;
/// Coefficient RAM address.
pub const R_DACCRADDR: u8 = 0x40;

/// Coefficient RAM status; non-zero while a transfer is in progress.
pub const R_DACCRSTAT: u8 = 0x8A;

// ── PLL ────────────────────────────────────────────────────────────────────

pub const R_PLLCTL9: u8 = 0x4E;
pub const R_PLLCTLA: u8 = 0x4F;
pub const R_PLLCTLB: u8 = 0x50;
pub const R_PLLCTLC: u8 = 0x51;
pub const R_PLLCTLD: u8 = 0x52;
pub const R_PLLCTLE: u8 = 0x53;
pub const R_PLLCTLF: u8 = 0x54;
pub const R_PLLCTL10: u8 = 0x55;
pub const R_PLLCTL11: u8 = 0x56;
pub const R_PLLCTL12: u8 = 0x57;
pub const R_PLLCTL1B: u8 = 0x60;

/// PLL power control.
/// - Bit 2 — PDB_PLL2 (44.1 kHz family, 112.896 MHz)
/// - Bit 1 — PDB_PLL1 (48 kHz family, 122.88 MHz)
pub const R_PLLCTL1C: u8 = 0x61;

pub const RM_PLLCTL1C_PDB_PLL2: u8 = 0x04;
pub const RV_PLLCTL1C_PDB_PLL2_ENABLE: u8 = 0x04;
pub const RV_PLLCTL1C_PDB_PLL2_DISABLE: u8 = 0x00;
pub const RM_PLLCTL1C_PDB_PLL1: u8 = 0x02;
pub const RV_PLLCTL1C_PDB_PLL1_ENABLE: u8 = 0x02;
pub const RV_PLLCTL1C_PDB_PLL1_DISABLE: u8 = 0x00;

/// Time base divider for the internal housekeeping clock.
pub const R_TIMEBASE: u8 = 0x77;

/// PLL lock status; non-zero once the enabled PLLs have locked.
pub const R_PLLCTL0: u8 = 0x8E;

/// PLL reference select.
/// - Bits 6:4 — PLL2_REF_SEL (0=XTAL/MCLK1, 1=MCLK2)
/// - Bits 2:0 — PLL1_REF_SEL (0=XTAL/MCLK1, 1=MCLK2)
pub const R_PLLREFSEL: u8 = 0x8F;

pub const RV_PLLREFSEL_PLL1_REF_SEL_XTAL_MCLK1: u8 = 0x00;
pub const RV_PLLREFSEL_PLL1_REF_SEL_MCLK2: u8 = 0x01;
pub const RV_PLLREFSEL_PLL2_REF_SEL_XTAL_MCLK1: u8 = 0x00;
pub const RV_PLLREFSEL_PLL2_REF_SEL_MCLK2: u8 = 0x10;

// ── Identification / reset ─────────────────────────────────────────────────

pub const R_DEVIDL: u8 = 0x7D;
pub const R_DEVIDH: u8 = 0x7E;
pub const R_REVID: u8 = 0x7F;

/// Writing [`RV_RESET_ENABLE`] restores every register to its default.
pub const R_RESET: u8 = 0x80;
pub const RV_RESET_ENABLE: u8 = 0x85;

/// Device ID of the TSCS42A1.
pub const DEVID_TSCS42A1: u16 = 0x4A74;
/// Device ID of the TSCS42A2.
pub const DEVID_TSCS42A2: u16 = 0x4A73;

// ── Multiband compressor ───────────────────────────────────────────────────

pub const R_DACMBCEN: u8 = 0xC7;
/// Highest register address on the part.
pub const R_DACMBCREL3H: u8 = 0xE4;
