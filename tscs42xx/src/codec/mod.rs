//! TSCS42xx codec driver module.
//!
//! Register access ([`RegisterMap`], [`I2cRegisters`]), the PLL input
//! table, the reference-counted PLL sequencer, the coefficient RAM
//! protocol and the [`Tscs42xx`] driver that ties them together.

pub mod registers;
mod regmap;
mod clock;
pub mod pll;
mod power;
mod format;
pub mod coeff_ram;
mod coeff_map;
mod tscs42xx;

#[cfg(test)]
pub(crate) mod mock;

pub use clock::{ClockError, NoExternalClock, ReferenceClock, ReferenceClockSource};
pub use coeff_map::*;
pub use coeff_ram::CoeffRamSession;
pub use format::{SampleWidth, SUPPORTED_RATES};
pub use pll::{PllFamily, PllInputProfile, RegSetting};
pub use power::{PllClaim, PllSequencer};
pub use regmap::{I2cRegisters, RegisterMap};
pub use tscs42xx::{PllHold, Tscs42xx};
