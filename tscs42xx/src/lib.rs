//! # tscs42xx
//!
//! A `no_std` driver core for the Tempo Semiconductor TSCS42xx audio codec
//! (TSCS42A1 / TSCS42A2). It programs the PLLs from a board reference
//! clock, sequences PLL power so stream mute/unmute and DSP coefficient
//! updates never run without a locked clock, and moves DSP coefficients in
//! and out of the on-chip DAC coefficient RAM.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Bus | [`codec::RegisterMap`] / [`codec::I2cRegisters`] | 8-bit register access over `embedded-hal` I²C |
//! | Clock | [`codec::pll`] | Reference frequency → PLL divider settings |
//! | Power | [`codec::PllSequencer`] | Reference-counted PLL power with lock polling |
//! | DSP | [`codec::coeff_ram`] | Coefficient RAM handshake and scoped sessions |
//! | Driver | [`Tscs42xx`] / [`control`] | Stream format, rate, mute and startup |
//! | Sharing | [`shared`] | `spin::Mutex` wrapper for multi-context use |
//!
//! ## Quick start
//!
//! ```ignore
//! use tscs42xx::{Config, FirmwareImages, StreamDirection, Tscs42xx};
//!
//! let mut codec = Tscs42xx::new_i2c(i2c, delay, Config::crystal(12_000_000));
//! codec.verify_part()?;
//! codec.reset()?;
//! codec.init(FirmwareImages::new(COEFFS, CONTROLS))?;
//!
//! codec.set_stream_params(16, 48000)?;
//! codec.unmute(StreamDirection::Playback)?;
//!
//! // Update one EQ band while playing.
//! codec.write_biquad(tscs42xx::codec::Biquad::EQ1_CH0[0], coefficients)?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | Log messages and `defmt::Format` for public types |

#![no_std]

#[macro_use]
mod fmt;

pub mod constants;
pub mod error;
pub mod config;
pub mod control;
pub mod codec;
pub mod shared;

pub use codec::Tscs42xx;
pub use config::{Config, FirmwareImages};
pub use control::{CodecControl, DaiRole, StreamDirection};
pub use error::Error;
pub use shared::SharedTscs42xx;
