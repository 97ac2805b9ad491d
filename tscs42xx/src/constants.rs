/// Time the part needs after a soft reset, in milliseconds.
pub const RESET_SETTLE_MS: u32 = 5;

/// Time the PLL and DAC path need to settle before startup images are
/// loaded, in milliseconds.
pub const IMAGE_LOAD_SETTLE_MS: u32 = 5;

/// Default number of PLL lock-status polls.
pub const PLL_LOCK_ATTEMPTS: u32 = 10;

/// Default delay between PLL lock-status polls, in microseconds.
pub const PLL_LOCK_INTERVAL_US: u32 = 1000;

/// Default number of coefficient RAM busy polls.
pub const RAM_BUSY_ATTEMPTS: u32 = 1000;

/// Default delay between coefficient RAM busy polls, in microseconds.
pub const RAM_BUSY_INTERVAL_US: u32 = 0;

/// Sample rate used to run the PLL when nothing else holds it.
pub const FALLBACK_SAMPLE_RATE: u32 = 48000;

/// Bytes per record in the control image (`register, value`).
pub const CONTROL_RECORD_BYTES: usize = 2;
