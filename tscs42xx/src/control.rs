/// Direction of an audio stream through the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamDirection {
    /// DAC path.
    Playback,
    /// ADC path.
    Capture,
}

/// Bit/frame clock role of the codec on the digital audio interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiRole {
    /// Codec drives BCLK and LRCLK.
    Master,
    /// Host drives BCLK and LRCLK.
    Slave,
}

/// Trait for codecs that stream audio over a digital audio interface.
pub trait CodecControl {
    /// Error type for control operations.
    type Error;

    /// Program the sample width in bits.
    fn set_stream_format(&mut self, bits: u8) -> Result<(), Self::Error>;

    /// Program the sample rate in Hz.
    fn set_stream_rate(&mut self, rate: u32) -> Result<(), Self::Error>;

    /// Silence a stream and release its clock.
    fn mute(&mut self, direction: StreamDirection) -> Result<(), Self::Error>;

    /// Acquire a stream's clock and let audio through.
    fn unmute(&mut self, direction: StreamDirection) -> Result<(), Self::Error>;
}
