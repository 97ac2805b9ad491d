//! Register access for the TSCS42xx.
//!
//! The driver core talks to the part only through [`RegisterMap`]. The
//! [`I2cRegisters`] adapter implements it over any
//! [`embedded_hal::i2c::I2c`] bus; tests substitute a register file.

use embedded_hal::i2c::{I2c, Operation};

use super::registers as reg;

/// Synchronous access to the codec's 8-bit register file.
pub trait RegisterMap {
    /// Transport error.
    type Error: core::fmt::Debug;

    /// Read one register.
    fn read(&mut self, addr: u8) -> Result<u8, Self::Error>;

    /// Write one register.
    fn write(&mut self, addr: u8, value: u8) -> Result<(), Self::Error>;

    /// Read-modify-write: `new = (current & !mask) | (value & mask)`.
    fn update_bits(&mut self, addr: u8, mask: u8, value: u8) -> Result<(), Self::Error> {
        let current = self.read(addr)?;
        self.write(addr, (current & !mask) | (value & mask))
    }

    /// Whether [`burst_write`](Self::burst_write) and
    /// [`burst_read`](Self::burst_read) move all bytes in one transfer.
    fn supports_burst(&self) -> bool {
        false
    }

    /// Write `data` to consecutive registers starting at `addr`.
    fn burst_write(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u8), *byte)?;
        }
        Ok(())
    }

    /// Read consecutive registers starting at `addr` into `buf`.
    fn burst_read(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read(addr.wrapping_add(offset as u8))?;
        }
        Ok(())
    }
}

impl<R: RegisterMap + ?Sized> RegisterMap for &mut R {
    type Error = R::Error;

    fn read(&mut self, addr: u8) -> Result<u8, Self::Error> {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write(addr, value)
    }

    fn update_bits(&mut self, addr: u8, mask: u8, value: u8) -> Result<(), Self::Error> {
        (**self).update_bits(addr, mask, value)
    }

    fn supports_burst(&self) -> bool {
        (**self).supports_burst()
    }

    fn burst_write(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).burst_write(addr, data)
    }

    fn burst_read(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).burst_read(addr, buf)
    }
}

/// [`RegisterMap`] over an I2C bus.
///
/// A register read is a write of the register address followed by a
/// one-byte read; a write is `[addr, value]`. Bursts rely on the part's
/// register address auto-increment and are off unless enabled with
/// [`with_burst`](Self::with_burst).
pub struct I2cRegisters<I2C> {
    i2c: I2C,
    address: u8,
    burst: bool,
}

impl<I2C: I2c> I2cRegisters<I2C> {
    /// Default I2C address (0x69).
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR_DEFAULT;

    /// Create an adapter at the default I2C address.
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, Self::DEFAULT_ADDRESS)
    }

    /// Create an adapter at a specific I2C address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            burst: false,
        }
    }

    /// Enable or disable multi-byte transfers.
    pub fn with_burst(mut self, burst: bool) -> Self {
        self.burst = burst;
        self
    }

    /// The 7-bit I2C address in use.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the adapter and return the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterMap for I2cRegisters<I2C> {
    type Error = I2C::Error;

    fn read(&mut self, addr: u8) -> Result<u8, Self::Error> {
        let mut val = [0u8; 1];
        self.i2c.write_read(self.address, &[addr], &mut val)?;
        Ok(val[0])
    }

    fn write(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[addr, value])
    }

    fn supports_burst(&self) -> bool {
        self.burst
    }

    fn burst_write(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        if !self.burst {
            for (offset, byte) in data.iter().enumerate() {
                self.write(addr.wrapping_add(offset as u8), *byte)?;
            }
            return Ok(());
        }
        // Adjacent writes in one transaction go out without a restart.
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[addr]), Operation::Write(data)],
        )
    }

    fn burst_read(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        if !self.burst {
            for (offset, byte) in buf.iter_mut().enumerate() {
                *byte = self.read(addr.wrapping_add(offset as u8))?;
            }
            return Ok(());
        }
        self.i2c.write_read(self.address, &[addr], buf)
    }
}
