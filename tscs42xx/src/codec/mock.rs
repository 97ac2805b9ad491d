//! Test doubles for the register map, I2C bus, delay and clock provider.

extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

use super::clock::{ClockError, ReferenceClock};
use super::registers as reg;
use super::regmap::RegisterMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

// ── Register file with a simulated coefficient RAM ────────────────────────

/// Register file that records writes and models the PLL lock status, the
/// coefficient RAM busy flag and the coefficient RAM itself.
pub struct MockRegs {
    regs: [u8; 256],
    log: Vec<(u8, u8)>,
    reads: usize,
    bursts: usize,
    burst: bool,
    /// Reads of `R_PLLCTL0` that return "not locked" before lock.
    unlocked_reads: usize,
    never_lock: bool,
    /// Reads of `R_DACCRSTAT` that return "busy" before each idle read.
    busy_reads: usize,
    busy_left: usize,
    always_busy: bool,
    fail_write_addr: Option<u8>,
    fail_read_addr: Option<u8>,
    /// Fail the nth write (0-based) from now on.
    fail_write_index: Option<usize>,
    ram: [u32; 256],
    ram_addr: u8,
    wr: [u8; 3],
    rd: [u8; 3],
}

impl MockRegs {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            log: Vec::new(),
            reads: 0,
            bursts: 0,
            burst: false,
            unlocked_reads: 0,
            never_lock: false,
            busy_reads: 0,
            busy_left: 0,
            always_busy: false,
            fail_write_addr: None,
            fail_read_addr: None,
            fail_write_index: None,
            ram: [0; 256],
            ram_addr: 0,
            wr: [0; 3],
            rd: [0; 3],
        }
    }

    pub fn with_burst(mut self) -> Self {
        self.burst = true;
        self
    }

    pub fn get(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    pub fn set(&mut self, addr: u8, value: u8) {
        self.regs[addr as usize] = value;
    }

    pub fn ram(&self, addr: u8) -> u32 {
        self.ram[addr as usize]
    }

    pub fn set_ram(&mut self, addr: u8, word: u32) {
        self.ram[addr as usize] = word & 0x00FF_FFFF;
    }

    pub fn write_count(&self) -> usize {
        self.log.len()
    }

    pub fn write_at(&self, idx: usize) -> (u8, u8) {
        self.log[idx]
    }

    pub fn writes(&self) -> &[(u8, u8)] {
        &self.log
    }

    /// Writes to one register, in order.
    pub fn writes_to(&self, addr: u8) -> Vec<u8> {
        self.log
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Position of the first write to `addr` for which `pred` holds.
    pub fn position(&self, addr: u8, pred: impl Fn(u8) -> bool) -> Option<usize> {
        self.log.iter().position(|(a, v)| *a == addr && pred(*v))
    }

    pub fn read_count(&self) -> usize {
        self.reads
    }

    pub fn burst_count(&self) -> usize {
        self.bursts
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.reads = 0;
        self.bursts = 0;
    }

    pub fn lock_after(&mut self, unlocked_reads: usize) {
        self.unlocked_reads = unlocked_reads;
    }

    pub fn never_lock(&mut self) {
        self.never_lock = true;
    }

    pub fn busy_for(&mut self, reads: usize) {
        self.busy_reads = reads;
        self.busy_left = reads;
    }

    pub fn always_busy(&mut self) {
        self.always_busy = true;
    }

    pub fn fail_writes_to(&mut self, addr: u8) {
        self.fail_write_addr = Some(addr);
    }

    pub fn fail_reads_from(&mut self, addr: u8) {
        self.fail_read_addr = Some(addr);
    }

    /// Fail the `n`th write issued after this call (0-based).
    pub fn fail_nth_write(&mut self, n: usize) {
        self.fail_write_index = Some(self.log.len() + n);
    }

    pub fn clear_faults(&mut self) {
        self.fail_write_addr = None;
        self.fail_read_addr = None;
        self.fail_write_index = None;
        self.never_lock = false;
        self.always_busy = false;
    }
}

impl RegisterMap for MockRegs {
    type Error = MockError;

    fn read(&mut self, addr: u8) -> Result<u8, MockError> {
        if self.fail_read_addr == Some(addr) {
            return Err(MockError);
        }
        self.reads += 1;
        let value = match addr {
            reg::R_PLLCTL0 => {
                if self.never_lock {
                    0
                } else if self.unlocked_reads > 0 {
                    self.unlocked_reads -= 1;
                    0
                } else {
                    1
                }
            }
            reg::R_DACCRSTAT => {
                if self.always_busy {
                    1
                } else if self.busy_left > 0 {
                    self.busy_left -= 1;
                    1
                } else {
                    self.busy_left = self.busy_reads;
                    0
                }
            }
            reg::R_DACCRRDL => self.rd[0],
            reg::R_DACCRRDM => self.rd[1],
            reg::R_DACCRRDH => self.rd[2],
            _ => self.regs[addr as usize],
        };
        Ok(value)
    }

    fn write(&mut self, addr: u8, value: u8) -> Result<(), MockError> {
        if self.fail_write_addr == Some(addr) || self.fail_write_index == Some(self.log.len()) {
            return Err(MockError);
        }
        self.log.push((addr, value));
        self.regs[addr as usize] = value;
        match addr {
            reg::R_DACCRADDR => {
                self.ram_addr = value;
                let word = self.ram[value as usize];
                self.rd = [word as u8, (word >> 8) as u8, (word >> 16) as u8];
            }
            reg::R_DACCRWRL => self.wr[0] = value,
            reg::R_DACCRWRM => self.wr[1] = value,
            reg::R_DACCRWRH => {
                // Writing the MSB commits the word and advances the address.
                self.wr[2] = value;
                let word = self.wr[0] as u32 | (self.wr[1] as u32) << 8 | (self.wr[2] as u32) << 16;
                self.ram[self.ram_addr as usize] = word;
                self.ram_addr = self.ram_addr.wrapping_add(1);
            }
            _ => {}
        }
        Ok(())
    }

    fn supports_burst(&self) -> bool {
        self.burst
    }

    fn burst_write(&mut self, addr: u8, data: &[u8]) -> Result<(), MockError> {
        self.bursts += 1;
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr + offset as u8, *byte)?;
        }
        Ok(())
    }

    fn burst_read(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.bursts += 1;
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read(addr + offset as u8)?;
        }
        Ok(())
    }
}

// ── I2C bus with a flat register file ─────────────────────────────────────

pub struct MockI2c {
    regs: [u8; 256],
    pointer: u8,
    last_address: Option<u8>,
    writes: usize,
    transactions: usize,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            pointer: 0,
            last_address: None,
            writes: 0,
            transactions: 0,
        }
    }

    pub fn get(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    pub fn set(&mut self, addr: u8, value: u8) {
        self.regs[addr as usize] = value;
    }

    pub fn last_address(&self) -> Option<u8> {
        self.last_address
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn transactions(&self) -> usize {
        self.transactions
    }

    fn store(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.regs[self.pointer as usize] = *b;
            self.pointer = self.pointer.wrapping_add(1);
        }
    }

    fn load(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.regs[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn read(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.last_address = Some(addr);
        self.load(buf);
        Ok(())
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.last_address = Some(addr);
        self.writes += 1;
        if let Some((first, rest)) = bytes.split_first() {
            self.pointer = *first;
            self.store(rest);
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), Self::Error> {
        self.last_address = Some(addr);
        if let Some(first) = wr.first() {
            self.pointer = *first;
        }
        self.load(rd);
        Ok(())
    }

    fn transaction(
        &mut self,
        addr: u8,
        ops: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.last_address = Some(addr);
        self.transactions += 1;
        let mut pointer_set = false;
        for op in ops.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let mut data: &[u8] = *bytes;
                    if !pointer_set {
                        if let Some((first, rest)) = data.split_first() {
                            self.pointer = *first;
                            data = rest;
                            pointer_set = true;
                        }
                    }
                    self.store(data);
                }
                Operation::Read(buf) => self.load(buf),
            }
        }
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────────────────

/// Delay that returns immediately and accumulates the requested time.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// ── External clock provider ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub rate: Option<u32>,
    pub enabled: bool,
    pub enables: usize,
    pub disables: usize,
    pub fail: bool,
}

impl ReferenceClock for MockClock {
    fn set_rate(&mut self, hz: u32) -> Result<(), ClockError> {
        if self.fail {
            return Err(ClockError);
        }
        self.rate = Some(hz);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), ClockError> {
        if self.fail {
            return Err(ClockError);
        }
        self.enabled = true;
        self.enables += 1;
        Ok(())
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }
}
