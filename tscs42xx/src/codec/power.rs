//! Reference-counted PLL power sequencing.
//!
//! Stream unmute and coefficient RAM access both need the PLLs running.
//! [`PllSequencer::power_up`] enables the PLL for the requested rate's
//! family, waits for lock and hands back a [`PllClaim`]. The claim is the
//! only way to call [`PllSequencer::power_down`], so every power-down is
//! matched to an earlier successful power-up. The PLLs are switched off
//! when the last claim is returned.

use embedded_hal::delay::DelayNs;

use super::pll::PllFamily;
use super::registers as reg;
use super::regmap::RegisterMap;
use crate::error::Error;

/// Proof of one successful PLL power-up.
///
/// Hand it back to [`PllSequencer::power_down`] to release the PLL.
#[must_use = "dropping a claim keeps the PLL powered forever"]
#[derive(Debug)]
pub struct PllClaim {
    family: PllFamily,
}

impl PllClaim {
    /// Family that was powered for this claim.
    pub fn family(&self) -> PllFamily {
        self.family
    }
}

/// PLL user count and lock-wait parameters.
#[derive(Debug)]
pub struct PllSequencer {
    users: u32,
    selected: Option<PllFamily>,
    lock_attempts: u32,
    lock_interval_us: u32,
}

impl PllSequencer {
    /// Create a sequencer with no users.
    ///
    /// `lock_attempts` lock-status reads are made, `lock_interval_us` apart.
    pub fn new(lock_attempts: u32, lock_interval_us: u32) -> Self {
        Self {
            users: 0,
            selected: None,
            lock_attempts,
            lock_interval_us,
        }
    }

    /// Number of outstanding claims.
    pub fn users(&self) -> u32 {
        self.users
    }

    /// Family most recently powered, `None` once all PLLs are off.
    pub fn selected(&self) -> Option<PllFamily> {
        self.selected
    }

    /// Power the PLL for `rate`'s family and wait for lock.
    ///
    /// On [`Error::PllLockTimeout`] the enable bit stays set and the user
    /// count is unchanged.
    pub fn power_up<R, D>(
        &mut self,
        regs: &mut R,
        delay: &mut D,
        rate: u32,
    ) -> Result<PllClaim, Error<R::Error>>
    where
        R: RegisterMap,
        D: DelayNs,
    {
        let Some(family) = PllFamily::for_rate(rate) else {
            error!("Unrecognized PLL output freq for {} Hz", rate);
            return Err(Error::UnsupportedRate(rate));
        };

        let (mask, value) = family.enable_bits();
        regs.update_bits(reg::R_PLLCTL1C, mask, value).map_err(|e| {
            error!("Failed to turn PLL on");
            Error::Bus(e)
        })?;

        if !self.wait_for_lock(regs, delay)? {
            error!("Failed to lock plls");
            return Err(Error::PllLockTimeout);
        }

        self.users += 1;
        self.selected = Some(family);
        debug!("PLL up for {} Hz, {} users", rate, self.users);
        Ok(PllClaim { family })
    }

    /// Release a claim; switch both PLLs off if it was the last one.
    pub fn power_down<R: RegisterMap>(
        &mut self,
        regs: &mut R,
        claim: PllClaim,
    ) -> Result<(), Error<R::Error>> {
        let PllClaim { .. } = claim;
        let Some(users) = self.users.checked_sub(1) else {
            error!("PLL user count underflow");
            return Err(Error::InvariantViolation);
        };
        self.users = users;
        if users > 0 {
            debug!("PLL still held by {} users", users);
            return Ok(());
        }

        self.selected = None;
        // Both bits are cleared whichever family was used.
        regs.update_bits(
            reg::R_PLLCTL1C,
            reg::RM_PLLCTL1C_PDB_PLL1,
            reg::RV_PLLCTL1C_PDB_PLL1_DISABLE,
        )
        .map_err(|e| {
            error!("Failed to turn PLL1 off");
            Error::Bus(e)
        })?;
        regs.update_bits(
            reg::R_PLLCTL1C,
            reg::RM_PLLCTL1C_PDB_PLL2,
            reg::RV_PLLCTL1C_PDB_PLL2_DISABLE,
        )
        .map_err(|e| {
            error!("Failed to turn PLL2 off");
            Error::Bus(e)
        })?;
        debug!("PLLs down");
        Ok(())
    }

    fn wait_for_lock<R, D>(&self, regs: &mut R, delay: &mut D) -> Result<bool, Error<R::Error>>
    where
        R: RegisterMap,
        D: DelayNs,
    {
        for _ in 0..self.lock_attempts {
            let status = regs.read(reg::R_PLLCTL0).map_err(|e| {
                error!("Failed to read PLL lock status");
                Error::Bus(e)
            })?;
            if status != 0 {
                return Ok(true);
            }
            delay.delay_us(self.lock_interval_us);
        }
        Ok(false)
    }
}
