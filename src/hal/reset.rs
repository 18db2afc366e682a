//! Reset Controller HAL
//!
//! UMAC soft reset and the power/flush steps that surround it.

use embedded_hal::delay::DelayNs;

use crate::driver::error::{ConfigError, Result};
use crate::internal::constants::{
    DEFAULT_RESET_ATTEMPTS, RBUF_FLUSH_DELAY_US, RESET_POLL_INTERVAL_US,
};
use crate::internal::register::RegisterBlock;
use crate::internal::register::sys::{
    EXT_ENERGY_DET_MASK, EXT_PWR_DOWN_BIAS, EXT_PWR_DOWN_DLL, EXT_PWR_DOWN_PHY, EXT_PWR_MGMT,
    RBUF_FLUSH_RESET, SYS_RBUF_FLUSH_CTRL,
};
use crate::internal::register::umac::{UMAC_CMD, cmd};

// =============================================================================
// Reset Controller
// =============================================================================

/// Reset controller for the UMAC
#[derive(Debug)]
pub struct ResetController<R: RegisterBlock, D: DelayNs> {
    regs: R,
    delay: D,
    /// Polls of `UMAC_CMD` before giving up
    max_attempts: u32,
}

impl<R: RegisterBlock, D: DelayNs> ResetController<R, D> {
    /// Create a new reset controller
    pub fn new(regs: R, delay: D) -> Self {
        Self::with_attempts(regs, delay, DEFAULT_RESET_ATTEMPTS)
    }

    /// Create a new reset controller with a custom polling bound
    pub fn with_attempts(regs: R, delay: D, max_attempts: u32) -> Self {
        Self {
            regs,
            delay,
            max_attempts,
        }
    }

    /// Power up the PHY interface, DLL and bias blocks
    pub fn power_up(&self) {
        self.regs.clear_bits(
            EXT_PWR_MGMT,
            EXT_PWR_DOWN_PHY | EXT_PWR_DOWN_DLL | EXT_PWR_DOWN_BIAS | EXT_ENERGY_DET_MASK,
        );
    }

    /// Flush the receive buffer, then soft reset the UMAC.
    ///
    /// `SW_RESET` is written together with local loopback so the MAC has a
    /// clock while resetting. Fails with [`ConfigError::ResetTimeout`] if the
    /// bit is still set after the configured number of polls. `UMAC_CMD` is
    /// left cleared (TX and RX disabled) on success.
    pub fn soft_reset(&mut self) -> Result<()> {
        self.regs.set_bits(SYS_RBUF_FLUSH_CTRL, RBUF_FLUSH_RESET);
        self.delay.delay_us(RBUF_FLUSH_DELAY_US);
        self.regs.clear_bits(SYS_RBUF_FLUSH_CTRL, RBUF_FLUSH_RESET);
        self.delay.delay_us(RBUF_FLUSH_DELAY_US);

        self.regs.write(UMAC_CMD, cmd::SW_RESET | cmd::LCL_LOOP_EN);

        let mut attempts = 0;
        while self.is_reset_in_progress() {
            if attempts >= self.max_attempts {
                return Err(ConfigError::ResetTimeout.into());
            }
            self.delay.delay_us(RESET_POLL_INTERVAL_US);
            attempts += 1;
        }

        self.regs.write(UMAC_CMD, 0);
        Ok(())
    }

    /// Check if a reset is currently in progress
    pub fn is_reset_in_progress(&self) -> bool {
        (self.regs.read(UMAC_CMD) & cmd::SW_RESET) != 0
    }

    /// Polling bound
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
