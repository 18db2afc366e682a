//! MDIO (Management Data Input/Output) HAL
//!
//! Clause 22 PHY register access through the UMAC's hardware MDIO engine.
//! Every transaction busy-polls `UMAC_MDIO_CMD` with a bounded number of
//! attempts; exceeding the bound is reported as [`IoError::BusTimeout`] and
//! never retried here.

use embedded_hal::delay::DelayNs;

use crate::driver::error::{ConfigError, IoError, Result};
use crate::internal::constants::{
    DEFAULT_MDIO_ATTEMPTS, MAX_PHY_ADDR, MAX_PHY_REG, MDIO_POLL_INTERVAL_US,
};
use crate::internal::register::RegisterBlock;
use crate::internal::register::umac::{UMAC_MDIO_CMD, mdio};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// Implemented by [`MdioController`] for the GENET MDIO engine, and by mocks
/// in tests.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if the MDIO bus is busy
    fn is_busy(&self) -> bool;
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// MDIO controller driving `UMAC_MDIO_CMD`
#[derive(Debug)]
pub struct MdioController<R: RegisterBlock, D: DelayNs> {
    regs: R,
    delay: D,
    max_attempts: u32,
}

impl<R: RegisterBlock, D: DelayNs> MdioController<R, D> {
    /// Create a controller with the default polling bound
    pub fn new(regs: R, delay: D) -> Self {
        Self::with_attempts(regs, delay, DEFAULT_MDIO_ATTEMPTS)
    }

    /// Create a controller that gives up after `max_attempts` busy polls
    pub fn with_attempts(regs: R, delay: D, max_attempts: u32) -> Self {
        Self {
            regs,
            delay,
            max_attempts,
        }
    }

    /// Poll until the engine is idle, returning the final command register
    fn wait_not_busy(&mut self) -> Result<u32> {
        let mut attempts = 0;
        loop {
            let value = self.regs.read(UMAC_MDIO_CMD);
            if value & mdio::START_BUSY == 0 {
                return Ok(value);
            }
            if attempts >= self.max_attempts {
                return Err(IoError::BusTimeout.into());
            }
            self.delay.delay_us(MDIO_POLL_INTERVAL_US);
            attempts += 1;
        }
    }

    fn validate(phy_addr: u8, reg_addr: u8) -> Result<()> {
        if phy_addr > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress.into());
        }
        if reg_addr > MAX_PHY_REG {
            return Err(IoError::InvalidRegister.into());
        }
        Ok(())
    }

    fn command(op: u32, phy_addr: u8, reg_addr: u8) -> u32 {
        mdio::START_BUSY
            | op
            | (u32::from(phy_addr) << mdio::PMD_SHIFT)
            | (u32::from(reg_addr) << mdio::REG_SHIFT)
    }
}

impl<R: RegisterBlock, D: DelayNs> MdioBus for MdioController<R, D> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        Self::validate(phy_addr, reg_addr)?;
        self.wait_not_busy()?;

        self.regs
            .write(UMAC_MDIO_CMD, Self::command(mdio::OP_READ, phy_addr, reg_addr));

        let value = self.wait_not_busy()?;
        if value & mdio::READ_FAIL != 0 {
            return Err(IoError::MdioReadFail.into());
        }
        Ok((value & mdio::DATA_MASK) as u16)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        Self::validate(phy_addr, reg_addr)?;
        self.wait_not_busy()?;

        let command = Self::command(mdio::OP_WRITE, phy_addr, reg_addr) | u32::from(value);
        self.regs.write(UMAC_MDIO_CMD, command);

        self.wait_not_busy().map(|_| ())
    }

    fn is_busy(&self) -> bool {
        self.regs.read(UMAC_MDIO_CMD) & mdio::START_BUSY != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::Error;
    use crate::internal::phy_regs::phy_reg;
    use crate::testing::{MockDelay, MockRegisters, TEST_PHY_ADDR};

    #[test]
    fn read_returns_phy_register() {
        let regs = MockRegisters::genet_v5();
        let mut mdio = MdioController::new(&regs, MockDelay::new());

        assert_eq!(mdio.read(TEST_PHY_ADDR, phy_reg::PHYSID1).unwrap(), 0x600D);
        assert_eq!(mdio.read(TEST_PHY_ADDR, phy_reg::PHYSID2).unwrap(), 0x84A2);
    }

    #[test]
    fn read_encodes_command_fields() {
        let regs = MockRegisters::genet_v5();
        let mut mdio = MdioController::new(&regs, MockDelay::new());

        mdio.read(TEST_PHY_ADDR, phy_reg::BMSR).unwrap();

        let expected = mdio::START_BUSY
            | mdio::OP_READ
            | (u32::from(TEST_PHY_ADDR) << mdio::PMD_SHIFT)
            | (u32::from(phy_reg::BMSR) << mdio::REG_SHIFT);
        assert_eq!(regs.writes_to(UMAC_MDIO_CMD), [expected]);
    }

    #[test]
    fn write_updates_phy_register() {
        let regs = MockRegisters::genet_v5();
        let mut mdio = MdioController::new(&regs, MockDelay::new());

        mdio.write(TEST_PHY_ADDR, phy_reg::ANAR, 0x01E1).unwrap();

        assert_eq!(regs.with_phy(|phy| phy.get(TEST_PHY_ADDR, phy_reg::ANAR)), 0x01E1);
        let command = regs.writes_to(UMAC_MDIO_CMD)[0];
        assert_eq!(command & mdio::OP_WRITE, mdio::OP_WRITE);
        assert_eq!(command & mdio::DATA_MASK, 0x01E1);
    }

    #[test]
    fn busy_bus_times_out_after_bounded_polls() {
        let regs = MockRegisters::genet_v5();
        regs.set_mdio_stuck(true);
        let mut delay = MockDelay::new();
        let mut mdio = MdioController::with_attempts(&regs, &mut delay, 5);

        let result = mdio.read(TEST_PHY_ADDR, phy_reg::BMSR);

        assert_eq!(result, Err(Error::Io(IoError::BusTimeout)));
        drop(mdio);
        assert_eq!(delay.calls(), 5);
        assert_eq!(delay.total_us(), 5 * u64::from(MDIO_POLL_INTERVAL_US));
    }

    #[test]
    fn stuck_before_start_times_out_without_issuing_command() {
        let regs = MockRegisters::genet_v5();
        regs.set(UMAC_MDIO_CMD, mdio::START_BUSY);
        let mut mdio = MdioController::with_attempts(&regs, MockDelay::new(), 3);

        assert_eq!(
            mdio.write(TEST_PHY_ADDR, phy_reg::BMCR, 0),
            Err(Error::Io(IoError::BusTimeout))
        );
        assert!(regs.writes_to(UMAC_MDIO_CMD).is_empty());
        assert!(mdio.is_busy());
    }

    #[test]
    fn read_fail_is_reported() {
        let regs = MockRegisters::genet_v5();
        regs.set_mdio_read_fail(true);
        let mut mdio = MdioController::new(&regs, MockDelay::new());

        assert_eq!(
            mdio.read(TEST_PHY_ADDR, phy_reg::BMSR),
            Err(Error::Io(IoError::MdioReadFail))
        );
    }

    #[test]
    fn rejects_out_of_range_addresses() {
        let regs = MockRegisters::genet_v5();
        let mut mdio = MdioController::new(&regs, MockDelay::new());

        assert_eq!(
            mdio.read(32, phy_reg::BMSR),
            Err(Error::Config(ConfigError::InvalidPhyAddress))
        );
        assert_eq!(
            mdio.write(TEST_PHY_ADDR, 32, 0),
            Err(Error::Io(IoError::InvalidRegister))
        );
        assert!(regs.writes_to(UMAC_MDIO_CMD).is_empty());
    }

    #[test]
    fn idle_bus_is_not_busy() {
        let regs = MockRegisters::genet_v5();
        let mdio = MdioController::new(&regs, MockDelay::new());
        assert!(!mdio.is_busy());
    }
}
