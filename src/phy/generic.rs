//! Generic PHY Types
//!
//! Link state types shared by PHY drivers, plus helpers over the IEEE 802.3
//! Clause 22 standard registers.

use crate::driver::config::{Duplex, LinkSpeed, Speed};
use crate::driver::error::{ConfigError, Result};
use crate::hal::mdio::MdioBus;

// =============================================================================
// Link Status
// =============================================================================

/// Negotiated link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 1000 Mbps Full Duplex
    pub const fn gigabit_full() -> Self {
        Self::new(Speed::Mbps1000, Duplex::Full)
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }

    /// Facade speed value
    pub const fn link_speed(&self) -> LinkSpeed {
        LinkSpeed::from_parts(self.speed, self.duplex)
    }
}

/// Link state as observed by PHY polling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No link partner, or auto-negotiation not complete
    #[default]
    Down,
    /// Link established with the given parameters
    Up(LinkStatus),
}

impl LinkState {
    /// Whether the link is up
    pub const fn is_up(&self) -> bool {
        matches!(self, LinkState::Up(_))
    }

    /// Facade speed value (`Unknown` while down)
    pub const fn link_speed(&self) -> LinkSpeed {
        match self {
            LinkState::Down => LinkSpeed::Unknown,
            LinkState::Up(status) => status.link_speed(),
        }
    }
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::internal::phy_regs::{bmcr, bmsr, phy_reg};

    /// Read BMSR twice and check link status and AN complete.
    ///
    /// The link bit is latched low, so the first read only reports whether the
    /// link dropped since the last read.
    pub fn is_link_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let _latched = mdio.read(phy_addr, phy_reg::BMSR)?;
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        let required = bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        Ok(bmsr_val & required == required)
    }

    /// Enable auto-negotiation and restart
    pub fn restart_auto_negotiation<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(
            phy_addr,
            phy_reg::BMCR,
            (bmcr_val | bmcr::AN_ENABLE | bmcr::AN_RESTART) & !(bmcr::ISOLATE | bmcr::POWER_DOWN),
        )
    }

    /// Soft reset via BMCR, then wait for the bit to self-clear.
    ///
    /// Fails with `ResetTimeout` if `max_polls` reads all still show it set.
    pub fn soft_reset<M: MdioBus>(mdio: &mut M, phy_addr: u8, max_polls: u32) -> Result<()> {
        mdio.write(phy_addr, phy_reg::BMCR, bmcr::RESET)?;

        for _ in 0..max_polls {
            let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
            if bmcr_val & bmcr::RESET == 0 {
                return Ok(());
            }
        }
        Err(ConfigError::ResetTimeout.into())
    }

    /// Read PHY ID from PHYSID1 and PHYSID2
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = u32::from(mdio.read(phy_addr, phy_reg::PHYSID1)?);
        let id2 = u32::from(mdio.read(phy_addr, phy_reg::PHYSID2)?);
        Ok((id1 << 16) | id2)
    }
}
