//! BCM54213PE PHY Driver
//!
//! Driver for the Broadcom BCM54213PE 10/100/1000 PHY attached to GENET over
//! RGMII on the Raspberry Pi 4.
//!
//! Link detection uses the standard BMSR bits. The negotiated speed and
//! duplex come from the vendor auxiliary status summary (register 0x19),
//! which reports the resolved mode directly instead of requiring the local
//! and link partner abilities to be intersected.
//!
//! # Example
//!
//! ```ignore
//! let mut phy = Bcm54213::new(1);
//! phy.init(&mut mdio)?;
//!
//! if let Some(LinkState::Up(link)) = phy.poll_link(&mut mdio)? {
//!     mac.apply_link_settings(&regs, link.speed, link.duplex);
//! }
//! ```

use crate::driver::config::{Duplex, Speed};
use crate::driver::error::{ConfigError, IoError, Result};
use crate::hal::mdio::MdioBus;
use crate::internal::constants::PHY_RESET_POLLS;
use crate::internal::logging::{debug, error, info};
use crate::internal::phy_regs::{
    BCM54213PE_PHY_ID, PHY_ID_MASK, anar, aux_status, ctrl1000, phy_reg,
};

use super::generic::{LinkState, LinkStatus, ieee802_3};

/// BCM54213PE PHY driver
#[derive(Debug)]
pub struct Bcm54213 {
    /// PHY address (0-31)
    addr: u8,
    /// Last state reported by [`poll_link`](Self::poll_link)
    last: LinkState,
}

impl Bcm54213 {
    /// Create a new driver for the PHY at `addr`
    pub const fn new(addr: u8) -> Self {
        Self {
            addr,
            last: LinkState::Down,
        }
    }

    /// PHY address
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// Last observed link state
    pub const fn last_state(&self) -> LinkState {
        self.last
    }

    /// Verify the PHY responds, soft reset it, advertise every mode and
    /// restart auto-negotiation.
    ///
    /// An unpopulated MDIO address reads all zeros or all ones and is
    /// reported as [`ConfigError::HardwareNotPresent`]. Other identifiers are
    /// accepted since the Clause 22 registers used here are standard.
    pub fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        let id = ieee802_3::read_phy_id(mdio, self.addr)?;
        if id == 0 || id == 0xFFFF_FFFF {
            return Err(ConfigError::HardwareNotPresent.into());
        }
        if id & PHY_ID_MASK == BCM54213PE_PHY_ID {
            info!("BCM54213PE at MDIO address {}, rev {}", self.addr, id & 0xF);
        } else {
            info!("PHY {:#x} at MDIO address {}", id, self.addr);
        }

        ieee802_3::soft_reset(mdio, self.addr, PHY_RESET_POLLS).inspect_err(|_| {
            error!("PHY {} soft reset did not complete", self.addr);
        })?;

        mdio.write(self.addr, phy_reg::ANAR, anar::ALL_10_100 | anar::PAUSE)?;
        let ctrl = mdio.read(self.addr, phy_reg::CTRL1000)?;
        mdio.write(
            self.addr,
            phy_reg::CTRL1000,
            ctrl | ctrl1000::ADV_1000FULL | ctrl1000::ADV_1000HALF,
        )?;
        ieee802_3::restart_auto_negotiation(mdio, self.addr)?;

        self.last = LinkState::Down;
        Ok(())
    }

    /// Read the current link state.
    ///
    /// Up only when BMSR reports both link and auto-negotiation complete; the
    /// speed and duplex are then decoded from the auxiliary status register.
    pub fn poll_link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<LinkState> {
        if !ieee802_3::is_link_up(mdio, self.addr)? {
            return Ok(LinkState::Down);
        }
        let (speed, duplex) = self.negotiated_speed_duplex(mdio)?;
        Ok(LinkState::Up(LinkStatus::new(speed, duplex)))
    }

    /// Decode the resolved link mode from the auxiliary status register
    pub fn negotiated_speed_duplex<M: MdioBus>(&self, mdio: &mut M) -> Result<(Speed, Duplex)> {
        let aux = mdio.read(self.addr, phy_reg::AUX_STATUS)?;
        decode_aux_mode((aux >> aux_status::LINKMODE_SHIFT) & aux_status::LINKMODE_MASK)
    }

    /// Poll for link transitions.
    ///
    /// Returns `Some(state)` when the state differs from the previous poll
    /// (including a speed/duplex change while up), `None` otherwise.
    pub fn poll_link<M: MdioBus>(&mut self, mdio: &mut M) -> Result<Option<LinkState>> {
        let state = self.poll_link_status(mdio)?;
        if state == self.last {
            return Ok(None);
        }
        debug!("PHY {} link state changed", self.addr);
        self.last = state;
        Ok(Some(state))
    }
}

/// Map the 3-bit auxiliary status link mode to speed and duplex
fn decode_aux_mode(mode: u16) -> Result<(Speed, Duplex)> {
    match mode {
        1 => Ok((Speed::Mbps10, Duplex::Half)),
        2 => Ok((Speed::Mbps10, Duplex::Full)),
        3 => Ok((Speed::Mbps100, Duplex::Half)),
        5 => Ok((Speed::Mbps100, Duplex::Full)),
        6 => Ok((Speed::Mbps1000, Duplex::Half)),
        7 => Ok((Speed::Mbps1000, Duplex::Full)),
        // 0: not resolved, 4: 100BASE-T4
        _ => Err(IoError::UnsupportedPhyMode.into()),
    }
}
