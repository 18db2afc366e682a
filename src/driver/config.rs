//! Configuration types for the GENET driver

use crate::internal::constants::{
    DEFAULT_MDIO_ATTEMPTS, DEFAULT_PHY_ADDR, DEFAULT_RESET_ATTEMPTS, GENET_IRQ, MAC_ADDR_LEN,
    MAX_FRAME_SIZE,
};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    #[default]
    Mbps1000,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// Combined speed/duplex value reported to the network stack.
///
/// `Unknown` while the link is down or before initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSpeed {
    /// Link down or not yet negotiated
    #[default]
    Unknown,
    /// 10 Mbps half duplex
    Speed10Half,
    /// 10 Mbps full duplex
    Speed10Full,
    /// 100 Mbps half duplex
    Speed100Half,
    /// 100 Mbps full duplex
    Speed100Full,
    /// 1000 Mbps half duplex
    Speed1000Half,
    /// 1000 Mbps full duplex
    Speed1000Full,
}

impl LinkSpeed {
    /// Combine a negotiated speed and duplex
    pub const fn from_parts(speed: Speed, duplex: Duplex) -> Self {
        match (speed, duplex) {
            (Speed::Mbps10, Duplex::Half) => LinkSpeed::Speed10Half,
            (Speed::Mbps10, Duplex::Full) => LinkSpeed::Speed10Full,
            (Speed::Mbps100, Duplex::Half) => LinkSpeed::Speed100Half,
            (Speed::Mbps100, Duplex::Full) => LinkSpeed::Speed100Full,
            (Speed::Mbps1000, Duplex::Half) => LinkSpeed::Speed1000Half,
            (Speed::Mbps1000, Duplex::Full) => LinkSpeed::Speed1000Full,
        }
    }

    /// Nominal bit rate in Mbps, 0 when unknown
    pub const fn mbps(self) -> u32 {
        match self {
            LinkSpeed::Unknown => 0,
            LinkSpeed::Speed10Half | LinkSpeed::Speed10Full => 10,
            LinkSpeed::Speed100Half | LinkSpeed::Speed100Full => 100,
            LinkSpeed::Speed1000Half | LinkSpeed::Speed1000Full => 1000,
        }
    }
}

/// Device lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not yet initialized
    #[default]
    Uninitialized,
    /// Initialized with MAC and DMA enabled
    Running,
    /// Initialized with MAC transmit/receive disabled
    Disabled,
}

/// Device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// MAC address; `None` keeps the address firmware left in the UMAC
    pub mac_address: Option<[u8; MAC_ADDR_LEN]>,
    /// MDIO address of the PHY
    pub phy_address: u8,
    /// Interrupt line registered with the interrupt substrate
    pub irq: u32,
    /// Maximum frame length programmed into the UMAC
    pub max_frame_length: u32,
    /// MDIO busy polls before `BusTimeout`
    pub mdio_attempts: u32,
    /// Soft reset polls before `ResetTimeout`
    pub reset_attempts: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: None,
            phy_address: DEFAULT_PHY_ADDR,
            irq: GENET_IRQ,
            max_frame_length: MAX_FRAME_SIZE as u32,
            mdio_attempts: DEFAULT_MDIO_ATTEMPTS,
            reset_attempts: DEFAULT_RESET_ATTEMPTS,
        }
    }

    /// Use a fixed MAC address instead of the firmware-provided one
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = Some(addr);
        self
    }

    /// Set the PHY MDIO address
    #[must_use]
    pub const fn with_phy_address(mut self, addr: u8) -> Self {
        self.phy_address = addr;
        self
    }

    /// Set the interrupt line
    #[must_use]
    pub const fn with_irq(mut self, irq: u32) -> Self {
        self.irq = irq;
        self
    }

    /// Set the maximum frame length
    #[must_use]
    pub const fn with_max_frame_length(mut self, len: u32) -> Self {
        self.max_frame_length = len;
        self
    }

    /// Set the MDIO polling bound
    #[must_use]
    pub const fn with_mdio_attempts(mut self, attempts: u32) -> Self {
        self.mdio_attempts = attempts;
        self
    }

    /// Set the soft reset polling bound
    #[must_use]
    pub const fn with_reset_attempts(mut self, attempts: u32) -> Self {
        self.reset_attempts = attempts;
        self
    }
}
