//! PHY Register Definitions
//!
//! Clause 22 registers used by the BCM54213PE driver, accessed over MDIO
//! rather than memory mapping.
//!
//! | Register | Name | Description |
//! |----------|------|-------------|
//! | 0 | BMCR | Basic Mode Control |
//! | 1 | BMSR | Basic Mode Status |
//! | 2 | PHYSID1 | PHY Identifier 1 |
//! | 3 | PHYSID2 | PHY Identifier 2 |
//! | 4 | ANAR | Auto-Negotiation Advertisement |
//! | 9 | CTRL1000 | 1000BASE-T Control |
//! | 25 | AUX_STATUS | Broadcom Auxiliary Status |

/// PHY register addresses
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0x00;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 0x01;
    /// PHY Identifier 1
    pub const PHYSID1: u8 = 0x02;
    /// PHY Identifier 2
    pub const PHYSID2: u8 = 0x03;
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: u8 = 0x04;
    /// 1000BASE-T Control Register
    pub const CTRL1000: u8 = 0x09;
    /// Broadcom auxiliary status summary
    pub const AUX_STATUS: u8 = 0x19;
}

/// BMCR bits
pub mod bmcr {
    /// Soft reset, self-clearing
    pub const RESET: u16 = 1 << 15;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Power down
    pub const POWER_DOWN: u16 = 1 << 11;
    /// Isolate PHY from the MAC interface
    pub const ISOLATE: u16 = 1 << 10;
    /// Restart auto-negotiation, self-clearing
    pub const AN_RESTART: u16 = 1 << 9;
}

/// BMSR bits
pub mod bmsr {
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 5;
    /// Link status (latched low)
    pub const LINK_STATUS: u16 = 1 << 2;
}

/// ANAR bits
pub mod anar {
    /// Symmetric pause
    pub const PAUSE: u16 = 1 << 10;
    /// 100BASE-TX full duplex
    pub const TX_FD: u16 = 1 << 8;
    /// 100BASE-TX half duplex
    pub const TX_HD: u16 = 1 << 7;
    /// 10BASE-T full duplex
    pub const T10_FD: u16 = 1 << 6;
    /// 10BASE-T half duplex
    pub const T10_HD: u16 = 1 << 5;
    /// IEEE 802.3 selector value
    pub const SELECTOR_IEEE802_3: u16 = 0x0001;
    /// Every 10/100 mode plus the selector
    pub const ALL_10_100: u16 = TX_FD | TX_HD | T10_FD | T10_HD | SELECTOR_IEEE802_3;
}

/// CTRL1000 bits
pub mod ctrl1000 {
    /// Advertise 1000BASE-T full duplex
    pub const ADV_1000FULL: u16 = 1 << 9;
    /// Advertise 1000BASE-T half duplex
    pub const ADV_1000HALF: u16 = 1 << 8;
}

/// BCM54xx auxiliary status register fields
pub mod aux_status {
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 15;
    /// Resolved link mode shift
    pub const LINKMODE_SHIFT: u16 = 8;
    /// Resolved link mode mask (after shift)
    pub const LINKMODE_MASK: u16 = 0x7;
}

/// BCM54213PE identifier (PHYSID1 << 16 | PHYSID2), revision bits masked
pub const BCM54213PE_PHY_ID: u32 = 0x600D_84A0;
/// Mask removing the silicon revision from the identifier
pub const PHY_ID_MASK: u32 = 0xFFFF_FFF0;
