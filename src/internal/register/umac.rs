//! UniMAC (UMAC) block registers

/// UMAC block offset
pub const UMAC_BASE: usize = 0x0800;

/// Command register: enables, speed, duplex, reset
pub const UMAC_CMD: usize = UMAC_BASE + 0x008;
/// MAC address bytes 0..4 (byte 0 in bits 31:24)
pub const UMAC_MAC0: usize = UMAC_BASE + 0x00C;
/// MAC address bytes 4..6 (byte 4 in bits 15:8)
pub const UMAC_MAC1: usize = UMAC_BASE + 0x010;
/// Maximum frame length
pub const UMAC_MAX_FRAME_LEN: usize = UMAC_BASE + 0x014;
/// Transmit FIFO flush
pub const UMAC_TX_FLUSH: usize = UMAC_BASE + 0x334;
/// MIB counter control
pub const UMAC_MIB_CTRL: usize = UMAC_BASE + 0x580;
/// MDIO command register
pub const UMAC_MDIO_CMD: usize = UMAC_BASE + 0x614;

/// UMAC_CMD bit definitions
pub mod cmd {
    /// Transmit enable
    pub const TX_EN: u32 = 1 << 0;
    /// Receive enable
    pub const RX_EN: u32 = 1 << 1;
    /// Speed field shift
    pub const SPEED_SHIFT: u32 = 2;
    /// Speed field mask (after shift)
    pub const SPEED_MASK: u32 = 0x3;
    /// 10 Mbps speed encoding
    pub const SPEED_10: u32 = 0;
    /// 100 Mbps speed encoding
    pub const SPEED_100: u32 = 1;
    /// 1000 Mbps speed encoding
    pub const SPEED_1000: u32 = 2;
    /// Promiscuous mode
    pub const PROMISC: u32 = 1 << 4;
    /// Forward CRC to the host
    pub const CRC_FWD: u32 = 1 << 6;
    /// Half duplex enable
    pub const HD_EN: u32 = 1 << 10;
    /// Software reset (self-clearing)
    pub const SW_RESET: u32 = 1 << 13;
    /// Local loopback
    pub const LCL_LOOP_EN: u32 = 1 << 15;
}

/// UMAC_MIB_CTRL bit definitions
pub mod mib {
    /// Reset RX counters
    pub const RESET_RX: u32 = 1 << 0;
    /// Reset runt counters
    pub const RESET_RUNT: u32 = 1 << 1;
    /// Reset TX counters
    pub const RESET_TX: u32 = 1 << 2;
}

/// UMAC_MDIO_CMD bit definitions
pub mod mdio {
    /// Start a transaction / transaction in progress
    pub const START_BUSY: u32 = 1 << 29;
    /// PHY did not respond to a read
    pub const READ_FAIL: u32 = 1 << 28;
    /// Read opcode
    pub const OP_READ: u32 = 2 << 26;
    /// Write opcode
    pub const OP_WRITE: u32 = 1 << 26;
    /// PHY address shift
    pub const PMD_SHIFT: u32 = 21;
    /// Register number shift
    pub const REG_SHIFT: u32 = 16;
    /// Data field mask
    pub const DATA_MASK: u32 = 0xFFFF;
}
