//! SYS, EXT and RBUF block registers

// =============================================================================
// SYS block
// =============================================================================

/// Revision control (major version in bits 27:24)
pub const SYS_REV_CTRL: usize = 0x0000;
/// Port mode selection
pub const SYS_PORT_CTRL: usize = 0x0004;
/// Receive buffer flush control
pub const SYS_RBUF_FLUSH_CTRL: usize = 0x0008;

/// Major revision field shift
pub const REV_MAJOR_SHIFT: u32 = 24;
/// Major revision field mask (after shift)
pub const REV_MAJOR_MASK: u32 = 0xF;
/// Major revision encodings reported by GENET v5 silicon
pub const REV_MAJOR_V5: [u32; 3] = [5, 6, 7];

/// External gigabit PHY port mode
pub const PORT_MODE_EXT_GPHY: u32 = 3;
/// Hold the receive buffer in flush
pub const RBUF_FLUSH_RESET: u32 = 1 << 1;

// =============================================================================
// EXT block
// =============================================================================

/// Power management
pub const EXT_PWR_MGMT: usize = 0x0080;
/// RGMII out-of-band control
pub const EXT_RGMII_OOB_CTRL: usize = 0x008C;

/// Power down the internal PHY
pub const EXT_PWR_DOWN_PHY: u32 = 1 << 0;
/// Power down the DLL
pub const EXT_PWR_DOWN_DLL: u32 = 1 << 1;
/// Power down the bias
pub const EXT_PWR_DOWN_BIAS: u32 = 1 << 2;
/// Energy detect mask
pub const EXT_ENERGY_DET_MASK: u32 = 0x1F << 4;

/// Link indication towards the UMAC
pub const RGMII_LINK: u32 = 1 << 4;
/// Disable out-of-band link status
pub const RGMII_OOB_DISABLE: u32 = 1 << 5;
/// Enable the RGMII interface
pub const RGMII_MODE_EN: u32 = 1 << 6;
/// Disable internal delay (ID) mode
pub const RGMII_ID_MODE_DISABLE: u32 = 1 << 16;

// =============================================================================
// RBUF block
// =============================================================================

/// Receive buffer control
pub const RBUF_CTRL: usize = 0x0300;
/// Transmit buffer size control
pub const RBUF_TBUF_SIZE_CTRL: usize = 0x03B4;

/// Prepend a 64-byte receive status block
pub const RBUF_64B_EN: u32 = 1 << 0;
/// Offset received frames by two bytes
pub const RBUF_ALIGN_2B: u32 = 1 << 1;
