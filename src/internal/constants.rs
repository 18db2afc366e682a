//! Centralized Constants
//!
//! Single source of truth for the sizes, timing bounds and defaults used
//! throughout the driver.
//!
//! # Note
//!
//! Hardware register offsets and bit definitions live in
//! [`register`](super::register) next to the block they describe.

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Size of every frame buffer handed to the DMA engine, and of the buffer
/// callers pass to [`Device::receive_frame`](crate::Device::receive_frame).
pub const FRAME_BUFFER_SIZE: usize = 1600;

/// Largest frame accepted for transmit and programmed as the UMAC maximum
/// frame length (1500 MTU + 14 header + 4 CRC + 4 VLAN, rounded up to a burst).
pub const MAX_FRAME_SIZE: usize = 1536;

/// Standard Ethernet MTU
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// Minimum Ethernet frame size (excluding CRC); shorter frames are padded
pub const MIN_FRAME_SIZE: usize = 60;

/// Alignment of frame buffers (one AArch64 cache line)
pub const FRAME_BUFFER_ALIGN: usize = 64;

// =============================================================================
// Ring Sizes
// =============================================================================

/// Default number of receive descriptors
pub const DEFAULT_RX_DESCRIPTORS: usize = 256;

/// Default number of transmit descriptors
pub const DEFAULT_TX_DESCRIPTORS: usize = 256;

/// Descriptors available in each of the TDMA and RDMA descriptor areas
pub const HW_DESCRIPTOR_COUNT: usize = 256;

// =============================================================================
// Timing Constants
// =============================================================================

/// Polling interval while waiting for the UMAC soft reset to self-clear
pub const RESET_POLL_INTERVAL_US: u32 = 1;

/// Default number of reset polls before reporting `ResetTimeout`
pub const DEFAULT_RESET_ATTEMPTS: u32 = 1000;

/// Settle time after flushing the receive buffer
pub const RBUF_FLUSH_DELAY_US: u32 = 10;

/// Time the transmit FIFO flush is held
pub const TX_FLUSH_DELAY_US: u32 = 10;

/// Polling interval while waiting for an MDIO transaction
pub const MDIO_POLL_INTERVAL_US: u32 = 10;

/// Default number of MDIO polls before reporting `BusTimeout`
pub const DEFAULT_MDIO_ATTEMPTS: u32 = 100;

/// BMCR reads while waiting for the PHY soft reset to self-clear
pub const PHY_RESET_POLLS: u32 = 1000;

// =============================================================================
// Device Defaults
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// MDIO address of the onboard BCM54213PE
pub const DEFAULT_PHY_ADDR: u8 = 1;

/// Highest valid MDIO PHY address
pub const MAX_PHY_ADDR: u8 = 31;

/// Highest valid Clause 22 register number
pub const MAX_PHY_REG: u8 = 31;

/// GIC interrupt number of the GENET INTRL2_0 line (SPI 157)
pub const GENET_IRQ: u32 = 189;

/// Physical base address of the GENET block on BCM2711
pub const GENET_BASE: usize = 0xFD58_0000;

// =============================================================================
// Compile-time checks
// =============================================================================

const _: () = assert!(MAX_FRAME_SIZE <= FRAME_BUFFER_SIZE);
const _: () = assert!(FRAME_BUFFER_SIZE % FRAME_BUFFER_ALIGN == 0);
const _: () = assert!(DEFAULT_RX_DESCRIPTORS <= HW_DESCRIPTOR_COUNT);
const _: () = assert!(DEFAULT_TX_DESCRIPTORS <= HW_DESCRIPTOR_COUNT);
