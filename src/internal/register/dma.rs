//! RDMA/TDMA block registers
//!
//! The driver uses only the default queue (ring 16) of each engine. Each
//! engine's descriptor area starts at the block base; the ring-16 registers
//! and the engine-global registers follow it.

/// RDMA block offset (descriptor area at the start)
pub const RDMA_BASE: usize = 0x2000;
/// TDMA block offset (descriptor area at the start)
pub const TDMA_BASE: usize = 0x4000;

/// Ring 16 index within each engine
pub const DEFAULT_RING: u32 = 16;

/// Size of a hardware descriptor in bytes
pub const DESC_SIZE: usize = 12;
/// Size of a hardware descriptor in 32-bit words
pub const DESC_WORDS: u32 = 3;

/// Offset of the ring-16 register set from the engine base
const RING16: usize = 0x1000;
/// Offset of the engine-global registers from the engine base
const GLOBAL: usize = 0x1040;

// =============================================================================
// Ring 16 registers
// =============================================================================

/// RDMA ring 16 write pointer
pub const RDMA_WRITE_PTR: usize = RDMA_BASE + RING16;
/// RDMA ring 16 producer index (hardware, free-running 16 bits)
pub const RDMA_PROD_INDEX: usize = RDMA_BASE + RING16 + 0x08;
/// RDMA ring 16 consumer index (driver, free-running 16 bits)
pub const RDMA_CONS_INDEX: usize = RDMA_BASE + RING16 + 0x0C;
/// RDMA ring 16 size and buffer length
pub const RDMA_RING_BUF_SIZE: usize = RDMA_BASE + RING16 + 0x10;
/// RDMA ring 16 start address (words)
pub const RDMA_START_ADDR: usize = RDMA_BASE + RING16 + 0x14;
/// RDMA ring 16 end address (words)
pub const RDMA_END_ADDR: usize = RDMA_BASE + RING16 + 0x1C;
/// RDMA ring 16 multi-buffer done interrupt threshold
pub const RDMA_MBUF_DONE_THRESH: usize = RDMA_BASE + RING16 + 0x24;
/// RDMA ring 16 XON/XOFF thresholds
pub const RDMA_XON_XOFF_THRESH: usize = RDMA_BASE + RING16 + 0x28;
/// RDMA ring 16 read pointer
pub const RDMA_READ_PTR: usize = RDMA_BASE + RING16 + 0x2C;

/// TDMA ring 16 read pointer
pub const TDMA_READ_PTR: usize = TDMA_BASE + RING16;
/// TDMA ring 16 consumer index (hardware, free-running 16 bits)
pub const TDMA_CONS_INDEX: usize = TDMA_BASE + RING16 + 0x08;
/// TDMA ring 16 producer index (driver, free-running 16 bits)
pub const TDMA_PROD_INDEX: usize = TDMA_BASE + RING16 + 0x0C;
/// TDMA ring 16 size and buffer length
pub const TDMA_RING_BUF_SIZE: usize = TDMA_BASE + RING16 + 0x10;
/// TDMA ring 16 start address (words)
pub const TDMA_START_ADDR: usize = TDMA_BASE + RING16 + 0x14;
/// TDMA ring 16 end address (words)
pub const TDMA_END_ADDR: usize = TDMA_BASE + RING16 + 0x1C;
/// TDMA ring 16 multi-buffer done interrupt threshold
pub const TDMA_MBUF_DONE_THRESH: usize = TDMA_BASE + RING16 + 0x24;
/// TDMA ring 16 flow period
pub const TDMA_FLOW_PERIOD: usize = TDMA_BASE + RING16 + 0x28;
/// TDMA ring 16 write pointer
pub const TDMA_WRITE_PTR: usize = TDMA_BASE + RING16 + 0x2C;

// =============================================================================
// Engine-global registers
// =============================================================================

/// RDMA ring enable configuration
pub const RDMA_RING_CFG: usize = RDMA_BASE + GLOBAL;
/// RDMA control
pub const RDMA_CTRL: usize = RDMA_BASE + GLOBAL + 0x04;
/// RDMA system bus burst size
pub const RDMA_SCB_BURST_SIZE: usize = RDMA_BASE + GLOBAL + 0x0C;

/// TDMA ring enable configuration
pub const TDMA_RING_CFG: usize = TDMA_BASE + GLOBAL;
/// TDMA control
pub const TDMA_CTRL: usize = TDMA_BASE + GLOBAL + 0x04;
/// TDMA system bus burst size
pub const TDMA_SCB_BURST_SIZE: usize = TDMA_BASE + GLOBAL + 0x0C;

/// DMA engine enable
pub const DMA_CTRL_EN: u32 = 1 << 0;
/// Ring buffer enable for ring 16
pub const DMA_RING16_BUF_EN: u32 = 1 << (DEFAULT_RING + 1);
/// Maximum burst length
pub const DMA_MAX_BURST_LENGTH: u32 = 0x08;

/// Mask for the free-running producer/consumer indices
pub const INDEX_MASK: u32 = 0xFFFF;

/// Offset of RX descriptor `index`
pub const fn rx_desc(index: usize) -> usize {
    RDMA_BASE + index * DESC_SIZE
}

/// Offset of TX descriptor `index`
pub const fn tx_desc(index: usize) -> usize {
    TDMA_BASE + index * DESC_SIZE
}
