//! Level-2 interrupt controller (INTRL2_0) registers and status bits
//!
//! INTRL2_0 aggregates the default-queue DMA, link and MDIO events onto the
//! single interrupt line this driver services.

/// INTRL2_0 block offset
pub const INTRL2_0_BASE: usize = 0x0200;

/// Raw interrupt status
pub const CPU_STAT: usize = INTRL2_0_BASE;
/// Software set
pub const CPU_SET: usize = INTRL2_0_BASE + 0x04;
/// Write-1-to-clear acknowledge
pub const CPU_CLEAR: usize = INTRL2_0_BASE + 0x08;
/// Current mask (1 = masked)
pub const CPU_MASK_STATUS: usize = INTRL2_0_BASE + 0x0C;
/// Write-1 to mask
pub const CPU_MASK_SET: usize = INTRL2_0_BASE + 0x10;
/// Write-1 to unmask
pub const CPU_MASK_CLEAR: usize = INTRL2_0_BASE + 0x14;

/// Status bit definitions
pub mod bits {
    /// PHY link came up
    pub const LINK_UP: u32 = 1 << 4;
    /// PHY link went down
    pub const LINK_DOWN: u32 = 1 << 5;
    /// Transmit buffer underrun
    pub const TBUF_UNDERRUN: u32 = 1 << 8;
    /// Receive buffer overflow
    pub const RBUF_OVERFLOW: u32 = 1 << 9;
    /// RX DMA multi-buffer done (threshold reached)
    pub const RXDMA_MBDONE: u32 = 1 << 13;
    /// RX DMA packet done
    pub const RXDMA_PDONE: u32 = 1 << 14;
    /// RX DMA buffer done
    pub const RXDMA_BDONE: u32 = 1 << 15;
    /// TX DMA multi-buffer done (threshold reached)
    pub const TXDMA_MBDONE: u32 = 1 << 16;
    /// TX DMA packet done
    pub const TXDMA_PDONE: u32 = 1 << 17;
    /// TX DMA buffer done
    pub const TXDMA_BDONE: u32 = 1 << 18;
    /// MDIO transaction done
    pub const MDIO_DONE: u32 = 1 << 23;
    /// MDIO transaction error
    pub const MDIO_ERROR: u32 = 1 << 24;

    /// Any RX completion
    pub const RX_DONE: u32 = RXDMA_MBDONE | RXDMA_PDONE | RXDMA_BDONE;
    /// Any TX completion
    pub const TX_DONE: u32 = TXDMA_MBDONE | TXDMA_PDONE | TXDMA_BDONE;
    /// Any link transition
    pub const LINK_EVENT: u32 = LINK_UP | LINK_DOWN;
    /// Conditions unmasked by the driver
    pub const DRIVER_MASK: u32 = RXDMA_MBDONE | TXDMA_MBDONE | LINK_EVENT;
    /// Every bit the driver decodes
    pub const ALL: u32 = RX_DONE | TX_DONE | LINK_EVENT | TBUF_UNDERRUN | RBUF_OVERFLOW
        | MDIO_DONE | MDIO_ERROR;
}
