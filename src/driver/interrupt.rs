//! Interrupt status decoding for the GENET INTRL2_0 controller.
//!
//! This module provides the [`InterruptStatus`] structure for parsing
//! the level-2 status word the device handler acknowledges.

use crate::internal::register::intrl2::bits;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt status flags parsed from `INTRL2_CPU_STAT`.
///
/// The RX and TX flags fold the packet, buffer and multi-buffer done bits of
/// the default queue into one flag each.
///
/// # Example
///
/// ```ignore
/// let status = device.handle_interrupt();
/// if status.rx_done {
///     // Frames are waiting in the receive ring
/// }
/// if status.has_error() {
///     // Count or log the condition
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// PHY link came up
    pub link_up: bool,
    /// PHY link went down
    pub link_down: bool,
    /// RX DMA completed one or more buffers
    pub rx_done: bool,
    /// TX DMA completed one or more buffers
    pub tx_done: bool,
    /// Receive buffer overflowed
    pub rbuf_overflow: bool,
    /// Transmit buffer underran
    pub tbuf_underrun: bool,
    /// MDIO transaction finished
    pub mdio_done: bool,
    /// MDIO transaction failed
    pub mdio_error: bool,
}

impl InterruptStatus {
    /// Create from the raw status word
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            link_up: (status & bits::LINK_UP) != 0,
            link_down: (status & bits::LINK_DOWN) != 0,
            rx_done: (status & bits::RX_DONE) != 0,
            tx_done: (status & bits::TX_DONE) != 0,
            rbuf_overflow: (status & bits::RBUF_OVERFLOW) != 0,
            tbuf_underrun: (status & bits::TBUF_UNDERRUN) != 0,
            mdio_done: (status & bits::MDIO_DONE) != 0,
            mdio_error: (status & bits::MDIO_ERROR) != 0,
        }
    }

    /// Convert to a raw value for acknowledging (write-1-to-clear)
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.link_up {
            val |= bits::LINK_UP;
        }
        if self.link_down {
            val |= bits::LINK_DOWN;
        }
        if self.rx_done {
            val |= bits::RX_DONE;
        }
        if self.tx_done {
            val |= bits::TX_DONE;
        }
        if self.rbuf_overflow {
            val |= bits::RBUF_OVERFLOW;
        }
        if self.tbuf_underrun {
            val |= bits::TBUF_UNDERRUN;
        }
        if self.mdio_done {
            val |= bits::MDIO_DONE;
        }
        if self.mdio_error {
            val |= bits::MDIO_ERROR;
        }
        val
    }

    /// Check if any interrupt occurred
    #[inline]
    pub fn any(&self) -> bool {
        self.link_up
            || self.link_down
            || self.rx_done
            || self.tx_done
            || self.rbuf_overflow
            || self.tbuf_underrun
            || self.mdio_done
            || self.mdio_error
    }

    /// Check if a link transition was signalled
    #[inline]
    pub fn link_changed(&self) -> bool {
        self.link_up || self.link_down
    }

    /// Check if any error occurred
    #[inline]
    pub fn has_error(&self) -> bool {
        self.rbuf_overflow || self.tbuf_underrun || self.mdio_error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_status_from_raw_zero() {
        let status = InterruptStatus::from_raw(0);

        assert!(!status.any());
        assert!(!status.has_error());
        assert!(!status.link_changed());
        assert_eq!(status, InterruptStatus::default());
    }

    #[test]
    fn interrupt_status_folds_rx_done_bits() {
        for bit in [bits::RXDMA_MBDONE, bits::RXDMA_PDONE, bits::RXDMA_BDONE] {
            let status = InterruptStatus::from_raw(bit);
            assert!(status.rx_done);
            assert!(!status.tx_done);
        }
    }

    #[test]
    fn interrupt_status_folds_tx_done_bits() {
        for bit in [bits::TXDMA_MBDONE, bits::TXDMA_PDONE, bits::TXDMA_BDONE] {
            let status = InterruptStatus::from_raw(bit);
            assert!(status.tx_done);
            assert!(!status.rx_done);
        }
    }

    #[test]
    fn interrupt_status_link_events() {
        let up = InterruptStatus::from_raw(bits::LINK_UP);
        assert!(up.link_up);
        assert!(!up.link_down);
        assert!(up.link_changed());

        let down = InterruptStatus::from_raw(bits::LINK_DOWN);
        assert!(down.link_down);
        assert!(down.link_changed());
        assert!(!down.has_error());
    }

    #[test]
    fn interrupt_status_errors() {
        assert!(InterruptStatus::from_raw(bits::RBUF_OVERFLOW).has_error());
        assert!(InterruptStatus::from_raw(bits::TBUF_UNDERRUN).has_error());
        assert!(InterruptStatus::from_raw(bits::MDIO_ERROR).has_error());
        assert!(!InterruptStatus::from_raw(bits::MDIO_DONE).has_error());
    }

    #[test]
    fn interrupt_status_ignores_unknown_bits() {
        let status = InterruptStatus::from_raw(1 << 0 | 1 << 31);
        assert!(!status.any());
    }

    #[test]
    fn interrupt_status_to_raw_covers_every_group() {
        let status = InterruptStatus::from_raw(bits::ALL);
        assert!(status.any());
        assert_eq!(status.to_raw(), bits::ALL);
    }

    #[test]
    fn interrupt_status_to_raw_single_flag() {
        let status = InterruptStatus {
            tx_done: true,
            ..Default::default()
        };
        assert_eq!(status.to_raw(), bits::TX_DONE);
        assert_eq!(InterruptStatus::from_raw(status.to_raw()), status);
    }
}
