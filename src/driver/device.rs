//! GENET device facade.
//!
//! This module contains the [`Device`] structure, the single entry point the
//! rest of the kernel uses:
//!
//! - Initialization
//! - Frame transmission and reception
//! - Link state and speed
//! - Interrupt servicing
//! - Statistics and enable/disable

use embedded_hal::delay::DelayNs;

use super::config::{DeviceConfig, LinkSpeed, State};
use super::error::{ConfigError, DmaError, Error, Result};
use super::interrupt::InterruptStatus;
use super::mac::MacController;
use crate::buffer::BufferAllocator;
use crate::hal::mdio::MdioController;
use crate::internal::constants::{
    DEFAULT_RX_DESCRIPTORS, DEFAULT_TX_DESCRIPTORS, FRAME_BUFFER_SIZE, MAC_ADDR_LEN, MAX_PHY_ADDR,
};
use crate::internal::dma::DmaEngine;
use crate::internal::logging::{debug, error, info, warn};
use crate::internal::register::intrl2::{CPU_CLEAR, CPU_MASK_STATUS, CPU_STAT};
use crate::internal::register::{Mmio, RegisterBlock};
use crate::phy::{Bcm54213, LinkState};

// =============================================================================
// Statistics
// =============================================================================

/// Software counters kept by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStats {
    /// Frames the hardware finished transmitting
    pub tx_frames: u32,
    /// Bytes the hardware finished transmitting
    pub tx_bytes: u64,
    /// Frames handed to the caller
    pub rx_frames: u32,
    /// Bytes handed to the caller
    pub rx_bytes: u64,
    /// Received frames dropped for error status
    pub rx_errors: u32,
    /// Frames rejected because the TX ring was full
    pub tx_ring_full: u32,
    /// Frames rejected for length or buffer shortage
    pub tx_dropped: u32,
    /// Allocation requests that could not be satisfied
    pub alloc_failures: u32,
    /// Receive buffer overflows signalled
    pub rx_overflows: u32,
    /// Transmit buffer underruns signalled
    pub tx_underruns: u32,
    /// Link transitions applied to the MAC
    pub link_changes: u32,
    /// PHY polls that failed
    pub phy_errors: u32,
    /// Interrupts serviced
    pub interrupts: u32,
}

impl DeviceStats {
    /// All counters zero. Const-compatible.
    pub const fn new() -> Self {
        Self {
            tx_frames: 0,
            tx_bytes: 0,
            rx_frames: 0,
            rx_bytes: 0,
            rx_errors: 0,
            tx_ring_full: 0,
            tx_dropped: 0,
            alloc_failures: 0,
            rx_overflows: 0,
            tx_underruns: 0,
            link_changes: 0,
            phy_errors: 0,
            interrupts: 0,
        }
    }
}

// =============================================================================
// Device
// =============================================================================

/// GENET v5 Ethernet device
///
/// Owns the register window, the delay provider, the buffer allocator and
/// both descriptor rings.
///
/// # Type Parameters
/// * `R` - Register access ([`Mmio`] on hardware)
/// * `D` - Delay provider
/// * `A` - Frame buffer allocator
/// * `RX` - Number of receive descriptors (at most 256)
/// * `TX` - Number of transmit descriptors (at most 256)
///
/// # Example
/// ```ignore
/// let regs = unsafe { Mmio::new(GENET_BASE) };
/// let mut device: GenetDevice<_, _> = Device::new(regs, delay, pool);
/// device.initialize(DeviceConfig::new())?;
///
/// if device.is_send_advisable() {
///     device.send_frame(&frame);
/// }
/// ```
pub struct Device<
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
    const RX: usize = DEFAULT_RX_DESCRIPTORS,
    const TX: usize = DEFAULT_TX_DESCRIPTORS,
> {
    regs: R,
    delay: D,
    allocator: A,
    dma: DmaEngine<RX, TX>,
    mac: MacController,
    phy: Bcm54213,
    config: DeviceConfig,
    state: State,
    stats: DeviceStats,
}

/// Device over the physical register window with full-size rings
pub type GenetDevice<D, A> = Device<Mmio, D, A, DEFAULT_RX_DESCRIPTORS, DEFAULT_TX_DESCRIPTORS>;

impl<R, D, A, const RX: usize, const TX: usize> Device<R, D, A, RX, TX>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    /// Create an uninitialized device. Const-compatible.
    pub const fn new(regs: R, delay: D, allocator: A) -> Self {
        let config = DeviceConfig::new();
        Self {
            regs,
            delay,
            allocator,
            dma: DmaEngine::new(),
            mac: MacController::new(),
            phy: Bcm54213::new(config.phy_address),
            config,
            state: State::Uninitialized,
            stats: DeviceStats::new(),
        }
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Configuration passed to [`initialize`](Self::initialize)
    #[inline(always)]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Station MAC address (all zero before initialization)
    #[inline(always)]
    pub fn mac_address(&self) -> [u8; MAC_ADDR_LEN] {
        self.mac.mac_address()
    }

    /// Whether the PHY reported link up at the last refresh
    #[inline(always)]
    pub fn is_link_up(&self) -> bool {
        self.mac.link_state().is_up()
    }

    /// Negotiated speed and duplex, `Unknown` while the link is down
    #[inline(always)]
    pub fn link_speed(&self) -> LinkSpeed {
        self.mac.link_state().link_speed()
    }

    /// Link state last applied to the MAC
    #[inline(always)]
    pub fn link_state(&self) -> LinkState {
        self.mac.link_state()
    }

    /// Software counters
    pub fn stats(&self) -> DeviceStats {
        DeviceStats {
            rx_errors: self.dma.rx_errors(),
            alloc_failures: self.dma.alloc_failures(),
            ..self.stats
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize the controller and the PHY.
    ///
    /// On success the MAC and both DMA engines are enabled, the RX ring is
    /// populated and auto-negotiation has been restarted. The link state is
    /// sampled once, so a link that was already up is reported immediately.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - called a second time
    /// - `InvalidPhyAddress` - `config.phy_address` is above 31
    /// - `HardwareNotPresent` - wrong controller revision or no PHY
    /// - `ResetTimeout` - soft reset never completed
    /// - `InvalidMacAddress` - no usable station address
    /// - `BusTimeout` / `MdioReadFail` - PHY unreachable
    ///
    /// A PHY failure stops the MAC and both DMA engines again and returns
    /// every posted buffer to the allocator, so the device stays
    /// uninitialized and `initialize` may be retried.
    pub fn initialize(&mut self, config: DeviceConfig) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(ConfigError::AlreadyInitialized.into());
        }
        if config.phy_address > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress.into());
        }

        self.mac.initialize(
            &self.regs,
            &mut self.delay,
            &mut self.dma,
            &mut self.allocator,
            &config,
        )?;

        if let Err(e) = self.bring_up_phy(&config) {
            self.mac.shutdown(&self.regs);
            let released = self.dma.shutdown(&self.regs, &mut self.allocator);
            warn!("PHY bring-up failed: {:?}, {} buffers released", e, released);
            return Err(e);
        }

        self.config = config;
        self.state = State::Running;
        info!("GENET initialized, MAC {:?}", self.mac.mac_address());
        Ok(())
    }

    fn bring_up_phy(&mut self, config: &DeviceConfig) -> Result<()> {
        self.phy = Bcm54213::new(config.phy_address);
        let mut mdio =
            MdioController::with_attempts(&self.regs, &mut self.delay, config.mdio_attempts);
        self.phy.init(&mut mdio)?;
        if self.mac.refresh_phy_status(&self.regs, &mut self.phy, &mut mdio)? {
            self.stats.link_changes = self.stats.link_changes.wrapping_add(1);
        }
        Ok(())
    }

    // =========================================================================
    // Enable / Disable
    // =========================================================================

    /// Stop the MAC and both DMA engines. Buffers stay posted.
    ///
    /// # Errors
    /// - `NotInitialized` - device was never initialized
    pub fn disable(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialized => return Err(ConfigError::NotInitialized.into()),
            State::Disabled => return Ok(()),
            State::Running => {}
        }
        self.mac.disable(&self.regs);
        self.dma.disable(&self.regs);
        self.state = State::Disabled;
        debug!("GENET disabled");
        Ok(())
    }

    /// Restart the DMA engines and the MAC after [`disable`](Self::disable)
    ///
    /// # Errors
    /// - `NotInitialized` - device was never initialized
    pub fn enable(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialized => return Err(ConfigError::NotInitialized.into()),
            State::Running => return Ok(()),
            State::Disabled => {}
        }
        self.dma.enable(&self.regs);
        self.mac.enable(&self.regs);
        self.state = State::Running;
        debug!("GENET enabled");
        Ok(())
    }

    // =========================================================================
    // Transmit / Receive
    // =========================================================================

    /// Whether [`send_frame`](Self::send_frame) would find a free descriptor
    #[inline]
    pub fn is_send_advisable(&self) -> bool {
        self.state == State::Running && self.dma.is_send_advisable()
    }

    /// Queue `frame` for transmission.
    ///
    /// Returns `true` once the frame is committed to the hardware. Returns
    /// `false` without queuing anything when the device is not running, the
    /// ring is full, the length is invalid or no buffer is available.
    pub fn send_frame(&mut self, frame: &[u8]) -> bool {
        if self.state != State::Running {
            return false;
        }
        match self
            .dma
            .enqueue_transmit(&self.regs, &mut self.allocator, frame)
        {
            Ok(()) => true,
            Err(Error::Dma(DmaError::RingFull)) => {
                self.stats.tx_ring_full = self.stats.tx_ring_full.wrapping_add(1);
                false
            }
            Err(e) => {
                self.stats.tx_dropped = self.stats.tx_dropped.wrapping_add(1);
                debug!("TX rejected: {:?}", e);
                false
            }
        }
    }

    /// Copy the oldest received frame into `out`.
    ///
    /// Inspects the ring directly, so frames are found even if their
    /// interrupt was never serviced.
    pub fn receive_frame(&mut self, out: &mut [u8; FRAME_BUFFER_SIZE]) -> Option<usize> {
        if self.state == State::Uninitialized {
            return None;
        }
        let len = self
            .dma
            .take_received_frame(&self.regs, &mut self.allocator, out)?;
        self.stats.rx_frames = self.stats.rx_frames.wrapping_add(1);
        self.stats.rx_bytes = self.stats.rx_bytes.wrapping_add(len as u64);
        Some(len)
    }

    // =========================================================================
    // Link
    // =========================================================================

    /// Poll the PHY and apply a changed link to the MAC.
    ///
    /// Returns `true` only when the link state or negotiated mode changed.
    /// A failed PHY poll is counted and reported as no change.
    pub fn refresh_phy(&mut self) -> bool {
        if self.state == State::Uninitialized {
            return false;
        }
        let mut mdio =
            MdioController::with_attempts(&self.regs, &mut self.delay, self.config.mdio_attempts);
        match self
            .mac
            .refresh_phy_status(&self.regs, &mut self.phy, &mut mdio)
        {
            Ok(changed) => {
                if changed {
                    self.stats.link_changes = self.stats.link_changes.wrapping_add(1);
                }
                changed
            }
            Err(e) => {
                self.stats.phy_errors = self.stats.phy_errors.wrapping_add(1);
                error!("PHY poll failed: {:?}", e);
                false
            }
        }
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Service the GENET interrupt line.
    ///
    /// Acknowledges the pending unmasked conditions first, then reclaims
    /// transmitted buffers, marks received frames and refreshes the link, in
    /// that order. Returns the conditions that were serviced.
    pub fn handle_interrupt(&mut self) -> InterruptStatus {
        if self.state == State::Uninitialized {
            return InterruptStatus::default();
        }

        let raw = self.regs.read(CPU_STAT) & !self.regs.read(CPU_MASK_STATUS);
        self.regs.write(CPU_CLEAR, raw);
        let status = InterruptStatus::from_raw(raw);
        self.stats.interrupts = self.stats.interrupts.wrapping_add(1);

        if status.tx_done {
            let (frames, bytes) = self
                .dma
                .reclaim_completed_transmits(&self.regs, &mut self.allocator);
            self.stats.tx_frames = self.stats.tx_frames.wrapping_add(frames as u32);
            self.stats.tx_bytes = self.stats.tx_bytes.wrapping_add(bytes as u64);
        }

        if status.rx_done {
            self.dma.mark_received_frames(&self.regs);
        }

        if status.link_changed() {
            self.refresh_phy();
        }

        if status.rbuf_overflow {
            self.stats.rx_overflows = self.stats.rx_overflows.wrapping_add(1);
        }
        if status.tbuf_underrun {
            self.stats.tx_underruns = self.stats.tx_underruns.wrapping_add(1);
        }

        status
    }

    /// Completed RX frames waiting to be taken
    pub fn rx_pending(&self) -> usize {
        self.dma.rx_pending()
    }

    /// TX descriptors posted and not yet reclaimed
    pub fn tx_in_flight(&self) -> usize {
        self.dma.tx_in_flight()
    }

    #[cfg(test)]
    pub(crate) fn registers(&self) -> &R {
        &self.regs
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
