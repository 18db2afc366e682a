//! GENET MAC Controller
//!
//! Brings the UMAC out of reset, programs the station address and keeps the
//! MAC's speed/duplex and RGMII link indication in step with the PHY.

use embedded_hal::delay::DelayNs;

use super::config::{DeviceConfig, Duplex, Speed};
use super::error::{ConfigError, Result};
use crate::buffer::BufferAllocator;
use crate::hal::mdio::MdioBus;
use crate::hal::reset::ResetController;
use crate::internal::constants::{MAC_ADDR_LEN, TX_FLUSH_DELAY_US};
use crate::internal::dma::DmaEngine;
use crate::internal::logging::{debug, error, info, warn};
use crate::internal::register::RegisterBlock;
use crate::internal::register::intrl2::{CPU_CLEAR, CPU_MASK_CLEAR, CPU_MASK_SET, bits};
use crate::internal::register::sys::{
    EXT_RGMII_OOB_CTRL, PORT_MODE_EXT_GPHY, RBUF_64B_EN, RBUF_ALIGN_2B, RBUF_CTRL,
    RBUF_TBUF_SIZE_CTRL, REV_MAJOR_MASK, REV_MAJOR_SHIFT, REV_MAJOR_V5, RGMII_ID_MODE_DISABLE,
    RGMII_LINK, RGMII_MODE_EN, RGMII_OOB_DISABLE, SYS_PORT_CTRL, SYS_REV_CTRL,
};
use crate::internal::register::umac::{
    UMAC_CMD, UMAC_MAC0, UMAC_MAC1, UMAC_MAX_FRAME_LEN, UMAC_MIB_CTRL, UMAC_TX_FLUSH, cmd, mib,
};
use crate::phy::{Bcm54213, LinkState};

// =============================================================================
// MAC Controller
// =============================================================================

/// UMAC state owned by the device
#[derive(Debug, Default)]
pub struct MacController {
    initialized: bool,
    mac_addr: [u8; MAC_ADDR_LEN],
    link: LinkState,
}

impl MacController {
    /// Create an uninitialized controller. Const-compatible.
    pub const fn new() -> Self {
        Self {
            initialized: false,
            mac_addr: [0; MAC_ADDR_LEN],
            link: LinkState::Down,
        }
    }

    /// Whether [`initialize`](Self::initialize) has completed
    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Station address programmed during initialization
    #[inline(always)]
    pub fn mac_address(&self) -> [u8; MAC_ADDR_LEN] {
        self.mac_addr
    }

    /// Link state last applied to the MAC
    #[inline(always)]
    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Bring the controller from reset to TX/RX enabled.
    ///
    /// The RX ring is filled with as many buffers as `allocator` can supply;
    /// running short is logged, not fatal, and the remaining slots are filled
    /// as frames are consumed.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - called a second time
    /// - `HardwareNotPresent` - revision register is not GENET v5
    /// - `ResetTimeout` - soft reset never self-cleared
    /// - `InvalidMacAddress` - neither the configuration nor the UMAC holds
    ///   a usable unicast address
    pub(crate) fn initialize<R, D, A, const RX: usize, const TX: usize>(
        &mut self,
        regs: &R,
        delay: &mut D,
        dma: &mut DmaEngine<RX, TX>,
        allocator: &mut A,
        config: &DeviceConfig,
    ) -> Result<()>
    where
        R: RegisterBlock,
        D: DelayNs,
        A: BufferAllocator,
    {
        if self.initialized {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        // === STEP 1: Identify the block ===
        let major = check_revision(regs)?;
        info!("GENET v5 found (major revision {})", major);

        // === STEP 2: External gigabit PHY over RGMII ===
        regs.write(SYS_PORT_CTRL, PORT_MODE_EXT_GPHY);
        let mut reset = ResetController::with_attempts(regs, &mut *delay, config.reset_attempts);
        reset.power_up();
        regs.write(
            EXT_RGMII_OOB_CTRL,
            RGMII_MODE_EN | RGMII_ID_MODE_DISABLE | RGMII_OOB_DISABLE,
        );

        // === STEP 3: Soft reset ===
        reset.soft_reset().inspect_err(|_| {
            error!("UMAC soft reset timed out");
        })?;

        // === STEP 4: MAC defaults ===
        regs.write(UMAC_MIB_CTRL, mib::RESET_RX | mib::RESET_RUNT | mib::RESET_TX);
        regs.write(UMAC_MIB_CTRL, 0);
        regs.write(UMAC_TX_FLUSH, 1);
        delay.delay_us(TX_FLUSH_DELAY_US);
        regs.write(UMAC_TX_FLUSH, 0);
        regs.write(UMAC_MAX_FRAME_LEN, config.max_frame_length);
        regs.clear_bits(RBUF_CTRL, RBUF_ALIGN_2B | RBUF_64B_EN);
        regs.write(RBUF_TBUF_SIZE_CTRL, 1);

        // === STEP 5: Quiesce interrupts ===
        regs.write(CPU_CLEAR, 0xFFFF_FFFF);
        regs.write(CPU_MASK_SET, 0xFFFF_FFFF);

        // === STEP 6: Station address ===
        let addr = resolve_mac_address(regs, config)?;
        write_mac_address(regs, &addr);
        self.mac_addr = addr;

        // === STEP 7: Rings ===
        dma.configure(regs);
        match dma.post_receive_buffers(regs, allocator) {
            Ok(posted) => debug!("{} RX buffers posted", posted),
            Err(e) => warn!(
                "RX ring partially filled ({} of {}): {:?}",
                dma.rx_in_flight(),
                RX - 1,
                e
            ),
        }

        // === STEP 8: Unmask and enable ===
        regs.write(CPU_MASK_CLEAR, bits::DRIVER_MASK);
        self.enable(regs);

        self.link = LinkState::Down;
        self.initialized = true;
        Ok(())
    }

    /// Return the controller to its pre-initialization state.
    ///
    /// Masks and clears every CPU interrupt, stops the transmitter and
    /// receiver and drops the RGMII link indication. The DMA engines are
    /// stopped separately by [`DmaEngine::shutdown`].
    pub fn shutdown<R: RegisterBlock>(&mut self, regs: &R) {
        regs.write(CPU_MASK_SET, 0xFFFF_FFFF);
        regs.write(CPU_CLEAR, 0xFFFF_FFFF);
        self.disable(regs);
        regs.clear_bits(EXT_RGMII_OOB_CTRL, RGMII_LINK);
        self.link = LinkState::Down;
        self.initialized = false;
    }

    /// Enable the MAC transmitter and receiver
    pub fn enable<R: RegisterBlock>(&self, regs: &R) {
        regs.set_bits(UMAC_CMD, cmd::TX_EN | cmd::RX_EN);
    }

    /// Disable the MAC transmitter and receiver
    pub fn disable<R: RegisterBlock>(&self, regs: &R) {
        regs.clear_bits(UMAC_CMD, cmd::TX_EN | cmd::RX_EN);
    }

    /// Program the UMAC speed and duplex and signal link up on RGMII
    pub fn apply_link_settings<R: RegisterBlock>(&self, regs: &R, speed: Speed, duplex: Duplex) {
        let speed_bits = match speed {
            Speed::Mbps10 => cmd::SPEED_10,
            Speed::Mbps100 => cmd::SPEED_100,
            Speed::Mbps1000 => cmd::SPEED_1000,
        };
        regs.modify(UMAC_CMD, |v| {
            let mut v = v & !((cmd::SPEED_MASK << cmd::SPEED_SHIFT) | cmd::HD_EN);
            v |= speed_bits << cmd::SPEED_SHIFT;
            if duplex == Duplex::Half {
                v |= cmd::HD_EN;
            }
            v
        });
        regs.set_bits(EXT_RGMII_OOB_CTRL, RGMII_LINK);
    }

    /// Poll the PHY and propagate a changed link state to the MAC.
    ///
    /// Returns `true` when the state differs from the one last applied.
    pub fn refresh_phy_status<R: RegisterBlock, M: MdioBus>(
        &mut self,
        regs: &R,
        phy: &mut Bcm54213,
        mdio: &mut M,
    ) -> Result<bool> {
        let Some(state) = phy.poll_link(mdio)? else {
            return Ok(false);
        };

        match state {
            LinkState::Up(link) => {
                self.apply_link_settings(regs, link.speed, link.duplex);
                info!("Link up: {} Mbps", link.link_speed().mbps());
            }
            LinkState::Down => {
                regs.clear_bits(EXT_RGMII_OOB_CTRL, RGMII_LINK);
                info!("Link down");
            }
        }
        self.link = state;
        Ok(true)
    }
}

// =============================================================================
// Identification and Addressing
// =============================================================================

/// Read the major revision, failing unless it is a GENET v5 encoding
pub(crate) fn check_revision<R: RegisterBlock>(regs: &R) -> Result<u32> {
    let rev = regs.read(SYS_REV_CTRL);
    let major = (rev >> REV_MAJOR_SHIFT) & REV_MAJOR_MASK;
    if rev == 0xFFFF_FFFF || !REV_MAJOR_V5.contains(&major) {
        error!("Unsupported GENET revision {:#x}", rev);
        return Err(ConfigError::HardwareNotPresent.into());
    }
    Ok(major)
}

/// Configured address, else the one firmware left in the UMAC
pub(crate) fn resolve_mac_address<R: RegisterBlock>(
    regs: &R,
    config: &DeviceConfig,
) -> Result<[u8; MAC_ADDR_LEN]> {
    let addr = config.mac_address.unwrap_or_else(|| read_mac_address(regs));
    if !is_valid_unicast(&addr) {
        return Err(ConfigError::InvalidMacAddress.into());
    }
    Ok(addr)
}

/// Station address held in `UMAC_MAC0`/`UMAC_MAC1`
pub(crate) fn read_mac_address<R: RegisterBlock>(regs: &R) -> [u8; MAC_ADDR_LEN] {
    let [b0, b1, b2, b3] = regs.read(UMAC_MAC0).to_be_bytes();
    let [_, _, b4, b5] = regs.read(UMAC_MAC1).to_be_bytes();
    [b0, b1, b2, b3, b4, b5]
}

/// Program `UMAC_MAC0`/`UMAC_MAC1`
pub(crate) fn write_mac_address<R: RegisterBlock>(regs: &R, addr: &[u8; MAC_ADDR_LEN]) {
    regs.write(
        UMAC_MAC0,
        u32::from_be_bytes([addr[0], addr[1], addr[2], addr[3]]),
    );
    regs.write(UMAC_MAC1, u32::from_be_bytes([0, 0, addr[4], addr[5]]));
}

/// Not all-zero and not group (multicast or broadcast)
#[inline]
pub(crate) const fn is_valid_unicast(addr: &[u8; MAC_ADDR_LEN]) -> bool {
    let zero = addr[0] == 0
        && addr[1] == 0
        && addr[2] == 0
        && addr[3] == 0
        && addr[4] == 0
        && addr[5] == 0;
    !zero && addr[0] & 0x01 == 0
}

// =============================================================================
// Unit Tests
// =============================================================================
