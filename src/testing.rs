//! Testing utilities and mock implementations
//!
//! Mocks for running the driver on the host without hardware access. The
//! centerpiece is [`MockRegisters`], a small behavioral model of the GENET
//! block: self-clearing soft reset, an MDIO engine backed by a simulated
//! BCM54213PE register file, TX completion and RX delivery through the
//! ring-16 indices, and the INTRL2 status/mask/clear registers.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::boxed::Box;
use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::buffer::{BufferAllocator, FrameBuffer, FrameStorage};
use crate::driver::config::{Duplex, Speed};
use crate::driver::error::{IoError, Result};
use crate::hal::mdio::MdioBus;
use crate::internal::phy_regs::{aux_status, bmcr, bmsr, phy_reg};
use crate::internal::register::RegisterBlock;
use crate::internal::register::dma::{
    INDEX_MASK, RDMA_CONS_INDEX, RDMA_PROD_INDEX, RDMA_RING_BUF_SIZE, RDMA_WRITE_PTR,
    TDMA_CONS_INDEX, rx_desc,
};
use crate::internal::register::intrl2::{CPU_CLEAR, CPU_MASK_CLEAR, CPU_MASK_SET, CPU_MASK_STATUS, CPU_STAT};
use crate::internal::register::sys::SYS_REV_CTRL;
use crate::internal::register::umac::{UMAC_CMD, UMAC_MDIO_CMD, cmd, mdio};
use crate::internal::dma::descriptor::status;

/// MDIO address used by the mocks for the onboard PHY
pub const TEST_PHY_ADDR: u8 = 1;

/// Revision register value of a GENET v5 block (major 6)
pub const GENET_V5_REV: u32 = 0x0600_0000;

// =============================================================================
// Simulated PHY register file
// =============================================================================

/// Register file of a simulated BCM54213PE
#[derive(Debug, Default)]
pub struct PhyModel {
    registers: HashMap<(u8, u8), u16>,
    writes: Vec<(u8, u8, u16)>,
    reset_stuck: bool,
}

/// Auxiliary status link bit
const AUX_LINK_UP: u16 = 1 << 2;

/// BMCR value after a PHY reset: auto-negotiation on, 1000 Mb/s full duplex
const BMCR_DEFAULT: u16 = 0x1140;

/// Auxiliary status link-mode encoding for a speed/duplex pair
pub fn aux_mode(speed: Speed, duplex: Duplex) -> u16 {
    match (speed, duplex) {
        (Speed::Mbps10, Duplex::Half) => 1,
        (Speed::Mbps10, Duplex::Full) => 2,
        (Speed::Mbps100, Duplex::Half) => 3,
        (Speed::Mbps100, Duplex::Full) => 5,
        (Speed::Mbps1000, Duplex::Half) => 6,
        (Speed::Mbps1000, Duplex::Full) => 7,
    }
}

impl PhyModel {
    pub fn get(&self, phy: u8, reg: u8) -> u16 {
        self.registers.get(&(phy, reg)).copied().unwrap_or(0)
    }

    pub fn set(&mut self, phy: u8, reg: u8, value: u16) {
        self.registers.insert((phy, reg), value);
    }

    pub fn write(&mut self, phy: u8, reg: u8, value: u16) {
        self.writes.push((phy, reg, value));
        if reg == phy_reg::BMCR && value & bmcr::RESET != 0 && !self.reset_stuck {
            self.set(phy, reg, BMCR_DEFAULT);
        } else {
            self.set(phy, reg, value);
        }
    }

    /// Keep BMCR.RESET set after a reset request
    pub fn set_reset_stuck(&mut self, stuck: bool) {
        self.reset_stuck = stuck;
    }

    /// Identity registers present, auto-negotiation enabled, link down
    pub fn setup_bcm54213(&mut self, phy: u8) {
        self.set(phy, phy_reg::PHYSID1, 0x600D);
        self.set(phy, phy_reg::PHYSID2, 0x84A2);
        self.set(phy, phy_reg::BMCR, BMCR_DEFAULT);
        self.set(phy, phy_reg::BMSR, 0x7949);
        self.set(phy, phy_reg::AUX_STATUS, 0);
    }

    pub fn link_up(&mut self, phy: u8, speed: Speed, duplex: Duplex) {
        let bmsr_val = self.get(phy, phy_reg::BMSR) | bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set(phy, phy_reg::BMSR, bmsr_val);
        let aux = aux_status::AN_COMPLETE
            | AUX_LINK_UP
            | (aux_mode(speed, duplex) << aux_status::LINKMODE_SHIFT);
        self.set(phy, phy_reg::AUX_STATUS, aux);
    }

    pub fn link_down(&mut self, phy: u8) {
        let bmsr_val = self.get(phy, phy_reg::BMSR) & !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        self.set(phy, phy_reg::BMSR, bmsr_val);
        self.set(phy, phy_reg::AUX_STATUS, 0);
    }
}

// =============================================================================
// Mock GENET register block
// =============================================================================

#[derive(Debug, Default)]
struct ControllerModel {
    registers: HashMap<usize, u32>,
    writes: Vec<(usize, u32)>,
    phy: PhyModel,
    reset_stuck: bool,
    mdio_stuck: bool,
    mdio_read_fail: bool,
    rx_write_pos: usize,
}

impl ControllerModel {
    fn get(&self, offset: usize) -> u32 {
        self.registers.get(&offset).copied().unwrap_or(0)
    }

    fn set(&mut self, offset: usize, value: u32) {
        self.registers.insert(offset, value);
    }

    fn store(&mut self, offset: usize, value: u32) {
        match offset {
            UMAC_CMD if value & cmd::SW_RESET != 0 && !self.reset_stuck => {
                self.set(offset, value & !cmd::SW_RESET);
            }
            UMAC_MDIO_CMD if value & mdio::START_BUSY != 0 => self.run_mdio(value),
            // hardware-owned counters ignore driver writes
            TDMA_CONS_INDEX | RDMA_PROD_INDEX => {}
            RDMA_WRITE_PTR => {
                self.rx_write_pos = 0;
                self.set(offset, value);
            }
            CPU_CLEAR => {
                let stat = self.get(CPU_STAT) & !value;
                self.set(CPU_STAT, stat);
            }
            CPU_MASK_SET => {
                let mask = self.get(CPU_MASK_STATUS) | value;
                self.set(CPU_MASK_STATUS, mask);
            }
            CPU_MASK_CLEAR => {
                let mask = self.get(CPU_MASK_STATUS) & !value;
                self.set(CPU_MASK_STATUS, mask);
            }
            _ => self.set(offset, value),
        }
    }

    fn run_mdio(&mut self, command: u32) {
        if self.mdio_stuck {
            self.set(UMAC_MDIO_CMD, command);
            return;
        }

        let phy = ((command >> mdio::PMD_SHIFT) & 0x1F) as u8;
        let reg = ((command >> mdio::REG_SHIFT) & 0x1F) as u8;
        let is_read = command & mdio::OP_READ == mdio::OP_READ;

        let mut result = (phy as u32) << mdio::PMD_SHIFT | (reg as u32) << mdio::REG_SHIFT;
        if is_read {
            if self.mdio_read_fail {
                result |= mdio::READ_FAIL;
            } else {
                result |= self.phy.get(phy, reg) as u32;
            }
        } else {
            self.phy.write(phy, reg, (command & mdio::DATA_MASK) as u16);
        }
        self.set(UMAC_MDIO_CMD, result);
    }
}

/// Simulated GENET register block
#[derive(Debug, Default)]
pub struct MockRegisters {
    model: RefCell<ControllerModel>,
}

impl MockRegisters {
    /// Blank register file (every register reads zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// A GENET v5 block with all interrupts masked and a BCM54213PE with link down
    pub fn genet_v5() -> Self {
        let regs = Self::new();
        {
            let mut model = regs.model.borrow_mut();
            model.set(SYS_REV_CTRL, GENET_V5_REV);
            model.set(CPU_MASK_STATUS, 0xFFFF_FFFF);
            model.phy.setup_bcm54213(TEST_PHY_ADDR);
        }
        regs
    }

    /// Set a register directly, bypassing write side effects and the write log
    pub fn set(&self, offset: usize, value: u32) {
        self.model.borrow_mut().set(offset, value);
    }

    /// Every value written to `offset`, in order
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.model
            .borrow()
            .writes
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Number of register writes so far
    pub fn write_count(&self) -> usize {
        self.model.borrow().writes.len()
    }

    /// Keep `SW_RESET` set forever
    pub fn set_reset_stuck(&self, stuck: bool) {
        self.model.borrow_mut().reset_stuck = stuck;
    }

    /// Keep the MDIO engine busy forever
    pub fn set_mdio_stuck(&self, stuck: bool) {
        self.model.borrow_mut().mdio_stuck = stuck;
    }

    /// Report `READ_FAIL` on every MDIO read
    pub fn set_mdio_read_fail(&self, fail: bool) {
        self.model.borrow_mut().mdio_read_fail = fail;
    }

    /// Access the simulated PHY
    pub fn with_phy<R>(&self, f: impl FnOnce(&mut PhyModel) -> R) -> R {
        f(&mut self.model.borrow_mut().phy)
    }

    /// Raise interrupt status bits
    pub fn raise(&self, bits: u32) {
        let mut model = self.model.borrow_mut();
        let stat = model.get(CPU_STAT) | bits;
        model.set(CPU_STAT, stat);
    }

    /// Start the hardware-owned ring counters at the values a previous user
    /// of the controller (firmware, bootloader) left behind
    pub fn preset_ring_counters(&self, tx_cons: u32, rx_prod: u32) {
        let mut model = self.model.borrow_mut();
        model.set(TDMA_CONS_INDEX, tx_cons & INDEX_MASK);
        model.set(RDMA_PROD_INDEX, rx_prod & INDEX_MASK);
    }

    /// Hardware finishes transmitting `count` more descriptors
    pub fn complete_tx(&self, count: u32) {
        let mut model = self.model.borrow_mut();
        let cons = (model.get(TDMA_CONS_INDEX) + count) & INDEX_MASK;
        model.set(TDMA_CONS_INDEX, cons);
    }

    /// Hardware receives `frame` into the next posted buffer.
    ///
    /// Returns `false` when the driver has not posted a buffer for the slot.
    pub fn deliver_rx(&self, frame: &[u8]) -> bool {
        self.deliver(frame, status::SOP | status::EOP)
    }

    /// Hardware completes the next posted buffer with error `flags`
    pub fn deliver_rx_error(&self, frame: &[u8], flags: u32) -> bool {
        self.deliver(frame, status::SOP | status::EOP | flags)
    }

    fn deliver(&self, frame: &[u8], flags: u32) -> bool {
        let mut model = self.model.borrow_mut();
        let ring_size = (model.get(RDMA_RING_BUF_SIZE) >> 16) as usize;
        let prod = model.get(RDMA_PROD_INDEX);
        let cons = model.get(RDMA_CONS_INDEX);
        let filled = (prod.wrapping_sub(cons) & INDEX_MASK) as usize;
        if ring_size == 0 || filled >= ring_size {
            return false;
        }

        let slot = model.rx_write_pos;
        let base = rx_desc(slot);
        let addr = u64::from(model.get(base + 4)) | (u64::from(model.get(base + 8)) << 32);
        // SAFETY: the driver posted this address from a live FrameBuffer of
        // FRAME_BUFFER_SIZE bytes, and frames in tests never exceed that.
        unsafe {
            core::ptr::copy_nonoverlapping(frame.as_ptr(), addr as usize as *mut u8, frame.len());
        }
        model.set(base, ((frame.len() as u32) << 16) | flags);
        model.set(RDMA_PROD_INDEX, (prod + 1) & INDEX_MASK);
        model.rx_write_pos = (slot + 1) % ring_size;
        true
    }
}

impl RegisterBlock for MockRegisters {
    fn read(&self, offset: usize) -> u32 {
        self.model.borrow().get(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        let mut model = self.model.borrow_mut();
        model.writes.push((offset, value));
        model.store(offset, value);
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing the PHY driver without a MAC
#[derive(Debug, Default)]
pub struct MockMdioBus {
    pub phy: PhyModel,
    /// Fail every transaction with `BusTimeout`
    pub timeout: bool,
}

impl MockMdioBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus with a BCM54213PE at [`TEST_PHY_ADDR`], link down
    pub fn bcm54213() -> Self {
        let mut bus = Self::new();
        bus.phy.setup_bcm54213(TEST_PHY_ADDR);
        bus
    }

    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.phy.writes.clone()
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        if self.timeout {
            return Err(IoError::BusTimeout.into());
        }
        Ok(self.phy.get(phy_addr, reg_addr))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        if self.timeout {
            return Err(IoError::BusTimeout.into());
        }
        self.phy.write(phy_addr, reg_addr, value);
        Ok(())
    }

    fn is_busy(&self) -> bool {
        false
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
    calls: u32,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }

    /// Number of delay calls
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

// =============================================================================
// Mock Allocator
// =============================================================================

/// Heap-backed allocator with a configurable number of available buffers
#[derive(Debug, Default)]
pub struct MockAllocator {
    available: usize,
    spare: Vec<FrameBuffer>,
    allocated: usize,
    released: Vec<u64>,
}

impl MockAllocator {
    pub fn new(available: usize) -> Self {
        Self {
            available,
            ..Self::default()
        }
    }

    /// Make `count` more buffers available
    pub fn refill(&mut self, count: usize) {
        self.available += count;
    }

    /// Buffers that can still be allocated
    pub fn available(&self) -> usize {
        self.available
    }

    /// Buffers handed out and not yet released
    pub fn outstanding(&self) -> usize {
        self.allocated - self.released.len()
    }

    /// DMA addresses of released buffers, in release order
    pub fn released(&self) -> &[u64] {
        &self.released
    }
}

impl BufferAllocator for MockAllocator {
    fn allocate(&mut self) -> Option<FrameBuffer> {
        if self.available == 0 {
            return None;
        }
        self.available -= 1;
        self.allocated += 1;
        Some(
            self.spare
                .pop()
                .unwrap_or_else(|| FrameBuffer::new(Box::leak(Box::new(FrameStorage::new())))),
        )
    }

    fn release(&mut self, buffer: FrameBuffer) {
        self.released.push(buffer.dma_addr());
        self.available += 1;
        self.spare.push(buffer);
    }
}
