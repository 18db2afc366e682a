//! TX and RX DMA descriptor structures.
//!
//! GENET descriptors live in the controller's register space rather than in
//! system memory: three 32-bit words per slot (`length_status`, `addr_lo`,
//! `addr_hi`) at `RDMA_BASE`/`TDMA_BASE + index * 12`. Completion is reported
//! through the ring's hardware index registers instead of an OWN bit, so the
//! driver keeps its own per-slot [`DescriptorState`] and advances it when the
//! hardware index moves past the slot.

use crate::buffer::FrameBuffer;
use crate::internal::register::RegisterBlock;

/// `length_status` fields reported by the RDMA engine
pub mod status {
    /// Received length shift
    pub const LEN_SHIFT: u32 = 16;
    /// Received length mask (after shift)
    pub const LEN_MASK: u32 = 0xFFF;
    /// Last buffer of a frame
    pub const EOP: u32 = 0x4000;
    /// First buffer of a frame
    pub const SOP: u32 = 0x2000;
    /// Frame too long
    pub const LG: u32 = 0x10;
    /// Non-octet aligned
    pub const NO: u32 = 0x08;
    /// Receive error signalled by the PHY
    pub const RXER: u32 = 0x04;
    /// CRC mismatch
    pub const CRC: u32 = 0x02;
    /// FIFO overrun
    pub const OV: u32 = 0x01;
    /// Every error bit
    pub const ERRORS: u32 = LG | NO | RXER | CRC | OV;
}

/// `length_status` flags written for transmit
pub mod tx {
    /// Length field shift
    pub const LEN_SHIFT: u32 = 16;
    /// Last buffer of a frame
    pub const EOP: u32 = 0x4000;
    /// First buffer of a frame
    pub const SOP: u32 = 0x2000;
    /// Append the Ethernet CRC
    pub const APPEND_CRC: u32 = 0x40;
    /// Priority tag field, all ones for the default queue
    pub const QTAG: u32 = 0x3F << 7;
}

/// Ownership of a ring slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorState {
    /// Free; the driver may bind a buffer
    #[default]
    DriverOwned,
    /// Posted; only the hardware may touch the buffer
    HardwareOwned,
    /// Hardware is done; the driver may reclaim the buffer
    Completed {
        /// Bytes transferred
        length: usize,
        /// Raw `length_status` flags
        status: u32,
    },
}

/// Driver-side bookkeeping for one ring slot
#[derive(Debug, Default)]
pub struct Descriptor {
    buffer: Option<FrameBuffer>,
    length: usize,
    state: DescriptorState,
}

impl Descriptor {
    /// Free slot without a buffer
    pub const fn new() -> Self {
        Self {
            buffer: None,
            length: 0,
            state: DescriptorState::DriverOwned,
        }
    }

    /// Current ownership state
    #[inline(always)]
    pub fn state(&self) -> DescriptorState {
        self.state
    }

    /// Whether the hardware owns this slot
    #[inline(always)]
    pub fn is_hardware_owned(&self) -> bool {
        self.state == DescriptorState::HardwareOwned
    }

    /// Whether the hardware has completed this slot
    #[inline(always)]
    pub fn is_completed(&self) -> bool {
        matches!(self.state, DescriptorState::Completed { .. })
    }

    /// Bind `buffer` carrying `length` bytes and hand the slot to hardware
    pub fn post(&mut self, buffer: FrameBuffer, length: usize) {
        debug_assert!(self.state == DescriptorState::DriverOwned);
        self.buffer = Some(buffer);
        self.length = length;
        self.state = DescriptorState::HardwareOwned;
    }

    /// Record hardware completion
    pub fn complete(&mut self, length: usize, status: u32) {
        self.state = DescriptorState::Completed { length, status };
    }

    /// Record hardware completion with the posted length
    pub fn complete_posted(&mut self) {
        self.complete(self.length, 0);
    }

    /// Return the slot to the driver, handing back its buffer
    pub fn reclaim(&mut self) -> Option<FrameBuffer> {
        self.state = DescriptorState::DriverOwned;
        self.length = 0;
        self.buffer.take()
    }

    /// Length posted with the buffer
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bound buffer, if any
    pub fn buffer(&self) -> Option<&FrameBuffer> {
        self.buffer.as_ref()
    }
}

/// Register-space view of one hardware descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwDescriptor {
    offset: usize,
}

impl HwDescriptor {
    const LENGTH_STATUS: usize = 0;
    const ADDR_LO: usize = 4;
    const ADDR_HI: usize = 8;

    /// Descriptor at register offset `offset`
    pub const fn at(offset: usize) -> Self {
        Self { offset }
    }

    /// Program buffer address then `length_status`
    pub fn write<R: RegisterBlock>(&self, regs: &R, addr: u64, length_status: u32) {
        regs.write(self.offset + Self::ADDR_LO, addr as u32);
        regs.write(self.offset + Self::ADDR_HI, (addr >> 32) as u32);
        regs.write(self.offset + Self::LENGTH_STATUS, length_status);
    }

    /// Read `length_status`
    pub fn length_status<R: RegisterBlock>(&self, regs: &R) -> u32 {
        regs.read(self.offset + Self::LENGTH_STATUS)
    }

    /// Read the programmed buffer address
    pub fn addr<R: RegisterBlock>(&self, regs: &R) -> u64 {
        u64::from(regs.read(self.offset + Self::ADDR_LO))
            | (u64::from(regs.read(self.offset + Self::ADDR_HI)) << 32)
    }
}

/// Received length encoded in `length_status`
#[inline(always)]
pub const fn rx_length(length_status: u32) -> usize {
    ((length_status >> status::LEN_SHIFT) & status::LEN_MASK) as usize
}

/// Whether `length_status` describes a complete, error-free single-buffer frame
#[inline(always)]
pub const fn rx_frame_ok(length_status: u32) -> bool {
    let framed = status::SOP | status::EOP;
    (length_status & framed) == framed && (length_status & status::ERRORS) == 0
}

/// `length_status` for a single-buffer transmit of `length` bytes
#[inline(always)]
pub const fn tx_length_status(length: usize) -> u32 {
    ((length as u32) << tx::LEN_SHIFT) | tx::SOP | tx::EOP | tx::APPEND_CRC | tx::QTAG
}
