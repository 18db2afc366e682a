//! DMA engine managing the TX/RX descriptor rings of queue 16.

use super::descriptor::{
    DescriptorState, HwDescriptor, rx_frame_ok, rx_length, tx_length_status,
};
use super::ring::DescriptorRing;
use crate::buffer::BufferAllocator;
use crate::driver::error::{DmaError, Result};
use crate::hal::cache;
use crate::internal::constants::{
    FRAME_BUFFER_SIZE, HW_DESCRIPTOR_COUNT, MAX_FRAME_SIZE, MIN_FRAME_SIZE,
};
use crate::internal::logging::{debug, warn};
use crate::internal::register::RegisterBlock;
use crate::internal::register::dma::{
    DESC_WORDS, DMA_CTRL_EN, DMA_MAX_BURST_LENGTH, DMA_RING16_BUF_EN, DEFAULT_RING, INDEX_MASK,
    RDMA_CONS_INDEX, RDMA_CTRL, RDMA_END_ADDR, RDMA_MBUF_DONE_THRESH, RDMA_PROD_INDEX,
    RDMA_READ_PTR, RDMA_RING_BUF_SIZE, RDMA_RING_CFG, RDMA_SCB_BURST_SIZE, RDMA_START_ADDR,
    RDMA_WRITE_PTR, RDMA_XON_XOFF_THRESH,
    TDMA_CONS_INDEX, TDMA_CTRL, TDMA_END_ADDR, TDMA_FLOW_PERIOD, TDMA_MBUF_DONE_THRESH,
    TDMA_PROD_INDEX, TDMA_READ_PTR, TDMA_RING_BUF_SIZE, TDMA_RING_CFG, TDMA_SCB_BURST_SIZE,
    TDMA_START_ADDR, TDMA_WRITE_PTR, rx_desc, tx_desc,
};

/// RDMA XON threshold programmed with the ring
const RX_XON_THRESHOLD: u32 = 5;

/// DMA engine for the default queue.
///
/// Buffers come from a caller-supplied [`BufferAllocator`]; every register
/// access goes through the caller's [`RegisterBlock`].
///
/// # Type Parameters
/// * `RX` - Number of receive descriptors
/// * `TX` - Number of transmit descriptors
pub struct DmaEngine<const RX: usize, const TX: usize> {
    /// RX descriptor ring
    rx_ring: DescriptorRing<RX>,
    /// TX descriptor ring
    tx_ring: DescriptorRing<TX>,
    /// Value last written to `RDMA_CONS_INDEX`
    rx_cons_hw: u32,
    /// `RDMA_PROD_INDEX` value already accounted for
    rx_prod_seen: u32,
    /// Value last written to `TDMA_PROD_INDEX`
    tx_prod_hw: u32,
    /// `TDMA_CONS_INDEX` value already accounted for
    tx_cons_seen: u32,
    /// Frames dropped for error status
    rx_errors: u32,
    /// Allocation requests the allocator could not satisfy
    alloc_failures: u32,
}

impl<const RX: usize, const TX: usize> DmaEngine<RX, TX> {
    const FITS: () = assert!(
        RX <= HW_DESCRIPTOR_COUNT && TX <= HW_DESCRIPTOR_COUNT,
        "ring larger than the hardware descriptor area"
    );

    /// Create an engine with empty rings. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::FITS;
        Self {
            rx_ring: DescriptorRing::new(),
            tx_ring: DescriptorRing::new(),
            rx_cons_hw: 0,
            rx_prod_seen: 0,
            tx_prod_hw: 0,
            tx_cons_seen: 0,
            rx_errors: 0,
            alloc_failures: 0,
        }
    }

    /// Program ring 16 of both engines and enable them.
    ///
    /// `TDMA_CONS_INDEX` and `RDMA_PROD_INDEX` are owned by the hardware and
    /// survive a reset, so the driver-side indices are aligned to whatever
    /// they hold (firmware may already have used the rings). The RX consumer
    /// index starts a full ring behind the producer so the hardware sees no
    /// free buffers until [`post_receive_buffers`] hands them over one at a
    /// time.
    ///
    /// [`post_receive_buffers`]: Self::post_receive_buffers
    pub fn configure<R: RegisterBlock>(&mut self, regs: &R) {
        self.disable(regs);

        let tx_cons = regs.read(TDMA_CONS_INDEX) & INDEX_MASK;
        regs.write(TDMA_SCB_BURST_SIZE, DMA_MAX_BURST_LENGTH);
        regs.write(TDMA_START_ADDR, 0);
        regs.write(TDMA_READ_PTR, 0);
        regs.write(TDMA_WRITE_PTR, 0);
        regs.write(TDMA_END_ADDR, TX as u32 * DESC_WORDS - 1);
        regs.write(TDMA_PROD_INDEX, tx_cons);
        regs.write(TDMA_MBUF_DONE_THRESH, 1);
        regs.write(TDMA_FLOW_PERIOD, 0);
        regs.write(
            TDMA_RING_BUF_SIZE,
            ((TX as u32) << 16) | FRAME_BUFFER_SIZE as u32,
        );
        self.tx_prod_hw = tx_cons;
        self.tx_cons_seen = tx_cons;

        let rx_prod = regs.read(RDMA_PROD_INDEX) & INDEX_MASK;
        let rx_cons = rx_prod.wrapping_sub(RX as u32) & INDEX_MASK;
        regs.write(RDMA_SCB_BURST_SIZE, DMA_MAX_BURST_LENGTH);
        regs.write(RDMA_START_ADDR, 0);
        regs.write(RDMA_READ_PTR, 0);
        regs.write(RDMA_WRITE_PTR, 0);
        regs.write(RDMA_END_ADDR, RX as u32 * DESC_WORDS - 1);
        regs.write(RDMA_CONS_INDEX, rx_cons);
        regs.write(RDMA_MBUF_DONE_THRESH, 1);
        regs.write(
            RDMA_RING_BUF_SIZE,
            ((RX as u32) << 16) | FRAME_BUFFER_SIZE as u32,
        );
        regs.write(
            RDMA_XON_XOFF_THRESH,
            (RX_XON_THRESHOLD << 16) | (RX as u32 >> 4),
        );
        self.rx_cons_hw = rx_cons;
        self.rx_prod_seen = rx_prod;

        regs.write(TDMA_RING_CFG, 1 << DEFAULT_RING);
        regs.write(RDMA_RING_CFG, 1 << DEFAULT_RING);
        self.enable(regs);
    }

    /// Stop both engines and hand every posted buffer back to `allocator`.
    ///
    /// Both rings are left empty at slot 0, ready for [`configure`](Self::configure).
    /// Returns the number of buffers released.
    pub fn shutdown<R: RegisterBlock, A: BufferAllocator>(
        &mut self,
        regs: &R,
        allocator: &mut A,
    ) -> usize {
        self.disable(regs);
        let released = self.rx_ring.drain(|buffer| allocator.release(buffer))
            + self.tx_ring.drain(|buffer| allocator.release(buffer));
        debug!("DMA stopped, {} buffers released", released);
        released
    }

    /// Start both engines on ring 16
    pub fn enable<R: RegisterBlock>(&mut self, regs: &R) {
        regs.write(TDMA_CTRL, DMA_CTRL_EN | DMA_RING16_BUF_EN);
        regs.write(RDMA_CTRL, DMA_CTRL_EN | DMA_RING16_BUF_EN);
    }

    /// Stop both engines
    pub fn disable<R: RegisterBlock>(&mut self, regs: &R) {
        regs.clear_bits(TDMA_CTRL, DMA_CTRL_EN);
        regs.clear_bits(RDMA_CTRL, DMA_CTRL_EN);
    }

    // =========================================================================
    // Receive
    // =========================================================================

    /// Fill every free RX slot with a fresh buffer.
    ///
    /// Returns the number of buffers posted. If the allocator runs dry the
    /// slots posted so far stay posted and `OutOfBuffers` is returned; a later
    /// call continues from the producer index.
    pub fn post_receive_buffers<R: RegisterBlock, A: BufferAllocator>(
        &mut self,
        regs: &R,
        allocator: &mut A,
    ) -> Result<usize> {
        let mut posted = 0;
        while !self.rx_ring.is_full() {
            let Some(buffer) = allocator.allocate() else {
                self.alloc_failures = self.alloc_failures.wrapping_add(1);
                debug!("RX refill stopped after {} buffers: allocator empty", posted);
                return Err(DmaError::OutOfBuffers.into());
            };

            let addr = buffer.dma_addr();
            cache::invalidate(addr as usize, FRAME_BUFFER_SIZE);

            let index = self.rx_ring.producer_index();
            HwDescriptor::at(rx_desc(index)).write(regs, addr, 0);
            self.rx_ring.producer_slot_mut().post(buffer, FRAME_BUFFER_SIZE);
            self.rx_ring.advance_producer();

            self.rx_cons_hw = (self.rx_cons_hw + 1) & INDEX_MASK;
            regs.write(RDMA_CONS_INDEX, self.rx_cons_hw);
            posted += 1;
        }
        Ok(posted)
    }

    /// Mark RX slots the hardware has filled since the last call.
    ///
    /// Returns the number of completed frames waiting to be taken.
    pub fn mark_received_frames<R: RegisterBlock>(&mut self, regs: &R) -> usize {
        let prod = regs.read(RDMA_PROD_INDEX) & INDEX_MASK;
        let filled = prod.wrapping_sub(self.rx_prod_seen) & INDEX_MASK;
        if filled != 0 {
            let marked = self.rx_ring.complete_oldest(filled as usize, |index, _| {
                let length_status = HwDescriptor::at(rx_desc(index)).length_status(regs);
                (rx_length(length_status), length_status)
            });
            self.rx_prod_seen = (self.rx_prod_seen + marked as u32) & INDEX_MASK;
        }
        self.rx_ring.completed()
    }

    /// Completed RX frames waiting to be taken
    pub fn rx_pending(&self) -> usize {
        self.rx_ring.completed()
    }

    /// Copy the oldest good frame into `out`.
    ///
    /// Errored frames ahead of it are dropped and their slots refilled. The
    /// ring is resynchronized with the hardware first, so frames are found
    /// even if the RX interrupt was missed.
    pub fn take_received_frame<R: RegisterBlock, A: BufferAllocator>(
        &mut self,
        regs: &R,
        allocator: &mut A,
        out: &mut [u8; FRAME_BUFFER_SIZE],
    ) -> Option<usize> {
        self.mark_received_frames(regs);

        for _ in 0..RX {
            let slot = self.rx_ring.consumer_slot_mut();
            let DescriptorState::Completed { length, status } = slot.state() else {
                return None;
            };
            let buffer = slot.reclaim()?;
            self.rx_ring.advance_consumer();

            let delivered = if rx_frame_ok(status) && length != 0 && length <= FRAME_BUFFER_SIZE {
                cache::invalidate(buffer.dma_addr() as usize, length);
                out[..length].copy_from_slice(&buffer.as_slice()[..length]);
                Some(length)
            } else {
                self.rx_errors = self.rx_errors.wrapping_add(1);
                warn!("RX frame dropped: status={:#x} len={}", status, length);
                None
            };

            allocator.release(buffer);
            // allocation failure is counted; the slot is refilled on a later call
            let _ = self.post_receive_buffers(regs, allocator);

            if delivered.is_some() {
                return delivered;
            }
        }
        None
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Whether a frame can be enqueued right now
    #[inline(always)]
    pub fn is_send_advisable(&self) -> bool {
        !self.tx_ring.is_full()
    }

    /// Copy `frame` into a fresh buffer and hand it to the TDMA engine.
    ///
    /// Frames shorter than the Ethernet minimum are zero-padded.
    pub fn enqueue_transmit<R: RegisterBlock, A: BufferAllocator>(
        &mut self,
        regs: &R,
        allocator: &mut A,
        frame: &[u8],
    ) -> Result<()> {
        if frame.is_empty() {
            return Err(DmaError::InvalidLength.into());
        }
        if frame.len() > MAX_FRAME_SIZE {
            return Err(DmaError::FrameTooLarge.into());
        }
        if self.tx_ring.is_full() {
            return Err(DmaError::RingFull.into());
        }
        let Some(mut buffer) = allocator.allocate() else {
            self.alloc_failures = self.alloc_failures.wrapping_add(1);
            return Err(DmaError::OutOfBuffers.into());
        };

        let length = frame.len().max(MIN_FRAME_SIZE);
        let data = buffer.as_mut_slice();
        data[..frame.len()].copy_from_slice(frame);
        data[frame.len()..length].fill(0);

        let addr = buffer.dma_addr();
        cache::clean(addr as usize, length);

        let index = self.tx_ring.producer_index();
        HwDescriptor::at(tx_desc(index)).write(regs, addr, tx_length_status(length));
        self.tx_ring.producer_slot_mut().post(buffer, length);
        self.tx_ring.advance_producer();

        self.tx_prod_hw = (self.tx_prod_hw + 1) & INDEX_MASK;
        regs.write(TDMA_PROD_INDEX, self.tx_prod_hw);
        Ok(())
    }

    /// Release the buffers of every transmitted frame, oldest first.
    ///
    /// Returns the number of frames and bytes reclaimed.
    pub fn reclaim_completed_transmits<R: RegisterBlock, A: BufferAllocator>(
        &mut self,
        regs: &R,
        allocator: &mut A,
    ) -> (usize, usize) {
        let cons = regs.read(TDMA_CONS_INDEX) & INDEX_MASK;
        let sent = cons.wrapping_sub(self.tx_cons_seen) & INDEX_MASK;
        if sent != 0 {
            let marked = self
                .tx_ring
                .complete_oldest(sent as usize, |_, desc| (desc.length(), 0));
            self.tx_cons_seen = (self.tx_cons_seen + marked as u32) & INDEX_MASK;
        }

        let mut frames = 0;
        let mut bytes = 0;
        while !self.tx_ring.is_empty() {
            let slot = self.tx_ring.consumer_slot_mut();
            let DescriptorState::Completed { length, .. } = slot.state() else {
                break;
            };
            if let Some(buffer) = slot.reclaim() {
                allocator.release(buffer);
            }
            self.tx_ring.advance_consumer();
            frames += 1;
            bytes += length;
        }
        (frames, bytes)
    }

    /// TX descriptors posted and not yet reclaimed
    pub fn tx_in_flight(&self) -> usize {
        self.tx_ring.in_flight()
    }

    /// RX buffers currently posted or completed
    pub fn rx_in_flight(&self) -> usize {
        self.rx_ring.in_flight()
    }

    /// Frames dropped for error status
    pub fn rx_errors(&self) -> u32 {
        self.rx_errors
    }

    /// Allocation failures seen while posting or enqueuing
    pub fn alloc_failures(&self) -> u32 {
        self.alloc_failures
    }
}

impl<const RX: usize, const TX: usize> Default for DmaEngine<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
