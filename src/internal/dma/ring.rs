//! Circular descriptor ring with producer and consumer indices.
//!
//! One slot is always left empty so that a full ring (`N - 1` in flight) and
//! an empty ring (producer == consumer) are distinguishable.

use super::descriptor::Descriptor;
use crate::buffer::FrameBuffer;

/// Fixed-capacity ring of `N` descriptors
pub struct DescriptorRing<const N: usize> {
    /// Array of descriptors
    pub(super) descriptors: [Descriptor; N],
    /// Next slot the driver posts to
    producer: usize,
    /// Oldest slot not yet reclaimed
    consumer: usize,
}

impl<const N: usize> DescriptorRing<N> {
    const VALID: () = assert!(N >= 2, "a descriptor ring needs at least two slots");

    /// Create an empty ring. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self {
            descriptors: [const { Descriptor::new() }; N],
            producer: 0,
            consumer: 0,
        }
    }

    /// Get the number of descriptors in the ring
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Maximum number of descriptors in flight
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Producer index
    #[inline(always)]
    pub const fn producer_index(&self) -> usize {
        self.producer
    }

    /// Consumer index
    #[inline(always)]
    pub const fn consumer_index(&self) -> usize {
        self.consumer
    }

    /// Slots between consumer and producer
    #[inline(always)]
    pub const fn in_flight(&self) -> usize {
        (self.producer + N - self.consumer) % N
    }

    /// No slot in flight
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.producer == self.consumer
    }

    /// `N - 1` slots in flight; the next post would collide with the consumer
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.in_flight() == N - 1
    }

    /// Advance the producer index by one, wrapping around
    #[inline(always)]
    pub fn advance_producer(&mut self) {
        debug_assert!(!self.is_full());
        self.producer = (self.producer + 1) % N;
    }

    /// Advance the consumer index by one, wrapping around
    #[inline(always)]
    pub fn advance_consumer(&mut self) {
        debug_assert!(!self.is_empty());
        self.consumer = (self.consumer + 1) % N;
    }

    /// Descriptor at the producer index
    #[inline(always)]
    pub fn producer_slot_mut(&mut self) -> &mut Descriptor {
        &mut self.descriptors[self.producer]
    }

    /// Descriptor at the consumer index
    #[inline(always)]
    pub fn consumer_slot(&self) -> &Descriptor {
        &self.descriptors[self.consumer]
    }

    /// Mutable descriptor at the consumer index
    #[inline(always)]
    pub fn consumer_slot_mut(&mut self) -> &mut Descriptor {
        &mut self.descriptors[self.consumer]
    }

    /// Get a reference to a descriptor at a specific index
    #[inline(always)]
    pub fn get(&self, index: usize) -> &Descriptor {
        &self.descriptors[index % N]
    }

    /// Mark up to `count` hardware-owned slots completed, oldest first.
    ///
    /// Already completed slots at the head of the ring are skipped. `status`
    /// is called with each slot index and returns its `(length, status)`.
    /// Returns the number of slots marked.
    pub fn complete_oldest(
        &mut self,
        count: usize,
        mut status: impl FnMut(usize, &Descriptor) -> (usize, u32),
    ) -> usize {
        let mut marked = 0;
        let mut index = self.consumer;
        for _ in 0..self.in_flight() {
            if marked == count {
                break;
            }
            let desc = &mut self.descriptors[index];
            if desc.is_hardware_owned() {
                let (length, flags) = status(index, desc);
                desc.complete(length, flags);
                marked += 1;
            }
            index = (index + 1) % N;
        }
        marked
    }

    /// Number of completed slots from the consumer forward
    pub fn completed(&self) -> usize {
        let mut count = 0;
        let mut index = self.consumer;
        for _ in 0..self.in_flight() {
            if !self.descriptors[index].is_completed() {
                break;
            }
            count += 1;
            index = (index + 1) % N;
        }
        count
    }

    /// Reclaim every slot in flight, oldest first, passing each bound buffer
    /// to `release`, and rewind both indices to slot 0.
    pub fn drain(&mut self, mut release: impl FnMut(FrameBuffer)) -> usize {
        let mut released = 0;
        while !self.is_empty() {
            if let Some(buffer) = self.descriptors[self.consumer].reclaim() {
                release(buffer);
                released += 1;
            }
            self.consumer = (self.consumer + 1) % N;
        }
        self.producer = 0;
        self.consumer = 0;
        released
    }
}

impl<const N: usize> Default for DescriptorRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::buffer::{FrameBuffer, FrameStorage};
    use crate::internal::dma::descriptor::DescriptorState;
    use std::boxed::Box;

    fn buffer() -> FrameBuffer {
        FrameBuffer::new(Box::leak(Box::new(FrameStorage::new())))
    }

    fn post(ring: &mut DescriptorRing<4>, len: usize) {
        ring.producer_slot_mut().post(buffer(), len);
        ring.advance_producer();
    }

    #[test]
    fn new_ring_is_empty() {
        let ring: DescriptorRing<4> = DescriptorRing::new();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.capacity(), 3);
        assert_eq!(ring.in_flight(), 0);
    }

    #[test]
    fn ring_full_leaves_one_slot() {
        let mut ring: DescriptorRing<4> = DescriptorRing::new();
        post(&mut ring, 60);
        post(&mut ring, 60);
        assert!(!ring.is_full());
        post(&mut ring, 60);
        assert!(ring.is_full());
        assert_eq!(ring.in_flight(), 3);
        assert_eq!(ring.producer_index(), 3);
    }

    #[test]
    fn indices_wrap() {
        let mut ring: DescriptorRing<4> = DescriptorRing::new();
        for _ in 0..10 {
            post(&mut ring, 60);
            ring.consumer_slot_mut().complete_posted();
            ring.consumer_slot_mut().reclaim();
            ring.advance_consumer();
        }
        assert!(ring.is_empty());
        assert_eq!(ring.producer_index(), 10 % 4);
        assert_eq!(ring.consumer_index(), 10 % 4);
    }

    #[test]
    fn complete_oldest_marks_in_order() {
        let mut ring: DescriptorRing<4> = DescriptorRing::new();
        post(&mut ring, 10);
        post(&mut ring, 20);
        post(&mut ring, 30);

        let marked = ring.complete_oldest(2, |_, desc| (desc.buffer().map_or(0, |_| 1), 0));
        assert_eq!(marked, 2);
        assert!(ring.get(0).is_completed());
        assert!(ring.get(1).is_completed());
        assert!(ring.get(2).is_hardware_owned());
        assert_eq!(ring.completed(), 2);

        // already completed slots are skipped
        let mut seen = std::vec::Vec::new();
        let marked = ring.complete_oldest(5, |index, _| {
            seen.push(index);
            (0, 0)
        });
        assert_eq!(marked, 1);
        assert_eq!(seen, [2]);
        assert_eq!(ring.completed(), 3);
    }

    #[test]
    fn complete_oldest_ignores_free_slots() {
        let mut ring: DescriptorRing<4> = DescriptorRing::new();
        assert_eq!(ring.complete_oldest(3, |_, _| (0, 0)), 0);
        assert_eq!(ring.consumer_slot().state(), DescriptorState::DriverOwned);
    }

    #[test]
    fn drain_releases_every_buffer_and_rewinds() {
        let mut ring: DescriptorRing<4> = DescriptorRing::new();
        post(&mut ring, 10);
        post(&mut ring, 20);
        ring.consumer_slot_mut().complete_posted();
        ring.consumer_slot_mut().reclaim();
        ring.advance_consumer();
        post(&mut ring, 30);
        post(&mut ring, 40);
        ring.complete_oldest(1, |_, desc| (desc.length(), 0));

        let mut released = 0;
        assert_eq!(ring.drain(|_| released += 1), 3);
        assert_eq!(released, 3);
        assert!(ring.is_empty());
        assert_eq!(ring.producer_index(), 0);
        assert!(matches!(ring.get(3).state(), DescriptorState::DriverOwned));
    }
}
