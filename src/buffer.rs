//! Frame buffers and the allocator seam.
//!
//! The driver never allocates memory itself. Every buffer posted to a
//! descriptor ring comes from a [`BufferAllocator`] supplied by the kernel and
//! is handed back through [`BufferAllocator::release`] once the hardware is
//! done with it.
//!
//! [`StaticPool`] is a ready-made allocator over a statically reserved array
//! of [`FrameStorage`] blocks:
//!
//! ```ignore
//! use genet_mac::buffer::{FrameStorage, StaticPool};
//!
//! static mut FRAMES: [FrameStorage; 512] = [const { FrameStorage::new() }; 512];
//!
//! // SAFETY: taken exactly once during boot.
//! let pool: StaticPool<512> = StaticPool::new(unsafe { &mut *core::ptr::addr_of_mut!(FRAMES) });
//! ```

use crate::internal::constants::{FRAME_BUFFER_ALIGN, FRAME_BUFFER_SIZE};
use crate::internal::logging::warn;

/// Backing storage for one frame buffer, aligned to a cache line.
#[repr(C, align(64))]
pub struct FrameStorage {
    bytes: [u8; FRAME_BUFFER_SIZE],
}

const _: () = assert!(core::mem::align_of::<FrameStorage>() == FRAME_BUFFER_ALIGN);

impl FrameStorage {
    /// Zeroed storage (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BUFFER_SIZE],
        }
    }
}

impl Default for FrameStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive handle to one DMA-capable frame buffer.
///
/// While a `FrameBuffer` sits in a descriptor ring, the ring is its only
/// owner; the type is deliberately not `Clone`.
pub struct FrameBuffer {
    storage: &'static mut FrameStorage,
}

impl FrameBuffer {
    /// Buffer capacity in bytes
    pub const CAPACITY: usize = FRAME_BUFFER_SIZE;

    /// Wrap storage as a frame buffer
    pub fn new(storage: &'static mut FrameStorage) -> Self {
        Self { storage }
    }

    /// Give the storage back
    pub fn into_storage(self) -> &'static mut FrameStorage {
        self.storage
    }

    /// Address the DMA engine uses for this buffer
    pub fn dma_addr(&self) -> u64 {
        self.storage.bytes.as_ptr() as usize as u64
    }

    /// Buffer contents
    pub fn as_slice(&self) -> &[u8] {
        &self.storage.bytes
    }

    /// Mutable buffer contents
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage.bytes
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("addr", &format_args!("{:#x}", self.dma_addr()))
            .finish()
    }
}

/// Source of DMA-safe frame buffers.
///
/// `allocate` returning `None` is reported by the driver as
/// [`DmaError::OutOfBuffers`](crate::DmaError::OutOfBuffers).
pub trait BufferAllocator {
    /// Take a free buffer, or `None` if the allocator is exhausted
    fn allocate(&mut self) -> Option<FrameBuffer>;

    /// Return a buffer previously obtained from [`allocate`](Self::allocate)
    fn release(&mut self, buffer: FrameBuffer);
}

impl<A: BufferAllocator + ?Sized> BufferAllocator for &mut A {
    fn allocate(&mut self) -> Option<FrameBuffer> {
        (**self).allocate()
    }

    fn release(&mut self, buffer: FrameBuffer) {
        (**self).release(buffer);
    }
}

/// Fixed pool of `N` frame buffers managed as a free stack.
pub struct StaticPool<const N: usize> {
    free: [Option<FrameBuffer>; N],
    available: usize,
    rejected: u32,
}

impl<const N: usize> StaticPool<N> {
    /// Build a pool owning every block of `storage`
    pub fn new(storage: &'static mut [FrameStorage; N]) -> Self {
        let mut blocks = storage.iter_mut();
        Self {
            free: core::array::from_fn(|_| blocks.next().map(FrameBuffer::new)),
            available: N,
            rejected: 0,
        }
    }

    /// Number of buffers currently free
    pub fn available(&self) -> usize {
        self.available
    }

    /// Total number of buffers
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Buffers released while the pool was already full
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

impl<const N: usize> BufferAllocator for StaticPool<N> {
    fn allocate(&mut self) -> Option<FrameBuffer> {
        if self.available == 0 {
            return None;
        }
        self.available -= 1;
        self.free[self.available].take()
    }

    fn release(&mut self, buffer: FrameBuffer) {
        if self.available == N {
            // double release or a buffer from another allocator; it stays leaked
            self.rejected = self.rejected.wrapping_add(1);
            warn!("buffer {:#x} released into a full pool", buffer.dma_addr());
            return;
        }
        self.free[self.available] = Some(buffer);
        self.available += 1;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::boxed::Box;

    fn leak_storage<const N: usize>() -> &'static mut [FrameStorage; N] {
        Box::leak(Box::new([const { FrameStorage::new() }; N]))
    }

    #[test]
    fn frame_storage_is_cache_aligned() {
        let storage = Box::leak(Box::new(FrameStorage::new()));
        let buffer = FrameBuffer::new(storage);
        assert_eq!(buffer.dma_addr() as usize % FRAME_BUFFER_ALIGN, 0);
        assert_eq!(buffer.as_slice().len(), FrameBuffer::CAPACITY);
    }

    #[test]
    fn pool_hands_out_every_buffer_once() {
        let mut pool: StaticPool<3> = StaticPool::new(leak_storage());
        assert_eq!(pool.capacity(), 3);

        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        let c = pool.allocate().unwrap();
        assert!(pool.allocate().is_none());
        assert_eq!(pool.available(), 0);

        assert_ne!(a.dma_addr(), b.dma_addr());
        assert_ne!(b.dma_addr(), c.dma_addr());
        assert_ne!(a.dma_addr(), c.dma_addr());
    }

    #[test]
    fn pool_reuses_released_buffer() {
        let mut pool: StaticPool<2> = StaticPool::new(leak_storage());
        let a = pool.allocate().unwrap();
        let addr = a.dma_addr();
        pool.release(a);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.allocate().unwrap().dma_addr(), addr);
    }

    #[test]
    fn pool_ignores_foreign_buffer_when_full() {
        let mut pool: StaticPool<1> = StaticPool::new(leak_storage());
        let foreign = FrameBuffer::new(Box::leak(Box::new(FrameStorage::new())));
        pool.release(foreign);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.rejected(), 1);

        // the pool's own buffer is still the one handed out
        let own = pool.allocate().unwrap();
        pool.release(own);
        assert_eq!(pool.rejected(), 1);
    }

    #[test]
    fn buffer_contents_are_writable() {
        let mut pool: StaticPool<1> = StaticPool::new(leak_storage());
        let mut buffer = pool.allocate().unwrap();
        buffer.as_mut_slice()[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(&buffer.as_slice()[..3], &[1, 2, 3]);
    }

    #[test]
    fn allocator_through_mut_reference() {
        fn cycle<A: BufferAllocator>(mut allocator: A) -> bool {
            match allocator.allocate() {
                Some(buffer) => {
                    allocator.release(buffer);
                    true
                }
                None => false,
            }
        }

        let mut pool: StaticPool<1> = StaticPool::new(leak_storage());
        assert!(cycle(&mut pool));
        assert_eq!(pool.available(), 1);
    }
}
