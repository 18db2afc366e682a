//! Data cache maintenance for DMA buffers.
//!
//! GENET is not cache coherent on BCM2711: transmit buffers must be cleaned
//! to the point of coherency before the engine reads them, and receive
//! buffers invalidated before the CPU reads what the engine wrote. On other
//! targets (including host tests) both operations reduce to a compiler fence.

use core::sync::atomic::{Ordering, compiler_fence};

/// Cache line size assumed for maintenance operations
pub const CACHE_LINE_SIZE: usize = 64;

/// Write back any dirty lines covering `[addr, addr + len)`.
#[inline]
pub fn clean(addr: usize, len: usize) {
    compiler_fence(Ordering::SeqCst);
    #[cfg(target_arch = "aarch64")]
    for_each_line(addr, len, |line| {
        // SAFETY: DC CVAC only writes back a line; the caller owns the buffer.
        unsafe { core::arch::asm!("dc cvac, {addr}", addr = in(reg) line, options(nostack)) }
    });
    #[cfg(not(target_arch = "aarch64"))]
    let _ = (addr, len);
    barrier();
}

/// Discard cached lines covering `[addr, addr + len)` so the next read
/// observes what the DMA engine wrote.
#[inline]
pub fn invalidate(addr: usize, len: usize) {
    #[cfg(target_arch = "aarch64")]
    for_each_line(addr, len, |line| {
        // SAFETY: clean+invalidate never loses data the CPU wrote; the caller owns the buffer.
        unsafe { core::arch::asm!("dc civac, {addr}", addr = in(reg) line, options(nostack)) }
    });
    #[cfg(not(target_arch = "aarch64"))]
    let _ = (addr, len);
    barrier();
    compiler_fence(Ordering::SeqCst);
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn for_each_line(addr: usize, len: usize, mut op: impl FnMut(usize)) {
    let start = addr & !(CACHE_LINE_SIZE - 1);
    let end = addr + len;
    let mut line = start;
    while line < end {
        op(line);
        line += CACHE_LINE_SIZE;
    }
}

#[inline]
fn barrier() {
    #[cfg(target_arch = "aarch64")]
    // SAFETY: DSB has no memory-safety preconditions.
    unsafe {
        core::arch::asm!("dsb sy", options(nostack));
    }
}
