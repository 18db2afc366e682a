//! Memory-mapped register access for the GENET block
//!
//! All register traffic goes through the [`RegisterBlock`] trait so the driver
//! can run against the real controller ([`Mmio`]) or a simulated one in tests.
//! Offsets in the submodules are relative to the GENET base address.

pub mod dma;
pub mod intrl2;
pub mod sys;
pub mod umac;

/// 32-bit register window addressed by byte offset.
///
/// Implementations must perform every access exactly once and in program
/// order (volatile semantics).
pub trait RegisterBlock {
    /// Read the register at `offset`
    fn read(&self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`
    fn write(&self, offset: usize, value: u32);

    /// Read-modify-write the register at `offset`
    #[inline(always)]
    fn modify<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Set bits in a register (read-modify-write)
    #[inline(always)]
    fn set_bits(&self, offset: usize, bits: u32) {
        self.modify(offset, |v| v | bits);
    }

    /// Clear bits in a register (read-modify-write)
    #[inline(always)]
    fn clear_bits(&self, offset: usize, bits: u32) {
        self.modify(offset, |v| v & !bits);
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &T {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value);
    }
}

/// Volatile MMIO window over the physical GENET registers.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Create a register window at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the mapped, device-memory address of a GENET block and
    /// no other code may drive the same block concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the window
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterBlock for Mmio {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: `Mmio::new` contract guarantees the window is valid and aligned.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        // SAFETY: `Mmio::new` contract guarantees the window is valid and aligned.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRegisters;

    #[test]
    fn modify_applies_closure() {
        let regs = MockRegisters::new();
        regs.write(0x10, 0x0F);
        regs.modify(0x10, |v| v << 4);
        assert_eq!(regs.read(0x10), 0xF0);
    }

    #[test]
    fn set_and_clear_bits() {
        let regs = MockRegisters::new();
        regs.set_bits(0x20, 0b1010);
        regs.set_bits(0x20, 0b0001);
        assert_eq!(regs.read(0x20), 0b1011);
        regs.clear_bits(0x20, 0b0010);
        assert_eq!(regs.read(0x20), 0b1001);
    }

    #[test]
    fn reference_forwards_to_block() {
        let regs = MockRegisters::new();
        let by_ref = &regs;
        by_ref.write(0x30, 7);
        assert_eq!(regs.read(0x30), 7);
    }

    #[test]
    fn mmio_reads_and_writes_memory() {
        let mut backing = [0u32; 4];
        // SAFETY: the window covers `backing`, which outlives `mmio`.
        let mmio = unsafe { Mmio::new(backing.as_mut_ptr() as usize) };
        mmio.write(8, 0xDEAD_BEEF);
        assert_eq!(mmio.read(8), 0xDEAD_BEEF);
        assert_eq!(backing[2], 0xDEAD_BEEF);
    }
}
