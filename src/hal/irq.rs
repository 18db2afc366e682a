//! Interrupt substrate traits
//!
//! The driver does not own the interrupt controller. The kernel supplies an
//! [`InterruptRegistrar`] that routes a hardware line to an [`IrqHandler`],
//! and calls [`IrqHandler::handle_irq`] from its dispatcher.

/// Handler invoked by the kernel's interrupt dispatcher
pub trait IrqHandler: Sync {
    /// Service the interrupt. Called in interrupt context.
    fn handle_irq(&self);
}

/// Registration interface of the kernel's interrupt controller
pub trait InterruptRegistrar {
    /// Route `irq` to `handler` and enable the line.
    ///
    /// Returns `false` if the line is invalid or already claimed.
    fn register(&mut self, irq: u32, handler: &'static dyn IrqHandler) -> bool;
}

impl<T: InterruptRegistrar + ?Sized> InterruptRegistrar for &mut T {
    fn register(&mut self, irq: u32, handler: &'static dyn IrqHandler) -> bool {
        (**self).register(irq, handler)
    }
}
