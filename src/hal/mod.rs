//! Hardware Abstraction Layer
//!
//! Higher-level abstractions over the raw registers and the platform
//! services the driver depends on.
//!
//! # Modules
//!
//! - [`cache`]: Data cache maintenance for DMA buffers
//! - [`irq`]: Interrupt registration and dispatch traits
//! - [`mdio`]: MDIO bus for PHY communication
//! - [`reset`]: UMAC soft reset
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your platform.

pub mod cache;
pub mod irq;
pub mod mdio;
pub mod reset;

// Re-export commonly used types
pub use irq::{InterruptRegistrar, IrqHandler};
pub use mdio::{MdioBus, MdioController};
pub use reset::ResetController;
