//! Synchronization and Concurrency Support
//!
//! This module provides the pieces that let mainline code and the interrupt
//! handler share one device:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] - ISR-safe
//!   interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedDevice`] - a static slot holding
//!   the device, registered as the GENET [`IrqHandler`](crate::hal::IrqHandler)
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use genet_mac::sync::SharedDevice;
//!
//! static ETH: SharedDevice<Mmio, Delay, StaticPool<600>> = SharedDevice::new();
//!
//! fn main() {
//!     let regs = unsafe { Mmio::new(GENET_BASE) };
//!     let device = Device::new(regs, delay, pool);
//!     ETH.initialize(device, DeviceConfig::new(), &mut gic).unwrap();
//!
//!     let mut frame = [0u8; FRAME_BUFFER_SIZE];
//!     if let Some(len) = ETH.receive_frame(&mut frame) {
//!         // Hand &frame[..len] to the network stack
//!     }
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedDevice;
