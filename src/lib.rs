//! Broadcom GENET v5 Ethernet Driver
//!
//! A `no_std`, `no_alloc` driver for the GENET v5 Ethernet MAC found in the
//! BCM2711 (Raspberry Pi 4), paired with the onboard BCM54213PE gigabit PHY.
//!
//! # Architecture
//!
//! The driver is organized into layers:
//!
//! 1. **Device Facade** ([`Device`]): initialization, frame send/receive,
//!    link queries and the interrupt entry point
//! 2. **MAC Layer** ([`driver::mac`]): UMAC bring-up, address and link programming
//! 3. **DMA Layer**: TX/RX descriptor rings driven through the GENET
//!    producer/consumer indices
//! 4. **PHY Layer** ([`phy`]): BCM54213PE bring-up and link polling over MDIO
//! 5. **HAL Layer** ([`hal`]): MDIO, soft reset, cache maintenance and
//!    interrupt registration traits
//!
//! The hardware is reached only through the [`RegisterBlock`] trait, so every
//! layer runs on the host against a simulated register file in tests.
//!
//! # Platform Services
//!
//! The caller supplies:
//!
//! - a [`RegisterBlock`] (usually [`Mmio`] over the mapped GENET window)
//! - an `embedded_hal::delay::DelayNs` implementation
//! - a [`BufferAllocator`] handing out DMA frame buffers ([`StaticPool`] works
//!   for most boards)
//! - an [`InterruptRegistrar`] when using [`SharedDevice`]
//!
//! # Features
//!
//! - `critical-section` (default): Enable the ISR-safe [`SharedDevice`] wrapper
//! - `defmt`: Route driver logging through defmt and derive `defmt::Format`
//! - `log`: Route driver logging through the `log` facade (ignored when
//!   `defmt` is also enabled)
//! - `smoltcp`: Enable smoltcp network stack integration
//!
//! # Example
//!
//! ```ignore
//! use genet_mac::{Device, DeviceConfig, Mmio, StaticPool};
//! use genet_mac::constants::GENET_BASE;
//! use genet_mac::sync::SharedDevice;
//!
//! static ETH: SharedDevice<Mmio, Delay, StaticPool<600>> = SharedDevice::new();
//!
//! let storage = STORAGE.init([const { FrameStorage::new() }; 600]);
//! let regs = unsafe { Mmio::new(GENET_BASE) };
//! let device = Device::new(regs, Delay::new(), StaticPool::new(storage));
//! ETH.initialize(device, DeviceConfig::new(), &mut gic)?;
//!
//! if ETH.is_send_advisable() {
//!     ETH.send_frame(&frame);
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default configuration (256 RX and 256 TX descriptors, 1600-byte
//! buffers) the RX ring alone holds about 400 KB; the pool must also cover
//! frames in flight on the TX ring.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod buffer;
pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use buffer::{BufferAllocator, FrameBuffer, FrameStorage, StaticPool};
pub use driver::config::{DeviceConfig, Duplex, LinkSpeed, Speed, State};
pub use driver::device::{Device, DeviceStats, GenetDevice};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result,
};
pub use driver::interrupt::InterruptStatus;
pub use hal::{InterruptRegistrar, IrqHandler, MdioBus, MdioController};
pub use internal::register::{Mmio, RegisterBlock};

// Re-export PHY types
pub use phy::{Bcm54213, LinkState, LinkStatus};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{CriticalSectionCell, SharedDevice};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Timing
        DEFAULT_MDIO_ATTEMPTS,
        // Device defaults
        DEFAULT_PHY_ADDR,
        DEFAULT_RESET_ATTEMPTS,
        // Ring sizes
        DEFAULT_RX_DESCRIPTORS,
        DEFAULT_TX_DESCRIPTORS,
        ETH_HEADER_SIZE,
        FRAME_BUFFER_ALIGN,
        // Frame/buffer sizes
        FRAME_BUFFER_SIZE,
        GENET_BASE,
        GENET_IRQ,
        HW_DESCRIPTOR_COUNT,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        MAX_PHY_ADDR,
        MIN_FRAME_SIZE,
        MTU,
    };
}
