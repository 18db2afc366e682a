//! Core driver components for the GENET controller.
//!
//! This module contains the building blocks for bringing up and operating
//! the Ethernet MAC:
//!
//! - [`config`] - Configuration types and builder
//! - [`error`] - Error types and result aliases
//! - [`mac`] - UMAC bring-up and link programming
//! - [`interrupt`] - INTRL2 status decoding
//! - [`device`] - The device facade
//!
//! # Example
//!
//! ```ignore
//! use genet_mac::driver::{Device, DeviceConfig};
//!
//! let config = DeviceConfig::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! device.initialize(config)?;
//! ```

// Submodules
pub mod config;
pub mod device;
pub mod error;
pub mod interrupt;
pub mod mac;

// Re-exports for convenience
pub use config::{DeviceConfig, Duplex, LinkSpeed, Speed, State};
pub use device::{Device, DeviceStats, GenetDevice};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use interrupt::InterruptStatus;
pub use mac::MacController;
