//! Ethernet PHY Drivers
//!
//! The PHY layer talks to the chip only through the [`MdioBus`] trait, so it
//! can be exercised against a mock bus without a MAC.
//!
//! # Supported PHY Chips
//!
//! - [`Bcm54213`]: Broadcom BCM54213PE (Raspberry Pi 4 onboard PHY)
//!
//! [`MdioBus`]: crate::hal::mdio::MdioBus

pub mod bcm54213;
pub mod generic;

pub use bcm54213::Bcm54213;
pub use generic::{LinkState, LinkStatus};
