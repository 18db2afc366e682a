//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - Implements `smoltcp::phy::Device` for [`Device`](crate::Device)
//!   - RX/TX token support
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::phy::Device;
//! let (rx, tx) = device.receive(Instant::ZERO).unwrap();
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{GenetRxToken, GenetTxToken, ethernet_address};
