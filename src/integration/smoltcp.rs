//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! This module provides integration with the [smoltcp](https://docs.rs/smoltcp) network stack.
//! It implements the `smoltcp::phy::Device` trait for the GENET [`Device`], allowing it to be
//! used as a network interface with smoltcp's TCP/IP stack.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::IpCidr;
//! use genet_mac::integration::ethernet_address;
//!
//! device.initialize(DeviceConfig::new()).unwrap();
//!
//! let config = Config::new(ethernet_address(&device).into());
//! let mut iface = Interface::new(config, &mut device, smoltcp::time::Instant::ZERO);
//!
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Features
//!
//! This module is only available when the `smoltcp` feature is enabled in Cargo.toml:
//! ```toml
//! [dependencies]
//! genet-mac = { version = "0.1", features = ["smoltcp"] }
//! ```
//!
//! # Token Ownership
//!
//! smoltcp's `receive()` hands out an `RxToken` and a `TxToken` together. The
//! received frame is copied out of the ring before the tokens are created, so
//! the RX token owns its bytes and only the TX token borrows the device.

use embedded_hal::delay::DelayNs;
use smoltcp::phy::{self, Checksum, ChecksumCapabilities, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::buffer::BufferAllocator;
use crate::driver::config::State;
use crate::driver::device::Device;
use crate::internal::constants::{FRAME_BUFFER_SIZE, MAX_FRAME_SIZE, MTU};
use crate::internal::register::RegisterBlock;

// =============================================================================
// RX Token
// =============================================================================

/// Receive token for smoltcp
///
/// Holds one frame already copied out of the RX ring.
pub struct GenetRxToken {
    buffer: [u8; FRAME_BUFFER_SIZE],
    len: usize,
}

impl phy::RxToken for GenetRxToken {
    fn consume<T, F>(self, f: F) -> T
    where
        F: FnOnce(&[u8]) -> T,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token for smoltcp
///
/// Borrows the device until the frame is built and queued.
pub struct GenetTxToken<'a, R, D, A, const RX: usize, const TX: usize>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    device: &'a mut Device<R, D, A, RX, TX>,
}

impl<R, D, A, const RX: usize, const TX: usize> phy::TxToken for GenetTxToken<'_, R, D, A, RX, TX>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    fn consume<T, F>(self, len: usize, f: F) -> T
    where
        F: FnOnce(&mut [u8]) -> T,
    {
        let len = len.min(MAX_FRAME_SIZE);
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let result = f(&mut buffer[..len]);

        // A refused frame is dropped; smoltcp's upper layers retransmit
        self.device.send_frame(&buffer[..len]);

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<R, D, A, const RX: usize, const TX: usize> phy::Device for Device<R, D, A, RX, TX>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    type RxToken<'a>
        = GenetRxToken
    where
        Self: 'a;
    type TxToken<'a>
        = GenetTxToken<'a, R, D, A, RX, TX>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if self.state() != State::Running {
            return None;
        }

        let mut buffer = [0u8; FRAME_BUFFER_SIZE];
        let len = self.receive_frame(&mut buffer)?;
        Some((GenetRxToken { buffer, len }, GenetTxToken { device: self }))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if !self.is_send_advisable() {
            return None;
        }
        Some(GenetTxToken { device: self })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        caps.max_transmission_unit = MTU;
        caps.max_burst_size = Some(1);

        // No checksum offload; smoltcp computes and verifies everything
        caps.checksum = ChecksumCapabilities::default();
        caps.checksum.ipv4 = Checksum::Both;
        caps.checksum.udp = Checksum::Both;
        caps.checksum.tcp = Checksum::Both;
        caps.checksum.icmpv4 = Checksum::Both;

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
///
/// This is a convenience function for creating smoltcp interface configurations.
pub fn ethernet_address<R, D, A, const RX: usize, const TX: usize>(
    device: &Device<R, D, A, RX, TX>,
) -> smoltcp::wire::EthernetAddress
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    smoltcp::wire::EthernetAddress(device.mac_address())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::driver::config::DeviceConfig;
    use crate::testing::{MockAllocator, MockDelay, MockRegisters, TEST_PHY_ADDR};
    use smoltcp::phy::{Device as _, RxToken as _, TxToken as _};

    const MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x01, 0x02, 0x03];

    type TestDevice = Device<MockRegisters, MockDelay, MockAllocator, 4, 4>;

    fn running() -> TestDevice {
        let mut dev = Device::new(MockRegisters::genet_v5(), MockDelay::new(), MockAllocator::new(16));
        dev.initialize(
            DeviceConfig::new()
                .with_mac_address(MAC)
                .with_phy_address(TEST_PHY_ADDR),
        )
        .unwrap();
        dev
    }

    #[test]
    fn capabilities_describe_plain_ethernet() {
        let dev = running();
        let caps = dev.capabilities();

        assert_eq!(caps.medium, Medium::Ethernet);
        assert_eq!(caps.max_transmission_unit, MTU);
        assert_eq!(caps.max_burst_size, Some(1));
        assert!(matches!(caps.checksum.tcp, Checksum::Both));
    }

    #[test]
    fn receive_without_frame_yields_nothing() {
        let mut dev = running();
        assert!(dev.receive(Instant::ZERO).is_none());
    }

    #[test]
    fn receive_hands_frame_to_stack() {
        let mut dev = running();
        assert!(dev.registers().deliver_rx(&[0x5A; 80]));

        let (rx, _tx) = dev.receive(Instant::ZERO).unwrap();
        let (len, first) = rx.consume(|frame| (frame.len(), frame[0]));
        assert_eq!((len, first), (80, 0x5A));
        assert_eq!(dev.stats().rx_frames, 1);
    }

    #[test]
    fn transmit_token_queues_frame() {
        let mut dev = running();

        let tx = dev.transmit(Instant::ZERO).unwrap();
        tx.consume(64, |buf| buf.fill(0xEE));

        assert_eq!(dev.tx_in_flight(), 1);
    }

    #[test]
    fn transmit_unavailable_when_ring_full() {
        let mut dev = running();
        for _ in 0..3 {
            dev.transmit(Instant::ZERO)
                .unwrap()
                .consume(64, |buf| buf.fill(0));
        }
        assert!(dev.transmit(Instant::ZERO).is_none());
    }

    #[test]
    fn transmit_unavailable_before_initialization() {
        let mut dev: TestDevice =
            Device::new(MockRegisters::genet_v5(), MockDelay::new(), MockAllocator::new(16));
        assert!(dev.transmit(Instant::ZERO).is_none());
        assert!(dev.receive(Instant::ZERO).is_none());
    }

    #[test]
    fn ethernet_address_matches_device() {
        let dev = running();
        assert_eq!(ethernet_address(&dev).0, MAC);
    }
}
