//! ISR-safe device wrapper using critical sections.
//!
//! Provides [`SharedDevice`], a static slot the device is installed into once
//! and then shared between mainline code and the interrupt handler.

use embedded_hal::delay::DelayNs;

use super::primitives::CriticalSectionCell;
use crate::buffer::BufferAllocator;
use crate::driver::config::{DeviceConfig, LinkSpeed};
use crate::driver::device::Device;
use crate::driver::error::{ConfigError, Result};
use crate::hal::irq::{InterruptRegistrar, IrqHandler};
use crate::internal::constants::{
    DEFAULT_RX_DESCRIPTORS, DEFAULT_TX_DESCRIPTORS, FRAME_BUFFER_SIZE, MAC_ADDR_LEN,
};
use crate::internal::logging::info;
use crate::internal::register::RegisterBlock;

/// ISR-safe device wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. The slot starts empty; every accessor
/// returns `None` (or `false`) until a device is installed.
///
/// # Example
///
/// ```ignore
/// static ETH: SharedDevice<Mmio, Delay, StaticPool<600>> = SharedDevice::new();
///
/// ETH.initialize(device, DeviceConfig::new(), &mut gic)?;
///
/// if ETH.is_send_advisable() {
///     ETH.send_frame(&frame);
/// }
/// ```
pub struct SharedDevice<
    R,
    D,
    A,
    const RX: usize = DEFAULT_RX_DESCRIPTORS,
    const TX: usize = DEFAULT_TX_DESCRIPTORS,
>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    inner: CriticalSectionCell<Option<Device<R, D, A, RX, TX>>>,
}

impl<R, D, A, const RX: usize, const TX: usize> SharedDevice<R, D, A, RX, TX>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Move `device` into the slot.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - a device is already installed
    pub fn install(&self, device: Device<R, D, A, RX, TX>) -> Result<()> {
        self.inner.with(|slot| {
            if slot.is_some() {
                return Err(ConfigError::AlreadyInitialized.into());
            }
            *slot = Some(device);
            Ok(())
        })
    }

    /// Whether a device has been installed
    pub fn is_installed(&self) -> bool {
        self.inner.with_ref(Option::is_some)
    }

    /// Execute a closure with exclusive access to the device.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut Device<R, D, A, RX, TX>) -> T,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or
    /// not installed.
    #[inline]
    pub fn try_with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut Device<R, D, A, RX, TX>) -> T,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    // =========================================================================
    // Facade
    // =========================================================================

    /// See [`Device::mac_address`]
    pub fn mac_address(&self) -> Option<[u8; MAC_ADDR_LEN]> {
        self.with(|dev| dev.mac_address())
    }

    /// See [`Device::is_send_advisable`]
    pub fn is_send_advisable(&self) -> bool {
        self.with(|dev| dev.is_send_advisable()).unwrap_or(false)
    }

    /// See [`Device::send_frame`]
    pub fn send_frame(&self, frame: &[u8]) -> bool {
        self.with(|dev| dev.send_frame(frame)).unwrap_or(false)
    }

    /// See [`Device::receive_frame`]
    pub fn receive_frame(&self, out: &mut [u8; FRAME_BUFFER_SIZE]) -> Option<usize> {
        self.with(|dev| dev.receive_frame(out)).flatten()
    }

    /// See [`Device::is_link_up`]
    pub fn is_link_up(&self) -> bool {
        self.with(|dev| dev.is_link_up()).unwrap_or(false)
    }

    /// See [`Device::link_speed`]
    pub fn link_speed(&self) -> LinkSpeed {
        self.with(|dev| dev.link_speed()).unwrap_or_default()
    }

    /// See [`Device::refresh_phy`]
    pub fn refresh_phy(&self) -> bool {
        self.with(|dev| dev.refresh_phy()).unwrap_or(false)
    }
}

impl<R, D, A, const RX: usize, const TX: usize> SharedDevice<R, D, A, RX, TX>
where
    R: RegisterBlock + Send + 'static,
    D: DelayNs + Send + 'static,
    A: BufferAllocator + Send + 'static,
{
    /// Install `device`, initialize it and hook it to `config.irq`.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - a device is already installed
    /// - Any error from [`Device::initialize`]
    /// - `IrqRegistrationFailed` - `registrar` refused the handler
    pub fn initialize<G: InterruptRegistrar>(
        &'static self,
        device: Device<R, D, A, RX, TX>,
        config: DeviceConfig,
        mut registrar: G,
    ) -> Result<()> {
        self.install(device)?;
        self.with(|dev| dev.initialize(config))
            .unwrap_or_else(|| Err(ConfigError::NotInitialized.into()))?;

        if !registrar.register(config.irq, self) {
            return Err(ConfigError::IrqRegistrationFailed.into());
        }
        info!("GENET handler registered on IRQ {}", config.irq);
        Ok(())
    }
}

impl<R, D, A, const RX: usize, const TX: usize> IrqHandler for SharedDevice<R, D, A, RX, TX>
where
    R: RegisterBlock + Send,
    D: DelayNs + Send,
    A: BufferAllocator + Send,
{
    fn handle_irq(&self) {
        self.with(|dev| dev.handle_interrupt());
    }
}

impl<R, D, A, const RX: usize, const TX: usize> Default for SharedDevice<R, D, A, RX, TX>
where
    R: RegisterBlock,
    D: DelayNs,
    A: BufferAllocator,
{
    fn default() -> Self {
        Self::new()
    }
}
