//! Error types for the GENET driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Initialization and bring-up failures
//! - [`DmaError`]: Descriptor ring and frame buffer issues
//! - [`IoError`]: MDIO bus and PHY failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
///
/// After [`Device::initialize`](crate::Device::initialize) returns one of
/// these the device is left uninitialized; only another `initialize` call is
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Driver already initialized
    AlreadyInitialized,
    /// Operation requires an initialized driver
    NotInitialized,
    /// UMAC soft reset never reported completion
    ResetTimeout,
    /// Identification registers do not match a GENET v5 controller or PHY
    HardwareNotPresent,
    /// MAC address is zero, broadcast or multicast
    InvalidMacAddress,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// The interrupt substrate refused the handler
    IrqRegistrationFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::NotInitialized => "not initialized",
            ConfigError::ResetTimeout => "soft reset timed out",
            ConfigError::HardwareNotPresent => "hardware not present",
            ConfigError::InvalidMacAddress => "invalid MAC address",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::IrqRegistrationFailed => "interrupt registration failed",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Descriptor ring and frame buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Buffer allocator could not satisfy a request
    OutOfBuffers,
    /// No free transmit descriptor
    RingFull,
    /// Invalid frame length (zero)
    InvalidLength,
    /// Frame larger than the maximum Ethernet frame
    FrameTooLarge,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::OutOfBuffers => "out of frame buffers",
            DmaError::RingFull => "transmit ring full",
            DmaError::InvalidLength => "invalid frame length",
            DmaError::FrameTooLarge => "frame too large for buffers",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// MDIO bus and PHY errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// MDIO transaction did not complete within the polling bound
    BusTimeout,
    /// PHY did not acknowledge an MDIO read
    MdioReadFail,
    /// PHY register number out of range (must be 0-31)
    InvalidRegister,
    /// Auto-negotiation result encoding is reserved or unsupported
    UnsupportedPhyMode,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::BusTimeout => "MDIO bus timeout",
            IoError::MdioReadFail => "MDIO read failed",
            IoError::InvalidRegister => "invalid PHY register",
            IoError::UnsupportedPhyMode => "unsupported PHY mode",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::ResetTimeout)) => { /* ... */ }
///     Err(Error::Dma(DmaError::RingFull)) => { /* ... */ }
///     Err(Error::Io(IoError::BusTimeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// I/O error
    Io(IoError),
}

impl Error {
    /// Returns a human-readable description of the inner error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Config(e) => e.as_str(),
            Error::Dma(e) => e.as_str(),
            Error::Io(e) => e.as_str(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for DMA operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for MDIO/PHY operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
