//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: GENET register map and the register access trait
//! - [`constants`]: Sizes, timing bounds and defaults
//! - [`dma`]: Descriptor rings and the DMA engine
//! - [`phy_regs`]: Clause 22 and BCM54xx PHY register definitions
//! - [`logging`]: Backend-selecting log macros
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Items re-exported from the
//! crate root are the supported surface; everything else may change.

pub(crate) mod constants;
pub(crate) mod dma;
pub(crate) mod logging;
pub(crate) mod phy_regs;
pub(crate) mod register;
