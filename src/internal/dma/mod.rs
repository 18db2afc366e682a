//! DMA Engine
//!
//! Transmit and receive descriptor rings for the default queue (ring 16) of
//! the GENET TDMA and RDMA engines. Ring capacity is a const generic; frame
//! buffers are borrowed from a [`BufferAllocator`](crate::buffer::BufferAllocator)
//! for as long as the hardware owns them.
//!
//! # Architecture
//!
//! - [`DmaEngine`]: Owns both rings and the hardware index bookkeeping
//! - [`DescriptorRing`](ring::DescriptorRing): Producer/consumer ring with one reserved slot
//! - [`Descriptor`](descriptor::Descriptor): Per-slot ownership state and bound buffer

pub mod descriptor;
mod engine;
mod ring;

pub use engine::DmaEngine;
