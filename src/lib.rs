//! Two-motor Bluetooth car firmware library
//!
//! The hardware-independent core (command decoding, drive patterns, shared
//! motor state, the command queue) lives in `system` and builds on the
//! host so it can be unit tested. Everything that touches the RP2350 is in
//! `task`, `system::console` and `system::resources`, behind the `rp2350`
//! feature.

#![cfg_attr(not(test), no_std)]

/// System core modules
pub mod system;
/// Task implementations
#[cfg(feature = "rp2350")]
pub mod task;
