//! Device abstractions for decoding infrared remote-control signals on
//! Pico 1 and 2.
//!
//! The decode engine converts the microsecond gaps between GPIO edges into
//! structured commands for the NEC and Panasonic pulse-space protocols, with
//! a timing-hash fallback that fingerprints remotes no structured decoder
//! understands. The engine itself is pure `core` code driven by timestamps,
//! so the same state machines run inside the edge-interrupt task on target
//! and under `cargo test --no-default-features --features host` on the
//! development machine.
//!
//! On hardware, [`Ir`] spawns a background task that watches a GPIO pin and
//! publishes completed [`IrFrame`]s on a static channel; [`IrMapping`] layers
//! an application button map on top of that.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

pub mod clock;
pub mod decode;
pub mod dispatch;
mod error;
pub mod frame;
pub mod hash;
pub mod nec;
pub mod nec_api;
pub mod panasonic;

// These modules require embassy_rp and are excluded when testing on host
#[cfg(all(any(feature = "pico1", feature = "pico2"), not(feature = "host")))]
pub mod ir;
#[cfg(all(any(feature = "pico1", feature = "pico2"), not(feature = "host")))]
pub mod ir_mapping;

// Re-export commonly used items
pub use dispatch::{AnyDecoder, IrReceiver};
pub use error::{Error, Result};
pub use frame::{IrFrame, Protocol};
#[cfg(all(any(feature = "pico1", feature = "pico2"), not(feature = "host")))]
pub use ir::{Ir, IrNotifier};
#[cfg(all(any(feature = "pico1", feature = "pico2"), not(feature = "host")))]
pub use ir_mapping::IrMapping;
pub use nec_api::{NecApi, NecApiEvent, NecApiSnapshot};
