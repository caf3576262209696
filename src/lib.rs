//! SHT4x Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the Sensirion SHT4x
//! (SHT40/SHT41/SHT45) temperature and humidity sensor family, built on top
//! of the [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Soft reset, serial-number readout, and all nine measurement modes
//!   (precision and heater variants)
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for bus access
//! - [`DelayNs`] for the per-command settling delays
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod crc;
pub mod error;
pub mod mode;
pub mod sht4x;

pub use error::Sht4xError;
pub use mode::Mode;
pub use sht4x::{DEFAULT_ADDRESS, RawReading, Reading, Sht4x};
