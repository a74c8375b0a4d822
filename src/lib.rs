//! Platform agnostic driver for the MS5536C barometric pressure and temperature sensor.
//!
//! The MS5536C is read over a three wire serial link (SCLK, DIN, DOUT). Every chip carries six
//! factory calibration coefficients, packed into four 16 bit words, which are needed to turn the
//! raw pressure (D1) and temperature (D2) codes into millibar and degrees Celsius.
//!
//! The driver is blocking. It talks to the chip through a [`Bus`](bus::Bus), either one of the
//! provided [`BitBang`](bus::BitBang) and [`Spi`](bus::Spi) transports or your own, and waits for
//! conversions through an [`embedded_hal::delay::DelayNs`].
//!
//! ## Features
//!
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//! - `uom`: Converts measurements into `uom` quantities.
#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod bus;
pub mod calibration;
pub mod command;
pub mod config;
pub mod error;
pub mod measurement;
mod ms5536c;

#[cfg(test)]
mod testing;

pub use calibration::Coefficients;
pub use config::{Configuration, ResetPolicy};
pub use error::{InvalidCalibration, Ms5536cError};
pub use measurement::{Measurement, RawReading};
pub use ms5536c::{Ms5536c, Ms5536cResult, State};
