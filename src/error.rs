//! Errors that can occur when using the MS5536C device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during
//! communication with the MS5536C.
//! It is generic over the underlying transport error type.

use core::fmt::{Display, Formatter};

/// This represents all possible errors that can occur when using the MS5536C device.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ms5536cError<BusError> {
    /// An error has occurred in the transport (bit-bang pins or SPI peripheral)
    Bus(BusError),

    /// The four calibration words read back as all zeros or all ones.
    ///
    /// Usually means no chip is answering on the link, or the chip is defective.
    /// Issue a reset and load the calibration again.
    InvalidCalibration,

    /// A measurement was requested before calibration coefficients were loaded.
    ///
    /// Also returned after [`reset`](crate::Ms5536c::reset), which discards the coefficients.
    NotReady,
}

impl<BusError> From<InvalidCalibration> for Ms5536cError<BusError> {
    fn from(_: InvalidCalibration) -> Self {
        Ms5536cError::InvalidCalibration
    }
}

impl<BusError: Display> Display for Ms5536cError<BusError> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Ms5536cError::Bus(e) => write!(f, "bus error: {}", e),
            Ms5536cError::InvalidCalibration => f.write_str("invalid calibration data"),
            Ms5536cError::NotReady => f.write_str("calibration not loaded"),
        }
    }
}

/// Returned when decoding a calibration word set that no working chip produces.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidCalibration;

impl Display for InvalidCalibration {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("invalid calibration data")
    }
}
