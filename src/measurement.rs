use crate::calibration::Coefficients;

/// Uncompensated ADC codes as read from the chip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading {
    /// D1
    pub pressure: u16,
    /// D2
    pub temperature: u16,
}

impl RawReading {
    pub const fn new(pressure: u16, temperature: u16) -> Self {
        Self { pressure, temperature }
    }
}

/// A compensated temperature and pressure pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    temperature_x100: i32,
    pressure_x100: i32,
    temperature: f32,
    pressure: f32,
}

impl Measurement {
    /// Converts a raw reading using the datasheet's second-order algorithm.
    ///
    /// All intermediate values are integers in units of 0.1 °C and 0.1 mbar, and every division
    /// truncates toward zero exactly where the reference algorithm does.
    /// Below 20.0 °C an extra quadratic correction is applied to both temperature and pressure.
    pub fn compensate(coefficients: &Coefficients, raw: RawReading) -> Self {
        let c1 = i64::from(coefficients.c1);
        let c2 = i64::from(coefficients.c2);
        let c3 = i64::from(coefficients.c3);
        let c4 = i64::from(coefficients.c4);
        let c5 = i64::from(coefficients.c5);
        let c6 = i64::from(coefficients.c6);
        let d1 = i64::from(raw.pressure);
        let d2 = i64::from(raw.temperature);

        let ut1 = 8 * c5 + 20224;
        let dt = d2 - ut1;
        let mut temp = 200 + dt * (c6 + 50) / 1024;

        let off = c2 * 4 + ((c4 - 512) * dt) / 4096;
        let sens = c1 + (c3 * dt) / 1024 + 24576;
        let mut p = (sens * (d1 - 7168)) / 16384 + off;

        if temp < 200 {
            let t2 = 11 * (c6 + 24) * (200 - temp) * (200 - temp) / (1 << 20);
            let p2 = 3 * t2 * (p - 3500) / (1 << 14);
            temp -= t2;
            p -= p2;
        }

        Self::from_tenths(temp as i32, p as i32)
    }

    /// Builds a measurement from temperature in 0.1 °C and pressure in 0.1 mbar.
    ///
    /// Values whose hundredths do not fit an `i32` saturate.
    pub fn from_tenths(temperature: i32, pressure: i32) -> Self {
        let temperature_x100 = temperature.saturating_mul(10);
        let pressure_x100 = pressure.saturating_mul(10);

        Self {
            temperature_x100,
            pressure_x100,
            temperature: temperature_x100 as f32 / 100.0,
            pressure: pressure_x100 as f32 / 100.0,
        }
    }

    /// Temperature in hundredths of a degree Celsius.
    pub fn temperature_x100(&self) -> i32 {
        self.temperature_x100
    }

    /// Pressure in hundredths of a millibar.
    pub fn pressure_x100(&self) -> i32 {
        self.pressure_x100
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.temperature
    }

    /// Pressure in millibar, which equals hectopascal.
    pub fn pressure_mbar(&self) -> f32 {
        self.pressure
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        use uom::si::thermodynamic_temperature::{degree_celsius, ThermodynamicTemperature};
        ThermodynamicTemperature::new::<degree_celsius>(self.temperature)
    }

    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        use uom::si::pressure::{hectopascal, Pressure};
        Pressure::new::<hectopascal>(self.pressure)
    }
}
