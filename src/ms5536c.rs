use crate::bus::{Bus, Phase};
use crate::calibration::Coefficients;
use crate::command::{CalibrationWord, Command, MAX_COMMAND_BYTES, RESPONSE_BITS};
use crate::config::{Configuration, ResetPolicy};
use crate::error::Ms5536cError;
use crate::measurement::{Measurement, RawReading};
use embedded_hal::delay::DelayNs;

/// Type alias used to simplify return types throughout the driver
pub type Ms5536cResult<T, BusError> = Result<T, Ms5536cError<BusError>>;

/// Where the driver is in its bring-up sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No valid coefficients. Measurements are refused.
    Uninitialized,
    /// Coefficients are loaded, no measurement taken yet.
    CalibrationLoaded,
    /// At least one measurement has been taken since calibration was loaded.
    Measuring,
}

/// Main MS5536C driver struct
///
/// Owns the link and the delay source. All operations block until the chip has answered.
pub struct Ms5536c<B, D> {
    bus: B,
    delay: D,
    config: Configuration,
    state: State,
    coefficients: Option<Coefficients>,
    raw_reading: Option<RawReading>,
    measurement: Option<Measurement>,
}

impl<B, D> Ms5536c<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Binds the driver to a link and a delay source. Nothing is sent to the chip.
    pub fn new(bus: B, delay: D, config: Configuration) -> Self {
        Self {
            bus,
            delay,
            config,
            state: State::Uninitialized,
            coefficients: None,
            raw_reading: None,
            measurement: None,
        }
    }

    /// Constructs a driver that is ready to measure.
    ///
    /// This function will:
    /// - Reset the serial interface if the configuration asks for [`ResetPolicy::Soft`]
    /// - Load the calibration coefficients
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use embedded_hal::delay::DelayNs;
    /// # use ms5536c_rs::bus::Bus;
    /// # use ms5536c_rs::Ms5536cResult;
    /// use ms5536c_rs::{Configuration, Ms5536c};
    /// # fn demo<B: Bus, D: DelayNs>(bus: B, delay: D) -> Ms5536cResult<(), B::Error> {
    ///
    /// let mut device = Ms5536c::init(bus, delay, Configuration::default())?;
    /// let measurement = device.measure()?;
    /// let mbar = measurement.pressure_mbar();
    /// # Ok(())
    /// # }
    /// ```
    pub fn init(bus: B, delay: D, config: Configuration) -> Ms5536cResult<Self, B::Error> {
        let mut device = Self::new(bus, delay, config);

        if config.reset_policy == ResetPolicy::Soft {
            device.reset()?;
        }

        device.load_calibration()?;

        Ok(device)
    }

    /// Reads the four calibration words and decodes them.
    ///
    /// Any previously loaded coefficients are discarded first, so on failure the driver is left
    /// [`Uninitialized`](State::Uninitialized).
    pub fn load_calibration(&mut self) -> Ms5536cResult<Coefficients, B::Error> {
        self.invalidate();

        let mut words = [0u16; 4];
        for word in CalibrationWord::ALL {
            words[word.index()] = self.transaction(Command::ReadCalibrationWord(word), None)?;
        }

        let coefficients = match Coefficients::from_words(words) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "invalid calibration words {:#x} {:#x} {:#x} {:#x}",
                    words[0],
                    words[1],
                    words[2],
                    words[3]
                );
                return Err(e.into());
            }
        };

        debug!(
            "calibration C1={} C2={} C3={} C4={} C5={} C6={}",
            coefficients.c1,
            coefficients.c2,
            coefficients.c3,
            coefficients.c4,
            coefficients.c5,
            coefficients.c6
        );

        self.coefficients = Some(coefficients);
        self.state = State::CalibrationLoaded;

        Ok(coefficients)
    }

    /// Sends the 21 bit reset sequence.
    ///
    /// The driver forgets the coefficients and the last reading; call
    /// [`load_calibration`](Self::load_calibration) before measuring again.
    pub fn reset(&mut self) -> Ms5536cResult<(), B::Error> {
        self.invalidate();

        self.bus.set_phase(Phase::Rising).map_err(Ms5536cError::Bus)?;
        self.send(Command::Reset)?;

        debug!("reset sent");

        Ok(())
    }

    /// Converts temperature and pressure and compensates them.
    ///
    /// Blocks for two conversion times. Returns [`Ms5536cError::NotReady`] when no calibration is
    /// loaded.
    pub fn measure(&mut self) -> Ms5536cResult<Measurement, B::Error> {
        if self.coefficients.is_none() {
            return Err(Ms5536cError::NotReady);
        }

        let conversion_time_ms = Some(self.config.conversion_time_ms);
        let temperature = self.transaction(Command::ReadTemperature, conversion_time_ms)?;
        let pressure = self.transaction(Command::ReadPressure, conversion_time_ms)?;

        debug!("raw D1={} D2={}", pressure, temperature);

        self.raw_reading = Some(RawReading::new(pressure, temperature));
        let measurement = self.convert()?;
        self.state = State::Measuring;

        Ok(measurement)
    }

    /// Compensates the most recent raw reading again, without talking to the chip.
    ///
    /// Returns [`Ms5536cError::NotReady`] unless both coefficients and a raw reading are present.
    pub fn convert(&mut self) -> Ms5536cResult<Measurement, B::Error> {
        let (coefficients, raw) = match (&self.coefficients, self.raw_reading) {
            (Some(coefficients), Some(raw)) => (coefficients, raw),
            _ => return Err(Ms5536cError::NotReady),
        };

        let measurement = Measurement::compensate(coefficients, raw);
        self.measurement = Some(measurement);

        Ok(measurement)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    pub fn raw_reading(&self) -> Option<RawReading> {
        self.raw_reading
    }

    pub fn last_measurement(&self) -> Option<Measurement> {
        self.measurement
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Gives the link and the delay back.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn invalidate(&mut self) {
        self.state = State::Uninitialized;
        self.coefficients = None;
        self.raw_reading = None;
        self.measurement = None;
    }

    fn send(&mut self, command: Command) -> Ms5536cResult<(), B::Error> {
        let bits = command.bits();
        let mut rx = [0u8; MAX_COMMAND_BYTES];

        self.bus
            .transfer(&bits.to_bytes(), &mut rx, bits.len())
            .map_err(Ms5536cError::Bus)
    }

    /// Command in mode 0, then exactly one phase switch, then a 16 bit response in mode 1.
    fn transaction(
        &mut self,
        command: Command,
        conversion_time_ms: Option<u32>,
    ) -> Ms5536cResult<u16, B::Error> {
        self.bus.set_phase(Phase::Rising).map_err(Ms5536cError::Bus)?;
        self.send(command)?;
        self.bus.set_phase(Phase::Falling).map_err(Ms5536cError::Bus)?;

        if let Some(ms) = conversion_time_ms {
            self.delay.delay_ms(ms);
        }

        let mut rx = [0u8; RESPONSE_BITS / 8];
        self.bus
            .transfer(&[0u8; RESPONSE_BITS / 8], &mut rx, RESPONSE_BITS)
            .map_err(Ms5536cError::Bus)?;

        Ok(u16::from_be_bytes(rx))
    }
}
