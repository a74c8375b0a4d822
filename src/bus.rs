//! The physical link to the MS5536C.
//!
//! The chip talks over three wires (SCLK, DIN, DOUT) that look like SPI, except that commands are
//! clocked in on the first SCLK edge (mode 0) while responses are clocked out on the second edge
//! (mode 1).
//! [`Bus`] abstracts the bit exchange and the phase switch; [`BitBang`] and [`Spi`] implement it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// SCLK edge convention for the next exchange.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Mode 0: the chip samples DIN on the rising edge. Used to transmit commands.
    Rising,
    /// Mode 1: the chip shifts DOUT on the rising edge, the host samples after the falling edge.
    /// Used to receive responses.
    Falling,
}

pub trait Bus {
    type Error;

    /// Clocks `bits` bits out of `tx` while sampling the same number of bits into `rx`.
    ///
    /// Both buffers are packed MSB first: the first bit on the wire is bit 7 of byte 0.
    ///
    /// # Panics
    ///
    /// Implementations may panic if either buffer holds fewer than `bits` bits.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error>;

    /// Reconfigures the clock edge used by the next [`transfer`](Self::transfer).
    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error>;
}

impl<T: Bus + ?Sized> Bus for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error> {
        T::transfer(self, tx, rx, bits)
    }

    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        T::set_phase(self, phase)
    }
}

#[inline]
fn get_bit(buf: &[u8], i: usize) -> bool {
    buf.get(i / 8).map_or(false, |b| b & (0x80 >> (i % 8)) != 0)
}

#[inline]
fn put_bit(buf: &mut [u8], i: usize, value: bool) {
    if let Some(b) = buf.get_mut(i / 8) {
        if value {
            *b |= 0x80 >> (i % 8);
        } else {
            *b &= !(0x80 >> (i % 8));
        }
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitBangError<OutError, InError> {
    /// Driving SCLK or DIN failed
    Output(OutError),
    /// Sampling DOUT failed
    Input(InError),
}

/// Software driven link over three GPIO pins.
///
/// `din` is the chip's data input (an output on the host), `dout` the chip's data output.
pub struct BitBang<Sclk, Din, Dout, D> {
    sclk: Sclk,
    din: Din,
    dout: Dout,
    delay: D,
    half_period_us: u32,
    phase: Phase,
}

impl<Sclk, Din, Dout, D> BitBang<Sclk, Din, Dout, D>
where
    Sclk: OutputPin,
    Din: OutputPin<Error = Sclk::Error>,
    Dout: InputPin,
    D: DelayNs,
{
    /// SCLK must idle low. Each clock cycle lasts twice `half_period_us`.
    pub fn new(sclk: Sclk, din: Din, dout: Dout, delay: D, half_period_us: u32) -> Self {
        Self {
            sclk,
            din,
            dout,
            delay,
            half_period_us,
            phase: Phase::Rising,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Gives the pins and the delay back.
    pub fn release(self) -> (Sclk, Din, Dout, D) {
        (self.sclk, self.din, self.dout, self.delay)
    }

    fn clock_bit(&mut self, out: bool) -> Result<bool, BitBangError<Sclk::Error, Dout::Error>> {
        if out {
            self.din.set_high().map_err(BitBangError::Output)?;
        } else {
            self.din.set_low().map_err(BitBangError::Output)?;
        }

        self.sclk.set_high().map_err(BitBangError::Output)?;
        let sampled = match self.phase {
            Phase::Rising => {
                let bit = self.dout.is_high().map_err(BitBangError::Input)?;
                self.delay.delay_us(self.half_period_us);
                self.sclk.set_low().map_err(BitBangError::Output)?;
                bit
            }
            Phase::Falling => {
                self.delay.delay_us(self.half_period_us);
                self.sclk.set_low().map_err(BitBangError::Output)?;
                self.dout.is_high().map_err(BitBangError::Input)?
            }
        };
        self.delay.delay_us(self.half_period_us);

        Ok(sampled)
    }
}

impl<Sclk, Din, Dout, D> Bus for BitBang<Sclk, Din, Dout, D>
where
    Sclk: OutputPin,
    Din: OutputPin<Error = Sclk::Error>,
    Dout: InputPin,
    D: DelayNs,
{
    type Error = BitBangError<Sclk::Error, Dout::Error>;

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error> {
        for i in 0..bits {
            let sampled = self.clock_bit(get_bit(tx, i))?;
            put_bit(rx, i, sampled);
        }

        self.din.set_low().map_err(BitBangError::Output)?;

        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        self.phase = phase;

        Ok(())
    }
}

/// Link over a hardware SPI peripheral.
///
/// SPI peripherals can only clock whole bytes, so every sequence is padded with zero bits.
/// Since `embedded-hal` has no way to change the clock phase of a bus at runtime,
/// `set_phase` calls the supplied closure, which should reprogram the peripheral (CPHA 0 for
/// [`Phase::Rising`], CPHA 1 for [`Phase::Falling`]).
///
/// # Panics
///
/// [`transfer`](Bus::transfer) panics if `tx` or `rx` is shorter than `bits` rounded up to whole
/// bytes.
pub struct Spi<S, F> {
    spi: S,
    set_phase: F,
}

impl<S, F> Spi<S, F>
where
    S: embedded_hal::spi::SpiBus,
    F: FnMut(&mut S, Phase),
{
    pub fn new(spi: S, set_phase: F) -> Self {
        Self { spi, set_phase }
    }

    pub fn release(self) -> S {
        self.spi
    }
}

impl<S, F> Bus for Spi<S, F>
where
    S: embedded_hal::spi::SpiBus,
    F: FnMut(&mut S, Phase),
{
    type Error = S::Error;

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error> {
        let len = (bits + 7) / 8;
        self.spi.transfer(&mut rx[..len], &tx[..len])?;
        self.spi.flush()?;

        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        (self.set_phase)(&mut self.spi, phase);

        Ok(())
    }
}
