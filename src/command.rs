//! ### Command sequences
//!
//! The MS5536C has no registers. Every transaction starts with a short bit sequence
//! clocked into DIN while SCLK runs in mode 0:
//! - 3 start bits (`111`)
//! - a command specific setup field
//! - 3 stop bits (`000`)
//!
//! The conversion commands are 10 bits long, the calibration word commands 12 bits.
//! The reset sequence is special: sixteen `1` bits followed by five `0` bits.
//!
//! Every command except reset is answered with a 16 bit word, clocked out on DOUT in mode 1.
//!
//! ### Examples
//! ```rust
//! use ms5536c_rs::command::Command;
//!
//! let bits = Command::ReadPressure.bits();
//! assert_eq!(bits.len(), 10);
//! assert_eq!(bits.to_bytes(), [0b1111_0100, 0b0000_0000, 0]);
//! ```

/// One of the four factory calibration words.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationWord {
    Word1,
    Word2,
    Word3,
    Word4,
}

impl CalibrationWord {
    /// The words in the order the driver reads them.
    pub const ALL: [CalibrationWord; 4] = [
        CalibrationWord::Word1,
        CalibrationWord::Word2,
        CalibrationWord::Word3,
        CalibrationWord::Word4,
    ];

    /// Zero based index of the word, matching its position in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        match self {
            CalibrationWord::Word1 => 0,
            CalibrationWord::Word2 => 1,
            CalibrationWord::Word3 => 2,
            CalibrationWord::Word4 => 3,
        }
    }
}

/// Commands understood by the MS5536C.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start a pressure conversion (D1).
    ReadPressure,

    /// Start a temperature conversion (D2).
    ReadTemperature,

    /// Read back one of the calibration words.
    ReadCalibrationWord(CalibrationWord),

    /// Resets the serial interface of the chip.
    ///
    /// The calibration coefficients are not affected inside the chip, but the driver treats them as
    /// stale.
    Reset,
}

impl Command {
    /// Returns the exact bit sequence clocked out for this command.
    pub const fn bits(self) -> CommandBits {
        match self {
            Command::ReadPressure => CommandBits::new(0b1111_0100_00, 10),
            Command::ReadTemperature => CommandBits::new(0b1111_0010_00, 10),
            Command::ReadCalibrationWord(word) => match word {
                CalibrationWord::Word1 => CommandBits::new(0b1110_1010_0000, 12),
                CalibrationWord::Word2 => CommandBits::new(0b1110_1011_0000, 12),
                CalibrationWord::Word3 => CommandBits::new(0b1110_1100_0000, 12),
                CalibrationWord::Word4 => CommandBits::new(0b1110_1101_0000, 12),
            },
            Command::Reset => CommandBits::new(0b1111_1111_1111_1111_00000, 21),
        }
    }

    /// True if the chip answers the command with a 16 bit word.
    pub const fn has_response(self) -> bool {
        !matches!(self, Command::Reset)
    }
}

/// Largest command, in bytes, once packed by [`CommandBits::to_bytes`].
pub const MAX_COMMAND_BYTES: usize = 3;

/// Number of bits in every response word.
pub const RESPONSE_BITS: usize = 16;

/// A fixed-length bit sequence.
///
/// The bits are kept right-aligned in `pattern`; the first transmitted bit is bit `len - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandBits {
    pattern: u32,
    len: u8,
}

impl CommandBits {
    const fn new(pattern: u32, len: u8) -> Self {
        Self { pattern, len }
    }

    /// Number of bits in the sequence.
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The sequence as a right-aligned integer, most significant bit transmitted first.
    pub const fn pattern(&self) -> u32 {
        self.pattern
    }

    /// Returns bit `i` in transmission order, `None` past the end.
    pub const fn bit(&self, i: usize) -> Option<bool> {
        if i >= self.len as usize {
            return None;
        }

        Some((self.pattern >> (self.len as usize - 1 - i)) & 1 != 0)
    }

    /// Iterates the bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).filter_map(move |i| self.bit(i))
    }

    /// Packs the sequence MSB first: the first transmitted bit is bit 7 of byte 0.
    ///
    /// Bits past [`len`](Self::len) are zero.
    pub fn to_bytes(&self) -> [u8; MAX_COMMAND_BYTES] {
        let aligned = self.pattern << (MAX_COMMAND_BYTES * 8 - self.len());
        let be = aligned.to_be_bytes();

        [be[1], be[2], be[3]]
    }

    /// Number of bytes [`to_bytes`](Self::to_bytes) actually uses.
    pub const fn byte_len(&self) -> usize {
        (self.len as usize + 7) / 8
    }
}
