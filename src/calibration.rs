use crate::error::InvalidCalibration;

const C1_BITS: u32 = 13;
const C2_BITS: u32 = 13;
const C3_BITS: u32 = 9;
const C4_BITS: u32 = 9;
const C5_BITS: u32 = 12;
const C6_BITS: u32 = 8;

const fn mask(bits: u32) -> u16 {
    ((1u32 << bits) - 1) as u16
}

/// The six factory calibration coefficients of an MS5536C.
///
/// | Coefficient | Width | Meaning |
/// |---|---|---|
/// | C1 | 13 bit | Pressure sensitivity |
/// | C2 | 13 bit | Pressure offset |
/// | C3 | 9 bit | Temperature coefficient of pressure sensitivity |
/// | C4 | 9 bit | Temperature coefficient of pressure offset |
/// | C5 | 12 bit | Reference temperature |
/// | C6 | 8 bit | Temperature coefficient of the temperature |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coefficients {
    pub c1: u16,
    pub c2: u16,
    pub c3: u16,
    pub c4: u16,
    pub c5: u16,
    pub c6: u16,
}

impl Coefficients {
    /// Builds a coefficient set, truncating every value to its bit width.
    pub const fn new(c1: u16, c2: u16, c3: u16, c4: u16, c5: u16, c6: u16) -> Self {
        Self {
            c1: c1 & mask(C1_BITS),
            c2: c2 & mask(C2_BITS),
            c3: c3 & mask(C3_BITS),
            c4: c4 & mask(C4_BITS),
            c5: c5 & mask(C5_BITS),
            c6: c6 & mask(C6_BITS),
        }
    }

    /// Decodes the four calibration words, in read order Word1..Word4.
    ///
    /// ```text
    /// Word1: C3[7:0]                      | C5[7:0]
    /// Word2: C4[7:0]                      | C6[7:0]
    /// Word3: C5[11:8] | C1[11:0]
    /// Word4: C1[12] | C4[8] | C3[8] | C2[12:0]
    /// ```
    ///
    /// A word set that is all zeros or all ones is what the link reads when no chip drives DOUT,
    /// and is rejected with [`InvalidCalibration`].
    pub fn from_words(words: [u16; 4]) -> Result<Self, InvalidCalibration> {
        let [w1, w2, w3, w4] = words;

        let coefficients = Self {
            c1: ((w4 >> 15) & 0x1) << 12 | (w3 & 0x0FFF),
            c2: w4 & mask(C2_BITS),
            c3: ((w4 >> 13) & 0x1) << 8 | (w1 >> 8),
            c4: ((w4 >> 14) & 0x1) << 8 | (w2 >> 8),
            c5: ((w3 >> 12) & 0xF) << 8 | (w1 & 0x00FF),
            c6: w2 & 0x00FF,
        };

        if coefficients.is_all_zero() || coefficients.is_all_one() {
            return Err(InvalidCalibration);
        }

        Ok(coefficients)
    }

    /// Packs the coefficients back into the four calibration words.
    /// Inverse of [`from_words`](Self::from_words).
    pub const fn to_words(&self) -> [u16; 4] {
        [
            (self.c3 & 0x00FF) << 8 | (self.c5 & 0x00FF),
            (self.c4 & 0x00FF) << 8 | (self.c6 & 0x00FF),
            ((self.c5 >> 8) & 0xF) << 12 | (self.c1 & 0x0FFF),
            ((self.c1 >> 12) & 0x1) << 15
                | ((self.c4 >> 8) & 0x1) << 14
                | ((self.c3 >> 8) & 0x1) << 13
                | (self.c2 & mask(C2_BITS)),
        ]
    }

    fn is_all_zero(&self) -> bool {
        self.c1 == 0 && self.c2 == 0 && self.c3 == 0 && self.c4 == 0 && self.c5 == 0 && self.c6 == 0
    }

    fn is_all_one(&self) -> bool {
        self.c1 == mask(C1_BITS)
            && self.c2 == mask(C2_BITS)
            && self.c3 == mask(C3_BITS)
            && self.c4 == mask(C4_BITS)
            && self.c5 == mask(C5_BITS)
            && self.c6 == mask(C6_BITS)
    }
}
