/// Maximum conversion time of the chip, in milliseconds.
pub const DEFAULT_CONVERSION_TIME_MS: u32 = 35;

/// Whether [`Ms5536c::init`](crate::Ms5536c::init) resets the serial interface before reading
/// calibration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolicy {
    None,
    Soft,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) conversion_time_ms: u32,
    pub(crate) reset_policy: ResetPolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            conversion_time_ms: DEFAULT_CONVERSION_TIME_MS,
            reset_policy: ResetPolicy::Soft,
        }
    }
}

impl Configuration {
    /// Time to wait between starting a conversion and reading its result.
    ///
    /// Shorter values than the datasheet maximum may return a stale or partial result.
    pub fn conversion_time_ms(mut self, conversion_time_ms: u32) -> Self {
        self.conversion_time_ms = conversion_time_ms;

        self
    }

    pub fn reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;

        self
    }
}
