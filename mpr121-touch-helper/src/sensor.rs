//! The driver seam and threshold configuration.

/// Number of electrodes on an MPR121.
pub const CHANNEL_COUNT: usize = 12;

/// The bits of the touch status register that map to electrodes.
pub const CHANNEL_MASK: u16 = 0x0FFF;

/// Touch threshold used when only the release threshold is given.
pub const DEFAULT_TOUCH_THRESHOLD: u8 = 40;

/// Release threshold used when only the touch threshold is given.
pub const DEFAULT_RELEASE_THRESHOLD: u8 = 20;

/// The operations a touch sensor driver has to offer to the helper.
///
/// Bus access, initialization and calibration all stay inside the driver.
/// Errors are reported through the associated `Error` type and handed back
/// to the caller unchanged.
pub trait TouchSensor {
    /// The error type of the underlying driver.
    type Error: core::fmt::Debug;

    /// Reads the touch status mask. Bit `n` is set while electrode `n` is
    /// touched; only bits 0-11 are meaningful.
    fn touched(&mut self) -> Result<u16, Self::Error>;

    /// Reads the filtered data for one electrode.
    fn filtered_data(&mut self, channel: u8) -> Result<u16, Self::Error>;

    /// Applies the touch and release thresholds to all electrodes.
    fn set_thresholds(&mut self, touch: u8, release: u8) -> Result<(), Self::Error>;
}

impl<T: TouchSensor + ?Sized> TouchSensor for &mut T {
    type Error = T::Error;

    #[inline]
    fn touched(&mut self) -> Result<u16, Self::Error> {
        T::touched(self)
    }

    #[inline]
    fn filtered_data(&mut self, channel: u8) -> Result<u16, Self::Error> {
        T::filtered_data(self, channel)
    }

    #[inline]
    fn set_thresholds(&mut self, touch: u8, release: u8) -> Result<(), Self::Error> {
        T::set_thresholds(self, touch, release)
    }
}

/// A pair of touch and release thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Threshold for detecting a touch.
    pub touch: u8,
    /// Threshold for detecting a release.
    pub release: u8,
}

impl Thresholds {
    /// The thresholds the single-value setters fall back to.
    pub const DEFAULT: Self = Self {
        touch: DEFAULT_TOUCH_THRESHOLD,
        release: DEFAULT_RELEASE_THRESHOLD,
    };

    /// Creates a new `Thresholds`.
    pub const fn new(touch: u8, release: u8) -> Self {
        Self { touch, release }
    }

    /// Returns a copy with the touch threshold replaced.
    pub const fn with_touch(self, touch: u8) -> Self {
        Self { touch, ..self }
    }

    /// Returns a copy with the release threshold replaced.
    pub const fn with_release(self, release: u8) -> Self {
        Self { release, ..self }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Counter {
        reads: u32,
    }

    impl TouchSensor for Counter {
        type Error = Infallible;

        fn touched(&mut self) -> Result<u16, Infallible> {
            self.reads += 1;
            Ok(0x0001)
        }

        fn filtered_data(&mut self, channel: u8) -> Result<u16, Infallible> {
            self.reads += 1;
            Ok(u16::from(channel))
        }

        fn set_thresholds(&mut self, _touch: u8, _release: u8) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(Thresholds::default(), Thresholds::new(40, 20));
        assert_eq!(Thresholds::default(), Thresholds::DEFAULT);
    }

    #[test]
    fn test_thresholds_builders() {
        let thresholds = Thresholds::DEFAULT.with_touch(12).with_release(6);
        assert_eq!(thresholds, Thresholds::new(12, 6));
        assert_eq!(Thresholds::DEFAULT.with_release(9).touch, DEFAULT_TOUCH_THRESHOLD);
    }

    fn read_mask_and_channel<S: TouchSensor>(mut sensor: S) -> Result<(u16, u16), S::Error> {
        Ok((sensor.touched()?, sensor.filtered_data(7)?))
    }

    #[test]
    fn test_borrowed_sensor_forwards() {
        let mut counter = Counter { reads: 0 };
        assert_eq!(read_mask_and_channel(&mut counter), Ok((1, 7)));
        assert_eq!(counter.reads, 2);
    }

    #[test]
    fn test_channel_mask_covers_all_channels() {
        assert_eq!(CHANNEL_MASK.count_ones() as usize, CHANNEL_COUNT);
    }
}
