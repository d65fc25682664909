//! Core implementation of the touch state helper.

use heapless::Vec;
use log::{debug, trace, warn};

use crate::sensor::{
    Thresholds, TouchSensor, CHANNEL_COUNT, CHANNEL_MASK, DEFAULT_RELEASE_THRESHOLD,
    DEFAULT_TOUCH_THRESHOLD,
};

/// The direction of a touch state change on one electrode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The electrode was just touched.
    Touched,
    /// The electrode was just released.
    Released,
}

/// A state change on a single electrode between the last two refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEvent {
    /// The electrode (0-11).
    pub channel: u8,
    /// Whether it was touched or released.
    pub edge: Edge,
}

/// Caches touch and proximity readings from a [`TouchSensor`] and answers
/// simple questions about them.
///
/// Call [`refresh_touch`](Self::refresh_touch) once per loop before asking
/// about touches, and [`refresh_proximity`](Self::refresh_proximity) once per
/// loop before asking about proximity. All queries are answered from the
/// cache, so they stay stable until the next refresh.
///
/// Electrode numbers above 11 are never an error: boolean queries answer
/// `false` and [`proximity_value`](Self::proximity_value) answers `0`.
pub struct TouchHelper<S: TouchSensor> {
    sensor: S,
    current: u16,
    previous: u16,
    proximity: [u16; CHANNEL_COUNT],
    applied: Thresholds,
}

impl<S: TouchSensor> TouchHelper<S> {
    /// Creates a new `TouchHelper` bound to `sensor`.
    ///
    /// Nothing is read from or written to the sensor here. Pass `&mut driver`
    /// to keep ownership of the driver, or move it in and take it back with
    /// [`release`](Self::release).
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            current: 0,
            previous: 0,
            proximity: [0; CHANNEL_COUNT],
            applied: Thresholds::DEFAULT,
        }
    }

    /// Reads the touch status from the sensor.
    ///
    /// The current snapshot becomes the previous one, so edge queries compare
    /// this call with the one before it. If the read fails both snapshots are
    /// left as they were.
    pub fn refresh_touch(&mut self) -> Result<(), S::Error> {
        let mask = self.sensor.touched().map_err(|err| {
            warn!("Error reading touch status: {err:?}");
            err
        })?;
        self.previous = self.current;
        self.current = mask;
        trace!("Touch mask {:#05x} -> {:#05x}", self.previous, self.current);
        Ok(())
    }

    /// Reads the filtered data of all 12 electrodes from the sensor.
    ///
    /// Higher values mean a hand or finger is closer to the electrode. The
    /// cache is only replaced when every electrode was read successfully.
    pub fn refresh_proximity(&mut self) -> Result<(), S::Error> {
        let mut readings = [0u16; CHANNEL_COUNT];
        for (channel, reading) in (0u8..).zip(readings.iter_mut()) {
            *reading = self.sensor.filtered_data(channel).map_err(|err| {
                warn!("Error reading filtered data of electrode {channel}: {err:?}");
                err
            })?;
        }
        self.proximity = readings;
        trace!("Filtered data {:?}", self.proximity);
        Ok(())
    }

    /// Checks if an electrode is currently touched.
    pub fn is_touched(&self, channel: u8) -> bool {
        bit(self.current, channel)
    }

    /// Checks if an electrode was touched at the previous refresh.
    pub fn was_touched(&self, channel: u8) -> bool {
        bit(self.previous, channel)
    }

    /// Checks if an electrode has just been touched.
    pub fn is_new_touch(&self, channel: u8) -> bool {
        self.is_touched(channel) && !self.was_touched(channel)
    }

    /// Checks if an electrode has just been released.
    pub fn is_new_release(&self, channel: u8) -> bool {
        !self.is_touched(channel) && self.was_touched(channel)
    }

    /// Returns how many electrodes are currently touched.
    pub fn touch_count(&self) -> u8 {
        // At most 12, always fits.
        self.touched_mask().count_ones() as u8
    }

    /// Returns the cached filtered data of an electrode.
    ///
    /// The value is only meaningful after [`refresh_proximity`](Self::refresh_proximity)
    /// has been called at least once.
    pub fn proximity_value(&self, channel: u8) -> u16 {
        self.proximity
            .get(usize::from(channel))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the cached filtered data of all electrodes.
    pub fn proximity_values(&self) -> &[u16; CHANNEL_COUNT] {
        &self.proximity
    }

    /// Returns the current touch mask, limited to the 12 electrode bits.
    pub fn touched_mask(&self) -> u16 {
        self.current & CHANNEL_MASK
    }

    /// Returns the previous touch mask, limited to the 12 electrode bits.
    pub fn previous_mask(&self) -> u16 {
        self.previous & CHANNEL_MASK
    }

    /// Lists the currently touched electrodes in ascending order.
    pub fn touched_channels(&self) -> Vec<u8, CHANNEL_COUNT> {
        channels()
            .filter(|&channel| self.is_touched(channel))
            .collect()
    }

    /// Lists every electrode that was touched or released between the last
    /// two refreshes, in ascending order.
    pub fn events(&self) -> Vec<ChannelEvent, CHANNEL_COUNT> {
        channels()
            .filter_map(|channel| {
                let edge = if self.is_new_touch(channel) {
                    Edge::Touched
                } else if self.is_new_release(channel) {
                    Edge::Released
                } else {
                    return None;
                };
                Some(ChannelEvent { channel, edge })
            })
            .collect()
    }

    /// Sets the touch and release thresholds of all electrodes.
    pub fn set_thresholds(&mut self, touch: u8, release: u8) -> Result<(), S::Error> {
        self.apply(Thresholds::new(touch, release))
    }

    /// Sets the touch threshold of all electrodes.
    ///
    /// The release threshold is reset to 20 on every call, whatever it was
    /// before. Use [`set_thresholds`](Self::set_thresholds) to set both, or
    /// [`update_touch_threshold`](Self::update_touch_threshold) to keep the
    /// current release threshold.
    pub fn set_touch_threshold(&mut self, touch: u8) -> Result<(), S::Error> {
        if self.applied.release != DEFAULT_RELEASE_THRESHOLD {
            debug!(
                "Release threshold {} reset to default {DEFAULT_RELEASE_THRESHOLD}",
                self.applied.release
            );
        }
        self.apply(Thresholds::new(touch, DEFAULT_RELEASE_THRESHOLD))
    }

    /// Sets the release threshold of all electrodes.
    ///
    /// The touch threshold is reset to 40 on every call, whatever it was
    /// before. Use [`set_thresholds`](Self::set_thresholds) to set both, or
    /// [`update_release_threshold`](Self::update_release_threshold) to keep
    /// the current touch threshold.
    pub fn set_release_threshold(&mut self, release: u8) -> Result<(), S::Error> {
        if self.applied.touch != DEFAULT_TOUCH_THRESHOLD {
            debug!(
                "Touch threshold {} reset to default {DEFAULT_TOUCH_THRESHOLD}",
                self.applied.touch
            );
        }
        self.apply(Thresholds::new(DEFAULT_TOUCH_THRESHOLD, release))
    }

    /// Sets the touch threshold and keeps the release threshold last set
    /// through this helper (20 if none was set yet).
    pub fn update_touch_threshold(&mut self, touch: u8) -> Result<(), S::Error> {
        self.apply(self.applied.with_touch(touch))
    }

    /// Sets the release threshold and keeps the touch threshold last set
    /// through this helper (40 if none was set yet).
    pub fn update_release_threshold(&mut self, release: u8) -> Result<(), S::Error> {
        self.apply(self.applied.with_release(release))
    }

    /// Returns the thresholds last sent to the sensor through this helper.
    ///
    /// This does not read the sensor; before any setter was called it returns
    /// the defaults.
    pub fn thresholds(&self) -> Thresholds {
        self.applied
    }

    /// Gives shared access to the sensor driver.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Gives exclusive access to the sensor driver.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Consumes the helper and returns the sensor driver.
    pub fn release(self) -> S {
        self.sensor
    }

    fn apply(&mut self, thresholds: Thresholds) -> Result<(), S::Error> {
        self.sensor
            .set_thresholds(thresholds.touch, thresholds.release)
            .map_err(|err| {
                warn!("Error setting thresholds {thresholds:?}: {err:?}");
                err
            })?;
        debug!(
            "Thresholds set: touch {}, release {}",
            thresholds.touch, thresholds.release
        );
        self.applied = thresholds;
        Ok(())
    }
}

fn channels() -> impl Iterator<Item = u8> {
    0..CHANNEL_COUNT as u8
}

fn bit(mask: u16, channel: u8) -> bool {
    usize::from(channel) < CHANNEL_COUNT && mask & (1 << channel) != 0
}
