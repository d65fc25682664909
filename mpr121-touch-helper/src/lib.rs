//! A beginner-friendly, `no_std` helper for MPR121 capacitive touch sensors.
//!
//! This crate provides a `TouchHelper` that sits on top of an existing MPR121
//! driver and hides the bit manipulation. It caches two generations of the
//! 12-bit touch mask and one generation of the filtered electrode data, and
//! answers "is this pad touched", "was it just pressed", "was it just
//! released" and "how close is the hand" from that cache.
//!
//! # Usage
//!
//! Implement [`sensor::TouchSensor`] for your driver (or use a driver that
//! already does), then call the two refresh methods once per loop.
//!
//! ```
//! use core::convert::Infallible;
//! use mpr121_touch_helper::sensor::TouchSensor;
//! use mpr121_touch_helper::touch::TouchHelper;
//!
//! struct Pads;
//!
//! impl TouchSensor for Pads {
//!     type Error = Infallible;
//!
//!     fn touched(&mut self) -> Result<u16, Infallible> {
//!         Ok(0b0000_0000_0101)
//!     }
//!
//!     fn filtered_data(&mut self, channel: u8) -> Result<u16, Infallible> {
//!         Ok(200 + u16::from(channel))
//!     }
//!
//!     fn set_thresholds(&mut self, _touch: u8, _release: u8) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let mut pads = Pads;
//! let mut helper = TouchHelper::new(&mut pads);
//!
//! helper.refresh_touch().unwrap();
//! helper.refresh_proximity().unwrap();
//!
//! assert!(helper.is_new_touch(0));
//! assert!(helper.is_touched(2));
//! assert_eq!(helper.touch_count(), 2);
//! assert_eq!(helper.proximity_value(3), 203);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod sensor;
pub mod touch;
