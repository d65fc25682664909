//! Runs the helper against a scripted sensor on the host and logs what a
//! polling loop would see.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example scripted_pads
//! ```

use core::convert::Infallible;

use log::info;
use mpr121_touch_helper::sensor::{TouchSensor, CHANNEL_COUNT};
use mpr121_touch_helper::touch::{Edge, TouchHelper};

/// Pretends that a finger slides across electrodes 0 to 3 and lifts off,
/// while a hand approaches electrode 11.
struct ScriptedPads {
    step: usize,
}

const MASKS: [u16; 6] = [0b0000, 0b0001, 0b0011, 0b0110, 0b1100, 0b0000];

impl TouchSensor for ScriptedPads {
    type Error = Infallible;

    fn touched(&mut self) -> Result<u16, Infallible> {
        let mask = MASKS[self.step % MASKS.len()];
        self.step += 1;
        Ok(mask)
    }

    fn filtered_data(&mut self, channel: u8) -> Result<u16, Infallible> {
        let base = 200u16;
        if usize::from(channel) == CHANNEL_COUNT - 1 {
            Ok(base + 15 * self.step as u16)
        } else {
            Ok(base)
        }
    }

    fn set_thresholds(&mut self, touch: u8, release: u8) -> Result<(), Infallible> {
        info!("Sensor received thresholds touch={touch} release={release}");
        Ok(())
    }
}

fn main() -> Result<(), Infallible> {
    env_logger::init();

    let mut pads = ScriptedPads { step: 0 };
    let mut helper = TouchHelper::new(&mut pads);

    helper.set_thresholds(12, 6)?;
    helper.update_release_threshold(4)?;

    for cycle in 0..MASKS.len() {
        helper.refresh_touch()?;
        helper.refresh_proximity()?;

        for event in helper.events() {
            match event.edge {
                Edge::Touched => info!("cycle {cycle}: electrode {} touched", event.channel),
                Edge::Released => info!("cycle {cycle}: electrode {} released", event.channel),
            }
        }
        info!(
            "cycle {cycle}: {} touched {:?}, proximity on 11 = {}",
            helper.touch_count(),
            helper.touched_channels(),
            helper.proximity_value(11)
        );
    }

    Ok(())
}
