//! Rotary encoder sampling
//!
//! Samples the encoder pins at a fixed rate so the debounce window has a
//! known length in time. Detected events are latched into
//! [`PENDING_EVENTS`](crate::channels::PENDING_EVENTS) by the encoder.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::Encoder;
use crate::channels::WAKE;

#[embassy_executor::task]
pub async fn input_task(mut encoder: Encoder, poll_interval_us: u32) {
    info!("Input task started");

    let mut ticker = Ticker::every(Duration::from_micros(u64::from(poll_interval_us)));

    loop {
        ticker.next().await;
        encoder.poll();

        let events = encoder.events();
        if events.pressed() || events.rotation() != 0 {
            WAKE.signal(());
        }
    }
}
