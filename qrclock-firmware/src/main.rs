//! QR Clock - 32×32 Dot-Matrix Desk Clock Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W. Drives a two-color
//! LED panel made of 16 TM1640 chips, reads a rotary encoder for the
//! menu, keeps time on a DS1302 and sets it from NTP on request.
//!
//! Task layout:
//!
//! ```text
//! tick_task ──REFRESH──┐
//!                      ├──WAKE──> clock_task ──> TM1640 chain
//! input_task ─EVENTS───┘              │   └────> DS1302
//!                                     └────────> NtpClient (CYW43)
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use qrclock_core::display::PhysicalFrame;
use qrclock_hal_rp2040::PinBank;

mod board;
mod channels;
mod config;
mod net;
mod qr;
mod tasks;

use crate::channels::{PENDING_EVENTS, REFRESH, WAKE};
use crate::net::NtpClient;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("QR clock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let (mut bank, radio) = PinBank::from_peripherals(p);

    let mut display = unwrap!(board::display(&mut bank, &config.display));
    display.init(&PhysicalFrame::new());
    info!("Display initialized (brightness {})", display.brightness());

    let mut rtc = unwrap!(board::rtc(&mut bank, &config.rtc));
    rtc.init();
    if rtc.is_halted() {
        warn!("RTC oscillator halted; set the time from the NTP menu entry");
    }

    let encoder = unwrap!(board::encoder(&mut bank, &config.rotary, &PENDING_EVENTS));
    info!("Encoder initialized");

    let ntp = NtpClient::new(
        spawner,
        radio,
        config.wifi.clone(),
        config.ntp.clone(),
        config.clock.utc_offset_minutes,
    )
    .await;

    // Draw the start screen without waiting a full refresh interval
    REFRESH.request();
    WAKE.signal(());

    let resources = tasks::ClockResources {
        display,
        rtc,
        ntp,
        start_mode: config.clock.start_mode,
        sync_timeout_ms: config.ntp.timeout_ms,
    };

    unwrap!(spawner.spawn(tasks::tick_task(config.clock.refresh_interval_ms)));
    unwrap!(spawner.spawn(tasks::input_task(encoder, config.rotary.poll_interval_us)));
    unwrap!(spawner.spawn(tasks::clock_task(resources)));

    info!("All tasks spawned, firmware running");
}
