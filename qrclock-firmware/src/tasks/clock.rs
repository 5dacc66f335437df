//! Clock task: menu, rendering and time sync
//!
//! Owns the display, the RTC and the network client. Sleeps until the
//! tick or input task has something for it, then lets the
//! [`ClockContext`] consume the pending events.

use defmt::*;

use qrclock_core::clock::{ClockContext, Mode};

use crate::board::{Display, RealTimeClock};
use crate::channels::{PENDING_EVENTS, REFRESH, WAKE};
use crate::net::NtpClient;
use crate::qr::QrEncoder;

/// Everything the clock task takes ownership of
pub struct ClockResources {
    pub display: Display,
    pub rtc: RealTimeClock,
    pub ntp: NtpClient,
    pub start_mode: Mode,
    pub sync_timeout_ms: u32,
}

#[embassy_executor::task]
pub async fn clock_task(resources: ClockResources) {
    info!("Clock task started");

    let ClockResources {
        mut display,
        mut rtc,
        mut ntp,
        start_mode,
        sync_timeout_ms,
    } = resources;

    let mut context = ClockContext::new(start_mode);
    let mut encoder = QrEncoder::new();

    loop {
        WAKE.wait().await;

        let sync_requested =
            context.service(&PENDING_EVENTS, &REFRESH, &mut display, &mut rtc, &mut encoder);
        if !sync_requested {
            continue;
        }

        info!("Time sync started");
        match context
            .synchronize(&mut ntp, sync_timeout_ms, &mut display, &mut rtc)
            .await
        {
            Ok(now) => info!("Time sync succeeded: {}", now),
            Err(e) => warn!("Time sync failed: {}", e),
        }
    }
}
