//! Periodic screen refresh

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::{REFRESH, WAKE};

/// Requests a redraw every `interval_ms`
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));

    loop {
        ticker.next().await;
        REFRESH.request();
        WAKE.signal(());
    }
}
