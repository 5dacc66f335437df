//! Network time source trait

use crate::time::DateTime;

/// Fetches the current local time from a network source
#[allow(async_fn_in_trait)]
pub trait TimeSync {
    type Error;

    /// Fetch the time, giving up after `timeout_ms`
    async fn fetch_datetime(&mut self, timeout_ms: u32) -> Result<DateTime, Self::Error>;
}
