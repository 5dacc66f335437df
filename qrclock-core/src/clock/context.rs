//! Clock context: owns the frame buffer and the menu state
//!
//! The firmware's main task calls [`ClockContext::service`] in a loop.
//! Everything it needs from the outside world comes in through the
//! collaborator traits, so the whole loop runs against mocks on the host.

use super::app::{Action, ClockApp, Event, Mode};
use super::render;
use crate::display::{AddressMap, LogicalMatrix};
use crate::input::events::{PendingEvents, RefreshFlag};
use crate::time::DateTime;
use crate::traits::{DisplayDriver, Rtc, SymbolEncoder, TimeSync};

/// Frame buffer, address map and menu state
pub struct ClockContext {
    matrix: LogicalMatrix,
    map: AddressMap,
    app: ClockApp,
}

impl ClockContext {
    pub fn new(start_mode: Mode) -> Self {
        Self {
            matrix: LogicalMatrix::new(),
            map: AddressMap::build(),
            app: ClockApp::new(start_mode),
        }
    }

    pub fn app(&self) -> &ClockApp {
        &self.app
    }

    pub fn matrix(&self) -> &LogicalMatrix {
        &self.matrix
    }

    /// Consume pending input and the refresh request, redrawing as needed
    ///
    /// Returns `true` when the user asked for a time sync. The menu has
    /// already been redrawn with the in-progress marker; the caller runs
    /// the sync and reports back through [`finish_sync`](Self::finish_sync).
    pub fn service<D, R, E>(
        &mut self,
        events: &PendingEvents,
        refresh: &RefreshFlag,
        display: &mut D,
        rtc: &mut R,
        encoder: &mut E,
    ) -> bool
    where
        D: DisplayDriver,
        R: Rtc,
        E: SymbolEncoder,
    {
        if events.take_press() {
            let action = self.app.handle(Event::Press);
            if self.perform(action, refresh, display, rtc, encoder) {
                return true;
            }
        }

        let delta = events.take_rotation();
        if delta != 0 {
            let action = self.app.handle(Event::Rotate(delta));
            self.perform(action, refresh, display, rtc, encoder);
        }

        if self.app.mode() != Mode::Menu && refresh.take() {
            let action = self.app.handle(Event::Refresh);
            self.perform(action, refresh, display, rtc, encoder);
        }

        false
    }

    /// Report the outcome of a time sync requested by [`service`](Self::service)
    ///
    /// On success the RTC is set before the menu shows the result.
    pub fn finish_sync<D, R>(&mut self, result: Option<DateTime>, display: &mut D, rtc: &mut R)
    where
        D: DisplayDriver,
        R: Rtc,
    {
        if let Some(now) = &result {
            rtc.set_datetime(now);
        }
        let action = self.app.handle(Event::SyncFinished {
            success: result.is_some(),
        });
        if action == Action::ShowMenu {
            self.show_menu(display);
        }
    }

    /// Fetch the time from `source` and report the outcome
    ///
    /// Call after [`service`](Self::service) returned `true`. Input keeps
    /// being latched by other tasks while the fetch is in flight.
    pub async fn synchronize<T, D, R>(
        &mut self,
        source: &mut T,
        timeout_ms: u32,
        display: &mut D,
        rtc: &mut R,
    ) -> Result<DateTime, T::Error>
    where
        T: TimeSync,
        D: DisplayDriver,
        R: Rtc,
    {
        let result = source.fetch_datetime(timeout_ms).await;
        self.finish_sync(result.as_ref().ok().copied(), display, rtc);
        result
    }

    /// Carry out an action; returns `true` if a sync must start
    ///
    /// Drawing the clock satisfies any pending refresh request.
    fn perform<D, R, E>(
        &mut self,
        action: Action,
        refresh: &RefreshFlag,
        display: &mut D,
        rtc: &mut R,
        encoder: &mut E,
    ) -> bool
    where
        D: DisplayDriver,
        R: Rtc,
        E: SymbolEncoder,
    {
        match action {
            Action::None => false,
            Action::ShowMenu => {
                self.show_menu(display);
                false
            }
            Action::ShowClock => {
                refresh.take();
                let now = rtc.datetime();
                self.show_clock(&now, display, encoder);
                false
            }
            Action::StartSync => {
                self.show_menu(display);
                true
            }
        }
    }

    fn show_menu<D: DisplayDriver>(&mut self, display: &mut D) {
        render::draw_menu(&mut self.matrix, self.app.cursor(), self.app.sync_status());
        self.flush(display);
    }

    /// Draw the current clock screen for `now`
    pub fn show_clock<D, E>(&mut self, now: &DateTime, display: &mut D, encoder: &mut E)
    where
        D: DisplayDriver,
        E: SymbolEncoder,
    {
        match self.app.mode() {
            Mode::Qr => {
                if !render::draw_qr(&mut self.matrix, now, encoder) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("QR encode failed, keeping previous frame");
                    return;
                }
            }
            Mode::Analog => render::draw_analog(&mut self.matrix, now),
            Mode::Digital => render::draw_digital(&mut self.matrix, now),
            Mode::Menu => return,
        }
        self.flush(display);
    }

    fn flush<D: DisplayDriver>(&mut self, display: &mut D) {
        let frame = self.matrix.to_physical_frame(&self.map);
        display.write_frame(&frame);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::clock::{MenuItem, SyncStatus};
    use crate::display::{PhysicalFrame, SymbolBitmap};

    #[derive(Default)]
    struct MockDisplay {
        frames: Vec<PhysicalFrame>,
    }

    impl DisplayDriver for MockDisplay {
        fn write_frame(&mut self, frame: &PhysicalFrame) {
            self.frames.push(*frame);
        }
    }

    struct MockRtc {
        now: DateTime,
        reads: usize,
        set: Option<DateTime>,
    }

    impl MockRtc {
        fn new() -> Self {
            Self {
                now: DateTime::new(2024, 6, 1, 10, 20, 30).unwrap(),
                reads: 0,
                set: None,
            }
        }
    }

    impl Rtc for MockRtc {
        fn datetime(&mut self) -> DateTime {
            self.reads += 1;
            self.now
        }

        fn set_datetime(&mut self, datetime: &DateTime) {
            self.set = Some(*datetime);
        }
    }

    struct MockEncoder {
        fail: bool,
    }

    impl SymbolEncoder for MockEncoder {
        fn encode(&mut self, _text: &str) -> Option<SymbolBitmap> {
            if self.fail {
                return None;
            }
            let mut bitmap = SymbolBitmap::new(29)?;
            bitmap.set(0, 0);
            Some(bitmap)
        }
    }

    struct Rig {
        ctx: ClockContext,
        events: PendingEvents,
        refresh: RefreshFlag,
        display: MockDisplay,
        rtc: MockRtc,
        encoder: MockEncoder,
    }

    impl Rig {
        fn new(mode: Mode) -> Self {
            Self {
                ctx: ClockContext::new(mode),
                events: PendingEvents::new(),
                refresh: RefreshFlag::new(),
                display: MockDisplay::default(),
                rtc: MockRtc::new(),
                encoder: MockEncoder { fail: false },
            }
        }

        fn service(&mut self) -> bool {
            self.ctx.service(
                &self.events,
                &self.refresh,
                &mut self.display,
                &mut self.rtc,
                &mut self.encoder,
            )
        }
    }

    #[test]
    fn test_idle_does_nothing() {
        let mut rig = Rig::new(Mode::Qr);
        assert!(!rig.service());
        assert!(rig.display.frames.is_empty());
        assert_eq!(rig.rtc.reads, 0);
    }

    #[test]
    fn test_refresh_draws_clock() {
        let mut rig = Rig::new(Mode::Digital);
        rig.refresh.request();
        rig.service();
        assert_eq!(rig.display.frames.len(), 1);
        assert_eq!(rig.rtc.reads, 1);
        assert!(!rig.refresh.is_requested());
    }

    #[test]
    fn test_qr_failure_skips_frame() {
        let mut rig = Rig::new(Mode::Qr);
        rig.encoder.fail = true;
        rig.refresh.request();
        rig.service();
        assert!(rig.display.frames.is_empty());
        assert_eq!(rig.rtc.reads, 1);
    }

    #[test]
    fn test_menu_navigation() {
        let mut rig = Rig::new(Mode::Qr);
        rig.events.latch_press();
        rig.service();
        assert_eq!(rig.ctx.app().mode(), Mode::Menu);
        assert_eq!(rig.display.frames.len(), 1);

        rig.events.latch_rotation(1);
        rig.service();
        assert_eq!(rig.ctx.app().cursor(), MenuItem::Analog);
        assert_eq!(rig.display.frames.len(), 2);

        // Refresh requests are held while the menu is open
        rig.refresh.request();
        rig.service();
        assert_eq!(rig.display.frames.len(), 2);
        assert!(rig.refresh.is_requested());

        rig.events.latch_press();
        rig.service();
        assert_eq!(rig.ctx.app().mode(), Mode::Analog);
        assert_eq!(rig.display.frames.len(), 3);
    }

    #[test]
    fn test_mode_select_draws_clock_once() {
        let mut rig = Rig::new(Mode::Menu);
        rig.events.latch_rotation(1);
        rig.service();
        rig.refresh.request();
        rig.service();
        let menu_frames = rig.display.frames.len();

        rig.events.latch_press();
        rig.service();
        assert_eq!(rig.ctx.app().mode(), Mode::Analog);
        assert_eq!(rig.display.frames.len(), menu_frames + 1);
        assert_eq!(rig.rtc.reads, 1);
        assert!(!rig.refresh.is_requested());
    }

    #[test]
    fn test_sync_success_sets_rtc() {
        let mut rig = Rig::new(Mode::Qr);
        rig.events.latch_press();
        rig.service();
        rig.events.latch_rotation(-1);
        rig.service();
        assert_eq!(rig.ctx.app().cursor(), MenuItem::Ntp);

        rig.events.latch_press();
        assert!(rig.service());
        assert_eq!(rig.ctx.app().sync_status(), SyncStatus::InProgress);

        let fetched = DateTime::new(2025, 1, 2, 3, 4, 5).unwrap();
        rig.ctx.finish_sync(Some(fetched), &mut rig.display, &mut rig.rtc);
        assert_eq!(rig.rtc.set, Some(fetched));
        assert_eq!(rig.ctx.app().sync_status(), SyncStatus::Succeeded);

        let mut expected = LogicalMatrix::new();
        render::draw_menu(&mut expected, MenuItem::Ntp, SyncStatus::Succeeded);
        assert_eq!(rig.ctx.matrix(), &expected);
    }

    #[test]
    fn test_sync_failure_leaves_rtc() {
        let mut rig = Rig::new(Mode::Menu);
        rig.events.latch_rotation(-1);
        rig.service();
        rig.events.latch_press();
        assert!(rig.service());

        rig.ctx.finish_sync(None, &mut rig.display, &mut rig.rtc);
        assert_eq!(rig.rtc.set, None);
        assert_eq!(rig.ctx.app().sync_status(), SyncStatus::Failed);
    }

    struct MockTimeSource {
        reply: Result<DateTime, ()>,
        timeouts: Vec<u32>,
    }

    impl TimeSync for MockTimeSource {
        type Error = ();

        async fn fetch_datetime(&mut self, timeout_ms: u32) -> Result<DateTime, ()> {
            self.timeouts.push(timeout_ms);
            self.reply
        }
    }

    #[test]
    fn test_synchronize_reports_outcome() {
        let fetched = DateTime::new(2025, 1, 2, 3, 4, 5).unwrap();
        let mut source = MockTimeSource {
            reply: Ok(fetched),
            timeouts: Vec::new(),
        };
        let mut rig = Rig::new(Mode::Menu);
        rig.events.latch_rotation(-1);
        rig.service();
        rig.events.latch_press();
        assert!(rig.service());

        let result = embassy_futures::block_on(rig.ctx.synchronize(
            &mut source,
            10_000,
            &mut rig.display,
            &mut rig.rtc,
        ));
        assert_eq!(result, Ok(fetched));
        assert_eq!(source.timeouts, [10_000]);
        assert_eq!(rig.rtc.set, Some(fetched));
        assert_eq!(rig.ctx.app().sync_status(), SyncStatus::Succeeded);

        source.reply = Err(());
        rig.events.latch_press();
        assert!(rig.service());
        let result = embassy_futures::block_on(rig.ctx.synchronize(
            &mut source,
            500,
            &mut rig.display,
            &mut rig.rtc,
        ));
        assert_eq!(result, Err(()));
        assert_eq!(rig.ctx.app().sync_status(), SyncStatus::Failed);
        assert_eq!(rig.rtc.set, Some(fetched));
    }

    #[test]
    fn test_events_consumed_once() {
        let mut rig = Rig::new(Mode::Menu);
        rig.events.latch_rotation(1);
        rig.service();
        rig.service();
        assert_eq!(rig.ctx.app().cursor(), MenuItem::Analog);
        assert_eq!(rig.events.rotation(), 0);
    }
}
