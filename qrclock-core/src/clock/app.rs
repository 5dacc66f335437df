//! Menu and display-mode state machine
//!
//! Every screen change is a function of the current mode and an event.
//! Drawing and the time sync itself are left to the caller, which acts
//! on the returned [`Action`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Date and time as a QR code
    #[default]
    Qr,
    /// Analog face
    Analog,
    /// Digits
    Digital,
    /// Mode selection menu
    Menu,
}

/// Menu rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Qr,
    Analog,
    Digital,
    /// Synchronize the RTC over the network
    Ntp,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Qr,
        MenuItem::Analog,
        MenuItem::Digital,
        MenuItem::Ntp,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row label
    pub const fn label(self) -> &'static str {
        match self {
            MenuItem::Qr => "QR",
            MenuItem::Analog => "ANA",
            MenuItem::Digital => "DIG",
            MenuItem::Ntp => "NTP",
        }
    }

    /// Display mode selected by this row, if any
    pub const fn mode(self) -> Option<Mode> {
        match self {
            MenuItem::Qr => Some(Mode::Qr),
            MenuItem::Analog => Some(Mode::Analog),
            MenuItem::Digital => Some(Mode::Digital),
            MenuItem::Ntp => None,
        }
    }

    /// Move by `delta` rows, wrapping around
    pub fn offset(self, delta: i8) -> Self {
        let len = Self::ALL.len() as i16;
        let index = (self.index() as i16 + i16::from(delta)).rem_euclid(len);
        Self::ALL[index as usize]
    }
}

/// Result of the last time sync, shown next to the NTP row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

impl SyncStatus {
    /// Character drawn for this status
    pub const fn symbol(self) -> char {
        match self {
            SyncStatus::Idle => ' ',
            SyncStatus::InProgress => '_',
            SyncStatus::Succeeded => 'o',
            SyncStatus::Failed => 'x',
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Encoder switch pressed
    Press,
    /// Encoder turned one step (-1 clockwise, +1 counter-clockwise)
    Rotate(i8),
    /// Periodic refresh timer fired
    Refresh,
    /// Time sync completed
    SyncFinished { success: bool },
}

/// What the caller must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    None,
    /// Redraw the menu
    ShowMenu,
    /// Read the RTC and draw the current mode's screen
    ShowClock,
    /// Redraw the menu, then fetch network time
    StartSync,
}

/// Menu/mode state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockApp {
    mode: Mode,
    cursor: MenuItem,
    sync: SyncStatus,
}

impl ClockApp {
    pub const fn new(start_mode: Mode) -> Self {
        Self {
            mode: start_mode,
            cursor: MenuItem::Qr,
            sync: SyncStatus::Idle,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> MenuItem {
        self.cursor
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync
    }

    /// Process an event and return the caller's next step
    pub fn handle(&mut self, event: Event) -> Action {
        use Event::*;

        match (self.mode, event) {
            (Mode::Menu, Press) => match self.cursor.mode() {
                Some(mode) => {
                    self.mode = mode;
                    Action::ShowClock
                }
                None => {
                    self.sync = SyncStatus::InProgress;
                    Action::StartSync
                }
            },
            (_, Press) => {
                self.mode = Mode::Menu;
                self.sync = SyncStatus::Idle;
                Action::ShowMenu
            }

            (Mode::Menu, Rotate(delta)) if delta != 0 => {
                self.cursor = self.cursor.offset(delta);
                Action::ShowMenu
            }
            (_, Rotate(_)) => Action::None,

            (Mode::Menu, Refresh) => Action::None,
            (_, Refresh) => Action::ShowClock,

            (Mode::Menu, SyncFinished { success }) if self.sync == SyncStatus::InProgress => {
                self.sync = if success {
                    SyncStatus::Succeeded
                } else {
                    SyncStatus::Failed
                };
                Action::ShowMenu
            }
            (_, SyncFinished { .. }) => Action::None,
        }
    }
}

impl Default for ClockApp {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
