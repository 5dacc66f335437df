//! Calendar date and time of day
//!
//! Civil-date conversion uses the proleptic Gregorian calendar with the
//! days-from-epoch algorithm, so it is exact for every year the RTC can
//! hold.

/// Seconds in a day
const SECS_PER_DAY: i64 = 86_400;

/// Days from 0000-03-01 to 1970-01-01
const EPOCH_SHIFT: i64 = 719_468;

/// Days per 400-year Gregorian cycle
const DAYS_PER_ERA: i64 = 146_097;

/// Weekday names as shown on the QR screen, Sunday first
pub const WEEKDAY_NAMES_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Invalid date/time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// Year outside the supported range
    Year,
    /// Month not in 1..=12
    Month,
    /// Day not valid for the month
    Day,
    /// Hour not in 0..=23
    Hour,
    /// Minute not in 0..=59
    Minute,
    /// Second not in 0..=59
    Second,
    /// Weekday not in 0..=6
    Weekday,
}

/// Local date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    /// 0 = Sunday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of `year`, or 0 for an invalid month
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a civil date
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year.rem_euclid(400);
    let mp = (i64::from(month) + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT
}

/// Civil date for a count of days since 1970-01-01
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z.rem_euclid(DAYS_PER_ERA);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// 1970-01-01 was a Thursday
fn weekday_from_days(days: i64) -> u8 {
    (days + 4).rem_euclid(7) as u8
}

impl DateTime {
    /// Build a validated date/time; the weekday is derived from the date
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DateTimeError> {
        let mut dt = Self {
            year,
            month,
            day,
            weekday: 0,
            hour,
            minute,
            second,
        };
        dt.validate_date()?;
        dt.weekday = weekday_from_days(days_from_civil(i64::from(year), month, day));
        dt.validate()?;
        Ok(dt)
    }

    fn validate_date(&self) -> Result<(), DateTimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(DateTimeError::Month);
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(DateTimeError::Day);
        }
        Ok(())
    }

    /// Check every field is in range
    pub fn validate(&self) -> Result<(), DateTimeError> {
        self.validate_date()?;
        if self.hour > 23 {
            return Err(DateTimeError::Hour);
        }
        if self.minute > 59 {
            return Err(DateTimeError::Minute);
        }
        if self.second > 59 {
            return Err(DateTimeError::Second);
        }
        if self.weekday > 6 {
            return Err(DateTimeError::Weekday);
        }
        Ok(())
    }

    /// Local time for a Unix timestamp shifted by a fixed UTC offset
    pub fn from_unix(unix_seconds: i64, utc_offset_minutes: i32) -> Result<Self, DateTimeError> {
        let local = unix_seconds + i64::from(utc_offset_minutes) * 60;
        let days = local.div_euclid(SECS_PER_DAY);
        let secs = local.rem_euclid(SECS_PER_DAY);

        let (year, month, day) = civil_from_days(days);
        let year = u16::try_from(year).map_err(|_| DateTimeError::Year)?;

        Ok(Self {
            year,
            month,
            day,
            weekday: weekday_from_days(days),
            hour: (secs / 3600) as u8,
            minute: (secs / 60 % 60) as u8,
            second: (secs % 60) as u8,
        })
    }

    /// Unix timestamp of this local time under a fixed UTC offset
    pub fn to_unix(&self, utc_offset_minutes: i32) -> i64 {
        let days = days_from_civil(i64::from(self.year), self.month, self.day);
        days * SECS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
            - i64::from(utc_offset_minutes) * 60
    }

    /// Japanese weekday name
    pub fn weekday_name_ja(&self) -> &'static str {
        WEEKDAY_NAMES_JA[usize::from(self.weekday % 7)]
    }
}
