//! Hijri calendar conversion.
//!
//! Tabular (civil) Hijri ↔ Gregorian conversion through Julian day numbers:
//! fixed epoch-offset arithmetic with a 30-year intercalation cycle of 11
//! leap days. The conversion is exact and self-inverse; the `adjustment`
//! parameter shifts the result by whole days to track local moon sighting.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Julian day number of 1 Muharram, year 1 (civil epoch).
const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Offset between Julian day numbers and chrono's days-from-CE count.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Hijri month names.
const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Jumada al-Ula",
    "Jumada al-Thania",
    "Rajab",
    "Shaban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qada",
    "Dhu al-Hijja",
];

/// Errors from Hijri date handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HijriError {
    /// Year, month or day outside the calendar's ranges.
    #[error("invalid Hijri date: {0}")]
    InvalidDate(String),

    /// The equivalent Gregorian date cannot be represented.
    #[error("date out of representable range")]
    OutOfRange,
}

/// A date in the Islamic (Hijri) calendar.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mawarith::hijri::HijriDate;
///
/// let ramadan_start = HijriDate::new(1444, 9, 1).unwrap();
/// let gregorian = ramadan_start.to_gregorian().unwrap();
/// assert_eq!(gregorian, NaiveDate::from_ymd_opt(2023, 3, 23).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HijriDate {
    year: i64,
    month: u32,
    day: u32,
}

impl HijriDate {
    /// Creates a Hijri date, validating the field ranges.
    pub fn new(year: i64, month: u32, day: u32) -> Result<Self, HijriError> {
        if year < 1 {
            return Err(HijriError::InvalidDate(format!(
                "year must be positive, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(HijriError::InvalidDate(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(1..=30).contains(&day) {
            return Err(HijriError::InvalidDate(format!(
                "day must be between 1 and 30, got {day}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Hijri year.
    pub fn year(&self) -> i64 {
        self.year
    }

    /// Hijri month, 1–12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of the month, 1–30.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// English name of the month.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Whether the date falls in Ramadan.
    pub fn is_ramadan(&self) -> bool {
        self.month == 9
    }

    /// Converts a Gregorian date, shifted by `adjustment` days for moon
    /// sighting (positive moves the Hijri date forward).
    pub fn from_gregorian(date: NaiveDate, adjustment: i64) -> Result<Self, HijriError> {
        let jdn = i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET + adjustment;
        let days = jdn - HIJRI_EPOCH_JDN;
        if days < 0 {
            return Err(HijriError::OutOfRange);
        }

        let year = (30 * days + 10646) / 10631;
        let year_start = hijri_to_jdn(year, 1, 1);
        let past = jdn - (year_start + 29);
        let month = if past <= 0 {
            1
        } else {
            // ceil(past / 29.5) + 1, capped at the 12th month
            ((2 * past + 58) / 59 + 1).min(12)
        };
        let day = jdn - hijri_to_jdn(year, month as u32, 1) + 1;

        Self::new(year, month as u32, day as u32)
    }

    /// Converts to the equivalent Gregorian date.
    pub fn to_gregorian(&self) -> Result<NaiveDate, HijriError> {
        let jdn = hijri_to_jdn(self.year, self.month, self.day);
        let days_from_ce = jdn - JDN_CE_OFFSET;
        i32::try_from(days_from_ce)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or(HijriError::OutOfRange)
    }

    /// The following Hijri day.
    pub fn next_day(&self) -> Result<Self, HijriError> {
        let date = self.to_gregorian()?;
        let next = date.succ_opt().ok_or(HijriError::OutOfRange)?;
        Self::from_gregorian(next, 0)
    }

    /// Whether this is the last day of its month.
    pub fn is_last_of_month(&self) -> Result<bool, HijriError> {
        Ok(self.next_day()?.month != self.month)
    }
}

impl std::fmt::Display for HijriDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name(), self.year)
    }
}

/// Julian day number of a tabular Hijri date.
///
/// `day + ceil(29.5 * (month - 1)) + 354 * (year - 1) + leap days + epoch`.
fn hijri_to_jdn(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    i64::from(day)
        + (59 * (month - 1) + 1) / 2
        + 354 * (year - 1)
        + (3 + 11 * year) / 30
        + HIJRI_EPOCH_JDN
        - 1
}

/// Julian day (midnight convention) of a Gregorian date, for the solar
/// formulas in the prayer-time module.
pub(crate) fn julian_day(date: NaiveDate) -> f64 {
    (i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET) as f64 - 0.5
}
