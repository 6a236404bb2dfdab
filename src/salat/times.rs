//! Daily prayer time computation.
//!
//! Solar-position formulas over the Julian day: sun declination and the
//! equation of time give the Dohr meridian transit; every other time is an
//! hour-angle offset from it for the configured depression angle. All other
//! times derive from Dohr, so it is computed first.

use super::config::{PrayerConfig, TwilightRule};
use crate::hijri::{self, HijriDate};
use chrono::{NaiveDate, NaiveTime};
use std::f64::consts::PI;
use thiserror::Error;

/// Zenith angle for sunrise and sunset, including refraction and the
/// solar semi-diameter.
const HORIZON_ANGLE: f64 = 90.833_33;

/// Errors from prayer time computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalatError {
    /// The configuration failed validation.
    #[error("invalid prayer configuration: {0}")]
    InvalidConfig(String),

    /// The sun never reaches the requested depression at this latitude
    /// and date (polar twilight).
    #[error("the sun does not reach {depression}° below the horizon at latitude {latitude}°")]
    HighLatitude {
        /// Requested depression angle, in degrees.
        depression: f64,
        /// Observer latitude, in degrees.
        latitude: f64,
    },

    /// The Ramadan lookup for a fixed-interval Ishaa failed.
    #[error("calendar conversion failed: {0}")]
    Calendar(#[from] crate::hijri::HijriError),
}

/// The computed times for one date and location, in local wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTimes {
    /// Dawn prayer.
    pub fajr: NaiveTime,
    /// Sunrise (end of Fajr).
    pub sherook: NaiveTime,
    /// Noon prayer, at meridian transit.
    pub dohr: NaiveTime,
    /// Afternoon prayer.
    pub asr: NaiveTime,
    /// Sunset prayer.
    pub maghreb: NaiveTime,
    /// Night prayer.
    pub ishaa: NaiveTime,
    /// Middle of the night between Maghreb and Fajr; usual end of Ishaa.
    pub midnight: NaiveTime,
    /// Start of the last third of the night (preferred Qiyam time).
    pub last_third_of_night: NaiveTime,
}

impl PrayerTimes {
    /// Computes the times for `date` under `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use mawarith::salat::{PrayerConfig, PrayerTimes};
    ///
    /// let config = PrayerConfig::default()
    ///     .with_coordinates(3.058756, 36.75389) // Algiers
    ///     .with_timezone(1.0);
    /// let date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
    /// let times = PrayerTimes::compute(&config, date).unwrap();
    /// assert!(times.fajr < times.sherook);
    /// ```
    pub fn compute(config: &PrayerConfig, date: NaiveDate) -> Result<Self, SalatError> {
        config.validate().map_err(SalatError::InvalidConfig)?;

        let jd = hijri::julian_day(date);
        let delta = sun_declination(jd);
        let latitude = config.latitude;

        // Everything hangs off the transit time.
        let dohr = 12.0 + config.longitude_difference() + equation_of_time(jd) / 60.0;

        let fajr_offset = match config.method.fajr {
            TwilightRule::Angle(depression) => {
                hour_angle_offset(depression + 90.0, delta, latitude)?
            }
            TwilightRule::FixedInterval { .. } => {
                return Err(SalatError::InvalidConfig(
                    "fajr requires an angle rule".into(),
                ))
            }
        };
        let fajr = dohr - fajr_offset;
        let sherook = dohr - hour_angle_offset(HORIZON_ANGLE, delta, latitude)?;
        let asr_zenith = asr_angle(config.asr_madhab.shadow_factor(), delta, latitude);
        let asr = dohr + hour_angle_offset(asr_zenith, delta, latitude)?;
        let maghreb = dohr + hour_angle_offset(HORIZON_ANGLE, delta, latitude)?;

        let ishaa = match config.method.ishaa {
            TwilightRule::Angle(depression) => {
                dohr + hour_angle_offset(depression + 90.0, delta, latitude)?
            }
            TwilightRule::FixedInterval {
                all_year_min,
                ramadan_min,
            } => {
                let minutes = if HijriDate::from_gregorian(date, 0)?.is_ramadan() {
                    ramadan_min
                } else {
                    all_year_min
                };
                maghreb + minutes / 60.0
            }
        };

        let night = 24.0 - (maghreb - fajr);
        let midnight = maghreb + night / 2.0;
        let last_third_of_night = maghreb + 2.0 * night / 3.0;

        let st = config.summer_time;
        Ok(Self {
            fajr: to_wall_time(fajr, st),
            sherook: to_wall_time(sherook, st),
            dohr: to_wall_time(dohr, st),
            asr: to_wall_time(asr, st),
            maghreb: to_wall_time(maghreb, st),
            ishaa: to_wall_time(ishaa, st),
            midnight: to_wall_time(midnight, st),
            last_third_of_night: to_wall_time(last_third_of_night, st),
        })
    }
}

fn dsin(degrees: f64) -> f64 {
    (degrees * PI / 180.0).sin()
}

fn dcos(degrees: f64) -> f64 {
    (degrees * PI / 180.0).cos()
}

/// Sun declination in degrees (low-precision solar ephemeris).
fn sun_declination(jd: f64) -> f64 {
    let n = jd - 2_451_544.5;
    let epsilon = 23.44 - 0.000_000_4 * n;
    let l = 280.466 + 0.985_647_4 * n;
    let g = 357.528 + 0.985_600_3 * n;
    let lamda = l + 1.915 * dsin(g) + 0.02 * dsin(2.0 * g);
    let x = dsin(epsilon) * dsin(lamda);
    (x / (1.0 - x * x).sqrt()).atan() * 180.0 / PI
}

/// Equation of time in minutes; negative when the true sun transits late.
fn equation_of_time(jd: f64) -> f64 {
    let n = jd - 2_451_544.5;
    let g = 357.528 + 0.985_600_3 * n;
    let c = 1.9148 * dsin(g) + 0.02 * dsin(2.0 * g) + 0.0003 * dsin(3.0 * g);
    let lamda = 280.47 + 0.985_600_3 * n + c;
    let r = -2.468 * dsin(2.0 * lamda) + 0.053 * dsin(4.0 * lamda) + 0.0014 * dsin(6.0 * lamda);
    (c + r) * 4.0
}

/// Hours between the meridian transit and the moment the sun stands at
/// `angle` degrees from the zenith.
fn hour_angle_offset(angle: f64, delta: f64, latitude: f64) -> Result<f64, SalatError> {
    let s = (dcos(angle) - dsin(latitude) * dsin(delta)) / (dcos(latitude) * dcos(delta));
    if s.abs() >= 1.0 {
        return Err(SalatError::HighLatitude {
            depression: angle - 90.0,
            latitude,
        });
    }
    Ok((180.0 / PI * ((-s / (1.0 - s * s).sqrt()).atan() + PI / 2.0)) / 15.0)
}

/// Zenith angle of the sun when a shadow is `factor` object lengths.
fn asr_angle(factor: f64, delta: f64, latitude: f64) -> f64 {
    let x = dsin(latitude) * dsin(delta) + dcos(latitude) * dcos(delta);
    let a = (x / (1.0 - x * x).sqrt()).atan();
    let x = factor + 1.0 / a.tan();
    90.0 - 180.0 / PI * (x.atan() + 2.0 * (1.0_f64).atan())
}

/// Converts decimal hours to wall-clock time, wrapping past midnight.
fn to_wall_time(hours: f64, summer_time: bool) -> NaiveTime {
    let shift = if summer_time { 1.0 } else { 0.0 };
    let seconds = ((hours + shift) * 3600.0).floor().rem_euclid(86_400.0) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or(NaiveTime::MIN)
}
