//! Prayer times (salat).
//!
//! Computes the six daily prayer times plus the night fractions for a
//! geographic location, timezone and date, using a selectable calculation
//! method. The method table mirrors the conventions of the major Islamic
//! authorities; picking one is a data choice, not a code path.
//!
//! # References
//!
//! - Depression-angle conventions: Muslim World League, ISNA, EGAS,
//!   Umm al-Qura and others (see [`METHODS`]).
//! - Asr shadow conventions: Jomhor (factor 1) and Hanafi (factor 2).

mod config;
mod times;

pub use config::{method_by_id, AsrMadhab, Method, PrayerConfig, TwilightRule, METHODS};
pub use times::{PrayerTimes, SalatError};
