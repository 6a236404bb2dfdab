//! Residuary (taʿsib) calculator.
//!
//! Distributes whatever fraction of the estate remains after fixed shares.
//! Residuary classes form a precedence ladder; the nearest eligible class
//! takes the entire remaining pool, which is the residuary-specific second
//! exclusion pass. Within a class, male heads weigh twice female heads; a
//! class of equal weights splits per capita.

use super::blocking::BlockingOutcome;
use super::fixed::FardOutcome;
use super::types::{HeirCategory, MirathError, Roster};
use crate::fraction::Fraction;
use std::collections::BTreeMap;

/// One rung of the residuary ladder.
///
/// `male` inherits on his own; `female` inherits alongside him at half
/// weight, or alone when a fixed-share conversion made her residuary
/// (sisters alongside daughters).
struct ResiduaryClass {
    name: &'static str,
    male: Option<HeirCategory>,
    female: Option<HeirCategory>,
}

const CLASSES: [ResiduaryClass; 12] = [
    ResiduaryClass {
        name: "children",
        male: Some(HeirCategory::Son),
        female: Some(HeirCategory::Daughter),
    },
    ResiduaryClass {
        name: "sons-children",
        male: Some(HeirCategory::SonsSon),
        female: Some(HeirCategory::SonsDaughter),
    },
    ResiduaryClass {
        name: "father",
        male: Some(HeirCategory::Father),
        female: None,
    },
    ResiduaryClass {
        name: "grandfather",
        male: Some(HeirCategory::PaternalGrandfather),
        female: None,
    },
    ResiduaryClass {
        name: "full-siblings",
        male: Some(HeirCategory::FullBrother),
        female: Some(HeirCategory::FullSister),
    },
    ResiduaryClass {
        name: "paternal-siblings",
        male: Some(HeirCategory::PaternalBrother),
        female: Some(HeirCategory::PaternalSister),
    },
    ResiduaryClass {
        name: "full-brothers-sons",
        male: Some(HeirCategory::FullBrothersSon),
        female: None,
    },
    ResiduaryClass {
        name: "paternal-brothers-sons",
        male: Some(HeirCategory::PaternalBrothersSon),
        female: None,
    },
    ResiduaryClass {
        name: "full-uncles",
        male: Some(HeirCategory::FullPaternalUncle),
        female: None,
    },
    ResiduaryClass {
        name: "paternal-uncles",
        male: Some(HeirCategory::PaternalPaternalUncle),
        female: None,
    },
    ResiduaryClass {
        name: "full-uncles-sons",
        male: Some(HeirCategory::FullPaternalUnclesSon),
        female: None,
    },
    ResiduaryClass {
        name: "paternal-uncles-sons",
        male: Some(HeirCategory::PaternalPaternalUnclesSon),
        female: None,
    },
];

fn overflow() -> MirathError {
    MirathError::Overflow { stage: "residuary" }
}

/// Runs the residuary stage.
///
/// Returns per-category fractions of the *whole* estate. The map is empty
/// when the fixed shares already consume the estate (or more), or when no
/// residuary-flagged category exists; the adjustment stage then decides
/// between ʿawl and radd.
pub fn apply(
    roster: &Roster,
    outcome: &BlockingOutcome,
    fard: &FardOutcome,
) -> Result<BTreeMap<HeirCategory, Fraction>, MirathError> {
    let fixed_sum = Fraction::checked_sum(fard.shares.values().copied()).ok_or_else(overflow)?;
    let pool = match Fraction::ONE.checked_sub(fixed_sum) {
        Some(p) if p > Fraction::ZERO => p,
        // Nothing remains; defer to the adjustment stage.
        _ => return Ok(BTreeMap::new()),
    };

    let eligible = |category: Option<HeirCategory>| -> u32 {
        match category {
            Some(c) if fard.residuary.contains(&c) && outcome.is_admitted(c) => roster.count(c),
            _ => 0,
        }
    };

    for class in &CLASSES {
        let male_count = eligible(class.male);
        let female_count = eligible(class.female);
        if male_count == 0 && female_count == 0 {
            continue;
        }

        tracing::debug!(class = class.name, male_count, female_count, %pool, "residuary class selected");

        let total_weight = i64::from(2 * male_count + female_count);
        let mut shares = BTreeMap::new();

        if let (Some(category), true) = (class.male, male_count > 0) {
            let weight = Fraction::new(i64::from(2 * male_count), total_weight);
            let share = pool.checked_mul(weight).ok_or_else(overflow)?;
            shares.insert(category, share);
        }
        if let (Some(category), true) = (class.female, female_count > 0) {
            let weight = Fraction::new(i64::from(female_count), total_weight);
            let share = pool.checked_mul(weight).ok_or_else(overflow)?;
            shares.insert(category, share);
        }

        return Ok(shares);
    }

    Ok(BTreeMap::new())
}
