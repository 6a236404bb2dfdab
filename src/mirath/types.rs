//! Core data model for estate allocation.
//!
//! The two central types — [`Roster`] and [`AllocationResult`] — define the
//! contract between the caller and the allocation pipeline. A roster declares
//! which heir categories are present and in what number; the result reports,
//! for every declared category, an exact fraction of the estate and a
//! monetary amount, together with audit flags for the applied corrections.

use crate::fraction::Fraction;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

/// The closed set of recognized heir relationship classes.
///
/// Every category maps to exactly one exclusion rule and to a fixed-share
/// rule, a residuary rule, or both. The set is deliberately a closed enum
/// rather than an open string key, so the rule tables provably cover every
/// category.
///
/// Variant order is the canonical reporting order: spouses, descendants,
/// ascendants, siblings, then the deeper agnatic lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeirCategory {
    /// Surviving husband.
    Husband,
    /// Surviving wife or wives (one entry; the count is the number of wives).
    Wife,
    /// Son of the deceased.
    Son,
    /// Daughter of the deceased.
    Daughter,
    /// Son's son, however far down through sons.
    SonsSon,
    /// Son's daughter, however far down through sons.
    SonsDaughter,
    /// Father of the deceased.
    Father,
    /// Mother of the deceased.
    Mother,
    /// Father's father, however far up through fathers.
    PaternalGrandfather,
    /// Father's mother.
    PaternalGrandmother,
    /// Mother's mother.
    MaternalGrandmother,
    /// Brother sharing both parents.
    FullBrother,
    /// Sister sharing both parents.
    FullSister,
    /// Brother sharing only the father.
    PaternalBrother,
    /// Sister sharing only the father.
    PaternalSister,
    /// Brother sharing only the mother.
    MaternalBrother,
    /// Sister sharing only the mother.
    MaternalSister,
    /// Son of a full brother.
    FullBrothersSon,
    /// Son of a paternal brother.
    PaternalBrothersSon,
    /// Father's full brother.
    FullPaternalUncle,
    /// Father's paternal brother.
    PaternalPaternalUncle,
    /// Son of a full paternal uncle.
    FullPaternalUnclesSon,
    /// Son of a paternal paternal uncle.
    PaternalPaternalUnclesSon,
}

impl HeirCategory {
    /// All categories, in reporting order.
    pub const ALL: [HeirCategory; 23] = [
        HeirCategory::Husband,
        HeirCategory::Wife,
        HeirCategory::Son,
        HeirCategory::Daughter,
        HeirCategory::SonsSon,
        HeirCategory::SonsDaughter,
        HeirCategory::Father,
        HeirCategory::Mother,
        HeirCategory::PaternalGrandfather,
        HeirCategory::PaternalGrandmother,
        HeirCategory::MaternalGrandmother,
        HeirCategory::FullBrother,
        HeirCategory::FullSister,
        HeirCategory::PaternalBrother,
        HeirCategory::PaternalSister,
        HeirCategory::MaternalBrother,
        HeirCategory::MaternalSister,
        HeirCategory::FullBrothersSon,
        HeirCategory::PaternalBrothersSon,
        HeirCategory::FullPaternalUncle,
        HeirCategory::PaternalPaternalUncle,
        HeirCategory::FullPaternalUnclesSon,
        HeirCategory::PaternalPaternalUnclesSon,
    ];

    /// Maximum admissible count for the category, if capped.
    ///
    /// A deceased person leaves at most one spouse of each kind (and up to
    /// four wives), one parent of each kind, and one grandparent per line.
    pub fn max_count(self) -> Option<u32> {
        match self {
            HeirCategory::Husband => Some(1),
            HeirCategory::Wife => Some(4),
            HeirCategory::Father
            | HeirCategory::Mother
            | HeirCategory::PaternalGrandfather
            | HeirCategory::PaternalGrandmother
            | HeirCategory::MaternalGrandmother => Some(1),
            _ => None,
        }
    }

    /// Human-readable category name.
    pub fn description(&self) -> &'static str {
        match self {
            HeirCategory::Husband => "husband",
            HeirCategory::Wife => "wife",
            HeirCategory::Son => "son",
            HeirCategory::Daughter => "daughter",
            HeirCategory::SonsSon => "son's son",
            HeirCategory::SonsDaughter => "son's daughter",
            HeirCategory::Father => "father",
            HeirCategory::Mother => "mother",
            HeirCategory::PaternalGrandfather => "paternal grandfather",
            HeirCategory::PaternalGrandmother => "paternal grandmother",
            HeirCategory::MaternalGrandmother => "maternal grandmother",
            HeirCategory::FullBrother => "full brother",
            HeirCategory::FullSister => "full sister",
            HeirCategory::PaternalBrother => "paternal half-brother",
            HeirCategory::PaternalSister => "paternal half-sister",
            HeirCategory::MaternalBrother => "maternal half-brother",
            HeirCategory::MaternalSister => "maternal half-sister",
            HeirCategory::FullBrothersSon => "full brother's son",
            HeirCategory::PaternalBrothersSon => "paternal brother's son",
            HeirCategory::FullPaternalUncle => "full paternal uncle",
            HeirCategory::PaternalPaternalUncle => "paternal paternal uncle",
            HeirCategory::FullPaternalUnclesSon => "full paternal uncle's son",
            HeirCategory::PaternalPaternalUnclesSon => "paternal paternal uncle's son",
        }
    }
}

/// The set of heirs present for one estate.
///
/// At most one entry per category; multiple heirs of the same category
/// collapse into one entry with a count (e.g. two wives share one combined
/// fixed fraction). Predicates such as [`has_descendant`](Roster::has_descendant)
/// are derived from the entries and cannot be set independently.
///
/// # Examples
///
/// ```
/// use mawarith::mirath::{HeirCategory, Roster};
///
/// let roster = Roster::new()
///     .with(HeirCategory::Husband, 1)
///     .with(HeirCategory::Daughter, 2)
///     .with(HeirCategory::Father, 1);
/// assert!(roster.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    entries: BTreeMap<HeirCategory, u32>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Declares `count` heirs of `category`.
    ///
    /// A repeated call for the same category replaces the previous count.
    /// Counts are checked by [`validate`](Roster::validate), not here.
    pub fn with(mut self, category: HeirCategory, count: u32) -> Self {
        self.entries.insert(category, count);
        self
    }

    /// Number of declared heirs of `category` (0 if absent).
    pub fn count(&self, category: HeirCategory) -> u32 {
        self.entries.get(&category).copied().unwrap_or(0)
    }

    /// Whether at least one heir of `category` is declared.
    pub fn contains(&self, category: HeirCategory) -> bool {
        self.count(category) > 0
    }

    /// Whether no heir at all is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|&c| c == 0)
    }

    /// Iterates declared `(category, count)` entries in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (HeirCategory, u32)> + '_ {
        self.entries.iter().map(|(&c, &n)| (c, n))
    }

    /// Validates the roster for internal consistency.
    ///
    /// Rejects zero counts, counts above a category cap, and the
    /// simultaneous presence of a husband and a wife.
    pub fn validate(&self) -> Result<(), MirathError> {
        for (&category, &count) in &self.entries {
            if count == 0 {
                return Err(MirathError::InconsistentRoster(format!(
                    "declared category '{}' must have a positive count",
                    category.description()
                )));
            }
            if let Some(max) = category.max_count() {
                if count > max {
                    return Err(MirathError::InconsistentRoster(format!(
                        "at most {} heir(s) of category '{}', got {}",
                        max,
                        category.description(),
                        count
                    )));
                }
            }
        }
        if self.contains(HeirCategory::Husband) && self.contains(HeirCategory::Wife) {
            return Err(MirathError::InconsistentRoster(
                "a deceased person cannot leave both a husband and a wife".into(),
            ));
        }
        Ok(())
    }

    /// Whether any child or son's child is present.
    pub fn has_descendant(&self) -> bool {
        self.has_male_descendant() || self.has_female_descendant()
    }

    /// Whether a son or a son's son is present.
    pub fn has_male_descendant(&self) -> bool {
        self.contains(HeirCategory::Son) || self.contains(HeirCategory::SonsSon)
    }

    /// Whether a daughter or a son's daughter is present.
    pub fn has_female_descendant(&self) -> bool {
        self.contains(HeirCategory::Daughter) || self.contains(HeirCategory::SonsDaughter)
    }

    /// Total number of siblings of every kind.
    ///
    /// Counts heads, not categories, and includes siblings that are
    /// themselves excluded: an excluded sibling still reduces the mother
    /// from a third to a sixth.
    pub fn sibling_count(&self) -> u32 {
        [
            HeirCategory::FullBrother,
            HeirCategory::FullSister,
            HeirCategory::PaternalBrother,
            HeirCategory::PaternalSister,
            HeirCategory::MaternalBrother,
            HeirCategory::MaternalSister,
        ]
        .iter()
        .map(|&c| self.count(c))
        .sum()
    }
}

/// One heir category's final allotment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    /// The heir category.
    pub category: HeirCategory,

    /// Number of heirs in the category; the fraction and amount are the
    /// category's combined allotment.
    pub count: u32,

    /// Exact fraction of the whole estate. Zero for excluded categories.
    pub fraction: Fraction,

    /// Monetary amount against the net estate.
    pub amount: Decimal,

    /// The closer relative that excluded this category, if any.
    pub excluded_by: Option<HeirCategory>,
}

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationResult {
    /// One share per declared category, in reporting order.
    pub shares: Vec<Share>,

    /// The net estate value the amounts were computed against.
    pub estate: Decimal,

    /// Whether fixed shares were proportionally reduced (over-subscription).
    pub awl_applied: bool,

    /// Whether the unallocated residue was returned to fixed-share heirs.
    pub radd_applied: bool,

    /// Whether no statutory heir was eligible for any share.
    pub escheat: bool,
}

impl AllocationResult {
    /// The share record for `category`, if it was declared.
    pub fn share(&self, category: HeirCategory) -> Option<&Share> {
        self.shares.iter().find(|s| s.category == category)
    }

    /// Exact sum of all final fractions. `None` only on overflow.
    pub fn fraction_sum(&self) -> Option<Fraction> {
        Fraction::checked_sum(self.shares.iter().map(|s| s.fraction))
    }
}

/// Errors surfaced by the allocation pipeline.
///
/// Escheat is deliberately not an error: it is a distinguished normal
/// outcome carried on [`AllocationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirathError {
    /// The estate value is negative.
    #[error("negative estate value: {0}")]
    NegativeEstate(Decimal),

    /// The declared heir combination is logically impossible.
    #[error("inconsistent roster: {0}")]
    InconsistentRoster(String),

    /// The final fractions do not sum to one. Indicates a defect in the
    /// rule tables; reported with full context, never silently tolerated.
    #[error("final fractions sum to {sum}, expected 1 (roster: {roster:?}, fractions: {fractions:?})")]
    InvariantViolation {
        /// The offending sum.
        sum: Fraction,
        /// The roster that produced it.
        roster: Roster,
        /// The per-category fractions at the point of failure.
        fractions: Vec<(HeirCategory, Fraction)>,
    },

    /// Fraction arithmetic overflowed in the named stage.
    #[error("fraction overflow during {stage}")]
    Overflow {
        /// Pipeline stage where the overflow occurred.
        stage: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_is_valid() {
        assert!(Roster::new().validate().is_ok());
        assert!(Roster::new().is_empty());
    }

    #[test]
    fn test_builder_and_counts() {
        let roster = Roster::new()
            .with(HeirCategory::Wife, 2)
            .with(HeirCategory::Son, 1);
        assert_eq!(roster.count(HeirCategory::Wife), 2);
        assert_eq!(roster.count(HeirCategory::Daughter), 0);
        assert!(roster.contains(HeirCategory::Son));
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn test_zero_count_rejected() {
        let roster = Roster::new().with(HeirCategory::Son, 0);
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_two_husbands_rejected() {
        let roster = Roster::new().with(HeirCategory::Husband, 2);
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_five_wives_rejected() {
        let roster = Roster::new().with(HeirCategory::Wife, 5);
        assert!(roster.validate().is_err());
        assert!(Roster::new()
            .with(HeirCategory::Wife, 4)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_husband_and_wife_rejected() {
        let roster = Roster::new()
            .with(HeirCategory::Husband, 1)
            .with(HeirCategory::Wife, 1);
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_derived_predicates() {
        let roster = Roster::new().with(HeirCategory::SonsDaughter, 1);
        assert!(roster.has_descendant());
        assert!(roster.has_female_descendant());
        assert!(!roster.has_male_descendant());

        let roster = Roster::new()
            .with(HeirCategory::FullSister, 1)
            .with(HeirCategory::MaternalBrother, 2);
        assert_eq!(roster.sibling_count(), 3);
    }

    #[test]
    fn test_category_caps() {
        assert_eq!(HeirCategory::Husband.max_count(), Some(1));
        assert_eq!(HeirCategory::Wife.max_count(), Some(4));
        assert_eq!(HeirCategory::Daughter.max_count(), None);
    }

    #[test]
    fn test_all_covers_every_category() {
        // ALL is the reporting order; it must contain no duplicates.
        let mut seen = std::collections::BTreeSet::new();
        for c in HeirCategory::ALL {
            assert!(seen.insert(c), "duplicate category {c:?}");
        }
        assert_eq!(seen.len(), 23);
    }
}
