//! Fixed-share (fard) calculator.
//!
//! Assigns the Quranic fixed fractions to eligible categories. Each
//! category's fraction depends on which other categories co-occur, so the
//! rules are a first-match-wins table of `(category, condition, effect)`
//! rows consulted in order — adding a school variant means editing rows.
//!
//! Categories whose entitlement converts to residuary under the declared
//! co-occurrences (a daughter alongside a son, a sister alongside a brother
//! or alongside daughters) are flagged and left to the residuary stage.

use super::blocking::BlockingOutcome;
use super::types::{HeirCategory, MirathError, Roster};
use crate::fraction::Fraction;
use std::collections::{BTreeMap, BTreeSet};

/// Shared-pool identifier for per-capita effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pool {
    /// Uterine siblings share their third per capita, male and female alike.
    Uterines,
    /// Grandmothers share the sixth per capita.
    Grandmothers,
}

/// What a matched rule awards.
#[derive(Debug, Clone, Copy)]
enum Effect {
    /// Fixed fraction of the whole estate for the category collectively.
    Fixed(i64, i64),
    /// Fixed fraction plus residuary entitlement to the remainder
    /// (the father or grandfather alongside a female-only descendant).
    FixedAndResiduary(i64, i64),
    /// Fraction of what remains after the spouse's fixed share
    /// (the mother in the two ʿUmariyyatān rosters).
    OfRemainder(i64, i64),
    /// Per-capita cut of a shared pool fraction.
    PerCapita(Pool, i64, i64),
    /// No fixed share; the category inherits as residuary.
    Residuary,
}

/// One fard rule row.
struct FardRule {
    category: HeirCategory,
    name: &'static str,
    applies: fn(&FardContext) -> bool,
    effect: Effect,
}

/// Roster plus exclusion outcome, as seen by rule predicates.
pub(crate) struct FardContext<'a> {
    pub roster: &'a Roster,
    pub outcome: &'a BlockingOutcome,
}

impl FardContext<'_> {
    fn admitted_count(&self, category: HeirCategory) -> u32 {
        if self.outcome.is_admitted(category) {
            self.roster.count(category)
        } else {
            0
        }
    }

    fn uterine_heads(&self) -> u32 {
        self.admitted_count(HeirCategory::MaternalBrother)
            + self.admitted_count(HeirCategory::MaternalSister)
    }

    fn grandmother_heads(&self) -> u32 {
        self.admitted_count(HeirCategory::PaternalGrandmother)
            + self.admitted_count(HeirCategory::MaternalGrandmother)
    }

    /// Whether the admitted categories are exactly `set`.
    fn admitted_exactly(&self, set: &[HeirCategory]) -> bool {
        let admitted: BTreeSet<_> = self.outcome.admitted().collect();
        admitted.len() == set.len() && set.iter().all(|c| admitted.contains(c))
    }
}

fn umariyya(ctx: &FardContext) -> bool {
    // Two or more siblings reduce the mother to a sixth even when they are
    // themselves excluded, overriding the remainder-third.
    if ctx.roster.sibling_count() >= 2 {
        return false;
    }
    ctx.admitted_exactly(&[
        HeirCategory::Husband,
        HeirCategory::Mother,
        HeirCategory::Father,
    ]) || ctx.admitted_exactly(&[
        HeirCategory::Wife,
        HeirCategory::Mother,
        HeirCategory::Father,
    ])
}

/// Builds the fard table.
///
/// Rows are category-major and consulted first-match-wins, so within one
/// category the order encodes rule precedence.
fn rule_table() -> Vec<FardRule> {
    use Effect::*;
    use HeirCategory::*;

    fn rule(
        category: HeirCategory,
        name: &'static str,
        applies: fn(&FardContext) -> bool,
        effect: Effect,
    ) -> FardRule {
        FardRule {
            category,
            name,
            applies,
            effect,
        }
    }

    vec![
        // Spouses.
        rule(
            Husband,
            "husband-with-descendant",
            |c| c.roster.has_descendant(),
            Fixed(1, 4),
        ),
        rule(Husband, "husband-alone", |_| true, Fixed(1, 2)),
        rule(
            Wife,
            "wife-with-descendant",
            |c| c.roster.has_descendant(),
            Fixed(1, 8),
        ),
        rule(Wife, "wife-alone", |_| true, Fixed(1, 4)),
        // Descendants.
        rule(Son, "son", |_| true, Residuary),
        rule(
            Daughter,
            "daughter-with-son",
            |c| c.roster.contains(Son),
            Residuary,
        ),
        rule(
            Daughter,
            "one-daughter",
            |c| c.roster.count(Daughter) == 1,
            Fixed(1, 2),
        ),
        rule(Daughter, "daughters", |_| true, Fixed(2, 3)),
        rule(SonsSon, "sons-son", |_| true, Residuary),
        rule(
            SonsDaughter,
            "sons-daughter-with-sons-son",
            |c| c.roster.contains(SonsSon),
            Residuary,
        ),
        rule(
            SonsDaughter,
            "sons-daughter-completes-two-thirds",
            |c| c.admitted_count(Daughter) == 1,
            Fixed(1, 6),
        ),
        rule(
            SonsDaughter,
            "one-sons-daughter",
            |c| c.roster.count(SonsDaughter) == 1,
            Fixed(1, 2),
        ),
        rule(SonsDaughter, "sons-daughters", |_| true, Fixed(2, 3)),
        // Ascendants.
        rule(
            Father,
            "father-with-male-descendant",
            |c| c.roster.has_male_descendant(),
            Fixed(1, 6),
        ),
        rule(
            Father,
            "father-with-female-descendant",
            |c| c.roster.has_female_descendant(),
            FixedAndResiduary(1, 6),
        ),
        rule(Father, "father-residuary", |_| true, Residuary),
        rule(Mother, "mother-umariyya", umariyya, OfRemainder(1, 3)),
        rule(
            Mother,
            "mother-sixth",
            |c| c.roster.has_descendant() || c.roster.sibling_count() >= 2,
            Fixed(1, 6),
        ),
        rule(Mother, "mother-third", |_| true, Fixed(1, 3)),
        rule(
            PaternalGrandfather,
            "grandfather-with-male-descendant",
            |c| c.roster.has_male_descendant(),
            Fixed(1, 6),
        ),
        rule(
            PaternalGrandfather,
            "grandfather-with-female-descendant",
            |c| c.roster.has_female_descendant(),
            FixedAndResiduary(1, 6),
        ),
        rule(
            PaternalGrandfather,
            "grandfather-residuary",
            |_| true,
            Residuary,
        ),
        rule(
            PaternalGrandmother,
            "grandmothers-sixth",
            |_| true,
            PerCapita(Pool::Grandmothers, 1, 6),
        ),
        rule(
            MaternalGrandmother,
            "grandmothers-sixth",
            |_| true,
            PerCapita(Pool::Grandmothers, 1, 6),
        ),
        // Full and consanguine siblings.
        rule(FullBrother, "full-brother", |_| true, Residuary),
        rule(
            FullSister,
            "full-sister-with-brother",
            |c| c.roster.contains(FullBrother),
            Residuary,
        ),
        rule(
            FullSister,
            "full-sister-with-daughters",
            |c| c.roster.has_female_descendant(),
            Residuary,
        ),
        rule(
            FullSister,
            "one-full-sister",
            |c| c.roster.count(FullSister) == 1,
            Fixed(1, 2),
        ),
        rule(FullSister, "full-sisters", |_| true, Fixed(2, 3)),
        rule(PaternalBrother, "paternal-brother", |_| true, Residuary),
        rule(
            PaternalSister,
            "paternal-sister-with-brother",
            |c| c.roster.contains(PaternalBrother),
            Residuary,
        ),
        rule(
            PaternalSister,
            "paternal-sister-with-daughters",
            |c| c.roster.has_female_descendant(),
            Residuary,
        ),
        rule(
            PaternalSister,
            "paternal-sister-completes-two-thirds",
            |c| c.admitted_count(FullSister) == 1,
            Fixed(1, 6),
        ),
        rule(
            PaternalSister,
            "one-paternal-sister",
            |c| c.roster.count(PaternalSister) == 1,
            Fixed(1, 2),
        ),
        rule(PaternalSister, "paternal-sisters", |_| true, Fixed(2, 3)),
        // Uterine siblings: sex-blind, per capita.
        rule(
            MaternalBrother,
            "single-uterine",
            |c| c.uterine_heads() == 1,
            Fixed(1, 6),
        ),
        rule(
            MaternalBrother,
            "uterines-share-third",
            |_| true,
            PerCapita(Pool::Uterines, 1, 3),
        ),
        rule(
            MaternalSister,
            "single-uterine",
            |c| c.uterine_heads() == 1,
            Fixed(1, 6),
        ),
        rule(
            MaternalSister,
            "uterines-share-third",
            |_| true,
            PerCapita(Pool::Uterines, 1, 3),
        ),
        // Deeper agnates: residuary only.
        rule(FullBrothersSon, "nephew", |_| true, Residuary),
        rule(PaternalBrothersSon, "nephew", |_| true, Residuary),
        rule(FullPaternalUncle, "uncle", |_| true, Residuary),
        rule(PaternalPaternalUncle, "uncle", |_| true, Residuary),
        rule(FullPaternalUnclesSon, "cousin", |_| true, Residuary),
        rule(PaternalPaternalUnclesSon, "cousin", |_| true, Residuary),
    ]
}

/// Fixed-share stage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FardOutcome {
    /// Exact fraction per category that received a fixed share.
    pub shares: BTreeMap<HeirCategory, Fraction>,

    /// Admitted categories deferred to the residuary stage, including
    /// conversions and the father/grandfather remainder entitlement.
    pub residuary: BTreeSet<HeirCategory>,
}

fn overflow(stage: &'static str) -> MirathError {
    MirathError::Overflow { stage }
}

/// Runs the fard stage over the admitted categories.
pub fn apply(roster: &Roster, outcome: &BlockingOutcome) -> Result<FardOutcome, MirathError> {
    let ctx = FardContext { roster, outcome };
    let rules = rule_table();

    let mut shares: BTreeMap<HeirCategory, Fraction> = BTreeMap::new();
    let mut residuary = BTreeSet::new();

    for category in outcome.admitted() {
        let Some(rule) = rules
            .iter()
            .find(|r| r.category == category && (r.applies)(&ctx))
        else {
            // The table carries an unconditional fallback row per category.
            continue;
        };

        tracing::trace!(category = category.description(), rule = rule.name, "fard rule matched");

        match rule.effect {
            Effect::Fixed(n, d) => {
                shares.insert(category, Fraction::new(n, d));
            }
            Effect::FixedAndResiduary(n, d) => {
                shares.insert(category, Fraction::new(n, d));
                residuary.insert(category);
            }
            Effect::OfRemainder(n, d) => {
                let spouse_sum = Fraction::checked_sum(
                    [HeirCategory::Husband, HeirCategory::Wife]
                        .iter()
                        .filter_map(|c| shares.get(c).copied()),
                )
                .ok_or_else(|| overflow("fard"))?;
                let remainder = Fraction::ONE
                    .checked_sub(spouse_sum)
                    .ok_or_else(|| overflow("fard"))?;
                let share = remainder
                    .checked_mul(Fraction::new(n, d))
                    .ok_or_else(|| overflow("fard"))?;
                shares.insert(category, share);
            }
            Effect::PerCapita(pool, n, d) => {
                let heads = match pool {
                    Pool::Uterines => ctx.uterine_heads(),
                    Pool::Grandmothers => ctx.grandmother_heads(),
                };
                let count = ctx.admitted_count(category);
                let share = Fraction::new(n, d)
                    .checked_mul(Fraction::new(i64::from(count), i64::from(heads)))
                    .ok_or_else(|| overflow("fard"))?;
                shares.insert(category, share);
            }
            Effect::Residuary => {
                residuary.insert(category);
            }
        }
    }

    Ok(FardOutcome { shares, residuary })
}
