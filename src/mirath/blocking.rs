//! Exclusion (hajb) rule engine.
//!
//! Determines which otherwise-entitled heir categories are excluded by the
//! presence of closer relatives. Exclusion is directional and pairwise: each
//! rule states that the presence of one category, possibly under an extra
//! condition, fully excludes another. The rules are held as an ordered table
//! of data rows rather than branching code, so a jurisdictional variant is a
//! row edit, not a control-flow change.
//!
//! Excluded categories are marked, never removed, so the final result can
//! report *why* a category received zero share.

use super::types::{HeirCategory, Roster};
use std::collections::BTreeMap;

/// Extra condition attached to an exclusion row.
#[derive(Clone, Copy)]
enum Condition {
    /// The blocker category is present.
    Present,
    /// Custom predicate over the whole roster.
    When(fn(&Roster) -> bool),
}

/// One exclusion rule: `blocker` excludes `blocked` when `condition` holds.
struct BlockingRule {
    blocker: HeirCategory,
    blocked: HeirCategory,
    condition: Condition,
}

impl BlockingRule {
    const fn present(blocker: HeirCategory, blocked: HeirCategory) -> Self {
        Self {
            blocker,
            blocked,
            condition: Condition::Present,
        }
    }

    const fn when(
        blocker: HeirCategory,
        blocked: HeirCategory,
        predicate: fn(&Roster) -> bool,
    ) -> Self {
        Self {
            blocker,
            blocked,
            condition: Condition::When(predicate),
        }
    }

    fn applies(&self, roster: &Roster) -> bool {
        if !roster.contains(self.blocked) {
            return false;
        }
        match self.condition {
            Condition::Present => roster.contains(self.blocker),
            Condition::When(predicate) => roster.contains(self.blocker) && predicate(roster),
        }
    }
}

/// The agnatic ladder: male-line residuaries from nearest to farthest.
///
/// Every member excludes all members below it. The first six also appear in
/// hand-written rows above the generated ones, because they carry additional
/// exclusion effects of their own (e.g. the father excluding all siblings).
const AGNATIC_LADDER: [HeirCategory; 12] = [
    HeirCategory::Son,
    HeirCategory::SonsSon,
    HeirCategory::Father,
    HeirCategory::PaternalGrandfather,
    HeirCategory::FullBrother,
    HeirCategory::PaternalBrother,
    HeirCategory::FullBrothersSon,
    HeirCategory::PaternalBrothersSon,
    HeirCategory::FullPaternalUncle,
    HeirCategory::PaternalPaternalUncle,
    HeirCategory::FullPaternalUnclesSon,
    HeirCategory::PaternalPaternalUnclesSon,
];

/// All sibling categories, used by the ascendant/descendant exclusion rows.
const SIBLINGS: [HeirCategory; 6] = [
    HeirCategory::FullBrother,
    HeirCategory::FullSister,
    HeirCategory::PaternalBrother,
    HeirCategory::PaternalSister,
    HeirCategory::MaternalBrother,
    HeirCategory::MaternalSister,
];

fn two_daughters_no_sons_son(roster: &Roster) -> bool {
    roster.count(HeirCategory::Daughter) >= 2 && !roster.contains(HeirCategory::SonsSon)
}

fn two_full_sisters_no_paternal_brother(roster: &Roster) -> bool {
    roster.count(HeirCategory::FullSister) >= 2 && !roster.contains(HeirCategory::PaternalBrother)
}

/// Builds the exclusion table in priority order.
///
/// Priority matters only for reporting: exclusion is monotone (a rule can
/// never re-admit an excluded heir), so the first matching rule names the
/// reported blocker.
fn rule_table() -> Vec<BlockingRule> {
    let mut rules = Vec::new();

    // Descendant line: a son excludes the son's children; two or more
    // daughters exhaust the two-thirds and exclude the son's daughter
    // unless a son's son makes her residuary.
    rules.push(BlockingRule::present(
        HeirCategory::Son,
        HeirCategory::SonsSon,
    ));
    rules.push(BlockingRule::present(
        HeirCategory::Son,
        HeirCategory::SonsDaughter,
    ));
    rules.push(BlockingRule::when(
        HeirCategory::Daughter,
        HeirCategory::SonsDaughter,
        two_daughters_no_sons_son,
    ));

    // Ascendants: father excludes his own father and mother; mother
    // excludes both grandmothers.
    rules.push(BlockingRule::present(
        HeirCategory::Father,
        HeirCategory::PaternalGrandfather,
    ));
    rules.push(BlockingRule::present(
        HeirCategory::Mother,
        HeirCategory::PaternalGrandmother,
    ));
    rules.push(BlockingRule::present(
        HeirCategory::Mother,
        HeirCategory::MaternalGrandmother,
    ));
    rules.push(BlockingRule::present(
        HeirCategory::Father,
        HeirCategory::PaternalGrandmother,
    ));

    // Siblings of every kind are excluded by the father, by the paternal
    // grandfather (Hanafi position), and by a male descendant.
    for blocker in [
        HeirCategory::Father,
        HeirCategory::PaternalGrandfather,
        HeirCategory::Son,
        HeirCategory::SonsSon,
    ] {
        for sibling in SIBLINGS {
            rules.push(BlockingRule::present(blocker, sibling));
        }
    }

    // Uterine siblings are excluded by any descendant, female included.
    for blocker in [HeirCategory::Daughter, HeirCategory::SonsDaughter] {
        rules.push(BlockingRule::present(blocker, HeirCategory::MaternalBrother));
        rules.push(BlockingRule::present(blocker, HeirCategory::MaternalSister));
    }

    // Within the sibling class: full excludes consanguine; two or more
    // full sisters exhaust the two-thirds and exclude the paternal sister
    // unless a paternal brother makes her residuary.
    rules.push(BlockingRule::present(
        HeirCategory::FullBrother,
        HeirCategory::PaternalBrother,
    ));
    rules.push(BlockingRule::present(
        HeirCategory::FullBrother,
        HeirCategory::PaternalSister,
    ));
    rules.push(BlockingRule::when(
        HeirCategory::FullSister,
        HeirCategory::PaternalSister,
        two_full_sisters_no_paternal_brother,
    ));

    // Deeper agnates: every ladder member excludes everyone below it.
    // The first six targets are already covered by the rows above.
    for (i, &target) in AGNATIC_LADDER.iter().enumerate().skip(6) {
        for &blocker in &AGNATIC_LADDER[..i] {
            rules.push(BlockingRule::present(blocker, target));
        }
    }

    rules
}

/// Eligibility of one declared category after the exclusion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eligibility {
    /// The category keeps its entitlement.
    Admitted,
    /// The category is excluded by a closer relative.
    Excluded {
        /// The reported excluding category.
        by: HeirCategory,
    },
}

/// Outcome of the exclusion pass: every declared category, marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingOutcome {
    status: BTreeMap<HeirCategory, Eligibility>,
}

impl BlockingOutcome {
    /// Eligibility of `category`, or `None` if it was not declared.
    pub fn eligibility(&self, category: HeirCategory) -> Option<Eligibility> {
        self.status.get(&category).copied()
    }

    /// Whether `category` was declared and kept its entitlement.
    pub fn is_admitted(&self, category: HeirCategory) -> bool {
        matches!(self.eligibility(category), Some(Eligibility::Admitted))
    }

    /// The category that excluded `category`, if it was excluded.
    pub fn excluded_by(&self, category: HeirCategory) -> Option<HeirCategory> {
        match self.eligibility(category) {
            Some(Eligibility::Excluded { by }) => Some(by),
            _ => None,
        }
    }

    /// Iterates admitted categories in reporting order.
    pub fn admitted(&self) -> impl Iterator<Item = HeirCategory> + '_ {
        self.status
            .iter()
            .filter(|(_, e)| matches!(e, Eligibility::Admitted))
            .map(|(&c, _)| c)
    }

    /// The escheat signal: no declared category survived exclusion.
    ///
    /// Distinguished from an empty-but-valid outcome so the caller never
    /// mistakes "nobody inherits" for a silently complete allocation.
    pub fn is_escheat(&self) -> bool {
        self.admitted().next().is_none()
    }
}

/// Runs the exclusion pass over a validated roster.
pub fn apply(roster: &Roster) -> BlockingOutcome {
    let rules = rule_table();
    let mut status = BTreeMap::new();

    for (category, _) in roster.iter() {
        let eligibility = rules
            .iter()
            .find(|rule| rule.blocked == category && rule.applies(roster))
            .map(|rule| Eligibility::Excluded { by: rule.blocker })
            .unwrap_or(Eligibility::Admitted);
        status.insert(category, eligibility);
    }

    BlockingOutcome { status }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_son_excludes_all_siblings() {
        let roster = Roster::new()
            .with(HeirCategory::Son, 1)
            .with(HeirCategory::FullBrother, 1)
            .with(HeirCategory::FullSister, 2)
            .with(HeirCategory::PaternalBrother, 1)
            .with(HeirCategory::MaternalSister, 1);
        let outcome = apply(&roster);

        assert!(outcome.is_admitted(HeirCategory::Son));
        for sibling in [
            HeirCategory::FullBrother,
            HeirCategory::FullSister,
            HeirCategory::PaternalBrother,
            HeirCategory::MaternalSister,
        ] {
            assert_eq!(outcome.excluded_by(sibling), Some(HeirCategory::Son));
        }
    }

    #[test]
    fn test_father_excludes_grandfather() {
        let roster = Roster::new()
            .with(HeirCategory::Father, 1)
            .with(HeirCategory::PaternalGrandfather, 1);
        let outcome = apply(&roster);
        assert_eq!(
            outcome.excluded_by(HeirCategory::PaternalGrandfather),
            Some(HeirCategory::Father)
        );
    }

    #[test]
    fn test_mother_excludes_grandmothers() {
        let roster = Roster::new()
            .with(HeirCategory::Mother, 1)
            .with(HeirCategory::PaternalGrandmother, 1)
            .with(HeirCategory::MaternalGrandmother, 1);
        let outcome = apply(&roster);
        assert_eq!(
            outcome.excluded_by(HeirCategory::PaternalGrandmother),
            Some(HeirCategory::Mother)
        );
        assert_eq!(
            outcome.excluded_by(HeirCategory::MaternalGrandmother),
            Some(HeirCategory::Mother)
        );
    }

    #[test]
    fn test_grandmother_admitted_without_mother() {
        let roster = Roster::new()
            .with(HeirCategory::MaternalGrandmother, 1)
            .with(HeirCategory::Son, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::MaternalGrandmother));
    }

    #[test]
    fn test_two_daughters_exclude_sons_daughter() {
        let roster = Roster::new()
            .with(HeirCategory::Daughter, 2)
            .with(HeirCategory::SonsDaughter, 1);
        let outcome = apply(&roster);
        assert_eq!(
            outcome.excluded_by(HeirCategory::SonsDaughter),
            Some(HeirCategory::Daughter)
        );

        // A son's son rescues her into the residuary class.
        let roster = roster.with(HeirCategory::SonsSon, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::SonsDaughter));
    }

    #[test]
    fn test_one_daughter_keeps_sons_daughter() {
        let roster = Roster::new()
            .with(HeirCategory::Daughter, 1)
            .with(HeirCategory::SonsDaughter, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::SonsDaughter));
    }

    #[test]
    fn test_two_full_sisters_exclude_paternal_sister() {
        let roster = Roster::new()
            .with(HeirCategory::FullSister, 2)
            .with(HeirCategory::PaternalSister, 1);
        let outcome = apply(&roster);
        assert_eq!(
            outcome.excluded_by(HeirCategory::PaternalSister),
            Some(HeirCategory::FullSister)
        );

        // A paternal brother rescues her into the residuary class.
        let roster = roster.with(HeirCategory::PaternalBrother, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::PaternalSister));
    }

    #[test]
    fn test_uterines_excluded_by_daughter() {
        let roster = Roster::new()
            .with(HeirCategory::Daughter, 1)
            .with(HeirCategory::MaternalBrother, 1)
            .with(HeirCategory::FullBrother, 1);
        let outcome = apply(&roster);
        assert_eq!(
            outcome.excluded_by(HeirCategory::MaternalBrother),
            Some(HeirCategory::Daughter)
        );
        // Full siblings are not excluded by a female descendant.
        assert!(outcome.is_admitted(HeirCategory::FullBrother));
    }

    #[test]
    fn test_agnatic_ladder_order() {
        let roster = Roster::new()
            .with(HeirCategory::PaternalBrother, 1)
            .with(HeirCategory::FullBrothersSon, 1)
            .with(HeirCategory::FullPaternalUncle, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::PaternalBrother));
        assert_eq!(
            outcome.excluded_by(HeirCategory::FullBrothersSon),
            Some(HeirCategory::PaternalBrother)
        );
        assert_eq!(
            outcome.excluded_by(HeirCategory::FullPaternalUncle),
            Some(HeirCategory::PaternalBrother)
        );
    }

    #[test]
    fn test_escheat_on_empty_roster() {
        let outcome = apply(&Roster::new());
        assert!(outcome.is_escheat());
    }

    #[test]
    fn test_spouse_never_excluded() {
        let roster = Roster::new()
            .with(HeirCategory::Wife, 1)
            .with(HeirCategory::Son, 3)
            .with(HeirCategory::Father, 1);
        let outcome = apply(&roster);
        assert!(outcome.is_admitted(HeirCategory::Wife));
    }
}
