//! Allocation pipeline execution.
//!
//! Sequences the four stages — exclusion, fixed shares, residuary,
//! adjustment — then converts the final fraction table into monetary
//! amounts against the net estate.

use super::adjust;
use super::blocking;
use super::fixed;
use super::residuary;
use super::types::{AllocationResult, HeirCategory, MirathError, Roster, Share};
use crate::fraction::Fraction;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Executes the allocation pipeline.
pub struct AllocationRunner;

impl AllocationRunner {
    /// Allocates `estate` among the heirs declared in `roster`.
    ///
    /// Validation errors are raised before any stage runs. Escheat (no
    /// eligible heir) is a normal result, not an error. An invariant
    /// violation — final fractions not summing to one — indicates a rule
    /// table defect and fails the computation with full context.
    ///
    /// # Examples
    ///
    /// ```
    /// use mawarith::mirath::{AllocationRunner, HeirCategory, Roster};
    /// use rust_decimal::Decimal;
    ///
    /// let roster = Roster::new()
    ///     .with(HeirCategory::Wife, 1)
    ///     .with(HeirCategory::Son, 1);
    /// let result = AllocationRunner::run(&roster, Decimal::from(80_000)).unwrap();
    /// assert_eq!(result.share(HeirCategory::Wife).unwrap().amount, Decimal::from(10_000));
    /// ```
    pub fn run(roster: &Roster, estate: Decimal) -> Result<AllocationResult, MirathError> {
        roster.validate()?;
        if estate < Decimal::ZERO {
            return Err(MirathError::NegativeEstate(estate));
        }

        let outcome = blocking::apply(roster);
        if outcome.is_escheat() {
            debug!("no eligible heir: escheat");
            return Ok(escheat_result(roster, &outcome, estate));
        }

        let fard = fixed::apply(roster, &outcome)?;
        debug!(fixed = fard.shares.len(), residuary = fard.residuary.len(), "fard stage complete");

        let residuary_shares = residuary::apply(roster, &outcome, &fard)?;
        let adjusted = adjust::apply(&fard, &residuary_shares)?;

        // The fraction table must account for the whole estate exactly.
        let fractions: Vec<(HeirCategory, Fraction)> =
            adjusted.shares.iter().map(|(&c, &f)| (c, f)).collect();
        let sum = Fraction::checked_sum(fractions.iter().map(|&(_, f)| f))
            .ok_or(MirathError::Overflow { stage: "invariant" })?;
        if sum != Fraction::ONE {
            return Err(MirathError::InvariantViolation {
                sum,
                roster: roster.clone(),
                fractions,
            });
        }

        let shares = to_monetary_shares(roster, &outcome, &adjusted.shares, estate);

        Ok(AllocationResult {
            shares,
            estate,
            awl_applied: adjusted.awl_applied,
            radd_applied: adjusted.radd_applied,
            escheat: false,
        })
    }
}

fn escheat_result(
    roster: &Roster,
    outcome: &blocking::BlockingOutcome,
    estate: Decimal,
) -> AllocationResult {
    let shares = roster
        .iter()
        .map(|(category, count)| Share {
            category,
            count,
            fraction: Fraction::ZERO,
            amount: Decimal::ZERO,
            excluded_by: outcome.excluded_by(category),
        })
        .collect();
    AllocationResult {
        shares,
        estate,
        awl_applied: false,
        radd_applied: false,
        escheat: true,
    }
}

/// Converts final fractions to amounts summing exactly to the estate.
///
/// Each amount is rounded to the cent; the rounding residue is assigned to
/// the largest-fraction share (first in reporting order on ties), so the
/// column total always equals the estate.
fn to_monetary_shares(
    roster: &Roster,
    outcome: &blocking::BlockingOutcome,
    fractions: &std::collections::BTreeMap<HeirCategory, Fraction>,
    estate: Decimal,
) -> Vec<Share> {
    let mut shares: Vec<Share> = roster
        .iter()
        .map(|(category, count)| {
            let fraction = fractions.get(&category).copied().unwrap_or(Fraction::ZERO);
            let amount = (estate * Decimal::from(fraction.numer())
                / Decimal::from(fraction.denom()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            Share {
                category,
                count,
                fraction,
                amount,
                excluded_by: outcome.excluded_by(category),
            }
        })
        .collect();

    let allocated: Decimal = shares.iter().map(|s| s.amount).sum();
    let residue = estate - allocated;
    if !residue.is_zero() {
        let mut largest: Option<usize> = None;
        for (i, share) in shares.iter().enumerate() {
            if share.fraction.is_zero() {
                continue;
            }
            match largest {
                Some(j) if shares[j].fraction >= share.fraction => {}
                _ => largest = Some(i),
            }
        }
        if let Some(i) = largest {
            shares[i].amount += residue;
        }
    }

    shares
}
