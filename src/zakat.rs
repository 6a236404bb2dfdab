//! Almsgiving (zakat) assessment.
//!
//! Threshold-and-rate lookup: wealth held over the year is zakatable at
//! 2.5 % once it reaches the nisab, defined in grams of gold or silver at
//! caller-supplied prices.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Nisab threshold in grams of gold.
pub const GOLD_NISAB_GRAMS: u32 = 85;

/// Nisab threshold in grams of silver.
pub const SILVER_NISAB_GRAMS: u32 = 595;

/// Errors from zakat assessment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZakatError {
    /// Wealth cannot be negative.
    #[error("negative wealth: {0}")]
    NegativeWealth(Decimal),

    /// Metal prices cannot be negative.
    #[error("negative price per gram: {0}")]
    NegativePrice(Decimal),
}

/// Which metal defines the threshold.
///
/// The silver basis yields the lower threshold and is the more cautious
/// choice; the gold basis is common where silver prices are volatile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NisabBasis {
    /// 85 grams of gold.
    #[default]
    Gold,
    /// 595 grams of silver.
    Silver,
}

/// Current metal prices and the chosen threshold basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NisabTable {
    /// Threshold basis.
    pub basis: NisabBasis,
    /// Price of one gram of gold, in the wealth currency.
    pub gold_price_per_gram: Decimal,
    /// Price of one gram of silver, in the wealth currency.
    pub silver_price_per_gram: Decimal,
}

impl NisabTable {
    /// Creates a table from per-gram prices.
    pub fn new(basis: NisabBasis, gold_price_per_gram: Decimal, silver_price_per_gram: Decimal) -> Self {
        Self {
            basis,
            gold_price_per_gram,
            silver_price_per_gram,
        }
    }

    /// The monetary nisab threshold under the chosen basis.
    pub fn threshold(&self) -> Decimal {
        match self.basis {
            NisabBasis::Gold => self.gold_price_per_gram * Decimal::from(GOLD_NISAB_GRAMS),
            NisabBasis::Silver => self.silver_price_per_gram * Decimal::from(SILVER_NISAB_GRAMS),
        }
    }
}

/// Outcome of one zakat assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZakatAssessment {
    /// The assessed wealth.
    pub wealth: Decimal,
    /// The monetary threshold it was compared against.
    pub nisab: Decimal,
    /// Whether zakat is due.
    pub payable: bool,
    /// Amount due: 2.5 % of the wealth when payable, zero otherwise.
    pub due: Decimal,
}

/// Zakat rate: one fortieth.
fn rate() -> Decimal {
    Decimal::new(25, 3)
}

/// Assesses `wealth` against the threshold table.
///
/// # Examples
///
/// ```
/// use mawarith::zakat::{assess, NisabBasis, NisabTable};
/// use rust_decimal::Decimal;
///
/// let table = NisabTable::new(NisabBasis::Gold, Decimal::from(60), Decimal::from(1));
/// let assessment = assess(Decimal::from(10_000), &table).unwrap();
/// assert!(assessment.payable);
/// assert_eq!(assessment.due, Decimal::from(250));
/// ```
pub fn assess(wealth: Decimal, table: &NisabTable) -> Result<ZakatAssessment, ZakatError> {
    if wealth < Decimal::ZERO {
        return Err(ZakatError::NegativeWealth(wealth));
    }
    if table.gold_price_per_gram < Decimal::ZERO {
        return Err(ZakatError::NegativePrice(table.gold_price_per_gram));
    }
    if table.silver_price_per_gram < Decimal::ZERO {
        return Err(ZakatError::NegativePrice(table.silver_price_per_gram));
    }

    let nisab = table.threshold();
    let payable = wealth >= nisab;
    let due = if payable {
        (wealth * rate()).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    Ok(ZakatAssessment {
        wealth,
        nisab,
        payable,
        due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> NisabTable {
        NisabTable::new(NisabBasis::Gold, dec!(60), dec!(0.75))
    }

    #[test]
    fn test_payable_above_threshold() {
        // Gold nisab: 85 g x 60 = 5100.
        let assessment = assess(dec!(10000), &table()).unwrap();
        assert!(assessment.payable);
        assert_eq!(assessment.nisab, dec!(5100));
        assert_eq!(assessment.due, dec!(250.00));
    }

    #[test]
    fn test_below_threshold_owes_nothing() {
        let assessment = assess(dec!(5000), &table()).unwrap();
        assert!(!assessment.payable);
        assert_eq!(assessment.due, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_at_threshold_is_payable() {
        let assessment = assess(dec!(5100), &table()).unwrap();
        assert!(assessment.payable);
        assert_eq!(assessment.due, dec!(127.50));
    }

    #[test]
    fn test_silver_basis_lower_threshold() {
        let silver = NisabTable::new(NisabBasis::Silver, dec!(60), dec!(0.75));
        // Silver nisab: 595 g x 0.75 = 446.25.
        let assessment = assess(dec!(1000), &silver).unwrap();
        assert!(assessment.payable);
        assert_eq!(assessment.nisab, dec!(446.25));
    }

    #[test]
    fn test_due_rounds_to_cents() {
        let assessment = assess(dec!(10001.11), &table()).unwrap();
        // 2.5% of 10001.11 = 250.02775 -> 250.03
        assert_eq!(assessment.due, dec!(250.03));
    }

    #[test]
    fn test_negative_wealth_rejected() {
        assert!(matches!(
            assess(dec!(-1), &table()),
            Err(ZakatError::NegativeWealth(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let bad = NisabTable::new(NisabBasis::Gold, dec!(-60), dec!(0.75));
        assert!(matches!(
            assess(dec!(100), &bad),
            Err(ZakatError::NegativePrice(_))
        ));
    }
}
