//! Exact rational arithmetic for estate shares.
//!
//! Every share fraction in the allocation engine is a [`Fraction`]: a reduced
//! `numerator/denominator` pair with checked arithmetic. Floating point never
//! enters share computation; conversion to money happens once, at the end of
//! the allocation pipeline.

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};
use std::fmt;

/// An exact fraction of the estate.
///
/// Wraps [`Ratio<i64>`] and exposes only checked arithmetic, so overflow in a
/// defective rule table surfaces as `None` instead of a panic. Comparison and
/// equality are exact: `1/3 + 1/6 == 1/2` holds bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fraction(Ratio<i64>);

impl Fraction {
    /// The zero fraction.
    pub const ZERO: Fraction = Fraction(Ratio::new_raw(0, 1));

    /// The whole estate.
    pub const ONE: Fraction = Fraction(Ratio::new_raw(1, 1));

    /// Creates a reduced fraction.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero. Rule tables only construct fractions from
    /// nonzero literal denominators.
    pub fn new(numer: i64, denom: i64) -> Self {
        Fraction(Ratio::new(numer, denom))
    }

    /// Numerator of the reduced form.
    pub fn numer(&self) -> i64 {
        *self.0.numer()
    }

    /// Denominator of the reduced form (always positive).
    pub fn denom(&self) -> i64 {
        *self.0.denom()
    }

    /// Whether this fraction is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition.
    pub fn checked_add(self, other: Fraction) -> Option<Fraction> {
        self.0.checked_add(&other.0).map(Fraction)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Fraction) -> Option<Fraction> {
        self.0.checked_sub(&other.0).map(Fraction)
    }

    /// Checked multiplication.
    pub fn checked_mul(self, other: Fraction) -> Option<Fraction> {
        self.0.checked_mul(&other.0).map(Fraction)
    }

    /// Checked division. Returns `None` for a zero divisor or on overflow.
    pub fn checked_div(self, other: Fraction) -> Option<Fraction> {
        if other.is_zero() {
            return None;
        }
        self.0.checked_div(&other.0).map(Fraction)
    }

    /// Sums a sequence of fractions, `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Fraction>>(iter: I) -> Option<Fraction> {
        iter.into_iter()
            .try_fold(Fraction::ZERO, |acc, f| acc.checked_add(f))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom() == 1 {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_addition() {
        let third = Fraction::new(1, 3);
        let sixth = Fraction::new(1, 6);
        assert_eq!(third.checked_add(sixth), Some(Fraction::new(1, 2)));
    }

    #[test]
    fn test_reduction() {
        let f = Fraction::new(4, 8);
        assert_eq!(f.numer(), 1);
        assert_eq!(f.denom(), 2);
    }

    #[test]
    fn test_ordering() {
        assert!(Fraction::new(1, 4) < Fraction::new(1, 3));
        assert!(Fraction::new(2, 3) > Fraction::new(1, 2));
        assert_eq!(Fraction::new(2, 4), Fraction::new(1, 2));
    }

    #[test]
    fn test_sum_exceeding_one() {
        // The classic over-subscription: 1/2 + 2/3 = 7/6
        let sum = Fraction::checked_sum([Fraction::new(1, 2), Fraction::new(2, 3)]).unwrap();
        assert_eq!(sum, Fraction::new(7, 6));
        assert!(sum > Fraction::ONE);
    }

    #[test]
    fn test_awl_style_rescale() {
        // 1/2 scaled by the reciprocal of 7/6 gives 3/7 exactly
        let scaled = Fraction::new(1, 2)
            .checked_div(Fraction::new(7, 6))
            .unwrap();
        assert_eq!(scaled, Fraction::new(3, 7));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(Fraction::ONE.checked_div(Fraction::ZERO), None);
    }

    #[test]
    fn test_overflow_is_none() {
        let big = Fraction::new(1, i64::MAX);
        let other = Fraction::new(1, i64::MAX - 6);
        assert_eq!(big.checked_add(other), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::new(2, 3).to_string(), "2/3");
        assert_eq!(Fraction::ONE.to_string(), "1");
        assert_eq!(Fraction::ZERO.to_string(), "0");
    }

    #[test]
    fn test_negative_normalization() {
        let f = Fraction::new(1, -2);
        assert_eq!(f.numer(), -1);
        assert_eq!(f.denom(), 2);
    }
}
