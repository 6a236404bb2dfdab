//! Inheritance allocation engine (fara'id).
//!
//! Computes the distribution of a net estate among surviving relatives
//! according to the fixed-share and residuary rules of Islamic inheritance
//! law. The pipeline runs four stages over an immutable heir roster:
//!
//! 1. **Exclusion (hajb)**: closer relatives exclude farther ones; excluded
//!    categories are marked, not dropped, so the result reports why.
//! 2. **Fixed shares (fard)**: Quranic fractions assigned per category,
//!    conditioned on which other categories co-occur.
//! 3. **Residuary (taʿsib)**: the nearest eligible agnatic class takes the
//!    remainder, males at twice the female weight.
//! 4. **Adjustment**: proportional reduction when shares oversubscribe
//!    (ʿawl) or residue return when they undersubscribe with no residuary
//!    heir (radd).
//!
//! The computation is a pure function over its inputs: no internal state,
//! no I/O, nothing retained across invocations. Shares are exact rationals
//! end to end; money enters only at the final rounding step, where the
//! residual cent is assigned deterministically.
//!
//! # Examples
//!
//! ```
//! use mawarith::mirath::{AllocationRunner, HeirCategory, Roster};
//! use rust_decimal::Decimal;
//!
//! let roster = Roster::new()
//!     .with(HeirCategory::Husband, 1)
//!     .with(HeirCategory::Daughter, 2)
//!     .with(HeirCategory::Father, 1);
//!
//! let result = AllocationRunner::run(&roster, Decimal::from(130_000)).unwrap();
//! assert!(result.awl_applied);
//! ```

mod adjust;
mod blocking;
mod fixed;
mod residuary;
mod runner;
mod types;

pub use runner::AllocationRunner;
pub use types::{AllocationResult, HeirCategory, MirathError, Roster, Share};
