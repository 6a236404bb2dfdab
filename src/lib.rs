//! Islamic jurisprudence calculation library.
//!
//! Provides independent, pure-function calculators:
//!
//! - **Inheritance (mirath)**: allocation of a net estate among surviving
//!   relatives by the fixed-share and residuary rules — exclusion (hajb),
//!   Quranic fixed shares (fard), residuary distribution (taʿsib), and the
//!   ʿawl/radd corrections, with exact rational arithmetic end to end.
//! - **Prayer times (salat)**: the six daily times from solar-position
//!   formulas, under the calculation methods of the major authorities.
//! - **Qiblah**: great-circle bearing to the Kaaba.
//! - **Hijri**: tabular Hijri ↔ Gregorian calendar conversion.
//! - **Zakat**: almsgiving threshold and rate assessment.
//!
//! # Architecture
//!
//! Every module is a stateless computation over immutable inputs: no shared
//! state, no I/O, nothing retained across invocations. The modules share no
//! data with one another (the prayer-time module consults the Hijri
//! converter for the Ramadan rule; nothing else crosses module lines), so
//! concurrent use needs no coordination.

pub mod fraction;
pub mod hijri;
pub mod mirath;
pub mod qiblah;
pub mod salat;
pub mod zakat;
