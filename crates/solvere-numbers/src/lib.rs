//! # solvere-numbers
//!
//! Interchangeable numeric representations for symbolic differentiation
//! and root finding.
//!
//! This crate provides:
//! - The [`Number`] capability contract shared by every representation
//! - A scaled big-integer decimal ([`Decimal`]) with configurable precision
//! - An exact rational ([`Fraction`]) reduced after every operation
//! - A native floating-point wrapper ([`Float64`])
//!
//! ## Design Principles
//!
//! - **Immutability**: every operation returns a new value
//! - **Explicit configuration**: decimal precision travels with the value,
//!   never through process-wide state
//! - **Self-contained transcendentals**: `exp` and `ln` are computed by
//!   truncated series and Newton iteration where no native primitive exists

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decimal;
pub mod float;
pub mod fraction;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use decimal::{Decimal, Precision};
pub use float::Float64;
pub use fraction::Fraction;
pub use traits::Number;
