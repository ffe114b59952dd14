//! The numeric capability contract.
//!
//! This module defines the single trait every interchangeable numeric
//! representation implements. The term algebra is generic over it and never
//! touches a concrete representation directly.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// A numeric representation usable by the term algebra and root finders.
///
/// # Laws
///
/// - Every operation is pure: operands are unchanged, a new value is returned
/// - `compare` is a total order, reflexive and antisymmetric
/// - `compare(a, b) == Equal` implies `a - b` is the additive identity up to
///   normalization
/// - `from_int` lifts a machine integer into the representation, preserving
///   any configuration (such as precision) carried by the receiver
///
/// Division by the additive identity is representation-defined: the exact
/// representations let the underlying big-integer division panic propagate,
/// the float wrapper follows IEEE semantics.
pub trait Number:
    'static
    + Clone
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a machine integer into this representation.
    ///
    /// The receiver acts as a witness: configuration it carries (decimal
    /// precision, for instance) is inherited by the result.
    #[must_use]
    fn from_int(&self, n: i64) -> Self;

    /// Returns the absolute value.
    #[must_use]
    fn abs(&self) -> Self;

    /// Totally orders `self` against `other`.
    fn compare(&self, other: &Self) -> Ordering;

    /// Computes the greatest common divisor by the Euclidean algorithm.
    #[must_use]
    fn gcd(&self, other: &Self) -> Self {
        let zero = self.from_int(0);
        let mut a = self.abs();
        let mut b = other.abs();
        while b.compare(&zero) != Ordering::Equal {
            let r = a % b.clone();
            a = b;
            b = r;
        }
        a
    }

    /// Raises `self` to the power `exp`.
    ///
    /// The general definition is `exp(ln(self) * exp)`; representations may
    /// substitute an exact fast path for integer exponents.
    #[must_use]
    fn pow(&self, exp: &Self) -> Self {
        (self.ln() * exp.clone()).exp()
    }

    /// Computes the exponential function `e^self`.
    #[must_use]
    fn exp(&self) -> Self;

    /// Computes `e^self - 1`.
    ///
    /// Representations with a dedicated series keep precision for small
    /// inputs; the default subtracts one from [`Number::exp`].
    #[must_use]
    fn exp_m1(&self) -> Self {
        self.exp() - self.from_int(1)
    }

    /// Computes the natural logarithm.
    ///
    /// Meaningful only for positive values; the iterative implementations do
    /// not converge elsewhere.
    #[must_use]
    fn ln(&self) -> Self;

    /// Computes the logarithm of `self` in the given base.
    #[must_use]
    fn log(&self, base: &Self) -> Self {
        self.ln() / base.ln()
    }

    /// Computes `ln(1 + self)`.
    #[must_use]
    fn ln_1p(&self) -> Self {
        (self.clone() + self.from_int(1)).ln()
    }
}
