//! Native floating-point wrapper.
//!
//! [`Float64`] adapts `f64` to the [`Number`] contract. Arithmetic is plain
//! IEEE 754; the total order required by the contract comes from
//! `f64::total_cmp`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use num_traits::{One, Zero};

use crate::traits::Number;

/// A floating-point value conforming to the numeric capability contract.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Float64(pub f64);

impl Float64 {
    /// Creates a wrapped float.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Number for Float64 {
    fn from_int(&self, n: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(n as f64)
    }

    fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    fn pow(&self, exp: &Self) -> Self {
        Self(self.0.powf(exp.0))
    }

    fn exp(&self) -> Self {
        Self(self.0.exp())
    }

    fn exp_m1(&self) -> Self {
        Self(self.0.exp_m1())
    }

    fn ln(&self) -> Self {
        Self(self.0.ln())
    }

    fn log(&self, base: &Self) -> Self {
        Self(self.0.log(base.0))
    }

    fn ln_1p(&self) -> Self {
        Self(self.0.ln_1p())
    }
}

impl Zero for Float64 {
    fn zero() -> Self {
        Self(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl One for Float64 {
    fn one() -> Self {
        Self(1.0)
    }

    fn is_one(&self) -> bool {
        self.0 == 1.0
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Float64 {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<f64>().map(Self)
    }
}

impl Add for Float64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Float64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Float64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Div for Float64 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Rem for Float64 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Neg for Float64 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Float64(6.0);
        let b = Float64(4.0);
        assert_eq!(a + b, Float64(10.0));
        assert_eq!(a - b, Float64(2.0));
        assert_eq!(a * b, Float64(24.0));
        assert_eq!(a / b, Float64(1.5));
        assert_eq!(a % b, Float64(2.0));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(Float64(12.0).gcd(&Float64(8.0)), Float64(4.0));
        assert_eq!(Float64(8.0).gcd(&Float64(12.0)), Float64(4.0));
    }

    #[test]
    fn test_transcendentals() {
        assert!((Float64(1.0).exp().value() - std::f64::consts::E).abs() < 1e-12);
        assert!((Float64(2.0).ln().value() - std::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(Float64(2.0).pow(&Float64(10.0)), Float64(1024.0));
        assert!((Float64(8.0).log(&Float64(2.0)).value() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert!((Float64(1.0) / Float64(0.0)).value().is_infinite());
        assert!((Float64(0.0) / Float64(0.0)).value().is_nan());
    }
}
