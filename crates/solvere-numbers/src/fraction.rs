//! Exact rational numbers.
//!
//! A [`Fraction`] stores an explicit numerator/denominator pair of
//! arbitrary-precision integers. Every arithmetic operation reduces the
//! result by GCD and canonicalizes the denominator non-negative, so values
//! never drift away from lowest terms.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::traits::Number;

/// Number of decimal digits of the epsilon terminating the exp/ln series.
///
/// Exact rationals never underflow the way scaled integers do, so the series
/// loops stop once a term (or a Newton step) drops to `10^-EPSILON_DIGITS`.
const EPSILON_DIGITS: u64 = 77;

/// An exact rational number.
///
/// Raw construction keeps the operands as given; arithmetic normalizes. A
/// zero denominator is only an error at the point a division actually
/// happens, where the big-integer division panic propagates.
#[derive(Clone)]
pub struct Fraction {
    numerator: IBig,
    denominator: IBig,
}

impl Fraction {
    /// Creates a fraction from numerator and denominator, as given.
    #[must_use]
    pub fn new(numerator: impl Into<IBig>, denominator: impl Into<IBig>) -> Self {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Creates a fraction from an integer (denominator 1).
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::new(value, 1)
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &IBig {
        &self.numerator
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> &IBig {
        &self.denominator
    }

    fn pow10(exp: u64) -> IBig {
        IBig::from(10).pow(usize::try_from(exp).expect("power of ten exponent fits usize"))
    }

    fn epsilon() -> Self {
        Self::new(IBig::ONE, Self::pow10(EPSILON_DIGITS))
    }

    /// Reduces to lowest terms with a non-negative denominator.
    ///
    /// # Panics
    ///
    /// Panics if both numerator and denominator are zero.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut gcd = IBig::from(self.numerator.clone().gcd(self.denominator.clone()));
        if DashuSigned::is_negative(&self.denominator) {
            gcd = -gcd;
        }
        Self::new(&self.numerator / &gcd, &self.denominator / &gcd)
    }

    /// Returns the reciprocal.
    #[must_use]
    pub fn reciprocal(&self) -> Self {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Returns true if the normalized denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.normalize().denominator == IBig::ONE
    }

    /// Converts to an i64 if the value is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        let n = self.normalize();
        if n.denominator == IBig::ONE {
            n.numerator.try_into().ok()
        } else {
            None
        }
    }

    fn pow_int(&self, exp: i64) -> Self {
        let one = Self::from_i64(1);
        if exp == 0 {
            return one;
        }
        let mut result = one;
        let mut base = self.clone();
        let mut e = exp.unsigned_abs();
        while e > 0 {
            if e & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            e >>= 1;
        }
        if exp < 0 {
            result.reciprocal().normalize()
        } else {
            result
        }
    }

    /// Cheap seed for the `ln` Newton iteration: the bit-length difference
    /// of numerator and denominator times ln 2 (taken as 7/10, a slight
    /// over-estimate).
    fn ln_seed(&self) -> Self {
        let bits = i64::try_from(self.numerator.bit_len()).unwrap_or(i64::MAX)
            - i64::try_from(self.denominator.bit_len()).unwrap_or(0);
        Self::from_i64(bits) * Self::new(7, 10)
    }
}

impl Number for Fraction {
    fn from_int(&self, n: i64) -> Self {
        Self::from_i64(n)
    }

    fn abs(&self) -> Self {
        Self::new(
            self.numerator.clone().abs(),
            self.denominator.clone().abs(),
        )
    }

    fn compare(&self, other: &Self) -> Ordering {
        let a = self.normalize();
        let b = other.normalize();
        if a.denominator == b.denominator {
            return a.numerator.cmp(&b.numerator);
        }
        (&a.numerator * &b.denominator).cmp(&(&b.numerator * &a.denominator))
    }

    fn pow(&self, exp: &Self) -> Self {
        if let Some(k) = exp.to_i64() {
            return self.pow_int(k);
        }
        (self.ln() * exp.clone()).exp()
    }

    fn exp(&self) -> Self {
        let eps = Self::epsilon();
        let mut total = Self::from_i64(1);
        let mut term = Self::from_i64(1);
        let mut i: u64 = 1;
        loop {
            term = term * self.clone() / Self::from_i64(i64::try_from(i).expect("index fits i64"));
            total = total + term.clone();
            i += 1;
            if term.abs() <= eps {
                return total;
            }
        }
    }

    fn exp_m1(&self) -> Self {
        let eps = Self::epsilon();
        let mut total = Self::from_i64(0);
        let mut term = Self::from_i64(1);
        let mut i: u64 = 1;
        loop {
            term = term * self.clone() / Self::from_i64(i64::try_from(i).expect("index fits i64"));
            total = total + term.clone();
            i += 1;
            if term.abs() <= eps {
                return total;
            }
        }
    }

    fn ln(&self) -> Self {
        let eps = Self::epsilon();
        let one = Self::from_i64(1);
        let mut x = self.ln_seed();
        // Newton on f(y) = exp(y) - v, stepping until the update stalls.
        loop {
            let change = one.clone() - self.clone() / x.exp();
            let next = x.clone() - change;
            let moved = (x - next.clone()).abs();
            x = next;
            if moved <= eps {
                return x;
            }
        }
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::from_i64(0)
    }

    fn is_zero(&self) -> bool {
        self.numerator == IBig::ZERO
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::from_i64(1)
    }

    fn is_one(&self) -> bool {
        *self == Self::from_i64(1)
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        if self.denominator == other.denominator {
            return self.numerator == other.numerator;
        }
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = dashu::base::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            None => Ok(Self::new(IBig::from_str_radix(s, 10)?, IBig::ONE)),
            Some((int, frac)) => {
                let combined = format!("{int}{frac}");
                let numerator = IBig::from_str_radix(&combined, 10)?;
                Ok(Self::new(numerator, Self::pow10(frac.len() as u64)))
            }
        }
    }
}

// Arithmetic operations

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Self::Output {
        if self.denominator == rhs.denominator {
            return Fraction::new(&self.numerator + &rhs.numerator, self.denominator.clone())
                .normalize();
        }
        Fraction::new(
            &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
        .normalize()
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self + &(-rhs)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Self) -> Self::Output {
        Fraction::new(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
        )
        .normalize()
    }
}

impl Div for Fraction {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl Div for &Fraction {
    type Output = Fraction;

    fn div(self, rhs: Self) -> Self::Output {
        self * &rhs.reciprocal()
    }
}

impl Rem for Fraction {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        &self % &rhs
    }
}

impl Rem for &Fraction {
    type Output = Fraction;

    fn rem(self, rhs: Self) -> Self::Output {
        Fraction::new(
            (&self.numerator * &rhs.denominator) % (&rhs.numerator * &self.denominator),
            &self.denominator * &rhs.denominator,
        )
        .normalize()
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.numerator, self.denominator)
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        Fraction::new(-&self.numerator, self.denominator.clone())
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Fraction {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Fraction::new(1, 2);
        let b = Fraction::new(1, 3);

        // 1/2 + 1/3 = 5/6
        let sum = a.clone() + b.clone();
        assert_eq!(sum.numerator().clone(), IBig::from(5));
        assert_eq!(sum.denominator().clone(), IBig::from(6));

        // 1/2 * 1/3 = 1/6
        let prod = a.clone() * b.clone();
        assert_eq!(prod, Fraction::new(1, 6));

        // (1/2) / (1/3) = 3/2
        assert_eq!(a / b, Fraction::new(3, 2));
    }

    #[test]
    fn test_reduction_after_every_op() {
        let r = Fraction::new(1, 6) + Fraction::new(1, 6);
        assert_eq!(r.numerator().clone(), IBig::from(1));
        assert_eq!(r.denominator().clone(), IBig::from(3));
    }

    #[test]
    fn test_denominator_sign_canonicalized() {
        let r = (Fraction::new(1, -2) + Fraction::new(0, 1)).normalize();
        assert_eq!(r.numerator().clone(), IBig::from(-1));
        assert_eq!(r.denominator().clone(), IBig::from(2));
    }

    #[test]
    fn test_cross_multiplied_equality() {
        assert_eq!(Fraction::new(2, 4), Fraction::new(1, 2));
        assert_ne!(Fraction::new(2, 4), Fraction::new(2, 3));
        assert!(Fraction::new(1, 3) < Fraction::new(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::new(2, 3).to_string(), "2/3");
        assert_eq!(Fraction::from_i64(3).to_string(), "3/1");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("0.5".parse::<Fraction>().unwrap(), Fraction::new(1, 2));
        assert_eq!("-1.25".parse::<Fraction>().unwrap(), Fraction::new(-5, 4));
        assert_eq!("7".parse::<Fraction>().unwrap(), Fraction::from_i64(7));
        assert!("1.2.3".parse::<Fraction>().is_err());
    }

    #[test]
    fn test_mod_and_gcd() {
        let a = Fraction::new(1, 2);
        let b = Fraction::new(1, 3);
        assert_eq!(a.clone() % b.clone(), Fraction::new(1, 6));

        let g = a.clone().gcd(&b);
        assert_eq!(g, Fraction::new(1, 6));
        assert!((a % g.clone()).numerator() == &IBig::ZERO);
        assert!((b % g).numerator() == &IBig::ZERO);
    }

    #[test]
    fn test_exp_zero_is_one() {
        assert_eq!(Fraction::from_i64(0).exp(), Fraction::from_i64(1));
    }

    #[test]
    fn test_exp_one() {
        let e = Fraction::from_i64(1).exp();
        let expected = "2.71828182845904523536028747135266".parse::<Fraction>().unwrap();
        let tolerance = Fraction::new(IBig::ONE, IBig::from(10).pow(20));
        assert!((e - expected).abs() < tolerance);
    }

    #[test]
    fn test_ln_one_is_zero() {
        let eps = Fraction::new(IBig::ONE, IBig::from(10).pow(70));
        assert!(Fraction::from_i64(1).ln().abs() <= eps);
    }

    #[test]
    fn test_pow_integer_exponent() {
        let r = Fraction::new(2, 3);
        assert_eq!(r.pow(&Fraction::from_i64(2)), Fraction::new(4, 9));
        assert_eq!(r.pow(&Fraction::from_i64(-1)), Fraction::new(3, 2));
        assert_eq!(r.pow(&Fraction::from_i64(0)), Fraction::from_i64(1));
    }
}
