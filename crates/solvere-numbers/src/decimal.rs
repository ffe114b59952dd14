//! Scaled big-integer decimals.
//!
//! A [`Decimal`] stores `unscaled * 10^scale` with an arbitrary-precision
//! unscaled value. Precision is explicit configuration carried by each value,
//! so identical expressions always evaluate identically.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use dashu::base::{Abs, BitTest, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::traits::Number;

/// Precision configuration for [`Decimal`] arithmetic.
///
/// `max_digits` bounds the fractional digits kept by division, `exp` and
/// `ln`; excess precision is truncated, never an error. `series_base` and
/// `series_scaling` size the Taylor/Newton iteration budgets: a computation
/// on a value with unscaled bit length `b` runs up to
/// `series_base + series_scaling * b` steps, so larger inputs get more terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    /// Maximum number of fractional decimal digits retained.
    pub max_digits: u32,
    /// Base iteration budget for series and Newton loops.
    pub series_base: u32,
    /// Extra iterations granted per bit of unscaled-value length.
    pub series_scaling: u32,
}

impl Precision {
    /// Creates a precision bound with the default iteration budgets.
    #[must_use]
    pub fn new(max_digits: u32) -> Self {
        Self {
            max_digits,
            ..Self::default()
        }
    }

    /// Combines two configurations, keeping the finer of the two.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        if other.max_digits > self.max_digits {
            other
        } else {
            self
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            max_digits: 50,
            series_base: 10,
            series_scaling: 3,
        }
    }
}

/// An arbitrary-precision decimal: `unscaled * 10^scale`.
///
/// Comparison and stringification operate on the normalized form (no
/// trailing zero digits in the unscaled value); arithmetic aligns scales as
/// needed. Every operation returns a new value.
#[derive(Clone)]
pub struct Decimal {
    unscaled: IBig,
    scale: i64,
    precision: Precision,
}

impl Decimal {
    /// Creates a decimal from an unscaled value and a power-of-ten scale,
    /// with the default precision.
    #[must_use]
    pub fn new(unscaled: impl Into<IBig>, scale: i64) -> Self {
        Self::with_precision(unscaled, scale, Precision::default())
    }

    /// Creates a decimal with an explicit precision configuration.
    #[must_use]
    pub fn with_precision(unscaled: impl Into<IBig>, scale: i64, precision: Precision) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
            precision,
        }
    }

    /// Creates a decimal from an i64 at scale zero.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::new(value, 0)
    }

    /// Returns the unscaled value.
    #[must_use]
    pub fn unscaled(&self) -> &IBig {
        &self.unscaled
    }

    /// Returns the power-of-ten scale.
    #[must_use]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Returns the precision configuration carried by this value.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    fn pow10(exp: u64) -> IBig {
        IBig::from(10).pow(usize::try_from(exp).expect("power of ten exponent fits usize"))
    }

    /// Re-expresses this value at the given scale.
    ///
    /// Moving to a smaller scale is exact; moving to a larger one truncates
    /// toward zero.
    #[must_use]
    pub fn scaled_to(&self, scale: i64) -> Self {
        let shift = self.scale - scale;
        let unscaled = if shift >= 0 {
            &self.unscaled * Self::pow10(shift.unsigned_abs())
        } else {
            &self.unscaled / Self::pow10(shift.unsigned_abs())
        };
        Self::with_precision(unscaled, scale, self.precision)
    }

    /// Returns the normalized form: trailing zero digits stripped from the
    /// unscaled value, fractional digits truncated to the configured bound.
    #[must_use]
    pub fn normalize(&self) -> Self {
        if self.unscaled == IBig::ZERO {
            return Self::with_precision(IBig::ZERO, 0, self.precision);
        }
        let ten = IBig::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while &unscaled % &ten == IBig::ZERO {
            unscaled = unscaled / &ten;
            scale += 1;
        }
        let floor = -i64::from(self.precision.max_digits);
        if scale < floor {
            unscaled = unscaled / Self::pow10((floor - scale).unsigned_abs());
            scale = if unscaled == IBig::ZERO { 0 } else { floor };
        }
        Self::with_precision(unscaled, scale, self.precision)
    }

    /// Converts to an i64 if the normalized value is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        let n = self.normalize();
        if n.scale < 0 || n.scale > 18 {
            return None;
        }
        let value = &n.unscaled * Self::pow10(n.scale.unsigned_abs());
        value.try_into().ok()
    }

    fn pow_int(&self, exp: i64) -> Self {
        let one = self.from_int(1);
        if exp == 0 {
            return one;
        }
        let mut result = one.clone();
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
            one / result
        } else {
            result
        }
    }

    /// Cheap closed-form seed for the `ln` Newton iteration.
    ///
    /// `ln v = bit_len(unscaled) * ln 2 + scale * ln 10`, with ln 2 taken as
    /// 291/402 and ln 10 as 921/400. Both over-estimate slightly; the
    /// iteration converges from above.
    fn ln_seed(&self) -> Self {
        let bits = i64::try_from(self.unscaled.bit_len()).unwrap_or(i64::MAX);
        let unscaled_part =
            self.from_int(bits) * self.from_int(291) / self.from_int(402);
        let scale_part =
            self.from_int(self.scale) * self.from_int(921) / self.from_int(400);
        unscaled_part + scale_part
    }
}

impl Number for Decimal {
    fn from_int(&self, n: i64) -> Self {
        Self::with_precision(n, 0, self.precision)
    }

    fn abs(&self) -> Self {
        Self::with_precision(self.unscaled.clone().abs(), self.scale, self.precision)
    }

    fn compare(&self, other: &Self) -> Ordering {
        let scale = self.scale.min(other.scale);
        self.scaled_to(scale)
            .unscaled
            .cmp(&other.scaled_to(scale).unscaled)
    }

    fn pow(&self, exp: &Self) -> Self {
        if let Some(k) = exp.to_i64() {
            return self.pow_int(k);
        }
        (self.ln() * exp.clone()).exp()
    }

    fn exp(&self) -> Self {
        let p = self.precision;
        let zero = self.from_int(0);
        // 1 carried at full precision so small terms keep contributing.
        let mut total = Self::with_precision(
            Self::pow10(u64::from(p.max_digits)),
            -i64::from(p.max_digits),
            p,
        );
        let mut term = self.from_int(1);
        let budget =
            u64::from(p.series_base) + u64::from(p.series_scaling) * self.unscaled.bit_len() as u64;
        let mut i: u64 = 1;
        while term != zero && i < budget {
            term = term * self.clone() / self.from_int(i64::try_from(i).expect("budget fits i64"));
            total = total + term.clone();
            i += 1;
        }
        total
    }

    fn exp_m1(&self) -> Self {
        let p = self.precision;
        let zero = self.from_int(0);
        let mut total = Self::with_precision(IBig::ZERO, -i64::from(p.max_digits), p);
        let mut term = self.from_int(1);
        let budget =
            u64::from(p.series_base) + u64::from(p.series_scaling) * self.unscaled.bit_len() as u64;
        let mut i: u64 = 1;
        while term != zero && i < budget {
            term = term * self.clone() / self.from_int(i64::try_from(i).expect("budget fits i64"));
            total = total + term.clone();
            i += 1;
        }
        total
    }

    fn ln(&self) -> Self {
        let p = self.precision;
        let mut x = self.ln_seed() + self.from_int(1);
        let iterations = u64::from(p.series_base)
            + self.unscaled.bit_len() as u64
            + self.scale.unsigned_abs();
        // Newton on f(y) = exp(y) - v; the generous fixed budget absorbs the
        // coarse seed.
        for _ in 0..iterations {
            let e = x.exp();
            let change = (e.clone() - self.clone()) / e;
            x = x - change;
        }
        x
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Self::from_i64(0)
    }

    fn is_zero(&self) -> bool {
        self.unscaled == IBig::ZERO
    }
}

impl One for Decimal {
    fn one() -> Self {
        Self::from_i64(1)
    }

    fn is_one(&self) -> bool {
        *self == Self::from_i64(1)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({}e{})", self.unscaled, self.scale)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normalize();
        if n.unscaled == IBig::ZERO {
            return write!(f, "0");
        }
        if DashuSigned::is_negative(&n.unscaled) {
            write!(f, "-")?;
        }
        let digits = n.unscaled.clone().abs().to_string();
        if n.scale >= 0 {
            write!(f, "{digits}")?;
            for _ in 0..n.scale {
                write!(f, "0")?;
            }
            Ok(())
        } else {
            let frac = usize::try_from(n.scale.unsigned_abs()).expect("scale fits usize");
            if digits.len() > frac {
                let split = digits.len() - frac;
                write!(f, "{}.{}", &digits[..split], &digits[split..])
            } else {
                write!(f, "0.")?;
                for _ in 0..(frac - digits.len()) {
                    write!(f, "0")?;
                }
                write!(f, "{digits}")
            }
        }
    }
}

impl FromStr for Decimal {
    type Err = dashu::base::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            None => Ok(Self::new(IBig::from_str_radix(s, 10)?, 0)),
            Some((int, frac)) => {
                let combined = format!("{int}{frac}");
                let scale = -i64::try_from(frac.len()).unwrap_or(i64::MAX);
                Ok(Self::new(IBig::from_str_radix(&combined, 10)?, scale))
            }
        }
    }
}

// Arithmetic operations

impl Add for Decimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Self::Output {
        let precision = self.precision.join(rhs.precision);
        let scale = self.scale.min(rhs.scale);
        Decimal::with_precision(
            self.scaled_to(scale).unscaled + rhs.scaled_to(scale).unscaled,
            scale,
            precision,
        )
    }
}

impl Sub for Decimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self + &(-rhs)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl Mul for Decimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Self) -> Self::Output {
        Decimal::with_precision(
            &self.unscaled * &rhs.unscaled,
            self.scale + rhs.scale,
            self.precision.join(rhs.precision),
        )
        .normalize()
    }
}

impl Div for Decimal {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl Div for &Decimal {
    type Output = Decimal;

    fn div(self, rhs: Self) -> Self::Output {
        let precision = self.precision.join(rhs.precision);
        let target = rhs.scale - i64::from(precision.max_digits);
        let numerator = self.scaled_to(target);
        Decimal::with_precision(
            numerator.unscaled / &rhs.unscaled,
            -i64::from(precision.max_digits),
            precision,
        )
        .normalize()
    }
}

impl Rem for Decimal {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        &self % &rhs
    }
}

impl Rem for &Decimal {
    type Output = Decimal;

    fn rem(self, rhs: Self) -> Self::Output {
        let precision = self.precision.join(rhs.precision);
        let scale = self.scale.min(rhs.scale);
        Decimal::with_precision(
            self.scaled_to(scale).unscaled % rhs.scaled_to(scale).unscaled,
            scale,
            precision,
        )
    }
}

impl Neg for Decimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::with_precision(-self.unscaled, self.scale, self.precision)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        Decimal::with_precision(-&self.unscaled, self.scale, self.precision)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Decimal::from_i64(10);
        let b = Decimal::new(25, -1); // 2.5

        assert_eq!(a.clone() + b.clone(), Decimal::new(125, -1));
        assert_eq!(a.clone() - b.clone(), Decimal::new(75, -1));
        assert_eq!(a.clone() * b.clone(), Decimal::from_i64(25));
        assert_eq!(a % b, Decimal::from_i64(0));
    }

    #[test]
    fn test_scale_alignment() {
        // 1.0 and 1 compare equal despite different scales.
        assert_eq!(Decimal::new(10, -1), Decimal::new(1, 0));
        assert!(Decimal::new(15, -1) > Decimal::from_i64(1));
        assert!(Decimal::new(-20, 0) < Decimal::new(-2, 0));
    }

    #[test]
    fn test_div() {
        let one = Decimal::from_i64(1);
        let eighth = one.clone() / Decimal::from_i64(8);
        assert_eq!(eighth, "0.125".parse().unwrap());

        // Truncated, not errored, past the precision bound.
        let third = one / Decimal::from_i64(3);
        let expected = Decimal::new(3, -1);
        assert!((third - expected).abs() < Decimal::new(1, -1));
    }

    #[test]
    fn test_normalize_strips_trailing_zeros() {
        let n = Decimal::new(2500, -3).normalize();
        assert_eq!(n.unscaled(), &dashu::integer::IBig::from(25));
        assert_eq!(n.scale(), -1);
    }

    #[test]
    fn test_normalize_truncates_excess_precision() {
        let p = Precision::new(4);
        let v = Decimal::with_precision(123_456_789, -8, p).normalize();
        // 1.23456789 keeps four fractional digits.
        assert_eq!(v, Decimal::new(12_345, -4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(12_345, -2).to_string(), "123.45");
        assert_eq!(Decimal::new(5, 1).to_string(), "50");
        assert_eq!(Decimal::new(5, -3).to_string(), "0.005");
        assert_eq!(Decimal::new(-12_345, -4).to_string(), "-1.2345");
        assert_eq!(Decimal::new(0, -7).to_string(), "0");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("123.45".parse::<Decimal>().unwrap(), Decimal::new(12_345, -2));
        assert_eq!("-0.5".parse::<Decimal>().unwrap(), Decimal::new(-5, -1));
        assert_eq!("42".parse::<Decimal>().unwrap(), Decimal::from_i64(42));
        assert!("1.2.3".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_gcd() {
        let a = Decimal::from_i64(12);
        let b = Decimal::from_i64(8);
        assert_eq!(a.gcd(&b), Decimal::from_i64(4));

        let a = Decimal::new(25, -2); // 0.25
        let b = Decimal::new(10, -2); // 0.10
        assert_eq!(a.gcd(&b), Decimal::new(5, -2));
    }

    #[test]
    fn test_exp_zero_is_exactly_one() {
        let zero = Decimal::from_i64(0);
        assert_eq!(zero.exp(), Decimal::from_i64(1));
    }

    #[test]
    fn test_exp_one() {
        let e = Decimal::from_i64(1).exp();
        let expected: Decimal = "2.718281828459045".parse().unwrap();
        assert!((e - expected).abs() < Decimal::new(1, -8));
    }

    #[test]
    fn test_ln_one_converges_to_zero() {
        let ln1 = Decimal::from_i64(1).ln();
        assert!(ln1.abs() < Decimal::new(1, -40));
    }

    #[test]
    fn test_ln_two() {
        let ln2 = Decimal::from_i64(2).ln();
        let expected: Decimal = "0.693147180559945".parse().unwrap();
        assert!((ln2 - expected).abs() < Decimal::new(1, -9));
    }

    #[test]
    fn test_pow_integer_exponent() {
        let two = Decimal::from_i64(2);
        assert_eq!(two.pow(&Decimal::from_i64(10)), Decimal::from_i64(1024));
        assert_eq!(
            two.pow(&Decimal::from_i64(-2)),
            "0.25".parse::<Decimal>().unwrap()
        );
        // Negative bases stay exact on the integer path.
        let neg3 = Decimal::from_i64(-3);
        assert_eq!(neg3.pow(&Decimal::from_i64(3)), Decimal::from_i64(-27));
    }

    #[test]
    fn test_pow_fractional_exponent() {
        let sqrt2 = Decimal::from_i64(2).pow(&"0.5".parse().unwrap());
        let expected: Decimal = "1.41421356237309".parse().unwrap();
        assert!((sqrt2 - expected).abs() < Decimal::new(1, -9));
    }

    #[test]
    fn test_precision_travels_with_values() {
        let p = Precision::new(8);
        let coarse = Decimal::with_precision(1, 0, p);
        let fine = Decimal::from_i64(1);
        assert_eq!((coarse.clone() / coarse.clone()).precision().max_digits, 8);
        assert_eq!((coarse / fine).precision().max_digits, 50);
    }
}
