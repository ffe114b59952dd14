//! Property-based tests for the numeric representations.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::traits::Number;
    use crate::{Decimal, Fraction};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    // Strategy for generating small scales
    fn small_scale() -> impl Strategy<Value = i64> {
        -6i64..6i64
    }

    proptest! {
        // Decimal round trips

        #[test]
        fn decimal_add_sub_round_trip(
            ua in small_int(), sa in small_scale(),
            ub in small_int(), sb in small_scale()
        ) {
            let a = Decimal::new(ua, sa);
            let b = Decimal::new(ub, sb);
            prop_assert_eq!(a.clone() + b.clone() - b, a);
        }

        #[test]
        fn decimal_mul_div_round_trip(
            ua in small_int(), sa in small_scale(),
            ub in non_zero_int(), sb in small_scale()
        ) {
            let a = Decimal::new(ua, sa);
            let b = Decimal::new(ub, sb);
            let round = a.clone() * b.clone() / b;
            // Division truncates at the precision bound.
            let tolerance = Decimal::new(1, -40);
            prop_assert!((round - a).abs() < tolerance);
        }

        #[test]
        fn decimal_add_commutative(
            ua in small_int(), sa in small_scale(),
            ub in small_int(), sb in small_scale()
        ) {
            let a = Decimal::new(ua, sa);
            let b = Decimal::new(ub, sb);
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn decimal_equal_means_zero_difference(u in small_int(), s in small_scale()) {
            let a = Decimal::new(u, s);
            let b = Decimal::new(u * 10, s - 1);
            prop_assert_eq!(a.clone(), b.clone());
            prop_assert_eq!(a - b, Decimal::from_i64(0));
        }

        // Fraction field axioms

        #[test]
        fn fraction_add_sub_round_trip(
            na in small_int(), da in non_zero_int(),
            nb in small_int(), db in non_zero_int()
        ) {
            let a = Fraction::new(na, da);
            let b = Fraction::new(nb, db);
            prop_assert_eq!(a.clone() + b.clone() - b, a);
        }

        #[test]
        fn fraction_mul_div_round_trip(
            na in small_int(), da in non_zero_int(),
            nb in non_zero_int(), db in non_zero_int()
        ) {
            let a = Fraction::new(na, da);
            let b = Fraction::new(nb, db);
            prop_assert_eq!(a.clone() * b.clone() / b, a);
        }

        #[test]
        fn fraction_add_commutative(
            na in small_int(), da in non_zero_int(),
            nb in small_int(), db in non_zero_int()
        ) {
            let a = Fraction::new(na, da);
            let b = Fraction::new(nb, db);
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn fraction_distributive(
            na in small_int(), da in non_zero_int(),
            nb in small_int(), db in non_zero_int(),
            nc in small_int(), dc in non_zero_int()
        ) {
            let a = Fraction::new(na, da);
            let b = Fraction::new(nb, db);
            let c = Fraction::new(nc, dc);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn fraction_normalized_after_ops(
            na in small_int(), da in non_zero_int(),
            nb in small_int(), db in non_zero_int()
        ) {
            use dashu::base::Signed;
            use dashu::integer::IBig;

            let sum = Fraction::new(na, da) + Fraction::new(nb, db);
            prop_assert!(!Signed::is_negative(sum.denominator()));
            let g = IBig::from(dashu::base::Gcd::gcd(
                sum.numerator().clone(),
                sum.denominator().clone(),
            ));
            prop_assert!(g == IBig::ONE || sum.numerator() == &IBig::ZERO);
        }

        // Ordering consistency

        #[test]
        fn fraction_compare_antisymmetric(
            na in small_int(), da in non_zero_int(),
            nb in small_int(), db in non_zero_int()
        ) {
            let a = Fraction::new(na, da);
            let b = Fraction::new(nb, db);
            prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
        }

        #[test]
        fn decimal_compare_consistent_with_sub(
            ua in small_int(), sa in small_scale(),
            ub in small_int(), sb in small_scale()
        ) {
            use std::cmp::Ordering;

            let a = Decimal::new(ua, sa);
            let b = Decimal::new(ub, sb);
            let diff = a.clone() - b.clone();
            let zero = Decimal::from_i64(0);
            match a.compare(&b) {
                Ordering::Equal => prop_assert_eq!(diff, zero),
                Ordering::Greater => prop_assert!(diff > zero),
                Ordering::Less => prop_assert!(diff < zero),
            }
        }
    }
}
