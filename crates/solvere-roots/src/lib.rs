//! # solvere-roots
//!
//! Root-approximation drivers over compiled term evaluators.
//!
//! Each driver compiles the function (and the derivatives it needs) exactly
//! once, then runs a fixed number of update steps against an evolving guess.
//! Iteration-count policy belongs to the caller; the drivers never decide to
//! stop early. Per-iteration progress goes through the [`log`] facade at
//! debug level.
//!
//! Division by a vanishing derivative is representation-defined, exactly as
//! it is for the numeric types themselves: exact representations panic in
//! the underlying big-integer division, floats produce IEEE infinities.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::cmp::Ordering;

use solvere_numbers::Number;
use solvere_terms::Term;

/// Approximates a root by Newton's method: `x := x - f(x)/f'(x)`.
#[must_use]
pub fn newton<N: Number>(function: &Term<N>, guess: N, iterations: u32) -> N {
    let f = function.function();
    let df = function.derivative().function();
    let mut x = guess;
    for i in 1..=iterations {
        let delta = f(&x) / df(&x);
        x = x - delta;
        log::debug!("newton iteration {i}: {x} (evaluates to {})", f(&x));
    }
    x
}

/// Approximates a root by Halley's method:
/// `x := x - 2*f*f' / (2*f'^2 - f*f'')`.
#[must_use]
pub fn halley<N: Number>(function: &Term<N>, guess: N, iterations: u32) -> N {
    let derivative = function.derivative();
    let f = function.function();
    let df = derivative.function();
    let ddf = derivative.derivative().function();
    let mut x = guess;
    for i in 1..=iterations {
        let two = x.from_int(2);
        let fx = f(&x);
        let dfx = df(&x);
        let ddfx = ddf(&x);
        let numerator = two.clone() * fx.clone() * dfx.clone();
        let denominator = two * dfx.clone() * dfx - fx * ddfx;
        x = x - numerator / denominator;
        log::debug!("halley iteration {i}: {x} (evaluates to {})", f(&x));
    }
    x
}

/// Approximates a root by bisection on `[lo, hi]`.
///
/// The bracket is assumed to straddle a sign change; each step keeps the
/// half whose endpoints still differ in sign and returns the final midpoint.
#[must_use]
pub fn bisect<N: Number>(function: &Term<N>, lo: N, hi: N, iterations: u32) -> N {
    let f = function.function();
    let zero = lo.from_int(0);
    let two = lo.from_int(2);
    let (mut lo, mut hi) = (lo, hi);
    let mut midpoint = (lo.clone() + hi.clone()) / two.clone();
    for i in 1..=iterations {
        midpoint = (lo.clone() + hi.clone()) / two.clone();
        let sign_at_lo = f(&lo).compare(&zero);
        let sign_at_mid = f(&midpoint).compare(&zero);
        if sign_at_mid == Ordering::Equal {
            return midpoint;
        }
        if sign_at_lo == sign_at_mid {
            lo = midpoint.clone();
        } else {
            hi = midpoint.clone();
        }
        log::debug!("bisect iteration {i}: [{lo}, {hi}]");
    }
    midpoint
}
