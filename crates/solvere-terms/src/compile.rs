//! Compilation of terms into reusable evaluator closures.
//!
//! Children are compiled exactly once; evaluation composes the resulting
//! closures and never re-walks the tree.

use solvere_numbers::Number;

use crate::term::{Term, TermKind};

/// A compiled, pure mapping from one input number to one output number.
pub type Evaluator<N> = Box<dyn Fn(&N) -> N>;

impl<N: Number> Term<N> {
    /// Compiles this term into an evaluator closure.
    ///
    /// The result is referentially transparent: equal inputs give equal
    /// outputs, with no hidden state. Degenerate exponentials (base 0,
    /// base 1, zero coefficient) and zero-coefficient logarithms compile to
    /// constant closures instead of routing `0^x` or `1^x` through `pow`.
    #[must_use]
    pub fn function(&self) -> Evaluator<N> {
        match self.kind() {
            TermKind::Constant(value) => constant_evaluator(value.clone()),

            TermKind::PowerLaw { coefficient, power } => {
                let coefficient = coefficient.clone();
                let power = power.clone();
                Box::new(move |x| coefficient.clone() * x.pow(&power))
            }

            TermKind::Exponential { base, coefficient } => {
                if *base == base.from_int(1) {
                    return constant_evaluator(coefficient.clone());
                }
                if *base == base.from_int(0) || *coefficient == coefficient.from_int(0) {
                    return constant_evaluator(coefficient.from_int(0));
                }
                let base = base.clone();
                let coefficient = coefficient.clone();
                Box::new(move |x| coefficient.clone() * base.pow(x))
            }

            TermKind::Logarithm { base, coefficient } => {
                if *coefficient == coefficient.from_int(0) {
                    return constant_evaluator(coefficient.from_int(0));
                }
                let base = base.clone();
                let coefficient = coefficient.clone();
                Box::new(move |x| coefficient.clone() * x.log(&base))
            }

            TermKind::Sum(terms) => {
                let parts: Vec<Evaluator<N>> = terms.iter().map(Term::function).collect();
                Box::new(move |x| {
                    parts
                        .iter()
                        .map(|f| f(x))
                        .reduce(|a, b| a + b)
                        .expect("sums are never empty")
                })
            }

            TermKind::Product(terms) => {
                let parts: Vec<Evaluator<N>> = terms.iter().map(Term::function).collect();
                Box::new(move |x| {
                    parts
                        .iter()
                        .map(|f| f(x))
                        .reduce(|a, b| a * b)
                        .expect("products are never empty")
                })
            }

            TermKind::Quotient {
                numerator,
                denominator,
            } => {
                let numerator = numerator.function();
                let denominator = denominator.function();
                Box::new(move |x| numerator(x) / denominator(x))
            }

            TermKind::Chain { outer, inner } => {
                let outer = outer.function();
                let inner = inner.function();
                Box::new(move |x| outer(&inner(x)))
            }
        }
    }
}

fn constant_evaluator<N: Number>(value: N) -> Evaluator<N> {
    Box::new(move |_| value.clone())
}
