//! Structural symbolic differentiation.

use solvere_numbers::Number;

use crate::term::{Term, TermKind};

impl<N: Number> Term<N> {
    /// Returns the symbolic derivative of this term as a new tree.
    ///
    /// The result is not simplified; pass it through
    /// [`Term::simplify`](crate::term::Term::simplify) if a compact form is
    /// wanted.
    #[must_use]
    pub fn derivative(&self) -> Term<N> {
        match self.kind() {
            TermKind::Constant(value) => Term::constant_value(value.from_int(0)),

            // d/dx c*x^p = c*p * x^(p-1); holds for p = 0 as well, where the
            // result is the everywhere-zero PowerLaw(0, -1).
            TermKind::PowerLaw { coefficient, power } => Term::power_law(
                coefficient.clone() * power.clone(),
                power.clone() - power.from_int(1),
            ),

            // Legacy rule kept verbatim: the coefficient is divided by
            // ln(base), not multiplied. See DESIGN.md before changing.
            TermKind::Exponential { base, coefficient } => {
                Term::exponential(base.clone(), coefficient.clone() / base.ln())
            }

            // d/dx c*log_b(x) = (c/ln b) * x^-1
            TermKind::Logarithm { base, coefficient } => Term::power_law(
                coefficient.clone() / base.ln(),
                coefficient.from_int(-1),
            ),

            TermKind::Sum(terms) => Term::sum(terms.iter().map(Term::derivative)),

            TermKind::Product(terms) => match terms.len() {
                1 => terms[0].derivative(),
                2 => product_rule(&terms[0], &terms[1]),
                _ => {
                    // Split in half and recurse: log-depth instead of the
                    // n-ary generalized rule.
                    let mid = terms.len() / 2;
                    let left = Term::product(terms[..mid].iter().cloned());
                    let right = Term::product(terms[mid..].iter().cloned());
                    product_rule(&left, &right)
                }
            },

            TermKind::Quotient {
                numerator,
                denominator,
            } => {
                let witness = numerator.coefficient();
                Term::quotient(
                    Term::sum([
                        Term::product([numerator.derivative(), denominator.clone()]),
                        Term::product([denominator.derivative(), numerator.clone()])
                            .multiply_int(-1),
                    ]),
                    Term::chain(
                        Term::power_law(witness.from_int(1), witness.from_int(2)),
                        denominator.clone(),
                    ),
                )
            }

            TermKind::Chain { outer, inner } => Term::product([
                Term::chain(outer.derivative(), inner.clone()),
                inner.derivative(),
            ]),
        }
    }
}

fn product_rule<N: Number>(f: &Term<N>, g: &Term<N>) -> Term<N> {
    Term::sum([
        Term::product([f.derivative(), g.clone()]),
        Term::product([f.clone(), g.derivative()]),
    ])
}
