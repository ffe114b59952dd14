//! Term tree types and structural queries.

use std::sync::Arc;

use smallvec::SmallVec;
use solvere_numbers::Number;

/// Child list of a variadic term; small lists stay inline.
pub type TermList<N> = SmallVec<[Term<N>; 4]>;

/// An immutable node in an expression tree over one variable.
///
/// `Term` is a cheap shared handle: cloning is O(1) and every transform
/// shares unmodified subtrees with its input.
#[derive(Debug, Clone)]
pub struct Term<N: Number>(Arc<TermKind<N>>);

/// The closed set of term kinds.
#[derive(Debug, PartialEq)]
pub enum TermKind<N: Number> {
    /// A fixed value, independent of the input variable.
    Constant(N),
    /// `coefficient * x^power`.
    PowerLaw {
        /// Multiplicative factor.
        coefficient: N,
        /// Exponent on the variable.
        power: N,
    },
    /// `coefficient * base^x`.
    Exponential {
        /// Base of the exponential.
        base: N,
        /// Multiplicative factor.
        coefficient: N,
    },
    /// `coefficient * log_base(x)`.
    Logarithm {
        /// Base of the logarithm.
        base: N,
        /// Multiplicative factor.
        coefficient: N,
    },
    /// Variadic addition, order-preserving.
    Sum(TermList<N>),
    /// Variadic multiplication, order-preserving.
    Product(TermList<N>),
    /// Binary division.
    Quotient {
        /// Dividend.
        numerator: Term<N>,
        /// Divisor.
        denominator: Term<N>,
    },
    /// Function composition `outer(inner(x))`.
    ///
    /// Invariant: `outer` is never itself a `Chain`; the constructor
    /// re-associates to keep nesting on the `inner` side.
    Chain {
        /// Function applied last.
        outer: Term<N>,
        /// Function applied first.
        inner: Term<N>,
    },
}

impl<N: Number> PartialEq for Term<N> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl<N: Number> Term<N> {
    fn wrap(kind: TermKind<N>) -> Self {
        Self(Arc::new(kind))
    }

    /// Returns the node kind for matching.
    #[must_use]
    pub fn kind(&self) -> &TermKind<N> {
        &self.0
    }

    // Constructors

    /// Creates a constant term.
    #[must_use]
    pub fn constant_value(value: N) -> Self {
        Self::wrap(TermKind::Constant(value))
    }

    /// Creates `coefficient * x^power`.
    #[must_use]
    pub fn power_law(coefficient: N, power: N) -> Self {
        Self::wrap(TermKind::PowerLaw { coefficient, power })
    }

    /// Creates `coefficient * base^x`.
    #[must_use]
    pub fn exponential(base: N, coefficient: N) -> Self {
        Self::wrap(TermKind::Exponential { base, coefficient })
    }

    /// Creates `coefficient * log_base(x)`.
    #[must_use]
    pub fn logarithm(base: N, coefficient: N) -> Self {
        Self::wrap(TermKind::Logarithm { base, coefficient })
    }

    /// Creates a variadic sum.
    ///
    /// # Panics
    ///
    /// Panics if the term list is empty.
    #[must_use]
    pub fn sum(terms: impl IntoIterator<Item = Term<N>>) -> Self {
        let terms: TermList<N> = terms.into_iter().collect();
        assert!(!terms.is_empty(), "a sum requires at least one term");
        Self::wrap(TermKind::Sum(terms))
    }

    /// Creates a variadic product.
    ///
    /// # Panics
    ///
    /// Panics if the term list is empty.
    #[must_use]
    pub fn product(terms: impl IntoIterator<Item = Term<N>>) -> Self {
        let terms: TermList<N> = terms.into_iter().collect();
        assert!(!terms.is_empty(), "a product requires at least one term");
        Self::wrap(TermKind::Product(terms))
    }

    /// Creates a quotient.
    #[must_use]
    pub fn quotient(numerator: Term<N>, denominator: Term<N>) -> Self {
        Self::wrap(TermKind::Quotient {
            numerator,
            denominator,
        })
    }

    /// Creates a composition `outer(inner(x))`.
    ///
    /// Composition nests through `inner` only: `chain(chain(a, b), c)` is
    /// re-associated into `chain(a, chain(b, c))`, so `outer` is never a
    /// `Chain` in any reachable tree.
    #[must_use]
    pub fn chain(outer: Term<N>, inner: Term<N>) -> Self {
        match outer.kind() {
            TermKind::Chain {
                outer: first,
                inner: second,
            } => {
                let first = first.clone();
                let rest = Self::chain(second.clone(), inner);
                Self::chain(first, rest)
            }
            _ => Self::wrap(TermKind::Chain { outer, inner }),
        }
    }

    // Structural queries

    /// Returns true if this term's value does not depend on the variable.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self.kind() {
            TermKind::Constant(_) => true,
            TermKind::PowerLaw { coefficient, power } => {
                *power == power.from_int(0) || *coefficient == coefficient.from_int(0)
            }
            TermKind::Exponential { base, coefficient } => {
                *base == base.from_int(1)
                    || *base == base.from_int(0)
                    || *coefficient == coefficient.from_int(0)
            }
            TermKind::Logarithm { coefficient, .. } => *coefficient == coefficient.from_int(0),
            TermKind::Sum(terms) | TermKind::Product(terms) => {
                terms.iter().all(Term::is_constant)
            }
            TermKind::Quotient {
                numerator,
                denominator,
            } => numerator.is_constant() && denominator.is_constant(),
            TermKind::Chain { outer, inner } => outer.is_constant() || inner.is_constant(),
        }
    }

    /// Returns the value of a constant-foldable term.
    ///
    /// # Panics
    ///
    /// Panics if the term is not constant-foldable.
    #[must_use]
    pub fn constant(&self) -> N {
        match self.kind() {
            TermKind::Constant(value) => value.clone(),
            TermKind::PowerLaw { coefficient, power } => {
                if *power == power.from_int(0) {
                    coefficient.clone()
                } else if *coefficient == coefficient.from_int(0) {
                    coefficient.from_int(0)
                } else {
                    panic!("constant() called on a non-constant term")
                }
            }
            TermKind::Exponential { base, coefficient } => {
                if *base == base.from_int(1) {
                    coefficient.clone()
                } else if *base == base.from_int(0)
                    || *coefficient == coefficient.from_int(0)
                {
                    coefficient.from_int(0)
                } else {
                    panic!("constant() called on a non-constant term")
                }
            }
            TermKind::Logarithm { coefficient, .. } => {
                assert!(
                    *coefficient == coefficient.from_int(0),
                    "constant() called on a non-constant term"
                );
                coefficient.from_int(0)
            }
            TermKind::Sum(terms) => terms
                .iter()
                .map(Term::constant)
                .reduce(|a, b| a + b)
                .expect("sums are never empty"),
            TermKind::Product(terms) => terms
                .iter()
                .map(Term::constant)
                .reduce(|a, b| a * b)
                .expect("products are never empty"),
            TermKind::Quotient {
                numerator,
                denominator,
            } => numerator.constant() / denominator.constant(),
            TermKind::Chain { outer, inner } => {
                if outer.is_constant() {
                    outer.constant()
                } else if inner.is_constant() {
                    outer.function()(&inner.constant())
                } else {
                    panic!("constant() called on a non-constant term")
                }
            }
        }
    }

    /// Returns the constant multiplicative factor of this term.
    ///
    /// Composite kinds report 1 in their children's representation; the
    /// factor they would contribute lives in the children themselves.
    #[must_use]
    pub fn coefficient(&self) -> N {
        match self.kind() {
            TermKind::Constant(value) => value.clone(),
            TermKind::PowerLaw { coefficient, .. }
            | TermKind::Exponential { coefficient, .. }
            | TermKind::Logarithm { coefficient, .. } => coefficient.clone(),
            TermKind::Sum(terms) | TermKind::Product(terms) => {
                terms[0].coefficient().from_int(1)
            }
            TermKind::Quotient { numerator, .. } => numerator.coefficient().from_int(1),
            TermKind::Chain { outer, .. } => outer.coefficient().from_int(1),
        }
    }

    /// Multiplies this term by a scalar, returning a new tree.
    #[must_use]
    pub fn multiply(&self, n: &N) -> Self {
        match self.kind() {
            TermKind::Constant(value) => Self::constant_value(value.clone() * n.clone()),
            TermKind::PowerLaw { coefficient, power } => {
                Self::power_law(coefficient.clone() * n.clone(), power.clone())
            }
            TermKind::Exponential { base, coefficient } => {
                Self::exponential(base.clone(), coefficient.clone() * n.clone())
            }
            TermKind::Logarithm { base, coefficient } => {
                Self::logarithm(base.clone(), coefficient.clone() * n.clone())
            }
            TermKind::Sum(terms) => Self::sum(terms.iter().map(|t| t.multiply(n))),
            TermKind::Product(terms) => {
                let mut terms: TermList<N> = terms.clone();
                terms[0] = terms[0].multiply(n);
                Self::wrap(TermKind::Product(terms))
            }
            TermKind::Quotient {
                numerator,
                denominator,
            } => Self::quotient(numerator.multiply(n), denominator.clone()),
            TermKind::Chain { outer, inner } => {
                Self::chain(outer.multiply(n), inner.clone())
            }
        }
    }

    /// Multiplies this term by a machine integer.
    #[must_use]
    pub fn multiply_int(&self, n: i64) -> Self {
        let witness = self.coefficient();
        self.multiply(&witness.from_int(n))
    }

    /// Returns true if `that` is a direct child of this composite term.
    ///
    /// Leaf kinds have no children and always answer false.
    #[must_use]
    pub fn is_on(&self, that: &Term<N>) -> bool {
        match self.kind() {
            TermKind::Constant(_)
            | TermKind::PowerLaw { .. }
            | TermKind::Exponential { .. }
            | TermKind::Logarithm { .. } => false,
            TermKind::Sum(terms) | TermKind::Product(terms) => {
                terms.iter().any(|t| t == that)
            }
            TermKind::Quotient {
                numerator,
                denominator,
            } => numerator == that || denominator == that,
            TermKind::Chain { outer, inner } => outer == that || inner == that,
        }
    }

    /// Direct children of this node, outermost order preserved.
    pub(crate) fn children(&self) -> Vec<&Term<N>> {
        match self.kind() {
            TermKind::Constant(_)
            | TermKind::PowerLaw { .. }
            | TermKind::Exponential { .. }
            | TermKind::Logarithm { .. } => Vec::new(),
            TermKind::Sum(terms) | TermKind::Product(terms) => terms.iter().collect(),
            TermKind::Quotient {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            TermKind::Chain { outer, inner } => vec![outer, inner],
        }
    }
}
