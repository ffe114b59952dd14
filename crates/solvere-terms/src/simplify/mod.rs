//! Pairwise simplification engine.
//!
//! Simplification is not a normal-form reducer. Each term answers whether it
//! can rewrite the *specific container it sits inside*
//! ([`Term::can_simplify`]) and, if so, produces the rewritten container
//! ([`Term::simplified`]). A container applies at most one such rewrite per
//! step; reaching a fixed point is the caller's loop, for which
//! [`Term::simplify_with`] is the bounded convenience driver.

mod rules;

use solvere_numbers::Number;

use crate::term::Term;

/// Configuration for the fixed-point simplification driver.
#[derive(Clone, Copy, Debug)]
pub struct SimplifyConfig {
    /// Maximum number of rewrite passes before giving up.
    pub iter_limit: usize,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self { iter_limit: 64 }
    }
}

impl<N: Number> Term<N> {
    /// Returns true if this term can rewrite the given enclosing container.
    ///
    /// # Panics
    ///
    /// Panics if `container` does not hold this term as a direct child:
    /// asking about a foreign container is a programming error, not a
    /// recoverable condition.
    #[must_use]
    pub fn can_simplify(&self, container: &Term<N>) -> bool {
        assert!(
            container.is_on(self),
            "can_simplify() queried against a container that does not hold this term"
        );
        rules::try_rewrite(self, container).is_some()
    }

    /// Rewrites the given enclosing container around this term.
    ///
    /// Returns the container unchanged when no rule applies; callers gate on
    /// [`Term::can_simplify`] first.
    ///
    /// # Panics
    ///
    /// Panics if `container` does not hold this term as a direct child.
    #[must_use]
    pub fn simplified(&self, container: &Term<N>) -> Term<N> {
        assert!(
            container.is_on(self),
            "simplified() queried against a container that does not hold this term"
        );
        rules::try_rewrite(self, container).unwrap_or_else(|| container.clone())
    }

    /// Returns true if any direct child can rewrite this container.
    #[must_use]
    pub fn can_be_simplified(&self) -> bool {
        self.children()
            .into_iter()
            .any(|child| rules::try_rewrite(child, self).is_some())
    }

    /// Applies the first applicable child rewrite, or returns self unchanged.
    ///
    /// This is a single step; repeated application is the caller's
    /// responsibility.
    #[must_use]
    pub fn simplify_once(&self) -> Term<N> {
        for child in self.children() {
            if let Some(rewritten) = rules::try_rewrite(child, self) {
                return rewritten;
            }
        }
        self.clone()
    }

    /// Iterates rewriting to a fixed point under the default configuration.
    #[must_use]
    pub fn simplify(&self) -> Term<N> {
        self.simplify_with(SimplifyConfig::default())
    }

    /// Iterates rewriting to a fixed point, bounded by `config.iter_limit`
    /// passes. Each pass rewrites subtrees bottom-up, one step per node.
    #[must_use]
    pub fn simplify_with(&self, config: SimplifyConfig) -> Term<N> {
        let mut current = self.clone();
        for _ in 0..config.iter_limit {
            let next = current.simplify_pass();
            if next == current {
                return next;
            }
            current = next;
        }
        current
    }

    fn simplify_pass(&self) -> Term<N> {
        use crate::term::TermKind;

        let rebuilt = match self.kind() {
            TermKind::Constant(_)
            | TermKind::PowerLaw { .. }
            | TermKind::Exponential { .. }
            | TermKind::Logarithm { .. } => self.clone(),
            TermKind::Sum(terms) => Term::sum(terms.iter().map(Term::simplify_pass)),
            TermKind::Product(terms) => Term::product(terms.iter().map(Term::simplify_pass)),
            TermKind::Quotient {
                numerator,
                denominator,
            } => Term::quotient(numerator.simplify_pass(), denominator.simplify_pass()),
            TermKind::Chain { outer, inner } => {
                Term::chain(outer.simplify_pass(), inner.simplify_pass())
            }
        };
        rebuilt.simplify_once()
    }
}
