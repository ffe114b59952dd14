//! # solvere-terms
//!
//! Expression trees for single-variable functions, generic over any numeric
//! representation implementing the [`solvere_numbers::Number`] contract.
//!
//! This crate provides:
//! - A closed set of term kinds ([`TermKind`]) behind a cheap shared handle
//!   ([`Term`])
//! - Structural symbolic differentiation ([`Term::derivative`])
//! - A pairwise simplification engine keyed on (term, container) pairs
//! - Compilation of any term into a reusable evaluator closure
//!   ([`Term::function`])
//!
//! ## Design Principles
//!
//! - **Immutability**: every transform returns a new tree; unchanged
//!   subtrees are shared
//! - **Closed dispatch**: every rule is an exhaustive match over the kind
//!   enum, never a wildcard fallback
//! - **Fail fast**: contract violations panic with a cause instead of
//!   silently returning their input

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compile;
pub mod simplify;
pub mod term;

mod derivative;

pub use compile::Evaluator;
pub use simplify::SimplifyConfig;
pub use term::{Term, TermKind, TermList};
