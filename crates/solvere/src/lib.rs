//! # Solvere
//!
//! A symbolic-differentiation and root-finding engine built on
//! interchangeable arbitrary-precision numeric representations.
//!
//! Given a textual single-variable function, solvere builds an expression
//! tree, differentiates it structurally, optionally simplifies it, compiles
//! both the function and its derivative into evaluator closures, and drives
//! Newton-style iteration in the numeric representation of your choice:
//! scaled-integer decimal, exact rational, or native floating point.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solvere::prelude::*;
//!
//! let parser = FunctionParser::new(|s: &str| s.parse::<Float64>().ok());
//! let f = parser.parse("x^2 + -2")?;
//! let root = newton(&f, Float64(1.0), 10);
//! println!("sqrt 2 is about {root}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use solvere_numbers as numbers;
pub use solvere_parser as parser;
pub use solvere_roots as roots;
pub use solvere_terms as terms;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use solvere_numbers::{Decimal, Float64, Fraction, Number, Precision};
    pub use solvere_parser::{FunctionParser, ParseError};
    pub use solvere_roots::{bisect, halley, newton};
    pub use solvere_terms::{Evaluator, SimplifyConfig, Term, TermKind};
}
