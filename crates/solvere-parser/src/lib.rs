//! # solvere-parser
//!
//! Turns a textual single-variable function into a
//! [`solvere_terms::Term`] tree.
//!
//! The grammar is the closed set of forms the term algebra can represent:
//! `+`-separated sums, `*`-separated products, `x^p` and `(...)^p` power
//! laws, `b^x` and `b^(...)` exponentials, `ln(...)` / `log_b(...)`
//! logarithms, numeric constants, and parenthesized composition (which
//! becomes a [`Chain`](solvere_terms::TermKind::Chain)). `e` and `pi` are
//! accepted wherever a numeric literal is.
//!
//! Numeric literals are lifted through a caller-supplied converter, so one
//! parser serves every numeric representation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;

use std::marker::PhantomData;

use solvere_numbers::Number;
use solvere_terms::Term;

pub use error::ParseError;

/// Decimal expansion used for the literal `e`.
const EULER: &str = "2.7182818284590452353602874713526625";
/// Decimal expansion used for the literal `pi`.
const PI: &str = "3.1415926535897932384626433";

/// A parser producing terms over one numeric representation.
///
/// The converter lifts literal strings (plain decimal notation) into the
/// representation; it returns `None` for text it cannot convert.
pub struct FunctionParser<N, F> {
    convert: F,
    _representation: PhantomData<N>,
}

impl<N, F> FunctionParser<N, F>
where
    N: Number,
    F: Fn(&str) -> Option<N>,
{
    /// Creates a parser around a literal converter.
    pub fn new(convert: F) -> Self {
        Self {
            convert,
            _representation: PhantomData,
        }
    }

    /// Parses a complete function body.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for empty input, unbalanced parentheses,
    /// unconvertible literals, or fragments matching no known form.
    pub fn parse(&self, source: &str) -> Result<Term<N>, ParseError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        self.parse_fragment(trimmed)
    }

    fn parse_fragment(&self, source: &str) -> Result<Term<N>, ParseError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ParseError::Unrecognized(String::new()));
        }

        let addends = split_top_level(source, '+')?;
        if addends.len() > 1 {
            let terms = addends
                .into_iter()
                .map(|part| self.parse_fragment(part))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Term::sum(terms));
        }

        let factors = split_top_level(source, '*')?;
        if factors.len() > 1 {
            let terms = factors
                .into_iter()
                .map(|part| self.parse_fragment(part))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Term::product(terms));
        }

        if source == "x" {
            let one = self.literal("1")?;
            return Ok(Term::power_law(one.clone(), one));
        }

        if let Some(inner) = paren_wrapped(source) {
            return self.parse_fragment(inner);
        }

        let exponents = split_top_level(source, '^')?;
        if exponents.len() == 2 {
            return self.parse_power(source, exponents[0].trim(), exponents[1].trim());
        }

        if source.starts_with("ln") || source.starts_with("log_") {
            return self.parse_logarithm(source);
        }

        self.parse_constant(source)
    }

    /// `x^p` and `(...)^p` become power laws; `b^x` and `b^(...)` become
    /// exponentials. A parenthesized side is parsed recursively and wrapped
    /// via composition.
    fn parse_power(
        &self,
        source: &str,
        base: &str,
        power: &str,
    ) -> Result<Term<N>, ParseError> {
        if base == "x" {
            if !is_literal_text(power) {
                return Err(ParseError::Unrecognized(source.to_owned()));
            }
            return Ok(Term::power_law(self.literal("1")?, self.literal(power)?));
        }
        if let Some(inner) = paren_wrapped(base) {
            if !is_literal_text(power) {
                return Err(ParseError::Unrecognized(source.to_owned()));
            }
            let law = Term::power_law(self.literal("1")?, self.literal(power)?);
            return Ok(Term::chain(law, self.parse_fragment(inner)?));
        }
        if !is_literal_text(base) {
            return Err(ParseError::Unrecognized(source.to_owned()));
        }
        let base_value = self.literal(base)?;
        if power == "x" {
            return Ok(Term::exponential(base_value.clone(), base_value.from_int(1)));
        }
        if let Some(inner) = paren_wrapped(power) {
            let one = base_value.from_int(1);
            let exponential = Term::exponential(base_value, one);
            return Ok(Term::chain(exponential, self.parse_fragment(inner)?));
        }
        Err(ParseError::Unrecognized(source.to_owned()))
    }

    /// `ln(arg)` and `log_b(arg)`; an argument other than bare `x` becomes
    /// the inner side of a composition.
    fn parse_logarithm(&self, source: &str) -> Result<Term<N>, ParseError> {
        let open = source
            .find('(')
            .ok_or_else(|| ParseError::Unrecognized(source.to_owned()))?;
        let head = &source[..open];
        let argument = paren_wrapped(&source[open..])
            .ok_or_else(|| ParseError::UnmatchedParen(source.to_owned()))?;

        let base = match head {
            "ln" => self.literal("e")?,
            _ => {
                let base_text = head
                    .strip_prefix("log_")
                    .ok_or_else(|| ParseError::Unrecognized(source.to_owned()))?;
                self.literal(base_text)?
            }
        };
        let log = Term::logarithm(base.clone(), base.from_int(1));
        if argument.trim() == "x" {
            return Ok(log);
        }
        Ok(Term::chain(log, self.parse_fragment(argument)?))
    }

    fn parse_constant(&self, source: &str) -> Result<Term<N>, ParseError> {
        let looks_numeric = source
            .strip_prefix('-')
            .unwrap_or(source)
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.');
        if !looks_numeric {
            return Err(ParseError::Unrecognized(source.to_owned()));
        }
        self.literal(source).map(Term::constant_value)
    }

    fn literal(&self, text: &str) -> Result<N, ParseError> {
        let text = text.trim();
        let spelled = match text {
            "e" => EULER,
            "pi" => PI,
            other => other,
        };
        (self.convert)(spelled).ok_or_else(|| ParseError::InvalidNumber(text.to_owned()))
    }
}

/// Returns true for text the literal converter could plausibly accept:
/// plain decimal notation or the spelled constants `e` and `pi`.
fn is_literal_text(text: &str) -> bool {
    if text == "e" || text == "pi" {
        return true;
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Splits at top-level occurrences of `separator`, respecting parentheses.
fn split_top_level(source: &str, separator: char) -> Result<Vec<&str>, ParseError> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (index, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::UnmatchedParen(source.to_owned()));
                }
            }
            c if c == separator && depth == 0 => {
                parts.push(&source[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::UnmatchedParen(source.to_owned()));
    }
    parts.push(&source[start..]);
    Ok(parts)
}

/// Returns the interior when the whole fragment is one parenthesized group.
fn paren_wrapped(source: &str) -> Option<&str> {
    let source = source.trim();
    let rest = source.strip_prefix('(')?;
    let interior = rest.strip_suffix(')')?;
    // The opening paren must match the final one, not an earlier close.
    let mut depth = 0;
    for c in interior.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(interior)
}

#[cfg(test)]
mod tests {
    use solvere_numbers::Float64;
    use solvere_terms::{Term, TermKind};

    use super::{FunctionParser, ParseError};

    fn parser() -> FunctionParser<Float64, impl Fn(&str) -> Option<Float64>> {
        FunctionParser::new(|s: &str| s.parse::<Float64>().ok())
    }

    fn n(v: f64) -> Float64 {
        Float64(v)
    }

    #[test]
    fn test_variable() {
        assert_eq!(parser().parse("x").unwrap(), Term::power_law(n(1.0), n(1.0)));
    }

    #[test]
    fn test_power_law() {
        assert_eq!(
            parser().parse("x^2").unwrap(),
            Term::power_law(n(1.0), n(2.0))
        );
        let pi_power = parser().parse("x^pi").unwrap();
        match pi_power.kind() {
            TermKind::PowerLaw { power, .. } => {
                assert!((power.value() - std::f64::consts::PI).abs() < 1e-6);
            }
            other => panic!("expected power law, got {other:?}"),
        }
    }

    #[test]
    fn test_exponential() {
        assert_eq!(
            parser().parse("2^x").unwrap(),
            Term::exponential(n(2.0), n(1.0))
        );
        let natural = parser().parse("e^x").unwrap();
        match natural.kind() {
            TermKind::Exponential { base, .. } => {
                assert!((base.value() - std::f64::consts::E).abs() < 1e-12);
            }
            other => panic!("expected exponential, got {other:?}"),
        }
    }

    #[test]
    fn test_logarithms() {
        assert_eq!(
            parser().parse("log_2(x)").unwrap(),
            Term::logarithm(n(2.0), n(1.0))
        );
        let natural = parser().parse("ln(x)").unwrap();
        match natural.kind() {
            TermKind::Logarithm { base, .. } => {
                assert!((base.value() - std::f64::consts::E).abs() < 1e-12);
            }
            other => panic!("expected logarithm, got {other:?}"),
        }
    }

    #[test]
    fn test_sum_and_product() {
        let parsed = parser().parse("2*x + 1").unwrap();
        assert_eq!(
            parsed,
            Term::sum([
                Term::product([
                    Term::constant_value(n(2.0)),
                    Term::power_law(n(1.0), n(1.0)),
                ]),
                Term::constant_value(n(1.0)),
            ])
        );
    }

    #[test]
    fn test_negative_constant_in_sum() {
        let parsed = parser().parse("x^2 + -2").unwrap();
        assert_eq!(
            parsed,
            Term::sum([
                Term::power_law(n(1.0), n(2.0)),
                Term::constant_value(n(-2.0)),
            ])
        );
    }

    #[test]
    fn test_parenthesized_base_becomes_composition() {
        let parsed = parser().parse("(x + 1)^2").unwrap();
        assert_eq!(
            parsed,
            Term::chain(
                Term::power_law(n(1.0), n(2.0)),
                Term::sum([
                    Term::power_law(n(1.0), n(1.0)),
                    Term::constant_value(n(1.0)),
                ]),
            )
        );
    }

    #[test]
    fn test_parenthesized_exponent_becomes_composition() {
        let parsed = parser().parse("2^(x + 1)").unwrap();
        assert_eq!(
            parsed,
            Term::chain(
                Term::exponential(n(2.0), n(1.0)),
                Term::sum([
                    Term::power_law(n(1.0), n(1.0)),
                    Term::constant_value(n(1.0)),
                ]),
            )
        );
    }

    #[test]
    fn test_logarithm_of_expression_becomes_composition() {
        let parsed = parser().parse("log_2(x + 1)").unwrap();
        assert_eq!(
            parsed,
            Term::chain(
                Term::logarithm(n(2.0), n(1.0)),
                Term::sum([
                    Term::power_law(n(1.0), n(1.0)),
                    Term::constant_value(n(1.0)),
                ]),
            )
        );
    }

    #[test]
    fn test_whole_parenthesized_group_unwraps() {
        assert_eq!(
            parser().parse("(x + 1)").unwrap(),
            Term::sum([
                Term::power_law(n(1.0), n(1.0)),
                Term::constant_value(n(1.0)),
            ])
        );
    }

    #[test]
    fn test_unmatched_parens_are_reported() {
        assert!(matches!(
            parser().parse("(x + 1"),
            Err(ParseError::UnmatchedParen(_))
        ));
        assert!(matches!(
            parser().parse("x) + 1"),
            Err(ParseError::UnmatchedParen(_))
        ));
    }

    #[test]
    fn test_empty_and_unrecognized_inputs() {
        assert_eq!(parser().parse("   "), Err(ParseError::EmptyInput));
        assert!(matches!(
            parser().parse("y^2"),
            Err(ParseError::Unrecognized(_))
        ));
        assert!(matches!(
            parser().parse("x + "),
            Err(ParseError::Unrecognized(_))
        ));
    }
}
