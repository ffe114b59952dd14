//! Finds the square root of two three ways: as floats, as exact rationals,
//! and as 50-digit decimals.

use solvere::prelude::*;

fn main() {
    let source = "x^2 + -2";

    let float_parser = FunctionParser::new(|s: &str| s.parse::<Float64>().ok());
    let f = float_parser.parse(source).expect("formula is well formed");
    let root = newton(&f, Float64(1.0), 10);
    println!("float:    {root}");

    let fraction_parser = FunctionParser::new(|s: &str| s.parse::<Fraction>().ok());
    let f = fraction_parser.parse(source).expect("formula is well formed");
    let root = newton(&f, Fraction::from_i64(1), 8);
    println!("fraction: {root}");

    let decimal_parser = FunctionParser::new(|s: &str| s.parse::<Decimal>().ok());
    let f = decimal_parser.parse(source).expect("formula is well formed");
    let root = newton(&f, Decimal::from_i64(1), 10);
    println!("decimal:  {root}");

    // The derivative is itself a term: print f'(x) evaluated across a range.
    let derivative = f.derivative().simplify();
    let slope = derivative.function();
    for x in [1i64, 2, 3] {
        let at = Decimal::from_i64(x);
        println!("f'({x}) = {}", slope(&at));
    }
}
