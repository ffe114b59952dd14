//! Rewrite rules keyed on (term, enclosing-container) pairs.
//!
//! `try_rewrite` is the single dispatch point: given a direct child and its
//! container, it either produces the rewritten container or answers that no
//! rule applies. Every (child-kind, container-kind) pair is spelled out.

use smallvec::SmallVec;
use solvere_numbers::Number;

use crate::term::{Term, TermKind, TermList};

/// Attempts to rewrite `container` around its direct child `term`.
///
/// Callers guarantee that `term` is a direct child of `container`.
pub(crate) fn try_rewrite<N: Number>(term: &Term<N>, container: &Term<N>) -> Option<Term<N>> {
    match container.kind() {
        TermKind::Constant(_)
        | TermKind::PowerLaw { .. }
        | TermKind::Exponential { .. }
        | TermKind::Logarithm { .. } => {
            unreachable!("leaf terms have no children to simplify against")
        }
        TermKind::Sum(terms) => rewrite_in_sum(term, terms),
        TermKind::Product(terms) => rewrite_in_product(term, terms),
        TermKind::Quotient {
            numerator,
            denominator,
        } => rewrite_in_quotient(term, numerator, denominator),
        TermKind::Chain { outer, inner } => rewrite_in_chain(term, outer, inner),
    }
}

fn rewrite_in_sum<N: Number>(term: &Term<N>, terms: &TermList<N>) -> Option<Term<N>> {
    if terms.len() == 1 {
        return Some(terms[0].clone());
    }
    match term.kind() {
        TermKind::Constant(_) => fold_constant_addends(terms),
        TermKind::PowerLaw { power, .. } => fold_same_power_addends(terms, power),
        TermKind::Logarithm { base, .. } => fold_same_base_log_addends(terms, base),
        TermKind::Sum(inner) => Some(splice_into_sum(terms, term, inner)),
        TermKind::Exponential { .. }
        | TermKind::Product(_)
        | TermKind::Quotient { .. }
        | TermKind::Chain { .. } => None,
    }
}

fn rewrite_in_product<N: Number>(term: &Term<N>, terms: &TermList<N>) -> Option<Term<N>> {
    if terms.len() == 1 {
        return Some(terms[0].clone());
    }
    match term.kind() {
        TermKind::Constant(_) => Some(fold_constant_factors(terms)),
        TermKind::PowerLaw { .. } => fold_power_law_factors(terms),
        TermKind::Product(_) => Some(flatten_product(terms)),
        TermKind::Exponential { .. }
        | TermKind::Logarithm { .. }
        | TermKind::Sum(_)
        | TermKind::Quotient { .. }
        | TermKind::Chain { .. } => None,
    }
}

fn rewrite_in_quotient<N: Number>(
    term: &Term<N>,
    numerator: &Term<N>,
    denominator: &Term<N>,
) -> Option<Term<N>> {
    match term.kind() {
        TermKind::Constant(_) => {
            if numerator.is_constant() && denominator.is_constant() {
                Some(Term::constant_value(
                    numerator.constant() / denominator.constant(),
                ))
            } else {
                None
            }
        }
        TermKind::PowerLaw { .. } => match (numerator.kind(), denominator.kind()) {
            (
                TermKind::PowerLaw {
                    coefficient: c1,
                    power: p1,
                },
                TermKind::PowerLaw {
                    coefficient: c2,
                    power: p2,
                },
            ) => Some(Term::power_law(
                c1.clone() / c2.clone(),
                p1.clone() - p2.clone(),
            )),
            _ => None,
        },
        TermKind::Exponential { .. } => match (numerator.kind(), denominator.kind()) {
            (
                TermKind::Exponential {
                    base: b1,
                    coefficient: c1,
                },
                TermKind::Exponential {
                    base: b2,
                    coefficient: c2,
                },
            ) => Some(Term::exponential(
                b1.clone() / b2.clone(),
                c1.clone() / c2.clone(),
            )),
            _ => None,
        },
        TermKind::Product(_) => cancel_shared_factors(numerator, denominator),
        TermKind::Quotient { .. } => Some(compact_quotient(numerator, denominator)),
        TermKind::Logarithm { .. } | TermKind::Sum(_) | TermKind::Chain { .. } => None,
    }
}

fn rewrite_in_chain<N: Number>(
    term: &Term<N>,
    outer: &Term<N>,
    inner: &Term<N>,
) -> Option<Term<N>> {
    match term.kind() {
        TermKind::Constant(_) => {
            if outer.is_constant() {
                Some(Term::constant_value(outer.constant()))
            } else if inner.is_constant() {
                Some(Term::constant_value(outer.function()(&inner.constant())))
            } else {
                None
            }
        }
        // The nested chain is always the inner side; fold the (outer, middle)
        // pair and keep the innermost term wrapped underneath.
        TermKind::Chain {
            outer: middle,
            inner: innermost,
        } => try_fold_pair(outer, middle).map(|folded| Term::chain(folded, innermost.clone())),
        TermKind::PowerLaw { .. }
        | TermKind::Exponential { .. }
        | TermKind::Logarithm { .. } => {
            if term == inner {
                try_fold_pair(outer, term)
            } else {
                None
            }
        }
        TermKind::Sum(_) | TermKind::Product(_) | TermKind::Quotient { .. } => None,
    }
}

/// Folds a composition `outer(inner(x))` of two leaf terms into a single
/// node via the exponent/logarithm identities, when one exists.
fn try_fold_pair<N: Number>(outer: &Term<N>, inner: &Term<N>) -> Option<Term<N>> {
    match (outer.kind(), inner.kind()) {
        // co * (ci * x^pi)^po = co*ci^po * x^(po*pi)
        (
            TermKind::PowerLaw {
                coefficient: co,
                power: po,
            },
            TermKind::PowerLaw {
                coefficient: ci,
                power: pi,
            },
        ) => Some(Term::power_law(
            co.clone() * ci.pow(po),
            po.clone() * pi.clone(),
        )),

        // cl * log_b(ci * x^pi) = cl*log_b(ci) + cl*pi * log_b(x)
        (
            TermKind::Logarithm {
                base,
                coefficient: cl,
            },
            TermKind::PowerLaw {
                coefficient: ci,
                power: pi,
            },
        ) => Some(Term::sum([
            Term::constant_value(cl.clone() * ci.log(base)),
            Term::logarithm(base.clone(), cl.clone() * pi.clone()),
        ])),

        // cl * log_b(ce * be^x) = cl*log_b(ce) + cl*log_b(be) * x
        (
            TermKind::Logarithm {
                base,
                coefficient: cl,
            },
            TermKind::Exponential {
                base: be,
                coefficient: ce,
            },
        ) => Some(Term::sum([
            Term::constant_value(cl.clone() * ce.log(base)),
            Term::power_law(cl.clone() * be.log(base), cl.from_int(1)),
        ])),

        // ce * be^(cl * log_b(x)) = ce * x^(cl*log_b(be))
        (
            TermKind::Exponential {
                base: be,
                coefficient: ce,
            },
            TermKind::Logarithm {
                base,
                coefficient: cl,
            },
        ) => Some(Term::power_law(ce.clone(), cl.clone() * be.log(base))),

        _ => None,
    }
}

fn fold_constant_addends<N: Number>(terms: &TermList<N>) -> Option<Term<N>> {
    let total = terms
        .iter()
        .filter(|t| t.is_constant())
        .map(Term::constant)
        .reduce(|a, b| a + b);
    let total = total?;
    if terms.iter().filter(|t| t.is_constant()).count() < 2 {
        return None;
    }
    let mut out: TermList<N> = terms.iter().filter(|t| !t.is_constant()).cloned().collect();
    if out.is_empty() {
        return Some(Term::constant_value(total));
    }
    out.push(Term::constant_value(total));
    Some(Term::sum(out))
}

fn fold_same_power_addends<N: Number>(terms: &TermList<N>, power: &N) -> Option<Term<N>> {
    let mut folded: Option<N> = None;
    let mut insert_at = 0;
    let mut out: TermList<N> = SmallVec::new();
    for t in terms {
        if let TermKind::PowerLaw {
            coefficient,
            power: p,
        } = t.kind()
        {
            if p == power {
                folded = Some(match folded {
                    None => {
                        insert_at = out.len();
                        coefficient.clone()
                    }
                    Some(acc) => acc + coefficient.clone(),
                });
                continue;
            }
        }
        out.push(t.clone());
    }
    let coefficient = folded?;
    if terms.len() - out.len() < 2 {
        return None;
    }
    out.insert(insert_at, Term::power_law(coefficient, power.clone()));
    Some(Term::sum(out))
}

fn fold_same_base_log_addends<N: Number>(terms: &TermList<N>, base: &N) -> Option<Term<N>> {
    let mut folded: Option<N> = None;
    let mut insert_at = 0;
    let mut out: TermList<N> = SmallVec::new();
    for t in terms {
        if let TermKind::Logarithm {
            base: b,
            coefficient,
        } = t.kind()
        {
            if b == base {
                folded = Some(match folded {
                    None => {
                        insert_at = out.len();
                        coefficient.clone()
                    }
                    Some(acc) => acc + coefficient.clone(),
                });
                continue;
            }
        }
        out.push(t.clone());
    }
    let coefficient = folded?;
    if terms.len() - out.len() < 2 {
        return None;
    }
    out.insert(insert_at, Term::logarithm(base.clone(), coefficient));
    Some(Term::sum(out))
}

fn splice_into_sum<N: Number>(
    terms: &TermList<N>,
    child: &Term<N>,
    elements: &TermList<N>,
) -> Term<N> {
    let mut out: TermList<N> = SmallVec::new();
    let mut spliced = false;
    for t in terms {
        if !spliced && t == child {
            out.extend(elements.iter().cloned());
            spliced = true;
        } else {
            out.push(t.clone());
        }
    }
    Term::sum(out)
}

fn fold_constant_factors<N: Number>(terms: &TermList<N>) -> Term<N> {
    let factor = terms
        .iter()
        .filter(|t| t.is_constant())
        .map(Term::constant)
        .reduce(|a, b| a * b)
        .expect("a constant factor triggered this rule");
    let mut rest: TermList<N> = terms.iter().filter(|t| !t.is_constant()).cloned().collect();
    if rest.is_empty() {
        return Term::constant_value(factor);
    }
    rest[0] = rest[0].multiply(&factor);
    Term::product(rest)
}

fn fold_power_law_factors<N: Number>(terms: &TermList<N>) -> Option<Term<N>> {
    let mut folded: Option<(N, N)> = None;
    let mut insert_at = 0;
    let mut matched = 0usize;
    let mut out: TermList<N> = SmallVec::new();
    for t in terms {
        if let TermKind::PowerLaw { coefficient, power } = t.kind() {
            matched += 1;
            folded = Some(match folded {
                None => {
                    insert_at = out.len();
                    (coefficient.clone(), power.clone())
                }
                Some((c, p)) => (c * coefficient.clone(), p + power.clone()),
            });
            continue;
        }
        out.push(t.clone());
    }
    if matched < 2 {
        return None;
    }
    let (coefficient, power) = folded.expect("at least two power laws matched");
    let law = Term::power_law(coefficient, power);
    if out.is_empty() {
        return Some(law);
    }
    out.insert(insert_at, law);
    Some(Term::product(out))
}

fn flatten_product<N: Number>(terms: &TermList<N>) -> Term<N> {
    let mut out: TermList<N> = SmallVec::new();
    for t in terms {
        match t.kind() {
            TermKind::Product(inner) => out.extend(inner.iter().cloned()),
            _ => out.push(t.clone()),
        }
    }
    Term::product(out)
}

/// Cancels structurally-equal factors shared between a product numerator and
/// a product denominator, by multiset count.
fn cancel_shared_factors<N: Number>(
    numerator: &Term<N>,
    denominator: &Term<N>,
) -> Option<Term<N>> {
    let (num_terms, den_terms) = match (numerator.kind(), denominator.kind()) {
        (TermKind::Product(a), TermKind::Product(b)) => (a, b),
        _ => return None,
    };
    let mut remaining_den: Vec<Term<N>> = den_terms.to_vec();
    let mut new_num: Vec<Term<N>> = Vec::new();
    for t in num_terms {
        if let Some(pos) = remaining_den.iter().position(|d| d == t) {
            remaining_den.remove(pos);
        } else {
            new_num.push(t.clone());
        }
    }
    if remaining_den.len() == den_terms.len() {
        return None;
    }
    let new_numerator = if new_num.is_empty() {
        Term::constant_value(numerator.coefficient().from_int(1))
    } else {
        Term::product(new_num)
    };
    Some(match remaining_den.len() {
        0 => new_numerator,
        1 => Term::quotient(new_numerator, remaining_den.remove(0)),
        _ => Term::quotient(new_numerator, Term::product(remaining_den)),
    })
}

/// Compacts a quotient with a quotient on either side into a single
/// quotient of products.
fn compact_quotient<N: Number>(numerator: &Term<N>, denominator: &Term<N>) -> Term<N> {
    match (numerator.kind(), denominator.kind()) {
        (
            TermKind::Quotient {
                numerator: n1,
                denominator: d1,
            },
            TermKind::Quotient {
                numerator: n2,
                denominator: d2,
            },
        ) => Term::quotient(simple_multiply(n1, d2), simple_multiply(d1, n2)),
        (
            TermKind::Quotient {
                numerator: n1,
                denominator: d1,
            },
            _,
        ) => Term::quotient(n1.clone(), simple_multiply(denominator, d1)),
        (
            _,
            TermKind::Quotient {
                numerator: n2,
                denominator: d2,
            },
        ) => Term::quotient(simple_multiply(numerator, d2), n2.clone()),
        _ => unreachable!("a quotient child triggered this rule"),
    }
}

/// Multiplies two terms, folding constants and flattening products instead
/// of always wrapping.
fn simple_multiply<N: Number>(a: &Term<N>, b: &Term<N>) -> Term<N> {
    match (a.is_constant(), b.is_constant()) {
        (true, true) => Term::constant_value(a.constant() * b.constant()),
        (true, false) => b.multiply(&a.constant()),
        (false, true) => a.multiply(&b.constant()),
        (false, false) => match (a.kind(), b.kind()) {
            (TermKind::Product(p1), TermKind::Product(p2)) => {
                Term::product(p1.iter().chain(p2.iter()).cloned())
            }
            (TermKind::Product(p), _) => {
                Term::product(p.iter().cloned().chain([b.clone()]))
            }
            (_, TermKind::Product(p)) => {
                Term::product([a.clone()].into_iter().chain(p.iter().cloned()))
            }
            _ => Term::product([a.clone(), b.clone()]),
        },
    }
}
