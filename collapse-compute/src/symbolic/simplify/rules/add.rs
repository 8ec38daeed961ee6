//! Simplification rules for expressions involving addition, including combining like terms.
//!
//! The terms are scanned in pairs: for each term, the term itself is checked first, then it is
//! paired with every term after it. The first match wins.

use crate::symbolic::{
    expr::{Expr, ExprKind},
    simplify::{dispatch::Ctxt, rules::{do_add, replace_pair}, step::{Rule, Step}},
};

/// `a + 0b = a`
fn remove_zero(expr: &Expr, terms: &[Expr], i: usize) -> Option<(Expr, Step)> {
    let term = &terms[i];
    if term.quantity != 0 {
        return None;
    }

    let mut new_terms = terms.to_vec();
    new_terms.remove(i);
    Some((
        expr.with_kind(ExprKind::Add(new_terms)),
        Step::new(Rule::RemoveZero, &[term], &[]),
    ))
}

/// `a/c + b/c = (a + b)/c`
fn add_fractions(expr: &Expr, terms: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&terms[i], &terms[j]);
    let (ExprKind::Div(lhs_num, lhs_den), ExprKind::Div(rhs_num, rhs_den)) = (&lhs.kind, &rhs.kind) else {
        return None;
    };
    if lhs_den.exact_hash() != rhs_den.exact_hash() {
        return None;
    }

    let numerator = ctxt.ids.add(1, vec![
        ctxt.ids.scale(lhs_num, lhs.quantity)?,
        ctxt.ids.scale(rhs_num, rhs.quantity)?,
    ]);
    let sum = ctxt.ids.div(1, numerator, *lhs_den.clone());
    let step = Step::new(Rule::AddFractions, &[lhs, rhs], &[&sum]);
    Some((expr.with_kind(ExprKind::Add(replace_pair(terms, i, j, sum))), step))
}

/// Combines like terms.
///
/// `a + a = 2a`
/// `2a + 3a = 5a`
/// `2 + 3 = 5`
///
/// Terms whose sum does not fit in a quantity are left apart.
fn combine_like_terms(expr: &Expr, terms: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&terms[i], &terms[j]);
    if lhs.add_hash() != rhs.add_hash() {
        return None;
    }

    let sum = ctxt.ids.requantify(lhs, lhs.quantity.checked_add(rhs.quantity)?);
    let step = Step::new(Rule::CombineLikeTerms, &[lhs, rhs], &[&sum]);
    Some((expr.with_kind(ExprKind::Add(replace_pair(terms, i, j, sum))), step))
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    do_add(expr, |terms| {
        for i in 0..terms.len() {
            if let Some(found) = remove_zero(expr, terms, i) {
                return Some(found);
            }

            for j in i + 1..terms.len() {
                let found = add_fractions(expr, terms, i, j, ctxt)
                    .or_else(|| combine_like_terms(expr, terms, i, j, ctxt));
                if found.is_some() {
                    return found;
                }
            }
        }

        None
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::{primes::PRIMES, symbolic::expr::NodeIds};

    /// Applies the addition rules once to the given text.
    fn apply(input: &str) -> Option<(String, Rule)> {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let expr = Expr::parse(input, &ids).unwrap();
        all(&expr, &ctxt).map(|(result, step)| (result.to_string(), step.rule))
    }

    #[test]
    fn zero_terms() {
        assert_eq!(apply("1(1X + 0Y + 2)"), Some(("1(1X + 2)".to_string(), Rule::RemoveZero)));
        assert_eq!(apply("1(1X + 0(1A * 1B))"), Some(("1(1X)".to_string(), Rule::RemoveZero)));
    }

    #[test]
    fn like_terms() {
        assert_eq!(apply("1(2 + 3)"), Some(("1(5)".to_string(), Rule::CombineLikeTerms)));
        assert_eq!(apply("1(1X + 1Y + 2X)"), Some(("1(3X + 1Y)".to_string(), Rule::CombineLikeTerms)));
        assert_eq!(
            apply("1(1(1X ^ 2) + 2(1X ^ 2))"),
            Some(("1(3(1X ^ 2))".to_string(), Rule::CombineLikeTerms)),
        );
    }

    #[test]
    fn unlike_terms() {
        assert_eq!(apply("1(1X + 1Y)"), None);
        assert_eq!(apply("1(1(1X ^ 2) + 1(1X ^ 3))"), None);
        assert_eq!(apply("1(1(1X ^ 2) + 1(2X ^ 2))"), None);
    }

    #[test]
    fn sum_out_of_range() {
        assert_eq!(apply("1(9223372036854775807X + 1X)"), None);
        assert_eq!(apply("1(-9223372036854775807 + -2)"), None);
    }

    #[test]
    fn fractions_with_equal_denominators() {
        assert_eq!(
            apply("1(1(1 / 3) + 1(2 / 3))"),
            Some(("1(1(1(1 + 2) / 3))".to_string(), Rule::AddFractions)),
        );
        assert_eq!(apply("1(1(1 / 3) + 1(2 / 5))"), None);
    }

    #[test]
    fn earlier_pairs_come_first() {
        // the pair (0, 2) is found before the zero at index 1 is checked
        assert_eq!(apply("1(1X + 0 + 1X)"), Some(("1(2X + 0)".to_string(), Rule::CombineLikeTerms)));
    }
}
