//! Structural division of one tree by another.
//!
//! [`divide`] decides whether a denominator divides evenly into a numerator by looking only at
//! the shape of the two trees. It never factors anything: `6X + 4` divides by `2` because every
//! term does, but `X^2 + 2X + 1` does not divide by `X + 1`.

use crate::symbolic::expr::{Expr, ExprKind, NodeIds, Symbol};

/// The result of a successful division.
#[derive(Debug, Clone, PartialEq)]
pub struct Quotient {
    /// What is left of the numerator once the divisor is taken out of it.
    pub remainder: Expr,

    /// The part of the denominator that was taken out of the numerator. Dividing the denominator
    /// by it reduces the denominator by the same amount.
    pub divisor: Expr,
}

/// Divides `n` by `d`, returning [`None`] if `d` does not evenly divide `n`.
pub fn divide(n: &Expr, d: &Expr, ids: &NodeIds) -> Option<Quotient> {
    if d.quantity == 0 {
        return None;
    }

    if d.quantity != 1 {
        let divides = n.quantity.checked_rem(d.quantity) == Some(0);
        if let (true, Some(quotient)) = (divides, n.quantity.checked_div(d.quantity)) {
            return Some(Quotient {
                remainder: ids.requantify(n, quotient),
                divisor: ids.number(d.quantity),
            });
        }
    }

    match (&n.kind, &d.kind) {
        (ExprKind::Primitive(n_symbol), ExprKind::Primitive(d_symbol)) => {
            if n_symbol == d_symbol && *n_symbol != Symbol::Number {
                Some(Quotient {
                    remainder: ids.number(n.quantity),
                    divisor: ids.primitive(1, *n_symbol),
                })
            } else {
                divide_power(n, d, ids)
            }
        },
        (ExprKind::Add(terms), _) => {
            // every term must divide, and the divisor of the last one is reported
            let mut remainders = Vec::with_capacity(terms.len());
            let mut divisor = None;
            for term in terms {
                let quotient = divide(term, d, ids)?;
                remainders.push(quotient.remainder);
                divisor = Some(quotient.divisor);
            }

            Some(Quotient {
                remainder: ids.add(n.quantity, remainders),
                divisor: divisor?,
            })
        },
        (ExprKind::Mul(factors), _) => {
            factors.iter()
                .enumerate()
                .find_map(|(i, factor)| Some((i, divide(factor, d, ids)?)))
                .map(|(i, quotient)| {
                    let mut new_factors = factors.clone();
                    new_factors[i] = quotient.remainder;
                    Quotient {
                        remainder: ids.mul(n.quantity, new_factors),
                        divisor: quotient.divisor,
                    }
                })
        },
        (ExprKind::Primitive(_) | ExprKind::Exp(..), _) => divide_power(n, d, ids),
        _ => None,
    }
}

/// Splits a node into its base and exponent. A node that is not a power is its own base, raised
/// to the power of 1.
///
/// Powers whose base carries a quantity other than 1 are not split, since `(2X)^2` is not a power
/// of `X`.
pub(crate) fn power_parts(expr: &Expr, ids: &NodeIds) -> Option<(Expr, Expr)> {
    match &expr.kind {
        ExprKind::Exp(base, exp) if base.quantity == 1 => Some((*base.clone(), *exp.clone())),
        ExprKind::Exp(..) => None,
        _ => Some((ids.requantify(expr, 1), ids.number(1))),
    }
}

/// `a^m / a^n = a^(m - n)`
///
/// The denominator's base is fully consumed, so the divisor is the denominator without its
/// quantity.
fn divide_power(n: &Expr, d: &Expr, ids: &NodeIds) -> Option<Quotient> {
    if n.is_number() || d.is_number() || n.mul_hash() != d.mul_hash() {
        return None;
    }

    let (base, n_exp) = power_parts(n, ids)?;
    let (_, d_exp) = power_parts(d, ids)?;

    let exponent = ids.add(1, vec![
        n_exp,
        ids.mul(1, vec![ids.number(-1), d_exp]),
    ]);

    Some(Quotient {
        remainder: ids.exp(n.quantity, base, exponent),
        divisor: ids.requantify(d, 1),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Divides the parsed numerator by the parsed denominator, rendering the result.
    fn div(n: &str, d: &str) -> Option<(String, String)> {
        let ids = NodeIds::new();
        let n = Expr::parse(n, &ids).unwrap();
        let d = Expr::parse(d, &ids).unwrap();
        divide(&n, &d, &ids).map(|q| (q.remainder.to_string(), q.divisor.to_string()))
    }

    fn some(remainder: &str, divisor: &str) -> Option<(String, String)> {
        Some((remainder.to_string(), divisor.to_string()))
    }

    #[test]
    fn quantity() {
        assert_eq!(div("6", "2"), some("3", "2"));
        assert_eq!(div("6X", "3Y"), some("2X", "3"));
        assert_eq!(div("1(1X + 1)", "-1"), some("-1(1X + 1)", "-1"));
        assert_eq!(div("3", "2"), None);
    }

    #[test]
    fn zero_divisor_is_never_a_quantity() {
        assert_eq!(div("0", "0"), None);
        assert_eq!(div("5X", "0X"), None);
    }

    #[test]
    fn same_symbol() {
        assert_eq!(div("3X", "1X"), some("3", "1X"));
        assert_eq!(div("3X", "1Y"), None);
        assert_eq!(div("3", "1X"), None);
    }

    #[test]
    fn every_term_of_a_sum() {
        assert_eq!(div("1(6X + 4)", "2"), some("1(3X + 2)", "2"));
        assert_eq!(div("1(6X + 3)", "2"), None);
        assert_eq!(div("1(2X + 1(1X ^ 2))", "1X"), some("1(2 + 1(1X ^ 1(2 + 1(-1 * 1))))", "1X"));
    }

    #[test]
    fn any_factor_of_a_product() {
        assert_eq!(div("1(1X * 1Y)", "1Y"), some("1(1X * 1)", "1Y"));
        assert_eq!(div("1(1X * 1Y)", "1A"), None);
    }

    #[test]
    fn powers() {
        assert_eq!(div("1(1X ^ 7)", "4X"), some("1(1X ^ 1(7 + 1(-1 * 1)))", "1X"));
        assert_eq!(div("2X", "1(1X ^ 2)"), some("2(1X ^ 1(1 + 1(-1 * 2)))", "1(1X ^ 2)"));

        // the base must not carry a quantity
        assert_eq!(div("1(2X ^ 2)", "1X"), None);

        // numbers only divide through their quantity
        assert_eq!(div("1(2 ^ 3)", "2"), None);
    }

    #[test]
    fn empty_sum() {
        let ids = NodeIds::new();
        let n = ids.add(1, vec![]);
        assert_eq!(divide(&n, &ids.primitive(1, Symbol::X), &ids), None);
    }
}
