//! Simplification rules for power expressions.

use crate::symbolic::{
    expr::{Expr, ExprKind},
    simplify::{dispatch::Ctxt, rules::do_power, step::{Rule, Step}},
};

/// `a^(b^c) = a^(b*c)`
///
/// This does not follow from the usual power laws; it folds a power in the exponent into the
/// product of its base and exponent.
fn power_of_exponent(expr: &Expr, base: &Expr, exp: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let ExprKind::Exp(inner_base, inner_exp) = &exp.kind else {
        return None;
    };

    let product = ctxt.ids.mul(exp.quantity, vec![*inner_base.clone(), *inner_exp.clone()]);
    let step = Step::new(Rule::PowerOfExponent, &[exp], &[&product]);
    Some((expr.with_kind(ExprKind::Exp(Box::new(base.clone()), Box::new(product))), step))
}

/// `(a^b)^c = a^(b*c)`
fn power_of_power(expr: &Expr, base: &Expr, exp: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let ExprKind::Exp(inner_base, inner_exp) = &base.kind else {
        return None;
    };

    // `(2a^b)^c` is not a power of `a`
    if base.quantity != 1 {
        return None;
    }

    let power = ctxt.ids.exp(
        expr.quantity,
        *inner_base.clone(),
        ctxt.ids.mul(1, vec![*inner_exp.clone(), exp.clone()]),
    );
    let step = Step::new(Rule::PowerOfPower, &[expr], &[&power]);
    Some((power, step))
}

/// `a^0 = 1`
/// `a^-2 = 1/a^2`
/// `a^3 = a*a*a`
///
/// A symbol raised to a number greater than 1 is already as simple as it gets, so it is not
/// expanded. Neither is anything raised to more than [`Ctxt::max_expansion`].
fn integer_power(expr: &Expr, base: &Expr, exp: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let value = exp.as_number()?;

    let (result, rule) = if value == 0 {
        (ctxt.ids.number(expr.quantity), Rule::PowerZero)
    } else if value < 0 {
        let positive = ctxt.ids.exp(1, base.clone(), ctxt.ids.number(value.checked_neg()?));
        (ctxt.ids.div(expr.quantity, ctxt.ids.number(1), positive), Rule::NegativePower)
    } else if !base.is_symbolic_primitive() || value == 1 {
        let count = usize::try_from(value).ok().filter(|&count| count <= ctxt.max_expansion)?;
        let copies = (0..count).map(|_| ctxt.ids.copy(base)).collect();
        (ctxt.ids.mul(expr.quantity, copies), Rule::ExpandPower)
    } else {
        return None;
    };

    let step = Step::new(rule, &[expr], &[&result]);
    Some((result, step))
}

/// Returns the exact `n`th root of `value`, if it is an integer.
fn exact_root(value: i64, n: i64) -> Option<i64> {
    let power = u32::try_from(n).ok().filter(|&n| n > 0)?;
    if value < 0 && power % 2 == 0 {
        return None;
    }

    let magnitude = (value.unsigned_abs() as f64).powf(1.0 / power as f64).round() as i64;
    let root = if value < 0 { -magnitude } else { magnitude };
    (root.checked_pow(power)? == value).then_some(root)
}

/// `8^(1/3) = 2`
fn integer_root(expr: &Expr, base: &Expr, exp: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let ExprKind::Div(num, den) = &exp.kind else {
        return None;
    };
    if exp.quantity != 1 || num.as_number() != Some(1) {
        return None;
    }

    let root = exact_root(base.as_number()?, den.as_number()?)?;
    let result = ctxt.ids.number(expr.quantity.checked_mul(root)?);
    let step = Step::new(Rule::IntegerRoot, &[expr], &[&result]);
    Some((result, step))
}

/// Applies all power rules.
pub fn all(expr: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    do_power(expr, |base, exp| {
        power_of_exponent(expr, base, exp, ctxt)
            .or_else(|| power_of_power(expr, base, exp, ctxt))
            .or_else(|| integer_power(expr, base, exp, ctxt))
            .or_else(|| integer_root(expr, base, exp, ctxt))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::{primes::PRIMES, symbolic::expr::NodeIds};

    /// Applies the power rules once to the given text.
    fn apply(input: &str) -> Option<(String, Rule)> {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let expr = Expr::parse(input, &ids).unwrap();
        all(&expr, &ctxt).map(|(result, step)| (result.to_string(), step.rule))
    }

    #[test]
    fn exponent_of_exponent() {
        // folded literally, not by the power laws
        assert_eq!(
            apply("1(1X ^ 1(2Y ^ 3A))"),
            Some(("1(1X ^ 1(2Y * 3A))".to_string(), Rule::PowerOfExponent)),
        );
    }

    #[test]
    fn power_of_a_power() {
        assert_eq!(
            apply("3(1(1X ^ 2) ^ 1Y)"),
            Some(("3(1X ^ 1(2 * 1Y))".to_string(), Rule::PowerOfPower)),
        );
        assert_eq!(apply("1(2(1X ^ 2) ^ 1Y)"), None);
    }

    #[test]
    fn zero_power() {
        assert_eq!(apply("5(1(1X + 1) ^ 0)"), Some(("5".to_string(), Rule::PowerZero)));
    }

    #[test]
    fn negative_power() {
        assert_eq!(
            apply("2(1X ^ -3)"),
            Some(("2(1 / 1(1X ^ 3))".to_string(), Rule::NegativePower)),
        );
    }

    #[test]
    fn expand_power() {
        assert_eq!(
            apply("1(1(1X + 1) ^ 2)"),
            Some(("1(1(1X + 1) * 1(1X + 1))".to_string(), Rule::ExpandPower)),
        );
        assert_eq!(apply("2(3 ^ 2)"), Some(("2(3 * 3)".to_string(), Rule::ExpandPower)));
        assert_eq!(apply("1(4X ^ 1)"), Some(("1(4X)".to_string(), Rule::ExpandPower)));

        // symbols keep their powers
        assert_eq!(apply("1(1X ^ 2)"), None);
    }

    #[test]
    fn expansion_limit() {
        let ids = NodeIds::new();
        let ctxt = Ctxt { max_expansion: 4, ..Ctxt::new(&ids, &PRIMES) };
        let apply = |input: &str| {
            let expr = Expr::parse(input, &ids).unwrap();
            all(&expr, &ctxt).map(|(result, step)| (result.to_string(), step.rule))
        };

        assert_eq!(
            apply("1(2 ^ 4)"),
            Some(("1(2 * 2 * 2 * 2)".to_string(), Rule::ExpandPower)),
        );
        assert_eq!(apply("1(2 ^ 5)"), None);
        assert_eq!(apply("1(1(1X + 1) ^ 5)"), None);
    }

    #[test]
    fn negative_power_out_of_range() {
        assert_eq!(apply("1(1X ^ -9223372036854775808)"), None);
    }

    #[test]
    fn roots() {
        assert_eq!(apply("1(8 ^ 1(1 / 3))"), Some(("2".to_string(), Rule::IntegerRoot)));
        assert_eq!(apply("3(-27 ^ 1(1 / 3))"), Some(("-9".to_string(), Rule::IntegerRoot)));
        assert_eq!(apply("1(8 ^ 1(1 / 2))"), None);
        assert_eq!(apply("1(-4 ^ 1(1 / 2))"), None);
        assert_eq!(apply("1(8 ^ 2(1 / 3))"), None);
        assert_eq!(apply("4611686018427387904(8 ^ 1(1 / 3))"), None);
    }

    #[test]
    fn exact_roots() {
        assert_eq!(exact_root(1_000_000, 2), Some(1000));
        assert_eq!(exact_root(1_000_001, 2), None);
        assert_eq!(exact_root(0, 5), Some(0));
        assert_eq!(exact_root(1024, 10), Some(2));
        assert_eq!(exact_root(9, 0), None);
        assert_eq!(exact_root(9, -2), None);
    }
}
