//! Simplification rules for fractions.
//!
//! The rules are tried in the order they appear in [`all`]. The cancellation rules rely on the
//! structural divider in [`fraction`](crate::symbolic::simplify::fraction).

use crate::symbolic::{
    expr::{Expr, ExprKind, Symbol},
    simplify::{
        dispatch::Ctxt,
        fraction::divide,
        rules::do_divide,
        step::{Rule, Step},
    },
};

/// `a/1 = a`
fn divide_by_one(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    if den.as_number() != Some(1) {
        return None;
    }

    let result = ctxt.ids.scale(num, expr.quantity)?;
    let step = Step::new(Rule::DivideByOne, &[den], &[&result]);
    Some((result, step))
}

/// `0/a = 0`
fn zero_numerator(expr: &Expr, num: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    if num.as_number() != Some(0) {
        return None;
    }

    let result = ctxt.ids.number(0);
    let step = Step::new(Rule::ZeroNumerator, &[expr], &[&result]);
    Some((result, step))
}

/// `(a/b)/c = (a/b) * (1/c)`
/// `a/(b/c) = (a/1) * (c/b)`
fn flatten_fraction(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let num_is_fraction = matches!(num.kind, ExprKind::Div(..));
    if !num_is_fraction && !matches!(den.kind, ExprKind::Div(..)) {
        return None;
    }

    let numerator = if num_is_fraction {
        num.clone()
    } else {
        ctxt.ids.div(1, num.clone(), ctxt.ids.number(1))
    };

    // the reciprocal of `q(c/e)` is `e/(qc)`
    let reciprocal = match &den.kind {
        ExprKind::Div(den_num, den_den) => ctxt.ids.div(
            1,
            *den_den.clone(),
            ctxt.ids.scale(den_num, den.quantity)?,
        ),
        _ => ctxt.ids.div(1, ctxt.ids.number(1), den.clone()),
    };

    let result = ctxt.ids.mul(expr.quantity, vec![numerator, reciprocal]);
    let step = Step::new(Rule::FlattenFraction, &[expr], &[&result]);
    Some((result, step))
}

/// `a/a = 1`
fn cancel_identical(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    if num.exact_hash() != den.exact_hash() {
        return None;
    }

    let result = ctxt.ids.number(expr.quantity);
    let step = Step::new(Rule::CancelIdentical, &[expr], &[&result]);
    Some((result, step))
}

/// `6a/3 = 2a`
/// `a^3/a = a^2`
///
/// The numerator is divided by the denominator, and the denominator is reduced by the part that
/// was taken out of the numerator.
fn cancel_divisor(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let quotient = divide(num, den, ctxt.ids)?;
    let reduced = divide(den, &quotient.divisor, ctxt.ids)?;

    let result = ctxt.ids.div(expr.quantity, quotient.remainder, reduced.remainder);
    let step = Step::new(Rule::CancelDivisor, &[expr], &[&result]);
    Some((result, step))
}

/// Returns true if `num / den` cancels directly, without splitting anything.
fn cancels(num: &Expr, den: &Expr, ctxt: &Ctxt) -> bool {
    let fraction = ctxt.ids.div(1, num.clone(), den.clone());
    zero_numerator(&fraction, num, ctxt)
        .or_else(|| flatten_fraction(&fraction, num, den, ctxt))
        .or_else(|| cancel_identical(&fraction, num, den, ctxt))
        .or_else(|| cancel_divisor(&fraction, num, den, ctxt))
        .is_some()
}

/// `(a + b)/c = a/c + b/c`, where `a/c` cancels
fn split_numerator(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let ExprKind::Add(terms) = &num.kind else {
        return None;
    };
    if terms.len() < 2 {
        return None;
    }

    let i = terms.iter().position(|term| cancels(term, den, ctxt))?;
    let mut rest = terms.clone();
    let split = rest.remove(i);

    let result = ctxt.ids.add(expr.quantity, vec![
        ctxt.ids.div(1, split, den.clone()),
        ctxt.ids.div(1, ctxt.ids.add(num.quantity, rest), den.clone()),
    ]);
    let step = Step::new(Rule::SplitNumerator, &[expr], &[&result]);
    Some((result, step))
}

/// `(6a + 4)/(2b) = (3a + 2)/b`
///
/// Tries each prime, then each declared symbol, as a factor of both the numerator and the
/// denominator.
fn cancel_common_factor(expr: &Expr, num: &Expr, den: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let by_prime = ctxt.primes.iter().find_map(|&prime| {
        let candidate = ctxt.ids.number(prime);
        Some((divide(num, &candidate, ctxt.ids)?, divide(den, &candidate, ctxt.ids)?))
    });

    let (num_quotient, den_quotient) = by_prime.or_else(|| {
        Symbol::DECLARED.into_iter().find_map(|symbol| {
            let candidate = ctxt.ids.primitive(1, symbol);
            let num_quotient = divide(num, &candidate, ctxt.ids)?;
            let den_quotient = divide(den, &candidate, ctxt.ids)?;
            (num_quotient.divisor.symbol() == den_quotient.divisor.symbol())
                .then_some((num_quotient, den_quotient))
        })
    })?;

    let result = ctxt.ids.div(expr.quantity, num_quotient.remainder, den_quotient.remainder);
    let step = Step::new(Rule::CancelCommonFactor, &[expr], &[&result]);
    Some((result, step))
}

/// Applies all division rules.
pub fn all(expr: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    do_divide(expr, |num, den| {
        divide_by_one(expr, num, den, ctxt)
            .or_else(|| zero_numerator(expr, num, ctxt))
            .or_else(|| flatten_fraction(expr, num, den, ctxt))
            .or_else(|| cancel_identical(expr, num, den, ctxt))
            .or_else(|| split_numerator(expr, num, den, ctxt))
            .or_else(|| cancel_divisor(expr, num, den, ctxt))
            .or_else(|| cancel_common_factor(expr, num, den, ctxt))
    })
}
