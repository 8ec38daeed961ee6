//! Simplification rules for expressions involving multiplication, including combining like
//! factors.
//!
//! The factors are scanned in ordered pairs `(lhs, rhs)`, so every rule sees both orders of the
//! same two factors. For each pair, the rules are tried in the order they appear in [`all`].

use crate::symbolic::{
    expr::{Expr, ExprKind},
    simplify::{
        dispatch::Ctxt,
        fraction::power_parts,
        rules::{do_multiply, replace_pair},
        step::{Rule, Step},
    },
};

/// Rebuilds the product, with `lhs` replaced by `new` and `rhs` removed.
fn replace(expr: &Expr, factors: &[Expr], i: usize, j: usize, new: Expr) -> Expr {
    expr.with_kind(ExprKind::Mul(replace_pair(factors, i, j, new)))
}

/// `2a * 3b = 6a * b`
fn merge_quantities(expr: &Expr, factors: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&factors[i], &factors[j]);
    if lhs.quantity == 1 || rhs.quantity == 1 {
        return None;
    }

    let new_lhs = ctxt.ids.requantify(lhs, lhs.quantity.checked_mul(rhs.quantity)?);
    let new_rhs = ctxt.ids.requantify(rhs, 1);
    let step = Step::new(Rule::MergeQuantities, &[lhs, rhs], &[&new_lhs, &new_rhs]);

    let mut new_factors = factors.to_vec();
    new_factors[i] = new_lhs;
    new_factors[j] = new_rhs;
    Some((expr.with_kind(ExprKind::Mul(new_factors)), step))
}

/// `2(a * 3) = 6a`
fn fold_number(expr: &Expr, factors: &[Expr], j: usize) -> Option<(Expr, Step)> {
    let rhs = &factors[j];
    let value = rhs.as_number()?;

    let mut new_factors = factors.to_vec();
    new_factors.remove(j);
    let result = Expr {
        id: expr.id,
        quantity: expr.quantity.checked_mul(value)?,
        kind: ExprKind::Mul(new_factors),
    };
    let step = Step::new(Rule::FoldNumber, &[rhs], &[]);
    Some((result, step))
}

/// `(a/b) * (c/d) = (a*c)/(b*d)`
/// `a * (b/c) = (a*b)/c`
fn multiply_fractions(expr: &Expr, factors: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&factors[i], &factors[j]);
    let ExprKind::Div(rhs_num, rhs_den) = &rhs.kind else {
        return None;
    };

    let (product, rule) = match &lhs.kind {
        ExprKind::Div(lhs_num, lhs_den) => (
            ctxt.ids.div(
                lhs.quantity.checked_mul(rhs.quantity)?,
                ctxt.ids.mul(1, vec![*lhs_num.clone(), *rhs_num.clone()]),
                ctxt.ids.mul(1, vec![*lhs_den.clone(), *rhs_den.clone()]),
            ),
            Rule::MultiplyFractions,
        ),
        _ => (
            ctxt.ids.div(
                rhs.quantity,
                ctxt.ids.mul(1, vec![lhs.clone(), *rhs_num.clone()]),
                *rhs_den.clone(),
            ),
            Rule::MultiplyIntoFraction,
        ),
    };

    let step = Step::new(rule, &[lhs, rhs], &[&product]);
    Some((replace(expr, factors, i, j, product), step))
}

/// `(a + b) * c = a*c + b*c`
fn distribute(expr: &Expr, factors: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&factors[i], &factors[j]);
    let ExprKind::Add(terms) = &lhs.kind else {
        return None;
    };

    let distributed = ctxt.ids.add(
        lhs.quantity,
        terms.iter()
            .map(|term| ctxt.ids.mul(1, vec![term.clone(), ctxt.ids.copy(rhs)]))
            .collect(),
    );

    let step = Step::new(Rule::Distribute, &[lhs, rhs], &[&distributed]);
    Some((replace(expr, factors, i, j, distributed), step))
}

/// Combines like factors into a single power.
///
/// `a * a = a^(1+1)`
/// `a^b * a^c = a^(b+c)`
fn combine_like_factors(expr: &Expr, factors: &[Expr], i: usize, j: usize, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    let (lhs, rhs) = (&factors[i], &factors[j]);
    if lhs.is_number() || rhs.is_number() || lhs.mul_hash() != rhs.mul_hash() {
        return None;
    }

    let (base, lhs_exp) = power_parts(lhs, ctxt.ids)?;
    let (_, rhs_exp) = power_parts(rhs, ctxt.ids)?;
    let power = ctxt.ids.exp(
        lhs.quantity.checked_mul(rhs.quantity)?,
        base,
        ctxt.ids.add(1, vec![lhs_exp, rhs_exp]),
    );

    let step = Step::new(Rule::CombineLikeFactors, &[lhs, rhs], &[&power]);
    Some((replace(expr, factors, i, j, power), step))
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, ctxt: &Ctxt) -> Option<(Expr, Step)> {
    do_multiply(expr, |factors| {
        for i in 0..factors.len() {
            for j in (0..factors.len()).filter(|&j| j != i) {
                let found = merge_quantities(expr, factors, i, j, ctxt)
                    .or_else(|| fold_number(expr, factors, j))
                    .or_else(|| multiply_fractions(expr, factors, i, j, ctxt))
                    .or_else(|| distribute(expr, factors, i, j, ctxt))
                    .or_else(|| combine_like_factors(expr, factors, i, j, ctxt));
                if found.is_some() {
                    return found;
                }
            }
        }

        None
    })
}
