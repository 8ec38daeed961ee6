//! Implementation of the operator rules.
//!
//! Each rule in this module looks at a single node whose children are already in local normal
//! form, and returns `Some(expr)` with the rewritten node if the rule applies, or `None` if the
//! rule does not apply. The rules for one kind of node are tried in a fixed order, and the first
//! one that applies wins.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod power;

use crate::symbolic::{expr::{Expr, ExprKind}, step_collector::StepCollector};
use super::{dispatch::Ctxt, step::Step};

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some((expr, step))` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(
    expr: &Expr,
    f: impl FnOnce(&[Expr]) -> Option<(Expr, Step)>,
) -> Option<(Expr, Step)> {
    if let ExprKind::Add(terms) = &expr.kind {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some((expr, step))` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(
    expr: &Expr,
    f: impl FnOnce(&[Expr]) -> Option<(Expr, Step)>,
) -> Option<(Expr, Step)> {
    if let ExprKind::Mul(factors) = &expr.kind {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent of the power.
///
/// Returns `Some((expr, step))` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(
    expr: &Expr,
    f: impl FnOnce(&Expr, &Expr) -> Option<(Expr, Step)>,
) -> Option<(Expr, Step)> {
    if let ExprKind::Exp(base, exp) = &expr.kind {
        f(base, exp)
    } else {
        None
    }
}

/// If the expression is a division expression, calls the given transformation function with the
/// numerator and denominator.
///
/// Returns `Some((expr, step))` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(
    expr: &Expr,
    f: impl FnOnce(&Expr, &Expr) -> Option<(Expr, Step)>,
) -> Option<(Expr, Step)> {
    if let ExprKind::Div(num, den) = &expr.kind {
        f(num, den)
    } else {
        None
    }
}

/// Replaces the child at index `i` with `new`, and removes the child at index `j`.
pub(crate) fn replace_pair(children: &[Expr], i: usize, j: usize, new: Expr) -> Vec<Expr> {
    let mut new_children = children.to_vec();
    new_children[i] = new;
    new_children.remove(j);
    new_children
}

/// Applies the rules for the kind of the given node.
pub fn all(expr: &Expr, ctxt: &Ctxt, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (result, step) = add::all(expr, ctxt)
        .or_else(|| multiply::all(expr, ctxt))
        .or_else(|| power::all(expr, ctxt))
        .or_else(|| divide::all(expr, ctxt))?;

    // keep the step collection logic outside of the rules so that a rule can be tried without
    // reporting anything
    step_collector.push(step);
    Some(result)
}
