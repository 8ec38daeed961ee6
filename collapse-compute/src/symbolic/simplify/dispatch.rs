//! A single top-level rewrite.
//!
//! [`rewrite_step`] applies at most one rule somewhere in the tree. For a composite node it tries,
//! in order:
//!
//! 1. distributing the node's quantity into its children (sums and fractions only),
//! 2. descending into the children, left to right, and rewriting the first child that changes.
//! Along the way, nested sums and products are flattened into their parent, and factors of a
//! product hand their quantity to the product.
//! 3. replacing a sum or product of one child with that child,
//! 4. the operator rules in [`rules`].
//!
//! Because descent comes before the operator rules, a node's own rules only run once every child
//! is in local normal form.
//!
//! The operator rules simply do not apply when a quantity they would compute does not fit in an
//! [`i64`]. The steps above cannot be skipped that way without leaving the tree half-normalized,
//! so they fail with [`Overflow`] instead.

use crate::symbolic::{
    expr::{Expr, ExprKind, NodeIds},
    step_collector::StepCollector,
};
use super::{rules, step::{Rule, Step}, DEFAULT_MAX_ITERATIONS};

/// The shared state of one simplification run.
#[derive(Debug, Clone, Copy)]
pub struct Ctxt<'a> {
    /// The generator of node identities.
    pub ids: &'a NodeIds,

    /// The primes tried as common factors of fractions, in order.
    pub primes: &'a [i64],

    /// The largest integer power that is expanded into a product of copies of its base.
    pub max_expansion: usize,
}

impl<'a> Ctxt<'a> {
    /// Creates a context with the given generator and primes, expanding powers up to the default
    /// iteration bound.
    pub fn new(ids: &'a NodeIds, primes: &'a [i64]) -> Self {
        Self {
            ids,
            primes,
            max_expansion: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A quantity produced by the dispatcher does not fit in an [`i64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// Applies a single rewrite to the expression. Returns `Ok(None)` if no rule applies anywhere in
/// it, in which case the expression is in normal form.
pub fn rewrite_step(
    expr: &Expr,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    if let ExprKind::Primitive(_) = expr.kind {
        return Ok(None);
    }

    if let Some(result) = distribute_quantity(expr, ctxt, step_collector)? {
        return Ok(Some(result));
    }
    if let Some(result) = descend(expr, ctxt, step_collector)? {
        return Ok(Some(result));
    }
    if let Some(result) = hoist_singleton(expr, ctxt, step_collector)? {
        return Ok(Some(result));
    }

    Ok(rules::all(expr, ctxt, step_collector))
}

/// `2(a + b) = 2a + 2b`
/// `2(a / b) = 2a / b`
fn distribute_quantity(
    expr: &Expr,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    if expr.quantity == 1 {
        return Ok(None);
    }

    let scale = |child: &Expr| ctxt.ids.scale(child, expr.quantity).ok_or(Overflow);
    let kind = match &expr.kind {
        ExprKind::Add(terms) => ExprKind::Add(
            terms.iter().map(scale).collect::<Result<_, _>>()?
        ),
        ExprKind::Div(num, den) => ExprKind::Div(Box::new(scale(num.as_ref())?), den.clone()),
        _ => return Ok(None),
    };

    let result = ctxt.ids.node(1, kind);
    step_collector.push(Step::new(Rule::DistributeQuantity, &[expr], &[&result]));
    Ok(Some(result))
}

/// Rewrites the first child that changes, cleaning up nested sums and products on the way.
fn descend(
    expr: &Expr,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    match &expr.kind {
        ExprKind::Primitive(_) => Ok(None),
        ExprKind::Add(terms) => descend_list(expr, terms, ExprKind::Add, ctxt, step_collector),
        ExprKind::Mul(factors) => descend_list(expr, factors, ExprKind::Mul, ctxt, step_collector),
        ExprKind::Div(lhs, rhs) => descend_pair(expr, lhs, rhs, ExprKind::Div, ctxt, step_collector),
        ExprKind::Exp(lhs, rhs) => descend_pair(expr, lhs, rhs, ExprKind::Exp, ctxt, step_collector),
    }
}

/// Descent into the two children of a fraction or power.
fn descend_pair(
    expr: &Expr,
    lhs: &Expr,
    rhs: &Expr,
    rebuild: fn(Box<Expr>, Box<Expr>) -> ExprKind,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    if let Some(lhs) = rewrite_step(lhs, ctxt, step_collector)? {
        return Ok(Some(expr.with_kind(rebuild(Box::new(lhs), Box::new(rhs.clone())))));
    }

    Ok(rewrite_step(rhs, ctxt, step_collector)?
        .map(|rhs| expr.with_kind(rebuild(Box::new(lhs.clone()), Box::new(rhs)))))
}

/// Descent into the children of a sum or product.
fn descend_list(
    expr: &Expr,
    children: &[Expr],
    rebuild: fn(Vec<Expr>) -> ExprKind,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    let is_product = matches!(expr.kind, ExprKind::Mul(_));

    for (i, child) in children.iter().enumerate() {
        if let Some(new_child) = rewrite_step(child, ctxt, step_collector)? {
            let mut new_children = children.to_vec();
            new_children[i] = new_child;
            return Ok(Some(expr.with_kind(rebuild(new_children))));
        }

        if std::mem::discriminant(&child.kind) == std::mem::discriminant(&expr.kind) {
            let spliced = flatten_child(child, is_product, ctxt)?;
            let mut new_children = children[..i].to_vec();
            new_children.extend(spliced.iter().cloned());
            new_children.extend(children[i + 1..].iter().cloned());

            let result = expr.with_kind(rebuild(new_children));
            step_collector.push(Step::new(
                Rule::Flatten,
                &[child],
                &spliced.iter().collect::<Vec<_>>(),
            ));
            return Ok(Some(result));
        }

        if is_product && child.quantity != 1 {
            let mut new_children = children.to_vec();
            new_children[i] = ctxt.ids.requantify(child, 1);

            let result = Expr {
                id: expr.id,
                quantity: expr.quantity.checked_mul(child.quantity).ok_or(Overflow)?,
                kind: rebuild(new_children),
            };
            step_collector.push(Step::new(Rule::ExtractQuantity, &[child], &[&result]));
            return Ok(Some(result));
        }
    }

    Ok(None)
}

/// Returns the children that replace a nested sum or product in its parent.
///
/// The nested product's quantity is multiplied into its first factor. An empty product is
/// replaced by its quantity, and an empty sum disappears.
fn flatten_child(child: &Expr, is_product: bool, ctxt: &Ctxt) -> Result<Vec<Expr>, Overflow> {
    let grandchildren = match &child.kind {
        ExprKind::Add(grandchildren) | ExprKind::Mul(grandchildren) => grandchildren,
        _ => return Ok(vec![child.clone()]),
    };

    if !is_product {
        // the quantity of a nested sum has already been distributed
        return Ok(grandchildren.clone());
    }

    match grandchildren.split_first() {
        Some((first, rest)) => {
            let mut spliced = vec![ctxt.ids.scale(first, child.quantity).ok_or(Overflow)?];
            spliced.extend(rest.iter().cloned());
            Ok(spliced)
        },
        None => Ok(vec![ctxt.ids.number(child.quantity)]),
    }
}

/// `2(a) = 2a`
fn hoist_singleton(
    expr: &Expr,
    ctxt: &Ctxt,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Overflow> {
    let children = match &expr.kind {
        ExprKind::Add(children) | ExprKind::Mul(children) => children,
        _ => return Ok(None),
    };

    let (result, rule) = match children.as_slice() {
        [child] => (
            ctxt.ids.scale(child, expr.quantity).ok_or(Overflow)?,
            Rule::HoistSingleton,
        ),
        [] if matches!(expr.kind, ExprKind::Add(_)) => (ctxt.ids.number(0), Rule::CollapseEmpty),
        [] => (ctxt.ids.number(expr.quantity), Rule::CollapseEmpty),
        _ => return Ok(None),
    };

    step_collector.push(Step::new(rule, &[expr], &[&result]));
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::{primes::PRIMES, symbolic::expr::Symbol};

    /// Applies a single rewrite to the given text, returning the rewritten text and the rule.
    fn step(input: &str) -> Option<(String, Rule)> {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let expr = Expr::parse(input, &ids).unwrap();

        let mut steps = Vec::new();
        let result = rewrite_step(&expr, &ctxt, &mut steps).unwrap()?;
        assert_eq!(steps.len(), 1);
        Some((result.to_string(), steps[0].rule))
    }

    #[test]
    fn primitives_never_change() {
        assert_eq!(step("5"), None);
        assert_eq!(step("-3X"), None);
    }

    #[test]
    fn distribute_sum_quantity() {
        assert_eq!(
            step("3(1X + 2)"),
            Some(("1(3X + 6)".to_string(), Rule::DistributeQuantity)),
        );
    }

    #[test]
    fn distribute_fraction_quantity() {
        assert_eq!(
            step("3(2X / 5)"),
            Some(("1(6X / 5)".to_string(), Rule::DistributeQuantity)),
        );
    }

    #[test]
    fn products_keep_their_quantity() {
        assert_eq!(step("3(1X * 1Y)"), None);
    }

    #[test]
    fn flatten_sum() {
        assert_eq!(
            step("1(1X + 1(1Y + 1A) + 1B)"),
            Some(("1(1X + 1Y + 1A + 1B)".to_string(), Rule::Flatten)),
        );
    }

    #[test]
    fn flatten_product_moves_quantity_to_first_factor() {
        assert_eq!(
            step("1(1X * 3(1Y * 1A))"),
            Some(("1(1X * 3Y * 1A)".to_string(), Rule::Flatten)),
        );
    }

    #[test]
    fn empty_product_child() {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let expr = ids.mul(1, vec![ids.primitive(1, Symbol::X), ids.mul(4, vec![])]);
        let result = rewrite_step(&expr, &ctxt, &mut ()).unwrap().unwrap();
        assert_eq!(result.to_string(), "1(1X * 4)");
    }

    #[test]
    fn empty_sum_child() {
        // the empty sum collapses on its own before the parent could flatten it
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let expr = ids.add(1, vec![ids.add(1, vec![]), ids.primitive(1, Symbol::X), ids.number(2)]);
        let result = rewrite_step(&expr, &ctxt, &mut ()).unwrap().unwrap();
        assert_eq!(result.to_string(), "1(0 + 1X + 2)");
    }

    #[test]
    fn extract_factor_quantity() {
        assert_eq!(
            step("1(1X * 3Y)"),
            Some(("3(1X * 1Y)".to_string(), Rule::ExtractQuantity)),
        );
    }

    #[test]
    fn child_rewrites_come_first() {
        // the sum inside the product changes before the product hands out quantities
        assert_eq!(
            step("1(2(1X + 1Y) * 3A)"),
            Some(("1(1(2X + 2Y) * 3A)".to_string(), Rule::DistributeQuantity)),
        );
    }

    #[test]
    fn hoist() {
        assert_eq!(step("4(1(3X))"), Some(("1(4(3X))".to_string(), Rule::DistributeQuantity)));
        assert_eq!(step("1(3X)"), Some(("3X".to_string(), Rule::HoistSingleton)));
        assert_eq!(step("2(5X * 1)"), Some(("10(1X * 1)".to_string(), Rule::ExtractQuantity)));
    }

    #[test]
    fn empty_groups() {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let sum = ids.add(1, vec![]);
        assert_eq!(rewrite_step(&sum, &ctxt, &mut ()).unwrap().unwrap().to_string(), "0");
        let product = ids.mul(7, vec![]);
        assert_eq!(rewrite_step(&product, &ctxt, &mut ()).unwrap().unwrap().to_string(), "7");
    }

    #[test]
    fn quantity_out_of_range() {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);

        // extracting 4 from the second factor needs 2^64
        let product = Expr::parse("4611686018427387904(1X * 4Y)", &ids).unwrap();
        assert_eq!(rewrite_step(&product, &ctxt, &mut ()), Err(Overflow));

        let sum = Expr::parse("2(4611686018427387904X + 1)", &ids).unwrap();
        assert_eq!(rewrite_step(&sum, &ctxt, &mut ()), Err(Overflow));

        // the failure of a nested node is not mistaken for a normal form
        let nested = Expr::parse("1(1Y + 1(1X ^ 2(4611686018427387904X)))", &ids).unwrap();
        assert_eq!(rewrite_step(&nested, &ctxt, &mut ()), Err(Overflow));
    }

    #[test]
    fn provenance_of_combined_terms() {
        let ids = NodeIds::new();
        let ctxt = Ctxt::new(&ids, &PRIMES);
        let x = ids.primitive(1, Symbol::X);
        let other_x = ids.primitive(2, Symbol::X);
        let (x_id, other_id) = (x.id, other_x.id);
        let expr = ids.add(1, vec![x, other_x]);

        let mut steps = Vec::new();
        let result = rewrite_step(&expr, &ctxt, &mut steps).unwrap().unwrap();
        assert_eq!(result.to_string(), "1(3X)");
        assert_eq!(steps[0].rule, Rule::CombineLikeTerms);
        assert_eq!(steps[0].before, vec![x_id, other_id]);

        let ExprKind::Add(terms) = &result.kind else {
            panic!("expected a sum");
        };
        assert_eq!(steps[0].after, vec![terms[0].id]);
    }
}
