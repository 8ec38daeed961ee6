//! Canonical keys that decide which subtrees may be combined.
//!
//! Three keys are computed for every node:
//!
//! - the **exact** key distinguishes nodes by structure and by every quantity in them. Two nodes
//! with the same exact key render to the same text.
//! - the **add** key ignores the node's own quantity, so terms with equal add keys can be summed
//! by adding their quantities (`2X + 3X`). Powers are only addable when their base and exponent
//! are identical, and fractions only when their denominators are identical.
//! - the **mul** key identifies the symbolic base of a node, ignoring exponents, so factors with
//! equal mul keys can be combined into a single power (`X * X^2`).
//!
//! Children are delimited in the keys (`ADD(X,Y)`), so concatenating them is unambiguous.

use super::expr::{Expr, ExprKind};

/// Returns the tag of a composite node.
fn tag(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Primitive(_) => "PRIMITIVE",
        ExprKind::Add(_) => "ADD",
        ExprKind::Mul(_) => "MUL",
        ExprKind::Div(..) => "DIV",
        ExprKind::Exp(..) => "EXP",
    }
}

/// Joins the keys of each child with commas.
fn join(children: &[Expr], key: fn(&Expr) -> String) -> String {
    children.iter().map(key).collect::<Vec<_>>().join(",")
}

impl Expr {
    /// Returns the key that identifies this node exactly.
    pub fn exact_hash(&self) -> String {
        match &self.kind {
            ExprKind::Primitive(symbol) => format!("{}_{}", self.quantity, symbol.name()),
            ExprKind::Add(children) | ExprKind::Mul(children) => format!(
                "{}{}({})",
                self.quantity,
                tag(&self.kind),
                join(children, Expr::exact_hash),
            ),
            ExprKind::Div(lhs, rhs) | ExprKind::Exp(lhs, rhs) => format!(
                "{}{}({},{})",
                self.quantity,
                tag(&self.kind),
                lhs.exact_hash(),
                rhs.exact_hash(),
            ),
        }
    }

    /// Returns the key that identifies this node up to its own quantity.
    pub fn add_hash(&self) -> String {
        match &self.kind {
            ExprKind::Primitive(symbol) => symbol.name().to_string(),
            ExprKind::Add(children) | ExprKind::Mul(children) => {
                format!("{}({})", tag(&self.kind), join(children, Expr::add_hash))
            },
            ExprKind::Div(num, den) => format!("DIV({},{})", num.add_hash(), den.exact_hash()),
            ExprKind::Exp(base, exp) => format!("EXP({},{})", base.exact_hash(), exp.exact_hash()),
        }
    }

    /// Returns the key that identifies the symbolic base of this node.
    pub fn mul_hash(&self) -> String {
        match &self.kind {
            ExprKind::Primitive(symbol) => symbol.name().to_string(),
            ExprKind::Add(children) | ExprKind::Mul(children) => {
                format!("{}({})", tag(&self.kind), join(children, Expr::mul_hash))
            },
            ExprKind::Div(num, den) => format!("DIV({},{})", num.mul_hash(), den.mul_hash()),
            ExprKind::Exp(base, _) => base.mul_hash(),
        }
    }
}
