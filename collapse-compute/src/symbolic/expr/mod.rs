//! The expression tree that the simplifier rewrites.
//!
//! Every node of the tree carries an integer **quantity**, a coefficient that multiplies the
//! whole node. A leaf is a [`Symbol`] scaled by its quantity (`3X`), or a plain number when the
//! symbol is [`Symbol::Number`] (`-4`). Composite nodes scale the sum, product, fraction or power
//! of their children, so `2(1X + 3)` is twice the sum of `X` and `3`.
//!
//! # Node identity
//!
//! Each node also carries a [`NodeId`]. Identities are handed out by a [`NodeIds`] generator, one
//! per simplification run, and are only used to report which nodes a rewrite consumed and
//! produced. They have no bearing on equality: the [`PartialEq`] implementation for [`Expr`]
//! compares quantities and structure, and ignores identities entirely.
//!
//! Cloning an [`Expr`] keeps its identities, which is what a rewrite wants when a subtree is
//! carried over unchanged. When a subtree is duplicated into genuinely new output, use
//! [`NodeIds::copy`] instead so that every node of the duplicate receives a fresh identity.
//!
//! # Canonical text form
//!
//! The [`Display`](fmt::Display) implementation renders the canonical text form:
//!
//! - a number renders as its quantity, such as `-4`;
//! - a symbol renders as its quantity directly followed by its name, such as `2X`;
//! - a composite node renders as `q(child op child ...)`, with the children joined by `" + "`,
//! `" * "`, `" / "` or `" ^ "`. The quantity is always written, even when it is 1.
//!
//! The text form can be read back with [`Expr::parse`].

mod iter;

use collapse_error::Error;
use collapse_parser::parser::{ast::{self, Node, OpKind}, Parser};
use iter::ExprIter;
use std::{cell::Cell, fmt};
use super::error::{InvalidArity, UnknownSymbol};

/// The identity of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A generator of monotonically increasing [`NodeId`]s, along with constructors for every kind
/// of node.
///
/// A generator is meant to be scoped to one simplification run. It is not [`Sync`], so
/// independent runs on different threads each use their own generator.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: Cell<u64>,
}

impl NodeIds {
    /// Creates a new generator, starting at identity 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identity.
    pub fn fresh(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    /// Creates a node with a fresh identity.
    pub fn node(&self, quantity: i64, kind: ExprKind) -> Expr {
        Expr {
            id: self.fresh(),
            quantity,
            kind,
        }
    }

    /// Creates a plain number.
    pub fn number(&self, value: i64) -> Expr {
        self.primitive(value, Symbol::Number)
    }

    /// Creates a leaf: `quantity` times `symbol`.
    pub fn primitive(&self, quantity: i64, symbol: Symbol) -> Expr {
        self.node(quantity, ExprKind::Primitive(symbol))
    }

    /// Creates a scaled sum.
    pub fn add(&self, quantity: i64, terms: Vec<Expr>) -> Expr {
        self.node(quantity, ExprKind::Add(terms))
    }

    /// Creates a scaled product.
    pub fn mul(&self, quantity: i64, factors: Vec<Expr>) -> Expr {
        self.node(quantity, ExprKind::Mul(factors))
    }

    /// Creates a scaled fraction.
    pub fn div(&self, quantity: i64, numerator: Expr, denominator: Expr) -> Expr {
        self.node(quantity, ExprKind::Div(Box::new(numerator), Box::new(denominator)))
    }

    /// Creates a scaled power.
    pub fn exp(&self, quantity: i64, base: Expr, exponent: Expr) -> Expr {
        self.node(quantity, ExprKind::Exp(Box::new(base), Box::new(exponent)))
    }

    /// Duplicates the given tree, giving every node of the duplicate a fresh identity.
    pub fn copy(&self, expr: &Expr) -> Expr {
        let kind = match &expr.kind {
            ExprKind::Primitive(symbol) => ExprKind::Primitive(*symbol),
            ExprKind::Add(terms) => ExprKind::Add(terms.iter().map(|term| self.copy(term)).collect()),
            ExprKind::Mul(factors) => ExprKind::Mul(factors.iter().map(|factor| self.copy(factor)).collect()),
            ExprKind::Div(num, den) => ExprKind::Div(Box::new(self.copy(num)), Box::new(self.copy(den))),
            ExprKind::Exp(base, exp) => ExprKind::Exp(Box::new(self.copy(base)), Box::new(self.copy(exp))),
        };
        self.node(expr.quantity, kind)
    }

    /// Returns the given node with a different quantity. The node receives a fresh identity,
    /// while its children keep theirs.
    pub fn requantify(&self, expr: &Expr, quantity: i64) -> Expr {
        self.node(quantity, expr.kind.clone())
    }

    /// Returns the given node with its quantity multiplied by `factor`. The node is returned
    /// as-is if `factor` is 1.
    ///
    /// Returns [`None`] if the new quantity does not fit in an [`i64`].
    pub fn scale(&self, expr: &Expr, factor: i64) -> Option<Expr> {
        if factor == 1 {
            Some(expr.clone())
        } else {
            Some(self.requantify(expr, expr.quantity.checked_mul(factor)?))
        }
    }
}

/// The alphabet of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The leaf is a plain number, equal to its quantity.
    Number,
    A,
    B,
    X,
    Y,
}

impl Symbol {
    /// The declared symbols, in the order they are tried as common factors.
    pub const DECLARED: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::X, Symbol::Y];

    /// Returns the name of the symbol.
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
        }
    }

    /// Finds the declared symbol with the given name. [`Symbol::Number`] has no written name and
    /// cannot be found this way.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::DECLARED.into_iter().find(|symbol| symbol.name() == name)
    }
}

/// The shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A leaf.
    Primitive(Symbol),

    /// A sum of terms.
    Add(Vec<Expr>),

    /// A product of factors.
    Mul(Vec<Expr>),

    /// A numerator over a denominator.
    Div(Box<Expr>, Box<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),
}

impl ExprKind {
    /// Returns the operator joining the children of a composite node.
    pub fn op(&self) -> Option<OpKind> {
        match self {
            Self::Primitive(_) => None,
            Self::Add(_) => Some(OpKind::Add),
            Self::Mul(_) => Some(OpKind::Mul),
            Self::Div(..) => Some(OpKind::Div),
            Self::Exp(..) => Some(OpKind::Exp),
        }
    }
}

/// A single node of an expression tree. See the [module-level documentation](self) for details.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The identity of this node.
    pub id: NodeId,

    /// The coefficient multiplying this node.
    pub quantity: i64,

    /// The shape of this node.
    pub kind: ExprKind,
}

impl Expr {
    /// Parses the canonical text form into a tree, giving every node a fresh identity.
    pub fn parse(input: &str, ids: &NodeIds) -> Result<Self, Error> {
        let node = Parser::new(input).try_parse_full::<Node>()?;
        Self::from_ast(&node, ids)
    }

    /// Builds a tree from a parsed node, giving every node a fresh identity.
    ///
    /// A group with a single operand and no operator becomes a one-term sum. Fractions and
    /// powers must have exactly two operands.
    pub fn from_ast(node: &Node, ids: &NodeIds) -> Result<Self, Error> {
        match node {
            Node::Primitive(primitive) => {
                let symbol = match &primitive.symbol {
                    Some(lit) => Symbol::from_name(&lit.name).ok_or_else(|| {
                        Error::new(vec![lit.span.clone()], UnknownSymbol { name: lit.name.clone() })
                    })?,
                    None => Symbol::Number,
                };
                Ok(ids.primitive(primitive.quantity, symbol))
            },
            Node::Group(group) => Self::from_group(group, ids),
        }
    }

    fn from_group(group: &ast::Group, ids: &NodeIds) -> Result<Self, Error> {
        let operands = group.operands.iter()
            .map(|operand| Self::from_ast(operand, ids))
            .collect::<Result<Vec<_>, _>>()?;

        let op = group.op.unwrap_or(OpKind::Add);
        match op {
            OpKind::Add => Ok(ids.add(group.quantity, operands)),
            OpKind::Mul => Ok(ids.mul(group.quantity, operands)),
            OpKind::Div | OpKind::Exp => {
                let found = operands.len();
                let [lhs, rhs]: [Expr; 2] = operands.try_into().map_err(|_| {
                    Error::new(vec![group.span.clone()], InvalidArity { op: op.symbol(), found })
                })?;

                if op == OpKind::Div {
                    Ok(ids.div(group.quantity, lhs, rhs))
                } else {
                    Ok(ids.exp(group.quantity, lhs, rhs))
                }
            },
        }
    }

    /// Returns this node with the same identity and quantity, but a different shape.
    pub fn with_kind(&self, kind: ExprKind) -> Self {
        Self {
            id: self.id,
            quantity: self.quantity,
            kind,
        }
    }

    /// Returns the symbol of a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            ExprKind::Primitive(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns true if the node is a plain number.
    pub fn is_number(&self) -> bool {
        self.symbol() == Some(Symbol::Number)
    }

    /// Returns the value of a plain number.
    pub fn as_number(&self) -> Option<i64> {
        self.is_number().then_some(self.quantity)
    }

    /// Returns true if the node is a leaf with a declared symbol, such as `3X`.
    pub fn is_symbolic_primitive(&self) -> bool {
        matches!(self.symbol(), Some(symbol) if symbol != Symbol::Number)
    }

    /// Returns the children of the node, in order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Primitive(_) => Vec::new(),
            ExprKind::Add(children) | ExprKind::Mul(children) => children.iter().collect(),
            ExprKind::Div(lhs, rhs) | ExprKind::Exp(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
        }
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e.
    /// depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the identities of every node in the tree, in post-order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.post_order_iter().map(|expr| expr.id).collect()
    }
}

/// Structural equality: quantities and shapes must match, identities are ignored.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.quantity == other.quantity && self.kind == other.kind
    }
}

/// Writes a single node in canonical form, using `fmt_child` to write each of its children.
pub(crate) fn fmt_node(
    expr: &Expr,
    f: &mut fmt::Formatter<'_>,
    fmt_child: &dyn Fn(&Expr, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    match expr.kind {
        ExprKind::Primitive(Symbol::Number) => write!(f, "{}", expr.quantity),
        ExprKind::Primitive(symbol) => write!(f, "{}{}", expr.quantity, symbol.name()),
        ref kind => {
            let op = kind.op().map(OpKind::symbol).unwrap_or_default();
            write!(f, "{}(", expr.quantity)?;
            for (i, child) in expr.children().into_iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                fmt_child(child, f)?;
            }
            write!(f, ")")
        },
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(self, f, &|child, f| fmt::Display::fmt(child, f))
    }
}
