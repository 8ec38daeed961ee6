//! Term rewriting of algebraic expressions.
//!
//! # Expression representation
//!
//! Every node of an [`Expr`] tree carries an integer **quantity** that scales it. A primitive is a
//! quantity attached to a symbol (`3X`) or to nothing at all (`7`, a plain number). Composite
//! nodes combine their children with one of four operators, `+`, `*`, `/`, and `^`, and scale the
//! result by their own quantity, so `2(1X + 3)` is `2 * (X + 3)`.
//!
//! The text form accepted by [`Expr::parse`] is exactly the form produced by [`Expr`]'s
//! [`Display`](std::fmt::Display) implementation, so any rendered tree can be parsed back.
//!
//! Every node also has an identity, a [`NodeId`](expr::NodeId) handed out by a [`NodeIds`]
//! generator. Identities play no part in equality or hashing; they only exist so that the
//! [`Step`](simplify::Step)s of a run can point at the nodes a rule consumed and produced, which
//! [`highlight`] uses to mark them when rendering.
//!
//! ```
//! use collapse_compute::symbolic::{Expr, NodeIds};
//!
//! let ids = NodeIds::new();
//! let expr = Expr::parse("1(1X + 1(2Y * 3))", &ids).unwrap();
//! assert_eq!(expr.to_string(), "1(1X + 1(2Y * 3))");
//! assert_eq!(expr.quantity, 1);
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] rewrites a tree one rule at a time until nothing applies. The rules cover
//! combining like terms and factors, distributing products over sums, expanding integer powers,
//! and cancelling fractions. Fractions are cancelled structurally; nothing is ever factored, so
//! `(X^2 + 2X + 1) / (X + 1)` stays as it is.
//!
//! The rules are applied from the leaves up, and the result is rendered in a fixed order, so the
//! same input always produces the same text.
//!
//! ```
//! use collapse_compute::symbolic::{simplify, Expr, NodeIds};
//!
//! let ids = NodeIds::new();
//! let expr = Expr::parse("1(1X + 1X + 1X)", &ids).unwrap();
//! let simplified = simplify(&expr, &ids).unwrap();
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified.expr.to_string(), "3X");
//! ```
//!
//! For more information, see the [`mod@simplify`] module.

pub mod error;
pub mod expr;
pub mod hash;
pub mod highlight;
pub mod simplify;
pub mod step_collector;

pub use expr::{Expr, NodeIds};
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
