//! The rewrite engine of `collapse`.
//!
//! Expressions are trees of integer-scaled sums, products, fractions and powers over a small
//! alphabet of symbols. The engine applies one local rewrite at a time until no rule applies or
//! the sequence of rewrites starts repeating itself. See the [`symbolic`] module for the details.

pub mod primes;
pub mod symbolic;

pub use symbolic::{simplify, simplify_with, simplify_with_steps, Expr, NodeIds};
