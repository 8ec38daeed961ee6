//! Errors that can occur while building or simplifying expressions.

use ariadne::{Fmt, Report};
use collapse_attrs::ErrorKind;
use collapse_error::EXPR;
use std::ops::Range;
use super::expr::{Expr, Symbol};

/// Renders the declared symbols as a list.
fn declared_symbols() -> String {
    Symbol::DECLARED
        .iter()
        .map(|symbol| format!("{}", symbol.name().fg(EXPR)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A symbol name that is not part of the declared alphabet.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", self.name),
    labels = ["this symbol is not declared"],
    help = format!("the declared symbols are: {}", declared_symbols()),
)]
pub struct UnknownSymbol {
    /// The name that was used.
    pub name: String,
}

/// A fraction or power was written without exactly two operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` needs exactly 2 operands", self.op),
    labels = [format!("this group has {} operand(s)", self.found)],
)]
pub struct InvalidArity {
    /// The operator of the group.
    pub op: &'static str,

    /// The number of operands that were found.
    pub found: usize,
}

/// Simplification ran out of iterations before reaching a normal form or detecting a cycle.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("simplification did not terminate after {} rewrites", self.iterations),
    labels = ["while simplifying this expression"],
    help = format!("the last expression reached was {}", self.last.to_string().fg(EXPR)),
)]
pub struct NonTermination {
    /// The last tree reached before giving up.
    pub last: Expr,

    /// The number of rewrites that were applied.
    pub iterations: usize,
}

/// A rewrite produced a quantity that does not fit in a 64-bit integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a quantity grew too large to represent",
    labels = ["while simplifying this expression"],
    help = format!("the last expression reached was {}", self.last.to_string().fg(EXPR)),
)]
pub struct QuantityOverflow {
    /// The last tree reached before the failing rewrite.
    pub last: Expr,

    /// The number of rewrites that were applied.
    pub iterations: usize,
}

/// The ways a simplification run can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplifyError {
    /// The iteration bound was reached.
    NonTermination(NonTermination),

    /// A quantity overflowed.
    Overflow(QuantityOverflow),
}

impl SimplifyError {
    /// Returns the last tree reached before the run failed.
    pub fn last(&self) -> &Expr {
        match self {
            Self::NonTermination(err) => &err.last,
            Self::Overflow(err) => &err.last,
        }
    }

    /// Returns the number of rewrites that were applied before the run failed.
    pub fn iterations(&self) -> usize {
        match self {
            Self::NonTermination(err) => err.iterations,
            Self::Overflow(err) => err.iterations,
        }
    }
}

impl collapse_error::ErrorKind for SimplifyError {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        match self {
            Self::NonTermination(err) => collapse_error::ErrorKind::build_report(err, src_id, spans),
            Self::Overflow(err) => collapse_error::ErrorKind::build_report(err, src_id, spans),
        }
    }
}

impl From<NonTermination> for SimplifyError {
    fn from(err: NonTermination) -> Self {
        Self::NonTermination(err)
    }
}

impl From<QuantityOverflow> for SimplifyError {
    fn from(err: QuantityOverflow) -> Self {
        Self::Overflow(err)
    }
}
