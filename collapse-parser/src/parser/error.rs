//! Error kinds produced while parsing the canonical text form.

use ariadne::Fmt;
use collapse_attrs::ErrorKind;
use collapse_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = format!("add a closing parenthesis `{}` somewhere after this", ")".fg(EXPR)),
)]
pub struct UnclosedParenthesis;

/// A group was written with nothing inside its parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A group used more than one kind of operator between its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "mixed operators in a single group",
    labels = [
        format!("this group combines its operands with `{}`", self.first.fg(EXPR)),
        format!("but this operator is `{}`", self.second.fg(EXPR)),
    ],
    help = "wrap the operands of each operator in their own group",
)]
pub struct MixedOperators {
    /// The operator the group started with.
    pub first: &'static str,

    /// The conflicting operator.
    pub second: &'static str,
}

/// An integer literal does not fit in a quantity.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "quantity is too large",
    labels = ["this number does not fit in a 64-bit signed integer"],
)]
pub struct IntegerOverflow;
