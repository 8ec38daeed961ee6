//! Operators that join the operands of a group.

use crate::tokenizer::TokenKind;
use std::{fmt, ops::Range};

/// The operation a group applies to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Mul,
    Div,
    Exp,
}

impl OpKind {
    /// The tokens that can be parsed as an operator.
    pub const TOKENS: &'static [TokenKind] = &[
        TokenKind::Add,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Exp,
    ];

    /// Returns the character used to write the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp => "^",
        }
    }

    /// Returns the number of operands the operator requires, or [`None`] if it accepts any
    /// number of operands.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Add | Self::Mul => None,
            Self::Div | Self::Exp => Some(2),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An operator between two operands of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    /// The kind of operator.
    pub kind: OpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}
