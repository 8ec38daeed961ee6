use collapse_error::Error;
use crate::{
    parser::{
        error,
        token::{op::Op, CloseParen, Int, Name, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use super::{Group, LitSym, Primitive};
use std::{fmt, ops::Range};

/// Any node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Primitive(Primitive),
    Group(Group),
}

impl Node {
    /// Returns the span of the node.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Primitive(primitive) => primitive.span.clone(),
            Self::Group(group) => group.span.clone(),
        }
    }

    /// Returns the quantity written in front of the node.
    pub fn quantity(&self) -> i64 {
        match self {
            Self::Primitive(primitive) => primitive.quantity,
            Self::Group(group) => group.quantity,
        }
    }
}

/// Parses the inside of a group, after the quantity. The opening parenthesis is the next token.
fn parse_group(input: &mut Parser, quantity: i64, start: usize) -> Result<Group, Error> {
    let open_paren = OpenParen::parse_token(input)?;
    if input.peek_token().map(|token| token.kind) == Some(TokenKind::CloseParen) {
        let close_paren = CloseParen::parse_token(input)?;
        return Err(Error::new(
            vec![open_paren.span.start..close_paren.span.end],
            error::EmptyParenthesis,
        ));
    }

    let mut operands = vec![Node::parse(input)?];
    let mut first_op: Option<Op> = None;

    loop {
        let Some(token) = input.peek_token() else {
            return Err(Error::new(vec![open_paren.span], error::UnclosedParenthesis));
        };

        if token.kind == TokenKind::CloseParen {
            let close_paren = CloseParen::parse_token(input)?;
            return Ok(Group {
                quantity,
                op: first_op.map(|op| op.kind),
                operands,
                span: start..close_paren.span.end,
            });
        }

        let op = Op::parse(input)?;
        match &first_op {
            Some(first) if first.kind != op.kind => {
                return Err(Error::new(
                    vec![first.span.clone(), op.span.clone()],
                    error::MixedOperators {
                        first: first.kind.symbol(),
                        second: op.kind.symbol(),
                    },
                ));
            },
            Some(_) => {},
            None => first_op = Some(op),
        }

        operands.push(Node::parse(input)?);
    }
}

impl Parse for Node {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let int = Int::parse_token(input)?;
        let quantity = int.quantity()?;

        // the symbol or group must directly follow the quantity
        match input.current_token().map(|token| token.kind) {
            Some(TokenKind::Name) => {
                let name = Name::parse_token(input)?;
                Ok(Self::Primitive(Primitive {
                    quantity,
                    symbol: Some(LitSym {
                        name: name.lexeme.to_owned(),
                        span: name.span.clone(),
                    }),
                    span: int.span.start..name.span.end,
                }))
            },
            Some(TokenKind::OpenParen) => {
                Ok(Self::Group(parse_group(input, quantity, int.span.start)?))
            },
            _ => Ok(Self::Primitive(Primitive {
                quantity,
                symbol: None,
                span: int.span,
            })),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => primitive.fmt(f),
            Self::Group(group) => group.fmt(f),
        }
    }
}
