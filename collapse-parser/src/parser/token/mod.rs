pub mod op;

use collapse_error::Error;
use crate::{
    parser::{error, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a unit struct for each token kind, as well as a simple [`Parse`] implementation for
/// each token kind. This lets the parser request a specific token as a type.
macro_rules! token_kinds {
    ($($name:ident)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name<'source> {
                pub lexeme: &'source str,
                pub span: Range<usize>,
            }

            impl<'source> $name<'source> {
                /// Parses this token, borrowing its lexeme from the source.
                pub fn parse_token(input: &mut Parser<'source>) -> Result<Self, Error> {
                    let token = input.next_token()?;

                    if token.kind == TokenKind::$name {
                        Ok(Self {
                            lexeme: token.lexeme,
                            span: token.span,
                        })
                    } else {
                        Err(Error::new(vec![token.span], error::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }))
                    }
                }
            }
        )*
    };
}

token_kinds!(
    OpenParen
    CloseParen
    Int
    Name
);

impl Int<'_> {
    /// Parses the lexeme as a quantity.
    pub fn quantity(&self) -> Result<i64, Error> {
        self.lexeme
            .parse()
            .map_err(|_| Error::new(vec![self.span.clone()], error::IntegerOverflow))
    }
}

/// Parses an operator token into an [`op::Op`].
impl Parse for op::Op {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Add => op::OpKind::Add,
            TokenKind::Mul => op::OpKind::Mul,
            TokenKind::Div => op::OpKind::Div,
            TokenKind::Exp => op::OpKind::Exp,
            found => return Err(Error::new(vec![token.span], error::UnexpectedToken {
                expected: op::OpKind::TOKENS,
                found,
            })),
        };

        Ok(Self { kind, span: token.span })
    }
}
