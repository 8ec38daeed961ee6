//! Tokenizer and parser for the canonical text form of collapse expressions.
//!
//! Every tree the simplifier renders can be read back with [`parser::Parser`]:
//!
//! ```
//! use collapse_parser::parser::{ast::Node, Parser};
//!
//! let node = Parser::new("1(2X + 3)").try_parse_full::<Node>().unwrap();
//! assert_eq!(node.quantity(), 1);
//! ```

pub mod parser;
pub mod tokenizer;
