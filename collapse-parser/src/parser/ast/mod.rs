//! Abstract syntax tree of the canonical text form.
//!
//! The grammar is small enough to describe in full:
//!
//! ```text
//! node  := INT NAME?
//!        | INT '(' node (op node)* ')'
//! op    := '+' | '*' | '/' | '^'
//! ```
//!
//! A quantity is always written directly in front of what it multiplies, so `2X` and `3(1 + X)`
//! are nodes but `2 X` is not. Every operator inside one pair of parentheses must be the same.

pub mod group;
pub mod node;
pub mod primitive;

pub use group::Group;
pub use node::Node;
pub use primitive::{LitSym, Primitive};
pub use crate::parser::token::op::OpKind;
