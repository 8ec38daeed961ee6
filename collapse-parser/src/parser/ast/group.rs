use super::{node::Node, OpKind};
use std::{fmt, ops::Range};

/// A parenthesized list of operands joined by a single kind of operator, multiplied by a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The integer written in front of the opening parenthesis.
    pub quantity: i64,

    /// The operator joining the operands. This is [`None`] if the group has only one operand.
    pub op: Option<OpKind>,

    /// The operands inside the parentheses, in order.
    pub operands: Vec<Node>,

    /// The region of the source code that this group was parsed from, including the quantity.
    pub span: Range<usize>,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.quantity)?;
        let separator = self.op.map_or(String::new(), |op| format!(" {} ", op));
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(&separator)?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ")")
    }
}
