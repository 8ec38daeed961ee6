use std::{fmt, ops::Range};

/// A symbol name written after a quantity, such as the `X` in `3X`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this name was parsed from.
    pub span: Range<usize>,
}

/// A leaf of the tree: a bare number such as `-4`, or a quantity of a symbol such as `3X`.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// The integer written in front of the symbol, or the value of the number.
    pub quantity: i64,

    /// The symbol, if one was written.
    pub symbol: Option<LitSym>,

    /// The region of the source code that this primitive was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.quantity)?;
        if let Some(symbol) = &self.symbol {
            write!(f, "{}", symbol.name)?;
        }
        Ok(())
    }
}
