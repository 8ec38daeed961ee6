//! Rendering of a tree with some of its subtrees marked.

use ariadne::{Color, Fmt};
use std::fmt;
use super::expr::{fmt_node, Expr, NodeId};

/// How a marked subtree is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    /// Wraps the subtree in square brackets, for plain-text output.
    Brackets,

    /// Colors the subtree for terminal output.
    Color(Color),
}

/// Renders an expression in canonical form, marking every subtree whose identity is listed.
///
/// A marked subtree is rendered whole; the identities of its descendants are not checked.
#[derive(Debug, Clone, Copy)]
pub struct Highlight<'a> {
    /// The expression to render.
    pub expr: &'a Expr,

    /// The identities of the subtrees to mark.
    pub marked: &'a [NodeId],

    /// How to mark them.
    pub style: Style,
}

impl<'a> Highlight<'a> {
    /// Creates a new highlighter.
    pub fn new(expr: &'a Expr, marked: &'a [NodeId], style: Style) -> Self {
        Self { expr, marked, style }
    }

    fn write(&self, expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.marked.contains(&expr.id) {
            return fmt_node(expr, f, &|child, f| self.write(child, f));
        }

        match self.style {
            Style::Brackets => write!(f, "[{}]", expr),
            Style::Color(color) => write!(f, "{}", expr.to_string().fg(color)),
        }
    }
}

impl fmt::Display for Highlight<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(self.expr, f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::{NodeIds, Symbol};

    #[test]
    fn brackets() {
        let ids = NodeIds::new();
        let x = ids.primitive(1, Symbol::X);
        let marked = [x.id];
        let expr = ids.add(1, vec![ids.number(2), x]);

        let highlight = Highlight::new(&expr, &marked, Style::Brackets);
        assert_eq!(highlight.to_string(), "1(2 + [1X])");
    }

    #[test]
    fn whole_tree() {
        let ids = NodeIds::new();
        let expr = ids.mul(3, vec![ids.primitive(1, Symbol::A), ids.primitive(1, Symbol::B)]);
        let marked = expr.node_ids();

        let highlight = Highlight::new(&expr, &marked, Style::Brackets);
        assert_eq!(highlight.to_string(), "[3(1A * 1B)]");
    }

    #[test]
    fn color_keeps_text() {
        let ids = NodeIds::new();
        let y = ids.primitive(4, Symbol::Y);
        let marked = [y.id];
        let expr = ids.exp(1, y, ids.number(2));

        let highlight = Highlight::new(&expr, &marked, Style::Color(Color::Red));
        let rendered = highlight.to_string();
        assert_eq!(strip_ansi_escapes::strip_str(&rendered), "1(4Y ^ 2)");
        assert_ne!(rendered, "1(4Y ^ 2)");
    }

    #[test]
    fn nothing_marked() {
        let ids = NodeIds::new();
        let expr = ids.div(1, ids.number(3), ids.number(2));
        assert_eq!(Highlight::new(&expr, &[], Style::Brackets).to_string(), expr.to_string());
    }
}
