//! The catalog of rewrites and the provenance each one reports.

use crate::symbolic::expr::{Expr, NodeId};

/// A rule that rewrote part of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `2(a + b) = 2a + 2b`
    /// `2(a / b) = 2a / b`
    DistributeQuantity,

    /// `a + (b + c) = a + b + c`
    /// `a * 2(b * c) = a * 2b * c`
    Flatten,

    /// `a * 2b = 2(a * b)`
    ExtractQuantity,

    /// `2(a) = 2a`
    HoistSingleton,

    /// An empty sum is 0, and an empty product is its quantity.
    CollapseEmpty,

    /// `a + 0b = a`
    RemoveZero,

    /// `a/c + b/c = (a + b)/c`
    AddFractions,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `2a * 3b = 6a * b`
    MergeQuantities,

    /// `2(a * 3) = 6a`
    FoldNumber,

    /// `(a/b) * (c/d) = (a*c)/(b*d)`
    MultiplyFractions,

    /// `a * (b/c) = (a*b)/c`
    MultiplyIntoFraction,

    /// `(a + b) * c = a*c + b*c`
    Distribute,

    /// `a^2 * a^3 = a^(2+3)`
    /// `a * a = a^(1+1)`
    CombineLikeFactors,

    /// `a^(b^c) = a^(b*c)`
    PowerOfExponent,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `a^0 = 1`
    PowerZero,

    /// `a^-2 = 1/a^2`
    NegativePower,

    /// `(a + b)^2 = (a + b) * (a + b)`
    ExpandPower,

    /// `8^(1/3) = 2`
    IntegerRoot,

    /// `a/1 = a`
    DivideByOne,

    /// `0/a = 0`
    ZeroNumerator,

    /// `(a/b)/c = (a/b) * (1/c)`
    /// `a/(b/c) = (a/1) * (c/b)`
    FlattenFraction,

    /// `a/a = 1`
    CancelIdentical,

    /// `(a + b)/c = a/c + b/c`
    SplitNumerator,

    /// `6a/3 = 2a`
    /// `a^3/a = a^2`
    CancelDivisor,

    /// `(6a + 4)/(2b) = (3a + 2)/b`
    CancelCommonFactor,
}

impl Rule {
    /// Returns a short, human-readable description of the rule.
    pub fn description(self) -> &'static str {
        match self {
            Self::DistributeQuantity => "Distribute the quantity of a group into its children",
            Self::Flatten => "Flatten a nested group of the same kind",
            Self::ExtractQuantity => "Move the quantity of a factor onto the product",
            Self::HoistSingleton => "Replace a group of one child with the child",
            Self::CollapseEmpty => "Replace an empty group with its value",
            Self::RemoveZero => "Remove a term equal to zero",
            Self::AddFractions => "Add fractions with the same denominator",
            Self::CombineLikeTerms => "Combine like terms",
            Self::MergeQuantities => "Merge the quantities of two factors",
            Self::FoldNumber => "Fold a number into the quantity of a product",
            Self::MultiplyFractions => "Multiply two fractions",
            Self::MultiplyIntoFraction => "Multiply a factor into the numerator of a fraction",
            Self::Distribute => "Distribute a factor over a sum",
            Self::CombineLikeFactors => "Combine like factors into a power",
            Self::PowerOfExponent => "Fold a power in the exponent into a product",
            Self::PowerOfPower => "Multiply the exponents of a power of a power",
            Self::PowerZero => "Anything to the power of zero is one",
            Self::NegativePower => "Rewrite a negative power as a fraction",
            Self::ExpandPower => "Expand an integer power into a product",
            Self::IntegerRoot => "Take an exact root of a number",
            Self::DivideByOne => "Dividing by one leaves the numerator",
            Self::ZeroNumerator => "Zero divided by anything is zero",
            Self::FlattenFraction => "Flatten a fraction of fractions",
            Self::CancelIdentical => "Cancel identical numerator and denominator",
            Self::SplitNumerator => "Split a term off the numerator",
            Self::CancelDivisor => "Cancel the denominator out of the numerator",
            Self::CancelCommonFactor => "Cancel a common factor",
        }
    }
}

/// A single rewrite, along with the nodes it consumed and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The rule that was applied.
    pub rule: Rule,

    /// The identities of the nodes that were consumed, in the tree before the rewrite.
    pub before: Vec<NodeId>,

    /// The identities of the nodes that were produced, in the tree after the rewrite.
    pub after: Vec<NodeId>,
}

impl Step {
    /// Creates a step, collecting the identities of every node in the given subtrees.
    pub fn new(rule: Rule, before: &[&Expr], after: &[&Expr]) -> Self {
        let collect = |exprs: &[&Expr]| exprs.iter()
            .flat_map(|expr| expr.node_ids())
            .collect::<Vec<_>>();

        Self {
            rule,
            before: collect(before),
            after: collect(after),
        }
    }
}
