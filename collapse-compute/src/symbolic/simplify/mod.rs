//! Simplification of expressions to a normal form.
//!
//! Simplification applies one rewrite at a time with [`dispatch::rewrite_step`], until either no
//! rule applies (a **normal form**) or a rewrite produces a tree that was already seen earlier in
//! the run (a **cycle**). The rule set is not confluent, so some inputs oscillate between a few
//! forms; cycle detection stops those runs with the repeated form as the answer.
//!
//! Runs that neither terminate nor cycle within [`SimplifyOptions::max_iterations`] rewrites fail
//! with [`NonTermination`], which carries the last tree reached. Runs whose quantities outgrow an
//! [`i64`] fail with [`QuantityOverflow`].
//!
//! ```
//! use collapse_compute::symbolic::{simplify, Expr, NodeIds};
//!
//! let ids = NodeIds::new();
//! let expr = Expr::parse("1(1(1X + 1) ^ 3)", &ids).unwrap();
//! let simplified = simplify(&expr, &ids).unwrap();
//! assert_eq!(simplified.expr.to_string(), "1(1(1X ^ 3) + 3(1X ^ 2) + 3X + 1)");
//! ```

pub mod dispatch;
pub mod fraction;
pub mod rules;
pub mod step;

use crate::primes::{first_primes, PRIMES};
use log::{debug, trace, warn};
use std::{borrow::Cow, collections::HashMap};
use super::{
    error::{NonTermination, QuantityOverflow, SimplifyError},
    expr::{Expr, NodeIds},
    step_collector::StepCollector,
};

pub use dispatch::{rewrite_step, Ctxt, Overflow};
pub use step::{Rule, Step};

/// The number of rewrites applied by default before giving up.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Options that bound a simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// The maximum number of rewrites to apply before giving up.
    ///
    /// Integer powers larger than this are not expanded, since combining the copies again would
    /// take more rewrites than are allowed.
    pub max_iterations: usize,

    /// How many primes, starting from 2, are tried as common factors of fractions.
    pub prime_count: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prime_count: crate::primes::DEFAULT_PRIME_COUNT,
        }
    }
}

impl SimplifyOptions {
    /// Wraps the given [`SimplifyOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder(self)
    }
}

/// A builder for [`SimplifyOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptionsBuilder(SimplifyOptions);

impl SimplifyOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rewrites. See [`SimplifyOptions::max_iterations`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Sets the number of primes to try. See [`SimplifyOptions::prime_count`].
    pub fn prime_count(mut self, prime_count: usize) -> Self {
        self.0.prime_count = prime_count;
        self
    }

    /// Builds the options.
    pub fn build(self) -> SimplifyOptions {
        self.0
    }
}

/// How a simplification run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No rule applies to the result.
    NormalForm,

    /// The last rewrite produced a tree that was already seen. The result is that repeated tree.
    Cycle {
        /// The number of rewrites that had been applied when the repeated tree was first seen.
        first_seen: usize,
    },
}

/// The result of a successful simplification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified {
    /// The simplified expression.
    pub expr: Expr,

    /// How the run ended.
    pub outcome: Outcome,

    /// The number of rewrites that were applied.
    pub iterations: usize,
}

/// A single rewrite of the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// The rule that was applied, and the nodes it consumed and produced.
    pub step: Step,

    /// The whole tree after the rewrite.
    pub result: Expr,
}

/// Simplifies the given expression with the default options.
pub fn simplify(expr: &Expr, ids: &NodeIds) -> Result<Simplified, SimplifyError> {
    simplify_with(expr, ids, &SimplifyOptions::default(), &mut ())
}

/// Simplifies the given expression with the default options, returning every rewrite that was
/// applied along the way.
pub fn simplify_with_steps(
    expr: &Expr,
    ids: &NodeIds,
) -> Result<(Simplified, Vec<Rewrite>), SimplifyError> {
    let mut rewrites = Vec::new();
    let simplified = simplify_with(expr, ids, &SimplifyOptions::default(), &mut rewrites)?;
    Ok((simplified, rewrites))
}

/// Simplifies the given expression, reporting every rewrite to the given collector.
pub fn simplify_with(
    expr: &Expr,
    ids: &NodeIds,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Rewrite>,
) -> Result<Simplified, SimplifyError> {
    let primes = if options.prime_count <= PRIMES.len() {
        Cow::Borrowed(&PRIMES[..options.prime_count])
    } else {
        Cow::Owned(first_primes(options.prime_count))
    };
    let ctxt = Ctxt {
        ids,
        primes: &primes,
        max_expansion: options.max_iterations,
    };

    // rendered form -> number of rewrites applied when it was reached
    let mut seen = HashMap::new();
    let mut current = expr.clone();
    let mut rendered = current.to_string();

    for iteration in 0..options.max_iterations {
        let mut steps = Vec::new();
        let next = match rewrite_step(&current, &ctxt, &mut steps) {
            Ok(Some(next)) => next,
            Ok(None) => {
                debug!("normal form after {} rewrites: {}", iteration, rendered);
                return Ok(Simplified {
                    expr: current,
                    outcome: Outcome::NormalForm,
                    iterations: iteration,
                });
            },
            Err(Overflow) => {
                warn!("quantity overflow after {} rewrites: {}", iteration, rendered);
                return Err(QuantityOverflow {
                    last: current,
                    iterations: iteration,
                }.into());
            },
        };

        let next_rendered = next.to_string();
        for step in steps {
            trace!("{}: {}", step.rule.description(), next_rendered);
            step_collector.push(Rewrite { step, result: next.clone() });
        }

        seen.insert(rendered, iteration);
        if let Some(&first_seen) = seen.get(&next_rendered) {
            debug!("cycle after {} rewrites, first seen after {}: {}", iteration + 1, first_seen, next_rendered);
            return Ok(Simplified {
                expr: next,
                outcome: Outcome::Cycle { first_seen },
                iterations: iteration + 1,
            });
        }

        current = next;
        rendered = next_rendered;
    }

    warn!("gave up after {} rewrites: {}", options.max_iterations, rendered);
    Err(NonTermination {
        last: current,
        iterations: options.max_iterations,
    }.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;
    use super::*;

    /// Simplifies the given text, returning the rendered result.
    fn simplify_str(input: &str) -> String {
        let ids = NodeIds::new();
        let expr = Expr::parse(input, &ids).unwrap();
        let simplified = simplify(&expr, &ids).unwrap();
        assert_eq!(simplified.outcome, Outcome::NormalForm, "{} cycled", input);
        simplified.expr.to_string()
    }

    #[test]
    fn add_numbers() {
        assert_eq!(simplify_str("1(2 + 3)"), "5");
        assert_eq!(simplify_str("1(3 + -5)"), "-2");
        assert_eq!(simplify_str("1(1(2 + 3) + 1(3 + -5))"), "3");
    }

    #[test]
    fn add_symbols() {
        assert_eq!(simplify_str("1(1X + 1X)"), "2X");
    }

    #[test]
    fn multiply_symbols() {
        assert_eq!(simplify_str("1(1(1X * 3Y) * 1(1A * 2B))"), "6(1X * 1Y * 1A * 1B)");
        assert_eq!(simplify_str("1(1X * 2X)"), "2(1X ^ 2)");
    }

    #[test]
    fn distribute_over_sums() {
        assert_eq!(
            simplify_str("1(2Y * 1(3X + 2A + 1B))"),
            "1(6(1X * 1Y) + 4(1A * 1Y) + 2(1B * 1Y))",
        );
        assert_eq!(
            simplify_str("1(1(2X + 3Y) * 1(4A + 5B))"),
            "1(8(1A * 1X) + 10(1B * 1X) + 12(1A * 1Y) + 15(1B * 1Y))",
        );
    }

    #[test]
    fn powers() {
        assert_eq!(simplify_str("1(1(1X ^ 0) + 1(1X ^ 1))"), "1(1 + 1X)");
        assert_eq!(
            simplify_str("1(1(1X ^ 2) + 2(1X ^ 2) + 1(2X ^ 2) + 2)"),
            "1(3(1X ^ 2) + 1(2X ^ 2) + 2)",
        );
        assert_eq!(simplify_str("1(1(1X ^ 2) * 2X)"), "2(1X ^ 3)");
        assert_eq!(
            simplify_str("1(1(1X * 1(1X ^ 3)) + 1(1(1X ^ 2) * 2(1X ^ 3) * 1(1X ^ -1)))"),
            "3(1X ^ 4)",
        );
        assert_eq!(simplify_str("1(1(2 ^ 2) + 1(1X ^ 2))"), "1(4 + 1(1X ^ 2))");
    }

    #[test]
    fn expand_binomial() {
        assert_eq!(simplify_str("1(1(1X + 1) ^ 3)"), "1(1(1X ^ 3) + 3(1X ^ 2) + 3X + 1)");
    }

    #[test]
    fn exponent_of_exponent_is_folded_literally() {
        // X^(2Y^3A) becomes X^(6YA), which is not what the power laws would give
        assert_eq!(simplify_str("1(1X ^ 1(2Y ^ 3A))"), "1(1X ^ 6(1Y * 1A))");
        assert_eq!(simplify_str("1(1(2Y ^ 3A) ^ 1X)"), "1(2Y ^ 3(1A * 1X))");
    }

    #[test]
    fn divide_numbers() {
        assert_eq!(simplify_str("1(6 / 2)"), "3");
        assert_eq!(simplify_str("1(3 / 2)"), "1(3 / 2)");
    }

    #[test]
    fn divide_symbols() {
        assert_eq!(simplify_str("1(3X / 2X)"), "1(3 / 2)");
        assert_eq!(simplify_str("1(4X / 2X)"), "2");
        assert_eq!(simplify_str("1(1(3X + 2X) / 1X)"), "5");
        assert_eq!(simplify_str("1(6X / 4Y)"), "1(3X / 2Y)");
    }

    #[test]
    fn divide_powers() {
        assert_eq!(simplify_str("1(1(1X ^ 7) / 4X)"), "1(1(1X ^ 6) / 4)");
        assert_eq!(simplify_str("1(2X / 1(1X ^ 2))"), "1(2 / 1X)");
    }

    #[test]
    fn nested_fractions() {
        assert_eq!(simplify_str("1(1(125 / 1X) / 5)"), "1(25 / 1X)");
        assert_eq!(
            simplify_str("1(1(1(1 / 1X) / 1(1X * 1Y)) / 1X)"),
            "1(1 / 1(1(1X ^ 3) * 1Y))",
        );
    }

    #[test]
    fn cancel_sums() {
        assert_eq!(simplify_str("1(1(1X + 2) / 1(1X + 2))"), "1");
        assert_eq!(simplify_str("1(1(9X + 12) / 1(3X + 6))"), "1(1(3X + 4) / 1(1X + 2))");
        assert_eq!(
            simplify_str("1(1(1(1(2 + 1X) ^ 3) + -1(2 ^ 3)) / 1X)"),
            "1(12 + 6X + 1(1X ^ 2))",
        );
    }

    #[test]
    fn add_fractions() {
        assert_eq!(simplify_str("1(1(1 / 3) + 1(2 / 3))"), "1");
        assert_eq!(simplify_str("1(1 + 1(0 / 1X))"), "1");
    }

    #[test]
    fn fraction_powers() {
        assert_eq!(simplify_str("1(1(1X / 1Y) ^ 2)"), "1(1(1X ^ 2) / 1(1Y ^ 2))");
        assert_eq!(simplify_str("1(8 ^ 1(1 / 3))"), "2");
        assert_eq!(simplify_str("1(1(1X ^ 1(1 / 2)) ^ 1(1 / 2))"), "1(1X ^ 1(1 / 4))");
        assert_eq!(simplify_str("1(1(1X ^ 1(1 / 4)) ^ 2)"), "1(1X ^ 1(1 / 2))");
    }

    #[test]
    fn normal_forms_are_idempotent() {
        for input in [
            "1(1(1X ^ 3) + 3(1X ^ 2) + 3X + 1)",
            "1(3 / 2)",
            "6(1X * 1Y * 1A * 1B)",
            "1(1X ^ 6(1Y * 1A))",
        ] {
            let ids = NodeIds::new();
            let expr = Expr::parse(input, &ids).unwrap();
            let simplified = simplify(&expr, &ids).unwrap();
            assert_eq!(simplified.iterations, 0, "{} was rewritten", input);
            assert_eq!(simplified.expr.to_string(), input);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1(2X + 3Y) * 1(4A + 5B))", &ids).unwrap();
        let first = simplify(&expr, &ids).unwrap();
        let second = simplify(&expr, &ids).unwrap();
        assert_eq!(first.expr.to_string(), second.expr.to_string());
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn steps_replay_the_run() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1X * 2X)", &ids).unwrap();
        let (simplified, rewrites) = simplify_with_steps(&expr, &ids).unwrap();

        assert_eq!(rewrites.len(), simplified.iterations);
        assert_eq!(rewrites[0].step.rule, Rule::ExtractQuantity);
        assert_eq!(rewrites.last().map(|rewrite| &rewrite.result), Some(&simplified.expr));
        assert!(rewrites.iter().any(|rewrite| rewrite.step.rule == Rule::CombineLikeFactors));
    }

    #[test]
    fn iteration_bound() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1(1X + 1) ^ 3)", &ids).unwrap();
        let options = SimplifyOptionsBuilder::new().max_iterations(3).build();

        let err = simplify_with(&expr, &ids, &options, &mut ()).unwrap_err();
        assert!(matches!(err, SimplifyError::NonTermination(_)));
        assert_eq!(err.iterations(), 3);
        assert_ne!(err.last().to_string(), "1(1(1X ^ 3) + 3(1X ^ 2) + 3X + 1)");
    }

    #[test]
    fn fewer_primes() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(6X / 9Y)", &ids).unwrap();

        // without 3 as a candidate, the fraction stays as is
        let options = SimplifyOptions::default().into_builder().prime_count(1).build();
        let simplified = simplify_with(&expr, &ids, &options, &mut ()).unwrap();
        assert_eq!(simplified.expr.to_string(), "1(6X / 9Y)");

        let simplified = simplify(&expr, &ids).unwrap();
        assert_eq!(simplified.expr.to_string(), "1(2X / 3Y)");
    }

    #[test]
    fn more_primes_than_cached() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1094X / 1641Y)", &ids).unwrap();

        // both quantities are multiples of 547, the 101st prime
        let simplified = simplify(&expr, &ids).unwrap();
        assert_eq!(simplified.expr.to_string(), "1(1094X / 1641Y)");

        let options = SimplifyOptionsBuilder::new().prime_count(101).build();
        let simplified = simplify_with(&expr, &ids, &options, &mut ()).unwrap();
        assert_eq!(simplified.expr.to_string(), "1(2X / 3Y)");
    }

    #[test]
    fn oscillating_fraction_stops_at_the_repeated_form() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1X / 1(1X ^ 1Y))", &ids).unwrap();
        let (simplified, rewrites) = simplify_with_steps(&expr, &ids).unwrap();

        assert_eq!(simplified.outcome, Outcome::Cycle { first_seen: 8 });
        assert_eq!(simplified.iterations, 21);
        assert_eq!(simplified.expr.to_string(), "1(1(1X ^ 1(1 + -1Y)) / 1(1X ^ 1(0Y)))");

        // the tree reached after 8 rewrites is the one the run ended on
        assert_eq!(rewrites.len(), 21);
        assert_eq!(rewrites[7].result.to_string(), simplified.expr.to_string());
    }

    #[test]
    fn unlike_powers_oscillate() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1(1X ^ 1A) / 1(1X ^ 1B))", &ids).unwrap();
        let simplified = simplify(&expr, &ids).unwrap();
        assert!(matches!(simplified.outcome, Outcome::Cycle { .. }));
    }

    #[test]
    fn quantity_overflow_is_an_error() {
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1(2 ^ 40) * 1(2 ^ 40))", &ids).unwrap();

        let err = simplify(&expr, &ids).unwrap_err();
        assert!(matches!(err, SimplifyError::Overflow(_)));
        assert!(err.iterations() > 0);

        // the first power was already pulled out of the product
        assert_eq!(err.last().quantity, 1 << 40);
    }

    #[test]
    fn large_powers_are_not_expanded() {
        for input in ["1(1(1X + 1) ^ 1000000000)", "1(2 ^ 1000000)"] {
            let ids = NodeIds::new();
            let expr = Expr::parse(input, &ids).unwrap();
            let simplified = simplify(&expr, &ids).unwrap();
            assert_eq!(simplified.iterations, 0, "{} was rewritten", input);
            assert_eq!(simplified.expr.to_string(), input);
        }

        // the limit follows the iteration bound
        let ids = NodeIds::new();
        let expr = Expr::parse("1(1(1X + 1) ^ 60)", &ids).unwrap();
        let options = SimplifyOptionsBuilder::new().max_iterations(50).build();
        let simplified = simplify_with(&expr, &ids, &options, &mut ()).unwrap();
        assert_eq!(simplified.outcome, Outcome::NormalForm);
        assert_eq!(simplified.iterations, 0);
    }
}
