//! Rules that rewrite a binary sum into canonical form.
//!
//! A [`SumTransformation`] looks at the operands of a prospective sum `left + sign*right` and
//! either declines (returns [`None`]) or returns an equivalent expression. A
//! [`SumTransformationSequence`] is itself a transformation: it tries each of its rules in order
//! and returns the result of the first one that applies.
//!
//! The standard policy used by [`Expr::sum`] is [`STD_SUM_TRANSFORMATIONS`]. Rules build any new
//! sub-sums through the same factory, so the result of a rule is itself canonical.

pub mod rules;
mod step;

pub use step::Step;

use crate::symbolic::{expr::{Expr, Sign}, step_collector::StepCollector};
use once_cell::sync::Lazy;
use rules::*;
use std::fmt;
use tracing::{debug, trace};

/// A rewrite rule for the sum `left + sign*right`.
///
/// Implementations must be pure: the same operands always produce the same result, and the
/// operands are never modified.
pub trait SumTransformation: Send + Sync {
    /// The name of the rule, used in log output.
    fn name(&self) -> &'static str;

    /// Tries to rewrite `left + sign*right`, recording the rules that fire (including those that
    /// fire while building sub-sums) in the step collector.
    ///
    /// Returns [`None`] if the rule does not apply.
    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr>;

    /// Tries to rewrite `left + sign*right`.
    ///
    /// Returns [`None`] if the rule does not apply.
    fn transform(&self, left: &Expr, right: &Expr, sign: Sign) -> Option<Expr> {
        self.transform_with(left, right, sign, &mut ())
    }
}

/// An ordered list of transformations, applied first-match-wins.
#[derive(Default)]
pub struct SumTransformationSequence {
    rules: Vec<Box<dyn SumTransformation>>,
}

impl SumTransformationSequence {
    /// Creates an empty sequence, which never applies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the end of the sequence.
    pub fn with(mut self, rule: impl SumTransformation + 'static) -> Self {
        self.push(rule);
        self
    }

    /// Adds a rule to the end of the sequence.
    pub fn push(&mut self, rule: impl SumTransformation + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Returns the number of rules in the sequence.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the sequence has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the names of the rules, in the order they are tried.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl fmt::Debug for SumTransformationSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

impl SumTransformation for SumTransformationSequence {
    fn name(&self) -> &'static str {
        "SumTransformationSequence"
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        for rule in &self.rules {
            if let Some(expr) = rule.transform_with(left, right, sign, step_collector) {
                trace!(rule = rule.name(), %left, %sign, %right, result = %expr, "rule applied");
                return Some(expr);
            }
        }

        None
    }
}

/// The standard canonicalization policy for sums.
///
/// The rules are tried in this order:
///
/// 1. [`IdentifyPolynomialSum`]
/// 2. [`ReorderSum`]
/// 3. [`RemoveUnaryMinusFromSum`]
/// 4. [`RemoveZeroFromSum`]
/// 5. [`SumConstants`]
/// 6. [`MoveConstantsToLeftOfSum`]
/// 7. [`RearrangeRightSumWithConstant`]
/// 8. [`RearrangeLeftSumWithConstant`]
/// 9. [`SumIntegrals`]
#[derive(Debug)]
pub struct StdSumTransformations(SumTransformationSequence);

impl StdSumTransformations {
    pub fn new() -> Self {
        Self(
            SumTransformationSequence::new()
                .with(IdentifyPolynomialSum)
                .with(ReorderSum)
                .with(RemoveUnaryMinusFromSum)
                .with(RemoveZeroFromSum)
                .with(SumConstants)
                .with(MoveConstantsToLeftOfSum)
                .with(RearrangeRightSumWithConstant)
                .with(RearrangeLeftSumWithConstant)
                .with(SumIntegrals),
        )
    }

    /// Returns the names of the rules, in the order they are tried.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.0.rule_names()
    }
}

impl Default for StdSumTransformations {
    fn default() -> Self {
        Self::new()
    }
}

impl SumTransformation for StdSumTransformations {
    fn name(&self) -> &'static str {
        "StdSumTransformations"
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        self.0.transform_with(left, right, sign, step_collector)
    }
}

/// The process-wide standard policy. It is built on first use and never changes afterwards.
pub static STD_SUM_TRANSFORMATIONS: Lazy<StdSumTransformations> = Lazy::new(|| {
    let policy = StdSumTransformations::new();
    debug!(rules = ?policy.rule_names(), "built standard sum transformations");
    policy
});

/// Builds the canonical form of `left + sign*right`, recording the rules that fire.
///
/// If no rule applies, the operands are joined in a plain [`ScalarExpr::Sum`] node.
///
/// [`ScalarExpr::Sum`]: crate::symbolic::ScalarExpr::Sum
pub(crate) fn sum_with(
    left: &Expr,
    right: &Expr,
    sign: Sign,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    STD_SUM_TRANSFORMATIONS.transform_with(left, right, sign, step_collector)
        .unwrap_or_else(|| {
            trace!(%left, %sign, %right, "no rule applies, building sum node");
            Expr::raw_sum(left.clone(), right.clone(), sign)
        })
}
