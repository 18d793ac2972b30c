//! Symbolic weak-form expressions and sum canonicalization.
//!
//! # Expression representation
//!
//! Expressions are represented as a directed acyclic graph of [`ScalarExpr`](expr::ScalarExpr)
//! nodes. Nodes are never mutated after construction, and are shared through the [`Expr`] handle,
//! so two handles may alias the same node. Unlike a flattened computer-algebra representation,
//! sums are **binary**: `x + y + z` is a [`Sum`](expr::ScalarExpr::Sum) whose left operand is
//! itself a sum.
//!
//! # Canonicalization
//!
//! The sum factory [`Expr::sum`] never blindly builds a sum node. It first hands the operands to
//! the standard rule sequence, [`StdSumTransformations`](transform::StdSumTransformations), which
//! tries each of its rules in a fixed order. The first rule that applies produces the replacement
//! expression; if none applies, a plain sum node is built.
//!
//! Rules that regroup a sum build their new sub-sums through the same factory, so the result of a
//! single call is canonical all the way down. As a consequence, handing the operands of a sum
//! built by the factory back to [`try_canonicalize_sum`] always returns [`None`].
//!
//! ```
//! use weakform_symbolic::symbolic::{expr::{Coordinate, Sign}, try_canonicalize_sum, Expr};
//!
//! let x = Expr::coordinate(Coordinate::X);
//! let canonical = try_canonicalize_sum(&x, &Expr::constant(0.0), Sign::Plus);
//! assert_eq!(canonical, Some(x));
//! ```
//!
//! For the individual rules, see the [`transform::rules`] module.

pub mod expr;
pub mod step_collector;
pub mod transform;

pub use expr::{Expr, ScalarExpr, Sign};
pub use step_collector::StepCollector;
pub use transform::{Step, SumTransformation};

use transform::STD_SUM_TRANSFORMATIONS;

/// Tries to rewrite `left + sign*right` into a more canonical expression using the standard rule
/// sequence.
///
/// Returns [`None`] if no rule applies, in which case the plain sum node is already canonical and
/// should be built by the caller (this is what [`Expr::sum`] does).
pub fn try_canonicalize_sum(left: &Expr, right: &Expr, sign: Sign) -> Option<Expr> {
    STD_SUM_TRANSFORMATIONS.transform(left, right, sign)
}

/// Same as [`try_canonicalize_sum`], but records every rule applied along the way, including the
/// rules applied while re-canonicalizing the sub-sums built by a rewrite.
///
/// A rule's step is recorded once its rewrite is complete, so the steps of nested sub-sums appear
/// before the step of the rewrite that built them.
pub fn try_canonicalize_sum_with_steps(
    left: &Expr,
    right: &Expr,
    sign: Sign,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    STD_SUM_TRANSFORMATIONS.transform_with(left, right, sign, step_collector)
}
