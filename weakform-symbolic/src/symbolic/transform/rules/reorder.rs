use crate::symbolic::{
    expr::{Expr, Sign},
    step_collector::StepCollector,
    transform::{sum_with, Step, SumTransformation},
};
use std::cmp::Ordering;

/// Swaps the operands of a sum if the right operand sorts before the left one.
///
/// `u + x = x + u`
/// `(u + v) + w = w + (u + v)`
///
/// Only sums with a plus sign are reordered. Constants are left for the constant rules to move, and
/// integrals keep the order they were added in. See [`Expr::cmp_shape`] for the order used.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderSum;

impl SumTransformation for ReorderSum {
    fn name(&self) -> &'static str {
        Step::ReorderSum.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        if !sign.is_plus()
            || left.is_constant()
            || right.is_constant()
            || left.is_integral_aggregate()
            || right.is_integral_aggregate()
        {
            return None;
        }

        if right.cmp_shape(left) != Ordering::Less {
            return None;
        }

        let expr = sum_with(right, left, Sign::Plus, step_collector);
        step_collector.push(Step::ReorderSum);
        Some(expr)
    }
}
