//! Rules for constant operands.

use crate::symbolic::{
    expr::{Expr, Sign},
    step_collector::StepCollector,
    transform::{sum_with, Step, SumTransformation},
};

/// Folds the sum of two constants.
///
/// `2 + 3 = 5`
/// `2 - 3 = -1`
#[derive(Debug, Clone, Copy, Default)]
pub struct SumConstants;

impl SumTransformation for SumConstants {
    fn name(&self) -> &'static str {
        Step::SumConstants.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let (a, b) = (left.as_constant()?, right.as_constant()?);
        step_collector.push(Step::SumConstants);
        Some(Expr::constant(a + sign.apply(b)))
    }
}

/// Moves a constant right operand to the left of the sum.
///
/// `x + 5 = 5 + x`
/// `x - 5 = -5 + x`
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveConstantsToLeftOfSum;

impl SumTransformation for MoveConstantsToLeftOfSum {
    fn name(&self) -> &'static str {
        Step::MoveConstantsToLeftOfSum.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        if left.is_constant() {
            return None;
        }

        let value = right.as_constant()?;
        let expr = sum_with(&Expr::constant(sign.apply(value)), left, Sign::Plus, step_collector);
        step_collector.push(Step::MoveConstantsToLeftOfSum);
        Some(expr)
    }
}
