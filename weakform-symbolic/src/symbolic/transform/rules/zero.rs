use crate::symbolic::{
    expr::{Expr, Sign},
    step_collector::StepCollector,
    transform::{Step, SumTransformation},
};

/// `x ± 0 = x`
/// `0 + x = x`
/// `0 - x = -x`
///
/// Both `0.0` and `-0.0` count as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveZeroFromSum;

impl SumTransformation for RemoveZeroFromSum {
    fn name(&self) -> &'static str {
        Step::RemoveZeroFromSum.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let expr = if right.is_zero() {
            left.clone()
        } else if left.is_zero() {
            match sign {
                Sign::Plus => right.clone(),
                Sign::Minus => right.negate(),
            }
        } else {
            return None;
        };

        step_collector.push(Step::RemoveZeroFromSum);
        Some(expr)
    }
}
