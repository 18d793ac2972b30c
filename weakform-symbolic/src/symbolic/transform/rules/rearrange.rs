//! Rules that regroup nested sums so that their constants can be collected on the far left.

use crate::symbolic::{
    expr::{Expr, Sign},
    step_collector::StepCollector,
    transform::{sum_with, Step, SumTransformation},
};

/// Pulls the constant out of a right operand of the form `β ± r`.
///
/// `α + (β + r) = (α + β) + r`
/// `α - (β - r) = (α - β) + r`
/// `x + (β - r) = β + (x - r)`
/// `x - (β + r) = -β + (x - r)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RearrangeRightSumWithConstant;

impl SumTransformation for RearrangeRightSumWithConstant {
    fn name(&self) -> &'static str {
        Step::RearrangeRightSumWithConstant.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let inner = right.as_sum()?;
        let beta = inner.left.as_constant()?;
        let inner_sign = sign * inner.sign;

        let expr = match left.as_constant() {
            Some(alpha) => {
                let constant = Expr::constant(alpha + sign.apply(beta));
                sum_with(&constant, &inner.right, inner_sign, step_collector)
            },
            None => {
                let rest = sum_with(left, &inner.right, inner_sign, step_collector);
                sum_with(&Expr::constant(sign.apply(beta)), &rest, Sign::Plus, step_collector)
            },
        };

        step_collector.push(Step::RearrangeRightSumWithConstant);
        Some(expr)
    }
}

/// Pulls the constant out of a left operand of the form `α ± r`.
///
/// `(α + r) + β = (α + β) + r`
/// `(α - r) - β = (α - β) - r`
/// `(α + r) + y = α + (r + y)`
/// `(α - r) - y = α + (-r - y)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RearrangeLeftSumWithConstant;

impl SumTransformation for RearrangeLeftSumWithConstant {
    fn name(&self) -> &'static str {
        Step::RearrangeLeftSumWithConstant.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let inner = left.as_sum()?;
        let alpha = inner.left.as_constant()?;

        let expr = match right.as_constant() {
            Some(beta) => {
                let constant = Expr::constant(alpha + sign.apply(beta));
                sum_with(&constant, &inner.right, inner.sign, step_collector)
            },
            None => {
                let first = match inner.sign {
                    Sign::Plus => inner.right.clone(),
                    Sign::Minus => inner.right.negate(),
                };
                let rest = sum_with(&first, right, sign, step_collector);
                sum_with(&inner.left, &rest, Sign::Plus, step_collector)
            },
        };

        step_collector.push(Step::RearrangeLeftSumWithConstant);
        Some(expr)
    }
}
