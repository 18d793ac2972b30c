use crate::symbolic::{
    expr::{Expr, Sign},
    step_collector::StepCollector,
    transform::{sum_with, Step, SumTransformation},
};

/// Removes negations from the operands of a sum by flipping the sign of the sum.
///
/// `(-x) ± (-y) = -(x ± y)`
/// `x + (-y) = x - y`
/// `x - (-y) = x + y`
/// `(-x) + y = y - x`
/// `(-x) - y = -(x + y)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveUnaryMinusFromSum;

impl SumTransformation for RemoveUnaryMinusFromSum {
    fn name(&self) -> &'static str {
        Step::RemoveUnaryMinusFromSum.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let expr = match (left.as_unary_minus(), right.as_unary_minus(), sign) {
            (Some(x), Some(y), sign) => sum_with(x, y, sign, step_collector).negate(),
            (None, Some(y), Sign::Plus) => sum_with(left, y, Sign::Minus, step_collector),
            (None, Some(y), Sign::Minus) => sum_with(left, y, Sign::Plus, step_collector),
            (Some(x), None, Sign::Plus) => sum_with(right, x, Sign::Minus, step_collector),
            (Some(x), None, Sign::Minus) => sum_with(x, right, Sign::Plus, step_collector).negate(),
            (None, None, _) => return None,
        };

        step_collector.push(Step::RemoveUnaryMinusFromSum);
        Some(expr)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::expr::Coordinate;
    use super::*;

    fn x() -> Expr {
        Expr::coordinate(Coordinate::X)
    }

    fn u() -> Expr {
        Expr::unknown("u")
    }

    #[test]
    fn both_negated() {
        let result = RemoveUnaryMinusFromSum.transform(&x().negate(), &u().negate(), Sign::Plus);
        assert_eq!(result, Some(Expr::unary_minus(Expr::raw_sum(x(), u(), Sign::Plus))));
    }

    #[test]
    fn right_negated() {
        let result = RemoveUnaryMinusFromSum.transform(&x(), &u().negate(), Sign::Plus);
        assert_eq!(result, Some(Expr::raw_sum(x(), u(), Sign::Minus)));

        let result = RemoveUnaryMinusFromSum.transform(&x(), &u().negate(), Sign::Minus);
        assert_eq!(result, Some(Expr::raw_sum(x(), u(), Sign::Plus)));
    }

    #[test]
    fn left_negated() {
        let result = RemoveUnaryMinusFromSum.transform(&x().negate(), &u(), Sign::Plus);
        assert_eq!(result, Some(Expr::raw_sum(u(), x(), Sign::Minus)));

        let result = RemoveUnaryMinusFromSum.transform(&x().negate(), &u(), Sign::Minus);
        assert_eq!(result, Some(Expr::unary_minus(Expr::raw_sum(x(), u(), Sign::Plus))));
    }

    #[test]
    fn nested_steps_come_first() {
        // (-x) + (-u): the inner sum `x + u` is already canonical
        let mut steps = Vec::<Step>::new();
        RemoveUnaryMinusFromSum.transform_with(&x().negate(), &u().negate(), Sign::Plus, &mut steps);
        assert_eq!(steps, vec![Step::RemoveUnaryMinusFromSum]);

        // (-u) + (-x): the inner sum `u + x` is reordered first
        let mut steps = Vec::<Step>::new();
        RemoveUnaryMinusFromSum.transform_with(&u().negate(), &x().negate(), Sign::Plus, &mut steps);
        assert_eq!(steps, vec![Step::ReorderSum, Step::RemoveUnaryMinusFromSum]);
    }

    #[test]
    fn declines_without_negation() {
        assert_eq!(RemoveUnaryMinusFromSum.transform(&x(), &u(), Sign::Minus), None);
    }
}
