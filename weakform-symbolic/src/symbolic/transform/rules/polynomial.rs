use crate::symbolic::{
    expr::{Expr, Polynomial, Sign},
    step_collector::StepCollector,
    transform::{Step, SumTransformation},
};

/// Adds a polynomial to another term that can be written as a polynomial in the same variable.
///
/// `(1 + 2x) + x = 1 + 3x`
/// `(1 + 2x) - (1 + 2x) = 0`
/// `(1 + x^2) + 3 = 4 + x^2`
///
/// At least one operand must already be a [`Polynomial`]; the sum `x + 5` is left alone. The
/// variable is taken from the left operand if it is a polynomial, otherwise from the right one.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifyPolynomialSum;

impl SumTransformation for IdentifyPolynomialSum {
    fn name(&self) -> &'static str {
        Step::IdentifyPolynomialSum.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let variable = left.as_polynomial()
            .or_else(|| right.as_polynomial())?
            .variable();

        let lhs = Polynomial::from_term(left, variable)?;
        let rhs = Polynomial::from_term(right, variable)?;
        let expr = lhs.add_scaled(&rhs, sign.as_f64()).into_expr();

        step_collector.push(Step::IdentifyPolynomialSum);
        Some(expr)
    }
}
