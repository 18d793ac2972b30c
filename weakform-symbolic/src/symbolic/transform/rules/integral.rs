use crate::symbolic::{
    expr::{Expr, Sign, SumOfIntegrals},
    step_collector::StepCollector,
    transform::{Step, SumTransformation},
};

/// Collects integrals into a single [`SumOfIntegrals`].
///
/// `∫_Ω f + ∫_Γ g = [∫_Ω f, ∫_Γ g]`
/// `∫_Ω f - ∫_Ω g = [∫_Ω f, ∫_Ω (-g)]`
///
/// Terms are kept in submission order, and terms sharing a region and quadrature rule are not
/// merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumIntegrals;

impl SumTransformation for SumIntegrals {
    fn name(&self) -> &'static str {
        Step::SumIntegrals.name()
    }

    fn transform_with(
        &self,
        left: &Expr,
        right: &Expr,
        sign: Sign,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Expr> {
        let lhs = SumOfIntegrals::from_operand(left)?;
        let rhs = SumOfIntegrals::from_operand(right)?;
        let expr = lhs.merge(&rhs, sign).into_expr();

        step_collector.push(Step::SumIntegrals);
        Some(expr)
    }
}
