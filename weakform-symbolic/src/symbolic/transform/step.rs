use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A step taken while canonicalizing a sum. There is one step for each rule in
/// [`StdSumTransformations`](super::StdSumTransformations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `(1 + 2x) + x = 1 + 3x`
    IdentifyPolynomialSum,

    /// `u + x = x + u`
    ReorderSum,

    /// `x + (-y) = x - y`
    /// `(-x) - y = -(x + y)`
    /// etc.
    RemoveUnaryMinusFromSum,

    /// `x + 0 = x`
    /// `0 - x = -x`
    RemoveZeroFromSum,

    /// `2 + 3 = 5`
    SumConstants,

    /// `x + 5 = 5 + x`
    MoveConstantsToLeftOfSum,

    /// `α + (β + r) = (α + β) + r`
    /// `x + (β + r) = β + (x + r)`
    RearrangeRightSumWithConstant,

    /// `(α + r) + β = (α + β) + r`
    /// `(α + r) + y = α + (r + y)`
    RearrangeLeftSumWithConstant,

    /// `∫f + ∫g = [∫f, ∫g]`
    SumIntegrals,
}

impl Step {
    /// Returns the name of the rule that produced this step.
    pub fn name(self) -> &'static str {
        match self {
            Self::IdentifyPolynomialSum => "IdentifyPolynomialSum",
            Self::ReorderSum => "ReorderSum",
            Self::RemoveUnaryMinusFromSum => "RemoveUnaryMinusFromSum",
            Self::RemoveZeroFromSum => "RemoveZeroFromSum",
            Self::SumConstants => "SumConstants",
            Self::MoveConstantsToLeftOfSum => "MoveConstantsToLeftOfSum",
            Self::RearrangeRightSumWithConstant => "RearrangeRightSumWithConstant",
            Self::RearrangeLeftSumWithConstant => "RearrangeLeftSumWithConstant",
            Self::SumIntegrals => "SumIntegrals",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
