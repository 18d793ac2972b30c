//! The rules of the standard sum policy.
//!
//! Each rule is a unit struct implementing [`SumTransformation`](super::SumTransformation). A rule
//! that applies pushes its [`Step`](super::Step) to the step collector once its rewrite is
//! complete, so steps taken while building sub-sums are recorded first.

mod constant;
mod integral;
mod polynomial;
mod rearrange;
mod reorder;
mod unary_minus;
mod zero;

pub use constant::{MoveConstantsToLeftOfSum, SumConstants};
pub use integral::SumIntegrals;
pub use polynomial::IdentifyPolynomialSum;
pub use rearrange::{RearrangeLeftSumWithConstant, RearrangeRightSumWithConstant};
pub use reorder::ReorderSum;
pub use unary_minus::RemoveUnaryMinusFromSum;
pub use zero::RemoveZeroFromSum;
