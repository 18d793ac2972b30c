//! A total order over expression shapes, used to put the operands of a sum in a standard order.
//!
//! Nodes are first ranked by kind:
//!
//! `Constant < Coordinate < Function < Product < Polynomial < UnaryMinus < Sum < Integral <
//! SumOfIntegrals`
//!
//! Nodes of the same kind are then compared by their contents, child by child from left to right.
//! Constants are compared with [`f64::total_cmp`], so the order is total even in the presence of
//! `NaN` and signed zeros.

use std::cmp::Ordering;
use super::{Expr, Integral, ScalarExpr};

impl ScalarExpr {
    /// Returns the rank of this node's kind.
    fn rank(&self) -> u8 {
        match self {
            Self::Constant(_) => 0,
            Self::Coordinate(_) => 1,
            Self::Function(_) => 2,
            Self::Product(..) => 3,
            Self::Polynomial(_) => 4,
            Self::UnaryMinus(_) => 5,
            Self::Sum(_) => 6,
            Self::Integral(_) => 7,
            Self::SumOfIntegrals(_) => 8,
        }
    }

    /// Compares the shapes of two nodes.
    pub fn cmp_shape(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs.total_cmp(rhs),
            (Self::Coordinate(lhs), Self::Coordinate(rhs)) => lhs.cmp(rhs),
            (Self::Function(lhs), Self::Function(rhs)) => lhs.cmp(rhs),
            (Self::UnaryMinus(lhs), Self::UnaryMinus(rhs)) => lhs.cmp_shape(rhs),
            (Self::Sum(lhs), Self::Sum(rhs)) => lhs.left.cmp_shape(&rhs.left)
                .then_with(|| lhs.sign.cmp(&rhs.sign))
                .then_with(|| lhs.right.cmp_shape(&rhs.right)),
            (Self::Product(lhs_left, lhs_right), Self::Product(rhs_left, rhs_right)) => {
                lhs_left.cmp_shape(rhs_left)
                    .then_with(|| lhs_right.cmp_shape(rhs_right))
            },
            (Self::Polynomial(lhs), Self::Polynomial(rhs)) => lhs.variable().cmp_shape(rhs.variable())
                .then_with(|| cmp_coeffs(lhs.coeffs(), rhs.coeffs())),
            (Self::Integral(lhs), Self::Integral(rhs)) => cmp_integral(lhs, rhs),
            (Self::SumOfIntegrals(lhs), Self::SumOfIntegrals(rhs)) => {
                let (lhs, rhs) = (lhs.terms(), rhs.terms());
                lhs.iter()
                    .zip(rhs)
                    .map(|(lhs, rhs)| cmp_integral(lhs, rhs))
                    .find(|ord| ord.is_ne())
                    .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
            },
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Expr {
    /// Compares the shapes of two expressions: first by the kind of their nodes, then by their
    /// contents. Aliased handles compare equal without inspecting the node.
    pub fn cmp_shape(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.node().cmp_shape(other.node())
    }
}

/// Compares two coefficient lists lexicographically.
fn cmp_coeffs(lhs: &[f64], rhs: &[f64]) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(lhs, rhs)| lhs.total_cmp(rhs))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

fn cmp_integral(lhs: &Integral, rhs: &Integral) -> Ordering {
    lhs.region().cmp(rhs.region())
        .then_with(|| lhs.quadrature().cmp(rhs.quadrature()))
        .then_with(|| lhs.integrand().cmp_shape(rhs.integrand()))
}
