use crate::error::Error;
use std::fmt;
use super::{Expr, ScalarExpr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polynomial in a single coordinate or function, with floating-point coefficients.
///
/// The coefficients are stored in ascending degree order, so `coeffs[i]` is the coefficient of
/// `v^i`. Trailing zero coefficients are always trimmed; the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polynomial {
    variable: Expr,
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial in the given variable, which must be a coordinate or function leaf.
    pub fn new(variable: Expr, coeffs: impl Into<Vec<f64>>) -> Result<Self, Error> {
        if !variable.is_variable() {
            return Err(Error::NotAVariable(variable.to_string()));
        }

        Ok(Self::trimmed(variable, coeffs.into()))
    }

    /// Creates a polynomial without checking the variable.
    fn trimmed(variable: Expr, mut coeffs: Vec<f64>) -> Self {
        while coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        Self { variable, coeffs }
    }

    /// Tries to represent the given expression as a polynomial in `variable`.
    ///
    /// The representable expressions are:
    ///
    /// - constants,
    /// - the variable itself,
    /// - polynomials in the same variable,
    /// - negations of representable expressions,
    /// - products of a constant and a representable expression,
    /// - sums of representable expressions.
    ///
    /// Returns [`None`] for anything else.
    pub fn from_term(expr: &Expr, variable: &Expr) -> Option<Self> {
        if expr == variable {
            return Some(Self::trimmed(variable.clone(), vec![0.0, 1.0]));
        }

        match expr.node() {
            ScalarExpr::Constant(value) => Some(Self::trimmed(variable.clone(), vec![*value])),
            ScalarExpr::Polynomial(poly) if poly.variable == *variable => Some(poly.clone()),
            ScalarExpr::UnaryMinus(inner) => Some(Self::from_term(inner, variable)?.scaled(-1.0)),
            ScalarExpr::Product(left, right) => match (left.as_constant(), right.as_constant()) {
                (Some(factor), _) => Some(Self::from_term(right, variable)?.scaled(factor)),
                (_, Some(factor)) => Some(Self::from_term(left, variable)?.scaled(factor)),
                _ => None,
            },
            ScalarExpr::Sum(sum) => {
                let left = Self::from_term(&sum.left, variable)?;
                let right = Self::from_term(&sum.right, variable)?;
                Some(left.add_scaled(&right, sum.sign.as_f64()))
            },
            _ => None,
        }
    }

    /// Returns the variable of the polynomial.
    pub fn variable(&self) -> &Expr {
        &self.variable
    }

    /// Returns the coefficients of the polynomial, in ascending degree order.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Returns the coefficient of `v^degree`.
    pub fn coeff(&self, degree: usize) -> f64 {
        self.coeffs.get(degree).copied().unwrap_or(0.0)
    }

    /// Returns the degree of the polynomial, or [`None`] for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns the number of non-zero terms.
    pub fn num_terms(&self) -> usize {
        self.coeffs.iter().filter(|coeff| **coeff != 0.0).count()
    }

    /// Evaluates the polynomial at the given value of its variable.
    pub fn evaluate(&self, value: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, coeff| acc * value + coeff)
    }

    /// Returns `self + factor*other`. Both polynomials must be in the same variable.
    pub fn add_scaled(&self, other: &Self, factor: f64) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.coeff(i) + factor * other.coeff(i))
            .collect();
        Self::trimmed(self.variable.clone(), coeffs)
    }

    /// Returns `factor*self`.
    pub fn scaled(&self, factor: f64) -> Self {
        let coeffs = self.coeffs.iter().map(|coeff| factor * coeff).collect();
        Self::trimmed(self.variable.clone(), coeffs)
    }

    /// Converts the polynomial into an expression node. A polynomial of degree zero (or the zero
    /// polynomial) becomes a constant leaf.
    pub fn into_expr(self) -> Expr {
        if self.coeffs.len() <= 1 {
            Expr::constant(self.coeff(0))
        } else {
            Expr::new(ScalarExpr::Polynomial(self))
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self.coeffs.iter()
            .enumerate()
            .filter(|(_, coeff)| **coeff != 0.0)
            .peekable();

        if terms.peek().is_none() {
            return write!(f, "0");
        }

        let mut first = true;
        for (degree, &coeff) in terms {
            let magnitude = if first {
                first = false;
                coeff
            } else if coeff < 0.0 {
                write!(f, " - ")?;
                -coeff
            } else {
                write!(f, " + ")?;
                coeff
            };

            match degree {
                0 => write!(f, "{}", magnitude)?,
                _ => {
                    if magnitude == -1.0 {
                        write!(f, "-")?;
                    } else if magnitude != 1.0 {
                        write!(f, "{}*", magnitude)?;
                    }
                    write!(f, "{}", self.variable)?;
                    if degree > 1 {
                        write!(f, "^{}", degree)?;
                    }
                },
            }
        }

        Ok(())
    }
}
