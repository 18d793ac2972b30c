//! The expression nodes that make up a weak form, and the factories that build them.
//!
//! An expression is a tree (more precisely, a DAG) of [`ScalarExpr`] nodes. Nodes are immutable
//! and reference-counted; the [`Expr`] handle is what the rest of the crate passes around. Cloning
//! an [`Expr`] only bumps a reference count, and the node is destroyed when its last handle is
//! dropped.
//!
//! # Factories
//!
//! Nodes should be built through the factories on [`Expr`] rather than by hand:
//!
//! - [`Expr::sum`] canonicalizes the sum before building it (see
//!   [`transform`](crate::symbolic::transform)).
//! - [`Expr::negate`] folds negations of constants, double negations, and negations of integrals
//!   instead of stacking [`ScalarExpr::UnaryMinus`] nodes.
//!
//! The raw constructors ([`Expr::new`], [`Expr::raw_sum`], [`Expr::unary_minus`]) exist for the
//! fallback path of the sum factory, and for building deliberately non-canonical inputs.
//!
//! # Equality
//!
//! The [`PartialEq`] implementation for [`Expr`] is **structural**: two handles are equal if they
//! alias the same node, or if their nodes have the same shape and contents. Sums are compared
//! operand by operand, so `x + y` and `y + x` are **not** equal. Use [`Expr::ptr_eq`] to check
//! aliasing alone.

mod integral;
mod iter;
mod order;
mod polynomial;
mod sign;

pub use integral::{Integral, Quadrature, QuadratureFamily, Region, SumOfIntegrals};
pub use iter::ExprIter;
pub use polynomial::Polynomial;
pub use sign::Sign;

use crate::error::Error;
use crate::symbolic::transform::sum_with;
use std::{fmt, ops::{Add, Deref, Mul, Neg, Sub}, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate function, one of `x`, `y`, or `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    dir: usize,
}

impl Coordinate {
    /// The `x` coordinate.
    pub const X: Self = Self { dir: 0 };

    /// The `y` coordinate.
    pub const Y: Self = Self { dir: 1 };

    /// The `z` coordinate.
    pub const Z: Self = Self { dir: 2 };

    /// Creates the coordinate function along the given direction.
    pub fn new(dir: usize) -> Result<Self, Error> {
        if dir > 2 {
            Err(Error::InvalidCoordinate(dir))
        } else {
            Ok(Self { dir })
        }
    }

    /// Returns the direction of this coordinate.
    pub fn dir(self) -> usize {
        self.dir
    }

    /// Returns the name of this coordinate.
    pub fn name(self) -> &'static str {
        match self.dir {
            0 => "x",
            1 => "y",
            _ => "z",
        }
    }
}

/// The role a symbolic function plays in a weak form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionKind {
    /// A function being solved for.
    Unknown,

    /// A test (variational) function.
    Test,

    /// A function with known, discretely stored values.
    Discrete,
}

/// A named symbolic function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionElement {
    /// The role of the function.
    pub kind: FunctionKind,

    /// The name of the function, used for display and ordering.
    pub name: String,
}

/// The operands of a binary sum, `left + sign*right`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SumExpr {
    /// The left operand.
    pub left: Expr,

    /// Whether the right operand is added or subtracted.
    pub sign: Sign,

    /// The right operand.
    pub right: Expr,
}

/// A single node of a weak-form expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScalarExpr {
    /// A spatially constant value, such as `2` or `0.5`.
    Constant(f64),

    /// A coordinate function.
    Coordinate(Coordinate),

    /// An unknown, test, or discrete function.
    Function(FunctionElement),

    /// The negation of an expression.
    UnaryMinus(Expr),

    /// A binary sum.
    Sum(SumExpr),

    /// A binary product. Products are never simplified.
    Product(Expr, Expr),

    /// A polynomial in a single coordinate or function.
    Polynomial(Polynomial),

    /// An integral over a region.
    Integral(Integral),

    /// Several integrals added together, possibly over different regions.
    SumOfIntegrals(SumOfIntegrals),
}

/// How tightly an expression binds when displayed, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Term,
    Factor,
    Neg,
    Primary,
}

impl ScalarExpr {
    /// Returns the precedence of the node when displayed.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Constant(value) if value.is_sign_negative() => Precedence::Neg,
            Self::Constant(_) | Self::Coordinate(_) | Self::Function(_) | Self::Integral(_) => {
                Precedence::Primary
            },
            Self::UnaryMinus(_) => Precedence::Neg,
            Self::Product(..) => Precedence::Factor,
            Self::Polynomial(poly) if poly.num_terms() <= 1 => Precedence::Factor,
            Self::Sum(_) | Self::Polynomial(_) | Self::SumOfIntegrals(_) => Precedence::Term,
        }
    }

    /// Returns the direct subexpressions of this node, from left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Constant(_) | Self::Coordinate(_) | Self::Function(_) => Vec::new(),
            Self::UnaryMinus(inner) => vec![inner],
            Self::Sum(sum) => vec![&sum.left, &sum.right],
            Self::Product(left, right) => vec![left, right],
            Self::Polynomial(poly) => vec![poly.variable()],
            Self::Integral(integral) => vec![integral.integrand()],
            Self::SumOfIntegrals(sum) => sum.terms().iter().map(Integral::integrand).collect(),
        }
    }
}

/// Writes the expression, wrapped in parentheses if it binds looser than `min`.
fn fmt_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: Precedence) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Coordinate(coord) => write!(f, "{}", coord.name()),
            Self::Function(func) => write!(f, "{}", func.name),
            Self::UnaryMinus(inner) => {
                write!(f, "-")?;
                fmt_operand(f, inner, Precedence::Neg)
            },
            Self::Sum(sum) => {
                write!(f, "{} {} ", sum.left, sum.sign)?;
                fmt_operand(f, &sum.right, Precedence::Factor)
            },
            Self::Product(left, right) => {
                fmt_operand(f, left, Precedence::Factor)?;
                write!(f, "*")?;
                fmt_operand(f, right, Precedence::Neg)
            },
            Self::Polynomial(poly) => write!(f, "{}", poly),
            Self::Integral(integral) => write!(f, "{}", integral),
            Self::SumOfIntegrals(sum) => write!(f, "{}", sum),
        }
    }
}

/// A shared handle to an immutable [`ScalarExpr`] node.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Expr(Arc<ScalarExpr>);

impl Expr {
    /// Wraps the given node in a new handle, without any canonicalization.
    pub fn new(node: ScalarExpr) -> Self {
        Self(Arc::new(node))
    }

    /// Returns the node this handle points to.
    pub fn node(&self) -> &ScalarExpr {
        &self.0
    }

    /// Returns true if both handles point to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Creates a constant leaf.
    pub fn constant(value: f64) -> Self {
        Self::new(ScalarExpr::Constant(value))
    }

    /// Creates a coordinate function leaf.
    pub fn coordinate(coord: Coordinate) -> Self {
        Self::new(ScalarExpr::Coordinate(coord))
    }

    /// Creates a symbolic function leaf of the given kind.
    pub fn function(kind: FunctionKind, name: impl Into<String>) -> Self {
        Self::new(ScalarExpr::Function(FunctionElement { kind, name: name.into() }))
    }

    /// Creates an unknown function leaf.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::function(FunctionKind::Unknown, name)
    }

    /// Creates a test function leaf.
    pub fn test(name: impl Into<String>) -> Self {
        Self::function(FunctionKind::Test, name)
    }

    /// Creates a discrete function leaf.
    pub fn discrete(name: impl Into<String>) -> Self {
        Self::function(FunctionKind::Discrete, name)
    }

    /// Builds the canonical form of `left + sign*right`.
    ///
    /// The operands are first given to the standard rule sequence; a plain
    /// [`ScalarExpr::Sum`] node is only built if no rule applies.
    pub fn sum(left: &Self, right: &Self, sign: Sign) -> Self {
        sum_with(left, right, sign, &mut ())
    }

    /// Builds a plain sum node, without any canonicalization.
    pub fn raw_sum(left: Self, right: Self, sign: Sign) -> Self {
        Self::new(ScalarExpr::Sum(SumExpr { left, sign, right }))
    }

    /// Builds a plain [`ScalarExpr::UnaryMinus`] node, without any folding.
    pub fn unary_minus(inner: Self) -> Self {
        Self::new(ScalarExpr::UnaryMinus(inner))
    }

    /// Returns the negation of this expression.
    ///
    /// - `-(c)` is the constant `-c`.
    /// - `-(-x)` is `x`.
    /// - The negation of a polynomial negates its coefficients.
    /// - The negation of an integral negates its integrand, and the negation of a sum of integrals
    ///   negates every term.
    ///
    /// Anything else is wrapped in a [`ScalarExpr::UnaryMinus`] node.
    pub fn negate(&self) -> Self {
        match self.node() {
            ScalarExpr::Constant(value) => Self::constant(-value),
            ScalarExpr::UnaryMinus(inner) => inner.clone(),
            ScalarExpr::Polynomial(poly) => poly.scaled(-1.0).into_expr(),
            ScalarExpr::Integral(integral) => Self::new(ScalarExpr::Integral(integral.negated())),
            ScalarExpr::SumOfIntegrals(sum) => Self::new(ScalarExpr::SumOfIntegrals(sum.negated())),
            _ => Self::unary_minus(self.clone()),
        }
    }

    /// Builds a plain product node. No simplification is done.
    pub fn product(left: Self, right: Self) -> Self {
        Self::new(ScalarExpr::Product(left, right))
    }

    /// Builds the polynomial `coeffs[0] + coeffs[1]*v + coeffs[2]*v^2 + ...` in the given
    /// variable, which must be a coordinate or function leaf.
    ///
    /// Trailing zero coefficients are dropped; a polynomial left with only its constant
    /// coefficient is returned as a constant leaf.
    pub fn polynomial(variable: Self, coeffs: impl Into<Vec<f64>>) -> Result<Self, Error> {
        Ok(Polynomial::new(variable, coeffs)?.into_expr())
    }

    /// Builds the integral of `integrand` over the given region, using the given quadrature rule.
    pub fn integral(region: Region, quadrature: Quadrature, integrand: Self) -> Self {
        Self::new(ScalarExpr::Integral(Integral::new(region, quadrature, integrand)))
    }

    /// If the expression is a constant leaf, returns its value.
    pub fn as_constant(&self) -> Option<f64> {
        match self.node() {
            ScalarExpr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is a constant leaf.
    pub fn is_constant(&self) -> bool {
        matches!(self.node(), ScalarExpr::Constant(_))
    }

    /// Returns true if the expression is the constant `0` (either `0.0` or `-0.0`).
    pub fn is_zero(&self) -> bool {
        self.as_constant().map_or(false, |value| value == 0.0)
    }

    /// Returns true if the expression is a coordinate or function leaf, i.e. something a
    /// polynomial can be taken in.
    pub fn is_variable(&self) -> bool {
        matches!(self.node(), ScalarExpr::Coordinate(_) | ScalarExpr::Function(_))
    }

    /// If the expression is a [`ScalarExpr::UnaryMinus`], returns the negated expression.
    pub fn as_unary_minus(&self) -> Option<&Self> {
        match self.node() {
            ScalarExpr::UnaryMinus(inner) => Some(inner),
            _ => None,
        }
    }

    /// If the expression is a [`ScalarExpr::Sum`], returns its operands.
    pub fn as_sum(&self) -> Option<&SumExpr> {
        match self.node() {
            ScalarExpr::Sum(sum) => Some(sum),
            _ => None,
        }
    }

    /// If the expression is a [`ScalarExpr::Polynomial`], returns the polynomial.
    pub fn as_polynomial(&self) -> Option<&Polynomial> {
        match self.node() {
            ScalarExpr::Polynomial(poly) => Some(poly),
            _ => None,
        }
    }

    /// If the expression is a [`ScalarExpr::SumOfIntegrals`], returns the aggregate.
    pub fn as_sum_of_integrals(&self) -> Option<&SumOfIntegrals> {
        match self.node() {
            ScalarExpr::SumOfIntegrals(sum) => Some(sum),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Integral`] or a [`SumOfIntegrals`].
    pub fn is_integral_aggregate(&self) -> bool {
        matches!(self.node(), ScalarExpr::Integral(_) | ScalarExpr::SumOfIntegrals(_))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the given expression appears anywhere in this expression.
    pub fn depends_on(&self, other: &Self) -> bool {
        self.post_order_iter().any(|expr| expr == other)
    }

    /// Returns true if a test function appears anywhere in this expression.
    pub fn has_test_functions(&self) -> bool {
        self.post_order_iter().any(|expr| {
            matches!(expr.node(), ScalarExpr::Function(FunctionElement { kind: FunctionKind::Test, .. }))
        })
    }
}

impl Deref for Expr {
    type Target = ScalarExpr;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Checks if two expressions are structurally equal. Aliased handles are equal without
/// inspecting the node.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node(), f)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<Coordinate> for Expr {
    fn from(coord: Coordinate) -> Self {
        Self::coordinate(coord)
    }
}

/// Builds the canonical sum of two expressions. See [`Expr::sum`].
impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::sum(self, rhs, Sign::Plus)
    }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::sum(&self, &rhs, Sign::Plus)
    }
}

/// Builds the canonical difference of two expressions. See [`Expr::sum`].
impl Sub for &Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::sum(self, rhs, Sign::Minus)
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::sum(&self, &rhs, Sign::Minus)
    }
}

/// Negates the expression. See [`Expr::negate`].
impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// Builds a plain product node. See [`Expr::product`].
impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::product(self.clone(), rhs.clone())
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::product(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::coordinate(Coordinate::X)
    }

    #[test]
    fn coordinate_out_of_range() {
        assert_eq!(Coordinate::new(1), Ok(Coordinate::Y));
        assert_eq!(Coordinate::new(3), Err(Error::InvalidCoordinate(3)));
    }

    #[test]
    fn structural_equality() {
        let a = Expr::raw_sum(x(), Expr::unknown("u"), Sign::Plus);
        let b = Expr::raw_sum(x(), Expr::unknown("u"), Sign::Plus);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));

        // operand order matters
        let c = Expr::raw_sum(Expr::unknown("u"), x(), Sign::Plus);
        assert_ne!(a, c);

        let alias = a.clone();
        assert!(alias.ptr_eq(&a));
    }

    #[test]
    fn negate_folds() {
        assert_eq!(Expr::constant(2.0).negate(), Expr::constant(-2.0));
        assert_eq!(x().negate().negate(), x());
        assert_eq!(x().negate(), Expr::unary_minus(x()));

        let poly = Expr::polynomial(x(), [1.0, -2.0]).unwrap();
        assert_eq!(poly.negate(), Expr::polynomial(x(), [-1.0, 2.0]).unwrap());
    }

    #[test]
    fn negate_zero_keeps_sign_bit() {
        let neg_zero = Expr::constant(0.0).negate();
        assert!(neg_zero.is_zero());
        assert!(neg_zero.as_constant().unwrap().is_sign_negative());
    }

    #[test]
    fn polynomial_requires_variable() {
        let err = Expr::polynomial(Expr::constant(1.0), [1.0, 1.0]).unwrap_err();
        assert_eq!(err, Error::NotAVariable("1".to_string()));
    }

    #[test]
    fn fmt_expr() {
        let u = Expr::unknown("u");
        let v = Expr::test("v");
        let sum = Expr::raw_sum(u.clone(), Expr::raw_sum(v.clone(), x(), Sign::Plus), Sign::Minus);
        assert_eq!(sum.to_string(), "u - (v + x)");

        let neg = Expr::unary_minus(Expr::raw_sum(u.clone(), v.clone(), Sign::Plus));
        assert_eq!(neg.to_string(), "-(u + v)");

        let product = Expr::product(Expr::constant(2.0), Expr::raw_sum(u, v, Sign::Plus));
        assert_eq!(product.to_string(), "2*(u + v)");
    }

    #[test]
    fn test_function_queries() {
        let v = Expr::test("v");
        let f = Expr::discrete("f");
        let expr = Expr::product(v.clone(), f.clone());
        assert!(expr.has_test_functions());
        assert!(expr.depends_on(&f));
        assert!(!f.has_test_functions());
        assert!(!f.depends_on(&v));
    }
}
