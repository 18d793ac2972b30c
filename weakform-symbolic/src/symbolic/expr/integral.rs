use crate::error::Error;
use std::fmt;
use super::{Expr, ScalarExpr, Sign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque descriptor of the set of cells an integral is taken over.
///
/// A **null** region contains no cells; integrals over it contribute nothing, but still carry the
/// dimension of the region they stand in for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    name: String,
    dimension: usize,
    null: bool,
}

impl Region {
    /// Creates a named region of the given dimension.
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
            null: false,
        }
    }

    /// Creates the null region of the given dimension.
    pub fn null(dimension: usize) -> Self {
        Self {
            name: "null".to_string(),
            dimension,
            null: true,
        }
    }

    /// Returns the name of the region.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dimension of the cells in the region.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns true if this is a null region.
    pub fn is_null(&self) -> bool {
        self.null
    }

    /// Returns the null region with the same dimension as this one.
    pub fn null_region(&self) -> Self {
        Self::null(self.dimension)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The family a quadrature rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuadratureFamily {
    Gauss,
    GaussLobatto,
}

/// An opaque descriptor of the quadrature rule used to evaluate an integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quadrature {
    /// The family of the rule.
    pub family: QuadratureFamily,

    /// The polynomial order the rule integrates exactly.
    pub order: usize,
}

impl Quadrature {
    /// Creates a Gaussian quadrature rule of the given order.
    pub fn gauss(order: usize) -> Self {
        Self { family: QuadratureFamily::Gauss, order }
    }

    /// Creates a Gauss-Lobatto quadrature rule of the given order.
    pub fn gauss_lobatto(order: usize) -> Self {
        Self { family: QuadratureFamily::GaussLobatto, order }
    }
}

impl fmt::Display for Quadrature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            QuadratureFamily::Gauss => write!(f, "Gauss({})", self.order),
            QuadratureFamily::GaussLobatto => write!(f, "GaussLobatto({})", self.order),
        }
    }
}

/// The integral of an expression over a region, evaluated with a quadrature rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Integral {
    region: Region,
    quadrature: Quadrature,
    integrand: Expr,
}

impl Integral {
    pub fn new(region: Region, quadrature: Quadrature, integrand: Expr) -> Self {
        Self { region, quadrature, integrand }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn quadrature(&self) -> &Quadrature {
        &self.quadrature
    }

    pub fn integrand(&self) -> &Expr {
        &self.integrand
    }

    /// Returns the same integral with its integrand negated.
    pub fn negated(&self) -> Self {
        Self {
            integrand: self.integrand.negate(),
            ..self.clone()
        }
    }

    /// Returns the same integral with its integrand multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            integrand: Expr::product(Expr::constant(factor), self.integrand.clone()),
            ..self.clone()
        }
    }
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integral[{}, {}]({})", self.region, self.quadrature, self.integrand)
    }
}

/// A list of integrals added together.
///
/// Terms are kept in the order they were added, and are never merged with each other, even if they
/// share a region and quadrature rule. Use [`SumOfIntegrals::grouped`] to collect the integrands
/// of each region / quadrature combination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SumOfIntegrals {
    terms: Vec<Integral>,
}

impl SumOfIntegrals {
    /// Creates a sum with a single term.
    pub fn new(first: Integral) -> Self {
        Self { terms: vec![first] }
    }

    /// Views an operand of a sum as a list of integrals. Returns [`None`] if the operand is neither
    /// an [`Integral`] nor a [`SumOfIntegrals`].
    pub fn from_operand(expr: &Expr) -> Option<Self> {
        match expr.node() {
            ScalarExpr::Integral(integral) => Some(Self::new(integral.clone())),
            ScalarExpr::SumOfIntegrals(sum) => Some(sum.clone()),
            _ => None,
        }
    }

    /// Returns the terms of the sum, in the order they were added.
    pub fn terms(&self) -> &[Integral] {
        &self.terms
    }

    /// Adds `sign*term` to the end of the sum.
    pub fn push(&mut self, term: Integral, sign: Sign) {
        match sign {
            Sign::Plus => self.terms.push(term),
            Sign::Minus => self.terms.push(term.negated()),
        }
    }

    /// Returns `self + sign*other`, with the terms of `other` following those of `self`.
    pub fn merge(&self, other: &Self, sign: Sign) -> Self {
        let mut merged = self.clone();
        for term in &other.terms {
            merged.push(term.clone(), sign);
        }
        merged
    }

    /// Returns the sum with every term negated.
    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(Integral::negated).collect(),
        }
    }

    /// Returns the sum with every integrand multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            terms: self.terms.iter().map(|term| term.scaled(factor)).collect(),
        }
    }

    /// Returns the number of distinct region / quadrature combinations among the terms.
    pub fn num_region_quad_combos(&self) -> usize {
        self.grouped().len()
    }

    /// Groups the integrands by region / quadrature combination.
    ///
    /// Combinations are listed in the order they first appear, and the integrands of each
    /// combination are added together with [`Expr::sum`], in the order they appear.
    pub fn grouped(&self) -> Vec<(Region, Quadrature, Expr)> {
        let mut groups: Vec<(Region, Quadrature, Expr)> = Vec::new();
        for term in &self.terms {
            let existing = groups.iter_mut()
                .find(|(region, quad, _)| region == term.region() && quad == term.quadrature());
            match existing {
                Some((_, _, integrand)) => {
                    *integrand = Expr::sum(integrand, term.integrand(), Sign::Plus);
                },
                None => groups.push((
                    term.region().clone(),
                    *term.quadrature(),
                    term.integrand().clone(),
                )),
            }
        }
        groups
    }

    /// Returns true if a test function appears in any integrand.
    pub fn has_test_functions(&self) -> bool {
        self.terms.iter().any(|term| term.integrand().has_test_functions())
    }

    /// Returns true if the given expression appears in none of the integrands.
    pub fn is_independent_of(&self, expr: &Expr) -> bool {
        self.terms.iter().all(|term| !term.integrand().depends_on(expr))
    }

    /// Returns the null counterpart of the first non-null region among the terms.
    pub fn null_region(&self) -> Result<Region, Error> {
        self.terms.iter()
            .map(Integral::region)
            .find(|region| !region.is_null())
            .map(Region::null_region)
            .ok_or(Error::NoNonNullRegion)
    }

    /// Wraps the sum in an expression node.
    pub fn into_expr(self) -> Expr {
        Expr::new(ScalarExpr::SumOfIntegrals(self))
    }
}

impl fmt::Display for SumOfIntegrals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self.terms.iter();
        if let Some(first) = terms.next() {
            write!(f, "{}", first)?;
        }
        for term in terms {
            write!(f, " + {}", term)?;
        }
        Ok(())
    }
}
