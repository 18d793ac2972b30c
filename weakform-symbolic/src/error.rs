//! Errors raised while constructing expression nodes.
//!
//! Canonicalization itself cannot fail: a rule either rewrites a sum or declines to. The errors
//! here come from the fallible constructors of the expression layer.

/// Represents any error that can occur while building an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An integer other than `1` or `-1` was used as the sign of a sum.
    #[error("`{0}` is not a valid sum sign, expected `1` or `-1`")]
    InvalidSign(i32),

    /// A polynomial was requested in something that is not a coordinate or function leaf.
    #[error("polynomials must be taken in a coordinate or function, found `{0}`")]
    NotAVariable(String),

    /// A coordinate direction outside of `0..=2` was requested.
    #[error("coordinate direction `{0}` is out of range, expected 0, 1, or 2")]
    InvalidCoordinate(usize),

    /// Every region of a sum of integrals is a null region.
    #[error("sum of integrals has no non-null region")]
    NoNonNullRegion,
}
