//! Symbolic expressions for PDE weak forms, and the canonicalization of the sums built from them.
//!
//! Expressions are immutable, reference-counted trees of [`ScalarExpr`](symbolic::expr::ScalarExpr)
//! nodes, addressed through the cheap-to-clone [`Expr`](symbolic::Expr) handle. Whenever a sum
//! `left + sign*right` is constructed, a fixed sequence of rewrite rules gets the chance to replace
//! it with a more canonical, equivalent expression. See the [`symbolic`] module for details.
//!
//! ```
//! use weakform_symbolic::symbolic::{expr::Coordinate, Expr};
//!
//! let x = Expr::coordinate(Coordinate::X);
//!
//! // constants are hoisted to the left of a sum
//! let sum = &x + &Expr::constant(5.0);
//! assert_eq!(sum.to_string(), "5 + x");
//! ```

pub mod error;
pub mod symbolic;

pub use error::Error;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber that prints the rewrite rules as they fire.
///
/// Only has an effect the first time it is called, and only if `RUST_LOG` is set, e.g.
/// `RUST_LOG=weakform_symbolic=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
