//! Builds a few sums and prints their canonical forms, along with the rules that produced them.
//!
//! Set `RUST_LOG=weakform_symbolic=trace` to see every rule as it fires.

use weakform_symbolic::{
    init_tracing,
    symbolic::{
        expr::{Coordinate, Quadrature, Region},
        try_canonicalize_sum_with_steps,
        Expr,
        Sign,
        Step,
    },
    Error,
};

/// Canonicalizes `left + sign*right` and prints the result.
fn show(left: &Expr, right: &Expr, sign: Sign) {
    let mut steps = Vec::<Step>::new();
    let canonical = try_canonicalize_sum_with_steps(left, right, sign, &mut steps)
        .unwrap_or_else(|| Expr::raw_sum(left.clone(), right.clone(), sign));

    println!("({}) {} ({})", left, sign, right);
    println!("  = {}", canonical);
    if steps.is_empty() {
        println!("  (already canonical)");
    }
    for step in steps {
        println!("  - {}", step);
    }
}

fn main() -> Result<(), Error> {
    init_tracing();

    let x = Expr::coordinate(Coordinate::X);
    let y = Expr::coordinate(Coordinate::new(1)?);
    let u = Expr::unknown("u");
    let v = Expr::test("v");
    let f = Expr::discrete("f");

    show(&x, &Expr::constant(5.0), Sign::Plus);
    show(&Expr::constant(2.0), &Expr::constant(3.0), Sign::Minus);
    show(&u, &x.negate(), Sign::Plus);
    show(&x.negate(), &u, Sign::Minus);
    show(&(&Expr::constant(1.0) + &y), &u, Sign::Plus);
    show(&Expr::polynomial(x.clone(), [1.0, 2.0])?, &x, Sign::Plus);

    // a mass-matrix style weak form `∫uv - ∫fv`
    let omega = Region::new("Omega", 1);
    let quad = Quadrature::gauss(2);
    let stiffness = Expr::integral(omega.clone(), quad, &u * &v);
    let load = Expr::integral(omega, quad, f * v);
    show(&stiffness, &load, Sign::Minus);

    Ok(())
}
