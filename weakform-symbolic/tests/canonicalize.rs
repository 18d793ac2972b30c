use assert_float_eq::{
    afe_abs,
    afe_relative_error_msg,
    afe_is_relative_eq,
    assert_float_relative_eq,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use weakform_symbolic::symbolic::{
    expr::{Coordinate, Integral, Quadrature, Region},
    transform::{StdSumTransformations, STD_SUM_TRANSFORMATIONS},
    try_canonicalize_sum,
    try_canonicalize_sum_with_steps,
    Expr,
    ScalarExpr,
    Sign,
    Step,
};

fn x() -> Expr {
    Expr::coordinate(Coordinate::X)
}

fn u() -> Expr {
    Expr::unknown("u")
}

fn c(value: f64) -> Expr {
    Expr::constant(value)
}

/// Evaluates an expression with fixed values for every coordinate and function.
fn eval(expr: &Expr) -> f64 {
    match expr.node() {
        ScalarExpr::Constant(value) => *value,
        ScalarExpr::Coordinate(coord) => [0.3, -1.7, 2.1][coord.dir()],
        ScalarExpr::Function(func) => match func.name.as_str() {
            "u" => 0.9,
            "v" => -0.4,
            _ => 1.25,
        },
        ScalarExpr::UnaryMinus(inner) => -eval(inner),
        ScalarExpr::Sum(sum) => eval(&sum.left) + sum.sign.apply(eval(&sum.right)),
        ScalarExpr::Product(left, right) => eval(left) * eval(right),
        ScalarExpr::Polynomial(poly) => poly.evaluate(eval(poly.variable())),
        ScalarExpr::Integral(_) | ScalarExpr::SumOfIntegrals(_) => {
            panic!("cannot evaluate an integral")
        },
    }
}

/// Generates a random leaf.
fn random_leaf(rng: &mut StdRng) -> Expr {
    match rng.gen_range(0..7) {
        0 => c(rng.gen_range(-3..=3) as f64),
        1 => c(0.0),
        2 => x(),
        3 => Expr::coordinate(Coordinate::Y),
        4 => u(),
        5 => Expr::test("v"),
        _ => Expr::discrete("f"),
    }
}

fn random_sign(rng: &mut StdRng) -> Sign {
    if rng.gen_bool(0.5) {
        Sign::Plus
    } else {
        Sign::Minus
    }
}

/// Generates a random expression, mixing canonical sums with deliberately non-canonical nodes.
fn random_expr(rng: &mut StdRng, depth: usize) -> Expr {
    if depth == 0 {
        return random_leaf(rng);
    }

    match rng.gen_range(0..7) {
        0 => random_leaf(rng),
        1 | 2 => {
            let left = random_expr(rng, depth - 1);
            let right = random_expr(rng, depth - 1);
            Expr::sum(&left, &right, random_sign(rng))
        },
        3 => random_expr(rng, depth - 1).negate(),
        4 => Expr::unary_minus(random_expr(rng, depth - 1)),
        5 => Expr::product(c(rng.gen_range(1..=4) as f64), random_expr(rng, depth - 1)),
        _ => {
            let coeffs = (0..rng.gen_range(2..=4))
                .map(|_| rng.gen_range(-2..=2) as f64)
                .collect::<Vec<_>>();
            Expr::polynomial(x(), coeffs).unwrap()
        },
    }
}

/// Canonicalizes a batch of random sums, returning their display forms.
fn canonical_forms(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..32)
        .map(|_| {
            let left = random_expr(&mut rng, 3);
            let right = random_expr(&mut rng, 3);
            Expr::sum(&left, &right, random_sign(&mut rng)).to_string()
        })
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * (1.0 + expected.abs());
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual,
    );
}

#[test]
fn rule_order() {
    assert_eq!(STD_SUM_TRANSFORMATIONS.rule_names(), vec![
        "IdentifyPolynomialSum",
        "ReorderSum",
        "RemoveUnaryMinusFromSum",
        "RemoveZeroFromSum",
        "SumConstants",
        "MoveConstantsToLeftOfSum",
        "RearrangeRightSumWithConstant",
        "RearrangeLeftSumWithConstant",
        "SumIntegrals",
    ]);
    assert_eq!(StdSumTransformations::default().rule_names(), STD_SUM_TRANSFORMATIONS.rule_names());
}

#[test]
fn zero_identity() {
    assert_eq!(try_canonicalize_sum(&x(), &c(0.0), Sign::Plus), Some(x()));
    assert_eq!(try_canonicalize_sum(&x(), &c(0.0), Sign::Minus), Some(x()));
    assert_eq!(try_canonicalize_sum(&c(0.0), &x(), Sign::Plus), Some(x()));
    assert_eq!(try_canonicalize_sum(&c(0.0), &x(), Sign::Minus), Some(Expr::unary_minus(x())));

    // the zero is removed before constants are folded
    assert_eq!(try_canonicalize_sum(&c(0.0), &c(3.0), Sign::Minus), Some(c(-3.0)));
}

#[test]
fn constant_folding() {
    let sum = try_canonicalize_sum(&c(2.0), &c(3.0), Sign::Plus).unwrap();
    assert_float_relative_eq!(sum.as_constant().unwrap(), 5.0);

    let difference = try_canonicalize_sum(&c(2.0), &c(3.0), Sign::Minus).unwrap();
    assert_float_relative_eq!(difference.as_constant().unwrap(), -1.0);
}

#[test]
fn constant_hoisting() {
    let sum = Expr::sum(&x(), &c(5.0), Sign::Plus);
    assert_eq!(sum, Expr::raw_sum(c(5.0), x(), Sign::Plus));
    assert_eq!(sum.to_string(), "5 + x");

    let difference = &x() - &c(5.0);
    assert_eq!(difference.to_string(), "-5 + x");
}

#[test]
fn unary_minus_rewrites() {
    let neg_u = u().negate();
    let neg_x = x().negate();

    assert_eq!(&x() + &neg_u, Expr::raw_sum(x(), u(), Sign::Minus));
    assert_eq!(&x() - &neg_u, Expr::raw_sum(x(), u(), Sign::Plus));
    assert_eq!(&neg_x + &neg_u, Expr::unary_minus(Expr::raw_sum(x(), u(), Sign::Plus)));
    assert_eq!(&neg_x - &neg_u, Expr::unary_minus(Expr::raw_sum(x(), u(), Sign::Minus)));
    assert_eq!(&neg_x + &u(), Expr::raw_sum(u(), x(), Sign::Minus));
    assert_eq!(&neg_x - &u(), Expr::unary_minus(Expr::raw_sum(x(), u(), Sign::Plus)));
}

#[test]
fn ordering_stability() {
    let y = Expr::coordinate(Coordinate::Y);
    assert_eq!(&u() + &x(), &x() + &u());
    assert_eq!(&y + &x(), &x() + &y);
    assert_eq!((&u() + &x()).to_string(), "x + u");

    let swapped = try_canonicalize_sum(&u(), &x(), Sign::Plus).unwrap();
    let sum = swapped.as_sum().unwrap();
    assert_eq!((&sum.left, &sum.right), (&x(), &u()));
    assert_eq!(try_canonicalize_sum(&sum.left, &sum.right, sum.sign), None);

    // differences are never reordered
    assert_eq!((&u() - &x()).to_string(), "u - x");
}

#[test]
fn negative_zero_is_removed() {
    let x = x();
    let neg_zero = Expr::unary_minus(c(0.0));
    let result = try_canonicalize_sum(&x, &neg_zero, Sign::Plus).unwrap();
    assert_eq!(result, x);
    assert!(result.ptr_eq(&x));
}

#[test]
fn integral_merging() {
    let omega = Region::new("Omega", 2);
    let quad = Quadrature::gauss(2);
    let first = Integral::new(omega.clone(), quad, Expr::test("v"));
    let second = Integral::new(omega.clone(), quad, u());

    let sum = Expr::sum(
        &Expr::integral(omega.clone(), quad, Expr::test("v")),
        &Expr::integral(omega, quad, u()),
        Sign::Plus,
    );
    let sum = sum.as_sum_of_integrals().unwrap();
    assert_eq!(sum.terms(), &[first, second]);
    assert_eq!(sum.num_region_quad_combos(), 1);
}

#[test]
fn integral_difference_negates_right_terms() {
    let omega = Region::new("Omega", 2);
    let gamma = Region::new("Gamma", 1);
    let quad = Quadrature::gauss(2);
    let a = Expr::integral(omega, quad, Expr::test("v"));
    let b = Expr::integral(gamma, quad, u());

    let sum = &(&a - &b) + &a;
    let terms = sum.as_sum_of_integrals().unwrap().terms();
    assert_eq!(terms.len(), 3);
    assert_eq!(terms[1].integrand(), &Expr::unary_minus(u()));
    assert_eq!(terms[2].integrand(), &Expr::test("v"));
}

#[test]
fn polynomial_identification() {
    let poly = Expr::polynomial(x(), [1.0, 2.0]).unwrap();
    let result = Expr::sum(&poly, &Expr::product(c(3.0), x()), Sign::Minus);
    assert_eq!(result, Expr::polynomial(x(), [1.0, -1.0]).unwrap());
    assert_eq!(result.to_string(), "1 - x");

    // without a polynomial operand, nothing is identified
    assert_eq!((&x() + &c(5.0)).as_polynomial(), None);
}

#[test]
fn regrouping() {
    // (1 + x) + (2 + u) = 3 + (x + u)
    let left = &c(1.0) + &x();
    let right = &c(2.0) + &u();
    let expected = Expr::raw_sum(c(3.0), Expr::raw_sum(x(), u(), Sign::Plus), Sign::Plus);
    assert_eq!(&left + &right, expected);
    assert_eq!(expected.to_string(), "3 + (x + u)");

    // (5 - x) - 3 = 2 - x
    let left = &c(5.0) - &x();
    assert_eq!(&left - &c(3.0), Expr::raw_sum(c(2.0), x(), Sign::Minus));
}

#[test]
fn step_recording() {
    let mut steps = Vec::<Step>::new();
    try_canonicalize_sum_with_steps(&x(), &c(5.0), Sign::Plus, &mut steps);
    assert_eq!(steps, vec![Step::MoveConstantsToLeftOfSum]);

    // (5 + u) + 3: the constant moves left, then the nested constants are combined
    let left = &u() + &c(5.0);
    let mut steps = Vec::<Step>::new();
    let result = try_canonicalize_sum_with_steps(&left, &c(3.0), Sign::Plus, &mut steps);
    assert_eq!(result, Some(Expr::raw_sum(c(8.0), u(), Sign::Plus)));
    assert_eq!(steps, vec![Step::RearrangeRightSumWithConstant, Step::MoveConstantsToLeftOfSum]);

    let mut count = 0usize;
    try_canonicalize_sum_with_steps(&left, &c(3.0), Sign::Plus, &mut count);
    assert_eq!(count, 2);

    let mut steps = Vec::<Step>::new();
    assert_eq!(try_canonicalize_sum_with_steps(&x(), &u(), Sign::Plus, &mut steps), None);
    assert!(steps.is_empty());
}

#[test]
fn random_sums_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let left = random_expr(&mut rng, 3);
        let right = random_expr(&mut rng, 3);
        let sign = random_sign(&mut rng);

        let canonical = Expr::sum(&left, &right, sign);
        if let Some(sum) = canonical.as_sum() {
            assert_eq!(
                try_canonicalize_sum(&sum.left, &sum.right, sum.sign),
                None,
                "{} was built from {} {} {}",
                canonical,
                left,
                sign,
                right,
            );
        }
    }
}

#[test]
fn random_sums_preserve_value() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let left = random_expr(&mut rng, 3);
        let right = random_expr(&mut rng, 3);
        let sign = random_sign(&mut rng);

        let canonical = Expr::sum(&left, &right, sign);
        assert_close(eval(&canonical), eval(&left) + sign.apply(eval(&right)));
    }
}

#[test]
fn random_sums_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let left = random_expr(&mut rng, 3);
        let right = random_expr(&mut rng, 3);
        let sign = random_sign(&mut rng);

        let mut first_steps = Vec::<Step>::new();
        let mut second_steps = Vec::<Step>::new();
        let first = try_canonicalize_sum_with_steps(&left, &right, sign, &mut first_steps);
        let second = try_canonicalize_sum_with_steps(&left, &right, sign, &mut second_steps);
        assert_eq!(first, second);
        assert_eq!(first_steps, second_steps);
    }

    assert_eq!(canonical_forms(11), canonical_forms(11));
}

#[test]
fn concurrent_canonicalization() {
    let sequential = (0..16u64).map(canonical_forms).collect::<Vec<_>>();
    let parallel = (0..16u64)
        .into_par_iter()
        .map(canonical_forms)
        .collect::<Vec<_>>();
    assert_eq!(sequential, parallel);
}
