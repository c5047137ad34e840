use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strassen::lu::decompose::lu_decompose;
use strassen::strassen::inverse::block_inverse;
use strassen::{
    Config, Matrix, MatrixError, PadFill, invert, invert_via_lu, invert_with, multiply,
    naive_multiply,
};

/// Random matrix with a dominant diagonal, so every leading block and every
/// Schur complement along the recursion stays invertible.
fn diagonally_dominant(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::from_fn(n, n, |i, j| {
        let x: f64 = rng.gen_range(-1.0..1.0);
        if i == j { x + n as f64 + 1.0 } else { x }
    })
}

fn assert_is_identity(m: &Matrix, tol: f64, name: &str) {
    let n = m.rows();
    assert!(m.is_square(), "{}: not square", name);
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!(
                (m[(i, j)] - expected).abs() < tol,
                "{}: ({}, {}) = {}, expected {}",
                name,
                i,
                j,
                m[(i, j)],
                expected
            );
        }
    }
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn test_invert_2x2() {
    let a = Matrix::from_rows(&[[4.0, 3.0], [6.0, 3.0]]).unwrap();
    let inv = invert(&a).unwrap();

    assert_relative_eq!(inv[(0, 0)], -0.5, epsilon = 1e-12);
    assert_relative_eq!(inv[(0, 1)], 0.5, epsilon = 1e-12);
    assert_relative_eq!(inv[(1, 0)], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(inv[(1, 1)], -0.667, epsilon = 1e-3);

    assert_is_identity(&multiply(&a, &inv).unwrap(), 1e-12, "a * a_inv");
}

#[test]
fn test_invert_singular_2x2() {
    let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();

    assert!(matches!(
        invert(&a),
        Err(MatrixError::SingularMatrix { .. })
    ));
}

#[test]
fn test_invert_zero_leading_entry() {
    // Invertible, but the leading 1x1 block is zero and there is no pivoting.
    let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();

    assert_eq!(invert(&a), Err(MatrixError::SingularMatrix { index: 0 }));
    // The LU path fails the same way; neither pivots.
    assert_eq!(invert_via_lu(&a), Err(MatrixError::SingularMatrix { index: 0 }));
}

#[test]
fn test_invert_singular_schur_deeper() {
    // Leading 2x2 block is invertible, the 2x2 Schur complement is zero.
    let a = Matrix::from_rows(&[
        [1.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 1.0],
    ])
    .unwrap();

    assert_eq!(invert(&a), Err(MatrixError::SingularMatrix { index: 2 }));
}

#[test]
fn test_invert_identity() {
    for n in [1, 2, 4, 8, 16] {
        let inv = invert(&Matrix::identity(n)).unwrap();
        assert_eq!(inv, Matrix::identity(n), "identity_{}", n);
    }
}

#[test]
fn test_invert_1x1() {
    let a = Matrix::from_rows(&[[-8.0]]).unwrap();
    assert_eq!(invert(&a).unwrap()[(0, 0)], -0.125);

    let zero = Matrix::zeros(1, 1);
    assert_eq!(invert(&zero), Err(MatrixError::SingularMatrix { index: 0 }));
}

#[test]
fn test_wide_dynamic_range_diagonal() {
    let diag = [1e10, 1.0, 1e-3, 1e-7];
    let a = Matrix::from_fn(4, 4, |i, j| if i == j { diag[i] } else { 0.0 });

    let via_blocks = invert(&a).unwrap();
    let via_lu = invert_via_lu(&a).unwrap();

    for i in 0..4 {
        assert_relative_eq!(via_blocks[(i, i)], 1.0 / diag[i], max_relative = 1e-15);
        assert_relative_eq!(via_lu[(i, i)], 1.0 / diag[i], max_relative = 1e-15);
    }
}

#[test]
fn test_cancelled_pivot_rejected_by_both_paths() {
    // Second row is three times the first, up to rounding of 0.1 and 0.3.
    let a = Matrix::from_rows(&[[0.1, 0.3], [0.3, 0.9]]).unwrap();

    assert!(matches!(
        invert(&a),
        Err(MatrixError::NumericalInstability { index: 1, .. })
    ));
    assert!(matches!(
        invert_via_lu(&a),
        Err(MatrixError::NumericalInstability { index: 1, .. })
    ));
}

#[test]
fn test_singular_tolerance_through_config() {
    let a = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 1e-4, 0.0], [0.0, 0.0, 3.0]]).unwrap();

    assert!(invert(&a).is_ok());

    let strict = Config::default().with_singular_tolerance(1e-3);
    assert_eq!(invert_with(&a, &strict), Err(MatrixError::SingularMatrix { index: 1 }));

    // A negative band is the same as none.
    let negative = Config::default().with_singular_tolerance(-1.0);
    assert_eq!(invert_with(&a, &negative), invert(&a));
    let zero = Matrix::zeros(2, 2);
    assert_eq!(invert_with(&zero, &negative), Err(MatrixError::SingularMatrix { index: 0 }));
}

// ============================================================
// Random power-of-two sizes
// ============================================================

#[test]
fn test_invert_power_of_two_sizes() {
    for n in [2, 4, 8, 16, 32] {
        let a = diagonally_dominant(n, n as u64);
        let inv = invert_with(&a, &Config::default().with_threshold(2)).unwrap();

        assert_is_identity(&naive_multiply(&a, &inv).unwrap(), 1e-10, &format!("a_inv_{}", n));
        assert_is_identity(&naive_multiply(&inv, &a).unwrap(), 1e-10, &format!("inv_a_{}", n));
    }
}

#[test]
fn test_threshold_does_not_change_inverse_much() {
    let a = diagonally_dominant(32, 99);

    let naive_products = invert_with(&a, &Config::default().with_threshold(64)).unwrap();
    let deep_strassen = invert_with(&a, &Config::default().with_threshold(1)).unwrap();

    assert!(naive_products.approx_eq(&deep_strassen, 1e-12));
}

#[test]
fn test_block_inverse_rejects_non_power_of_two() {
    let a = diagonally_dominant(6, 1);

    assert!(matches!(
        block_inverse(&a, &Config::default()),
        Err(MatrixError::ShapeMismatch { .. })
    ));
}

// ============================================================
// Padding path
// ============================================================

#[test]
fn test_invert_non_power_of_two_sizes() {
    for n in [3, 5, 6, 7, 12] {
        let a = diagonally_dominant(n, 1000 + n as u64);
        let inv = invert(&a).unwrap();

        assert_eq!(inv.shape(), (n, n));
        assert_is_identity(&naive_multiply(&a, &inv).unwrap(), 1e-10, &format!("padded_{}", n));
    }
}

#[test]
fn test_invert_rejects_rectangular() {
    let a = Matrix::zeros(2, 3);

    assert!(matches!(
        invert(&a),
        Err(MatrixError::ShapeMismatch { op: "invert", .. })
    ));
    assert!(matches!(
        invert_via_lu(&a),
        Err(MatrixError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_off_diagonal_pad_fill_is_selectable() {
    let a = diagonally_dominant(3, 5);
    let coupled = Config::default().with_pad_fill(PadFill::Identity { off_diagonal: 0.01 });

    // The border is coupled to A, so the cut-out block is not A's inverse,
    // but the padded matrix stays invertible.
    let inv = invert_with(&a, &coupled).unwrap();
    assert_eq!(inv.shape(), (3, 3));
    assert!(!inv.approx_eq(&invert(&a).unwrap(), 1e-12));
}

#[test]
fn test_zero_pad_fill_makes_padding_singular() {
    let a = diagonally_dominant(3, 5);
    let zero_fill = Config::default().with_pad_fill(PadFill::Zero);

    assert_eq!(
        invert_with(&a, &zero_fill),
        Err(MatrixError::SingularMatrix { index: 3 })
    );
}

// ============================================================
// LU baseline
// ============================================================

#[test]
fn test_lu_factors_reproduce_input() {
    let a = diagonally_dominant(6, 42);
    let lu = lu_decompose(&a).unwrap();

    for i in 0..6 {
        assert_eq!(lu.l()[(i, i)], 1.0);
        for j in i + 1..6 {
            assert_eq!(lu.l()[(i, j)], 0.0);
            assert_eq!(lu.u()[(j, i)], 0.0);
        }
    }

    let product = naive_multiply(lu.l(), lu.u()).unwrap();
    assert!(product.approx_eq(&a, 1e-12));
}

#[test]
fn test_lu_solve() {
    let a = Matrix::from_rows(&[[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]]).unwrap();
    let lu = lu_decompose(&a).unwrap();

    let x = lu.solve(&[5.0, -2.0, 9.0]).unwrap();

    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[2], 2.0, epsilon = 1e-12);

    assert!(matches!(
        lu.solve(&[1.0, 2.0]),
        Err(MatrixError::ShapeMismatch { op: "solve", .. })
    ));
}

#[test]
fn test_lu_singular() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();

    assert_eq!(invert_via_lu(&a), Err(MatrixError::SingularMatrix { index: 2 }));
}

#[test]
fn test_lu_near_singular_is_reported() {
    let a = Matrix::from_rows(&[[1.0, 1.0], [1.0, 1.0 + 1e-17]]).unwrap();

    // 1 + 1e-17 rounds to 1, so the pivot is exactly zero.
    assert_eq!(invert_via_lu(&a), Err(MatrixError::SingularMatrix { index: 1 }));

    // One ulp away from singular: the pivot survives but is below n·ε times
    // the terms it was computed from.
    let tiny = Matrix::from_rows(&[[1.0, 1.0], [1.0, 1.0 + f64::EPSILON]]).unwrap();
    assert!(matches!(
        invert_via_lu(&tiny),
        Err(MatrixError::NumericalInstability { index: 1, .. })
    ));
}

#[test]
fn test_lu_any_size() {
    for n in [1, 3, 5, 10] {
        let a = diagonally_dominant(n, 7 * n as u64);
        let inv = invert_via_lu(&a).unwrap();

        assert_is_identity(&naive_multiply(&a, &inv).unwrap(), 1e-10, &format!("lu_{}", n));
    }
}

#[test]
fn test_lu_and_block_inverse_agree() {
    for n in [2, 4, 7, 8, 16] {
        let a = diagonally_dominant(n, 300 + n as u64);

        let via_lu = invert_via_lu(&a).unwrap();
        let via_blocks = invert(&a).unwrap();

        assert!(
            via_lu.approx_eq(&via_blocks, 1e-10),
            "size {}: max diff {}",
            n,
            via_lu.max_abs_diff(&via_blocks).unwrap()
        );
    }
}
