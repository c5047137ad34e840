//! Property-based tests for the recursive algorithms.

use proptest::prelude::*;
use strassen::matrix::pad::{PadFill, pad_to_power_of_two, unpad};
use strassen::strassen::multiply::strassen_multiply;
use strassen::{Matrix, invert, invert_via_lu, multiply, naive_multiply};

// Strategy for a matrix with the given extents and entries in [-10, 10]
fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-10.0f64..10.0, rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
}

// Strategy for a square power-of-two matrix pair
fn square_pair() -> impl Strategy<Value = (Matrix, Matrix)> {
    prop::sample::select(vec![1usize, 2, 4, 8, 16])
        .prop_flat_map(|n| (matrix(n, n), matrix(n, n)))
}

// Strategy for a diagonally dominant square matrix of any size up to 12
fn invertible() -> impl Strategy<Value = Matrix> {
    (1usize..=12).prop_flat_map(|n| {
        matrix(n, n).prop_map(move |m| {
            Matrix::from_fn(n, n, |i, j| {
                if i == j { m[(i, j)] + 11.0 * n as f64 } else { m[(i, j)] }
            })
        })
    })
}

fn max_abs(m: &Matrix) -> f64 {
    m.as_slice().iter().fold(1.0f64, |acc, x| acc.max(x.abs()))
}

proptest! {
    #[test]
    fn strassen_agrees_with_naive((a, b) in square_pair(), threshold in 1usize..=8) {
        let expected = naive_multiply(&a, &b).unwrap();
        let actual = strassen_multiply(&a, &b, threshold).unwrap();

        let tol = 1e-9 * max_abs(&expected);
        prop_assert!(expected.max_abs_diff(&actual).unwrap() <= tol);
    }

    #[test]
    fn multiply_pads_any_shape(
        (a, b) in (1usize..10, 1usize..10, 1usize..10)
            .prop_flat_map(|(m, k, n)| (matrix(m, k), matrix(k, n)))
    ) {
        let expected = naive_multiply(&a, &b).unwrap();
        let actual = multiply(&a, &b).unwrap();

        prop_assert_eq!(actual.shape(), expected.shape());
        prop_assert!(expected.max_abs_diff(&actual).unwrap() <= 1e-9 * max_abs(&expected));
    }

    #[test]
    fn unpad_of_pad_is_exact(
        a in (1usize..20, 1usize..20).prop_flat_map(|(r, c)| matrix(r, c)),
        off_diagonal in prop_oneof![Just(0.0), Just(0.01)],
        zero_fill in any::<bool>(),
    ) {
        let fill = if zero_fill { PadFill::Zero } else { PadFill::Identity { off_diagonal } };
        let padded = pad_to_power_of_two(&a, fill);

        prop_assert!(padded.size().is_power_of_two());
        prop_assert_eq!(unpad(padded.view(), a.rows(), a.cols()).unwrap(), a.clone());
    }

    #[test]
    fn lu_and_block_inverse_agree(a in invertible()) {
        let via_lu = invert_via_lu(&a).unwrap();
        let via_blocks = invert(&a).unwrap();

        prop_assert!(via_lu.approx_eq(&via_blocks, 1e-10));
    }
}
