//! LU factorization and the LU-based inversion baseline.
//!
//! Independent of the Strassen path: no recursion, no padding, any `n`.
//! Serves as a cross-check for [`block_inverse`](crate::strassen::inverse::block_inverse).

pub mod decompose;
pub mod inverse;
