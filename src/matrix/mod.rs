//! Matrix storage, elementwise arithmetic, naive multiplication and padding.
//!
//! These are the building blocks the recursive algorithms in
//! [`strassen`](crate::strassen) are assembled from, and the baselines they
//! are checked against.

pub mod buffer;
pub mod elementwise;
pub mod naive_ijk;
pub mod naive_ikj;
pub mod pad;
