//! Block-recursive algorithms on power-of-two squares.
//!
//! Available implementations:
//! - `multiply`: Strassen's seven-product recursion with a naive base case
//! - `inverse`: Schur-complement inversion built on `multiply`
//!
//! Both expect operands already padded to a power-of-two square; the crate
//! root functions take care of that.

pub mod inverse;
pub mod multiply;
