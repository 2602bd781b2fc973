//! Sparse and dense matrix types, vector math and the scaled triangular
//! basis used by the Schur complement kernels.
//!
//! All internal matrix data is provided either in standard compressed
//! sparse column format ([`CscMatrix`]) or as a column major dense
//! [`Matrix`].

mod error_types;
pub use error_types::*;
mod floats;
pub use floats::*;
mod math_traits;
pub use math_traits::*;
mod matrix_traits;
pub use matrix_traits::*;
mod matrix_types;
pub use matrix_types::*;
mod scalarmath;
pub use scalarmath::*;
mod vecmath;

mod csc;
pub use csc::*;
mod dense;
pub use dense::*;
mod svec;
pub use svec::*;

#[cfg(test)]
mod tests;
