#![allow(non_snake_case)]

// Scaled triangular ("svec") representation of symmetric matrices.
//
// A symmetric n × n matrix X is represented by the n(n+1)/2 entries of
// its upper triangle, packed column by column, with every off-diagonal
// entry multiplied by √2.  With this scaling the Euclidean inner product
// of two packed vectors equals the trace inner product of the matrices,
// i.e. Trace(X*Y) = svec(X)ᵀ svec(Y).  The Schur kernels store their
// constraint data in this basis and undo the scaling with 1/√2 where
// a stored entry must be paired with a plain (unscaled) matrix entry.

use crate::algebra::{triangular_number, FloatT, Matrix, ShapedMatrix, VectorMath};

/// Weight applied to off-diagonal entries in the scaled triangular basis, i.e. `√2`.
#[inline]
pub fn svec_scale<T: FloatT>() -> T {
    T::SQRT_2()
}

/// Inverse of [`svec_scale`], i.e. `1/√2`.
#[inline]
pub fn svec_unscale<T: FloatT>() -> T {
    T::FRAC_1_SQRT_2()
}

/// Pack the upper triangle of the symmetric matrix `X` into `x`.
///
/// # Panics
/// Panics if `X` is not square or `x` has the wrong length.
pub fn mat_to_svec<T: FloatT>(x: &mut [T], X: &Matrix<T>) {
    assert!(X.is_square());
    assert_eq!(x.len(), triangular_number(X.ncols()));

    let sqrt2 = svec_scale::<T>();
    let mut idx = 0;
    for col in 0..X.ncols() {
        for row in 0..=col {
            x[idx] = if row == col {
                X[(row, col)]
            } else {
                sqrt2 * X[(row, col)]
            };
            idx += 1;
        }
    }
}

/// Unpack `x` into the full symmetric matrix `X`, filling both triangles.
///
/// # Panics
/// Panics if `X` is not square or `x` has the wrong length.
pub fn svec_to_mat<T: FloatT>(X: &mut Matrix<T>, x: &[T]) {
    assert!(X.is_square());
    assert_eq!(x.len(), triangular_number(X.ncols()));

    let isqrt2 = svec_unscale::<T>();
    let mut idx = 0;
    for col in 0..X.ncols() {
        for row in 0..=col {
            if row == col {
                X[(row, col)] = x[idx];
            } else {
                X[(row, col)] = isqrt2 * x[idx];
                X[(col, row)] = isqrt2 * x[idx];
            }
            idx += 1;
        }
    }
}

/// `Trace(X*Y)` of two symmetric matrices given in scaled triangular form.
pub fn svec_inner<T: FloatT>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len());
    x.dot(y)
}
