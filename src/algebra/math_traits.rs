// All internal vector math for the Schur kernels goes through
// this trait, implemented generically for slices of FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// set all elements to the same value
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Infinity norm of the elementwise difference `self - b`
    fn norm_inf_diff(&self, b: &Self) -> Self::T;
}
