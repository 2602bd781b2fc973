#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, Matrix, ShapedMatrix, VectorMath};
use std::ops::{Index, IndexMut};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        mat.set_identity();
        mat
    }

    /// Square diagonal matrix with the entries of `d` on the diagonal
    pub fn from_diag(d: &[T]) -> Self {
        let n = d.len();
        let mut mat = Matrix::zeros((n, n));
        for (i, &v) in d.iter().enumerate() {
            mat[(i, i)] = v;
        }
        mat
    }

    pub fn set_identity(&mut self) {
        assert!(self.m == self.n);
        self.data_mut().set(T::zero());
        for i in 0..self.n {
            self[(i, i)] = T::one();
        }
    }

    /// Matrix from column major data
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// True if the matrix is square and equal to its transpose
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        for c in 0..self.ncols() {
            for r in (c + 1)..self.nrows() {
                if self[(r, c)] != self[(c, r)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> ShapedMatrix for Matrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

/// Dense copy of a sparse matrix
impl<T> From<&CscMatrix<T>> for Matrix<T>
where
    T: FloatT,
{
    fn from(A: &CscMatrix<T>) -> Matrix<T> {
        let mut M = Matrix::zeros(A.size());
        for col in 0..A.n {
            for ptr in A.colptr[col]..A.colptr[col + 1] {
                M[(A.rowval[ptr], col)] = A.nzval[ptr];
            }
        }
        M
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}
