#![allow(non_snake_case)]

use crate::algebra::*;
use crate::schur::{BlockLayout, SchurError};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Concatenated sparse storage of the constraint matrices `A_0..A_{m-1}`.
///
/// Matrix `i` occupies the index range `idxstart[i]..idxstart[i+1]` of
/// the shared arrays `avec`, `nzlist_i` and `nzlist_j`.  Each stored entry
/// is a coordinate `(nzlist_i[k], nzlist_j[k])` in the upper triangle
/// (row <= col) of the `n × n` matrix, with its value `avec[k]` given in
/// the scaled triangular basis, i.e. off-diagonal values are stored as
/// `√2 · A[row, col]`.
///
/// The block-sparse kernels additionally require that the entries of
/// every matrix are grouped by ascending block of their column.
/// [`from_triu`](ConstraintStore::from_triu) establishes this by sorting
/// entries by (block, column, row).
///
/// __Example usage__ : the single 2 × 2 constraint `A_0 = [1 2; 2 3]`
///
/// ```no_run
/// use sdpschur::schur::ConstraintStore;
///
/// let r2 = f64::sqrt(2.0);
/// let store = ConstraintStore::new(
///     vec![1.0, 2.0 * r2, 3.0], // avec
///     vec![0, 3],               // idxstart
///     vec![0, 0, 1],            // nzlist_i (rows)
///     vec![0, 1, 1],            // nzlist_j (cols)
/// );
/// assert!(store.check_format(2).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintStore<T = f64> {
    /// stored values in the scaled triangular basis
    pub avec: Vec<T>,
    /// start of each matrix in the shared arrays.  Length `m+1`.
    pub idxstart: Vec<usize>,
    /// row index of each stored entry
    pub nzlist_i: Vec<usize>,
    /// column index of each stored entry
    pub nzlist_j: Vec<usize>,
}

impl<T> ConstraintStore<T>
where
    T: FloatT,
{
    /// `ConstraintStore` constructor.
    ///
    /// # Panics
    /// Makes rudimentary array length checks and panics on failure.
    /// Use [`check_format`](ConstraintStore::check_format) to verify
    /// the coordinates themselves.
    pub fn new(
        avec: Vec<T>,
        idxstart: Vec<usize>,
        nzlist_i: Vec<usize>,
        nzlist_j: Vec<usize>,
    ) -> Self {
        assert!(!idxstart.is_empty());
        assert_eq!(avec.len(), nzlist_i.len());
        assert_eq!(avec.len(), nzlist_j.len());
        assert_eq!(idxstart[idxstart.len() - 1], avec.len());
        Self {
            avec,
            idxstart,
            nzlist_i,
            nzlist_j,
        }
    }

    /// Builds the store from constraint matrices in CSC format.
    ///
    /// Each matrix holds the true (unscaled) entries of a symmetric
    /// `n × n` matrix, either as its upper triangle or in full, in which
    /// case the lower triangle is ignored.  Off-diagonal values are scaled
    /// by `√2` and the entries of every matrix are sorted by (block,
    /// column, row) of `layout`.
    pub fn from_triu(mats: &[CscMatrix<T>], layout: &BlockLayout) -> Result<Self, SchurError> {
        let n = layout.dim();
        let sqrt2 = svec_scale::<T>();

        let nnz_hint = mats.iter().map(|A| A.nnz()).sum();
        let mut avec = Vec::with_capacity(nnz_hint);
        let mut nzlist_i = Vec::with_capacity(nnz_hint);
        let mut nzlist_j = Vec::with_capacity(nnz_hint);
        let mut idxstart = Vec::with_capacity(mats.len() + 1);
        idxstart.push(0);

        let mut entries: Vec<(usize, usize, T)> = Vec::new();

        for A in mats {
            if A.nrows() != n || A.ncols() != n {
                return Err(SchurError::DimensionMismatch {
                    what: "constraint matrix",
                    expected: n,
                    found: if A.nrows() != n { A.nrows() } else { A.ncols() },
                });
            }
            A.check_format()?;
            let A = A.to_triu();

            entries.clear();
            for col in 0..A.n {
                for ptr in A.colptr[col]..A.colptr[col + 1] {
                    let row = A.rowval[ptr];
                    let v = A.nzval[ptr];
                    let v = if row < col { sqrt2 * v } else { v };
                    entries.push((row, col, v));
                }
            }
            entries.sort_by_key(|&(row, col, _)| (layout.block_of(col), col, row));

            for &(row, col, v) in entries.iter() {
                nzlist_i.push(row);
                nzlist_j.push(col);
                avec.push(v);
            }
            idxstart.push(avec.len());
        }

        Ok(Self::new(avec, idxstart, nzlist_i, nzlist_j))
    }

    /// number of constraint matrices
    pub fn nmatrices(&self) -> usize {
        self.idxstart.len().saturating_sub(1)
    }

    /// total number of stored entries
    pub fn nnz(&self) -> usize {
        self.avec.len()
    }

    /// range of the shared arrays occupied by matrix `i`
    #[inline]
    pub fn range(&self, i: usize) -> Range<usize> {
        self.idxstart[i]..self.idxstart[i + 1]
    }

    /// `(row, col, value)` of every stored entry of matrix `i`
    pub fn entries(&self, i: usize) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.range(i)
            .map(move |k| (self.nzlist_i[k], self.nzlist_j[k], self.avec[k]))
    }

    /// Check that the index arrays are consistent and every stored entry
    /// is an upper triangular coordinate of an `n × n` matrix.
    pub fn check_format(&self, n: usize) -> Result<(), SchurError> {
        let nnz = self.avec.len();
        if self.idxstart.is_empty()
            || self.idxstart[0] != 0
            || self.idxstart[self.idxstart.len() - 1] != nnz
            || self.nzlist_i.len() != nnz
            || self.nzlist_j.len() != nnz
        {
            return Err(SchurError::BadConstraintStore);
        }

        if self.idxstart.windows(2).any(|c| c[0] > c[1]) {
            return Err(SchurError::BadConstraintStore);
        }

        for (index, (&row, &col)) in self.nzlist_i.iter().zip(&self.nzlist_j).enumerate() {
            if col >= n {
                return Err(SchurError::ConstraintOutOfRange { index, row, col });
            }
            if row > col {
                return Err(SchurError::BadConstraintEntry { index, row, col });
            }
        }
        Ok(())
    }

    /// Check the block requirements of the block-sparse kernels: every
    /// stored entry lies inside a diagonal block of `layout`, and the
    /// entries of every matrix appear in ascending block order.
    ///
    /// Assumes that [`check_format`](ConstraintStore::check_format) has
    /// already passed for `layout.dim()`.
    pub fn check_blocks(&self, layout: &BlockLayout) -> Result<(), SchurError> {
        for i in 0..self.nmatrices() {
            let mut lastblk = 0;
            for (row, col, _) in self.entries(i) {
                let blk = layout.block_of(col);
                if layout.block_of(row) != blk {
                    return Err(SchurError::OffBlockEntry {
                        what: "constraint store",
                        row,
                        col,
                    });
                }
                if blk < lastblk {
                    return Err(SchurError::UnsortedBlocks(i));
                }
                lastblk = blk;
            }
        }
        Ok(())
    }

    /// `Trace(A_i * A_j)`, computed as the sparse dot product of the
    /// stored values of the two matrices over matching coordinates.
    pub fn inner(&self, i: usize, j: usize) -> T {
        let mut out = T::zero();
        for (ra, ca, va) in self.entries(i) {
            for (rb, cb, vb) in self.entries(j) {
                if ra == rb && ca == cb {
                    out += va * vb;
                }
            }
        }
        out
    }

    /// Dense copy of the full symmetric matrix `A_i`, with the basis
    /// scaling removed.
    pub fn to_dense(&self, i: usize, n: usize) -> Matrix<T> {
        let isqrt2 = svec_unscale::<T>();
        let mut A = Matrix::zeros((n, n));
        for (row, col, v) in self.entries(i) {
            if row == col {
                A[(row, col)] += v;
            } else {
                A[(row, col)] += isqrt2 * v;
                A[(col, row)] += isqrt2 * v;
            }
        }
        A
    }
}
