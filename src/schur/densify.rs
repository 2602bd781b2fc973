#![allow(non_snake_case)]

use crate::algebra::*;
use crate::schur::BlockLayout;

/// Gathers the diagonal blocks of the sparse symmetric matrix `A` into a
/// freshly allocated dense buffer of length `layout.storage_len()`.
///
/// See [`densify_blocks_into`].
pub fn densify_blocks<T>(A: &CscMatrix<T>, layout: &BlockLayout) -> Vec<T>
where
    T: FloatT,
{
    let mut B = vec![T::zero(); layout.storage_len()];
    densify_blocks_into(&mut B, A, layout);
    B
}

/// Gathers the diagonal blocks of the sparse symmetric matrix `A` into
/// `B`.
///
/// Block `l` of size `s` is written column major into
/// `B[cum_storage[l] .. cum_storage[l] + s*s]`, so that the entry at
/// local position `(i, j)` of the block lands at
/// `B[cum_storage[l] + j*s + i]`.  Positions with no stored entry are
/// zero.  Stored entries of `A` outside the diagonal blocks are ignored.
///
/// # Panics
/// Panics if `B` is not of length `layout.storage_len()` or `A` is not of
/// dimension `layout.dim()`.
pub fn densify_blocks_into<T>(B: &mut [T], A: &CscMatrix<T>, layout: &BlockLayout)
where
    T: FloatT,
{
    assert_eq!(B.len(), layout.storage_len());
    assert_eq!(A.n, layout.dim());

    B.set(T::zero());

    for l in 0..layout.nblocks() {
        let blksize = layout.block_size(l);
        let istart = layout.cum_size()[l];
        let base = layout.cum_storage()[l];
        let rows = layout.block_range(l);

        for j in layout.block_range(l) {
            let colbase = base + (j - istart) * blksize;
            for k in A.colptr[j]..A.colptr[j + 1] {
                let i = A.rowval[k];
                if rows.contains(&i) {
                    B[colbase + i - istart] = A.nzval[k];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densify_blocks() {
        // blocks of size 2 and 1
        //[ 1.0  2.0   ⋅ ]
        //[ 2.0  4.0   ⋅ ]
        //[  ⋅    ⋅   5.0]
        let A = CscMatrix::new(
            3,
            3,
            vec![0, 2, 4, 5],
            vec![0, 1, 0, 1, 2],
            vec![1., 2., 2., 4., 5.],
        );
        let layout = BlockLayout::new(&[2, 1]).unwrap();

        let B = densify_blocks(&A, &layout);
        assert_eq!(B, vec![1., 2., 2., 4., 5.]);
    }

    #[test]
    fn test_densify_fills_missing_with_zero() {
        // only the (1,1) entry of the second 2x2 block is stored
        let A = CscMatrix::new(4, 4, vec![0, 1, 1, 1, 2], vec![0, 3], vec![7., 9.]);
        let layout = BlockLayout::new(&[2, 2]).unwrap();

        let mut B = vec![-1.; 8];
        densify_blocks_into(&mut B, &A, &layout);
        assert_eq!(B, vec![7., 0., 0., 0., 0., 0., 0., 9.]);
    }

    #[test]
    fn test_densify_ignores_off_block_entries() {
        // (0,2) couples blocks 0 and 1
        let A = CscMatrix::new(3, 3, vec![0, 1, 1, 3], vec![0, 0, 2], vec![1., 8., 3.]);
        let layout = BlockLayout::new(&[2, 1]).unwrap();

        let B = densify_blocks(&A, &layout);
        assert_eq!(B, vec![1., 0., 0., 0., 3.]);
    }
}
