use crate::algebra::FloatT;
use crate::schur::{BlockLayout, ConstraintStore};

/// Base offsets into the per-block dense storage, one pair per stored
/// constraint entry.
///
/// For an entry at `(rb, cb)` in block `b` and any global index `x` of
/// the same block, the storage position of the block entry `(x, cb)` is
/// `col[k] + x` and that of `(x, rb)` is `row[k] + x`.  The bases
/// subtract the global start of the block.  They are formed in wrapping
/// arithmetic so that entries outside the diagonal blocks produce an
/// out-of-range base rather than an overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOffsets {
    pub row: Vec<usize>,
    pub col: Vec<usize>,
}

impl BlockOffsets {
    pub fn new<T: FloatT>(store: &ConstraintStore<T>, layout: &BlockLayout) -> Self {
        let nnz = store.nnz();
        let mut row = Vec::with_capacity(nnz);
        let mut col = Vec::with_capacity(nnz);

        for (&rb, &cb) in store.nzlist_i.iter().zip(&store.nzlist_j) {
            let cblk = layout.block_of(cb);
            let colcb = layout.cum_size()[cblk];
            let blksize = layout.block_size(cblk);
            let base = layout.cum_storage()[cblk];

            col.push(offset(base, cb, colcb, blksize));
            row.push(offset(base, rb, colcb, blksize));
        }
        Self { row, col }
    }

    /// storage position of the block entry `(x, rb)` of stored entry `k`
    #[inline]
    pub fn row_index(&self, k: usize, x: usize) -> usize {
        self.row[k].wrapping_add(x)
    }

    /// storage position of the block entry `(x, cb)` of stored entry `k`
    #[inline]
    pub fn col_index(&self, k: usize, x: usize) -> usize {
        self.col[k].wrapping_add(x)
    }
}

// base + (g - colcb)*blksize - colcb
#[inline]
fn offset(base: usize, g: usize, colcb: usize, blksize: usize) -> usize {
    base.wrapping_add(g.wrapping_sub(colcb).wrapping_mul(blksize))
        .wrapping_sub(colcb)
}
