use crate::schur::SchurError;
use std::ops::Range;

/// Partition of `[0, n)` into consecutive diagonal blocks.
///
/// Holds the cumulative element offsets `cum_size[k]` (first global
/// row/column of block `k`), the cumulative storage offsets
/// `cum_storage[k]` (first entry of block `k` when every block is stored
/// densely and back to back), and the reverse map from a global index to
/// its owning block.
///
/// __Example usage__ :
///
/// ```no_run
/// use sdpschur::schur::BlockLayout;
///
/// let layout = BlockLayout::new(&[2, 3]).unwrap();
/// assert_eq!(layout.dim(), 5);
/// assert_eq!(layout.storage_len(), 13);
/// assert_eq!(layout.block_of(3), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    sizes: Vec<usize>,
    cum_size: Vec<usize>,
    cum_storage: Vec<usize>,
    block_idx: Vec<usize>,
}

impl BlockLayout {
    /// Builds the layout from an ordered list of block sizes.
    ///
    /// Fails with [`SchurError::BadBlockSize`] if any size is zero.
    pub fn new(sizes: &[usize]) -> Result<Self, SchurError> {
        if let Some(k) = sizes.iter().position(|&s| s == 0) {
            return Err(SchurError::BadBlockSize(k));
        }

        let nblk = sizes.len();
        let mut cum_size = vec![0; nblk + 1];
        let mut cum_storage = vec![0; nblk + 1];
        for (k, &s) in sizes.iter().enumerate() {
            cum_size[k + 1] = cum_size[k] + s;
            cum_storage[k + 1] = cum_storage[k] + s * s;
        }

        let mut block_idx = vec![0; cum_size[nblk]];
        for k in 0..nblk {
            block_idx[cum_size[k]..cum_size[k + 1]].fill(k);
        }

        Ok(Self {
            sizes: sizes.to_vec(),
            cum_size,
            cum_storage,
            block_idx,
        })
    }

    /// number of blocks
    pub fn nblocks(&self) -> usize {
        self.sizes.len()
    }

    /// total matrix dimension `n`
    pub fn dim(&self) -> usize {
        self.cum_size[self.nblocks()]
    }

    /// length of the flattened per-block dense storage
    pub fn storage_len(&self) -> usize {
        self.cum_storage[self.nblocks()]
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn block_size(&self, k: usize) -> usize {
        self.sizes[k]
    }

    /// first global row/column of each block, plus `n` at the end
    pub fn cum_size(&self) -> &[usize] {
        &self.cum_size
    }

    /// first storage offset of each block, plus the total at the end
    pub fn cum_storage(&self) -> &[usize] {
        &self.cum_storage
    }

    /// global rows/columns spanned by block `k`
    pub fn block_range(&self, k: usize) -> Range<usize> {
        self.cum_size[k]..self.cum_size[k + 1]
    }

    /// flattened storage entries occupied by block `k`
    pub fn storage_range(&self, k: usize) -> Range<usize> {
        self.cum_storage[k]..self.cum_storage[k + 1]
    }

    /// block owning the global index `g`
    ///
    /// # Panics
    /// Panics if `g` is not less than [`dim`](Self::dim)
    #[inline]
    pub fn block_of(&self, g: usize) -> usize {
        self.block_idx[g]
    }

    /// reverse map from every global index to its block
    pub fn block_index(&self) -> &[usize] {
        &self.block_idx
    }

    /// true if `row` and `col` fall within the same diagonal block
    #[inline]
    pub fn same_block(&self, row: usize, col: usize) -> bool {
        self.block_idx[row] == self.block_idx[col]
    }
}
