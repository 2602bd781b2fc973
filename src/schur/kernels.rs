#![allow(non_snake_case)]

// Trace kernels for one column of the Schur complement.
//
// All four variants (dense or block sparse U/V, squared or mixed form)
// share the same accumulation loop.  They differ only in how a pair of
// global indices is resolved to a position in the operand storage and
// in how the operand products are formed.

use crate::algebra::*;
use crate::schur::{BlockLayout, BlockOffsets, ConstraintStore};

/// Resolves operand entries for the kernel loop.
pub(crate) trait IndexResolver {
    /// Storage position of the operand entry `(x, rb)`, where `rb` is
    /// the row of stored constraint entry `l`.
    fn row_index(&self, l: usize, rb: usize, x: usize) -> usize;

    /// Storage position of the operand entry `(x, cb)`, where `cb` is
    /// the column of stored constraint entry `l`.
    fn col_index(&self, l: usize, cb: usize, x: usize) -> usize;

    /// Block of the global index `g`.  Only entries whose columns share
    /// a block contribute to a product.
    fn block(&self, g: usize) -> usize;
}

/// Dense column major `n × n` operands.  The whole matrix is treated
/// as a single block.
pub(crate) struct DenseResolver {
    pub n: usize,
}

impl IndexResolver for DenseResolver {
    #[inline]
    fn row_index(&self, _l: usize, rb: usize, x: usize) -> usize {
        x + rb * self.n
    }
    #[inline]
    fn col_index(&self, _l: usize, cb: usize, x: usize) -> usize {
        x + cb * self.n
    }
    #[inline]
    fn block(&self, _g: usize) -> usize {
        0
    }
}

/// Operands densified block by block, addressed through precomputed
/// per-entry offsets.
pub(crate) struct BlockResolver<'a> {
    pub offsets: &'a BlockOffsets,
    pub layout: &'a BlockLayout,
}

impl<'a> IndexResolver for BlockResolver<'a> {
    #[inline]
    fn row_index(&self, l: usize, _rb: usize, x: usize) -> usize {
        self.offsets.row_index(l, x)
    }
    #[inline]
    fn col_index(&self, l: usize, _cb: usize, x: usize) -> usize {
        self.offsets.col_index(l, x)
    }
    #[inline]
    fn block(&self, g: usize) -> usize {
        self.layout.block_of(g)
    }
}

/// Operand products of one trace form.
///
/// With `i1 = (ra,rb)`, `i2 = (ca,cb)`, `i3 = (ra,cb)` and `i4 = (ca,rb)`
/// as storage positions:
pub(crate) trait TraceTerms<T: FloatT> {
    /// terms for an off-diagonal entry `ra < ca` of `A_i`
    fn offdiag(&self, i1: usize, i2: usize, i3: usize, i4: usize) -> T;

    /// terms for a diagonal entry `ra == ca` of `A_i`
    fn diag(&self, i1: usize, i2: usize) -> T;

    /// final value from the sums over off-diagonal and diagonal
    /// entries of `A_j`
    fn combine(&self, offdiag: T, diag: T) -> T;
}

/// `Trace(A_i U A_j U)`
pub(crate) struct SquaredTerms<'a, T> {
    pub u: &'a [T],
}

impl<'a, T> TraceTerms<T> for SquaredTerms<'a, T>
where
    T: FloatT,
{
    #[inline]
    fn offdiag(&self, i1: usize, i2: usize, i3: usize, i4: usize) -> T {
        let u = self.u;
        u[i1] * u[i2] + u[i3] * u[i4]
    }
    #[inline]
    fn diag(&self, i1: usize, i2: usize) -> T {
        self.u[i1] * self.u[i2]
    }
    #[inline]
    fn combine(&self, offdiag: T, diag: T) -> T {
        svec_scale::<T>() * offdiag + diag
    }
}

/// `Trace(A_i (U A_j V + V A_j U)/2)`
pub(crate) struct MixedTerms<'a, T> {
    pub u: &'a [T],
    pub v: &'a [T],
}

impl<'a, T> TraceTerms<T> for MixedTerms<'a, T>
where
    T: FloatT,
{
    #[inline]
    fn offdiag(&self, i1: usize, i2: usize, i3: usize, i4: usize) -> T {
        let (u, v) = (self.u, self.v);
        u[i1] * v[i2] + u[i2] * v[i1] + u[i3] * v[i4] + u[i4] * v[i3]
    }
    #[inline]
    fn diag(&self, i1: usize, i2: usize) -> T {
        let (u, v) = (self.u, self.v);
        u[i1] * v[i2] + u[i2] * v[i1]
    }
    #[inline]
    fn combine(&self, offdiag: T, diag: T) -> T {
        let half: T = (0.5).as_T();
        svec_unscale::<T>() * offdiag + half * diag
    }
}

/// Fills `schurcol[0..=col]` with the contributions between constraint
/// matrices `i = 0..=col` and `col`.
///
/// Expects the entries of every constraint matrix to be grouped by
/// ascending `resolver.block` of their columns.  Does not allocate.
pub(crate) fn schur_column<T, R, K>(
    store: &ConstraintStore<T>,
    resolver: &R,
    terms: &K,
    col: usize,
    schurcol: &mut [T],
) where
    T: FloatT,
    R: IndexResolver,
    K: TraceTerms<T>,
{
    let isqrt2 = svec_unscale::<T>();
    let Avec = &store.avec;
    let (Ai, Aj) = (&store.nzlist_i, &store.nzlist_j);
    let lrange = store.range(col);

    for (i, out) in schurcol[..=col].iter_mut().enumerate() {
        let krange = store.range(i);
        let mut kstart = krange.start;
        let kend = krange.end;
        let mut kstartnew = kstart;

        let mut tmp1 = T::zero();
        let mut tmp2 = T::zero();

        for l in lrange.clone() {
            let (rb, cb) = (Ai[l], Aj[l]);
            let cblk = resolver.block(cb);

            let mut tmp3 = T::zero();
            let mut tmp4 = T::zero();
            let mut firsttime = true;

            for k in kstart..kend {
                let ca = Aj[k];
                let calk = resolver.block(ca);
                if calk == cblk {
                    let ra = Ai[k];
                    let idx1 = resolver.row_index(l, rb, ra);
                    let idx2 = resolver.col_index(l, cb, ca);
                    if ra < ca {
                        let idx3 = resolver.col_index(l, cb, ra);
                        let idx4 = resolver.row_index(l, rb, ca);
                        tmp3 += Avec[k] * terms.offdiag(idx1, idx2, idx3, idx4);
                    } else {
                        tmp4 += Avec[k] * terms.diag(idx1, idx2);
                    }
                    if firsttime {
                        kstartnew = k;
                        firsttime = false;
                    }
                } else if calk > cblk {
                    break;
                }
            }
            kstart = kstartnew;

            let t = Avec[l] * (isqrt2 * tmp3 + tmp4);
            if rb < cb {
                tmp1 += t;
            } else {
                tmp2 += t;
            }
        }
        *out = terms.combine(tmp1, tmp2);
    }
}

/// The four kernel variants, selected from the operand storage and the
/// trace form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelVariant {
    DenseSquared,
    DenseMixed,
    SparseSquared,
    SparseMixed,
}

impl KernelVariant {
    pub fn new(sparse: bool, squared: bool) -> Self {
        match (sparse, squared) {
            (false, true) => KernelVariant::DenseSquared,
            (false, false) => KernelVariant::DenseMixed,
            (true, true) => KernelVariant::SparseSquared,
            (true, false) => KernelVariant::SparseMixed,
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, KernelVariant::SparseSquared | KernelVariant::SparseMixed)
    }
}

impl std::fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            KernelVariant::DenseSquared => "dense, Trace(A U A U)",
            KernelVariant::DenseMixed => "dense, Trace(A U A V)",
            KernelVariant::SparseSquared => "block sparse, Trace(A U A U)",
            KernelVariant::SparseMixed => "block sparse, Trace(A U A V)",
        };
        write!(f, "{}", s)
    }
}
