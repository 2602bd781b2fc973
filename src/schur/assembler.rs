#![allow(non_snake_case)]

use crate::algebra::*;
use crate::schur::kernels::*;
use crate::schur::*;
use crate::timers::*;
use itertools::Itertools;
use tracing::debug;

/// Accumulates Schur complement contributions
///
/// ```text
/// schur[perm[i], perm[j]] += Trace(A_i U A_j V)     for 0 <= i <= j < colend
/// ```
///
/// into a caller owned dense matrix, mirroring every updated entry
/// across the diagonal.  With [`TraceOperands::Squared`] the second
/// operand is `U` itself.
///
/// The assembler borrows the block layout, constraint store and
/// permutation, which stay fixed across interior point iterations, and
/// is then called once per iteration with the operands of that
/// iteration.
///
/// __Example usage__ :
///
/// ```no_run
/// use sdpschur::algebra::*;
/// use sdpschur::schur::*;
///
/// let layout = BlockLayout::new(&[2]).unwrap();
/// let store = ConstraintStore::new(vec![1., 1.], vec![0, 2], vec![0, 1], vec![0, 1]);
/// let perm = [0];
/// let U = Matrix::from_diag(&[2., 3.]);
///
/// let mut assembler = SchurAssembler::new(&layout, &store, &perm, SchurSettings::default());
/// let mut schur = Matrix::zeros((1, 1));
/// let nnz = assembler.update(TraceOperands::mixed(&U, &U), 1, &mut schur).unwrap();
///
/// assert_eq!(nnz, 1);
/// assert_eq!(schur[(0, 0)], 13.);
/// ```
pub struct SchurAssembler<'a, T: FloatT = f64> {
    pub layout: &'a BlockLayout,
    pub store: &'a ConstraintStore<T>,
    pub perm: &'a [usize],
    pub settings: SchurSettings<T>,
    pub info: SchurInfo,
    timers: Timers,
}

impl<'a, T> SchurAssembler<'a, T>
where
    T: FloatT,
{
    pub fn new(
        layout: &'a BlockLayout,
        store: &'a ConstraintStore<T>,
        perm: &'a [usize],
        settings: SchurSettings<T>,
    ) -> Self {
        Self {
            layout,
            store,
            perm,
            settings,
            info: SchurInfo::new(),
            timers: Timers::default(),
        }
    }

    /// Adds the contributions of constraint columns `0..colend` to
    /// `schur` and returns the number of entries written.
    ///
    /// All inputs are checked before the first write, so that on
    /// error `schur` is left unchanged.
    pub fn update(
        &mut self,
        operands: TraceOperands<'_, T>,
        colend: usize,
        schur: &mut Matrix<T>,
    ) -> Result<usize, SchurError> {
        let mut timers = std::mem::take(&mut self.timers);
        timers.reset();

        let result;
        timeit! {timers => "update"; {
            result = self.update_inner(&mut timers, operands, colend, schur);
        }}
        let (nnz, variant) = result?;

        self.info.record_call(nnz, colend, variant);
        if self.settings.collect_timings {
            self.info.record_timings(&timers);
            timers.log();
        }
        if self.settings.verbose {
            self.info.log_summary();
        }
        self.timers = timers;

        Ok(nnz)
    }

    fn update_inner(
        &self,
        timers: &mut Timers,
        operands: TraceOperands<'_, T>,
        colend: usize,
        schur: &mut Matrix<T>,
    ) -> Result<(usize, KernelVariant), SchurError> {
        let checked;
        timeit! {timers => "validate"; {
            checked = self.validate(&operands, colend, schur);
        }}
        checked?;

        let variant = KernelVariant::new(operands.is_sparse(), operands.is_squared());
        debug!(%variant, colend, m = self.store.nmatrices(), n = self.layout.dim(), "schur kernel");

        let mut schurcol = vec![T::zero(); colend];
        let nnz;

        match operands {
            TraceOperands::Squared(SymmetricOperand::Dense(U)) => {
                let resolver = DenseResolver { n: U.n };
                let terms = SquaredTerms { u: U.data() };
                timeit! {timers => "kernel"; {
                    nnz = self.accumulate(&resolver, &terms, colend, &mut schurcol, schur);
                }}
            }
            TraceOperands::Mixed(SymmetricOperand::Dense(U), SymmetricOperand::Dense(V)) => {
                let resolver = DenseResolver { n: U.n };
                let terms = MixedTerms {
                    u: U.data(),
                    v: V.data(),
                };
                timeit! {timers => "kernel"; {
                    nnz = self.accumulate(&resolver, &terms, colend, &mut schurcol, schur);
                }}
            }
            TraceOperands::Squared(SymmetricOperand::Sparse(U)) => {
                let Ublk;
                timeit! {timers => "densify"; {
                    Ublk = densify_blocks(U, self.layout);
                }}
                let offsets;
                timeit! {timers => "offsets"; {
                    offsets = BlockOffsets::new(self.store, self.layout);
                }}
                debug!(storage = Ublk.len(), entries = offsets.col.len(), "block buffers");

                let resolver = BlockResolver {
                    offsets: &offsets,
                    layout: self.layout,
                };
                let terms = SquaredTerms { u: &Ublk };
                timeit! {timers => "kernel"; {
                    nnz = self.accumulate(&resolver, &terms, colend, &mut schurcol, schur);
                }}
            }
            TraceOperands::Mixed(SymmetricOperand::Sparse(U), SymmetricOperand::Sparse(V)) => {
                let (Ublk, Vblk);
                timeit! {timers => "densify"; {
                    Ublk = densify_blocks(U, self.layout);
                    Vblk = densify_blocks(V, self.layout);
                }}
                let offsets;
                timeit! {timers => "offsets"; {
                    offsets = BlockOffsets::new(self.store, self.layout);
                }}
                debug!(storage = Ublk.len(), entries = offsets.col.len(), "block buffers");

                let resolver = BlockResolver {
                    offsets: &offsets,
                    layout: self.layout,
                };
                let terms = MixedTerms { u: &Ublk, v: &Vblk };
                timeit! {timers => "kernel"; {
                    nnz = self.accumulate(&resolver, &terms, colend, &mut schurcol, schur);
                }}
            }
            _ => return Err(SchurError::StorageMismatch),
        }

        Ok((nnz, variant))
    }

    // runs the kernel over every target column and merges each
    // column into the permuted output
    fn accumulate<R, K>(
        &self,
        resolver: &R,
        terms: &K,
        colend: usize,
        schurcol: &mut [T],
        schur: &mut Matrix<T>,
    ) -> usize
    where
        R: IndexResolver,
        K: TraceTerms<T>,
    {
        let tol = self.settings.zero_tolerance;
        let perm = self.perm;
        let mut count = 0;

        for col in 0..colend {
            schur_column(self.store, resolver, terms, col, schurcol);

            let pc = perm[col];
            for (row, &v) in schurcol[..=col].iter().enumerate() {
                // NaN is written so that it reaches the caller
                if v.abs() <= tol {
                    continue;
                }
                count += 1;
                let pr = perm[row];
                schur[(pr, pc)] += v;
                schur[(pc, pr)] = schur[(pr, pc)];
            }
        }
        count
    }

    /// Checks every input of an update without touching `schur`.
    pub fn validate(
        &self,
        operands: &TraceOperands<'_, T>,
        colend: usize,
        schur: &Matrix<T>,
    ) -> Result<(), SchurError> {
        operands.check(self.layout, &self.settings)?;

        self.store.check_format(self.layout.dim())?;
        if operands.is_sparse() {
            self.store.check_blocks(self.layout)?;
        }

        let m = self.store.nmatrices();
        if colend > m {
            return Err(SchurError::BadColumnEnd { colend, m });
        }

        if !schur.is_square() || schur.data.len() != schur.m * schur.n {
            return Err(SchurError::OutputMismatch);
        }
        if self.perm.len() < colend {
            return Err(SchurError::BadPermutation);
        }
        let perm = &self.perm[..colend];
        if perm.iter().any(|&p| p >= schur.n) {
            return Err(SchurError::OutputMismatch);
        }
        if !perm.iter().all_unique() {
            return Err(SchurError::BadPermutation);
        }
        Ok(())
    }
}

/// Adds `Trace(A_i U A_j V)` for `0 <= i <= j < colend` into the permuted
/// entries of `schur` and returns the number of entries written.
///
/// Single call form of [`SchurAssembler::update`].
pub fn compute_schur_contribution<T: FloatT>(
    layout: &BlockLayout,
    store: &ConstraintStore<T>,
    perm: &[usize],
    operands: TraceOperands<'_, T>,
    colend: usize,
    schur: &mut Matrix<T>,
    settings: &SchurSettings<T>,
) -> Result<usize, SchurError> {
    let mut assembler = SchurAssembler::new(layout, store, perm, settings.clone());
    assembler.update(operands, colend, schur)
}
