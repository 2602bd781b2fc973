#![allow(non_snake_case)]

use crate::algebra::*;
use crate::schur::{BlockLayout, SchurError, SchurSettings};
use enum_dispatch::*;

/// A symmetric `n × n` matrix operand `U` or `V`, held either as a dense
/// column major [`Matrix`] or as a block diagonal [`CscMatrix`] storing
/// both triangles.
#[enum_dispatch(SymmetricOperandTrait<T>)]
#[derive(Debug, Clone, Copy)]
pub enum SymmetricOperand<'a, T>
where
    T: FloatT,
{
    Dense(&'a Matrix<T>),
    Sparse(&'a CscMatrix<T>),
}

#[enum_dispatch]
pub trait SymmetricOperandTrait<T>
where
    T: FloatT,
{
    fn is_sparse(&self) -> bool;

    /// Checks the operand against the block layout.  `name` identifies
    /// the operand in any error returned.
    fn check_operand(
        &self,
        name: &'static str,
        layout: &BlockLayout,
        settings: &SchurSettings<T>,
    ) -> Result<(), SchurError>;
}

fn check_square(
    name: &'static str,
    (m, n): (usize, usize),
    layout: &BlockLayout,
) -> Result<(), SchurError> {
    let expected = layout.dim();
    if m != expected || n != expected {
        let found = if m != expected { m } else { n };
        return Err(SchurError::DimensionMismatch {
            what: name,
            expected,
            found,
        });
    }
    Ok(())
}

impl<'a, T> SymmetricOperandTrait<T> for &'a Matrix<T>
where
    T: FloatT,
{
    fn is_sparse(&self) -> bool {
        false
    }

    fn check_operand(
        &self,
        name: &'static str,
        layout: &BlockLayout,
        settings: &SchurSettings<T>,
    ) -> Result<(), SchurError> {
        check_square(name, self.size(), layout)?;
        if self.data.len() != self.m * self.n {
            return Err(SchurError::DimensionMismatch {
                what: name,
                expected: self.m * self.n,
                found: self.data.len(),
            });
        }
        if settings.check_symmetry && !self.is_symmetric() {
            return Err(SchurError::NotSymmetric(name));
        }
        Ok(())
    }
}

impl<'a, T> SymmetricOperandTrait<T> for &'a CscMatrix<T>
where
    T: FloatT,
{
    fn is_sparse(&self) -> bool {
        true
    }

    fn check_operand(
        &self,
        name: &'static str,
        layout: &BlockLayout,
        settings: &SchurSettings<T>,
    ) -> Result<(), SchurError> {
        check_square(name, self.size(), layout)?;
        self.check_format()?;

        if settings.check_blocks {
            for col in 0..self.n {
                for &row in &self.rowval[self.colptr[col]..self.colptr[col + 1]] {
                    if !layout.same_block(row, col) {
                        return Err(SchurError::OffBlockEntry {
                            what: name,
                            row,
                            col,
                        });
                    }
                }
            }
        }

        if settings.check_symmetry {
            for col in 0..self.n {
                for ptr in self.colptr[col]..self.colptr[col + 1] {
                    let row = self.rowval[ptr];
                    if self.get_entry((col, row)) != Some(self.nzval[ptr]) {
                        return Err(SchurError::NotSymmetric(name));
                    }
                }
            }
        }
        Ok(())
    }
}

/// The operands of one Schur update, which also select the trace form.
///
/// - `Squared(U)` accumulates `Trace(A_i U A_j U)`.
/// - `Mixed(U, V)` accumulates `Trace(A_i U A_j V)`, i.e. the symmetrized
///   `Trace(A_i (U A_j V + V A_j U)/2)`.
///
/// __Example usage__ :
///
/// ```no_run
/// use sdpschur::algebra::*;
/// use sdpschur::schur::TraceOperands;
///
/// let U = Matrix::<f64>::identity(3);
/// let V = Matrix::<f64>::from_diag(&[1., 2., 3.]);
/// let operands = TraceOperands::mixed(&U, &V);
/// assert!(!operands.is_sparse());
/// ```
#[derive(Debug, Clone, Copy)]
pub enum TraceOperands<'a, T>
where
    T: FloatT,
{
    Squared(SymmetricOperand<'a, T>),
    Mixed(SymmetricOperand<'a, T>, SymmetricOperand<'a, T>),
}

impl<'a, T> TraceOperands<'a, T>
where
    T: FloatT,
{
    pub fn squared(U: impl Into<SymmetricOperand<'a, T>>) -> Self {
        TraceOperands::Squared(U.into())
    }

    pub fn mixed(
        U: impl Into<SymmetricOperand<'a, T>>,
        V: impl Into<SymmetricOperand<'a, T>>,
    ) -> Self {
        TraceOperands::Mixed(U.into(), V.into())
    }

    pub fn U(&self) -> SymmetricOperand<'a, T> {
        match self {
            TraceOperands::Squared(U) | TraceOperands::Mixed(U, _) => *U,
        }
    }

    /// the second operand, if any
    pub fn V(&self) -> Option<SymmetricOperand<'a, T>> {
        match self {
            TraceOperands::Squared(_) => None,
            TraceOperands::Mixed(_, V) => Some(*V),
        }
    }

    /// true if `U` is held in block sparse format.  Only meaningful
    /// once [`check`](Self::check) has passed.
    pub fn is_sparse(&self) -> bool {
        self.U().is_sparse()
    }

    pub fn is_squared(&self) -> bool {
        matches!(self, TraceOperands::Squared(_))
    }

    /// Checks that `U` and `V` share a storage format and are compatible
    /// with `layout`.
    pub fn check(
        &self,
        layout: &BlockLayout,
        settings: &SchurSettings<T>,
    ) -> Result<(), SchurError> {
        let U = self.U();
        if let Some(V) = self.V() {
            if U.is_sparse() != V.is_sparse() {
                return Err(SchurError::StorageMismatch);
            }
            U.check_operand("U", layout, settings)?;
            V.check_operand("V", layout, settings)?;
        } else {
            U.check_operand("U", layout, settings)?;
        }
        Ok(())
    }
}
