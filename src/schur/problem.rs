#![allow(non_snake_case)]

use crate::algebra::*;
use crate::schur::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// An owned symmetric operand.  See [`SymmetricOperand`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OwnedOperand<T = f64> {
    Dense(Matrix<T>),
    Sparse(CscMatrix<T>),
}

impl<T> OwnedOperand<T>
where
    T: FloatT,
{
    pub fn as_operand(&self) -> SymmetricOperand<'_, T> {
        match self {
            OwnedOperand::Dense(M) => SymmetricOperand::Dense(M),
            OwnedOperand::Sparse(M) => SymmetricOperand::Sparse(M),
        }
    }
}

impl<T> From<Matrix<T>> for OwnedOperand<T> {
    fn from(M: Matrix<T>) -> Self {
        OwnedOperand::Dense(M)
    }
}

impl<T> From<CscMatrix<T>> for OwnedOperand<T> {
    fn from(M: CscMatrix<T>) -> Self {
        OwnedOperand::Sparse(M)
    }
}

/// A complete, self contained Schur update: block structure,
/// constraint data, permutation, operands and settings.
///
/// With the `serde` feature this can be written to and read back from
/// a JSON file through [`ProblemJSONReadWrite`](crate::schur::ProblemJSONReadWrite).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SchurProblem<T: FloatT = f64> {
    pub block_sizes: Vec<usize>,
    pub store: ConstraintStore<T>,
    pub perm: Vec<usize>,
    pub U: OwnedOperand<T>,
    /// second operand.  `None` selects the squared form.
    pub V: Option<OwnedOperand<T>>,
    pub colend: usize,
    pub settings: SchurSettings<T>,
}

impl<T> SchurProblem<T>
where
    T: FloatT,
{
    pub fn layout(&self) -> Result<BlockLayout, SchurError> {
        BlockLayout::new(&self.block_sizes)
    }

    pub fn operands(&self) -> TraceOperands<'_, T> {
        match &self.V {
            None => TraceOperands::Squared(self.U.as_operand()),
            Some(V) => TraceOperands::Mixed(self.U.as_operand(), V.as_operand()),
        }
    }

    /// Accumulates the update into `schur`.  See
    /// [`compute_schur_contribution`].
    pub fn update_into(&self, schur: &mut Matrix<T>) -> Result<usize, SchurError> {
        let layout = self.layout()?;
        compute_schur_contribution(
            &layout,
            &self.store,
            &self.perm,
            self.operands(),
            self.colend,
            schur,
            &self.settings,
        )
    }
}
