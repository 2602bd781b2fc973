use crate::algebra::SparseFormatError;
use thiserror::Error;

/// Error type returned by the Schur complement assembly.
///
/// Every variant is an input validation failure.  All of them are
/// detected before any value is written to the output matrix, so a
/// failed call leaves the output untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchurError {
    /// A block in the block structure has zero size
    #[error("Block {0} has zero size")]
    BadBlockSize(usize),
    /// A matrix dimension disagrees with the block structure
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// U and V are not both dense or both sparse
    #[error("U and V must be both dense or both sparse")]
    StorageMismatch,
    /// A dense operand is not symmetric
    #[error("{0} is not symmetric")]
    NotSymmetric(&'static str),
    /// The index arrays of the constraint store are inconsistent
    #[error("Constraint store index arrays are inconsistent")]
    BadConstraintStore,
    /// A stored constraint entry lies below the diagonal
    #[error("Constraint entry {index} at ({row}, {col}) is below the diagonal")]
    BadConstraintEntry {
        index: usize,
        row: usize,
        col: usize,
    },
    /// A stored constraint entry lies outside the matrix dimension
    #[error("Constraint entry {index} at ({row}, {col}) is out of range")]
    ConstraintOutOfRange {
        index: usize,
        row: usize,
        col: usize,
    },
    /// A nonzero lies outside the diagonal blocks
    #[error("Entry ({row}, {col}) of {what} lies outside the diagonal blocks")]
    OffBlockEntry {
        what: &'static str,
        row: usize,
        col: usize,
    },
    /// Entries of a constraint matrix are not grouped by ascending block
    #[error("Entries of constraint matrix {0} are not sorted by block")]
    UnsortedBlocks(usize),
    /// The column end exceeds the number of constraint matrices
    #[error("Column end {colend} exceeds the number of constraint matrices {m}")]
    BadColumnEnd { colend: usize, m: usize },
    /// The permutation is too short or not injective
    #[error("Permutation is too short or not injective")]
    BadPermutation,
    /// The output matrix is not square or cannot hold the permuted entries
    #[error("Output matrix is not square or too small for the permutation")]
    OutputMismatch,
    /// A sparse operand is not in valid CSC format
    #[error(transparent)]
    SparseFormat(#[from] SparseFormatError),
}
