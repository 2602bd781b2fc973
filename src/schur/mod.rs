//! Schur complement assembly for semidefinite interior point methods.
//!
//! Given sparse symmetric constraint matrices `A_0, …, A_{m-1}` sharing
//! a block diagonal structure, and symmetric operands `U` and `V`, the
//! routines here accumulate
//!
//! ```text
//! schur[perm[i], perm[j]] += Trace(A_i U A_j V)      0 <= i <= j < colend
//! ```
//!
//! into a dense output matrix.  `U` and `V` may be given densely, or as
//! block diagonal sparse matrices, in which case only their diagonal
//! blocks are ever read.
//!
//! The main entry points are [`SchurAssembler`] and the single call
//! form [`compute_schur_contribution`].

mod assembler;
mod blocks;
mod constraints;
mod densify;
mod error;
mod info;
pub(crate) mod kernels;
mod offsets;
mod operands;
mod problem;
mod settings;

pub use assembler::*;
pub use blocks::*;
pub use constraints::*;
pub use densify::*;
pub use error::*;
pub use info::*;
pub use kernels::KernelVariant;
pub use offsets::*;
pub use operands::*;
pub use problem::*;
pub use settings::*;

#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "serde")]
pub use json::*;
