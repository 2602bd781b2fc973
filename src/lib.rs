//! __sdpschur__ assembles the Schur complement matrix of a semidefinite
//! interior point method.
//!
//! Given sparse symmetric constraint matrices $A_0, \dots, A_{m-1}$ with
//! a common block diagonal structure and symmetric matrices $U$, $V$
//! from the current iterate, it accumulates
//!
//! $$
//! M_{\pi(i)\pi(j)} \mathrel{+}= \operatorname{Trace}(A_i U A_j V),
//! \qquad 0 \le i \le j < \text{colend}
//! $$
//!
//! into a dense symmetric matrix $M$, where $\pi$ is a permutation of
//! the constraints.  $U$ and $V$ may be held densely or as block
//! diagonal sparse matrices.  The constraint matrices are stored in the
//! scaled triangular basis, so that the Euclidean inner product of two
//! stored vectors equals the trace inner product of the matrices.
//!
//! ## Features
//!
//! * __Four kernels, one loop__: dense or block sparse operands, in the
//!   squared $\operatorname{Trace}(A_i U A_j U)$ or mixed
//!   $\operatorname{Trace}(A_i U A_j V)$ form.
//!
//! * __Fail fast__: every input is validated before the first write, so
//!   a failed update leaves the output untouched.
//!
//! * __JSON problem files__: with the `serde` feature, a complete update
//!   can be written to and read back from disk.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod schur;
pub(crate) mod timers;
