#![allow(non_snake_case)]
#![allow(clippy::type_complexity)]
use sdpschur::{algebra::*, schur::*};

// blocks [3, 1, 2], four constraint matrices with differing block
// support, and block diagonal operands U and V

fn block_sizes() -> Vec<usize> {
    vec![3, 1, 2]
}

fn constraint_matrices(layout: &BlockLayout) -> Vec<Matrix<f64>> {
    let n = layout.dim();
    (0..4)
        .map(|i| {
            let mut A = Matrix::zeros((n, n));
            for b in 0..layout.nblocks() {
                if b == i % 3 && i != 3 {
                    continue;
                }
                for c in layout.block_range(b) {
                    for r in layout.block_range(b).filter(|&r| r <= c) {
                        let v = ((i * 7 + r * 3 + c * 5) % 5) as f64 - 2.0;
                        A[(r, c)] = v;
                        A[(c, r)] = v;
                    }
                }
            }
            A
        })
        .collect()
}

fn block_operands(layout: &BlockLayout) -> (Matrix<f64>, Matrix<f64>) {
    let n = layout.dim();
    let mut U = Matrix::zeros((n, n));
    let mut V = Matrix::zeros((n, n));
    for b in 0..layout.nblocks() {
        for r in layout.block_range(b) {
            for c in layout.block_range(b) {
                let d = r.abs_diff(c) as f64;
                U[(r, c)] = 1.0 / (1.0 + d) + if r == c { 2.0 } else { 0.0 };
                V[(r, c)] = 0.25 * ((r + c + 1) as f64) / (n as f64) + if r == c { 1.0 } else { 0.0 };
            }
        }
    }
    (U, V)
}

fn schur_data() -> (BlockLayout, Vec<Matrix<f64>>, ConstraintStore<f64>) {
    let layout = BlockLayout::new(&block_sizes()).unwrap();
    let A = constraint_matrices(&layout);
    let Acsc: Vec<_> = A.iter().map(CscMatrix::from).collect();
    let store = ConstraintStore::from_triu(&Acsc, &layout).unwrap();
    (layout, A, store)
}

fn matmul(X: &Matrix<f64>, Y: &Matrix<f64>) -> Matrix<f64> {
    let n = X.n;
    let mut Z = Matrix::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                Z[(i, j)] += X[(i, k)] * Y[(k, j)];
            }
        }
    }
    Z
}

// Trace(A U B V) by direct dense products
fn dense_trace(A: &Matrix<f64>, U: &Matrix<f64>, B: &Matrix<f64>, V: &Matrix<f64>) -> f64 {
    let P = matmul(&matmul(&matmul(A, U), B), V);
    (0..P.n).map(|i| P[(i, i)]).sum()
}

#[test]
fn test_schur_matches_dense_trace() {
    let (layout, A, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let perm = [2, 0, 3, 1];
    let m = A.len();

    for operands in [TraceOperands::mixed(&U, &V), TraceOperands::squared(&U)] {
        let Vref = operands.V().map_or(&U, |_| &V);

        let mut schur = Matrix::zeros((m, m));
        compute_schur_contribution(
            &layout,
            &store,
            &perm,
            operands,
            m,
            &mut schur,
            &SchurSettings::default(),
        )
        .unwrap();

        for i in 0..m {
            for j in 0..m {
                let t = dense_trace(&A[i], &U, &A[j], Vref);
                assert!((schur[(perm[i], perm[j])] - t).abs() < 1e-10);
            }
        }
    }
}

#[test]
fn test_schur_all_variants_across_layouts() {
    for sizes in [vec![1], vec![2, 1], vec![1, 3, 2], vec![4, 1, 2, 3]] {
        let layout = BlockLayout::new(&sizes).unwrap();
        let A = constraint_matrices(&layout);
        let Acsc: Vec<_> = A.iter().map(CscMatrix::from).collect();
        let store = ConstraintStore::from_triu(&Acsc, &layout).unwrap();
        let (U, V) = block_operands(&layout);
        let (Us, Vs) = (CscMatrix::from(&U), CscMatrix::from(&V));
        let m = A.len();
        let perm: Vec<usize> = (0..m).rev().collect();

        let cases = [
            (TraceOperands::squared(&U), &U, &U),
            (TraceOperands::mixed(&U, &V), &U, &V),
            (TraceOperands::squared(&Us), &U, &U),
            (TraceOperands::mixed(&Us, &Vs), &U, &V),
        ];
        for (operands, X, Y) in cases {
            let mut schur = Matrix::<f64>::zeros((m, m));
            compute_schur_contribution(
                &layout,
                &store,
                &perm,
                operands,
                m,
                &mut schur,
                &SchurSettings::default(),
            )
            .unwrap();

            for i in 0..m {
                for j in 0..m {
                    let t = 0.5
                        * (dense_trace(&A[i], X, &A[j], Y) + dense_trace(&A[i], Y, &A[j], X));
                    assert!((schur[(perm[i], perm[j])] - t).abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_schur_dense_sparse_agree() {
    let (layout, _, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let (Us, Vs) = (CscMatrix::from(&U), CscMatrix::from(&V));
    let perm = [0, 1, 2, 3];
    let settings = SchurSettings::default();

    let pairs = [
        (TraceOperands::squared(&U), TraceOperands::squared(&Us)),
        (TraceOperands::mixed(&U, &V), TraceOperands::mixed(&Us, &Vs)),
    ];

    for (dense, sparse) in pairs {
        let mut Sd = Matrix::zeros((4, 4));
        let mut Ss = Matrix::zeros((4, 4));
        let nd =
            compute_schur_contribution(&layout, &store, &perm, dense, 4, &mut Sd, &settings).unwrap();
        let ns =
            compute_schur_contribution(&layout, &store, &perm, sparse, 4, &mut Ss, &settings).unwrap();

        assert_eq!(nd, ns);
        assert!(Sd.data.norm_inf_diff(&Ss.data) < 1e-12);
    }
}

#[test]
fn test_schur_dense_general_operand() {
    // a dense U that couples the blocks is read in full
    let (layout, A, store) = schur_data();
    let n = layout.dim();
    let mut U = Matrix::zeros((n, n));
    for r in 0..n {
        for c in 0..n {
            U[(r, c)] = 1.0 / (1.0 + (r + c) as f64);
        }
    }
    let mut schur = Matrix::zeros((4, 4));
    compute_schur_contribution(
        &layout,
        &store,
        &[0, 1, 2, 3],
        TraceOperands::squared(&U),
        4,
        &mut schur,
        &SchurSettings::default(),
    )
    .unwrap();

    for i in 0..4 {
        for j in 0..4 {
            let t = dense_trace(&A[i], &U, &A[j], &U);
            assert!((schur[(i, j)] - t).abs() < 1e-10);
        }
    }
}

#[test]
fn test_schur_symmetry() {
    let (layout, _, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let Us = CscMatrix::from(&U);
    let Vs = CscMatrix::from(&V);
    let perm = [3, 1, 0, 2, 4];

    let mut schur = Matrix::zeros((5, 5));
    let mut assembler = SchurAssembler::new(&layout, &store, &perm, SchurSettings::default());
    assembler
        .update(TraceOperands::mixed(&Us, &Vs), 4, &mut schur)
        .unwrap();

    assert!(schur.is_symmetric());
    // untouched row / column of the output
    for k in 0..5 {
        assert_eq!(schur[(4, k)], 0.);
    }
}

#[test]
fn test_schur_identity_gram() {
    let (layout, _, store) = schur_data();
    let I = Matrix::identity(layout.dim());
    let perm = [0, 1, 2, 3];

    for operands in [TraceOperands::mixed(&I, &I), TraceOperands::squared(&I)] {
        let mut schur = Matrix::zeros((4, 4));
        compute_schur_contribution(
            &layout,
            &store,
            &perm,
            operands,
            4,
            &mut schur,
            &SchurSettings::default(),
        )
        .unwrap();

        for i in 0..4 {
            for j in 0..4 {
                assert!((schur[(i, j)] - store.inner(i, j)).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn test_schur_count_and_accumulate() {
    let (layout, A, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let perm = [0, 1, 2, 3];

    let expected = (0..4)
        .flat_map(|j| (0..=j).map(move |i| (i, j)))
        .filter(|&(i, j)| dense_trace(&A[i], &U, &A[j], &V).abs() > 1e-14)
        .count();

    let mut schur = Matrix::zeros((4, 4));
    let mut assembler = SchurAssembler::new(&layout, &store, &perm, SchurSettings::default());

    let nnz = assembler
        .update(TraceOperands::mixed(&U, &V), 4, &mut schur)
        .unwrap();
    assert_eq!(nnz, expected);
    let once = schur.clone();

    let nnz2 = assembler
        .update(TraceOperands::mixed(&U, &V), 4, &mut schur)
        .unwrap();
    assert_eq!(nnz2, nnz);
    for (twice, once) in schur.data.iter().zip(&once.data) {
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }
    assert_eq!(assembler.info.total_nnz, 2 * nnz);
}

#[test]
fn test_schur_scenario_diag() {
    // A_0 = I, U = V = diag(2,3), so Trace(A U A V) = 4 + 9
    let layout = BlockLayout::new(&[2]).unwrap();
    let store = ConstraintStore::new(vec![1., 1.], vec![0, 2], vec![0, 1], vec![0, 1]);
    let U = Matrix::<f64>::from_diag(&[2., 3.]);
    let I = Matrix::<f64>::identity(2);

    let mut schur = Matrix::<f64>::zeros((1, 1));
    let nnz = compute_schur_contribution(
        &layout,
        &store,
        &[0],
        TraceOperands::mixed(&U, &U),
        1,
        &mut schur,
        &SchurSettings::default(),
    )
    .unwrap();

    assert_eq!(nnz, 1);
    assert!((schur[(0, 0)] - 13.).abs() < 1e-14);
    assert!((schur[(0, 0)] - dense_trace(&I, &U, &I, &U)).abs() < 1e-14);
}

#[test]
fn test_schur_permutation_swap() {
    // two constraints with distinct diagonal and off-diagonal values
    let layout = BlockLayout::new(&[2]).unwrap();
    let A0 = CscMatrix::from(&Matrix::from_diag(&[1., 0.]));
    let A1 = CscMatrix::from(&Matrix::new_from_slice((2, 2), &[1., 1., 1., 2.]));
    let store = ConstraintStore::from_triu(&[A0, A1], &layout).unwrap();
    let U = Matrix::new_from_slice((2, 2), &[2., 0.5, 0.5, 1.]);
    let settings = SchurSettings::default();

    let mut S = Matrix::zeros((2, 2));
    let mut Sswap = Matrix::zeros((2, 2));
    let ops = TraceOperands::squared(&U);
    compute_schur_contribution(&layout, &store, &[0, 1], ops, 2, &mut S, &settings).unwrap();
    compute_schur_contribution(&layout, &store, &[1, 0], ops, 2, &mut Sswap, &settings).unwrap();

    assert!(S[(0, 0)] != S[(1, 1)]);
    assert_eq!(S[(0, 0)], Sswap[(1, 1)]);
    assert_eq!(S[(1, 1)], Sswap[(0, 0)]);
    assert_eq!(S[(0, 1)], Sswap[(1, 0)]);
    assert_eq!(S[(1, 0)], Sswap[(0, 1)]);
}

#[test]
fn test_schur_colend_zero() {
    let (layout, _, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let mut schur = Matrix::zeros((4, 4));

    // an empty permutation is enough for no columns
    let nnz = compute_schur_contribution(
        &layout,
        &store,
        &[],
        TraceOperands::mixed(&U, &V),
        0,
        &mut schur,
        &SchurSettings::default(),
    )
    .unwrap();
    assert_eq!(nnz, 0);
    assert!(schur.data.iter().all(|&v| v == 0.));
}

#[test]
fn test_schur_partial_colend() {
    let (layout, A, store) = schur_data();
    let (U, V) = block_operands(&layout);
    let mut schur = Matrix::zeros((4, 4));

    compute_schur_contribution(
        &layout,
        &store,
        &[0, 1, 2, 3],
        TraceOperands::mixed(&U, &V),
        2,
        &mut schur,
        &SchurSettings::default(),
    )
    .unwrap();

    for i in 0..4 {
        for j in 0..4 {
            if i < 2 && j < 2 {
                let t = dense_trace(&A[i], &U, &A[j], &V);
                assert!((schur[(i, j)] - t).abs() < 1e-10);
            } else {
                assert_eq!(schur[(i, j)], 0.);
            }
        }
    }
}

#[test]
fn test_schur_squared_is_mixed_with_equal_operands() {
    let (layout, _, store) = schur_data();
    let (U, _) = block_operands(&layout);
    let Us = CscMatrix::from(&U);
    let perm = [0, 1, 2, 3];
    let settings = SchurSettings::default();

    let mut S1 = Matrix::zeros((4, 4));
    let mut S2 = Matrix::zeros((4, 4));
    compute_schur_contribution(&layout, &store, &perm, TraceOperands::squared(&Us), 4, &mut S1, &settings)
        .unwrap();
    compute_schur_contribution(&layout, &store, &perm, TraceOperands::mixed(&Us, &Us), 4, &mut S2, &settings)
        .unwrap();
    assert!(S1.data.norm_inf_diff(&S2.data) < 1e-12);
}
