#![allow(non_snake_case)]

use sdpschur::algebra::*;
use sdpschur::schur::*;

fn problem_data() -> (BlockLayout, ConstraintStore<f64>) {
    // one 2x2 block and one 1x1 block
    let layout = BlockLayout::new(&[2, 1]).unwrap();

    // A0 = I
    let A0 = CscMatrix::identity(3);

    // A1 = [1 2; 2 0] ⊕ 5, given by its upper triangle
    let A1 = CscMatrix::new(
        3,                 // m
        3,                 // n
        vec![0, 1, 2, 3],  // colptr
        vec![0, 0, 2],     // rowval
        vec![1., 2., 5.],  // nzval
    );

    let store = ConstraintStore::from_triu(&[A0, A1], &layout).unwrap();
    (layout, store)
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let (layout, store) = problem_data();
    let perm = [1, 0];

    let U = Matrix::new_from_slice((3, 3), &[2., 1., 0., 1., 2., 0., 0., 0., 1.]);
    let V = Matrix::from_diag(&[1., 1., 4.]);

    let settings = SchurSettingsBuilder::default()
        .verbose(true)
        .collect_timings(true)
        .build()
        .unwrap();

    let mut assembler = SchurAssembler::new(&layout, &store, &perm, settings);
    let mut schur = Matrix::zeros((2, 2));

    // dense operands
    assembler
        .update(TraceOperands::mixed(&U, &V), 2, &mut schur)
        .unwrap();
    println!("dense:\n{}", schur);

    // the same operands held block sparse
    let (Us, Vs) = (CscMatrix::from(&U), CscMatrix::from(&V));
    schur.data_mut().set(0.);
    assembler
        .update(TraceOperands::mixed(&Us, &Vs), 2, &mut schur)
        .unwrap();
    println!("block sparse:\n{}", schur);
}
