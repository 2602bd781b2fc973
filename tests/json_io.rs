#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use sdpschur::{algebra::*, schur::*};
    use std::io::{Seek, SeekFrom};

    let layout = BlockLayout::new(&[2, 1]).unwrap();
    let A0 = CscMatrix::from(&Matrix::new_from_slice(
        (3, 3),
        &[1., 2., 0., 2., 0., 0., 0., 0., 4.],
    ));
    let A1 = CscMatrix::identity(3);
    let store = ConstraintStore::from_triu(&[A0, A1], &layout).unwrap();

    let U = CscMatrix::from(&Matrix::new_from_slice(
        (3, 3),
        &[2., 1., 0., 1., 3., 0., 0., 0., 1.],
    ));
    let V = CscMatrix::from(&Matrix::from_diag(&[1., 2., 3.]));

    let settings = SchurSettingsBuilder::default()
        .zero_tolerance(1e-15)
        .build()
        .unwrap();

    let problem = SchurProblem {
        block_sizes: layout.sizes().to_vec(),
        store,
        perm: vec![1, 0],
        U: U.into(),
        V: Some(V.into()),
        colend: 2,
        settings,
    };

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = SchurProblem::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);

    let mut S1 = Matrix::zeros((2, 2));
    let mut S2 = Matrix::zeros((2, 2));
    let n1 = problem.update_into(&mut S1).unwrap();
    let n2 = problem2.update_into(&mut S2).unwrap();
    assert_eq!(n1, n2);
    assert_eq!(S1, S2);
}
