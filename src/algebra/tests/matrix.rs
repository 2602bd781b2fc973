#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_4x4_triu() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    2.0  -3.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![4., -3., 8., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_4x4() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[ 1.0    ⋅    2.0  -3.0]
    //[  ⋅   -1.0    ⋅    1.0]

    //NB: same as above, but with tril entries
    let Ap = vec![0, 2, 5, 8, 10];
    let Ai = vec![0, 2, 0, 1, 3, 0, 1, 2, 2, 3];
    let Ax = vec![4., 1., -3., 8., -1., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_3x4() -> CscMatrix<f64> {
    // A =
    //[-1.0  -17.0  6.0  10.0]
    //[ 3.0     ⋅   7.0    ⋅ ]
    //[  ⋅    -4.0   ⋅   -5.0]
    let Ap = vec![0, 2, 4, 6, 8];
    let Ai = vec![0, 1, 0, 2, 0, 1, 0, 2];
    let Ax = vec![-1., 3., -17., -4., 6., 7., 10., -5.];
    CscMatrix::new(3, 4, Ap, Ai, Ax)
}

#[test]
fn test_nrows_ncols_nnz_is_square() {
    let A = test_matrix_3x4();
    let B = test_matrix_4x4_triu();
    assert_eq!(A.nrows(), 3);
    assert_eq!(A.ncols(), 4);
    assert_eq!(B.nrows(), 4);
    assert_eq!(B.ncols(), 4);
    assert!(!A.is_square());
    assert!(B.is_square());
    assert_eq!(A.nnz(), 8);
    assert_eq!(B.nnz(), 8);
}

#[test]
fn test_check_format() {
    let A = test_matrix_4x4();
    assert!(A.check_format().is_ok());

    // out of order rows
    let mut B = A.clone();
    B.rowval.swap(0, 1);
    assert_eq!(B.check_format(), Err(SparseFormatError::BadRowval));

    // row out of bounds
    let mut B = A.clone();
    B.rowval[1] = 4;
    assert_eq!(B.check_format(), Err(SparseFormatError::BadRowval));

    // non-monotone colptr
    let mut B = A.clone();
    B.colptr[1] = 6;
    assert_eq!(B.check_format(), Err(SparseFormatError::BadColptr));

    // inconsistent lengths
    let mut B = A;
    B.nzval.pop();
    assert_eq!(
        B.check_format(),
        Err(SparseFormatError::IncompatibleDimension)
    );
}

#[test]
fn test_to_triu() {
    let A = test_matrix_4x4();
    let B = test_matrix_4x4_triu();
    assert_eq!(A.to_triu(), B);
}

#[test]
fn test_identity() {
    let I = CscMatrix::<f64>::identity(3);
    assert!(I.check_format().is_ok());
    assert_eq!(Matrix::from(&I), Matrix::identity(3));
}

#[test]
fn test_dense_sparse_conversion() {
    let A = test_matrix_3x4();
    let M = Matrix::from(&A);
    assert_eq!(M[(0, 1)], -17.);
    assert_eq!(M[(2, 3)], -5.);
    assert_eq!(M[(1, 1)], 0.);
    assert_eq!(CscMatrix::from(&M), A);
}

#[test]
fn test_dense_is_symmetric() {
    let A = Matrix::from(&test_matrix_4x4());
    assert!(!A.is_symmetric());

    let D = Matrix::from_diag(&[1., 2., 3.]);
    assert!(D.is_symmetric());
    assert_eq!(D[(2, 2)], 3.);
    assert_eq!(D.data(), &[1., 0., 0., 0., 2., 0., 0., 0., 3.]);

    assert!(!Matrix::<f64>::zeros((2, 3)).is_symmetric());
}
