#![allow(non_snake_case)]
use sdpschur::algebra::*;
use sdpschur::schur::*;
use std::fs::File;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let layout = BlockLayout::new(&[2]).unwrap();
    let A = CscMatrix::from(&Matrix::new_from_slice((2, 2), &[1., 1., 1., 2.]));
    let store = ConstraintStore::from_triu(&[CscMatrix::identity(2), A], &layout).unwrap();

    let problem = SchurProblem {
        block_sizes: layout.sizes().to_vec(),
        store,
        perm: vec![0, 1],
        U: Matrix::from_diag(&[2., 3.]).into(),
        V: None,
        colend: 2,
        settings: SchurSettings {
            verbose: true,
            ..SchurSettings::default()
        },
    };

    // write the problem to a file and read it back
    let filename = std::env::temp_dir().join("sdpschur_example.json");
    let mut file = File::create(&filename).unwrap();
    problem.write_to_file(&mut file).unwrap();

    let mut file = File::open(&filename).unwrap();
    let problem = SchurProblem::<f64>::read_from_file(&mut file).unwrap();

    let mut schur = Matrix::zeros((2, 2));
    problem.update_into(&mut schur).unwrap();
    println!("{}", schur);
}
