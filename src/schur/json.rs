use crate::algebra::*;
use crate::schur::SchurProblem;

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// JSON file I/O for Schur update problems
pub trait ProblemJSONReadWrite: Sized {
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

impl<T> ProblemJSONReadWrite for SchurProblem<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let problem: SchurProblem<T> = serde_json::from_str(&buffer)?;

        // reject settings that the builder would not have produced
        problem
            .settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(problem)
    }
}

#[test]
fn test_json_io() {
    use crate::schur::{ConstraintStore, SchurSettings};
    use std::io::{Seek, SeekFrom};

    let r2 = f64::sqrt(2.0);
    let problem = SchurProblem {
        block_sizes: vec![2],
        store: ConstraintStore::new(
            vec![1., 1., r2],
            vec![0, 2, 3],
            vec![0, 1, 0],
            vec![0, 1, 1],
        ),
        perm: vec![1, 0],
        U: Matrix::from_diag(&[2., 3.]).into(),
        V: Some(CscMatrix::identity(2).into()),
        colend: 2,
        settings: SchurSettings::default(),
    };

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = SchurProblem::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);

    // mixed dense / sparse operands are rejected on update
    let mut schur = Matrix::zeros((2, 2));
    assert!(problem2.update_into(&mut schur).is_err());
    assert!(schur.data.iter().all(|&v| v == 0.));
}
