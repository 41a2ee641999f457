//! Shared fixtures: an in-process reference solver and the golden chain.

#![allow(dead_code)]

use std::fmt::Write as _;

use absorb_graph::AdjacencyGraph;
use absorb_io::PetscReader;
use absorb_markov::AbsorbingChain;
use absorb_solver::{CancelToken, SolveJob, Solver, SolverError};

/// Solves every right-hand side of the system file by dense Gaussian
/// elimination and writes the solutions in the solver's text format.
pub struct DenseSolver;

impl Solver for DenseSolver {
    fn solve(&self, job: &SolveJob, cancel: &CancelToken) -> Result<(), SolverError> {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled);
        }
        let bytes = std::fs::read(job.input()).expect("read system file");
        let mut reader = PetscReader::new(bytes.as_slice());
        let sparse = reader.read_matrix().expect("read matrix");
        let n = sparse.n();
        let mut a = vec![vec![0.0; n]; n];
        for (i, row) in a.iter_mut().enumerate() {
            let (columns, values) = sparse.row(i);
            for (&c, &v) in columns.iter().zip(values) {
                row[c as usize] = v;
            }
        }

        let mut out = String::new();
        let mut count = 0u64;
        while let Some(b) = reader.read_vector().expect("read vector") {
            let x = gauss(&a, b);
            writeln!(out, "%Vec Object: 1 MPI processes\n  type: seq").unwrap();
            writeln!(out, "Vec_0x{count}_0 = [").unwrap();
            for v in x {
                writeln!(out, "{v:.16e}").unwrap();
            }
            writeln!(out, "];").unwrap();
            count += 1;
        }
        assert_eq!(count, job.rhs_count(), "one vector per absorbing node");
        std::fs::write(job.output(), out).expect("write solution");
        Ok(())
    }
}

/// A solver that always fails, as a crashing external process would.
pub struct FailingSolver;

impl Solver for FailingSolver {
    fn solve(&self, _job: &SolveJob, _cancel: &CancelToken) -> Result<(), SolverError> {
        Err(SolverError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "KSP diverged".to_string(),
        })
    }
}

/// A solver that writes fixed text to the output file.
pub struct CannedSolver(pub &'static str);

impl Solver for CannedSolver {
    fn solve(&self, job: &SolveJob, _cancel: &CancelToken) -> Result<(), SolverError> {
        std::fs::write(job.output(), self.0).expect("write solution");
        Ok(())
    }
}

fn gauss(a: &[Vec<f64>], mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();
    let mut a = a.to_vec();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap();
        a.swap(col, pivot);
        b.swap(col, pivot);
        let pivot_row = a[col].clone();
        for row in col + 1..n {
            let f = a[row][col] / pivot_row[col];
            if f != 0.0 {
                for k in col..n {
                    a[row][k] -= f * pivot_row[k];
                }
                b[row] -= f * b[col];
            }
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut s = 0.0;
        for k in row + 1..n {
            s += a[row][k] * x[k];
        }
        x[row] = (b[row] - s) / a[row][row];
    }
    x
}

/// Edges of the golden chain: transient 2..=7, absorbing 0 and 1.
pub const GOLDEN_EDGES: [(u32, u32); 14] = [
    (2, 0),
    (2, 4),
    (3, 1),
    (3, 4),
    (4, 0),
    (4, 1),
    (4, 2),
    (5, 3),
    (6, 2),
    (6, 4),
    (7, 1),
    (7, 3),
    (7, 4),
    // absorbing self-loop, which must not change the result
    (1, 1),
];

/// Expected `(from, P(absorbed at 0), P(absorbed at 1))`.
pub const GOLDEN_PROBABILITIES: [(u32, f64, f64); 6] = [
    (2, 0.8, 0.2),
    (3, 0.3, 0.7),
    (4, 0.6, 0.4),
    (5, 0.3, 0.7),
    (6, 0.7, 0.3),
    (7, 0.3, 0.7),
];

/// The golden chain with uniform weights, optionally overriding one edge.
pub fn golden_chain(override_edge: Option<((u32, u32), f64)>) -> AbsorbingChain<AdjacencyGraph> {
    let graph = AdjacencyGraph::from_edges(GOLDEN_EDGES.iter().map(|&(from, to)| {
        let weight = match override_edge {
            Some((edge, w)) if edge == (from, to) => w,
            _ => 1.0,
        };
        (from, to, weight)
    }));
    AbsorbingChain::new(graph, [0, 1].into())
}
