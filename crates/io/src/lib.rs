//! # absorb-io
//!
//! File formats exchanged with the external linear-system solver: the
//! big-endian binary matrix/vector file it reads, and the bracket-delimited
//! text stream it writes back.

mod decode;
mod error;
mod matlab;
mod petsc;
mod system_file;

pub use decode::{decode_rows, read_solution};
pub use error::IoError;
pub use matlab::{EXCERPT_LEN, MalformedBlock, MatlabToJson};
pub use petsc::{
    MAT_FILE_CLASS_ID, PetscReader, PetscWriter, SparseMatrix, VEC_FILE_CLASS_ID,
};
pub use system_file::SystemFile;
