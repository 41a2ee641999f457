//! File-level writer for the solver's binary system file.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::IoError;
use crate::petsc::PetscWriter;

/// Writes one system file: a sparse matrix followed by right-hand-side
/// vectors.
///
/// Data goes to a temporary file next to the destination, which is moved
/// into place by [`finish`](Self::finish). If the writer is dropped before
/// that, on any error path, the partial file is deleted.
#[derive(Debug)]
pub struct SystemFile {
    path: PathBuf,
    writer: PetscWriter<BufWriter<NamedTempFile>>,
    vectors: usize,
}

impl SystemFile {
    /// Starts a new system file destined for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Create`] if the temporary file cannot be created in
    /// the destination directory.
    pub fn create(path: &Path) -> Result<Self, IoError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(dir).map_err(|source| IoError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: PetscWriter::new(BufWriter::new(file)),
            vectors: 0,
        })
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the matrix class tag, dimensions, nonzero count and per-row
    /// nonzero counts.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Overflow`] if `nnz` exceeds `u32::MAX`, or
    /// [`IoError::Write`] on I/O failure.
    pub fn matrix_header(&mut self, n: u32, nnz: u64, row_nnz: &[u32]) -> Result<(), IoError> {
        let nnz = u32::try_from(nnz).map_err(|_| IoError::Overflow {
            what: "nonzero count",
            value: nnz,
        })?;
        self.writer
            .write_matrix_header(n, nnz, row_nnz)
            .map_err(|source| self.write_error("matrix header", source))
    }

    /// Writes the column indices of one matrix row.
    pub fn row_indices(&mut self, columns: &[u32]) -> Result<(), IoError> {
        self.writer
            .write_indices(columns)
            .map_err(|source| self.write_error("column indices", source))
    }

    /// Writes the values of one matrix row.
    pub fn row_values(&mut self, values: &[f64]) -> Result<(), IoError> {
        self.writer
            .write_values(values)
            .map_err(|source| self.write_error("matrix values", source))
    }

    /// Writes one right-hand-side vector block.
    pub fn vector(&mut self, values: &[f64]) -> Result<(), IoError> {
        self.writer
            .write_vector(values)
            .map_err(|source| self.write_error("right-hand side", source))?;
        self.vectors += 1;
        Ok(())
    }

    /// Flushes all data and moves the file to its destination.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Write`] if flushing fails or [`IoError::Persist`] if
    /// the file cannot be moved into place. The partial file is removed in
    /// both cases.
    pub fn finish(self) -> Result<PathBuf, IoError> {
        let Self {
            path,
            writer,
            vectors,
        } = self;
        let file = writer
            .into_inner()
            .into_inner()
            .map_err(|e| IoError::Write {
                path: path.clone(),
                phase: "flush",
                source: e.into_error(),
            })?;
        file.as_file().sync_all().map_err(|source| IoError::Write {
            path: path.clone(),
            phase: "sync",
            source,
        })?;
        file.persist(&path).map_err(|e| IoError::Persist {
            path: path.clone(),
            source: e.error,
        })?;
        debug!(path = %path.display(), vectors, "system file written");
        Ok(path)
    }

    fn write_error(&self, phase: &'static str, source: std::io::Error) -> IoError {
        IoError::Write {
            path: self.path.clone(),
            phase,
            source,
        }
    }
}
