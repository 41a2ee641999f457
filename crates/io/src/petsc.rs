//! Low-level binary layout of the solver's matrix/vector file.
//!
//! All integers and floats are big-endian; floats are 8-byte IEEE-754.
//!
//! ```text
//! matrix:  i32 MAT_FILE_CLASS_ID | u32 rows | u32 cols | u32 nnz
//!          | u32[rows] nnz per row | u32[nnz] column indices | f64[nnz] values
//! vector:  i32 VEC_FILE_CLASS_ID | u32 len | f64[len] values
//! ```
//!
//! Column indices and values are written row by row, in the same order.

use std::io::{self, Read, Write};

/// Class tag of a sparse matrix block.
pub const MAT_FILE_CLASS_ID: i32 = 1_211_216;

/// Class tag of a dense vector block.
pub const VEC_FILE_CLASS_ID: i32 = 1_211_214;

/// Writes matrix and vector blocks to any byte sink.
#[derive(Debug)]
pub struct PetscWriter<W> {
    inner: W,
}

impl<W: Write> PetscWriter<W> {
    /// Wraps `inner`. Callers should supply a buffered sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Writes the matrix class tag, dimensions (`n x n`), total nonzero
    /// count and per-row nonzero counts.
    pub fn write_matrix_header(&mut self, n: u32, nnz: u32, row_nnz: &[u32]) -> io::Result<()> {
        self.inner.write_all(&MAT_FILE_CLASS_ID.to_be_bytes())?;
        self.inner.write_all(&n.to_be_bytes())?;
        self.inner.write_all(&n.to_be_bytes())?;
        self.inner.write_all(&nnz.to_be_bytes())?;
        self.write_u32s(row_nnz)
    }

    /// Writes the column indices of one row.
    pub fn write_indices(&mut self, columns: &[u32]) -> io::Result<()> {
        self.write_u32s(columns)
    }

    /// Writes the values of one row.
    pub fn write_values(&mut self, values: &[f64]) -> io::Result<()> {
        for v in values {
            self.inner.write_all(&v.to_be_bytes())?;
        }
        Ok(())
    }

    /// Writes a complete vector block.
    pub fn write_vector(&mut self, values: &[f64]) -> io::Result<()> {
        let len = u32::try_from(values.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "vector longer than u32::MAX")
        })?;
        self.inner.write_all(&VEC_FILE_CLASS_ID.to_be_bytes())?;
        self.inner.write_all(&len.to_be_bytes())?;
        self.write_values(values)
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_u32s(&mut self, values: &[u32]) -> io::Result<()> {
        for v in values {
            self.inner.write_all(&v.to_be_bytes())?;
        }
        Ok(())
    }
}

/// A square sparse matrix in compressed-row form, as read back from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    columns: Vec<u32>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Number of rows (and columns).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column indices and values of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n`.
    pub fn row(&self, i: usize) -> (&[u32], &[f64]) {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        (&self.columns[range.clone()], &self.values[range])
    }
}

/// Reads matrix and vector blocks back from a byte source.
#[derive(Debug)]
pub struct PetscReader<R> {
    inner: R,
}

impl<R: Read> PetscReader<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads one matrix block.
    pub fn read_matrix(&mut self) -> io::Result<SparseMatrix> {
        let tag = self.read_i32()?;
        if tag != MAT_FILE_CLASS_ID {
            return Err(invalid(format!("expected matrix class tag, got {tag}")));
        }
        let rows = self.read_u32()? as usize;
        let cols = self.read_u32()? as usize;
        if rows != cols {
            return Err(invalid(format!("matrix is not square: {rows}x{cols}")));
        }
        let nnz = self.read_u32()? as usize;
        let mut row_ptr = Vec::with_capacity(rows + 1);
        row_ptr.push(0);
        for _ in 0..rows {
            let count = self.read_u32()? as usize;
            row_ptr.push(row_ptr[row_ptr.len() - 1] + count);
        }
        if row_ptr[rows] != nnz {
            return Err(invalid(format!(
                "row counts sum to {}, header says {nnz}",
                row_ptr[rows]
            )));
        }
        let columns = (0..nnz)
            .map(|_| self.read_u32())
            .collect::<io::Result<Vec<_>>>()?;
        if let Some(&c) = columns.iter().find(|&&c| c as usize >= cols) {
            return Err(invalid(format!("column index {c} out of range")));
        }
        let values = (0..nnz)
            .map(|_| self.read_f64())
            .collect::<io::Result<Vec<_>>>()?;
        Ok(SparseMatrix {
            n: rows,
            row_ptr,
            columns,
            values,
        })
    }

    /// Reads the next vector block, or `None` at a clean end of input.
    pub fn read_vector(&mut self) -> io::Result<Option<Vec<f64>>> {
        let mut tag = [0u8; 4];
        match self.inner.read(&mut tag[..1])? {
            0 => return Ok(None),
            _ => self.inner.read_exact(&mut tag[1..])?,
        }
        let tag = i32::from_be_bytes(tag);
        if tag != VEC_FILE_CLASS_ID {
            return Err(invalid(format!("expected vector class tag, got {tag}")));
        }
        let len = self.read_u32()? as usize;
        let values = (0..len)
            .map(|_| self.read_f64())
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Some(values))
    }

    fn read_i32(&mut self) -> io::Result<i32> {
        let mut b = [0u8; 4];
        self.inner.read_exact(&mut b)?;
        Ok(i32::from_be_bytes(b))
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        let mut b = [0u8; 4];
        self.inner.read_exact(&mut b)?;
        Ok(u32::from_be_bytes(b))
    }

    fn read_f64(&mut self) -> io::Result<f64> {
        let mut b = [0u8; 8];
        self.inner.read_exact(&mut b)?;
        Ok(f64::from_be_bytes(b))
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
