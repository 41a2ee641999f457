//! Decoding of converted solver output into a dense row matrix.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::matlab::{MalformedBlock, MatlabToJson};

/// Decodes every block of a solver output stream into one row of floats.
///
/// Rows are returned in read order. `path` is used for error context only.
///
/// # Errors
///
/// Returns [`IoError::MalformedBlock`] for blocks that are not
/// newline-delimited, [`IoError::Decode`] for unparsable numeric tokens and
/// [`IoError::Read`] for underlying read failures.
pub fn decode_rows<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Vec<f64>>, IoError> {
    let stream = serde_json::Deserializer::from_reader(MatlabToJson::new(reader))
        .into_iter::<Vec<f64>>();
    let mut rows = Vec::new();
    for row in stream {
        rows.push(row.map_err(|e| classify(e, path))?);
    }
    Ok(rows)
}

/// Opens `path` and decodes it with [`decode_rows`].
///
/// # Errors
///
/// Returns [`IoError::Open`] if the file cannot be opened, otherwise any error
/// of [`decode_rows`].
pub fn read_solution(path: &Path) -> Result<Vec<Vec<f64>>, IoError> {
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = decode_rows(BufReader::new(file), path)?;
    debug!(
        path = %path.display(),
        rows = rows.len(),
        cols = rows.first().map_or(0, Vec::len),
        "decoded solver output"
    );
    Ok(rows)
}

fn classify(e: serde_json::Error, path: &Path) -> IoError {
    if !e.is_io() {
        return IoError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
    }
    let source = io::Error::from(e);
    let malformed = source
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MalformedBlock>())
        .map(|m| m.excerpt.clone());
    match malformed {
        Some(excerpt) => IoError::MalformedBlock {
            path: path.to_path_buf(),
            excerpt,
        },
        None => IoError::Read {
            path: path.to_path_buf(),
            source,
        },
    }
}
