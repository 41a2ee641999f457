//! Streaming rewrite of the solver's bracket-delimited output into JSON arrays.
//!
//! The solver prints one block per solution vector:
//!
//! ```text
//! Vec_0x1_0 = [
//! 8.0000000000000004e-01
//! 6.9999999999999996e-01
//! ];
//! ```
//!
//! Text between blocks is ignored. Each block's interior must start and end
//! with a newline and carries one number per line. [`MatlabToJson`] turns
//! every block into one line of JSON (`[0.8,0.7]`), holding at most one
//! block in memory.

use std::io::{self, BufRead, Read};

use tracing::trace;

/// Maximum length of the trailing excerpt quoted in format errors.
pub const EXCERPT_LEN: usize = 100;

/// A streamed block whose interior is not newline-delimited, or which is
/// never closed.
///
/// Surfaced through [`io::Error`] with kind [`io::ErrorKind::InvalidData`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input, block ends with ...'{excerpt}'")]
pub struct MalformedBlock {
    /// Trailing excerpt of the offending block, at most [`EXCERPT_LEN`] bytes.
    pub excerpt: String,
}

/// Pull-based converter from the solver's block stream to JSON arrays.
///
/// Implements [`Read`]: every refill scans to the next `[`, reads up to the
/// matching `]`, and rewrites the block in place. A stream with no further
/// `[` ends cleanly.
#[derive(Debug)]
pub struct MatlabToJson<R> {
    inner: R,
    block: Vec<u8>,
    pos: usize,
    done: bool,
}

impl<R: BufRead> MatlabToJson<R> {
    /// Wraps a buffered solver output stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            block: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    /// Loads and rewrites the next block. Returns `false` at end of stream.
    fn refill(&mut self) -> io::Result<bool> {
        if self.done {
            return Ok(false);
        }
        self.block.clear();
        self.pos = 0;

        if !self.skip_past(b'[')? {
            self.done = true;
            return Ok(false);
        }
        self.inner.read_until(b']', &mut self.block)?;

        let len = self.block.len();
        let closed = self.block.last() == Some(&b']');
        if !closed || len < 2 || self.block[0] != b'\n' || self.block[len - 2] != b'\n' {
            self.done = true;
            let start = len.saturating_sub(EXCERPT_LEN);
            let excerpt = String::from_utf8_lossy(&self.block[start..]).into_owned();
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                MalformedBlock { excerpt },
            ));
        }

        if len == 2 {
            self.block.clear();
            self.block.extend_from_slice(b"[]\n");
        } else {
            for c in &mut self.block[1..len - 2] {
                if *c == b'\n' {
                    *c = b',';
                }
            }
            self.block[0] = b'[';
            self.block[len - 2] = b']';
            self.block[len - 1] = b'\n';
        }
        trace!(bytes = self.block.len(), "converted block");
        Ok(true)
    }

    /// Consumes input up to and including `delim`. Returns `false` if the
    /// stream ended first.
    fn skip_past(&mut self, delim: u8) -> io::Result<bool> {
        loop {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                return Ok(false);
            }
            match available.iter().position(|&b| b == delim) {
                Some(i) => {
                    self.inner.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    self.inner.consume(n);
                }
            }
        }
    }
}

impl<R: BufRead> Read for MatlabToJson<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.pos == self.block.len() && !self.refill()? {
            return Ok(0);
        }
        let n = out.len().min(self.block.len() - self.pos);
        out[..n].copy_from_slice(&self.block[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> io::Result<String> {
        let mut out = String::new();
        MatlabToJson::new(input.as_bytes()).read_to_string(&mut out)?;
        Ok(out)
    }

    #[test]
    fn rewrites_blocks_and_skips_noise() {
        let out = convert("noise[\n1.0\n2.0\n]junk[\n3.0\n]").unwrap();
        assert_eq!(out, "[1.0,2.0]\n[3.0]\n");
    }

    #[test]
    fn solver_style_output() {
        let input = "%Vec Object\nVec_0_0 = [\n8e-01\n2e-01\n];\nVec_1_0 = [\n2e-01\n8e-01\n];\n";
        assert_eq!(convert(input).unwrap(), "[8e-01,2e-01]\n[2e-01,8e-01]\n");
    }

    #[test]
    fn empty_stream_is_clean_end() {
        assert_eq!(convert("").unwrap(), "");
        assert_eq!(convert("no blocks here\n").unwrap(), "");
    }

    #[test]
    fn empty_block() {
        assert_eq!(convert("[\n]").unwrap(), "[]\n");
    }

    #[test]
    fn missing_leading_newline() {
        let err = convert("[1.0\n2.0\n]").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let inner = err
            .get_ref()
            .and_then(|e| e.downcast_ref::<MalformedBlock>())
            .expect("malformed block payload");
        assert_eq!(inner.excerpt, "1.0\n2.0\n]");
    }

    #[test]
    fn missing_trailing_newline() {
        let err = convert("[\n1.0\n2.0]").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn unterminated_block() {
        let err = convert("[\n1.0\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn excerpt_is_bounded() {
        let long = format!("[{}]", "9".repeat(500));
        let err = convert(&long).unwrap_err();
        let inner = err
            .get_ref()
            .and_then(|e| e.downcast_ref::<MalformedBlock>())
            .unwrap();
        assert_eq!(inner.excerpt.len(), EXCERPT_LEN);
        assert!(inner.excerpt.ends_with("9]"));
    }

    #[test]
    fn small_reads_see_the_same_bytes() {
        let mut r = MatlabToJson::new("x[\n1\n22\n]y[\n333\n]".as_bytes());
        let mut out = Vec::new();
        let mut buf = [0u8; 3];
        loop {
            let n = r.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "[1,22]\n[333]\n");
    }
}
