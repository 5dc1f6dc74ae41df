//! Line-oriented input over plain or gzip-compressed files.
//!
//! Supported inputs:
//! - `-` (stdin)
//! - `.gz`, `.bgz` (gzip or bgzip, decoded as multi-member gzip)
//! - anything else (read as plain text)

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

/// Read buffer size for input files
pub const READ_BUFFER_SIZE: usize = 128 * 1024;

/// Fatal input/output failures. Any of these aborts the pass.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a path for buffered reading, decompressing if needed.
///
/// # Errors
///
/// Returns `StreamError::Open` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, StreamError> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            io::stdin().lock(),
        )));
    }

    let file = File::open(path).map_err(|source| StreamError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

/// Reads lines as raw bytes, reusing one buffer for the whole stream.
///
/// Line terminators (`\n` or `\r\n`) are stripped. A final line without a
/// terminator is still returned.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Read the next line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any I/O or decompression error from the underlying reader.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut line = self.buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
        Ok(Some(line))
    }

    /// 1-based number of the line last returned by [`next_line`](Self::next_line)
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}
