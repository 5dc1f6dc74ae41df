//! Tab-separated output of joined loci.
//!
//! Output format:
//!
//! ```text
//! #chr	start	end	score	feature
//! chr1	100	200	0.42	10GS.A.HELIX.187.194
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::parsing::lines::{is_gzipped, StreamError};

/// Header line written before any data row
pub const HEADER: &str = "#chr\tstart\tend\tscore\tfeature";

/// Write buffer size for output files
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Destination for output rows: stdout, a plain file, or a gzip file
pub enum OutputSink {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Create the output at `path`; `-` means stdout and a `.gz`/`.bgz`
    /// suffix enables gzip compression.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::Create` if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, StreamError> {
        if path == Path::new("-") {
            return Ok(Self::Stdout(BufWriter::with_capacity(
                WRITE_BUFFER_SIZE,
                io::stdout(),
            )));
        }

        let file = File::create(path).map_err(|source| StreamError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        if is_gzipped(path) {
            Ok(Self::Gzip(GzEncoder::new(writer, Compression::default())))
        } else {
            Ok(Self::Plain(writer))
        }
    }

    /// Flush all buffered data and write the gzip trailer if compressing.
    ///
    /// # Errors
    ///
    /// Returns any error raised while flushing.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Stdout(mut w) => w.flush(),
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Writes the header and joined rows to any `Write`
pub struct TsvWriter<W> {
    inner: W,
    na_value: String,
    rows: u64,
}

impl<W: Write> TsvWriter<W> {
    /// `na_value` is written in place of a missing score
    pub fn new(inner: W, na_value: impl Into<String>) -> Self {
        Self {
            inner,
            na_value: na_value.into(),
            rows: 0,
        }
    }

    /// Write the header line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.inner, "{HEADER}")
    }

    /// Write one data row: `locus`, score (or the absent marker), feature.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_row(&mut self, locus: &str, score: Option<f64>, feature: &str) -> io::Result<()> {
        match score {
            Some(score) => writeln!(self.inner, "{locus}\t{score}\t{feature}")?,
            None => writeln!(self.inner, "{locus}\t{}\t{feature}", self.na_value)?,
        }
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and return the underlying writer
    ///
    /// # Errors
    ///
    /// Returns any error raised while flushing.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
