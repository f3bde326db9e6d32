use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const SEPARATOR: &str = "========================================";
pub const PATH_LABEL: &str = "PLIK: ";

/// Writes banner-delimited records:
///
/// ```text
/// ========================================
/// PLIK: <path>
/// ========================================
/// <content>
///
/// ```
pub struct RecordWriter<W: Write> {
    inner: W,
    records: usize,
    bytes_written: u64,
}

impl RecordWriter<BufWriter<File>> {
    /// Creates the output file, truncating any existing content.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::with_capacity(64 * 1024, file)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records: 0,
            bytes_written: 0,
        }
    }

    /// Writes one record and returns the number of bytes it occupied.
    pub fn write_record(&mut self, path: &Path, content: &str) -> Result<u64> {
        let header = format!(
            "{sep}\n{label}{path}\n{sep}\n",
            sep = SEPARATOR,
            label = PATH_LABEL,
            path = path.display()
        );

        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(content.as_bytes())?;
        self.inner.write_all(b"\n\n")?;

        let size = (header.len() + content.len() + 2) as u64;
        self.records += 1;
        self.bytes_written += size;
        Ok(size)
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flushes buffered output and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
