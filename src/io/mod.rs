// I/O Traits
//   ReadRange is stateless positional I/O, a superset of Read + Seek with an immutable self
//   RangeReader turns any ReadRange back into Read + Seek, with a read-ahead buffer so the
//   many small reads of a directory walk cost few range requests

use std::io::{Read, Result, Seek, SeekFrom};
use std::sync::Mutex;
use std::time::Duration;

#[cfg(feature = "http")]
pub mod http;
mod range;

#[cfg(feature = "http")]
pub use http::HttpReader;
pub use range::RangeReader;

pub const DEFAULT_READ_AHEAD: usize = 64 * 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub trait ReadRange {
    /// Read bytes from a specific offset
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` only
    /// at the end of the source (or for sources that read in chunks).
    fn read_range(&self, start: u64, buf: &mut [u8]) -> Result<usize>;
}

impl<R: Read + Seek> ReadRange for Mutex<R> {
    fn read_range(&self, start: u64, buf: &mut [u8]) -> Result<usize> {
        let mut locked_self = self
            .lock()
            .map_err(|e| std::io::Error::other(format!("{e:?}")))?;
        locked_self.seek(SeekFrom::Start(start))?;
        locked_self.read(buf)
    }
}

/// Settings for remote sources
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub read_ahead: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            read_ahead: DEFAULT_READ_AHEAD,
        }
    }
}
