use super::ReadRange;
use std::io::{Error, ErrorKind, Read, Result, Seek, SeekFrom};
use tracing::trace;

#[derive(Debug)]
pub struct RangeReader<R: ReadRange> {
    source: R,
    position: u64,
    buffer: Vec<u8>,
    buffer_start: u64,
    read_ahead: usize,
    fetches: usize,
}

impl<R: ReadRange> RangeReader<R> {
    pub fn new(source: R, read_ahead: usize) -> Self {
        Self {
            source,
            position: 0,
            buffer: vec![],
            buffer_start: 0,
            read_ahead,
            fetches: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of range reads issued against the source so far
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    fn is_buffered(&self, position: u64) -> bool {
        position
            .checked_sub(self.buffer_start)
            .is_some_and(|offset| offset < self.buffer.len() as u64)
    }

    fn fill(&mut self, min_len: usize) -> Result<()> {
        let mut buffer = vec![0; min_len.max(self.read_ahead)];
        let n = self.source.read_range(self.position, &mut buffer)?;
        trace!(
            "Fetched {n} of {} bytes at offset {}",
            buffer.len(),
            self.position
        );
        // Positions past u64::MAX do not exist
        let room = usize::try_from(u64::MAX - self.position).unwrap_or(usize::MAX);
        buffer.truncate(n.min(room));
        self.buffer = buffer;
        self.buffer_start = self.position;
        self.fetches += 1;
        Ok(())
    }
}

impl<R: ReadRange> Read for RangeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.is_buffered(self.position) {
            self.fill(buf.len())?;
        }

        // An empty buffer after a fill means end of source
        let offset = (self.position - self.buffer_start) as usize;
        let available = self.buffer.get(offset..).unwrap_or(&[]);
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position += n as u64;

        Ok(n)
    }
}

impl<R: ReadRange> Seek for RangeReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match pos {
            SeekFrom::Start(offset) => {
                self.position = offset;
                Ok(self.position)
            }
            SeekFrom::Current(offset) => {
                self.position = self
                    .position
                    .checked_add_signed(offset)
                    .ok_or(Error::new(ErrorKind::InvalidInput, "Seek overflow"))?;
                Ok(self.position)
            }
            SeekFrom::End(_offset) => Err(Error::new(
                ErrorKind::Unsupported,
                "Seek from end not supported",
            )),
        }
    }
}
