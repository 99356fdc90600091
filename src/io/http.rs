use super::{HttpOptions, ReadRange};
use reqwest::blocking::Client;
use reqwest::header::RANGE;
use reqwest::{StatusCode, Url};
use std::io::{Error, ErrorKind, Result};
use tracing::trace;

/// Byte-range reader over a single HTTP(S) resource
#[derive(Clone, Debug)]
pub struct HttpReader {
    url: Url,
    client: Client,
}

impl HttpReader {
    pub fn new(client: Client, url: Url) -> Self {
        Self { url, client }
    }
}

impl HttpOptions {
    /// Blocking client for range requests. Idle connections are not pooled,
    /// so every open pays for its own connection.
    pub fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::other(format!("failed to build HTTP client: {e}")))
    }
}

impl ReadRange for HttpReader {
    fn read_range(&self, start: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // GOTCHA byte range includes end
        let Some(end) = start.checked_add(buf.len() as u64 - 1) else {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("range at offset {start} runs past the end of the address space"),
            ));
        };
        trace!("GET {} bytes={start}-{end}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .header(RANGE, format!("bytes={start}-{end}"))
            .send()
            .map_err(|e| Error::new(ErrorKind::NotConnected, format!("{e}")))?;

        let status = response.status();
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(0);
        }
        if !status.is_success() {
            return Err(Error::other(format!("HTTP {status} for {}", self.url)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{e}")))?;

        // A plain 200 means the server ignored the range and sent everything
        let body = if status == StatusCode::PARTIAL_CONTENT {
            &bytes[..]
        } else {
            bytes.get(start as usize..).unwrap_or(&[])
        };
        let n = body.len().min(buf.len());
        buf[..n].copy_from_slice(&body[..n]);
        Ok(n)
    }
}
