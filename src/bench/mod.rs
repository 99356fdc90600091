use crate::cog::{CloudTiff, CloudTiffError, CloudTiffResult};
use crate::io::HttpOptions;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

mod report;
mod sample;

pub use report::{summarize, BenchmarkReport, DurationStats, DURATION_SAMPLE_LEN, MAX_REPORTED_ERRORS};
pub use sample::{MetadataSample, RasterMetadata};

pub const DEFAULT_ITERATIONS: usize = 100;

/// Where a COG lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Url(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Something that can open a location and read its metadata.
///
/// Every call must open and release the resource itself; nothing is cached
/// between calls.
pub trait MetadataSource {
    fn read_metadata(&self, location: &Location) -> CloudTiffResult<RasterMetadata>;
}

/// Reads metadata with [`CloudTiff`], from files or over HTTP range requests.
#[derive(Clone, Debug)]
pub struct CogOpener {
    options: HttpOptions,
    #[cfg(feature = "http")]
    client: Option<reqwest::blocking::Client>,
}

impl CogOpener {
    /// Opener for local paths only
    pub fn local() -> Self {
        Self {
            options: HttpOptions::default(),
            #[cfg(feature = "http")]
            client: None,
        }
    }

    /// Opener that can also read URLs
    #[cfg(feature = "http")]
    pub fn remote(options: HttpOptions) -> io::Result<Self> {
        Ok(Self {
            options,
            client: Some(options.client()?),
        })
    }

    #[cfg(not(feature = "http"))]
    pub fn remote(options: HttpOptions) -> io::Result<Self> {
        Ok(Self { options })
    }

    fn read_path(&self, path: &Path) -> CloudTiffResult<RasterMetadata> {
        let file = File::open(path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
        let mut reader = BufReader::new(file);
        let cog = CloudTiff::open(&mut reader)?;
        trace!("{cog}");
        RasterMetadata::read(&cog)
    }

    #[cfg(feature = "http")]
    fn read_url(&self, url: &str) -> CloudTiffResult<RasterMetadata> {
        use crate::io::{HttpReader, RangeReader};
        use reqwest::Url;

        let Some(client) = &self.client else {
            return Err(CloudTiffError::NotSupported(
                "URLs need an opener built with CogOpener::remote".to_string(),
            ));
        };
        let parsed = Url::parse(url).map_err(|e| CloudTiffError::BadUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CloudTiffError::NotSupported(format!(
                "URL scheme `{}`",
                parsed.scheme()
            )));
        }

        let source = HttpReader::new(client.clone(), parsed);
        let mut reader = RangeReader::new(source, self.options.read_ahead);
        let cog = CloudTiff::open(&mut reader)?;
        debug!("Indexed {url} with {} range requests", reader.fetches());
        trace!("{cog}");
        RasterMetadata::read(&cog)
    }

    #[cfg(not(feature = "http"))]
    fn read_url(&self, _url: &str) -> CloudTiffResult<RasterMetadata> {
        Err(CloudTiffError::NotSupported(
            "URLs require the `http` feature".to_string(),
        ))
    }
}

impl MetadataSource for CogOpener {
    fn read_metadata(&self, location: &Location) -> CloudTiffResult<RasterMetadata> {
        match location {
            Location::Path(path) => self.read_path(path),
            Location::Url(url) => self.read_url(url),
        }
    }
}

/// Open once and time it.
///
/// The clock covers the open, every metadata read and the release of the
/// resource. Errors become a failed sample, they are never returned.
pub fn open_info<S: MetadataSource + ?Sized>(source: &S, location: &Location) -> MetadataSample {
    let t0 = Instant::now();
    match source.read_metadata(location) {
        Ok(metadata) => {
            let elapsed = t0.elapsed();
            debug!("Read metadata of {location} in {:.3}ms", elapsed.as_secs_f64() * 1e3);
            let duration_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
            MetadataSample::success(duration_ns, metadata)
        }
        Err(e) => {
            warn!("Failed to read {location}: {e}");
            MetadataSample::failure(e.to_string())
        }
    }
}

/// Open `iterations` times in sequence and summarize the timings.
pub fn run_benchmark<S: MetadataSource + ?Sized>(
    source: &S,
    location: &Location,
    iterations: usize,
) -> BenchmarkReport {
    let mut durations = vec![];
    let mut errors = vec![];
    for _ in 0..iterations {
        match open_info(source, location).into_result() {
            Ok((duration_ns, _)) => durations.push(duration_ns),
            Err(e) => errors.push(e),
        }
    }
    info!(
        "Benchmarked {location}: {} of {iterations} iterations succeeded",
        durations.len()
    );
    BenchmarkReport::reduce(iterations, durations, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cog::{Bounds, Crs, DataType};
    use std::cell::Cell;
    use std::panic::AssertUnwindSafe;

    /// Fails the first `failures` calls, then succeeds
    struct Scripted {
        calls: Cell<usize>,
        failures: usize,
    }

    impl Scripted {
        fn new(failures: usize) -> Self {
            Self {
                calls: Cell::new(0),
                failures,
            }
        }
    }

    impl MetadataSource for Scripted {
        fn read_metadata(&self, _location: &Location) -> CloudTiffResult<RasterMetadata> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if call < self.failures {
                return Err(CloudTiffError::NotSupported(format!("attempt {call}")));
            }
            Ok(RasterMetadata {
                bounds: Bounds {
                    min: [0.0, 0.0],
                    max: [1.0, 1.0],
                },
                crs: Crs::Unknown,
                width: 1,
                height: 1,
                band_count: 1,
                data_type: DataType::UInt8,
                overview_count: 0,
            })
        }
    }

    fn location() -> Location {
        Location::Path(PathBuf::from("scripted.tif"))
    }

    #[test]
    fn single_success_is_timed() {
        let sample = open_info(&Scripted::new(0), &location());
        assert!(sample.is_success());
        assert!(sample.error().is_none());
        assert_eq!(sample.metadata().map(|m| m.width), Some(1));
    }

    #[test]
    fn single_failure_is_captured() {
        let sample = open_info(&Scripted::new(1), &location());
        assert!(!sample.is_success());
        assert_eq!(sample.duration_ns(), 0);
        assert_eq!(sample.error(), Some("not supported: attempt 0"));
    }

    #[test]
    fn failures_do_not_abort_the_run() {
        let source = Scripted::new(3);
        let report = run_benchmark(&source, &location(), 10);
        assert_eq!(source.calls.get(), 10);
        assert_eq!(report.iterations, 10);
        assert_eq!(report.successful, 7);
        assert_eq!(report.failed, 3);
        let stats = report.stats.unwrap();
        assert_eq!(stats.durations_ns.len(), 7);
        assert!(stats.min_ns <= stats.median_ns && stats.median_ns <= stats.max_ns);
    }

    #[test]
    fn all_failures_are_reported() {
        let report = run_benchmark(&Scripted::new(usize::MAX), &location(), 5);
        assert_eq!(report.successful, 0);
        assert_eq!(report.failed, 5);
        assert_eq!(report.error.as_deref(), Some("All 5 iterations failed"));
        let expected: Vec<String> = (0..5).map(|i| format!("not supported: attempt {i}")).collect();
        assert_eq!(report.errors, expected);
    }

    /// Stops a run by panicking on call `limit`
    struct Interrupting {
        calls: Cell<usize>,
        limit: usize,
    }

    impl MetadataSource for Interrupting {
        fn read_metadata(&self, _location: &Location) -> CloudTiffResult<RasterMetadata> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.limit {
                panic!("interrupted after {call} calls");
            }
            Err(CloudTiffError::NotSupported("never".to_string()))
        }
    }

    #[test]
    fn huge_iteration_counts_do_not_preallocate() {
        let source = Interrupting {
            calls: Cell::new(0),
            limit: 3,
        };
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            run_benchmark(&source, &location(), usize::MAX)
        }));
        let message = result.unwrap_err();
        assert_eq!(
            message.downcast_ref::<String>().map(String::as_str),
            Some("interrupted after 3 calls")
        );
        assert_eq!(source.calls.get(), 3);
    }

    #[test]
    fn remote_reads_need_a_remote_opener() {
        let location = Location::Url("https://example.com/cog.tif".to_string());
        let sample = open_info(&CogOpener::local(), &location);
        assert!(sample.error().is_some_and(|e| e.starts_with("not supported")));
    }

    #[test]
    fn missing_file_names_the_path() {
        let location = Location::Path(PathBuf::from("/definitely/not/here.tif"));
        let sample = open_info(&CogOpener::local(), &location);
        assert!(sample.error().is_some_and(|e| e.contains("/definitely/not/here.tif")));
    }
}
