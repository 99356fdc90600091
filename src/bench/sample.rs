use crate::cog::{Bounds, CloudTiff, CloudTiffResult, Crs, DataType};
use serde::Serialize;

/// The metadata fields read on every open.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RasterMetadata {
    pub bounds: Bounds,
    pub crs: Crs,
    pub width: u32,
    pub height: u32,
    pub band_count: u16,
    pub data_type: DataType,
    pub overview_count: usize,
}

impl RasterMetadata {
    /// Touch every field of an open COG, finishing with the consolidated profile.
    pub fn read(cog: &CloudTiff) -> CloudTiffResult<Self> {
        let metadata = Self {
            bounds: cog.bounds(),
            crs: cog.crs(),
            width: cog.width(),
            height: cog.height(),
            band_count: cog.band_count(),
            data_type: cog.data_type()?,
            overview_count: cog.overviews().len(),
        };
        let _profile = cog.profile()?;
        Ok(metadata)
    }
}

/// Outcome of one open: metadata and how long it took, or the error text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetadataSample {
    duration_ns: u64,
    #[serde(flatten)]
    metadata: Option<RasterMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl MetadataSample {
    pub fn success(duration_ns: u64, metadata: RasterMetadata) -> Self {
        Self {
            duration_ns,
            metadata: Some(metadata),
            error: None,
        }
    }

    /// Failed samples carry no timing
    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self {
            duration_ns: 0,
            metadata: None,
            error: Some(error.into()),
        }
    }

    pub fn duration_ns(&self) -> u64 {
        self.duration_ns
    }

    pub fn metadata(&self) -> Option<&RasterMetadata> {
        self.metadata.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn into_result(self) -> Result<(u64, RasterMetadata), String> {
        match (self.metadata, self.error) {
            (Some(metadata), _) => Ok((self.duration_ns, metadata)),
            (None, error) => Err(error.unwrap_or_default()),
        }
    }
}
