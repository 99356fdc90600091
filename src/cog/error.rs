use crate::geotags::GeoTiffError;
use crate::tiff::TiffError;
use std::fmt;
use std::io;

pub type CloudTiffResult<T> = Result<T, CloudTiffError>;

#[derive(Debug)]
pub enum CloudTiffError {
    BadTiff(TiffError),
    BadGeoTiff(GeoTiffError),
    ReadError(io::Error),
    NoLevels,
    UnsupportedDataType((u16, u16)),
    BadUrl(String),
    NotSupported(String),
}

impl fmt::Display for CloudTiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudTiffError::BadTiff(e) => write!(f, "invalid TIFF: {e}"),
            CloudTiffError::BadGeoTiff(e) => write!(f, "invalid GeoTIFF: {e}"),
            CloudTiffError::ReadError(e) => write!(f, "{e}"),
            CloudTiffError::NoLevels => write!(f, "TIFF contains no image levels"),
            CloudTiffError::UnsupportedDataType((bits, format)) => write!(
                f,
                "unsupported sample type: {bits} bits per sample with sample format {format}"
            ),
            CloudTiffError::BadUrl(url) => write!(f, "invalid URL: {url}"),
            CloudTiffError::NotSupported(what) => write!(f, "not supported: {what}"),
        }
    }
}

impl std::error::Error for CloudTiffError {}

impl From<TiffError> for CloudTiffError {
    fn from(e: TiffError) -> Self {
        match e {
            TiffError::ReadError(io_error) => CloudTiffError::ReadError(io_error),
            tiff_error => CloudTiffError::BadTiff(tiff_error),
        }
    }
}

impl From<GeoTiffError> for CloudTiffError {
    fn from(e: GeoTiffError) -> Self {
        CloudTiffError::BadGeoTiff(e)
    }
}

impl From<io::Error> for CloudTiffError {
    fn from(e: io::Error) -> Self {
        CloudTiffError::ReadError(e)
    }
}
