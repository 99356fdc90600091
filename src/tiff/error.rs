use super::TagId;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum TiffError {
    BadMagicBytes,
    ReadError(io::Error),
    NoIfd0,
    MissingTag(TagId),
    BadTag(TagId),
    IfdLoop(u64),
    TagTooLarge((u16, usize)),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::BadMagicBytes => write!(f, "not a TIFF file (bad magic bytes)"),
            TiffError::ReadError(e) => write!(f, "read error: {e}"),
            TiffError::NoIfd0 => write!(f, "TIFF has no image file directory"),
            TiffError::MissingTag(id) => write!(f, "missing required tag {id:?}"),
            TiffError::BadTag(id) => write!(f, "malformed tag {id:?}"),
            TiffError::IfdLoop(offset) => write!(f, "IFD chain loops back to offset {offset}"),
            TiffError::TagTooLarge((code, count)) => {
                write!(f, "tag {code} with {count} values is too large")
            }
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(e: io::Error) -> Self {
        TiffError::ReadError(e)
    }
}
