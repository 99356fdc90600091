use super::{CloudTiffError, CloudTiffResult};
use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Serialize, Serializer};
use std::fmt::Display;

#[derive(Debug, PartialEq, Clone, Copy, IntoPrimitive, FromPrimitive)]
#[repr(u16)]
pub enum SampleFormat {
    Unsigned = 1,
    Signed = 2,
    Float = 3,
    Undefined = 4,
    ComplexInt = 5,
    ComplexFloat = 6,

    #[num_enum(default)]
    Unknown = 0xFFFF,
}

/// Pixel type of a band, named the way numpy/rasterio name dtypes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataType {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64,
    ComplexInt16,
    Complex64,
    Complex128,
}

impl DataType {
    pub fn from_sample(bits_per_sample: u16, format: SampleFormat) -> CloudTiffResult<Self> {
        use DataType::*;
        let data_type = match (format, bits_per_sample) {
            // GDAL promotes sub-byte samples to bytes and ignores "undefined"
            (SampleFormat::Unsigned | SampleFormat::Undefined, 1..=8) => UInt8,
            (SampleFormat::Unsigned | SampleFormat::Undefined, 16) => UInt16,
            (SampleFormat::Unsigned | SampleFormat::Undefined, 32) => UInt32,
            (SampleFormat::Unsigned | SampleFormat::Undefined, 64) => UInt64,
            (SampleFormat::Signed, 8) => Int8,
            (SampleFormat::Signed, 16) => Int16,
            (SampleFormat::Signed, 32) => Int32,
            (SampleFormat::Signed, 64) => Int64,
            (SampleFormat::Float, 16 | 32) => Float32,
            (SampleFormat::Float, 64) => Float64,
            (SampleFormat::ComplexInt, 32) => ComplexInt16,
            (SampleFormat::ComplexFloat, 64) => Complex64,
            (SampleFormat::ComplexFloat, 128) => Complex128,
            _ => {
                return Err(CloudTiffError::UnsupportedDataType((
                    bits_per_sample,
                    format.into(),
                )))
            }
        };
        Ok(data_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::UInt8 => "uint8",
            DataType::Int8 => "int8",
            DataType::UInt16 => "uint16",
            DataType::Int16 => "int16",
            DataType::UInt32 => "uint32",
            DataType::Int32 => "int32",
            DataType::UInt64 => "uint64",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::ComplexInt16 => "complex_int16",
            DataType::Complex64 => "complex64",
            DataType::Complex128 => "complex128",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
