use super::Endian;
use num_enum::{FromPrimitive, IntoPrimitive};
use num_traits::NumCast;

mod id;

pub use id::TagId;

#[derive(Clone, Debug)]
pub struct Tag {
    pub code: u16,
    pub datatype: TagType,
    pub count: usize,
    pub data: Vec<u8>,
    pub endian: Endian,
}

impl Tag {
    /// Numeric values coerced into `T`.
    ///
    /// None if the tag is not numeric or any value does not fit in `T`.
    /// Rationals are divided out, so only float targets are meaningful for them.
    pub fn values<T: NumCast>(&self) -> Option<Vec<T>> {
        let endian = self.endian;
        let data = self.data.as_slice();
        match self.datatype {
            TagType::Byte | TagType::Undefined => data.iter().map(|v| <T as NumCast>::from(*v)).collect(),
            TagType::SByte => data.iter().map(|v| <T as NumCast>::from(*v as i8)).collect(),
            TagType::Short => endian.decode_all_to_primative::<2, u16, T>(data),
            TagType::SShort => endian.decode_all_to_primative::<2, i16, T>(data),
            TagType::Long | TagType::Ifd => endian.decode_all_to_primative::<4, u32, T>(data),
            TagType::SLong => endian.decode_all_to_primative::<4, i32, T>(data),
            TagType::Float => endian.decode_all_to_primative::<4, f32, T>(data),
            TagType::Double => endian.decode_all_to_primative::<8, f64, T>(data),
            TagType::Long8 | TagType::Ifd8 => endian.decode_all_to_primative::<8, u64, T>(data),
            TagType::SLong8 => endian.decode_all_to_primative::<8, i64, T>(data),
            TagType::Rational => endian
                .decode_all::<4, u32>(data)?
                .chunks_exact(2)
                .map(|pair| <T as NumCast>::from(pair[0] as f64 / pair[1] as f64))
                .collect(),
            TagType::SRational => endian
                .decode_all::<4, i32>(data)?
                .chunks_exact(2)
                .map(|pair| <T as NumCast>::from(pair[0] as f64 / pair[1] as f64))
                .collect(),
            TagType::Ascii | TagType::Unknown => None,
        }
    }

    /// First value, for tags that hold a single number.
    pub fn value<T: NumCast + Copy>(&self) -> Option<T> {
        self.values()?.first().copied()
    }

    pub fn as_string(&self) -> Option<String> {
        match self.datatype {
            TagType::Ascii => String::from_utf8(self.data.clone())
                .ok()
                .map(|s| s.trim_end_matches('\0').to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, IntoPrimitive, FromPrimitive)]
#[repr(u16)]
pub enum TagType {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SByte = 6,
    Undefined = 7,
    SShort = 8,
    SLong = 9,
    SRational = 10,
    Float = 11,
    Double = 12,
    Ifd = 13,
    Long8 = 16,
    SLong8 = 17,
    Ifd8 = 18,

    #[num_enum(default)]
    Unknown = 0xFFFF,
}

impl TagType {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            TagType::Byte => 1,
            TagType::Ascii => 1,
            TagType::Short => 2,
            TagType::Long => 4,
            TagType::Rational => 8,
            TagType::SByte => 1,
            TagType::Undefined => 1,
            TagType::SShort => 2,
            TagType::SLong => 4,
            TagType::SRational => 8,
            TagType::Float => 4,
            TagType::Double => 8,
            TagType::Ifd => 4,
            TagType::Long8 => 8,
            TagType::SLong8 => 8,
            TagType::Ifd8 => 8,

            TagType::Unknown => 1,
        }
    }
}
