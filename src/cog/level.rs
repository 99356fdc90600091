use super::datatype::{DataType, SampleFormat};
use super::CloudTiffResult;
use crate::tiff::{Ifd, TagId, TiffError};
use std::fmt::Display;

/// NewSubfileType transparency mask bit
const SUBFILE_MASK: u32 = 0x4;

/// One image directory of a COG: the full resolution image, an overview, or a mask.
#[derive(Clone, Debug)]
pub struct Level {
    pub dimensions: (u32, u32),
    pub subfile_type: u32,
    pub samples_per_pixel: u16,
    pub bits_per_sample: Vec<u16>,
    pub sample_format: SampleFormat,
    pub tile_size: Option<(u32, u32)>,
    pub compression: u16,
}

impl Level {
    pub fn from_ifd(ifd: &Ifd) -> Result<Self, TiffError> {
        // Required tags
        let width = ifd.get_tag_value(TagId::ImageWidth)?;
        let height = ifd.get_tag_value(TagId::ImageHeight)?;

        // Baseline defaults
        let subfile_type = ifd.get_tag_value(TagId::NewSubfileType).unwrap_or(0);
        let samples_per_pixel = ifd.get_tag_value(TagId::SamplesPerPixel).unwrap_or(1);
        let bits_per_sample = ifd
            .get_tag_values(TagId::BitsPerSample)
            .unwrap_or_else(|_| vec![1]);
        let sample_format = ifd
            .get_tag_value::<u16>(TagId::SampleFormat)
            .unwrap_or(SampleFormat::Unsigned.into())
            .into();
        let compression = ifd.get_tag_value(TagId::Compression).unwrap_or(1);

        let tile_size = match (
            ifd.get_tag_value(TagId::TileWidth),
            ifd.get_tag_value(TagId::TileLength),
        ) {
            (Ok(tile_width), Ok(tile_height)) => Some((tile_width, tile_height)),
            _ => None,
        };

        Ok(Self {
            dimensions: (width, height),
            subfile_type,
            samples_per_pixel,
            bits_per_sample,
            sample_format,
            tile_size,
            compression,
        })
    }

    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    pub fn megapixels(&self) -> f64 {
        (self.dimensions.0 as f64 * self.dimensions.1 as f64) / 1e6
    }

    pub fn is_mask(&self) -> bool {
        self.subfile_type & SUBFILE_MASK != 0
    }

    pub fn is_tiled(&self) -> bool {
        self.tile_size.is_some()
    }

    /// Data type of the first band
    pub fn data_type(&self) -> CloudTiffResult<DataType> {
        let bits = self.bits_per_sample.first().copied().unwrap_or(1);
        DataType::from_sample(bits, self.sample_format)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_mask() { "Mask" } else { "Level" };
        write!(
            f,
            "{kind}({}x{}, {} samples, {:?} bits, {:?}, compression {})",
            self.dimensions.0,
            self.dimensions.1,
            self.samples_per_pixel,
            self.bits_per_sample,
            self.sample_format,
            self.compression
        )?;
        if let Some((tile_width, tile_height)) = self.tile_size {
            write!(f, " tiled {tile_width}x{tile_height}")?;
        }
        Ok(())
    }
}
