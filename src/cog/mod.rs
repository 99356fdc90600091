use crate::geotags::{GeoTags, GeoTiffError};
use crate::tiff::{Ifd, TagId, Tiff};
use serde::Serialize;
use std::fmt::Display;
use std::io::{Read, Seek};
use tracing::debug;

mod datatype;
mod error;
mod georef;
mod level;

pub use datatype::{DataType, SampleFormat};
pub use error::{CloudTiffError, CloudTiffResult};
pub use georef::{Bounds, Crs, GeoTransform};
pub use level::Level;

/// Metadata handle of an opened Cloud Optimized GeoTIFF.
///
/// Opening walks every image directory and parses the GeoTIFF keys of the
/// first one. Pixel data is never touched.
#[derive(Clone, Debug)]
pub struct CloudTiff {
    levels: Vec<Level>,
    masks: Vec<Level>,
    geo: Option<GeoTags>,
    nodata: Option<f64>,
}

/// Consolidated dataset description, the equivalent of a rasterio profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    pub driver: &'static str,
    pub dtype: DataType,
    pub nodata: Option<f64>,
    pub width: u32,
    pub height: u32,
    pub count: u16,
    pub crs: Crs,
    pub transform: [f64; 6],
    pub tiled: bool,
    pub blockxsize: Option<u32>,
    pub blockysize: Option<u32>,
}

impl CloudTiff {
    pub fn open<R: Read + Seek>(source: &mut R) -> CloudTiffResult<Self> {
        // TIFF indexing
        let tiff = Tiff::open(source)?;

        // Parse GeoTIFF tags, a plain TIFF is still readable
        let ifd0 = tiff.ifd0()?;
        let geo = match GeoTags::parse(ifd0) {
            Ok(geo) => Some(geo),
            Err(GeoTiffError::MissingTag(_)) => None,
            Err(e) => return Err(e.into()),
        };
        let nodata = parse_nodata(ifd0);

        // Map IFDs into COG levels, masks are kept apart from overviews
        //   Note this skips over any ifds which aren't valid images
        let mut levels = vec![];
        let mut masks = vec![];
        for (i, ifd) in tiff.ifds.iter().enumerate() {
            let level = match Level::from_ifd(ifd) {
                Ok(level) => level,
                Err(e) => {
                    debug!("Skipping IFD {i}: {e}");
                    continue;
                }
            };
            if level.is_mask() {
                masks.push(level);
            } else {
                levels.push(level);
            }
        }

        // COGs should already have levels sorted big to small
        levels.sort_by(|a, b| (b.megapixels()).total_cmp(&a.megapixels()));
        if levels.is_empty() {
            return Err(CloudTiffError::NoLevels);
        }

        debug!(
            "Indexed {} levels and {} masks, georeferenced: {}",
            levels.len(),
            masks.len(),
            geo.is_some()
        );

        Ok(Self {
            levels,
            masks,
            geo,
            nodata,
        })
    }

    fn full_level(&self) -> &Level {
        // Checked non-empty at initialization
        &self.levels[0]
    }

    pub fn full_dimensions(&self) -> (u32, u32) {
        self.full_level().dimensions
    }

    pub fn width(&self) -> u32 {
        self.full_level().width()
    }

    pub fn height(&self) -> u32 {
        self.full_level().height()
    }

    pub fn band_count(&self) -> u16 {
        self.full_level().samples_per_pixel
    }

    pub fn data_type(&self) -> CloudTiffResult<DataType> {
        self.full_level().data_type()
    }

    pub fn transform(&self) -> GeoTransform {
        self.geo
            .as_ref()
            .map(GeoTransform::from_geo_tags)
            .unwrap_or(GeoTransform::IDENTITY)
    }

    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.full_dimensions();
        self.transform().bounds(width, height)
    }

    pub fn crs(&self) -> Crs {
        self.geo
            .as_ref()
            .map(|geo| Crs::from_directory(&geo.directory))
            .unwrap_or(Crs::Unknown)
    }

    pub fn geo_tags(&self) -> Option<&GeoTags> {
        self.geo.as_ref()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn masks(&self) -> &[Level] {
        &self.masks
    }

    /// Decimation factors of the overviews, largest first excluded
    pub fn overviews(&self) -> Vec<u32> {
        let full_width = self.width() as f64;
        self.levels
            .iter()
            .skip(1)
            .map(|level| (full_width / level.width().max(1) as f64).round() as u32)
            .collect()
    }

    pub fn overview_count(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn profile(&self) -> CloudTiffResult<Profile> {
        let level = self.full_level();
        Ok(Profile {
            driver: "GTiff",
            dtype: level.data_type()?,
            nodata: self.nodata,
            width: level.width(),
            height: level.height(),
            count: level.samples_per_pixel,
            crs: self.crs(),
            transform: self.transform().to_array(),
            tiled: level.is_tiled(),
            blockxsize: level.tile_size.map(|(w, _)| w),
            blockysize: level.tile_size.map(|(_, h)| h),
        })
    }
}

// GDAL stores nodata as text
fn parse_nodata(ifd: &Ifd) -> Option<f64> {
    ifd.get_tag(TagId::GDALNoData)
        .ok()?
        .as_string()?
        .trim()
        .parse()
        .ok()
}

impl Display for CloudTiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CloudTiff({} Levels, {} Masks, {})",
            self.levels.len(),
            self.masks.len(),
            self.crs()
        )?;
        for level in self.levels.iter().chain(self.masks.iter()) {
            write!(f, "\n  {level}")?;
        }
        if let Some(geo) = &self.geo {
            write!(f, "\n{geo}")?;
        }
        Ok(())
    }
}
