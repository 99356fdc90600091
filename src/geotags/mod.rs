// https://docs.ogc.org/is/19-008r4/19-008r4.html#_geotiff_tags_for_coordinate_transformations

use crate::tiff::{Ifd, TagId};
use std::fmt::Display;

mod error;
mod id;
mod keys;
mod value;

pub use error::GeoTiffError;
pub use id::GeoKeyId;
pub use keys::{GeoKey, GeoKeyDirectory};
pub use value::GeoKeyValue;

/// GTRasterTypeGeoKey value for rasters whose tiepoints address pixel centers
pub const RASTER_PIXEL_IS_POINT: u16 = 2;

#[derive(Clone, Debug)]
pub struct GeoTags {
    pub directory: GeoKeyDirectory,
    pub model: GeoModel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GeoModel {
    Transformed(GeoModelTransformed),
    Scaled(GeoModelScaled),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeoModelTransformed {
    pub transformation: [f64; 16],
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeoModelScaled {
    pub pixel_scale: [f64; 3],
    pub tiepoint: [f64; 6],
}

impl GeoTags {
    pub fn parse(ifd: &Ifd) -> Result<Self, GeoTiffError> {
        let tiepoint = get_tag_as_array(ifd, TagId::ModelTiepoint)?;
        let pixel_scale = get_tag_as_array(ifd, TagId::ModelPixelScale)?;
        let transformation = get_tag_as_array(ifd, TagId::ModelTransformation)?;
        let model = match (tiepoint, pixel_scale, transformation) {
            (Some(tiepoint), Some(pixel_scale), _) => GeoModel::Scaled(GeoModelScaled {
                tiepoint,
                pixel_scale,
            }),
            (_, _, Some(transformation)) => {
                GeoModel::Transformed(GeoModelTransformed { transformation })
            }
            _ => return Err(GeoTiffError::MissingTag(TagId::ModelPixelScale)),
        };

        // Georeferenced but without keys is legal, it just has no CRS
        let directory = match GeoKeyDirectory::parse(ifd) {
            Ok(directory) => directory,
            Err(GeoTiffError::MissingTag(_)) => GeoKeyDirectory {
                version: 1,
                revision: (1, 0),
                keys: vec![],
            },
            Err(e) => return Err(e),
        };

        Ok(Self { directory, model })
    }

    pub fn is_pixel_is_point(&self) -> bool {
        self.directory
            .get(GeoKeyId::GTRasterTypeGeoKey)
            .and_then(|v| v.as_number::<u16>())
            == Some(RASTER_PIXEL_IS_POINT)
    }
}

impl Display for GeoTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "GeoTIFF Tags:")?;
        match &self.model {
            GeoModel::Transformed(model) => {
                writeln!(f, "  Transformation: {:?}", model.transformation)?;
            }
            GeoModel::Scaled(model) => {
                writeln!(f, "  Tiepoint: {:?}", model.tiepoint)?;
                writeln!(f, "  Pixel Scale: {:?}", model.pixel_scale)?;
            }
        }
        write!(
            f,
            "  Directory: {{version: {}, revision: {}.{}}}",
            self.directory.version, self.directory.revision.0, self.directory.revision.1,
        )?;
        for key in self.directory.keys.iter() {
            write!(f, "\n    {key}")?;
        }
        Ok(())
    }
}

// Leading N values of an optional tag. Multiple tiepoints are allowed, only the first is used.
fn get_tag_as_array<const N: usize>(ifd: &Ifd, id: TagId) -> Result<Option<[f64; N]>, GeoTiffError> {
    let Ok(tag) = ifd.get_tag(id) else {
        return Ok(None);
    };
    tag.values::<f64>()
        .and_then(|values| values.get(..N).and_then(|v| v.try_into().ok()))
        .map(Some)
        .ok_or(GeoTiffError::BadTag(id))
}
