// Metadata benchmark for Cloud Optimized GeoTIFFs
//   tiff      TIFF container parsing, directories and tags
//   geotags   GeoTIFF key directory and model tags
//   cog       dataset view over a parsed TIFF: levels, georeferencing, profile
//   io        range-request sources behind Read + Seek
//   bench     timed opens and their reduction into reports

pub mod bench;
pub mod cog;
pub mod geotags;
pub mod io;
pub mod tiff;

pub use bench::{BenchmarkReport, CogOpener, Location, MetadataSample, MetadataSource, RasterMetadata};
pub use cog::{Bounds, CloudTiff, CloudTiffError, CloudTiffResult, Crs, DataType, GeoTransform, Level, Profile};
