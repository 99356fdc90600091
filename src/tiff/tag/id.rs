// https://www.awaresystems.be/imaging/tiff/tifftags/baseline.html
// https://docs.ogc.org/is/19-008r4/19-008r4.html#_geotiff_tags_for_coordinate_transformations

use num_enum::IntoPrimitive;

/// Tags the metadata reader looks up
#[derive(Debug, PartialEq, Clone, Copy, IntoPrimitive, Eq, Hash)]
#[repr(u16)]
pub enum TagId {
    NewSubfileType = 0x00FE,
    ImageWidth = 0x0100,
    ImageHeight = 0x0101,
    BitsPerSample = 0x0102,
    Compression = 0x0103,
    SamplesPerPixel = 0x0115,
    TileWidth = 0x0142,
    TileLength = 0x0143,
    SampleFormat = 0x0153,
    ModelPixelScale = 0x830E,
    ModelTiepoint = 0x8482,
    ModelTransformation = 0x85D8,
    GeoKeyDirectory = 0x87AF,
    GeoDoubleParams = 0x87B0,
    GeoAsciiParams = 0x87B1,
    GDALNoData = 0xA481,
}
