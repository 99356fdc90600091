use crate::geotags::{GeoKeyDirectory, GeoKeyId, GeoModel, GeoTags};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// GeoKey code for a user-defined system
const USER_DEFINED: u16 = 32767;

/// Affine pixel to model transform, `x = a*col + b*row + c`, `y = d*col + e*row + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    pub fn from_geo_tags(geo: &GeoTags) -> Self {
        let mut transform = match &geo.model {
            GeoModel::Scaled(model) => {
                let [i, j, _, x, y, _] = model.tiepoint;
                let [sx, sy, _] = model.pixel_scale;
                Self {
                    a: sx,
                    b: 0.0,
                    c: x - i * sx,
                    d: 0.0,
                    e: -sy,
                    f: y + j * sy,
                }
            }
            GeoModel::Transformed(model) => {
                let m = model.transformation;
                Self {
                    a: m[0],
                    b: m[1],
                    c: m[3],
                    d: m[4],
                    e: m[5],
                    f: m[7],
                }
            }
        };

        // Tiepoints address pixel centers, move the origin to the corner
        if geo.is_pixel_is_point() {
            transform.c -= 0.5 * (transform.a + transform.b);
            transform.f -= 0.5 * (transform.d + transform.e);
        }
        transform
    }

    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// Extent of a `width` x `height` image under this transform.
    ///
    /// `min` is `[left, bottom]` and `max` is `[right, top]`, where top is the
    /// row 0 edge. A south-up or pixel space grid therefore has
    /// `min[1] > max[1]`. Rotated grids use the envelope of the four corners.
    pub fn bounds(&self, width: u32, height: u32) -> Bounds {
        let (w, h) = (width as f64, height as f64);
        if self.b == 0.0 && self.d == 0.0 {
            return Bounds {
                min: [self.c, self.f + self.e * h],
                max: [self.c + self.a * w, self.f],
            };
        }

        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for (x, y) in corners {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }
        Bounds { min, max }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Crs {
    Epsg(u16),
    UserDefined(String),
    Unknown,
}

impl Crs {
    pub fn from_directory(directory: &GeoKeyDirectory) -> Self {
        let code = |id| {
            directory
                .get(id)
                .and_then(|value| value.as_number::<u16>())
                .filter(|code| *code != 0)
        };

        let projected = code(GeoKeyId::ProjectedCSTypeGeoKey);
        let geographic = code(GeoKeyId::GeographicTypeGeoKey);
        match (projected, geographic) {
            (Some(epsg), _) if epsg != USER_DEFINED => return Crs::Epsg(epsg),
            (None, Some(epsg)) if epsg != USER_DEFINED => return Crs::Epsg(epsg),
            (None, None) => return Crs::Unknown,
            _ => {}
        }

        [
            GeoKeyId::PCSCitationGeoKey,
            GeoKeyId::GTCitationGeoKey,
            GeoKeyId::GeogCitationGeoKey,
        ]
        .into_iter()
        .find_map(|id| directory.get(id).and_then(|v| v.as_string()).cloned())
        .map(Crs::UserDefined)
        .unwrap_or(Crs::Unknown)
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{code}"),
            Crs::UserDefined(citation) => write!(f, "{citation}"),
            Crs::Unknown => Ok(()),
        }
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
