// https://docs.ogc.org/is/19-008r4/19-008r4.html#_requirements_class_geokeydirectorytag

use std::fmt::Display;

use super::{GeoKeyId, GeoKeyValue, GeoTiffError};
use crate::tiff::{Ifd, TagId, TagType};

#[derive(Clone, Debug)]
pub struct GeoKeyDirectory {
    pub version: u16,
    pub revision: (u16, u16),
    pub keys: Vec<GeoKey>,
}

#[derive(Clone, Debug)]
pub struct GeoKey {
    pub code: u16,
    pub value: GeoKeyValue,
}

impl GeoKey {
    pub fn id(&self) -> Option<GeoKeyId> {
        GeoKeyId::try_from(self.code).ok()
    }
}

impl GeoKeyDirectory {
    pub fn parse(ifd: &Ifd) -> Result<Self, GeoTiffError> {
        // Directory is a tiff tag of shorts
        let directory_values: Vec<u16> = ifd
            .get_tag(TagId::GeoKeyDirectory)
            .map_err(|_| GeoTiffError::MissingTag(TagId::GeoKeyDirectory))?
            .values()
            .ok_or(GeoTiffError::BadTag(TagId::GeoKeyDirectory))?;

        // Directory size validation
        if directory_values.len() < 4 {
            return Err(GeoTiffError::BadTag(TagId::GeoKeyDirectory));
        }

        // Directory header
        let version = directory_values[0];
        let revision = directory_values[1];
        let minor_revision = directory_values[2];
        let key_count = directory_values[3] as usize;

        if directory_values.len() < 4 + key_count * 4 {
            return Err(GeoTiffError::BadTag(TagId::GeoKeyDirectory));
        }

        let keys = directory_values[4..4 + key_count * 4]
            .chunks_exact(4)
            .map(|entry| {
                let (code, location, count, offset) = (entry[0], entry[1], entry[2], entry[3]);
                let value = if location == 0 {
                    GeoKeyValue::Short(vec![offset])
                } else {
                    Self::lookup(ifd, &directory_values, location, count, offset)
                        .unwrap_or(GeoKeyValue::Undefined)
                };
                GeoKey { code, value }
            })
            .collect();

        Ok(Self {
            version,
            revision: (revision, minor_revision),
            keys,
        })
    }

    pub fn get(&self, id: GeoKeyId) -> Option<&GeoKeyValue> {
        let code: u16 = id.into();
        self.keys
            .iter()
            .find(|key| key.code == code)
            .map(|key| &key.value)
    }

    // Values stored out of line live in another tag (or the directory itself)
    fn lookup(
        ifd: &Ifd,
        directory_values: &[u16],
        location: u16,
        count: u16,
        offset: u16,
    ) -> Option<GeoKeyValue> {
        let start = offset as usize;
        let end = start + count as usize;
        if location == u16::from(TagId::GeoKeyDirectory) {
            return directory_values
                .get(start..end)
                .map(|v| GeoKeyValue::Short(v.to_vec()));
        }
        let tag = ifd.get_tag_by_code(location)?;
        match tag.datatype {
            TagType::Ascii => tag.data.get(start..end).map(|bytes| {
                GeoKeyValue::Ascii(
                    String::from_utf8_lossy(bytes)
                        .trim_end_matches(|c| c == '|' || c == '\0')
                        .to_string(),
                )
            }),
            TagType::Short => tag
                .values::<u16>()?
                .get(start..end)
                .map(|v| GeoKeyValue::Short(v.to_vec())),
            TagType::Double => tag
                .values::<f64>()?
                .get(start..end)
                .map(|v| GeoKeyValue::Double(v.to_vec())),
            _ => None,
        }
    }
}

impl Display for GeoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id_string = match self.id() {
            Some(id) => format!("{id:?}"),
            None => format!("0x{:04X}", self.code),
        };
        write!(f, "{}: {}", id_string, self.value)
    }
}
