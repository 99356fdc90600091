// Minimal TIFF writer for building metadata-only fixtures
#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

pub const SHORT: u16 = 3;
pub const LONG: u16 = 4;
pub const DOUBLE: u16 = 12;
pub const ASCII: u16 = 2;

#[derive(Clone, Debug)]
pub enum Values {
    Short(Vec<u16>),
    Long(Vec<u32>),
    Double(Vec<f64>),
    Ascii(String),
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub code: u16,
    pub values: Values,
}

impl Entry {
    pub fn short(code: u16, values: &[u16]) -> Self {
        Self {
            code,
            values: Values::Short(values.to_vec()),
        }
    }

    pub fn long(code: u16, values: &[u32]) -> Self {
        Self {
            code,
            values: Values::Long(values.to_vec()),
        }
    }

    pub fn double(code: u16, values: &[f64]) -> Self {
        Self {
            code,
            values: Values::Double(values.to_vec()),
        }
    }

    /// NUL terminated
    pub fn ascii(code: u16, text: &str) -> Self {
        Self {
            code,
            values: Values::Ascii(format!("{text}\0")),
        }
    }

    fn datatype(&self) -> u16 {
        match self.values {
            Values::Short(_) => SHORT,
            Values::Long(_) => LONG,
            Values::Double(_) => DOUBLE,
            Values::Ascii(_) => ASCII,
        }
    }

    fn count(&self) -> u64 {
        match &self.values {
            Values::Short(v) => v.len() as u64,
            Values::Long(v) => v.len() as u64,
            Values::Double(v) => v.len() as u64,
            Values::Ascii(s) => s.len() as u64,
        }
    }

    fn encode(&self, big_endian: bool) -> Vec<u8> {
        macro_rules! bytes {
            ($values:expr) => {
                $values
                    .iter()
                    .flat_map(|v| {
                        if big_endian {
                            v.to_be_bytes().to_vec()
                        } else {
                            v.to_le_bytes().to_vec()
                        }
                    })
                    .collect()
            };
        }
        match &self.values {
            Values::Short(v) => bytes!(v),
            Values::Long(v) => bytes!(v),
            Values::Double(v) => bytes!(v),
            Values::Ascii(s) => s.as_bytes().to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Layout {
    pub big_endian: bool,
    pub bigtiff: bool,
    /// Point the last IFD back at the first one
    pub loop_back: bool,
}

struct Writer {
    buf: Vec<u8>,
    layout: Layout,
}

impl Writer {
    fn u16(&mut self, v: u16) {
        let bytes = if self.layout.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf.extend_from_slice(&bytes);
    }

    fn u32(&mut self, v: u32) {
        let bytes = if self.layout.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf.extend_from_slice(&bytes);
    }

    fn u64(&mut self, v: u64) {
        let bytes = if self.layout.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf.extend_from_slice(&bytes);
    }

    fn offset_size(&self) -> usize {
        if self.layout.bigtiff {
            8
        } else {
            4
        }
    }

    fn offset(&mut self, v: u64) {
        if self.layout.bigtiff {
            self.u64(v)
        } else {
            self.u32(v as u32)
        }
    }

    fn patch_offset(&mut self, at: usize, v: u64) {
        let bytes = match (self.layout.bigtiff, self.layout.big_endian) {
            (true, true) => v.to_be_bytes().to_vec(),
            (true, false) => v.to_le_bytes().to_vec(),
            (false, true) => (v as u32).to_be_bytes().to_vec(),
            (false, false) => (v as u32).to_le_bytes().to_vec(),
        };
        self.buf[at..at + bytes.len()].copy_from_slice(&bytes);
    }

    fn pad_even(&mut self) {
        if self.buf.len() % 2 == 1 {
            self.buf.push(0);
        }
    }
}

/// Serialize IFDs into a TIFF file, each IFD followed by its out of line values.
pub fn build_tiff(layout: Layout, ifds: &[Vec<Entry>]) -> Vec<u8> {
    let mut w = Writer { buf: vec![], layout };

    // Header
    w.buf.extend_from_slice(if layout.big_endian { b"MM" } else { b"II" });
    if layout.bigtiff {
        w.u16(43);
        w.u16(8);
        w.u16(0);
    } else {
        w.u16(42);
    }
    let mut next_slot = w.buf.len();
    w.offset(0);

    let mut first_ifd = 0;
    for (i, entries) in ifds.iter().enumerate() {
        let mut entries = entries.clone();
        entries.sort_by_key(|e| e.code);

        w.pad_even();
        let ifd_offset = w.buf.len() as u64;
        if i == 0 {
            first_ifd = ifd_offset;
        }
        w.patch_offset(next_slot, ifd_offset);

        if layout.bigtiff {
            w.u64(entries.len() as u64);
        } else {
            w.u16(entries.len() as u16);
        }

        let mut deferred = vec![];
        for entry in entries.iter() {
            w.u16(entry.code);
            w.u16(entry.datatype());
            w.offset(entry.count());
            let bytes = entry.encode(layout.big_endian);
            if bytes.len() <= w.offset_size() {
                let mut inline = bytes;
                inline.resize(w.offset_size(), 0);
                w.buf.extend_from_slice(&inline);
            } else {
                deferred.push((w.buf.len(), bytes));
                w.offset(0);
            }
        }
        next_slot = w.buf.len();
        w.offset(0);

        for (slot, bytes) in deferred {
            w.pad_even();
            let data_offset = w.buf.len() as u64;
            w.patch_offset(slot, data_offset);
            w.buf.extend_from_slice(&bytes);
        }
    }

    if layout.loop_back && !ifds.is_empty() {
        w.patch_offset(next_slot, first_ifd);
    }
    w.buf
}

/// Image tags of a tiled 16 bit single band level
pub fn level(subfile_type: u32, width: u32, height: u32) -> Vec<Entry> {
    vec![
        Entry::long(0x00FE, &[subfile_type]),
        Entry::long(0x0100, &[width]),
        Entry::long(0x0101, &[height]),
        Entry::short(0x0102, &[16]),
        Entry::short(0x0103, &[8]),
        Entry::short(0x0115, &[1]),
        Entry::short(0x0142, &[256]),
        Entry::short(0x0143, &[256]),
        Entry::short(0x0153, &[2]),
    ]
}

/// UTM 33N at 10 m, origin (500000, 4000000)
pub fn utm_geotags() -> Vec<Entry> {
    vec![
        Entry::double(0x830E, &[10.0, 10.0, 0.0]),
        Entry::double(0x8482, &[0.0, 0.0, 0.0, 500_000.0, 4_000_000.0, 0.0]),
        Entry::short(
            0x87AF,
            &[1, 1, 0, 3, 1024, 0, 1, 1, 1025, 0, 1, 1, 3072, 0, 1, 32633],
        ),
        Entry::ascii(0xA481, "-9999"),
    ]
}

/// 1024x512 int16 COG with two overviews and a mask
pub fn cog_fixture(layout: Layout) -> Vec<u8> {
    let mut full = level(0, 1024, 512);
    full.extend(utm_geotags());
    build_tiff(
        layout,
        &[
            full,
            level(1, 512, 256),
            level(1, 256, 128),
            level(4, 1024, 512),
        ],
    )
}

/// Write bytes to a file in a fresh temporary directory
pub fn write_fixture(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (dir, path)
}
