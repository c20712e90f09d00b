#![allow(dead_code)]

use fonty::FontyConfig;
use fonty::commands::Context;
use fonty::install::system_installer;
use fonty_executor::ExecutorImpl;
use fonty_traits::InMemoryFetcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a minimal but valid OpenType font: `head`, `hhea`, `maxp` and a
/// Windows Unicode `name` table.
#[derive(Debug, Clone)]
pub struct TestFont {
    names: Vec<(u16, String)>,
}

impl TestFont {
    /// A font with family (id 1), subfamily (id 2) and PostScript (id 6) names.
    pub fn new(family: &str, subfamily: &str) -> Self {
        let postscript = format!("{}-{}", family, subfamily).replace(' ', "");
        Self {
            names: vec![
                (1, family.to_string()),
                (2, subfamily.to_string()),
                (6, postscript),
            ],
        }
    }

    /// Adds typographic family and subfamily names (ids 16 and 17).
    pub fn typographic(mut self, family: &str, subfamily: &str) -> Self {
        self.names.push((16, family.to_string()));
        self.names.push((17, subfamily.to_string()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
            (b"head", head_table()),
            (b"hhea", hhea_table()),
            (b"maxp", maxp_table()),
            (b"name", name_table(&self.names)),
        ];
        sfnt(&tables)
    }

    pub fn write(&self, dir: &Path, filename: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(filename);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

fn head_table() -> Vec<u8> {
    let mut t = vec![0u8; 54];
    t[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t[4..8].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // fontRevision
    t[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    t[18..20].copy_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    t[40..42].copy_from_slice(&1000i16.to_be_bytes()); // xMax
    t[42..44].copy_from_slice(&1000i16.to_be_bytes()); // yMax
    // indexToLocFormat (50..52) and glyphDataFormat stay 0
    t
}

fn hhea_table() -> Vec<u8> {
    let mut t = vec![0u8; 36];
    t[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    t[4..6].copy_from_slice(&800i16.to_be_bytes()); // ascender
    t[6..8].copy_from_slice(&(-200i16).to_be_bytes()); // descender
    t[34..36].copy_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    t
}

fn maxp_table() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    t.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    t
}

fn name_table(names: &[(u16, String)]) -> Vec<u8> {
    let encoded: Vec<(u16, Vec<u8>)> = names
        .iter()
        .map(|(id, text)| (*id, text.encode_utf16().flat_map(u16::to_be_bytes).collect()))
        .collect();

    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes()); // format
    t.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
    t.extend_from_slice(&((6 + 12 * encoded.len()) as u16).to_be_bytes());

    let mut offset = 0u16;
    for (id, bytes) in &encoded {
        t.extend_from_slice(&3u16.to_be_bytes()); // Windows
        t.extend_from_slice(&1u16.to_be_bytes()); // Unicode BMP
        t.extend_from_slice(&0x0409u16.to_be_bytes()); // en-US
        t.extend_from_slice(&id.to_be_bytes());
        t.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        t.extend_from_slice(&offset.to_be_bytes());
        offset += bytes.len() as u16;
    }
    for (_, bytes) in &encoded {
        t.extend_from_slice(bytes);
    }
    t
}

/// Assembles an sfnt; `tables` must already be sorted by tag.
fn sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let pad = |n: usize| (n + 3) & !3;
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&[0u8; 6]); // searchRange, entrySelector, rangeShift

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in tables {
        out.extend_from_slice(&tag[..]);
        out.extend_from_slice(&0u32.to_be_bytes()); // checksum
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += pad(data.len());
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(pad(out.len()), 0);
    }
    out
}

/// Reads `(tag, data)` pairs back out of an sfnt.
pub fn sfnt_tables(font: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    let read_u32 = |pos: usize| u32::from_be_bytes(font[pos..pos + 4].try_into().unwrap()) as usize;
    let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
    (0..num_tables)
        .map(|i| {
            let record = 12 + 16 * i;
            let tag: [u8; 4] = font[record..record + 4].try_into().unwrap();
            let offset = read_u32(record + 8);
            let length = read_u32(record + 12);
            (tag, font[offset..offset + length].to_vec())
        })
        .collect()
}

/// A context rooted in `dir`, installing into `dir/fonts`, fetching from memory.
pub fn test_context(dir: &Path, fetcher: Arc<InMemoryFetcher>) -> Context {
    let config = FontyConfig::with_app_dir(dir);
    let installer = system_installer(&config);
    Context::with_parts(config, fetcher, ExecutorImpl::default(), Box::new(installer))
}
