//! WOFF 1.0 and WOFF 2.0 encoding.
//!
//! - [`encode`]: zlib per table, kept only when it actually shrinks the table
//! - [`encode_woff2`]: one Brotli stream over all tables; `glyf`/`loca` use the
//!   null transform, so every table is stored exactly as in the source font

use super::FontError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

const WOFF_SIGNATURE: u32 = 0x774F_4646;
const WOFF2_SIGNATURE: u32 = 0x774F_4632;
const TTC_TAG: u32 = 0x7474_6366;
const SFNT_HEADER_LEN: usize = 12;
const SFNT_RECORD_LEN: usize = 16;
const WOFF_HEADER_LEN: usize = 44;
const WOFF_RECORD_LEN: usize = 20;
const WOFF2_HEADER_LEN: usize = 48;

const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW: u32 = 22;

/// Tags with a one-byte code in the WOFF2 table directory, in code order.
const WOFF2_KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post",
    b"cvt ", b"fpgm", b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT",
    b"EBLC", b"gasp", b"hdmx", b"kern", b"LTSH", b"PCLT", b"VDMX", b"vhea",
    b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC", b"JSTF", b"MATH",
    b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar",
    b"gvar", b"hsty", b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop",
    b"trak", b"Zapf", b"Silf", b"Glat", b"Gloc", b"Feat", b"Sill",
];

#[derive(Debug, Clone, Copy)]
struct TableRecord {
    tag: [u8; 4],
    checksum: u32,
    offset: usize,
    length: usize,
}

fn read_u16(data: &[u8], pos: usize) -> Option<u16> {
    let bytes = data.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn parse_error(message: impl Into<String>) -> FontError {
    FontError::Parse {
        path: "<memory>".into(),
        message: message.into(),
    }
}

fn compress_error(err: std::io::Error) -> FontError {
    FontError::Unsupported(format!("compression failed: {}", err))
}

/// Reads the sfnt table directory, checking every table lies inside `data`.
fn read_tables(data: &[u8]) -> Result<(u32, Vec<TableRecord>), FontError> {
    let flavor = read_u32(data, 0).ok_or_else(|| parse_error("truncated sfnt header"))?;
    if flavor == TTC_TAG {
        return Err(FontError::Unsupported(
            "font collections cannot be converted to WOFF".to_string(),
        ));
    }
    if flavor == WOFF_SIGNATURE || flavor == WOFF2_SIGNATURE {
        return Err(FontError::Unsupported("font is already a web font".to_string()));
    }

    let num_tables = read_u16(data, 4).ok_or_else(|| parse_error("truncated sfnt header"))? as usize;
    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let pos = SFNT_HEADER_LEN + i * SFNT_RECORD_LEN;
        let record = data
            .get(pos..pos + SFNT_RECORD_LEN)
            .ok_or_else(|| parse_error("truncated table directory"))?;
        let tag = [record[0], record[1], record[2], record[3]];
        let checksum = read_u32(record, 4).unwrap_or_default();
        let offset = read_u32(record, 8).unwrap_or_default() as usize;
        let length = read_u32(record, 12).unwrap_or_default() as usize;

        if offset.checked_add(length).is_none_or(|end| end > data.len()) {
            return Err(parse_error(format!(
                "table '{}' extends past the end of the font",
                String::from_utf8_lossy(&tag)
            )));
        }
        tables.push(TableRecord {
            tag,
            checksum,
            offset,
            length,
        });
    }
    tables.sort_by_key(|t| t.tag);
    Ok((flavor, tables))
}

/// Size of the font once decoded back into a plain sfnt.
fn total_sfnt_size(tables: &[TableRecord]) -> usize {
    SFNT_HEADER_LEN
        + SFNT_RECORD_LEN * tables.len()
        + tables.iter().map(|t| padded(t.length)).sum::<usize>()
}

fn zlib(data: &[u8]) -> Result<Vec<u8>, FontError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).map_err(compress_error)?;
    encoder.finish().map_err(compress_error)
}

/// Wraps a TrueType/OpenType font in a WOFF 1.0 container.
pub fn encode(sfnt: &[u8]) -> Result<Vec<u8>, FontError> {
    let (flavor, tables) = read_tables(sfnt)?;
    let num_tables = tables.len();

    let mut blobs = Vec::with_capacity(num_tables);
    for table in &tables {
        let data = &sfnt[table.offset..table.offset + table.length];
        let compressed = zlib(data)?;
        if compressed.len() < data.len() {
            blobs.push(compressed);
        } else {
            blobs.push(data.to_vec());
        }
    }

    let data_start = WOFF_HEADER_LEN + WOFF_RECORD_LEN * num_tables;
    let total_len = data_start + blobs.iter().map(|b| padded(b.len())).sum::<usize>();

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&WOFF_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(num_tables as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&(total_sfnt_size(&tables) as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&[0u8; 20]); // metadata and private blocks

    let mut offset = data_start;
    for (table, blob) in tables.iter().zip(&blobs) {
        out.extend_from_slice(&table.tag);
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(blob.len() as u32).to_be_bytes()); // compLength
        out.extend_from_slice(&(table.length as u32).to_be_bytes()); // origLength
        out.extend_from_slice(&table.checksum.to_be_bytes());
        offset += padded(blob.len());
    }

    for blob in &blobs {
        out.extend_from_slice(blob);
        out.resize(padded(out.len()), 0);
    }

    debug_assert_eq!(out.len(), total_len);
    Ok(out)
}

/// UIntBase128: big-endian groups of seven bits, high bit set on all but the last.
fn push_base128(out: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    loop {
        groups[len] = (value & 0x7F) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | continuation);
    }
}

fn push_woff2_entry(out: &mut Vec<u8>, table: &TableRecord) {
    // Transform version 3 is the null transform for glyf/loca; 0 is null for the rest.
    let version: u8 = if &table.tag == b"glyf" || &table.tag == b"loca" { 3 } else { 0 };
    match WOFF2_KNOWN_TAGS.iter().position(|known| **known == table.tag) {
        Some(index) => out.push(index as u8 | (version << 6)),
        None => {
            out.push(63 | (version << 6));
            out.extend_from_slice(&table.tag);
        }
    }
    push_base128(out, table.length as u32);
}

/// Wraps a TrueType/OpenType font in a WOFF 2.0 container.
pub fn encode_woff2(sfnt: &[u8]) -> Result<Vec<u8>, FontError> {
    let (flavor, tables) = read_tables(sfnt)?;

    let mut stream = Vec::with_capacity(tables.iter().map(|t| t.length).sum());
    for table in &tables {
        stream.extend_from_slice(&sfnt[table.offset..table.offset + table.length]);
    }
    let mut compressed = Vec::new();
    {
        let mut writer =
            brotli::CompressorWriter::new(&mut compressed, 4096, BROTLI_QUALITY, BROTLI_WINDOW);
        writer.write_all(&stream).map_err(compress_error)?;
        writer.flush().map_err(compress_error)?;
    }

    let mut directory = Vec::new();
    for table in &tables {
        push_woff2_entry(&mut directory, table);
    }

    let total_len = padded(WOFF2_HEADER_LEN + directory.len() + compressed.len());
    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&WOFF2_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&(total_sfnt_size(&tables) as u32).to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&[0u8; 20]); // metadata and private blocks
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    out.resize(total_len, 0);
    Ok(out)
}
