//! Minimal PNG writer for solid-color RGBA images
//!
//! Files are laid out as the signature followed by `IHDR`, a single `IDAT`
//! holding the zlib-compressed scanlines, and `IEND`. Every chunk is framed
//! as big-endian payload length, 4-byte tag, payload, then the CRC-32 of tag
//! and payload.

use anyhow::{Context, Result};
use flate2::{write::ZlibEncoder, Compression, Crc};
use image::Rgba;
use std::{error::Error, fmt, io::Write};

/// An 8-bit RGBA color.
pub type Color = Rgba<u8>;

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: &[u8; 4] = b"IHDR";
pub const IDAT: &[u8; 4] = b"IDAT";
pub const IEND: &[u8; 4] = b"IEND";

/// Largest width or height a PNG header may carry.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// Encodes a `width` x `height` image filled with `color` as PNG bytes.
///
/// Both dimensions must be between 1 and [`MAX_DIMENSION`]. The scanlines
/// are deflated at the best compression level; compressing into memory does
/// not fail in practice, so the error path only surfaces compressor faults.
pub fn encode(width: u32, height: u32, color: Color) -> Result<Vec<u8>> {
    debug_assert!(
        (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height),
        "PNG dimensions must be between 1 and 2^31-1"
    );

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGBA, 0, 0, 0]);

    let idat = compress(&raw_scanlines(width, height, color))?;

    let mut png = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + ihdr.len() + idat.len());
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, IHDR, &ihdr);
    write_chunk(&mut png, IDAT, &idat);
    write_chunk(&mut png, IEND, &[]);
    Ok(png)
}

/// Appends one length-prefixed, checksummed chunk to `out`.
pub fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(tag, payload).to_be_bytes());
}

/// CRC-32 over a chunk's tag followed by its payload.
pub fn chunk_crc(tag: &[u8; 4], payload: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(tag);
    crc.update(payload);
    crc.sum()
}

// One filter byte (no filtering) per row, then the pixel repeated across it.
fn raw_scanlines(width: u32, height: u32, color: Color) -> Vec<u8> {
    let row: Vec<u8> = std::iter::once(FILTER_NONE)
        .chain(color.0.iter().copied().cycle().take(width as usize * 4))
        .collect();

    let mut raw = Vec::with_capacity(row.len() * height as usize);
    for _ in 0..height {
        raw.extend_from_slice(&row);
    }
    raw
}

fn compress(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(raw)
        .context("Failed to compress image data")?;
    encoder.finish().context("Failed to finish image data stream")
}

/// A chunk as stored in a PNG file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: [u8; 4],
    pub payload: Vec<u8>,
    /// The checksum stored after the payload.
    pub crc: u32,
}

impl Chunk {
    /// Whether the stored checksum matches the tag and payload.
    pub fn crc_matches(&self) -> bool {
        chunk_crc(&self.tag, &self.payload) == self.crc
    }

    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Why a byte stream could not be split into chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    BadSignature,
    /// A chunk starting at this offset runs past the end of the data.
    Truncated { offset: usize },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSignature => write!(f, "Missing PNG signature"),
            Self::Truncated { offset } => write!(f, "Truncated chunk at byte {offset}"),
        }
    }
}

impl Error for ChunkError {}

/// Splits PNG bytes into their chunks without interpreting them.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, ChunkError> {
    let mut rest = bytes
        .strip_prefix(&PNG_SIGNATURE[..])
        .ok_or(ChunkError::BadSignature)?;
    let mut offset = PNG_SIGNATURE.len();
    let mut chunks = Vec::new();

    while !rest.is_empty() {
        let truncated = ChunkError::Truncated { offset };
        if rest.len() < 12 {
            return Err(truncated);
        }
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let total = len.checked_add(12).ok_or_else(|| truncated.clone())?;
        if rest.len() < total {
            return Err(truncated);
        }

        let tag = [rest[4], rest[5], rest[6], rest[7]];
        let payload = rest[8..8 + len].to_vec();
        let crc_bytes = &rest[8 + len..total];
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        chunks.push(Chunk { tag, payload, crc });
        rest = &rest[total..];
        offset += total;
    }

    Ok(chunks)
}
