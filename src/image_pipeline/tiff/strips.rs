//! Direct strip access for layouts the `tiff` decoder will not hand back:
//! palette images at any depth and 1-bit images.
//!
//! Strips are sliced out of the in-memory file using the decoder's tag values,
//! then decompressed here. Uncompressed and PackBits strips are supported.

use std::io::{Read, Seek};

use ::tiff::decoder::Decoder;
use ::tiff::tags::Tag;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

const COMPRESSION_NONE: u32 = 1;
const COMPRESSION_PACKBITS: u32 = 32773;

/// Returns `height` rows of `width * bits` bits each, every row padded to a
/// whole byte, exactly as stored in the file.
pub fn read_packed_rows<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    data: &[u8],
    width: usize,
    height: usize,
    bits: usize,
) -> Result<Vec<u8>> {
    if decoder.get_tag_u32_vec(Tag::TileOffsets).is_ok() {
        return Err(ConversionError::UnsupportedFormat(
            "tiled layout for palette or 1-bit image".to_string(),
        ));
    }

    let samples = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1);
    if samples != 1 {
        return Err(ConversionError::UnsupportedFormat(format!(
            "{} samples per pixel at {} bits",
            samples, bits
        )));
    }

    let compression = decoder.get_tag_u32(Tag::Compression).unwrap_or(COMPRESSION_NONE);
    if compression != COMPRESSION_NONE && compression != COMPRESSION_PACKBITS {
        return Err(ConversionError::UnsupportedFormat(format!(
            "compression {} for palette or 1-bit image",
            compression
        )));
    }

    let offsets = decoder
        .get_tag_u32_vec(Tag::StripOffsets)
        .map_err(|e| ConversionError::DecodeError(format!("strip offsets: {}", e)))?;
    let counts = decoder
        .get_tag_u32_vec(Tag::StripByteCounts)
        .map_err(|e| ConversionError::DecodeError(format!("strip byte counts: {}", e)))?;
    if offsets.len() != counts.len() {
        return Err(ConversionError::DecodeError(format!(
            "{} strip offsets but {} byte counts",
            offsets.len(),
            counts.len()
        )));
    }

    let row_bytes = (width * bits).div_ceil(8);
    let needed = row_bytes * height;
    let mut rows = Vec::with_capacity(needed);

    for (&offset, &count) in offsets.iter().zip(&counts) {
        let start = offset as usize;
        let end = start + count as usize;
        let strip = data.get(start..end).ok_or_else(|| {
            ConversionError::DecodeError(format!(
                "strip {}..{} outside file of {} bytes",
                start,
                end,
                data.len()
            ))
        })?;

        if compression == COMPRESSION_PACKBITS {
            rows.extend(unpack_packbits(strip)?);
        } else {
            rows.extend_from_slice(strip);
        }

        if rows.len() >= needed {
            break;
        }
    }

    if rows.len() < needed {
        return Err(ConversionError::DecodeError(format!(
            "strips hold {} bytes, image needs {}",
            rows.len(),
            needed
        )));
    }
    rows.truncate(needed);

    debug!("Read {} packed bytes ({} per row)", rows.len(), row_bytes);
    Ok(rows)
}

/// Decodes Apple PackBits run-length data.
pub fn unpack_packbits(input: &[u8]) -> Result<Vec<u8>> {
    let truncated = || ConversionError::DecodeError("truncated PackBits run".to_string());
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut i = 0;

    while i < input.len() {
        let header = input[i] as i8;
        i += 1;

        if header >= 0 {
            let end = i + header as usize + 1;
            out.extend_from_slice(input.get(i..end).ok_or_else(truncated)?);
            i = end;
        } else if header != -128 {
            let repeat = 1 + (-(header as isize)) as usize;
            let value = *input.get(i).ok_or_else(truncated)?;
            out.extend(std::iter::repeat_n(value, repeat));
            i += 1;
        }
    }

    Ok(out)
}

/// Expands rows of packed `bits`-wide indices (MSB first, byte-padded rows)
/// into one index per byte.
pub fn unpack_indices(packed: &[u8], width: usize, height: usize, bits: u8) -> Vec<u8> {
    let bits = bits as usize;
    let row_bytes = (width * bits).div_ceil(8);
    let mask = (1u16 << bits) - 1;
    let mut out = Vec::with_capacity(width * height);

    for row in packed.chunks(row_bytes).take(height) {
        for x in 0..width {
            let bit_offset = x * bits;
            let byte = row.get(bit_offset / 8).copied().unwrap_or(0) as u16;
            let shift = 8 - bits - (bit_offset % 8);
            out.push(((byte >> shift) & mask) as u8);
        }
    }

    out
}
