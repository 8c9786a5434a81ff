//! Shared fixtures: small TIFF files written with the tiff encoder.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tiff::encoder::{TiffEncoder, colortype};

pub fn write_rgb8(path: &Path, width: u32, height: u32) -> PathBuf {
    let data: Vec<u8> = (0..width * height * 3).map(|v| (v % 251) as u8).collect();
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder.write_image::<colortype::RGB8>(width, height, &data).unwrap();
    path.to_path_buf()
}

pub fn write_rgba8(path: &Path, width: u32, height: u32) -> PathBuf {
    let data: Vec<u8> = (0..width * height * 4).map(|v| (v % 256) as u8).collect();
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder.write_image::<colortype::RGBA8>(width, height, &data).unwrap();
    path.to_path_buf()
}

pub fn write_gray8(path: &Path, width: u32, height: u32) -> PathBuf {
    let data: Vec<u8> = (0..width * height).map(|v| (v * 7 % 256) as u8).collect();
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder.write_image::<colortype::Gray8>(width, height, &data).unwrap();
    path.to_path_buf()
}

pub fn write_gray16(path: &Path, width: u32, height: u32) -> PathBuf {
    let data: Vec<u16> = (0..width * height).map(|v| (v * 1000 % 65536) as u16).collect();
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder.write_image::<colortype::Gray16>(width, height, &data).unwrap();
    path.to_path_buf()
}

pub fn write_corrupt(path: &Path) -> PathBuf {
    std::fs::write(path, b"II*\0this is not really a tiff").unwrap();
    path.to_path_buf()
}

/// Decodes a written PNG, checking the signature first.
pub fn read_png(path: &Path) -> image::DynamicImage {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{} is not a PNG", path.display());
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
}

pub fn write_cmyk8(path: &Path, pixels: &[[u8; 4]]) -> PathBuf {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder
        .write_image::<colortype::CMYK8>(pixels.len() as u32, 1, &data)
        .unwrap();
    path.to_path_buf()
}

/// One IFD entry: tag, field type (3 = SHORT, 4 = LONG) and values.
pub type Entry = (u16, u16, Vec<u32>);

/// Writes a little-endian single-strip TIFF by hand, for layouts the encoder
/// does not produce. `strip` is stored verbatim at offset 8; strip offset and
/// byte count entries are added here.
pub fn write_raw_tiff(path: &Path, strip: &[u8], mut entries: Vec<Entry>) -> PathBuf {
    let strip_end = 8 + strip.len() as u32;
    entries.push((273, 4, vec![8]));
    entries.push((279, 4, vec![strip.len() as u32]));
    entries.sort_by_key(|(tag, _, _)| *tag);

    let encoded: Vec<Vec<u8>> = entries
        .iter()
        .map(|(_, ty, values)| {
            values
                .iter()
                .flat_map(|v| {
                    if *ty == 3 {
                        (*v as u16).to_le_bytes().to_vec()
                    } else {
                        v.to_le_bytes().to_vec()
                    }
                })
                .collect()
        })
        .collect();
    let out_of_line: u32 = encoded
        .iter()
        .filter(|bytes| bytes.len() > 4)
        .map(|bytes| bytes.len() as u32)
        .sum();

    let mut out = b"II*\0".to_vec();
    out.extend_from_slice(&(strip_end + out_of_line).to_le_bytes());
    out.extend_from_slice(strip);

    let mut ifd = (entries.len() as u16).to_le_bytes().to_vec();
    let mut next_value = strip_end;
    for ((tag, ty, values), bytes) in entries.iter().zip(&encoded) {
        ifd.extend_from_slice(&tag.to_le_bytes());
        ifd.extend_from_slice(&ty.to_le_bytes());
        ifd.extend_from_slice(&(values.len() as u32).to_le_bytes());
        if bytes.len() <= 4 {
            let mut inline = bytes.clone();
            inline.resize(4, 0);
            ifd.extend_from_slice(&inline);
        } else {
            ifd.extend_from_slice(&next_value.to_le_bytes());
            out.extend_from_slice(bytes);
            next_value += bytes.len() as u32;
        }
    }
    ifd.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&ifd);

    std::fs::write(path, out).unwrap();
    path.to_path_buf()
}

/// Baseline tags for an uncompressed, chunky, single-strip image.
pub fn raw_entries(width: u32, height: u32, bits: Vec<u32>, photometric: u32) -> Vec<Entry> {
    let samples = bits.len() as u32;
    vec![
        (256, 4, vec![width]),
        (257, 4, vec![height]),
        (258, 3, bits),
        (259, 3, vec![1]),
        (262, 3, vec![photometric]),
        (277, 3, vec![samples]),
        (278, 4, vec![height]),
        (284, 3, vec![1]),
    ]
}

/// 8-bit gray with an associated-alpha extra sample; `pixels` are (gray, alpha).
pub fn write_gray_alpha8(path: &Path, width: u32, pixels: &[(u8, u8)]) -> PathBuf {
    let height = pixels.len() as u32 / width;
    let strip: Vec<u8> = pixels.iter().flat_map(|&(g, a)| [g, a]).collect();
    let mut entries = raw_entries(width, height, vec![8, 8], 1);
    entries.push((338, 3, vec![2]));
    write_raw_tiff(path, &strip, entries)
}

/// Palette image with `bits` per index. `colors` fill the first entries of the
/// map as 8-bit RGB (scaled to 16 bits); `packed_rows` holds the index rows.
pub fn write_palette(
    path: &Path,
    width: u32,
    height: u32,
    bits: u32,
    colors: &[[u8; 3]],
    packed_rows: &[u8],
    compression: u32,
) -> PathBuf {
    let entries_count = 1usize << bits;
    let mut color_map = vec![0u32; entries_count * 3];
    for (i, rgb) in colors.iter().enumerate() {
        for (channel, &value) in rgb.iter().enumerate() {
            color_map[channel * entries_count + i] = value as u32 * 257;
        }
    }
    let mut entries = raw_entries(width, height, vec![bits], 3);
    entries.retain(|(tag, _, _)| *tag != 259);
    entries.push((259, 3, vec![compression]));
    entries.push((320, 3, color_map));
    write_raw_tiff(path, packed_rows, entries)
}

/// 1-bit image; `photometric` 0 is WhiteIsZero, 1 is BlackIsZero.
pub fn write_bilevel(path: &Path, width: u32, height: u32, packed_rows: &[u8], photometric: u32) -> PathBuf {
    write_raw_tiff(path, packed_rows, raw_entries(width, height, vec![1], photometric))
}
