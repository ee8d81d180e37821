//! PNG image format support
//!
//! Every PNG color type is read into one of the three `Pix` depths:
//!
//! | PNG                        | Pix    |
//! |----------------------------|--------|
//! | gray, 1 bit                | 1 bpp  |
//! | gray, 2/4/8/16 bit         | 8 bpp  |
//! | gray+alpha, RGB, RGBA      | 32 bpp |
//! | palette                    | 32 bpp |
//!
//! Low gray depths are scaled up to 0..=255 and 16 bit samples keep
//! their high byte. The `Pix` text travels in a `tEXt` chunk.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use seedgrow_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Keyword of the `tEXt` chunk holding the image text
const TEXT_KEYWORD: &str = "Comment";

/// Extract sample `x` from a row packed with `bits` bits per sample
/// (1, 2, 4 or 8).
fn packed_sample(row: &[u8], bits: usize, x: usize) -> u8 {
    if bits == 8 {
        return row[x];
    }
    let per_byte = 8 / bits;
    let shift = 8 - bits * (x % per_byte + 1);
    (row[x / per_byte] >> shift) & ((1u8 << bits) - 1)
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::IDENTITY);
    decoder.set_ignore_text_chunk(false);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette = info.palette.as_deref().map(<[u8]>::to_vec);
    let text = info
        .uncompressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == TEXT_KEYWORD)
        .map(|chunk| chunk.text.clone());

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, _) => (PixelDepth::Bit8, 1),
        (ColorType::GrayscaleAlpha, _) | (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) | (ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
    };

    let palette = match (color_type, palette) {
        (ColorType::Indexed, None) => {
            return Err(IoError::InvalidData(
                "indexed PNG without a palette".to_string(),
            ));
        }
        (_, palette) => palette.unwrap_or_default(),
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let bits = bit_depth as usize;
    let sixteen = bit_depth == BitDepth::Sixteen;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    pix_mut.set_spp(spp);

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let val = match color_type {
                ColorType::Grayscale => match bit_depth {
                    BitDepth::One => packed_sample(row, 1, xi) as u32,
                    BitDepth::Sixteen => row[2 * xi] as u32,
                    _ => {
                        let max = (1u32 << bits) - 1;
                        packed_sample(row, bits, xi) as u32 * 255 / max
                    }
                },
                ColorType::GrayscaleAlpha => {
                    let step = if sixteen { 2 } else { 1 };
                    let idx = xi * 2 * step;
                    let (g, a) = (row[idx], row[idx + step]);
                    color::compose_rgba(g, g, g, a)
                }
                ColorType::Rgb => {
                    let step = if sixteen { 2 } else { 1 };
                    let idx = xi * 3 * step;
                    color::compose_rgb(row[idx], row[idx + step], row[idx + 2 * step])
                }
                ColorType::Rgba => {
                    let step = if sixteen { 2 } else { 1 };
                    let idx = xi * 4 * step;
                    color::compose_rgba(
                        row[idx],
                        row[idx + step],
                        row[idx + 2 * step],
                        row[idx + 3 * step],
                    )
                }
                ColorType::Indexed => {
                    let index = packed_sample(row, bits, xi) as usize;
                    match palette.get(3 * index..3 * index + 3) {
                        Some(rgb) => color::compose_rgb(rgb[0], rgb[1], rgb[2]),
                        None => color::compose_rgb(0, 0, 0),
                    }
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    pix_mut.set_text(text);
    pix_mut.set_informat(ImageFormat::Png);
    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 1 bpp images are written as 1 bit grayscale (1 is white), 8 bpp as
/// 8 bit grayscale and 32 bpp as RGB, or RGBA when `spp == 4`.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight, width * 4),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    if let Some(text) = pix.text().filter(|t| !t.is_empty()) {
        if text.chars().all(|c| (c as u32) <= 0xff) {
            encoder
                .add_text_chunk(TEXT_KEYWORD.to_string(), text.to_string())
                .map_err(|e| IoError::EncodeError(format!("PNG text error: {}", e)))?;
        } else {
            log::warn!("image text is not Latin-1, not stored in PNG");
        }
    }

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..][..bytes_per_row];

        match (color_type, pix.depth()) {
            (_, PixelDepth::Bit1) => {
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) != 0 {
                        row[(x / 8) as usize] |= 0x80 >> (x % 8);
                    }
                }
            }
            (_, PixelDepth::Bit8) => {
                for x in 0..width {
                    row[x as usize] = pix.get_pixel_unchecked(x, y) as u8;
                }
            }
            (ColorType::Rgba, _) => {
                for x in 0..width {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    row[x as usize * 4..][..4].copy_from_slice(&[r, g, b, a]);
                }
            }
            _ => {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row[x as usize * 3..][..3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut buffer = Vec::new();
        write_png(pix, &mut buffer).unwrap();
        read_png(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.informat(), ImageFormat::Png);
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.spp(), 3);
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_roundtrip_mask_odd_width() {
        let mut pix_mut = Pix::new(13, 3, PixelDepth::Bit1).unwrap().to_mut();
        for &(x, y) in &[(0, 0), (7, 1), (8, 1), (12, 2)] {
            pix_mut.set_pixel(x, y, 1).unwrap();
        }
        let pix: Pix = pix_mut.into();

        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert!(pix2.equals(&pix));
        assert_eq!(pix2.count_pixels().unwrap(), 4);
    }

    #[test]
    fn test_png_rgba_keeps_alpha() {
        let mut pix_mut = Pix::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_spp(4);
        pix_mut.set_pixel(0, 0, color::compose_rgba(1, 2, 3, 4)).unwrap();
        let pix: Pix = pix_mut.into();

        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.spp(), 4);
        assert_eq!(
            color::extract_rgba(pix2.get_pixel(0, 0).unwrap()),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn test_png_text_chunk() {
        let mut pix_mut = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
        pix_mut.set_text(Some("Região Crescida (Limiar: 20)".to_string()));
        let pix: Pix = pix_mut.into();

        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.text(), Some("Região Crescida (Limiar: 20)"));
    }

    #[test]
    fn test_png_read_palette() {
        // 4x1 image, 2 bit indices into a 3 color palette
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 4, 1);
            encoder.set_color(ColorType::Indexed);
            encoder.set_depth(BitDepth::Two);
            encoder.set_palette(vec![255, 0, 0, 0, 255, 0, 0, 0, 255]);
            let mut writer = encoder.write_header().unwrap();
            // indices 0, 1, 2, 1
            writer.write_image_data(&[0b00_01_10_01]).unwrap();
        }

        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some((0, 255, 0)));
        assert_eq!(pix.get_rgb(2, 0), Some((0, 0, 255)));
        assert_eq!(pix.get_rgb(3, 0), Some((0, 255, 0)));
    }

    #[test]
    fn test_png_read_gray16_and_gray4() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0x12, 0x34, 0xff, 0x00]).unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.get_pixel(0, 0), Some(0x12));
        assert_eq!(pix.get_pixel(1, 0), Some(0xff));

        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Four);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xf5]).unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(pix.get_pixel(1, 0), Some(85));
    }

    #[test]
    fn test_packed_sample() {
        let row = [0b1010_0000u8, 0b0001_1011];
        assert_eq!(packed_sample(&row, 1, 0), 1);
        assert_eq!(packed_sample(&row, 1, 1), 0);
        assert_eq!(packed_sample(&row, 1, 2), 1);
        assert_eq!(packed_sample(&row, 2, 4), 0);
        assert_eq!(packed_sample(&row, 2, 7), 3);
        assert_eq!(packed_sample(&row, 4, 3), 0b1011);
        assert_eq!(packed_sample(&row, 8, 1), 0b0001_1011);
    }
}
