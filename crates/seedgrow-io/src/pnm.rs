//! PNM (Portable Any Map) format support
//!
//! Reads PBM, PGM and PPM in both ASCII (P1/P2/P3) and binary
//! (P4/P5/P6) form. Writing always produces the binary variants:
//! P4 for 1 bpp, P5 for 8 bpp and P6 for 32 bpp (alpha is dropped).
//!
//! PBM stores 1 as black while a 1 bpp `Pix` mask stores 1 as
//! foreground (white), so bits are inverted in both directions.
//! Samples with a maxval other than 255 are rescaled to 0..=255.
//!
//! Header comments are collected into the `Pix` text, and the text is
//! written back as comment lines.

use crate::{IoError, IoResult};
use seedgrow_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// PNM variant, from the magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PnmKind {
    Bitmap,
    Graymap,
    Pixmap,
}

impl PnmKind {
    fn depth(self) -> PixelDepth {
        match self {
            PnmKind::Bitmap => PixelDepth::Bit1,
            PnmKind::Graymap => PixelDepth::Bit8,
            PnmKind::Pixmap => PixelDepth::Bit32,
        }
    }

    fn channels(self) -> usize {
        match self {
            PnmKind::Pixmap => 3,
            _ => 1,
        }
    }
}

/// Byte cursor over a PNM stream.
struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
    comments: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            comments: Vec::new(),
        }
    }

    /// Skip whitespace and `#` comments, keeping the comment text.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                let start = self.pos + 1;
                let end = self.data[start..]
                    .iter()
                    .position(|&c| c == b'\n' || c == b'\r')
                    .map_or(self.data.len(), |n| start + n);
                let line = String::from_utf8_lossy(&self.data[start..end]);
                self.comments.push(line.trim().to_string());
                self.pos = end;
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Read an unsigned decimal header field.
    fn read_uint(&mut self, what: &str) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData(format!("PNM: missing {}", what)));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM: {} out of range", what)))
    }

    /// Read a single ASCII bit for P1, where digits need no separator.
    fn read_ascii_bit(&mut self) -> IoResult<u32> {
        self.skip_separators();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData(
                "PNM: truncated or invalid bitmap data".to_string(),
            )),
        }
    }

    /// Consume the single whitespace byte that ends a binary header.
    fn end_binary_header(&mut self) -> IoResult<()> {
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(IoError::InvalidData(
                "PNM: header not terminated by whitespace".to_string(),
            )),
        }
    }

    fn take(&mut self, n: usize) -> IoResult<&'a [u8]> {
        let bytes = self
            .data
            .get(self.pos..self.pos + n)
            .ok_or_else(|| IoError::InvalidData("PNM: truncated raster".to_string()))?;
        self.pos += n;
        Ok(bytes)
    }
}

/// Rescale a sample from 0..=maxval to 0..=255.
fn scale_sample(val: u32, maxval: u32) -> u32 {
    if maxval == 255 {
        val.min(255)
    } else {
        (val.min(maxval) * 255 + maxval / 2) / maxval
    }
}

/// Read a PNM image (P1 to P6) from a reader.
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 bpp (PGM), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let mut parser = Parser::new(&data);

    let magic = parser.take(2)?;
    let (kind, ascii) = match magic {
        b"P1" => (PnmKind::Bitmap, true),
        b"P2" => (PnmKind::Graymap, true),
        b"P3" => (PnmKind::Pixmap, true),
        b"P4" => (PnmKind::Bitmap, false),
        b"P5" => (PnmKind::Graymap, false),
        b"P6" => (PnmKind::Pixmap, false),
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "not a PNM magic number: {:?}",
                String::from_utf8_lossy(magic)
            )));
        }
    };

    let width = parser.read_uint("width")?;
    let height = parser.read_uint("height")?;
    let maxval = match kind {
        PnmKind::Bitmap => 1,
        _ => parser.read_uint("maxval")?,
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "PNM: invalid maxval {}",
            maxval
        )));
    }
    if !ascii {
        parser.end_binary_header()?;
    }

    let mut pix_mut = Pix::new(width, height, kind.depth())?.to_mut();
    let channels = kind.channels();
    let sample_bytes = if maxval > 255 { 2 } else { 1 };

    for y in 0..height {
        if kind == PnmKind::Bitmap && !ascii {
            let row = parser.take(width.div_ceil(8) as usize)?;
            for x in 0..width {
                let bit = (row[(x / 8) as usize] >> (7 - x % 8)) & 1;
                pix_mut.set_pixel_unchecked(x, y, (bit ^ 1) as u32);
            }
            continue;
        }

        for x in 0..width {
            let mut samples = [0u32; 3];
            for sample in samples.iter_mut().take(channels) {
                *sample = if kind == PnmKind::Bitmap {
                    parser.read_ascii_bit()?
                } else if ascii {
                    parser.read_uint("sample")?
                } else {
                    let bytes = parser.take(sample_bytes)?;
                    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32)
                };
            }
            let val = match kind {
                PnmKind::Bitmap => samples[0] ^ 1,
                PnmKind::Graymap => scale_sample(samples[0], maxval),
                PnmKind::Pixmap => color::compose_rgb(
                    scale_sample(samples[0], maxval) as u8,
                    scale_sample(samples[1], maxval) as u8,
                    scale_sample(samples[2], maxval) as u8,
                ),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    if !parser.comments.is_empty() {
        pix_mut.set_text(Some(parser.comments.join("\n")));
    }
    pix_mut.set_informat(ImageFormat::Pnm);
    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let magic = match pix.depth() {
        PixelDepth::Bit1 => "P4",
        PixelDepth::Bit8 => "P5",
        PixelDepth::Bit32 => "P6",
    };
    writeln!(writer, "{}", magic)?;
    if let Some(text) = pix.text() {
        for line in text.lines() {
            writeln!(writer, "# {}", line)?;
        }
    }
    writeln!(writer, "{} {}", width, height)?;
    if pix.depth() != PixelDepth::Bit1 {
        writeln!(writer, "255")?;
    }

    let mut row = Vec::with_capacity(width as usize * 3);
    for y in 0..height {
        row.clear();
        match pix.depth() {
            PixelDepth::Bit1 => {
                row.resize(width.div_ceil(8) as usize, 0);
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) == 0 {
                        row[(x / 8) as usize] |= 0x80 >> (x % 8);
                    }
                }
            }
            PixelDepth::Bit8 => {
                row.extend((0..width).map(|x| pix.get_pixel_unchecked(x, y) as u8));
            }
            PixelDepth::Bit32 => {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row.extend_from_slice(&[r, g, b]);
                }
            }
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut buffer = Vec::new();
        write_pnm(pix, &mut buffer).unwrap();
        read_pnm(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn test_pgm_roundtrip() {
        let pix = Pix::from_gray_samples(3, 2, &[0, 10, 20, 200, 254, 255]).unwrap();
        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.informat(), ImageFormat::Pnm);
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_pbm_roundtrip_and_polarity() {
        let mut pm = Pix::new(10, 2, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(9, 1, 1).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_pnm(&pix, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P4\n10 2\n"));
        // Foreground pixel (0, 0) is written as a white (0) PBM bit
        assert_eq!(buffer[8] & 0x80, 0);
        assert_eq!(buffer[8] & 0x40, 0x40);

        let pix2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_ppm_roundtrip() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(0, 0, 255, 0, 0).unwrap();
        pm.set_rgb(1, 1, 9, 8, 7).unwrap();
        let pix: Pix = pm.into();
        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((9, 8, 7)));
        assert_eq!(pix2.get_rgb(1, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_ascii_formats() {
        let pbm = read_pnm(Cursor::new(b"P1\n# tiny\n3 2\n010\n1 0 0\n".to_vec())).unwrap();
        assert_eq!(pbm.depth(), PixelDepth::Bit1);
        assert_eq!(pbm.get_pixel(0, 0), Some(1));
        assert_eq!(pbm.get_pixel(1, 0), Some(0));
        assert_eq!(pbm.get_pixel(0, 1), Some(0));
        assert_eq!(pbm.text(), Some("tiny"));

        let pgm = read_pnm(Cursor::new(b"P2 2 1 15 0 15".to_vec())).unwrap();
        assert_eq!(pgm.get_pixel(0, 0), Some(0));
        assert_eq!(pgm.get_pixel(1, 0), Some(255));

        let ppm = read_pnm(Cursor::new(b"P3\n1 1\n255\n1 2 3\n".to_vec())).unwrap();
        assert_eq!(ppm.get_rgb(0, 0), Some((1, 2, 3)));
    }

    #[test]
    fn test_sixteen_bit_pgm() {
        let mut data = b"P5\n2 1\n65535\n".to_vec();
        data.extend_from_slice(&[0xff, 0xff, 0x00, 0x00]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(pix.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_text_as_comments() {
        let mut pm = Pix::new(1, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_text(Some("first\nsecond".to_string()));
        let pix: Pix = pm.into();
        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.text(), Some("first\nsecond"));
    }

    #[test]
    fn test_invalid_headers() {
        assert!(read_pnm(Cursor::new(b"P7\n1 1\n".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P5\n1\n".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P5\n2 2\n255\n\x00".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P5\n0 2\n255\n".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P2\n1 1\n0\n0".to_vec())).is_err());
    }
}
