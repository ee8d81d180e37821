//! seedgrow-io - Image I/O for seedgrow
//!
//! Reads and writes [`Pix`] images in the formats the region-growing
//! pipeline works with:
//!
//! - **PNG** (feature `png-format`, default): all color types on read
//! - **PNM** (feature `pnm`, default): PBM / PGM / PPM, ASCII and binary
//!
//! The format of an input file is detected from its magic number; the
//! format of an output file is chosen explicitly or from its extension.
//!
//! # Example
//!
//! ```no_run
//! use seedgrow_io::{read_image, write_image, ImageFormat};
//!
//! let pix = read_image("input.png").unwrap();
//! write_image(&pix, "output.pgm", ImageFormat::Pnm).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use seedgrow_core::ImageFormat;

use seedgrow_core::Pix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its content.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let pix = read_image_format(BufReader::new(file), format)?;
    log::debug!(
        "read {} ({}x{}, {} bpp, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.depth().bits(),
        format
    );
    Ok(pix)
}

/// Read an image from memory, detecting the format from its content.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image in a known format from a reader.
pub fn read_image_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::read_pnm(reader),
        _ => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not supported",
            format
        ))),
    }
}

/// Write an image to a file in the given format.
///
/// The parent directory must already exist.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_image_format(pix, BufWriter::new(file), format)?;
    log::debug!(
        "wrote {} ({}x{}, {} bpp, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.depth().bits(),
        format
    );
    Ok(())
}

/// Write an image to a file, choosing the format from the extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if the extension is missing
/// or not recognized.
pub fn write_image_auto<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(ImageFormat::from_extension)
        .unwrap_or_default();
    if format == ImageFormat::Unknown {
        return Err(IoError::UnsupportedFormat(format!(
            "cannot infer an image format from {}",
            path.display()
        )));
    }
    write_image(pix, path, format)
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

/// Write an image in the given format to a writer.
pub fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::write_pnm(pix, writer),
        _ => {
            let _ = (pix, writer);
            Err(IoError::UnsupportedFormat(format!(
                "writing {:?} is not supported",
                format
            )))
        }
    }
}
