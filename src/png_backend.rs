//! Hand-off of quantized frames to the `png` crate.
//!
//! Writes an [`IndexedImage`] as an 8-bit indexed PNG: the color table goes to
//! `PLTE`, the alpha table (if any entry is not opaque) to `tRNS`, and the
//! index buffer to `IDAT`. Encoder failures come back as
//! [`QuantizeError::Encode`].
//!
//! ```rust
//! use quantcut::{png_backend, quantize_frames, Rgb, PaletteConfig, Raster};
//!
//! let pixels = [255, 0, 0, 0, 0, 255];
//! let frame = Raster::packed(&pixels, 2, 1, 3)?;
//! let (_palette, images) = quantize_frames::<Rgb>(&[frame], &PaletteConfig::new().colors(2))?;
//! let png = png_backend::encode_indexed_png(&images[0])?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), quantcut::QuantizeError>(())
//! ```

extern crate alloc;
use alloc::vec::Vec;

use crate::error::QuantizeError;
use crate::remap::IndexedImage;

/// Encode `image` as an indexed PNG and return the file bytes.
pub fn encode_indexed_png(image: &IndexedImage) -> Result<Vec<u8>, QuantizeError> {
    let mut out = Vec::new();
    write_indexed_png(&mut out, image)?;
    Ok(out)
}

/// Encode `image` as an indexed PNG into `w`.
pub fn write_indexed_png<W: std::io::Write>(
    w: W,
    image: &IndexedImage,
) -> Result<(), QuantizeError> {
    let width = u32::try_from(image.width()).map_err(|_| png::EncodingError::LimitsExceeded)?;
    let height = u32::try_from(image.height()).map_err(|_| png::EncodingError::LimitsExceeded)?;

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(image.palette_bytes());
    if let Some(trns) = image.trns() {
        encoder.set_trns(trns);
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.indices())?;
    writer.finish()?;

    tracing::debug!(
        width,
        height,
        colors = image.palette().len(),
        "wrote indexed png"
    );
    Ok(())
}
