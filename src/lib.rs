//! Median-cut palette quantization for indexed image encoders.
//!
//! Feed every frame of an animation (or any set of images that must share a
//! color table) to a [`PaletteBuilder`], cut it into a [`Palette`] of a
//! power-of-two size, then [`Palette::convert`] each frame into an
//! [`IndexedImage`]: one index byte per pixel plus RGB and alpha tables, the
//! shape a PNG `PLTE`/`tRNS`/`IDAT` writer expects.
//!
//! ```
//! use quantcut::{Bgra, PaletteBuilder, PaletteConfig, Raster};
//!
//! // 2x1 BGRA frame: opaque red, transparent black
//! let frame = [0, 0, 255, 255, 0, 0, 0, 0];
//! let raster = Raster::packed(&frame, 2, 1, 4)?;
//!
//! let mut builder = PaletteBuilder::<Bgra>::new(PaletteConfig::new().colors(2));
//! builder.add_image(&raster)?;
//! let mut palette = builder.to_palette()?;
//!
//! let indexed = palette.convert(&raster)?;
//! assert_eq!(indexed.indices().len(), 2);
//! assert_eq!(indexed.palette().len(), 2);
//! # Ok::<(), quantcut::QuantizeError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod builder;
pub mod error;
pub mod median_cut;
pub mod palette;
pub mod raster;
pub mod remap;
pub mod sample;

#[cfg(feature = "png")]
pub mod png_backend;

pub use builder::PaletteBuilder;
pub use error::QuantizeError;
pub use palette::{MAX_COLORS, Palette};
pub use raster::Raster;
pub use remap::{Distance, Euclidean, IndexedImage};
pub use sample::{Bgra, Channel, Rgb, Rgba, Sample};

use alloc::vec::Vec;

/// Configuration for palette construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    /// Number of palette entries to produce. Must be a power of two in
    /// `1..=256`; checked when the palette is built.
    pub colors: u32,
    /// Replace the first palette entry with the sample kind's fully
    /// transparent value, for formats that treat index 0 as background.
    pub transparent_background: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: 256,
            transparent_background: false,
        }
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(mut self, n: u32) -> Self {
        self.colors = n;
        self
    }

    pub fn transparent_background(mut self, enabled: bool) -> Self {
        self.transparent_background = enabled;
        self
    }
}

/// Quantize a sequence of frames against one shared palette.
///
/// Every frame contributes to the palette before any frame is converted, so
/// all returned images index into the same color table.
pub fn quantize_frames<S: Sample>(
    frames: &[Raster<'_>],
    config: &PaletteConfig,
) -> Result<(Palette<S>, Vec<IndexedImage>), QuantizeError> {
    let mut builder = PaletteBuilder::<S>::new(config.clone());
    for frame in frames {
        builder.add_image(frame)?;
    }

    let mut palette = builder.to_palette()?;
    let images = frames
        .iter()
        .map(|frame| palette.convert(frame))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((palette, images))
}
