extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::error::QuantizeError;
use crate::raster::Raster;
use crate::remap::{Distance, Euclidean, IndexedImage, nearest_index};
use crate::sample::Sample;

/// Largest table a one-byte index can address.
pub const MAX_COLORS: usize = 256;

/// A color table plus a memoized sample → index cache.
///
/// Table order is fixed at construction. Cache entries are only ever added:
/// once a sample has an index it keeps it for the life of the palette.
#[derive(Debug, Clone)]
pub struct Palette<S: Sample, D = Euclidean> {
    colors: Vec<S>,
    cache: BTreeMap<S, u8>,
    metric: D,
}

impl<S: Sample> Palette<S> {
    /// Palette over an explicit color table with an empty cache.
    pub fn new(colors: Vec<S>) -> Result<Self, QuantizeError> {
        Self::with_metric(colors, Euclidean)
    }
}

impl<S: Sample, D: Distance<S>> Palette<S, D> {
    /// Palette over an explicit color table, searched with `metric`.
    ///
    /// The table needs between 1 and [`MAX_COLORS`] entries.
    pub fn with_metric(colors: Vec<S>, metric: D) -> Result<Self, QuantizeError> {
        if colors.is_empty() || colors.len() > MAX_COLORS {
            return Err(QuantizeError::InvalidColorCount(
                u32::try_from(colors.len()).unwrap_or(u32::MAX),
            ));
        }
        Ok(Self {
            colors,
            cache: BTreeMap::new(),
            metric,
        })
    }

    /// Palette whose cache is already seeded, as produced by median cut.
    pub(crate) fn prepopulated(colors: Vec<S>, cache: BTreeMap<S, u8>, metric: D) -> Self {
        debug_assert!(!colors.is_empty() && colors.len() <= MAX_COLORS);
        debug_assert!(cache.values().all(|&i| usize::from(i) < colors.len()));
        Self {
            colors,
            cache,
            metric,
        }
    }

    /// The color table, in index order.
    pub fn colors(&self) -> &[S] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Number of samples with a memoized index.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Memoized index for `sample`, without searching.
    pub fn cached_index(&self, sample: &S) -> Option<u8> {
        self.cache.get(sample).copied()
    }

    /// Index of the table entry closest to `sample`.
    ///
    /// Served from the cache when possible; otherwise the whole table is
    /// scanned (ties to the lowest index) and the answer is memoized.
    pub fn best_index(&mut self, sample: S) -> u8 {
        if let Some(&idx) = self.cache.get(&sample) {
            return idx;
        }

        let idx = nearest_index(&self.colors, &sample, &self.metric) as u8;
        tracing::trace!(?sample, idx, "palette cache miss");
        self.cache.insert(sample, idx);
        idx
    }

    /// RGB part of every table entry.
    pub fn color_table(&self) -> Vec<RGB8> {
        self.colors.iter().map(|c| c.rgb()).collect()
    }

    /// Alpha of every table entry, aligned with [`Self::color_table`].
    /// `None` for sample kinds without alpha.
    pub fn alpha_table(&self) -> Option<Vec<u8>> {
        self.colors.iter().map(|c| c.alpha()).collect()
    }

    /// Map every pixel of `raster` to a palette index.
    ///
    /// The output has exactly `width * height` indices, row-major with no
    /// padding, alongside the color and alpha tables.
    pub fn convert(&mut self, raster: &Raster<'_>) -> Result<IndexedImage, QuantizeError> {
        check_components::<S>(raster)?;

        let mut indices = Vec::with_capacity(raster.pixel_count());
        for px in raster.pixels() {
            indices.push(self.best_index(S::from_bytes(px)));
        }

        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            cached = self.cache.len(),
            "converted raster"
        );

        Ok(IndexedImage::new(
            raster.width(),
            raster.height(),
            indices,
            self.color_table(),
            self.alpha_table(),
        ))
    }
}

/// Fails unless one pixel of `raster` is exactly one `S`.
pub(crate) fn check_components<S: Sample>(raster: &Raster<'_>) -> Result<(), QuantizeError> {
    let components = S::COMPONENTS.len();
    if raster.bytes_per_pixel() != components {
        return Err(QuantizeError::ComponentMismatch {
            bytes_per_pixel: raster.bytes_per_pixel(),
            components,
        });
    }
    Ok(())
}
