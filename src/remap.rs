extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::sample::Sample;

/// Distance metric used by nearest-color search.
pub trait Distance<S: Sample> {
    fn distance(&self, a: &S, b: &S) -> f64;
}

/// Euclidean distance over all components, see [`Sample::distance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<S: Sample> Distance<S> for Euclidean {
    #[inline]
    fn distance(&self, a: &S, b: &S) -> f64 {
        a.distance(b)
    }
}

impl<S: Sample, D: Distance<S> + ?Sized> Distance<S> for &D {
    fn distance(&self, a: &S, b: &S) -> f64 {
        (**self).distance(a, b)
    }
}

/// Index of the table entry nearest to `sample` (brute force).
///
/// Scans left to right and only moves on a strictly smaller distance, so ties
/// resolve to the lowest index. `colors` must not be empty.
pub fn nearest_index<S: Sample, D: Distance<S>>(colors: &[S], sample: &S, metric: &D) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (i, color) in colors.iter().enumerate() {
        let d = metric.distance(sample, color);
        if d < best_dist {
            best_dist = d;
            best_idx = i;
        }
    }

    best_idx
}

/// An image re-expressed as palette indices, ready for an indexed encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
    palette: Vec<RGB8>,
    alpha: Option<Vec<u8>>,
}

impl IndexedImage {
    pub(crate) fn new(
        width: usize,
        height: usize,
        indices: Vec<u8>,
        palette: Vec<RGB8>,
        alpha: Option<Vec<u8>>,
    ) -> Self {
        Self {
            width,
            height,
            indices,
            palette,
            alpha,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// One index per pixel, row-major, no row padding.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// RGB color table, one entry per palette index.
    pub fn palette(&self) -> &[RGB8] {
        &self.palette
    }

    /// Alpha per palette index, `None` when the samples carry no alpha.
    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// Color table flattened to `[R, G, B, R, G, B, ...]` (PNG `PLTE` layout).
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    /// Alpha table truncated after the last non-opaque entry, as a PNG `tRNS`
    /// chunk wants it. `None` if every entry is opaque.
    pub fn trns(&self) -> Option<Vec<u8>> {
        let alpha = self.alpha.as_ref()?;
        let last = alpha.iter().rposition(|&a| a != 255)?;
        Some(alpha[..=last].to_vec())
    }

    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }
}
