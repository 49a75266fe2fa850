extern crate alloc;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::PaletteConfig;
use crate::error::QuantizeError;
use crate::median_cut::{median_cut, pad_cyclic, representative};
use crate::palette::{MAX_COLORS, Palette, check_components};
use crate::raster::Raster;
use crate::remap::{Distance, Euclidean, nearest_index};
use crate::sample::Sample;

/// Accumulates the distinct colors of a run of images and cuts them into a
/// shared [`Palette`].
///
/// Samples are kept in their `Ord` order, so the resulting palette depends
/// only on which colors were seen, never on the order of `add_image` calls.
#[derive(Debug, Clone)]
pub struct PaletteBuilder<S: Sample> {
    samples: BTreeSet<S>,
    config: PaletteConfig,
}

impl<S: Sample> PaletteBuilder<S> {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            samples: BTreeSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Number of distinct samples seen so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct samples seen so far, in ascending order.
    pub fn samples(&self) -> impl Iterator<Item = &S> {
        self.samples.iter()
    }

    /// Record every pixel of `raster`.
    ///
    /// Returns [`QuantizeError::ComponentMismatch`] if a pixel is not exactly
    /// one `S` wide.
    pub fn add_image(&mut self, raster: &Raster<'_>) -> Result<(), QuantizeError> {
        check_components::<S>(raster)?;

        let before = self.samples.len();
        self.samples.extend(raster.pixels().map(S::from_bytes));
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            new_samples = self.samples.len() - before,
            total_samples = self.samples.len(),
            "added image"
        );
        Ok(())
    }

    /// Cut the accumulated samples into a palette searched with [`Euclidean`].
    pub fn to_palette(self) -> Result<Palette<S>, QuantizeError> {
        self.to_palette_with_metric(Euclidean)
    }

    /// Cut the accumulated samples into exactly `config.colors` entries.
    ///
    /// Each bucket contributes its sorted-median sample, and every sample in
    /// the bucket is cached to that bucket's index, so colors seen here never
    /// need a nearest-color search later. When there are fewer distinct
    /// samples than colors, the list is repeated to fill the remaining
    /// buckets.
    pub fn to_palette_with_metric<D: Distance<S>>(
        self,
        metric: D,
    ) -> Result<Palette<S, D>, QuantizeError> {
        let colors = validate_colors(self.config.colors)?;
        if self.samples.is_empty() {
            return Err(QuantizeError::DegenerateInput {
                samples: 0,
                buckets: colors,
            });
        }

        let distinct = self.samples.len();
        let samples = pad_cyclic(self.samples.into_iter().collect(), colors);
        let buckets = median_cut(samples, colors)?;

        let mut table = Vec::with_capacity(colors);
        let mut cache = BTreeMap::new();
        for (idx, bucket) in buckets.iter().enumerate() {
            let rep = representative(bucket).ok_or(QuantizeError::DegenerateInput {
                samples: distinct,
                buckets: colors,
            })?;
            table.push(rep);
            for &s in bucket {
                // first bucket wins for padded repeats
                cache.entry(s).or_insert(idx as u8);
            }
        }

        if self.config.transparent_background {
            match S::transparent() {
                Some(sentinel) => {
                    tracing::debug!(replaced = ?table[0], "forcing transparent background");
                    table[0] = sentinel;
                    // samples that pointed at the replaced entry search again
                    for (s, idx) in cache.iter_mut() {
                        if *idx == 0 && *s != sentinel {
                            *idx = nearest_index(&table, s, &metric) as u8;
                        }
                    }
                    cache.insert(sentinel, 0);
                }
                None => tracing::debug!("sample kind has no transparent value, ignoring"),
            }
        }

        tracing::debug!(
            distinct,
            colors,
            cached = cache.len(),
            "built palette"
        );
        Ok(Palette::prepopulated(table, cache, metric))
    }
}

impl<S: Sample> Default for PaletteBuilder<S> {
    fn default() -> Self {
        Self::new(PaletteConfig::default())
    }
}

/// Color count as a bucket count: a power of two in `1..=256`.
fn validate_colors(colors: u32) -> Result<usize, QuantizeError> {
    let n = colors as usize;
    if !colors.is_power_of_two() || n > MAX_COLORS {
        return Err(QuantizeError::InvalidColorCount(colors));
    }
    Ok(n)
}
