extern crate alloc;
use alloc::vec::Vec;

use crate::error::QuantizeError;
use crate::sample::{Channel, Sample};

/// Component with the largest `max - min` spread across `samples`.
///
/// Ties go to the earliest tag in [`Sample::COMPONENTS`].
pub fn widest_component<S: Sample>(samples: &[S]) -> Channel {
    let mut widest = S::COMPONENTS[0];
    let mut widest_spread = 0u8;

    for &tag in S::COMPONENTS {
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for s in samples {
            let v = s.component(tag);
            min = min.min(v);
            max = max.max(v);
        }
        let spread = max.saturating_sub(min);
        if spread > widest_spread {
            widest_spread = spread;
            widest = tag;
        }
    }

    widest
}

/// Stable ascending sort on the widest-spread component.
fn sort_on_widest<S: Sample>(samples: &mut [S]) {
    let tag = widest_component(samples);
    samples.sort_by_key(|s| s.component(tag));
}

/// Partition `samples` into exactly `buckets` non-empty buckets.
///
/// Each level picks the component with the widest spread, stable-sorts on it
/// and halves the list at `len / 2`. Buckets come out low-to-high, left half
/// before right half, so the output order is fully determined by the input
/// order.
///
/// `buckets` must be a power of two and no larger than `samples.len()`.
pub fn median_cut<S: Sample>(
    samples: Vec<S>,
    buckets: usize,
) -> Result<Vec<Vec<S>>, QuantizeError> {
    if !buckets.is_power_of_two() {
        return Err(QuantizeError::InvalidColorCount(
            u32::try_from(buckets).unwrap_or(u32::MAX),
        ));
    }
    if samples.len() < buckets {
        return Err(QuantizeError::DegenerateInput {
            samples: samples.len(),
            buckets,
        });
    }

    let mut out = Vec::with_capacity(buckets);
    cut(samples, buckets, &mut out);
    Ok(out)
}

fn cut<S: Sample>(mut samples: Vec<S>, buckets: usize, out: &mut Vec<Vec<S>>) {
    if buckets == 1 {
        out.push(samples);
        return;
    }

    sort_on_widest(&mut samples);
    let right = samples.split_off(samples.len() / 2);
    cut(samples, buckets / 2, out);
    cut(right, buckets / 2, out);
}

/// The bucket's representative: the sample at the median position once the
/// bucket is sorted on its own widest component. Never an average.
///
/// Returns `None` for an empty bucket.
pub fn representative<S: Sample>(bucket: &[S]) -> Option<S> {
    if bucket.is_empty() {
        return None;
    }
    let mut sorted = bucket.to_vec();
    sort_on_widest(&mut sorted);
    Some(sorted[sorted.len() / 2])
}

/// Repeat `samples` in order until it holds at least `len` entries.
///
/// Lets a small color set fill every requested bucket; the repeats become
/// filler buckets that duplicate an existing color.
pub fn pad_cyclic<S: Sample>(samples: Vec<S>, len: usize) -> Vec<S> {
    if samples.is_empty() || samples.len() >= len {
        return samples;
    }
    let mut padded = Vec::with_capacity(len);
    padded.extend(samples.iter().copied().cycle().take(len));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Bgra, Rgb};
    use alloc::vec;

    fn gray_ramp(n: u8) -> Vec<Rgb> {
        (0..n).map(|v| Rgb::new(v, v / 2, 0)).collect()
    }

    #[test]
    fn produces_requested_count() {
        for k in [1, 2, 4, 8, 16, 32] {
            let buckets = median_cut(gray_ramp(100), k).unwrap();
            assert_eq!(buckets.len(), k);
            assert!(buckets.iter().all(|b| !b.is_empty()));
            assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), 100);
        }
    }

    #[test]
    fn single_bucket_keeps_everything() {
        let input = gray_ramp(7);
        let buckets = median_cut(input.clone(), 1).unwrap();
        assert_eq!(buckets, vec![input]);
    }

    #[test]
    fn odd_length_gives_left_the_smaller_half() {
        let buckets = median_cut(gray_ramp(5), 2).unwrap();
        assert_eq!(buckets[0].len(), 2);
        assert_eq!(buckets[1].len(), 3);
        // low values on the left
        assert!(buckets[0].iter().all(|s| s.r < 2));
    }

    #[test]
    fn splits_on_widest_component() {
        // red spans 10, blue spans 200
        let samples = vec![
            Rgb::new(0, 0, 200),
            Rgb::new(10, 0, 0),
            Rgb::new(5, 0, 100),
            Rgb::new(0, 0, 50),
        ];
        assert_eq!(widest_component(&samples), Channel::B);
        let buckets = median_cut(samples, 2).unwrap();
        assert_eq!(buckets[0], vec![Rgb::new(10, 0, 0), Rgb::new(0, 0, 50)]);
        assert_eq!(buckets[1], vec![Rgb::new(5, 0, 100), Rgb::new(0, 0, 200)]);
    }

    #[test]
    fn spread_tie_goes_to_first_component() {
        // Bgra breaks ties in byte order: B before G before R
        let samples = vec![Bgra::new(0, 255, 0, 255), Bgra::new(255, 0, 0, 0)];
        assert_eq!(widest_component(&samples), Channel::G);
        let samples = vec![Bgra::new(255, 0, 0, 255), Bgra::new(0, 0, 255, 255)];
        assert_eq!(widest_component(&samples), Channel::B);
        let buckets = median_cut(samples, 2).unwrap();
        assert_eq!(buckets[0], vec![Bgra::new(255, 0, 0, 255)]);
        assert_eq!(buckets[1], vec![Bgra::new(0, 0, 255, 255)]);
        // Rgb keeps R first
        let samples = vec![Rgb::new(0, 0, 0), Rgb::new(255, 0, 255)];
        assert_eq!(widest_component(&samples), Channel::R);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let samples = vec![
            Rgb::new(9, 1, 0),
            Rgb::new(0, 2, 0),
            Rgb::new(9, 3, 0),
            Rgb::new(0, 4, 0),
        ];
        let buckets = median_cut(samples, 2).unwrap();
        assert_eq!(buckets[0], vec![Rgb::new(0, 2, 0), Rgb::new(0, 4, 0)]);
        assert_eq!(buckets[1], vec![Rgb::new(9, 1, 0), Rgb::new(9, 3, 0)]);
    }

    #[test]
    fn identical_samples_still_fill_every_bucket() {
        let samples = vec![Rgb::new(7, 7, 7); 8];
        let buckets = median_cut(samples, 8).unwrap();
        assert_eq!(buckets.len(), 8);
        assert!(buckets.iter().all(|b| b == &vec![Rgb::new(7, 7, 7)]));
    }

    #[test]
    fn rejects_too_few_samples() {
        assert!(matches!(
            median_cut(gray_ramp(3), 4),
            Err(QuantizeError::DegenerateInput {
                samples: 3,
                buckets: 4
            })
        ));
        assert!(matches!(
            median_cut(Vec::<Rgb>::new(), 1),
            Err(QuantizeError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(matches!(
            median_cut(gray_ramp(10), 3),
            Err(QuantizeError::InvalidColorCount(3))
        ));
        assert!(matches!(
            median_cut(gray_ramp(10), 0),
            Err(QuantizeError::InvalidColorCount(0))
        ));
    }

    #[test]
    fn representative_is_sorted_median() {
        let bucket = [Rgb::new(90, 0, 0), Rgb::new(10, 0, 0), Rgb::new(50, 0, 0)];
        assert_eq!(representative(&bucket), Some(Rgb::new(50, 0, 0)));
        // even length picks the upper median
        let bucket = [Rgb::new(30, 0, 0), Rgb::new(10, 0, 0)];
        assert_eq!(representative(&bucket), Some(Rgb::new(30, 0, 0)));
        assert_eq!(representative::<Rgb>(&[]), None);
    }

    #[test]
    fn pad_cyclic_repeats_in_order() {
        let samples = vec![Rgb::new(1, 0, 0), Rgb::new(2, 0, 0), Rgb::new(3, 0, 0)];
        let padded = pad_cyclic(samples.clone(), 4);
        assert_eq!(padded.len(), 4);
        assert_eq!(padded[3], Rgb::new(1, 0, 0));
        assert_eq!(pad_cyclic(samples.clone(), 2), samples);
        assert!(pad_cyclic(Vec::<Rgb>::new(), 4).is_empty());
    }
}
