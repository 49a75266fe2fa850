use crate::error::QuantizeError;

/// Borrowed view over an interleaved pixel buffer with row padding.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'data> {
    data: &'data [u8],
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
}

impl<'data> Raster<'data> {
    /// Creates a [`Raster`] over `data`.
    ///
    /// `stride` is the distance in bytes between the starts of two rows and
    /// may exceed `width * bytes_per_pixel`. The last row does not need to
    /// carry its padding.
    ///
    /// Returns [`QuantizeError::ImageData`] if the slice is too short for the
    /// geometry (or the geometry does not fit in `usize`),
    /// [`QuantizeError::StrideTooSmall`] if rows would overlap.
    pub fn new(
        data: &'data [u8],
        width: usize,
        height: usize,
        stride: usize,
        bytes_per_pixel: usize,
    ) -> Result<Self, QuantizeError> {
        if bytes_per_pixel == 0 {
            return Err(QuantizeError::ZeroBytesPerPixel);
        }
        let overflow = || QuantizeError::ImageData {
            len: data.len(),
            required: usize::MAX,
        };
        let row_bytes = width.checked_mul(bytes_per_pixel).ok_or_else(overflow)?;
        if stride < row_bytes {
            return Err(QuantizeError::StrideTooSmall { stride, row_bytes });
        }
        let required = match height {
            0 => Some(0),
            h => stride
                .checked_mul(h - 1)
                .and_then(|n| n.checked_add(row_bytes)),
        };
        let required = required.ok_or_else(overflow)?;
        width.checked_mul(height).ok_or_else(overflow)?;
        if data.len() < required {
            return Err(QuantizeError::ImageData {
                len: data.len(),
                required,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride,
            bytes_per_pixel,
        })
    }

    /// Creates a tightly packed [`Raster`] (`stride == width * bytes_per_pixel`).
    pub fn packed(
        data: &'data [u8],
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
    ) -> Result<Self, QuantizeError> {
        let stride = width
            .checked_mul(bytes_per_pixel)
            .ok_or_else(|| QuantizeError::ImageData {
                len: data.len(),
                required: usize::MAX,
            })?;
        Self::new(data, width, height, stride, bytes_per_pixel)
    }

    /// Views an `imgref` image of `N`-byte pixels.
    #[cfg(feature = "imgref")]
    pub fn from_img<const N: usize>(
        img: imgref::ImgRef<'data, [u8; N]>,
    ) -> Result<Self, QuantizeError> {
        let (width, height, stride) = (img.width(), img.height(), img.stride());
        Self::new(img.into_buf().as_flattened(), width, height, stride * N, N)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Checked against overflow in [`Raster::new`].
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Pixel data of each row, padding excluded.
    pub fn rows(&self) -> impl Iterator<Item = &'data [u8]> {
        let Self { data, stride, .. } = *self;
        let row_bytes = self.width * self.bytes_per_pixel;
        // zero-width rows carry no pixels, however many there are
        let height = if row_bytes == 0 { 0 } else { self.height };
        (0..height).map(move |y| &data[y * stride..y * stride + row_bytes])
    }

    /// Every pixel in row-major order, one `bytes_per_pixel` slice each.
    pub fn pixels(&self) -> impl Iterator<Item = &'data [u8]> {
        let bpp = self.bytes_per_pixel;
        self.rows().flat_map(move |row| row.chunks_exact(bpp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn rejects_short_buffer() {
        let data = vec![0u8; 15];
        assert!(matches!(
            Raster::new(&data, 2, 2, 8, 4),
            Err(QuantizeError::ImageData {
                len: 15,
                required: 16
            })
        ));
    }

    #[test]
    fn last_row_padding_is_optional() {
        // two rows of 2 px at stride 12: 12 + 8
        let data = vec![0u8; 20];
        assert!(Raster::new(&data, 2, 2, 12, 4).is_ok());
    }

    #[test]
    fn rejects_overlapping_rows() {
        let data = vec![0u8; 64];
        assert!(matches!(
            Raster::new(&data, 4, 2, 12, 4),
            Err(QuantizeError::StrideTooSmall {
                stride: 12,
                row_bytes: 16
            })
        ));
        assert!(matches!(
            Raster::new(&data, 4, 2, 16, 0),
            Err(QuantizeError::ZeroBytesPerPixel)
        ));
    }

    #[test]
    fn pixels_skip_padding() {
        // 2x2 pixels of 3 bytes, stride 8 (2 padding bytes marked 0xee)
        let data = [
            1, 1, 1, 2, 2, 2, 0xee, 0xee, //
            3, 3, 3, 4, 4, 4,
        ];
        let raster = Raster::new(&data, 2, 2, 8, 3).unwrap();
        let firsts: Vec<u8> = raster.pixels().map(|p| p[0]).collect();
        assert_eq!(firsts, [1, 2, 3, 4]);
        assert_eq!(raster.pixel_count(), 4);
    }

    #[test]
    fn empty_image_is_readable() {
        let raster = Raster::new(&[], 0, 0, 0, 4).unwrap();
        assert_eq!(raster.pixels().count(), 0);
    }

    #[test]
    fn oversized_geometry_is_rejected() {
        let wide = usize::MAX / 4 + 1;
        assert!(matches!(
            Raster::new(&[], wide, 1, 0, 4),
            Err(QuantizeError::ImageData { len: 0, .. })
        ));
        assert!(matches!(
            Raster::packed(&[], wide, 1, 4),
            Err(QuantizeError::ImageData { len: 0, .. })
        ));
        // each factor fits, the row offsets do not
        assert!(matches!(
            Raster::new(&[0u8; 16], 1, usize::MAX, 16, 4),
            Err(QuantizeError::ImageData { len: 16, .. })
        ));
    }

    #[test]
    fn zero_width_rows_yield_nothing() {
        let raster = Raster::new(&[], 0, usize::MAX, 0, 4).unwrap();
        assert_eq!(raster.pixel_count(), 0);
        assert_eq!(raster.rows().count(), 0);
        assert_eq!(raster.pixels().count(), 0);
    }
}
