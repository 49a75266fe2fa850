use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("pixel buffer of {len} bytes is too short, geometry needs {required}")]
    ImageData { len: usize, required: usize },

    #[error("row stride {stride} is smaller than a row of pixel data ({row_bytes} bytes)")]
    StrideTooSmall { stride: usize, row_bytes: usize },

    #[error("bytes per pixel cannot be zero")]
    ZeroBytesPerPixel,

    #[error("color count must be a power of two between 1 and 256, got {0}")]
    InvalidColorCount(u32),

    #[error("cannot cut {samples} samples into {buckets} buckets")]
    DegenerateInput { samples: usize, buckets: usize },

    #[error("pixels are {bytes_per_pixel} bytes wide but samples have {components} components")]
    ComponentMismatch {
        bytes_per_pixel: usize,
        components: usize,
    },

    #[cfg(feature = "png")]
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

impl QuantizeError {
    /// True for the errors caused by an unreadable source buffer.
    pub fn is_image_data(&self) -> bool {
        matches!(
            self,
            Self::ImageData { .. } | Self::StrideTooSmall { .. } | Self::ZeroBytesPerPixel
        )
    }
}
