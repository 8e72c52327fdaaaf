/// The in-memory pixel layout of a bitmap block, which determines its cost per pixel.
///
/// # Examples
///
/// ```
/// use pool_prefill::PixelFormat;
///
/// assert_eq!(PixelFormat::Argb8888.bytes_per_pixel(), 4);
/// assert_eq!(PixelFormat::default(), PixelFormat::Rgb565);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum PixelFormat {
    /// A single 8-bit alpha channel.
    Alpha8,

    /// 16-bit color without alpha: 5 bits red, 6 bits green, 5 bits blue. This is the default.
    #[default]
    Rgb565,

    /// 16-bit color with 4 bits for each of alpha, red, green and blue.
    Argb4444,

    /// 32-bit color with 8 bits for each of alpha, red, green and blue.
    Argb8888,
}

impl PixelFormat {
    /// Returns the number of bytes one pixel occupies in this format.
    #[must_use]
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::Alpha8 => 1,
            Self::Rgb565 | Self::Argb4444 => 2,
            Self::Argb8888 => 4,
        }
    }

    /// Returns the byte size of a `width` by `height` block in this format,
    /// or `None` if the size does not fit in a `u64`.
    #[must_use]
    pub fn byte_size(self, width: u32, height: u32) -> Option<u64> {
        u64::from(width)
            .checked_mul(u64::from(height))?
            .checked_mul(u64::from(self.bytes_per_pixel()))
    }
}

/// Governs which [`PixelFormat`] is used for shapes that do not specify one explicitly.
///
/// # Examples
///
/// ```
/// use pool_prefill::{DecodePreference, PixelFormat};
///
/// assert_eq!(DecodePreference::default(), DecodePreference::PreferRgb565);
/// assert_eq!(
///     DecodePreference::PreferArgb8888.default_format(),
///     PixelFormat::Argb8888
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DecodePreference {
    /// Prefer half-size 16-bit blocks without alpha. This is the default.
    #[default]
    PreferRgb565,

    /// Prefer full quality 32-bit blocks.
    PreferArgb8888,

    /// Always use full quality 32-bit blocks.
    AlwaysArgb8888,
}

impl DecodePreference {
    /// The pixel format applied to shapes that leave their format unset.
    #[must_use]
    pub const fn default_format(self) -> PixelFormat {
        match self {
            Self::PreferRgb565 => PixelFormat::Rgb565,
            Self::PreferArgb8888 | Self::AlwaysArgb8888 => PixelFormat::Argb8888,
        }
    }
}
