use std::num::NonZero;

use crate::{Error, PixelFormat};

const DEFAULT_WEIGHT: u32 = 1;

/// One kind of fixed-size block to preallocate, together with its relative weight.
///
/// A shape is an immutable value. Two shapes are interchangeable if their byte size, weight and
/// originating [`Dimensions`] (if any) are all equal.
///
/// Shapes are validated on construction: a shape with a zero byte size or a zero weight cannot
/// exist, so every shape that reaches the planner can be planned.
///
/// # Examples
///
/// Describing a shape by its byte size directly:
///
/// ```
/// use pool_prefill::ShapeDescriptor;
///
/// let shape = ShapeDescriptor::new(20_000, 1).unwrap();
/// assert_eq!(shape.byte_size(), 20_000);
/// assert!(shape.dimensions().is_none());
///
/// assert!(ShapeDescriptor::new(0, 1).is_err());
/// ```
///
/// Describing a bitmap shape by its dimensions:
///
/// ```
/// use pool_prefill::{PixelFormat, ShapeDescriptor};
///
/// let shape = ShapeDescriptor::builder(100, 50)
///     .format(PixelFormat::Rgb565)
///     .weight(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(shape.byte_size(), 10_000);
/// assert_eq!(shape.weight(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ShapeDescriptor {
    byte_size: NonZero<u64>,
    weight: NonZero<u32>,
    dimensions: Option<Dimensions>,
}

impl ShapeDescriptor {
    /// Describes a shape whose byte size was computed by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if `byte_size` or `weight` is zero.
    pub fn new(byte_size: u64, weight: u32) -> crate::Result<Self> {
        Self::new_inner(byte_size, weight, None)
    }

    /// Starts describing a bitmap shape of the given dimensions.
    ///
    /// The format and weight are optional and default to [`PixelFormat::default()`] and 1.
    pub fn builder(width: u32, height: u32) -> ShapeBuilder {
        ShapeBuilder::new(width, height)
    }

    fn new_inner(
        byte_size: u64,
        weight: u32,
        dimensions: Option<Dimensions>,
    ) -> crate::Result<Self> {
        let Some(byte_size_nz) = NonZero::new(byte_size) else {
            return Err(Error::invalid_shape(
                byte_size,
                weight,
                "byte size must be non-zero",
            ));
        };

        let Some(weight_nz) = NonZero::new(weight) else {
            return Err(Error::invalid_shape(
                byte_size,
                weight,
                "weight must be non-zero",
            ));
        };

        Ok(Self {
            byte_size: byte_size_nz,
            weight: weight_nz,
            dimensions,
        })
    }

    /// The number of bytes one block of this shape occupies.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.byte_size.get()
    }

    /// The relative weight of this shape when a budget is divided between shapes.
    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight.get()
    }

    /// The bitmap dimensions this shape was described with, if it was described by dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }
}

/// The bitmap dimensions and pixel format a [`ShapeDescriptor`] was derived from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Dimensions {
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Dimensions {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format of the block.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }
}

/// Builder for a [`ShapeDescriptor`] described by bitmap dimensions.
///
/// The dimensions are mandatory, whereas the format and weight are optional. Defaults are only
/// applied when the shape is built, so a planner can distinguish "no format set" from an
/// explicit choice and substitute its own default format.
///
/// # Examples
///
/// ```
/// use pool_prefill::{PixelFormat, ShapeBuilder};
///
/// let builder = ShapeBuilder::square(64);
/// assert_eq!(builder.configured_format(), None);
///
/// let shape = builder.build_with_default_format(PixelFormat::Alpha8).unwrap();
/// assert_eq!(shape.byte_size(), 64 * 64);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct ShapeBuilder {
    width: u32,
    height: u32,
    format: Option<PixelFormat>,
    weight: u32,
}

impl ShapeBuilder {
    /// Starts describing a `width` by `height` shape.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Starts describing a `size` by `size` shape.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Sets the pixel format of the shape.
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the relative weight of the shape. A shape with weight 2 receives twice the share of
    /// each budget that a shape with weight 1 receives.
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// The format set via [`format()`](Self::format), if any.
    #[must_use]
    pub fn configured_format(&self) -> Option<PixelFormat> {
        self.format
    }

    /// Builds the shape, using [`PixelFormat::default()`] if no format was set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if a dimension or the weight is zero, or if the byte size
    /// of the shape does not fit in a `u64`.
    pub fn build(self) -> crate::Result<ShapeDescriptor> {
        self.build_with_default_format(PixelFormat::default())
    }

    /// Builds the shape, using `default_format` if no format was set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if a dimension or the weight is zero, or if the byte size
    /// of the shape does not fit in a `u64`.
    pub fn build_with_default_format(
        self,
        default_format: PixelFormat,
    ) -> crate::Result<ShapeDescriptor> {
        let format = self.format.unwrap_or(default_format);

        let Some(byte_size) = format.byte_size(self.width, self.height) else {
            return Err(Error::invalid_shape(
                0,
                self.weight,
                "byte size does not fit in 64 bits",
            ));
        };

        ShapeDescriptor::new_inner(
            byte_size,
            self.weight,
            Some(Dimensions {
                width: self.width,
                height: self.height,
                format,
            }),
        )
    }
}
