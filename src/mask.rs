//! Segmentation mattes.
//!
//! A [`Mask`] is a single-channel image marking how strongly each pixel belongs to a semantic
//! region of a photo. Cameras deliver mattes at a lower resolution than the photo itself, so they
//! have to be upscaled with [`Mask::scale_to_height`] before they can be applied. Scaling yields a
//! [`ScaledMask`] view that interpolates on access instead of allocating the scaled pixels.

use std::{fmt, path::Path};

use image::{GrayImage, Luma};

use crate::{error::CompositeError, image::load_dynamic, resolution::Resolution, tint::TintColor};

/// An 8-bit single-channel mask.
///
/// A value of 0 means a pixel is outside of the masked region, 255 means it is fully included.
#[derive(Clone, PartialEq)]
pub struct Mask {
    buf: GrayImage,
}

impl Mask {
    /// Loads a mask from the filesystem.
    ///
    /// The path must have a supported file extension (`jpeg`, `jpg` or `png`). Color images are
    /// converted to their luminance.
    pub fn load<A: AsRef<Path>>(path: A) -> anyhow::Result<Self> {
        Ok(Self {
            buf: load_dynamic(path.as_ref())?.to_luma8(),
        })
    }

    /// Creates a mask of the given size where every pixel has the given coverage.
    ///
    /// `coverage` is clamped to the range 0.0 to 1.0.
    pub fn filled(width: u32, height: u32, coverage: f32) -> Self {
        Self {
            buf: GrayImage::from_pixel(width, height, Luma([coverage_to_u8(coverage)])),
        }
    }

    /// Creates a mask by calling `f` with the coordinates of every pixel.
    ///
    /// The returned coverage values are clamped to the range 0.0 to 1.0.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        Self {
            buf: GrayImage::from_fn(width, height, |x, y| Luma([coverage_to_u8(f(x, y))])),
        }
    }

    /// Returns the width of this mask, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Returns the height of this mask, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Returns the size of this mask.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width(), self.height())
    }

    /// Returns the raw 8-bit value of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this mask.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.buf[(x, y)].0[0]
    }

    /// Returns the coverage of the pixel at `(x, y)`, between 0.0 and 1.0.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this mask.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        f32::from(self.get(x, y)) / 255.0
    }

    /// Uniformly scales this mask so that its height becomes `height`.
    ///
    /// Both axes are scaled by `height / self.height()`, so the aspect ratio is preserved and the
    /// resulting width is not necessarily the width of the image the mask is applied to. The
    /// returned [`ScaledMask`] borrows `self` and computes coverage values with bilinear filtering
    /// when they are accessed.
    pub fn scale_to_height(&self, height: u32) -> Result<ScaledMask<'_>, CompositeError> {
        let res = self
            .resolution()
            .scale_to_height(height)
            .ok_or(CompositeError::EmptyMask(self.resolution()))?;

        Ok(ScaledMask {
            mask: self,
            res,
            step_x: self.width() as f32 / res.width() as f32,
            step_y: self.height() as f32 / res.height() as f32,
        })
    }

    /// Returns the underlying grayscale image.
    #[inline]
    pub fn as_gray_image(&self) -> &GrayImage {
        &self.buf
    }
}

impl From<GrayImage> for Mask {
    fn from(buf: GrayImage) -> Self {
        Self { buf }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} Mask", self.width(), self.height())
    }
}

/// A view of a [`Mask`] at a different resolution.
///
/// Created by [`Mask::scale_to_height`].
#[derive(Clone, Copy, PartialEq)]
pub struct ScaledMask<'a> {
    mask: &'a Mask,
    res: Resolution,
    step_x: f32,
    step_y: f32,
}

impl ScaledMask<'_> {
    /// Returns the scaled width, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.res.width()
    }

    /// Returns the scaled height, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.res.height()
    }

    /// Returns the scaled size.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.res
    }

    /// Returns the coverage of the scaled pixel at `(x, y)`, between 0.0 and 1.0.
    ///
    /// The value is bilinearly interpolated between the 4 closest pixels of the underlying mask.
    /// Coordinates past the edges of the mask are clamped to the edge.
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        let (x0, x1, tx) = sample_axis(x, self.step_x, self.mask.width());
        let (y0, y1, ty) = sample_axis(y, self.step_y, self.mask.height());

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let top = lerp(self.mask.coverage(x0, y0), self.mask.coverage(x1, y0), tx);
        let bottom = lerp(self.mask.coverage(x0, y1), self.mask.coverage(x1, y1), tx);
        lerp(top, bottom, ty)
    }
}

impl fmt::Debug for ScaledMask<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} scaled to {}", self.mask, self.res)
    }
}

/// Maps a scaled pixel coordinate to the two source pixels surrounding its center, and the
/// interpolation factor between them.
fn sample_axis(pos: u32, step: f32, len: u32) -> (u32, u32, f32) {
    let max = (len - 1) as f32;
    let src = ((pos as f32 + 0.5) * step - 0.5).clamp(0.0, max);
    let lo = src.floor();
    let hi = (lo + 1.0).min(max);
    (lo as u32, hi as u32, src - lo)
}

fn coverage_to_u8(coverage: f32) -> u8 {
    (coverage.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The semantic regions a camera can deliver mattes for.
///
/// [`MatteType::ALL`] lists them in the order they are layered onto a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatteType {
    Skin,
    Hair,
    Teeth,
}

impl MatteType {
    /// All matte types, in compositing order.
    pub const ALL: [Self; 3] = [Self::Skin, Self::Hair, Self::Teeth];

    /// Returns the tint used to visualize this matte, with the given alpha weight.
    ///
    /// Skin is tinted red, hair green and teeth blue.
    pub fn tint(self, alpha: f32) -> Result<TintColor, CompositeError> {
        match self {
            Self::Skin => TintColor::red(alpha),
            Self::Hair => TintColor::green(alpha),
            Self::Teeth => TintColor::blue(alpha),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Skin => "skin",
            Self::Hair => "hair",
            Self::Teeth => "teeth",
        }
    }
}

impl fmt::Display for MatteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
