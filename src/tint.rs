//! Tint colors applied to matte regions.

use std::fmt;

use crate::{error::CompositeError, image::Color};

/// A solid RGB color plus an alpha weight, each component between 0.0 and 1.0.
///
/// Color components are non-linear sRGB, like [`Color`]. The alpha weight controls how strongly
/// the tint replaces the underlying pixels in fully masked regions.
#[derive(Clone, Copy, PartialEq)]
pub struct TintColor {
    rgba: [f32; 4],
}

impl TintColor {
    /// Creates a [`TintColor`], validating that every component lies between 0.0 and 1.0.
    pub fn new(r: f32, g: f32, b: f32, alpha: f32) -> Result<Self, CompositeError> {
        for (component, value) in [("red", r), ("green", g), ("blue", b), ("alpha", alpha)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CompositeError::InvalidTint { component, value });
            }
        }

        Ok(Self {
            rgba: [r, g, b, alpha],
        })
    }

    /// Pure red with the given alpha weight.
    pub fn red(alpha: f32) -> Result<Self, CompositeError> {
        Self::new(1.0, 0.0, 0.0, alpha)
    }

    /// Pure green with the given alpha weight.
    pub fn green(alpha: f32) -> Result<Self, CompositeError> {
        Self::new(0.0, 1.0, 0.0, alpha)
    }

    /// Pure blue with the given alpha weight.
    pub fn blue(alpha: f32) -> Result<Self, CompositeError> {
        Self::new(0.0, 0.0, 1.0, alpha)
    }

    /// Returns the red component.
    #[inline]
    pub fn r(&self) -> f32 {
        self.rgba[0]
    }

    /// Returns the green component.
    #[inline]
    pub fn g(&self) -> f32 {
        self.rgba[1]
    }

    /// Returns the blue component.
    #[inline]
    pub fn b(&self) -> f32 {
        self.rgba[2]
    }

    /// Returns the alpha weight.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.rgba[3]
    }

    /// Returns a copy of `self` with a different alpha weight.
    pub fn with_alpha(self, alpha: f32) -> Result<Self, CompositeError> {
        Self::new(self.r(), self.g(), self.b(), alpha)
    }

    /// Returns the fully opaque 8-bit [`Color`] closest to this tint.
    pub fn to_color(&self) -> Color {
        let [r, g, b, _] = self.rgba.map(|c| (c * 255.0).round() as u8);
        Color::from_rgb8(r, g, b)
    }
}

impl fmt::Debug for TintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TintColor({}, {}, {}, alpha={})",
            self.r(),
            self.g(),
            self.b(),
            self.alpha()
        )
    }
}
