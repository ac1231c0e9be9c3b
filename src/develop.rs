//! Turning captured photos into displayable images.

use std::env::{self, VarError};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    capture::CapturedPhoto,
    composite::composite_mattes,
    image::{Image, Orientation},
};

/// Default weight of the matte tint colors.
pub const DEFAULT_ALPHA: f32 = 0.5;

const ALPHA_VAR: &str = "MATTECAM_ALPHA";
const ORIENTATION_VAR: &str = "MATTECAM_ORIENTATION";

/// Options controlling [`develop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevelopOptions {
    /// Weight of the tint colors.
    ///
    /// Values outside of 0.0 to 1.0 make compositing fail, and the photo is developed without
    /// mattes.
    pub alpha: f32,
    /// Orientation correction applied after compositing.
    pub orientation: Orientation,
}

impl Default for DevelopOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            orientation: Orientation::Right,
        }
    }
}

impl DevelopOptions {
    /// Reads options from the `MATTECAM_ALPHA` and `MATTECAM_ORIENTATION` environment variables.
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| env::var(name))
    }

    fn from_vars(var: impl Fn(&str) -> Result<String, VarError>) -> anyhow::Result<Self> {
        let mut options = Self::default();

        if let Some(alpha) = read_var(&var, ALPHA_VAR)? {
            options.alpha = alpha
                .parse()
                .with_context(|| format!("invalid value set for `{ALPHA_VAR}`: '{alpha}'"))?;
            if !(0.0..=1.0).contains(&options.alpha) {
                anyhow::bail!("`{ALPHA_VAR}` must be between 0.0 and 1.0 (got '{alpha}')");
            }
        }
        if let Some(orientation) = read_var(&var, ORIENTATION_VAR)? {
            options.orientation = orientation
                .parse()
                .with_context(|| format!("invalid value set for `{ORIENTATION_VAR}`"))?;
        }

        log::debug!("develop options: {:?}", options);
        Ok(options)
    }
}

fn read_var(
    var: impl Fn(&str) -> Result<String, VarError>,
    name: &str,
) -> anyhow::Result<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(s)) => anyhow::bail!(
            "invalid value set for `{name}`: {}",
            s.to_string_lossy()
        ),
    }
}

/// Develops a captured photo for display.
///
/// The mattes are composited onto the photo only if all three of them were captured. If any of
/// them is missing, or compositing fails, the photo is used unmodified. The result is reoriented
/// according to `options.orientation`.
pub fn develop(captured: &CapturedPhoto, options: &DevelopOptions) -> Image {
    let composite = match captured.mattes() {
        Some([skin, hair, teeth]) => {
            match composite_mattes(&captured.photo, skin, hair, teeth, options.alpha) {
                Ok(image) => Some(image),
                Err(e) => {
                    log::warn!("failed to composite mattes, using plain photo: {}", e);
                    None
                }
            }
        }
        None => {
            log::debug!("not all mattes were captured, skipping compositing");
            None
        }
    };

    let image = composite.as_ref().unwrap_or(&captured.photo);
    image.oriented(options.orientation)
}

/// Develops a captured photo into a directly displayable RGBA raster.
///
/// See [`develop`].
pub fn develop_rgba8(captured: &CapturedPhoto, options: &DevelopOptions) -> RgbaImage {
    develop(captured, options).into_rgba8()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, ffi::OsString};

    use super::*;
    use crate::{image::Color, mask::Mask};

    fn vars(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn options_default() {
        let options = DevelopOptions::from_vars(vars(&[])).unwrap();
        assert_eq!(options, DevelopOptions::default());
        assert_eq!(options.alpha, 0.5);
        assert_eq!(options.orientation, Orientation::Right);
    }

    #[test]
    fn options_from_vars() {
        let options = DevelopOptions::from_vars(vars(&[
            ("MATTECAM_ALPHA", "0.7"),
            ("MATTECAM_ORIENTATION", "up-mirrored"),
        ]))
        .unwrap();
        assert_eq!(options.alpha, 0.7);
        assert_eq!(options.orientation, Orientation::UpMirrored);
    }

    #[test]
    fn options_invalid() {
        assert!(DevelopOptions::from_vars(vars(&[("MATTECAM_ALPHA", "lots")])).is_err());
        assert!(DevelopOptions::from_vars(vars(&[("MATTECAM_ALPHA", "1.5")])).is_err());
        assert!(DevelopOptions::from_vars(vars(&[("MATTECAM_ORIENTATION", "tilted")])).is_err());
        assert!(DevelopOptions::from_vars(|_| Err(VarError::NotUnicode(OsString::new()))).is_err());
    }

    #[test]
    fn develop_partial_mattes_uses_photo() {
        let photo = Image::filled(4, 2, Color::WHITE);
        let captured = CapturedPhoto {
            skin: Some(Mask::filled(2, 1, 1.0)),
            ..CapturedPhoto::new(photo.clone())
        };
        let out = develop(&captured, &DevelopOptions::default());
        assert_eq!(out, photo.oriented(Orientation::Right));
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn develop_invalid_alpha_uses_photo() {
        let photo = Image::filled(2, 2, Color::BLACK);
        let mask = Mask::filled(1, 1, 1.0);
        let captured =
            CapturedPhoto::new(photo.clone()).with_mattes(mask.clone(), mask.clone(), mask);
        let options = DevelopOptions {
            alpha: 1.5,
            orientation: Orientation::Up,
        };
        assert_eq!(develop(&captured, &options), photo);
    }

    #[test]
    fn develop_applies_mattes() {
        let photo = Image::filled(2, 2, Color::BLACK);
        let captured = CapturedPhoto::new(photo).with_mattes(
            Mask::filled(1, 1, 0.0),
            Mask::filled(1, 1, 0.0),
            Mask::filled(1, 1, 1.0),
        );
        let options = DevelopOptions {
            alpha: 1.0,
            orientation: Orientation::Down,
        };
        let raster = develop_rgba8(&captured, &options);
        assert_eq!(raster.dimensions(), (2, 2));
        assert!(raster.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }
}
