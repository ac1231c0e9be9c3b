//! Matte compositing.
//!
//! Every matte is applied with [`tint_with_mask`]: the mask is scaled to the height of the
//! background, and every background pixel it covers is blended towards a solid tint color,
//! weighted by the mask. Layering several mattes feeds the output of each step in as the
//! background of the next, so the order of the layers matters wherever their masks overlap.

use crate::{
    error::CompositeError,
    image::{blend_alpha, srgb_to_linear, Image, LinearColor},
    mask::{Mask, MatteType},
    tint::TintColor,
};

/// Tints the region of `background` selected by `mask` with `tint`.
///
/// `mask` is uniformly scaled to the height of `background` first. Each pixel is then blended
/// towards the tint color with a weight of `mask coverage * tint alpha`: fully masked pixels take
/// on the tint color when its alpha is 1.0, unmasked pixels stay untouched. Background pixels
/// that are not covered by the scaled mask (because its aspect ratio differs from the
/// background's) also stay untouched.
///
/// The returned image always has the size of `background`. Only the part of the scaled mask that
/// overlaps `background` is ever evaluated.
pub fn tint_with_mask(
    mask: &Mask,
    background: &Image,
    tint: TintColor,
) -> Result<Image, CompositeError> {
    if background.resolution().is_empty() {
        return Err(CompositeError::EmptyImage(background.resolution()));
    }

    if mask.resolution().aspect_ratio() != background.resolution().aspect_ratio() {
        log::debug!(
            "{:?} does not match the aspect ratio of the {:?}, only part of it will be tinted",
            mask,
            background
        );
    }

    let mask = mask.scale_to_height(background.height())?;
    let [r, g, b] = [tint.r(), tint.g(), tint.b()].map(srgb_to_linear);

    let mut out = background.clone();
    for y in 0..background.height() {
        for x in 0..mask.width().min(background.width()) {
            let weight = mask.coverage(x, y) * tint.alpha();
            if weight <= 0.0 {
                continue;
            }

            let dest = out.get(x, y);
            out.set(x, y, blend_alpha(dest, LinearColor([r, g, b, weight])));
        }
    }
    Ok(out)
}

/// A mask together with the tint its region is colored in.
#[derive(Debug, Clone)]
pub struct MatteLayer {
    pub mask: Mask,
    pub tint: TintColor,
}

impl MatteLayer {
    pub fn new(mask: Mask, tint: TintColor) -> Self {
        Self { mask, tint }
    }
}

/// An ordered stack of [`MatteLayer`]s that are applied to a photo one after another.
///
/// Layers added later are blended on top of the result of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    layers: Vec<MatteLayer>,
}

impl Compositor {
    /// Creates a [`Compositor`] without any layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer on top of all previously added layers.
    pub fn layer(mut self, mask: Mask, tint: TintColor) -> Self {
        self.layers.push(MatteLayer::new(mask, tint));
        self
    }

    /// Returns the layers of this [`Compositor`], bottom to top.
    pub fn layers(&self) -> &[MatteLayer] {
        &self.layers
    }

    /// Applies all layers to `photo`, bottom to top.
    ///
    /// With no layers, this returns a copy of `photo`.
    pub fn composite(&self, photo: &Image) -> Result<Image, CompositeError> {
        let mut out = photo.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            log::trace!(
                "applying layer {}: {:?} with {:?} onto {:?}",
                i,
                layer.mask,
                layer.tint,
                out
            );
            out = tint_with_mask(&layer.mask, &out, layer.tint)?;
        }
        Ok(out)
    }
}

/// Composites the skin, hair and teeth mattes of a photo, in that order.
///
/// Skin is tinted red, hair green and teeth blue, all with the same `alpha` weight.
///
/// Returns [`CompositeError::AlphaOutOfRange`] if `alpha` is not between 0.0 and 1.0.
pub fn composite_mattes(
    photo: &Image,
    skin: &Mask,
    hair: &Mask,
    teeth: &Mask,
    alpha: f32,
) -> Result<Image, CompositeError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(CompositeError::AlphaOutOfRange(alpha));
    }

    let mut compositor = Compositor::new();
    for (matte, mask) in MatteType::ALL.into_iter().zip([skin, hair, teeth]) {
        compositor = compositor.layer(mask.clone(), matte.tint(alpha)?);
    }

    log::debug!("compositing {:?} with alpha {}", photo, alpha);
    compositor.composite(photo)
}

#[cfg(test)]
mod tests {
    use crate::image::Color;

    use super::*;

    #[test]
    fn unit_mask_replaces_with_tint() {
        let background = Image::filled(4, 4, Color::from_rgb8(10, 200, 30));
        let mask = Mask::filled(2, 2, 1.0);
        let out = tint_with_mask(&mask, &background, TintColor::blue(1.0).unwrap()).unwrap();
        assert!(out.pixels().all(|c| c == Color::BLUE));
    }

    #[test]
    fn wide_background_keeps_uncovered_pixels() {
        // The 2x2 mask only covers the left 4x4 square of the 8x4 background.
        let background = Image::filled(8, 4, Color::WHITE);
        let mask = Mask::filled(2, 2, 1.0);
        let out = tint_with_mask(&mask, &background, TintColor::red(1.0).unwrap()).unwrap();
        assert_eq!(out.resolution(), background.resolution());
        for y in 0..4 {
            for x in 0..8 {
                let expected = if x < 4 { Color::RED } else { Color::WHITE };
                assert_eq!(out.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn tall_mask_is_cropped() {
        // 1x2 mask scaled to height 1 becomes 1x1 (0.5 rounds to 1 pixel wide).
        let background = Image::filled(3, 1, Color::BLACK);
        let mask = Mask::filled(1, 2, 1.0);
        let out = tint_with_mask(&mask, &background, TintColor::green(1.0).unwrap()).unwrap();
        assert_eq!(out.get(0, 0), Color::GREEN);
        assert_eq!(out.get(1, 0), Color::BLACK);
        assert_eq!(out.get(2, 0), Color::BLACK);
    }

    #[test]
    fn wide_mask_on_tall_background() {
        let background = Image::filled(1, 3000, Color::BLACK);
        let mask = Mask::from_fn(3000, 1, |x, _| if x == 0 { 1.0 } else { 0.0 });
        let out = tint_with_mask(&mask, &background, TintColor::red(1.0).unwrap()).unwrap();
        assert_eq!(out.resolution(), background.resolution());
        assert!(out.pixels().all(|c| c == Color::RED));
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        let tint = TintColor::red(1.0).unwrap();
        assert_eq!(
            tint_with_mask(&Mask::filled(0, 0, 1.0), &Image::new(2, 2), tint),
            Err(CompositeError::EmptyMask((0, 0).into()))
        );
        assert_eq!(
            tint_with_mask(&Mask::filled(2, 2, 1.0), &Image::new(2, 0), tint),
            Err(CompositeError::EmptyImage((2, 0).into()))
        );
    }

    #[test]
    fn empty_compositor_is_identity() {
        let photo = Image::filled(3, 2, Color::CYAN);
        let compositor = Compositor::new();
        assert!(compositor.layers().is_empty());
        let out = compositor.composite(&photo).unwrap();
        assert_eq!(out, photo);
    }

    #[test]
    fn later_layers_on_top() {
        let photo = Image::filled(2, 2, Color::BLACK);
        let out = Compositor::new()
            .layer(Mask::filled(2, 2, 1.0), TintColor::red(1.0).unwrap())
            .layer(Mask::filled(1, 1, 1.0), TintColor::green(1.0).unwrap())
            .composite(&photo)
            .unwrap();
        assert!(out.pixels().all(|c| c == Color::GREEN));

        let out = Compositor::new()
            .layer(Mask::filled(1, 1, 1.0), TintColor::green(1.0).unwrap())
            .layer(Mask::filled(2, 2, 1.0), TintColor::red(1.0).unwrap())
            .composite(&photo)
            .unwrap();
        assert!(out.pixels().all(|c| c == Color::RED));
    }

    #[test]
    fn mattes_layered_skin_hair_teeth() {
        let photo = Image::filled(4, 4, Color::WHITE);
        let full = Mask::filled(2, 2, 1.0);
        let none = Mask::filled(2, 2, 0.0);

        let out = composite_mattes(&photo, &full, &full, &full, 1.0).unwrap();
        assert!(out.pixels().all(|c| c == Color::BLUE));

        let out = composite_mattes(&photo, &full, &full, &none, 1.0).unwrap();
        assert!(out.pixels().all(|c| c == Color::GREEN));

        let out = composite_mattes(&photo, &full, &none, &none, 1.0).unwrap();
        assert!(out.pixels().all(|c| c == Color::RED));
    }

    #[test]
    fn alpha_range() {
        let photo = Image::filled(2, 2, Color::WHITE);
        let mask = Mask::filled(1, 1, 1.0);
        for alpha in [1.5, -0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                composite_mattes(&photo, &mask, &mask, &mask, alpha),
                Err(CompositeError::AlphaOutOfRange(_))
            ));
        }
        for alpha in [0.0, 1.0] {
            assert!(composite_mattes(&photo, &mask, &mask, &mask, alpha).is_ok());
        }
    }
}
