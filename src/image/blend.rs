use super::Color;

/// Performs alpha blending to make `src` appear in front of `dest`.
pub(crate) fn blend_alpha(dest: Color, src: LinearColor) -> Color {
    fn blend_color(dest: f32, src: f32, dest_alpha: f32, src_alpha: f32, result_alpha: f32) -> f32 {
        (src * src_alpha + dest * dest_alpha * (1.0 - src_alpha)) / result_alpha
    }

    let dest = LinearColor::new(dest);

    let result_alpha = src.a() + dest.a() * (1.0 - src.a());
    if result_alpha <= 0.0 {
        return Color::NULL;
    }

    let r = blend_color(dest.r(), src.r(), dest.a(), src.a(), result_alpha);
    let g = blend_color(dest.g(), src.g(), dest.a(), src.a(), result_alpha);
    let b = blend_color(dest.b(), src.b(), dest.a(), src.a(), result_alpha);

    let result = LinearColor([r, g, b, result_alpha]);
    result.to_color()
}

/// A color in linear sRGB space, with channel values in range 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearColor(pub(crate) [f32; 4]);

impl LinearColor {
    pub(crate) fn new(color: Color) -> Self {
        let (r, g, b, a) = (color.r(), color.g(), color.b(), color.a());
        Self([
            srgb_to_linear(f32::from(r) / 255.0),
            srgb_to_linear(f32::from(g) / 255.0),
            srgb_to_linear(f32::from(b) / 255.0),
            f32::from(a) / 255.0,
        ])
    }

    pub(crate) fn to_color(&self) -> Color {
        fn to_u8(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let (r, g, b, a) = (self.r(), self.g(), self.b(), self.a());
        let (r, g, b) = (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b));

        Color([to_u8(r), to_u8(g), to_u8(b), to_u8(a)])
    }

    fn r(&self) -> f32 {
        self.0[0]
    }

    fn g(&self) -> f32 {
        self.0[1]
    }

    fn b(&self) -> f32 {
        self.0[2]
    }

    fn a(&self) -> f32 {
        self.0[3]
    }
}

pub(crate) fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

pub(crate) fn linear_to_srgb(rgb: f32) -> f32 {
    if rgb <= 0.0031308 {
        rgb * 12.92
    } else {
        1.055 * rgb.powf(1.0 / 2.4) - 0.055
    }
}
