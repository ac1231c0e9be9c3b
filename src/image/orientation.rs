use std::{fmt, str::FromStr};

use image::imageops;

use super::Image;

/// Describes how the pixel data of a captured image relates to the upright scene.
///
/// The variants and their numbering match the EXIF orientation tag. Cameras usually store photos
/// in sensor orientation and only tag them with the rotation needed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// The image is already upright.
    Up = 1,
    /// Mirrored along the vertical axis.
    UpMirrored = 2,
    /// Rotated by 180°.
    Down = 3,
    /// Mirrored along the horizontal axis.
    DownMirrored = 4,
    /// Mirrored along the main diagonal (top left to bottom right).
    LeftMirrored = 5,
    /// The top row of the stored data is on the right side of the scene; displaying the image
    /// requires a clockwise rotation by 90°.
    ///
    /// This is how back-facing phone cameras held in portrait deliver their photos.
    #[default]
    Right = 6,
    /// Mirrored along the anti-diagonal (top right to bottom left).
    RightMirrored = 7,
    /// Displaying the image requires a counterclockwise rotation by 90°.
    Left = 8,
}

impl Orientation {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::UpMirrored,
        Self::Down,
        Self::DownMirrored,
        Self::LeftMirrored,
        Self::Right,
        Self::RightMirrored,
        Self::Left,
    ];

    /// Returns whether applying this orientation swaps the width and height of an image.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::LeftMirrored | Self::Right | Self::RightMirrored | Self::Left
        )
    }

    fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::UpMirrored => "up-mirrored",
            Self::Down => "down",
            Self::DownMirrored => "down-mirrored",
            Self::LeftMirrored => "left-mirrored",
            Self::Right => "right",
            Self::RightMirrored => "right-mirrored",
            Self::Left => "left",
        }
    }

    pub(super) fn apply(self, image: &Image) -> Image {
        let buf = &image.buf;
        let buf = match self {
            Self::Up => buf.clone(),
            Self::UpMirrored => imageops::flip_horizontal(buf),
            Self::Down => imageops::rotate180(buf),
            Self::DownMirrored => imageops::flip_vertical(buf),
            Self::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(buf)),
            Self::Right => imageops::rotate90(buf),
            Self::RightMirrored => imageops::flip_horizontal(&imageops::rotate270(buf)),
            Self::Left => imageops::rotate270(buf),
        };
        Image { buf }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| anyhow::anyhow!("invalid orientation '{s}'"))
    }
}
