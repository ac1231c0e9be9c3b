//! Photo capture results.
//!
//! Driving the camera itself (sessions, device selection, switching between front and back
//! cameras) is left to the platform. This module only describes what a capture yields, and
//! provides a [`CaptureSource`] that reads captures from image files.

use std::path::PathBuf;

use crate::{image::Image, mask::Mask};

/// A photo along with the segmentation mattes delivered for it.
///
/// Any of the mattes may be missing, for example if the camera could not detect a person in the
/// photo or does not support matte delivery.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub photo: Image,
    pub skin: Option<Mask>,
    pub hair: Option<Mask>,
    pub teeth: Option<Mask>,
}

impl CapturedPhoto {
    /// Creates a [`CapturedPhoto`] without any mattes.
    pub fn new(photo: Image) -> Self {
        Self {
            photo,
            skin: None,
            hair: None,
            teeth: None,
        }
    }

    /// Attaches the skin, hair and teeth mattes.
    pub fn with_mattes(mut self, skin: Mask, hair: Mask, teeth: Mask) -> Self {
        self.skin = Some(skin);
        self.hair = Some(hair);
        self.teeth = Some(teeth);
        self
    }

    /// Returns the skin, hair and teeth mattes, but only if all three of them are present.
    pub fn mattes(&self) -> Option<[&Mask; 3]> {
        Some([self.skin.as_ref()?, self.hair.as_ref()?, self.teeth.as_ref()?])
    }
}

/// A source of captured photos.
pub trait CaptureSource {
    /// Captures a photo, blocking until it is available.
    fn capture(&mut self) -> anyhow::Result<CapturedPhoto>;
}

/// A [`CaptureSource`] that loads a photo and its mattes from image files.
///
/// Every call to [`CaptureSource::capture`] reloads the files.
#[derive(Debug, Clone)]
pub struct FileCapture {
    photo: PathBuf,
    skin: Option<PathBuf>,
    hair: Option<PathBuf>,
    teeth: Option<PathBuf>,
}

impl FileCapture {
    /// Creates a [`FileCapture`] that delivers the photo at `photo` without mattes.
    pub fn new(photo: impl Into<PathBuf>) -> Self {
        Self {
            photo: photo.into(),
            skin: None,
            hair: None,
            teeth: None,
        }
    }

    /// Sets the path of the skin matte.
    pub fn skin(mut self, path: impl Into<PathBuf>) -> Self {
        self.skin = Some(path.into());
        self
    }

    /// Sets the path of the hair matte.
    pub fn hair(mut self, path: impl Into<PathBuf>) -> Self {
        self.hair = Some(path.into());
        self
    }

    /// Sets the path of the teeth matte.
    pub fn teeth(mut self, path: impl Into<PathBuf>) -> Self {
        self.teeth = Some(path.into());
        self
    }
}

impl CaptureSource for FileCapture {
    fn capture(&mut self) -> anyhow::Result<CapturedPhoto> {
        let load = |path: &Option<PathBuf>| path.as_ref().map(Mask::load).transpose();

        let captured = CapturedPhoto {
            photo: Image::load(&self.photo)?,
            skin: load(&self.skin)?,
            hair: load(&self.hair)?,
            teeth: load(&self.teeth)?,
        };
        log::debug!(
            "captured {:?} from '{}' (skin: {:?}, hair: {:?}, teeth: {:?})",
            captured.photo,
            self.photo.display(),
            captured.skin,
            captured.hair,
            captured.teeth,
        );
        Ok(captured)
    }
}
