//! Colorized segmentation matte compositing.
//!
//! A camera that supports semantic segmentation delivers, alongside the photo itself, a set of
//! low-resolution *mattes*: grayscale masks marking the skin, hair and teeth of the people in the
//! picture. This crate tints each of those regions with its own color and blends the result onto
//! the photo.
//!
//! # Overview
//!
//! - [`composite::tint_with_mask`] tints a single masked region of a background image.
//! - [`composite::composite_mattes`] applies the skin, hair and teeth mattes in that order.
//! - [`develop::develop`] implements the capture-side policy around the compositor: mattes are
//!   applied only if all of them were delivered, and the result is reoriented for display.
//!
//! # Environment Variables
//!
//! [`develop::DevelopOptions::from_env`] reads its configuration from the environment:
//!
//! * `MATTECAM_ALPHA`: weight of the tint colors, between `0.0` and `1.0`. Defaults to `0.5`.
//! * `MATTECAM_ORIENTATION`: orientation correction applied to the developed photo. One of `up`,
//!   `up-mirrored`, `down`, `down-mirrored`, `left-mirrored`, `right`, `right-mirrored` or
//!   `left`. Defaults to `right`, which rotates the photo clockwise by 90°.

use log::LevelFilter;

pub mod capture;
pub mod composite;
pub mod develop;
pub mod error;
pub mod image;
pub mod mask;
pub mod resolution;
pub mod tint;

pub use error::CompositeError;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and mattecam will log at *debug* level. `RUST_LOG` can be used to override
/// this.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
