use image::{GrayImage, RgbaImage, imageops};

use crate::effects::blur::gaussian_blur;
use crate::foundation::error::{HoloprismError, HoloprismResult};

/// Single-channel repair mask, dimension-locked to its source photo.
///
/// Pixel intensity denotes "this pixel belongs to the region to be repaired":
/// 0 = untouched, 255 = fully flagged, intermediate values are soft edges.
#[derive(Clone, Debug)]
pub struct Mask {
    gray: GrayImage,
}

impl Mask {
    /// Wrap an existing grayscale mask, enforcing that its dimensions equal
    /// the source photo's.
    pub fn new(gray: GrayImage, source_width: u32, source_height: u32) -> HoloprismResult<Self> {
        let (w, h) = gray.dimensions();
        if w == 0 || h == 0 {
            return Err(HoloprismError::validation("mask has zero width or height"));
        }
        if w != source_width || h != source_height {
            return Err(HoloprismError::validation(format!(
                "mask dimensions {w}x{h} do not match source {source_width}x{source_height}"
            )));
        }
        Ok(Self { gray })
    }

    /// Accept a grayscale mask that may have been authored at preview
    /// resolution, resampling it (nearest-neighbor) to the source dimensions.
    pub fn from_grayscale(
        gray: GrayImage,
        source_width: u32,
        source_height: u32,
    ) -> HoloprismResult<Self> {
        let (w, h) = gray.dimensions();
        if w == 0 || h == 0 {
            return Err(HoloprismError::validation("mask has zero width or height"));
        }
        if source_width == 0 || source_height == 0 {
            return Err(HoloprismError::validation(
                "mask source has zero width or height",
            ));
        }
        if w == source_width && h == source_height {
            return Self::new(gray, source_width, source_height);
        }
        let resampled = imageops::resize(
            &gray,
            source_width,
            source_height,
            imageops::FilterType::Nearest,
        );
        Self::new(resampled, source_width, source_height)
    }

    /// Build a mask from the authoring surface's RGBA stroke overlay.
    ///
    /// Any pixel whose red channel is above zero is flagged (255), everything
    /// else is untouched (0); stroke overlays draw in pure red, so the red
    /// channel alone is authoritative. The binary mask is then resampled to
    /// the source dimensions, since strokes are authored against a scaled-down
    /// preview.
    pub fn from_authored_overlay(
        overlay: &RgbaImage,
        source_width: u32,
        source_height: u32,
    ) -> HoloprismResult<Self> {
        let (w, h) = overlay.dimensions();
        if w == 0 || h == 0 {
            return Err(HoloprismError::validation(
                "authoring overlay has zero width or height",
            ));
        }
        let mut gray = GrayImage::new(w, h);
        for (dst, src) in gray.pixels_mut().zip(overlay.pixels()) {
            dst.0[0] = if src.0[0] > 0 { 255 } else { 0 };
        }
        Self::from_grayscale(gray, source_width, source_height)
    }

    /// Mask width in pixels (always equals the source photo's width).
    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    /// Mask height in pixels (always equals the source photo's height).
    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    /// Borrow the underlying grayscale image.
    pub fn as_gray(&self) -> &GrayImage {
        &self.gray
    }

    /// Fraction of pixels flagged at all (intensity above zero), in `0.0..=1.0`.
    pub fn coverage(&self) -> f64 {
        let flagged = self.gray.pixels().filter(|px| px.0[0] > 0).count();
        flagged as f64 / (self.gray.width() as f64 * self.gray.height() as f64)
    }

    /// Gaussian-soften the mask edges before handing it to a repair service.
    ///
    /// Kernel radius is derived from `sigma` (two standard deviations).
    pub fn soften(&self, sigma: f32) -> HoloprismResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(HoloprismError::validation("soften sigma must be > 0"));
        }
        let radius = (sigma * 2.0).ceil() as u32;
        let (w, h) = self.gray.dimensions();
        let blurred = gaussian_blur(self.gray.as_raw(), w, h, 1, radius, sigma)?;
        let gray = GrayImage::from_raw(w, h, blurred)
            .ok_or_else(|| HoloprismError::transform("softened mask buffer size mismatch"))?;
        Self::new(gray, w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/authored.rs"]
mod tests;
