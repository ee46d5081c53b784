use image::RgbImage;

use crate::effects::blur::gaussian_blur;
use crate::foundation::error::{HoloprismError, HoloprismResult};
use crate::foundation::math::mul_div255_u8;
use crate::mask::authored::Mask;

/// Kernel radius of the demo-mode masked blur (a 15x15 kernel).
pub const DEMO_BLUR_RADIUS: u32 = 7;
/// Sigma of the demo-mode masked blur.
pub const DEMO_BLUR_SIGMA: f32 = 2.6;
/// Kernel radius of the whole-image fallback blur.
pub const FALLBACK_BLUR_RADIUS: u32 = 6;
/// Sigma of the whole-image fallback blur.
pub const FALLBACK_BLUR_SIGMA: f32 = 3.0;

/// A repair backend: consumes the photo and its mask, returns the repaired
/// photo or a failure the chain can fall through.
///
/// Remote object-removal services implement this over their own transport;
/// the built-in tiers are local and deterministic.
pub trait InpaintBackend {
    /// Short stable tier name, used in warnings and outcomes.
    fn name(&self) -> &'static str;

    /// Repair the masked region of `photo`.
    fn inpaint(&self, photo: &RgbImage, mask: &Mask) -> HoloprismResult<RgbImage>;
}

/// Demo-mode repair: blend the photo with a blurred copy of itself, weighted
/// per pixel by the mask, so flagged regions smooth over while untouched
/// pixels pass through bit-identical.
#[derive(Clone, Copy, Debug)]
pub struct MaskedBlurInpaint {
    /// Blur kernel radius.
    pub radius: u32,
    /// Blur sigma.
    pub sigma: f32,
}

impl Default for MaskedBlurInpaint {
    fn default() -> Self {
        Self {
            radius: DEMO_BLUR_RADIUS,
            sigma: DEMO_BLUR_SIGMA,
        }
    }
}

impl InpaintBackend for MaskedBlurInpaint {
    fn name(&self) -> &'static str {
        "masked-blur"
    }

    fn inpaint(&self, photo: &RgbImage, mask: &Mask) -> HoloprismResult<RgbImage> {
        let (w, h) = photo.dimensions();
        if mask.width() != w || mask.height() != h {
            return Err(HoloprismError::validation(format!(
                "mask {}x{} does not match photo {w}x{h}",
                mask.width(),
                mask.height()
            )));
        }

        let blurred = gaussian_blur(photo.as_raw(), w, h, 3, self.radius, self.sigma)?;
        let mut out = photo.as_raw().clone();
        for (i, m) in mask.as_gray().pixels().enumerate() {
            let weight = u16::from(m.0[0]);
            if weight == 0 {
                continue;
            }
            let inv = 255 - weight;
            let base = i * 3;
            for c in 0..3 {
                out[base + c] = mul_div255_u8(u16::from(out[base + c]), inv)
                    .saturating_add(mul_div255_u8(u16::from(blurred[base + c]), weight));
            }
        }

        RgbImage::from_raw(w, h, out)
            .ok_or_else(|| HoloprismError::transform("masked blur buffer size mismatch"))
    }
}

/// Whole-image blur: coarser than the masked tier, but has no way to fail on
/// a mismatched mask.
#[derive(Clone, Copy, Debug)]
pub struct WholeBlurInpaint {
    /// Blur kernel radius.
    pub radius: u32,
    /// Blur sigma.
    pub sigma: f32,
}

impl Default for WholeBlurInpaint {
    fn default() -> Self {
        Self {
            radius: FALLBACK_BLUR_RADIUS,
            sigma: FALLBACK_BLUR_SIGMA,
        }
    }
}

impl InpaintBackend for WholeBlurInpaint {
    fn name(&self) -> &'static str {
        "whole-blur"
    }

    fn inpaint(&self, photo: &RgbImage, _mask: &Mask) -> HoloprismResult<RgbImage> {
        let (w, h) = photo.dimensions();
        let blurred = gaussian_blur(photo.as_raw(), w, h, 3, self.radius, self.sigma)?;
        RgbImage::from_raw(w, h, blurred)
            .ok_or_else(|| HoloprismError::transform("whole blur buffer size mismatch"))
    }
}

/// Last-resort repair: return the photo unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityInpaint;

impl InpaintBackend for IdentityInpaint {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn inpaint(&self, photo: &RgbImage, _mask: &Mask) -> HoloprismResult<RgbImage> {
        Ok(photo.clone())
    }
}

/// Ordered repair tiers, first success wins.
///
/// Every tier failure is logged and the next tier tried; when all tiers fail
/// the photo passes through unchanged, so repair as a whole never fails.
pub struct InpaintChain {
    tiers: Vec<Box<dyn InpaintBackend>>,
}

impl Default for InpaintChain {
    fn default() -> Self {
        Self {
            tiers: vec![
                Box::new(MaskedBlurInpaint::default()),
                Box::new(WholeBlurInpaint::default()),
            ],
        }
    }
}

impl InpaintChain {
    /// Build a chain from explicit tiers.
    pub fn new(tiers: Vec<Box<dyn InpaintBackend>>) -> Self {
        Self { tiers }
    }

    /// Insert a tier ahead of the existing ones (e.g. a remote service in
    /// front of the local fallbacks).
    pub fn prepend(&mut self, tier: Box<dyn InpaintBackend>) {
        self.tiers.insert(0, tier);
    }

    /// Run the tiers in order and return the repaired photo together with the
    /// name of the tier that produced it.
    pub fn repair(&self, photo: &RgbImage, mask: &Mask) -> (RgbImage, &'static str) {
        for tier in &self.tiers {
            match tier.inpaint(photo, mask) {
                Ok(repaired) => return (repaired, tier.name()),
                Err(err) => {
                    tracing::warn!(tier = tier.name(), error = %err, "repair tier failed, falling back");
                }
            }
        }
        (photo.clone(), "passthrough")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/inpaint.rs"]
mod tests;
