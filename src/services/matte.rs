use image::{Rgba, RgbaImage, RgbImage};

use crate::foundation::error::HoloprismResult;

/// Channel floor above which a pixel counts as background in the chroma-key
/// fallback.
pub const CHROMA_KEY_THRESHOLD: u8 = 240;

/// A background-matting backend: consumes an opaque photo, returns an RGBA
/// image of the same dimensions with background pixels fully transparent.
pub trait MatteBackend {
    /// Short stable tier name, used in warnings and outcomes.
    fn name(&self) -> &'static str;

    /// Matte the background of `photo` away.
    fn matte(&self, photo: &RgbImage) -> HoloprismResult<RgbaImage>;
}

/// Color-threshold matting for artifacts photographed on a light backdrop:
/// near-white pixels become fully transparent.
#[derive(Clone, Copy, Debug)]
pub struct ChromaKeyMatte {
    /// All three channels must exceed this value for a pixel to be keyed out.
    pub threshold: u8,
}

impl Default for ChromaKeyMatte {
    fn default() -> Self {
        Self {
            threshold: CHROMA_KEY_THRESHOLD,
        }
    }
}

impl MatteBackend for ChromaKeyMatte {
    fn name(&self) -> &'static str {
        "chroma-key"
    }

    fn matte(&self, photo: &RgbImage) -> HoloprismResult<RgbaImage> {
        let (w, h) = photo.dimensions();
        let mut out = RgbaImage::new(w, h);
        for (dst, src) in out.pixels_mut().zip(photo.pixels()) {
            let [r, g, b] = src.0;
            *dst = if r > self.threshold && g > self.threshold && b > self.threshold {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([r, g, b, 255])
            };
        }
        Ok(out)
    }
}

/// Promote a photo to RGBA with full opacity, as if matting did nothing.
pub fn opaque_matte(photo: &RgbImage) -> RgbaImage {
    let (w, h) = photo.dimensions();
    let mut out = RgbaImage::new(w, h);
    for (dst, src) in out.pixels_mut().zip(photo.pixels()) {
        let [r, g, b] = src.0;
        *dst = Rgba([r, g, b, 255]);
    }
    out
}

/// Ordered matting tiers, first success wins; when all tiers fail the photo
/// is promoted to fully opaque RGBA instead.
pub struct MatteChain {
    tiers: Vec<Box<dyn MatteBackend>>,
}

impl Default for MatteChain {
    fn default() -> Self {
        Self {
            tiers: vec![Box::new(ChromaKeyMatte::default())],
        }
    }
}

impl MatteChain {
    /// Build a chain from explicit tiers.
    pub fn new(tiers: Vec<Box<dyn MatteBackend>>) -> Self {
        Self { tiers }
    }

    /// Insert a tier ahead of the existing ones.
    pub fn prepend(&mut self, tier: Box<dyn MatteBackend>) {
        self.tiers.insert(0, tier);
    }

    /// Run the tiers in order and return the matted photo together with the
    /// name of the tier that produced it.
    pub fn matte(&self, photo: &RgbImage) -> (RgbaImage, &'static str) {
        for tier in &self.tiers {
            match tier.matte(photo) {
                Ok(matted) => return (matted, tier.name()),
                Err(err) => {
                    tracing::warn!(tier = tier.name(), error = %err, "matte tier failed, falling back");
                }
            }
        }
        (opaque_matte(photo), "opaque")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/matte.rs"]
mod tests;
