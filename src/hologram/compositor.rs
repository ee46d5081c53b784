use image::{DynamicImage, GenericImageView, Rgb, Rgba, RgbImage, RgbaImage, imageops};
use xxhash_rust::xxh3::Xxh3;

use crate::effects::contrast::boost_contrast;
use crate::foundation::error::{HoloprismError, HoloprismResult};

/// Composite canvas edge length in pixels.
pub const CANVAS_SIZE: u32 = 1024;
/// Upper bound on either prepared-source dimension before compositing.
pub const THUMBNAIL_MAX: u32 = 380;
/// Clearance between pasted faces and the canvas edge, sized for the physical
/// prism's reflection geometry.
pub const EDGE_MARGIN: u32 = 70;
/// Contrast boost applied to the source, compensating for the dimming of
/// alpha compositing and backlighting through the prism.
pub const CONTRAST_FACTOR: f32 = 1.4;
/// Width of the side faces relative to the front face.
pub const SIDE_WIDTH_RATIO: f64 = 0.8;

const FINGERPRINT_SEED: u64 = 0x6a09_e667_f3bc_c908;

/// Fixed-size 1024x1024 opaque-RGB hologram composite.
///
/// Any transparency used during compositing has been consumed before a value
/// of this type exists; the composite never carries an alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HologramComposite {
    rgb: RgbImage,
}

impl HologramComposite {
    /// Solid-black composite, the degraded output for malformed inputs.
    pub fn black() -> Self {
        Self {
            rgb: RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb([0, 0, 0])),
        }
    }

    /// Wrap an RGB image, enforcing the fixed canvas dimensions.
    pub fn from_image(rgb: RgbImage) -> HoloprismResult<Self> {
        let (w, h) = rgb.dimensions();
        if w != CANVAS_SIZE || h != CANVAS_SIZE {
            return Err(HoloprismError::validation(format!(
                "composite must be {CANVAS_SIZE}x{CANVAS_SIZE}, got {w}x{h}"
            )));
        }
        Ok(Self { rgb })
    }

    /// Borrow the composite pixels.
    pub fn image(&self) -> &RgbImage {
        &self.rgb
    }

    /// Consume the composite, yielding its pixels.
    pub fn into_image(self) -> RgbImage {
        self.rgb
    }

    /// Encode the composite as PNG bytes.
    pub fn encode_png(&self) -> HoloprismResult<Vec<u8>> {
        crate::assets::decode::encode_png(&DynamicImage::ImageRgb8(self.rgb.clone()))
    }

    /// Stable content fingerprint over the raw pixel data.
    ///
    /// Two composites with identical pixels always fingerprint identically;
    /// pollers use this to detect "no change" without comparing pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Xxh3::with_seed(FINGERPRINT_SEED);
        h.update(&self.rgb.width().to_le_bytes());
        h.update(&self.rgb.height().to_le_bytes());
        h.update(self.rgb.as_raw());
        h.digest()
    }
}

/// Compose the four-faced prism-net hologram from a processed source image.
///
/// Deterministic and infallible: identical inputs produce byte-identical
/// 1024x1024 opaque-RGB output, and any internal failure (zero-dimension
/// source, degenerate side-face width) degrades to [`HologramComposite::black`]
/// instead of propagating. With `preserve_transparency` each face blends over
/// the black canvas through its own alpha; without it the face rectangle
/// overwrites the canvas.
pub fn compose_hologram(source: &DynamicImage, preserve_transparency: bool) -> HologramComposite {
    match compose_net(source, preserve_transparency) {
        Ok(rgb) => HologramComposite { rgb },
        Err(err) => {
            tracing::warn!(error = %err, "hologram composition degraded to black canvas");
            HologramComposite::black()
        }
    }
}

fn compose_net(source: &DynamicImage, preserve_transparency: bool) -> HoloprismResult<RgbImage> {
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(HoloprismError::validation(
            "source image has zero width or height",
        ));
    }

    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([0, 0, 0, 255]));

    let prepared = thumbnail(boost_contrast(&source.to_rgba8(), CONTRAST_FACTOR));
    let (w, h) = prepared.dimensions();

    let front = &prepared;
    let mirrored = imageops::flip_horizontal(&prepared);
    let back = imageops::rotate180(&mirrored);

    let side_w = (f64::from(w) * SIDE_WIDTH_RATIO).floor() as u32;
    if side_w == 0 {
        return Err(HoloprismError::transform(
            "source too narrow to derive side faces",
        ));
    }
    // Quarter turns swap dimensions exactly, so both side faces come out
    // h wide and side_w tall.
    let left = imageops::rotate90(&imageops::resize(
        &prepared,
        side_w,
        h,
        imageops::FilterType::CatmullRom,
    ));
    let right = imageops::rotate270(&imageops::resize(
        &mirrored,
        side_w,
        h,
        imageops::FilterType::CatmullRom,
    ));

    let canvas_i = i64::from(CANVAS_SIZE);
    let margin = i64::from(EDGE_MARGIN);
    let cx = (canvas_i - i64::from(w)) / 2;
    let sy = (canvas_i - i64::from(left.height())) / 2;

    paste(&mut canvas, front, cx, margin, preserve_transparency);
    paste(
        &mut canvas,
        &back,
        cx,
        canvas_i - i64::from(h) - margin,
        preserve_transparency,
    );
    paste(&mut canvas, &left, margin, sy, preserve_transparency);
    paste(
        &mut canvas,
        &right,
        canvas_i - i64::from(right.width()) - margin,
        sy,
        preserve_transparency,
    );

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Aspect-preserving downscale so neither dimension exceeds
/// [`THUMBNAIL_MAX`]; never upscales.
fn thumbnail(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= THUMBNAIL_MAX && h <= THUMBNAIL_MAX {
        return img;
    }
    let ratio = (f64::from(THUMBNAIL_MAX) / f64::from(w)).min(f64::from(THUMBNAIL_MAX) / f64::from(h));
    let nw = ((f64::from(w) * ratio + 0.5).floor() as u32).max(1);
    let nh = ((f64::from(h) * ratio + 0.5).floor() as u32).max(1);
    imageops::resize(&img, nw, nh, imageops::FilterType::CatmullRom)
}

fn paste(canvas: &mut RgbaImage, face: &RgbaImage, x: i64, y: i64, use_alpha: bool) {
    if use_alpha {
        imageops::overlay(canvas, face, x, y);
    } else {
        imageops::replace(canvas, face, x, y);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hologram/compositor.rs"]
mod tests;
