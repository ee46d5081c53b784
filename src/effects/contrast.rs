use image::RgbaImage;

use crate::foundation::math::rec601_luma;

/// Mean-luminance contrast enhancement.
///
/// Computes the image's mean BT.601 luma (rounded), then extrapolates every
/// RGB channel away from that mean by `factor`. `factor == 1.0` is the
/// identity, values above 1.0 boost contrast. Alpha is preserved untouched.
pub(crate) fn boost_contrast(img: &RgbaImage, factor: f32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let pixel_count = (width as u64) * (height as u64);
    if pixel_count == 0 {
        return img.clone();
    }

    let mut luma_sum = 0u64;
    for px in img.pixels() {
        luma_sum += u64::from(rec601_luma(px.0[0], px.0[1], px.0[2]));
    }
    let mean = ((luma_sum as f64 / pixel_count as f64) + 0.5).floor() as f32;

    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            let v = mean + (f32::from(px.0[c]) - mean) * factor;
            px.0[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/contrast.rs"]
mod tests;
