use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::*;

fn gradient_source(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

/// 64x64 uniform (200,50,50) with an 8px fully transparent border.
fn bordered_source() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 64, |x, y| {
        let border = x < 8 || y < 8 || x >= 56 || y >= 56;
        let alpha = if border { 0 } else { 255 };
        Rgba([200, 50, 50, alpha])
    }))
}

#[test]
fn output_is_always_canvas_sized() {
    let composite = compose_hologram(&gradient_source(123, 77), false);
    assert_eq!(composite.image().dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
}

#[test]
fn identical_inputs_compose_byte_identical() {
    let source = gradient_source(200, 150);
    let a = compose_hologram(&source, true);
    let b = compose_hologram(&source, true);
    assert_eq!(a.image().as_raw(), b.image().as_raw());
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn zero_size_source_degrades_to_black() {
    let source = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
    assert_eq!(compose_hologram(&source, false), HologramComposite::black());
}

#[test]
fn one_pixel_source_degrades_to_black() {
    // A 1px-wide source has no side face to derive (80% of 1 rounds to 0).
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255])));
    assert_eq!(compose_hologram(&source, false), HologramComposite::black());
}

#[test]
fn faces_land_inside_the_margins() {
    // 300x200 uniform (100,150,200): mean luma 140, so the contrast pass
    // turns every pixel into (84,154,224).
    let source =
        DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, Rgb([100, 150, 200])));
    let out = compose_hologram(&source, false);
    let img = out.image();
    let face = Rgb([84, 154, 224]);

    // front: 300x200 at (362, 70); back mirrors it at (362, 754).
    assert_eq!(img.get_pixel(362, 70), &face);
    assert_eq!(img.get_pixel(512, 170), &face);
    assert_eq!(img.get_pixel(512, 754), &face);

    // side faces: 200x240 at (70, 392) and (754, 392).
    assert_ne!(img.get_pixel(80, 500), &Rgb([0, 0, 0]));
    assert_ne!(img.get_pixel(900, 500), &Rgb([0, 0, 0]));

    // margins and corners stay black.
    assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(1023, 1023), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(361, 70), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(512, 69), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(512, 954), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(960, 500), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(69, 500), &Rgb([0, 0, 0]));
}

#[test]
fn preserved_transparency_keeps_canvas_black_under_clear_pixels() {
    let out = compose_hologram(&bordered_source(), true);
    let img = out.image();

    // front lands at (480, 70); its transparent border leaves the canvas
    // untouched while the opaque center shows the contrast-boosted color.
    assert_eq!(img.get_pixel(480, 70), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(512, 102), &Rgb([242, 32, 32]));

    // left face corner at (70, 486) maps into the transparent border too.
    assert_eq!(img.get_pixel(70, 486), &Rgb([0, 0, 0]));
}

#[test]
fn opaque_paste_overwrites_canvas_under_clear_pixels() {
    let out = compose_hologram(&bordered_source(), false);
    let img = out.image();

    // The same border pixel is overwritten by the face's raw color once the
    // alpha channel is ignored.
    assert_eq!(img.get_pixel(480, 70), &Rgb([242, 32, 32]));
}

#[test]
fn black_fallback_and_composites_fingerprint_apart() {
    let black = HologramComposite::black();
    assert_eq!(black.fingerprint(), HologramComposite::black().fingerprint());

    let composed = compose_hologram(&gradient_source(100, 100), false);
    assert_ne!(black.fingerprint(), composed.fingerprint());
}

#[test]
fn from_image_enforces_canvas_dimensions() {
    assert!(HologramComposite::from_image(RgbImage::new(10, 10)).is_err());
    assert!(HologramComposite::from_image(RgbImage::new(CANVAS_SIZE, CANVAS_SIZE)).is_ok());
}
