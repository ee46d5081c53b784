use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::foundation::error::{HoloprismError, HoloprismResult};

/// Decode raster image bytes (any format `image` supports) into a
/// [`DynamicImage`], rejecting zero-dimension results.
pub fn decode_image(bytes: &[u8]) -> HoloprismResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(HoloprismError::validation(
            "decoded image has zero width or height",
        ));
    }
    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> HoloprismResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png to memory")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
