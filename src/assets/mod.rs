//! Decode/encode boundary between raw image bytes and pipeline images.

pub(crate) mod decode;
