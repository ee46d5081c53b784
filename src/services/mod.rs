//! Collaborator boundaries.
//!
//! The remote inpainting and background-matting services are external; what
//! ships here is the trait seam each one plugs into, deterministic local
//! fallback tiers, and the ordered chains that guarantee the pipeline always
//! gets *some* valid image back.

/// Repair (object removal) backends and their fallback chain.
pub mod inpaint;
/// Background matting backends and their fallback chain.
pub mod matte;
