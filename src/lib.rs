//! Holoprism renders a "pseudo-3D hologram" illusion from a single 2D image.
//!
//! The core is a deterministic compositor: four transformed copies of an
//! artifact photograph (front, mirrored back, two quarter-turned sides) are
//! pasted onto a black 1024x1024 canvas so that, displayed under a reflective
//! pyramid prism, the viewer perceives a rotating 3D object.
//!
//! Around the compositor sits a small restoration pipeline:
//!
//! - Build a [`Mask`] from the authoring surface's overlay
//! - Repair the flagged region through an [`InpaintChain`] of fallback tiers
//! - Optionally matte the background away through a [`MatteChain`]
//! - Compose the hologram with [`compose_hologram`]
//! - Publish into a last-writer-wins [`SlotStore`] that a viewer polls
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;

/// Hologram compositing (the prism-net layout).
pub mod hologram;
/// Mask intake from the authoring collaborator.
pub mod mask;
/// Pipeline orchestration sessions.
pub mod session;
/// Collaborator boundaries with local fallback tiers.
pub mod services;
/// Last-writer-wins publish slot.
pub mod store;

pub use crate::assets::decode::{decode_image, encode_png};
pub use crate::foundation::error::{HoloprismError, HoloprismResult};

pub use crate::hologram::compositor::{HologramComposite, compose_hologram};
pub use crate::mask::authored::Mask;
pub use crate::services::inpaint::{
    IdentityInpaint, InpaintBackend, InpaintChain, MaskedBlurInpaint, WholeBlurInpaint,
};
pub use crate::services::matte::{ChromaKeyMatte, MatteBackend, MatteChain, opaque_matte};
pub use crate::session::sync::{HologramStyle, SyncOpts, SyncOutcome, SyncSession};
pub use crate::store::png_slot::PngFileSlot;
pub use crate::store::slot::{MemorySlot, SlotMeta, SlotSnapshot, SlotStore, SlotVersion};
