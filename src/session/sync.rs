use image::{DynamicImage, RgbImage};

use crate::foundation::error::{HoloprismError, HoloprismResult};
use crate::hologram::compositor::compose_hologram;
use crate::mask::authored::Mask;
use crate::services::inpaint::InpaintChain;
use crate::services::matte::{MatteChain, opaque_matte};
use crate::store::slot::{SlotMeta, SlotStore};

/// How the artifact should read under the prism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HologramStyle {
    /// Free-standing object: matte the background away and honor the alpha
    /// channel while pasting faces.
    MattedArtifact,
    /// Flat artwork (painting, scroll): keep the background and paste faces
    /// fully opaque.
    FlatArtwork,
}

/// Options for a [`SyncSession`].
///
/// The default wires the local repair and matte tiers in degradation order;
/// callers with remote services prepend them to the chains.
pub struct SyncOpts {
    /// Rendering style for the composite.
    pub style: HologramStyle,
    /// Repair tiers, tried in order.
    pub inpaint: InpaintChain,
    /// Matting tiers, tried in order (only consulted for
    /// [`HologramStyle::MattedArtifact`]).
    pub matte: MatteChain,
}

impl Default for SyncOpts {
    fn default() -> Self {
        Self {
            style: HologramStyle::MattedArtifact,
            inpaint: InpaintChain::default(),
            matte: MatteChain::default(),
        }
    }
}

/// What a sync produced: the published manifest and which tier actually
/// handled each degradable stage (surfaced to the user as non-blocking
/// notices).
#[derive(Clone, Copy, Debug)]
pub struct SyncOutcome {
    /// Manifest returned by the slot on publish.
    pub meta: SlotMeta,
    /// Repair tier that produced the repaired photo.
    pub repair_tier: &'static str,
    /// Matte tier that produced the alpha matte, when the style mattes.
    pub matte_tier: Option<&'static str>,
}

/// One user-initiated "sync" action: repair, optionally matte, compose, and
/// publish.
///
/// Each invocation is self-contained and synchronous; concurrent sessions
/// publishing into the same slot race last-writer-wins by design.
pub struct SyncSession {
    opts: SyncOpts,
}

impl SyncSession {
    /// Build a session with the given options.
    pub fn new(opts: SyncOpts) -> Self {
        Self { opts }
    }

    /// Run the pipeline once and publish the composite.
    ///
    /// The imaging stages never fail (repair and matte degrade through their
    /// chains, the compositor degrades to a black canvas), so the only
    /// fallible exits are a mask/photo dimension mismatch and slot I/O.
    #[tracing::instrument(skip(self, photo, mask, slot))]
    pub fn sync(
        &self,
        photo: &RgbImage,
        mask: &Mask,
        slot: &mut dyn SlotStore,
    ) -> HoloprismResult<SyncOutcome> {
        let (w, h) = photo.dimensions();
        if mask.width() != w || mask.height() != h {
            return Err(HoloprismError::validation(format!(
                "mask {}x{} does not match photo {w}x{h}",
                mask.width(),
                mask.height()
            )));
        }

        let (repaired, repair_tier) = self.opts.inpaint.repair(photo, mask);

        let (rgba, matte_tier, preserve_transparency) = match self.opts.style {
            HologramStyle::MattedArtifact => {
                let (matted, tier) = self.opts.matte.matte(&repaired);
                (matted, Some(tier), true)
            }
            HologramStyle::FlatArtwork => (opaque_matte(&repaired), None, false),
        };

        let composite = compose_hologram(&DynamicImage::ImageRgba8(rgba), preserve_transparency);
        let meta = slot.put(&composite)?;

        Ok(SyncOutcome {
            meta,
            repair_tier,
            matte_tier,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sync.rs"]
mod tests;
