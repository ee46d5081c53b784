use crate::foundation::error::HoloprismResult;
use crate::hologram::compositor::HologramComposite;

/// Monotonically increasing publish counter, scoped to one slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotVersion(pub u64);

/// Cheap poll surface for a published composite.
///
/// A poller that remembers the last `version` it saw can detect "no change"
/// from the manifest alone, without re-decoding pixels; `fingerprint`
/// additionally identifies the content independent of publish count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotMeta {
    /// Publish counter, increasing by one per successful `put`.
    pub version: SlotVersion,
    /// Content fingerprint of the composite pixels.
    pub fingerprint: u64,
    /// Composite width in pixels.
    pub width: u32,
    /// Composite height in pixels.
    pub height: u32,
}

/// A published composite together with its manifest.
#[derive(Clone, Debug)]
pub struct SlotSnapshot {
    /// Manifest current at read time.
    pub meta: SlotMeta,
    /// The published composite.
    pub composite: HologramComposite,
}

/// Single-slot, last-writer-wins composite store.
pub trait SlotStore {
    /// Publish a composite, unconditionally overwriting the previous value.
    fn put(&mut self, composite: &HologramComposite) -> HoloprismResult<SlotMeta>;

    /// Read the current manifest without touching pixel data, or `None` when
    /// nothing has been published yet.
    fn peek(&self) -> HoloprismResult<Option<SlotMeta>>;

    /// Read the current composite, or `None` when nothing has been published
    /// yet (the viewer renders a distinct "waiting" state on `None`).
    fn get(&self) -> HoloprismResult<Option<SlotSnapshot>>;
}

/// In-memory slot for tests and single-process pipelines.
#[derive(Default)]
pub struct MemorySlot {
    state: Option<SlotSnapshot>,
    last_version: u64,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlot {
    fn put(&mut self, composite: &HologramComposite) -> HoloprismResult<SlotMeta> {
        self.last_version += 1;
        let (width, height) = composite.image().dimensions();
        let meta = SlotMeta {
            version: SlotVersion(self.last_version),
            fingerprint: composite.fingerprint(),
            width,
            height,
        };
        self.state = Some(SlotSnapshot {
            meta,
            composite: composite.clone(),
        });
        Ok(meta)
    }

    fn peek(&self) -> HoloprismResult<Option<SlotMeta>> {
        Ok(self.state.as_ref().map(|s| s.meta))
    }

    fn get(&self) -> HoloprismResult<Option<SlotSnapshot>> {
        Ok(self.state.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/slot.rs"]
mod tests;
