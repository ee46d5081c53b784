use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{HoloprismError, HoloprismResult};
use crate::hologram::compositor::HologramComposite;
use crate::store::slot::{SlotMeta, SlotSnapshot, SlotStore, SlotVersion};

const COMPOSITE_FILE: &str = "composite.png";
const MANIFEST_FILE: &str = "slot.json";

/// Directory-backed slot: the composite as a PNG plus a JSON manifest.
///
/// Each file is written to a temporary name and renamed into place, so a
/// racing reader never observes a half-written file. The slot as a whole
/// stays last-writer-wins: concurrent producers overwrite each other and the
/// most recently completed write survives.
pub struct PngFileSlot {
    dir: PathBuf,
}

impl PngFileSlot {
    /// Open (creating if needed) a slot directory.
    pub fn open(dir: impl Into<PathBuf>) -> HoloprismResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create slot directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// The slot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn composite_path(&self) -> PathBuf {
        self.dir.join(COMPOSITE_FILE)
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    fn read_manifest(&self) -> HoloprismResult<Option<SlotMeta>> {
        let path = self.manifest_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("read slot manifest '{}'", path.display()))
                    .into());
            }
        };
        let meta: SlotMeta = serde_json::from_slice(&bytes).map_err(|e| {
            HoloprismError::serde(format!("parse slot manifest '{}': {e}", path.display()))
        })?;
        Ok(Some(meta))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> HoloprismResult<()> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).with_context(|| format!("write '{}'", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("rename '{}' into place", tmp.display()))?;
        Ok(())
    }
}

impl SlotStore for PngFileSlot {
    fn put(&mut self, composite: &HologramComposite) -> HoloprismResult<SlotMeta> {
        let next_version = match self.read_manifest() {
            Ok(Some(meta)) => meta.version.0 + 1,
            Ok(None) => 1,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable slot manifest, restarting version counter");
                1
            }
        };

        let (width, height) = composite.image().dimensions();
        let meta = SlotMeta {
            version: SlotVersion(next_version),
            fingerprint: composite.fingerprint(),
            width,
            height,
        };

        let png = composite.encode_png()?;
        let manifest = serde_json::to_vec_pretty(&meta)
            .map_err(|e| HoloprismError::serde(format!("encode slot manifest: {e}")))?;

        // Pixels land before the manifest that announces them.
        self.write_atomic(&self.composite_path(), &png)?;
        self.write_atomic(&self.manifest_path(), &manifest)?;
        Ok(meta)
    }

    fn peek(&self) -> HoloprismResult<Option<SlotMeta>> {
        self.read_manifest()
    }

    fn get(&self) -> HoloprismResult<Option<SlotSnapshot>> {
        let Some(meta) = self.read_manifest()? else {
            return Ok(None);
        };

        let path = self.composite_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("read slot composite '{}'", path.display()))
                    .into());
            }
        };

        let rgb = crate::assets::decode::decode_image(&bytes)?.to_rgb8();
        let composite = HologramComposite::from_image(rgb)?;
        if composite.fingerprint() != meta.fingerprint {
            tracing::warn!(
                version = meta.version.0,
                "slot manifest and composite disagree (concurrent writer), returning newest pixels"
            );
        }
        Ok(Some(SlotSnapshot { meta, composite }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/png_slot.rs"]
mod tests;
