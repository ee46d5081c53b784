use image::{Rgba, RgbaImage};

use crate::hologram::compositor::compose_hologram;

use super::*;

fn temp_slot_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("holoprism-slot-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_composite() -> HologramComposite {
    let source = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        32,
        32,
        Rgba([10, 180, 90, 255]),
    ));
    compose_hologram(&source, false)
}

#[test]
fn open_starts_empty() {
    let mut slot = PngFileSlot::open(temp_slot_dir("empty")).unwrap();
    assert!(slot.peek().unwrap().is_none());
    assert!(slot.get().unwrap().is_none());

    // Publishing fills both files.
    slot.put(&sample_composite()).unwrap();
    assert!(slot.dir().join("composite.png").exists());
    assert!(slot.dir().join("slot.json").exists());
}

#[test]
fn composite_roundtrips_through_the_directory() {
    let mut slot = PngFileSlot::open(temp_slot_dir("roundtrip")).unwrap();
    let composite = sample_composite();
    let meta = slot.put(&composite).unwrap();

    let snapshot = slot.get().unwrap().unwrap();
    assert_eq!(snapshot.meta, meta);
    assert_eq!(snapshot.composite, composite);
    assert_eq!(snapshot.composite.fingerprint(), meta.fingerprint);
}

#[test]
fn versions_survive_reopening_the_directory() {
    let dir = temp_slot_dir("reopen");
    let composite = sample_composite();

    let mut slot = PngFileSlot::open(&dir).unwrap();
    assert_eq!(slot.put(&composite).unwrap().version, SlotVersion(1));

    let mut reopened = PngFileSlot::open(&dir).unwrap();
    assert_eq!(reopened.put(&composite).unwrap().version, SlotVersion(2));
}

#[test]
fn corrupt_manifest_restarts_the_counter() {
    let dir = temp_slot_dir("corrupt");
    let mut slot = PngFileSlot::open(&dir).unwrap();
    slot.put(&sample_composite()).unwrap();

    std::fs::write(dir.join("slot.json"), b"{not json").unwrap();
    let meta = slot.put(&sample_composite()).unwrap();
    assert_eq!(meta.version, SlotVersion(1));
}
