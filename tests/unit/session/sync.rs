use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::store::slot::MemorySlot;

use super::*;

fn artifact_photo() -> RgbImage {
    // Dark artifact on a near-white backdrop, with a scratch to repair.
    let mut photo = RgbImage::from_pixel(32, 32, Rgb([250, 250, 250]));
    for y in 8..24 {
        for x in 8..24 {
            photo.put_pixel(x, y, Rgb([90, 70, 40]));
        }
    }
    photo.put_pixel(16, 16, Rgb([255, 255, 255]));
    photo
}

fn scratch_mask() -> Mask {
    let mut gray = GrayImage::new(32, 32);
    for y in 14..19 {
        for x in 14..19 {
            gray.put_pixel(x, y, Luma([255]));
        }
    }
    Mask::new(gray, 32, 32).unwrap()
}

#[test]
fn matted_sync_publishes_and_names_its_tiers() {
    let session = SyncSession::new(SyncOpts::default());
    let mut slot = MemorySlot::new();

    let outcome = session
        .sync(&artifact_photo(), &scratch_mask(), &mut slot)
        .unwrap();

    assert_eq!(outcome.repair_tier, "masked-blur");
    assert_eq!(outcome.matte_tier, Some("chroma-key"));
    assert_eq!(outcome.meta.version.0, 1);

    let snapshot = slot.get().unwrap().unwrap();
    assert_eq!(snapshot.composite.image().dimensions(), (1024, 1024));
}

#[test]
fn flat_sync_skips_matting() {
    let session = SyncSession::new(SyncOpts {
        style: HologramStyle::FlatArtwork,
        ..SyncOpts::default()
    });
    let mut slot = MemorySlot::new();

    let outcome = session
        .sync(&artifact_photo(), &scratch_mask(), &mut slot)
        .unwrap();
    assert_eq!(outcome.matte_tier, None);
}

#[test]
fn styles_produce_different_composites() {
    let mut matted_slot = MemorySlot::new();
    let mut flat_slot = MemorySlot::new();

    SyncSession::new(SyncOpts::default())
        .sync(&artifact_photo(), &scratch_mask(), &mut matted_slot)
        .unwrap();
    SyncSession::new(SyncOpts {
        style: HologramStyle::FlatArtwork,
        ..SyncOpts::default()
    })
    .sync(&artifact_photo(), &scratch_mask(), &mut flat_slot)
    .unwrap();

    let matted = matted_slot.get().unwrap().unwrap();
    let flat = flat_slot.get().unwrap().unwrap();
    // The matted style keys the white backdrop out, so the face rectangles
    // stay black there; the flat style paints them in.
    assert_ne!(matted.meta.fingerprint, flat.meta.fingerprint);
}

#[test]
fn repeated_sync_bumps_the_slot_version() {
    let session = SyncSession::new(SyncOpts::default());
    let mut slot = MemorySlot::new();

    let first = session
        .sync(&artifact_photo(), &scratch_mask(), &mut slot)
        .unwrap();
    let second = session
        .sync(&artifact_photo(), &scratch_mask(), &mut slot)
        .unwrap();

    assert_eq!(first.meta.version.0 + 1, second.meta.version.0);
    // Identical inputs produce identical pixels.
    assert_eq!(first.meta.fingerprint, second.meta.fingerprint);
}

#[test]
fn mismatched_mask_is_a_validation_error() {
    let session = SyncSession::new(SyncOpts::default());
    let mut slot = MemorySlot::new();

    let small_mask = Mask::new(GrayImage::new(8, 8), 8, 8).unwrap();
    let err = session
        .sync(&artifact_photo(), &small_mask, &mut slot)
        .unwrap_err();
    assert!(matches!(err, HoloprismError::Validation(_)));
}
