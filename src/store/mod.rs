//! Last-writer-wins publish slot.
//!
//! A slot holds at most one composite; writes overwrite unconditionally and
//! the viewer polls [`slot::SlotStore::peek`] to detect changes cheaply. When
//! multiple producers race, the most recently completed write wins; that is
//! an accepted property of this pipeline, not a bug.

/// Directory-backed slot (PNG plus JSON manifest).
pub mod png_slot;
/// The slot contract and the in-memory store.
pub mod slot;
