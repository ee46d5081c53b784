//! Mask intake from the authoring collaborator.
//!
//! The drawing surface itself is out of scope; this module turns whatever it
//! produced (an RGBA stroke overlay authored against a scaled-down preview, or
//! a plain grayscale image) into a validated [`authored::Mask`] aligned to the
//! source photo's pixel grid.

/// The validated repair mask and its intake conventions.
pub mod authored;
