//! Pipeline orchestration.
//!
//! Stage outputs are threaded explicitly through arguments and return values;
//! the only shared state in the whole pipeline is the publish slot at the far
//! end.

/// The repair-matte-compose-publish sync session.
pub mod sync;
