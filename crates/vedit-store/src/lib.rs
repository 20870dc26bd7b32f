//! Flat-directory artifact store.
//!
//! The filesystem IS the state: every uploaded original and every derived
//! artifact is a file in one directory, keyed by name. This crate provides:
//! - Collision-resistant upload naming (`<uuid>_<filename>`)
//! - The derived-name conventions (`nosilence_`, `.srt`, `final_`)
//! - Name validation (no path traversal)
//! - Atomic writes via staging file + rename, so a reader never observes a
//!   partially-written artifact under its final name

pub mod error;
pub mod naming;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use naming::{rendered_name, sanitize_filename, subtitle_name, trimmed_name, upload_name};
pub use store::ArtifactStore;
