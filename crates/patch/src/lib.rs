#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Placeholder patching for relocatable bundles
//!
//! Bundles are built with fixed placeholder byte strings wherever an install
//! path is needed. This crate finds every occurrence of such a placeholder in
//! a file and rewrites it with the real path, either verbatim (text caches)
//! or NUL-padded to the placeholder's width (fields inside executables).
//!
//! Files are never edited in place: the patched content is staged in a
//! temporary file next to the original and renamed over it once complete.

pub mod file;
pub mod placeholder;
pub mod scan;
pub mod staged;

pub use file::{patch_file, scan_file, stage_patch, PatchReport};
pub use placeholder::Placeholder;
pub use scan::{find_occurrences, PaddingMode, PatchTarget, PatchedBytes};
pub use staged::StagedPatch;
