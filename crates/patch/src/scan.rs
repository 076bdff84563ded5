//! Binary-safe placeholder search and replacement

use crate::placeholder::Placeholder;
use bstr::ByteSlice;
use reloc_errors::PatchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a replacement is laid into the bytes the placeholder occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingMode {
    /// Write the replacement verbatim; the file may grow or shrink.
    /// Only for line-oriented formats that do not care about offsets.
    Exact,
    /// Write the replacement followed by NUL bytes up to the placeholder's
    /// width, keeping every later offset and the file size unchanged.
    /// The replacement must be strictly shorter than the placeholder.
    ZeroPadded,
}

/// One file to patch, with its pattern, replacement and padding mode
///
/// Construction validates the width contract, so a `PatchTarget` that exists
/// can always be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    path: PathBuf,
    placeholder: Placeholder,
    replacement: Vec<u8>,
    mode: PaddingMode,
}

/// Result of applying a target to an in-memory buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedBytes {
    pub bytes: Vec<u8>,
    pub replacements: usize,
}

impl PatchTarget {
    /// Build a target, checking the placeholder and replacement widths
    ///
    /// # Errors
    ///
    /// Returns `EmptyPattern` for an empty placeholder and
    /// `ReplacementTooLong` when `mode` is `ZeroPadded` and the replacement
    /// does not leave at least one byte of padding.
    pub fn new(
        path: impl Into<PathBuf>,
        placeholder: Placeholder,
        replacement: impl Into<Vec<u8>>,
        mode: PaddingMode,
    ) -> Result<Self, PatchError> {
        let path = path.into();
        let replacement = replacement.into();

        if placeholder.is_empty() {
            return Err(PatchError::EmptyPattern {
                path: path.display().to_string(),
            });
        }

        if mode == PaddingMode::ZeroPadded && replacement.len() >= placeholder.len() {
            return Err(PatchError::ReplacementTooLong {
                path: path.display().to_string(),
                replacement_len: replacement.len(),
                pattern_len: placeholder.len(),
            });
        }

        Ok(Self {
            path,
            placeholder,
            replacement,
            mode,
        })
    }

    /// Target whose replacement is a filesystem path
    ///
    /// # Errors
    ///
    /// Same as [`PatchTarget::new`].
    pub fn with_path_replacement(
        path: impl Into<PathBuf>,
        placeholder: Placeholder,
        replacement: &Path,
        mode: PaddingMode,
    ) -> Result<Self, PatchError> {
        Self::new(
            path,
            placeholder,
            replacement.as_os_str().as_encoded_bytes(),
            mode,
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    #[must_use]
    pub fn replacement(&self) -> &[u8] {
        &self.replacement
    }

    #[must_use]
    pub fn mode(&self) -> PaddingMode {
        self.mode
    }

    /// NUL bytes written after each replacement
    #[must_use]
    pub fn padding(&self) -> usize {
        match self.mode {
            PaddingMode::Exact => 0,
            PaddingMode::ZeroPadded => self.placeholder.len() - self.replacement.len(),
        }
    }

    /// Replace every non-overlapping occurrence of the placeholder in `input`
    ///
    /// Bytes outside matches are copied unchanged. Scanning resumes right
    /// after each match, so back-to-back occurrences are all replaced.
    #[must_use]
    pub fn apply(&self, input: &[u8]) -> PatchedBytes {
        let pattern = self.placeholder.as_bytes();
        let positions = find_occurrences(input, pattern);
        if positions.is_empty() {
            return PatchedBytes {
                bytes: input.to_vec(),
                replacements: 0,
            };
        }

        let per_match = self.replacement.len() + self.padding();
        let mut out = Vec::with_capacity(
            input.len() - positions.len() * pattern.len() + positions.len() * per_match,
        );

        let mut cursor = 0;
        for &offset in &positions {
            out.extend_from_slice(&input[cursor..offset]);
            out.extend_from_slice(&self.replacement);
            out.resize(out.len() + self.padding(), 0);
            cursor = offset + pattern.len();
        }
        out.extend_from_slice(&input[cursor..]);

        PatchedBytes {
            bytes: out,
            replacements: positions.len(),
        }
    }
}

/// Byte offsets of every non-overlapping occurrence of `needle` in `haystack`
///
/// NUL bytes are ordinary data here; they never end the scan.
#[must_use]
pub fn find_occurrences(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack.find_iter(needle).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_target(replacement: &str) -> PatchTarget {
        PatchTarget::new(
            "loaders.cache",
            Placeholder::cache(),
            replacement,
            PaddingMode::Exact,
        )
        .unwrap()
    }

    #[test]
    fn finds_adjacent_matches() {
        assert_eq!(find_occurrences(b"abab", b"ab"), vec![0, 2]);
    }

    #[test]
    fn matches_do_not_overlap() {
        assert_eq!(find_occurrences(b"aaaa", b"aa"), vec![0, 2]);
        assert_eq!(find_occurrences(b"aaa", b"aa"), vec![0]);
    }

    #[test]
    fn nul_bytes_do_not_stop_the_scan() {
        let haystack = b"\0\0PATCHMEPATCHME\0tail PATCHMEPATCHME";
        assert_eq!(find_occurrences(haystack, b"PATCHMEPATCHME"), vec![2, 22]);
    }

    #[test]
    fn empty_needle_matches_nothing() {
        assert!(find_occurrences(b"abc", b"").is_empty());
    }

    #[test]
    fn short_haystack() {
        assert!(find_occurrences(b"PATCH", b"PATCHMEPATCHME").is_empty());
        assert!(find_occurrences(b"", b"x").is_empty());
    }

    #[test]
    fn exact_replacement_keeps_surroundings() {
        let patched = cache_target("/opt/app/resources").apply(b"path=PATCHMEPATCHME/extra\n");
        assert_eq!(patched.replacements, 1);
        assert_eq!(patched.bytes, b"path=/opt/app/resources/extra\n");
    }

    #[test]
    fn back_to_back_occurrences_on_one_line() {
        let patched = cache_target("/r").apply(b"PATCHMEPATCHMEPATCHMEPATCHME:x\n");
        assert_eq!(patched.replacements, 2);
        assert_eq!(patched.bytes, b"/r/r:x\n");
    }

    #[test]
    fn zero_padded_keeps_width() {
        let target = PatchTarget::new(
            "why3",
            Placeholder::new("XXXXXXXX"),
            "/ld",
            PaddingMode::ZeroPadded,
        )
        .unwrap();
        let patched = target.apply(b"[XXXXXXXX]");
        assert_eq!(patched.bytes, b"[/ld\0\0\0\0\0]");
        assert_eq!(target.padding(), 5);
    }

    #[test]
    fn zero_padded_requires_strictly_shorter() {
        let err = PatchTarget::new(
            "why3",
            Placeholder::new("XXXX"),
            "/abc",
            PaddingMode::ZeroPadded,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PatchError::ReplacementTooLong {
                replacement_len: 4,
                pattern_len: 4,
                ..
            }
        ));
    }

    #[test]
    fn exact_mode_allows_longer_or_shorter() {
        assert!(PatchTarget::new("f", Placeholder::new("XXXX"), "/a", PaddingMode::Exact).is_ok());
        assert!(
            PatchTarget::new("f", Placeholder::new("XX"), "/abcdef", PaddingMode::Exact).is_ok()
        );
    }

    #[test]
    fn empty_placeholder_rejected() {
        let err =
            PatchTarget::new("f", Placeholder::new(Vec::<u8>::new()), "/a", PaddingMode::Exact).unwrap_err();
        assert!(matches!(err, PatchError::EmptyPattern { .. }));
    }
}
