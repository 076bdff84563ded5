//! Placeholder byte patterns reserved in bundle files at build time

use std::borrow::Cow;
use std::fmt;

/// Marker written into text caches where the resources directory goes
pub const CACHE_MARKER: &str = "PATCHMEPATCHME";

/// Unit repeated to form the interpreter marker
pub const INTERPRETER_UNIT: &str = "DEADBEEF";

/// Number of units in the interpreter marker
pub const INTERPRETER_REPEAT: usize = 32;

/// Width of the interpreter field reserved in the launcher binary
pub const INTERPRETER_LEN: usize = INTERPRETER_UNIT.len() * INTERPRETER_REPEAT;

/// A fixed-length byte pattern searched for by the patcher
#[derive(Clone, PartialEq, Eq)]
pub struct Placeholder {
    bytes: Cow<'static, [u8]>,
}

impl Placeholder {
    /// Arbitrary pattern; emptiness is rejected when a `PatchTarget` is built
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Cow::Owned(bytes.into()),
        }
    }

    /// `PATCHMEPATCHME`
    #[must_use]
    pub fn cache() -> Self {
        Self {
            bytes: Cow::Borrowed(CACHE_MARKER.as_bytes()),
        }
    }

    /// `DEADBEEF` repeated 32 times (256 bytes)
    #[must_use]
    pub fn interpreter() -> Self {
        Self::new(INTERPRETER_UNIT.repeat(INTERPRETER_REPEAT))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The interpreter marker is 256 bytes of noise; show its shape instead
        let text = String::from_utf8_lossy(&self.bytes);
        if self.bytes.len() > 32 {
            let head: String = text.chars().take(16).collect();
            write!(f, "Placeholder({head}…, {} bytes)", self.bytes.len())
        } else {
            write!(f, "Placeholder({text:?})")
        }
    }
}
