//! Length-checked path construction
//!
//! Every concatenation is validated against the platform path limit and fails
//! with `ResolveError::PathTooLong` instead of truncating.

use reloc_errors::ResolveError;
use std::fmt;
use std::path::{Path, PathBuf};

/// An owned path whose byte length never exceeds `limit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedPath {
    inner: PathBuf,
    limit: usize,
}

impl BoundedPath {
    /// Wrap `path`, failing if it is already over `limit` bytes
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if the path does not fit.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Result<Self, ResolveError> {
        let inner = path.into();
        check_len(&inner, limit)?;
        Ok(Self { inner, limit })
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.inner
    }

    /// Append a relative component (or several, `a/b/c`)
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if the result does not fit. `self` is left
    /// unchanged in that case.
    pub fn push(&mut self, component: impl AsRef<Path>) -> Result<(), ResolveError> {
        let joined = self.inner.join(component);
        check_len(&joined, self.limit)?;
        self.inner = joined;
        Ok(())
    }

    /// Non-mutating variant of [`BoundedPath::push`]
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if the result does not fit.
    pub fn join(&self, component: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let mut joined = self.clone();
        joined.push(component)?;
        Ok(joined)
    }

    /// Strip `levels` trailing components, like `dirname` applied repeatedly
    ///
    /// # Errors
    ///
    /// Returns `NoParent` when the path runs out of components first.
    pub fn ascend(&self, levels: usize) -> Result<Self, ResolveError> {
        let mut current = self.inner.as_path();
        for _ in 0..levels {
            current = current.parent().ok_or_else(|| ResolveError::NoParent {
                path: self.inner.display().to_string(),
                levels,
            })?;
        }
        Ok(Self {
            inner: current.to_path_buf(),
            limit: self.limit,
        })
    }
}

impl AsRef<Path> for BoundedPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl fmt::Display for BoundedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

fn check_len(path: &Path, limit: usize) -> Result<(), ResolveError> {
    // The limit counts the trailing NUL a C consumer of this path would need
    if path.as_os_str().len() >= limit {
        return Err(ResolveError::PathTooLong {
            path: path.display().to_string(),
            limit,
        });
    }
    Ok(())
}
