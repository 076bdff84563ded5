//! Absolute path of the running executable

use crate::core::PlatformFamily;
use crate::path::BoundedPath;
use reloc_errors::ResolveError;
use tracing::debug;

/// Ask the operating system where the current executable lives.
///
/// Apple platforms use `proc_pidpath`; everything else reads the
/// `/proc/self/exe` link. The result is symlink-resolved by the kernel and
/// checked against the platform path limit.
///
/// # Errors
///
/// Returns `SelfPathUnavailable` with the OS error text when the query fails,
/// or `PathTooLong` if the reported path does not fit the platform limit.
pub fn current_exe_path() -> Result<BoundedPath, ResolveError> {
    let raw = query_self_path()?;
    debug!(path = %raw.display(), "Resolved own executable path");
    BoundedPath::new(raw, PlatformFamily::current().path_limit())
}

#[cfg(target_vendor = "apple")]
fn query_self_path() -> Result<std::path::PathBuf, ResolveError> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut buf = vec![0u8; crate::core::APPLE_PATH_MAX];
    let capacity = u32::try_from(buf.len()).unwrap_or(u32::MAX);

    #[allow(unsafe_code)]
    // SAFETY: the buffer is valid for `capacity` bytes and proc_pidpath writes at most that many
    let written = unsafe { libc::proc_pidpath(libc::getpid(), buf.as_mut_ptr().cast(), capacity) };

    let len = usize::try_from(written).unwrap_or(0);
    if len == 0 {
        return Err(ResolveError::SelfPathUnavailable {
            mechanism: "proc_pidpath".to_string(),
            message: std::io::Error::last_os_error().to_string(),
        });
    }

    // Only the reported length is meaningful; a full buffer has no NUL after it
    buf.truncate(len.min(buf.len()));
    Ok(OsString::from_vec(buf).into())
}

#[cfg(not(target_vendor = "apple"))]
fn query_self_path() -> Result<std::path::PathBuf, ResolveError> {
    const SELF_LINK: &str = "/proc/self/exe";

    std::fs::read_link(SELF_LINK).map_err(|e| ResolveError::SelfPathUnavailable {
        mechanism: format!("readlink {SELF_LINK}"),
        message: e.to_string(),
    })
}
