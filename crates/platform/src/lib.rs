#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Platform abstraction layer for locating an installed bundle.
//!
//! This crate provides a unified interface for the platform-specific parts of
//! bundle relocation:
//! - Querying the absolute path of the running executable
//! - Building paths without silent truncation (`BoundedPath`)
//! - Directory layouts that turn an executable path into the bundle root and
//!   resources directory, and the environment the launcher derives from them
//!
//! Every layout variant is compiled on every host; `PlatformFamily::current`
//! only decides which one is the default.

pub mod core;
pub mod implementations;
pub mod path;
pub mod self_path;

pub use crate::core::{BundleLayout, BundlePaths, EnvVar, PlatformFamily};
pub use implementations::{AppleBundleLayout, FlatLayout, LaunchLayout};
pub use path::BoundedPath;
pub use self_path::current_exe_path;
