#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations for relocatable bundles
//!
//! This crate sits between the binaries and the specialized crates: it
//! resolves the bundle from an executable path, then either patches the
//! bundle's placeholders (relocation) or derives how to start the real
//! application (launch).

mod context;
mod launch;
mod relocate;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use launch::{plan_launch, LaunchPlan};
pub use relocate::{plan_relocation, relocate};
pub use types::RelocationReport;
