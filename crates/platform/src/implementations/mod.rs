//! Concrete bundle layouts

pub mod apple;
pub mod flat;
pub mod launch;

pub use apple::AppleBundleLayout;
pub use flat::FlatLayout;
pub use launch::LaunchLayout;
