//! Ordered, best-effort release of device resources.
//!
//! Every resource is released exactly once, dependents before the device and
//! the window last. A failing release is logged and the sequence continues.

mod release;

pub use release::{release_all, take, ReleaseError, ResourceKind, TeardownReport};
