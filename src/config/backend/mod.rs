//! The four storage backends behind [`SettingsStore`](crate::config::store::SettingsStore)
//!
//! Each submodule exposes the same `load`/`save` pair over a `Path`; they
//! differ only in acquisition and release mechanics. The shared codec keeps
//! their on-disk output byte-identical.

pub mod buffered;
pub mod mapped;
pub mod raw;
pub mod stream;
