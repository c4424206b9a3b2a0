//! Domain logic and core data structures
//!
//! This module contains pure business logic that is independent
//! of Win32 APIs and platform-specific implementations.

pub mod board;
pub mod color;
pub mod grid;
