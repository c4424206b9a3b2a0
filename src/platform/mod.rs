//! Platform-specific window shell
//!
//! All Win32 interaction lives here. Other targets build without this
//! module; the canvas itself only exists on Windows.

#[cfg(windows)]
pub mod window;
