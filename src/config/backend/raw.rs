//! Raw-handle backend: lowest-level platform file API
//!
//! Opens the file as a bare platform handle, reads into a buffer sized to
//! the file's byte length in one bulk pass, and writes the fully encoded
//! record in one bulk pass. Buffers and handles are owned values, so every
//! early return frees the buffer and closes the handle.

use std::path::Path;

use crate::config::codec;
use crate::config::settings::Settings;
use crate::config::store::StoreError;

#[cfg(unix)]
pub use unix::{load, save};

#[cfg(windows)]
pub use windows_impl::{load, save};

#[cfg(unix)]
mod unix {
    use super::*;
    use rustix::fs::{Mode, OFlags, fstat, open};
    use rustix::io::{read, write};

    pub fn load(path: &Path, settings: &mut Settings) -> Result<(), StoreError> {
        let fd = open(path, OFlags::RDONLY, Mode::empty())
            .map_err(|e| StoreError::unavailable(path, e.into()))?;
        let stat = fstat(&fd).map_err(|e| StoreError::unavailable(path, e.into()))?;
        let len = usize::try_from(stat.st_size).unwrap_or(0);
        if len == 0 {
            return Err(StoreError::empty(path));
        }

        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let n = read(&fd, &mut buf[filled..])
                .map_err(|e| StoreError::unavailable(path, e.into()))?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        codec::decode_into(&String::from_utf8_lossy(&buf[..filled]), settings);
        Ok(())
    }

    pub fn save(path: &Path, settings: &Settings) -> Result<(), StoreError> {
        let fd = open(
            path,
            OFlags::WRONLY | OFlags::CREATE | OFlags::TRUNC,
            Mode::RUSR | Mode::WUSR | Mode::RGRP | Mode::ROTH,
        )
        .map_err(|e| StoreError::write_failed(path, e.into()))?;

        let data = codec::encode(settings);
        let mut rest = data.as_bytes();
        while !rest.is_empty() {
            let n = write(&fd, rest).map_err(|e| StoreError::write_failed(path, e.into()))?;
            if n == 0 {
                return Err(StoreError::write_failed(
                    path,
                    std::io::Error::from(std::io::ErrorKind::WriteZero),
                ));
            }
            rest = &rest[n..];
        }
        Ok(())
    }
}

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::Foundation::{CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE};
    use windows::Win32::Storage::FileSystem::{
        CREATE_ALWAYS, CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_NONE, FILE_SHARE_READ,
        GetFileSizeEx, OPEN_EXISTING, ReadFile, WriteFile,
    };
    use windows::core::PCWSTR;

    /// Closes the handle when dropped, covering every exit path
    struct HandleGuard(HANDLE);

    impl Drop for HandleGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.0);
            }
        }
    }

    fn wide_path(path: &Path) -> Vec<u16> {
        path.as_os_str().encode_wide().chain(Some(0)).collect()
    }

    fn to_io(err: windows::core::Error) -> std::io::Error {
        std::io::Error::from_raw_os_error(err.code().0)
    }

    pub fn load(path: &Path, settings: &mut Settings) -> Result<(), StoreError> {
        let wide = wide_path(path);
        let handle = unsafe {
            CreateFileW(
                PCWSTR(wide.as_ptr()),
                GENERIC_READ.0,
                FILE_SHARE_READ,
                None,
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                HANDLE::default(),
            )
        }
        .map_err(|e| StoreError::unavailable(path, to_io(e)))?;
        let guard = HandleGuard(handle);

        let mut size = 0i64;
        unsafe { GetFileSizeEx(guard.0, &mut size) }
            .map_err(|e| StoreError::unavailable(path, to_io(e)))?;
        let len = usize::try_from(size).unwrap_or(0);
        if len == 0 {
            return Err(StoreError::empty(path));
        }

        let mut buf = vec![0u8; len];
        let mut bytes_read = 0u32;
        unsafe { ReadFile(guard.0, Some(&mut buf), Some(&mut bytes_read), None) }
            .map_err(|e| StoreError::unavailable(path, to_io(e)))?;

        codec::decode_into(&String::from_utf8_lossy(&buf[..bytes_read as usize]), settings);
        Ok(())
    }

    pub fn save(path: &Path, settings: &Settings) -> Result<(), StoreError> {
        let wide = wide_path(path);
        let handle = unsafe {
            CreateFileW(
                PCWSTR(wide.as_ptr()),
                GENERIC_WRITE.0,
                FILE_SHARE_NONE,
                None,
                CREATE_ALWAYS,
                FILE_ATTRIBUTE_NORMAL,
                HANDLE::default(),
            )
        }
        .map_err(|e| StoreError::write_failed(path, to_io(e)))?;
        let guard = HandleGuard(handle);

        let data = codec::encode(settings);
        let mut bytes_written = 0u32;
        unsafe { WriteFile(guard.0, Some(data.as_bytes()), Some(&mut bytes_written), None) }
            .map_err(|e| StoreError::write_failed(path, to_io(e)))?;
        if bytes_written as usize != data.len() {
            return Err(StoreError::write_failed(
                path,
                std::io::Error::from(std::io::ErrorKind::WriteZero),
            ));
        }
        Ok(())
    }
}
