//! Mapped-view backend: decode straight from a read-only memory mapping
//!
//! The read path maps the file's full extent and feeds the mapped bytes to
//! the codec without an intermediate read. The write path deliberately uses
//! ordinary file writes; no writable mapping is ever created.

use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use crate::config::codec;
use crate::config::settings::Settings;
use crate::config::store::StoreError;

pub fn load(path: &Path, settings: &mut Settings) -> Result<(), StoreError> {
    let file = File::open(path).map_err(|e| StoreError::unavailable(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| StoreError::unavailable(path, e))?
        .len();
    if len == 0 {
        return Err(StoreError::empty(path));
    }

    // Safety: the mapping is read-only and dropped before `file`, so no view
    // outlives its handle even on early returns.
    let map = unsafe { Mmap::map(&file) }.map_err(|e| StoreError::unavailable(path, e))?;
    codec::decode_into(&String::from_utf8_lossy(&map), settings);
    Ok(())
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), StoreError> {
    fs::write(path, codec::encode(settings)).map_err(|e| StoreError::write_failed(path, e))
}
