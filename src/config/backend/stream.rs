//! Typed-stream backend: whole-content read, formatted write
//!
//! Both handles are scoped to their function body; release happens when they
//! go out of scope, on success and error paths alike.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::config::codec;
use crate::config::settings::Settings;
use crate::config::store::StoreError;

pub fn load(path: &Path, settings: &mut Settings) -> Result<(), StoreError> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::unavailable(path, e))?;
    if contents.is_empty() {
        return Err(StoreError::empty(path));
    }
    codec::decode_into(&contents, settings);
    Ok(())
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), StoreError> {
    let mut file = File::create(path).map_err(|e| StoreError::write_failed(path, e))?;
    write!(file, "{}", codec::encode(settings)).map_err(|e| StoreError::write_failed(path, e))
}
