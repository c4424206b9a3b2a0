//! Buffered-handle backend: line-by-line reads, buffered writes

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::codec;
use crate::config::settings::Settings;
use crate::config::store::StoreError;

pub fn load(path: &Path, settings: &mut Settings) -> Result<(), StoreError> {
    let file = File::open(path).map_err(|e| StoreError::unavailable(path, e))?;
    let reader = BufReader::new(file);

    let mut saw_content = false;
    for line in reader.lines() {
        let line = line.map_err(|e| StoreError::unavailable(path, e))?;
        saw_content = true;
        codec::apply_line(&line, settings);
    }
    if !saw_content {
        return Err(StoreError::empty(path));
    }
    Ok(())
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::write_failed(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(codec::encode(settings).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| StoreError::write_failed(path, e))
}
