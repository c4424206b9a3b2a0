//! Settings persistence with selectable storage backends
//!
//! Four backends share the load/save contract and the codec's wire format,
//! differing only in the I/O primitive used to reach the file. The method is
//! chosen once at startup from a command-line index and used symmetrically
//! for the startup load and the shutdown save.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::backend;
use crate::config::settings::Settings;

/// Name of the backing file, resolved against the working directory
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Errors surfaced by the storage backends
///
/// Load-side errors never reach the shell; [`SettingsStore::load`] absorbs
/// them by resetting the record to its defaults. Save-side errors are
/// returned for the caller to report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open settings file {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is empty")]
    Empty { path: PathBuf },
    #[error("cannot write settings file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(path: &Path, source: std::io::Error) -> Self {
        Self::Unavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn empty(path: &Path) -> Self {
        Self::Empty {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn write_failed(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The I/O primitive a store instance uses to reach the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMethod {
    /// Read through a memory-mapped view of the file
    MappedView,
    /// Read and write through a buffered file handle
    BufferedHandle,
    /// Whole-content stream read, formatted stream write
    TypedStream,
    /// Raw platform file handle with an exactly sized buffer
    RawHandle,
}

impl StorageMethod {
    pub const ALL: [StorageMethod; 4] = [
        StorageMethod::MappedView,
        StorageMethod::BufferedHandle,
        StorageMethod::TypedStream,
        StorageMethod::RawHandle,
    ];

    /// Maps the external 1-based selection index to a method
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(StorageMethod::MappedView),
            2 => Some(StorageMethod::BufferedHandle),
            3 => Some(StorageMethod::TypedStream),
            4 => Some(StorageMethod::RawHandle),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            StorageMethod::MappedView => 1,
            StorageMethod::BufferedHandle => 2,
            StorageMethod::TypedStream => 3,
            StorageMethod::RawHandle => 4,
        }
    }
}

impl Default for StorageMethod {
    fn default() -> Self {
        StorageMethod::MappedView
    }
}

/// Loads and saves the settings record through the selected backend
#[derive(Debug, Clone)]
pub struct SettingsStore {
    method: StorageMethod,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store over `settings.ini` in the working directory
    pub fn new(method: StorageMethod) -> Self {
        Self::with_path(method, SETTINGS_FILE_NAME)
    }

    /// Creates a store over an explicit path
    pub fn with_path(method: StorageMethod, path: impl Into<PathBuf>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> StorageMethod {
        self.method
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings file into the record
    ///
    /// Never fails the caller: a missing, unopenable, or empty file resets
    /// the record to [`Settings::default`]. Malformed lines inside an
    /// otherwise readable file are skipped by the codec, keeping the
    /// record's pre-call values for those fields.
    pub fn load(&self, settings: &mut Settings) {
        if let Err(err) = self.try_load(settings) {
            debug!(method = self.method.index(), error = %err, "falling back to default settings");
            *settings = Settings::default();
        }
    }

    fn try_load(&self, settings: &mut Settings) -> Result<(), StoreError> {
        match self.method {
            StorageMethod::MappedView => backend::mapped::load(&self.path, settings),
            StorageMethod::BufferedHandle => backend::buffered::load(&self.path, settings),
            StorageMethod::TypedStream => backend::stream::load(&self.path, settings),
            StorageMethod::RawHandle => backend::raw::load(&self.path, settings),
        }
    }

    /// Encodes the record and rewrites the settings file wholesale
    ///
    /// A failure is returned for the caller to report; it is never fatal.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        match self.method {
            StorageMethod::MappedView => backend::mapped::save(&self.path, settings),
            StorageMethod::BufferedHandle => backend::buffered::save(&self.path, settings),
            StorageMethod::TypedStream => backend::stream::save(&self.path, settings),
            StorageMethod::RawHandle => backend::raw::save(&self.path, settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Rgb;
    use std::fs;

    fn sample() -> Settings {
        Settings {
            grid_size: 64,
            window_width: 1024,
            window_height: 768,
            background_color: Rgb::new(12, 34, 56),
            grid_line_color: Rgb::new(250, 1, 128),
        }
    }

    fn store_in(dir: &tempfile::TempDir, method: StorageMethod) -> SettingsStore {
        SettingsStore::with_path(method, dir.path().join(SETTINGS_FILE_NAME))
    }

    #[test]
    fn index_mapping_is_one_based() {
        assert_eq!(StorageMethod::from_index(1), Some(StorageMethod::MappedView));
        assert_eq!(StorageMethod::from_index(4), Some(StorageMethod::RawHandle));
        assert_eq!(StorageMethod::from_index(0), None);
        assert_eq!(StorageMethod::from_index(5), None);
        for method in StorageMethod::ALL {
            assert_eq!(StorageMethod::from_index(method.index()), Some(method));
        }
    }

    #[test]
    fn save_then_load_round_trips_every_method() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            store.save(&sample()).unwrap();

            let mut loaded = Settings::default();
            store.load(&mut loaded);
            assert_eq!(loaded, sample(), "round trip failed for {method:?}");
        }
    }

    #[test]
    fn all_method_pairings_agree_on_the_wire_format() {
        let dir = tempfile::tempdir().unwrap();
        for writer in StorageMethod::ALL {
            store_in(&dir, writer).save(&sample()).unwrap();
            for reader in StorageMethod::ALL {
                let mut loaded = Settings::default();
                store_in(&dir, reader).load(&mut loaded);
                assert_eq!(loaded, sample(), "{writer:?} -> {reader:?} mismatch");
            }
        }
    }

    #[test]
    fn every_method_writes_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = Vec::new();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            store.save(&sample()).unwrap();
            contents.push(fs::read(store.path()).unwrap());
        }
        assert!(contents.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn save_load_save_is_byte_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            store.save(&sample()).unwrap();
            let first = fs::read(store.path()).unwrap();

            let mut reloaded = Settings::default();
            store.load(&mut reloaded);
            store.save(&reloaded).unwrap();
            assert_eq!(fs::read(store.path()).unwrap(), first);
        }
    }

    #[test]
    fn missing_file_yields_default_record() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            let mut settings = sample();
            store.load(&mut settings);
            assert_eq!(settings, Settings::default(), "missing-file default for {method:?}");
        }
    }

    #[test]
    fn empty_file_yields_default_record() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            fs::write(store.path(), "").unwrap();
            let mut settings = sample();
            store.load(&mut settings);
            assert_eq!(settings, Settings::default(), "empty-file default for {method:?}");
        }
    }

    #[test]
    fn partially_malformed_file_keeps_preseeded_fields() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            fs::write(store.path(), "GridSize=40\nJUNKLINE\nWindowWidth=abc\n").unwrap();

            let mut settings = sample();
            store.load(&mut settings);
            assert_eq!(settings.grid_size, 40);
            assert_eq!(settings.window_width, sample().window_width);
            assert_eq!(settings.background_color, sample().background_color);
        }
    }

    #[test]
    fn backing_file_is_released_after_each_call() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = store_in(&dir, method);
            store.save(&sample()).unwrap();

            let mut settings = Settings::default();
            store.load(&mut settings);

            // Removing and recreating the file only works if no handle or
            // mapping survived the calls above.
            fs::remove_file(store.path()).unwrap();
            store.save(&sample()).unwrap();
            assert!(store.path().exists());
            fs::remove_file(store.path()).unwrap();
        }
    }

    #[test]
    fn save_into_missing_directory_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        for method in StorageMethod::ALL {
            let store = SettingsStore::with_path(
                method,
                dir.path().join("no-such-dir").join(SETTINGS_FILE_NAME),
            );
            let err = store.save(&sample()).unwrap_err();
            assert!(
                matches!(err, StoreError::Unavailable { .. } | StoreError::WriteFailed { .. }),
                "unexpected error for {method:?}: {err}"
            );
        }
    }
}
