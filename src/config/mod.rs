//! Settings persistence for gridmark-win
//!
//! Concentrates the persisted record, its textual encoding, and the four
//! interchangeable storage backends behind one store type. The rest of the
//! application only sees [`Settings`] and [`SettingsStore`].

pub mod backend;
pub mod codec;
pub mod settings;
pub mod store;

pub use settings::Settings;
pub use store::{SettingsStore, StorageMethod, StoreError};
