//! Live camera config with debounced persistence.
//!
//! Every mutation is pushed to the renderer right away and written to
//! durable storage once the edits have been quiet for [`PERSIST_DEBOUNCE`].

mod config_store;
mod persistence;

#[cfg(test)]
mod tests;

pub use config_store::{ConfigSink, ConfigStore, PERSIST_DEBOUNCE};
pub use persistence::{ConfigPersistence, FilePersistence, MemoryPersistence};
