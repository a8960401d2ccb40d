//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod kv_store;
mod item_repo;
mod vocabulary_repo;
mod settings_repo;

#[cfg(test)]
mod tests;

pub use traits::{Repository, VocabularyOperations};
pub use db::{init_db, DbState, SharedConnection};
pub use kv_store::{KvStore, SETTINGS_KEY};
pub use item_repo::ItemRepository;
pub use vocabulary_repo::VocabularyRepository;
pub use settings_repo::SettingsRepository;
