//! Domain Layer
//!
//! Contains all domain entities and the pure logic computed over them.
//! This layer has NO database or IO dependencies.

mod entity;
mod item;
mod settings;
mod vocabulary;
pub mod filter;
pub mod review;
pub mod insights;
pub mod export;

pub use entity::{Entity, DomainError, DomainResult};
pub use item::{Item, UsedStatus, format_timestamp, parse_timestamp, truncate_to_millis};
pub use settings::{Settings, SettingKey};
pub use vocabulary::{VocabularyKind, VocabularyEntry};
pub use filter::{ItemFilter, distinct_categories};
pub use review::{ReviewAnswer, ReviewQueue, needs_review};
pub use insights::{Insights, CategoryCount};
pub use export::{Backup, items_to_csv};
