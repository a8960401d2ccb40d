//! Commands Layer
//!
//! Handlers the front end calls. Each takes the shared `AppState` and
//! returns `Result<_, String>` with a message ready to show to the user.

mod item_cmd;
mod review_cmd;
mod insights_cmd;
mod vocabulary_cmd;
mod settings_cmd;
mod export_cmd;
mod photo_cmd;


pub use item_cmd::*;
pub use review_cmd::*;
pub use insights_cmd::*;
pub use vocabulary_cmd::*;
pub use settings_cmd::*;
pub use export_cmd::*;
pub use photo_cmd::*;
