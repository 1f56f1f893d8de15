pub mod boundary;

pub use boundary::{AiError, AiService, FieldSuggestions, SessionApi, SessionError, SnapshotStore};
