pub mod config;
pub mod field;
pub mod project;
pub mod snapshot;

pub use config::{ConfigOverride, ProjectConfig, QuestionKind, SpecificQuestion};
pub use field::{FieldValue, FormData, fields};
pub use project::{DocumentId, PdfSection, ProjectType};
pub use snapshot::{FormSnapshot, RemoteSession, SessionPayload};
