pub mod calculations;
pub mod models;
pub mod registry;
pub mod session;
pub mod steps;
pub mod store;
pub mod validation;

pub use models::*;
pub use registry::{apply_override, project_config, project_config_for_tags};
pub use session::{AiError, AiService, FieldSuggestions, SessionApi, SessionError, SnapshotStore};
pub use steps::{ALL_STEPS, StepId, StepInfo, TOTAL_STEPS, visible_steps};
pub use store::FormStore;
