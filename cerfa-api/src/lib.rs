//! HTTP backends for the cerfa-core session and AI boundaries.
//!
//! One client per remote concern, both speaking the backend's JSON routes:
//! [`HttpSessionApi`] for session autosave and dossier finalization,
//! [`HttpAiService`] for the suggestion endpoints. Both run in anonymous
//! mode when no bearer credential is configured.

mod ai;
mod session;

pub use ai::HttpAiService;
pub use session::HttpSessionApi;
