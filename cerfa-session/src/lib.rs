//! Session layer gluing the form engine to its storage backends.
//!
//! [`DeclarationSession`] is the composition root: it owns the
//! [`FormStore`](cerfa_core::store::FormStore), resumes state from a
//! [`SnapshotStore`](cerfa_core::session::SnapshotStore) and optionally a
//! remote [`SessionApi`](cerfa_core::session::SessionApi), and mirrors every
//! change back out through a debounced [`AutosaveBridge`].

mod bridge;
mod local;
mod session;

pub use bridge::AutosaveBridge;
pub use local::{FileSnapshotStore, MemorySnapshotStore};
pub use session::DeclarationSession;
