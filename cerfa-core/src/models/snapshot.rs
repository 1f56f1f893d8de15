//! Serialized shapes exchanged with the local snapshot store and the remote
//! session endpoint.

use serde::{Deserialize, Serialize};

use super::field::FormData;

/// What the local store persists on every change.
///
/// Validation errors and touched flags are deliberately not part of the
/// snapshot; they are transient session state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub data: FormData,
    #[serde(default)]
    pub current_step: usize,
}

/// Body of the debounced autosave POST.
///
/// `seq` increases monotonically per push so the backend can reject a stale
/// write that lands after a newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub data: FormData,
    #[serde(rename = "currentStep")]
    pub current_step: usize,
    pub seq: u64,
}

/// What the session endpoint returns on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSession {
    #[serde(default)]
    pub data: FormData,
    #[serde(default)]
    pub current_step: usize,
}

impl RemoteSession {
    /// An empty remote session never supersedes a local snapshot.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_snapshot(self) -> FormSnapshot {
        FormSnapshot {
            data: self.data,
            current_step: self.current_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn payload_serializes_step_in_camel_case() {
        let payload = SessionPayload {
            data: FormData::new(),
            current_step: 3,
            seq: 7,
        };

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["currentStep"], 3);
        assert_eq!(json["seq"], 7);
    }

    #[test]
    fn remote_session_tolerates_missing_fields() {
        let session: RemoteSession = serde_json::from_str("{}").unwrap();

        assert!(session.is_empty());
        assert_eq!(session.current_step, 0);
    }
}
