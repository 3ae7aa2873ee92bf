use serde::Serialize;

/// Outcome of a key validation call. Never an error: a rejected key is an
/// expected answer, not a failure of the check itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ConnectionCheck {
    Success { data: serde_json::Value },
    Failure { error: String },
}

impl ConnectionCheck {
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}
