//! Error response bodies returned by Elasticsearch.

use serde::Deserialize;

/// Top-level error envelope: `{"error": ..., "status": 400}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    pub status: Option<u16>,
}

/// The `error` member is an object on modern versions and a plain string on
/// some proxy and legacy responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured {
        #[serde(rename = "type")]
        error_type: String,
        reason: Option<String>,
    },
    Message(String),
}

impl ErrorDetail {
    pub fn error_type(&self) -> Option<&str> {
        match self {
            Self::Structured { error_type, .. } => Some(error_type),
            Self::Message(_) => None,
        }
    }

    pub fn reason(&self) -> String {
        match self {
            Self::Structured {
                error_type,
                reason: Some(reason),
            } => format!("{error_type}: {reason}"),
            Self::Structured { error_type, .. } => error_type.clone(),
            Self::Message(message) => message.clone(),
        }
    }
}
