use crate::{json::Extras, Nullable};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cannot encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }
}

/// A non-2xx response from the API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("api error ({status}): {}", .body.summary())]
pub struct ApiError {
    pub status: u16,
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Builds the error from a raw response body. Bodies that are not JSON are kept in `detail`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = serde_json::from_str(body).unwrap_or_else(|_| ApiErrorBody {
            detail: match body.trim() {
                "" => Nullable::Absent,
                text => Nullable::Value(text.to_string()),
            },
            ..ApiErrorBody::default()
        });
        Self { status, body }
    }

    pub fn kind(&self) -> Option<&str> {
        self.body.kind.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub title: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub detail: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub status: Nullable<u16>,
}

impl ApiErrorBody {
    fn summary(&self) -> String {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (Some(msg), None) | (None, Some(msg)) => msg.to_string(),
            (None, None) => self.kind.as_deref().unwrap_or("unknown error").to_string(),
        }
    }
}
