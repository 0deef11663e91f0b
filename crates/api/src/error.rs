use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("API configuration error: {0}")]
    Configuration(String),

    #[error("API request error: {0}")]
    Request(String),

    /// Non-success status; `message` is the server's own explanation, if any
    #[error("API returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("API response error: {0}")]
    Response(String),
}

impl ApiError {
    /// Build a status error from a failed response body.
    ///
    /// Reads `message` or `error` from a JSON body, including the nested
    /// `{"error": {"message": ...}}` envelope.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: server_message(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the alert shown after a failed action
    pub fn user_message(&self) -> String {
        lustre_common::Error::from(self.clone()).user_message()
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| match value.get("error")? {
            serde_json::Value::String(s) => Some(s.as_str()),
            nested => nested.get("message").and_then(|m| m.as_str()),
        })?;

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

impl From<ApiError> for lustre_common::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Configuration(msg) => lustre_common::Error::Configuration(msg),
            ApiError::Status {
                status: 401,
                message,
            } => lustre_common::Error::Authentication(message.unwrap_or_default()),
            ApiError::Status { message, .. } => lustre_common::Error::Action(message),
            ApiError::Request(_) | ApiError::Response(_) => lustre_common::Error::Action(None),
        }
    }
}
