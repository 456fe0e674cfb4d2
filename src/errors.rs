use axum::response::{IntoResponse, Response};
use hyper::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("form actions expect form-encoded data, but the `Content-Type` header is missing")]
    MissingContentType,

    #[error("form actions expect form-encoded data, received `{0}`")]
    UnsupportedContentType(String),

    #[error("failed to read form data: {0}")]
    MalformedForm(String),

    #[error("no action with name `{0}` found")]
    ActionNotFound(String),

    #[error("POST method not allowed. No form actions exist for this page")]
    NoActions,

    #[error("when using named actions, the default action cannot be used")]
    DefaultActionWithNamed,

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] axum::http::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingContentType | Error::UnsupportedContentType(_) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Error::MalformedForm(_) | Error::DefaultActionWithNamed => StatusCode::BAD_REQUEST,
            Error::ActionNotFound(_) => StatusCode::NOT_FOUND,
            Error::NoActions => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
