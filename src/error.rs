use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use log::error;
use thiserror::Error;

/// Methods the value resource answers to, as sent in the `Allow` header.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Request-scoped failures. None of these ever escape the handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON")]
    InvalidJson,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal server error")]
    Encode(#[source] serde_json::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        match self {
            ApiError::MethodNotAllowed => {
                res.insert_header((header::ALLOW, ALLOWED_METHODS));
            }
            ApiError::Encode(e) => {
                error!("error encoding JSON: {}", e);
            }
            ApiError::InvalidJson => {}
        }
        res.content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
