//! Maps pipeline outcomes onto the JSON bodies callers expect.
//!
//! The prediction path renders `AppError` directly. The chat path wraps it in
//! `ChatFailure`, which always carries the fallback reply so the conversation
//! UI has something to show.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::error::AppError;
use crate::web::models::{ChatFailureBody, ChatResponse, ErrorBody};

pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble accessing my knowledge base right now. Please try again later.";

pub fn chat_reply(reply: String) -> HttpResponse {
    HttpResponse::Ok().json(ChatResponse { reply })
}

fn invalid_request() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: "Invalid request",
        details: None,
    })
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidRequest(_) => invalid_request(),
            AppError::UpstreamError { .. } => {
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Failed to fetch prediction",
                    details: None,
                })
            }
            AppError::UpstreamUnreachable(detail) | AppError::InternalError(detail) => {
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Internal server error",
                    details: Some(detail.clone()),
                })
            }
        }
    }
}

#[derive(Debug)]
pub struct ChatFailure(pub AppError);

impl From<AppError> for ChatFailure {
    fn from(err: AppError) -> Self {
        ChatFailure(err)
    }
}

impl fmt::Display for ChatFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ChatFailure {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self.0 {
            AppError::InvalidRequest(_) => invalid_request(),
            _ => HttpResponse::InternalServerError().json(ChatFailureBody {
                error: "Failed to process request",
                reply: FALLBACK_REPLY,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn prediction_errors_hide_upstream_details() {
        let resp = AppError::upstream_status(502).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({ "error": "Failed to fetch prediction" }));

        let resp = AppError::UpstreamUnreachable("inference endpoint timed out".into())
            .error_response();
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Internal server error", "details": "inference endpoint timed out" })
        );
    }

    #[actix_web::test]
    async fn chat_failures_always_carry_the_fallback_reply() {
        for err in [
            AppError::upstream_status(500),
            AppError::upstream_shape("no choices"),
            AppError::UpstreamUnreachable("timed out".into()),
            AppError::InternalError("boom".into()),
        ] {
            let resp = ChatFailure(err).error_response();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(resp).await,
                json!({ "error": "Failed to process request", "reply": FALLBACK_REPLY })
            );
        }
    }

    #[actix_web::test]
    async fn invalid_requests_share_one_body() {
        let resp = ChatFailure(AppError::invalid("messages is missing")).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "error": "Invalid request" }));
    }
}
