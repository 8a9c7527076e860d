use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::context::{extract_condition, Condition};
use crate::error::AppError;
use crate::prompt::build_messages;
use crate::web::responses::{chat_reply, ChatFailure};
use crate::web::validation;
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ChatFailure> {
    let transcript = validation::chat_messages(&body)?;

    let condition = extract_condition(&transcript);
    match &condition {
        Condition::Known { name, source } => info!(
            "Chat request with {} messages (condition: {}, from {:?})",
            transcript.len(),
            name,
            source
        ),
        Condition::Unknown => info!(
            "Chat request with {} messages (condition unknown)",
            transcript.len()
        ),
    }

    let knowledge = data.knowledge.get(condition.name());
    let messages = build_messages(&condition, knowledge, &transcript);

    match data.completion.complete(messages).await {
        Ok(reply) => Ok(chat_reply(reply)),
        Err(e) => {
            error!("Chat processing error: {}", e);
            Err(e.into())
        }
    }
}

// Prediction API endpoint
pub async fn predict(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data_url = validation::data_url(&body)?;

    match data.prediction.predict(&data_url).await {
        Ok(prediction) => {
            info!(
                "Prediction: {} ({:.2})",
                prediction.result.class_label, prediction.result.confidence
            );
            Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(prediction.raw))
        }
        Err(e) => {
            error!("Prediction error: {}", e);
            Err(e)
        }
    }
}
