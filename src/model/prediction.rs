use bytes::Bytes;
use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Label and score pulled out of an inference response.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub class_label: String,
    pub confidence: f64,
}

#[derive(Deserialize)]
struct Envelope {
    predictions: Predictions,
}

#[derive(Deserialize)]
struct Predictions {
    class: ClassLabel,
    confidence: f64,
}

#[derive(Deserialize)]
struct ClassLabel {
    clean: String,
}

impl PredictionResult {
    /// Checks `body` against the `predictions.class.clean` /
    /// `predictions.confidence` shape.
    pub fn from_body(body: &Value) -> Result<Self> {
        let envelope = Envelope::deserialize(body)
            .map_err(|e| AppError::upstream_shape(format!("unexpected prediction shape: {}", e)))?;
        let confidence = envelope.predictions.confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AppError::upstream_shape(format!(
                "confidence {} outside [0, 1]",
                confidence
            )));
        }
        Ok(Self {
            class_label: envelope.predictions.class.clean,
            confidence,
        })
    }
}

/// A checked inference response.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub result: PredictionResult,
    /// The upstream body exactly as received.
    pub raw: Bytes,
}

/// Forwards image payloads to the inference service.
pub struct PredictionProxy {
    url: String,
    client: Client,
}

impl PredictionProxy {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let url = config.prediction_url();
        info!("Using inference endpoint at: {}", url);
        Ok(Self {
            url,
            client: super::http_client(config.upstream_timeout)?,
        })
    }

    /// Returns the inference service's body byte-for-byte once a parsed copy
    /// has passed the shape check.
    pub async fn predict(&self, data_url: &str) -> Result<Prediction> {
        info!("Forwarding image payload ({} bytes) for prediction", data_url.len());

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "data_url": data_url }))
            .send()
            .await
            .map_err(|e| AppError::from_transport("inference endpoint", e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Inference endpoint returned {}", status);
            return Err(AppError::upstream_status(status.as_u16()));
        }

        let raw = response
            .bytes()
            .await
            .map_err(|e| AppError::from_transport("inference endpoint", e))?;
        let body: Value = serde_json::from_slice(&raw).map_err(|_| {
            error!("Inference endpoint returned a non-JSON body");
            AppError::InternalError("inference endpoint returned an unreadable body".to_string())
        })?;

        let result = PredictionResult::from_body(&body).map_err(|e| {
            error!("Rejecting inference response: {}", e);
            e
        })?;
        Ok(Prediction { result, raw })
    }
}
