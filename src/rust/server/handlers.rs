use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::{AppState, Detection};
use crate::classifier::Prediction;
use crate::keywords::{detect_keywords, heuristic_confidence};

/// Request body for the scoring routes. An absent or `null` `text` reads as `None`.
#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeData {
    #[serde(flatten)]
    pub detection: Detection,
    #[serde(rename = "isSuspicious")]
    pub is_suspicious: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalyzeData,
}

#[derive(Debug, Serialize)]
pub struct DetectionsResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Detection>,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let text = request.text.unwrap_or_default();
    let prediction = state.classifier.get().classify(&text, state.threshold)?;
    debug!("Scored {} chars: {}", text.len(), prediction);
    Ok(Json(prediction))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::InvalidInput("Invalid input: text is required".into())),
    };

    let (confidence, warning) = match state.classifier.get().predict(&text) {
        Ok(confidence) => (confidence, None),
        Err(e) => {
            warn!("Classifier unavailable, using keyword heuristic: {}", e);
            (
                heuristic_confidence(&text),
                Some("Classifier unavailable - using keyword heuristic".to_string()),
            )
        }
    };

    let keywords = detect_keywords(&text).into_iter().map(String::from).collect();
    let detection = state.record(text, confidence, keywords);
    info!(
        "Recorded detection {} (confidence {:.3})",
        detection.id, detection.confidence
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        data: AnalyzeData {
            is_suspicious: confidence > state.threshold,
            detection,
            warning,
        },
    }))
}

pub async fn detections(State(state): State<Arc<AppState>>) -> Json<DetectionsResponse> {
    let data = state.detections();
    Json(DetectionsResponse {
        success: true,
        count: data.len(),
        data,
    })
}
