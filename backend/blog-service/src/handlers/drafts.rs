/// AI drafting handler
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::metrics::DRAFT_REQUESTS_TOTAL;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub topic: String,
}

/// Propose a title and summary for a topic
pub async fn generate_draft(
    state: web::Data<AppState>,
    req: web::Json<DraftRequest>,
) -> Result<HttpResponse> {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("topic is required".to_string()));
    }
    if !state.drafts.is_enabled() {
        DRAFT_REQUESTS_TOTAL.with_label_values(&["disabled"]).inc();
        return Err(AppError::Unavailable(
            "AI Service is not available. Ensure API_KEY is configured.".to_string(),
        ));
    }

    match state.drafts.generate(topic).await {
        Ok(draft) => {
            DRAFT_REQUESTS_TOTAL.with_label_values(&["success"]).inc();
            Ok(HttpResponse::Ok().json(draft))
        }
        Err(e) => {
            DRAFT_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
            warn!(topic, "draft generation failed: {}", e);
            Err(e.into())
        }
    }
}
