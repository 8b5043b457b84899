//! Prometheus metrics for blog-service.
//!
//! Collectors for likes, draft generation and content mutations, plus the
//! `/metrics` handler.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Like confirmations by outcome (success/error).
    pub static ref LIKE_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_like_requests_total",
        "Like confirmations segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register blog_like_requests_total");

    /// Optimistic likes reverted after a failed confirmation.
    pub static ref LIKE_ROLLBACKS_TOTAL: IntCounter = register_int_counter!(
        "blog_like_rollbacks_total",
        "Optimistic likes rolled back"
    )
    .expect("failed to register blog_like_rollbacks_total");

    /// AI draft requests by outcome (success/error/disabled).
    pub static ref DRAFT_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_draft_requests_total",
        "AI draft generation requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register blog_draft_requests_total");

    pub static ref POST_MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_post_mutations_total",
        "Content mutations segmented by operation",
        &["op"]
    )
    .expect("failed to register blog_post_mutations_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
