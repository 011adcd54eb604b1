pub mod app_state;
pub mod chat_routes;
pub mod compose_routes;
pub mod session_routes;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpResponse};
use log::warn;
use serde_json::json;

/// JSON extractor settings shared by every route: a body limit sized for
/// base64 attachments, and rejections answered as `{"error": ...}`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            warn!("Rejected JSON payload: {}", err);
            let body = json!({ "error": err.to_string() });
            let response = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    HttpResponse::PayloadTooLarge().json(body)
                }
                _ => HttpResponse::BadRequest().json(body),
            };
            InternalError::from_response(err, response).into()
        })
}
