use actix_web::{web, HttpResponse};
use actix_session::Session;
use serde::Deserialize;
use log::{info, warn};
use crate::routes::app_state::AppState;
use crate::models::attachment::{decode_uploads, AttachmentUpload};
use crate::services::chat_service;
use crate::handlers::session_handler::{resolve_session_id, session_missing};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentUpload>,
}

pub async fn handle_chat_request(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ChatRequest>
) -> HttpResponse {
    let request = req_body.into_inner();
    let Some(session_id) = resolve_session_id(&session, request.session_id.as_deref()) else {
        return session_missing("");
    };

    let uploads = match decode_uploads(request.attachments) {
        Ok(uploads) => uploads,
        Err(e) => {
            warn!("Rejected upload for session {}: {}", session_id, e);
            return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()}));
        }
    };

    let Some(handle) = data.session_manager.handle(&session_id) else {
        return session_missing(&session_id);
    };

    // Held for the whole turn so a second request on this session waits.
    let mut draft_session = handle.lock().await;
    info!("Processing message for session {}: {}", session_id, request.message);
    let reply = chat_service::process_chat(
        &request.message,
        uploads,
        &mut draft_session,
        data.drafter.as_ref(),
        data.mailer.as_ref(),
    ).await;

    HttpResponse::Ok().json(reply)
}
