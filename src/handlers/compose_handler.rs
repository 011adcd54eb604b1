use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use log::{info, warn};
use crate::models::assistant_error::AssistantError;
use crate::models::attachment::{decode_uploads, AttachmentUpload};
use crate::models::email::OutgoingEmail;
use crate::routes::app_state::AppState;
use crate::services::compose_service;

#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentUpload>,
}

pub async fn compose_email(data: web::Data<AppState>, req_body: web::Json<ComposeRequest>) -> HttpResponse {
    let prompt = req_body.prompt.trim();
    if prompt.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "Please enter what kind of email you need!"}));
    }

    info!("Composing form email");
    match compose_service::compose_email(prompt, data.drafter.as_ref()).await {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => HttpResponse::BadGateway().json(json!({"error": e.to_string()})),
    }
}

pub async fn send_email(data: web::Data<AppState>, req_body: web::Json<SendRequest>) -> HttpResponse {
    let request = req_body.into_inner();
    let attachments = match decode_uploads(request.attachments) {
        Ok(attachments) => attachments,
        Err(e) => {
            warn!("Rejected form upload: {}", e);
            return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
        }
    };

    let email = OutgoingEmail {
        recipient: request.recipient.trim().to_string(),
        subject: request.subject.trim().to_string(),
        body: request.body,
        attachments,
    };

    match compose_service::send_email(email, data.mailer.as_ref()).await {
        Ok(message) => HttpResponse::Ok().json(json!({"sent": true, "message": message})),
        Err(e @ AssistantError::DispatchFailure(_)) => {
            HttpResponse::BadGateway().json(json!({"sent": false, "message": e.to_string()}))
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"sent": false, "message": e.to_string()})),
    }
}
