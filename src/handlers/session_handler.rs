use actix_session::Session;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use log::{info, warn, error};
use serde::Deserialize;
use serde_json::json;
use crate::routes::app_state::AppState;
use crate::models::draft_session::DraftSession;
use crate::models::email::ParsedEmail;

const SESSION_KEY: &str = "session_id";

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DraftEdit {
    pub session_id: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Session id from the cookie, falling back to one supplied by the client.
pub fn resolve_session_id(session: &Session, fallback: Option<&str>) -> Option<String> {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(id)) => Some(id),
        _ => {
            let id = fallback.map(str::trim).filter(|id| !id.is_empty())?;
            warn!("No valid session_id found in cookie; falling back to request value");
            Some(id.to_string())
        }
    }
}

pub async fn initialize_session(
    data: web::Data<AppState>,
    session: Session
) -> serde_json::Value {
    if let Ok(Some(existing)) = session.get::<String>(SESSION_KEY) {
        if data.session_manager.contains(&existing) {
            info!("Reusing session {}", existing);
            return json!({ "initialized": true, "session_id": existing });
        }
    }

    let session_id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert(SESSION_KEY, session_id.clone()) {
        error!("Failed to insert session_id into cookie: {:?}", e);
    } else {
        info!("Stored session_id {} in cookie", session_id);
    }

    data.session_manager.insert(session_id.clone(), DraftSession::new());
    info!("Initialized draft session: {}", session_id);

    json!({ "initialized": true, "session_id": session_id })
}

pub async fn session_snapshot(
    data: web::Data<AppState>,
    session: Session,
    query: web::Query<SessionQuery>
) -> HttpResponse {
    let Some(session_id) = resolve_session_id(&session, query.session_id.as_deref()) else {
        return session_missing("");
    };
    match data.session_manager.handle(&session_id) {
        Some(handle) => HttpResponse::Ok().json(handle.lock().await.snapshot()),
        None => session_missing(&session_id),
    }
}

/// Replaces the working draft with the user's own edits.
pub async fn edit_draft(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<DraftEdit>
) -> HttpResponse {
    let edit = req_body.into_inner();
    let Some(session_id) = resolve_session_id(&session, edit.session_id.as_deref()) else {
        return session_missing("");
    };
    let Some(handle) = data.session_manager.handle(&session_id) else {
        return session_missing(&session_id);
    };

    info!("Applying manual edit for session {}", session_id);
    let mut draft_session = handle.lock().await;
    draft_session.apply_draft(ParsedEmail::new(edit.subject.trim(), edit.body.trim()));
    HttpResponse::Ok().json(draft_session.snapshot())
}

pub async fn end_session(
    data: web::Data<AppState>,
    session: Session,
    query: web::Query<SessionQuery>
) -> HttpResponse {
    let Some(session_id) = resolve_session_id(&session, query.session_id.as_deref()) else {
        return session_missing("");
    };
    session.purge();
    match data.session_manager.remove(&session_id) {
        Some(_) => {
            info!("Ended session {}", session_id);
            HttpResponse::Ok().json(json!({ "ended": true, "session_id": session_id }))
        }
        None => session_missing(&session_id),
    }
}

pub fn session_missing(session_id: &str) -> HttpResponse {
    warn!("Session \"{}\" not found!", session_id);
    HttpResponse::NotFound().json(json!({"error": "Session not initialized"}))
}
