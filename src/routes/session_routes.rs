use actix_web::{delete, get, put, web, HttpResponse, Responder};
use crate::routes::app_state::AppState;
use crate::handlers::session_handler::{DraftEdit, SessionQuery};
use actix_session::Session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(init_session)
        .service(get_session)
        .service(edit_draft)
        .service(end_session);
}

#[get("/init_session")]
async fn init_session(data: web::Data<AppState>, session: Session) -> impl Responder {
    let resp = crate::handlers::session_handler::initialize_session(data, session).await;
    HttpResponse::Ok().json(resp)
}

#[get("/session")]
async fn get_session(data: web::Data<AppState>, session: Session, query: web::Query<SessionQuery>) -> impl Responder {
    crate::handlers::session_handler::session_snapshot(data, session, query).await
}

#[put("/session/draft")]
async fn edit_draft(data: web::Data<AppState>, session: Session, req_body: web::Json<DraftEdit>) -> impl Responder {
    crate::handlers::session_handler::edit_draft(data, session, req_body).await
}

#[delete("/session")]
async fn end_session(data: web::Data<AppState>, session: Session, query: web::Query<SessionQuery>) -> impl Responder {
    crate::handlers::session_handler::end_session(data, session, query).await
}
