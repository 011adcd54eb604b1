use actix_web::{post, web, Responder};
use crate::routes::app_state::AppState;
use crate::handlers::compose_handler::{ComposeRequest, SendRequest};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(compose)
        .service(send);
}

#[post("/compose")]
async fn compose(data: web::Data<AppState>, req_body: web::Json<ComposeRequest>) -> impl Responder {
    crate::handlers::compose_handler::compose_email(data, req_body).await
}

#[post("/send")]
async fn send(data: web::Data<AppState>, req_body: web::Json<SendRequest>) -> impl Responder {
    crate::handlers::compose_handler::send_email(data, req_body).await
}
