use std::sync::Arc;
use std::time::Duration;
use actix_files::Files;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use draft_mail_agent::config::{self, AppConfig};
use draft_mail_agent::routes::app_state::AppState;
use draft_mail_agent::routes::{self, chat_routes, compose_routes, session_routes};
use draft_mail_agent::services::email_service::SmtpMailer;
use draft_mail_agent::services::llm_service::GeminiClient;

const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    config::init_logging();

    let app_config = AppConfig::from_env().context("Failed to load configuration")?;
    log::info!("Using model {} and SMTP relay {}:{}", app_config.gemini.model, app_config.smtp.server, app_config.smtp.port);

    let drafter = GeminiClient::new(&app_config.gemini).context("Failed to create Gemini client")?;
    let mailer = SmtpMailer::new(&app_config.smtp).context("Failed to create SMTP transport")?;
    let state = AppState::new(Arc::new(drafter), Arc::new(mailer));

    let sweeper = state.session_manager.clone();
    actix_web::rt::spawn(sweeper.run_eviction(app_config.server.session_ttl, EVICTION_INTERVAL));

    let session_key = Key::generate();
    let bind = (app_config.server.host.clone(), app_config.server.port);
    let max_upload_bytes = app_config.server.max_upload_bytes;

    log::info!("Starting server on http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            // Use the Logger middleware to log incoming requests.
            .wrap(Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(state.clone()))
            .app_data(routes::json_config(max_upload_bytes))
            .configure(chat_routes::init_routes)
            .configure(session_routes::init_routes)
            .configure(compose_routes::init_routes)
            // Serve static files (including index.html) from the "./static" directory.
            .service(Files::new("/", "./static").index_file("index.html"))
    })
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
