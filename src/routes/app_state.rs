use std::sync::Arc;
use crate::global_session_manager::GlobalSessionManager;
use crate::services::email_service::MailDispatcher;
use crate::services::llm_service::DraftGenerator;

#[derive(Clone)]
pub struct AppState {
    pub drafter: Arc<dyn DraftGenerator>,
    pub mailer: Arc<dyn MailDispatcher>,
    pub session_manager: GlobalSessionManager,
}

impl AppState {
    pub fn new(drafter: Arc<dyn DraftGenerator>, mailer: Arc<dyn MailDispatcher>) -> Self {
        AppState {
            drafter,
            mailer,
            session_manager: GlobalSessionManager::new(),
        }
    }
}
