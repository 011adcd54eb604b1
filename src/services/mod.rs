pub mod chat_service;
pub mod compose_service;
pub mod email_service;
pub mod intent_service;
pub mod llm_service;
pub mod prompt_service;
