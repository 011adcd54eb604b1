pub mod assistant_error;
pub mod attachment;
pub mod conversation;
pub mod draft_session;
pub mod email;
