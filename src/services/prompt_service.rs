use crate::config::{COMPOSE_INSTRUCTIONS, DRAFTING_INSTRUCTIONS};
use crate::models::conversation::{format_turns, ConversationTurn};

/// Builds the drafting prompt from the whole conversation. The latest user
/// utterance is expected to be the last turn.
pub fn build_drafting_prompt(turns: &[ConversationTurn]) -> String {
    format!(
        "{}\n\nConversation so far:\n{}\n",
        DRAFTING_INSTRUCTIONS,
        format_turns(turns)
    )
}

/// Prompt for the stateless form flow.
pub fn build_compose_prompt(request: &str) -> String {
    format!(
        "Write a professional email for: {}\n\n{}",
        request.trim(),
        COMPOSE_INSTRUCTIONS
    )
}
