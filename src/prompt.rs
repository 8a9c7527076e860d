use crate::context::Condition;
use crate::web::models::{ChatMessage, Role};

pub fn system_prompt(condition: &Condition, knowledge: &str) -> String {
    let name = condition.name();
    format!(
        "You are AgriBot, an expert in plant diseases and their treatments.\n\
         The user has a plant affected by \"{name}\".\n\
         \n\
         Here's some information about {name} that you should know:\n\
         {knowledge}\n\
         \n\
         Provide helpful, practical advice for treating this condition. Keep responses concise and actionable.\n\
         Format your response with markdown for readability when appropriate."
    )
}

/// Builds the upstream message list: one fresh system message, then the
/// user/assistant turns of `transcript` in their original order.
pub fn build_messages(
    condition: &Condition,
    knowledge: &str,
    transcript: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::new(
        Role::System,
        system_prompt(condition, knowledge),
    ));
    messages.extend(
        transcript
            .iter()
            .filter(|m| matches!(m.role, Role::User | Role::Assistant))
            .map(|m| ChatMessage::new(m.role.clone(), m.content.clone())),
    );
    messages
}
