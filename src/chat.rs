use serde::{Deserialize, Serialize};

/// Directive seeding every conversation. Conditions the advisor's behavior;
/// never rendered.
pub const SYSTEM_PROMPT: &str = "Eres un asesor experto en coches. Tu misión es ayudar al usuario a encontrar el coche ideal mediante conversación personalizada.";

/// The originating role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Ordered message history. The system directive is always the first entry;
/// everything after it is append-only.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::new(Role::System, system_prompt)],
        }
    }

    /// Append a user turn. Whitespace-only input is a no-op and returns false.
    pub fn push_user(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message::new(Role::User, text));
        true
    }

    /// Append the advisor's reply verbatim, whatever role it carries.
    pub fn push_assistant(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Full ordered history, system entry included. This is the request
    /// payload: the whole conversation is resent each turn.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages shown to the user: everything except the system directive,
    /// in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_starts_with_system_directive() {
        let convo = Conversation::new(SYSTEM_PROMPT);
        assert_eq!(convo.len(), 1);
        assert_eq!(convo.messages()[0].role, Role::System);
        assert_eq!(convo.messages()[0].content, SYSTEM_PROMPT);
    }

    #[test]
    fn test_push_user_trims_and_appends() {
        let mut convo = Conversation::new("sistema");
        assert!(convo.push_user("  hola  "));
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.messages()[1].role, Role::User);
        assert_eq!(convo.messages()[1].content, "hola");
    }

    #[test]
    fn test_push_user_rejects_blank_input() {
        let mut convo = Conversation::new("sistema");
        assert!(!convo.push_user(""));
        assert!(!convo.push_user("   \t\n  "));
        assert_eq!(convo.len(), 1);
    }

    #[test]
    fn test_push_assistant_keeps_message_verbatim() {
        let mut convo = Conversation::new("sistema");
        convo.push_assistant(Message::new(Role::Assistant, "Te recomiendo un SUV."));
        assert_eq!(convo.messages()[1].role, Role::Assistant);
        assert_eq!(convo.messages()[1].content, "Te recomiendo un SUV.");
    }

    #[test]
    fn test_visible_excludes_system_and_preserves_order() {
        let mut convo = Conversation::new("sistema");
        convo.push_user("primera");
        convo.push_assistant(Message::new(Role::Assistant, "respuesta"));
        convo.push_user("segunda");

        let visible: Vec<&Message> = convo.visible().collect();
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|m| m.role != Role::System));
        assert_eq!(visible[0].content, "primera");
        assert_eq!(visible[1].content, "respuesta");
        assert_eq!(visible[2].content, "segunda");
    }

    #[test]
    fn test_visible_is_idempotent() {
        let mut convo = Conversation::new("sistema");
        convo.push_user("hola");

        let first: Vec<Message> = convo.visible().cloned().collect();
        let second: Vec<Message> = convo.visible().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(Role::System).unwrap(),
            serde_json::json!("system")
        );
        assert_eq!(
            serde_json::to_value(Role::User).unwrap(),
            serde_json::json!("user")
        );
        assert_eq!(
            serde_json::to_value(Role::Assistant).unwrap(),
            serde_json::json!("assistant")
        );
    }
}
