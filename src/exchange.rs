use anyhow::Result;

use crate::chat::{Conversation, Message};

/// Fixed user-facing notice for any failed exchange.
pub const CONNECTION_ERROR_NOTICE: &str = "Error al conectar con el servidor";

/// Drives one request/response cycle against the advisor backend.
///
/// Owns the conversation, the busy flag, and the last failure notice, and
/// performs no I/O itself: the caller sends the payload returned by
/// [`Exchange::begin`] and feeds the outcome to [`Exchange::complete`].
/// At most one exchange is in flight; `begin` rejects overlapping sends.
pub struct Exchange {
    conversation: Conversation,
    busy: bool,
    last_error: Option<String>,
}

impl Exchange {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            conversation: Conversation::new(system_prompt),
            busy: false,
            last_error: None,
        }
    }

    /// Start an exchange: append the user turn and snapshot the payload.
    ///
    /// Returns `None` without any state change when the input is blank or
    /// another exchange is still outstanding.
    pub fn begin(&mut self, text: &str) -> Option<Vec<Message>> {
        if self.busy {
            return None;
        }
        if !self.conversation.push_user(text) {
            return None;
        }
        self.busy = true;
        self.last_error = None;
        Some(self.conversation.messages().to_vec())
    }

    /// Finish the outstanding exchange with the backend's outcome.
    ///
    /// On failure the user's turn stays in the history; only the notice is
    /// recorded. busy clears in both cases.
    pub fn complete(&mut self, result: Result<Message>) {
        match result {
            Ok(reply) => self.conversation.push_assistant(reply),
            Err(err) => {
                self.last_error = Some(format!("{CONNECTION_ERROR_NOTICE}: {err:#}"));
            }
        }
        self.busy = false;
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use anyhow::anyhow;

    fn reply(content: &str) -> Message {
        Message::new(Role::Assistant, content)
    }

    #[test]
    fn test_begin_appends_user_turn_and_snapshots_payload() {
        let mut exchange = Exchange::new("sistema");

        let payload = exchange.begin("¿Qué coche me recomiendas?").unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].role, Role::System);
        assert_eq!(payload[1].role, Role::User);
        assert_eq!(payload[1].content, "¿Qué coche me recomiendas?");
        assert!(exchange.busy());
    }

    #[test]
    fn test_begin_rejects_blank_input() {
        let mut exchange = Exchange::new("sistema");

        assert!(exchange.begin("   \n\t ").is_none());
        assert_eq!(exchange.conversation().len(), 1);
        assert!(!exchange.busy());
    }

    #[test]
    fn test_begin_rejects_overlapping_send() {
        let mut exchange = Exchange::new("sistema");
        exchange.begin("primera").unwrap();

        assert!(exchange.begin("segunda").is_none());
        assert_eq!(exchange.conversation().len(), 2);
        assert!(exchange.busy());
    }

    #[test]
    fn test_successful_exchange_appends_reply_in_order() {
        let mut exchange = Exchange::new("sistema");
        exchange.begin("¿Qué coche me recomiendas?").unwrap();
        exchange.complete(Ok(reply("Te recomiendo un SUV compacto.")));

        let messages = exchange.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "Te recomiendo un SUV compacto.");
        assert!(!exchange.busy());
        assert!(exchange.last_error().is_none());

        let visible: Vec<_> = exchange.conversation().visible().collect();
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_failed_exchange_keeps_user_turn_and_records_notice() {
        let mut exchange = Exchange::new("sistema");
        exchange.begin("hola").unwrap();
        exchange.complete(Err(anyhow!("connection refused")));

        let messages = exchange.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "hola");
        assert!(!exchange.busy());

        let notice = exchange.last_error().unwrap();
        assert!(notice.starts_with(CONNECTION_ERROR_NOTICE));
    }

    #[test]
    fn test_send_proceeds_normally_after_a_failure() {
        let mut exchange = Exchange::new("sistema");
        exchange.begin("hola").unwrap();
        exchange.complete(Err(anyhow!("timeout")));

        let payload = exchange.begin("¿sigues ahí?").unwrap();
        assert_eq!(payload.len(), 3);
        assert!(exchange.last_error().is_none());

        exchange.complete(Ok(reply("Sí, dime.")));
        assert_eq!(exchange.conversation().len(), 4);
        assert!(!exchange.busy());
    }

    #[test]
    fn test_payload_snapshot_is_immune_to_later_mutation() {
        let mut exchange = Exchange::new("sistema");
        let payload = exchange.begin("hola").unwrap();
        exchange.complete(Ok(reply("buenas")));

        assert_eq!(payload.len(), 2);
        assert_eq!(exchange.conversation().len(), 3);
    }

    #[test]
    fn test_dismiss_error_clears_the_notice() {
        let mut exchange = Exchange::new("sistema");
        exchange.begin("hola").unwrap();
        exchange.complete(Err(anyhow!("dns")));
        assert!(exchange.last_error().is_some());

        exchange.dismiss_error();
        assert!(exchange.last_error().is_none());
    }
}
