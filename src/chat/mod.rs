// Streamed chat sessions fanned out through the connection registry

use crate::error::Result;
use crate::gateway::AdviceGateway;
use crate::models::chat::ChatTurn;
use crate::ws::ConnectionRegistry;
use futures::StreamExt;
use std::time::Instant;
use tracing::warn;

pub const CHAT_FEATURE: &str = "chat";

/// Per-connection conversation state.
///
/// History is appended strictly in send-then-receive order: the user turn
/// once the stream opens, the model turn only after the stream completes.
/// A turn aborted mid-stream discards its partial output explicitly — it is
/// never half-recorded.
#[derive(Default)]
pub struct ChatSession {
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<ChatTurn>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Run one chat turn: stream the model's reply chunk by chunk to every
    /// live connection of `user_id`, then return the full reply text.
    pub async fn run_turn(
        &mut self,
        gateway: &AdviceGateway,
        registry: &ConnectionRegistry,
        user_id: i64,
        message: &str,
    ) -> Result<String> {
        let started = Instant::now();

        let mut stream = match gateway.stream_chat(message, &self.history).await {
            Ok(stream) => stream,
            Err(e) => {
                gateway.record_stream_outcome(CHAT_FEATURE, false, started.elapsed().as_secs_f64());
                return Err(e);
            }
        };

        self.history.push(ChatTurn::user(message));

        let mut full_response = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(text) => {
                    registry.send_to_user(user_id, &text).await;
                    full_response.push_str(&text);
                }
                Err(e) => {
                    gateway.record_stream_outcome(
                        CHAT_FEATURE,
                        false,
                        started.elapsed().as_secs_f64(),
                    );
                    if !full_response.is_empty() {
                        warn!(
                            "Discarding {} chars of partial chat output for user {} after stream error",
                            full_response.len(),
                            user_id
                        );
                    }
                    return Err(e);
                }
            }
        }

        if !full_response.is_empty() {
            self.history.push(ChatTurn::model(full_response.clone()));
        }
        gateway.record_stream_outcome(CHAT_FEATURE, true, started.elapsed().as_secs_f64());

        Ok(full_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_empty() {
        let session = ChatSession::new();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_session_with_prior_history() {
        let session = ChatSession::with_history(vec![
            ChatTurn::user("hi"),
            ChatTurn::model("hello!"),
        ]);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, "user");
        assert_eq!(session.history()[1].role, "model");
    }
}
