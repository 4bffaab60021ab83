//! Automatic capture after each agent turn

use super::{Hook, HookEvent, HookInput, HookOutput};
use crate::client::{ChatMessage, OnomaClient};
use crate::config::OnomaConfig;
use crate::error::UnifiedError;
use crate::session::build_session_id;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, error};

/// Value of the `source` metadata field on every capture
pub const CAPTURE_SOURCE: &str = "openclaw";

/// Sends the trailing user/assistant exchange to the extraction endpoint
pub struct CaptureHook {
    client: Arc<OnomaClient>,
    config: Arc<OnomaConfig>,
}

impl CaptureHook {
    pub fn new(client: Arc<OnomaClient>, config: Arc<OnomaConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Hook for CaptureHook {
    fn event(&self) -> HookEvent {
        HookEvent::AgentEnd
    }

    async fn handle(&self, input: &HookInput) -> Option<HookOutput> {
        if !input.success || input.messages.is_empty() {
            return None;
        }

        let turn = last_turn(&input.messages);
        if turn.is_empty() {
            return None;
        }

        let session_id = input.session_key.as_deref().map(build_session_id);
        let metadata = capture_metadata(session_id.as_deref());

        match self.client.extract_context(&turn, Some(&metadata)).await {
            Ok(memories) => {
                if self.config.debug && !memories.is_empty() {
                    let session = session_id
                        .map(|id| format!(" (session: {})", id))
                        .unwrap_or_default();
                    debug!(
                        "onoma capture: stored {} memories from conversation{}",
                        memories.len(),
                        session
                    );
                }
            }
            Err(err) => error!("onoma capture failed: {}", err.message()),
        }

        None
    }
}

/// The trailing exchange: the last user message and every assistant message
/// after it.
///
/// Walks backwards collecting assistant messages until a user message is
/// met. Other roles are skipped. Without any user message the result holds
/// only assistant messages.
pub fn last_turn(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut turn = Vec::new();
    for message in messages.iter().rev() {
        if message.is_assistant() {
            turn.push(reduce(message));
        } else if message.is_user() {
            turn.push(reduce(message));
            break;
        }
    }
    turn.reverse();
    turn
}

fn reduce(message: &ChatMessage) -> ChatMessage {
    ChatMessage::new(message.role.clone(), message.content.clone())
}

/// `{source, timestamp, session_id?}` attached to each extraction
pub fn capture_metadata(session_id: Option<&str>) -> Value {
    let mut metadata = Map::new();
    metadata.insert("source".to_string(), json!(CAPTURE_SOURCE));
    metadata.insert(
        "timestamp".to_string(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    if let Some(id) = session_id {
        metadata.insert("session_id".to_string(), json!(id));
    }
    Value::Object(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn create_hook(base_url: &str) -> CaptureHook {
        let config = Arc::new(
            OnomaConfig::with_token("onm_test")
                .with_api_url(base_url)
                .with_debug(true),
        );
        let client = Arc::new(OnomaClient::new(&config).unwrap());
        CaptureHook::new(client, config)
    }

    fn conversation() -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("I moved to Porto last month"),
            ChatMessage::assistant("How are you finding it?"),
            ChatMessage::user("I love it, especially the food"),
            ChatMessage::assistant("Porto is known for francesinha."),
        ]
    }

    #[test]
    fn test_last_turn_takes_final_exchange() {
        let turn = last_turn(&conversation());
        assert_eq!(
            turn,
            vec![
                ChatMessage::user("I love it, especially the food"),
                ChatMessage::assistant("Porto is known for francesinha."),
            ]
        );
    }

    #[test]
    fn test_last_turn_keeps_trailing_assistant_messages() {
        let messages = vec![
            ChatMessage::user("Plan my week"),
            ChatMessage::assistant("Monday: gym"),
            ChatMessage::new("tool", "calendar result"),
            ChatMessage::assistant("Tuesday: rest"),
        ];
        let turn = last_turn(&messages);
        assert_eq!(turn.len(), 3);
        assert!(turn[0].is_user());
        assert_eq!(turn[2].content, "Tuesday: rest");
    }

    #[test]
    fn test_last_turn_without_user_is_assistant_only() {
        let messages = vec![
            ChatMessage::system("rules"),
            ChatMessage::assistant("Hello there"),
        ];
        assert_eq!(last_turn(&messages), vec![ChatMessage::assistant("Hello there")]);
        assert!(last_turn(&[ChatMessage::system("rules")]).is_empty());
    }

    #[test]
    fn test_metadata_shape() {
        let metadata = capture_metadata(Some("agent_main"));
        assert_eq!(metadata["source"], "openclaw");
        assert_eq!(metadata["session_id"], "agent_main");
        let timestamp = metadata["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());

        assert!(capture_metadata(None).get("session_id").is_none());
    }

    #[tokio::test]
    async fn test_capture_sends_last_turn() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/memory/extract"))
            .and(body_partial_json(json!({
                "messages": [
                    {"role": "user", "content": "I love it, especially the food"},
                    {"role": "assistant", "content": "Porto is known for francesinha."}
                ],
                "metadata": {"source": "openclaw", "session_id": "agent_main_web"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memories": [{"id": "m1", "content": "Lives in Porto"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let hook = create_hook(&mock_server.uri());
        let input = HookInput::agent_end(conversation(), true).with_session_key("agent:main/web");
        assert!(hook.handle(&input).await.is_none());
    }

    #[tokio::test]
    async fn test_capture_omits_session_without_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/memory/extract"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let hook = create_hook(&mock_server.uri());
        hook.handle(&HookInput::agent_end(conversation(), true)).await;

        let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["metadata"].get("session_id").is_none());
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_unsuccessful_or_empty_turns_make_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let hook = create_hook(&mock_server.uri());
        hook.handle(&HookInput::agent_end(conversation(), false)).await;
        hook.handle(&HookInput::agent_end(vec![], true)).await;
        hook.handle(&HookInput::agent_end(vec![ChatMessage::system("rules")], true))
            .await;
    }

    #[tokio::test]
    async fn test_extract_failure_is_swallowed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/memory/extract"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let hook = create_hook(&mock_server.uri());
        assert!(hook.handle(&HookInput::agent_end(conversation(), true)).await.is_none());
    }
}
