#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::event::*;
    use crate::wire::*;
    use crate::config::*;
    use crate::session::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content.as_text(), "Hello");
        assert!(!msg.content.has_image());
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("I can help");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content.as_text(), "I can help");
    }

    #[test]
    fn test_user_with_image_marker() {
        let msg = Message::user_with_image_marker("what is this?");
        assert_eq!(msg.content.as_text(), "[Image attached]\nwhat is this?");

        let msg = Message::user_with_image_marker("");
        assert_eq!(msg.content.as_text(), "[Image attached]\n(no text)");
    }

    #[test]
    fn test_user_with_image_parts() {
        let msg = Message::user_with_image("look", "data:image/png;base64,AAAA");
        assert!(msg.content.has_image());
        assert_eq!(msg.content.as_text(), "look");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "look");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_text_content_serializes_as_plain_string() {
        let json = serde_json::to_value(Message::system("rules")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "rules"}));
    }

    #[test]
    fn test_message_content_empty_parts() {
        let content = MessageContent::Parts(vec![]);
        assert_eq!(content.as_text(), "");
        assert!(!content.has_image());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(serde_json::from_str::<Role>(r#""tool""#).is_err());
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new_is_seeded() {
        let session = Session::new("New chat", "hello there");
        assert_eq!(session.title, "New chat");
        assert_eq!(session.messages, vec![Message::assistant("hello there")]);
        assert!(uuid::Uuid::parse_str(&session.id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&session.created_at).is_ok());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new("t", "g");
        let b = Session::new("t", "g");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_session_collection_roundtrip() {
        let mut first = Session::new("Fix this null pointer ex…", "hi");
        first.messages.push(Message::user("Fix this null pointer exception please"));
        first.messages.push(Message::assistant("Check the receiver."));
        let second = Session::new("New chat", "hi");
        let sessions = vec![second, first];

        let json = serde_json::to_vec(&sessions).unwrap();
        let back: Vec<Session> = serde_json::from_slice(&json).unwrap();
        assert_eq!(back, sessions);
    }

    #[test]
    fn test_session_summary() {
        let session = Session::new("t", "g");
        let summary = session.summary();
        assert_eq!(summary.id, session.id);
        assert_eq!(summary.message_count, 1);
    }

    // ─── Wire Tests ──────────────────────────────────────────

    #[test]
    fn test_request_field_names() {
        let req = CompletionRequest {
            message: "hi".to_string(),
            image_base64: None,
            history: vec![HistoryEntry { role: Role::User, content: "a".to_string() }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "hi");
        assert!(json["imageBase64"].is_null());
        assert_eq!(json["history"][0]["role"], "user");
    }

    #[test]
    fn test_request_defaults_for_missing_fields() {
        let req: CompletionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, CompletionRequest::default());

        let req: CompletionRequest =
            serde_json::from_str(r#"{"message":"x","imageBase64":null}"#).unwrap();
        assert_eq!(req.message, "x");
        assert!(req.image().is_none());
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_request_null_fields_take_defaults() {
        let req: CompletionRequest =
            serde_json::from_str(r#"{"message":null,"imageBase64":null,"history":null}"#).unwrap();
        assert_eq!(req, CompletionRequest::default());

        let req: CompletionRequest =
            serde_json::from_str(r#"{"message":"hi","history":null}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.history.is_empty());

        // wrong types are still rejected
        assert!(serde_json::from_str::<CompletionRequest>(r#"{"history":"nope"}"#).is_err());
    }

    #[test]
    fn test_request_blank_image_is_absent() {
        let req = CompletionRequest {
            image_base64: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(req.image().is_none());

        let req = CompletionRequest {
            image_base64: Some("data:image/png;base64,AA".to_string()),
            ..Default::default()
        };
        assert_eq!(req.image(), Some("data:image/png;base64,AA"));
    }

    #[test]
    fn test_history_entry_from_message() {
        let entry = HistoryEntry::from_message(&Message::assistant("sure"));
        assert_eq!(entry.role, Role::Assistant);
        assert_eq!(entry.content, "sure");
        assert_eq!(entry.into_message(), Message::assistant("sure"));
    }

    #[test]
    fn test_reply_shape() {
        let json = serde_json::to_string(&CompletionReply::new("ok")).unwrap();
        assert_eq!(json, r#"{"reply":"ok"}"#);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::ReplyReceived { session_id: "s1".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.history_window, 10);
        assert_eq!(config.title_max_chars, 24);
        assert_eq!(config.default_title, DEFAULT_TITLE);
        assert!(!config.greeting.is_empty());
        assert_eq!(config.storage, StorageBackendType::Auto);
    }

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 1200);
        assert!((config.temperature - 0.25).abs() < f32::EPSILON);
        assert!(!config.system_prompt.starts_with('\n'));
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_provider_config_custom_base_trims_slash() {
        let config = ProviderConfig {
            api_base: Some("http://localhost:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(LlmProvider::parse("OpenAI"), Some(LlmProvider::OpenAI));
        assert_eq!(LlmProvider::parse("deepseek"), Some(LlmProvider::DeepSeek));
        assert_eq!(LlmProvider::parse("nope"), None);
        assert_eq!(LlmProvider::DeepSeek.label(), "DeepSeek");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(ChatError::Storage("full".to_string()).to_string(), "Storage error: full");
        assert_eq!(
            ChatError::SessionNotFound("abc".to_string()).to_string(),
            "Session not found: abc"
        );
        assert_eq!(ChatError::Busy.to_string(), "A request is already in flight");
    }

    #[test]
    fn test_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let chat_err: ChatError = err.into();
        assert!(matches!(chat_err, ChatError::Serialization(_)));
    }
}
