//! Tests for the message model

use chatwire_core::protocol::*;
use serde_json::json;

#[test]
fn test_message_construction() {
    let sys_msg = Message::system("You are a helpful assistant");
    assert_eq!(sys_msg.role, Role::System);
    assert_eq!(sys_msg.content.as_text(), Some("You are a helpful assistant"));

    let func_msg = Message::function("get_weather", "{\"temp\": 72}");
    assert_eq!(func_msg.role, Role::Function);
    assert_eq!(func_msg.name, Some("get_weather".to_string()));

    let tool_msg = Message::tool("call_123", "Tool result");
    assert_eq!(tool_msg.role, Role::Tool);
    assert_eq!(tool_msg.tool_call_id, Some("call_123".to_string()));
}

#[test]
fn test_message_builder() {
    let msg = MessageBuilder::with_parts(
        Role::User,
        vec![ContentPart::text("look"), ContentPart::cache_breakpoint()],
    )
    .with_name("octocat")
    .with_confirmation("dismissed", json!({"id": 7}))
    .build();

    assert_eq!(msg.name.as_deref(), Some("octocat"));
    assert_eq!(msg.copilot_confirmations.as_ref().map(Vec::len), Some(1));
    assert!(msg.copilot_references.is_none());
    assert!(msg.content.has_cache_breakpoint());
}

#[test]
fn test_legacy_string_content_deserializes() {
    let msg: Message = serde_json::from_value(json!({"role": "user", "content": "hi"})).unwrap();
    assert_eq!(msg.content, MessageContent::Text("hi".to_string()));
    assert_eq!(msg.content.text(), "hi");
}

#[test]
fn test_parts_content_round_trip() {
    let value = json!({
        "role": "assistant",
        "content": [
            {"type": "text", "text": "a"},
            {"type": "cache_breakpoint", "cache_type": "ephemeral"},
            {"type": "image", "url": "data:image/png;base64,AAAA", "detail": "auto"}
        ],
        "tool_calls": [
            {"id": "call_1", "type": "function", "function": {"name": "f", "arguments": "{}"}}
        ]
    });
    let msg: Message = serde_json::from_value(value.clone()).unwrap();

    let MessageContent::Parts(parts) = &msg.content else {
        panic!("expected parts");
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[2].kind(), "image");
    assert_eq!(serde_json::to_value(&msg).unwrap(), value);
}

#[test]
fn test_tool_type_defaults_to_function() {
    let call: MessageToolCall = serde_json::from_value(json!({
        "id": "call_1",
        "function": {"name": "f", "arguments": "{}"}
    }))
    .unwrap();
    assert_eq!(call.tool_type, "function");
}

#[test]
fn test_cache_control_shape() {
    assert_eq!(
        serde_json::to_value(CacheControl::ephemeral()).unwrap(),
        json!({"type": "ephemeral"})
    );
}
