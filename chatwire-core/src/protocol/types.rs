//! Provider-neutral chat message types
//!
//! These are the values produced by the prompt-building layer and handed to
//! the wire converter. The design prioritizes:
//! - Type safety through closed enums instead of runtime probing
//! - Explicit optional extension fields that are omitted when absent
//! - Preservation of content part order

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
    /// Function call result
    Function,
    /// Tool response
    Tool,
}

impl Role {
    /// Wire string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a cache-control annotation. Only ephemeral caching exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    #[default]
    Ephemeral,
}

/// Cache-control annotation attached to a wire message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheControl {
    #[serde(rename = "type")]
    pub cache_type: CacheType,
}

impl CacheControl {
    /// The `{"type": "ephemeral"}` annotation
    pub const fn ephemeral() -> Self {
        Self {
            cache_type: CacheType::Ephemeral,
        }
    }
}

/// Requested fidelity for an image part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    High,
    Auto,
}

/// Individual unit of message content
///
/// Order of parts inside a message is significant and is preserved by every
/// conversion. New modalities are added as new variants, so matches outside
/// this crate need a wildcard arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentPart {
    /// A span of text
    Text { text: String },
    /// Marks where the provider may apply prompt caching. Carries no text.
    CacheBreakpoint {
        #[serde(default)]
        cache_type: CacheType,
    },
    /// Image referenced by URL or data URL
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<ImageDetail>,
    },
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Create an ephemeral cache-boundary marker
    pub fn cache_breakpoint() -> Self {
        ContentPart::CacheBreakpoint {
            cache_type: CacheType::Ephemeral,
        }
    }

    /// Create an image part without an explicit detail level
    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::Image {
            url: url.into(),
            detail: None,
        }
    }

    /// Short name of the variant, used in logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            ContentPart::Text { .. } => "text",
            ContentPart::CacheBreakpoint { .. } => "cache_breakpoint",
            ContentPart::Image { .. } => "image",
        }
    }

    /// Text carried by this part, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_cache_breakpoint(&self) -> bool {
        matches!(self, ContentPart::CacheBreakpoint { .. })
    }
}

/// Content of a message
///
/// `Text` is the legacy single-string form and is equivalent to one text part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Ordered content parts
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(s) => s.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }

    /// Get the legacy string form, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s.as_str()),
            MessageContent::Parts(_) => None,
        }
    }

    /// Concatenate all text spans in order. Markers contribute nothing.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts.iter().filter_map(ContentPart::as_text).collect(),
        }
    }

    /// Whether any part is a cache-boundary marker
    pub fn has_cache_breakpoint(&self) -> bool {
        match self {
            MessageContent::Text(_) => false,
            MessageContent::Parts(parts) => parts.iter().any(ContentPart::is_cache_breakpoint),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        MessageContent::Parts(parts)
    }
}

/// Reference to a capability (agent, skill, file...) the message relates to.
/// Copied to the wire as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotReference {
    #[serde(rename = "type")]
    pub reference_type: String,

    pub id: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// User confirmation attached to a message. The payload is opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotConfirmation {
    pub state: String,
    pub confirmation: serde_json::Value,
}

/// Function invoked by an assistant tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to call
    pub name: String,

    /// Arguments to the function (usually a JSON string, never parsed here)
    pub arguments: String,
}

/// Tool call carried on an assistant message in the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageToolCall {
    pub id: String,

    #[serde(rename = "type", default = "default_tool_type")]
    pub tool_type: String,

    pub function: FunctionCall,
}

fn default_tool_type() -> String {
    "function".to_string()
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Content of the message. `null` or a missing field (assistant turns
    /// that only call tools) decodes as an empty part list.
    #[serde(default = "empty_content", deserialize_with = "deserialize_nullable_content")]
    pub content: MessageContent,

    /// Optional name for the message sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tool calls (assistant messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<MessageToolCall>>,

    /// Tool call being answered (tool messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_references: Option<Vec<CopilotReference>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_confirmations: Option<Vec<CopilotConfirmation>>,
}

fn empty_content() -> MessageContent {
    MessageContent::Parts(Vec::new())
}

fn deserialize_nullable_content<'de, D>(deserializer: D) -> Result<MessageContent, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<MessageContent>::deserialize(deserializer)?.unwrap_or_else(empty_content))
}

// ============================================================================
// Builder and convenience constructors
// ============================================================================

/// Builder for constructing messages
pub struct MessageBuilder {
    role: Role,
    content: MessageContent,
    name: Option<String>,
    tool_calls: Option<Vec<MessageToolCall>>,
    tool_call_id: Option<String>,
    copilot_references: Option<Vec<CopilotReference>>,
    copilot_confirmations: Option<Vec<CopilotConfirmation>>,
}

impl MessageBuilder {
    /// Create a new message builder with role and legacy text content
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::with_content(role, MessageContent::Text(content.into()))
    }

    /// Create a new message builder with role and content parts
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self::with_content(role, MessageContent::Parts(parts))
    }

    fn with_content(role: Role, content: MessageContent) -> Self {
        Self {
            role,
            content,
            name: None,
            tool_calls: None,
            tool_call_id: None,
            copilot_references: None,
            copilot_confirmations: None,
        }
    }

    /// Set the name field
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tool call
    pub fn with_tool_call(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        self.tool_calls.get_or_insert_with(Vec::new).push(MessageToolCall {
            id: id.into(),
            tool_type: default_tool_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        });
        self
    }

    /// Set the tool call this message answers
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Add a capability reference
    pub fn with_reference(mut self, reference: CopilotReference) -> Self {
        self.copilot_references
            .get_or_insert_with(Vec::new)
            .push(reference);
        self
    }

    /// Add a confirmation record
    pub fn with_confirmation(
        mut self,
        state: impl Into<String>,
        confirmation: serde_json::Value,
    ) -> Self {
        self.copilot_confirmations
            .get_or_insert_with(Vec::new)
            .push(CopilotConfirmation {
                state: state.into(),
                confirmation,
            });
        self
    }

    /// Build the message
    pub fn build(self) -> Message {
        Message {
            role: self.role,
            content: self.content,
            name: self.name,
            tool_calls: self.tool_calls,
            tool_call_id: self.tool_call_id,
            copilot_references: self.copilot_references,
            copilot_confirmations: self.copilot_confirmations,
        }
    }
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        MessageBuilder::new(Role::System, content).build()
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        MessageBuilder::new(Role::User, content).build()
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        MessageBuilder::new(Role::Assistant, content).build()
    }

    /// Create a function response message
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        MessageBuilder::new(Role::Function, content)
            .with_name(name)
            .build()
    }

    /// Create a tool response message
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        MessageBuilder::new(Role::Tool, content)
            .with_tool_call_id(tool_call_id)
            .build()
    }

    /// Create a message from content parts
    pub fn from_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        MessageBuilder::with_parts(role, parts).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_part_tags() {
        assert_eq!(
            serde_json::to_value(ContentPart::text("hi")).unwrap(),
            json!({"type": "text", "text": "hi"})
        );
        assert_eq!(
            serde_json::to_value(ContentPart::cache_breakpoint()).unwrap(),
            json!({"type": "cache_breakpoint", "cache_type": "ephemeral"})
        );

        let part: ContentPart = serde_json::from_value(json!({"type": "cache_breakpoint"})).unwrap();
        assert!(part.is_cache_breakpoint());
    }

    #[test]
    fn test_unknown_part_tag_is_rejected() {
        let result: Result<ContentPart, _> =
            serde_json::from_value(json!({"type": "hologram", "data": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_content_text_skips_markers() {
        let content = MessageContent::Parts(vec![
            ContentPart::text("a "),
            ContentPart::cache_breakpoint(),
            ContentPart::image("https://example.com/x.png"),
            ContentPart::text("b"),
        ]);
        assert_eq!(content.text(), "a b");
        assert!(content.has_cache_breakpoint());
        assert!(!MessageContent::from("plain").has_cache_breakpoint());
    }

    #[test]
    fn test_absent_extensions_are_not_serialized() {
        let value = serde_json::to_value(Message::user("hello")).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_null_content_is_empty_parts() {
        let message: Message = serde_json::from_value(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [
                {"id": "call_1", "type": "function", "function": {"name": "f", "arguments": "{}"}}
            ]
        }))
        .unwrap();
        assert_eq!(message.content, MessageContent::Parts(Vec::new()));
        assert!(message.content.is_empty());

        let missing: Message = serde_json::from_value(json!({"role": "assistant"})).unwrap();
        assert!(missing.content.is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Tool.to_string(), "tool");
        assert_eq!(serde_json::to_value(Role::Function).unwrap(), json!("function"));
    }
}
