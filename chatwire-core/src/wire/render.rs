//! Mode-specific rendering of messages
//!
//! A renderer maps role, content parts and the standard message fields into
//! a [`WireMessage`]. It does not touch the `copilot_*` extension fields or
//! whitespace; the converter applies those afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::RenderError;
use super::types::{WireContent, WireContentPart, WireImageUrl, WireMessage};
use crate::protocol::{ContentPart, ImageDetail, Message, MessageContent, Role};

/// Output format a renderer targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// OpenAI chat completion messages
    #[default]
    OpenAi,
    /// Parts mapped one to one, cache markers included
    Passthrough,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::OpenAi => "openai",
            RenderMode::Passthrough => "passthrough",
        }
    }

    /// Renderer for this mode with default settings
    pub fn renderer(&self) -> Box<dyn ContentRenderer> {
        match self {
            RenderMode::OpenAi => Box::new(OpenAiRenderer::default()),
            RenderMode::Passthrough => Box::new(PassthroughRenderer),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a message into a target wire format
pub trait ContentRenderer: Send + Sync {
    /// The mode this renderer implements
    fn mode(&self) -> RenderMode;

    /// Render role, content and standard fields
    fn render(&self, message: &Message) -> Result<WireMessage, RenderError>;
}

/// Copy the fields every mode carries unchanged
fn with_standard_fields(message: &Message, content: WireContent) -> WireMessage {
    WireMessage {
        name: message.name.clone(),
        tool_calls: message.tool_calls.clone(),
        tool_call_id: message.tool_call_id.clone(),
        ..WireMessage::new(message.role, content)
    }
}

/// OpenAI chat rendering
///
/// User messages keep a typed part list. Every other role only accepts
/// text, so its text parts are joined in order into one string. Cache
/// markers have no part form here; the converter expresses them through
/// `copilot_cache_control`.
#[derive(Debug, Clone, Default)]
pub struct OpenAiRenderer {
    /// Detail applied to image parts that do not specify one
    pub default_image_detail: Option<ImageDetail>,
}

impl OpenAiRenderer {
    pub fn new(default_image_detail: Option<ImageDetail>) -> Self {
        Self {
            default_image_detail,
        }
    }

    fn render_user_parts(&self, parts: &[ContentPart]) -> Vec<WireContentPart> {
        parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(WireContentPart::text(text.clone())),
                ContentPart::Image { url, detail } => Some(WireContentPart::ImageUrl {
                    image_url: WireImageUrl {
                        url: url.clone(),
                        detail: detail.or(self.default_image_detail),
                    },
                }),
                ContentPart::CacheBreakpoint { .. } => None,
            })
            .collect()
    }

    fn render_string_only(&self, role: Role, parts: &[ContentPart]) -> Result<String, RenderError> {
        let mut text = String::new();
        for part in parts {
            match part {
                ContentPart::Text { text: span } => text.push_str(span),
                ContentPart::CacheBreakpoint { .. } => {}
                ContentPart::Image { .. } => {
                    return Err(RenderError::UnsupportedPart {
                        role,
                        kind: part.kind(),
                        mode: RenderMode::OpenAi,
                    })
                }
            }
        }
        Ok(text)
    }
}

impl ContentRenderer for OpenAiRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::OpenAi
    }

    fn render(&self, message: &Message) -> Result<WireMessage, RenderError> {
        let content = match (&message.content, message.role) {
            (MessageContent::Text(text), _) => WireContent::Text(text.clone()),
            (MessageContent::Parts(parts), Role::User) => {
                WireContent::Parts(self.render_user_parts(parts))
            }
            (MessageContent::Parts(parts), role) => {
                WireContent::Text(self.render_string_only(role, parts)?)
            }
        };
        Ok(with_standard_fields(message, content))
    }
}

/// One-to-one rendering that keeps cache markers as typed parts
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl ContentRenderer for PassthroughRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Passthrough
    }

    fn render(&self, message: &Message) -> Result<WireMessage, RenderError> {
        let content = match &message.content {
            MessageContent::Text(text) => WireContent::Text(text.clone()),
            MessageContent::Parts(parts) => WireContent::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text { text } => WireContentPart::text(text.clone()),
                        ContentPart::CacheBreakpoint { cache_type } => {
                            WireContentPart::CacheBreakpoint {
                                cache_type: *cache_type,
                            }
                        }
                        ContentPart::Image { url, detail } => WireContentPart::ImageUrl {
                            image_url: WireImageUrl {
                                url: url.clone(),
                                detail: *detail,
                            },
                        },
                    })
                    .collect(),
            ),
        };
        Ok(with_standard_fields(message, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MessageBuilder;

    #[test]
    fn test_openai_user_parts_drop_markers() {
        let message = Message::from_parts(
            Role::User,
            vec![
                ContentPart::text("a"),
                ContentPart::cache_breakpoint(),
                ContentPart::image("https://example.com/cat.png"),
            ],
        );
        let wire = OpenAiRenderer::new(Some(ImageDetail::High))
            .render(&message)
            .unwrap();

        let WireContent::Parts(parts) = wire.content else {
            panic!("expected parts");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            WireContentPart::ImageUrl {
                image_url: WireImageUrl {
                    url: "https://example.com/cat.png".to_string(),
                    detail: Some(ImageDetail::High),
                }
            }
        );
    }

    #[test]
    fn test_openai_system_parts_join_to_string() {
        let message = Message::from_parts(
            Role::System,
            vec![
                ContentPart::text("You are "),
                ContentPart::cache_breakpoint(),
                ContentPart::text("helpful."),
            ],
        );
        let wire = OpenAiRenderer::default().render(&message).unwrap();
        assert_eq!(wire.content, WireContent::Text("You are helpful.".to_string()));
    }

    #[test]
    fn test_openai_rejects_image_outside_user() {
        let message = Message::from_parts(
            Role::Assistant,
            vec![ContentPart::image("https://example.com/cat.png")],
        );
        let err = OpenAiRenderer::default().render(&message).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedPart {
                role: Role::Assistant,
                kind: "image",
                mode: RenderMode::OpenAi,
            }
        );
    }

    #[test]
    fn test_standard_fields_copied() {
        let message = MessageBuilder::new(Role::Assistant, "")
            .with_name("planner")
            .with_tool_call("call_1", "search", "{\"q\":\"rust\"}")
            .build();
        let wire = PassthroughRenderer.render(&message).unwrap();
        assert_eq!(wire.name.as_deref(), Some("planner"));
        assert_eq!(wire.tool_calls, message.tool_calls);
        assert!(wire.copilot_cache_control.is_none());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            serde_json::to_value(RenderMode::OpenAi).unwrap(),
            serde_json::json!("openai")
        );
        assert_eq!(RenderMode::Passthrough.renderer().mode(), RenderMode::Passthrough);
    }
}
