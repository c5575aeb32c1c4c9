//! Wire message types
//!
//! These match the JSON shape the completion endpoint accepts. Field names
//! are part of the contract and must not change.

use serde::{Deserialize, Serialize};

use crate::protocol::{
    CacheControl, CacheType, CopilotConfirmation, CopilotReference, ImageDetail, MessageToolCall,
    Role,
};

/// Message as sent to the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,

    pub content: WireContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<MessageToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_references: Option<Vec<CopilotReference>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_confirmations: Option<Vec<CopilotConfirmation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_cache_control: Option<CacheControl>,
}

impl WireMessage {
    /// A bare message with only role and content set
    pub fn new(role: Role, content: WireContent) -> Self {
        Self {
            role,
            content,
            name: None,
            tool_calls: None,
            tool_call_id: None,
            copilot_references: None,
            copilot_confirmations: None,
            copilot_cache_control: None,
        }
    }
}

/// Wire content: a single string or a list of typed parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<WireContentPart>),
}

impl WireContent {
    /// Concatenate text payloads in order
    pub fn text(&self) -> String {
        match self {
            WireContent::Text(text) => text.clone(),
            WireContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    WireContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Number of payload entries: 1 for a string, else the part count
    pub fn part_count(&self) -> usize {
        match self {
            WireContent::Text(_) => 1,
            WireContent::Parts(parts) => parts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            WireContent::Text(text) => text.is_empty(),
            WireContent::Parts(parts) => parts.is_empty(),
        }
    }
}

/// Typed wire content part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireContentPart {
    Text { text: String },
    ImageUrl { image_url: WireImageUrl },
    CacheBreakpoint { cache_type: CacheType },
}

impl WireContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        WireContentPart::Text { text: text.into() }
    }
}

/// Image URL payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireImageUrl {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}
