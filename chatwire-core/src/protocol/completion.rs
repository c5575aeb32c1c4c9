//! Completion outcome types
//!
//! Everything here describes data received from the completion transport:
//! how a choice ended, why content was filtered, token accounting and
//! per-token log probabilities. Nothing in this module fetches that data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::types::Message;

/// How a generated choice ended
///
/// The string values are a wire contract shared with the transport and
/// compared literally elsewhere. They must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishedCompletionReason {
    /// The model reached a natural stop point or a stop sequence
    #[serde(rename = "stop")]
    Stop,
    /// The token limit was reached
    #[serde(rename = "length")]
    Length,
    /// The model called a function
    #[serde(rename = "function_call")]
    FunctionCall,
    /// The model called one or more tools
    #[serde(rename = "tool_calls")]
    ToolCalls,
    /// Content was omitted by the content filter
    #[serde(rename = "content_filter")]
    ContentFilter,
    /// The server reported an error for this choice
    #[serde(rename = "error")]
    ServerError,
    /// Client-synthesized: the stream ended without a finish reason
    #[serde(rename = "Iteration Done")]
    ClientIterationDone,
    /// Client-synthesized: the stream ended without a finish reason
    #[serde(rename = "DONE")]
    ClientDone,
}

impl FinishedCompletionReason {
    /// All members, server values first
    pub const ALL: [FinishedCompletionReason; 8] = [
        Self::Stop,
        Self::Length,
        Self::FunctionCall,
        Self::ToolCalls,
        Self::ContentFilter,
        Self::ServerError,
        Self::ClientIterationDone,
        Self::ClientDone,
    ];

    /// Wire string for this reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::FunctionCall => "function_call",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::ServerError => "error",
            Self::ClientIterationDone => "Iteration Done",
            Self::ClientDone => "DONE",
        }
    }

    /// Whether the client assigned this reason instead of the server
    pub fn is_client_synthesized(&self) -> bool {
        matches!(self, Self::ClientIterationDone | Self::ClientDone)
    }

    /// Whether this value came from the server
    pub fn is_server_reported(&self) -> bool {
        !self.is_client_synthesized()
    }

    /// Whether the stream ended without any terminal signal. Both client
    /// sentinels mean this and indicate an upstream defect.
    pub fn is_missing_finish_signal(&self) -> bool {
        self.is_client_synthesized()
    }
}

impl fmt::Display for FinishedCompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known wire token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for FinishedCompletionReason {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "finish reason",
                value: s.to_string(),
            })
    }
}

/// Category of why content was filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterReason {
    #[serde(rename = "hate")]
    Hate,
    #[serde(rename = "self_harm")]
    SelfHarm,
    #[serde(rename = "sexual")]
    Sexual,
    #[serde(rename = "violence")]
    Violence,
    /// Matched public code. The wire token differs from the name.
    #[serde(rename = "snippy")]
    Copyright,
    /// The prompt itself was filtered
    #[serde(rename = "prompt")]
    Prompt,
}

impl FilterReason {
    pub const ALL: [FilterReason; 6] = [
        Self::Hate,
        Self::SelfHarm,
        Self::Sexual,
        Self::Violence,
        Self::Copyright,
        Self::Prompt,
    ];

    /// Wire string for this reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hate => "hate",
            Self::SelfHarm => "self_harm",
            Self::Sexual => "sexual",
            Self::Violence => "violence",
            Self::Copyright => "snippy",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterReason {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "filter reason",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Usage
// ============================================================================

/// Prompt-side token breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptTokensDetails {
    #[serde(default)]
    pub cached_tokens: u32,
}

/// Completion-side token breakdown, sent only by reasoning or
/// prediction-capable models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: u32,
    #[serde(default)]
    pub accepted_prediction_tokens: u32,
    #[serde(default)]
    pub rejected_prediction_tokens: u32,
}

/// Token usage information
///
/// `prompt_tokens + completion_tokens == total_tokens` holds only if the
/// producer made it so; nothing here checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,

    #[serde(default)]
    pub prompt_tokens_details: PromptTokensDetails,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

impl Usage {
    /// Parse a loosely typed value, returning `None` unless it passes
    /// [`is_usage`] and fits the typed shape.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        if !is_usage(value) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn cached_tokens(&self) -> u32 {
        self.prompt_tokens_details.cached_tokens
    }

    pub fn reasoning_tokens(&self) -> Option<u32> {
        self.completion_tokens_details.map(|d| d.reasoning_tokens)
    }
}

/// Whether `value` looks like a usage record
///
/// Only `prompt_tokens`, `completion_tokens` and `total_tokens` are checked,
/// and only for being numbers. Detail objects are not required. `Null`
/// stands in for an absent value and is rejected.
pub fn is_usage(value: &serde_json::Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    ["prompt_tokens", "completion_tokens", "total_tokens"]
        .iter()
        .all(|field| object.get(*field).is_some_and(serde_json::Value::is_number))
}

// ============================================================================
// Tool calls and log probabilities
// ============================================================================

/// Function part of a received tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    /// Opaque argument text
    pub arguments: String,
}

/// Tool call as received from the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub index: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<ToolCallFunction>,
}

/// Log probability of a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLogProb {
    pub token: String,
    pub logprob: f64,
    /// UTF-8 bytes of the token; the server sends `null` when it has none
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
}

/// A generated token with its most likely alternatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTokenLogProb {
    #[serde(flatten)]
    pub token: TokenLogProb,
    #[serde(default)]
    pub top_logprobs: Vec<TokenLogProb>,
}

/// Log probabilities over every generated token, in generation order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogProbs {
    #[serde(default)]
    pub content: Vec<TopTokenLogProb>,
}

impl LogProbs {
    /// Generated tokens in order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(|entry| entry.token.token.as_str())
    }

    /// Sum of the chosen tokens' log probabilities
    pub fn total_logprob(&self) -> f64 {
        self.content.iter().map(|entry| entry.token.logprob).sum()
    }
}

// ============================================================================
// Completion choice
// ============================================================================

/// Identifiers the server attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestId {
    pub header_request_id: String,
    pub completion_id: String,
    pub created: i64,
    #[serde(default)]
    pub deployment_id: String,
    #[serde(default)]
    pub server_experiments: String,
}

/// Telemetry carried alongside a choice. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryContext {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub measurements: HashMap<String, f64>,
}

/// Error reported for a completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Invariant violations found by [`CompletionChoice::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceValidationError {
    #[error("choice {choice_index} is finished but has no finish reason")]
    MissingFinishReason { choice_index: u32 },
}

/// One generated choice, as assembled by the response decoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub message: Message,
    pub choice_index: u32,
    pub request_id: RequestId,
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub block_finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishedCompletionReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_reason: Option<FilterReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<LogProbs>,
    #[serde(default)]
    pub telemetry: TelemetryContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CompletionError>,
}

impl CompletionChoice {
    /// Decode a choice received from the transport, logging invariant
    /// violations. The choice is returned either way.
    pub fn decode(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let choice: CompletionChoice = serde_json::from_value(value)?;
        if let Err(err) = choice.validate() {
            tracing::warn!(
                choice_index = choice.choice_index,
                request_id = %choice.request_id.header_request_id,
                error = %err,
                "decoded choice violates completion invariants"
            );
        }
        Ok(choice)
    }

    /// Check that a finished choice carries a finish reason
    pub fn validate(&self) -> Result<(), ChoiceValidationError> {
        if self.block_finished && self.finish_reason.is_none() {
            return Err(ChoiceValidationError::MissingFinishReason {
                choice_index: self.choice_index,
            });
        }
        Ok(())
    }

    /// A choice with an error is never usable, whatever its finish reason
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && !(self.block_finished && self.finish_reason.is_none())
    }

    /// Whether the content filter cut this choice short
    pub fn was_filtered(&self) -> bool {
        self.filter_reason.is_some()
            || self.finish_reason == Some(FinishedCompletionReason::ContentFilter)
    }

    /// Generated text reassembled from the token sequence
    pub fn text(&self) -> String {
        self.tokens.concat()
    }
}

/// Builder used by response decoders and tests
pub struct CompletionChoiceBuilder {
    choice: CompletionChoice,
}

impl CompletionChoiceBuilder {
    pub fn new(message: Message, choice_index: u32, request_id: RequestId) -> Self {
        Self {
            choice: CompletionChoice {
                message,
                choice_index,
                request_id,
                tokens: Vec::new(),
                usage: None,
                block_finished: false,
                finish_reason: None,
                filter_reason: None,
                logprobs: None,
                telemetry: TelemetryContext::default(),
                error: None,
            },
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.choice.tokens = tokens;
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.choice.usage = Some(usage);
        self
    }

    /// Mark the choice finished with the given reason
    pub fn finished(mut self, reason: FinishedCompletionReason) -> Self {
        self.choice.block_finished = true;
        self.choice.finish_reason = Some(reason);
        self
    }

    pub fn with_filter_reason(mut self, reason: FilterReason) -> Self {
        self.choice.filter_reason = Some(reason);
        self
    }

    pub fn with_logprobs(mut self, logprobs: LogProbs) -> Self {
        self.choice.logprobs = Some(logprobs);
        self
    }

    pub fn with_telemetry(mut self, telemetry: TelemetryContext) -> Self {
        self.choice.telemetry = telemetry;
        self
    }

    pub fn with_error(mut self, error: CompletionError) -> Self {
        self.choice.error = Some(error);
        self
    }

    pub fn build(self) -> CompletionChoice {
        self.choice
    }
}
