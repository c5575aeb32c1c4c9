//! Protocol module for chat messages and completion outcomes
//!
//! This module defines the provider-neutral data model:
//! - Messages built from ordered, typed content parts
//! - Finish and filter reasons with wire-stable strings
//! - Token usage, log probabilities and the per-choice completion record

pub mod completion;
pub mod types;

pub use completion::{
    is_usage, ChoiceValidationError, CompletionChoice, CompletionChoiceBuilder, CompletionError,
    CompletionTokensDetails, FilterReason, FinishedCompletionReason, LogProbs,
    PromptTokensDetails, RequestId, TelemetryContext, TokenLogProb, ToolCall, ToolCallFunction,
    TopTokenLogProb, UnknownVariant, Usage,
};
pub use types::{
    CacheControl, CacheType, ContentPart, CopilotConfirmation, CopilotReference, FunctionCall,
    ImageDetail, Message, MessageBuilder, MessageContent, MessageToolCall, Role,
};
