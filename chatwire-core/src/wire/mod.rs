//! Wire conversion
//!
//! This module turns protocol messages into the JSON shape the completion
//! endpoint accepts: mode-specific rendering, verbatim extension fields,
//! trailing-whitespace normalization and cache-control derivation.

pub mod converter;
pub mod error;
pub mod render;
pub mod types;

pub use converter::{normalize_trailing_whitespace, to_wire, ToWire, WireConverter};
pub use error::{RenderError, WireError, WireResult};
pub use render::{ContentRenderer, OpenAiRenderer, PassthroughRenderer, RenderMode};
pub use types::{WireContent, WireContentPart, WireImageUrl, WireMessage};
