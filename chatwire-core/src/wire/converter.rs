//! Conversion from protocol messages to wire messages

use tracing::{debug, trace};

use super::error::WireResult;
use super::render::{ContentRenderer, OpenAiRenderer, RenderMode};
use super::types::{WireContent, WireContentPart, WireMessage};
use crate::config::WireConfig;
use crate::protocol::{CacheControl, Message};

/// Converts messages to the wire format using a mode-specific renderer
///
/// Holds no state besides the renderer, so one converter can be shared
/// across threads.
pub struct WireConverter {
    renderer: Box<dyn ContentRenderer>,
}

impl Default for WireConverter {
    fn default() -> Self {
        Self::new(Box::new(OpenAiRenderer::default()))
    }
}

impl WireConverter {
    /// Create a converter around a renderer
    pub fn new(renderer: Box<dyn ContentRenderer>) -> Self {
        Self { renderer }
    }

    /// Create a converter with the default renderer for `mode`
    pub fn for_mode(mode: RenderMode) -> Self {
        Self::new(mode.renderer())
    }

    /// Create a converter from loaded configuration
    pub fn from_config(config: &WireConfig) -> Self {
        let renderer: Box<dyn ContentRenderer> = match config.render.mode {
            RenderMode::OpenAi => Box::new(OpenAiRenderer::new(config.render.image_detail)),
            mode => mode.renderer(),
        };
        Self::new(renderer)
    }

    pub fn mode(&self) -> RenderMode {
        self.renderer.mode()
    }

    /// Convert a message or a sequence of messages
    pub fn convert<T: ToWire + ?Sized>(&self, input: &T) -> WireResult<T::Output> {
        input.to_wire_with(self)
    }

    /// Convert a message or sequence and serialize it to JSON
    pub fn convert_to_json<T: ToWire + ?Sized>(&self, input: &T) -> WireResult<serde_json::Value>
    where
        T::Output: serde::Serialize,
    {
        Ok(serde_json::to_value(self.convert(input)?)?)
    }

    fn convert_message(&self, message: &Message) -> WireResult<WireMessage> {
        let mut wire = self.renderer.render(message)?;

        wire.copilot_references = message.copilot_references.clone();
        wire.copilot_confirmations = message.copilot_confirmations.clone();
        wire.content = normalize_trailing_whitespace(wire.content);

        if message.content.has_cache_breakpoint() {
            wire.copilot_cache_control = Some(CacheControl::ephemeral());
        }

        debug!(
            role = %message.role,
            mode = %self.renderer.mode(),
            parts = wire.content.part_count(),
            cache_control = wire.copilot_cache_control.is_some(),
            "converted message to wire format"
        );
        trace!(content = ?wire.content, "wire content");

        Ok(wire)
    }
}

/// Values that convert to the wire format
///
/// Sequences convert element by element through the single-message
/// conversion, so converting `[m]` always equals `[convert(m)]`.
pub trait ToWire {
    type Output;

    fn to_wire_with(&self, converter: &WireConverter) -> WireResult<Self::Output>;
}

impl ToWire for Message {
    type Output = WireMessage;

    fn to_wire_with(&self, converter: &WireConverter) -> WireResult<WireMessage> {
        converter.convert_message(self)
    }
}

impl ToWire for [Message] {
    type Output = Vec<WireMessage>;

    fn to_wire_with(&self, converter: &WireConverter) -> WireResult<Vec<WireMessage>> {
        self.iter()
            .map(|message| message.to_wire_with(converter))
            .collect()
    }
}

impl<const N: usize> ToWire for [Message; N] {
    type Output = Vec<WireMessage>;

    fn to_wire_with(&self, converter: &WireConverter) -> WireResult<Vec<WireMessage>> {
        self.as_slice().to_wire_with(converter)
    }
}

impl ToWire for Vec<Message> {
    type Output = Vec<WireMessage>;

    fn to_wire_with(&self, converter: &WireConverter) -> WireResult<Vec<WireMessage>> {
        self.as_slice().to_wire_with(converter)
    }
}

/// Convert with the default OpenAI renderer
pub fn to_wire<T: ToWire + ?Sized>(input: &T) -> WireResult<T::Output> {
    WireConverter::default().convert(input)
}

/// Strip trailing whitespace from a string payload, or from each text part
/// of a part list. Other parts are left alone. Applying it twice changes
/// nothing.
pub fn normalize_trailing_whitespace(content: WireContent) -> WireContent {
    match content {
        WireContent::Text(text) => WireContent::Text(trim_end_owned(text)),
        WireContent::Parts(parts) => WireContent::Parts(
            parts
                .into_iter()
                .map(|part| match part {
                    WireContentPart::Text { text } => WireContentPart::Text {
                        text: trim_end_owned(text),
                    },
                    other => other,
                })
                .collect(),
        ),
    }
}

fn trim_end_owned(mut text: String) -> String {
    let len = text.trim_end().len();
    text.truncate(len);
    text
}
