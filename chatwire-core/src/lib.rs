//! Chatwire Core Library
//!
//! Converts provider-neutral chat messages into the completion endpoint's
//! wire format and models the outcome of a completion: finish and filter
//! reasons, token usage, log probabilities and the per-choice record.
//!
//! ```
//! use chatwire_core::protocol::{ContentPart, Message, Role};
//! use chatwire_core::wire::to_wire;
//!
//! let message = Message::from_parts(
//!     Role::User,
//!     vec![ContentPart::text("Hello "), ContentPart::cache_breakpoint()],
//! );
//! let wire = to_wire(&message).unwrap();
//! assert!(wire.copilot_cache_control.is_some());
//! ```

pub mod config;
pub mod protocol;
pub mod wire;

pub use protocol::{is_usage, CompletionChoice, FilterReason, FinishedCompletionReason, Message};
pub use wire::{to_wire, ToWire, WireConverter, WireMessage};

/// Returns the version of the Chatwire Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
