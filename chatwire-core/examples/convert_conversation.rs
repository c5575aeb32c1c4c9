//! Converts a short conversation and prints the wire payload.
//!
//! Run with `RUST_LOG=chatwire_core=debug` to see conversion logs.

use chatwire_core::protocol::{ContentPart, Message, MessageBuilder, Role};
use chatwire_core::wire::{RenderMode, WireConverter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let messages = vec![
        Message::system("You are a programming assistant.\n"),
        MessageBuilder::with_parts(
            Role::User,
            vec![
                ContentPart::text("Here is my file:\n```rust\nfn main() {}\n```\n"),
                ContentPart::cache_breakpoint(),
                ContentPart::text("Why does it do nothing?  "),
            ],
        )
        .with_confirmation("accepted", serde_json::json!({"action": "read_file"}))
        .build(),
    ];

    for mode in [RenderMode::OpenAi, RenderMode::Passthrough] {
        let converter = WireConverter::for_mode(mode);
        let payload = converter.convert_to_json(&messages)?;
        println!("== {mode}\n{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}
