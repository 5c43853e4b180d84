//! Event bridge between the assistant process and the avatar renderer.
//!
//! Two directions:
//! - **Inbound**: the assistant pushes `{ "type": ..., "payload": {...} }`
//!   envelopes, decoded here into [`AssistantEvent`]s. A `follow_mouse`
//!   flag may ride on any envelope and is surfaced separately.
//! - **Outbound**: the UI side issues [`RendererCommand`]s through a
//!   [`BridgeSender`]. The render loop drains them in issue order and gates
//!   them through a [`RendererInbox`] until the scene exists.

pub mod channel;
pub mod commands;
pub mod envelope;
pub mod events;
pub mod inbox;

pub use channel::{channel, BridgeReceiver, BridgeSender};
pub use commands::RendererCommand;
pub use envelope::{decode, InboundEvent};
pub use events::{AssistantEvent, Performance, ToolInfo};
pub use inbox::RendererInbox;
