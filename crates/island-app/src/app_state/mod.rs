//! Host application state.
//!
//! [`IslandApp`] is the context object tying the subsystems together: it
//! decodes inbound envelopes, drives the presence machine and config
//! store, and feeds the render loop through the bridge channel.

mod core;
mod dispatch;
mod event_loop;
mod host_input;
mod listener;
mod mouse;
mod polling;
mod shutdown;

#[cfg(test)]
mod tests;

pub use self::core::IslandApp;
pub use event_loop::{run, EnvelopeSource};
