//! The host's single-threaded run loop.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use island_config::ConfigPersistence;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::core::IslandApp;
use super::listener;
use super::mouse::MOUSE_SAMPLE_INTERVAL;

/// ~60 Hz render cadence.
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
const INBOUND_CAPACITY: usize = 256;

/// Where inbound messages come from.
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeSource {
    WebSocket(SocketAddr),
    Stdin,
}

/// Run until interrupted, then flush config.
pub async fn run<P: ConfigPersistence>(
    mut app: IslandApp<P>,
    source: EnvelopeSource,
) -> island_common::Result<()> {
    let (tx, mut rx) = mpsc::channel::<String>(INBOUND_CAPACITY);
    match source {
        EnvelopeSource::WebSocket(addr) => {
            let listener = listener::bind(addr).await?;
            tokio::spawn(listener::serve(listener, tx));
        }
        EnvelopeSource::Stdin => {
            tokio::spawn(async move {
                if let Err(e) = listener::read_stdin(tx).await {
                    tracing::warn!("stdin reader failed: {e}");
                }
            });
        }
    }

    app.start();

    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut mouse = tokio::time::interval(MOUSE_SAMPLE_INTERVAL);
    mouse.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    tracing::info!("Entering run loop");
    loop {
        tokio::select! {
            Some(raw) = rx.recv() => {
                // Failures are logged by the dispatcher.
                let _ = app.handle_message(&raw, Instant::now());
            }
            _ = frames.tick() => {
                app.tick(Instant::now());
                app.render_frame();
            }
            _ = mouse.tick() => app.sample_mouse(),
            _ = &mut interrupt => {
                tracing::info!("Interrupt received");
                break;
            }
        }
    }

    app.shutdown();
    Ok(())
}
