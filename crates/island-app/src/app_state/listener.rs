//! Inbound transports for assistant envelopes and host messages.
//!
//! Each WebSocket text frame or stdin line carries exactly one message.
//! Frames are forwarded verbatim; decoding happens on the app side.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use island_common::IslandError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, IslandError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| IslandError::Listener(format!("bind {addr}: {e}")))?;
    tracing::info!("Listening for envelopes on ws://{}", addr);
    Ok(listener)
}

/// Accept loop. Runs until the receiving side goes away.
pub async fn serve(listener: TcpListener, tx: mpsc::Sender<String>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, peer, tx).await,
                        Err(e) => {
                            tracing::warn!(peer = %peer, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
        if tx.is_closed() {
            break;
        }
    }
}

async fn handle_connection(ws: WebSocketStream<TcpStream>, peer: SocketAddr, tx: mpsc::Sender<String>) {
    let (mut sink, mut stream) = ws.split();
    tracing::info!(peer = %peer, "Event source connected");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if tx.send(text.to_string()).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = sink.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::debug!(peer = %peer, error = %e, "WS error");
                break;
            }
            _ => {}
        }
    }

    tracing::info!(peer = %peer, "Event source disconnected");
}

/// Forward non-empty stdin lines until EOF.
pub async fn read_stdin(tx: mpsc::Sender<String>) -> Result<(), IslandError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if tx.send(line.to_string()).await.is_err() {
            break;
        }
    }
    tracing::info!("stdin closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_tungstenite::connect_async;

    #[tokio::test]
    async fn text_frames_are_forwarded_in_order() {
        let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        tokio::spawn(serve(listener, tx));

        let (mut ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        ws.send(Message::Text("first".into())).await.unwrap();
        ws.send(Message::Binary(vec![1u8, 2, 3].into())).await.unwrap();
        ws.send(Message::Text("second".into())).await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("first"));
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
    }
}
