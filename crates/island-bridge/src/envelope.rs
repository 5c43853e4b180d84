//! Inbound envelope decoding.
//!
//! ```json
//! { "type": "assistant_response" | "agent_state",
//!   "payload": { "content"?, "tool_info"?, "performance"?, "state"?, "follow_mouse"? } }
//! ```

use island_common::{AgentState, BridgeError, Face};
use serde::Deserialize;

use crate::events::{sanitize_duration, sanitize_intensity, AssistantEvent, Performance, ToolInfo};

/// Raw envelope as it arrives on the wire.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    payload: Payload,
}

#[derive(Debug, Deserialize)]
struct Payload {
    content: Option<String>,
    tool_info: Option<ToolInfo>,
    performance: Option<WirePerformance>,
    state: Option<String>,
    follow_mouse: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WirePerformance {
    face: String,
    intensity: Option<f32>,
    action: Option<String>,
    audio_url: Option<String>,
    duration: Option<f32>,
}

impl From<WirePerformance> for Performance {
    fn from(wire: WirePerformance) -> Self {
        let face = Face::parse(&wire.face).unwrap_or_else(|| {
            tracing::warn!(face = %wire.face, "Unknown face, using neutral");
            Face::Neutral
        });
        Self {
            face,
            intensity: sanitize_intensity(wire.intensity),
            action: wire.action,
            audio_url: wire.audio_url,
            duration: sanitize_duration(wire.duration),
        }
    }
}

/// A decoded envelope: the primary event plus the optional config side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub event: AssistantEvent,
    pub follow_mouse: Option<bool>,
}

/// Decode one envelope.
///
/// Fails with [`BridgeError::MalformedEvent`] on invalid JSON, an unknown
/// `type`, or a payload missing the field its `type` requires.
pub fn decode(raw: &str) -> Result<InboundEvent, BridgeError> {
    let envelope: Envelope = serde_json::from_str(raw)
        .map_err(|e| BridgeError::MalformedEvent(format!("invalid envelope: {e}")))?;

    let Envelope { kind, payload } = envelope;
    let follow_mouse = payload.follow_mouse;

    let event = match kind.as_str() {
        "assistant_response" => {
            let content = payload.content.ok_or_else(|| {
                BridgeError::MalformedEvent("assistant_response without 'content'".into())
            })?;
            AssistantEvent::AssistantResponse {
                content,
                tool_info: payload.tool_info,
                performance: payload.performance.map(Performance::from),
            }
        }
        "agent_state" => {
            let raw_state = payload.state.ok_or_else(|| {
                BridgeError::MalformedEvent("agent_state without 'state'".into())
            })?;
            let state = AgentState::parse(&raw_state).ok_or_else(|| {
                BridgeError::MalformedEvent(format!("unknown agent state '{raw_state}'"))
            })?;
            AssistantEvent::AgentStateChange { state }
        }
        other => {
            return Err(BridgeError::MalformedEvent(format!(
                "unknown event type '{other}'"
            )))
        }
    };

    Ok(InboundEvent {
        event,
        follow_mouse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_agent_state_thinking() {
        let inbound = decode(r#"{"type":"agent_state","payload":{"state":"thinking"}}"#).unwrap();
        assert_eq!(
            inbound.event,
            AssistantEvent::AgentStateChange {
                state: AgentState::Thinking
            }
        );
        assert_eq!(inbound.follow_mouse, None);
    }

    #[test]
    fn decode_assistant_response_with_everything() {
        let raw = r#"{
            "type": "assistant_response",
            "payload": {
                "content": "hello",
                "tool_info": {"status": "running", "name": "web_search"},
                "performance": {"face": "joy", "intensity": 0.8, "duration": 2.0, "audio_url": "file:///a.wav"},
                "follow_mouse": true
            }
        }"#;
        let inbound = decode(raw).unwrap();
        assert_eq!(inbound.follow_mouse, Some(true));
        match inbound.event {
            AssistantEvent::AssistantResponse {
                content,
                tool_info,
                performance,
            } => {
                assert_eq!(content, "hello");
                assert_eq!(tool_info.unwrap().name, "web_search");
                let perf = performance.unwrap();
                assert_eq!(perf.face, Face::Joy);
                assert!((perf.intensity - 0.8).abs() < 1e-6);
                assert!((perf.duration - 2.0).abs() < 1e-6);
                assert_eq!(perf.audio_url.as_deref(), Some("file:///a.wav"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn performance_defaults_are_resolved() {
        let raw = r#"{"type":"assistant_response","payload":{"content":"","performance":{"face":"sorrow"}}}"#;
        let inbound = decode(raw).unwrap();
        let AssistantEvent::AssistantResponse { performance, .. } = inbound.event else {
            panic!("expected response");
        };
        let perf = performance.unwrap();
        assert_eq!(perf.intensity, 1.0);
        assert_eq!(perf.duration, 5.0);
    }

    #[test]
    fn huge_duration_is_clamped_on_decode() {
        let raw = r#"{"type":"assistant_response","payload":{"content":"","performance":{"face":"joy","duration":1e20}}}"#;
        let AssistantEvent::AssistantResponse { performance, .. } = decode(raw).unwrap().event else {
            panic!("expected response");
        };
        assert_eq!(performance.unwrap().duration, crate::events::MAX_DURATION);
    }

    #[test]
    fn unknown_face_degrades_to_neutral() {
        let raw = r#"{"type":"assistant_response","payload":{"content":"x","performance":{"face":"smug"}}}"#;
        let AssistantEvent::AssistantResponse { performance, .. } = decode(raw).unwrap().event else {
            panic!("expected response");
        };
        assert_eq!(performance.unwrap().face, Face::Neutral);
    }

    #[test]
    fn follow_mouse_rides_on_agent_state() {
        let raw = r#"{"type":"agent_state","payload":{"state":"idle","follow_mouse":false}}"#;
        assert_eq!(decode(raw).unwrap().follow_mouse, Some(false));
    }

    #[test]
    fn unknown_type_is_malformed() {
        let err = decode(r#"{"type":"reboot","payload":{}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedEvent(ref m) if m.contains("reboot")));
    }

    #[test]
    fn missing_required_field_is_malformed() {
        assert!(decode(r#"{"type":"agent_state","payload":{}}"#).is_err());
        assert!(decode(r#"{"type":"assistant_response","payload":{"tool_info":{"status":"a","name":"b"}}}"#).is_err());
    }

    #[test]
    fn unknown_state_is_malformed() {
        assert!(decode(r#"{"type":"agent_state","payload":{"state":"dreaming"}}"#).is_err());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"payload":{}}"#).is_err());
        assert!(decode(r#"{"type":"agent_state"}"#).is_err());
    }
}
