use serde::{Deserialize, Serialize};

/// Opaque handle to a host UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target-{}", self.0)
    }
}

/// Pointer events delivered by the host, coordinates in viewport pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    #[serde(rename_all = "camelCase")]
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        timestamp_ms: f64,
    },
    Down,
    Up,
    /// Pointer entered an element; `None` when the host has no element handle
    Over {
        #[serde(default)]
        target: Option<TargetId>,
    },
    Out,
    EnterViewport,
    LeaveViewport,
}

impl std::fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerEvent::Move { .. } => write!(f, "move"),
            PointerEvent::Down => write!(f, "down"),
            PointerEvent::Up => write!(f, "up"),
            PointerEvent::Over { .. } => write!(f, "over"),
            PointerEvent::Out => write!(f, "out"),
            PointerEvent::EnterViewport => write!(f, "enter-viewport"),
            PointerEvent::LeaveViewport => write!(f, "leave-viewport"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "type": "move", "x": 1.5, "y": 2, "timestampMs": 16 }"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Move {
                x: 1.5,
                y: 2.0,
                timestamp_ms: 16.0
            }
        );

        let event: PointerEvent = serde_json::from_str(r#"{ "type": "over", "target": 7 }"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Over {
                target: Some(TargetId(7))
            }
        );

        let event: PointerEvent = serde_json::from_str(r#"{ "type": "leaveViewport" }"#).unwrap();
        assert_eq!(event, PointerEvent::LeaveViewport);
    }

    #[test]
    fn test_over_without_target() {
        let event: PointerEvent = serde_json::from_str(r#"{ "type": "over" }"#).unwrap();
        assert_eq!(event, PointerEvent::Over { target: None });
    }
}
