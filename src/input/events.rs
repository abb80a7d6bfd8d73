use crate::core::geo::LatLng;
use crate::region::polygon::VertexId;
use serde::{Deserialize, Serialize};

/// Input events delivered by the map widget, already converted to
/// geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Click on empty map
    MapClick { lat_lng: LatLng },
    /// Click on a vertex marker
    VertexClick { vertex: VertexId },
    /// A vertex marker was dragged to `lat_lng`
    VertexDrag { vertex: VertexId, lat_lng: LatLng },
    /// Pointer moved over the map
    MouseMove { lat_lng: LatLng },
    /// Keyboard input
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Backspace,
    Delete,
    Escape,
    Enter,
    Tab,
    Other(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

impl InputEvent {
    /// Gets the geographic position associated with this event, if any
    pub fn lat_lng(&self) -> Option<LatLng> {
        match self {
            InputEvent::MapClick { lat_lng }
            | InputEvent::VertexDrag { lat_lng, .. }
            | InputEvent::MouseMove { lat_lng } => Some(*lat_lng),
            _ => None,
        }
    }

    /// The vertex this event targets, if any
    pub fn vertex(&self) -> Option<VertexId> {
        match self {
            InputEvent::VertexClick { vertex } | InputEvent::VertexDrag { vertex, .. } => {
                Some(*vertex)
            }
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        !self.is_keyboard_event()
    }

    /// Checks if this is a keyboard event
    pub fn is_keyboard_event(&self) -> bool {
        matches!(self, InputEvent::KeyPress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::polygon::RegionPolygon;

    #[test]
    fn test_input_event_position() {
        let click = InputEvent::MapClick {
            lat_lng: LatLng::new(10.0, 20.0),
        };
        assert_eq!(click.lat_lng(), Some(LatLng::new(10.0, 20.0)));
        assert_eq!(click.vertex(), None);

        let key = InputEvent::KeyPress {
            key: KeyCode::Delete,
            modifiers: KeyModifiers::default(),
        };
        assert_eq!(key.lat_lng(), None);
    }

    #[test]
    fn test_event_type_checks() {
        let region = RegionPolygon::from_points([(0.0, 0.0)]).unwrap();
        let vertex = region.vertices()[0].id();
        let drag = InputEvent::VertexDrag {
            vertex,
            lat_lng: LatLng::new(1.0, 1.0),
        };
        assert!(drag.is_pointer_event());
        assert!(!drag.is_keyboard_event());
        assert_eq!(drag.vertex(), Some(vertex));

        let key_press = InputEvent::KeyPress {
            key: KeyCode::Backspace,
            modifiers: KeyModifiers::default(),
        };
        assert!(!key_press.is_pointer_event());
        assert!(key_press.is_keyboard_event());
    }

    #[test]
    fn test_key_modifiers() {
        let modifiers = KeyModifiers {
            shift: true,
            ctrl: false,
            alt: true,
            meta: false,
        };
        assert!(modifiers.shift);
        assert!(modifiers.any());
        assert!(!KeyModifiers::default().any());
    }
}
