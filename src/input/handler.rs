use crate::{
    core::geo::LatLng,
    input::events::{InputEvent, KeyCode},
    prelude::VecDeque,
    region::{
        intent::{IntentOutcome, RegionIntent},
        polygon::RegionPolygon,
    },
    Result,
};

/// What the map should do in response to an input event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Edit the region being drawn
    Edit(RegionIntent),
    /// Refresh the cursor readout at this position
    UpdateCursor(LatLng),
}

/// Input handler that turns map events into region edits
pub struct InputHandler {
    pub enabled: bool,
    event_queue: VecDeque<InputEvent>,

    // Configuration
    pub insert_on_click: bool,
    pub delete_keys: Vec<KeyCode>,
    pub track_cursor: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            event_queue: VecDeque::new(),
            insert_on_click: true,
            delete_keys: vec![KeyCode::Backspace, KeyCode::Delete],
            track_cursor: true,
        }
    }

    /// Translate one event into an action, if it maps to one
    pub fn handle_event(&self, event: InputEvent) -> Option<Action> {
        if !self.enabled {
            return None;
        }

        match event {
            InputEvent::MapClick { lat_lng } => self
                .insert_on_click
                .then_some(Action::Edit(RegionIntent::InsertPoint(lat_lng))),
            InputEvent::VertexClick { vertex } => {
                Some(Action::Edit(RegionIntent::SetActive(vertex)))
            }
            InputEvent::VertexDrag { vertex, lat_lng } => {
                Some(Action::Edit(RegionIntent::MoveVertex(vertex, lat_lng)))
            }
            InputEvent::MouseMove { lat_lng } => {
                self.track_cursor.then_some(Action::UpdateCursor(lat_lng))
            }
            InputEvent::KeyPress { key, modifiers } => {
                (!modifiers.any() && self.delete_keys.contains(&key))
                    .then_some(Action::Edit(RegionIntent::DeleteActive))
            }
        }
    }

    /// Handle `event` and apply any resulting edit to `region`
    pub fn apply(
        &self,
        region: &mut RegionPolygon,
        event: InputEvent,
    ) -> Result<Option<IntentOutcome>> {
        match self.handle_event(event) {
            Some(Action::Edit(intent)) => region.apply(intent).map(Some),
            _ => Ok(None),
        }
    }

    /// Queue an event for later processing
    pub fn queue_event(&mut self, event: InputEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events and return resulting actions
    pub fn process_queued_events(&mut self) -> Vec<Action> {
        let mut actions = vec![];
        while let Some(event) = self.event_queue.pop_front() {
            actions.extend(self.handle_event(event));
        }
        actions
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Clear the event queue
    pub fn clear_queue(&mut self) {
        self.event_queue.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::KeyModifiers;

    fn key(key: KeyCode) -> InputEvent {
        InputEvent::KeyPress {
            key,
            modifiers: KeyModifiers::default(),
        }
    }

    #[test]
    fn test_click_inserts() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::new();
        let outcome = handler
            .apply(&mut region, InputEvent::MapClick { lat_lng: LatLng::new(1.0, 2.0) })
            .unwrap();
        assert!(matches!(outcome, Some(IntentOutcome::Inserted(_))));
        assert_eq!(region.len(), 1);
    }

    #[test]
    fn test_delete_keys() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        handler.apply(&mut region, key(KeyCode::Backspace)).unwrap();
        handler.apply(&mut region, key(KeyCode::Delete)).unwrap();
        assert!(region.is_empty());

        assert_eq!(handler.handle_event(key(KeyCode::Escape)), None);
        let ctrl_delete = InputEvent::KeyPress {
            key: KeyCode::Delete,
            modifiers: KeyModifiers {
                ctrl: true,
                ..Default::default()
            },
        };
        assert_eq!(handler.handle_event(ctrl_delete), None);
    }

    #[test]
    fn test_vertex_events() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let first = region.vertices()[0].id();

        handler
            .apply(&mut region, InputEvent::VertexClick { vertex: first })
            .unwrap();
        assert_eq!(region.active(), Some(first));

        handler
            .apply(
                &mut region,
                InputEvent::VertexDrag {
                    vertex: first,
                    lat_lng: LatLng::new(2.0, 3.0),
                },
            )
            .unwrap();
        assert_eq!(region.vertex(first).unwrap().position(), LatLng::new(2.0, 3.0));
    }

    #[test]
    fn test_disabled_and_cursor() {
        let mut handler = InputHandler::new();
        let moved = InputEvent::MouseMove { lat_lng: LatLng::new(5.0, 5.0) };
        assert_eq!(
            handler.handle_event(moved.clone()),
            Some(Action::UpdateCursor(LatLng::new(5.0, 5.0)))
        );

        handler.enabled = false;
        assert_eq!(handler.handle_event(moved), None);
    }

    #[test]
    fn test_queue() {
        let mut handler = InputHandler::new();
        handler.queue_event(InputEvent::MapClick { lat_lng: LatLng::new(0.0, 0.0) });
        handler.queue_event(key(KeyCode::Tab));
        handler.queue_event(key(KeyCode::Delete));
        assert_eq!(handler.pending_events(), 3);

        let actions = handler.process_queued_events();
        assert_eq!(
            actions,
            vec![
                Action::Edit(RegionIntent::InsertPoint(LatLng::new(0.0, 0.0))),
                Action::Edit(RegionIntent::DeleteActive),
            ]
        );
        assert_eq!(handler.pending_events(), 0);
    }
}
