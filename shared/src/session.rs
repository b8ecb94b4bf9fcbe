//! Editor Session State
//!
//! Explicit, session-scoped state for a map editor: the working snapshot
//! and the current selection, mutated through the operations below and
//! persisted wholesale. Nothing here is ambient or global; callers pass
//! the session through the editor call chain.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{MapElement, MapSnapshot, Position, ValidationError, Zone};

/// Errors from editor operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Element {0} already exists in this map")]
    DuplicateElement(String),

    #[error("Element {0} not found")]
    ElementNotFound(String),

    #[error("Zone {0} already exists in this map")]
    DuplicateZone(String),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),
}

/// One editing session over one room's map
#[derive(Debug, Clone)]
pub struct EditorSession {
    session_id: String,
    snapshot: MapSnapshot,
    selected: HashSet<String>,
}

impl EditorSession {
    /// Start a session on an empty map
    pub fn new(room_id: impl Into<String>) -> Self {
        Self::from_snapshot(MapSnapshot::empty(room_id))
    }

    /// Start a session on a loaded snapshot
    pub fn from_snapshot(snapshot: MapSnapshot) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            snapshot,
            selected: HashSet::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn room_id(&self) -> &str {
        &self.snapshot.room_id
    }

    /// The working snapshot (what `save` would persist wholesale)
    pub fn snapshot(&self) -> &MapSnapshot {
        &self.snapshot
    }

    /// Consume the session, yielding the snapshot for persistence
    pub fn into_snapshot(self) -> MapSnapshot {
        self.snapshot
    }

    /// Validate the working snapshot without persisting it
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.snapshot.validate()
    }

    /// Add an element. Ids must be unique within the map, and a zone
    /// reference must resolve against the session's zones.
    pub fn add_element(&mut self, element: MapElement) -> Result<(), SessionError> {
        if self.snapshot.element(element.id()).is_some() {
            return Err(SessionError::DuplicateElement(element.id().to_string()));
        }
        if let Some(zone_id) = element.zone_id()
            && !self.snapshot.registry().contains(zone_id)
        {
            return Err(SessionError::UnknownZone(zone_id.to_string()));
        }
        self.snapshot.elements.push(element);
        Ok(())
    }

    /// Move an element to a new canvas position
    pub fn move_element(&mut self, id: &str, position: Position) -> Result<(), SessionError> {
        let element = self
            .snapshot
            .elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| SessionError::ElementNotFound(id.to_string()))?;
        match element {
            MapElement::Seat(seat) => seat.position = position,
            MapElement::Table(table) => table.position = position,
        }
        Ok(())
    }

    /// Remove an element, returning it. Also drops it from the selection.
    pub fn remove_element(&mut self, id: &str) -> Result<MapElement, SessionError> {
        let index = self
            .snapshot
            .elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| SessionError::ElementNotFound(id.to_string()))?;
        self.selected.remove(id);
        Ok(self.snapshot.elements.remove(index))
    }

    /// Assign (or clear) an element's zone
    pub fn assign_zone(
        &mut self,
        id: &str,
        zone_id: Option<String>,
    ) -> Result<(), SessionError> {
        if let Some(zone) = zone_id.as_deref()
            && !self.snapshot.registry().contains(zone)
        {
            return Err(SessionError::UnknownZone(zone.to_string()));
        }
        let element = self
            .snapshot
            .elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| SessionError::ElementNotFound(id.to_string()))?;
        match element {
            MapElement::Seat(seat) => seat.zone_id = zone_id,
            MapElement::Table(table) => table.zone_id = zone_id,
        }
        Ok(())
    }

    /// Add a zone to the map
    pub fn add_zone(&mut self, zone: Zone) -> Result<(), SessionError> {
        if self.snapshot.zones.iter().any(|z| z.id == zone.id) {
            return Err(SessionError::DuplicateZone(zone.id));
        }
        self.snapshot.zones.push(zone);
        Ok(())
    }

    /// Select an element (UI state, never persisted)
    pub fn select(&mut self, id: &str) -> Result<(), SessionError> {
        if self.snapshot.element(id).is_none() {
            return Err(SessionError::ElementNotFound(id.to_string()));
        }
        self.selected.insert(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self, id: &str) {
        self.selected.remove(id);
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;

    fn seat(id: &str) -> MapElement {
        MapElement::Seat(Seat::rect(id, Position::new(10.0, 10.0), 20.0, 20.0))
    }

    #[test]
    fn add_move_remove_round_trip() {
        let mut session = EditorSession::new("sala-1");
        session.add_element(seat("s1")).unwrap();
        session.move_element("s1", Position::new(40.0, 60.0)).unwrap();

        let snapshot = session.snapshot();
        let moved = snapshot.element("s1").unwrap().as_seat().unwrap();
        assert_eq!(moved.position, Position::new(40.0, 60.0));

        session.remove_element("s1").unwrap();
        assert!(session.snapshot().element("s1").is_none());
    }

    #[test]
    fn duplicate_element_rejected() {
        let mut session = EditorSession::new("sala-1");
        session.add_element(seat("s1")).unwrap();
        assert_eq!(
            session.add_element(seat("s1")),
            Err(SessionError::DuplicateElement("s1".into()))
        );
    }

    #[test]
    fn zone_assignment_must_resolve() {
        let mut session = EditorSession::new("sala-1");
        session.add_element(seat("s1")).unwrap();
        assert_eq!(
            session.assign_zone("s1", Some("z1".into())),
            Err(SessionError::UnknownZone("z1".into()))
        );

        session.add_zone(Zone::new("z1", "Platea")).unwrap();
        session.assign_zone("s1", Some("z1".into())).unwrap();
        assert!(session.validate().is_ok());

        // Clearing the zone is always allowed
        session.assign_zone("s1", None).unwrap();
    }

    #[test]
    fn removing_an_element_clears_its_selection() {
        let mut session = EditorSession::new("sala-1");
        session.add_element(seat("s1")).unwrap();
        session.select("s1").unwrap();
        assert_eq!(session.selected().count(), 1);

        session.remove_element("s1").unwrap();
        assert_eq!(session.selected().count(), 0);
    }

    #[test]
    fn sessions_have_distinct_ids() {
        let a = EditorSession::new("sala-1");
        let b = EditorSession::new("sala-1");
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn into_snapshot_hands_over_the_working_state() {
        let mut session = EditorSession::new("sala-1");
        session.add_zone(Zone::new("z1", "Palco")).unwrap();
        session.add_element(seat("s1")).unwrap();
        let snapshot = session.into_snapshot();
        assert_eq!(snapshot.room_id, "sala-1");
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.zones.len(), 1);
    }
}
