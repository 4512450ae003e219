use floorsketch_core::{Point, RoomGeometry};

use crate::floor_plan::find_room_at_point;

/// Tracks which rooms are selected for manipulation.
///
/// # Selection Model
///
/// - **Primary Selection**: The most recently selected room, the target of
///   single-room commands such as rotate or copy
/// - **Multiple Selection**: An ordered set of room ids used by batch
///   operations (align, distribute)
/// - **Hit testing**: Point selection picks the smallest room containing the
///   point, so nested rooms (a closet inside a bedroom) stay reachable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the primary selected room id.
    pub fn primary(&self) -> Option<&str> {
        self.selected.last().map(String::as_str)
    }

    /// All selected ids in selection order.
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, room_id: &str) -> bool {
        self.selected.iter().any(|id| id == room_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Replaces the selection with a single room.
    pub fn select(&mut self, room_id: impl Into<String>) {
        self.selected.clear();
        self.selected.push(room_id.into());
    }

    /// Adds a room to the selection (Shift+click), making it primary.
    pub fn add(&mut self, room_id: impl Into<String>) {
        let room_id = room_id.into();
        self.selected.retain(|id| *id != room_id);
        self.selected.push(room_id);
    }

    /// Toggles a room in the selection.
    pub fn toggle(&mut self, room_id: &str) {
        if self.is_selected(room_id) {
            self.selected.retain(|id| id != room_id);
        } else {
            self.selected.push(room_id.to_string());
        }
    }

    pub fn deselect(&mut self, room_id: &str) {
        self.selected.retain(|id| id != room_id);
    }

    pub fn select_many<I, S>(&mut self, room_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        for id in room_ids {
            self.add(id);
        }
    }

    pub fn select_all(&mut self, rooms: &[RoomGeometry]) {
        self.select_many(rooms.iter().map(|r| r.id.clone()));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selects the room under a plan-space point.
    ///
    /// With `multi` the hit room is toggled instead of replacing the
    /// selection. Clicking empty space clears the selection unless `multi`
    /// is set. Returns the hit room id.
    pub fn select_at_point(
        &mut self,
        rooms: &[RoomGeometry],
        point: &Point,
        multi: bool,
    ) -> Option<String> {
        match find_room_at_point(rooms, point) {
            Some(room) => {
                let id = room.id.clone();
                if multi {
                    self.toggle(&id);
                } else {
                    self.select(id.clone());
                }
                Some(id)
            }
            None => {
                if !multi {
                    self.clear();
                }
                None
            }
        }
    }

    /// Drops ids that no longer exist in `rooms`.
    pub fn retain_existing(&mut self, rooms: &[RoomGeometry]) {
        self.selected
            .retain(|id| rooms.iter().any(|room| &room.id == id));
    }
}
