//! Custom artwork placements

use shared::{ArtworkPlacement, CustomPlacements, EntryId, PlacementPatch};

use super::TemplateSession;
use crate::error::SessionError;

impl TemplateSession {
    pub fn custom_placements(&self) -> &CustomPlacements {
        &self.custom
    }

    /// Add a custom placement at the room centre, half the wall height up
    pub fn add_placement(&mut self) -> EntryId {
        let placement = ArtworkPlacement::centered(self.model.get().wall_height);
        self.add_placement_at(placement)
    }

    pub fn add_placement_at(&mut self, placement: ArtworkPlacement) -> EntryId {
        let id = self.custom.add(placement);
        self.regenerate();
        tracing::debug!("Added custom placement {id}");
        self.notify();
        id
    }

    pub fn update_placement(&mut self, index: usize, patch: &PlacementPatch) -> Result<(), SessionError> {
        self.custom.update(index, patch)?;
        self.regenerate();
        self.notify();
        Ok(())
    }

    pub fn update_placement_by_id(&mut self, id: &str, patch: &PlacementPatch) -> Result<(), SessionError> {
        let index = self.custom.resolve(id)?;
        self.update_placement(index, patch)
    }

    /// UI variant: a stale index is a no-op
    pub fn update_placement_or_ignore(&mut self, index: usize, patch: &PlacementPatch) {
        if let Err(e) = self.update_placement(index, patch) {
            tracing::debug!("Ignored placement update: {e}");
        }
    }

    /// Set one position axis, as the editor's number fields do
    pub fn set_placement_position_axis(&mut self, index: usize, axis: usize, value: f64) {
        if let Some(current) = self.custom.get(index) {
            let patch = PlacementPatch::position_axis(current, axis, value);
            self.update_placement_or_ignore(index, &patch);
        }
    }

    pub fn set_placement_rotation_axis(&mut self, index: usize, axis: usize, value: f64) {
        if let Some(current) = self.custom.get(index) {
            let patch = PlacementPatch::rotation_axis(current, axis, value);
            self.update_placement_or_ignore(index, &patch);
        }
    }

    pub fn remove_placement(&mut self, index: usize) -> Result<ArtworkPlacement, SessionError> {
        let entry = self.custom.remove(index)?;
        self.regenerate();
        tracing::debug!("Removed custom placement {}", entry.id);
        self.notify();
        Ok(entry.value)
    }

    pub fn remove_placement_by_id(&mut self, id: &str) -> Result<ArtworkPlacement, SessionError> {
        let index = self.custom.resolve(id)?;
        self.remove_placement(index)
    }

    /// UI variant: a stale index is a no-op
    pub fn remove_placement_or_ignore(&mut self, index: usize) {
        if let Err(e) = self.remove_placement(index) {
            tracing::debug!("Ignored placement removal: {e}");
        }
    }
}
