//! Collider library operations

use shared::{Collider, ColliderLibrary, ColliderPatch, ColliderShape, EntryId};

use super::TemplateSession;
use crate::error::SessionError;

impl TemplateSession {
    pub fn colliders(&self) -> &ColliderLibrary {
        &self.colliders
    }

    /// Append a collider; returns its id
    pub fn add_collider(&mut self, mut collider: Collider) -> EntryId {
        collider.normalize();
        let id = self.colliders.add(collider);
        self.sync_colliders();
        tracing::debug!("Added collider {id}");
        self.notify();
        id
    }

    /// Append the default collider for a shape
    pub fn add_default_collider(&mut self, shape: ColliderShape) -> EntryId {
        self.add_collider(Collider::default_for(shape))
    }

    /// Merge a partial update into the collider at `index`.
    ///
    /// The shape never changes; a patch asking for another shape still applies
    /// its shared fields.
    pub fn update_collider(&mut self, index: usize, patch: &ColliderPatch) -> Result<(), SessionError> {
        let shape_kept = self.colliders.update(index, patch)?;
        if !shape_kept {
            tracing::warn!("Collider {index}: shape change ignored");
        }
        self.sync_colliders();
        self.notify();
        Ok(())
    }

    pub fn update_collider_by_id(&mut self, id: &str, patch: &ColliderPatch) -> Result<(), SessionError> {
        let index = self.colliders.resolve(id)?;
        self.update_collider(index, patch)
    }

    /// UI variant: a stale index is a no-op
    pub fn update_collider_or_ignore(&mut self, index: usize, patch: &ColliderPatch) {
        if let Err(e) = self.update_collider(index, patch) {
            tracing::debug!("Ignored collider update: {e}");
        }
    }

    /// Remove the collider at `index`; later indices shift down by one
    pub fn remove_collider(&mut self, index: usize) -> Result<Collider, SessionError> {
        let entry = self.colliders.remove(index)?;
        self.sync_colliders();
        tracing::debug!("Removed collider {}", entry.id);
        self.notify();
        Ok(entry.value)
    }

    pub fn remove_collider_by_id(&mut self, id: &str) -> Result<Collider, SessionError> {
        let index = self.colliders.resolve(id)?;
        self.remove_collider(index)
    }

    /// UI variant: a stale index is a no-op
    pub fn remove_collider_or_ignore(&mut self, index: usize) {
        if let Err(e) = self.remove_collider(index) {
            tracing::debug!("Ignored collider removal: {e}");
        }
    }
}
