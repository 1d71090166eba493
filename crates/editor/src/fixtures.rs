//! Factory functions for creating test data.
//!
//! Helpers to construct templates, colliders and stores used in tests and
//! by command-protocol callers.

use shared::*;

use crate::store::{PersistenceError, TemplateStore};

// ── Template factories ──────────────────────────────────────────

/// Default template with every required field filled in, so it passes `validate()`.
pub fn saveable_template() -> GalleryTemplate {
    GalleryTemplate {
        name: "Main Hall".to_string(),
        description: "A bright hall for paintings".to_string(),
        model_path: "models/main-hall.glb".to_string(),
        preview_image: "previews/main-hall.png".to_string(),
        ..Default::default()
    }
}

/// Saveable template with a custom room size.
pub fn template_with_room(x: f64, y: f64, z: f64) -> GalleryTemplate {
    GalleryTemplate {
        dimensions: Dimensions::new(x, y, z),
        ..saveable_template()
    }
}

/// Saveable template that already carries placements (treated as custom on open).
pub fn template_with_placements(placements: Vec<ArtworkPlacement>) -> GalleryTemplate {
    GalleryTemplate {
        placements,
        ..saveable_template()
    }
}

// ── Collider factories ──────────────────────────────────────────

/// Box collider at a position with the given extents.
pub fn box_collider_at(position: Vec3, args: Vec3) -> Collider {
    Collider::Box {
        position,
        rotation: [0.0; 3],
        args,
        visible: true,
    }
}

/// Full-circle curved collider.
pub fn curved_collider(position: Vec3, radius: f64, height: f64) -> Collider {
    Collider::Curved {
        position,
        rotation: [0.0; 3],
        radius,
        height,
        segments: DEFAULT_CURVED_SEGMENTS,
        arc: std::f64::consts::TAU,
        visible: true,
    }
}

// ── Stores ──────────────────────────────────────────────────────

/// Store whose writes always fail, like a backend that is offline.
pub struct FailingStore;

impl TemplateStore for FailingStore {
    fn load(&self, id: &str) -> Result<GalleryTemplate, PersistenceError> {
        Err(PersistenceError::NotFound(id.to_string()))
    }

    fn save(&mut self, _template: &GalleryTemplate) -> Result<String, PersistenceError> {
        Err(PersistenceError::Rejected("store is offline".to_string()))
    }

    fn list(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(Vec::new())
    }
}
