//! Template editing session
//!
//! The session owns the `TemplateModel` for the lifetime of one edit. It runs
//! the wall layout, the merger and the collider library, writes their results
//! back through `patch`, and notifies observers after every mutation.

mod collider_ops;
mod persistence;
mod placement_ops;
mod wall_ops;

use shared::{
    merge_tagged, ColliderLibrary, ColliderShape, CustomPlacements, GalleryTemplate,
    TaggedPlacement, TemplateModel, TemplatePatch, WallConfigs,
};

use crate::state::settings::{EditorSettings, LayoutSettings};

/// Callback run with the new template after each mutation
pub type Observer = Box<dyn FnMut(&GalleryTemplate)>;

/// Editing session over one gallery template
pub struct TemplateSession {
    pub(crate) model: TemplateModel,
    pub(crate) walls: WallConfigs,
    pub(crate) colliders: ColliderLibrary,
    pub(crate) custom: CustomPlacements,
    /// Last merged placements with their origin
    pub(crate) tagged: Vec<TaggedPlacement>,
    pub(crate) layout: LayoutSettings,
    /// Shape used when a collider is added without one
    pub(crate) default_shape: ColliderShape,
    observers: Vec<Observer>,
}

impl Default for TemplateSession {
    fn default() -> Self {
        Self::new(GalleryTemplate::default())
    }
}

impl TemplateSession {
    /// Open a session with default layout settings
    pub fn new(template: GalleryTemplate) -> Self {
        Self::with_settings(template, LayoutSettings::default())
    }

    /// Open a session. Placements already stored in the template become custom
    /// placements; every wall starts empty at half the wall height.
    pub fn with_settings(template: GalleryTemplate, layout: LayoutSettings) -> Self {
        let walls = WallConfigs::empty(template.wall_height);
        let colliders = ColliderLibrary::from_values(template.colliders.iter().cloned());
        let custom = CustomPlacements::from_values(template.placements.iter().copied());
        let tagged = merge_tagged(&walls, &template.dimensions, &custom, layout.wall_clearance);

        tracing::debug!(
            "Opened session: {} colliders, {} placements",
            colliders.len(),
            custom.len()
        );

        Self {
            model: TemplateModel::new(template),
            walls,
            colliders,
            custom,
            tagged,
            layout,
            default_shape: ColliderShape::default(),
            observers: Vec::new(),
        }
    }

    /// Open a session configured from the editor settings
    pub fn from_settings(template: GalleryTemplate, settings: &EditorSettings) -> Self {
        let mut session = Self::with_settings(template, settings.layout.clone());
        session.default_shape = settings.default_collider_shape;
        session
    }

    /// Current template
    pub fn template(&self) -> &GalleryTemplate {
        self.model.get()
    }

    /// Owned copy for readers that must not hold a borrow (renderer, physics)
    pub fn snapshot(&self) -> GalleryTemplate {
        self.model.get().clone()
    }

    /// Version counter (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.model.version()
    }

    /// Unsaved changes since open or last successful save
    pub fn is_dirty(&self) -> bool {
        self.model.is_dirty()
    }

    /// Merged placements tagged as generated or custom
    pub fn tagged_placements(&self) -> &[TaggedPlacement] {
        &self.tagged
    }

    pub fn layout_settings(&self) -> &LayoutSettings {
        &self.layout
    }

    pub fn default_collider_shape(&self) -> ColliderShape {
        self.default_shape
    }

    pub fn set_default_collider_shape(&mut self, shape: ColliderShape) {
        self.default_shape = shape;
    }

    /// Register a change observer
    pub fn subscribe(&mut self, observer: impl FnMut(&GalleryTemplate) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Shallow-merge a patch into the template.
    ///
    /// `customColliders` replaces the collider library and `artworkPlacements`
    /// replaces the custom placements; generated placements are recomputed
    /// whenever placements or room geometry change. A new `wallHeight` moves
    /// walls whose mounting height no longer fits back to mid-wall.
    pub fn patch(&mut self, mut patch: TemplatePatch) -> &GalleryTemplate {
        let touches_room = patch.touches_room();
        let changes_wall_height = patch.wall_height.is_some();
        let colliders = patch.colliders.take();
        let placements = patch.placements.take();
        let replaces_placements = placements.is_some();

        self.model.patch(patch);

        if let Some(colliders) = colliders {
            let mut library = ColliderLibrary::from_values(colliders);
            for i in 0..library.len() {
                if let Ok(c) = library.get_mut(i) {
                    c.normalize();
                }
            }
            self.colliders = library;
            self.sync_colliders();
        }
        if let Some(placements) = placements {
            self.custom = CustomPlacements::from_values(placements);
        }
        if changes_wall_height {
            self.fit_walls_to_height();
        }
        if touches_room || replaces_placements {
            self.regenerate();
        }

        tracing::debug!("Patched template (version {})", self.version());
        self.notify();
        self.model.get()
    }

    /// Write the collider library back into the template
    pub(crate) fn sync_colliders(&mut self) {
        let colliders = self.colliders.values();
        self.model.patch(TemplatePatch {
            colliders: Some(colliders),
            ..Default::default()
        });
    }

    /// Recompute all generated placements and append the custom ones
    pub(crate) fn regenerate(&mut self) {
        let template = self.model.get();
        let tagged = merge_tagged(
            &self.walls,
            &template.dimensions,
            &self.custom,
            self.layout.wall_clearance,
        );
        let placements = tagged.iter().map(|t| t.placement).collect();
        self.tagged = tagged;
        self.model.patch(TemplatePatch {
            placements: Some(placements),
            ..Default::default()
        });
    }

    pub(crate) fn notify(&mut self) {
        let template = self.model.get();
        for observer in &mut self.observers {
            observer(template);
        }
    }
}
