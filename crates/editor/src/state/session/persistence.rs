//! Save and open through a template store

use shared::GalleryTemplate;

use super::TemplateSession;
use crate::error::SessionError;
use crate::state::settings::LayoutSettings;
use crate::store::TemplateStore;

impl TemplateSession {
    /// Open a stored template
    pub fn open(
        store: &dyn TemplateStore,
        id: &str,
        layout: LayoutSettings,
    ) -> Result<Self, SessionError> {
        let template = store.load(id)?;
        tracing::info!("Opened template {id} ({})", template.name);
        Ok(Self::with_settings(template, layout))
    }

    /// Validate and persist the template.
    ///
    /// On failure the template and dirty flag are left as they were, so the
    /// same session can be saved again.
    pub fn save(&mut self, store: &mut dyn TemplateStore) -> Result<String, SessionError> {
        let template = self.model.get();
        if let Err(errors) = template.validate() {
            tracing::warn!("Template not saved, validation failed: {errors}");
            return Err(errors.into());
        }

        match store.save(template) {
            Ok(id) => {
                tracing::info!("Saved template {id} (version {})", self.version());
                self.model.mark_saved(Some(id.clone()));
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Failed to save template: {e}");
                Err(e.into())
            }
        }
    }

    /// Serialized template document
    pub fn export(&self) -> Result<serde_json::Value, SessionError> {
        Ok(self
            .model
            .to_document()
            .map_err(crate::store::PersistenceError::from)?)
    }

    /// Replace the whole template (e.g. after an external reload)
    pub fn reload(&mut self, template: GalleryTemplate) {
        let observers = std::mem::take(&mut self.observers);
        *self = Self::with_settings(template, self.layout.clone());
        self.observers = observers;
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{saveable_template, FailingStore};
    use crate::store::MemoryTemplateStore;

    #[test]
    fn test_save_clears_dirty_and_assigns_id() {
        let mut store = MemoryTemplateStore::new();
        let mut session = TemplateSession::new(saveable_template());
        session.add_placement();
        assert!(session.is_dirty());

        let id = session.save(&mut store).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.template().id.as_deref(), Some(id.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_template_not_saved() {
        let mut store = MemoryTemplateStore::new();
        let mut session = TemplateSession::default();
        let err = session.save(&mut store).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let mut session = TemplateSession::new(saveable_template());
        session.add_placement();
        let before = session.snapshot();

        let err = session.save(&mut FailingStore).unwrap_err();
        assert!(err.is_retryable());
        assert!(session.is_dirty());
        assert_eq!(session.template(), &before);

        let mut store = MemoryTemplateStore::new();
        session.save(&mut store).unwrap();
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_open_roundtrip() {
        let mut store = MemoryTemplateStore::new();
        let mut session = TemplateSession::new(saveable_template());
        session.add_placement();
        let id = session.save(&mut store).unwrap();

        let reopened = TemplateSession::open(&store, &id, LayoutSettings::default()).unwrap();
        assert_eq!(reopened.template(), session.template());
        assert_eq!(reopened.custom_placements().len(), 1);
        assert!(!reopened.is_dirty());
    }

    #[test]
    fn test_reload_keeps_observers() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut session = TemplateSession::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        session.subscribe(move |_| counter.set(counter.get() + 1));

        session.reload(saveable_template());
        session.add_placement();
        assert_eq!(calls.get(), 2);
        assert_eq!(session.template().name, saveable_template().name);
    }
}
