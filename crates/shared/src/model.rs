//! Модель шаблона — единственный источник истины для рендерера и хранилища.
//!
//! Модель только хранит данные: раскладку и библиотеку коллайдеров вызывает
//! её владелец и записывает результат через `patch`.

use serde::{Deserialize, Serialize};

use crate::{ArtworkPlacement, Collider, Dimensions, GalleryTemplate, Vec3};

/// Частичное обновление шаблона (поверхностное слияние)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub wall_thickness: Option<f64>,
    pub wall_height: Option<f64>,
    pub model_path: Option<String>,
    pub model_scale: Option<f64>,
    pub model_rotation: Option<Vec3>,
    pub model_position: Option<Vec3>,
    pub preview_image: Option<String>,
    pub is_premium: Option<bool>,
    pub is_active: Option<bool>,
    #[serde(rename = "customColliders")]
    pub colliders: Option<Vec<Collider>>,
    #[serde(rename = "artworkPlacements")]
    pub placements: Option<Vec<ArtworkPlacement>>,
}

impl TemplatePatch {
    /// Затрагивает ли патч геометрию комнаты (нужен пересчёт раскладки)
    pub fn touches_room(&self) -> bool {
        self.dimensions.is_some() || self.wall_height.is_some()
    }

    fn apply(self, t: &mut GalleryTemplate) {
        if let Some(id) = self.id {
            t.id = Some(id);
        }
        if let Some(v) = self.name {
            t.name = v;
        }
        if let Some(v) = self.description {
            t.description = v;
        }
        if let Some(v) = self.dimensions {
            t.dimensions = v;
        }
        if let Some(v) = self.wall_thickness {
            t.wall_thickness = v;
        }
        if let Some(v) = self.wall_height {
            t.wall_height = v;
        }
        if let Some(v) = self.model_path {
            t.model_path = v;
        }
        if let Some(v) = self.model_scale {
            t.model_scale = v;
        }
        if let Some(v) = self.model_rotation {
            t.model_rotation = v;
        }
        if let Some(v) = self.model_position {
            t.model_position = v;
        }
        if let Some(v) = self.preview_image {
            t.preview_image = v;
        }
        if let Some(v) = self.is_premium {
            t.is_premium = v;
        }
        if let Some(v) = self.is_active {
            t.is_active = v;
        }
        if let Some(v) = self.colliders {
            t.colliders = v;
        }
        if let Some(v) = self.placements {
            t.placements = v;
        }
    }
}

/// Изменяемый агрегат шаблона с флагом несохранённых изменений
#[derive(Debug, Clone, Default)]
pub struct TemplateModel {
    template: GalleryTemplate,
    dirty: bool,
    version: u64,
}

impl TemplateModel {
    /// Модель над загруженным шаблоном; изначально сохранена
    pub fn new(template: GalleryTemplate) -> Self {
        Self {
            template,
            dirty: false,
            version: 0,
        }
    }

    pub fn get(&self) -> &GalleryTemplate {
        &self.template
    }

    /// Слить патч и вернуть новое состояние. Любой вызов помечает модель грязной.
    pub fn patch(&mut self, patch: TemplatePatch) -> &GalleryTemplate {
        patch.apply(&mut self.template);
        self.dirty = true;
        self.version += 1;
        &self.template
    }

    /// Есть ли несохранённые изменения
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Отметить успешное сохранение; хранилище могло выдать шаблону id
    pub fn mark_saved(&mut self, id: Option<String>) {
        if let Some(id) = id {
            self.template.id = Some(id);
        }
        self.dirty = false;
    }

    /// Счётчик изменений (растёт на каждый `patch`)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_document(&self) -> Result<serde_json::Value, crate::TemplateError> {
        self.template.to_document()
    }

    pub fn from_document(doc: serde_json::Value) -> Result<Self, crate::TemplateError> {
        Ok(Self::new(GalleryTemplate::from_document(doc)?))
    }
}
