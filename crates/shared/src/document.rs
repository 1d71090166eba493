//! Сериализация шаблона в документ хранилища и обратно.
//!
//! Загрузка мягкая: недостающие поля берутся из шаблона по умолчанию, числовые
//! минимумы и границы коллайдеров применяются без отказа. Строгая проверка
//! схемы (`validate`) выполняется перед сохранением.

use serde_json::Value;
use std::f64::consts::TAU;

use crate::error::{TemplateError, ValidationErrors};
use crate::{Collider, Dimensions, GalleryTemplate, Vec3, MIN_CURVED_SEGMENTS};

/// Минимальная толщина стены
pub const MIN_WALL_THICKNESS: f64 = 0.1;
/// Минимальная высота стены
pub const MIN_WALL_HEIGHT: f64 = 1.0;
/// Минимальный масштаб модели
pub const MIN_MODEL_SCALE: f64 = 0.1;
/// Минимальная длина описания (в символах)
pub const MIN_DESCRIPTION_CHARS: usize = 5;

impl GalleryTemplate {
    /// Документ для хранилища
    pub fn to_document(&self) -> Result<Value, TemplateError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Загрузить из документа: умолчания для отсутствующих полей, затем `normalize`
    pub fn from_document(doc: Value) -> Result<Self, TemplateError> {
        if !doc.is_object() {
            return Err(TemplateError::Malformed(
                "template document must be a JSON object".to_string(),
            ));
        }
        let mut template: GalleryTemplate = serde_json::from_value(doc)?;
        template.normalize();
        Ok(template)
    }

    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Применить объявленные минимумы и границы
    pub fn normalize(&mut self) {
        let d = &mut self.dimensions;
        d.x_axis = d.x_axis.max(Dimensions::MIN_AXIS);
        d.y_axis = d.y_axis.max(Dimensions::MIN_AXIS);
        d.z_axis = d.z_axis.max(Dimensions::MIN_AXIS);
        self.wall_thickness = self.wall_thickness.max(MIN_WALL_THICKNESS);
        self.wall_height = self.wall_height.max(MIN_WALL_HEIGHT);
        self.model_scale = self.model_scale.max(MIN_MODEL_SCALE);
        for collider in &mut self.colliders {
            collider.normalize();
        }
    }

    /// Полная проверка схемы документа
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.is_empty() {
            errors.push("name", "Name is required");
        }
        if self.description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push("description", "Description must be at least 5 characters");
        }

        let d = &self.dimensions;
        for (path, value, label) in [
            ("dimensions.xAxis", d.x_axis, "Width"),
            ("dimensions.yAxis", d.y_axis, "Height"),
            ("dimensions.zAxis", d.z_axis, "Depth"),
        ] {
            if !(value.is_finite() && value >= Dimensions::MIN_AXIS) {
                errors.push(path, format!("{label} must be at least 5 units"));
            }
        }

        if !(self.wall_thickness.is_finite() && self.wall_thickness >= MIN_WALL_THICKNESS) {
            errors.push("wallThickness", "Wall thickness must be at least 0.1 units");
        }
        if !(self.wall_height.is_finite() && self.wall_height >= MIN_WALL_HEIGHT) {
            errors.push("wallHeight", "Wall height must be at least 1 unit");
        }
        if self.model_path.is_empty() {
            errors.push("modelPath", "Model path is required");
        }
        if !(self.model_scale.is_finite() && self.model_scale >= MIN_MODEL_SCALE) {
            errors.push("modelScale", "Model scale must be at least 0.1");
        }
        check_vec3(&mut errors, "modelRotation", &self.model_rotation);
        check_vec3(&mut errors, "modelPosition", &self.model_position);
        if self.preview_image.is_empty() {
            errors.push("previewImage", "Preview image is required");
        }

        for (i, collider) in self.colliders.iter().enumerate() {
            validate_collider(&mut errors, &format!("customColliders[{i}]"), collider);
        }
        for (i, placement) in self.placements.iter().enumerate() {
            let base = format!("artworkPlacements[{i}]");
            check_vec3(&mut errors, &format!("{base}.position"), &placement.position);
            check_vec3(&mut errors, &format!("{base}.rotation"), &placement.rotation);
        }

        errors.into_result()
    }
}

fn check_vec3(errors: &mut ValidationErrors, path: &str, v: &Vec3) {
    if !v.iter().all(|c| c.is_finite()) {
        errors.push(path, "Expected three finite numbers");
    }
}

fn validate_collider(errors: &mut ValidationErrors, base: &str, collider: &Collider) {
    check_vec3(errors, &format!("{base}.position"), &collider.position());
    check_vec3(errors, &format!("{base}.rotation"), &collider.rotation());

    match collider {
        Collider::Box { args, .. } => {
            check_vec3(errors, &format!("{base}.args"), args);
        }
        Collider::Curved {
            radius,
            height,
            segments,
            arc,
            ..
        } => {
            if !(radius.is_finite() && *radius > 0.0) {
                errors.push(format!("{base}.radius"), "Radius must be positive");
            }
            if !(height.is_finite() && *height > 0.0) {
                errors.push(format!("{base}.height"), "Height must be positive");
            }
            if *segments < MIN_CURVED_SEGMENTS {
                errors.push(format!("{base}.segments"), "Segments must be at least 3");
            }
            if !(0.0..=TAU).contains(arc) {
                errors.push(format!("{base}.arc"), "Arc must be between 0 and 2π");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtworkPlacement, DEFAULT_BOX_COLLIDER, DEFAULT_CURVED_COLLIDER};
    use serde_json::json;

    fn valid_template() -> GalleryTemplate {
        GalleryTemplate {
            id: Some("gallery-1".to_string()),
            name: "Hall".to_string(),
            description: "A long exhibition hall".to_string(),
            model_path: "models/hall.glb".to_string(),
            preview_image: "previews/hall.png".to_string(),
            colliders: vec![DEFAULT_BOX_COLLIDER, DEFAULT_CURVED_COLLIDER],
            placements: vec![ArtworkPlacement::new([0.1, 1.5, -19.85], [0.0, 0.3, 0.0])],
            ..Default::default()
        }
    }

    #[test]
    fn test_roundtrip_document() {
        let t = valid_template();
        let doc = t.to_document().unwrap();
        assert_eq!(GalleryTemplate::from_document(doc).unwrap(), t);
    }

    #[test]
    fn test_roundtrip_json_string() {
        let t = valid_template();
        let json = t.to_json().unwrap();
        assert_eq!(GalleryTemplate::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_partial_document_loads_with_defaults() {
        let doc = json!({
            "name": "Partial",
            "customColliders": [
                {"shape": "curved", "position": [0, 1, 0], "rotation": [0, 0, 0], "radius": 2, "height": 4}
            ]
        });
        let t = GalleryTemplate::from_document(doc).unwrap();
        assert_eq!(t.name, "Partial");
        assert_eq!(t.dimensions, Dimensions::new(30.0, 10.0, 40.0));
        assert!(t.is_active);
        assert!(t.placements.is_empty());
        match &t.colliders[0] {
            Collider::Curved { segments, arc, .. } => {
                assert_eq!(*segments, 32);
                assert_eq!(*arc, TAU);
            }
            _ => panic!("Expected Curved"),
        }
    }

    #[test]
    fn test_load_applies_minimums() {
        let doc = json!({
            "dimensions": {"xAxis": 2.0, "yAxis": 12.0, "zAxis": 1.0},
            "wallThickness": 0.0,
            "wallHeight": 0.5,
            "modelScale": 0.01,
            "customColliders": [
                {"shape": "curved", "position": [0, 0, 0], "rotation": [0, 0, 0],
                 "radius": 1, "height": 1, "segments": 1, "arc": 9.0}
            ]
        });
        let t = GalleryTemplate::from_document(doc).unwrap();
        assert_eq!(t.dimensions, Dimensions::new(5.0, 12.0, 5.0));
        assert_eq!(t.wall_thickness, MIN_WALL_THICKNESS);
        assert_eq!(t.wall_height, MIN_WALL_HEIGHT);
        assert_eq!(t.model_scale, MIN_MODEL_SCALE);
        match &t.colliders[0] {
            Collider::Curved { segments, arc, .. } => {
                assert_eq!(*segments, MIN_CURVED_SEGMENTS);
                assert_eq!(*arc, TAU);
            }
            _ => panic!("Expected Curved"),
        }
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            GalleryTemplate::from_document(json!([1, 2, 3])),
            Err(TemplateError::Malformed(_))
        ));
        assert!(matches!(
            GalleryTemplate::from_document(json!({"modelRotation": [0, 0]})),
            Err(TemplateError::Malformed(_))
        ));
        assert!(matches!(
            GalleryTemplate::from_json("{not json"),
            Err(TemplateError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_template().validate().is_ok());
    }

    #[test]
    fn test_default_template_is_not_saveable() {
        let errors = GalleryTemplate::default().validate().unwrap_err();
        assert!(errors.get("modelPath").is_some());
        assert!(errors.get("previewImage").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_validate_reports_field_paths() {
        let mut t = valid_template();
        t.description = "abc".to_string();
        t.dimensions.z_axis = 4.0;
        t.colliders.push(Collider::Curved {
            position: [0.0; 3],
            rotation: [0.0; 3],
            radius: 0.0,
            height: 1.0,
            segments: 2,
            arc: 1.0,
            visible: true,
        });
        t.placements[0].rotation[1] = f64::NAN;

        let errors = t.validate().unwrap_err();
        assert_eq!(
            errors.get("description").unwrap().message,
            "Description must be at least 5 characters"
        );
        assert!(errors.get("dimensions.zAxis").is_some());
        assert!(errors.get("customColliders[2].radius").is_some());
        assert!(errors.get("customColliders[2].segments").is_some());
        assert!(errors.get("artworkPlacements[0].rotation").is_some());
        assert_eq!(errors.len(), 5);
    }
}
