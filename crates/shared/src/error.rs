//! Ошибки ядра: разбор документа, валидация схемы, адресация элементов

use serde::Serialize;

/// Ошибка одного поля документа
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Путь к полю, например `dimensions.xAxis` или `customColliders[2].radius`
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Набор ошибок валидации (никогда не пустой, если возвращён как `Err`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, thiserror::Error)]
#[error("{}", join_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Найти ошибку по пути поля
    pub fn get(&self, path: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.path == path)
    }

    /// `Ok(())` если ошибок нет
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ошибки загрузки/сериализации шаблона
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Документ структурно не является шаблоном (битый JSON, неверная длина кортежа,
    /// неизвестная форма коллайдера)
    #[error("malformed template document: {0}")]
    Malformed(String),
    /// Документ не прошёл проверку схемы
    #[error("template validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<serde_json::Error> for TemplateError {
    fn from(e: serde_json::Error) -> Self {
        TemplateError::Malformed(e.to_string())
    }
}

/// Ошибки адресации элементов списка (коллайдеры, пользовательские размещения)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no entry with id '{0}'")]
    UnknownId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Name is required");
        errors.push("dimensions.xAxis", "Width must be at least 5 units");

        assert_eq!(
            errors.to_string(),
            "name: Name is required; dimensions.xAxis: Width must be at least 5 units"
        );
        let err: Box<dyn std::error::Error> = Box::new(errors.clone());
        assert_eq!(err.to_string(), errors.to_string());
    }

    #[test]
    fn test_template_error_wraps_validation() {
        let mut errors = ValidationErrors::new();
        errors.push("wallHeight", "Wall height must be at least 1 unit");
        let err = TemplateError::from(errors);
        assert_eq!(
            err.to_string(),
            "template validation failed: wallHeight: Wall height must be at least 1 unit"
        );
    }
}
