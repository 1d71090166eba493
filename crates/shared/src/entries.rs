//! Упорядоченные списки элементов шаблона со стабильными идентификаторами.
//!
//! Коллайдеры и пользовательские размещения адресуются либо по индексу
//! (как в редакторе), либо по id, который не сдвигается при удалении соседей.
//! Идентификаторы живут только в сессии и не сериализуются.

use serde::{Deserialize, Serialize};

use crate::error::EntryError;
use crate::{ArtworkPlacement, Collider, ColliderPatch, ColliderShape, Vec3};

/// Уникальный идентификатор элемента списка
pub type EntryId = String;

/// Элемент списка с идентификатором
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub id: EntryId,
    pub value: T,
}

/// Упорядоченный список элементов с генерируемыми id
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

/// Библиотека коллайдеров шаблона
pub type ColliderLibrary = EntryList<Collider>;

/// Размещения, добавленные пользователем вручную
pub type CustomPlacements = EntryList<ArtworkPlacement>;

impl<T: Clone> EntryList<T> {
    /// Построить список из значений, выдав каждому новый id
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::default();
        for value in values {
            list.add(value);
        }
        list
    }

    /// Значения в текущем порядке
    pub fn values(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }
}

impl<T> EntryList<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    /// Добавить в конец; всегда успешно
    pub fn add(&mut self, value: T) -> EntryId {
        let id = uuid::Uuid::new_v4().to_string();
        self.entries.push(Entry {
            id: id.clone(),
            value,
        });
        id
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|e| &e.value)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.value)
    }

    /// Текущий индекс элемента с данным id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<&EntryId> {
        self.entries.get(index).map(|e| &e.id)
    }

    /// Мутабельный доступ по индексу
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, EntryError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .map(|e| &mut e.value)
            .ok_or(EntryError::IndexOutOfRange { index, len })
    }

    /// Удалить по индексу; все последующие индексы сдвигаются на один
    pub fn remove(&mut self, index: usize) -> Result<Entry<T>, EntryError> {
        if index >= self.entries.len() {
            return Err(EntryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &str) -> Result<Entry<T>, EntryError> {
        let index = self.resolve(id)?;
        Ok(self.entries.remove(index))
    }

    /// Индекс по id или `UnknownId`
    pub fn resolve(&self, id: &str) -> Result<usize, EntryError> {
        self.index_of(id)
            .ok_or_else(|| EntryError::UnknownId(id.to_string()))
    }
}

impl EntryList<Collider> {
    /// Добавить коллайдер из шаблона по умолчанию для формы
    pub fn add_default(&mut self, shape: ColliderShape) -> EntryId {
        self.add(Collider::default_for(shape))
    }

    /// Слить частичное обновление в коллайдер по индексу.
    /// Форма не меняется; возвращает `false`, если запрос формы был проигнорирован.
    pub fn update(&mut self, index: usize, patch: &ColliderPatch) -> Result<bool, EntryError> {
        Ok(self.get_mut(index)?.apply_patch(patch))
    }

    pub fn update_by_id(&mut self, id: &str, patch: &ColliderPatch) -> Result<bool, EntryError> {
        let index = self.resolve(id)?;
        self.update(index, patch)
    }
}

/// Частичное обновление пользовательского размещения
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
}

impl PlacementPatch {
    /// Изменить одну координату позиции
    pub fn position_axis(current: &ArtworkPlacement, axis: usize, value: f64) -> Self {
        let mut position = current.position;
        if let Some(slot) = position.get_mut(axis) {
            *slot = value;
        }
        Self {
            position: Some(position),
            rotation: None,
        }
    }

    /// Изменить один угол поворота
    pub fn rotation_axis(current: &ArtworkPlacement, axis: usize, value: f64) -> Self {
        let mut rotation = current.rotation;
        if let Some(slot) = rotation.get_mut(axis) {
            *slot = value;
        }
        Self {
            position: None,
            rotation: Some(rotation),
        }
    }

    fn apply(&self, placement: &mut ArtworkPlacement) {
        if let Some(p) = self.position {
            placement.position = p;
        }
        if let Some(r) = self.rotation {
            placement.rotation = r;
        }
    }
}

impl EntryList<ArtworkPlacement> {
    pub fn update(&mut self, index: usize, patch: &PlacementPatch) -> Result<(), EntryError> {
        patch.apply(self.get_mut(index)?);
        Ok(())
    }

    pub fn update_by_id(&mut self, id: &str, patch: &PlacementPatch) -> Result<(), EntryError> {
        let index = self.resolve(id)?;
        self.update(index, patch)
    }
}
