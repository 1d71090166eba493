use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub mod document;
pub mod entries;
pub mod error;
pub mod layout;
pub mod model;
pub mod slots;

pub use entries::{ColliderLibrary, CustomPlacements, Entry, EntryId, EntryList, PlacementPatch};
pub use error::{EntryError, TemplateError, ValidationError, ValidationErrors};
pub use layout::{
    merge_placements, merge_placements_with_clearance, merge_tagged, solve_custom_wall, solve_wall,
    solve_wall_with_clearance, CustomWall, PlacementOrigin, TaggedPlacement, WallLayout, DEFAULT_WALL_CLEARANCE,
    MAX_ARTWORKS_PER_WALL,
};
pub use model::{TemplateModel, TemplatePatch};
pub use slots::{resolve_artwork_slots, ArtworkSlot, ResolvedArtwork};

/// Тройка координат (x, y, z); для вращений — углы Эйлера в радианах
pub type Vec3 = [f64; 3];

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn default_segments() -> u32 {
    DEFAULT_CURVED_SEGMENTS
}

fn default_arc() -> f64 {
    TAU
}

// ============================================================================
// Комната
// ============================================================================

/// Размеры комнаты. Комната выровнена по осям, центр в начале координат, пол на y=0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimensions {
    pub x_axis: f64,
    pub y_axis: f64,
    pub z_axis: f64,
}

impl Dimensions {
    /// Минимальный размер по любой оси
    pub const MIN_AXIS: f64 = 5.0;

    pub fn new(x_axis: f64, y_axis: f64, z_axis: f64) -> Self {
        Self {
            x_axis,
            y_axis,
            z_axis,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(30.0, 10.0, 40.0)
    }
}

/// Идентификатор стены комнаты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallId {
    Front,
    Back,
    Left,
    Right,
}

impl WallId {
    /// Фиксированный порядок стен при слиянии размещений
    pub const ALL: [WallId; 4] = [WallId::Front, WallId::Back, WallId::Left, WallId::Right];

    /// Длина стены вдоль её длинной оси: x для передней/задней, z для боковых
    pub fn length(&self, room: &Dimensions) -> f64 {
        match self {
            WallId::Front | WallId::Back => room.x_axis,
            WallId::Left | WallId::Right => room.z_axis,
        }
    }

    /// Поворот картины на этой стене: локальная +z смотрит в центр комнаты
    pub fn artwork_rotation(&self) -> Vec3 {
        match self {
            WallId::Back => [0.0, 0.0, 0.0],
            WallId::Front => [0.0, PI, 0.0],
            WallId::Left => [0.0, FRAC_PI_2, 0.0],
            WallId::Right => [0.0, -FRAC_PI_2, 0.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WallId::Front => "front",
            WallId::Back => "back",
            WallId::Left => "left",
            WallId::Right => "right",
        }
    }
}

impl std::fmt::Display for WallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Параметры автоматической раскладки картин на одной стене
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallConfig {
    pub count: u32,
    pub height_position: f64,
}

impl WallConfig {
    pub fn new(count: u32, height_position: f64) -> Self {
        Self {
            count,
            height_position,
        }
    }

    /// Пустая стена с картинами посередине по высоте
    pub fn empty(wall_height: f64) -> Self {
        Self::new(0, wall_height / 2.0)
    }
}

/// Конфигурация всех четырёх стен
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallConfigs {
    pub front: WallConfig,
    pub back: WallConfig,
    pub left: WallConfig,
    pub right: WallConfig,
}

impl WallConfigs {
    /// Все стены пустые, высота размещения — середина стены
    pub fn empty(wall_height: f64) -> Self {
        let cfg = WallConfig::empty(wall_height);
        Self {
            front: cfg,
            back: cfg,
            left: cfg,
            right: cfg,
        }
    }

    pub fn get(&self, wall: WallId) -> &WallConfig {
        match wall {
            WallId::Front => &self.front,
            WallId::Back => &self.back,
            WallId::Left => &self.left,
            WallId::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, wall: WallId) -> &mut WallConfig {
        match wall {
            WallId::Front => &mut self.front,
            WallId::Back => &mut self.back,
            WallId::Left => &mut self.left,
            WallId::Right => &mut self.right,
        }
    }

    /// Стены в фиксированном порядке [front, back, left, right]
    pub fn iter(&self) -> impl Iterator<Item = (WallId, &WallConfig)> {
        WallId::ALL.into_iter().map(move |w| (w, self.get(w)))
    }

    /// Суммарное число картин на всех стенах
    pub fn total_count(&self) -> usize {
        self.iter().map(|(_, c)| c.count as usize).sum()
    }
}

// ============================================================================
// Размещения картин
// ============================================================================

/// Место крепления одной рамы: позиция и поворот (радианы)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtworkPlacement {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ArtworkPlacement {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Новое пользовательское размещение: центр комнаты, середина стены по высоте
    pub fn centered(wall_height: f64) -> Self {
        Self::new([0.0, wall_height / 2.0, 0.0], [0.0, 0.0, 0.0])
    }

    /// Направление лицевой стороны (локальная +z) в мировых координатах.
    /// Порядок углов Эйлера — XYZ, как у рендерера.
    pub fn facing(&self) -> Vec3 {
        let [rx, ry, rz] = self.rotation;
        let q = glam::DQuat::from_euler(glam::EulerRot::XYZ, rx, ry, rz);
        (q * glam::DVec3::Z).to_array()
    }
}

// ============================================================================
// Коллайдеры
// ============================================================================

/// Число граней изогнутого коллайдера по умолчанию
pub const DEFAULT_CURVED_SEGMENTS: u32 = 32;
/// Минимальное число граней изогнутого коллайдера
pub const MIN_CURVED_SEGMENTS: u32 = 3;

/// Дискриминатор формы коллайдера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderShape {
    #[default]
    Box,
    Curved,
}

impl ColliderShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            ColliderShape::Box => "Box Collider",
            ColliderShape::Curved => "Curved Collider",
        }
    }
}

/// Объём столкновений. Форма фиксируется при создании и больше не меняется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Прямоугольная призма размером `args` (ширина, высота, глубина)
    Box {
        position: Vec3,
        rotation: Vec3,
        args: Vec3,
        #[serde(default = "default_true", skip_serializing_if = "is_true")]
        visible: bool,
    },
    /// Частичная цилиндрическая оболочка, заметающая `arc` радиан
    Curved {
        position: Vec3,
        rotation: Vec3,
        radius: f64,
        height: f64,
        #[serde(default = "default_segments")]
        segments: u32,
        #[serde(default = "default_arc")]
        arc: f64,
        #[serde(default = "default_true", skip_serializing_if = "is_true")]
        visible: bool,
    },
}

/// Шаблон нового прямоугольного коллайдера
pub const DEFAULT_BOX_COLLIDER: Collider = Collider::Box {
    position: [0.0, 1.5, 0.0],
    rotation: [0.0, 0.0, 0.0],
    args: [1.0, 1.0, 1.0],
    visible: true,
};

/// Шаблон нового изогнутого коллайдера
pub const DEFAULT_CURVED_COLLIDER: Collider = Collider::Curved {
    position: [0.0, 1.5, 0.0],
    rotation: [0.0, 0.0, 0.0],
    radius: 1.0,
    height: 1.0,
    segments: DEFAULT_CURVED_SEGMENTS,
    arc: TAU,
    visible: true,
};

/// Частичное обновление коллайдера.
///
/// Поля чужого варианта игнорируются, `shape` не может сменить форму.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderPatch {
    pub shape: Option<ColliderShape>,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub visible: Option<bool>,
    pub args: Option<Vec3>,
    pub radius: Option<f64>,
    pub height: Option<f64>,
    pub segments: Option<u32>,
    pub arc: Option<f64>,
}

impl Collider {
    /// Новый коллайдер из шаблона по умолчанию для формы
    pub fn default_for(shape: ColliderShape) -> Self {
        match shape {
            ColliderShape::Box => DEFAULT_BOX_COLLIDER,
            ColliderShape::Curved => DEFAULT_CURVED_COLLIDER,
        }
    }

    pub fn shape(&self) -> ColliderShape {
        match self {
            Collider::Box { .. } => ColliderShape::Box,
            Collider::Curved { .. } => ColliderShape::Curved,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Collider::Box { position, .. } | Collider::Curved { position, .. } => *position,
        }
    }

    pub fn rotation(&self) -> Vec3 {
        match self {
            Collider::Box { rotation, .. } | Collider::Curved { rotation, .. } => *rotation,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Collider::Box { visible, .. } | Collider::Curved { visible, .. } => *visible,
        }
    }

    /// Слить частичное обновление. Возвращает `false`, если патч запрашивал
    /// другую форму (запрос формы проигнорирован, остальные общие поля применены).
    pub fn apply_patch(&mut self, patch: &ColliderPatch) -> bool {
        let shape_kept = patch.shape.map_or(true, |s| s == self.shape());

        match self {
            Collider::Box {
                position,
                rotation,
                args,
                visible,
            } => {
                apply_common(patch, position, rotation, visible);
                if let Some(a) = patch.args {
                    *args = a;
                }
            }
            Collider::Curved {
                position,
                rotation,
                radius,
                height,
                segments,
                arc,
                visible,
            } => {
                apply_common(patch, position, rotation, visible);
                if let Some(r) = patch.radius {
                    *radius = r;
                }
                if let Some(h) = patch.height {
                    *height = h;
                }
                if let Some(s) = patch.segments {
                    *segments = s.max(MIN_CURVED_SEGMENTS);
                }
                if let Some(a) = patch.arc {
                    *arc = clamp_arc(a);
                }
            }
        }

        shape_kept
    }

    /// Привести числовые поля к допустимым границам (segments ≥ 3, arc ∈ [0, 2π])
    pub fn normalize(&mut self) {
        if let Collider::Curved { segments, arc, .. } = self {
            *segments = (*segments).max(MIN_CURVED_SEGMENTS);
            *arc = clamp_arc(*arc);
        }
    }
}

fn apply_common(
    patch: &ColliderPatch,
    position: &mut Vec3,
    rotation: &mut Vec3,
    visible: &mut bool,
) {
    if let Some(p) = patch.position {
        *position = p;
    }
    if let Some(r) = patch.rotation {
        *rotation = r;
    }
    if let Some(v) = patch.visible {
        *visible = v;
    }
}

/// Ограничить дугу диапазоном [0, 2π]
pub fn clamp_arc(arc: f64) -> f64 {
    arc.clamp(0.0, TAU)
}

// ============================================================================
// Шаблон галереи
// ============================================================================

/// Полное сериализуемое описание одной комнаты галереи.
///
/// Отсутствующие в документе поля заполняются из шаблона по умолчанию.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub dimensions: Dimensions,
    pub wall_thickness: f64,
    pub wall_height: f64,
    pub model_path: String,
    pub model_scale: f64,
    pub model_rotation: Vec3,
    pub model_position: Vec3,
    pub preview_image: String,
    pub is_premium: bool,
    pub is_active: bool,
    #[serde(rename = "customColliders")]
    pub colliders: Vec<Collider>,
    #[serde(rename = "artworkPlacements")]
    pub placements: Vec<ArtworkPlacement>,
}

impl Default for GalleryTemplate {
    fn default() -> Self {
        Self {
            id: None,
            name: "New Gallery Template".to_string(),
            description: "A customizable gallery space".to_string(),
            dimensions: Dimensions::default(),
            wall_thickness: 0.2,
            wall_height: 3.0,
            model_path: String::new(),
            model_scale: 3.0,
            model_rotation: [0.0, 0.0, 0.0],
            model_position: [0.0, 0.0, 0.0],
            preview_image: String::new(),
            is_premium: false,
            is_active: true,
            colliders: Vec::new(),
            placements: Vec::new(),
        }
    }
}
