//! Раскладка картин по стенам комнаты.
//!
//! `solve_wall` равномерно распределяет картины вдоль одной стены и
//! разворачивает их лицом в комнату; `merge_placements` собирает результат
//! четырёх стен и пользовательские размещения в один список.

use serde::{Deserialize, Serialize};

use crate::entries::{CustomPlacements, EntryId};
use crate::{ArtworkPlacement, Dimensions, Vec3, WallConfigs, WallId};

/// Отступ плоскости картины от поверхности стены внутрь комнаты
pub const DEFAULT_WALL_CLEARANCE: f64 = 0.15;

/// Максимум картин на одной стене в редакторе
pub const MAX_ARTWORKS_PER_WALL: u32 = 8;

/// Результат раскладки одной стены: `positions.len() == rotations.len() == count`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub positions: Vec<Vec3>,
    pub rotations: Vec<Vec3>,
}

impl WallLayout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Пары позиция/поворот в порядке вдоль стены
    pub fn placements(&self) -> impl Iterator<Item = ArtworkPlacement> + '_ {
        self.positions
            .iter()
            .zip(self.rotations.iter())
            .map(|(p, r)| ArtworkPlacement::new(*p, *r))
    }
}

/// Координаты вдоль стены, симметричные относительно её середины:
/// `-L/2 + L/(n+1) * (i+1)`
pub fn along_wall_offsets(wall_length: f64, count: u32) -> Vec<f64> {
    let spacing = wall_length / (f64::from(count) + 1.0);
    (0..count)
        .map(|i| -wall_length / 2.0 + spacing * (f64::from(i) + 1.0))
        .collect()
}

/// Раскладка стандартной стены с отступом по умолчанию
pub fn solve_wall(
    wall: WallId,
    wall_length: f64,
    count: u32,
    room: &Dimensions,
    height_position: f64,
) -> WallLayout {
    solve_wall_with_clearance(
        wall,
        wall_length,
        count,
        room,
        height_position,
        DEFAULT_WALL_CLEARANCE,
    )
}

/// Раскладка стандартной стены.
///
/// Высота не проверяется: ограничения диапазона — забота редактора.
pub fn solve_wall_with_clearance(
    wall: WallId,
    wall_length: f64,
    count: u32,
    room: &Dimensions,
    height_position: f64,
    clearance: f64,
) -> WallLayout {
    let half_x = room.x_axis / 2.0;
    let half_z = room.z_axis / 2.0;

    let positions: Vec<Vec3> = along_wall_offsets(wall_length, count)
        .into_iter()
        .map(|t| match wall {
            WallId::Back => [t, height_position, -half_z + clearance],
            WallId::Front => [t, height_position, half_z - clearance],
            WallId::Left => [-half_x + clearance, height_position, t],
            WallId::Right => [half_x - clearance, height_position, t],
        })
        .collect();
    let rotations = vec![wall.artwork_rotation(); positions.len()];

    WallLayout {
        positions,
        rotations,
    }
}

/// Произвольная (внутренняя) стена: центр, поворот и направление отступа
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWall {
    pub length: f64,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_offset_direction")]
    pub offset_direction: Vec3,
}

fn default_offset_direction() -> Vec3 {
    [0.0, 0.0, 1.0]
}

/// Раскладка на произвольной стене. Все картины получают поворот стены.
pub fn solve_custom_wall(
    wall: &CustomWall,
    count: u32,
    height_position: f64,
    clearance: f64,
) -> WallLayout {
    let [px, _, pz] = wall.position;
    let [dx, _, dz] = wall.offset_direction;
    let yaw = wall.rotation[1];
    // Стена идёт вдоль z, если её поворот ближе к ±90°
    let along_z = yaw.sin().abs() > yaw.cos().abs();

    let positions: Vec<Vec3> = along_wall_offsets(wall.length, count)
        .into_iter()
        .map(|t| {
            if along_z {
                [px + dx * clearance, height_position, pz + t]
            } else {
                [px + t, height_position, pz + dz * clearance]
            }
        })
        .collect();
    let rotations = vec![wall.rotation; positions.len()];

    WallLayout {
        positions,
        rotations,
    }
}

/// Происхождение размещения после слияния
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum PlacementOrigin {
    /// Сгенерировано раскладкой стены, `slot` — номер вдоль стены
    Generated { wall: WallId, slot: u32 },
    /// Добавлено пользователем
    Custom { id: EntryId },
}

/// Размещение с пометкой происхождения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedPlacement {
    #[serde(flatten)]
    pub origin: PlacementOrigin,
    pub placement: ArtworkPlacement,
}

impl TaggedPlacement {
    pub fn is_generated(&self) -> bool {
        matches!(self.origin, PlacementOrigin::Generated { .. })
    }
}

fn generated<'a>(
    walls: &'a WallConfigs,
    room: &Dimensions,
    clearance: f64,
) -> impl Iterator<Item = TaggedPlacement> + 'a {
    let room = *room;
    walls.iter().flat_map(move |(wall, cfg)| {
        let layout = solve_wall_with_clearance(
            wall,
            wall.length(&room),
            cfg.count,
            &room,
            cfg.height_position,
            clearance,
        );
        let placements: Vec<ArtworkPlacement> = layout.placements().collect();
        placements
            .into_iter()
            .zip(0u32..)
            .map(move |(placement, slot)| TaggedPlacement {
                origin: PlacementOrigin::Generated { wall, slot },
                placement,
            })
    })
}

/// Полное слияние: четыре стены в порядке [front, back, left, right],
/// затем пользовательские размещения без изменений.
///
/// Всегда пересчитывается целиком: после слияния сгенерированные и
/// пользовательские элементы неразличимы.
pub fn merge_placements(
    walls: &WallConfigs,
    room: &Dimensions,
    custom: &[ArtworkPlacement],
) -> Vec<ArtworkPlacement> {
    merge_placements_with_clearance(walls, room, custom, DEFAULT_WALL_CLEARANCE)
}

/// Слияние с заданным отступом от стен
pub fn merge_placements_with_clearance(
    walls: &WallConfigs,
    room: &Dimensions,
    custom: &[ArtworkPlacement],
    clearance: f64,
) -> Vec<ArtworkPlacement> {
    generated(walls, room, clearance)
        .map(|t| t.placement)
        .chain(custom.iter().copied())
        .collect()
}

/// То же слияние, но с пометками происхождения
pub fn merge_tagged(
    walls: &WallConfigs,
    room: &Dimensions,
    custom: &CustomPlacements,
    clearance: f64,
) -> Vec<TaggedPlacement> {
    generated(walls, room, clearance)
        .chain(custom.iter().map(|e| TaggedPlacement {
            origin: PlacementOrigin::Custom { id: e.id.clone() },
            placement: e.value,
        }))
        .collect()
}
