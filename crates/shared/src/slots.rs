//! Привязка картин выставки к местам шаблона по индексу размещения

use serde::{Deserialize, Serialize};

use crate::ArtworkPlacement;

/// Картина, закреплённая за индексом в `artworkPlacements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkSlot {
    pub artwork_id: String,
    pub position_index: i64,
}

/// Картина вместе с её размещением в комнате
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedArtwork {
    pub artwork_id: String,
    pub placement: ArtworkPlacement,
}

/// Сопоставить слоты с размещениями. Слоты с индексом вне диапазона отбрасываются.
pub fn resolve_artwork_slots(
    placements: &[ArtworkPlacement],
    slots: &[ArtworkSlot],
) -> Vec<ResolvedArtwork> {
    slots
        .iter()
        .filter_map(|slot| {
            let index = usize::try_from(slot.position_index).ok()?;
            placements.get(index).map(|placement| ResolvedArtwork {
                artwork_id: slot.artwork_id.clone(),
                placement: *placement,
            })
        })
        .collect()
}
