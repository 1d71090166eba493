//! JSON command protocol for programmatic callers.
//!
//! Commands address colliders and custom placements by `index` or by `id`;
//! unlike the UI paths, a stale reference is reported as an error.

use serde::{Deserialize, Serialize};
use shared::{
    ArtworkPlacement, Collider, ColliderPatch, ColliderShape, EntryList, PlacementPatch,
    TemplatePatch, ValidationErrors, WallId,
};

use crate::error::SessionError;
use crate::state::TemplateSession;

/// A command executed against an editing session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Shallow-merge template fields
    Patch { patch: TemplatePatch },
    /// Change count and/or mounting height of one wall
    SetWallConfig {
        wall: WallId,
        #[serde(default)]
        count: Option<u32>,
        #[serde(default)]
        height_position: Option<f64>,
    },
    /// Add a collider; `collider` wins over `shape`, which falls back to the
    /// session's default shape
    AddCollider {
        #[serde(default)]
        shape: Option<ColliderShape>,
        #[serde(default)]
        collider: Option<Collider>,
    },
    UpdateCollider {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        id: Option<String>,
        patch: ColliderPatch,
    },
    RemoveCollider {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        id: Option<String>,
    },
    /// Add a custom placement (room centre when omitted)
    AddPlacement {
        #[serde(default)]
        placement: Option<ArtworkPlacement>,
    },
    UpdatePlacement {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        id: Option<String>,
        patch: PlacementPatch,
    },
    RemovePlacement {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        id: Option<String>,
    },
    /// Summary of the session
    Inspect,
    /// Run save-time validation without saving
    Validate,
    /// Serialized template document
    ExportTemplate,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl From<Result<(), SessionError>> for CommandResponse {
    fn from(result: Result<(), SessionError>) -> Self {
        match result {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        }
    }
}

/// Index from an explicit index or an id; id wins when both are given
fn target<T>(
    list: &EntryList<T>,
    index: Option<usize>,
    id: Option<&str>,
) -> Result<usize, SessionError> {
    match (id, index) {
        (Some(id), _) => Ok(list.resolve(id)?),
        (None, Some(index)) => Ok(index),
        (None, None) => {
            let mut errors = ValidationErrors::new();
            errors.push("target", "Either index or id is required");
            Err(errors.into())
        }
    }
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut TemplateSession, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::Patch { patch } => {
            session.patch(patch);
            CommandResponse::ok_with_data(serde_json::json!({ "version": session.version() }))
        }

        EditorCommand::SetWallConfig {
            wall,
            count,
            height_position,
        } => {
            let mut config = *session.wall_config(wall);
            if let Some(count) = count {
                config.count = count;
            }
            if let Some(h) = height_position {
                config.height_position = h;
            }
            match session.set_wall_config(wall, config) {
                Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                    "placement_count": session.template().placements.len(),
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::AddCollider { shape, collider } => {
            let id = match collider {
                Some(c) => session.add_collider(c),
                None => {
                    let shape = shape.unwrap_or_else(|| session.default_collider_shape());
                    session.add_default_collider(shape)
                }
            };
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::UpdateCollider { index, id, patch } => {
            let result = target(session.colliders(), index, id.as_deref())
                .and_then(|i| session.update_collider(i, &patch));
            result.into()
        }

        EditorCommand::RemoveCollider { index, id } => {
            let result = target(session.colliders(), index, id.as_deref())
                .and_then(|i| session.remove_collider(i));
            match result {
                Ok(removed) => CommandResponse::ok_with_data(serde_json::json!({
                    "removed": removed,
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::AddPlacement { placement } => {
            let id = match placement {
                Some(p) => session.add_placement_at(p),
                None => session.add_placement(),
            };
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::UpdatePlacement { index, id, patch } => {
            let result = target(session.custom_placements(), index, id.as_deref())
                .and_then(|i| session.update_placement(i, &patch));
            result.into()
        }

        EditorCommand::RemovePlacement { index, id } => {
            let result = target(session.custom_placements(), index, id.as_deref())
                .and_then(|i| session.remove_placement(i));
            match result {
                Ok(removed) => CommandResponse::ok_with_data(serde_json::json!({
                    "removed": removed,
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::Inspect => {
            let template = session.template();
            let colliders: Vec<serde_json::Value> = session
                .colliders()
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "id": entry.id,
                        "shape": entry.value.shape(),
                        "name": entry.value.shape().display_name(),
                        "visible": entry.value.is_visible(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "name": template.name,
                "version": session.version(),
                "dirty": session.is_dirty(),
                "walls": session.wall_configs(),
                "collider_count": colliders.len(),
                "colliders": colliders,
                "placement_count": template.placements.len(),
                "placements": session.tagged_placements(),
            }))
        }

        EditorCommand::Validate => match session.template().validate() {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "valid": true })),
            Err(errors) => CommandResponse::ok_with_data(serde_json::json!({
                "valid": false,
                "errors": errors.errors,
            })),
        },

        EditorCommand::ExportTemplate => match session.export() {
            Ok(doc) => CommandResponse::ok_with_data(serde_json::json!({ "template": doc })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut TemplateSession, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    session: &mut TemplateSession,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}
