use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::AppState;
use shared::{
    merge_placements_with_clearance, solve_custom_wall, solve_wall_with_clearance,
    ArtworkPlacement, CustomWall, Dimensions, GalleryTemplate, TemplateError, ValidationError,
    WallConfigs, WallId, WallLayout, MAX_ARTWORKS_PER_WALL,
};

/// Error body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn bad_request(err: TemplateError) -> (StatusCode, Json<ApiError>) {
    tracing::warn!("Rejected template document: {err}");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details("Malformed template document", err.to_string())),
    )
}

fn check_count(field: &str, count: u32) -> Result<(), (StatusCode, Json<ApiError>)> {
    if count > MAX_ARTWORKS_PER_WALL {
        tracing::warn!("Rejected layout request: {field} = {count}");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                format!("At most {MAX_ARTWORKS_PER_WALL} artworks per wall"),
                field,
            )),
        ));
    }
    Ok(())
}

fn check_length(length: f64) -> Result<(), (StatusCode, Json<ApiError>)> {
    if !length.is_finite() || length <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Wall length must be positive")),
        ));
    }
    Ok(())
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallLayoutRequest {
    pub wall: WallId,
    pub count: u32,
    pub height_position: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    /// Defaults to the wall's length in the room
    #[serde(default)]
    pub wall_length: Option<f64>,
}

/// Lay out artworks along one room wall
pub async fn layout_wall(
    State(state): State<AppState>,
    Json(req): Json<WallLayoutRequest>,
) -> ApiResult<WallLayout> {
    check_count("count", req.count)?;
    let length = req
        .wall_length
        .unwrap_or_else(|| req.wall.length(&req.dimensions));
    check_length(length)?;

    let layout = solve_wall_with_clearance(
        req.wall,
        length,
        req.count,
        &req.dimensions,
        req.height_position,
        state.wall_clearance,
    );
    tracing::debug!("Laid out {} artworks on {} wall", layout.len(), req.wall);
    Ok(Json(layout))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWallLayoutRequest {
    pub wall: CustomWall,
    pub count: u32,
    pub height_position: f64,
}

/// Lay out artworks along an interior wall
pub async fn layout_custom_wall(
    State(state): State<AppState>,
    Json(req): Json<CustomWallLayoutRequest>,
) -> ApiResult<WallLayout> {
    check_count("count", req.count)?;
    check_length(req.wall.length)?;
    Ok(Json(solve_custom_wall(
        &req.wall,
        req.count,
        req.height_position,
        state.wall_clearance,
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub walls: WallConfigs,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub custom_placements: Vec<ArtworkPlacement>,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub placements: Vec<ArtworkPlacement>,
}

/// Generated placements for all four walls followed by the custom ones
pub async fn layout_merge(
    State(state): State<AppState>,
    Json(req): Json<MergeRequest>,
) -> ApiResult<MergeResponse> {
    for (wall, config) in req.walls.iter() {
        check_count(&format!("walls.{wall}.count"), config.count)?;
    }
    let placements = merge_placements_with_clearance(
        &req.walls,
        &req.dimensions,
        &req.custom_placements,
        state.wall_clearance,
    );
    Ok(Json(MergeResponse { placements }))
}

/// Lenient load: fill defaults and clamp minimums, return the normalized document
pub async fn normalize_template(Json(doc): Json<Value>) -> ApiResult<Value> {
    let template = GalleryTemplate::from_document(doc).map_err(bad_request)?;
    let normalized = template.to_document().map_err(bad_request)?;
    Ok(Json(normalized))
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

/// Save-time validation; 422 with field errors when the template is not saveable.
///
/// Values are checked as sent: missing fields take defaults but nothing is clamped.
pub async fn validate_template(Json(doc): Json<Value>) -> Response {
    let template: GalleryTemplate = match serde_json::from_value(doc) {
        Ok(t) => t,
        Err(e) => return bad_request(TemplateError::from(e)).into_response(),
    };

    match template.validate() {
        Ok(()) => Json(ValidationResponse {
            valid: true,
            errors: Vec::new(),
        })
        .into_response(),
        Err(errors) => {
            tracing::debug!("Template failed validation: {errors}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse {
                    valid: false,
                    errors: errors.errors,
                }),
            )
                .into_response()
        }
    }
}
