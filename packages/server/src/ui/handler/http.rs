//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{
        CreateRoomRequest, CreateRoomResponse, ErrorDto, HealthDto, RoomStatsDto,
    },
    ui::state::AppState,
    usecase::GetRoomStatsError,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let report = state.get_health_usecase.execute().await;
    Json(HealthDto {
        status: "ok".to_string(),
        rooms: report.rooms,
        global_users: report.global_live_users,
    })
}

/// Create a room with an optional display name.
///
/// The body is optional; a present but malformed body is a 400 and no room
/// is created.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreateRoomResponse>, (StatusCode, Json<ErrorDto>)> {
    let request: CreateRoomRequest = if body.is_empty() {
        CreateRoomRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected create-room request with malformed body: {}", e);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "Invalid request body".to_string(),
                    }),
                ));
            }
        }
    };

    match state.create_room_usecase.execute(request.name).await {
        Ok(summary) => Ok(Json(CreateRoomResponse {
            room_id: summary.code.into_string(),
            room_name: summary.name.into_string(),
        })),
        Err(e) => {
            tracing::error!("Create room failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto {
                    error: "Failed to create room".to_string(),
                }),
            ))
        }
    }
}

/// Get room stats by identifier. Unlike join resolution, admin lookups do
/// not fall back to the global room.
pub async fn get_room_stats(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomStatsDto>, (StatusCode, Json<ErrorDto>)> {
    match state.get_room_stats_usecase.execute(room_id).await {
        Ok((summary, stats)) => Ok(Json(RoomStatsDto::from_room_stats(
            &summary.code,
            &summary.name,
            stats,
        ))),
        Err(GetRoomStatsError::RoomNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "Room not found".to_string(),
            }),
        )),
    }
}
