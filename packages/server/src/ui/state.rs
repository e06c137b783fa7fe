//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    BroadcastStatsUseCase, CreateRoomUseCase, GetHealthUseCase, GetRoomStatsUseCase,
    JoinRoomUseCase, LeaveRoomUseCase, RenameParticipantUseCase, UpdateBoredomUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（参加者接続のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（参加者切断のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// UpdateBoredomUseCase（値更新のユースケース）
    pub update_boredom_usecase: Arc<UpdateBoredomUseCase>,
    /// RenameParticipantUseCase（表示名更新のユースケース）
    pub rename_participant_usecase: Arc<RenameParticipantUseCase>,
    /// BroadcastStatsUseCase（統計ブロードキャストのユースケース）
    pub broadcast_stats_usecase: Arc<BroadcastStatsUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetRoomStatsUseCase（ルーム統計取得のユースケース）
    pub get_room_stats_usecase: Arc<GetRoomStatsUseCase>,
    /// GetHealthUseCase（ヘルスチェックのユースケース）
    pub get_health_usecase: Arc<GetHealthUseCase>,
}
