//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::StatsPusher;
use crate::usecase::{
    BroadcastStatsUseCase, CreateRoomUseCase, GetHealthUseCase, GetRoomStatsUseCase,
    JoinRoomUseCase, LeaveRoomUseCase, RenameParticipantUseCase, UpdateBoredomUseCase,
};

use super::{
    handler::{
        http::{create_room, get_room_stats, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Boredom dial server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
pub struct Server {
    /// JoinRoomUseCase（参加者接続のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（参加者切断のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// UpdateBoredomUseCase（値更新のユースケース）
    update_boredom_usecase: Arc<UpdateBoredomUseCase>,
    /// RenameParticipantUseCase（表示名更新のユースケース）
    rename_participant_usecase: Arc<RenameParticipantUseCase>,
    /// BroadcastStatsUseCase（統計ブロードキャストのユースケース）
    broadcast_stats_usecase: Arc<BroadcastStatsUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetRoomStatsUseCase（ルーム統計取得のユースケース）
    get_room_stats_usecase: Arc<GetRoomStatsUseCase>,
    /// GetHealthUseCase（ヘルスチェックのユースケース）
    get_health_usecase: Arc<GetHealthUseCase>,
    /// StatsPusher（シャットダウン時に全接続を閉じるために保持する）
    pusher: Arc<dyn StatsPusher>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        update_boredom_usecase: Arc<UpdateBoredomUseCase>,
        rename_participant_usecase: Arc<RenameParticipantUseCase>,
        broadcast_stats_usecase: Arc<BroadcastStatsUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        get_room_stats_usecase: Arc<GetRoomStatsUseCase>,
        get_health_usecase: Arc<GetHealthUseCase>,
        pusher: Arc<dyn StatsPusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            update_boredom_usecase,
            rename_participant_usecase,
            broadcast_stats_usecase,
            create_room_usecase,
            get_room_stats_usecase,
            get_health_usecase,
            pusher,
        }
    }

    /// Run the boredom dial server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let pusher = self.pusher.clone();
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            update_boredom_usecase: self.update_boredom_usecase,
            rename_participant_usecase: self.rename_participant_usecase,
            broadcast_stats_usecase: self.broadcast_stats_usecase,
            create_room_usecase: self.create_room_usecase,
            get_room_stats_usecase: self.get_room_stats_usecase,
            get_health_usecase: self.get_health_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/api/rooms", post(create_room))
            .route("/api/rooms/{room_id}", get(get_room_stats))
            // 管理サーフェスは任意のオリジンから呼べる
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Boredom dial server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // On shutdown, close every live session channel first so the
        // WebSocket loops exit and clients get a clean closure instead of an
        // abrupt severance.
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                pusher.close_all().await;
            })
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
