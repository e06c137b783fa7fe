//! Boredom dial server: rooms of participants sharing a live aggregated
//! 0-100 value over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin taikutsu-server
//! cargo run --bin taikutsu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;

use taikutsu_server::{
    domain::{RoomRegistry, StatsPusher, default_profiles},
    infrastructure::{
        message_pusher::WebSocketStatsPusher, repository::InMemoryRoomRegistry,
    },
    tasks::{
        bots::{seed_bots, spawn_bot_drivers},
        sweeper::spawn_room_sweeper,
    },
    ui::Server,
    usecase::{
        BroadcastStatsUseCase, CreateRoomUseCase, GetHealthUseCase, GetRoomStatsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, RenameParticipantUseCase, UpdateBoredomUseCase,
    },
};
use taikutsu_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "taikutsu-server")]
#[command(about = "Live group boredom dial server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds between room expiry sweeps
    #[arg(long, default_value = "60")]
    sweep_interval_secs: u64,

    /// Idle seconds after which an empty room is evicted
    #[arg(long, default_value = "3600")]
    room_idle_secs: u64,

    /// Disable the simulated participants in the global room
    #[arg(long)]
    no_bots: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. StatsPusher
    // 3. UseCases
    // 4. Background tasks
    // 5. Server

    // 1. Create Registry (in-memory, seeds the global room)
    let registry: Arc<dyn RoomRegistry> =
        Arc::new(InMemoryRoomRegistry::new(Arc::new(SystemClock)));

    // 2. Create StatsPusher (WebSocket implementation)
    let pusher: Arc<dyn StatsPusher> = Arc::new(WebSocketStatsPusher::new());

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), pusher.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone(), pusher.clone()));
    let update_boredom_usecase = Arc::new(UpdateBoredomUseCase::new(registry.clone()));
    let rename_participant_usecase = Arc::new(RenameParticipantUseCase::new(registry.clone()));
    let broadcast_stats_usecase = Arc::new(BroadcastStatsUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(registry.clone()));
    let get_room_stats_usecase = Arc::new(GetRoomStatsUseCase::new(registry.clone()));
    let get_health_usecase = Arc::new(GetHealthUseCase::new(registry.clone()));

    // 4. Spawn background tasks (bot drivers and the expiry sweeper)
    if !args.no_bots {
        let profiles = default_profiles();
        seed_bots(registry.clone(), &profiles).await;
        spawn_bot_drivers(registry.clone(), broadcast_stats_usecase.clone(), profiles);
    }
    spawn_room_sweeper(
        registry.clone(),
        Duration::from_secs(args.sweep_interval_secs),
        Duration::from_secs(args.room_idle_secs),
    );

    // 5. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        update_boredom_usecase,
        rename_participant_usecase,
        broadcast_stats_usecase,
        create_room_usecase,
        get_room_stats_usecase,
        get_health_usecase,
        pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
