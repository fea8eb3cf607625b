//! 命令记录 HTTP 接口（commander-api）
//!
//! 将 `CommandsController` 暴露为 REST 资源：
//! - `GET {prefix}` / `POST {prefix}`
//! - `GET|PUT|DELETE {prefix}/:id`
//! - `GET /healthz`
//!
pub mod config;
mod handlers;
mod request_tracing;
pub mod response;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use commander_domain::entity::Command;
use commander_domain::persist::CommandStore;

pub use config::{ApiConfig, ConfigError, StorageBackend};
pub use request_tracing::REQUEST_ID_HEADER;
pub use state::{AppState, RouteTable};

pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: CommandStore + 'static,
{
    let prefix = state.routes.prefix().to_string();
    let by_id = format!("{prefix}/:id");

    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route(
            &prefix,
            get(handlers::list_commands::<S>).post(handlers::create_command::<S>),
        )
        .route(
            &by_id,
            get(handlers::get_command::<S>)
                .put(handlers::update_command::<S>)
                .delete(handlers::delete_command::<S>),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_tracing::request_tracing_middleware::<S>,
        ))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// 演示用初始数据
pub fn sample_commands() -> Vec<Command> {
    vec![
        Command::builder()
            .how_to("How to generate a migration")
            .platform(".Net Core EF")
            .command_line("dotnet ef migrations add <Name>")
            .build(),
        Command::builder()
            .how_to("Apply migrations to the database")
            .platform(".Net Core EF")
            .command_line("dotnet ef database update")
            .build(),
        Command::builder()
            .how_to("Run unit tests")
            .platform("xUnit")
            .command_line("dotnet test")
            .build(),
    ]
}
