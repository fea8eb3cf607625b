use crate::response::{ApiError, render};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use commander_application::CommandsController;
use commander_application::context::AppContext;
use commander_application::dto::{CommandCreateDto, CommandUpdateDto};
use commander_application::error::AppError;
use commander_domain::entity::CommandId;
use commander_domain::persist::CommandStore;
use serde_json::json;

type HandlerResult = Result<Response, ApiError>;

// 每个请求开启独立的仓储单元，并以共享映射表构造控制器
async fn controller<S>(state: &AppState<S>) -> Result<CommandsController<S::Repository>, ApiError>
where
    S: CommandStore,
{
    let repository = state.store.repository().await.map_err(AppError::from)?;
    Ok(CommandsController::new(repository, state.mapper))
}

fn path_id(path: Result<Path<CommandId>, PathRejection>) -> Result<CommandId, ApiError> {
    path.map(|Path(id)| id).map_err(ApiError::from_path_rejection)
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn list_commands<S>(
    State(state): State<AppState<S>>,
    Extension(ctx): Extension<AppContext>,
) -> HandlerResult
where
    S: CommandStore + 'static,
{
    let result = controller(&state).await?.get_all_commands(&ctx).await?;
    Ok(render(result, &state.routes))
}

pub(crate) async fn get_command<S>(
    State(state): State<AppState<S>>,
    Extension(ctx): Extension<AppContext>,
    path: Result<Path<CommandId>, PathRejection>,
) -> HandlerResult
where
    S: CommandStore + 'static,
{
    let id = path_id(path)?;
    let result = controller(&state).await?.get_command_by_id(&ctx, id).await?;
    Ok(render(result, &state.routes))
}

pub(crate) async fn create_command<S>(
    State(state): State<AppState<S>>,
    Extension(ctx): Extension<AppContext>,
    payload: Result<Json<CommandCreateDto>, JsonRejection>,
) -> HandlerResult
where
    S: CommandStore + 'static,
{
    let Json(dto) = payload.map_err(ApiError::from_json_rejection)?;
    let result = controller(&state).await?.create_command(&ctx, dto).await?;
    Ok(render(result, &state.routes))
}

pub(crate) async fn update_command<S>(
    State(state): State<AppState<S>>,
    Extension(ctx): Extension<AppContext>,
    path: Result<Path<CommandId>, PathRejection>,
    payload: Result<Json<CommandUpdateDto>, JsonRejection>,
) -> HandlerResult
where
    S: CommandStore + 'static,
{
    let id = path_id(path)?;
    let Json(dto) = payload.map_err(ApiError::from_json_rejection)?;
    let result = controller(&state)
        .await?
        .update_command(&ctx, id, dto)
        .await?;
    Ok(render(result, &state.routes))
}

pub(crate) async fn delete_command<S>(
    State(state): State<AppState<S>>,
    Extension(ctx): Extension<AppContext>,
    path: Result<Path<CommandId>, PathRejection>,
) -> HandlerResult
where
    S: CommandStore + 'static,
{
    let id = path_id(path)?;
    let result = controller(&state).await?.delete_command(&ctx, id).await?;
    Ok(render(result, &state.routes))
}
