use crate::state::RouteTable;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use commander_application::ActionResult;
use commander_application::error::AppError;
use commander_application::validation::ValidationErrors;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};

/// 接口层错误：应用层错误，或请求在进入控制器之前就被拒绝
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{field}: {message}")]
    Rejected {
        status: StatusCode,
        field: &'static str,
        message: String,
    },
}

impl ApiError {
    pub(crate) fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::rejected("body", rejection.status(), rejection.body_text())
    }

    pub(crate) fn from_path_rejection(rejection: PathRejection) -> Self {
        Self::rejected("id", rejection.status(), rejection.body_text())
    }

    // 除请求体过大外，一律视为 400
    fn rejected(field: &'static str, status: StatusCode, message: String) -> Self {
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::Rejected {
            status,
            field,
            message,
        }
    }
}

#[must_use]
pub(crate) fn api_error_body(code: &str, message: &str, details: Value) -> Json<Value> {
    Json(json!({
        "error": {
            "code": code,
            "message": message,
            "details": details,
        }
    }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => {
                let status = err.status();
                let details = match &err {
                    AppError::Validation(errors) => json!(errors),
                    AppError::NotFound { id } => json!({ "id": id }),
                    _ => Value::Null,
                };
                let message = if status.is_server_error() {
                    error!(error = %err, "request failed");
                    "internal server error".to_string()
                } else {
                    err.to_string()
                };
                (status, api_error_body(err.code(), &message, details)).into_response()
            }
            Self::Rejected {
                status,
                field,
                message,
            } => {
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "validation_failed"
                };
                let details = json!(ValidationErrors::single(field, message.as_str()));
                (status, api_error_body(code, &message, details)).into_response()
            }
        }
    }
}

/// 将控制器结果渲染为 HTTP 响应；`CreatedAtRoute` 通过路由表解析出 `Location`
pub(crate) fn render<T: Serialize>(result: ActionResult<T>, routes: &RouteTable) -> Response {
    match result {
        ActionResult::Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        ActionResult::CreatedAtRoute {
            route_name,
            id,
            value,
        } => {
            let mut resp = (StatusCode::CREATED, Json(value)).into_response();
            match routes
                .url_for(route_name, id)
                .and_then(|url| HeaderValue::from_str(&url).ok())
            {
                Some(location) => {
                    resp.headers_mut().insert(header::LOCATION, location);
                }
                None => warn!(route_name, id, "no route registered for created resource"),
            }
            resp
        }
        ActionResult::NoContent => StatusCode::NO_CONTENT.into_response(),
    }
}
