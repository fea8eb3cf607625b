use commander_domain::entity::CommandId;
use http::StatusCode;

/// 控制器操作的成功结果
///
/// 失败结果统一以 [`AppError`](crate::error::AppError) 表达；
/// 接口层负责将本类型转换为具体的传输响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    /// 200，附带响应体
    Ok(T),
    /// 201，附带响应体，以及可用于重新获取该资源的具名路由与标识
    CreatedAtRoute {
        route_name: &'static str,
        id: CommandId,
        value: T,
    },
    /// 204，无响应体
    NoContent,
}

impl<T> ActionResult<T> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ok(_) => StatusCode::OK,
            Self::CreatedAtRoute { .. } => StatusCode::CREATED,
            Self::NoContent => StatusCode::NO_CONTENT,
        }
    }

    /// 响应体（若有）
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) | Self::CreatedAtRoute { value, .. } => Some(value),
            Self::NoContent => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ok(value) | Self::CreatedAtRoute { value, .. } => Some(value),
            Self::NoContent => None,
        }
    }
}
