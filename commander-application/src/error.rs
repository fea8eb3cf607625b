use crate::validation::ValidationErrors;
use commander_domain::entity::CommandId;
use commander_domain::error::DomainError;
use http::StatusCode;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("command not found: id={id}")]
    NotFound { id: CommandId },

    #[error("persistence: {0}")]
    Persistence(String),
}

impl AppError {
    /// 对外状态码；来自存储的错误（包括存储层的 `NotFound`）一律为 500
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Domain(_) | Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 稳定的机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound { .. } => "not_found",
            Self::Domain(DomainError::InvalidArgument { .. }) => "invalid_argument",
            Self::Domain(_) | Self::Persistence(_) => "persistence_failure",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
